//! Education, project, and certification extraction

use super::error::ExtractResult;
use super::fields::{
    attribute, date_pair, description, find, find_all, join, required_text, start_end_dates, text,
};
use super::selectors::{
    CERTIFICATION_DATES, CERTIFICATION_IMAGE, CERTIFICATION_INSTITUTION, CERTIFICATION_TITLE,
    DELAYED_URL_ATTR, EDUCATION_SUBTITLE_PARTS, EDUCATION_TITLE, PROJECT_TITLE,
};
use crate::document::DocumentNode;
use crate::profile::{Certification, Education, Project};

pub(crate) fn extract_education<N: DocumentNode>(item: &N, path: &str) -> ExtractResult<Education> {
    let title = required_text(item, path, EDUCATION_TITLE)?;

    // Degree and field of study render as separate spans
    let parts = find_all(item, path, EDUCATION_SUBTITLE_PARTS)?;
    let mut pieces = Vec::with_capacity(parts.len());
    for (i, part) in parts.iter().enumerate() {
        let piece = text(part, &format!("{}[{}]", join(path, EDUCATION_SUBTITLE_PARTS), i))?;
        if !piece.is_empty() {
            pieces.push(piece);
        }
    }
    let subtitle = pieces.join(" ");

    let description = description(item, path)?;
    let (start_date, end_date) = start_end_dates(item, path)?;
    Ok(Education {
        title,
        subtitle,
        start_date,
        end_date,
        description,
    })
}

pub(crate) fn extract_project<N: DocumentNode>(item: &N, path: &str) -> ExtractResult<Project> {
    let title = required_text(item, path, PROJECT_TITLE)?;
    let (start_date, end_date) = start_end_dates(item, path)?;
    let description = description(item, path)?;
    Ok(Project {
        title,
        start_date,
        end_date,
        description,
    })
}

pub(crate) fn extract_certification<N: DocumentNode>(item: &N, path: &str) -> ExtractResult<Certification> {
    let title = required_text(item, path, CERTIFICATION_TITLE)?;
    let institution = required_text(item, path, CERTIFICATION_INSTITUTION)?;
    let image_url = match find(item, path, CERTIFICATION_IMAGE)? {
        Some(img) => attribute(&img, &join(path, CERTIFICATION_IMAGE), DELAYED_URL_ATTR)?,
        None => None,
    };
    let (issued_on, expires_on) = date_pair(item, path, CERTIFICATION_DATES)?;
    Ok(Certification {
        title,
        institution,
        image_url,
        issued_on,
        expires_on,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::HtmlDocument;
    use crate::extract::ExtractionError;

    #[test]
    fn test_education_subtitle_joins_spans() {
        let doc = HtmlDocument::parse(
            r#"<li>
                <h3><a href="/school">State University</a></h3>
                <h4><span>Bachelor of Science</span><span>Computer Science</span></h4>
                <span class="date-range"><time>2008</time><time>2012</time></span>
                <p class="show-more-less-text__text--less">Dean's list</p>
            </li>"#,
        );
        let li = doc.root().find("li").unwrap().unwrap();
        let education = extract_education(&li, "education[0]").unwrap();
        assert_eq!(education.title, "State University");
        assert_eq!(education.subtitle, "Bachelor of Science Computer Science");
        assert_eq!(education.start_date, "2008");
        assert_eq!(education.end_date, "2012");
        assert_eq!(education.description, "Dean's list");
    }

    #[test]
    fn test_project_open_ended() {
        let doc = HtmlDocument::parse(
            r#"<li>
                <div><h3>Side Project</h3></div>
                <span class="date-range"><time>Feb 2022</time></span>
                <p class="show-more-less-text__text--more">A tool. Show less</p>
            </li>"#,
        );
        let li = doc.root().find("li").unwrap().unwrap();
        let project = extract_project(&li, "projects[0]").unwrap();
        assert_eq!(project.title, "Side Project");
        assert_eq!(project.start_date, "Feb 2022");
        assert_eq!(project.end_date, "");
        assert_eq!(project.description, "A tool.");
    }

    #[test]
    fn test_certification_dates_and_image() {
        let doc = HtmlDocument::parse(
            r#"<li>
                <img data-delayed-url="https://media/cert.png">
                <h3>Cloud Architect</h3>
                <h4><a href="/org">Cloud Co</a></h4>
                <div><span><time>Jan 2023</time></span></div>
            </li>"#,
        );
        let li = doc.root().find("li").unwrap().unwrap();
        let cert = extract_certification(&li, "certifications[0]").unwrap();
        assert_eq!(cert.title, "Cloud Architect");
        assert_eq!(cert.institution, "Cloud Co");
        assert_eq!(cert.image_url.as_deref(), Some("https://media/cert.png"));
        assert_eq!(cert.issued_on.as_deref(), Some("Jan 2023"));
        assert_eq!(cert.expires_on, None);
    }

    #[test]
    fn test_certification_without_dates_or_image() {
        let doc = HtmlDocument::parse(r#"<li><h3>Cert</h3><h4><a>Board</a></h4></li>"#);
        let li = doc.root().find("li").unwrap().unwrap();
        let cert = extract_certification(&li, "certifications[0]").unwrap();
        assert_eq!(cert.image_url, None);
        assert_eq!(cert.issued_on, None);
        assert_eq!(cert.expires_on, None);
    }

    #[test]
    fn test_certification_missing_institution() {
        let doc = HtmlDocument::parse(r#"<li><h3>Cert</h3></li>"#);
        let li = doc.root().find("li").unwrap().unwrap();
        let err = extract_certification(&li, "certifications[0]").unwrap_err();
        assert!(matches!(err, ExtractionError::MissingNode { .. }));
        assert_eq!(err.path(), "certifications[0] > h4 > a");
    }
}
