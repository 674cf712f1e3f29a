//! Document → `Profile` extraction
//!
//! Extraction is all-or-nothing: the first missing structural anchor aborts
//! with an `ExtractionError` naming the selector path, and nothing partial is
//! ever returned. Degrading to a cached copy is the coordinator's decision,
//! not the extractor's.
//!
//! # Example
//!
//! ```
//! use profile_grabber::document::HtmlDocument;
//! use profile_grabber::extract::extract_profile;
//!
//! let doc = HtmlDocument::parse("<html><body></body></html>");
//! assert!(extract_profile(&doc.root()).is_err());
//! ```

mod error;
mod experience;
mod fields;
mod sections;
pub mod selectors;

pub use error::{ExtractResult, ExtractionError};
pub use experience::ExperienceShape;
pub use fields::strip_affordance_labels;

use crate::document::{DocumentNode, HtmlDocument};
use crate::profile::Profile;
use chrono::Utc;
use experience::extract_experience;
use fields::{find_all, map_items, required_text};
use sections::{extract_certification, extract_education, extract_project};

const ROOT_PATH: &str = "profile";

/// Extract a complete profile from the document rooted at `root`.
pub fn extract_profile<N: DocumentNode>(root: &N) -> ExtractResult<Profile> {
    let name = required_text(root, ROOT_PATH, selectors::NAME)?;
    let headline = required_text(root, ROOT_PATH, selectors::HEADLINE)?;
    let summary = required_text(root, ROOT_PATH, selectors::SUMMARY)?;

    let items = find_all(root, ROOT_PATH, selectors::EXPERIENCE_ITEMS)?;
    let experience = map_items(&items, ROOT_PATH, "experience", extract_experience)?;

    let items = find_all(root, ROOT_PATH, selectors::EDUCATION_ITEMS)?;
    let education = map_items(&items, ROOT_PATH, "education", extract_education)?;

    let items = find_all(root, ROOT_PATH, selectors::PROJECT_ITEMS)?;
    let projects = map_items(&items, ROOT_PATH, "projects", extract_project)?;

    let items = find_all(root, ROOT_PATH, selectors::CERTIFICATION_ITEMS)?;
    let certifications = map_items(&items, ROOT_PATH, "certifications", extract_certification)?;

    Ok(Profile {
        generated_at: Utc::now(),
        name,
        headline,
        summary,
        experience,
        education,
        projects,
        certifications,
    })
}

/// Parse a rendered HTML snapshot and extract the profile from it
pub fn extract_profile_from_html(html: &str) -> ExtractResult<Profile> {
    let document = HtmlDocument::parse(html);
    let profile = extract_profile(&document.root())?;
    tracing::debug!(
        experience = profile.experience.len(),
        education = profile.education.len(),
        projects = profile.projects.len(),
        certifications = profile.certifications.len(),
        "extracted profile"
    );
    Ok(profile)
}
