//! Field-level helpers shared by every section extractor

use super::error::{ExtractResult, ExtractionError};
use super::selectors::{AFFORDANCE_LABELS, DATE_RANGE, DESCRIPTION_LESS, DESCRIPTION_MORE};
use crate::document::DocumentNode;

/// Append a selector to a path
pub(crate) fn join(path: &str, segment: &str) -> String {
    format!("{} > {}", path, segment)
}

pub(crate) fn find<N: DocumentNode>(node: &N, path: &str, selector: &str) -> ExtractResult<Option<N>> {
    node.find(selector).map_err(|source| ExtractionError::Document {
        path: join(path, selector),
        source,
    })
}

pub(crate) fn find_all<N: DocumentNode>(node: &N, path: &str, selector: &str) -> ExtractResult<Vec<N>> {
    node.find_all(selector).map_err(|source| ExtractionError::Document {
        path: join(path, selector),
        source,
    })
}

pub(crate) fn text<N: DocumentNode>(node: &N, path: &str) -> ExtractResult<String> {
    node.text().map_err(|source| ExtractionError::Document {
        path: path.to_string(),
        source,
    })
}

pub(crate) fn attribute<N: DocumentNode>(node: &N, path: &str, name: &str) -> ExtractResult<Option<String>> {
    node.attribute(name).map_err(|source| ExtractionError::Document {
        path: format!("{}[{}]", path, name),
        source,
    })
}

/// First node matching `selector`, or `MissingNode`
pub(crate) fn required<N: DocumentNode>(node: &N, path: &str, selector: &str) -> ExtractResult<N> {
    find(node, path, selector)?.ok_or_else(|| ExtractionError::MissingNode {
        path: join(path, selector),
    })
}

/// Text of the first node matching `selector`
pub(crate) fn required_text<N: DocumentNode>(node: &N, path: &str, selector: &str) -> ExtractResult<String> {
    let found = required(node, path, selector)?;
    text(&found, &join(path, selector))
}

/// Like `required_text`, but empty text is also a failure
pub(crate) fn non_empty_text<N: DocumentNode>(node: &N, path: &str, selector: &str) -> ExtractResult<String> {
    let value = required_text(node, path, selector)?;
    if value.is_empty() {
        return Err(ExtractionError::EmptyText {
            path: join(path, selector),
        });
    }
    Ok(value)
}

/// Map every item, failing the whole list on the first error.
///
/// Each item is addressed as `label[i]` in error paths.
pub(crate) fn map_items<N, T, F>(items: &[N], path: &str, label: &str, f: F) -> ExtractResult<Vec<T>>
where
    N: DocumentNode,
    F: Fn(&N, &str) -> ExtractResult<T>,
{
    items
        .iter()
        .enumerate()
        .map(|(i, item)| f(item, &join(path, &format!("{}[{}]", label, i))))
        .collect()
}

/// Text of the first two nodes matching `selector`, as (first, second).
///
/// Missing slots are `None`; this is never an error.
pub(crate) fn date_pair<N: DocumentNode>(
    node: &N,
    path: &str,
    selector: &str,
) -> ExtractResult<(Option<String>, Option<String>)> {
    let dates = find_all(node, path, selector)?;
    let slot = |i: usize| -> ExtractResult<Option<String>> {
        dates
            .get(i)
            .map(|date| text(date, &format!("{}[{}]", join(path, selector), i)))
            .transpose()
    };
    Ok((slot(0)?, slot(1)?))
}

/// Start and end of a `span.date-range`; an absent slot reads as empty.
pub(crate) fn start_end_dates<N: DocumentNode>(node: &N, path: &str) -> ExtractResult<(String, String)> {
    let (start, end) = date_pair(node, path, DATE_RANGE)?;
    Ok((start.unwrap_or_default(), end.unwrap_or_default()))
}

/// Full description text, preferring the expanded variant.
pub(crate) fn description<N: DocumentNode>(node: &N, path: &str) -> ExtractResult<String> {
    let (found, selector) = match find(node, path, DESCRIPTION_MORE)? {
        Some(more) => (more, DESCRIPTION_MORE),
        None => match find(node, path, DESCRIPTION_LESS)? {
            Some(less) => (less, DESCRIPTION_LESS),
            None => {
                return Err(ExtractionError::MissingNode {
                    path: join(path, &format!("{} | {}", DESCRIPTION_MORE, DESCRIPTION_LESS)),
                })
            }
        },
    };
    let raw = text(&found, &join(path, selector))?;
    Ok(strip_affordance_labels(&raw))
}

/// Remove every "Show more"/"Show less" label and trim what remains
pub fn strip_affordance_labels(text: &str) -> String {
    let mut out = text.to_string();
    for label in AFFORDANCE_LABELS {
        out = out.replace(label, "");
    }
    out.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::HtmlDocument;

    #[test]
    fn test_strip_affordance_labels() {
        assert_eq!(strip_affordance_labels("Foo bar... Show more"), "Foo bar...");
        assert_eq!(strip_affordance_labels("Full text\nShow less"), "Full text");
        assert_eq!(strip_affordance_labels("Show moreShow less"), "");
        assert_eq!(strip_affordance_labels("plain"), "plain");
    }

    #[test]
    fn test_description_prefers_more() {
        let doc = HtmlDocument::parse(
            r#"<li>
                <p class="show-more-less-text__text--less">Short... Show more</p>
                <p class="show-more-less-text__text--more">Short and then the rest. Show less</p>
            </li>"#,
        );
        let li = doc.root().find("li").unwrap().unwrap();
        assert_eq!(description(&li, "item").unwrap(), "Short and then the rest.");
    }

    #[test]
    fn test_description_falls_back_to_less() {
        let doc = HtmlDocument::parse(
            r#"<li><p class="show-more-less-text__text--less">Foo bar... Show more</p></li>"#,
        );
        let li = doc.root().find("li").unwrap().unwrap();
        let desc = description(&li, "item").unwrap();
        assert_eq!(desc, "Foo bar...");
        assert!(!desc.contains("Show more"));
        assert!(!desc.contains("Show less"));
    }

    #[test]
    fn test_description_missing_is_error() {
        let doc = HtmlDocument::parse("<li><p>No description class</p></li>");
        let li = doc.root().find("li").unwrap().unwrap();
        let err = description(&li, "item").unwrap_err();
        assert!(matches!(err, ExtractionError::MissingNode { .. }));
        assert!(err.path().starts_with("item > "));
    }

    #[test]
    fn test_start_end_dates() {
        let both = HtmlDocument::parse(
            r#"<li><span class="date-range"><time>Jan 2019</time><time>Dec 2021</time></span></li>"#,
        );
        let li = both.root().find("li").unwrap().unwrap();
        assert_eq!(
            start_end_dates(&li, "x").unwrap(),
            ("Jan 2019".to_string(), "Dec 2021".to_string())
        );

        let open = HtmlDocument::parse(r#"<li><span class="date-range"><time>Jan 2019</time></span></li>"#);
        let li = open.root().find("li").unwrap().unwrap();
        assert_eq!(start_end_dates(&li, "x").unwrap(), ("Jan 2019".to_string(), String::new()));

        let none = HtmlDocument::parse("<li><span>no dates</span></li>");
        let li = none.root().find("li").unwrap().unwrap();
        assert_eq!(start_end_dates(&li, "x").unwrap(), (String::new(), String::new()));
    }

    #[test]
    fn test_non_empty_text_rejects_blank() {
        let doc = HtmlDocument::parse(r#"<div><span class="c">   </span></div>"#);
        let div = doc.root().find("div").unwrap().unwrap();
        let err = non_empty_text(&div, "root", "span.c").unwrap_err();
        assert!(matches!(err, ExtractionError::EmptyText { .. }));
        assert_eq!(err.path(), "root > span.c");
    }
}
