//! HTML snapshot backend built on `scraper`
//!
//! The snapshot is the serialized DOM of an already-rendered page, so no
//! script execution happens here.

use super::traits::{DocumentError, DocumentNode, DocumentResult};
use scraper::{ElementRef, Html, Node, Selector};

/// Elements whose boundaries read as line breaks in rendered text
const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "aside", "blockquote", "dd", "div", "dl", "dt", "footer", "h1", "h2",
    "h3", "h4", "h5", "h6", "header", "li", "main", "nav", "ol", "p", "pre", "section", "table",
    "tr", "ul",
];

/// Elements whose text never renders
const HIDDEN_ELEMENTS: &[&str] = &["script", "style", "template", "noscript"];

/// A parsed HTML document
pub struct HtmlDocument {
    html: Html,
}

impl HtmlDocument {
    /// Parse a full HTML document. Parsing is lenient and never fails.
    pub fn parse(source: &str) -> Self {
        Self {
            html: Html::parse_document(source),
        }
    }

    /// The root element of the document
    pub fn root(&self) -> HtmlNode<'_> {
        HtmlNode {
            element: self.html.root_element(),
        }
    }
}

/// A borrowed element inside an `HtmlDocument`
#[derive(Debug, Clone, Copy)]
pub struct HtmlNode<'a> {
    element: ElementRef<'a>,
}

impl<'a> HtmlNode<'a> {
    /// Tag name of the element
    pub fn tag_name(&self) -> &str {
        self.element.value().name()
    }

    fn selector(selector: &str) -> DocumentResult<Selector> {
        Selector::parse(selector).map_err(|e| DocumentError::InvalidSelector {
            selector: selector.to_string(),
            reason: format!("{:?}", e),
        })
    }
}

impl<'a> DocumentNode for HtmlNode<'a> {
    fn find(&self, selector: &str) -> DocumentResult<Option<Self>> {
        let selector = Self::selector(selector)?;
        Ok(self
            .element
            .select(&selector)
            .next()
            .map(|element| HtmlNode { element }))
    }

    fn find_all(&self, selector: &str) -> DocumentResult<Vec<Self>> {
        let selector = Self::selector(selector)?;
        Ok(self
            .element
            .select(&selector)
            .map(|element| HtmlNode { element })
            .collect())
    }

    fn text(&self) -> DocumentResult<String> {
        let mut raw = String::new();
        render_children(self.element, &mut raw);
        Ok(normalize_rendered_text(&raw))
    }

    fn attribute(&self, name: &str) -> DocumentResult<Option<String>> {
        Ok(self.element.value().attr(name).map(str::to_string))
    }
}

/// Append the rendered text of every child of `element`
fn render_children(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        match child.value() {
            // Source line breaks are layout-insignificant
            Node::Text(text) => out.extend(text.chars().map(|c| if c == '\n' || c == '\r' { ' ' } else { c })),
            Node::Element(_) => {
                if let Some(child) = ElementRef::wrap(child) {
                    render_element(child, out);
                }
            }
            _ => {}
        }
    }
}

fn render_element(element: ElementRef<'_>, out: &mut String) {
    let name = element.value().name();
    if HIDDEN_ELEMENTS.contains(&name) {
        return;
    }
    if name == "br" {
        out.push('\n');
        return;
    }
    let block = BLOCK_ELEMENTS.contains(&name);
    if block {
        line_break(out);
    }
    render_children(element, out);
    if block {
        line_break(out);
    }
}

/// Block boundaries: one break, however many boundaries meet
fn line_break(out: &mut String) {
    let content = out.trim_end_matches([' ', '\t']);
    if !content.is_empty() && !content.ends_with('\n') {
        out.push('\n');
    }
}

/// Approximate `innerText`: collapse horizontal whitespace, trim each line,
/// and keep at most one blank line between paragraphs.
fn normalize_rendered_text(raw: &str) -> String {
    let mut lines: Vec<String> = Vec::new();
    for line in raw.lines() {
        let collapsed = line.split_whitespace().collect::<Vec<_>>().join(" ");
        if collapsed.is_empty() && lines.last().map(|l| l.is_empty()).unwrap_or(true) {
            continue;
        }
        lines.push(collapsed);
    }
    while lines.last().map(|l| l.is_empty()).unwrap_or(false) {
        lines.pop();
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_scoped_to_descendants() {
        let doc = HtmlDocument::parse(
            r#"<div id="a"><span class="x">one</span></div><div id="b"><span class="x">two</span></div>"#,
        );
        let b = doc.root().find("div#b").unwrap().unwrap();
        let span = b.find("span.x").unwrap().unwrap();
        assert_eq!(span.text().unwrap(), "two");
        assert!(b.find("div#a").unwrap().is_none());
    }

    #[test]
    fn test_find_all_in_document_order() {
        let doc = HtmlDocument::parse("<ul><li>1</li><li>2</li><li>3</li></ul>");
        let items = doc.root().find_all("ul > li").unwrap();
        let texts: Vec<String> = items.iter().map(|n| n.text().unwrap()).collect();
        assert_eq!(texts, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_text_collapses_whitespace() {
        let doc = HtmlDocument::parse("<p>\n   Hello \n\t  <b>world</b>   </p>");
        let p = doc.root().find("p").unwrap().unwrap();
        assert_eq!(p.text().unwrap(), "Hello world");
    }

    #[test]
    fn test_text_breaks_on_br_and_blocks() {
        let doc = HtmlDocument::parse("<div><p>First<br>line two</p><p>Second</p></div>");
        let div = doc.root().find("div").unwrap().unwrap();
        assert_eq!(div.text().unwrap(), "First\nline two\nSecond");
    }

    #[test]
    fn test_text_breaks_after_closing_block() {
        let doc = HtmlDocument::parse("<div><p>a</p>b</div>");
        let div = doc.root().find("div").unwrap().unwrap();
        assert_eq!(div.text().unwrap(), "a\nb");

        let doc = HtmlDocument::parse(
            "<section>\n  <h3>Title</h3>\n  <span>one</span> <span>two</span>\n</section>",
        );
        let section = doc.root().find("section").unwrap().unwrap();
        assert_eq!(section.text().unwrap(), "Title\none two");
    }

    #[test]
    fn test_text_keeps_blank_line_from_double_br() {
        let doc = HtmlDocument::parse("<p>one<br><br>two</p>");
        let p = doc.root().find("p").unwrap().unwrap();
        assert_eq!(p.text().unwrap(), "one\n\ntwo");
    }

    #[test]
    fn test_text_skips_script() {
        let doc = HtmlDocument::parse("<div>Visible<script>var x = 1;</script></div>");
        let div = doc.root().find("div").unwrap().unwrap();
        assert_eq!(div.text().unwrap(), "Visible");
    }

    #[test]
    fn test_attribute() {
        let doc = HtmlDocument::parse(r#"<img data-delayed-url="https://img/x.png">"#);
        let img = doc.root().find("img").unwrap().unwrap();
        assert_eq!(
            img.attribute("data-delayed-url").unwrap().as_deref(),
            Some("https://img/x.png")
        );
        assert_eq!(img.attribute("alt").unwrap(), None);
        assert_eq!(img.tag_name(), "img");
    }

    #[test]
    fn test_invalid_selector() {
        let doc = HtmlDocument::parse("<p>x</p>");
        let err = doc.root().find("p[[").unwrap_err();
        assert!(matches!(err, DocumentError::InvalidSelector { .. }));
    }
}
