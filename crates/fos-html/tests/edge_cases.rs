//! Edge case tests for fos-html
//!
//! Covers the markup shapes audit fixtures rely on.

use fos_html::{Document, HtmlParser};

fn parse(html: &str) -> Document {
    HtmlParser::new().parse(html).unwrap()
}

fn first_by_tag<'a>(doc: &'a Document, tag: &str) -> Option<fos_dom::ElementRef<'a>> {
    doc.descendants()
        .find(|&id| doc.tag(id) == Some(tag))
        .and_then(|id| doc.element(id))
}

// ============================================================================
// EMPTY AND MALFORMED INPUT
// ============================================================================

#[test]
fn test_parse_only_whitespace() {
    let doc = parse("   \t\n\r\n   ");
    assert!(doc.body().is_valid());
    assert!(doc.body_element().unwrap().first_element_child().is_none());
}

#[test]
fn test_parse_unclosed_tags() {
    let doc = parse("<div><p><span>text");
    let span = first_by_tag(&doc, "span").unwrap();
    assert_eq!(span.text_content(), "text");
}

#[test]
fn test_parse_mismatched_tags() {
    let doc = parse("<div><p></div></p>");
    assert!(first_by_tag(&doc, "div").is_some());
}

// ============================================================================
// ATTRIBUTES
// ============================================================================

#[test]
fn test_parse_attribute_no_value() {
    let doc = parse("<dialog open><button disabled>Go</button></dialog>");
    let dialog = first_by_tag(&doc, "dialog").unwrap();
    assert_eq!(dialog.attr("open"), Some(""));
    assert!(first_by_tag(&doc, "button").unwrap().has_attr("disabled"));
}

#[test]
fn test_parse_attribute_names_lowercased() {
    let doc = parse(r#"<div ARIA-LIVE="polite" Role="status">x</div>"#);
    let div = first_by_tag(&doc, "div").unwrap();
    assert_eq!(div.attr("aria-live"), Some("polite"));
    assert_eq!(div.attr("role"), Some("status"));
}

#[test]
fn test_parse_entities_in_text() {
    let doc = parse("<p>Fish &amp; Chips</p>");
    assert_eq!(first_by_tag(&doc, "p").unwrap().text_content(), "Fish & Chips");
}

// ============================================================================
// STRUCTURE
// ============================================================================

#[test]
fn test_parse_title_trimmed() {
    let doc = parse("<title>  Home  </title><p>x</p>");
    assert_eq!(doc.title(), "Home");
}

#[test]
fn test_parse_svg_title() {
    let doc = parse("<svg><title>Logo</title></svg>");
    let svg = first_by_tag(&doc, "svg").unwrap();
    assert_eq!(svg.first_element_child().unwrap().tag_name(), "title");
}

#[test]
fn test_parse_table_gets_tbody() {
    let doc = parse("<table><tr><th>A</th><td>1</td></tr></table>");
    let tr = first_by_tag(&doc, "tr").unwrap();
    assert_eq!(tr.parent_element().unwrap().tag_name(), "tbody");
}

#[test]
fn test_parse_whitespace_text_dropped() {
    let doc = parse("<ul>\n  <li>a</li>\n  <li>b</li>\n</ul>");
    let ul = first_by_tag(&doc, "ul").unwrap();
    let count = doc.tree().children(ul.id()).count();
    assert_eq!(count, 2);
}

#[test]
fn test_parse_deeply_nested() {
    let depth = 200;
    let html = format!("{}x{}", "<div>".repeat(depth), "</div>".repeat(depth));
    let doc = parse(&html);
    let divs = doc.descendants().filter(|&id| doc.tag(id) == Some("div")).count();
    assert_eq!(divs, depth);
}
