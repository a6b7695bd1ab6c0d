//! Accessible name and role
//!
//! A reduced form of the accname algorithm: aria-labelledby, aria-label,
//! native labelling, name from content, then title and placeholder.
//! Results are whitespace-collapsed.

use crate::aria::AriaRole;
use crate::predicates::is_labelable;
use fos_dom::ElementRef;

/// Role of an element: explicit `role` first, else the implicit mapping
pub fn known_role(el: &ElementRef<'_>) -> Option<AriaRole> {
    if let Some(role) = el.attr("role").and_then(AriaRole::from_attribute) {
        return Some(role);
    }
    implicit_role(el)
}

/// Host-language role for the tags the rules look at
pub fn implicit_role(el: &ElementRef<'_>) -> Option<AriaRole> {
    let role = match el.tag_name() {
        "a" | "area" if el.has_attr("href") => AriaRole::Link,
        "button" => AriaRole::Button,
        "input" => return input_role(el),
        "select" => {
            let size = el.attr("size").and_then(|s| s.parse::<u32>().ok()).unwrap_or(0);
            if el.has_attr("multiple") || size > 1 {
                AriaRole::Listbox
            } else {
                AriaRole::Combobox
            }
        }
        "textarea" => AriaRole::TextBox,
        "img" => {
            if el.attr_is("alt", "") {
                AriaRole::Presentation
            } else {
                AriaRole::Img
            }
        }
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => AriaRole::Heading,
        "nav" => AriaRole::Navigation,
        "main" => AriaRole::Main,
        "aside" => AriaRole::Complementary,
        "header" if !in_sectioning_content(el) => AriaRole::Banner,
        "footer" if !in_sectioning_content(el) => AriaRole::ContentInfo,
        "form" => AriaRole::Form,
        "search" => AriaRole::Search,
        "section" if el.has_attr("aria-label") || el.has_attr("aria-labelledby") => {
            AriaRole::Region
        }
        "table" => AriaRole::Table,
        "tr" => AriaRole::Row,
        "thead" | "tbody" | "tfoot" => AriaRole::RowGroup,
        "td" => AriaRole::Cell,
        "th" => match el.attr("scope") {
            Some("row") | Some("rowgroup") => AriaRole::RowHeader,
            _ => AriaRole::ColumnHeader,
        },
        "ul" | "ol" | "menu" => AriaRole::List,
        "li" => AriaRole::ListItem,
        "dialog" => AriaRole::Dialog,
        "output" => AriaRole::Status,
        "progress" => AriaRole::ProgressBar,
        "meter" => AriaRole::Meter,
        "fieldset" => AriaRole::Group,
        "option" => AriaRole::Option,
        "hr" => AriaRole::Separator,
        "article" => AriaRole::Article,
        "figure" => AriaRole::Figure,
        "summary" => AriaRole::Button,
        _ => return None,
    };
    Some(role)
}

fn input_role(el: &ElementRef<'_>) -> Option<AriaRole> {
    let has_list = el.has_attr("list");
    Some(match el.attr("type").map(str::to_ascii_lowercase).as_deref() {
        Some("hidden") => return None,
        Some("button") | Some("submit") | Some("reset") | Some("image") => AriaRole::Button,
        Some("checkbox") => AriaRole::Checkbox,
        Some("radio") => AriaRole::Radio,
        Some("range") => AriaRole::Slider,
        Some("number") => AriaRole::SpinButton,
        Some("search") if !has_list => AriaRole::SearchBox,
        Some("color") | Some("date") | Some("datetime-local") | Some("month")
        | Some("time") | Some("week") | Some("file") | Some("password") => return None,
        _ if has_list => AriaRole::Combobox,
        _ => AriaRole::TextBox,
    })
}

fn in_sectioning_content(el: &ElementRef<'_>) -> bool {
    el.ancestors()
        .any(|a| matches!(a.tag_name(), "article" | "aside" | "main" | "nav" | "section"))
}

fn collapse(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() { None } else { Some(s) }
}

/// Text of the elements referenced by an IDREF list
fn referenced_text(el: &ElementRef<'_>, idrefs: &str) -> String {
    let doc = el.document();
    let parts: Vec<String> = idrefs
        .split_whitespace()
        .filter_map(|id| doc.get_element_by_id(id))
        .filter_map(|id| doc.element(id))
        .map(|target| {
            target
                .attr("aria-label")
                .map(collapse)
                .and_then(non_empty)
                .unwrap_or_else(|| subtree_text(&target))
        })
        .filter(|s| !s.is_empty())
        .collect();
    parts.join(" ")
}

/// Flattened text of a subtree, skipping unrendered children
pub(crate) fn subtree_text(el: &ElementRef<'_>) -> String {
    let mut out = Vec::new();
    collect_text(el, &mut out);
    collapse(&out.join(" "))
}

fn collect_text(el: &ElementRef<'_>, out: &mut Vec<String>) {
    let doc = el.document();
    for (id, node) in doc.tree().children(el.id()) {
        if let Some(text) = node.as_text() {
            out.push(text.to_string());
            continue;
        }
        let Some(child) = doc.element(id) else { continue };
        if child.style().display() == "none" || child.attr_is("aria-hidden", "true") {
            continue;
        }
        if let Some(label) = child.attr("aria-label").map(collapse).and_then(non_empty) {
            out.push(label);
        } else if child.tag_name() == "img" {
            out.push(child.attr("alt").unwrap_or("").to_string());
        } else {
            collect_text(&child, out);
        }
    }
}

/// Text of the `<label>`s associated with a labelable control
fn label_text(el: &ElementRef<'_>) -> String {
    let doc = el.document();
    let mut parts = Vec::new();
    if let Some(id) = el.attr("id").filter(|id| !id.is_empty()) {
        for label in doc.descendants().filter_map(|node| doc.element(node)) {
            if label.tag_name() == "label" && label.attr("for") == Some(id) {
                parts.push(subtree_text(&label));
            }
        }
    }
    if let Some(label) = el.ancestors().find(|a| a.tag_name() == "label") {
        if label.attr("for").is_none_or(|f| Some(f) == el.attr("id")) {
            let text = subtree_text(&label);
            if !parts.contains(&text) {
                parts.push(text);
            }
        }
    }
    collapse(&parts.join(" "))
}

fn first_child_text(el: &ElementRef<'_>, tag: &str) -> Option<String> {
    el.children()
        .find(|c| c.tag_name() == tag)
        .map(|c| subtree_text(&c))
        .and_then(non_empty)
}

/// Native host-language label. `Some("")` means "labelled as empty".
fn native_name(el: &ElementRef<'_>) -> Option<String> {
    let tag = el.tag_name();
    let input_type = el.attr("type").map(str::to_ascii_lowercase);
    match tag {
        "img" | "area" => return el.attr("alt").map(collapse),
        "input" if input_type.as_deref() == Some("image") => {
            if let Some(alt) = el.attr("alt").map(collapse).and_then(non_empty) {
                return Some(alt);
            }
        }
        "fieldset" => return first_child_text(el, "legend"),
        "table" => return first_child_text(el, "caption"),
        "svg" => return first_child_text(el, "title"),
        _ => {}
    }
    if is_labelable(el) {
        if let Some(text) = non_empty(label_text(el)) {
            return Some(text);
        }
    }
    if tag == "input" {
        match input_type.as_deref() {
            Some("button") | Some("submit") | Some("reset") => {
                if let Some(value) = el.attr("value") {
                    return Some(collapse(value));
                }
                return match input_type.as_deref() {
                    Some("submit") => Some("Submit".to_string()),
                    Some("reset") => Some("Reset".to_string()),
                    _ => None,
                };
            }
            Some("image") => return Some("Submit".to_string()),
            _ => {}
        }
    }
    None
}

/// Computed accessible name, empty when the element has none
pub fn accessible_name(el: &ElementRef<'_>) -> String {
    if let Some(ids) = el.attr("aria-labelledby") {
        if let Some(name) = non_empty(referenced_text(el, ids)) {
            return name;
        }
    }
    if let Some(label) = el.attr("aria-label").map(collapse).and_then(non_empty) {
        return label;
    }
    match native_name(el) {
        // alt="" is an explicit empty name
        Some(name) if name.is_empty() && matches!(el.tag_name(), "img" | "area") => {
            return name;
        }
        Some(name) if !name.is_empty() => return name,
        _ => {}
    }
    if known_role(el).is_some_and(|r| r.supports_name_from_content()) {
        if let Some(text) = non_empty(subtree_text(el)) {
            return text;
        }
    }
    if let Some(title) = el.attr("title").map(collapse).and_then(non_empty) {
        return title;
    }
    if matches!(el.tag_name(), "input" | "textarea") {
        if let Some(placeholder) = el.attr("placeholder").map(collapse).and_then(non_empty) {
            return placeholder;
        }
    }
    String::new()
}

/// Computed accessible description, empty when none
pub fn accessible_description(el: &ElementRef<'_>) -> String {
    if let Some(ids) = el.attr("aria-describedby") {
        if let Some(text) = non_empty(referenced_text(el, ids)) {
            return text;
        }
    }
    if let Some(text) = el.attr("aria-description").map(collapse).and_then(non_empty) {
        return text;
    }
    if let Some(title) = el.attr("title").map(collapse).and_then(non_empty) {
        if accessible_name(el) != title {
            return title;
        }
    }
    String::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use fos_dom::{Document, NodeId};

    fn doc_with(build: impl FnOnce(&mut Document) -> NodeId) -> (Document, NodeId) {
        let mut doc = Document::default();
        let id = build(&mut doc);
        (doc, id)
    }

    #[test]
    fn test_aria_label_beats_content() {
        let (doc, id) = doc_with(|doc| {
            let button = doc.create_element("button");
            doc.append_child(doc.body(), button).unwrap();
            doc.set_attribute(button, "aria-label", "Close").unwrap();
            doc.set_text_content(button, "X").unwrap();
            button
        });
        assert_eq!(accessible_name(&doc.element(id).unwrap()), "Close");
    }

    #[test]
    fn test_name_from_content_collapses_whitespace() {
        let (doc, id) = doc_with(|doc| {
            let a = doc.create_element("a");
            doc.append_child(doc.body(), a).unwrap();
            doc.set_attribute(a, "href", "/").unwrap();
            doc.set_text_content(a, "  Go\n home ").unwrap();
            a
        });
        assert_eq!(accessible_name(&doc.element(id).unwrap()), "Go home");
    }

    #[test]
    fn test_label_for() {
        let (doc, id) = doc_with(|doc| {
            let label = doc.create_element("label");
            let input = doc.create_element("input");
            doc.append_child(doc.body(), label).unwrap();
            doc.append_child(doc.body(), input).unwrap();
            doc.set_attribute(label, "for", "email").unwrap();
            doc.set_text_content(label, "Email").unwrap();
            doc.set_attribute(input, "id", "email").unwrap();
            input
        });
        assert_eq!(accessible_name(&doc.element(id).unwrap()), "Email");
    }

    #[test]
    fn test_submit_default_name() {
        let (doc, id) = doc_with(|doc| {
            let input = doc.create_element("input");
            doc.append_child(doc.body(), input).unwrap();
            doc.set_attribute(input, "type", "submit").unwrap();
            input
        });
        let el = doc.element(id).unwrap();
        assert_eq!(accessible_name(&el), "Submit");
        assert_eq!(known_role(&el), Some(AriaRole::Button));
    }

    #[test]
    fn test_empty_alt_stops_at_empty_name() {
        let (doc, id) = doc_with(|doc| {
            let img = doc.create_element("img");
            doc.append_child(doc.body(), img).unwrap();
            doc.set_attribute(img, "alt", "").unwrap();
            doc.set_attribute(img, "title", "tooltip").unwrap();
            img
        });
        let el = doc.element(id).unwrap();
        assert_eq!(accessible_name(&el), "");
        assert_eq!(known_role(&el), Some(AriaRole::Presentation));
    }

    #[test]
    fn test_description_skips_title_used_as_name() {
        let (doc, id) = doc_with(|doc| {
            let input = doc.create_element("input");
            doc.append_child(doc.body(), input).unwrap();
            doc.set_attribute(input, "title", "Search").unwrap();
            input
        });
        let el = doc.element(id).unwrap();
        assert_eq!(accessible_name(&el), "Search");
        assert_eq!(accessible_description(&el), "");
    }
}
