//! Computed Style
//!
//! Resolved CSS values as strings, keyed by property name. Resolution order:
//! user-agent defaults, then host overrides, then the inline `style`
//! attribute. `visibility` inherits from the parent.

use crate::Attribute;
use std::collections::BTreeMap;

/// Properties every element carries a value for
const BASE_PROPERTIES: &[(&str, &str)] = &[
    ("width", "auto"),
    ("height", "auto"),
    ("min-width", "auto"),
    ("min-height", "auto"),
    ("max-width", "none"),
    ("max-height", "none"),
    ("border-top-width", "0px"),
    ("border-right-width", "0px"),
    ("border-bottom-width", "0px"),
    ("border-left-width", "0px"),
    ("border-block-end-width", "0px"),
    ("border-block-start-width", "0px"),
    ("border-inline-end-width", "0px"),
    ("border-inline-start-width", "0px"),
    ("padding-top", "0px"),
    ("padding-right", "0px"),
    ("padding-bottom", "0px"),
    ("padding-left", "0px"),
    ("padding-block-end", "0px"),
    ("padding-block-start", "0px"),
    ("padding-inline-end", "0px"),
    ("padding-inline-start", "0px"),
    ("box-sizing", "content-box"),
    ("appearance", "none"),
    ("opacity", "1"),
    ("visibility", "visible"),
];

/// Resolved style of one element
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComputedStyle {
    values: BTreeMap<String, String>,
}

impl ComputedStyle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolved value, if the property is known
    pub fn get(&self, property: &str) -> Option<&str> {
        self.values.get(property).map(String::as_str)
    }

    /// Resolved value, empty when unknown
    pub fn value(&self, property: &str) -> &str {
        self.get(property).unwrap_or("")
    }

    pub fn set(&mut self, property: &str, value: &str) {
        self.values
            .insert(property.trim().to_ascii_lowercase(), value.trim().to_string());
    }

    /// `display` value (defaults to inline)
    pub fn display(&self) -> &str {
        self.get("display").unwrap_or("inline")
    }

    /// Numeric pixel value of a length property
    pub fn px(&self, property: &str) -> Option<f64> {
        self.get(property)?.strip_suffix("px")?.trim().parse().ok()
    }

    /// Apply a `prop: value; prop: value` declaration block
    pub fn apply_declarations(&mut self, css: &str) {
        for decl in css.split(';') {
            if let Some((prop, value)) = decl.split_once(':') {
                let prop = prop.trim();
                if !prop.is_empty() {
                    self.set(prop, value.trim_end_matches("!important"));
                }
            }
        }
    }

    /// Copy every value from `other`
    pub fn merge(&mut self, other: &ComputedStyle) {
        for (k, v) in &other.values {
            self.values.insert(k.clone(), v.clone());
        }
    }
}

fn attr<'a>(attrs: &'a [Attribute], name: &str) -> Option<&'a str> {
    attrs.iter().find(|a| a.name == name).map(|a| a.value.as_str())
}

fn display_for(tag: &str) -> &'static str {
    match tag {
        "head" | "script" | "style" | "title" | "meta" | "link" | "template" | "base" => "none",
        "html" | "body" | "div" | "p" | "main" | "nav" | "header" | "footer" | "section"
        | "article" | "aside" | "form" | "fieldset" | "legend" | "ul" | "ol" | "dl" | "dd"
        | "dt" | "h1" | "h2" | "h3" | "h4" | "h5" | "h6" | "figure" | "figcaption"
        | "details" | "summary" | "dialog" | "address" | "blockquote" | "pre" | "hr"
        | "search" => "block",
        "li" => "list-item",
        "table" => "table",
        "tr" => "table-row",
        "td" | "th" => "table-cell",
        "thead" => "table-header-group",
        "tbody" => "table-row-group",
        "tfoot" => "table-footer-group",
        "caption" => "table-caption",
        "button" | "input" | "select" | "textarea" | "img" | "svg" | "meter" | "progress"
        | "iframe" => "inline-block",
        _ => "inline",
    }
}

/// User-agent default style for an element with the given tag and attributes
pub fn user_agent_style(tag: &str, attrs: &[Attribute]) -> ComputedStyle {
    let mut style = ComputedStyle::new();
    for (prop, value) in BASE_PROPERTIES {
        style.set(prop, value);
    }
    style.set("display", display_for(tag));

    let control_box = |style: &mut ComputedStyle, border: &str, padding_v: &str, padding_h: &str| {
        let sides = [
            "top",
            "right",
            "bottom",
            "left",
            "block-end",
            "block-start",
            "inline-end",
            "inline-start",
        ];
        for side in sides {
            style.set(&format!("border-{side}-width"), border);
        }
        for side in ["top", "bottom", "block-end", "block-start"] {
            style.set(&format!("padding-{side}"), padding_v);
        }
        for side in ["right", "left", "inline-end", "inline-start"] {
            style.set(&format!("padding-{side}"), padding_h);
        }
    };

    match tag {
        "button" => {
            style.set("appearance", "auto");
            style.set("box-sizing", "border-box");
            control_box(&mut style, "2px", "1px", "6px");
        }
        "input" => {
            let kind = attr(attrs, "type").map(str::to_ascii_lowercase);
            match kind.as_deref() {
                Some("hidden") => style.set("display", "none"),
                Some("checkbox") | Some("radio") => {
                    style.set("appearance", "auto");
                    style.set("box-sizing", "border-box");
                    style.set("width", "13px");
                    style.set("height", "13px");
                }
                Some("range") => {
                    style.set("appearance", "auto");
                    style.set("width", "129px");
                    style.set("height", "16px");
                }
                Some("color") => {
                    style.set("appearance", "auto");
                    style.set("box-sizing", "border-box");
                    style.set("width", "50px");
                    style.set("height", "27px");
                    control_box(&mut style, "1px", "1px", "2px");
                }
                Some("button") | Some("submit") | Some("reset") | Some("image") | Some("file") => {
                    style.set("appearance", "auto");
                    style.set("box-sizing", "border-box");
                    control_box(&mut style, "2px", "1px", "6px");
                }
                _ => {
                    style.set("appearance", "auto");
                    control_box(&mut style, "2px", "1px", "2px");
                }
            }
        }
        "select" => {
            style.set("appearance", "auto");
            style.set("box-sizing", "border-box");
            control_box(&mut style, "1px", "0px", "0px");
        }
        "textarea" => {
            style.set("appearance", "auto");
            control_box(&mut style, "1px", "2px", "2px");
        }
        "dialog" if attr(attrs, "open").is_none() => style.set("display", "none"),
        _ => {}
    }

    if attr(attrs, "hidden").is_some() {
        style.set("display", "none");
    }
    style
}

#[cfg(test)]
mod tests {
    use super::*;

    fn a(name: &str, value: &str) -> Attribute {
        Attribute { name: name.to_string(), value: value.to_string() }
    }

    #[test]
    fn test_checkbox_defaults() {
        let style = user_agent_style("input", &[a("type", "checkbox")]);
        assert_eq!(style.px("width"), Some(13.0));
        assert_eq!(style.value("appearance"), "auto");
        assert_eq!(style.display(), "inline-block");
    }

    #[test]
    fn test_declarations_override() {
        let mut style = user_agent_style("div", &[]);
        style.apply_declarations("display: none; width:30px");
        assert_eq!(style.display(), "none");
        assert_eq!(style.px("width"), Some(30.0));
    }

    #[test]
    fn test_closed_dialog_and_hidden_attr() {
        assert_eq!(user_agent_style("dialog", &[]).display(), "none");
        assert_eq!(user_agent_style("dialog", &[a("open", "")]).display(), "block");
        assert_eq!(user_agent_style("span", &[a("hidden", "")]).display(), "none");
    }
}
