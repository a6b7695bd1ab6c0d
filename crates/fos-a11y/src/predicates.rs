//! Element-shape predicates shared by the rules
//!
//! Attribute comparisons are exact, the way selector matching is.

use crate::aria::AriaRole;
use crate::name::known_role;
use fos_dom::{DOMRect, ElementRef};

/// Minimum target edge in CSS pixels
pub const MIN_TARGET_SIZE: f64 = 24.0;

const INPUT_ROLES: &[&str] = &[
    "checkbox",
    "combobox",
    "radio",
    "searchbox",
    "slider",
    "spinbutton",
    "switch",
    "textbox",
    "menuitemcheckbox",
    "menuitemradio",
];

const NON_CONTROL_INPUT_TYPES: &[&str] = &["button", "submit", "reset", "image", "hidden"];

fn tag_is(el: &ElementRef<'_>, tags: &[&str]) -> bool {
    tags.contains(&el.tag_name())
}

/// `button`, first `summary` of `details`, button-type inputs, role button/menuitem
pub fn is_button(el: &ElementRef<'_>) -> bool {
    let has_button_tag = match el.tag_name() {
        "button" => true,
        "summary" => {
            el.is_first_element_child()
                && el.parent_element().is_some_and(|p| p.tag_name() == "details")
        }
        "input" => el
            .attr("type")
            .is_some_and(|t| ["button", "submit", "reset", "image"].contains(&t)),
        _ => false,
    };
    has_button_tag || el.attr_is("role", "button") || el.attr_is("role", "menuitem")
}

/// Tag `button` or role `button`, the shapes that must not nest
pub fn is_button_like(el: &ElementRef<'_>) -> bool {
    el.tag_name() == "button" || el.attr_is("role", "button")
}

pub fn has_input_role(el: &ElementRef<'_>) -> bool {
    el.attr("role").is_some_and(|r| INPUT_ROLES.contains(&r))
}

pub fn has_input_tag(el: &ElementRef<'_>) -> bool {
    match el.tag_name() {
        "input" => el.attr("type").is_none_or(|t| !NON_CONTROL_INPUT_TYPES.contains(&t)),
        "textarea" | "select" => true,
        _ => false,
    }
}

pub fn is_form_control(el: &ElementRef<'_>) -> bool {
    has_input_role(el) || has_input_tag(el)
}

pub fn is_label(el: &ElementRef<'_>) -> bool {
    el.tag_name() == "label"
}

pub fn is_fieldset(el: &ElementRef<'_>) -> bool {
    el.tag_name() == "fieldset"
}

/// Elements a `<label>` can be associated with
pub fn is_labelable(el: &ElementRef<'_>) -> bool {
    match el.tag_name() {
        "button" | "meter" | "output" | "progress" | "select" | "textarea" => true,
        "input" => !el.attr_is("type", "hidden"),
        _ => false,
    }
}

pub fn is_image(el: &ElementRef<'_>) -> bool {
    tag_is(el, &["img", "svg"]) || el.attr_is("role", "img")
}

/// Numeral of an `h1`..`h6` tag
pub fn heading_tag_level(el: &ElementRef<'_>) -> Option<u8> {
    match el.tag_name().as_bytes() {
        [b'h', d @ b'1'..=b'6'] => Some(d - b'0'),
        _ => None,
    }
}

pub fn is_heading(el: &ElementRef<'_>) -> bool {
    heading_tag_level(el).is_some() || el.attr_is("role", "heading")
}

pub fn is_link(el: &ElementRef<'_>) -> bool {
    tag_is(el, &["a", "area"]) || el.attr_is("role", "link")
}

/// Not rendered: `hidden`, `display:none` on self or an ancestor, or `visibility:hidden`
pub fn is_hidden(el: &ElementRef<'_>) -> bool {
    if el.has_attr("hidden") {
        return true;
    }
    let style = el.style();
    if style.display() == "none" || matches!(style.value("visibility"), "hidden" | "collapse") {
        return true;
    }
    el.ancestors().any(|a| a.style().display() == "none")
}

/// Self or an ancestor carries `aria-hidden="true"`
pub fn is_aria_hidden(el: &ElementRef<'_>) -> bool {
    el.closest(|e| e.attr_is("aria-hidden", "true")).is_some()
}

fn is_disabled(el: &ElementRef<'_>) -> bool {
    el.has_attr("disabled")
        && tag_is(el, &["button", "input", "select", "textarea", "optgroup", "option", "fieldset"])
}

fn tabindex(el: &ElementRef<'_>) -> Option<i32> {
    el.attr("tabindex")?.trim().parse().ok()
}

fn is_natively_focusable(el: &ElementRef<'_>) -> bool {
    match el.tag_name() {
        "a" | "area" => el.has_attr("href"),
        "button" | "select" | "textarea" | "iframe" => true,
        "input" => !el.attr_is("type", "hidden"),
        "summary" => {
            el.is_first_element_child()
                && el.parent_element().is_some_and(|p| p.tag_name() == "details")
        }
        "audio" | "video" => el.has_attr("controls"),
        _ => el
            .attr("contenteditable")
            .is_some_and(|v| v.is_empty() || v.eq_ignore_ascii_case("true")),
    }
}

/// Reachable by sequential keyboard navigation
pub fn is_focusable(el: &ElementRef<'_>) -> bool {
    if is_disabled(el) {
        return false;
    }
    match tabindex(el) {
        Some(index) => index >= 0,
        None => is_natively_focusable(el),
    }
}

fn is_interactive(el: &ElementRef<'_>) -> bool {
    is_natively_focusable(el)
        || el
            .attr("role")
            .and_then(AriaRole::from_attribute)
            .is_some_and(|r| r.is_widget())
}

pub fn has_interactive_descendant(el: &ElementRef<'_>) -> bool {
    el.descendants().any(|d| is_interactive(&d))
}

pub fn has_tabindex_descendant(el: &ElementRef<'_>) -> bool {
    el.descendants().any(|d| tabindex(&d).is_some_and(|i| i >= 0))
}

/// Inside an ancestor link or button
pub fn is_in_interactive_ancestor(el: &ElementRef<'_>) -> bool {
    el.ancestors()
        .any(|a| tag_is(&a, &["a", "button"]) || a.attr_is("role", "button"))
}

/// Inline box sitting in a run of text
pub fn is_inline(el: &ElementRef<'_>) -> bool {
    el.style().display() == "inline" && !el.sibling_text().trim().is_empty()
}

pub fn is_small_target(el: &ElementRef<'_>) -> bool {
    let rect = el.rect();
    rect.width < MIN_TARGET_SIZE || rect.height < MIN_TARGET_SIZE
}

fn is_target(el: &ElementRef<'_>) -> bool {
    is_button(el) || is_link(el) || is_form_control(el)
}

/// A target-sized square centered on the element overlaps no other target
pub fn has_spacing(el: &ElementRef<'_>) -> bool {
    let rect = el.rect();
    let half = MIN_TARGET_SIZE / 2.0;
    let zone = DOMRect::from_xywh(
        rect.center_x() - half,
        rect.center_y() - half,
        MIN_TARGET_SIZE,
        MIN_TARGET_SIZE,
    );
    let Some(body) = el.document().body_element() else {
        return true;
    };
    !body.descendants().any(|other| {
        if other == *el || other.contains(el) || el.contains(&other) || !is_target(&other) {
            return false;
        }
        let other_rect = other.rect();
        other_rect.width > 0.0 && other_rect.height > 0.0 && zone.intersects(&other_rect)
    })
}

/// Nearest ancestor (excluding self) whose role is in `roles`
pub fn closest_by_roles<'a>(el: &ElementRef<'a>, roles: &[AriaRole]) -> Option<ElementRef<'a>> {
    el.ancestors()
        .find(|a| known_role(a).is_some_and(|r| roles.contains(&r)))
}
