//! Rules shared by buttons, links and form controls

use super::{Rule, RuleContext, RuleResult, TipType};
use crate::category::Category;
use crate::name::accessible_name;
use crate::predicates::{
    has_interactive_descendant, has_spacing, has_tabindex_descendant, is_aria_hidden, is_button,
    is_button_like, is_focusable, is_form_control, is_in_interactive_ancestor, is_inline, is_link,
    is_small_target, MIN_TARGET_SIZE,
};
use fos_dom::ElementRef;

const CONTROL_CATEGORIES: &[Category] = &[Category::Button, Category::Link, Category::FormControl];

fn is_control(el: &ElementRef<'_>) -> bool {
    is_button(el) || is_link(el) || is_form_control(el)
}

#[derive(Debug)]
pub struct ControlFocus;

impl Rule for ControlFocus {
    fn name(&self) -> &'static str {
        "control-focus"
    }

    fn categories(&self) -> &'static [Category] {
        CONTROL_CATEGORIES
    }

    fn outputs(&self) -> &'static [TipType] {
        &[TipType::Error]
    }

    fn applies_to(&self, el: &ElementRef<'_>) -> bool {
        is_control(el)
    }

    fn evaluate(&self, el: &ElementRef<'_>, _ctx: &RuleContext<'_>) -> Vec<RuleResult> {
        if is_focusable(el) {
            Vec::new()
        } else {
            vec![RuleResult::new(self.name(), TipType::Error, "messages.notFocusable")]
        }
    }
}

#[derive(Debug)]
pub struct ControlName;

impl Rule for ControlName {
    fn name(&self) -> &'static str {
        "control-name"
    }

    fn categories(&self) -> &'static [Category] {
        CONTROL_CATEGORIES
    }

    fn outputs(&self) -> &'static [TipType] {
        &[TipType::Error]
    }

    fn applies_to(&self, el: &ElementRef<'_>) -> bool {
        is_control(el)
    }

    fn evaluate(&self, el: &ElementRef<'_>, _ctx: &RuleContext<'_>) -> Vec<RuleResult> {
        if accessible_name(el).is_empty() && !is_aria_hidden(el) {
            vec![RuleResult::new(self.name(), TipType::Error, "messages.noName")]
        } else {
            Vec::new()
        }
    }
}

/// Interactive content inside interactive content
#[derive(Debug)]
pub struct NestedInteractive;

impl Rule for NestedInteractive {
    fn name(&self) -> &'static str {
        "nested-interactive"
    }

    fn categories(&self) -> &'static [Category] {
        CONTROL_CATEGORIES
    }

    fn outputs(&self) -> &'static [TipType] {
        &[TipType::Error]
    }

    fn applies_to(&self, el: &ElementRef<'_>) -> bool {
        is_control(el)
    }

    fn evaluate(&self, el: &ElementRef<'_>, _ctx: &RuleContext<'_>) -> Vec<RuleResult> {
        let error = || RuleResult::new(self.name(), TipType::Error, "messages.nestedInteractive");
        let mut results = Vec::new();
        let button_like = is_button_like(el);
        if button_like && (has_interactive_descendant(el) || has_tabindex_descendant(el)) {
            results.push(error());
        }
        if (button_like || is_form_control(el)) && is_in_interactive_ancestor(el) {
            results.push(error());
        }
        if is_link(el) && !button_like && has_interactive_descendant(el) {
            results.push(error());
        }
        results
    }
}

/// Pointer targets below the minimum size without an excuse
#[derive(Debug)]
pub struct TargetSize;

impl TargetSize {
    /// Checkbox and radio inputs borrow the hit area of their label
    fn has_large_label(el: &ElementRef<'_>, ctx: &RuleContext<'_>) -> bool {
        if el.tag_name() != "input"
            || !(el.attr_is("type", "checkbox") || el.attr_is("type", "radio"))
        {
            return false;
        }
        let doc = ctx.element_document;
        let by_for = el.attr("id").filter(|id| !id.is_empty()).and_then(|id| {
            doc.descendants()
                .filter_map(|node| doc.element(node))
                .find(|candidate| candidate.attr_is("for", id))
        });
        let label = by_for.or_else(|| el.closest(|e| e.tag_name() == "label"));
        label.is_some_and(|label| {
            let rect = label.rect();
            rect.width >= MIN_TARGET_SIZE && rect.height >= MIN_TARGET_SIZE
        })
    }
}

impl Rule for TargetSize {
    fn name(&self) -> &'static str {
        "target-size"
    }

    fn categories(&self) -> &'static [Category] {
        &[Category::Button, Category::FormControl]
    }

    fn outputs(&self) -> &'static [TipType] {
        &[TipType::Warning]
    }

    fn applies_to(&self, el: &ElementRef<'_>) -> bool {
        is_button(el) || is_form_control(el)
    }

    fn evaluate(&self, el: &ElementRef<'_>, ctx: &RuleContext<'_>) -> Vec<RuleResult> {
        if !is_small_target(el) {
            return Vec::new();
        }
        if is_form_control(el) && Self::has_large_label(el, ctx) {
            return Vec::new();
        }
        if is_inline(el) || ctx.baseline.is_default_size(el) || has_spacing(el) {
            return Vec::new();
        }
        vec![RuleResult::new(self.name(), TipType::Warning, "messages.smallTargetSize")]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::baseline::BaselineCache;
    use crate::rules::run_rule as run;
    use crate::rules::{RuleOptions, TableCache};
    use fos_dom::{DOMRect, Document};

    fn error(key: &str) -> (TipType, String) {
        (TipType::Error, key.to_string())
    }

    #[test]
    fn test_unfocusable_role_button() {
        assert_eq!(
            run(&ControlFocus, "<div id=t role=button>Go</div>"),
            vec![error("messages.notFocusable")]
        );
        assert!(run(&ControlFocus, "<div id=t role=button tabindex=0>Go</div>").is_empty());
        assert_eq!(run(&ControlFocus, "<a id=t>Go</a>"), vec![error("messages.notFocusable")]);
    }

    #[test]
    fn test_control_name() {
        assert_eq!(run(&ControlName, "<button id=t></button>"), vec![error("messages.noName")]);
        assert!(run(&ControlName, "<button id=t aria-hidden=true></button>").is_empty());
        assert!(run(&ControlName, "<input id=t type=submit>").is_empty());
        assert!(run(&ControlName, "<label>Email <input id=t></label>").is_empty());
    }

    #[test]
    fn test_nested_interactive() {
        assert_eq!(
            run(&NestedInteractive, "<button id=t>Go <a href=/>x</a></button>"),
            vec![error("messages.nestedInteractive")]
        );
        assert_eq!(
            run(&NestedInteractive, "<a href=/><span role=button id=t tabindex=0>x</span></a>"),
            vec![error("messages.nestedInteractive")]
        );
        assert_eq!(
            run(&NestedInteractive, "<a href=/ id=t><input></a>"),
            vec![error("messages.nestedInteractive")]
        );
        assert!(run(&NestedInteractive, "<button id=t><span>Go</span></button>").is_empty());
    }

    #[test]
    fn test_nested_button_reports_both_causes() {
        let html = r#"<a href="/"><button id=t><span tabindex="0">x</span></button></a>"#;
        assert_eq!(run(&NestedInteractive, html).len(), 2);
    }

    fn target_size(doc: &Document, id: &str) -> Vec<RuleResult> {
        let baseline = BaselineCache::new();
        let tables = TableCache::new();
        let ctx = RuleContext::new(doc, &baseline, &tables);
        let el = doc.element(doc.get_element_by_id(id).unwrap()).unwrap();
        TargetSize.check(&el, &RuleOptions::default(), &ctx).unwrap_or_default()
    }

    #[test]
    fn test_small_restyled_button_warns() {
        let html = r#"<button id=b style="padding-top: 0px">x</button><button id=n>y</button>"#;
        let mut doc = fos_html::parse(html).unwrap();
        let b = doc.get_element_by_id("b").unwrap();
        let n = doc.get_element_by_id("n").unwrap();
        doc.set_rect(b, DOMRect::from_xywh(0.0, 0.0, 16.0, 16.0));
        doc.set_rect(n, DOMRect::from_xywh(18.0, 0.0, 40.0, 30.0));
        let results = target_size(&doc, "b");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].payload(), "messages.smallTargetSize");

        doc.set_rect(n, DOMRect::from_xywh(80.0, 0.0, 40.0, 30.0));
        assert!(target_size(&doc, "b").is_empty());
    }

    #[test]
    fn test_default_sized_checkbox_is_excused() {
        let mut doc = fos_html::parse("<input id=c type=checkbox>").unwrap();
        let c = doc.get_element_by_id("c").unwrap();
        doc.set_rect(c, DOMRect::from_xywh(0.0, 0.0, 13.0, 13.0));
        assert!(target_size(&doc, "c").is_empty());
    }

    #[test]
    fn test_checkbox_borrows_label_area() {
        let html = r#"<input id=c type=checkbox style="width: 10px"><label id=l for=c>Agree</label>
            <input id=d type=checkbox style="width: 10px">"#;
        let mut doc = fos_html::parse(html).unwrap();
        let c = doc.get_element_by_id("c").unwrap();
        let l = doc.get_element_by_id("l").unwrap();
        let d = doc.get_element_by_id("d").unwrap();
        doc.set_rect(c, DOMRect::from_xywh(0.0, 0.0, 10.0, 10.0));
        doc.set_rect(l, DOMRect::from_xywh(0.0, 100.0, 80.0, 30.0));
        doc.set_rect(d, DOMRect::from_xywh(12.0, 0.0, 10.0, 10.0));
        assert!(target_size(&doc, "c").is_empty());
        assert_eq!(target_size(&doc, "d").len(), 1);
    }
}
