use super::{Rule, RuleContext, RuleResult, TipType};
use crate::category::Category;
use crate::predicates::{is_fieldset, is_hidden, is_label, is_labelable};
use fos_dom::ElementRef;

#[derive(Debug)]
pub struct Fieldset;

impl Rule for Fieldset {
    fn name(&self) -> &'static str {
        "fieldset"
    }

    fn categories(&self) -> &'static [Category] {
        &[Category::FormControl]
    }

    fn outputs(&self) -> &'static [TipType] {
        &[TipType::TagName]
    }

    fn applies_to(&self, el: &ElementRef<'_>) -> bool {
        is_fieldset(el)
    }

    fn evaluate(&self, el: &ElementRef<'_>, _ctx: &RuleContext<'_>) -> Vec<RuleResult> {
        vec![RuleResult::new(self.name(), TipType::TagName, el.tag_name())]
    }
}

/// A `<label>` must point at a rendered labelable control
#[derive(Debug)]
pub struct LabelAssociatedControl;

impl Rule for LabelAssociatedControl {
    fn name(&self) -> &'static str {
        "label-associated-control"
    }

    fn categories(&self) -> &'static [Category] {
        &[Category::FormControl]
    }

    fn outputs(&self) -> &'static [TipType] {
        &[TipType::Warning]
    }

    fn applies_to(&self, el: &ElementRef<'_>) -> bool {
        is_label(el)
    }

    fn evaluate(&self, el: &ElementRef<'_>, ctx: &RuleContext<'_>) -> Vec<RuleResult> {
        let doc = ctx.element_document;
        let by_for = el
            .attr("for")
            .filter(|id| !id.is_empty())
            .and_then(|id| doc.get_element_by_id(id))
            .and_then(|id| doc.element(id))
            .filter(is_labelable);
        let inside = el.descendants().find(is_labelable);

        let missing = by_for.is_none() && inside.is_none();
        let hidden =
            by_for.as_ref().is_some_and(is_hidden) || inside.as_ref().is_some_and(is_hidden);
        if missing || hidden {
            vec![RuleResult::new(self.name(), TipType::Warning, "messages.noControlForLabel")]
        } else {
            Vec::new()
        }
    }
}

/// Radio buttons need a shared `name` with at least one sibling
#[derive(Debug)]
pub struct RadioGroup;

impl Rule for RadioGroup {
    fn name(&self) -> &'static str {
        "radio-group"
    }

    fn categories(&self) -> &'static [Category] {
        &[Category::FormControl]
    }

    fn outputs(&self) -> &'static [TipType] {
        &[TipType::Error]
    }

    fn applies_to(&self, el: &ElementRef<'_>) -> bool {
        el.tag_name() == "input" && el.attr_is("type", "radio")
    }

    fn evaluate(&self, el: &ElementRef<'_>, ctx: &RuleContext<'_>) -> Vec<RuleResult> {
        let Some(group) = el.attr("name").filter(|name| !name.is_empty()) else {
            return vec![RuleResult::new(self.name(), TipType::Error, "messages.noNameAttr")];
        };
        let is_member = |candidate: &ElementRef<'_>| {
            candidate.tag_name() == "input"
                && candidate.attr_is("type", "radio")
                && candidate.attr_is("name", group)
        };
        let members = match el.closest(|e| e.tag_name() == "form") {
            Some(form) => form.descendants().filter(is_member).count(),
            None => {
                let doc = ctx.element_document;
                doc.descendants()
                    .filter_map(|id| doc.element(id))
                    .filter(is_member)
                    .count()
            }
        };
        if members < 2 {
            vec![RuleResult::new(self.name(), TipType::Error, "messages.noRadioGroup")]
        } else {
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::run_rule as run;

    #[test]
    fn test_fieldset_tag() {
        assert_eq!(
            run(&Fieldset, "<fieldset id=t></fieldset>"),
            vec![(TipType::TagName, "fieldset".to_string())]
        );
    }

    #[test]
    fn test_label_association() {
        let warning = vec![(TipType::Warning, "messages.noControlForLabel".to_string())];
        assert!(run(&LabelAssociatedControl, "<label id=t for=a>A</label><input id=a>").is_empty());
        assert!(run(&LabelAssociatedControl, "<label id=t>A <select></select></label>").is_empty());
        assert_eq!(
            run(&LabelAssociatedControl, "<label id=t for=a>A</label><div id=a></div>"),
            warning
        );
        assert_eq!(run(&LabelAssociatedControl, "<label id=t>A</label>"), warning);
        assert_eq!(
            run(&LabelAssociatedControl, "<label id=t for=a>A</label><input id=a hidden>"),
            warning
        );
    }

    #[test]
    fn test_radio_group() {
        let alone = "<form><input id=t type=radio name=g></form><input type=radio name=g>";
        assert_eq!(
            run(&RadioGroup, alone),
            vec![(TipType::Error, "messages.noRadioGroup".to_string())]
        );

        let pair = "<form><input id=t type=radio name=g><input type=radio name=g></form>";
        assert!(run(&RadioGroup, pair).is_empty());

        let unnamed = "<input id=t type=radio><input type=radio>";
        assert_eq!(
            run(&RadioGroup, unnamed),
            vec![(TipType::Error, "messages.noNameAttr".to_string())]
        );

        let document_scope = "<input id=t type=radio name=g><p><input type=radio name=g></p>";
        assert!(run(&RadioGroup, document_scope).is_empty());
    }
}
