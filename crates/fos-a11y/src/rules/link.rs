use super::{Rule, RuleContext, RuleResult, TipType};
use crate::category::Category;
use crate::predicates::is_link;
use fos_dom::ElementRef;

/// Anchors without `href` are placeholders, not links
#[derive(Debug)]
pub struct LinkHref;

impl Rule for LinkHref {
    fn name(&self) -> &'static str {
        "link-href"
    }

    fn categories(&self) -> &'static [Category] {
        &[Category::Link]
    }

    fn outputs(&self) -> &'static [TipType] {
        &[TipType::Warning]
    }

    fn applies_to(&self, el: &ElementRef<'_>) -> bool {
        el.tag_name() == "a"
    }

    fn evaluate(&self, el: &ElementRef<'_>, _ctx: &RuleContext<'_>) -> Vec<RuleResult> {
        if el.has_attr("href") {
            Vec::new()
        } else {
            vec![RuleResult::new(self.name(), TipType::Warning, "messages.noHref")]
        }
    }
}

#[derive(Debug)]
pub struct LinkTarget;

impl Rule for LinkTarget {
    fn name(&self) -> &'static str {
        "link-target"
    }

    fn categories(&self) -> &'static [Category] {
        &[Category::Link]
    }

    fn outputs(&self) -> &'static [TipType] {
        &[TipType::LinkTarget]
    }

    fn applies_to(&self, el: &ElementRef<'_>) -> bool {
        is_link(el) && el.attr("target").is_some_and(|t| !t.is_empty())
    }

    fn evaluate(&self, el: &ElementRef<'_>, _ctx: &RuleContext<'_>) -> Vec<RuleResult> {
        el.attr("target")
            .map(|target| RuleResult::new(self.name(), TipType::LinkTarget, target))
            .into_iter()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::run_rule as run;

    #[test]
    fn test_href() {
        assert!(run(&LinkHref, "<a id=t href=/>x</a>").is_empty());
        assert_eq!(
            run(&LinkHref, "<a id=t>x</a>"),
            vec![(TipType::Warning, "messages.noHref".to_string())]
        );
    }

    #[test]
    fn test_target() {
        assert_eq!(
            run(&LinkTarget, "<a id=t href=/ target=_blank>x</a>"),
            vec![(TipType::LinkTarget, "_blank".to_string())]
        );
        assert!(run(&LinkTarget, "<a id=t href=/>x</a>").is_empty());
    }
}
