use super::{Rule, RuleContext, RuleResult, TipType};
use crate::category::Category;
use crate::name::accessible_name;
use crate::predicates::{heading_tag_level, is_aria_hidden, is_heading};
use fos_dom::ElementRef;

/// Heading level from the tag numeral or `aria-level`
#[derive(Debug)]
pub struct HeadingLevel;

impl Rule for HeadingLevel {
    fn name(&self) -> &'static str {
        "heading-level"
    }

    fn categories(&self) -> &'static [Category] {
        &[Category::Heading]
    }

    fn outputs(&self) -> &'static [TipType] {
        &[TipType::Level, TipType::Error]
    }

    fn applies_to(&self, el: &ElementRef<'_>) -> bool {
        is_heading(el)
    }

    fn evaluate(&self, el: &ElementRef<'_>, _ctx: &RuleContext<'_>) -> Vec<RuleResult> {
        let mut results = Vec::new();
        if let Some(level) = heading_tag_level(el) {
            results.push(RuleResult::new(self.name(), TipType::Level, level.to_string()));
        }
        if el.attr_is("role", "heading") {
            match el.attr("aria-level").filter(|level| !level.is_empty()) {
                Some(level) => {
                    results.push(RuleResult::new(self.name(), TipType::Level, level));
                }
                None if !is_aria_hidden(el) => {
                    results.push(RuleResult::new(
                        self.name(),
                        TipType::Error,
                        "messages.noHeadingLevel",
                    ));
                }
                None => {}
            }
        }
        results
    }
}

#[derive(Debug)]
pub struct HeadingName;

impl Rule for HeadingName {
    fn name(&self) -> &'static str {
        "heading-name"
    }

    fn categories(&self) -> &'static [Category] {
        &[Category::Heading]
    }

    fn outputs(&self) -> &'static [TipType] {
        &[TipType::Name, TipType::Error]
    }

    fn applies_to(&self, el: &ElementRef<'_>) -> bool {
        is_heading(el)
    }

    fn evaluate(&self, el: &ElementRef<'_>, _ctx: &RuleContext<'_>) -> Vec<RuleResult> {
        let name = accessible_name(el);
        if !name.is_empty() {
            vec![RuleResult::new(self.name(), TipType::Name, name)]
        } else if !is_aria_hidden(el) {
            vec![RuleResult::new(self.name(), TipType::Error, "messages.noName")]
        } else {
            Vec::new()
        }
    }
}
