//! Name, role, state and language rules

use super::{Rule, RuleContext, RuleResult, TipType};
use crate::category::{is_section, Category};
use crate::name::{accessible_description, accessible_name, known_role};
use crate::predicates::{is_button, is_focusable, is_form_control, is_heading, is_image, is_link};
use fos_dom::ElementRef;

const STATE_ATTRIBUTES: &[&str] = &[
    "aria-expanded",
    "aria-pressed",
    "aria-checked",
    "aria-selected",
    "aria-disabled",
    "aria-current",
    "aria-invalid",
    "aria-required",
];

const NATIVE_STATES: &[&str] = &["disabled", "checked", "required"];

fn is_control(el: &ElementRef<'_>) -> bool {
    is_button(el) || is_link(el) || is_form_control(el)
}

#[derive(Debug)]
pub struct AccessibleName;

impl Rule for AccessibleName {
    fn name(&self) -> &'static str {
        "accessible-name"
    }

    fn categories(&self) -> &'static [Category] {
        &[Category::Button, Category::Link, Category::FormControl, Category::Section]
    }

    fn outputs(&self) -> &'static [TipType] {
        &[TipType::Name]
    }

    fn applies_to(&self, el: &ElementRef<'_>) -> bool {
        is_control(el) || is_section(el)
    }

    fn evaluate(&self, el: &ElementRef<'_>, _ctx: &RuleContext<'_>) -> Vec<RuleResult> {
        let name = accessible_name(el);
        if name.is_empty() {
            Vec::new()
        } else {
            vec![RuleResult::new(self.name(), TipType::Name, name)]
        }
    }
}

/// `aria-hidden` subtrees must not contain focus targets
#[derive(Debug)]
pub struct AriaHidden;

impl Rule for AriaHidden {
    fn name(&self) -> &'static str {
        "aria-hidden"
    }

    fn categories(&self) -> &'static [Category] {
        &[Category::AriaHidden]
    }

    fn outputs(&self) -> &'static [TipType] {
        &[TipType::State, TipType::Error]
    }

    fn applies_to(&self, el: &ElementRef<'_>) -> bool {
        el.attr_is("aria-hidden", "true")
    }

    fn evaluate(&self, el: &ElementRef<'_>, _ctx: &RuleContext<'_>) -> Vec<RuleResult> {
        let mut results = vec![RuleResult::new(
            self.name(),
            TipType::State,
            r#"aria-hidden="true""#,
        )];
        if is_focusable(el) || el.descendants().any(|d| is_focusable(&d)) {
            results.push(RuleResult::new(
                self.name(),
                TipType::Error,
                "messages.focusableAriaHidden",
            ));
        }
        results
    }
}

#[derive(Debug)]
pub struct Landmark;

impl Rule for Landmark {
    fn name(&self) -> &'static str {
        "landmark"
    }

    fn categories(&self) -> &'static [Category] {
        &[Category::Section]
    }

    fn outputs(&self) -> &'static [TipType] {
        &[TipType::Landmark]
    }

    fn applies_to(&self, el: &ElementRef<'_>) -> bool {
        known_role(el).is_some_and(|role| role.is_landmark())
    }

    fn evaluate(&self, el: &ElementRef<'_>, _ctx: &RuleContext<'_>) -> Vec<RuleResult> {
        known_role(el)
            .map(|role| RuleResult::new(self.name(), TipType::Landmark, role.as_str()))
            .into_iter()
            .collect()
    }
}

/// Well-formed language tag: primary subtag plus optional subtags
fn is_valid_lang(tag: &str) -> bool {
    let mut subtags = tag.split('-');
    let primary_ok = subtags
        .next()
        .is_some_and(|p| (2..=3).contains(&p.len()) && p.chars().all(|c| c.is_ascii_alphabetic()));
    primary_ok
        && subtags.all(|s| {
            (2..=8).contains(&s.len()) && s.chars().all(|c| c.is_ascii_alphanumeric())
        })
}

#[derive(Debug)]
pub struct Lang;

impl Rule for Lang {
    fn name(&self) -> &'static str {
        "lang"
    }

    fn categories(&self) -> &'static [Category] {
        &[Category::Lang]
    }

    fn outputs(&self) -> &'static [TipType] {
        &[TipType::Lang, TipType::Error]
    }

    fn applies_to(&self, el: &ElementRef<'_>) -> bool {
        el.has_attr("lang") && el.tag_name() != "html"
    }

    fn evaluate(&self, el: &ElementRef<'_>, _ctx: &RuleContext<'_>) -> Vec<RuleResult> {
        let lang = el.attr("lang").unwrap_or_default().trim();
        if is_valid_lang(lang) {
            vec![RuleResult::new(self.name(), TipType::Lang, lang)]
        } else {
            vec![RuleResult::new(self.name(), TipType::Error, "messages.invalidLang")]
        }
    }
}

#[derive(Debug)]
pub struct RoleRule;

impl Rule for RoleRule {
    fn name(&self) -> &'static str {
        "role"
    }

    fn categories(&self) -> &'static [Category] {
        &Category::ALL
    }

    fn outputs(&self) -> &'static [TipType] {
        &[TipType::Role]
    }

    fn applies_to(&self, el: &ElementRef<'_>) -> bool {
        known_role(el).is_some()
    }

    fn evaluate(&self, el: &ElementRef<'_>, _ctx: &RuleContext<'_>) -> Vec<RuleResult> {
        known_role(el)
            .map(|role| RuleResult::new(self.name(), TipType::Role, role.as_str()))
            .into_iter()
            .collect()
    }
}

#[derive(Debug)]
pub struct AriaState;

impl Rule for AriaState {
    fn name(&self) -> &'static str {
        "aria-state"
    }

    fn categories(&self) -> &'static [Category] {
        &[Category::Button, Category::Link, Category::FormControl, Category::Heading]
    }

    fn outputs(&self) -> &'static [TipType] {
        &[TipType::State]
    }

    fn applies_to(&self, el: &ElementRef<'_>) -> bool {
        is_control(el) || is_heading(el)
    }

    fn evaluate(&self, el: &ElementRef<'_>, _ctx: &RuleContext<'_>) -> Vec<RuleResult> {
        let aria = STATE_ATTRIBUTES.iter().filter_map(|&attr| {
            el.attr(attr).map(|value| {
                RuleResult::new(self.name(), TipType::State, format!(r#"{attr}="{value}""#))
            })
        });
        let native = NATIVE_STATES
            .iter()
            .filter(|&&attr| el.has_attr(attr))
            .map(|&attr| RuleResult::new(self.name(), TipType::State, attr));
        aria.chain(native).collect()
    }
}

#[derive(Debug)]
pub struct AccessibleDescription;

impl Rule for AccessibleDescription {
    fn name(&self) -> &'static str {
        "accessible-description"
    }

    fn categories(&self) -> &'static [Category] {
        &[Category::Button, Category::Link, Category::FormControl, Category::Image]
    }

    fn outputs(&self) -> &'static [TipType] {
        &[TipType::Description]
    }

    fn applies_to(&self, el: &ElementRef<'_>) -> bool {
        is_control(el) || is_image(el)
    }

    fn evaluate(&self, el: &ElementRef<'_>, _ctx: &RuleContext<'_>) -> Vec<RuleResult> {
        let description = accessible_description(el);
        if description.is_empty() {
            Vec::new()
        } else {
            vec![RuleResult::new(self.name(), TipType::Description, description)]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::run_rule as run;

    fn tip(tip_type: TipType, text: &str) -> (TipType, String) {
        (tip_type, text.to_string())
    }

    #[test]
    fn test_aria_hidden_focusable() {
        assert_eq!(
            run(&AriaHidden, "<div id=t aria-hidden=true><span>x</span></div>"),
            vec![tip(TipType::State, r#"aria-hidden="true""#)]
        );
        let results = run(&AriaHidden, "<div id=t aria-hidden=true><a href=/>x</a></div>");
        assert_eq!(results[1], tip(TipType::Error, "messages.focusableAriaHidden"));
    }

    #[test]
    fn test_landmark_and_role() {
        assert_eq!(run(&Landmark, "<nav id=t></nav>"), vec![tip(TipType::Landmark, "navigation")]);
        assert!(run(&Landmark, "<section id=t></section>").is_empty());
        assert_eq!(
            run(&RoleRule, "<div id=t role=\"bogus switch\"></div>"),
            vec![tip(TipType::Role, "switch")]
        );
    }

    #[test]
    fn test_lang_tags() {
        assert_eq!(run(&Lang, "<p id=t lang=en-GB>x</p>"), vec![tip(TipType::Lang, "en-GB")]);
        assert_eq!(
            run(&Lang, "<p id=t lang=english>x</p>"),
            vec![tip(TipType::Error, "messages.invalidLang")]
        );
        assert!(is_valid_lang("zh-Hant-TW"));
        assert!(!is_valid_lang(""));
        assert!(!is_valid_lang("en-"));
    }

    #[test]
    fn test_states() {
        assert_eq!(
            run(&AriaState, r#"<button id=t aria-expanded="false" disabled>Menu</button>"#),
            vec![tip(TipType::State, r#"aria-expanded="false""#), tip(TipType::State, "disabled")]
        );
    }

    #[test]
    fn test_name_and_description() {
        assert_eq!(
            run(&AccessibleName, r#"<nav id=t aria-label="Main"></nav>"#),
            vec![tip(TipType::Name, "Main")]
        );
        assert_eq!(
            run(&AccessibleDescription, r#"<button id=t title="Opens menu">Menu</button>"#),
            vec![tip(TipType::Description, "Opens menu")]
        );
        assert!(run(&AccessibleName, "<button id=t></button>").is_empty());
    }
}
