use super::{Rule, RuleContext, RuleResult, TipType};
use crate::aria::AriaRole;
use crate::category::Category;
use crate::name::accessible_name;
use crate::predicates::{closest_by_roles, is_aria_hidden, is_image};
use fos_dom::ElementRef;

/// Ancestor roles that can name an embedded graphic
const NAMING_ANCESTOR_ROLES: &[AriaRole] = &[
    AriaRole::Link,
    AriaRole::Button,
    AriaRole::Checkbox,
    AriaRole::Img,
    AriaRole::MenuItemCheckbox,
    AriaRole::MenuItemRadio,
    AriaRole::Meter,
    AriaRole::Option,
    AriaRole::ProgressBar,
    AriaRole::Radio,
    AriaRole::ScrollBar,
    AriaRole::Separator,
    AriaRole::Slider,
    AriaRole::Switch,
    AriaRole::Tab,
];

const NAME_NOT_REQUIRED: &[&str] = &["scrollbar", "separator", "tab"];

#[derive(Debug)]
pub struct ImageName;

impl Rule for ImageName {
    fn name(&self) -> &'static str {
        "image-name"
    }

    fn categories(&self) -> &'static [Category] {
        &[Category::Image]
    }

    fn outputs(&self) -> &'static [TipType] {
        &[TipType::Name, TipType::Warning, TipType::Error]
    }

    fn applies_to(&self, el: &ElementRef<'_>) -> bool {
        is_image(el)
    }

    fn evaluate(&self, el: &ElementRef<'_>, _ctx: &RuleContext<'_>) -> Vec<RuleResult> {
        let name = accessible_name(el);
        if !name.is_empty() {
            return vec![RuleResult::new(self.name(), TipType::Name, name)];
        }
        let role = el.attr("role").unwrap_or_default();
        if is_aria_hidden(el) || role == "presentation" {
            return Vec::new();
        }

        if el.tag_name() == "img" {
            return if el.has_attr("alt") {
                vec![RuleResult::new(self.name(), TipType::Warning, "messages.emptyAltImage")]
            } else {
                vec![RuleResult::new(self.name(), TipType::Error, "messages.noAltImage")]
            };
        }

        let ancestor_name = closest_by_roles(el, NAMING_ANCESTOR_ROLES)
            .map(|ancestor| accessible_name(&ancestor))
            .unwrap_or_default();
        if ancestor_name.is_empty() && !NAME_NOT_REQUIRED.contains(&role) {
            vec![RuleResult::new(self.name(), TipType::Error, "messages.noName")]
        } else {
            Vec::new()
        }
    }
}

/// Marks a bare `<svg>` without a role
#[derive(Debug)]
pub struct SvgSkip;

impl Rule for SvgSkip {
    fn name(&self) -> &'static str {
        "svg-skip"
    }

    fn categories(&self) -> &'static [Category] {
        &[Category::Image]
    }

    fn outputs(&self) -> &'static [TipType] {
        &[TipType::TagName]
    }

    fn applies_to(&self, el: &ElementRef<'_>) -> bool {
        el.tag_name() == "svg" && el.attr("role").is_none_or(str::is_empty)
    }

    fn evaluate(&self, _el: &ElementRef<'_>, _ctx: &RuleContext<'_>) -> Vec<RuleResult> {
        vec![RuleResult::new(self.name(), TipType::TagName, "svg")]
    }
}
