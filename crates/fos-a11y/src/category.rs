//! Element categories
//!
//! A category both gates which rules run and which settings toggle
//! display. Declaration order is classification order.

use crate::name::known_role;
use crate::predicates::{
    is_button, is_fieldset, is_form_control, is_heading, is_image, is_label, is_link,
};
use crate::rules::{TipType, catalog};
use fos_dom::ElementRef;
use serde::{Deserialize, Serialize};

/// Semantic classification bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    Page,
    Image,
    FormControl,
    Button,
    Link,
    Heading,
    AriaHidden,
    Section,
    Lang,
}

impl Category {
    pub const ALL: [Category; 9] = [
        Category::Page,
        Category::Image,
        Category::FormControl,
        Category::Button,
        Category::Link,
        Category::Heading,
        Category::AriaHidden,
        Category::Section,
        Category::Lang,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Page => "page",
            Self::Image => "image",
            Self::FormControl => "formControl",
            Self::Button => "button",
            Self::Link => "link",
            Self::Heading => "heading",
            Self::AriaHidden => "ariaHidden",
            Self::Section => "section",
            Self::Lang => "lang",
        }
    }

    fn matches(&self, el: &ElementRef<'_>) -> bool {
        match self {
            Self::Page => el.document().body() == el.id(),
            Self::Image => is_image(el),
            Self::FormControl => is_form_control(el) || is_label(el) || is_fieldset(el),
            Self::Button => is_button(el),
            Self::Link => is_link(el),
            Self::Heading => is_heading(el),
            Self::AriaHidden => el.attr_is("aria-hidden", "true"),
            Self::Section => is_section(el),
            Self::Lang => el.has_attr("lang") && el.tag_name() != "html",
        }
    }

    /// Tip types any rule of this category may emit, in catalog order
    pub fn outputs(&self) -> Vec<TipType> {
        let mut outputs = Vec::new();
        for rule in catalog().iter().filter(|r| r.categories().contains(self)) {
            for tip_type in rule.outputs() {
                if !outputs.contains(tip_type) {
                    outputs.push(*tip_type);
                }
            }
        }
        outputs
    }
}

pub(crate) fn is_section(el: &ElementRef<'_>) -> bool {
    matches!(el.tag_name(), "table" | "th" | "td")
        || known_role(el).is_some_and(|role| role.is_landmark() || role.is_table_part())
}

/// Every category the element belongs to, in declaration order
pub fn classify(el: &ElementRef<'_>) -> Vec<Category> {
    Category::ALL
        .into_iter()
        .filter(|category| category.matches(el))
        .collect()
}
