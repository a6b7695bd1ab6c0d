//! Default-size baseline
//!
//! Compares an element's box properties with a bare element of the same
//! control subtype. Baselines are resolved once per subtype and kept for
//! the lifetime of the cache.

use fos_dom::{Attribute, ComputedStyle, ElementRef};
use std::cell::RefCell;
use std::collections::HashMap;

const SIZE_PROPERTIES_WITHOUT_WIDTH: &[&str] = &[
    "height",
    "min-width",
    "min-height",
    "max-width",
    "max-height",
    "border-top-width",
    "border-right-width",
    "border-bottom-width",
    "border-left-width",
    "border-block-end-width",
    "border-block-start-width",
    "border-inline-end-width",
    "border-inline-start-width",
    "padding-top",
    "padding-right",
    "padding-bottom",
    "padding-left",
    "padding-block-end",
    "padding-block-start",
    "padding-inline-end",
    "padding-inline-start",
    "box-sizing",
    "appearance",
    "opacity",
];

/// Control subtype with its own user-agent rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlKind {
    Button,
    InputText,
    InputRange,
    InputColor,
    InputCheckbox,
    InputRadio,
    InputFile,
}

impl ControlKind {
    pub fn of(el: &ElementRef<'_>) -> Option<Self> {
        match el.tag_name() {
            "button" => Some(Self::Button),
            "input" => match el.attr("type") {
                None => Some(Self::InputText),
                Some(
                    "text" | "search" | "tel" | "url" | "email" | "password" | "date" | "month"
                    | "week" | "time" | "datetime-local" | "number",
                ) => Some(Self::InputText),
                Some("range") => Some(Self::InputRange),
                Some("color") => Some(Self::InputColor),
                Some("checkbox") => Some(Self::InputCheckbox),
                Some("radio") => Some(Self::InputRadio),
                Some("file") => Some(Self::InputFile),
                Some("submit" | "reset" | "button") => Some(Self::Button),
                Some(_) => None,
            },
            _ => None,
        }
    }

    fn bare_element(self) -> (&'static str, Option<&'static str>) {
        match self {
            Self::Button => ("button", None),
            Self::InputText => ("input", Some("text")),
            Self::InputRange => ("input", Some("range")),
            Self::InputColor => ("input", Some("color")),
            Self::InputCheckbox => ("input", Some("checkbox")),
            Self::InputRadio => ("input", Some("radio")),
            Self::InputFile => ("input", Some("file")),
        }
    }

    fn properties(self) -> impl Iterator<Item = &'static str> {
        let width = (self != Self::Button).then_some("width");
        width.into_iter().chain(SIZE_PROPERTIES_WITHOUT_WIDTH.iter().copied())
    }
}

type Declarations = Vec<(&'static str, String)>;

/// Per-subtype default style, computed on first use and never invalidated
#[derive(Debug, Default)]
pub struct BaselineCache {
    entries: RefCell<HashMap<ControlKind, Declarations>>,
}

impl BaselineCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of subtypes resolved so far
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    fn resolve(kind: ControlKind, el: &ElementRef<'_>) -> Declarations {
        let (tag, ty) = kind.bare_element();
        let attrs: Vec<Attribute> = ty
            .map(|value| Attribute {
                name: "type".to_string(),
                value: value.to_string(),
            })
            .into_iter()
            .collect();
        let style: ComputedStyle = el.document().detached_style(tag, &attrs);
        kind.properties()
            .map(|prop| (prop, style.value(prop).to_string()))
            .collect()
    }

    /// Every tracked property equals the bare element's value
    pub fn is_default_size(&self, el: &ElementRef<'_>) -> bool {
        let Some(kind) = ControlKind::of(el) else {
            return false;
        };
        let mut entries = self.entries.borrow_mut();
        let baseline = entries
            .entry(kind)
            .or_insert_with(|| Self::resolve(kind, el));
        let style = el.style();
        baseline
            .iter()
            .all(|(prop, value)| style.value(prop) == value)
    }
}
