//! Rule Catalog
//!
//! Every rule is an independent unit struct implementing [`Rule`]. The
//! catalog order is the order tips are shown in.

mod aria;
mod control;
mod form;
mod heading;
mod image;
mod link;
mod page;
mod table;

pub use aria::{
    AccessibleDescription, AccessibleName, AriaHidden, AriaState, Landmark, Lang, RoleRule,
};
pub use control::{ControlFocus, ControlName, NestedInteractive, TargetSize};
pub use form::{Fieldset, LabelAssociatedControl, RadioGroup};
pub use heading::{HeadingLevel, HeadingName};
pub use image::{ImageName, SvgSkip};
pub use link::{LinkHref, LinkTarget};
pub use page::{PageLang, PageTitle};
pub use table::{TableCache, TableHeader, TablePosition, TableSize};

use crate::baseline::BaselineCache;
use crate::category::Category;
use crate::A11yError;
use fos_dom::{Document, ElementRef};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Kind of a rule fragment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TipType {
    Name,
    Role,
    TagName,
    Landmark,
    Description,
    Heading,
    Warning,
    Error,
    State,
    TableHeader,
    TableSize,
    TableCellPosition,
    LinkTarget,
    PageTitle,
    Lang,
    List,
    Level,
}

/// Fragment produced by one rule for one element
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleResult {
    #[serde(rename = "type")]
    pub tip_type: TipType,
    pub rule_name: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_label: Option<String>,
}

impl RuleResult {
    /// Place `text` in the payload field that belongs to `tip_type`
    pub fn new(rule_name: &'static str, tip_type: TipType, text: impl Into<String>) -> Self {
        let text = Some(text.into());
        let (message, content, state) = match tip_type {
            TipType::Error | TipType::Warning => (text, None, None),
            TipType::State => (None, None, text),
            _ => (None, text, None),
        };
        Self {
            tip_type,
            rule_name,
            message,
            content,
            state,
            content_label: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.content_label = Some(label.into());
        self
    }

    /// The populated payload
    pub fn payload(&self) -> &str {
        self.message
            .as_deref()
            .or(self.content.as_deref())
            .or(self.state.as_deref())
            .unwrap_or_default()
    }

    pub fn tip(&self) -> ElementTip {
        ElementTip {
            tip_type: self.tip_type,
            content: self.payload().to_string(),
            content_label: self.content_label.clone(),
        }
    }
}

/// Rendering projection of a [`RuleResult`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementTip {
    #[serde(rename = "type")]
    pub tip_type: TipType,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_label: Option<String>,
}

impl ElementTip {
    pub fn new(tip_type: TipType, content: &str) -> Self {
        Self {
            tip_type,
            content: content.to_string(),
            content_label: None,
        }
    }
}

/// Environment lookups available to rules
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    /// Document the element lives in, which may be a frame document
    pub element_document: &'a Document,
    pub baseline: &'a BaselineCache,
    /// Grids of the tables in `element_document`
    pub tables: &'a TableCache,
}

impl<'a> RuleContext<'a> {
    pub fn new(
        element_document: &'a Document,
        baseline: &'a BaselineCache,
        tables: &'a TableCache,
    ) -> Self {
        Self {
            element_document,
            baseline,
            tables,
        }
    }
}

/// Per-rule options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleOptions {
    pub enabled: bool,
}

impl Default for RuleOptions {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Options keyed by rule name; rules without an entry use the defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleOptionsMap {
    rules: HashMap<String, RuleOptions>,
}

impl RuleOptionsMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> Result<Self, A11yError> {
        serde_json::from_str(json).map_err(A11yError::Settings)
    }

    pub fn get(&self, rule_name: &str) -> RuleOptions {
        self.rules.get(rule_name).copied().unwrap_or_default()
    }

    pub fn set(&mut self, rule_name: &str, options: RuleOptions) {
        self.rules.insert(rule_name.to_string(), options);
    }
}

/// An audit rule
pub trait Rule: std::fmt::Debug + Send + Sync {
    fn name(&self) -> &'static str;

    /// Categories whose elements this rule inspects
    fn categories(&self) -> &'static [Category];

    /// Tip types this rule may emit
    fn outputs(&self) -> &'static [TipType];

    /// Element shape precondition
    fn applies_to(&self, el: &ElementRef<'_>) -> bool;

    fn evaluate(&self, el: &ElementRef<'_>, ctx: &RuleContext<'_>) -> Vec<RuleResult>;

    /// `None` when disabled or not applicable, else the (possibly empty) fragments
    fn check(
        &self,
        el: &ElementRef<'_>,
        options: &RuleOptions,
        ctx: &RuleContext<'_>,
    ) -> Option<Vec<RuleResult>> {
        if !options.enabled || !self.applies_to(el) {
            return None;
        }
        Some(self.evaluate(el, ctx))
    }
}

static CATALOG: [&dyn Rule; 25] = [
    &HeadingLevel,
    &AccessibleName,
    &AriaHidden,
    &ControlFocus,
    &ControlName,
    &Fieldset,
    &HeadingName,
    &ImageName,
    &LabelAssociatedControl,
    &Landmark,
    &Lang,
    &LinkHref,
    &LinkTarget,
    &NestedInteractive,
    &PageTitle,
    &PageLang,
    &RadioGroup,
    &SvgSkip,
    &TableHeader,
    &TablePosition,
    &TableSize,
    &TargetSize,
    &RoleRule,
    &AriaState,
    &AccessibleDescription,
];

/// All rules in evaluation order
pub fn catalog() -> &'static [&'static dyn Rule] {
    &CATALOG
}

/// Look a rule up by name
pub fn find_rule(name: &str) -> Option<&'static dyn Rule> {
    CATALOG.iter().copied().find(|rule| rule.name() == name)
}

/// Run one rule against the element with id `t` of `html`
#[cfg(test)]
pub(crate) fn run_rule(rule: &dyn Rule, html: &str) -> Vec<(TipType, String)> {
    let doc = fos_html::parse(html).unwrap();
    let baseline = BaselineCache::new();
    let tables = TableCache::new();
    let ctx = RuleContext::new(&doc, &baseline, &tables);
    let target = doc.element(doc.get_element_by_id("t").unwrap()).unwrap();
    rule.check(&target, &RuleOptions::default(), &ctx)
        .unwrap_or_default()
        .iter()
        .map(|r| (r.tip_type, r.payload().to_string()))
        .collect()
}
