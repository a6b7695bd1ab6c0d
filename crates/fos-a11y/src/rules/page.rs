//! Document-level rules, evaluated on `<body>`

use super::{Rule, RuleContext, RuleResult, TipType};
use crate::category::Category;
use fos_dom::ElementRef;

fn is_body(el: &ElementRef<'_>) -> bool {
    el.tag_name() == "body"
}

#[derive(Debug)]
pub struct PageTitle;

impl Rule for PageTitle {
    fn name(&self) -> &'static str {
        "page-title"
    }

    fn categories(&self) -> &'static [Category] {
        &[Category::Page]
    }

    fn outputs(&self) -> &'static [TipType] {
        &[TipType::PageTitle, TipType::Error]
    }

    fn applies_to(&self, el: &ElementRef<'_>) -> bool {
        is_body(el)
    }

    fn evaluate(&self, _el: &ElementRef<'_>, ctx: &RuleContext<'_>) -> Vec<RuleResult> {
        let title = ctx.element_document.title();
        if title.is_empty() {
            vec![RuleResult::new(self.name(), TipType::Error, "messages.noPageTitle")]
        } else {
            vec![RuleResult::new(self.name(), TipType::PageTitle, title)]
        }
    }
}

#[derive(Debug)]
pub struct PageLang;

impl Rule for PageLang {
    fn name(&self) -> &'static str {
        "page-lang"
    }

    fn categories(&self) -> &'static [Category] {
        &[Category::Page]
    }

    fn outputs(&self) -> &'static [TipType] {
        &[TipType::Lang, TipType::Error]
    }

    fn applies_to(&self, el: &ElementRef<'_>) -> bool {
        is_body(el)
    }

    fn evaluate(&self, _el: &ElementRef<'_>, ctx: &RuleContext<'_>) -> Vec<RuleResult> {
        let doc = ctx.element_document;
        let lang = doc
            .element(doc.document_element())
            .and_then(|html| html.attr("lang"))
            .map(str::trim)
            .unwrap_or_default();
        if lang.is_empty() {
            vec![RuleResult::new(self.name(), TipType::Error, "messages.noPageLang")]
        } else {
            vec![RuleResult::new(self.name(), TipType::Lang, lang)]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::baseline::BaselineCache;
    use crate::rules::{RuleOptions, TableCache};

    fn run_on_body(rule: &dyn Rule, html: &str) -> Vec<RuleResult> {
        let doc = fos_html::parse(html).unwrap();
        let baseline = BaselineCache::new();
        let tables = TableCache::new();
        let ctx = RuleContext::new(&doc, &baseline, &tables);
        let body = doc.body_element().unwrap();
        rule.check(&body, &RuleOptions::default(), &ctx).unwrap_or_default()
    }

    #[test]
    fn test_title() {
        let results = run_on_body(&PageTitle, "<title> Home </title><p>x</p>");
        assert_eq!(results[0].tip_type, TipType::PageTitle);
        assert_eq!(results[0].content.as_deref(), Some("Home"));

        let results = run_on_body(&PageTitle, "<p>x</p>");
        assert_eq!(results[0].message.as_deref(), Some("messages.noPageTitle"));
    }

    #[test]
    fn test_lang() {
        let results = run_on_body(&PageLang, "<html lang=fr><body></body></html>");
        assert_eq!(results[0].tip_type, TipType::Lang);
        assert_eq!(results[0].payload(), "fr");

        let results = run_on_body(&PageLang, "<p>x</p>");
        assert_eq!(results[0].payload(), "messages.noPageLang");
    }
}
