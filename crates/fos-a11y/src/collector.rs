//! Meta Collector
//!
//! Walks the audit roots of a page (body, open dialogs, popovers and every
//! readable same-origin frame), classifies each element and merges the
//! output of the applicable rules into one record per element.

use crate::baseline::BaselineCache;
use crate::category::{Category, classify};
use crate::positioner::RootBounds;
use crate::predicates::is_hidden;
use crate::rules::{ElementTip, RuleContext, RuleOptionsMap, TableCache, catalog};
use crate::settings::Settings;
use fos_dom::{DOMRect, Document, DocumentId, ElementRef, NodeId, Page};
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

/// Annotation record for one audited element
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementMeta {
    /// Position relative to the union of the audit roots
    pub x: f64,
    pub y: f64,
    /// Page position, independent of scrolling
    pub absolute_x: f64,
    pub absolute_y: f64,
    pub width: f64,
    pub height: f64,
    pub tips: Vec<ElementTip>,
    pub categories: Vec<Category>,
    pub hidden: bool,
}

impl ElementMeta {
    /// Page-coordinate box used for hover tracking
    pub fn absolute_rect(&self) -> DOMRect {
        DOMRect::from_xywh(self.absolute_x, self.absolute_y, self.width, self.height)
    }
}

/// Result of one collection pass
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MetaSnapshot {
    pub bounds: RootBounds,
    pub elements: BTreeMap<Category, Vec<ElementMeta>>,
}

impl MetaSnapshot {
    pub fn get(&self, category: Category) -> &[ElementMeta] {
        self.elements.get(&category).map(Vec::as_slice).unwrap_or_default()
    }

    /// Records of every bucket, in category order
    pub fn iter(&self) -> impl Iterator<Item = &ElementMeta> {
        self.elements.values().flatten()
    }

    pub fn len(&self) -> usize {
        self.elements.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One auditing session: settings, rule options and the default-size baseline
#[derive(Debug, Default)]
pub struct Auditor {
    settings: Settings,
    options: RuleOptionsMap,
    baseline: BaselineCache,
}

/// Where a document's viewport sits inside the top-level viewport
#[derive(Debug, Clone, Copy)]
struct Placement {
    offset_x: f64,
    offset_y: f64,
}

struct Pass<'p> {
    page: &'p Page,
    bounds: RootBounds,
    scroll: (f64, f64),
    visited: HashSet<DocumentId>,
    snapshot: MetaSnapshot,
}

impl Auditor {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    pub fn with_options(mut self, options: RuleOptionsMap) -> Self {
        self.options = options;
        self
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Replace the settings; takes effect on the next pass
    pub fn apply_settings(&mut self, settings: Settings) {
        self.settings = settings;
    }

    pub fn options(&self) -> &RuleOptionsMap {
        &self.options
    }

    pub fn baseline(&self) -> &BaselineCache {
        &self.baseline
    }

    /// Full recomputation over the page
    pub fn collect(&self, page: &Page) -> MetaSnapshot {
        if !self.settings.accessibility_info {
            return MetaSnapshot::default();
        }
        let main = page.main();
        let bounds = root_bounds(main);
        let mut pass = Pass {
            page,
            bounds,
            scroll: main.scroll(),
            visited: HashSet::new(),
            snapshot: MetaSnapshot {
                bounds,
                elements: BTreeMap::new(),
            },
        };
        self.collect_document(
            &mut pass,
            DocumentId::MAIN,
            Placement {
                offset_x: 0.0,
                offset_y: 0.0,
            },
        );
        tracing::debug!(
            "Collected {} element records from {} documents",
            pass.snapshot.len(),
            pass.visited.len()
        );
        pass.snapshot
    }

    fn collect_document(&self, pass: &mut Pass<'_>, id: DocumentId, placement: Placement) {
        if !pass.visited.insert(id) {
            return;
        }
        let page = pass.page;
        let doc = match page.document(id) {
            Ok(doc) => doc,
            Err(err) => {
                tracing::debug!("Skipping document {:?}: {}", id, err);
                return;
            }
        };

        let tables = TableCache::new();
        let ctx = RuleContext::new(doc, &self.baseline, &tables);
        let mut seen: HashSet<NodeId> = HashSet::new();
        for root in audit_roots(doc) {
            for el in std::iter::once(root).chain(root.descendants()) {
                if !seen.insert(el.id()) {
                    continue;
                }
                if let Some((category, meta)) = self.audit_element(&el, &ctx, pass, placement) {
                    pass.snapshot.elements.entry(category).or_default().push(meta);
                }
            }
        }

        for iframe in page.frames_of(id) {
            match page.frame_document(id, iframe) {
                Ok(child) => {
                    let frame = doc.rect(iframe);
                    let inner = Placement {
                        offset_x: placement.offset_x + frame.x,
                        offset_y: placement.offset_y + frame.y,
                    };
                    self.collect_document(pass, child, inner);
                }
                Err(err) => {
                    tracing::debug!("Skipping frame {:?} of {:?}: {}", iframe, id, err);
                }
            }
        }
    }

    /// Primary bucket and record for one element, if any enabled category applies
    fn audit_element(
        &self,
        el: &ElementRef<'_>,
        ctx: &RuleContext<'_>,
        pass: &Pass<'_>,
        placement: Placement,
    ) -> Option<(Category, ElementMeta)> {
        let categories = classify(el);
        let enabled: Vec<Category> = categories
            .iter()
            .copied()
            .filter(|&c| self.settings.category_enabled(c))
            .collect();
        let primary = *enabled.first()?;

        let mut tips = Vec::new();
        for rule in catalog() {
            if !rule.categories().iter().any(|c| enabled.contains(c)) {
                continue;
            }
            if let Some(results) = rule.check(el, &self.options.get(rule.name()), ctx) {
                tips.extend(results.iter().map(|r| r.tip()));
            }
        }

        let rect = el.rect().translate(placement.offset_x, placement.offset_y);
        let meta = ElementMeta {
            x: rect.x - pass.bounds.x,
            y: rect.y - pass.bounds.y,
            absolute_x: rect.x + pass.scroll.0,
            absolute_y: rect.y + pass.scroll.1,
            width: rect.width,
            height: rect.height,
            tips,
            categories,
            hidden: is_hidden(el),
        };
        Some((primary, meta))
    }
}

/// `<body>`, open dialogs and shown popovers
fn audit_roots(doc: &Document) -> Vec<ElementRef<'_>> {
    let Some(body) = doc.body_element() else {
        return Vec::new();
    };
    let layers = body.descendants().filter(|el| {
        (el.tag_name() == "dialog" && el.has_attr("open"))
            || (el.has_attr("popover") && !is_hidden(el))
    });
    std::iter::once(body).chain(layers).collect()
}

fn root_bounds(doc: &Document) -> RootBounds {
    let union = audit_roots(doc)
        .iter()
        .map(|root| root.rect())
        .reduce(|acc, rect| acc.union(&rect))
        .unwrap_or_default();
    RootBounds::from(union)
}
