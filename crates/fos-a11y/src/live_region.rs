//! Live Region Monitor
//!
//! Tracks the live regions of a page and turns mutation batches into the
//! text a screen reader would speak for them.

use crate::announcer::{AnnouncementScheduler, Millis};
use crate::aria::{AriaRole, LiveLevel, LiveRelevant};
use crate::name::known_role;
use crate::predicates::{is_aria_hidden, is_hidden};
use crate::settings::Settings;
use fos_dom::{
    Document, DocumentId, ElementRef, MutationRecord, MutationType, NodeId, Page, ReadyState,
};
use serde::Serialize;
use std::collections::BTreeSet;

/// Whether this monitor speaks for itself or defers to an embedding page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnnounceMode {
    /// Primary page: updates are announced here
    #[default]
    SelfAnnounce,
    /// Delegating frame: the parent page announces
    Parent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MonitorState {
    #[default]
    Idle,
    Observing,
}

/// Subscribed live region, by position only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegionHandle {
    pub document: DocumentId,
    pub node: NodeId,
}

/// Text extracted from one mutation record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LiveUpdate {
    pub content: String,
    pub level: LiveLevel,
}

/// Relevant change flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RelevantFlags {
    pub additions: bool,
    pub removals: bool,
    pub text: bool,
}

impl RelevantFlags {
    pub fn all() -> Self {
        Self { additions: true, removals: true, text: true }
    }

    pub fn additions_text() -> Self {
        Self { additions: true, removals: false, text: true }
    }

    pub fn from_aria(relevant: &[LiveRelevant]) -> Self {
        let mut flags = Self::default();
        for r in relevant {
            match r {
                LiveRelevant::Additions => flags.additions = true,
                LiveRelevant::Removals => flags.removals = true,
                LiveRelevant::Text => flags.text = true,
                LiveRelevant::All => return Self::all(),
            }
        }
        if flags == Self::default() {
            Self::additions_text()
        } else {
            flags
        }
    }

    /// Flags of an element's `aria-relevant`, defaulting to additions text
    pub fn of(el: &ElementRef<'_>) -> Self {
        Self::from_aria(&LiveRelevant::parse_list(el.attr("aria-relevant").unwrap_or("")))
    }
}

/// `output`, a status/alert/log role token, or any `aria-live` but off
pub fn is_live_region(el: &ElementRef<'_>) -> bool {
    if el.tag_name() == "output" {
        return true;
    }
    let live_role = el.attr("role").is_some_and(|roles| {
        roles
            .split_whitespace()
            .filter_map(AriaRole::parse)
            .any(|role| matches!(role, AriaRole::Status | AriaRole::Alert | AriaRole::Log))
    });
    live_role || el.attr("aria-live").is_some_and(|v| !v.trim().eq_ignore_ascii_case("off"))
}

#[derive(Debug, Default)]
pub struct LiveRegionMonitor {
    mode: AnnounceMode,
    state: MonitorState,
    regions: BTreeSet<RegionHandle>,
}

impl LiveRegionMonitor {
    pub fn new(mode: AnnounceMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    pub fn mode(&self) -> AnnounceMode {
        self.mode
    }

    pub fn state(&self) -> MonitorState {
        self.state
    }

    pub fn regions(&self) -> impl Iterator<Item = RegionHandle> + '_ {
        self.regions.iter().copied()
    }

    pub fn is_subscribed(&self, region: RegionHandle) -> bool {
        self.regions.contains(&region)
    }

    /// Observe only on the primary page with live regions shown
    pub fn apply_settings(&mut self, settings: &Settings) {
        let next = if settings.show_live_regions && self.mode == AnnounceMode::SelfAnnounce {
            MonitorState::Observing
        } else {
            MonitorState::Idle
        };
        if next != self.state {
            tracing::debug!("Live region monitor {:?} -> {:?}", self.state, next);
            self.state = next;
            if next == MonitorState::Idle {
                self.regions.clear();
            }
        }
    }

    /// Reconcile subscriptions with the regions present now
    ///
    /// Returns the number of newly subscribed regions. Regions not found
    /// again are dropped.
    pub fn observe_live_regions(&mut self, page: &Page) -> usize {
        if self.state == MonitorState::Idle {
            return 0;
        }
        let mut found = BTreeSet::new();
        let mut visited = BTreeSet::new();
        discover(page, DocumentId::MAIN, &mut found, &mut visited);

        let added = found.difference(&self.regions).count();
        let dropped = self.regions.difference(&found).count();
        if added > 0 || dropped > 0 {
            tracing::debug!("Live regions: {} subscribed, {} dropped", added, dropped);
        }
        self.regions = found;
        added
    }

    /// Reportable text for one mutation batch of document `doc_id`
    pub fn extract_updates(
        &self,
        doc_id: DocumentId,
        doc: &Document,
        records: &[MutationRecord],
    ) -> Vec<LiveUpdate> {
        if self.state == MonitorState::Idle {
            return Vec::new();
        }
        let mut updates = Vec::new();
        for record in records {
            if record.mutation_type == MutationType::Attributes
                || !self.governs(doc_id, doc, record.target)
            {
                continue;
            }
            if let Some(update) = extract(doc, record) {
                tracing::trace!("Live update ({:?}): {:?}", update.level, update.content);
                updates.push(update);
            }
        }
        updates
    }

    /// Extract one batch and hand it to `scheduler` when announcing here
    pub fn handle_batch(
        &self,
        doc_id: DocumentId,
        doc: &Document,
        records: &[MutationRecord],
        scheduler: &mut AnnouncementScheduler,
        now: Millis,
    ) -> usize {
        if self.mode != AnnounceMode::SelfAnnounce {
            return 0;
        }
        let updates = self.extract_updates(doc_id, doc, records);
        scheduler.receive(&updates, now);
        updates.len()
    }

    fn governs(&self, doc_id: DocumentId, doc: &Document, target: NodeId) -> bool {
        let tree = doc.tree();
        self.regions
            .iter()
            .filter(|region| region.document == doc_id)
            .any(|region| tree.is_inclusive_ancestor(region.node, target))
    }
}

fn discover(
    page: &Page,
    id: DocumentId,
    found: &mut BTreeSet<RegionHandle>,
    visited: &mut BTreeSet<DocumentId>,
) {
    if !visited.insert(id) {
        return;
    }
    let Ok(doc) = page.document(id) else {
        return;
    };
    if let Some(body) = doc.body_element() {
        found.extend(
            std::iter::once(body)
                .chain(body.descendants())
                .filter(is_live_region)
                .map(|el| RegionHandle { document: id, node: el.id() }),
        );
    }
    for iframe in page.frames_of(id) {
        match page.frame_document(id, iframe) {
            Ok(child) => {
                let ready = page
                    .document(child)
                    .is_ok_and(|d| d.ready_state() == ReadyState::Complete);
                if ready {
                    discover(page, child, found, visited);
                }
            }
            Err(err) => tracing::debug!("Not watching frame {:?} of {:?}: {}", iframe, id, err),
        }
    }
}

/// Element that governs a mutation: the nearest live region above the
/// target, else the target (or its parent when it is a text node)
fn resolve<'a>(doc: &'a Document, target: NodeId) -> Option<ElementRef<'a>> {
    let parent = doc.tree().parent(target).and_then(|p| doc.element(p));
    parent
        .and_then(|p| p.closest(is_live_region))
        .or_else(|| doc.element(target))
        .or(parent)
}

fn extract(doc: &Document, record: &MutationRecord) -> Option<LiveUpdate> {
    let node = resolve(doc, record.target)?;
    if is_hidden(&node) || is_aria_hidden(&node) {
        return None;
    }

    let assertive =
        node.attr_is("aria-live", "assertive") || known_role(&node) == Some(AriaRole::Alert);
    let level = if assertive { LiveLevel::Assertive } else { LiveLevel::Polite };

    if node.attr_is("aria-atomic", "true") {
        return Some(LiveUpdate { content: node.text_content(), level });
    }

    let relevant = RelevantFlags::of(&node);
    let mut pieces = Vec::new();
    if record.added_nodes.is_empty() && record.removed_nodes.is_empty() {
        pieces.push(node.text_content());
    }
    if relevant.removals {
        pieces.extend(record.removed_nodes.iter().map(|&id| doc.text_content(id)));
    }
    if relevant.additions {
        pieces.extend(record.added_nodes.iter().map(|&id| doc.text_content(id)));
    }
    pieces.retain(|p| !p.is_empty());
    let content = pieces.join(" ");
    Some(LiveUpdate { content, level })
}
