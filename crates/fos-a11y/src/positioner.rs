//! Annotation Positioner
//!
//! Places the tip list of one record around the element box and tracks
//! the hover reveal in interactive mode.

use crate::category::Category;
use crate::collector::ElementMeta;
use crate::settings::Settings;
use fos_dom::DOMRect;
use serde::Serialize;
use std::collections::BTreeSet;

/// Distance from a root edge that flips vertical placement
pub const EDGE_MARGIN: f64 = 24.0;
/// Width below which tips may right-align near the right edge
pub const NARROW_WIDTH: f64 = 160.0;
/// Images shorter than this keep their tips outside
const SMALL_IMAGE_HEIGHT: f64 = 32.0;

/// Union of all audit roots
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct RootBounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl From<DOMRect> for RootBounds {
    fn from(rect: DOMRect) -> Self {
        Self {
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum VerticalPosition {
    InnerTop,
    InnerBottom,
    OuterTop,
    OuterBottom,
}

impl VerticalPosition {
    /// Placement for a record inside `bounds`
    pub fn of(meta: &ElementMeta, bounds: &RootBounds) -> Self {
        if meta.categories.contains(&Category::Heading) {
            if meta.y < EDGE_MARGIN {
                Self::InnerTop
            } else {
                Self::OuterTop
            }
        } else if meta.categories.contains(&Category::Image) {
            if meta.y > EDGE_MARGIN && meta.height < SMALL_IMAGE_HEIGHT {
                Self::OuterTop
            } else {
                Self::InnerTop
            }
        } else if meta.y + meta.height > bounds.height - EDGE_MARGIN {
            Self::InnerBottom
        } else {
            Self::OuterBottom
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HorizontalAlign {
    Left,
    Right,
}

impl HorizontalAlign {
    pub fn of(meta: &ElementMeta, bounds: &RootBounds) -> Self {
        if meta.width < NARROW_WIDTH && meta.x + meta.width > bounds.width - NARROW_WIDTH {
            Self::Right
        } else {
            Self::Left
        }
    }
}

/// Render instructions for one record
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TipLayout {
    pub vertical: VerticalPosition,
    pub horizontal: HorizontalAlign,
    pub opacity: f64,
    pub font_size: f64,
    /// Enabled categories drawn as borders; empty when there are no tips
    pub visible_categories: Vec<Category>,
    pub labels_visible: bool,
}

impl TipLayout {
    /// `None` when the record is hidden or none of its categories is enabled
    pub fn compute(
        meta: &ElementMeta,
        bounds: &RootBounds,
        settings: &Settings,
        hovered: bool,
    ) -> Option<Self> {
        let enabled: Vec<Category> = meta
            .categories
            .iter()
            .copied()
            .filter(|&c| settings.category_enabled(c))
            .collect();
        if meta.hidden || enabled.is_empty() {
            return None;
        }
        let revealed = settings.interactive_mode && hovered;
        let opacity = if revealed {
            1.0
        } else {
            f64::from(settings.tip_opacity_percent) / 100.0
        };
        Some(Self {
            vertical: VerticalPosition::of(meta, bounds),
            horizontal: HorizontalAlign::of(meta, bounds),
            opacity,
            font_size: settings.tip_font_size,
            visible_categories: if meta.tips.is_empty() { Vec::new() } else { enabled },
            labels_visible: !(settings.hide_tips && !hovered),
        })
    }
}

/// Handle of one pointer-move subscription
pub type SubscriptionId = u64;

/// Page-level pointer-move stream
pub trait PointerSource {
    fn subscribe(&mut self) -> SubscriptionId;
    fn unsubscribe(&mut self, id: SubscriptionId);
}

/// Minimal [`PointerSource`] bookkeeping for hosts that dispatch moves themselves
#[derive(Debug, Default)]
pub struct ListenerRegistry {
    next: SubscriptionId,
    active: BTreeSet<SubscriptionId>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscriptions currently attached
    pub fn active(&self) -> usize {
        self.active.len()
    }
}

impl PointerSource for ListenerRegistry {
    fn subscribe(&mut self) -> SubscriptionId {
        self.next += 1;
        self.active.insert(self.next);
        self.next
    }

    fn unsubscribe(&mut self, id: SubscriptionId) {
        self.active.remove(&id);
    }
}

/// Hover reveal for one record with at most one live subscription
#[derive(Debug)]
pub struct HoverTracker {
    bounds: DOMRect,
    interactive: bool,
    hovered: bool,
    subscription: Option<SubscriptionId>,
}

impl HoverTracker {
    pub fn new(meta: &ElementMeta, interactive: bool) -> Self {
        Self {
            bounds: meta.absolute_rect(),
            interactive,
            hovered: false,
            subscription: None,
        }
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscription.is_some()
    }

    /// Pointer entered or moved over the overlay; ignored outside interactive mode
    pub fn pointer_entered(&mut self, source: &mut impl PointerSource) {
        if !self.interactive || self.subscription.is_some() {
            return;
        }
        self.hovered = true;
        self.subscription = Some(source.subscribe());
    }

    /// Page-coordinate pointer move delivered through the subscription
    pub fn pointer_moved(&mut self, source: &mut impl PointerSource, page_x: f64, page_y: f64) {
        if self.subscription.is_none() || self.bounds.contains_point(page_x, page_y) {
            return;
        }
        self.hovered = false;
        self.release(source);
    }

    /// Drop the subscription, e.g. when the record is discarded
    pub fn release(&mut self, source: &mut impl PointerSource) {
        if let Some(id) = self.subscription.take() {
            source.unsubscribe(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{ElementTip, TipType};

    fn meta(categories: Vec<Category>, x: f64, y: f64, width: f64, height: f64) -> ElementMeta {
        ElementMeta {
            x,
            y,
            absolute_x: x,
            absolute_y: y,
            width,
            height,
            tips: vec![ElementTip::new(TipType::Name, "x")],
            categories,
            hidden: false,
        }
    }

    const BOUNDS: RootBounds = RootBounds {
        x: 0.0,
        y: 0.0,
        width: 1000.0,
        height: 800.0,
    };

    #[test]
    fn test_vertical_rules() {
        let heading =
            |y| VerticalPosition::of(&meta(vec![Category::Heading], 0.0, y, 100.0, 30.0), &BOUNDS);
        assert_eq!(heading(10.0), VerticalPosition::InnerTop);
        assert_eq!(heading(100.0), VerticalPosition::OuterTop);

        let image =
            |y, h| VerticalPosition::of(&meta(vec![Category::Image], 0.0, y, 100.0, h), &BOUNDS);
        assert_eq!(image(100.0, 20.0), VerticalPosition::OuterTop);
        assert_eq!(image(100.0, 200.0), VerticalPosition::InnerTop);
        assert_eq!(image(10.0, 20.0), VerticalPosition::InnerTop);

        let other =
            |y| VerticalPosition::of(&meta(vec![Category::Link], 0.0, y, 100.0, 30.0), &BOUNDS);
        assert_eq!(other(100.0), VerticalPosition::OuterBottom);
        assert_eq!(other(760.0), VerticalPosition::InnerBottom);
    }

    #[test]
    fn test_right_align_only_narrow_near_edge() {
        let align = |x, width| HorizontalAlign::of(&meta(vec![], x, 0.0, width, 10.0), &BOUNDS);
        assert_eq!(align(900.0, 50.0), HorizontalAlign::Right);
        assert_eq!(align(700.0, 250.0), HorizontalAlign::Left);
        assert_eq!(align(100.0, 50.0), HorizontalAlign::Left);
    }

    #[test]
    fn test_layout_gating_and_opacity() {
        let settings = Settings::default();
        let link = meta(vec![Category::Link], 0.0, 100.0, 50.0, 20.0);
        assert!(TipLayout::compute(&link, &BOUNDS, &settings, false).is_none());

        let heading = meta(vec![Category::Heading], 0.0, 100.0, 50.0, 20.0);
        let idle = TipLayout::compute(&heading, &BOUNDS, &settings, false).unwrap();
        assert_eq!(idle.opacity, 0.5);
        assert!(!idle.labels_visible);
        let hovered = TipLayout::compute(&heading, &BOUNDS, &settings, true).unwrap();
        assert_eq!(hovered.opacity, 1.0);
        assert!(hovered.labels_visible);
    }

    #[test]
    fn test_single_subscription() {
        let mut source = ListenerRegistry::new();
        let record = meta(vec![Category::Button], 10.0, 10.0, 40.0, 40.0);
        let mut tracker = HoverTracker::new(&record, true);

        for _ in 0..5 {
            tracker.pointer_entered(&mut source);
            tracker.pointer_moved(&mut source, 20.0, 20.0);
        }
        assert!(tracker.is_hovered());
        assert_eq!(source.active(), 1);

        tracker.pointer_moved(&mut source, 200.0, 200.0);
        assert!(!tracker.is_hovered());
        assert_eq!(source.active(), 0);

        tracker.pointer_entered(&mut source);
        assert_eq!(source.active(), 1);
        tracker.release(&mut source);
        assert_eq!(source.active(), 0);
    }

    #[test]
    fn test_no_reveal_outside_interactive_mode() {
        let settings = Settings {
            interactive_mode: false,
            ..Settings::default()
        };
        let mut source = ListenerRegistry::new();
        let record = meta(vec![Category::Heading], 10.0, 100.0, 40.0, 40.0);
        let mut tracker = HoverTracker::new(&record, settings.interactive_mode);

        tracker.pointer_entered(&mut source);
        assert!(!tracker.is_hovered());
        assert!(!tracker.is_subscribed());
        assert_eq!(source.active(), 0);

        let layout = TipLayout::compute(&record, &BOUNDS, &settings, tracker.is_hovered()).unwrap();
        assert!(!layout.labels_visible);
        assert_eq!(layout.opacity, 0.5);
    }
}
