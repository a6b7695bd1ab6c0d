//! fOS Accessibility
//!
//! In-page accessibility auditor for fOS documents.
//!
//! Features:
//! - ARIA roles, accessible names and descriptions
//! - Rule catalog producing categorized annotation tips
//! - Annotation layout and hover reveal
//! - Live-region monitoring and timed announcements

pub mod announcer;
pub mod aria;
pub mod baseline;
pub mod category;
pub mod collector;
pub mod live_region;
pub mod name;
pub mod positioner;
pub mod predicates;
pub mod rules;
pub mod settings;

pub use announcer::{
    Announcement, AnnouncementScheduler, ControlSignal, Millis, PausedAnnouncement,
    SchedulerSnapshot,
};
pub use aria::{AriaRole, LiveLevel, LiveRelevant};
pub use baseline::{BaselineCache, ControlKind};
pub use category::{Category, classify};
pub use collector::{Auditor, ElementMeta, MetaSnapshot};
pub use live_region::{
    AnnounceMode, LiveRegionMonitor, LiveUpdate, MonitorState, RegionHandle, RelevantFlags,
    is_live_region,
};
pub use name::{accessible_description, accessible_name, known_role};
pub use positioner::{
    HorizontalAlign, HoverTracker, ListenerRegistry, PointerSource, RootBounds, SubscriptionId,
    TipLayout, VerticalPosition,
};
pub use rules::{
    ElementTip, Rule, RuleContext, RuleOptions, RuleOptionsMap, RuleResult, TableCache, TipType,
    catalog,
};
pub use settings::Settings;

/// Accessibility error
#[derive(Debug, thiserror::Error)]
pub enum A11yError {
    #[error("Malformed settings: {0}")]
    Settings(#[source] serde_json::Error),

    #[error("Invalid setting {field}: {reason}")]
    InvalidSetting { field: &'static str, reason: String },
}
