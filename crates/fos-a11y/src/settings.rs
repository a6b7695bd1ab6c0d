//! Auditor settings
//!
//! Loaded from camelCase JSON; absent fields keep their defaults.

use crate::category::Category;
use crate::A11yError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Master switch for the annotation overlay
    pub accessibility_info: bool,

    pub page: bool,
    pub image: bool,
    pub form_control: bool,
    pub button: bool,
    pub link: bool,
    pub heading: bool,
    pub aria_hidden: bool,
    pub section: bool,
    pub lang: bool,

    /// Reveal labels on hover instead of always
    pub interactive_mode: bool,
    pub hide_tips: bool,
    pub show_live_regions: bool,

    pub announcement_max_seconds: f64,
    pub announcement_seconds_per_character: f64,

    pub tip_opacity_percent: u32,
    pub live_region_opacity_percent: u32,
    pub tip_font_size: f64,
    pub live_region_font_size: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            accessibility_info: true,
            page: true,
            image: true,
            form_control: true,
            button: false,
            link: false,
            heading: true,
            aria_hidden: true,
            section: true,
            lang: true,
            interactive_mode: true,
            hide_tips: true,
            show_live_regions: true,
            announcement_max_seconds: 10.0,
            announcement_seconds_per_character: 0.5,
            tip_opacity_percent: 50,
            live_region_opacity_percent: 50,
            tip_font_size: 10.0,
            live_region_font_size: 12.0,
        }
    }
}

impl Settings {
    /// Parse and validate a (possibly partial) settings document
    pub fn from_json(json: &str) -> Result<Self, A11yError> {
        let settings: Settings = serde_json::from_str(json).map_err(A11yError::Settings)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), A11yError> {
        let invalid = |field: &'static str, reason: &str| A11yError::InvalidSetting {
            field,
            reason: reason.to_string(),
        };
        if self.tip_opacity_percent > 100 {
            return Err(invalid("tipOpacityPercent", "must be between 0 and 100"));
        }
        if self.live_region_opacity_percent > 100 {
            return Err(invalid("liveRegionOpacityPercent", "must be between 0 and 100"));
        }
        if !(self.announcement_max_seconds >= 0.0) {
            return Err(invalid("announcementMaxSeconds", "must not be negative"));
        }
        if !(self.announcement_seconds_per_character >= 0.0) {
            return Err(invalid("announcementSecondsPerCharacter", "must not be negative"));
        }
        if !(self.tip_font_size > 0.0) {
            return Err(invalid("tipFontSize", "must be positive"));
        }
        if !(self.live_region_font_size > 0.0) {
            return Err(invalid("liveRegionFontSize", "must be positive"));
        }
        Ok(())
    }

    pub fn category_enabled(&self, category: Category) -> bool {
        match category {
            Category::Page => self.page,
            Category::Image => self.image,
            Category::FormControl => self.form_control,
            Category::Button => self.button,
            Category::Link => self.link,
            Category::Heading => self.heading,
            Category::AriaHidden => self.aria_hidden,
            Category::Section => self.section,
            Category::Lang => self.lang,
        }
    }

    /// Whether any category is switched on
    pub fn any_category_enabled(&self) -> bool {
        Category::ALL.into_iter().any(|c| self.category_enabled(c))
    }

    /// Announcement lifetime in milliseconds for `chars` characters
    pub fn announcement_duration_ms(&self, chars: usize) -> u64 {
        let seconds = (chars as f64 * self.announcement_seconds_per_character)
            .min(self.announcement_max_seconds);
        (seconds * 1000.0).round() as u64
    }
}
