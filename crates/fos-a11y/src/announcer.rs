//! Announcement Scheduler
//!
//! Timed, interruptible replay of live-region updates. The scheduler never
//! reads the clock: every operation takes the current time and the host
//! fires expired timers through [`AnnouncementScheduler::tick`].

use crate::aria::LiveLevel;
use crate::live_region::LiveUpdate;
use crate::settings::Settings;
use serde::Serialize;
use std::collections::BTreeMap;

/// Milliseconds on the host's monotonic clock
pub type Millis = u64;

/// Announcement on screen, removed at `until`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Announcement {
    #[serde(skip)]
    id: u64,
    pub content: String,
    pub level: LiveLevel,
    pub until: Millis,
}

/// Announcement stopped by a pause, keeping its remaining time
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PausedAnnouncement {
    pub content: String,
    pub level: LiveLevel,
    pub rest: Millis,
}

/// User input that drives the queue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlSignal {
    /// Pause when something is showing, else resume
    TogglePause,
    Clear,
}

impl ControlSignal {
    /// Key binding: Shift toggles, Control clears
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "Shift" => Some(Self::TogglePause),
            "Control" => Some(Self::Clear),
            _ => None,
        }
    }

    /// Signal for a focus change anywhere on the page
    pub fn focus_changed() -> Self {
        Self::Clear
    }
}

/// Rendering view of the queue
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchedulerSnapshot {
    pub announcements: Vec<Announcement>,
    pub revision: u64,
}

#[derive(Debug)]
pub struct AnnouncementScheduler {
    settings: Settings,
    live: Vec<Announcement>,
    paused: Vec<PausedAnnouncement>,
    /// Announcement id to expiry
    timers: BTreeMap<u64, Millis>,
    next_id: u64,
    revision: u64,
}

impl Default for AnnouncementScheduler {
    fn default() -> Self {
        Self::new(&Settings::default())
    }
}

impl AnnouncementScheduler {
    pub fn new(settings: &Settings) -> Self {
        Self {
            settings: settings.clone(),
            live: Vec::new(),
            paused: Vec::new(),
            timers: BTreeMap::new(),
            next_id: 0,
            revision: 0,
        }
    }

    /// Adopt new timing; running timers keep their deadlines
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.settings = settings.clone();
    }

    pub fn announcements(&self) -> &[Announcement] {
        &self.live
    }

    pub fn paused(&self) -> &[PausedAnnouncement] {
        &self.paused
    }

    /// Bumped on every observable state change
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn snapshot(&self) -> SchedulerSnapshot {
        SchedulerSnapshot {
            announcements: self.live.clone(),
            revision: self.revision,
        }
    }

    /// Earliest pending timer, for hosts that sleep until the next expiry
    pub fn next_deadline(&self) -> Option<Millis> {
        self.timers.values().copied().min()
    }

    /// Lifetime of `content`: characters times the per-character rate, capped
    pub fn duration_for(&self, content: &str) -> Millis {
        self.settings.announcement_duration_ms(content.chars().count())
    }

    /// Schedule one announcement; returns false when its lifetime is zero
    pub(crate) fn add(&mut self, content: &str, level: LiveLevel, now: Millis) -> bool {
        let duration = self.duration_for(content);
        self.show(content, level, duration, now)
    }

    fn show(&mut self, content: &str, level: LiveLevel, duration: Millis, now: Millis) -> bool {
        if duration == 0 {
            return false;
        }
        self.next_id += 1;
        let id = self.next_id;
        let until = now + duration;
        self.live.push(Announcement {
            id,
            content: content.to_string(),
            level,
            until,
        });
        self.timers.insert(id, until);
        self.revision += 1;
        true
    }

    /// Fire every timer due at `now`; returns whether anything expired
    pub fn tick(&mut self, now: Millis) -> bool {
        let mut due: Vec<(Millis, u64)> = self
            .timers
            .iter()
            .filter(|&(_, &until)| until <= now)
            .map(|(&id, &until)| (until, id))
            .collect();
        due.sort_unstable();

        let mut changed = false;
        for (_, id) in due {
            self.timers.remove(&id);
            // An announcement removed by pause or clear is simply gone
            if let Some(pos) = self.live.iter().position(|a| a.id == id) {
                self.live.remove(pos);
                changed = true;
            }
        }
        if changed {
            self.revision += 1;
        }
        changed
    }

    /// Stop every live announcement, keeping its remaining time
    pub fn pause(&mut self, now: Millis) -> bool {
        if self.live.is_empty() {
            return false;
        }
        self.timers.clear();
        self.paused = self
            .live
            .drain(..)
            .filter(|a| a.until > now)
            .map(|a| PausedAnnouncement {
                rest: a.until - now,
                content: a.content,
                level: a.level,
            })
            .collect();
        self.revision += 1;
        tracing::debug!("Paused {} announcements", self.paused.len());
        true
    }

    /// Re-anchor every paused announcement at `now`
    pub fn resume(&mut self, now: Millis) -> bool {
        if self.paused.is_empty() {
            return false;
        }
        let paused = std::mem::take(&mut self.paused);
        tracing::debug!("Resuming {} announcements", paused.len());
        for entry in &paused {
            self.show(&entry.content, entry.level, entry.rest, now);
        }
        self.revision += 1;
        true
    }

    pub fn toggle_pause(&mut self, now: Millis) -> bool {
        if self.live.is_empty() {
            self.resume(now)
        } else {
            self.pause(now)
        }
    }

    /// Cancel all timers and empty both queues; no-op when already empty
    pub fn clear(&mut self) -> bool {
        if self.live.is_empty() && self.paused.is_empty() && self.timers.is_empty() {
            return false;
        }
        self.timers.clear();
        self.live.clear();
        self.paused.clear();
        self.revision += 1;
        tracing::debug!("Cleared announcements");
        true
    }

    pub fn signal(&mut self, signal: ControlSignal, now: Millis) -> bool {
        match signal {
            ControlSignal::TogglePause => self.toggle_pause(now),
            ControlSignal::Clear => self.clear(),
        }
    }

    /// Apply one batch of live-region updates
    ///
    /// Any arrival drops paused entries; an assertive arrival first clears
    /// everything, then every update of the batch is scheduled in order.
    pub fn receive(&mut self, updates: &[LiveUpdate], now: Millis) {
        if updates.is_empty() {
            return;
        }
        if !self.paused.is_empty() {
            self.paused.clear();
            self.revision += 1;
        }
        if updates.iter().any(|u| u.level == LiveLevel::Assertive) {
            tracing::debug!("Assertive update interrupts queued announcements");
            self.clear();
        }
        for update in updates {
            self.add(&update.content, update.level, now);
        }
    }
}
