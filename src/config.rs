use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::constants::{MENU_EXIT_DELAY, MENU_SETTLE_DELAY, REVIEW_INTERVAL};
use crate::content::{Content, ContentFile};
use crate::error::{Error, Result};

/// Delays driving the page's timers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    pub review_interval: Duration,
    pub menu_settle_delay: Duration,
    pub menu_exit_delay: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            review_interval: REVIEW_INTERVAL,
            menu_settle_delay: MENU_SETTLE_DELAY,
            menu_exit_delay: MENU_EXIT_DELAY,
        }
    }
}

/// `[timing]` table of a content file, in milliseconds.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct TimingFile {
    pub review_interval_ms: Option<u64>,
    pub menu_settle_ms: Option<u64>,
    pub menu_exit_ms: Option<u64>,
}

impl TimingFile {
    pub fn into_timing(self) -> Result<Timing> {
        let defaults = Timing::default();
        let timing = Timing {
            review_interval: self
                .review_interval_ms
                .map_or(defaults.review_interval, Duration::from_millis),
            menu_settle_delay: self
                .menu_settle_ms
                .map_or(defaults.menu_settle_delay, Duration::from_millis),
            menu_exit_delay: self
                .menu_exit_ms
                .map_or(defaults.menu_exit_delay, Duration::from_millis),
        };
        if timing.review_interval.is_zero() {
            return Err(Error::ZeroInterval);
        }
        Ok(timing)
    }
}

/// Everything the page needs at startup.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub content: Content,
    pub timing: Timing,
}

impl Settings {
    /// Built-in content, or the given file overlaid on it.
    pub fn load(path: Option<&Path>) -> Result<Settings> {
        let Some(path) = path else {
            return Ok(Settings::default());
        };
        let mut file = ContentFile::read(path)?;
        let timing = std::mem::take(&mut file.timing).into_timing()?;
        Ok(Settings {
            content: file.into_content()?,
            timing,
        })
    }
}
