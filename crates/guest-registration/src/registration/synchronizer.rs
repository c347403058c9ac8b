use tracing::debug;

use super::domain::GuestRecord;
use crate::config::{FormConfig, DEFAULT_MAX_GUESTS};

/// Keeps the guest list length equal to the selected guest count.
#[derive(Debug, Clone, Copy)]
pub struct GuestListSynchronizer {
    max_guests: u8,
}

impl Default for GuestListSynchronizer {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_GUESTS)
    }
}

impl GuestListSynchronizer {
    pub fn new(max_guests: u8) -> Self {
        Self {
            max_guests: max_guests.max(1),
        }
    }

    pub fn from_config(config: &FormConfig) -> Self {
        Self::new(config.max_guests)
    }

    pub fn max_guests(&self) -> u8 {
        self.max_guests
    }

    /// Interpret raw guest-count input. Zero, non-numeric and out-of-range
    /// values yield `None`.
    pub fn parse_target(&self, raw: &str) -> Option<u8> {
        raw.trim()
            .parse::<u8>()
            .ok()
            .filter(|count| (1..=self.max_guests).contains(count))
    }

    /// Grow or shrink `guests` at the tail until it holds `target` records.
    /// A `None` target leaves the list untouched.
    pub fn synchronize(&self, mut guests: Vec<GuestRecord>, target: Option<u8>) -> Vec<GuestRecord> {
        let Some(target) = target else {
            return guests;
        };
        let target = usize::from(target);
        let current = guests.len();

        if current < target {
            guests.resize_with(target, GuestRecord::placeholder);
            debug!(added = target - current, total = target, "guest list grown");
        } else if current > target {
            guests.truncate(target);
            debug!(removed = current - target, total = target, "guest list shrunk");
        }

        guests
    }
}
