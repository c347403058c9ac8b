use serde::Serialize;

use super::domain::{GuestRecord, Sex};

/// Which nationality/sex categories are present in the current guest list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GuestCompositionSignals {
    pub moroccan_female: bool,
    pub moroccan_male: bool,
    pub non_moroccan_female: bool,
    pub non_moroccan_male: bool,
}

impl GuestCompositionSignals {
    /// Guests whose sex is unset fall into no category.
    pub fn observe(guests: &[GuestRecord]) -> Self {
        let mut signals = Self::default();

        for guest in guests {
            match (guest.is_moroccan(), guest.sex) {
                (true, Some(Sex::Female)) => signals.moroccan_female = true,
                (true, Some(Sex::Male)) => signals.moroccan_male = true,
                (false, Some(Sex::Female)) => signals.non_moroccan_female = true,
                (false, Some(Sex::Male)) => signals.non_moroccan_male = true,
                (_, None) => {}
            }
        }

        signals
    }

    pub fn requires_marriage_certificate(&self) -> bool {
        (self.moroccan_female && self.moroccan_male)
            || (self.moroccan_female && self.non_moroccan_male)
            || (self.moroccan_male && self.non_moroccan_female)
    }
}

/// Whether the current guest list makes a marriage certificate mandatory.
///
/// Recomputed from scratch on every call. Nationality comparison is exact, so an
/// empty or partially typed value counts as non-Moroccan.
pub fn requires_marriage_certificate(guests: &[GuestRecord]) -> bool {
    GuestCompositionSignals::observe(guests).requires_marriage_certificate()
}
