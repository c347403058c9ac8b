//! Guest registration for short-term rental compliance.
//!
//! The [`registration`] module holds the form-state engine: it keeps the guest
//! list in step with the selected guest count, derives whether a marriage
//! certificate is required, and validates the whole form before handing a typed
//! payload to a submission sink.

pub mod config;
pub mod error;
pub mod registration;
pub mod telemetry;
