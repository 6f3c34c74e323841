//! Notification delivery port trait.

use crate::domain::error::LsbotError;

/// Sink for the composed report. Fire-and-forget: delivery success is the
/// adapter's concern, the core never waits on a response body.
pub trait NotifyPort {
    fn send(&self, message: &str) -> Result<(), LsbotError>;
}
