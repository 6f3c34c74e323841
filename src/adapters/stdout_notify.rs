//! Console notifier for dry runs.

use crate::domain::error::LsbotError;
use crate::ports::notify_port::NotifyPort;

pub struct StdoutNotify;

impl NotifyPort for StdoutNotify {
    fn send(&self, message: &str) -> Result<(), LsbotError> {
        println!("{message}");
        Ok(())
    }
}
