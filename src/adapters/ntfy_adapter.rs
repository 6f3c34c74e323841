//! ntfy.sh push notification adapter.

use crate::domain::error::LsbotError;
use crate::ports::notify_port::NotifyPort;
use std::time::Duration;

pub struct NtfyAdapter {
    client: reqwest::blocking::Client,
    url: String,
}

impl NtfyAdapter {
    pub fn new(topic: &str) -> Result<Self, LsbotError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .map_err(|e| LsbotError::Notify {
                reason: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self {
            client,
            url: format!("https://ntfy.sh/{topic}"),
        })
    }

    /// Point the adapter at a different server (self-hosted ntfy, tests).
    pub fn with_url(url: String) -> Result<Self, LsbotError> {
        let mut adapter = Self::new("unused")?;
        adapter.url = url;
        Ok(adapter)
    }
}

impl NotifyPort for NtfyAdapter {
    fn send(&self, message: &str) -> Result<(), LsbotError> {
        let response = self
            .client
            .post(&self.url)
            .body(message.as_bytes().to_vec())
            .send()
            .map_err(|e| LsbotError::Notify {
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(LsbotError::Notify {
                reason: format!("HTTP {status} from {}", self.url),
            });
        }
        Ok(())
    }
}
