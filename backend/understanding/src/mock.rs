use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use aura_core::{ImagePart, VisionModel};

/// A vision model that returns canned output without touching the network.
pub struct MockVision {
    name: String,
    outcome: Result<String, String>,
    delay: Option<Duration>,
    calls: AtomicUsize,
    last_image: Mutex<Option<ImagePart>>,
}

impl MockVision {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            outcome: Ok("<visualProfile id=\"mock\"><summary>Mock profile</summary></visualProfile>".into()),
            delay: None,
            calls: AtomicUsize::new(0),
            last_image: Mutex::new(None),
        }
    }

    pub fn with_response(mut self, response: impl Into<String>) -> Self {
        self.outcome = Ok(response.into());
        self
    }

    pub fn with_failure(mut self, message: impl Into<String>) -> Self {
        self.outcome = Err(message.into());
        self
    }

    /// Sleep this long before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of `generate` calls started so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_image(&self) -> Option<ImagePart> {
        self.last_image.lock().ok().and_then(|g| g.clone())
    }
}

#[async_trait]
impl VisionModel for MockVision {
    fn name(&self) -> &str {
        &self.name
    }

    async fn generate(&self, _prompt: &str, image: &ImagePart) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_image.lock() {
            *last = Some(image.clone());
        }
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.outcome.clone().map_err(|m| anyhow!(m))
    }
}
