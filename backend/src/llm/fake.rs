//! Fake extraction provider for testing.
//!
//! Returns a canned response (or failure) without touching the network, and
//! records what it was called with so tests can assert on it.

use super::{ExtractionFailed, ImageExtractor};
use async_trait::async_trait;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug, Default)]
pub struct FakeExtractor {
    /// `None` simulates a remote failure.
    response: Option<String>,
    calls: AtomicUsize,
    last_instruction: Mutex<Option<String>>,
}

impl FakeExtractor {
    /// A fake whose remote model "returned" the given text.
    pub fn succeeding(response: &str) -> Self {
        Self {
            response: Some(response.to_string()),
            ..Self::default()
        }
    }

    /// A fake whose underlying call always fails.
    pub fn failing() -> Self {
        Self::default()
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_instruction(&self) -> Option<String> {
        self.last_instruction.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageExtractor for FakeExtractor {
    async fn extract_json(
        &self,
        _image_base64: &str,
        _mime_type: &str,
        instruction: &str,
    ) -> Result<String, ExtractionFailed> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_instruction.lock().unwrap() = Some(instruction.to_string());

        match &self.response {
            Some(text) => Ok(text.trim().to_string()),
            None => Err(ExtractionFailed),
        }
    }
}
