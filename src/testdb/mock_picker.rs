//! Mock picker implementation for testing without a camera
//!
//! `MockPicker` answers each acquire request with the next scripted
//! `MockResponse`, records which operation was called, and yields once to the
//! executor before answering so callers observe a real suspension point.

use crate::core::error::{GalleryError, Result};
use crate::picker::traits::{AcquireMode, MediaFile, MediaKind, MediaPicker, SourceReader};
use std::collections::VecDeque;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// In-memory file returned by the mock picker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockFile {
    /// File name reported to the workflow
    pub name: String,
    /// Simulated full path on the device
    pub full_path: PathBuf,
    /// File content
    pub content: Vec<u8>,
    /// When set, opening the stream fails with this message
    pub open_error: Option<String>,
}

impl MockFile {
    /// Create a file with the given content
    pub fn new(name: &str, content: &[u8]) -> Self {
        Self {
            name: name.to_string(),
            full_path: PathBuf::from("/mock/DCIM").join(name),
            content: content.to_vec(),
            open_error: None,
        }
    }

    /// Create a file whose stream cannot be opened
    pub fn unreadable(name: &str, message: &str) -> Self {
        Self {
            open_error: Some(message.to_string()),
            ..Self::new(name, &[])
        }
    }

    /// Report a different file name than the path's base name
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }
}

impl MediaFile for MockFile {
    fn file_name(&self) -> &str {
        &self.name
    }

    fn full_path(&self) -> &Path {
        &self.full_path
    }

    async fn open_readable(&self) -> Result<SourceReader> {
        if let Some(message) = &self.open_error {
            return Err(GalleryError::failed(message.clone()));
        }
        Ok(Box::new(Cursor::new(self.content.clone())))
    }
}

/// Scripted answer to one acquire request
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Return this file
    File(MockFile),
    /// User closed the platform UI
    Cancel,
    /// Picker failed with this message
    Fail(String),
    /// Picker found the camera missing mid-request
    Unavailable,
}

/// Media picker driven by a queue of scripted responses
///
/// An empty queue answers every request with a cancellation.
#[derive(Debug)]
pub struct MockPicker {
    capture_supported: bool,
    disabled: Vec<(AcquireMode, MediaKind)>,
    responses: Mutex<VecDeque<MockResponse>>,
    calls: Mutex<Vec<(AcquireMode, MediaKind)>>,
}

impl Default for MockPicker {
    fn default() -> Self {
        Self::new()
    }
}

impl MockPicker {
    /// Create a picker that supports capture and has no scripted responses
    pub fn new() -> Self {
        Self {
            capture_supported: true,
            disabled: Vec::new(),
            responses: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Create a picker that reports capture as unsupported
    pub fn unsupported() -> Self {
        Self {
            capture_supported: false,
            ..Self::new()
        }
    }

    /// Report one operation as unsupported while the others stay available
    pub fn without(mut self, mode: AcquireMode, kind: MediaKind) -> Self {
        self.disabled.push((mode, kind));
        self
    }

    /// Queue a response
    pub fn with_response(self, response: MockResponse) -> Self {
        self.push(response);
        self
    }

    /// Queue a file response
    pub fn with_file(self, file: MockFile) -> Self {
        self.with_response(MockResponse::File(file))
    }

    /// Queue a response on a shared picker
    pub fn push(&self, response: MockResponse) {
        self.responses
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .push_back(response);
    }

    /// Operations called so far, in order
    pub fn calls(&self) -> Vec<(AcquireMode, MediaKind)> {
        self.calls.lock().unwrap_or_else(|p| p.into_inner()).clone()
    }

    /// Number of operations called so far
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap_or_else(|p| p.into_inner()).len()
    }

    async fn answer(&self, mode: AcquireMode, kind: MediaKind) -> Result<Option<MockFile>> {
        self.calls
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .push((mode, kind));

        tokio::task::yield_now().await;

        let response = self
            .responses
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .pop_front();

        match response {
            Some(MockResponse::File(file)) => Ok(Some(file)),
            Some(MockResponse::Fail(message)) => Err(GalleryError::failed(message)),
            Some(MockResponse::Unavailable) => Err(GalleryError::CapabilityUnavailable),
            Some(MockResponse::Cancel) | None => Ok(None),
        }
    }
}

impl MediaPicker for MockPicker {
    type File = MockFile;

    fn is_capture_supported(&self) -> bool {
        self.capture_supported
    }

    fn supports(&self, mode: AcquireMode, kind: MediaKind) -> bool {
        self.capture_supported && !self.disabled.contains(&(mode, kind))
    }

    async fn capture_photo(&self) -> Result<Option<MockFile>> {
        self.answer(AcquireMode::Capture, MediaKind::Photo).await
    }

    async fn capture_video(&self) -> Result<Option<MockFile>> {
        self.answer(AcquireMode::Capture, MediaKind::Video).await
    }

    async fn pick_photo(&self) -> Result<Option<MockFile>> {
        self.answer(AcquireMode::Library, MediaKind::Photo).await
    }

    async fn pick_video(&self) -> Result<Option<MockFile>> {
        self.answer(AcquireMode::Library, MediaKind::Video).await
    }
}
