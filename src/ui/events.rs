//! UI Events Module
//!
//! Defines the events the gallery workflow publishes whenever its observable
//! state changes. Events are sent through channels so any UI framework (or the
//! CLI spinner) can bind to them.
//!
//! Every event is sent before the mutating call returns, so a subscriber that
//! drains its receiver right after the call sees the new state.

use crate::core::record::CaptureRecord;
use crossbeam_channel::{unbounded, Receiver, Sender};
use std::sync::Mutex;

/// Observable state changes of the gallery
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GalleryEvent {
    /// The busy flag changed
    BusyChanged {
        /// New value of the flag
        busy: bool,
    },

    /// A record was appended to the gallery
    RecordAdded {
        /// The new record
        record: CaptureRecord,
    },

    /// The record list was rebuilt from the gallery directory
    RecordsLoaded {
        /// Number of records found
        count: usize,
    },
}

impl GalleryEvent {
    /// Short description for logs
    pub fn description(&self) -> String {
        match self {
            GalleryEvent::BusyChanged { busy: true } => "Busy".to_string(),
            GalleryEvent::BusyChanged { busy: false } => "Idle".to_string(),
            GalleryEvent::RecordAdded { record } => format!("Added {}", record.file_name),
            GalleryEvent::RecordsLoaded { count } => format!("Loaded {} files", count),
        }
    }
}

/// Fan-out of gallery events to any number of subscribers
#[derive(Debug, Default)]
pub struct EventBus {
    subscribers: Mutex<Vec<Sender<GalleryEvent>>>,
}

impl EventBus {
    /// Create a bus with no subscribers
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new subscriber
    ///
    /// The receiver only sees events emitted after this call.
    pub fn subscribe(&self) -> Receiver<GalleryEvent> {
        let (tx, rx) = unbounded();
        self.lock().push(tx);
        rx
    }

    /// Send an event to every live subscriber
    ///
    /// Subscribers whose receiver was dropped are removed.
    pub fn emit(&self, event: GalleryEvent) {
        self.lock().retain(|tx| tx.send(event.clone()).is_ok());
    }

    /// Number of registered subscribers
    ///
    /// Dropped receivers are only noticed on the next `emit`.
    pub fn subscriber_count(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Sender<GalleryEvent>>> {
        self.subscribers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
