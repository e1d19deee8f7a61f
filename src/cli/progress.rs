//! Progress and output utilities for CLI operations
//!
//! Key features:
//! - A spinner that follows the gallery's busy flag through its event bus
//! - Consistent console output helpers
//! - A writer that mirrors log output to a file

use crate::ui::events::GalleryEvent;
use crossbeam_channel::Receiver;
use indicatif::{ProgressBar, ProgressStyle};
use log::debug;
use std::io::Write;
use std::thread::{self, JoinHandle};
use std::time::Duration;

// ============================================================================
// Styles
// ============================================================================

/// Get the spinner style for busy operations
fn spinner_style() -> ProgressStyle {
    ProgressStyle::default_spinner()
        .template("{spinner:.cyan} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_chars("⣾⣽⣻⢿⡿⣟⣯⣷")
}

// ============================================================================
// Console output helpers
// ============================================================================

/// Print a success message with checkmark
pub fn print_success(msg: &str) {
    println!("  ✓ {}", msg);
}

/// Print an info message with bullet
pub fn print_info(msg: &str) {
    println!("  • {}", msg);
}

/// Print a warning message
pub fn print_warning(msg: &str) {
    println!("  ⚠ {}", msg);
}

// ============================================================================
// Busy indicator
// ============================================================================

/// Spinner driven by gallery events
///
/// Runs on its own thread until every sender of the event channel is gone,
/// which happens when the workflow is dropped.
pub struct BusyIndicator {
    handle: JoinHandle<usize>,
}

impl BusyIndicator {
    /// Start following `events`, showing `message` while the gallery is busy
    pub fn spawn(events: Receiver<GalleryEvent>, message: &str) -> Self {
        let message = message.to_string();
        let handle = thread::spawn(move || follow(events, message));
        Self { handle }
    }

    /// Wait for the event channel to close, returning how many events were shown
    pub fn join(self) -> usize {
        self.handle.join().unwrap_or_else(|_| {
            debug!("Busy indicator thread panicked");
            0
        })
    }
}

fn follow(events: Receiver<GalleryEvent>, message: String) -> usize {
    let mut spinner: Option<ProgressBar> = None;
    let mut seen = 0;

    for event in events.iter() {
        seen += 1;
        debug!("Gallery event: {}", event.description());
        match event {
            GalleryEvent::BusyChanged { busy: true } => {
                let bar = ProgressBar::new_spinner();
                bar.set_style(spinner_style());
                bar.enable_steady_tick(Duration::from_millis(80));
                bar.set_message(message.clone());
                spinner = Some(bar);
            }
            GalleryEvent::BusyChanged { busy: false } => {
                if let Some(bar) = spinner.take() {
                    bar.finish_and_clear();
                }
            }
            GalleryEvent::RecordAdded { record } => {
                if let Some(bar) = &spinner {
                    bar.set_message(format!("Saved {}", record.file_name));
                }
            }
            GalleryEvent::RecordsLoaded { .. } => {}
        }
    }

    if let Some(bar) = spinner {
        bar.finish_and_clear();
    }
    seen
}

// ============================================================================
// Utility functions
// ============================================================================

/// Format bytes as human-readable string
pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}

// ============================================================================
// Dual writer for file + console logging
// ============================================================================

/// A writer that writes to both console and file
///
/// Used for logging to both stderr and a log file simultaneously.
pub struct DualWriter {
    pub console: std::io::Stderr,
    pub file: std::fs::File,
}

impl Write for DualWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let _ = self.console.write(buf);
        self.file.write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        let _ = self.console.flush();
        self.file.flush()
    }
}

// ============================================================================
// Tests
// ============================================================================
