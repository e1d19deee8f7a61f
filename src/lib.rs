//! Capture Gallery Library
//!
//! A small gallery workflow for photos and videos: capture new media with a
//! camera or pick existing media from a library, copy it into a local gallery
//! directory, and keep an observable list of what the gallery holds.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - [`core`] - Configuration, error handling, gallery records, and the
//!   capture / import workflow
//! - [`picker`] - The media picker capability and its desktop implementations
//! - [`ui`] - Alerts and state-change events for a front end to bind to
//! - [`cli`] - Command-line interface (only used by the binary)
//! - [`testdb`] - Mock picker for exercising the workflow without a camera
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use capture_gallery::core::config::Config;
//! use capture_gallery::core::gallery::GalleryWorkflow;
//! use capture_gallery::picker::DesktopPicker;
//! use capture_gallery::ui::{ConfiguredPresenter, GalleryEvent};
//!
//! # async fn demo() -> anyhow::Result<()> {
//! let config = Config::load_default()?;
//!
//! let picker = DesktopPicker::from_config(&config.picker);
//! let presenter = ConfiguredPresenter::from_style(config.alerts.style);
//! let gallery = GalleryWorkflow::new(&config.gallery.directory, picker, presenter)?;
//!
//! let events = gallery.subscribe();
//! gallery.capture_photo().await;
//!
//! for event in events.try_iter() {
//!     if let GalleryEvent::RecordAdded { record } = event {
//!         println!("New file: {}", record.file_name);
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Testing Without a Camera
//!
//! The `testdb` module provides a scripted picker:
//!
//! ```rust,no_run
//! use capture_gallery::testdb::{MockFile, MockPicker, MockResponse};
//!
//! let picker = MockPicker::new()
//!     .with_file(MockFile::new("IMG_0001.jpg", b"jpeg"))
//!     .with_response(MockResponse::Cancel);
//! ```

// Core modules - always available
pub mod cli;
pub mod core;
pub mod picker;
pub mod testdb;
pub mod ui;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
