//! Test Database Module
//!
//! Mock collaborators for exercising the gallery workflow without a camera,
//! a file dialog or a UI.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use capture_gallery::core::gallery::GalleryWorkflow;
//! use capture_gallery::testdb::{MockFile, MockPicker};
//! use capture_gallery::ui::ChannelPresenter;
//!
//! # async fn demo() -> capture_gallery::core::error::Result<()> {
//! let picker = MockPicker::new().with_file(MockFile::new("IMG_0001.jpg", b"jpeg"));
//! let (presenter, alerts) = ChannelPresenter::channel();
//! let gallery = GalleryWorkflow::new("/tmp/gallery", picker, presenter)?;
//!
//! gallery.capture_photo().await;
//! assert_eq!(gallery.record_count(), 1);
//! assert!(alerts.try_recv().is_err());
//! # Ok(())
//! # }
//! ```

pub mod mock_picker;

pub use mock_picker::{MockFile, MockPicker, MockResponse};
