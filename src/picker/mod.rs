//! Media picker module
//!
//! This module provides the camera / media library capability the gallery
//! workflow depends on.
//!
//! # Submodules
//!
//! - `traits` - Abstraction traits for testability
//! - `local` - Handles for local files and a picker for pre-selected files
//! - `desktop` - Capture through an external command, picks through the file dialog
//!
//! The workflow is generic over `MediaPicker`, so the desktop picker, the path
//! picker and the mock picker in `testdb` are interchangeable.

pub mod desktop;
pub mod local;
pub mod traits;

pub use desktop::{DesktopFile, DesktopPicker};
pub use local::{LocalFile, PathPicker};
pub use traits::{AcquireMode, MediaFile, MediaKind, MediaPicker, ReadStrategy, SourceReader};
