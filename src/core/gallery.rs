//! Gallery workflow
//!
//! `GalleryWorkflow` owns the gallery record list and the busy flag, and runs
//! the capture / import actions a UI triggers:
//!
//! 1. Ignore the request if another one is in flight
//! 2. Alert and stop if the picker cannot capture
//! 3. Mark busy, ask the picker for a file, copy it into the gallery directory
//! 4. Append a record, alert on any failure, mark idle
//!
//! Errors never leave the workflow; they are shown through the injected
//! `ErrorPresenter`. Every change to the busy flag or the record list is
//! published on the workflow's `EventBus` before the call returns.
//!
//! # Example
//!
//! ```rust,no_run
//! use capture_gallery::core::gallery::GalleryWorkflow;
//! use capture_gallery::picker::PathPicker;
//! use capture_gallery::ui::ConsolePresenter;
//!
//! # async fn demo() -> capture_gallery::core::error::Result<()> {
//! let picker = PathPicker::new("/home/me/Pictures/holiday.jpg");
//! let gallery = GalleryWorkflow::new("/home/me/.local/share/gallery", picker, ConsolePresenter)?;
//!
//! let outcome = gallery.add_photo().await;
//! println!("{}", outcome);
//! # Ok(())
//! # }
//! ```

use crate::core::error::{GalleryError, Result};
use crate::core::record::{scan_gallery, CaptureRecord};
use crate::picker::traits::{AcquireMode, MediaFile, MediaKind, MediaPicker};
use crate::ui::alert::{Alert, ErrorPresenter};
use crate::ui::events::{EventBus, GalleryEvent};
use crossbeam_channel::Receiver;
use log::{debug, info, warn};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tempfile::NamedTempFile;
use tokio::io::AsyncWriteExt;

// =============================================================================
// Outcome
// =============================================================================

/// What a capture or import request ended up doing
///
/// Informational only: failures have already been shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationOutcome {
    /// Another operation was in flight; nothing happened
    Ignored,
    /// The picker cannot capture; an alert was shown
    Unavailable,
    /// The user cancelled in the platform UI
    Cancelled,
    /// A file was stored and appended to the gallery
    Added(CaptureRecord),
    /// The operation failed; an alert with this message was shown
    Failed(String),
}

impl OperationOutcome {
    /// Whether a record was added
    pub fn is_added(&self) -> bool {
        matches!(self, OperationOutcome::Added(_))
    }

    /// The added record, if any
    pub fn record(&self) -> Option<&CaptureRecord> {
        match self {
            OperationOutcome::Added(record) => Some(record),
            _ => None,
        }
    }
}

impl std::fmt::Display for OperationOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OperationOutcome::Ignored => write!(f, "Ignored: another operation is in progress"),
            OperationOutcome::Unavailable => write!(f, "Camera not available"),
            OperationOutcome::Cancelled => write!(f, "Cancelled"),
            OperationOutcome::Added(record) => write!(f, "Added {}", record),
            OperationOutcome::Failed(message) => write!(f, "Failed: {}", message),
        }
    }
}

// =============================================================================
// Busy guard
// =============================================================================

/// Holds the busy flag for one in-flight operation
///
/// Dropping the guard clears the flag, including when the operation future
/// itself is dropped before completion.
struct BusyGuard<'a> {
    busy: &'a AtomicBool,
    events: &'a EventBus,
}

impl<'a> BusyGuard<'a> {
    fn acquire(busy: &'a AtomicBool, events: &'a EventBus) -> Option<Self> {
        busy.compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()?;
        events.emit(GalleryEvent::BusyChanged { busy: true });
        Some(Self { busy, events })
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::SeqCst);
        self.events.emit(GalleryEvent::BusyChanged { busy: false });
    }
}

// =============================================================================
// Workflow
// =============================================================================

/// Capture / import workflow over a gallery directory
pub struct GalleryWorkflow<P, E> {
    gallery_dir: PathBuf,
    picker: P,
    presenter: E,
    busy: AtomicBool,
    records: RwLock<Vec<CaptureRecord>>,
    events: EventBus,
}

impl<P, E> std::fmt::Debug for GalleryWorkflow<P, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GalleryWorkflow")
            .field("gallery_dir", &self.gallery_dir)
            .field("busy", &self.is_busy())
            .field("records", &self.read_records().len())
            .finish()
    }
}

impl<P, E> GalleryWorkflow<P, E>
where
    P: MediaPicker,
    E: ErrorPresenter,
{
    /// Open the gallery in `gallery_dir` and load the files already stored there
    ///
    /// The directory is created if it does not exist.
    pub fn new<D: AsRef<Path>>(gallery_dir: D, picker: P, presenter: E) -> Result<Self> {
        let gallery_dir = gallery_dir.as_ref().to_path_buf();

        fs::create_dir_all(&gallery_dir).map_err(|e| GalleryError::GalleryDirectory {
            path: gallery_dir.clone(),
            message: e.to_string(),
        })?;

        let workflow = Self {
            gallery_dir,
            picker,
            presenter,
            busy: AtomicBool::new(false),
            records: RwLock::new(Vec::new()),
            events: EventBus::new(),
        };
        workflow.load_existing()?;

        Ok(workflow)
    }

    /// Rebuild the record list from the files in the gallery directory
    fn load_existing(&self) -> Result<()> {
        let found = scan_gallery(&self.gallery_dir)?;
        let count = found.len();

        {
            let mut records = self.write_records();
            records.clear();
            records.extend(found);
        }

        info!(
            "Loaded {} gallery files from {}",
            count,
            self.gallery_dir.display()
        );
        self.events.emit(GalleryEvent::RecordsLoaded { count });
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Actions
    // -------------------------------------------------------------------------

    /// Capture a new photo with the camera
    pub async fn capture_photo(&self) -> OperationOutcome {
        self.run(AcquireMode::Capture, MediaKind::Photo).await
    }

    /// Capture a new video with the camera
    pub async fn capture_video(&self) -> OperationOutcome {
        self.run(AcquireMode::Capture, MediaKind::Video).await
    }

    /// Import an existing photo from the library
    pub async fn add_photo(&self) -> OperationOutcome {
        self.run(AcquireMode::Library, MediaKind::Photo).await
    }

    /// Import an existing video from the library
    pub async fn add_video(&self) -> OperationOutcome {
        self.run(AcquireMode::Library, MediaKind::Video).await
    }

    /// Open a stored photo
    ///
    /// Only checks that the capability is available; no viewer is attached
    /// yet. Returns whether the capability check passed.
    pub async fn open_photo(&self, record: &CaptureRecord) -> bool {
        if !self.picker.is_capture_supported() {
            self.present(&GalleryError::CapabilityUnavailable).await;
            return false;
        }

        debug!("Open requested for {} (no viewer attached)", record.file_name);
        true
    }

    /// Shared capture / import routine
    async fn run(&self, mode: AcquireMode, kind: MediaKind) -> OperationOutcome {
        if self.is_busy() {
            debug!("Ignoring {} {} request: busy", kind, mode);
            return OperationOutcome::Ignored;
        }

        if !self.picker.supports(mode, kind) {
            warn!("{} {} requested but not supported", kind, mode);
            self.present(&GalleryError::CapabilityUnavailable).await;
            return OperationOutcome::Unavailable;
        }

        let Some(_busy) = BusyGuard::acquire(&self.busy, &self.events) else {
            debug!("Ignoring {} {} request: busy", kind, mode);
            return OperationOutcome::Ignored;
        };

        info!("Starting {} {}", kind, mode);
        match self.acquire_and_store(mode, kind).await {
            Ok(Some(record)) => OperationOutcome::Added(record),
            Ok(None) => {
                info!("{} {} cancelled by user", kind, mode);
                OperationOutcome::Cancelled
            }
            Err(e) if e.is_unavailable() => {
                warn!("{} {} not available", kind, mode);
                self.present(&e).await;
                OperationOutcome::Unavailable
            }
            Err(e) => {
                warn!("{} {} failed: {}", kind, mode, e);
                self.present(&e).await;
                OperationOutcome::Failed(e.to_string())
            }
        }
    }

    async fn acquire_and_store(
        &self,
        mode: AcquireMode,
        kind: MediaKind,
    ) -> Result<Option<CaptureRecord>> {
        let Some(file) = self.picker.acquire(mode, kind).await? else {
            return Ok(None);
        };

        let record = self.store(&file).await?;
        file.release().await;
        self.write_records().push(record.clone());
        info!("Added {} to gallery", record.file_name);
        self.events.emit(GalleryEvent::RecordAdded {
            record: record.clone(),
        });

        Ok(Some(record))
    }

    /// Copy the picked file into the gallery directory
    ///
    /// Bytes go to a staging file next to the destination, which replaces the
    /// destination only after the copy is flushed. A failed copy leaves any
    /// existing gallery file untouched.
    async fn store(&self, file: &P::File) -> Result<CaptureRecord> {
        let file_name = base_name(file.file_name())?;
        let destination = self.gallery_dir.join(&file_name);
        if same_file(file.full_path(), &destination) {
            return Err(GalleryError::AlreadyInGallery(file_name));
        }
        debug!(
            "Copying {} -> {}",
            file.full_path().display(),
            destination.display()
        );

        let staging = NamedTempFile::new_in(&self.gallery_dir)?;
        let bytes = copy_into(file, &staging).await?;
        staging
            .persist(&destination)
            .map_err(|e| GalleryError::failed(e.error.to_string()))?;

        debug!("Copied {} bytes into {}", bytes, destination.display());
        Ok(CaptureRecord::new(file_name, destination))
    }

    async fn present(&self, error: &GalleryError) {
        self.presenter.present(Alert::error(error.to_string())).await;
    }

    // -------------------------------------------------------------------------
    // Observable state
    // -------------------------------------------------------------------------

    /// Subscribe to busy / record changes
    pub fn subscribe(&self) -> Receiver<GalleryEvent> {
        self.events.subscribe()
    }

    /// Snapshot of the records in insertion order
    pub fn records(&self) -> Vec<CaptureRecord> {
        self.read_records().clone()
    }

    /// Number of records
    pub fn record_count(&self) -> usize {
        self.read_records().len()
    }

    /// Find a record by file name
    pub fn find_record(&self, file_name: &str) -> Option<CaptureRecord> {
        self.read_records()
            .iter()
            .find(|r| r.file_name == file_name)
            .cloned()
    }

    /// The picker this workflow uses
    pub fn picker(&self) -> &P {
        &self.picker
    }
}

impl<P, E> GalleryWorkflow<P, E> {
    /// Whether a capture or import is in flight
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    /// Directory the gallery files are stored in
    pub fn gallery_dir(&self) -> &Path {
        &self.gallery_dir
    }

    fn read_records(&self) -> RwLockReadGuard<'_, Vec<CaptureRecord>> {
        self.records.read().unwrap_or_else(|p| p.into_inner())
    }

    fn write_records(&self) -> RwLockWriteGuard<'_, Vec<CaptureRecord>> {
        self.records.write().unwrap_or_else(|p| p.into_inner())
    }
}

/// Final path component of a picker-reported file name
fn base_name(name: &str) -> Result<String> {
    Path::new(name)
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .filter(|n| !n.is_empty())
        .ok_or_else(|| GalleryError::InvalidFileName(name.to_string()))
}

/// Whether both paths name the same existing file
fn same_file(source: &Path, destination: &Path) -> bool {
    match (fs::canonicalize(source), fs::canonicalize(destination)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Write the file's bytes to `staging`, returning the byte count
///
/// The source is closed when this returns; the staging file stays open.
async fn copy_into<F: MediaFile>(file: &F, staging: &NamedTempFile) -> Result<u64> {
    let mut target = tokio::fs::File::from_std(staging.as_file().try_clone()?);
    let mut source = file.open_readable().await?;

    let bytes = tokio::io::copy(&mut source, &mut target).await?;
    target.flush().await?;

    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::picker::PathPicker;
    use crate::testdb::{MockFile, MockPicker, MockResponse};
    use crate::ui::alert::ChannelPresenter;
    use std::collections::HashSet;
    use tempfile::TempDir;

    fn workflow<P: MediaPicker>(
        dir: &Path,
        picker: P,
    ) -> (GalleryWorkflow<P, ChannelPresenter>, Receiver<Alert>) {
        let (presenter, alerts) = ChannelPresenter::channel();
        let workflow = GalleryWorkflow::new(dir, picker, presenter).unwrap();
        (workflow, alerts)
    }

    #[test]
    fn test_empty_directory() {
        let dir = TempDir::new().unwrap();
        let (gallery, alerts) = workflow(dir.path(), MockPicker::new());

        assert!(gallery.records().is_empty());
        assert!(!gallery.is_busy());
        assert!(alerts.try_recv().is_err());
    }

    #[test]
    fn test_existing_files_are_loaded() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("b.mp4"), b"video").unwrap();
        fs::write(dir.path().join("a.jpg"), b"photo").unwrap();

        let (gallery, _alerts) = workflow(dir.path(), MockPicker::new());

        let names: HashSet<_> = gallery.records().into_iter().map(|r| r.file_name).collect();
        assert_eq!(gallery.record_count(), 2);
        assert_eq!(
            names,
            HashSet::from(["a.jpg".to_string(), "b.mp4".to_string()])
        );
        let a = gallery.find_record("a.jpg").unwrap();
        assert_eq!(a.path, dir.path().join("a.jpg"));
    }

    #[test]
    fn test_missing_directory_is_created() {
        let dir = TempDir::new().unwrap();
        let gallery_dir = dir.path().join("app").join("gallery");

        let (gallery, _alerts) = workflow(&gallery_dir, MockPicker::new());
        assert!(gallery_dir.is_dir());
        assert_eq!(gallery.gallery_dir(), gallery_dir.as_path());
        assert_eq!(gallery.record_count(), 0);
    }

    #[test]
    fn test_directory_that_is_a_file_fails() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("gallery");
        fs::write(&blocker, b"not a directory").unwrap();

        let (presenter, _alerts) = ChannelPresenter::channel();
        let result = GalleryWorkflow::new(&blocker, MockPicker::new(), presenter);
        assert!(matches!(result, Err(GalleryError::GalleryDirectory { .. })));
    }

    #[tokio::test]
    async fn test_capture_photo_adds_record_with_same_bytes() {
        let dir = TempDir::new().unwrap();
        let picker = MockPicker::new().with_file(MockFile::new("IMG_0001.jpg", b"\xFF\xD8jpeg-data"));
        let (gallery, alerts) = workflow(dir.path(), picker);

        let outcome = gallery.capture_photo().await;

        let expected = CaptureRecord::new("IMG_0001.jpg", dir.path().join("IMG_0001.jpg"));
        assert_eq!(outcome, OperationOutcome::Added(expected.clone()));
        assert_eq!(gallery.records(), vec![expected.clone()]);
        assert_eq!(fs::read(&expected.path).unwrap(), b"\xFF\xD8jpeg-data");
        assert!(!gallery.is_busy());
        assert!(alerts.try_recv().is_err());
        assert_eq!(
            gallery.picker().calls(),
            vec![(AcquireMode::Capture, MediaKind::Photo)]
        );
    }

    #[tokio::test]
    async fn test_each_action_uses_matching_picker_operation() {
        let dir = TempDir::new().unwrap();
        let picker = MockPicker::new()
            .with_file(MockFile::new("v1.mp4", b"1"))
            .with_file(MockFile::new("p1.jpg", b"2"))
            .with_file(MockFile::new("v2.mov", b"3"));
        let (gallery, _alerts) = workflow(dir.path(), picker);

        assert!(gallery.capture_video().await.is_added());
        assert!(gallery.add_photo().await.is_added());
        assert!(gallery.add_video().await.is_added());

        assert_eq!(
            gallery.picker().calls(),
            vec![
                (AcquireMode::Capture, MediaKind::Video),
                (AcquireMode::Library, MediaKind::Photo),
                (AcquireMode::Library, MediaKind::Video),
            ]
        );
        let names: Vec<_> = gallery.records().into_iter().map(|r| r.file_name).collect();
        assert_eq!(names, vec!["v1.mp4", "p1.jpg", "v2.mov"]);
    }

    #[tokio::test]
    async fn test_records_append_after_existing_files() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("old.jpg"), b"old").unwrap();
        let picker = MockPicker::new().with_file(MockFile::new("new.jpg", b"new"));
        let (gallery, _alerts) = workflow(dir.path(), picker);

        gallery.add_photo().await;

        let records = gallery.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].file_name, "old.jpg");
        assert_eq!(records[1].file_name, "new.jpg");
    }

    #[tokio::test]
    async fn test_cancelled_capture_adds_nothing() {
        let dir = TempDir::new().unwrap();
        let picker = MockPicker::new().with_response(MockResponse::Cancel);
        let (gallery, alerts) = workflow(dir.path(), picker);

        let outcome = gallery.capture_video().await;

        assert_eq!(outcome, OperationOutcome::Cancelled);
        assert!(gallery.records().is_empty());
        assert!(!gallery.is_busy());
        assert!(alerts.try_recv().is_err());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_capture_unsupported_shows_one_alert() {
        let dir = TempDir::new().unwrap();
        let (gallery, alerts) = workflow(dir.path(), MockPicker::unsupported());

        let outcome = gallery.capture_photo().await;

        assert_eq!(outcome, OperationOutcome::Unavailable);
        let alert = alerts.try_recv().unwrap();
        assert_eq!(alert.title, "Error");
        assert_eq!(alert.message, "Camera not available");
        assert_eq!(alert.dismiss, "OK");
        assert!(alerts.try_recv().is_err());
        assert!(gallery.records().is_empty());
        assert!(!gallery.is_busy());
        assert_eq!(gallery.picker().call_count(), 0);
    }

    #[tokio::test]
    async fn test_import_also_requires_capture_support() {
        let dir = TempDir::new().unwrap();
        let (gallery, alerts) = workflow(dir.path(), MockPicker::unsupported());

        assert_eq!(gallery.add_video().await, OperationOutcome::Unavailable);
        assert_eq!(alerts.try_recv().unwrap().message, "Camera not available");
    }

    #[tokio::test]
    async fn test_picker_failure_shows_message() {
        let dir = TempDir::new().unwrap();
        let picker = MockPicker::new().with_response(MockResponse::Fail("Permission denied by user".into()));
        let (gallery, alerts) = workflow(dir.path(), picker);

        let outcome = gallery.add_photo().await;

        assert_eq!(
            outcome,
            OperationOutcome::Failed("Permission denied by user".to_string())
        );
        let alert = alerts.try_recv().unwrap();
        assert_eq!(alert, Alert::error("Permission denied by user"));
        assert!(alerts.try_recv().is_err());
        assert!(gallery.records().is_empty());
        assert!(!gallery.is_busy());
    }

    #[tokio::test]
    async fn test_failed_copy_shows_one_alert_and_adds_nothing() {
        let dir = TempDir::new().unwrap();
        let picker = MockPicker::new().with_file(MockFile::new("clash.jpg", b"bytes"));
        let (gallery, alerts) = workflow(dir.path(), picker);

        // A directory in the way makes the destination unwritable.
        fs::create_dir(dir.path().join("clash.jpg")).unwrap();

        let outcome = gallery.capture_photo().await;

        assert!(matches!(outcome, OperationOutcome::Failed(_)));
        assert_eq!(alerts.try_iter().count(), 1);
        assert!(gallery.records().is_empty());
        assert!(!gallery.is_busy());
        assert!(dir.path().join("clash.jpg").is_dir());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[tokio::test]
    async fn test_unreadable_source_leaves_no_staging_file() {
        let dir = TempDir::new().unwrap();
        let picker = MockPicker::new().with_file(MockFile::unreadable("IMG_0002.jpg", "stream closed"));
        let (gallery, alerts) = workflow(dir.path(), picker);

        let outcome = gallery.capture_photo().await;

        assert_eq!(outcome, OperationOutcome::Failed("stream closed".to_string()));
        assert_eq!(alerts.try_recv().unwrap().message, "stream closed");
        assert!(gallery.records().is_empty());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_failed_import_keeps_existing_gallery_file() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("IMG_1.jpg"), b"precious").unwrap();
        let picker = MockPicker::new().with_file(MockFile::unreadable("IMG_1.jpg", "stream closed"));
        let (gallery, alerts) = workflow(dir.path(), picker);

        let outcome = gallery.add_photo().await;

        assert_eq!(outcome, OperationOutcome::Failed("stream closed".to_string()));
        assert_eq!(alerts.try_iter().count(), 1);
        assert_eq!(fs::read(dir.path().join("IMG_1.jpg")).unwrap(), b"precious");
        assert_eq!(gallery.record_count(), 1);
        assert!(gallery.find_record("IMG_1.jpg").unwrap().exists());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[tokio::test]
    async fn test_import_replaces_file_with_same_name() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.jpg"), b"old").unwrap();
        let picker = MockPicker::new().with_file(MockFile::new("a.jpg", b"new bytes"));
        let (gallery, alerts) = workflow(dir.path(), picker);

        assert!(gallery.add_photo().await.is_added());

        assert_eq!(fs::read(dir.path().join("a.jpg")).unwrap(), b"new bytes");
        assert!(alerts.try_recv().is_err());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[tokio::test]
    async fn test_importing_a_gallery_file_onto_itself_is_rejected() {
        let dir = TempDir::new().unwrap();
        let stored = dir.path().join("a.jpg");
        fs::write(&stored, b"precious").unwrap();
        let (gallery, alerts) = workflow(dir.path(), PathPicker::new(&stored));

        let outcome = gallery.add_photo().await;

        assert_eq!(
            outcome,
            OperationOutcome::Failed("'a.jpg' is already in the gallery".to_string())
        );
        assert_eq!(alerts.try_iter().count(), 1);
        assert_eq!(fs::read(&stored).unwrap(), b"precious");
        assert_eq!(gallery.record_count(), 1);
        assert!(!gallery.is_busy());
    }

    #[tokio::test]
    async fn test_import_from_path_keeps_source() {
        let gallery_dir = TempDir::new().unwrap();
        let library = TempDir::new().unwrap();
        let source = library.path().join("holiday.jpg");
        fs::write(&source, b"jpeg").unwrap();
        let (gallery, _alerts) = workflow(gallery_dir.path(), PathPicker::new(&source));

        assert!(gallery.add_photo().await.is_added());

        assert_eq!(fs::read(&source).unwrap(), b"jpeg");
        assert_eq!(fs::read(gallery_dir.path().join("holiday.jpg")).unwrap(), b"jpeg");
    }

    #[tokio::test]
    async fn test_unsupported_kind_is_unavailable_without_busy_events() {
        let dir = TempDir::new().unwrap();
        let picker = MockPicker::new()
            .without(AcquireMode::Capture, MediaKind::Photo)
            .with_file(MockFile::new("VID_1.mp4", b"v"));
        let (gallery, alerts) = workflow(dir.path(), picker);
        let events = gallery.subscribe();

        assert_eq!(gallery.capture_photo().await, OperationOutcome::Unavailable);
        assert_eq!(alerts.try_recv().unwrap(), Alert::error("Camera not available"));
        assert!(events.try_recv().is_err());
        assert_eq!(gallery.picker().call_count(), 0);

        assert!(gallery.capture_video().await.is_added());
    }

    #[tokio::test]
    async fn test_picker_reporting_unavailable_maps_to_unavailable() {
        let dir = TempDir::new().unwrap();
        let picker = MockPicker::new().with_response(MockResponse::Unavailable);
        let (gallery, alerts) = workflow(dir.path(), picker);

        assert_eq!(gallery.capture_video().await, OperationOutcome::Unavailable);
        assert_eq!(alerts.try_recv().unwrap().message, "Camera not available");
        assert!(!gallery.is_busy());
    }

    #[tokio::test]
    async fn test_file_name_is_reduced_to_base_name() {
        let dir = TempDir::new().unwrap();
        let picker = MockPicker::new()
            .with_file(MockFile::new("x.jpg", b"nested").with_name("../../outside/evil.jpg"));
        let (gallery, _alerts) = workflow(dir.path(), picker);

        let outcome = gallery.add_photo().await;

        let record = outcome.record().unwrap();
        assert_eq!(record.file_name, "evil.jpg");
        assert_eq!(record.path, dir.path().join("evil.jpg"));
        assert_eq!(fs::read(&record.path).unwrap(), b"nested");
    }

    #[tokio::test]
    async fn test_invalid_file_name_fails() {
        let dir = TempDir::new().unwrap();
        let picker = MockPicker::new().with_file(MockFile::new("x.jpg", b"").with_name(".."));
        let (gallery, alerts) = workflow(dir.path(), picker);

        let outcome = gallery.add_photo().await;

        assert_eq!(outcome, OperationOutcome::Failed("Invalid file name: '..'".to_string()));
        assert_eq!(alerts.try_iter().count(), 1);
        assert!(gallery.records().is_empty());
    }

    #[tokio::test]
    async fn test_second_request_while_busy_is_ignored() {
        let dir = TempDir::new().unwrap();
        let picker = MockPicker::new()
            .with_file(MockFile::new("first.jpg", b"1"))
            .with_file(MockFile::new("second.jpg", b"2"));
        let (gallery, alerts) = workflow(dir.path(), picker);

        let (first, second) = tokio::join!(gallery.capture_photo(), async {
            assert!(gallery.is_busy());
            let before = gallery.records();
            let outcome = gallery.capture_photo().await;
            assert_eq!(gallery.records(), before);
            assert!(gallery.is_busy());
            outcome
        });

        assert!(first.is_added());
        assert_eq!(second, OperationOutcome::Ignored);
        assert_eq!(gallery.records().len(), 1);
        assert_eq!(gallery.records()[0].file_name, "first.jpg");
        assert_eq!(gallery.picker().call_count(), 1);
        assert!(alerts.try_recv().is_err());
        assert!(!gallery.is_busy());
    }

    #[tokio::test]
    async fn test_busy_blocks_every_action_kind() {
        let dir = TempDir::new().unwrap();
        let picker = MockPicker::new().with_file(MockFile::new("only.mp4", b"v"));
        let (gallery, _alerts) = workflow(dir.path(), picker);

        let (first, others) = tokio::join!(gallery.add_video(), async {
            (
                gallery.capture_photo().await,
                gallery.capture_video().await,
                gallery.add_photo().await,
                gallery.add_video().await,
            )
        });

        assert!(first.is_added());
        assert_eq!(
            others,
            (
                OperationOutcome::Ignored,
                OperationOutcome::Ignored,
                OperationOutcome::Ignored,
                OperationOutcome::Ignored
            )
        );
        assert_eq!(gallery.picker().call_count(), 1);
    }

    #[tokio::test]
    async fn test_workflow_idle_again_after_each_outcome() {
        let dir = TempDir::new().unwrap();
        let picker = MockPicker::new()
            .with_response(MockResponse::Cancel)
            .with_response(MockResponse::Fail("boom".into()))
            .with_file(MockFile::new("ok.jpg", b"ok"));
        let (gallery, _alerts) = workflow(dir.path(), picker);

        assert_eq!(gallery.capture_photo().await, OperationOutcome::Cancelled);
        assert!(!gallery.is_busy());
        assert!(matches!(gallery.capture_photo().await, OperationOutcome::Failed(_)));
        assert!(!gallery.is_busy());
        assert!(gallery.capture_photo().await.is_added());
        assert!(!gallery.is_busy());
    }

    #[tokio::test]
    async fn test_events_follow_mutations() {
        let dir = TempDir::new().unwrap();
        let picker = MockPicker::new()
            .with_file(MockFile::new("IMG_0003.jpg", b"img"))
            .with_response(MockResponse::Cancel);
        let (gallery, _alerts) = workflow(dir.path(), picker);
        let events = gallery.subscribe();

        gallery.capture_photo().await;
        let record = CaptureRecord::new("IMG_0003.jpg", dir.path().join("IMG_0003.jpg"));
        assert_eq!(
            events.try_iter().collect::<Vec<_>>(),
            vec![
                GalleryEvent::BusyChanged { busy: true },
                GalleryEvent::RecordAdded { record },
                GalleryEvent::BusyChanged { busy: false },
            ]
        );

        gallery.capture_photo().await;
        assert_eq!(
            events.try_iter().collect::<Vec<_>>(),
            vec![
                GalleryEvent::BusyChanged { busy: true },
                GalleryEvent::BusyChanged { busy: false },
            ]
        );
    }

    #[tokio::test]
    async fn test_ignored_and_unavailable_requests_emit_nothing() {
        let dir = TempDir::new().unwrap();
        let (gallery, _alerts) = workflow(dir.path(), MockPicker::unsupported());
        let events = gallery.subscribe();

        gallery.capture_video().await;
        assert!(events.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_dropped_operation_clears_busy() {
        let dir = TempDir::new().unwrap();
        let picker = MockPicker::new().with_file(MockFile::new("never.jpg", b"x"));
        let (gallery, _alerts) = workflow(dir.path(), picker);

        {
            let pending = gallery.capture_photo();
            tokio::pin!(pending);
            // Poll once so the operation reaches the picker, then abandon it.
            let polled = poll_once(pending.as_mut()).await;
            assert!(polled.is_none());
            assert!(gallery.is_busy());
        }

        assert!(!gallery.is_busy());
        assert!(gallery.records().is_empty());
    }

    async fn poll_once<F: std::future::Future + Unpin>(fut: F) -> Option<F::Output> {
        tokio::select! {
            biased;
            out = fut => Some(out),
            _ = std::future::ready(()) => None,
        }
    }

    #[tokio::test]
    async fn test_open_photo_checks_capability() {
        let dir = TempDir::new().unwrap();
        let record = CaptureRecord::new("a.jpg", dir.path().join("a.jpg"));

        let (supported, alerts) = workflow(dir.path(), MockPicker::new());
        assert!(supported.open_photo(&record).await);
        assert!(alerts.try_recv().is_err());
        assert!(!supported.is_busy());

        let (unsupported, alerts) = workflow(dir.path(), MockPicker::unsupported());
        assert!(!unsupported.open_photo(&record).await);
        assert_eq!(alerts.try_recv().unwrap(), Alert::error("Camera not available"));
    }

    #[test]
    fn test_base_name() {
        assert_eq!(base_name("IMG_0001.jpg").unwrap(), "IMG_0001.jpg");
        assert_eq!(base_name("/storage/DCIM/IMG_0001.jpg").unwrap(), "IMG_0001.jpg");
        assert!(matches!(base_name(""), Err(GalleryError::InvalidFileName(_))));
        assert!(matches!(base_name("/"), Err(GalleryError::InvalidFileName(_))));
    }

    #[test]
    fn test_outcome_display() {
        let record = CaptureRecord::new("a.jpg", "/g/a.jpg");
        assert_eq!(OperationOutcome::Cancelled.to_string(), "Cancelled");
        assert_eq!(OperationOutcome::Unavailable.to_string(), "Camera not available");
        assert_eq!(
            OperationOutcome::Added(record.clone()).to_string(),
            "Added a.jpg (/g/a.jpg)"
        );
        assert_eq!(OperationOutcome::Failed("x".into()).to_string(), "Failed: x");
        assert_eq!(OperationOutcome::Added(record.clone()).record(), Some(&record));
        assert!(OperationOutcome::Ignored.record().is_none());
    }
}
