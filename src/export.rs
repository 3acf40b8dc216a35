//! Client-side workbook export.
//!
//! An export fetches the workbook, stages it in a temporary directory under
//! its final file name, saves a copy into the download directory and keeps
//! the staged copy alive for a fixed window before releasing it.

use log::{info, warn};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tempfile::TempDir;

use crate::api::SurveyBackend;
use crate::downloader::workbook_file_name;
use crate::error::ExportError;

/// How long a staged workbook is kept after the save was triggered.
pub const DEFAULT_RELEASE_DELAY: Duration = Duration::from_secs(60);

pub const EXPORT_FAILED_MESSAGE: &str = "엑셀 파일 다운로드에 실패했습니다.";

/// A staged workbook. Dropping it removes the temporary copy.
struct StagedDownload {
    _dir: TempDir,
    live: Arc<AtomicUsize>,
}

impl Drop for StagedDownload {
    fn drop(&mut self) {
        self.live.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Counts one in-flight export until dropped, even if the export is cancelled.
struct PendingExport<'a>(&'a AtomicUsize);

impl<'a> PendingExport<'a> {
    fn start(pending: &'a AtomicUsize) -> Self {
        pending.fetch_add(1, Ordering::SeqCst);
        PendingExport(pending)
    }
}

impl Drop for PendingExport<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

pub struct ExportSession {
    download_dir: PathBuf,
    release_delay: Duration,
    pending: AtomicUsize,
    staged: Arc<AtomicUsize>,
    failed: Mutex<bool>,
}

impl ExportSession {
    pub fn new(download_dir: impl Into<PathBuf>) -> Self {
        Self::with_release_delay(download_dir, DEFAULT_RELEASE_DELAY)
    }

    pub fn with_release_delay(download_dir: impl Into<PathBuf>, release_delay: Duration) -> Self {
        ExportSession {
            download_dir: download_dir.into(),
            release_delay,
            pending: AtomicUsize::new(0),
            staged: Arc::new(AtomicUsize::new(0)),
            failed: Mutex::new(false),
        }
    }

    /// Whether an export is in flight.
    pub fn loading(&self) -> bool {
        self.pending.load(Ordering::SeqCst) > 0
    }

    /// Number of staged workbooks not yet released.
    pub fn staged(&self) -> usize {
        self.staged.load(Ordering::SeqCst)
    }

    /// The error notice, if the last failure has not been dismissed.
    pub fn error_notice(&self) -> Option<&'static str> {
        self.failed
            .lock()
            .unwrap()
            .then_some(EXPORT_FAILED_MESSAGE)
    }

    pub fn dismiss_error(&self) {
        *self.failed.lock().unwrap() = false;
    }

    /// Download the workbook of `survey_id` and save it as `<title>.xlsx`.
    ///
    /// Must run inside a tokio runtime; the staged copy is released by a timer
    /// task. Concurrent calls each issue their own request.
    pub async fn export<B: SurveyBackend>(
        &self,
        backend: &B,
        survey_id: u64,
        title: &str,
    ) -> Result<PathBuf, ExportError> {
        let _pending = PendingExport::start(&self.pending);
        *self.failed.lock().unwrap() = false;

        let result = self.fetch_and_save(backend, survey_id, title).await;

        if let Err(e) = &result {
            warn!("Export of survey {survey_id} failed: {e}");
            *self.failed.lock().unwrap() = true;
        }

        result
    }

    async fn fetch_and_save<B: SurveyBackend>(
        &self,
        backend: &B,
        survey_id: u64,
        title: &str,
    ) -> Result<PathBuf, ExportError> {
        let bytes = backend.excel_workbook(survey_id).await?;
        let file_name = workbook_file_name(title);

        let (staged_path, guard) = self.stage(&bytes, &file_name)?;
        let saved = self.save(&staged_path, &file_name)?;
        info!("Saved workbook for survey {survey_id} to {}", saved.display());

        let delay = self.release_delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            drop(guard);
        });

        Ok(saved)
    }

    fn stage(&self, bytes: &[u8], file_name: &str) -> Result<(PathBuf, StagedDownload), ExportError> {
        let dir = tempfile::Builder::new().prefix("survey-export").tempdir()?;
        let path = dir.path().join(file_name);
        fs::write(&path, bytes)?;

        self.staged.fetch_add(1, Ordering::SeqCst);
        Ok((
            path,
            StagedDownload {
                _dir: dir,
                live: Arc::clone(&self.staged),
            },
        ))
    }

    fn save(&self, staged: &Path, file_name: &str) -> Result<PathBuf, ExportError> {
        fs::create_dir_all(&self.download_dir)?;
        let target = self.download_dir.join(file_name);
        fs::copy(staged, &target)?;
        Ok(target)
    }
}
