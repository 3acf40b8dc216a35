use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use survey_studio::export::{DEFAULT_RELEASE_DELAY, EXPORT_FAILED_MESSAGE, ExportSession};
use survey_studio::form::SurveyForm;
use survey_studio::{BackendError, CreatedSurvey, SurveyBackend};
use tempfile::tempdir;
use tokio::sync::Barrier;

const WORKBOOK: &[u8] = b"PK\x03\x04workbook";

/// Serves a fixed workbook, optionally holding every request until `barrier`
/// has seen as many callers as it was built for.
struct MockBackend {
    requests: AtomicUsize,
    barrier: Option<Barrier>,
    fail: bool,
}

impl MockBackend {
    fn new() -> Self {
        MockBackend {
            requests: AtomicUsize::new(0),
            barrier: None,
            fail: false,
        }
    }

    fn failing() -> Self {
        MockBackend {
            fail: true,
            ..Self::new()
        }
    }

    fn gated(callers: usize) -> Self {
        MockBackend {
            barrier: Some(Barrier::new(callers)),
            ..Self::new()
        }
    }
}

impl SurveyBackend for MockBackend {
    async fn create_survey(&self, _form: SurveyForm) -> Result<CreatedSurvey, BackendError> {
        Ok(CreatedSurvey { survey_id: 1 })
    }

    async fn excel_workbook(&self, _survey_id: u64) -> Result<Vec<u8>, BackendError> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        if let Some(barrier) = &self.barrier {
            barrier.wait().await;
        }
        if self.fail {
            return Err(BackendError::Http {
                status: 500,
                body: "boom".to_string(),
            });
        }
        Ok(WORKBOOK.to_vec())
    }
}

#[tokio::test]
async fn test_export_saves_title_named_workbook() {
    let downloads = tempdir().unwrap();
    let session = ExportSession::new(downloads.path());
    let backend = MockBackend::new();

    let saved = session.export(&backend, 4, "점심 메뉴").await.unwrap();

    assert_eq!(saved, downloads.path().join("점심 메뉴.xlsx"));
    assert_eq!(std::fs::read(&saved).unwrap(), WORKBOOK);
    assert_eq!(backend.requests.load(Ordering::SeqCst), 1);
    assert!(!session.loading());
    assert_eq!(session.error_notice(), None);
}

#[tokio::test]
async fn test_concurrent_exports_each_issue_a_request() {
    let downloads = tempdir().unwrap();
    let session = ExportSession::new(downloads.path());
    let backend = MockBackend::gated(2);

    // Both requests must be in flight at once for the barrier to open.
    let (first, second) = tokio::join!(
        session.export(&backend, 1, "first"),
        session.export(&backend, 1, "second"),
    );

    assert!(first.is_ok());
    assert!(second.is_ok());
    assert_eq!(backend.requests.load(Ordering::SeqCst), 2);
    assert_eq!(session.staged(), 2);
    assert!(!session.loading());
}

#[tokio::test(start_paused = true)]
async fn test_staged_workbook_released_after_delay() {
    let downloads = tempdir().unwrap();
    let session = ExportSession::new(downloads.path());
    let backend = MockBackend::new();

    session.export(&backend, 1, "release").await.unwrap();
    assert_eq!(session.staged(), 1);

    tokio::time::sleep(DEFAULT_RELEASE_DELAY - Duration::from_secs(1)).await;
    assert_eq!(session.staged(), 1);

    tokio::time::sleep(Duration::from_secs(2)).await;
    assert_eq!(session.staged(), 0);

    // The saved copy outlives the staged one.
    assert!(downloads.path().join("release.xlsx").exists());
}

#[tokio::test]
async fn test_failed_export_shows_dismissible_notice() {
    let downloads = tempdir().unwrap();
    let session = ExportSession::new(downloads.path());

    let result = session.export(&MockBackend::failing(), 1, "broken").await;

    assert!(result.is_err());
    assert!(!session.loading());
    assert_eq!(session.staged(), 0);
    assert_eq!(session.error_notice(), Some(EXPORT_FAILED_MESSAGE));
    assert!(!downloads.path().join("broken.xlsx").exists());

    session.dismiss_error();
    assert_eq!(session.error_notice(), None);
}

#[tokio::test]
async fn test_success_clears_previous_failure() {
    let downloads = tempdir().unwrap();
    let session = ExportSession::new(downloads.path());

    let _ = session.export(&MockBackend::failing(), 1, "a").await;
    assert!(session.error_notice().is_some());

    session.export(&MockBackend::new(), 1, "a").await.unwrap();
    assert_eq!(session.error_notice(), None);
}

/// Never answers within any test's patience.
struct StalledBackend;

impl SurveyBackend for StalledBackend {
    async fn create_survey(&self, _form: SurveyForm) -> Result<CreatedSurvey, BackendError> {
        Ok(CreatedSurvey { survey_id: 1 })
    }

    async fn excel_workbook(&self, _survey_id: u64) -> Result<Vec<u8>, BackendError> {
        tokio::time::sleep(Duration::from_secs(10)).await;
        Ok(WORKBOOK.to_vec())
    }
}

#[tokio::test(start_paused = true)]
async fn test_cancelled_export_stops_loading() {
    let downloads = tempdir().unwrap();
    let session = ExportSession::new(downloads.path());

    let export = session.export(&StalledBackend, 1, "stalled");
    let timed_out = tokio::time::timeout(Duration::from_millis(20), export).await;

    assert!(timed_out.is_err());
    assert!(!session.loading());
    assert_eq!(session.staged(), 0);
    assert!(!downloads.path().join("stalled.xlsx").exists());
}
