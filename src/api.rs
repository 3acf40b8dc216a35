//! The backend the authoring and results views talk to.
//!
//! [`HttpBackend`] speaks to a running server; [`LocalBackend`] serves the
//! same operations straight from a [`SurveyStore`] in the current process.

use log::{debug, warn};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::sync::Arc;
use url::Url;

use crate::downloader;
use crate::error::BackendError;
use crate::form::SurveyForm;
use crate::store::SurveyStore;

/// Body returned by a successful create call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedSurvey {
    pub survey_id: u64,
}

pub trait SurveyBackend {
    /// Submit a survey payload.
    fn create_survey(
        &self,
        form: SurveyForm,
    ) -> impl Future<Output = Result<CreatedSurvey, BackendError>> + Send;

    /// Fetch the rendered results workbook for a survey.
    fn excel_workbook(
        &self,
        survey_id: u64,
    ) -> impl Future<Output = Result<Vec<u8>, BackendError>> + Send;
}

pub struct HttpBackend {
    client: Client,
    base_url: Url,
}

impl HttpBackend {
    pub fn new(base_url: &str) -> Result<Self, BackendError> {
        Ok(HttpBackend {
            client: Client::new(),
            base_url: Url::parse(base_url)?,
        })
    }

    async fn error_from(response: reqwest::Response) -> BackendError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        warn!("Backend answered {status}: {body}");
        BackendError::Http { status, body }
    }
}

impl SurveyBackend for HttpBackend {
    async fn create_survey(&self, form: SurveyForm) -> Result<CreatedSurvey, BackendError> {
        let url = self.base_url.join("/api/surveys")?;
        let response = self
            .client
            .post(url)
            .multipart(form.into_multipart()?)
            .send()
            .await?;

        if response.status().is_success() {
            let created: CreatedSurvey = response.json().await?;
            debug!("Created survey {}", created.survey_id);
            return Ok(created);
        }

        Err(Self::error_from(response).await)
    }

    async fn excel_workbook(&self, survey_id: u64) -> Result<Vec<u8>, BackendError> {
        let url = self
            .base_url
            .join(&format!("/api/surveys/{survey_id}/excel"))?;
        let response = self.client.get(url).send().await?;

        if response.status().is_success() {
            return Ok(response.bytes().await?.to_vec());
        }

        Err(Self::error_from(response).await)
    }
}

#[derive(Clone)]
pub struct LocalBackend {
    store: Arc<SurveyStore>,
}

impl LocalBackend {
    pub fn new(store: Arc<SurveyStore>) -> Self {
        LocalBackend { store }
    }

    pub fn store(&self) -> &SurveyStore {
        &self.store
    }
}

impl SurveyBackend for LocalBackend {
    async fn create_survey(&self, form: SurveyForm) -> Result<CreatedSurvey, BackendError> {
        let submission = form.to_submission()?;
        let record = self.store.create(submission)?;
        Ok(CreatedSurvey {
            survey_id: record.survey_id,
        })
    }

    async fn excel_workbook(&self, survey_id: u64) -> Result<Vec<u8>, BackendError> {
        let list = self.store.list_data(survey_id)?;
        downloader::to_xlsx(&list).map_err(|e| BackendError::Workbook(e.to_string()))
    }
}
