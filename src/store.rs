use bincode::{deserialize_from, serialize_into};
use chrono::{DateTime, Utc};
use flate2::Compression;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::fs::{self, File, create_dir_all};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::NamedTempFile;
use uuid::Uuid;

use crate::answer::{Answer, ListData, QuestionData, ResponseRow};
use crate::draft::{ButtonStyle, Font, HexColor, UserId};
use crate::error::StoreError;
use crate::form::{CoverImage, SurveySubmission};

const INDEX_FILE: &str = "surveys.json";
const RESPONSES_DIR: &str = "responses";
const IMAGES_DIR: &str = "images";

/// Route prefix cover images are served under.
pub const IMAGES_ROUTE: &str = "/images";

/// A published survey as kept in the index.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyRecord {
    pub survey_id: u64,
    pub user_id: UserId,
    pub title: String,
    pub description: String,
    pub open: bool,
    pub color: HexColor,
    pub button_style: ButtonStyle,
    pub font: Font,
    pub deadline: String,
    pub main_image_url: Option<String>,
    pub questions: Vec<QuestionData>,
    pub created_at: i64,
    pub updated_at: i64,
    pub attended_count: u64,
}

/// Listing entry for a survey.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveySummary {
    pub survey_id: u64,
    pub title: String,
    pub main_image_url: String,
    pub created_at: String,
    pub updated_at: String,
    pub deadline: String,
    pub attended_count: u64,
    pub open: bool,
}

impl From<&SurveyRecord> for SurveySummary {
    fn from(record: &SurveyRecord) -> Self {
        SurveySummary {
            survey_id: record.survey_id,
            title: record.title.clone(),
            main_image_url: record.main_image_url.clone().unwrap_or_default(),
            created_at: format_timestamp(record.created_at),
            updated_at: format_timestamp(record.updated_at),
            deadline: record.deadline.clone(),
            attended_count: record.attended_count,
            open: record.open,
        }
    }
}

/// One respondent's submission.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseRecord {
    pub created_at: i64,
    pub answers: Vec<Answer>,
}

/// Render a unix timestamp the way result tables show it.
pub fn format_timestamp(secs: i64) -> String {
    DateTime::<Utc>::from_timestamp(secs, 0)
        .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_default()
}

/// Tabulate `responses` against the questions of `record`.
pub fn list_data(record: &SurveyRecord, responses: &[ResponseRecord]) -> ListData {
    let head = record.questions.iter().map(|q| q.content.clone()).collect();
    let rows = responses
        .iter()
        .map(|response| ResponseRow {
            created_at: format_timestamp(response.created_at),
            responses: record
                .questions
                .iter()
                .enumerate()
                .map(|(i, question)| {
                    response
                        .answers
                        .get(i)
                        .map(|answer| answer.display(question))
                        .unwrap_or_default()
                })
                .collect(),
        })
        .collect();

    ListData { head, rows }
}

/// Surveys, responses and cover images under one directory.
///
/// The survey index is a JSON file; each survey's responses live in their
/// own gzip-compressed bincode file.
pub struct SurveyStore {
    root: PathBuf,
    index: Mutex<Vec<SurveyRecord>>,
}

impl SurveyStore {
    /// Open the store at `root`, creating the directory layout on first use.
    pub fn open(root: impl AsRef<Path>) -> Result<Self, StoreError> {
        let root = root.as_ref().to_path_buf();
        create_dir_all(root.join(RESPONSES_DIR))?;
        create_dir_all(root.join(IMAGES_DIR))?;

        let index_path = root.join(INDEX_FILE);
        if !index_path.exists() {
            let mut file = File::create(&index_path)?;
            file.write_all(b"[]")?;
        }

        let data = fs::read_to_string(&index_path)?;
        let records: Vec<SurveyRecord> = serde_json::from_str(&data)?;
        info!("Opened survey store at {} ({} surveys)", root.display(), records.len());

        Ok(SurveyStore {
            root,
            index: Mutex::new(records),
        })
    }

    pub fn images_dir(&self) -> PathBuf {
        self.root.join(IMAGES_DIR)
    }

    fn responses_path(&self, survey_id: u64) -> PathBuf {
        self.root
            .join(RESPONSES_DIR)
            .join(format!("{survey_id}.bin.gz"))
    }

    fn save_index(&self, records: &[SurveyRecord]) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(records)?;
        fs::write(self.root.join(INDEX_FILE), json)?;
        Ok(())
    }

    /// Write the cover into the images directory and return its file name.
    fn save_cover(&self, cover: &CoverImage) -> Result<String, StoreError> {
        let extension = Path::new(&cover.file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase)
            .unwrap_or_else(|| match cover.content_type.as_str() {
                "image/png" => "png".to_string(),
                _ => "jpg".to_string(),
            });
        let name = format!("{}.{extension}", Uuid::new_v4());
        fs::write(self.images_dir().join(&name), &cover.bytes)?;
        Ok(name)
    }

    fn remove_cover(&self, name: &str) {
        if let Err(e) = fs::remove_file(self.images_dir().join(name)) {
            warn!("Failed to remove orphaned cover {name}: {e}");
        }
    }

    /// Publish a submission and return the stored record.
    pub fn create(&self, submission: SurveySubmission) -> Result<SurveyRecord, StoreError> {
        let cover_name = match &submission.cover {
            Some(cover) => Some(self.save_cover(cover)?),
            None => None,
        };
        let main_image_url = cover_name
            .as_ref()
            .map(|name| format!("{IMAGES_ROUTE}/{name}"));

        let mut records = self.index.lock().unwrap();
        let survey_id = records.iter().map(|r| r.survey_id).max().unwrap_or(0) + 1;
        let now = Utc::now().timestamp();

        let record = SurveyRecord {
            survey_id,
            user_id: submission.user_id,
            title: submission.title,
            description: submission.description,
            open: submission.open,
            color: submission.color,
            button_style: submission.button_style,
            font: submission.font.unwrap_or_default(),
            deadline: submission.deadline,
            main_image_url,
            questions: submission
                .questions
                .iter()
                .enumerate()
                .map(|(i, q)| QuestionData::from_draft(i as u64 + 1, q))
                .collect(),
            created_at: now,
            updated_at: now,
            attended_count: 0,
        };

        // The in-memory index only changes once the new one is on disk.
        let mut next = records.clone();
        next.push(record.clone());
        if let Err(e) = self.save_index(&next) {
            if let Some(name) = &cover_name {
                self.remove_cover(name);
            }
            return Err(e);
        }
        *records = next;
        info!(
            "Created survey {} for user {} ({} questions)",
            record.survey_id,
            record.user_id,
            record.questions.len()
        );

        Ok(record)
    }

    /// Summaries of every survey, or only those authored by `user_id`.
    pub fn list(&self, user_id: Option<UserId>) -> Vec<SurveySummary> {
        let records = self.index.lock().unwrap();
        records
            .iter()
            .filter(|r| user_id.is_none_or(|id| r.user_id == id))
            .map(SurveySummary::from)
            .collect()
    }

    pub fn get(&self, survey_id: u64) -> Result<SurveyRecord, StoreError> {
        let records = self.index.lock().unwrap();
        records
            .iter()
            .find(|r| r.survey_id == survey_id)
            .cloned()
            .ok_or(StoreError::NotFound(survey_id))
    }

    pub fn responses(&self, survey_id: u64) -> Result<Vec<ResponseRecord>, StoreError> {
        let records = self.index.lock().unwrap();
        if !records.iter().any(|r| r.survey_id == survey_id) {
            return Err(StoreError::NotFound(survey_id));
        }
        let path = self.responses_path(survey_id);
        if !path.exists() {
            return Ok(Vec::new());
        }
        load_compressed(&path)
    }

    /// Append one respondent's answers, one per question.
    pub fn record_response(
        &self,
        survey_id: u64,
        answers: Vec<Answer>,
    ) -> Result<ResponseRecord, StoreError> {
        let mut records = self.index.lock().unwrap();
        let position = records
            .iter()
            .position(|r| r.survey_id == survey_id)
            .ok_or(StoreError::NotFound(survey_id))?;
        let record = &records[position];

        if answers.len() != record.questions.len() {
            return Err(StoreError::InvalidResponse(format!(
                "expected {} answers, got {}",
                record.questions.len(),
                answers.len()
            )));
        }
        if let Some((i, _)) = answers
            .iter()
            .zip(&record.questions)
            .enumerate()
            .find(|(_, (answer, question))| !answer.fits(question))
        {
            return Err(StoreError::InvalidResponse(format!(
                "answer {} does not fit question {}",
                i + 1,
                record.questions[i].question_id
            )));
        }

        let path = self.responses_path(survey_id);
        let mut responses: Vec<ResponseRecord> = if path.exists() {
            load_compressed(&path)?
        } else {
            Vec::new()
        };

        let response = ResponseRecord {
            created_at: Utc::now().timestamp(),
            answers,
        };
        responses.push(response.clone());
        let staged = stage_compressed(&responses, &path)?;

        let mut next = records.clone();
        next[position].attended_count = responses.len() as u64;
        next[position].updated_at = response.created_at;
        self.save_index(&next)?;
        if let Err(e) = staged.persist(&path) {
            // Put the counters back so the index matches the responses file.
            if let Err(restore) = self.save_index(&records) {
                warn!("Failed to restore the index of survey {survey_id}: {restore}");
            }
            return Err(e.error.into());
        }
        *records = next;
        debug!("Recorded response #{} for survey {survey_id}", responses.len());

        Ok(response)
    }

    /// The survey's answers tabulated for the results grid.
    pub fn list_data(&self, survey_id: u64) -> Result<ListData, StoreError> {
        let record = self.get(survey_id)?;
        let responses = self.responses(survey_id)?;
        Ok(list_data(&record, &responses))
    }
}

/// Encode `value` into a temporary file next to `path`.
///
/// Readers never see a partial file: the caller renames the result over
/// `path` with `persist`, and dropping it instead discards the write.
fn stage_compressed<T: Serialize>(value: &T, path: &Path) -> Result<NamedTempFile, StoreError> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut file = NamedTempFile::new_in(dir)?;
    let encoder = GzEncoder::new(file.as_file_mut(), Compression::default());
    let mut writer = BufWriter::new(encoder);

    serialize_into(&mut writer, value)?;
    writer
        .into_inner()
        .map_err(|e| e.into_error())?
        .finish()?;

    Ok(file)
}

fn load_compressed<T: DeserializeOwned>(path: &Path) -> Result<T, StoreError> {
    let file = File::open(path)?;
    let decoder = GzDecoder::new(file);
    let mut reader = BufReader::new(decoder);

    Ok(deserialize_from(&mut reader)?)
}
