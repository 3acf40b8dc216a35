//! The multipart payload a draft is submitted as.
//!
//! The client builds a [`SurveyForm`] from its draft; the server reads the
//! multipart body back into the same shape and turns it into a
//! [`SurveySubmission`]. Both backends go through [`SurveyForm::to_submission`].

use chrono::NaiveDate;

use crate::draft::{ButtonStyle, Font, HexColor, SurveyDraft, UserId};
use crate::error::FormError;
use crate::question::QuestionDraft;

pub const FIELD_USER_ID: &str = "userId";
pub const FIELD_TITLE: &str = "title";
pub const FIELD_DESCRIPTION: &str = "description";
pub const FIELD_OPEN: &str = "open";
pub const FIELD_COLOR: &str = "color";
pub const FIELD_BUTTON_STYLE: &str = "buttonStyle";
pub const FIELD_MAIN_IMAGE: &str = "mainImageUrl";
pub const FIELD_DEADLINE: &str = "deadline";
pub const FIELD_FONT: &str = "font";
pub const FIELD_QUESTIONS: &str = "questions";

/// An uploaded cover image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CoverImage {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Which draft fields go into the payload.
///
/// `Observed` sends the top-level fields the authoring page has always sent;
/// `Complete` additionally sends the font and the question list as JSON.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PayloadScope {
    #[default]
    Observed,
    Complete,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormValue {
    Text(String),
    File(CoverImage),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormPart {
    pub name: String,
    pub value: FormValue,
}

/// Ordered multipart fields.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SurveyForm {
    parts: Vec<FormPart>,
}

impl SurveyForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: &str, value: impl Into<String>) -> Self {
        self.push_text(name, value);
        self
    }

    pub fn push_text(&mut self, name: &str, value: impl Into<String>) {
        self.parts.push(FormPart {
            name: name.to_string(),
            value: FormValue::Text(value.into()),
        });
    }

    pub fn push_file(&mut self, name: &str, file: CoverImage) {
        self.parts.push(FormPart {
            name: name.to_string(),
            value: FormValue::File(file),
        });
    }

    /// Build the payload for `draft` and its optional cover image.
    pub fn from_draft(
        draft: &SurveyDraft,
        cover: Option<&CoverImage>,
        scope: PayloadScope,
    ) -> Result<Self, serde_json::Error> {
        let mut form = SurveyForm::new()
            .text(FIELD_USER_ID, draft.user_id.to_string())
            .text(FIELD_TITLE, draft.title.as_str())
            .text(FIELD_DESCRIPTION, draft.description.as_str())
            .text(FIELD_OPEN, draft.open.to_string())
            .text(FIELD_COLOR, draft.color.as_str())
            .text(FIELD_BUTTON_STYLE, draft.button_style.as_str());

        if let Some(cover) = cover {
            form.push_file(FIELD_MAIN_IMAGE, cover.clone());
        }
        form.push_text(FIELD_DEADLINE, draft.deadline.as_str());

        if scope == PayloadScope::Complete {
            form.push_text(FIELD_FONT, draft.font.as_str());
            form.push_text(FIELD_QUESTIONS, serde_json::to_string(&draft.questions)?);
        }

        Ok(form)
    }

    pub fn parts(&self) -> &[FormPart] {
        &self.parts
    }

    pub fn names(&self) -> Vec<&str> {
        self.parts.iter().map(|p| p.name.as_str()).collect()
    }

    /// Last text value sent under `name`.
    pub fn get_text(&self, name: &str) -> Option<&str> {
        self.parts.iter().rev().find_map(|p| match &p.value {
            FormValue::Text(value) if p.name == name => Some(value.as_str()),
            _ => None,
        })
    }

    pub fn get_file(&self, name: &str) -> Option<&CoverImage> {
        self.parts.iter().rev().find_map(|p| match &p.value {
            FormValue::File(file) if p.name == name => Some(file),
            _ => None,
        })
    }

    /// Convert into a `reqwest` multipart body.
    pub fn into_multipart(self) -> Result<reqwest::multipart::Form, reqwest::Error> {
        let mut form = reqwest::multipart::Form::new();
        for part in self.parts {
            form = match part.value {
                FormValue::Text(value) => form.text(part.name, value),
                FormValue::File(file) => form.part(
                    part.name,
                    reqwest::multipart::Part::bytes(file.bytes)
                        .file_name(file.file_name)
                        .mime_str(&file.content_type)?,
                ),
            };
        }
        Ok(form)
    }

    /// Validate the fields and collect them into a [`SurveySubmission`].
    pub fn to_submission(&self) -> Result<SurveySubmission, FormError> {
        let user_id = self
            .get_text(FIELD_USER_ID)
            .ok_or(FormError::Missing(FIELD_USER_ID))?
            .trim()
            .parse::<UserId>()
            .map_err(|e| FormError::invalid(FIELD_USER_ID, e))?;

        let title = self.get_text(FIELD_TITLE).unwrap_or_default().to_string();
        let description = self.get_text(FIELD_DESCRIPTION).unwrap_or_default().to_string();

        let open = match self.get_text(FIELD_OPEN).unwrap_or("true") {
            "true" => true,
            "false" => false,
            other => return Err(FormError::invalid(FIELD_OPEN, format!("{other:?}"))),
        };

        let color = match self.get_text(FIELD_COLOR) {
            Some(value) => HexColor::new(value).map_err(|e| FormError::invalid(FIELD_COLOR, e))?,
            None => HexColor::default(),
        };

        let button_style = match self.get_text(FIELD_BUTTON_STYLE) {
            Some(value) => ButtonStyle::parse(value)
                .ok_or_else(|| FormError::invalid(FIELD_BUTTON_STYLE, format!("{value:?}")))?,
            None => ButtonStyle::default(),
        };

        let font = match self.get_text(FIELD_FONT) {
            Some(value) => Some(
                Font::parse(value)
                    .ok_or_else(|| FormError::invalid(FIELD_FONT, format!("{value:?}")))?,
            ),
            None => None,
        };

        let deadline = self.get_text(FIELD_DEADLINE).unwrap_or_default().to_string();
        if !deadline.is_empty() {
            NaiveDate::parse_from_str(&deadline, "%Y-%m-%d")
                .map_err(|e| FormError::invalid(FIELD_DEADLINE, format!("{deadline:?}: {e}")))?;
        }

        let questions = match self.get_text(FIELD_QUESTIONS) {
            Some(json) => serde_json::from_str::<Vec<QuestionDraft>>(json)
                .map_err(|e| FormError::invalid(FIELD_QUESTIONS, e))?,
            None => Vec::new(),
        };

        Ok(SurveySubmission {
            user_id,
            title,
            description,
            open,
            color,
            button_style,
            font,
            deadline,
            cover: self.get_file(FIELD_MAIN_IMAGE).cloned(),
            questions,
        })
    }
}

/// A validated survey creation request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SurveySubmission {
    pub user_id: UserId,
    pub title: String,
    pub description: String,
    pub open: bool,
    pub color: HexColor,
    pub button_style: ButtonStyle,
    pub font: Option<Font>,
    pub deadline: String,
    pub cover: Option<CoverImage>,
    pub questions: Vec<QuestionDraft>,
}
