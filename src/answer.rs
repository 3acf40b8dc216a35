//! Result-side data: questions as the server returns them, recorded answers
//! and the tabular answer list behind the results grid.
//!
//! These values are read-only from the viewer's point of view; whoever
//! fetched them owns them.

use serde::{Deserialize, Serialize};

use crate::error::ResultError;
use crate::question::{ChoiceId, QuestionBody, QuestionDraft, QuestionKind};

/// A choice as supplied by the server.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChoiceData {
    #[serde(alias = "choices_id", alias = "choice_id")]
    pub choice_id: ChoiceId,
    pub option: String,
}

/// A question as supplied by the server.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionData {
    #[serde(alias = "question_id")]
    pub question_id: u64,
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    pub content: String,
    #[serde(default, alias = "image_url", skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<ChoiceData>>,
}

impl QuestionData {
    /// Publish a draft question under `question_id`, keeping its local choice ids.
    pub fn from_draft(question_id: u64, draft: &QuestionDraft) -> Self {
        let choices = match &draft.body {
            QuestionBody::MultipleChoice { choices }
            | QuestionBody::Checkbox { choices }
            | QuestionBody::Dropdown { choices } => Some(
                choices
                    .iter()
                    .map(|c| ChoiceData {
                        choice_id: c.id,
                        option: c.label.clone(),
                    })
                    .collect(),
            ),
            QuestionBody::Subjective => None,
        };

        QuestionData {
            question_id,
            kind: draft.kind(),
            content: draft.content.clone(),
            image_url: (!draft.image_url.is_empty()).then(|| draft.image_url.clone()),
            choices,
        }
    }

    pub fn choice(&self, id: ChoiceId) -> Option<&ChoiceData> {
        self.choices.as_deref()?.iter().find(|c| c.choice_id == id)
    }

    /// Label of choice `id`, if the question has one.
    pub fn option_label(&self, id: ChoiceId) -> Option<&str> {
        self.choice(id).map(|c| c.option.as_str())
    }
}

/// A question together with one respondent's recorded answer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtendedQuestionData {
    #[serde(flatten)]
    pub question: QuestionData,
    #[serde(default, alias = "obj_content")]
    pub obj_content: Vec<ChoiceId>,
    #[serde(default, alias = "sub_content")]
    pub sub_content: String,
}

impl ExtendedQuestionData {
    pub fn new(question: QuestionData, answer: &Answer) -> Self {
        let (obj_content, sub_content) = match answer {
            Answer::Choices(ids) => (ids.clone(), String::new()),
            Answer::Text(text) => (Vec::new(), text.clone()),
            Answer::Skipped => (Vec::new(), String::new()),
        };

        ExtendedQuestionData {
            question,
            obj_content,
            sub_content,
        }
    }
}

/// One respondent's answer to one question.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Answer {
    Choices(Vec<ChoiceId>),
    Text(String),
    Skipped,
}

impl Answer {
    /// Check the answer fits `question`: choice answers on choice kinds with
    /// known ids (at most one unless it is a checkbox), text on subjective.
    pub fn fits(&self, question: &QuestionData) -> bool {
        match self {
            Answer::Skipped => true,
            Answer::Text(_) => question.kind == QuestionKind::Subjective,
            Answer::Choices(ids) => {
                question.kind.has_choices()
                    && (question.kind == QuestionKind::Checkbox || ids.len() <= 1)
                    && ids.iter().all(|id| question.choice(*id).is_some())
            }
        }
    }

    /// Cell text for result tables: choice labels joined by `", "`.
    pub fn display(&self, question: &QuestionData) -> String {
        match self {
            Answer::Choices(ids) => ids
                .iter()
                .filter_map(|id| question.option_label(*id))
                .collect::<Vec<_>>()
                .join(", "),
            Answer::Text(text) => text.clone(),
            Answer::Skipped => String::new(),
        }
    }
}

/// One respondent's row in the answer list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseRow {
    pub created_at: String,
    pub responses: Vec<String>,
}

/// Header labels plus positional answer rows.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListData {
    pub head: Vec<String>,
    pub rows: Vec<ResponseRow>,
}

impl ListData {
    /// Every row must have exactly one response per header column.
    pub fn validate(&self) -> Result<(), ResultError> {
        let expected = self.head.len();
        match self
            .rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.responses.len() != expected)
        {
            Some((row, found)) => Err(ResultError::RaggedRow {
                row,
                expected,
                found: found.responses.len(),
            }),
            None => Ok(()),
        }
    }
}
