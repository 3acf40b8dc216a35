use serde::{Deserialize, Serialize};

use crate::error::QuestionError;

/// Identifier of a choice within one question.
pub type ChoiceId = u64;

/// The four kinds of question a survey can hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuestionKind {
    #[serde(rename = "MULTIPLE_CHOICE")]
    MultipleChoice,
    #[serde(rename = "CHECKBOX")]
    Checkbox,
    #[serde(rename = "DROPDOWN")]
    Dropdown,
    #[serde(rename = "SUBJECTIVE_QUESTION")]
    Subjective,
}

impl QuestionKind {
    pub const ALL: [QuestionKind; 4] = [
        QuestionKind::MultipleChoice,
        QuestionKind::Checkbox,
        QuestionKind::Dropdown,
        QuestionKind::Subjective,
    ];

    /// Whether questions of this kind carry a choice list.
    pub fn has_choices(self) -> bool {
        !matches!(self, QuestionKind::Subjective)
    }

    /// Badge shown above a rendered question.
    pub fn label(self) -> &'static str {
        match self {
            QuestionKind::MultipleChoice => "객관식",
            QuestionKind::Checkbox => "체크박스",
            QuestionKind::Dropdown => "드롭다운",
            QuestionKind::Subjective => "주관식",
        }
    }

    /// Wire name, as used in the `type` field.
    pub fn as_str(self) -> &'static str {
        match self {
            QuestionKind::MultipleChoice => "MULTIPLE_CHOICE",
            QuestionKind::Checkbox => "CHECKBOX",
            QuestionKind::Dropdown => "DROPDOWN",
            QuestionKind::Subjective => "SUBJECTIVE_QUESTION",
        }
    }
}

/// One selectable option of a draft question.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    pub id: ChoiceId,
    pub label: String,
}

/// Kind-specific part of a draft question.
///
/// The choice list only exists on the variants that can display it, so a
/// subjective question cannot end up holding choices.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum QuestionBody {
    #[serde(rename = "MULTIPLE_CHOICE")]
    MultipleChoice { choices: Vec<Choice> },
    #[serde(rename = "CHECKBOX")]
    Checkbox { choices: Vec<Choice> },
    #[serde(rename = "DROPDOWN")]
    Dropdown { choices: Vec<Choice> },
    #[serde(rename = "SUBJECTIVE_QUESTION")]
    Subjective,
}

/// A question being authored.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionDraft {
    pub content: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(flatten)]
    pub body: QuestionBody,
}

impl QuestionDraft {
    /// A fresh question of `kind`: empty text, no image and, where the kind
    /// allows it, an empty choice list.
    pub fn new(kind: QuestionKind) -> Self {
        let body = match kind {
            QuestionKind::MultipleChoice => QuestionBody::MultipleChoice {
                choices: Vec::new(),
            },
            QuestionKind::Checkbox => QuestionBody::Checkbox {
                choices: Vec::new(),
            },
            QuestionKind::Dropdown => QuestionBody::Dropdown {
                choices: Vec::new(),
            },
            QuestionKind::Subjective => QuestionBody::Subjective,
        };

        QuestionDraft {
            content: String::new(),
            image_url: String::new(),
            body,
        }
    }

    pub fn kind(&self) -> QuestionKind {
        match self.body {
            QuestionBody::MultipleChoice { .. } => QuestionKind::MultipleChoice,
            QuestionBody::Checkbox { .. } => QuestionKind::Checkbox,
            QuestionBody::Dropdown { .. } => QuestionKind::Dropdown,
            QuestionBody::Subjective => QuestionKind::Subjective,
        }
    }

    /// The choice list, `None` for subjective questions.
    pub fn choices(&self) -> Option<&[Choice]> {
        match &self.body {
            QuestionBody::MultipleChoice { choices }
            | QuestionBody::Checkbox { choices }
            | QuestionBody::Dropdown { choices } => Some(choices),
            QuestionBody::Subjective => None,
        }
    }

    fn choices_mut(&mut self) -> Result<&mut Vec<Choice>, QuestionError> {
        match &mut self.body {
            QuestionBody::MultipleChoice { choices }
            | QuestionBody::Checkbox { choices }
            | QuestionBody::Dropdown { choices } => Ok(choices),
            QuestionBody::Subjective => Err(QuestionError::NoChoices),
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = image_url.into();
        self
    }

    /// Append a choice and return the id it was given.
    ///
    /// Ids start at 1 and are one past the largest id currently in the list.
    pub fn add_choice(&mut self, label: impl Into<String>) -> Result<ChoiceId, QuestionError> {
        let choices = self.choices_mut()?;
        let id = choices.iter().map(|c| c.id).max().unwrap_or(0) + 1;
        choices.push(Choice {
            id,
            label: label.into(),
        });
        Ok(id)
    }

    pub fn relabel_choice(
        &mut self,
        id: ChoiceId,
        label: impl Into<String>,
    ) -> Result<(), QuestionError> {
        let choice = self
            .choices_mut()?
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(QuestionError::UnknownChoice(id))?;
        choice.label = label.into();
        Ok(())
    }

    pub fn remove_choice(&mut self, id: ChoiceId) -> Result<Choice, QuestionError> {
        let choices = self.choices_mut()?;
        let pos = choices
            .iter()
            .position(|c| c.id == id)
            .ok_or(QuestionError::UnknownChoice(id))?;
        Ok(choices.remove(pos))
    }
}
