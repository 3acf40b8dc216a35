//! Interactive answer capture for a single question.
//!
//! A [`ResponseInput`] tracks what one respondent has picked for one question
//! and calls back with the new selection on every change. Multiple-choice and
//! dropdown questions hold at most one choice, checkboxes hold any subset and
//! subjective questions hold free text.

use std::collections::BTreeSet;

use crate::answer::{Answer, QuestionData};
use crate::error::SelectionError;
use crate::question::{ChoiceId, QuestionKind};

/// Option value of the dropdown's "nothing chosen" entry.
pub const DROPDOWN_NONE: &str = "";

/// Placeholder label of the dropdown's "nothing chosen" entry.
pub const DROPDOWN_PLACEHOLDER: &str = "선택...";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Selection {
    Single(Option<ChoiceId>),
    Many(BTreeSet<ChoiceId>),
    Text(String),
}

impl Selection {
    /// Empty selection for a question of `kind`.
    pub fn empty(kind: QuestionKind) -> Self {
        match kind {
            QuestionKind::MultipleChoice | QuestionKind::Dropdown => Selection::Single(None),
            QuestionKind::Checkbox => Selection::Many(BTreeSet::new()),
            QuestionKind::Subjective => Selection::Text(String::new()),
        }
    }

    pub fn is_selected(&self, id: ChoiceId) -> bool {
        match self {
            Selection::Single(chosen) => *chosen == Some(id),
            Selection::Many(chosen) => chosen.contains(&id),
            Selection::Text(_) => false,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Selection::Single(chosen) => chosen.is_none(),
            Selection::Many(chosen) => chosen.is_empty(),
            Selection::Text(text) => text.is_empty(),
        }
    }
}

pub struct ResponseInput<F>
where
    F: FnMut(&Selection),
{
    question: QuestionData,
    selection: Selection,
    on_select: F,
}

impl<F> ResponseInput<F>
where
    F: FnMut(&Selection),
{
    pub fn new(question: QuestionData, on_select: F) -> Self {
        let selection = Selection::empty(question.kind);
        ResponseInput {
            question,
            selection,
            on_select,
        }
    }

    pub fn question(&self) -> &QuestionData {
        &self.question
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Pick choice `id`. Checkboxes toggle it, the other choice kinds replace
    /// whatever was picked before.
    pub fn select(&mut self, id: ChoiceId) -> Result<&Selection, SelectionError> {
        if !self.question.kind.has_choices() {
            return Err(SelectionError::WrongKind);
        }
        if self.question.choice(id).is_none() {
            return Err(SelectionError::UnknownChoice(id));
        }

        match &mut self.selection {
            Selection::Many(chosen) => {
                if !chosen.remove(&id) {
                    chosen.insert(id);
                }
            }
            selection => *selection = Selection::Single(Some(id)),
        }

        (self.on_select)(&self.selection);
        Ok(&self.selection)
    }

    /// Apply a raw dropdown option value. [`DROPDOWN_NONE`] clears the pick.
    pub fn choose_option(&mut self, value: &str) -> Result<&Selection, SelectionError> {
        if self.question.kind != QuestionKind::Dropdown {
            return Err(SelectionError::WrongKind);
        }
        if value == DROPDOWN_NONE {
            self.selection = Selection::Single(None);
            (self.on_select)(&self.selection);
            return Ok(&self.selection);
        }

        let id = value
            .parse::<ChoiceId>()
            .map_err(|_| SelectionError::InvalidOption(value.to_string()))?;
        self.select(id)
    }

    /// Replace the free-text answer of a subjective question.
    pub fn write(&mut self, text: impl Into<String>) -> Result<&Selection, SelectionError> {
        match &mut self.selection {
            Selection::Text(current) => *current = text.into(),
            _ => return Err(SelectionError::WrongKind),
        }
        (self.on_select)(&self.selection);
        Ok(&self.selection)
    }

    /// Labels of the picked choices, in choice-list order.
    pub fn selected_labels(&self) -> Vec<&str> {
        self.question
            .choices
            .as_deref()
            .unwrap_or_default()
            .iter()
            .filter(|c| self.selection.is_selected(c.choice_id))
            .map(|c| c.option.as_str())
            .collect()
    }

    /// The confirmation line shown under the question, once something is picked.
    pub fn you_selected(&self) -> Option<String> {
        if !self.question.kind.has_choices() || self.selection.is_empty() {
            return None;
        }
        Some(format!("You selected: {}", self.selected_labels().join(", ")))
    }

    /// The current selection as a recordable answer.
    pub fn answer(&self) -> Answer {
        match &self.selection {
            Selection::Single(Some(id)) => Answer::Choices(vec![*id]),
            Selection::Many(chosen) if !chosen.is_empty() => {
                Answer::Choices(chosen.iter().copied().collect())
            }
            Selection::Text(text) if !text.is_empty() => Answer::Text(text.clone()),
            _ => Answer::Skipped,
        }
    }
}
