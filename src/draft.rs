use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DraftError;
use crate::question::{QuestionDraft, QuestionKind};

lazy_static! {
    static ref HEX_COLOR_REGEX: Regex =
        Regex::new(r"^#([0-9A-Fa-f]{6}|[0-9A-Fa-f]{3})$").unwrap();
}

/// Preset theme colors, laid out in two rows of four.
pub const COLOR_ITEMS: [[&str; 4]; 2] = [
    ["#918DCA", "#A3C9F0", "#66C03B", "#E4E91D"],
    ["#8E8E8E", "#B4B4B4", "#E90D0D", "#FF9C06"],
];

pub const DEFAULT_COLOR: &str = "#918DCA";
pub const DEFAULT_CUSTOM_COLOR: &str = "#640FF2";

pub type UserId = u64;

/// A validated `#RRGGBB` (or `#RGB`) color.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor(String);

impl HexColor {
    pub fn new(value: &str) -> Result<Self, DraftError> {
        if HEX_COLOR_REGEX.is_match(value) {
            Ok(HexColor(value.to_string()))
        } else {
            Err(DraftError::InvalidColor(value.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for HexColor {
    fn default() -> Self {
        HexColor(DEFAULT_COLOR.to_string())
    }
}

impl TryFrom<String> for HexColor {
    type Error = DraftError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        HexColor::new(&value)
    }
}

impl From<HexColor> for String {
    fn from(color: HexColor) -> Self {
        color.0
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Corner shape of the survey's buttons.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonStyle {
    #[default]
    Angled,
    Smooth,
    Round,
}

impl ButtonStyle {
    pub const ALL: [ButtonStyle; 3] = [ButtonStyle::Angled, ButtonStyle::Smooth, ButtonStyle::Round];

    pub fn as_str(self) -> &'static str {
        match self {
            ButtonStyle::Angled => "angled",
            ButtonStyle::Smooth => "smooth",
            ButtonStyle::Round => "round",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ButtonStyle::Angled => "각지게",
            ButtonStyle::Smooth => "부드럽게",
            ButtonStyle::Round => "둥글게",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == value)
    }
}

/// Typeface the survey is rendered with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Font {
    #[default]
    Pretendard,
    Tmoney,
    Nps,
    Omyu,
    Seolleim,
}

impl Font {
    pub const ALL: [Font; 5] = [
        Font::Pretendard,
        Font::Tmoney,
        Font::Nps,
        Font::Omyu,
        Font::Seolleim,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Font::Pretendard => "pretendard",
            Font::Tmoney => "tmoney",
            Font::Nps => "nps",
            Font::Omyu => "omyu",
            Font::Seolleim => "seolleim",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Font::Pretendard => "프리텐다드",
            Font::Tmoney => "티머니 둥근바람",
            Font::Nps => "국민연금체",
            Font::Omyu => "오뮤 다예쁨체",
            Font::Seolleim => "시원한 설레임체",
        }
    }

    /// CSS class the font is applied through.
    pub fn css_class(self) -> &'static str {
        match self {
            Font::Pretendard => "font-pretendardFont",
            Font::Tmoney => "font-tMoney",
            Font::Nps => "font-npsFont",
            Font::Omyu => "font-omyuFont",
            Font::Seolleim => "font-seolleimFont",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.as_str() == value)
    }
}

/// Public surveys are listed and their results are viewable; private ones
/// are reachable by link only.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Visibility {
    Public,
    Private,
}

impl Visibility {
    pub fn is_open(self) -> bool {
        matches!(self, Visibility::Public)
    }

    pub fn label(self) -> &'static str {
        match self {
            Visibility::Public => "공개",
            Visibility::Private => "비공개",
        }
    }
}

/// One style control's edit. Applying it replaces exactly one draft field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StyleEdit {
    Title(String),
    Description(String),
    ButtonStyle(ButtonStyle),
    Color(HexColor),
    Font(Font),
    Deadline(String),
    Visibility(Visibility),
}

/// A survey under construction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyDraft {
    pub user_id: UserId,
    pub title: String,
    pub description: String,
    pub open: bool,
    pub button_style: ButtonStyle,
    pub color: HexColor,
    pub font: Font,
    pub deadline: String,
    pub questions: Vec<QuestionDraft>,
}

impl SurveyDraft {
    pub fn new(user_id: UserId) -> Self {
        SurveyDraft {
            user_id,
            title: String::new(),
            description: String::new(),
            open: true,
            button_style: ButtonStyle::default(),
            color: HexColor::default(),
            font: Font::default(),
            deadline: String::new(),
            questions: Vec::new(),
        }
    }

    /// Copy of this draft with the field governed by `edit` replaced.
    pub fn apply(&self, edit: StyleEdit) -> SurveyDraft {
        let mut next = self.clone();
        match edit {
            StyleEdit::Title(title) => next.title = title,
            StyleEdit::Description(description) => next.description = description,
            StyleEdit::ButtonStyle(style) => next.button_style = style,
            StyleEdit::Color(color) => next.color = color,
            StyleEdit::Font(font) => next.font = font,
            StyleEdit::Deadline(deadline) => next.deadline = deadline,
            StyleEdit::Visibility(visibility) => next.open = visibility.is_open(),
        }
        next
    }

    pub fn with_title(&self, title: impl Into<String>) -> SurveyDraft {
        self.apply(StyleEdit::Title(title.into()))
    }

    pub fn with_description(&self, description: impl Into<String>) -> SurveyDraft {
        self.apply(StyleEdit::Description(description.into()))
    }

    pub fn with_deadline(&self, deadline: impl Into<String>) -> SurveyDraft {
        self.apply(StyleEdit::Deadline(deadline.into()))
    }

    pub fn visibility(&self) -> Visibility {
        if self.open {
            Visibility::Public
        } else {
            Visibility::Private
        }
    }

    /// Copy with a fresh question of `kind` appended.
    pub fn with_question(&self, kind: QuestionKind) -> SurveyDraft {
        let mut next = self.clone();
        next.questions.push(QuestionDraft::new(kind));
        next
    }

    /// Copy with the question at `index` replaced by `question`.
    pub fn with_question_replaced(
        &self,
        index: usize,
        question: QuestionDraft,
    ) -> Result<SurveyDraft, DraftError> {
        if index >= self.questions.len() {
            return Err(DraftError::NoSuchQuestion(index));
        }
        let mut next = self.clone();
        next.questions[index] = question;
        Ok(next)
    }

    pub fn without_question(&self, index: usize) -> Result<SurveyDraft, DraftError> {
        if index >= self.questions.len() {
            return Err(DraftError::NoSuchQuestion(index));
        }
        let mut next = self.clone();
        next.questions.remove(index);
        Ok(next)
    }
}
