//! The survey authoring page.
//!
//! An [`AuthoringSession`] owns one [`SurveyDraft`] for as long as the page is
//! open. Style controls replace one draft field each, the problem view adds
//! and edits questions, and `submit` hands the draft to a backend.

use log::{info, warn};

use crate::api::{CreatedSurvey, SurveyBackend};
use crate::draft::{DEFAULT_CUSTOM_COLOR, HexColor, StyleEdit, SurveyDraft, UserId};
use crate::error::{BackendError, DraftError};
use crate::form::{CoverImage, PayloadScope, SurveyForm};
use crate::question::{QuestionDraft, QuestionKind};
use crate::render;

pub const SUBMIT_SUCCESS_MESSAGE: &str = "설문이 생성되었습니다.";
pub const SUBMIT_FAILED_MESSAGE: &str = "설문 생성에 실패했습니다.";

/// Who is signed in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AuthContext {
    pub user_id: Option<UserId>,
}

/// Navigation item the user came from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NavItem {
    #[default]
    All,
    MyForm,
    Create,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NavbarContext {
    pub active_item: NavItem,
}

impl NavbarContext {
    /// Listing the user returns to after publishing.
    pub fn listing_route(&self) -> &'static str {
        match self.active_item {
            NavItem::All => "/all",
            _ => "/myform",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EditorPage {
    #[default]
    Style,
    Problem,
}

/// Dismissible outcome of the last submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notice {
    Success { survey_id: u64, route: &'static str },
    Error,
}

impl Notice {
    pub fn message(&self) -> &'static str {
        match self {
            Notice::Success { .. } => SUBMIT_SUCCESS_MESSAGE,
            Notice::Error => SUBMIT_FAILED_MESSAGE,
        }
    }
}

pub struct AuthoringSession {
    draft: SurveyDraft,
    navbar: NavbarContext,
    page: EditorPage,
    add_menu_open: bool,
    picker_open: bool,
    custom_color: HexColor,
    cover: Option<CoverImage>,
    scope: PayloadScope,
    notice: Option<Notice>,
}

impl AuthoringSession {
    /// Start authoring with a default draft owned by the signed-in user.
    pub fn new(auth: &AuthContext, navbar: &NavbarContext) -> Self {
        AuthoringSession {
            draft: SurveyDraft::new(auth.user_id.unwrap_or_default()),
            navbar: *navbar,
            page: EditorPage::default(),
            add_menu_open: false,
            picker_open: false,
            custom_color: HexColor::new(DEFAULT_CUSTOM_COLOR).unwrap_or_default(),
            cover: None,
            scope: PayloadScope::default(),
            notice: None,
        }
    }

    pub fn with_scope(mut self, scope: PayloadScope) -> Self {
        self.scope = scope;
        self
    }

    pub fn draft(&self) -> &SurveyDraft {
        &self.draft
    }

    pub fn page(&self) -> EditorPage {
        self.page
    }

    /// Switch between the style and problem views. The draft is untouched.
    pub fn toggle_page(&mut self) {
        self.page = match self.page {
            EditorPage::Style => EditorPage::Problem,
            EditorPage::Problem => EditorPage::Style,
        };
    }

    pub fn edit_style(&mut self, edit: StyleEdit) {
        self.draft = self.draft.apply(edit);
    }

    pub fn custom_color(&self) -> &HexColor {
        &self.custom_color
    }

    pub fn picker_open(&self) -> bool {
        self.picker_open
    }

    pub fn toggle_picker(&mut self) {
        self.picker_open = !self.picker_open;
    }

    /// A color picked from the custom picker becomes both the custom swatch
    /// and the draft's theme color.
    pub fn pick_custom_color(&mut self, color: &str) -> Result<(), DraftError> {
        let color = HexColor::new(color)?;
        self.custom_color = color.clone();
        self.edit_style(StyleEdit::Color(color));
        Ok(())
    }

    pub fn cover(&self) -> Option<&CoverImage> {
        self.cover.as_ref()
    }

    pub fn set_cover(&mut self, cover: CoverImage) {
        self.cover = Some(cover);
    }

    pub fn delete_cover(&mut self) {
        self.cover = None;
    }

    pub fn add_menu_open(&self) -> bool {
        self.add_menu_open
    }

    pub fn toggle_add_menu(&mut self) {
        self.add_menu_open = !self.add_menu_open;
    }

    /// Append a fresh question of `kind` and close the type menu.
    pub fn add_question(&mut self, kind: QuestionKind) {
        self.draft = self.draft.with_question(kind);
        self.add_menu_open = false;
    }

    pub fn update_question(
        &mut self,
        index: usize,
        question: QuestionDraft,
    ) -> Result<(), DraftError> {
        self.draft = self.draft.with_question_replaced(index, question)?;
        Ok(())
    }

    pub fn remove_question(&mut self, index: usize) -> Result<(), DraftError> {
        self.draft = self.draft.without_question(index)?;
        Ok(())
    }

    /// Preview HTML of every question, in order.
    pub fn preview(&self) -> Result<Vec<String>, handlebars::RenderError> {
        self.draft
            .questions
            .iter()
            .enumerate()
            .map(|(i, q)| render::render_draft(q, i + 1, self.draft.color.as_str()))
            .collect()
    }

    /// The payload the current draft would be submitted as.
    pub fn payload(&self) -> Result<SurveyForm, serde_json::Error> {
        SurveyForm::from_draft(&self.draft, self.cover.as_ref(), self.scope)
    }

    /// Send the draft to `backend` and record the outcome as a notice.
    ///
    /// The draft is left as it is either way, so a failed submission can be
    /// sent again unchanged.
    pub async fn submit<B: SurveyBackend>(
        &mut self,
        backend: &B,
    ) -> Result<CreatedSurvey, BackendError> {
        let result = match self.payload() {
            Ok(form) => backend.create_survey(form).await,
            Err(e) => Err(e.into()),
        };

        self.notice = Some(match &result {
            Ok(created) => {
                info!("Published survey {}", created.survey_id);
                Notice::Success {
                    survey_id: created.survey_id,
                    route: self.navbar.listing_route(),
                }
            }
            Err(e) => {
                warn!("Survey submission failed: {e}");
                Notice::Error
            }
        });

        result
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Close the notice. After a success, returns the route to navigate to.
    pub fn dismiss_notice(&mut self) -> Option<&'static str> {
        match self.notice.take() {
            Some(Notice::Success { route, .. }) => Some(route),
            _ => None,
        }
    }
}
