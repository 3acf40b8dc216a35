//! HTML rendering of questions.
//!
//! Every question kind renders through the same template, either
//! interactively (reflecting a live [`ResponseInput`]), statically (showing a
//! recorded answer with all inputs disabled) or as an authoring preview.

use handlebars::{Handlebars, RenderError};
use lazy_static::lazy_static;
use serde::Serialize;

use crate::answer::{ExtendedQuestionData, QuestionData};
use crate::draft::Font;
use crate::question::{QuestionDraft, QuestionKind};
use crate::selection::{DROPDOWN_PLACEHOLDER, ResponseInput, Selection};

const QUESTION_TEMPLATE: &str = r#"<div class="question question-{{kind}}" style="box-shadow: 0 0 0.25rem 0.25rem {{color}}40;">
  <div class="question-type"><span>{{kind_label}}</span></div>
  <div class="question-index"><span>Q{{index}}.</span></div>
  <span class="question-content">{{content}}</span>
  {{#if image_url}}<img src="{{image_url}}" alt="Question" style="border: 0.125rem solid {{color}};" />{{/if}}
  {{#if is_dropdown}}<select name="q{{index}}" style="border: 0.0625rem solid {{color}};"{{#if disabled}} disabled{{/if}}>
    <option value=""{{#if none_selected}} selected{{/if}}>{{placeholder}}</option>
    {{#each choices}}<option value="{{id}}"{{#if selected}} selected{{/if}}>{{label}}</option>
    {{/each}}</select>{{/if}}
  {{#if is_choice_list}}<div class="choices">
    {{#each choices}}<button type="button" class="choice{{#if selected}} selected{{/if}}" data-choice-id="{{id}}"{{#if ../disabled}} disabled{{/if}}>{{label}}</button>
    {{/each}}</div>{{/if}}
  {{#if is_subjective}}<textarea name="q{{index}}" rows="4"{{#if disabled}} readonly{{/if}}>{{text}}</textarea>{{/if}}
  {{#if you_selected}}<p class="you-selected">{{you_selected}}</p>{{/if}}
</div>"#;

const PAGE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="ko">
<head>
  <meta charset="utf-8" />
  <title>{{title}}</title>
</head>
<body class="{{font_class}}">
  <h1>{{title}}</h1>
  {{#if description}}<p class="description">{{description}}</p>{{/if}}
  {{#each questions}}<div class="pb-6">{{{this}}}</div>
  {{/each}}
</body>
</html>"#;

lazy_static! {
    static ref TEMPLATES: Handlebars<'static> = {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(false);
        registry
            .register_template_string("question", QUESTION_TEMPLATE)
            .unwrap();
        registry.register_template_string("page", PAGE_TEMPLATE).unwrap();
        registry
    };
}

/// Placeholder shown for a draft question whose text is still empty.
pub const EMPTY_CONTENT_PLACEHOLDER: &str = "질문을 입력해주세요.";

#[derive(Serialize)]
struct ChoiceView<'a> {
    id: u64,
    label: &'a str,
    selected: bool,
}

#[derive(Serialize)]
struct QuestionView<'a> {
    index: usize,
    kind: &'static str,
    kind_label: &'static str,
    content: &'a str,
    image_url: Option<&'a str>,
    color: &'a str,
    choices: Vec<ChoiceView<'a>>,
    is_dropdown: bool,
    is_choice_list: bool,
    is_subjective: bool,
    none_selected: bool,
    placeholder: &'static str,
    disabled: bool,
    text: &'a str,
    you_selected: Option<String>,
}

impl<'a> QuestionView<'a> {
    fn new(kind: QuestionKind, index: usize, content: &'a str, color: &'a str) -> Self {
        QuestionView {
            index,
            kind: kind.as_str(),
            kind_label: kind.label(),
            content,
            image_url: None,
            color,
            choices: Vec::new(),
            is_dropdown: kind == QuestionKind::Dropdown,
            is_choice_list: matches!(kind, QuestionKind::MultipleChoice | QuestionKind::Checkbox),
            is_subjective: kind == QuestionKind::Subjective,
            none_selected: true,
            placeholder: DROPDOWN_PLACEHOLDER,
            disabled: false,
            text: "",
            you_selected: None,
        }
    }

    fn with_choices(mut self, question: &'a QuestionData, selection: &Selection) -> Self {
        self.choices = question
            .choices
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(|c| ChoiceView {
                id: c.choice_id,
                label: &c.option,
                selected: selection.is_selected(c.choice_id),
            })
            .collect();
        self.none_selected = !self.choices.iter().any(|c| c.selected);
        self
    }

    fn render(&self) -> Result<String, RenderError> {
        TEMPLATES.render("question", self)
    }
}

/// Render a question the respondent is answering, reflecting the input's
/// current selection.
pub fn render_response<F>(
    input: &ResponseInput<F>,
    index: usize,
    color: &str,
) -> Result<String, RenderError>
where
    F: FnMut(&Selection),
{
    let question = input.question();
    let selection = input.selection();

    let mut view = QuestionView::new(question.kind, index, &question.content, color)
        .with_choices(question, selection);
    view.image_url = question.image_url.as_deref();
    if let Selection::Text(text) = selection {
        view.text = text;
    }
    view.you_selected = input.you_selected();

    view.render()
}

/// Render a recorded answer read-only. The question itself is never touched.
pub fn render_static(
    question: &ExtendedQuestionData,
    index: usize,
    color: &str,
) -> Result<String, RenderError> {
    let data = &question.question;
    let selection = match data.kind {
        QuestionKind::Dropdown => Selection::Single(question.obj_content.first().copied()),
        QuestionKind::MultipleChoice | QuestionKind::Checkbox => {
            Selection::Many(question.obj_content.iter().copied().collect())
        }
        QuestionKind::Subjective => Selection::Text(question.sub_content.clone()),
    };

    let mut view =
        QuestionView::new(data.kind, index, &data.content, color).with_choices(data, &selection);
    view.image_url = data.image_url.as_deref();
    view.text = &question.sub_content;
    view.disabled = true;

    view.render()
}

/// Render a draft question as the authoring page previews it.
pub fn render_draft(
    question: &QuestionDraft,
    index: usize,
    color: &str,
) -> Result<String, RenderError> {
    let content = if question.content.is_empty() {
        EMPTY_CONTENT_PLACEHOLDER
    } else {
        question.content.as_str()
    };

    let mut view = QuestionView::new(question.kind(), index, content, color);
    view.choices = question
        .choices()
        .unwrap_or_default()
        .iter()
        .map(|c| ChoiceView {
            id: c.id,
            label: &c.label,
            selected: false,
        })
        .collect();
    if !question.image_url.is_empty() {
        view.image_url = Some(&question.image_url);
    }
    view.disabled = true;

    view.render()
}

#[derive(Serialize)]
struct PageView<'a> {
    title: &'a str,
    description: &'a str,
    font_class: &'static str,
    questions: &'a [String],
}

/// Wrap rendered questions in a standalone page.
pub fn render_page(
    title: &str,
    description: &str,
    font: Font,
    questions: &[String],
) -> Result<String, RenderError> {
    TEMPLATES.render(
        "page",
        &PageView {
            title,
            description,
            font_class: font.css_class(),
            questions,
        },
    )
}
