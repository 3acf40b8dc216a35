use survey_studio::{
    ButtonStyle, COLOR_ITEMS, DraftError, Font, HexColor, QuestionDraft, QuestionKind, StyleEdit,
    SurveyDraft, Visibility,
};

fn sample_draft() -> SurveyDraft {
    SurveyDraft::new(7)
        .with_title("점심 메뉴")
        .with_description("오늘 뭐 먹지?")
        .with_deadline("2024-12-31")
        .with_question(QuestionKind::MultipleChoice)
        .with_question(QuestionKind::Subjective)
}

#[test]
fn test_defaults() {
    let draft = SurveyDraft::new(42);
    assert_eq!(draft.user_id, 42);
    assert_eq!(draft.title, "");
    assert_eq!(draft.description, "");
    assert!(draft.open);
    assert_eq!(draft.button_style, ButtonStyle::Angled);
    assert_eq!(draft.color.as_str(), "#918DCA");
    assert_eq!(draft.font, Font::Pretendard);
    assert_eq!(draft.deadline, "");
    assert!(draft.questions.is_empty());
}

#[test]
fn test_each_edit_changes_only_its_field() {
    let before = sample_draft();

    let edits = vec![
        StyleEdit::Title("저녁 메뉴".to_string()),
        StyleEdit::Description("내일은?".to_string()),
        StyleEdit::ButtonStyle(ButtonStyle::Round),
        StyleEdit::Color(HexColor::new("#66C03B").unwrap()),
        StyleEdit::Font(Font::Omyu),
        StyleEdit::Deadline("2025-01-15".to_string()),
        StyleEdit::Visibility(Visibility::Private),
    ];

    for edit in edits {
        let after = before.apply(edit.clone());
        let mut expected = before.clone();
        match edit {
            StyleEdit::Title(v) => expected.title = v,
            StyleEdit::Description(v) => expected.description = v,
            StyleEdit::ButtonStyle(v) => expected.button_style = v,
            StyleEdit::Color(v) => expected.color = v,
            StyleEdit::Font(v) => expected.font = v,
            StyleEdit::Deadline(v) => expected.deadline = v,
            StyleEdit::Visibility(v) => expected.open = v.is_open(),
        }
        assert_eq!(after, expected);
        assert_eq!(
            serde_json::to_string(&after.questions).unwrap(),
            serde_json::to_string(&before.questions).unwrap()
        );
    }
}

#[test]
fn test_edit_sequence_keeps_earlier_edits() {
    let draft = SurveyDraft::new(1)
        .apply(StyleEdit::Title("t".to_string()))
        .apply(StyleEdit::Font(Font::Nps))
        .apply(StyleEdit::Visibility(Visibility::Private))
        .apply(StyleEdit::ButtonStyle(ButtonStyle::Smooth));

    assert_eq!(draft.title, "t");
    assert_eq!(draft.font, Font::Nps);
    assert!(!draft.open);
    assert_eq!(draft.visibility(), Visibility::Private);
    assert_eq!(draft.button_style, ButtonStyle::Smooth);
    assert_eq!(draft.color.as_str(), "#918DCA");
}

#[test]
fn test_apply_leaves_the_source_draft_unchanged() {
    let source = SurveyDraft::new(3);
    let _edited = source.with_title("changed");
    assert_eq!(source.title, "");
}

#[test]
fn test_questions_append_in_order() {
    let kinds = [
        QuestionKind::Dropdown,
        QuestionKind::Subjective,
        QuestionKind::Checkbox,
        QuestionKind::MultipleChoice,
        QuestionKind::Subjective,
    ];
    let draft = kinds
        .iter()
        .fold(SurveyDraft::new(1), |draft, kind| draft.with_question(*kind));

    assert_eq!(draft.questions.len(), kinds.len());
    for (question, kind) in draft.questions.iter().zip(kinds) {
        assert_eq!(question.kind(), kind);
        assert_eq!(question.choices().is_some(), kind.has_choices());
    }
}

#[test]
fn test_replace_and_remove_question() {
    let draft = sample_draft();
    let replacement = QuestionDraft::new(QuestionKind::Checkbox).with_content("토핑");

    let replaced = draft.with_question_replaced(1, replacement.clone()).unwrap();
    assert_eq!(replaced.questions[1], replacement);
    assert_eq!(replaced.questions[0], draft.questions[0]);

    let removed = replaced.without_question(0).unwrap();
    assert_eq!(removed.questions, vec![replacement]);

    assert_eq!(
        draft.with_question_replaced(5, QuestionDraft::new(QuestionKind::Subjective)),
        Err(DraftError::NoSuchQuestion(5))
    );
    assert_eq!(draft.without_question(2), Err(DraftError::NoSuchQuestion(2)));
}

#[test]
fn test_hex_color_validation() {
    for row in COLOR_ITEMS {
        for color in row {
            assert!(HexColor::new(color).is_ok(), "palette color {color} rejected");
        }
    }
    assert!(HexColor::new("#abc").is_ok());
    assert!(HexColor::new("918DCA").is_err());
    assert!(HexColor::new("#12345G").is_err());
    assert!(HexColor::new("").is_err());

    let message = HexColor::new("blue").unwrap_err().to_string();
    assert!(message.contains("#RRGGBB or #RGB"), "{message}");

    let parsed: Result<HexColor, _> = serde_json::from_str("\"red\"");
    assert!(parsed.is_err());
}

#[test]
fn test_enumerations_parse_their_wire_names() {
    for style in ButtonStyle::ALL {
        assert_eq!(ButtonStyle::parse(style.as_str()), Some(style));
    }
    for font in Font::ALL {
        assert_eq!(Font::parse(font.as_str()), Some(font));
    }
    assert_eq!(ButtonStyle::parse("square"), None);
    assert_eq!(Font::parse("comic"), None);
    assert_eq!(ButtonStyle::Smooth.label(), "부드럽게");
    assert_eq!(Font::Tmoney.label(), "티머니 둥근바람");
}

#[test]
fn test_draft_json_field_names() {
    let json = serde_json::to_value(sample_draft()).unwrap();
    assert_eq!(json["userId"], 7);
    assert_eq!(json["buttonStyle"], "angled");
    assert_eq!(json["font"], "pretendard");
    assert_eq!(json["color"], "#918DCA");
    assert_eq!(json["questions"].as_array().unwrap().len(), 2);
}
