use std::cell::RefCell;

use survey_studio::{
    Answer, ChoiceData, DROPDOWN_NONE, QuestionData, QuestionKind, ResponseInput, Selection,
    SelectionError,
};

fn question(kind: QuestionKind, labels: &[&str]) -> QuestionData {
    QuestionData {
        question_id: 1,
        kind,
        content: "좋아하는 색은?".to_string(),
        image_url: None,
        choices: kind.has_choices().then(|| {
            labels
                .iter()
                .enumerate()
                .map(|(i, label)| ChoiceData {
                    choice_id: (i + 1) as u64,
                    option: label.to_string(),
                })
                .collect()
        }),
    }
}

#[test]
fn test_multiple_choice_replaces_previous_pick() {
    let seen = RefCell::new(Vec::new());
    let mut input = ResponseInput::new(
        question(QuestionKind::MultipleChoice, &["빨강", "파랑", "초록"]),
        |s: &Selection| seen.borrow_mut().push(s.clone()),
    );

    assert_eq!(input.you_selected(), None);
    input.select(1).unwrap();
    input.select(3).unwrap();

    assert_eq!(input.selection(), &Selection::Single(Some(3)));
    assert_eq!(input.selected_labels(), vec!["초록"]);
    assert_eq!(input.you_selected().as_deref(), Some("You selected: 초록"));
    assert_eq!(input.answer(), Answer::Choices(vec![3]));

    drop(input);
    assert_eq!(
        seen.into_inner(),
        vec![Selection::Single(Some(1)), Selection::Single(Some(3))]
    );
}

#[test]
fn test_checkbox_toggles_and_lists_every_label() {
    let mut input = ResponseInput::new(
        question(QuestionKind::Checkbox, &["치즈", "페퍼로니", "버섯"]),
        |_: &Selection| {},
    );

    input.select(3).unwrap();
    input.select(1).unwrap();
    assert_eq!(
        input.you_selected().as_deref(),
        Some("You selected: 치즈, 버섯")
    );

    // Selecting again deselects.
    input.select(3).unwrap();
    assert_eq!(input.selected_labels(), vec!["치즈"]);

    input.select(1).unwrap();
    assert!(input.selection().is_empty());
    assert_eq!(input.you_selected(), None);
    assert_eq!(input.answer(), Answer::Skipped);
}

#[test]
fn test_unknown_choice_is_rejected_without_callback() {
    let calls = RefCell::new(0);
    let mut input = ResponseInput::new(
        question(QuestionKind::MultipleChoice, &["a"]),
        |_: &Selection| *calls.borrow_mut() += 1,
    );

    assert_eq!(input.select(9).err(), Some(SelectionError::UnknownChoice(9)));
    assert_eq!(input.selection(), &Selection::Single(None));
    drop(input);
    assert_eq!(calls.into_inner(), 0);
}

#[test]
fn test_dropdown_sentinel_clears_the_pick() {
    let mut input = ResponseInput::new(
        question(QuestionKind::Dropdown, &["10대", "20대", "30대"]),
        |_: &Selection| {},
    );

    input.choose_option("2").unwrap();
    assert_eq!(input.selection(), &Selection::Single(Some(2)));
    assert_eq!(input.you_selected().as_deref(), Some("You selected: 20대"));

    input.choose_option(DROPDOWN_NONE).unwrap();
    assert_eq!(input.selection(), &Selection::Single(None));
    assert_eq!(input.you_selected(), None);

    assert_eq!(
        input.choose_option("abc").err(),
        Some(SelectionError::InvalidOption("abc".to_string()))
    );
    assert_eq!(
        input.choose_option("7").err(),
        Some(SelectionError::UnknownChoice(7))
    );
}

#[test]
fn test_subjective_takes_text_only() {
    let mut input = ResponseInput::new(question(QuestionKind::Subjective, &[]), |_: &Selection| {});

    assert_eq!(input.select(1).err(), Some(SelectionError::WrongKind));
    assert_eq!(input.choose_option("1").err(), Some(SelectionError::WrongKind));

    input.write("맛있어요").unwrap();
    assert_eq!(input.selection(), &Selection::Text("맛있어요".to_string()));
    assert_eq!(input.you_selected(), None);
    assert_eq!(input.answer(), Answer::Text("맛있어요".to_string()));
}

#[test]
fn test_choice_questions_reject_text() {
    let mut input = ResponseInput::new(
        question(QuestionKind::Checkbox, &["a", "b"]),
        |_: &Selection| {},
    );
    assert_eq!(input.write("hello").err(), Some(SelectionError::WrongKind));
}

#[test]
fn test_answers_fit_their_question() {
    let single = question(QuestionKind::MultipleChoice, &["a", "b"]);
    let many = question(QuestionKind::Checkbox, &["a", "b"]);
    let text = question(QuestionKind::Subjective, &[]);

    assert!(Answer::Choices(vec![1]).fits(&single));
    assert!(!Answer::Choices(vec![1, 2]).fits(&single));
    assert!(Answer::Choices(vec![1, 2]).fits(&many));
    assert!(!Answer::Choices(vec![5]).fits(&many));
    assert!(!Answer::Text("x".to_string()).fits(&single));
    assert!(Answer::Text("x".to_string()).fits(&text));
    assert!(!Answer::Choices(vec![1]).fits(&text));
    assert!(Answer::Skipped.fits(&single));

    assert_eq!(Answer::Choices(vec![2, 1]).display(&many), "b, a");
    assert_eq!(Answer::Skipped.display(&many), "");
}

#[test]
fn test_question_data_json_omits_absent_fields() {
    let subjective = question(QuestionKind::Subjective, &[]);
    let json = serde_json::to_value(&subjective).unwrap();
    assert_eq!(json["questionId"], 1);
    assert!(json.get("imageUrl").is_none());
    assert!(json.get("choices").is_none());

    let parsed: QuestionData = serde_json::from_value(json).unwrap();
    assert_eq!(parsed, subjective);

    let dropdown = question(QuestionKind::Dropdown, &["빨강"]);
    let json = serde_json::to_value(&dropdown).unwrap();
    assert_eq!(json["choices"][0]["option"], "빨강");
    assert_eq!(serde_json::from_value::<QuestionData>(json).unwrap(), dropdown);
}
