use survey_studio::render::{
    EMPTY_CONTENT_PLACEHOLDER, render_draft, render_page, render_response, render_static,
};
use survey_studio::{
    Answer, ChoiceData, ExtendedQuestionData, Font, QuestionData, QuestionDraft, QuestionKind,
    ResponseInput, Selection,
};

const COLOR: &str = "#918DCA";

fn question(kind: QuestionKind) -> QuestionData {
    QuestionData {
        question_id: 1,
        kind,
        content: "점심 메뉴".to_string(),
        image_url: None,
        choices: kind.has_choices().then(|| {
            vec![
                ChoiceData {
                    choice_id: 1,
                    option: "김밥".to_string(),
                },
                ChoiceData {
                    choice_id: 2,
                    option: "라면".to_string(),
                },
            ]
        }),
    }
}

#[test]
fn test_response_render_for_every_kind() {
    for kind in QuestionKind::ALL {
        let input = ResponseInput::new(question(kind), |_: &Selection| {});
        let html = render_response(&input, 3, COLOR).unwrap();

        assert!(html.contains(&format!("question-{}", kind.as_str())));
        assert!(html.contains(kind.label()));
        assert!(html.contains("Q3."));
        assert!(html.contains("점심 메뉴"));
        assert!(!html.contains("you-selected"));
        assert!(!html.contains("disabled"));

        match kind {
            QuestionKind::Subjective => {
                assert!(html.contains("<textarea"));
                assert!(!html.contains("김밥"));
            }
            QuestionKind::Dropdown => {
                assert!(html.contains("<select"));
                assert!(html.contains("선택..."));
                assert!(html.contains(r#"<option value="2">라면</option>"#));
            }
            _ => {
                assert!(html.contains(r#"data-choice-id="1""#));
                assert!(html.contains("라면"));
            }
        }
    }
}

#[test]
fn test_response_render_reflects_selection() {
    let mut input = ResponseInput::new(question(QuestionKind::Checkbox), |_: &Selection| {});
    input.select(1).unwrap();
    input.select(2).unwrap();

    let html = render_response(&input, 1, COLOR).unwrap();
    assert!(html.contains("You selected: 김밥, 라면"));
    assert_eq!(html.matches("choice selected").count(), 2);

    let mut dropdown = ResponseInput::new(question(QuestionKind::Dropdown), |_: &Selection| {});
    dropdown.choose_option("2").unwrap();
    let html = render_response(&dropdown, 1, COLOR).unwrap();
    assert!(html.contains(r#"<option value="2" selected>라면</option>"#));
    assert!(html.contains(r#"<option value="">선택...</option>"#));
}

#[test]
fn test_static_render_is_disabled_and_shows_the_answer() {
    let checkbox = ExtendedQuestionData::new(
        question(QuestionKind::Checkbox),
        &Answer::Choices(vec![2]),
    );
    let html = render_static(&checkbox, 1, COLOR).unwrap();
    assert_eq!(html.matches(" disabled").count(), 2);
    assert_eq!(html.matches("choice selected").count(), 1);
    assert!(html.contains(r#"class="choice selected" data-choice-id="2""#));

    let dropdown = ExtendedQuestionData::new(
        question(QuestionKind::Dropdown),
        &Answer::Choices(vec![1]),
    );
    let html = render_static(&dropdown, 2, COLOR).unwrap();
    assert!(html.contains(" disabled"));
    assert!(html.contains(r#"<option value="1" selected>김밥</option>"#));

    let text = ExtendedQuestionData::new(
        question(QuestionKind::Subjective),
        &Answer::Text("국밥이 최고".to_string()),
    );
    let html = render_static(&text, 3, COLOR).unwrap();
    assert!(html.contains("readonly"));
    assert!(html.contains("국밥이 최고"));
    assert_eq!(text.question, question(QuestionKind::Subjective));
}

#[test]
fn test_draft_preview_uses_placeholder_and_image() {
    let mut draft = QuestionDraft::new(QuestionKind::MultipleChoice);
    let html = render_draft(&draft, 1, COLOR).unwrap();
    assert!(html.contains(EMPTY_CONTENT_PLACEHOLDER));
    assert!(!html.contains("<img"));

    draft.add_choice("예").unwrap();
    let draft = draft
        .with_content("동의하십니까?")
        .with_image_url("/images/cover.png");
    let html = render_draft(&draft, 1, COLOR).unwrap();
    assert!(html.contains("동의하십니까?"));
    assert!(html.contains(r#"<img src="/images/cover.png""#));
    assert!(html.contains("예"));
}

#[test]
fn test_question_text_is_escaped() {
    let mut data = question(QuestionKind::Subjective);
    data.content = "<script>alert(1)</script>".to_string();
    let input = ResponseInput::new(data, |_: &Selection| {});

    let html = render_response(&input, 1, COLOR).unwrap();
    assert!(!html.contains("<script>"));
    assert!(html.contains("&lt;script&gt;"));
}

#[test]
fn test_page_wraps_rendered_questions() {
    let input = ResponseInput::new(question(QuestionKind::MultipleChoice), |_: &Selection| {});
    let rendered = vec![render_response(&input, 1, COLOR).unwrap()];

    let page = render_page("설문", "설명입니다", Font::Omyu, &rendered).unwrap();
    assert!(page.contains("<title>설문</title>"));
    assert!(page.contains(r#"class="font-omyuFont""#));
    assert!(page.contains("설명입니다"));
    assert!(page.contains(r#"data-choice-id="1""#));
}
