use survey_studio::downloader::{to_csv, to_xlsx, workbook_file_name};
use survey_studio::{ListData, ResponseRow};

fn sample_list() -> ListData {
    ListData {
        head: vec!["색상".to_string(), "의견".to_string()],
        rows: vec![
            ResponseRow {
                created_at: "2024-01-01 09:00:00".to_string(),
                responses: vec!["파랑".to_string(), "좋아요, 정말".to_string()],
            },
            ResponseRow {
                created_at: "2024-01-02 10:30:00".to_string(),
                responses: vec!["빨강, 초록".to_string(), "그냥 \"보통\"".to_string()],
            },
        ],
    }
}

#[test]
fn test_csv_export() {
    let csv = to_csv(&sample_list()).unwrap();
    let lines: Vec<&str> = csv.lines().collect();

    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "날짜,Q1. 색상,Q2. 의견");
    assert_eq!(lines[1], "2024-01-01 09:00:00,파랑,\"좋아요, 정말\"");
    assert_eq!(lines[2], "2024-01-02 10:30:00,\"빨강, 초록\",\"그냥 \"\"보통\"\"\"");
}

#[test]
fn test_xlsx_export_is_a_zip_archive() {
    let bytes = to_xlsx(&sample_list()).unwrap();
    assert!(bytes.len() > 4);
    assert_eq!(&bytes[..2], b"PK");

    let empty = to_xlsx(&ListData::default()).unwrap();
    assert_eq!(&empty[..2], b"PK");
}

#[test]
fn test_export_rejects_ragged_rows() {
    let mut list = sample_list();
    list.rows[0].responses.pop();

    assert!(to_csv(&list).is_err());
    assert!(to_xlsx(&list).is_err());
}

#[test]
fn test_workbook_file_name() {
    assert_eq!(workbook_file_name("점심 메뉴"), "점심 메뉴.xlsx");
    assert_eq!(workbook_file_name("a/b: c?"), "a_b_ c_.xlsx");
    assert_eq!(workbook_file_name("  "), "survey.xlsx");
    assert_eq!(workbook_file_name(""), "survey.xlsx");
}

#[test]
fn test_xlsx_rejects_too_many_columns() {
    let list = ListData {
        head: (0..70_000).map(|i| format!("q{i}")).collect(),
        rows: Vec::new(),
    };

    assert!(to_xlsx(&list).is_err());
}
