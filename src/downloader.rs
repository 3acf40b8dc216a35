use crate::answer::ListData;
use crate::results::{DATE_FIELD, question_field};
use std::error::Error;

/// MIME type of the exported workbook.
pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Header row shared by the CSV and XLSX exports: the date column followed by
/// `Q1. <question>`, `Q2. <question>`, ...
fn header_row(list: &ListData) -> Vec<String> {
    let mut header = vec![DATE_FIELD.to_string()];
    header.extend(
        list.head
            .iter()
            .enumerate()
            .map(|(i, question)| format!("{}. {}", question_field(i), question)),
    );
    header
}

fn push_csv_field(out: &mut String, value: &str) {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        let escaped = value.replace('"', "\"\"");
        out.push_str(&format!("\"{}\"", escaped));
    } else {
        out.push_str(value);
    }
}

/// Convert an answer list to CSV
///
/// One header line, then one line per respondent. Fields containing commas,
/// quotes or newlines are quoted with inner quotes doubled.
///
/// # Errors
/// * Returns an error if a row does not line up with the header
pub fn to_csv(list: &ListData) -> Result<String, Box<dyn Error>> {
    list.validate()?;
    let mut csv_content = String::new();

    for (i, field) in header_row(list).iter().enumerate() {
        if i > 0 {
            csv_content.push(',');
        }
        push_csv_field(&mut csv_content, field);
    }
    csv_content.push('\n');

    for row in &list.rows {
        push_csv_field(&mut csv_content, &row.created_at);
        for response in &row.responses {
            csv_content.push(',');
            push_csv_field(&mut csv_content, response);
        }
        csv_content.push('\n');
    }

    Ok(csv_content)
}

/// Convert an answer list to XLSX
///
/// Writes the header row in bold, then every respondent's answers as text
/// cells, using rust_xlsxwriter.
///
/// # Returns
/// * `Result<Vec<u8>, Box<dyn Error>>` - XLSX file content as bytes or an error
pub fn to_xlsx(list: &ListData) -> Result<Vec<u8>, Box<dyn Error>> {
    use rust_xlsxwriter::{Format, Workbook, Worksheet};

    list.validate()?;

    let mut workbook = Workbook::new();
    let mut worksheet = Worksheet::new();
    let bold = Format::new().set_bold();

    for (c, header) in header_row(list).iter().enumerate() {
        let col = u16::try_from(c)?;
        worksheet.write_string_with_format(0, col, header, &bold)?;
        worksheet.set_column_width(col, if c == 0 { 20.0 } else { 15.0 })?;
    }

    for (r, row) in list.rows.iter().enumerate() {
        let r = u32::try_from(r + 1)?;
        worksheet.write_string(r, 0, &row.created_at)?;
        for (c, response) in row.responses.iter().enumerate() {
            worksheet.write_string(r, u16::try_from(c + 1)?, response)?;
        }
    }

    workbook.push_worksheet(worksheet);
    let buffer = workbook.save_to_buffer()?;

    Ok(buffer)
}

/// File name the workbook for `title` is saved under: `<title>.xlsx`.
///
/// Path separators and other characters file systems reject become `_`; an
/// empty title falls back to `survey`.
pub fn workbook_file_name(title: &str) -> String {
    let cleaned: String = title
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    if cleaned.is_empty() {
        "survey.xlsx".to_string()
    } else {
        format!("{cleaned}.xlsx")
    }
}
