use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::answer::ListData;
use crate::error::ResultError;

/// Field and header of the date column.
pub const DATE_FIELD: &str = "날짜";
pub const DATE_COLUMN_WIDTH: u32 = 200;
pub const QUESTION_COLUMN_WIDTH: u32 = 150;
pub const PAGE_SIZE: usize = 10;

/// Field id of the question column at `index` (0-based): `Q1`, `Q2`, ...
pub fn question_field(index: usize) -> String {
    format!("Q{}", index + 1)
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridColumn {
    pub field: String,
    pub header_name: String,
    pub width: u32,
}

/// One respondent's row. Serializes flat: `{id, 날짜, Q1, Q2, ...}`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridRow {
    pub id: usize,
    pub date: String,
    pub cells: Vec<(String, String)>,
}

impl GridRow {
    /// Value of column `field`, date column included.
    pub fn get(&self, field: &str) -> Option<&str> {
        if field == DATE_FIELD {
            return Some(&self.date);
        }
        self.cells
            .iter()
            .find(|(f, _)| f == field)
            .map(|(_, v)| v.as_str())
    }
}

impl Serialize for GridRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.cells.len() + 2))?;
        map.serialize_entry("id", &self.id)?;
        map.serialize_entry(DATE_FIELD, &self.date)?;
        for (field, value) in &self.cells {
            map.serialize_entry(field, value)?;
        }
        map.end()
    }
}

/// Tabular projection of an answer list: a date column plus one column per
/// question, one row per respondent.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ResultGrid {
    pub columns: Vec<GridColumn>,
    pub rows: Vec<GridRow>,
}

impl ResultGrid {
    pub fn from_list(list: &ListData) -> Result<Self, ResultError> {
        list.validate()?;

        let mut columns = vec![GridColumn {
            field: DATE_FIELD.to_string(),
            header_name: DATE_FIELD.to_string(),
            width: DATE_COLUMN_WIDTH,
        }];
        columns.extend(list.head.iter().enumerate().map(|(i, question)| {
            let field = question_field(i);
            GridColumn {
                header_name: format!("{field}. {question}"),
                field,
                width: QUESTION_COLUMN_WIDTH,
            }
        }));

        let rows = list
            .rows
            .iter()
            .enumerate()
            .map(|(i, row)| GridRow {
                id: i + 1,
                date: row.created_at.clone(),
                cells: row
                    .responses
                    .iter()
                    .enumerate()
                    .map(|(j, response)| (question_field(j), response.clone()))
                    .collect(),
            })
            .collect();

        Ok(ResultGrid { columns, rows })
    }

    pub fn fields(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.field.as_str()).collect()
    }

    pub fn page_count(&self) -> usize {
        self.rows.len().div_ceil(PAGE_SIZE)
    }

    /// Rows on page `page` (0-based); empty past the last page.
    pub fn page(&self, page: usize) -> &[GridRow] {
        let start = page.saturating_mul(PAGE_SIZE).min(self.rows.len());
        let end = (start + PAGE_SIZE).min(self.rows.len());
        &self.rows[start..end]
    }
}
