// src/specs/marks.rs
//! Scraping spec for the grades page (`OcenyP.aspx`).
//!
//! Layout:
//! ```text
//! <table id="...dgDane">
//!   <tbody>
//!     <tr class="gridDane"> subject | . | mark type | . | mark cell | ... </tr>
//! ```
//! Header and pager rows carry other classes and are skipped.

use crate::config::consts::{MARK_COL, MARK_TYPE_COL, MARKS_ROW_CLASS, MARKS_TABLE_ID, SUBJECT_COL};
use crate::core::html::{self, has_class, inner_after_open_tag, next_tag_block_ci, open_tag};
use crate::core::sanitize::cell_text;
use crate::grades::GradeRow;

use super::PageError;

/// Read every data row of the grades table.
pub fn extract_rows(doc: &str) -> Result<Vec<GradeRow>, PageError> {
    let table = html::find_block_by_id(doc, "table", MARKS_TABLE_ID).ok_or_else(|| {
        PageError::ElementNotFound { tag: "table", id: s!(MARKS_TABLE_ID) }
    })?;

    // Rows live in <tbody> when the page has one
    let body = match next_tag_block_ci(table, "tbody", 0) {
        Some((b, e)) => &table[b..e],
        None => table,
    };

    let needed = SUBJECT_COL.max(MARK_TYPE_COL).max(MARK_COL) + 1;
    let mut rows = Vec::new();

    for (index, tr) in html::tag_blocks_ci(body, "tr").into_iter().enumerate() {
        if !has_class(open_tag(tr), MARKS_ROW_CLASS) {
            continue;
        }

        let cells: Vec<&str> = html::tag_blocks_ci(tr, "td")
            .into_iter()
            .map(inner_after_open_tag)
            .collect();
        if cells.len() < needed {
            return Err(PageError::ShortRow { index, cells: cells.len(), expected: needed });
        }

        rows.push(GradeRow::new(
            cell_text(cells[SUBJECT_COL]),
            cell_text(cells[MARK_TYPE_COL]),
            cells[MARK_COL],
        ));
    }

    logd!("grades table: {} data rows", rows.len());
    Ok(rows)
}
