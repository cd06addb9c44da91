// src/grades.rs
//! Folding raw table rows into `subject -> mark type -> Mark`.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::config::options::RowPolicy;
use crate::mark::{Mark, MarkError};
use crate::progress::Progress;

/// Subject name -> mark type label -> mark. Ungraded rows never appear.
pub type GradesTable = BTreeMap<String, BTreeMap<String, Mark>>;

/// The three cells of a grades row the crate cares about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradeRow {
    pub subject: String,
    pub mark_type: String,
    /// Inner HTML of the mark cell, untouched.
    pub cell: String,
}

impl GradeRow {
    pub fn new(
        subject: impl Into<String>,
        mark_type: impl Into<String>,
        cell: impl Into<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            mark_type: mark_type.into(),
            cell: cell.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GradesError {
    #[error("malformed mark for {subject:?} / {mark_type:?}")]
    MalformedCell {
        subject: String,
        mark_type: String,
        #[source]
        source: MarkError,
    },
}

/// Parse every row's mark cell and keep the graded ones.
///
/// A later row with the same subject and mark type replaces the earlier one.
pub fn collect_marks<I>(
    rows: I,
    policy: RowPolicy,
    mut progress: Option<&mut dyn Progress>,
) -> Result<GradesTable, GradesError>
where
    I: IntoIterator<Item = GradeRow>,
{
    let rows = rows.into_iter();
    if let Some(p) = progress.as_deref_mut() {
        p.begin(rows.size_hint().0);
    }

    let mut table = GradesTable::new();
    let mut graded = 0usize;

    for row in rows {
        let GradeRow { subject, mark_type, cell } = row;

        match Mark::parse(&cell) {
            Ok(Some(mark)) => {
                logd!("{subject} / {mark_type}: {mark}");
                if let Some(p) = progress.as_deref_mut() {
                    p.item_done(&subject);
                }
                table.entry(subject).or_default().insert(mark_type, mark);
                graded += 1;
            }
            Ok(None) => {
                logd!("{subject} / {mark_type}: not graded");
                if let Some(p) = progress.as_deref_mut() {
                    p.item_done(&subject);
                }
            }
            Err(source) => match policy {
                RowPolicy::Abort => {
                    if let Some(p) = progress.as_deref_mut() {
                        p.finish();
                    }
                    return Err(GradesError::MalformedCell { subject, mark_type, source });
                }
                RowPolicy::Skip => {
                    loge!("{subject} / {mark_type}: skipped, {source}");
                    if let Some(p) = progress.as_deref_mut() {
                        p.item_skipped(&subject, &source.to_string());
                    }
                }
            },
        }
    }

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }
    logf!("{graded} marks across {} subjects", table.len());
    Ok(table)
}

/// Marks in `current` that `previous` lacks or records differently.
pub fn new_marks<'a>(
    previous: &GradesTable,
    current: &'a GradesTable,
) -> Vec<(&'a str, &'a str, &'a Mark)> {
    let mut out = Vec::new();
    for (subject, marks) in current {
        let before = previous.get(subject);
        for (mark_type, mark) in marks {
            if before.and_then(|m| m.get(mark_type)) != Some(mark) {
                out.push((subject.as_str(), mark_type.as_str(), mark));
            }
        }
    }
    out
}

/// Column names matching [`to_rows`].
pub const EXPORT_HEADERS: [&str; 4] = ["Subject", "Type", "Mark", "Date"];

/// Flatten to `[Subject, Type, Mark, Date]` rows, ISO dates, sorted by subject then type.
pub fn to_rows(table: &GradesTable) -> Vec<Vec<String>> {
    table
        .iter()
        .flat_map(|(subject, marks)| {
            marks.iter().map(move |(mark_type, mark)| {
                row![subject, mark_type, mark.value(), mark.date().format("%Y-%m-%d")]
            })
        })
        .collect()
}
