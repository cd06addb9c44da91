// tests/grades_fold.rs
//
// Folding table rows into subject -> type -> mark, and spotting new marks.
//
use chrono::NaiveDate;
use wu_marks::config::options::RowPolicy;
use wu_marks::grades::{self, GradeRow, GradesError, GradesTable};
use wu_marks::mark::{Mark, MarkError};
use wu_marks::progress::Progress;

fn rows() -> Vec<GradeRow> {
    vec![
        GradeRow::new("Analiza matematyczna", "Ćwiczenia", "4.5<br>23.01.20"),
        GradeRow::new("Analiza matematyczna", "Wykład", "&nbsp;"),
        GradeRow::new(
            "Fizyka",
            "Egzamin",
            r#"<span class="ocena">4.0</span><br><span class="ocena">16.02.20</span>"#,
        ),
        GradeRow::new("Wychowanie fizyczne", "Zaliczenie", "&nbsp;"),
    ]
}

#[derive(Default)]
struct Recorder {
    total: Option<usize>,
    done: Vec<String>,
    skipped: Vec<String>,
    finished: bool,
}

impl Progress for Recorder {
    fn begin(&mut self, total: usize) { self.total = Some(total); }
    fn item_done(&mut self, subject: &str) { self.done.push(subject.into()); }
    fn item_skipped(&mut self, subject: &str, _reason: &str) { self.skipped.push(subject.into()); }
    fn finish(&mut self) { self.finished = true; }
}

#[test]
fn ungraded_rows_are_dropped() {
    let table = grades::collect_marks(rows(), RowPolicy::Abort, None).unwrap();

    assert_eq!(table.len(), 2);
    assert!(!table.contains_key("Wychowanie fizyczne"));

    let analiza = &table["Analiza matematyczna"];
    assert_eq!(analiza.len(), 1);
    assert!(!analiza.contains_key("Wykład"));
    assert_eq!(analiza["Ćwiczenia"].value(), "4.5");

    let fizyka = &table["Fizyka"]["Egzamin"];
    assert_eq!(fizyka.value(), "4.0");
    assert_eq!(fizyka.date(), NaiveDate::from_ymd_opt(2020, 2, 16).unwrap());
}

#[test]
fn later_row_wins_on_same_key() {
    let rows = vec![
        GradeRow::new("Fizyka", "Egzamin", "2.0<br>01.02.20"),
        GradeRow::new("Fizyka", "Egzamin", "3.5<br>15.02.20"),
    ];
    let table = grades::collect_marks(rows, RowPolicy::Abort, None).unwrap();
    assert_eq!(table["Fizyka"]["Egzamin"].value(), "3.5");
}

#[test]
fn malformed_cell_aborts_by_default() {
    let mut rows = rows();
    rows.insert(1, GradeRow::new("Chemia", "Laboratorium", "zal."));

    let err = grades::collect_marks(rows, RowPolicy::default(), None).unwrap_err();
    assert_eq!(
        err,
        GradesError::MalformedCell {
            subject: "Chemia".into(),
            mark_type: "Laboratorium".into(),
            source: MarkError::Format("zal.".into()),
        }
    );
}

#[test]
fn skip_policy_drops_malformed_rows() {
    let mut rows = rows();
    rows.insert(1, GradeRow::new("Chemia", "Laboratorium", "zal."));

    let mut rec = Recorder::default();
    let table = grades::collect_marks(rows, RowPolicy::Skip, Some(&mut rec)).unwrap();

    assert!(!table.contains_key("Chemia"));
    assert_eq!(table.len(), 2);
    assert_eq!(rec.total, Some(5));
    assert_eq!(rec.done.len(), 4);
    assert_eq!(rec.skipped, vec!["Chemia".to_string()]);
    assert!(rec.finished);
}

#[test]
fn empty_input_gives_empty_table() {
    let table = grades::collect_marks(Vec::new(), RowPolicy::Abort, None).unwrap();
    assert!(table.is_empty());
}

#[test]
fn new_marks_lists_added_and_changed() {
    let before = grades::collect_marks(rows(), RowPolicy::Abort, None).unwrap();

    let mut later = rows();
    later[1] = GradeRow::new("Analiza matematyczna", "Wykład", "5.0<br>30.01.20");
    later[2] = GradeRow::new("Fizyka", "Egzamin", "4.5<br>20.02.20");
    let after = grades::collect_marks(later, RowPolicy::Abort, None).unwrap();

    let fresh: Vec<(&str, &str, &str)> = grades::new_marks(&before, &after)
        .into_iter()
        .map(|(s, t, m)| (s, t, m.value()))
        .collect();
    assert_eq!(
        fresh,
        vec![
            ("Analiza matematyczna", "Wykład", "5.0"),
            ("Fizyka", "Egzamin", "4.5"),
        ]
    );

    assert!(grades::new_marks(&after, &after).is_empty());
    assert_eq!(grades::new_marks(&GradesTable::new(), &after).len(), 3);
}

#[test]
fn rows_flatten_sorted_with_iso_dates() {
    let table = grades::collect_marks(rows(), RowPolicy::Abort, None).unwrap();
    assert_eq!(
        grades::to_rows(&table),
        vec![
            vec!["Analiza matematyczna", "Ćwiczenia", "4.5", "2020-01-23"],
            vec!["Fizyka", "Egzamin", "4.0", "2020-02-16"],
        ]
    );
}

#[test]
fn parsing_is_thread_safe() {
    let cells = ["4.5<br>23.01.20", "&nbsp;", "3.0<br>01.02.21"];
    let handles: Vec<_> = (0..4)
        .map(|_| std::thread::spawn(move || cells.map(|c| Mark::parse(c).unwrap())))
        .collect();
    let first = Mark::parse(cells[0]).unwrap();
    for h in handles {
        let out = h.join().unwrap();
        assert_eq!(out[0], first);
        assert_eq!(out[1], None);
    }
}
