// benches/mark_parse.rs
use criterion::{Criterion, black_box, criterion_group, criterion_main};

use wu_marks::config::options::RowPolicy;
use wu_marks::grades::{self, GradeRow};
use wu_marks::mark::Mark;

const PLAIN: &str = "4.5<br>23.01.20";
const WRAPPED: &str = r#"<span class="ocena">4.0</span><br><span class="ocena">16.02.20</span>"#;

fn bench_marks(c: &mut Criterion) {
    c.bench_function("mark_plain", |b| b.iter(|| Mark::parse(black_box(PLAIN))));
    c.bench_function("mark_wrapped", |b| b.iter(|| Mark::parse(black_box(WRAPPED))));
    c.bench_function("mark_empty", |b| b.iter(|| Mark::parse(black_box("&nbsp;"))));

    let rows: Vec<GradeRow> = (0..200)
        .map(|i| {
            let cell = if i % 3 == 0 { "&nbsp;" } else if i % 2 == 0 { PLAIN } else { WRAPPED };
            GradeRow::new(format!("Subject {}", i / 4), format!("Type {}", i % 4), cell)
        })
        .collect();

    c.bench_function("collect_200_rows", |b| {
        b.iter(|| {
            let table = grades::collect_marks(black_box(rows.clone()), RowPolicy::Abort, None);
            black_box(table.map(|t| t.len()))
        })
    });
}

criterion_group!(benches, bench_marks);
criterion_main!(benches);
