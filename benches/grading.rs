use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};

use smartcheck::{AnswerKey, LexicalOracle, RawTable, grade, normalize};

fn wide_table(students: usize, questions: usize) -> RawTable {
    let mut columns = vec!["studentID".to_string()];
    columns.extend((1..=questions).map(|q| format!("Q{q}")));

    let rows = (1..=students)
        .map(|s| {
            let mut row = vec![Some(format!("{s:04}"))];
            row.extend(
                (1..=questions).map(|q| Some(format!("student {s} explains concept {q} briefly"))),
            );
            row
        })
        .collect();

    RawTable::new(columns, rows)
}

fn bench_normalize(c: &mut Criterion) {
    let table = wide_table(500, 20);
    c.bench_function("normalize_plain_wide_500x20", |b| {
        b.iter(|| normalize(black_box(&table)))
    });
}

fn bench_grade_lexical(c: &mut Criterion) {
    let rows = normalize(&wide_table(200, 10)).unwrap_or_default();
    let key: AnswerKey = (1..=10)
        .map(|q| (format!("Q{q}"), format!("the reference explanation of concept {q}")))
        .collect();
    let oracle = LexicalOracle::new();

    c.bench_function("grade_lexical_2000_answers", |b| {
        b.iter(|| grade(black_box(&rows), &key, &oracle))
    });
}

criterion_group!(benches, bench_normalize, bench_grade_lexical);
criterion_main!(benches);
