use criterion::{black_box, criterion_group, criterion_main, Criterion};

use quizrace_core::model::{ExamOutcome, ExamSession, QuestionRecord, TimeLimit};
use quizrace_core::parser::parse_questions_str;
use quizrace_core::scoring::{percentage, score};

fn make_session(n: usize) -> ExamSession {
    let records = (0..n)
        .map(|i| QuestionRecord::new(format!("{i}+{i}"), &(i * 2).to_string()))
        .collect();
    let mut session = ExamSession::new(records, TimeLimit::Disabled);
    session.start();
    for i in 0..n {
        // Every third answer is wrong.
        let answer = if i % 3 == 0 { "x".to_string() } else { (i * 2).to_string() };
        session.record_answer(i, &answer);
    }
    session.finish(ExamOutcome::Completed);
    session
}

fn bench_percentage(c: &mut Criterion) {
    c.bench_function("percentage", |b| {
        b.iter(|| percentage(black_box(337), black_box(1000)))
    });
}

fn bench_score(c: &mut Criterion) {
    let mut group = c.benchmark_group("score");

    for n in [10, 100, 1000] {
        let session = make_session(n);
        group.bench_function(format!("questions={n}"), |b| {
            b.iter(|| score(black_box(&session)))
        });
    }

    group.finish();
}

fn bench_parse(c: &mut Criterion) {
    let csv: String = (0..1000).map(|i| format!("{i}+{i}, {}\n", i * 2)).collect();
    c.bench_function("parse_1000_rows", |b| {
        b.iter(|| parse_questions_str(black_box(&csv)).unwrap())
    });
}

criterion_group!(benches, bench_percentage, bench_score, bench_parse);
criterion_main!(benches);
