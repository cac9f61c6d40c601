use criterion::{criterion_group, criterion_main, Criterion};
use errors::LoxErrors;

pub fn criterion_benchmark(c: &mut Criterion) {
    let source = "(1 + 2) * -3 / (4 - 5) >= 6 == !(7 < 8 + 9 * 10) != nil";
    let tokens = scanner::scan(source).unwrap();
    c.bench_function("flat expression", |b| {
        b.iter(|| parser::parse(&tokens, &mut LoxErrors::default()).unwrap())
    });

    let nested = format!("{}1{}", "(".repeat(100), " + 1)".repeat(100));
    let tokens = scanner::scan(&nested).unwrap();
    c.bench_function("deeply nested groupings", |b| {
        b.iter(|| parser::parse(&tokens, &mut LoxErrors::default()).unwrap())
    });

    let long_chain = (0..1000).map(|i| i.to_string()).collect::<Vec<_>>().join(" - ");
    c.bench_function("scan and parse long chain", |b| {
        b.iter(|| {
            let tokens = scanner::scan(&long_chain).unwrap();
            parser::parse(&tokens, &mut LoxErrors::default()).unwrap().to_string()
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
