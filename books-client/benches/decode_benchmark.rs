use books_client::parse_volumes;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn sample_body(items: usize) -> String {
    let items: Vec<String> = (0..items)
        .map(|i| {
            format!(
                r#"{{"volumeInfo": {{"title": "Test Book {i}", "publishedDate": "{year}-01-01", "averageRating": 4.5, "imageLinks": {{"thumbnail": "http://books.example/{i}.jpg"}}, "authors": ["Test Author {author}"]}}}}"#,
                i = i,
                year = 1800 + i % 200,
                author = i % 50
            )
        })
        .collect();
    format!(
        r#"{{"kind": "books#volumes", "totalItems": {}, "items": [{}]}}"#,
        items.len(),
        items.join(",")
    )
}

fn benchmark_parse_volumes(c: &mut Criterion) {
    let body = sample_body(20);

    c.bench_function("parse_volumes", |b| {
        b.iter(|| parse_volumes(black_box(&body)))
    });
}

fn benchmark_parse_volumes_large(c: &mut Criterion) {
    let body = sample_body(2000);

    c.bench_function("parse_volumes_large", |b| {
        b.iter(|| parse_volumes(black_box(&body)))
    });
}

criterion_group!(benches, benchmark_parse_volumes, benchmark_parse_volumes_large);
criterion_main!(benches);
