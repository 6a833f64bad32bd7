use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use toml_fmt::{toml, ArrayFormat, ArrayStyle, TomlMap, Value};

fn flat_table() -> Value {
    toml!({
        "title": "benchmark",
        "count": 12345,
        "ratio": 0.75,
        "active": true,
        "name": "a reasonably long string value"
    })
}

fn nested_document() -> Value {
    toml!({
        "title": "benchmark",
        "owner": {
            "name": "Tom",
            "roles": ["admin", "ops", "dev"]
        },
        "database": {
            "host": "localhost",
            "port": 5432,
            "limits": {
                "connections": 100,
                "timeout": 30
            }
        }
    })
}

fn array_of_tables(size: usize) -> Value {
    let elements = (0..size)
        .map(|i| {
            let mut entry = TomlMap::new();
            entry.insert("id".to_string(), Value::integer(i as i64));
            entry.insert("name".to_string(), Value::string(format!("item {}", i)));
            entry.insert("price".to_string(), Value::floating(9.99 + i as f64));
            Value::table(entry)
        })
        .collect();
    let mut root = TomlMap::new();
    root.insert("item".to_string(), Value::array(elements));
    Value::table(root)
}

fn long_array(size: usize) -> Value {
    let elements = (0..size).map(|i| Value::integer(i as i64)).collect();
    let mut root = TomlMap::new();
    root.insert(
        "data".to_string(),
        Value::array_formatted(
            elements,
            ArrayFormat {
                style: ArrayStyle::Multiline,
                ..ArrayFormat::default()
            },
        ),
    );
    Value::table(root)
}

fn benchmark_serialize_flat(c: &mut Criterion) {
    let doc = flat_table();
    c.bench_function("serialize_flat_table", |b| {
        b.iter(|| toml_fmt::to_string(black_box(&doc)))
    });
}

fn benchmark_serialize_nested(c: &mut Criterion) {
    let doc = nested_document();
    c.bench_function("serialize_nested_document", |b| {
        b.iter(|| toml_fmt::to_string(black_box(&doc)))
    });
}

fn benchmark_serialize_array_of_tables(c: &mut Criterion) {
    let mut group = c.benchmark_group("serialize_array_of_tables");
    for size in [10, 50, 100, 500] {
        let doc = array_of_tables(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &doc, |b, doc| {
            b.iter(|| toml_fmt::to_string(black_box(doc)))
        });
    }
    group.finish();
}

fn benchmark_serialize_long_array(c: &mut Criterion) {
    let mut group = c.benchmark_group("serialize_long_array");
    for size in [100, 1000, 10000] {
        let doc = long_array(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &doc, |b, doc| {
            b.iter(|| toml_fmt::to_string(black_box(doc)))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    benchmark_serialize_flat,
    benchmark_serialize_nested,
    benchmark_serialize_array_of_tables,
    benchmark_serialize_long_array
);
criterion_main!(benches);
