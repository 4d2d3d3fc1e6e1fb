//! Benchmarks for the cleaning-and-integration pipeline.

#![allow(clippy::unwrap_used, clippy::expect_used, missing_docs)]

use std::hint::black_box;
use std::sync::Arc;

use arrow::{
    array::{Float64Array, Int64Array, RecordBatch, StringArray},
    datatypes::{DataType, Field, Schema},
};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use varejo::Pipeline;

fn customers(rows: usize) -> RecordBatch {
    let schema = Arc::new(Schema::new(vec![
        Field::new("id", DataType::Int64, false),
        Field::new("email", DataType::Utf8, true),
        Field::new("age", DataType::Int64, true),
        Field::new("active_flag", DataType::Utf8, true),
        Field::new("city", DataType::Utf8, true),
        Field::new("state", DataType::Utf8, true),
        Field::new("registration_date", DataType::Utf8, true),
        Field::new("phone", DataType::Utf8, true),
        Field::new("monthly_income", DataType::Float64, true),
    ]));
    #[allow(clippy::cast_possible_wrap)]
    let ids: Vec<i64> = (0..rows as i64).collect();
    let emails: Vec<String> = ids.iter().map(|i| format!("user{i}email.com")).collect();
    let ages: Vec<i64> = ids.iter().map(|i| 15 + (i % 90)).collect();
    let flags: Vec<&str> = ids
        .iter()
        .map(|i| ["sim", "Yes", "n", "talvez"][(*i % 4) as usize])
        .collect();
    let cities: Vec<&str> = ids
        .iter()
        .map(|i| ["Manaus", "Curitiba", "Atlantis"][(*i % 3) as usize])
        .collect();
    #[allow(clippy::cast_precision_loss)]
    let incomes: Vec<f64> = ids.iter().map(|i| (*i as f64) - 500.0).collect();
    RecordBatch::try_new(
        schema,
        vec![
            Arc::new(Int64Array::from(ids.clone())),
            Arc::new(StringArray::from(emails)),
            Arc::new(Int64Array::from(ages)),
            Arc::new(StringArray::from(flags)),
            Arc::new(StringArray::from(cities)),
            Arc::new(StringArray::from(vec!["XX"; rows])),
            Arc::new(StringArray::from(vec!["2024-01-15"; rows])),
            Arc::new(StringArray::from(vec![None::<&str>; rows])),
            Arc::new(Float64Array::from(incomes)),
        ],
    )
    .expect("Failed to create batch")
}

fn sales(rows: usize, num_customers: usize) -> RecordBatch {
    let schema = Arc::new(Schema::new(vec![
        Field::new("customer_id", DataType::Int64, false),
        Field::new("product_name", DataType::Utf8, false),
        Field::new("seller", DataType::Utf8, false),
        Field::new("quantity", DataType::Int64, false),
        Field::new("unit_price", DataType::Float64, false),
        Field::new("sale_date", DataType::Utf8, true),
    ]));
    #[allow(clippy::cast_possible_wrap)]
    let ids: Vec<i64> = (0..rows as i64)
        .map(|i| i % num_customers as i64)
        .collect();
    let products: Vec<String> = (0..rows).map(|i| format!("product_{}", i % 50)).collect();
    #[allow(clippy::cast_possible_wrap)]
    let quantities: Vec<i64> = (0..rows as i64).map(|i| (i % 7) - 1).collect();
    RecordBatch::try_new(
        schema,
        vec![
            Arc::new(Int64Array::from(ids)),
            Arc::new(StringArray::from(products)),
            Arc::new(StringArray::from(vec!["Ana"; rows])),
            Arc::new(Int64Array::from(quantities)),
            Arc::new(Float64Array::from(vec![19.99; rows])),
            Arc::new(StringArray::from(vec!["2024-06-01"; rows])),
        ],
    )
    .expect("Failed to create batch")
}

fn products() -> RecordBatch {
    let schema = Arc::new(Schema::new(vec![
        Field::new("name", DataType::Utf8, false),
        Field::new("cost_price", DataType::Utf8, true),
        Field::new("stock_date", DataType::Utf8, true),
        Field::new("current_stock", DataType::Int64, true),
        Field::new("category", DataType::Utf8, true),
    ]));
    let names: Vec<String> = (0..50).map(|i| format!("product_{i}")).collect();
    let stocks: Vec<i64> = (0..50i64).map(|i| i - 10).collect();
    let categories: Vec<&str> = (0..50usize)
        .map(|i| ["Informática", "Telefonia", "Livros"][i % 3])
        .collect();
    RecordBatch::try_new(
        schema,
        vec![
            Arc::new(StringArray::from(names)),
            Arc::new(StringArray::from(vec!["10,50"; 50])),
            Arc::new(StringArray::from(vec!["2024-05-10"; 50])),
            Arc::new(Int64Array::from(stocks)),
            Arc::new(StringArray::from(categories)),
        ],
    )
    .expect("Failed to create batch")
}

fn reviews(rows: usize) -> RecordBatch {
    let schema = Arc::new(Schema::new(vec![
        Field::new("product_name", DataType::Utf8, false),
        Field::new("rating", DataType::Float64, true),
        Field::new("recommends", DataType::Utf8, true),
        Field::new("comment", DataType::Utf8, true),
        Field::new("review_date", DataType::Utf8, true),
    ]));
    let names: Vec<String> = (0..rows).map(|i| format!("product_{}", i % 50)).collect();
    #[allow(clippy::cast_precision_loss)]
    let ratings: Vec<f64> = (0..rows).map(|i| 1.0 + (i % 5) as f64).collect();
    let recommends: Vec<&str> = (0..rows)
        .map(|i| ["Sim", "Não", "?"][i % 3])
        .collect();
    RecordBatch::try_new(
        schema,
        vec![
            Arc::new(StringArray::from(names)),
            Arc::new(Float64Array::from(ratings)),
            Arc::new(StringArray::from(recommends)),
            Arc::new(StringArray::from(vec![""; rows])),
            Arc::new(StringArray::from(vec!["2024-07-01"; rows])),
        ],
    )
    .expect("Failed to create batch")
}

fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline_run");
    let pipeline = Pipeline::new();

    for size in [100usize, 1_000, 10_000] {
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let customer_batch = customers(size);
            let sale_batch = sales(size * 2, size);
            let product_batch = products();
            let review_batch = reviews(size / 2);
            b.iter(|| {
                pipeline
                    .run(
                        black_box(customer_batch.clone()),
                        black_box(sale_batch.clone()),
                        black_box(product_batch.clone()),
                        black_box(review_batch.clone()),
                    )
                    .unwrap()
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_pipeline);
criterion_main!(benches);
