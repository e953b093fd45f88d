use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use nik_reconcile::identifier::normalize;
use nik_reconcile::ingestion::Delimiter;
use nik_reconcile::ingestion::csv::load_csv;
use nik_reconcile::processing::{ColumnSelection, clean, reconcile};
use nik_reconcile::types::{Table, Value};

fn members_csv(rows: usize, offset: usize) -> Vec<u8> {
    let mut out = String::from("MemberNo,IdentityNo,Name\n");
    for i in 0..rows {
        let id = 3_200_000_000_000_000_u64 + ((i + offset) % (rows / 2 + 1)) as u64;
        if i % 3 == 0 {
            out.push_str(&format!(",{id},member {i}\n"));
        } else {
            out.push_str(&format!("{id},,member {i}\n"));
        }
    }
    out.into_bytes()
}

fn members_table(rows: usize, offset: usize) -> Table {
    load_csv(&members_csv(rows, offset), Delimiter::Comma, true)
        .map(|d| d.table)
        .unwrap_or_else(|e| panic!("bench fixture failed to load: {e}"))
}

fn bench_normalize(c: &mut Criterion) {
    let cells = [
        Value::from("3201234567890123"),
        Value::from("3201-2345-6789-0123"),
        Value::Int64(3_201_234_567_890_123),
        Value::Float64(3_201_234_567_890_123.0),
        Value::from("not an identifier"),
    ];
    c.bench_function("normalize_mixed_cells", |b| {
        b.iter(|| {
            for cell in &cells {
                black_box(normalize(black_box(cell)));
            }
        })
    });
}

fn bench_load_clean_reconcile(c: &mut Criterion) {
    let selection = ColumnSelection::both("MemberNo", "IdentityNo");
    let mut group = c.benchmark_group("pipeline");
    for rows in [1_000_usize, 10_000] {
        let left_bytes = members_csv(rows, 0);
        let left = members_table(rows, 0);
        let right = members_table(rows, rows / 4);

        group.bench_with_input(BenchmarkId::new("load_csv", rows), &left_bytes, |b, bytes| {
            b.iter(|| load_csv(black_box(bytes), Delimiter::Comma, true))
        });
        group.bench_with_input(BenchmarkId::new("clean", rows), &left, |b, table| {
            b.iter(|| clean(black_box(table), &selection, true))
        });

        let (Ok(l), Ok(r)) = (clean(&left, &selection, true), clean(&right, &selection, true)) else {
            panic!("bench fixture failed to clean");
        };
        group.bench_function(BenchmarkId::new("reconcile", rows), |b| {
            b.iter(|| reconcile(black_box(&l.table), black_box(&r.table)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_normalize, bench_load_clean_reconcile);
criterion_main!(benches);
