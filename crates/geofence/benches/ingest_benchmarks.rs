//! Ingestion and controller benchmarks.
//!
//! Measures file reading plus row ingestion, and the cost of select-all and
//! filtering on loaded sessions.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use geofence::{
    ingest, Action, GeofenceMapper, RawRow, RecordingList, RecordingMap, Session,
};
use std::io::Write;
use tempfile::NamedTempFile;

fn polygon(row: usize) -> String {
    let lng = 54.0 + (row % 100) as f64 * 0.01;
    let lat = 24.0 + (row / 100) as f64 * 0.01;
    format!(
        "POLYGON (({lng:.4} {lat:.4}, {:.4} {lat:.4}, {:.4} {:.4}, {lng:.4} {:.4}, {lng:.4} {lat:.4}))",
        lng + 0.005,
        lng + 0.005,
        lat + 0.005,
        lat + 0.005
    )
}

/// Generate a CSV export with one geofence per row. Every tenth row has no geometry.
fn generate_csv(rows: usize) -> String {
    let mut data = String::from("Name,WKT\n");
    for row in 0..rows {
        if row % 10 == 9 {
            data.push_str(&format!("Zone {},\n", row));
        } else {
            data.push_str(&format!("Zone {},\"{}\"\n", row, polygon(row)));
        }
    }
    data
}

fn generate_rows(rows: usize) -> Vec<RawRow> {
    (0..rows)
        .map(|row| {
            RawRow::new()
                .with("name", format!("Zone {}", row))
                .with("wkt", polygon(row))
        })
        .collect()
}

fn loaded_session(rows: usize) -> (GeofenceMapper, Session) {
    let mapper = GeofenceMapper::new();
    let mut session = Session::new();
    let ticket = session.begin_load();
    let (mut map, mut list) = (RecordingMap::new(), RecordingList::new());
    mapper
        .controller()
        .complete_load(&mut session, ticket, Ok::<_, String>(generate_rows(rows)), &mut map, &mut list)
        .unwrap();
    (mapper, session)
}

fn bench_ingest_rows(c: &mut Criterion) {
    let mut group = c.benchmark_group("ingest_rows");

    for rows in [100, 1_000, 10_000].iter() {
        let data = generate_rows(*rows);
        group.throughput(Throughput::Elements(*rows as u64));
        group.bench_with_input(BenchmarkId::new("rows", rows), &data, |b, data| {
            b.iter(|| black_box(ingest(data).unwrap()))
        });
    }

    group.finish();
}

fn bench_inspect_file(c: &mut Criterion) {
    let mut group = c.benchmark_group("inspect_file");

    for rows in [100, 1_000, 10_000].iter() {
        let data = generate_csv(*rows);
        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(BenchmarkId::new("rows", rows), &data, |b, data| {
            b.iter_with_setup(
                || {
                    let mut temp = NamedTempFile::with_suffix(".csv").unwrap();
                    temp.write_all(data.as_bytes()).unwrap();
                    temp
                },
                |temp| black_box(GeofenceMapper::new().inspect(temp.path()).unwrap()),
            )
        });
    }

    group.finish();
}

fn bench_select_all(c: &mut Criterion) {
    let mut group = c.benchmark_group("select_all");

    for rows in [100, 1_000].iter() {
        group.bench_with_input(BenchmarkId::new("rows", rows), rows, |b, rows| {
            b.iter_with_setup(
                || loaded_session(*rows),
                |(mapper, mut session)| {
                    let (mut map, mut list) = (RecordingMap::new(), RecordingList::new());
                    black_box(mapper.controller().dispatch(
                        &mut session,
                        Action::SelectAll,
                        &mut map,
                        &mut list,
                    ))
                },
            )
        });
    }

    group.finish();
}

fn bench_filter(c: &mut Criterion) {
    let (mapper, mut session) = loaded_session(10_000);
    let mut list = RecordingList::new();
    let mut map = RecordingMap::new();

    c.bench_function("filter_10000", |b| {
        b.iter(|| {
            mapper.controller().dispatch(
                &mut session,
                Action::Filter(black_box("zone 99".to_string())),
                &mut map,
                &mut list,
            )
        })
    });
}

criterion_group!(
    benches,
    bench_ingest_rows,
    bench_inspect_file,
    bench_select_all,
    bench_filter,
);
criterion_main!(benches);
