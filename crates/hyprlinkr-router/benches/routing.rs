//! Route table benchmarks.
//!
//! Run with: `cargo bench -p hyprlinkr-router`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use hyprlinkr_router::{Route, RouteTable, RouteValues};

fn build_table(num_routes: usize) -> RouteTable {
    let mut table = RouteTable::new();

    for i in 0..num_routes / 2 {
        let route = Route::builder(format!("Resource{i}"), format!("api/v1/resource{i}/{{id}}"))
            .optional("id")
            .build()
            .unwrap();
        table.insert(route).unwrap();
    }

    for i in 0..num_routes / 2 {
        let route = Route::builder(
            format!("OrgResource{i}"),
            format!("api/v1/org/{{orgId}}/resource{i}/{{id}}"),
        )
        .constraint("id", r"\d+")
        .build()
        .unwrap();
        table.insert(route).unwrap();
    }

    table
}

fn bench_route_data(c: &mut Criterion) {
    let table = build_table(100);

    c.bench_function("route_data", |b| {
        b.iter(|| black_box(table.route_data("/api/v1/resource25/12345")));
    });
}

fn bench_route_data_miss(c: &mut Criterion) {
    let table = build_table(100);

    c.bench_function("route_data_miss", |b| {
        b.iter(|| black_box(table.route_data("/api/v1/nonexistent/path")));
    });
}

fn bench_virtual_path(c: &mut Criterion) {
    let table = build_table(100);
    let values: RouteValues = [("orgId", "acme-corp"), ("id", "12345"), ("page", "2")]
        .into_iter()
        .collect();

    c.bench_function("virtual_path", |b| {
        b.iter(|| black_box(table.virtual_path("OrgResource10", &values)));
    });
}

fn bench_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("scaling");

    for num_routes in [10, 50, 100, 500] {
        let table = build_table(num_routes);

        group.bench_with_input(
            BenchmarkId::new("route_data", num_routes),
            &num_routes,
            |b, &n| {
                let path = format!("/api/v1/resource{}/12345", n / 4);
                b.iter(|| black_box(table.route_data(&path)));
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_route_data,
    bench_route_data_miss,
    bench_virtual_path,
    bench_scaling
);
criterion_main!(benches);
