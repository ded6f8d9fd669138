//! Command line assembly benchmarks
//!
//! Measures option merging and shell escaping, the only work done on the
//! Rust side per render.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use weasy::{Generator, OptionValue, escape_arg};

fn benchmark_command_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("command_build");

    for stylesheet_count in [0, 4, 32] {
        let mut generator = Generator::pdf("weasyprint").expect("Failed to create generator");
        generator
            .set_option("media-type", "print")
            .expect("Failed to set option");
        let stylesheets: Vec<String> = (0..stylesheet_count)
            .map(|i| format!("/srv/styles/theme-{i}.css"))
            .collect();
        let overrides = [
            ("stylesheet", OptionValue::List(stylesheets)),
            ("dpi", OptionValue::from(300)),
            ("presentational-hints", OptionValue::Bool(true)),
        ];

        group.bench_with_input(
            BenchmarkId::new("stylesheets", stylesheet_count),
            &stylesheet_count,
            |b, _| {
                b.iter(|| {
                    generator
                        .command(black_box("/srv/in.html"), black_box("/srv/out.pdf"), &overrides)
                        .expect("Failed to build command")
                });
            },
        );
    }

    group.finish();
}

fn benchmark_escape(c: &mut Criterion) {
    let mut group = c.benchmark_group("escape_arg");

    for length in [16, 256, 4096] {
        let value = "it's a 'quoted' path/".repeat(length / 16);
        group.bench_with_input(BenchmarkId::new("chars", length), &value, |b, value| {
            b.iter(|| escape_arg(black_box(value)));
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_command_build, benchmark_escape);
criterion_main!(benches);
