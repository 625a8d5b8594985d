use criterion::{black_box, criterion_group, criterion_main, Criterion};

use crescent::crescent_width::crescent_semiwidth;
use crescent::criteria::{odeh, yallop};

/// (ARCL, Moon altitude, Moon distance) covering young crescents from 5° to 30° elongation.
fn geometry_grid() -> Vec<(f64, f64, f64)> {
    (0..50)
        .flat_map(|i| {
            let arcl = 5.0 + 0.5 * i as f64;
            (0..20).map(move |j| (arcl, -2.0 + 0.75 * j as f64, 356_000.0 + 2_500.0 * j as f64))
        })
        .collect()
}

fn bench_crescent_width(c: &mut Criterion) {
    let grid = geometry_grid();
    c.bench_function("crescent_semiwidth/grid_1000", |b| {
        b.iter(|| {
            grid.iter()
                .map(|&(arcl, alt, dist)| crescent_semiwidth(black_box(arcl), alt, dist))
                .sum::<f64>()
        })
    });
}

fn bench_criteria(c: &mut Criterion) {
    let inputs: Vec<(f64, f64, f64)> = geometry_grid()
        .into_iter()
        .map(|(arcl, alt, dist)| (arcl, alt + 0.8333, crescent_semiwidth(arcl, alt, dist)))
        .collect();

    c.bench_function("criteria/yallop_odeh_grid_1000", |b| {
        b.iter(|| {
            inputs
                .iter()
                .filter(|&&(arcl, arcv, w)| {
                    let y = yallop(black_box(arcl), black_box(arcv), black_box(w));
                    let o = odeh(arcv, w);
                    y.class_code <= 'B' || o.class_code == 'A'
                })
                .count()
        })
    });
}

criterion_group!(benches, bench_crescent_width, bench_criteria);
criterion_main!(benches);
