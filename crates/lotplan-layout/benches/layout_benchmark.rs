// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use lotplan_cp::solver::{ConstraintSolver, SolverParameters};
use lotplan_layout::{
    config::{LotConfig, ZoneRect},
    layout::LayoutModel,
};
use lotplan_solver::PumpkinSolver;
use std::hint::black_box;

/// Lots small enough to be solved to a proven optimum.
fn small_lots() -> Vec<(&'static str, LotConfig)> {
    vec![
        (
            "strip_4x1",
            LotConfig {
                width: 4,
                height: 1,
                num_buildings: 1,
                num_parking_lots: 1,
                flood_zone: ZoneRect::new(3, 0, 1, 1),
                utility_pole: ZoneRect::new(0, 0, 1, 1),
                ..LotConfig::default()
            },
        ),
        (
            "lot_5x2",
            LotConfig {
                width: 5,
                height: 2,
                num_buildings: 1,
                num_parking_lots: 1,
                flood_zone: ZoneRect::new(4, 1, 1, 1),
                utility_pole: ZoneRect::new(0, 0, 1, 1),
                ..LotConfig::default()
            },
        ),
    ]
}

fn bench_small_lots(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout_benchmark");
    group.sample_size(10);

    for (name, config) in small_lots() {
        let layout = LayoutModel::build(&config).expect("benchmark configs are valid");
        let parameters = SolverParameters::default().without_time_limit();
        let mut solver = PumpkinSolver::new();

        group.bench_with_input(BenchmarkId::new("prove_optimal", name), &parameters, |b, parameters| {
            b.iter(|| {
                let response = solver.solve(black_box(layout.model()), black_box(parameters));
                if !response.has_solution() {
                    panic!("Benchmark configuration error: {} has no layout.", name);
                }
                response
            })
        });
    }
    group.finish();
}

fn bench_model_build(c: &mut Criterion) {
    let config = LotConfig::default();
    c.bench_function("build_reference_model", |b| {
        b.iter(|| LayoutModel::build(black_box(&config)))
    });
}

criterion_group!(benches, bench_small_lots, bench_model_build);
criterion_main!(benches);
