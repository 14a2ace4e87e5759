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

use allot_model::category::RiskCategory;
use allot_model::model::{Catalog, CatalogBuilder, Constraints, ConstraintsBuilder};
use allot_model::reference::reference_problem;
use allot_search::engine::ExhaustiveSolver;
use allot_search::monitor::no_op::NoOperationMonitor;
use allot_search::parallel::ParallelSolver;
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::hint::black_box;

/// Random catalog with a budget of roughly half the total cost.
fn random_instance(num_items: usize, seed: u64) -> (Catalog<i64>, Constraints<i64>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut builder = CatalogBuilder::with_capacity(num_items);
    for i in 0..num_items {
        let category = RiskCategory::ALL[rng.gen_range(0..RiskCategory::COUNT)];
        builder.add(
            format!("option{i}"),
            rng.gen_range(5..80),
            rng.gen_range(5..60),
            category,
        );
    }
    let catalog = builder.build().unwrap();

    let budget = catalog.total_cost() / 2;
    let constraints = ConstraintsBuilder::new()
        .budget(budget)
        .max_cost(RiskCategory::Low, budget / 2)
        .max_cost(RiskCategory::Medium, budget * 2 / 3)
        .max_cost(RiskCategory::High, budget / 3)
        .min_count(RiskCategory::Low, 1)
        .min_count(RiskCategory::Medium, 1)
        .build()
        .unwrap();

    (catalog, constraints)
}

fn bench_reference(c: &mut Criterion) {
    let problem = reference_problem().unwrap();
    let mut group = c.benchmark_group("reference");

    group.bench_function("sequential", |b| {
        b.iter(|| {
            ExhaustiveSolver::new().solve(
                black_box(problem.catalog()),
                black_box(problem.constraints()),
                NoOperationMonitor::new(),
            )
        })
    });
    group.bench_function("sequential_bound_pruning", |b| {
        b.iter(|| {
            ExhaustiveSolver::new().with_bound_pruning(true).solve(
                black_box(problem.catalog()),
                black_box(problem.constraints()),
                NoOperationMonitor::new(),
            )
        })
    });

    group.finish();
}

fn bench_random(c: &mut Criterion) {
    let mut group = c.benchmark_group("random_catalogs");
    group.sample_size(10);

    for num_items in [16usize, 20, 22] {
        let (catalog, constraints) = random_instance(num_items, 0x5EED ^ num_items as u64);
        group.throughput(Throughput::Elements(1u64 << num_items));

        group.bench_with_input(
            BenchmarkId::new("sequential", num_items),
            &num_items,
            |b, _| {
                b.iter(|| {
                    ExhaustiveSolver::new().solve(
                        black_box(&catalog),
                        black_box(&constraints),
                        NoOperationMonitor::new(),
                    )
                })
            },
        );

        group.bench_with_input(
            BenchmarkId::new("parallel", num_items),
            &num_items,
            |b, _| {
                let solver = ParallelSolver::new().with_split_depth(8);
                b.iter(|| solver.solve(black_box(&catalog), black_box(&constraints)))
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_reference, bench_random);
criterion_main!(benches);
