//! Drives the crate the way a column-generation master problem would: one
//! shared context, many subproblem instances, active node sets that change
//! between rounds.

use std::sync::Arc;
use std::thread;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use u_tour::{
    DistanceMatrix, RouteKey, SearchMode, SolverConfig, SolverContext, Tour, TspInstance,
    TwoOptConfig,
};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Euclidean matrix over random points, built by the caller as the
/// distance collaborator would.
fn euclidean_matrix(size: usize, seed: u64) -> DistanceMatrix {
    let mut rng = StdRng::seed_from_u64(seed);
    let points: Vec<(f64, f64)> = (0..size)
        .map(|_| (rng.random_range(0.0..100.0), rng.random_range(0.0..100.0)))
        .collect();
    let mut rows = vec![vec![0.0; size]; size];
    for i in 0..size {
        for j in 0..size {
            let dx = points[i].0 - points[j].0;
            let dy = points[i].1 - points[j].1;
            rows[i][j] = (dx * dx + dy * dy).sqrt();
        }
    }
    DistanceMatrix::from_rows(&rows).expect("valid matrix")
}

#[test]
fn test_rounds_reuse_cached_routes() {
    init_logger();
    let ctx = SolverContext::new(euclidean_matrix(30, 1)).expect("valid");
    let mut instance =
        TspInstance::new(&ctx, (0..30).collect(), SearchMode::BestImprovement).expect("valid");

    let (_, full_cost) = instance.optimise().expect("valid");
    assert!(full_cost <= instance.initial_cost());

    let active: Vec<usize> = (0..30).filter(|n| n % 3 != 0).collect();
    instance.update(&active).expect("valid");
    let (sub_tour, sub_cost) = instance.optimise().expect("valid");
    assert_eq!(sub_tour.key(), RouteKey::from_nodes(&active));
    assert_eq!(instance.engine_runs(), 2);

    // the master problem goes back to the full set: no new search
    instance.update(&(0..30).collect::<Vec<_>>()).expect("valid");
    let (_, again) = instance.optimise().expect("valid");
    assert_eq!(again, full_cost);
    assert_eq!(instance.engine_runs(), 2);

    let stats = ctx.cache().stats();
    assert_eq!(stats.entries, 2);
    assert_eq!(stats.hits, 1);
    assert!(sub_cost > 0.0);
}

#[test]
fn test_modes_reach_local_optima() {
    init_logger();
    let dm = euclidean_matrix(40, 9);
    for mode in [SearchMode::FirstImprovement, SearchMode::BestImprovement] {
        let ctx = SolverContext::new(dm.clone()).expect("valid");
        let mut instance = TspInstance::new(&ctx, (0..40).collect(), mode).expect("valid");
        let (tour, cost) = instance.optimise().expect("valid");
        assert!(cost < instance.initial_cost());
        assert!((ctx.matrix().tour_cost(&tour) - cost).abs() < 1e-9);

        let (left, _) = u_tour::local_search::find_improving_move(
            tour.nodes(),
            ctx.matrix(),
            SearchMode::BestImprovement,
            0.0,
        );
        assert!(left.is_none(), "{mode:?} stopped with an improving move left");
    }
}

#[test]
fn test_budgeted_context() {
    init_logger();
    let config = SolverConfig::default()
        .with_ratio(0.3)
        .with_two_opt(TwoOptConfig::default().with_max_iterations(1));
    let ctx = SolverContext::new(euclidean_matrix(25, 4))
        .expect("valid")
        .with_config(config);
    let mut rng = StdRng::seed_from_u64(17);
    let start = Tour::shuffled((0..25).collect(), ctx.matrix(), &mut rng).expect("valid");

    let mut instance =
        TspInstance::new(&ctx, start.into_nodes(), SearchMode::BestImprovement).expect("valid");
    let (_, cost) = instance.optimise().expect("valid");
    assert!(cost < instance.initial_cost());
    assert_eq!(instance.ratio(), Some(0.3));
}

#[test]
fn test_shared_context_across_threads() {
    init_logger();
    let ctx = Arc::new(SolverContext::new(euclidean_matrix(20, 2)).expect("valid"));
    let handles: Vec<_> = (0..4u64)
        .map(|seed| {
            let ctx = Arc::clone(&ctx);
            thread::spawn(move || {
                let mut rng = StdRng::seed_from_u64(seed);
                let start =
                    Tour::shuffled((0..20).collect(), ctx.matrix(), &mut rng).expect("valid");
                let mut instance =
                    TspInstance::new(&ctx, start.into_nodes(), SearchMode::FirstImprovement)
                        .expect("valid");
                instance.optimise().expect("valid").1
            })
        })
        .collect();
    for h in handles {
        let cost = h.join().expect("thread finished");
        assert!(cost > 0.0);
    }
    assert_eq!(ctx.cache().len(), 1);
}
