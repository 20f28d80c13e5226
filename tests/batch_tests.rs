//! Batch generation: diversity, exposure and early stopping.

use std::sync::Arc;

use lineforge::adapter::outbound::solver::HiGHSSolver;
use lineforge::application::{BatchRequest, LineupOptimizer, LineupSetDriver};
use lineforge::domain::{BatchEnd, ConstraintSet, LineupBatch, PlayerPool, Position};
use lineforge::testkit::pool::{player, slate, standard_nine};
use rust_decimal_macros::dec;

fn driver() -> LineupSetDriver {
    LineupSetDriver::new(LineupOptimizer::new(Arc::new(HiGHSSolver::new())))
}

fn generate(pool: &PlayerPool, request: BatchRequest) -> LineupBatch {
    driver()
        .generate_batch(pool, ConstraintSet::standard(50_000), request)
        .expect("batch runs")
}

#[test]
fn lineups_differ_by_at_least_min_uniqueness() {
    let pool = PlayerPool::new(slate(16));
    let batch = generate(&pool, BatchRequest::new(5, 3));

    assert_eq!(batch.len(), 5);
    assert_eq!(batch.end, BatchEnd::Completed);
    for (i, a) in batch.lineups.iter().enumerate() {
        for b in &batch.lineups[i + 1..] {
            assert!(a.overlap(b) <= 6, "overlap {} exceeds 6", a.overlap(b));
        }
    }
    for pair in batch.lineups.windows(2) {
        assert!(pair[0].total_score() + dec!(0.05) >= pair[1].total_score());
    }
}

#[test]
fn full_uniqueness_on_a_thin_pool_stops_after_one() {
    let mut players = standard_nine(0);
    players.push(player(9, "Spare Wideout", Position::WideReceiver, "NYJ", 4000, "5"));
    players.push(player(10, "Spare Back", Position::RunningBack, "NYG", 4000, "5"));
    let pool = PlayerPool::new(players);

    let batch = generate(&pool, BatchRequest::new(3, 9));
    assert_eq!(batch.len(), 1);
    assert_eq!(batch.end, BatchEnd::Infeasible { accepted: 1 });
}

#[test]
fn exposure_cap_limits_usage() {
    let pool = PlayerPool::new(slate(16));
    let request = BatchRequest::new(4, 1).with_max_exposure(50);
    let batch = generate(&pool, request);

    assert_eq!(batch.len(), 4);
    assert!(batch.usage.values().all(|used| *used <= 2));
    let counted: usize = batch.usage.values().sum();
    assert_eq!(counted, 4 * 9);
}

#[test]
fn zero_uniqueness_allows_repeats() {
    let pool = PlayerPool::new(slate(8));
    let batch = generate(&pool, BatchRequest::new(3, 0));

    assert_eq!(batch.len(), 3);
    assert_eq!(batch.lineups[0].overlap(&batch.lineups[1]), 9);
    assert_eq!(batch.lineups[0].total_score(), batch.lineups[2].total_score());
}
