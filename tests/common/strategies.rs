#![allow(dead_code)]

use cluster_gate::config::RollupConfig;
use cluster_gate::status::{OperationStatus, StatusWeights};
use proptest::prelude::*;

/// Strategy for any status in the closed set
pub fn status_strategy() -> impl Strategy<Value = OperationStatus> {
    prop::sample::select(OperationStatus::ALL.to_vec())
}

/// Strategy for a task status multiset
pub fn statuses_strategy() -> impl Strategy<Value = Vec<OperationStatus>> {
    prop::collection::vec(status_strategy(), 0..64)
}

/// Strategy for stages as `(skippable, statuses)`
pub fn stages_strategy() -> impl Strategy<Value = Vec<(bool, Vec<OperationStatus>)>> {
    prop::collection::vec(
        (any::<bool>(), prop::collection::vec(status_strategy(), 1..16)),
        1..8,
    )
}

/// Strategy for rollup settings within the accepted ranges
pub fn rollup_config_strategy() -> impl Strategy<Value = RollupConfig> {
    let finished = vec![
        OperationStatus::Completed,
        OperationStatus::Failed,
        OperationStatus::Timedout,
        OperationStatus::Aborted,
        OperationStatus::SkippedFailed,
    ];
    (
        prop::sample::subsequence(finished.clone(), 0..=finished.len()),
        0.0f64..=1.0,
        0.0f64..=1.0,
    )
        .prop_flat_map(|(completed_states, queued, completed)| {
            (0.0f64..=completed / 2.0).prop_map(move |active| RollupConfig {
                completed_states: completed_states.clone(),
                weights: StatusWeights {
                    queued,
                    active,
                    completed,
                },
            })
        })
}
