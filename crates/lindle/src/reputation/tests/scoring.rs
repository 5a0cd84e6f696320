use super::common::*;
use crate::reputation::domain::{EntityId, Outcome};
use crate::reputation::scoring::{
    calculate_reputation_score, score_for_entity, score_outcomes, update_entity_reputation,
};

#[test]
fn single_successful_completion_scores_full_marks() {
    let contracts = vec![contract("c-1", "e-1", Outcome::SuccessfulCompletion, 0)];
    assert_eq!(score_outcomes(&contracts), 100.0);
}

#[test]
fn litigation_is_clamped_at_zero() {
    let contracts = vec![contract("c-1", "e-1", Outcome::Litigation, 0)];
    assert_eq!(score_outcomes(&contracts), 0.0);
}

#[test]
fn red_flags_reduce_pending_contracts() {
    let contracts = vec![contract("c-1", "e-1", Outcome::Pending, 2)];
    assert_eq!(score_outcomes(&contracts), 40.0);
}

#[test]
fn no_history_scores_zero() {
    assert_eq!(score_outcomes(&[]), 0.0);
}

#[test]
fn red_flag_penalty_applies_per_contract() {
    // (10 - 1) + (10 - 0.5) + (-3 - 0) = 15.5 over 30 possible
    let contracts = vec![
        contract("c-1", "e-1", Outcome::SuccessfulCompletion, 2),
        contract("c-2", "e-1", Outcome::SuccessfulCompletion, 1),
        contract("c-3", "e-1", Outcome::EarlyTermination, 0),
    ];
    assert_eq!(score_outcomes(&contracts), 51.7);
}

#[test]
fn unrecognized_outcomes_only_count_towards_the_denominator() {
    let contracts = vec![
        contract("c-1", "e-1", Outcome::SuccessfulCompletion, 0),
        contract("c-2", "e-1", Outcome::Unrecognized("Renegotiated".to_string()), 0),
    ];
    assert_eq!(score_outcomes(&contracts), 50.0);
}

#[test]
fn exact_half_scores_round_to_even() {
    // (10 - 0.5) + (5 - 0) + (-7 - 0) + (-7 - 0) = 0.5 over 40 possible -> 1.25
    let contracts = vec![
        contract("c-1", "e-1", Outcome::SuccessfulCompletion, 1),
        contract("c-2", "e-1", Outcome::Pending, 0),
        contract("c-3", "e-1", Outcome::Dispute, 0),
        contract("c-4", "e-1", Outcome::Dispute, 0),
    ];
    assert_eq!(score_outcomes(&contracts), 1.2);
}

#[test]
fn large_histories_round_like_the_stored_decimal() {
    // (5 - 3.5) over 1000 possible; 0.15 is stored just below the tie
    let mut contracts = vec![contract("c-0", "e-1", Outcome::Pending, 7)];
    contracts.extend((1..100).map(|index| {
        contract(
            &format!("c-{index}"),
            "e-1",
            Outcome::Unrecognized("Archived".to_string()),
            0,
        )
    }));

    assert_eq!(score_outcomes(&contracts), 0.1);
}

#[test]
fn score_for_entity_ignores_other_entities() {
    let contracts = vec![
        contract("c-1", "e-1", Outcome::SuccessfulCompletion, 0),
        contract("c-2", "e-2", Outcome::Litigation, 4),
    ];
    assert_eq!(
        score_for_entity(&EntityId("e-1".to_string()), &contracts),
        100.0
    );
    assert_eq!(score_for_entity(&EntityId("e-3".to_string()), &contracts), 0.0);
}

#[test]
fn scores_stay_within_bounds_for_every_outcome_mix() {
    let outcomes = [
        Outcome::SuccessfulCompletion,
        Outcome::EarlyTermination,
        Outcome::Dispute,
        Outcome::Litigation,
        Outcome::Pending,
    ];

    for first in &outcomes {
        for second in &outcomes {
            for red_flags in [0, 3, 40] {
                let contracts = vec![
                    contract("c-1", "e-1", first.clone(), red_flags),
                    contract("c-2", "e-1", second.clone(), 0),
                ];
                let score = score_outcomes(&contracts);
                assert!(
                    (0.0..=100.0).contains(&score),
                    "{first} + {second} with {red_flags} flags scored {score}"
                );
            }
        }
    }
}

#[test]
fn calculate_reads_contracts_from_the_store() {
    let store = MemoryStore::seeded(
        vec![entity("e-1", "Acme Inc", 0.0)],
        vec![contract("c-1", "e-1", Outcome::Pending, 2)],
    );
    assert_eq!(
        calculate_reputation_score(&store, &EntityId("e-1".to_string())),
        40.0
    );
}

#[test]
fn update_entity_reputation_persists_score_and_count() {
    let store = MemoryStore::seeded(
        vec![entity("e-1", "Acme Inc", 0.0), entity("e-2", "Globex", 12.0)],
        vec![
            contract("c-1", "e-1", Outcome::SuccessfulCompletion, 0),
            contract("c-2", "e-1", Outcome::Pending, 0),
        ],
    );

    let rescored = update_entity_reputation(&store, &EntityId("e-1".to_string()))
        .expect("rescore succeeds")
        .expect("entity exists");
    assert_eq!(rescored.reputation_score, 75.0);
    assert_eq!(rescored.total_contracts, 2);

    let stored = store.entity("e-1").expect("entity persisted");
    assert_eq!(stored.reputation_score, 75.0);
    assert_eq!(stored.total_contracts, 2);
    assert!(stored.updated_at > timestamp());

    let untouched = store.entity("e-2").expect("other entity kept");
    assert_eq!(untouched.reputation_score, 12.0);
}

#[test]
fn update_entity_reputation_is_idempotent() {
    let store = MemoryStore::seeded(
        vec![entity("e-1", "Acme Inc", 0.0)],
        vec![
            contract("c-1", "e-1", Outcome::Dispute, 1),
            contract("c-2", "e-1", Outcome::SuccessfulCompletion, 0),
        ],
    );
    let id = EntityId("e-1".to_string());

    let first = update_entity_reputation(&store, &id)
        .expect("first rescore")
        .expect("entity exists");
    let second = update_entity_reputation(&store, &id)
        .expect("second rescore")
        .expect("entity exists");

    assert_eq!(first.reputation_score, second.reputation_score);
    assert_eq!(first.total_contracts, second.total_contracts);
}

#[test]
fn update_entity_reputation_skips_unknown_entities_without_writing() {
    let store = MemoryStore::seeded(
        vec![entity("e-1", "Acme Inc", 0.0)],
        vec![contract("c-1", "e-1", Outcome::Pending, 0)],
    );

    let result = update_entity_reputation(&store, &EntityId("missing".to_string()))
        .expect("unknown entity is not an error");
    assert!(result.is_none());
    assert_eq!(store.writes(), 0);
}
