use crate::automaton::FiniteAutomaton;
use crate::error::SynthesisError;
use crate::net::Region;
use crate::overapproximation::{
    LanguageConfig, RegionMode, language_cone, language_regions, lts_cone,
    overapproximate_language, overapproximate_lts, overapproximate_lts_net,
};
use crate::test_utils::{
    init_logger, mk_word, self_loop_ts, two_branch_ts, two_state_cycle_ts, unreachable_event_ts,
};
use crate::transition_system::{SpanningTree, TransitionSystem};
use num::bigint::BigInt;
use std::collections::BTreeSet;

fn ints(values: &[i64]) -> Vec<BigInt> {
    values.iter().map(|it| BigInt::from(*it)).collect()
}

fn impure(initial: i64, backward: &[i64], forward: &[i64]) -> Region {
    Region::impure(BigInt::from(initial), ints(backward), ints(forward))
}

fn pure(initial: i64, weights: &[i64]) -> Region {
    Region::pure(BigInt::from(initial), &ints(weights))
}

// ========== RegionMode ==========

#[test]
fn test_mode_rows() {
    init_logger();
    assert_eq!(RegionMode::Pure.dimension(2), 3);
    assert_eq!(RegionMode::Impure.dimension(2), 5);

    assert_eq!(RegionMode::Pure.row(0, &[1i64, 2]), ints(&[0, 1, 2]));
    assert_eq!(RegionMode::Impure.row(1, &[1i64, 2]), ints(&[1, 1, 2, -1, -2]));

    // Enabled after a prefix: pure adds the event weight, impure subtracts its consumption.
    assert_eq!(RegionMode::Pure.enabled_after(&[1i64, 0], 1), ints(&[1, 1, 1]));
    assert_eq!(
        RegionMode::Impure.enabled_after(&[1i64, 0], 1),
        ints(&[1, 1, 0, -1, -1])
    );

    // Enabled as the last event: the word already counts the event.
    assert_eq!(RegionMode::Pure.enabled_last(&[1i64, 1], 1), ints(&[1, 1, 1]));
    assert_eq!(
        RegionMode::Impure.enabled_last(&[1i64, 1], 1),
        ints(&[1, 1, 0, -1, -1])
    );
}

#[test]
fn test_mode_region() {
    init_logger();
    assert_eq!(
        RegionMode::Impure.region(&ints(&[1, 2, 0, 0, 3]), 2),
        impure(1, &[0, 3], &[2, 0])
    );
    assert_eq!(
        RegionMode::Pure.region(&ints(&[1, -1, 2]), 2),
        impure(1, &[1, 0], &[0, 2])
    );
}

// ========== Transition systems ==========

#[test]
fn test_single_state() -> Result<(), SynthesisError> {
    init_logger();
    let ts = TransitionSystem::new("s0");
    for mode in [RegionMode::Pure, RegionMode::Impure] {
        let regions = overapproximate_lts(&ts, mode)?;
        assert_eq!(
            regions,
            BTreeSet::from([impure(1, &[], &[])]),
            "A system without events has one marked place"
        );
    }
    Ok(())
}

#[test]
fn test_self_loop() -> Result<(), SynthesisError> {
    init_logger();
    let ts = self_loop_ts();

    let regions = overapproximate_lts(&ts, RegionMode::Impure)?;
    assert_eq!(
        regions,
        BTreeSet::from([impure(1, &[0], &[0]), impure(1, &[1], &[1])])
    );

    let regions = overapproximate_lts(&ts, RegionMode::Pure)?;
    assert_eq!(regions, BTreeSet::from([pure(1, &[0])]));
    Ok(())
}

#[test]
fn test_two_state_cycle() -> Result<(), SynthesisError> {
    init_logger();
    let regions = overapproximate_lts(&two_state_cycle_ts(), RegionMode::Impure)?;
    assert_eq!(
        regions,
        BTreeSet::from([impure(1, &[0], &[0]), impure(1, &[1], &[1])]),
        "The cycle a·a has the same regions as a single a-loop"
    );
    Ok(())
}

#[test]
fn test_two_branches() -> Result<(), SynthesisError> {
    init_logger();
    let ts = two_branch_ts();

    let regions = overapproximate_lts(&ts, RegionMode::Impure)?;
    let expected = BTreeSet::from([
        impure(0, &[0, 0], &[0, 1]),
        impure(0, &[0, 0], &[1, 0]),
        impure(1, &[0, 0], &[0, 0]),
        impure(1, &[1, 0], &[0, 0]),
        impure(1, &[0, 1], &[0, 0]),
        impure(1, &[1, 1], &[0, 0]),
    ]);
    assert_eq!(regions, expected);

    let regions = overapproximate_lts(&ts, RegionMode::Pure)?;
    let expected = BTreeSet::from([pure(1, &[-1, -1]), pure(0, &[1, 0]), pure(0, &[0, 1])]);
    assert_eq!(regions, expected);
    Ok(())
}

#[test]
fn test_unreachable_states_are_ignored() -> Result<(), SynthesisError> {
    init_logger();
    let ts = unreachable_event_ts();

    let regions = overapproximate_lts(&ts, RegionMode::Impure)?;
    let expected = BTreeSet::from([
        impure(1, &[0], &[0]),
        impure(0, &[0], &[1]),
        impure(0, &[1], &[0]),
    ]);
    assert_eq!(regions, expected, "NotA is unconstrained");

    let regions = overapproximate_lts(&ts, RegionMode::Pure)?;
    assert_eq!(regions, BTreeSet::from([pure(1, &[0])]));
    Ok(())
}

#[test]
fn test_rays_satisfy_their_constraints() -> Result<(), SynthesisError> {
    init_logger();
    for ts in [self_loop_ts(), two_state_cycle_ts(), two_branch_ts()] {
        for mode in [RegionMode::Pure, RegionMode::Impure] {
            let cone = lts_cone(&ts, mode)?;
            for ray in cone.find_extremal_rays()? {
                assert!(cone.contains(&ray), "Ray {ray:?} violates {cone}");
            }
        }
    }
    Ok(())
}

#[test]
fn test_regions_allow_reachable_behavior() -> Result<(), SynthesisError> {
    init_logger();
    for ts in [self_loop_ts(), two_state_cycle_ts(), two_branch_ts()] {
        let tree = SpanningTree::new(&ts);
        for region in overapproximate_lts(&ts, RegionMode::Impure)? {
            for state in ts.states() {
                let Some(prefix) = tree.reaching_parikh_vector(state) else {
                    continue;
                };
                let marking = region.marking_after(prefix);
                for (index, event) in tree.events().iter().enumerate() {
                    if ts.is_event_enabled(state, event) {
                        assert!(
                            region.enables(&marking, index),
                            "Region {region} blocks `{event}` in `{}`",
                            ts.state_name(state)
                        );
                    }
                }
            }
            for chord in tree.chords() {
                assert_eq!(
                    region.marking_after(&chord.parikh_vector),
                    region.initial_marking,
                    "Region {region} is not consistent around a cycle"
                );
            }
        }
    }
    Ok(())
}

#[test]
fn test_lts_net() -> Result<(), SynthesisError> {
    init_logger();
    let net = overapproximate_lts_net(&two_branch_ts(), RegionMode::Impure)?;
    assert_eq!(net.transition_labels().collect::<Vec<_>>(), vec!["a", "b"]);
    assert_eq!(net.num_places(), 6);
    assert!(net.can_fire_sequence(&["a"])?);
    assert!(net.can_fire_sequence(&["b"])?);
    assert!(!net.can_fire_sequence(&["a", "b"])?, "The branches exclude each other");
    assert!(!net.can_fire_sequence(&["a", "a"])?);

    let net = overapproximate_lts_net(&self_loop_ts(), RegionMode::Impure)?;
    assert!(net.can_fire_sequence(&["a"; 10])?);
    Ok(())
}

// ========== Languages ==========

#[test]
fn test_single_word() -> Result<(), SynthesisError> {
    init_logger();
    let word = mk_word(&["a"]);
    let (events, regions) = language_regions(&word, &LanguageConfig::new(RegionMode::Impure))?;
    assert_eq!(events, vec!["a".to_string()]);
    let expected = BTreeSet::from([
        impure(0, &[0], &[1]),
        impure(1, &[0], &[0]),
        impure(1, &[1], &[0]),
    ]);
    assert_eq!(regions, expected);

    let net = overapproximate_language(&word, &LanguageConfig::new(RegionMode::Impure))?;
    assert!(net.can_fire_sequence(&["a"])?);
    assert!(!net.can_fire_sequence(&["a", "a"])?);
    Ok(())
}

#[test]
fn test_pure_word_is_exact() -> Result<(), SynthesisError> {
    init_logger();
    let word = mk_word(&["a", "b"]);
    let (_, regions) = language_regions(&word, &LanguageConfig::new(RegionMode::Pure))?;
    let expected = BTreeSet::from([pure(0, &[0, 1]), pure(0, &[1, -1]), pure(1, &[-1, 0])]);
    assert_eq!(regions, expected);

    let net = overapproximate_language(&word, &LanguageConfig::new(RegionMode::Pure))?;
    assert!(net.can_fire_sequence(&["a", "b"])?);
    assert!(!net.can_fire_sequence(&["b"])?);
    assert!(!net.can_fire_sequence(&["a", "a"])?);
    assert!(!net.can_fire_sequence(&["a", "b", "a"])?);
    assert!(!net.can_fire_sequence(&["a", "b", "b"])?);
    Ok(())
}

#[test]
fn test_empty_language() -> Result<(), SynthesisError> {
    init_logger();
    let empty = FiniteAutomaton::empty_language();
    let (events, regions) = language_regions(&empty, &LanguageConfig::default())?;
    assert!(events.is_empty());
    assert_eq!(regions, BTreeSet::from([impure(1, &[], &[])]));
    Ok(())
}

#[test]
fn test_star_language_fires_prefixes() -> Result<(), SynthesisError> {
    init_logger();
    let ab = mk_word(&["a", "b"]);
    let language = ab.kleene_star();

    for mode in [RegionMode::Pure, RegionMode::Impure] {
        let net = overapproximate_language(&language, &LanguageConfig::new(mode))?;
        let mut word = Vec::new();
        for index in 0..8 {
            assert!(
                net.can_fire_sequence(&word)?,
                "Prefix {word:?} must be fireable in {mode:?} mode"
            );
            word.push(if index % 2 == 0 { "a" } else { "b" });
        }
        assert!(!net.can_fire_sequence(&["b"])?, "No word starts with b");
        assert!(!net.can_fire_sequence(&["a", "a"])?, "No word contains aa");
    }
    Ok(())
}

#[test]
fn test_bounded_flag() -> Result<(), SynthesisError> {
    init_logger();
    let language = mk_word(&["a"]).kleene_star();

    let (_, regions) = language_regions(&language, &LanguageConfig::new(RegionMode::Impure))?;
    assert!(
        regions.contains(&impure(0, &[0], &[1])),
        "Without the flag, a place may accumulate tokens along the loop"
    );

    let mut config = LanguageConfig::new(RegionMode::Impure);
    config.bounded = true;
    let (_, regions) = language_regions(&language, &config)?;
    assert_eq!(
        regions,
        BTreeSet::from([impure(1, &[0], &[0]), impure(1, &[1], &[1])])
    );

    let (_, cone) = language_cone(&language, &config)?;
    assert!(
        cone.inequalities()
            .any(|row| *row == ints(&[0, -1, 1])),
        "The period inequality is negated"
    );
    assert!(cone.inequalities().any(|row| *row == ints(&[0, 1, -1])));

    let net = overapproximate_language(&language, &config)?;
    assert!(net.can_fire_sequence(&["a"; 5])?);
    Ok(())
}

#[test]
fn test_language_limits() {
    init_logger();
    let language = mk_word(&["a"]).kleene_star();

    let mut config = LanguageConfig::new(RegionMode::Impure);
    config.max_rays = 1;
    assert!(matches!(
        overapproximate_language(&language, &config),
        Err(SynthesisError::Cancelled(_))
    ));
}
