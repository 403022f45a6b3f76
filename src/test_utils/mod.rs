use crate::automaton::{FiniteAutomaton, Symbol};
use crate::transition_system::TransitionSystem;

/// Initialize env_logger for tests. Safe to call multiple times.
pub fn init_logger() {
    let _ = env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Trace)
        .is_test(true)
        .try_init();
}

/// Creates a transition system from a list of `(source, event, target)` arcs.
///
/// States are created by name in order of first appearance, starting with `initial`, so
/// `ts.states()` follows the same order.
///
/// # Example
///
/// `mk_ts("s0", &[("s0", "a", "s1")])` creates `s0 -a-> s1`.
pub fn mk_ts(initial: &str, arcs: &[(&str, &str, &str)]) -> TransitionSystem {
    let mut ts = TransitionSystem::new(initial);
    let mut names = vec![(initial.to_string(), ts.initial_state())];
    let mut state = |ts: &mut TransitionSystem, name: &str| {
        if let Some((_, node)) = names.iter().find(|(it, _)| it == name) {
            return *node;
        }
        let node = ts.add_state(name);
        names.push((name.to_string(), node));
        node
    };
    for &(source, event, target) in arcs {
        let source = state(&mut ts, source);
        let target = state(&mut ts, target);
        ts.add_arc(source, event, target);
    }
    ts
}

/// `s0 -a-> s0`
pub fn self_loop_ts() -> TransitionSystem {
    mk_ts("s0", &[("s0", "a", "s0")])
}

/// `s0 -a-> s1 -a-> s0`
pub fn two_state_cycle_ts() -> TransitionSystem {
    mk_ts("s0", &[("s0", "a", "s1"), ("s1", "a", "s0")])
}

/// `s1 <-a- s0 -b-> s2`
pub fn two_branch_ts() -> TransitionSystem {
    mk_ts("s0", &[("s0", "a", "s1"), ("s0", "b", "s2")])
}

/// The initial state `s0` without arcs, plus an unreachable state `u` with a `NotA` loop.
pub fn unreachable_event_ts() -> TransitionSystem {
    let mut ts = TransitionSystem::new("s0");
    let unreachable = ts.add_state("u");
    ts.add_arc(unreachable, "NotA", unreachable);
    ts
}

/// The automaton accepting exactly the given word.
pub fn mk_word(word: &[&str]) -> FiniteAutomaton {
    word.iter().fold(
        FiniteAutomaton::atomic_language(Symbol::Epsilon),
        |result, event| result.concatenate(&FiniteAutomaton::atomic_language(Symbol::event(event))),
    )
}
