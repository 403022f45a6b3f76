use crate::log_set;
use crate::semilinear::SemilinearSet;
use crate::state_elimination::{EliminationConfig, EliminationState};
use cancel_this::{Cancelled, is_cancelled};
use computation_process::Incomplete::Suspended;
use computation_process::{Completable, ComputationStep};
use log::{debug, trace};

/// A [`ComputationStep`] which eliminates one automaton state per invocation.
///
/// Eliminating state `n` extends every entry `(s1, s2)` with
/// `R(s1, n) · R(n, n)* · R(n, s2)`, where `R` is the mapping before the elimination.
/// Once all states are eliminated, the result is the union of `R(initial, f)` over all final
/// states `f`.
///
/// [`EliminationConfig::max_linear_sets`] is checked against the number of linear sets an
/// operation generates before it runs (`2^k` for a star over `k` members, the product of the
/// operand sizes for a concatenation), and against every updated entry.
pub struct EliminationStep;

impl ComputationStep<EliminationConfig, EliminationState, SemilinearSet> for EliminationStep {
    fn step(
        context: &EliminationConfig,
        state: &mut EliminationState,
    ) -> Completable<SemilinearSet> {
        let dfa = &context.dfa;
        if state.eliminated == 0 {
            let largest = state.mapping.iter().flatten().map(|it| it.len()).max();
            check_limit(context, state, Some(largest.unwrap_or(0)))?;
        }

        if state.eliminated >= state.num_states {
            let initial = dfa.initial_state();
            let mut result = SemilinearSet::EMPTY;
            for accepting in dfa.states().filter(|it| dfa.is_final(*it)) {
                if let Some(set) = state.get(initial, accepting) {
                    result = result.union(set);
                }
            }

            debug!(
                "[state:{}/{}] Elimination finished with ({}).",
                state.eliminated,
                state.num_states,
                log_set(&result)
            );
            return Ok(result);
        }

        let eliminated = state.eliminated;
        let previous = state.clone();
        let Some(self_loop) = previous.get(eliminated, eliminated) else {
            panic!("State {eliminated} must reach itself at least by the empty word.");
        };
        check_limit(context, state, self_loop.kleene_star_size())?;
        let repeated = self_loop.cancellable_kleene_star()?;
        trace!(
            "Eliminating state {eliminated}; self-loop star ({}).",
            log_set(&repeated)
        );

        for source in 0..state.num_states {
            is_cancelled!()?;
            let Some(into) = previous.get(source, eliminated) else {
                continue;
            };
            check_limit(context, state, into.len().checked_mul(repeated.len()))?;
            let prefix = into.cancellable_concatenate(&repeated)?;
            for target in 0..state.num_states {
                let Some(out_of) = previous.get(eliminated, target) else {
                    continue;
                };
                check_limit(context, state, prefix.len().checked_mul(out_of.len()))?;
                let paths = prefix.cancellable_concatenate(out_of)?;
                let size = state.add(source, target, &paths);
                check_limit(context, state, Some(size))?;
            }
        }

        state.eliminated += 1;
        debug!(
            "[state:{}/{}] Eliminated state {eliminated}.",
            state.eliminated, state.num_states
        );
        Err(Suspended)
    }
}

/// Cancel the elimination if `size` exceeds the limit. `None` stands for a size that does
/// not fit into `usize`.
fn check_limit(
    context: &EliminationConfig,
    state: &EliminationState,
    size: Option<usize>,
) -> Completable<()> {
    match size {
        Some(size) if size <= context.max_linear_sets => Ok(()),
        _ => {
            debug!(
                "[state:{}/{}] Elimination canceled (exceeded linear set count).",
                state.eliminated, state.num_states
            );

            Err(Cancelled::new("EliminationConfig::max_linear_sets").into())
        }
    }
}
