use crate::cone::PolyhedralCone;
use crate::error::SynthesisError;
use crate::net::{PetriNet, Region, synthesize_net};
use crate::overapproximation::RegionMode;
use crate::transition_system::{SpanningTree, TransitionSystem};
use log::{info, trace};
use std::collections::BTreeSet;

/// Build the cone whose integer points are exactly the `mode` regions of `ts`.
///
/// Every chord of the spanning tree closes a cycle whose effect on a region must be zero.
/// Every event enabled in a reachable state must be enabled in the marking the region assigns
/// to that state. Unreachable states contribute nothing.
pub fn lts_cone(ts: &TransitionSystem, mode: RegionMode) -> Result<PolyhedralCone, SynthesisError> {
    let tree = SpanningTree::new(ts);
    let num_events = tree.num_events();
    let mut cone = PolyhedralCone::new(mode.dimension(num_events));
    mode.add_non_negativity(&mut cone, num_events)?;

    for chord in tree.chords() {
        cone.add_equation(mode.row(0, &chord.parikh_vector))?;
    }

    for state in ts.states() {
        let Some(prefix) = tree.reaching_parikh_vector(state) else {
            trace!("Skipping unreachable state `{}`.", ts.state_name(state));
            continue;
        };
        for (event, label) in tree.events().iter().enumerate() {
            if ts.is_event_enabled(state, label) {
                cone.add_inequality(mode.enabled_after(prefix, event))?;
            }
        }
    }

    Ok(cone)
}

/// Compute the minimal `mode` regions of `ts`: one per extremal ray of [`lts_cone`].
///
/// The returned regions index events in the sorted order of [`TransitionSystem::events`].
pub fn overapproximate_lts(
    ts: &TransitionSystem,
    mode: RegionMode,
) -> Result<BTreeSet<Region>, SynthesisError> {
    let cone = lts_cone(ts, mode)?;
    info!(
        "Built a {:?} region cone with {} variables, {} equations and {} inequalities.",
        mode,
        cone.num_variables(),
        cone.equations().count(),
        cone.inequalities().count()
    );

    let num_events = ts.events().len();
    let regions = cone
        .find_extremal_rays()?
        .iter()
        .map(|ray| mode.region(ray, num_events))
        .collect::<BTreeSet<_>>();
    info!("Found {} minimal regions.", regions.len());
    Ok(regions)
}

/// Synthesize the Petri net of all minimal `mode` regions of `ts`.
pub fn overapproximate_lts_net(
    ts: &TransitionSystem,
    mode: RegionMode,
) -> Result<PetriNet, SynthesisError> {
    let regions = overapproximate_lts(ts, mode)?;
    let events = ts.events().into_iter().collect::<Vec<_>>();
    Ok(synthesize_net(&events, &regions))
}
