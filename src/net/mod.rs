//! Regions and the Petri nets synthesized from them.

use log::debug;


mod petri_net;
mod region;

pub use petri_net::{NetNode, PetriNet};
pub use region::Region;

/// Build a Petri net with one transition per event and one place per region.
///
/// Events are referenced by regions through their position in `events`.
///
/// # Panics
///
/// Every region must carry exactly one weight pair per event.
pub fn synthesize_net<'a, S: AsRef<str>, I: IntoIterator<Item = &'a Region>>(
    events: &[S],
    regions: I,
) -> PetriNet {
    let mut net = PetriNet::new();
    let transitions = events
        .iter()
        .map(|event| net.create_transition(event.as_ref()))
        .collect::<Vec<_>>();

    for region in regions {
        assert_eq!(
            region.num_events(),
            events.len(),
            "Region {region} does not match the event list."
        );
        let place = net.create_place(region.initial_marking.clone());
        for (index, transition) in transitions.iter().enumerate() {
            net.create_flow_to_place(*transition, place, region.forward[index].clone());
            net.create_flow_to_transition(place, *transition, region.backward[index].clone());
        }
    }

    debug!(
        "Synthesized a net with {} transitions, {} places and {} arcs.",
        transitions.len(),
        net.num_places(),
        net.num_arcs()
    );
    net
}
