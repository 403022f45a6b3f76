use crate::automaton::{Dfa, FiniteAutomaton};
use crate::cone::{PolyhedralCone, RayEnumeration};
use crate::error::SynthesisError;
use crate::log_set;
use crate::net::{PetriNet, Region, synthesize_net};
use crate::overapproximation::RegionMode;
use crate::semilinear::ParikhVector;
use crate::state_elimination::{EliminationConfig, EliminationState, StateElimination};
use computation_process::Algorithm;
use log::{debug, info};
use std::collections::BTreeSet;

/// Configuration of [`overapproximate_language`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LanguageConfig {
    pub mode: RegionMode,
    /// Turn every period inequality into an equation, so that no synthesized place can
    /// accumulate tokens along a loop of the language.
    pub bounded: bool,
    /// Passed to [`EliminationConfig::max_linear_sets`].
    pub max_linear_sets: usize,
    /// Passed to [`RayEnumeration::max_rays`].
    pub max_rays: usize,
}

impl LanguageConfig {
    pub fn new(mode: RegionMode) -> LanguageConfig {
        LanguageConfig {
            mode,
            bounded: false,
            max_linear_sets: usize::MAX,
            max_rays: usize::MAX,
        }
    }
}

impl Default for LanguageConfig {
    fn default() -> Self {
        LanguageConfig::new(RegionMode::default())
    }
}

impl From<RegionMode> for LanguageConfig {
    fn from(value: RegionMode) -> Self {
        LanguageConfig::new(value)
    }
}

/// Build the region cone of the language of `automaton`, together with the events indexing
/// its variables (the sorted alphabet of the prefix closure).
///
/// For every event `e`, the Parikh vectors of all prefixes ending with `e` are described by
/// a semilinear set. The base of every linear set must leave `e` enabled and every period
/// must not decrease the marking.
pub fn language_cone(
    automaton: &FiniteAutomaton,
    config: &LanguageConfig,
) -> Result<(Vec<String>, PolyhedralCone), SynthesisError> {
    let prefixes = Dfa::from(automaton.prefix_closure());
    let alphabet = prefixes.alphabet().clone();
    let events = alphabet.iter().cloned().collect::<Vec<_>>();
    let mode = config.mode;

    let mut cone = PolyhedralCone::new(mode.dimension(events.len()));
    mode.add_non_negativity(&mut cone, events.len())?;

    let dense = |vector: &ParikhVector| {
        events
            .iter()
            .map(|event| vector.get(event))
            .collect::<Vec<_>>()
    };

    for (index, event) in events.iter().enumerate() {
        let ending = prefixes.intersection(&Dfa::ending_with(&alphabet, event));
        let mut elimination = EliminationConfig::new(&ending);
        elimination.max_linear_sets = config.max_linear_sets;
        let initial = EliminationState::from(&elimination);
        let set = StateElimination::run(elimination, initial)?;
        debug!("Prefixes ending with `{event}`: {}.", log_set(&set));

        for linear_set in &set {
            cone.add_inequality(mode.enabled_last(&dense(linear_set.base()), index))?;
            for period in linear_set.periods() {
                let row = mode.row(0, &dense(period));
                if config.bounded {
                    cone.add_inequality(row.iter().map(|it| -it).collect::<Vec<_>>())?;
                }
                cone.add_inequality(row)?;
            }
        }
    }

    Ok((events, cone))
}

/// Synthesize the net of all minimal regions of the language of `automaton`.
///
/// The net over-approximates the prefix closure of the language: every prefix of an accepted
/// word can be fired from the initial marking.
pub fn overapproximate_language(
    automaton: &FiniteAutomaton,
    config: &LanguageConfig,
) -> Result<PetriNet, SynthesisError> {
    let (events, regions) = language_regions(automaton, config)?;
    Ok(synthesize_net(&events, &regions))
}

/// Like [`overapproximate_language`], but return the minimal regions instead of the net.
pub fn language_regions(
    automaton: &FiniteAutomaton,
    config: &LanguageConfig,
) -> Result<(Vec<String>, BTreeSet<Region>), SynthesisError> {
    let (events, cone) = language_cone(automaton, config)?;
    info!(
        "Built a {:?} language cone with {} variables and {} inequalities (bounded={}).",
        config.mode,
        cone.num_variables(),
        cone.inequalities().count(),
        config.bounded
    );

    let mut enumeration = RayEnumeration::new(&cone);
    enumeration.max_rays = config.max_rays;
    let regions = enumeration
        .enumerate()?
        .iter()
        .map(|ray| config.mode.region(ray, events.len()))
        .collect::<BTreeSet<_>>();
    info!("Found {} minimal regions.", regions.len());
    Ok((events, regions))
}
