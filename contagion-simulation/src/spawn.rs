use std::fmt;
use std::rc::Rc;

use contagion_core::{Agent, Engine, EntityId};
use log::info;

use crate::backdrop::Backdrop;
use crate::person::{Contagious, Susceptible};
use crate::policy::TransmissionPolicy;
use crate::scene::Census;

/// One group of identically configured people.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cohort {
    Susceptible { masked: bool },
    Contagious { masked: bool },
}

impl fmt::Display for Cohort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (kind, masked) = match self {
            Cohort::Susceptible { masked } => ("susceptible", masked),
            Cohort::Contagious { masked } => ("contagious", masked),
        };
        let mask = if *masked { "masked" } else { "unmasked" };
        write!(f, "{} {}", mask, kind)
    }
}

/// Queue `count` people of one cohort at random positions.
pub fn spawn_cohort(
    engine: &mut Engine,
    count: u32,
    cohort: Cohort,
    policy: &Rc<dyn TransmissionPolicy>,
) -> Vec<EntityId> {
    let bounds = engine.bounds();
    let ids = engine.spawn(count as usize, |rng| -> Box<dyn Agent> {
        match cohort {
            Cohort::Susceptible { masked } => Box::new(Susceptible::spawn(bounds, masked, rng)),
            Cohort::Contagious { masked } => {
                Box::new(Contagious::spawn(bounds, masked, Rc::clone(policy), rng))
            }
        }
    });
    info!("Spawned {} {}", ids.len(), cohort);
    ids
}

/// Queue the whole party: the optional backdrop first so it renders under
/// everyone, then masked and unmasked susceptibles, then the carriers.
///
/// Nothing becomes active until the engine's next commit.
pub fn populate(
    engine: &mut Engine,
    census: &Census,
    policy: &Rc<dyn TransmissionPolicy>,
    backdrop: bool,
) -> Vec<EntityId> {
    let mut ids = Vec::with_capacity(census.population() as usize + 1);
    if backdrop {
        let bounds = engine.bounds();
        ids.push(engine.add(Box::new(Backdrop::new(bounds))));
    }
    let cohorts = [
        (census.masked_susceptible, Cohort::Susceptible { masked: true }),
        (census.unmasked_susceptible, Cohort::Susceptible { masked: false }),
        (census.contagious, Cohort::Contagious { masked: census.contagious_masked }),
    ];
    for (count, cohort) in cohorts {
        ids.extend(spawn_cohort(engine, count, cohort, policy));
    }
    ids
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::MaskTable;
    use crate::testing::engine_with;
    use contagion_core::{EngineOptions, Membership};

    fn census() -> Census {
        Census {
            masked_susceptible: 5,
            unmasked_susceptible: 5,
            contagious: 1,
            contagious_masked: true,
        }
    }

    #[test]
    fn cohort_names() {
        assert_eq!(Cohort::Susceptible { masked: true }.to_string(), "masked susceptible");
        assert_eq!(Cohort::Contagious { masked: false }.to_string(), "unmasked contagious");
    }

    #[test]
    fn populate_queues_everyone_until_commit() {
        let mut engine = engine_with(EngineOptions::default());
        let policy: Rc<dyn TransmissionPolicy> = Rc::new(MaskTable::default());

        let ids = populate(&mut engine, &census(), &policy, true);

        assert_eq!(ids.len(), 12);
        assert_eq!(engine.registry().pending_adds(), 12);
        assert_eq!(engine.registry().membership(ids[0]), Some(Membership::PendingAdd));

        let summary = engine.commit();
        assert_eq!(summary.added, 12);
        assert_eq!(engine.registry().len(), 12);
        assert_eq!(engine.registry().get(ids[0]).unwrap().label(), "backdrop");
        assert_eq!(engine.registry().get(ids[11]).unwrap().label(), "contagious");
    }

    #[test]
    fn spawned_people_land_inside_the_world() {
        let mut engine = engine_with(EngineOptions::default());
        let policy: Rc<dyn TransmissionPolicy> = Rc::new(MaskTable::default());

        let ids = spawn_cohort(&mut engine, 3, Cohort::Susceptible { masked: false }, &policy);
        engine.commit();

        for id in ids {
            let position = engine.registry().get(id).unwrap().position();
            assert!((0.0..=600.0).contains(&position.x));
            assert!((0.0..=600.0).contains(&position.y));
        }
    }
}
