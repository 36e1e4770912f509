use rand::RngCore;

use crate::agent::Agent;
use crate::error::RegistryError;
use crate::registry::{EntityId, PendingQueue};

/// Running totals updated by agent hooks through the tick context.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    /// Agents newly marked affected since the run started.
    pub affected: u32,
    pub affected_this_tick: u32,
}

impl Tally {
    pub fn record_affected(&mut self) {
        self.affected += 1;
        self.affected_this_tick += 1;
    }

    pub(crate) fn begin_tick(&mut self) {
        self.affected_this_tick = 0;
    }
}

/// Handle passed into every hook for the duration of that call.
///
/// It is the only way a hook can reach engine state: the shared random
/// source, the tally, and the deferred add/remove queues. Nothing queued here
/// becomes visible before the tick's commit.
pub struct TickContext<'a> {
    rng: &'a mut dyn RngCore,
    tally: &'a mut Tally,
    queue: &'a mut PendingQueue,
    roster: &'a [EntityId],
    tick: u64,
    current: Option<EntityId>,
    counterpart: Option<EntityId>,
    violation: Option<RegistryError>,
}

impl<'a> TickContext<'a> {
    pub(crate) fn new(
        tick: u64,
        rng: &'a mut dyn RngCore,
        tally: &'a mut Tally,
        queue: &'a mut PendingQueue,
        roster: &'a [EntityId],
    ) -> Self {
        TickContext {
            rng,
            tally,
            queue,
            roster,
            tick,
            current: None,
            counterpart: None,
            violation: None,
        }
    }

    pub fn rng(&mut self) -> &mut dyn RngCore {
        &mut *self.rng
    }

    pub fn tally(&self) -> &Tally {
        &*self.tally
    }

    pub fn tally_mut(&mut self) -> &mut Tally {
        &mut *self.tally
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Id of the agent whose hook is running.
    pub fn current(&self) -> Option<EntityId> {
        self.current
    }

    /// Id of the right-hand agent while a proximity hook runs.
    pub fn counterpart(&self) -> Option<EntityId> {
        self.counterpart
    }

    /// Queue an agent for addition; it joins the active set at commit.
    pub fn add(&mut self, agent: Box<dyn Agent>) -> EntityId {
        self.queue.push_add(agent)
    }

    /// Queue an active agent for removal. Queuing the same id twice is fine.
    ///
    /// A violation is also recorded so the pipeline can fail the tick as
    /// soon as the hook returns, even if the hook drops this result.
    pub fn remove(&mut self, id: EntityId) -> Result<(), RegistryError> {
        if self.roster.binary_search(&id).is_ok() {
            self.queue.push_remove(id);
            return Ok(());
        }
        let err = RegistryError::NotActive(id);
        self.violation.get_or_insert_with(|| err.clone());
        Err(err)
    }

    pub(crate) fn focus(&mut self, current: EntityId, counterpart: Option<EntityId>) {
        self.current = Some(current);
        self.counterpart = counterpart;
    }

    pub(crate) fn take_violation(&mut self) -> Option<RegistryError> {
        self.violation.take()
    }
}
