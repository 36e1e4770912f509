use std::collections::BTreeSet;
use std::fmt;

use log::debug;

use crate::agent::Agent;
use crate::error::RegistryError;

/// Identity of an agent, handed out when it is queued for addition.
///
/// Ids grow monotonically and are never reused, so the active set kept in id
/// order is also insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityId(pub(crate) u64);

impl EntityId {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Where an id currently sits in the add/commit/remove lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Membership {
    PendingAdd,
    Active,
    PendingRemove,
}

pub(crate) struct Slot {
    pub(crate) id: EntityId,
    pub(crate) agent: Box<dyn Agent>,
}

/// Deferred mutations collected during a tick.
#[derive(Default)]
pub(crate) struct PendingQueue {
    adds: Vec<Slot>,
    removes: BTreeSet<EntityId>,
    next_id: u64,
}

impl PendingQueue {
    pub(crate) fn push_add(&mut self, agent: Box<dyn Agent>) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        self.adds.push(Slot { id, agent });
        id
    }

    pub(crate) fn push_remove(&mut self, id: EntityId) {
        self.removes.insert(id);
    }
}

/// What a commit changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CommitSummary {
    pub removed: usize,
    pub added: usize,
}

/// Owns every agent: the active set plus the pending add/remove queues.
///
/// An agent is moved in by value, so it can never be active and pending at
/// the same time, nor added twice.
#[derive(Default)]
pub struct Registry {
    pub(crate) active: Vec<Slot>,
    pub(crate) queue: PendingQueue,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an agent for addition. It becomes active at the next commit.
    pub fn add(&mut self, agent: Box<dyn Agent>) -> EntityId {
        self.queue.push_add(agent)
    }

    /// Queue an active agent for removal at the next commit. Idempotent
    /// within a tick; ids that are not active are a contract violation.
    pub fn remove(&mut self, id: EntityId) -> Result<(), RegistryError> {
        if self.index_of(id).is_none() {
            return Err(RegistryError::NotActive(id));
        }
        self.queue.push_remove(id);
        Ok(())
    }

    /// Apply the queued removals, then the queued additions.
    pub fn commit(&mut self) -> CommitSummary {
        let removes = std::mem::take(&mut self.queue.removes);
        let before = self.active.len();
        if !removes.is_empty() {
            self.active.retain(|slot| !removes.contains(&slot.id));
        }
        let removed = before - self.active.len();

        let added = self.queue.adds.len();
        self.active.append(&mut self.queue.adds);
        debug_assert!(self.active.windows(2).all(|w| w[0].id < w[1].id));

        if removed > 0 || added > 0 {
            debug!("commit: -{} +{} -> {} active", removed, added, self.active.len());
        }
        CommitSummary { removed, added }
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    pub fn pending_adds(&self) -> usize {
        self.queue.adds.len()
    }

    pub fn pending_removes(&self) -> usize {
        self.queue.removes.len()
    }

    pub fn membership(&self, id: EntityId) -> Option<Membership> {
        if self.index_of(id).is_some() {
            if self.queue.removes.contains(&id) {
                Some(Membership::PendingRemove)
            } else {
                Some(Membership::Active)
            }
        } else if self.queue.adds.iter().any(|slot| slot.id == id) {
            Some(Membership::PendingAdd)
        } else {
            None
        }
    }

    /// Ids of the active set, in id order.
    pub fn ids(&self) -> Vec<EntityId> {
        self.active.iter().map(|slot| slot.id).collect()
    }

    pub fn get(&self, id: EntityId) -> Option<&dyn Agent> {
        self.index_of(id).map(|idx| self.active[idx].agent.as_ref())
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut (dyn Agent + 'static)> {
        let idx = self.index_of(id)?;
        Some(self.active[idx].agent.as_mut())
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &dyn Agent)> + '_ {
        self.active.iter().map(|slot| (slot.id, slot.agent.as_ref()))
    }

    fn index_of(&self, id: EntityId) -> Option<usize> {
        self.active.binary_search_by_key(&id, |slot| slot.id).ok()
    }
}
