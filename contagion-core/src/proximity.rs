//! All-pairs proximity evaluation.
//!
//! Every unordered pair of active agents is measured once, then delivered
//! twice, once with each agent on the left. Deliveries are grouped by the
//! left-hand agent and ordered nearest first, with the right-hand agent's
//! index breaking ties. A left-hand agent can cut its own group short by
//! returning `ControlFlow::Break`; other groups are unaffected.

use glam::Vec2;
use log::trace;
use ordered_float::OrderedFloat;

use crate::agent::Agent;
use crate::context::TickContext;
use crate::error::RegistryError;
use crate::registry::Slot;

/// Position and size of an agent at the start of the phase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub center: Vec2,
    pub radius: f32,
}

impl Body {
    pub fn of(agent: &dyn Agent) -> Self {
        Body {
            center: agent.position(),
            radius: agent.radius(),
        }
    }
}

/// One directed delivery: `left` is told about `right` at `distance`.
/// Indices refer to the slice the events were computed from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProximityEvent {
    pub left: usize,
    pub distance: f32,
    pub right: usize,
}

/// Counters for one proximity phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Delivery {
    pub delivered: usize,
    pub early_exits: usize,
}

/// Compute the sorted `n * (n - 1)` directed events for `bodies`.
pub fn pairwise_events(bodies: &[Body], account_for_radii: bool) -> Vec<ProximityEvent> {
    let n = bodies.len();
    if n < 2 {
        return Vec::new();
    }

    let mut events = Vec::with_capacity(n * (n - 1));
    for i in 0..n {
        for j in (i + 1)..n {
            let mut distance = bodies[i].center.distance(bodies[j].center);
            if account_for_radii {
                distance -= bodies[i].radius + bodies[j].radius;
            }
            events.push(ProximityEvent { left: i, distance, right: j });
            events.push(ProximityEvent { left: j, distance, right: i });
        }
    }

    events.sort_unstable_by_key(|e| (e.left, OrderedFloat(e.distance), e.right));
    debug_assert_eq!(events.len(), n * (n - 1));
    events
}

/// Run the proximity hooks for `events` over `active`.
///
/// `events` must come from [`pairwise_events`] over the same slice, so each
/// left-hand group is exactly `n - 1` long.
pub(crate) fn deliver(
    active: &mut [Slot],
    events: &[ProximityEvent],
    ctx: &mut TickContext<'_>,
) -> Result<Delivery, RegistryError> {
    let n = active.len();
    let mut delivery = Delivery::default();
    if n < 2 {
        return Ok(delivery);
    }

    for group in events.chunks(n - 1) {
        for event in group {
            debug_assert_eq!(event.left, group[0].left);
            let (left, right) = pair_mut(active, event.left, event.right);
            ctx.focus(left.id, Some(right.id));

            let flow = left.agent.on_proximity(right.agent.as_mut(), event.distance, ctx);
            delivery.delivered += 1;

            if let Some(err) = ctx.take_violation() {
                return Err(err);
            }
            if flow.is_break() {
                trace!("{} {} stopped after {:.1}", left.agent.label(), left.id, event.distance);
                delivery.early_exits += 1;
                break;
            }
        }
    }
    Ok(delivery)
}

fn pair_mut<T>(items: &mut [T], a: usize, b: usize) -> (&mut T, &mut T) {
    assert_ne!(a, b, "an agent is never paired with itself");
    if a < b {
        let (lo, hi) = items.split_at_mut(b);
        (&mut lo[a], &mut hi[0])
    } else {
        let (lo, hi) = items.split_at_mut(a);
        (&mut hi[0], &mut lo[b])
    }
}
