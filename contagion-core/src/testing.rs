//! Agents and surfaces used by this crate's unit tests.

use glam::Vec2;
use std::cell::RefCell;
use std::ops::ControlFlow;
use std::rc::Rc;

use crate::agent::Agent;
use crate::context::TickContext;
use crate::edge::Side;
use crate::registry::EntityId;
use crate::surface::{Color, DrawSurface};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    Proximity { tick: u64, left: EntityId, right: EntityId, distance: f32 },
    Move { tick: u64, who: EntityId },
    Edge { tick: u64, who: EntityId, side: Side },
}

pub(crate) type CallLog = Rc<RefCell<Vec<Call>>>;

/// Records every hook call; can be told to stop proximity delivery early.
pub(crate) struct Probe {
    pub position: Vec2,
    pub radius: f32,
    pub log: CallLog,
    pub stop_after: Option<usize>,
    seen: (u64, usize),
}

impl Probe {
    pub fn at(x: f32, y: f32) -> Self {
        Probe::logged(x, y, CallLog::default())
    }

    pub fn logged(x: f32, y: f32, log: CallLog) -> Self {
        Probe {
            position: Vec2::new(x, y),
            radius: 10.0,
            log,
            stop_after: None,
            seen: (u64::MAX, 0),
        }
    }

    pub fn stopping_after(mut self, calls: usize) -> Self {
        self.stop_after = Some(calls);
        self
    }
}

impl Agent for Probe {
    fn position(&self) -> Vec2 {
        self.position
    }

    fn radius(&self) -> f32 {
        self.radius
    }

    fn on_proximity(
        &mut self,
        _other: &mut dyn Agent,
        distance: f32,
        ctx: &mut TickContext<'_>,
    ) -> ControlFlow<()> {
        if self.seen.0 != ctx.tick() {
            self.seen = (ctx.tick(), 0);
        }
        self.seen.1 += 1;
        self.log.borrow_mut().push(Call::Proximity {
            tick: ctx.tick(),
            left: ctx.current().unwrap(),
            right: ctx.counterpart().unwrap(),
            distance,
        });
        match self.stop_after {
            Some(limit) if self.seen.1 >= limit => ControlFlow::Break(()),
            _ => ControlFlow::Continue(()),
        }
    }

    fn on_move(&mut self, ctx: &mut TickContext<'_>) {
        self.log.borrow_mut().push(Call::Move {
            tick: ctx.tick(),
            who: ctx.current().unwrap(),
        });
    }

    fn on_edge(&mut self, side: Side, _boundary: f32, ctx: &mut TickContext<'_>) {
        self.log.borrow_mut().push(Call::Edge {
            tick: ctx.tick(),
            who: ctx.current().unwrap(),
            side,
        });
    }

    fn on_draw(&self, surface: &mut dyn DrawSurface) {
        let diameter = 2.0 * self.radius;
        surface.ellipse(self.position.x, self.position.y, diameter, diameter, Color::WHITE);
    }

    fn label(&self) -> &'static str {
        "probe"
    }
}

/// Surface that keeps a textual trace of what it was asked to do.
#[derive(Default)]
pub(crate) struct RecordingSurface {
    pub ops: Vec<String>,
    pub destroyed: bool,
}

impl DrawSurface for RecordingSurface {
    fn ellipse(&mut self, x: f32, y: f32, _width: f32, _height: f32, _color: Color) {
        self.ops.push(format!("ellipse {} {}", x, y));
    }

    fn rectangle(&mut self, x: f32, y: f32, _width: f32, _height: f32, _color: Color) {
        self.ops.push(format!("rectangle {} {}", x, y));
    }

    fn line(&mut self, _x1: f32, _y1: f32, _x2: f32, _y2: f32) {
        self.ops.push("line".to_string());
    }

    fn text(&mut self, _x: f32, _y: f32, text: &str, _color: Option<Color>, _size: Option<u32>) {
        self.ops.push(format!("text {}", text));
    }

    fn clear(&mut self) {
        assert!(!self.destroyed, "clear() on a destroyed surface");
        self.ops.push("clear".to_string());
    }

    fn present_frame(&mut self, target_frame_rate: u32) {
        self.ops.push(format!("present {}", target_frame_rate));
    }

    fn is_destroyed(&self) -> bool {
        self.destroyed
    }
}
