//! Seam between the round loop and whatever schedules its ticks

use std::future::Future;

use super::state::InputSignal;

/// One scheduler wake-up: the current time plus input gathered since the
/// previous tick, applied before the tick runs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    pub now_ms: f64,
    pub signals: Vec<InputSignal>,
}

/// Source of ticks, e.g. an animation-frame callback or a fixed timer.
///
/// The round awaits `next_tick` between ticks; that await is the only place
/// the simulation suspends.
pub trait TickSource {
    fn next_tick(&mut self) -> impl Future<Output = TickInput>;
}
