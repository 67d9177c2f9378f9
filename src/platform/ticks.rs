//! Tick sources that need no event loop

use std::collections::VecDeque;
use std::future::{Future, ready};
use std::pin::pin;
use std::task::{Context, Poll, Waker};

use crate::sim::{InputSignal, TickInput, TickSource};

/// Ticks at a fixed interval of simulated time, replaying scripted input.
///
/// The first tick is at 0ms. A scripted signal is delivered with the first
/// tick whose time is at or past its timestamp.
#[derive(Debug, Clone)]
pub struct FixedStepTicks {
    now_ms: f64,
    step_ms: f64,
    script: VecDeque<(f64, InputSignal)>,
}

impl FixedStepTicks {
    pub fn new(step_ms: f64) -> Self {
        Self {
            now_ms: 0.0,
            step_ms,
            script: VecDeque::new(),
        }
    }

    /// Attach `(at_ms, signal)` pairs; they are sorted by time
    pub fn with_script(mut self, mut script: Vec<(f64, InputSignal)>) -> Self {
        script.sort_by(|a, b| a.0.total_cmp(&b.0));
        self.script = script.into();
        self
    }

    fn take_input(&mut self) -> TickInput {
        let now_ms = self.now_ms;
        let mut signals = Vec::new();
        while let Some(&(at, signal)) = self.script.front() {
            if at > now_ms {
                break;
            }
            signals.push(signal);
            self.script.pop_front();
        }
        self.now_ms += self.step_ms;
        TickInput { now_ms, signals }
    }
}

impl TickSource for FixedStepTicks {
    fn next_tick(&mut self) -> impl Future<Output = TickInput> {
        ready(self.take_input())
    }
}

/// Drive a future whose wake-ups never depend on an outside reactor,
/// such as `Round::start` over `FixedStepTicks`.
pub fn block_on<F: Future>(future: F) -> F::Output {
    let mut future = pin!(future);
    let mut cx = Context::from_waker(Waker::noop());
    loop {
        if let Poll::Ready(output) = future.as_mut().poll(&mut cx) {
            return output;
        }
    }
}
