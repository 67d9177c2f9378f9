//! Bounded position history between two worm segments

use std::collections::VecDeque;

use glam::Vec2;

/// Fixed-capacity FIFO of positions a leader has vacated.
///
/// Once full, every push hands back the oldest entry, which is where the
/// follower moves next.
#[derive(Debug, Clone)]
pub struct TrailBuffer {
    positions: VecDeque<Vec2>,
    capacity: usize,
}

impl TrailBuffer {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            positions: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Push `pos`; returns the displaced oldest position when full
    pub fn enqueue(&mut self, pos: Vec2) -> Option<Vec2> {
        let displaced = if self.positions.len() >= self.capacity {
            self.positions.pop_front()
        } else {
            None
        };
        self.positions.push_back(pos);
        displaced
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
