//! Latest-pointer cell shared between the input handler and the frame loop.
//!
//! One writer (the event handler) stores positions, one reader (the tick)
//! loads them. Both `f32` coordinates are packed into a single `AtomicU64`, so
//! a reader can never observe `x` from one write and `y` from another. There
//! is no history: a read returns whatever was written last.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use glam::Vec2;

/// Encoded "no pointer" marker: both halves are NaN bit patterns.
const ABSENT: u64 = u64::MAX;

fn pack(x: f32, y: f32) -> u64 {
    ((x.to_bits() as u64) << 32) | y.to_bits() as u64
}

fn unpack(bits: u64) -> Vec2 {
    Vec2::new(f32::from_bits((bits >> 32) as u32), f32::from_bits(bits as u32))
}

/// Shared handle to the latest pointer position.
///
/// Cloning yields another handle to the same cell.
#[derive(Debug, Clone)]
pub struct PointerCell {
    bits: Arc<AtomicU64>,
}

impl PointerCell {
    /// Position far outside any field, used by hosts that need a concrete
    /// coordinate for "no pointer".
    pub const OFFSCREEN: Vec2 = Vec2::new(-1000.0, -1000.0);

    /// A cell with no pointer.
    pub fn new() -> Self {
        Self {
            bits: Arc::new(AtomicU64::new(ABSENT)),
        }
    }

    /// Publish a new position.
    pub fn set(&self, position: Vec2) {
        self.bits.store(pack(position.x, position.y), Ordering::Relaxed);
    }

    /// Forget the pointer, e.g. when it leaves the section.
    pub fn clear(&self) {
        self.bits.store(ABSENT, Ordering::Relaxed);
    }

    /// Latest position, or `None` if the pointer is absent.
    pub fn get(&self) -> Option<Vec2> {
        let position = unpack(self.bits.load(Ordering::Relaxed));
        if position.is_nan() {
            None
        } else {
            Some(position)
        }
    }
}

impl Default for PointerCell {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_starts_absent() {
        assert_eq!(PointerCell::new().get(), None);
    }

    #[test]
    fn test_set_get_clear() {
        let cell = PointerCell::new();
        cell.set(Vec2::new(12.5, -3.0));
        assert_eq!(cell.get(), Some(Vec2::new(12.5, -3.0)));
        cell.clear();
        assert_eq!(cell.get(), None);
    }

    #[test]
    fn test_clones_share_state() {
        let writer = PointerCell::new();
        let reader = writer.clone();
        let handle = thread::spawn(move || writer.set(Vec2::new(7.0, 8.0)));
        handle.join().unwrap();
        assert_eq!(reader.get(), Some(Vec2::new(7.0, 8.0)));
    }
}
