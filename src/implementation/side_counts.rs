use crate::structs::visit::{Door, Visit};
use core::borrow::Borrow;

/// How often each door received the first nosepoke of a visit.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SideCounts {
    pub left: usize,
    pub right: usize,
}

impl SideCounts {
    pub fn total(&self) -> usize {
        self.left + self.right
    }

    pub fn count(&self, door: Door) -> usize {
        match door {
            Door::Left => self.left,
            Door::Right => self.right,
        }
    }
}

/// Counts the doors of first nosepokes; visits without nosepokes are skipped.
pub fn count_first_nosepoke_sides<V: Borrow<Visit>>(visits: &[V]) -> SideCounts {
    visits
        .iter()
        .filter_map(|visit| {
            let visit: &Visit = visit.borrow();
            visit.first_nosepoke()
        })
        .fold(SideCounts::default(), |mut counts, nosepoke| {
            match nosepoke.door {
                Door::Left => counts.left += 1,
                Door::Right => counts.right += 1,
            }
            counts
        })
}
