//! Intervals between consecutive visits to the same corner.

use crate::structs::visit::Visit;
use chrono::TimeDelta;
use core::borrow::Borrow;
use core::slice::Windows;

/// Gaps between consecutive visits, see [`intervisit_intervals`].
#[derive(Debug, Clone)]
pub struct IntervisitIntervals<'a, V> {
    pairs: Windows<'a, V>,
}

impl<V: Borrow<Visit>> Iterator for IntervisitIntervals<'_, V> {
    type Item = TimeDelta;

    fn next(&mut self) -> Option<TimeDelta> {
        self.pairs.next().map(|pair| {
            let (current, next): (&Visit, &Visit) = (pair[0].borrow(), pair[1].borrow());
            next.start - current.end
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.pairs.size_hint()
    }
}

impl<V: Borrow<Visit>> ExactSizeIterator for IntervisitIntervals<'_, V> {}

/// Time from the end of each visit to the start of the next one.
///
/// `visits` should belong to a single (cage, corner) pair and be sorted by
/// start, see [`select_corner`]. The result is one element shorter than the
/// input, and empty for fewer than two visits.
///
/// Overlapping visits yield negative intervals; they are passed through as
/// they are.
pub fn intervisit_intervals<V: Borrow<Visit>>(visits: &[V]) -> IntervisitIntervals<'_, V> {
    IntervisitIntervals {
        pairs: visits.windows(2),
    }
}

/// The visits to one corner of one cage, in their original order.
pub fn select_corner<V: Borrow<Visit>>(visits: &[V], cage: u32, corner: u32) -> Vec<&Visit> {
    visits
        .iter()
        .map(<V as Borrow<Visit>>::borrow)
        .filter(|visit| visit.cage == cage && visit.corner == corner)
        .collect()
}

/// Converts durations to fractional seconds.
pub fn to_seconds(intervals: impl IntoIterator<Item = TimeDelta>) -> Vec<f64> {
    intervals.into_iter().map(seconds).collect()
}

/// A duration in fractional seconds; negative durations stay negative.
pub fn seconds(duration: TimeDelta) -> f64 {
    duration.num_seconds() as f64 + duration.subsec_nanos() as f64 / 1e9
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utilities::tests::fixtures::visit;
    use itertools::Itertools;

    #[test]
    fn fewer_than_two_visits_have_no_intervals() {
        let none: Vec<Visit> = Vec::new();
        assert_eq!(intervisit_intervals(&none).count(), 0);
        assert_eq!(intervisit_intervals(&[visit("Jerry", 0, 10)]).count(), 0);
    }

    #[test]
    fn yields_gap_between_each_adjacent_pair() {
        let visits = [
            visit("Jerry", 0, 10),
            visit("Jerry", 25, 30),
            visit("Tom", 90, 100),
        ];

        let intervals = intervisit_intervals(&visits);
        assert_eq!(intervals.len(), 2);
        assert_eq!(
            intervals.collect_vec(),
            vec![TimeDelta::seconds(15), TimeDelta::seconds(60)]
        );
    }

    #[test]
    fn overlapping_visits_yield_negative_intervals() {
        let visits = [visit("Jerry", 0, 10), visit("Tom", 4, 20)];
        assert_eq!(
            to_seconds(intervisit_intervals(&visits)),
            vec![-6.0]
        );
    }

    #[test]
    fn can_restart_and_works_on_references() {
        let visits = [visit("Jerry", 0, 10), visit("Jerry", 20, 30), visit("Jerry", 31, 40)];
        let references: Vec<&Visit> = visits.iter().collect();

        let intervals = intervisit_intervals(&references);
        let first_pass = intervals.clone().collect_vec();
        let second_pass = intervals.collect_vec();

        assert_eq!(first_pass, second_pass);
        assert_eq!(first_pass.len(), 2);
    }

    #[test]
    fn selects_one_corner_in_order() {
        let mut visits = vec![
            visit("Jerry", 0, 10),
            visit("Tom", 20, 30),
            visit("Jerry", 40, 50),
        ];
        visits[1].corner = 3;
        visits[2].cage = 2;

        let selected = select_corner(&visits, 1, 1);
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].start, visits[0].start);
        assert_eq!(select_corner(&visits, 1, 3)[0].subject, "Tom");
        assert!(select_corner(&visits, 2, 3).is_empty());
    }

    #[test]
    fn converts_fractional_seconds() {
        assert_eq!(seconds(TimeDelta::milliseconds(1500)), 1.5);
        assert_eq!(seconds(TimeDelta::milliseconds(-1500)), -1.5);
    }
}
