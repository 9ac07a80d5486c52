//! Standings aggregation.
//!
//! Builds the klassement from a raw result snapshot: full totals first
//! (lowest wins), then partial athletes by how much they have skated. Every
//! data change triggers a full rebuild; there is no incremental path.

use std::cmp::Ordering;

use crate::athlete::{AthleteResult, RaceResultSet};
use crate::distance::Distance;
use crate::points::{AthletePoints, POINT_DECIMALS, compute_athlete_points};
use crate::trunc::truncate_decimals;
use crate::types::AthleteId;

/// One athlete with everything the views need: the raw input, the derived
/// point values, and the overall placement.
#[derive(Debug, Clone, PartialEq)]
pub struct ComputedAthlete {
    /// The raw input record.
    pub result: AthleteResult,
    /// Derived seconds/points/totals.
    pub points: AthletePoints,
    /// Dense overall rank; `None` for athletes with no countable result.
    pub rank: Option<u32>,
    /// Truncated points behind the leader; `None` when not comparable.
    pub delta: Option<f64>,
}

impl ComputedAthlete {
    pub fn athlete_id(&self) -> &AthleteId {
        &self.result.athlete_id
    }

    pub fn name(&self) -> &str {
        &self.result.name
    }

    /// The value this athlete competes on: the full total when present,
    /// otherwise the partial sum.
    fn comparison_value(&self) -> Option<f64> {
        self.points.total_points.or(self.points.partial_sum)
    }
}

/// The ranked klassement for one discipline/gender selection.
///
/// `all` holds the full group (complete totals, ascending) as a prefix,
/// followed by the partial group. Rebuilt wholesale on every input change.
#[derive(Debug, Clone, PartialEq)]
pub struct Standings {
    all: Vec<ComputedAthlete>,
    full_count: usize,
}

impl Standings {
    /// All athletes in display order.
    pub fn all(&self) -> &[ComputedAthlete] {
        &self.all
    }

    /// Athletes with a complete total, ascending by total points.
    pub fn full(&self) -> &[ComputedAthlete] {
        &self.all[..self.full_count]
    }

    /// Athletes without a complete total.
    pub fn partial(&self) -> &[ComputedAthlete] {
        &self.all[self.full_count..]
    }

    /// Looks up an athlete by id.
    pub fn athlete(&self, id: &AthleteId) -> Option<&ComputedAthlete> {
        self.all.iter().find(|c| c.athlete_id() == id)
    }

    /// Independent sub-ranking for one distance: every athlete with a
    /// parsed time on `key`, fastest first. Unrelated to the overall rank.
    pub fn distance_ranking(&self, key: &str) -> Vec<&ComputedAthlete> {
        let mut ranked: Vec<&ComputedAthlete> = self
            .all
            .iter()
            .filter(|c| c.points.seconds_for(key).is_some())
            .collect();
        // Stable over standings order, so equal times keep a fixed order
        ranked.sort_by(|a, b| {
            compare_f64(
                a.points.seconds_for(key),
                b.points.seconds_for(key),
            )
        });
        ranked
    }
}

/// Ascending comparison treating `None` as "after everything".
fn compare_f64(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Builds the full klassement from one result snapshot.
///
/// Ordering rules:
/// - Full group: ascending total points; equal totals keep input order.
/// - Partial group: descending completed count, then ascending partial sum,
///   then input order.
/// - Ranks are dense 1..N over everyone who skated at least one distance;
///   athletes with nothing countable get no rank and sort last.
/// - Delta is relative to rank 1 and only defined within the leader's
///   group: totals against the leader's total, or partial sums against the
///   top partial sum when nobody has finished yet.
///
/// The distance configuration must be non-empty; an empty set is a caller
/// bug, not a data condition.
pub fn build_standings(results: &RaceResultSet, distances: &[Distance]) -> Standings {
    assert!(
        !distances.is_empty(),
        "distance configuration must not be empty"
    );

    let mut computed: Vec<ComputedAthlete> = results
        .athletes
        .iter()
        .map(|athlete| ComputedAthlete {
            points: compute_athlete_points(athlete, distances),
            result: athlete.clone(),
            rank: None,
            delta: None,
        })
        .collect();

    // Stable sorts: ties keep the original feed order
    let (mut full, mut partial): (Vec<_>, Vec<_>) = computed
        .drain(..)
        .partition(|c| c.points.total_points.is_some());
    full.sort_by(|a, b| compare_f64(a.points.total_points, b.points.total_points));
    partial.sort_by(|a, b| {
        b.points
            .completed_count
            .cmp(&a.points.completed_count)
            .then_with(|| compare_f64(a.points.partial_sum, b.points.partial_sum))
    });

    let full_count = full.len();
    let mut all = full;
    all.append(&mut partial);

    let mut next_rank = 1u32;
    for athlete in &mut all {
        if athlete.points.completed_count > 0 {
            athlete.rank = Some(next_rank);
            next_rank += 1;
        }
    }

    let leader_value = all.first().and_then(ComputedAthlete::comparison_value);
    let leader_is_full = full_count > 0;
    if let Some(leader_value) = leader_value {
        for athlete in &mut all {
            let value = if leader_is_full {
                athlete.points.total_points
            } else {
                athlete.points.partial_sum
            };
            athlete.delta =
                value.and_then(|v| truncate_decimals(v - leader_value, POINT_DECIMALS));
        }
    }

    tracing::debug!(
        athletes = all.len(),
        full = full_count,
        "standings rebuilt"
    );

    Standings { all, full_count }
}
