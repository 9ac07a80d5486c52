//! Per-athlete points computation.

use std::collections::HashMap;

use crate::athlete::AthleteResult;
use crate::distance::Distance;
use crate::time::parse_time_to_seconds;
use crate::trunc::truncate_decimals;

/// Number of decimals all point values are truncated to.
pub(crate) const POINT_DECIMALS: usize = 3;

/// Derived point values for one athlete over a configured distance set.
///
/// Absent map keys mean the distance produced no countable result (non-OK
/// status, missing entry, or unparseable time).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AthletePoints {
    /// Parsed race time per distance key.
    pub seconds: HashMap<String, f64>,
    /// Truncated points (`seconds / divisor`) per distance key.
    pub points: HashMap<String, f64>,
    /// Truncated sum over all distances; `Some` only when every configured
    /// distance has a countable result.
    pub total_points: Option<f64>,
    /// Truncated sum over the countable distances; `Some` when at least one
    /// distance counts. Equals `total_points` for a complete athlete.
    pub partial_sum: Option<f64>,
    /// Number of distances with a countable result.
    pub completed_count: usize,
}

impl AthletePoints {
    /// Points for one distance key, if countable.
    pub fn points_for(&self, key: &str) -> Option<f64> {
        self.points.get(key).copied()
    }

    /// Parsed seconds for one distance key, if countable.
    pub fn seconds_for(&self, key: &str) -> Option<f64> {
        self.seconds.get(key).copied()
    }

    /// Whether every configured distance has a countable result.
    pub const fn has_all(&self) -> bool {
        self.total_points.is_some()
    }
}

/// Computes seconds, per-distance points and totals for one athlete.
///
/// Per-distance points are truncated individually; the total is the exact
/// sum of those truncated values, truncated once more at the end. The order
/// matters: truncating per addition would drift from the published tables.
pub fn compute_athlete_points(athlete: &AthleteResult, distances: &[Distance]) -> AthletePoints {
    let mut computed = AthletePoints::default();
    let mut running_total = 0.0;

    for dist in distances {
        let seconds = athlete
            .result(&dist.key)
            .filter(|r| r.status.is_ok())
            .and_then(|r| r.time.as_deref())
            .and_then(parse_time_to_seconds);

        let Some(sec) = seconds else {
            continue;
        };
        let Some(points) = truncate_decimals(sec / dist.divisor, POINT_DECIMALS) else {
            continue;
        };

        computed.seconds.insert(dist.key.clone(), sec);
        computed.points.insert(dist.key.clone(), points);
        running_total += points;
        computed.completed_count += 1;
    }

    if computed.completed_count > 0 {
        computed.partial_sum = truncate_decimals(running_total, POINT_DECIMALS);
    }
    if computed.completed_count == distances.len() {
        computed.total_points = computed.partial_sum;
    }

    computed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::{Discipline, Gender, distance_set};
    use crate::types::{AthleteId, RaceStatus};

    fn sprint() -> Vec<Distance> {
        distance_set(Discipline::Sprint, Gender::Men)
    }

    fn athlete() -> AthleteResult {
        AthleteResult::new(AthleteId::new("a1").unwrap(), "Rijder A")
    }

    #[test]
    fn points_are_seconds_per_500m_truncated() {
        let a = athlete().with_time("d1_1000", "1:09.86");
        let computed = compute_athlete_points(&a, &sprint());

        // 69.86s over a divisor of 2 -> 34.930
        assert_eq!(computed.points_for("d1_1000"), Some(34.93));
        assert_eq!(computed.seconds_for("d1_1000"), Some(69.86));
        assert_eq!(computed.completed_count, 1);
        assert_eq!(computed.total_points, None);
        assert_eq!(computed.partial_sum, Some(34.93));
    }

    #[test]
    fn truncation_applies_per_distance() {
        // 1:45.80 = 105.8s over divisor 3 = 35.2666… -> 35.266, not 35.267
        let distances = distance_set(Discipline::Allround, Gender::Men);
        let a = athlete().with_time("d1_1500", "1:45.80");
        let computed = compute_athlete_points(&a, &distances);
        assert_eq!(computed.points_for("d1_1500"), Some(35.266));
    }

    #[test]
    fn total_is_sum_of_truncated_points_truncated_once() {
        let a = athlete()
            .with_time("d1_500", "34.72")
            .with_time("d1_1000", "2:19.86")
            .with_time("d2_500", "34.81")
            .with_time("d2_1000", "2:20.22");
        let computed = compute_athlete_points(&a, &sprint());

        // Per-distance: 34.720, 69.930, 34.810, 70.110
        assert_eq!(computed.points_for("d1_1000"), Some(69.93));
        assert_eq!(computed.points_for("d2_1000"), Some(70.11));
        assert_eq!(computed.total_points, Some(209.57));
        assert_eq!(computed.completed_count, 4);
        assert!(computed.has_all());
    }

    #[test]
    fn non_ok_status_excludes_distance() {
        for status in [RaceStatus::Dns, RaceStatus::Dnf, RaceStatus::Dq] {
            let a = athlete()
                .with_time("d1_500", "34.72")
                .with_time("d1_1000", "1:09.86")
                .with_time("d2_500", "34.81")
                .with_status("d2_1000", status);
            let computed = compute_athlete_points(&a, &sprint());

            assert_eq!(computed.total_points, None, "{status} should void the total");
            assert_eq!(computed.completed_count, 3);
            assert_eq!(computed.points_for("d2_1000"), None);
        }
    }

    #[test]
    fn unparseable_time_excludes_distance() {
        let a = athlete()
            .with_time("d1_500", "34.72")
            .with_time("d1_1000", "not a time");
        let computed = compute_athlete_points(&a, &sprint());

        assert_eq!(computed.points_for("d1_1000"), None);
        assert_eq!(computed.completed_count, 1);
    }

    #[test]
    fn time_on_a_non_ok_result_does_not_count() {
        // A recorded lap time is void once the athlete is disqualified
        let mut a = athlete();
        a.results.insert(
            "d1_500".to_string(),
            crate::athlete::RaceResult {
                time: Some("34.72".to_string()),
                status: RaceStatus::Dq,
            },
        );
        let computed = compute_athlete_points(&a, &sprint());
        assert_eq!(computed.completed_count, 0);
        assert_eq!(computed.partial_sum, None);
    }

    #[test]
    fn empty_athlete_has_no_sums() {
        let computed = compute_athlete_points(&athlete(), &sprint());
        assert_eq!(computed.completed_count, 0);
        assert_eq!(computed.partial_sum, None);
        assert_eq!(computed.total_points, None);
        assert!(!computed.has_all());
    }
}
