//! Allround final-distance qualification.
//!
//! Before the last distance of an allround tournament, eight riders
//! advance. The selection combines two rankings: the klassement over the
//! distances skated so far, and the raw times on the last of those
//! distances. Riders in the klassement top 8 who miss the distance top 8
//! give up their spot; riders in the distance top 8 who miss the klassement
//! top 8 take those spots in their own distance-rank order.

use std::fmt;

use thiserror::Error;

use crate::athlete::RaceResultSet;
use crate::distance::Distance;
use crate::points::{POINT_DECIMALS, compute_athlete_points};
use crate::time::parse_time_to_seconds;
use crate::trunc::truncate_decimals;
use crate::types::AthleteId;

/// Number of riders that advance to the final distance.
pub const QUALIFYING_SPOTS: usize = 8;

/// Qualification errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QualificationError {
    /// Qualification needs at least two pre-final distances.
    #[error("qualification needs at least 3 configured distances, got {count}")]
    TooFewDistances { count: usize },
}

/// How a rider relates to the two top-8 sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QualificationStatus {
    /// Top 8 in both rankings; qualified outright.
    Both,
    /// Distance top 8 only; takes an open spot.
    DistSwap,
    /// Klassement top 8 only; spot given up.
    KlassOnly,
    /// Not advancing.
    Out,
}

impl QualificationStatus {
    /// Canonical code for display and JSON output.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Both => "both",
            Self::DistSwap => "dist_swap",
            Self::KlassOnly => "klass_only",
            Self::Out => "out",
        }
    }

    /// Whether this status advances to the final distance.
    pub const fn advances(self) -> bool {
        matches!(self, Self::Both | Self::DistSwap)
    }
}

impl fmt::Display for QualificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Per-rider qualification outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct QualificationDetail {
    pub athlete_id: AthleteId,
    pub name: String,
    /// Rank in the partial klassement over the skated distances, if the
    /// rider has all of them.
    pub klass_rank: Option<u32>,
    /// Rank on the qualifying distance, if the rider has a time there.
    pub dist_rank: Option<u32>,
    pub status: QualificationStatus,
    /// Human-readable explanation; display-only, never parsed.
    pub reason: String,
}

/// Working record while the two rankings are being combined.
struct Candidate {
    index: usize,
    athlete_id: AthleteId,
    name: String,
    klass_rank: Option<u32>,
    dist_rank: Option<u32>,
}

/// Resolves final-distance qualification for an allround distance set.
///
/// The last configured distance is the final distance. The klassement
/// subset is the first three distances when the third has been skated (at
/// least one countable result), otherwise the first two; the qualifying
/// distance is the last distance of that subset. The two-or-three mode is
/// derived from the data on every call, never stored.
pub fn resolve_qualification(
    results: &RaceResultSet,
    distances: &[Distance],
) -> Result<Vec<QualificationDetail>, QualificationError> {
    if distances.len() < 3 {
        return Err(QualificationError::TooFewDistances {
            count: distances.len(),
        });
    }

    let candidates_pool = &distances[..distances.len() - 1];
    let subset_len = if candidates_pool.len() >= 3 && distance_skated(results, &candidates_pool[2])
    {
        3
    } else {
        2
    };
    let subset = &candidates_pool[..subset_len];
    let qualifying = &subset[subset_len - 1];

    tracing::debug!(
        subset = subset_len,
        qualifying = %qualifying.key,
        "resolving final-distance qualification"
    );

    let points: Vec<_> = results
        .athletes
        .iter()
        .map(|a| compute_athlete_points(a, distances))
        .collect();

    // Partial klassement: truncated sum over the subset, requiring every
    // subset distance; rank ascending, ties stable on input order.
    let mut klass_order: Vec<(usize, f64)> = points
        .iter()
        .enumerate()
        .filter_map(|(i, p)| {
            let mut sum = 0.0;
            for dist in subset {
                sum += p.points_for(&dist.key)?;
            }
            Some((i, truncate_decimals(sum, POINT_DECIMALS)?))
        })
        .collect();
    klass_order.sort_by(|a, b| a.1.total_cmp(&b.1));

    // Distance ranking: raw seconds on the qualifying distance, ascending.
    let mut dist_order: Vec<(usize, f64)> = points
        .iter()
        .enumerate()
        .filter_map(|(i, p)| Some((i, p.seconds_for(&qualifying.key)?)))
        .collect();
    dist_order.sort_by(|a, b| a.1.total_cmp(&b.1));

    let mut candidates: Vec<Candidate> = results
        .athletes
        .iter()
        .enumerate()
        .map(|(index, a)| Candidate {
            index,
            athlete_id: a.athlete_id.clone(),
            name: a.name.clone(),
            klass_rank: None,
            dist_rank: None,
        })
        .collect();
    for (rank0, (index, _)) in klass_order.iter().enumerate() {
        candidates[*index].klass_rank = Some(u32::try_from(rank0 + 1).unwrap_or(u32::MAX));
    }
    for (rank0, (index, _)) in dist_order.iter().enumerate() {
        candidates[*index].dist_rank = Some(u32::try_from(rank0 + 1).unwrap_or(u32::MAX));
    }

    let in_top = |rank: Option<u32>| rank.is_some_and(|r| r as usize <= QUALIFYING_SPOTS);

    let open_slots = candidates
        .iter()
        .filter(|c| in_top(c.klass_rank) && !in_top(c.dist_rank))
        .count();

    // Distance-only riders consume the open spots in distance-rank order;
    // that order (not klass rank) decides who gets in.
    let mut dist_only: Vec<usize> = candidates
        .iter()
        .filter(|c| in_top(c.dist_rank) && !in_top(c.klass_rank))
        .map(|c| c.index)
        .collect();
    dist_only.sort_by_key(|&i| candidates[i].dist_rank);
    let swapped_in: Vec<usize> = dist_only.iter().copied().take(open_slots).collect();

    let status_of = |c: &Candidate| {
        if in_top(c.klass_rank) && in_top(c.dist_rank) {
            QualificationStatus::Both
        } else if in_top(c.klass_rank) {
            QualificationStatus::KlassOnly
        } else if in_top(c.dist_rank) && swapped_in.contains(&c.index) {
            QualificationStatus::DistSwap
        } else {
            QualificationStatus::Out
        }
    };

    let reason_of = |c: &Candidate, status: QualificationStatus| match status {
        QualificationStatus::Both => {
            format!("top 8 in both the klassement and the {}", qualifying.label)
        }
        QualificationStatus::DistSwap => format!(
            "top 8 on the {}, fills a spot given up by the klassement top 8",
            qualifying.label
        ),
        QualificationStatus::KlassOnly => format!(
            "klassement top 8 only, spot goes to a faster {} rider",
            qualifying.label
        ),
        QualificationStatus::Out => {
            if in_top(c.dist_rank) {
                format!("top 8 on the {} but no spot left", qualifying.label)
            } else {
                "outside both top 8s".to_string()
            }
        }
    };

    let mut details: Vec<QualificationDetail> = candidates
        .iter()
        .map(|c| {
            let status = status_of(c);
            QualificationDetail {
                athlete_id: c.athlete_id.clone(),
                name: c.name.clone(),
                klass_rank: c.klass_rank,
                dist_rank: c.dist_rank,
                status,
                reason: reason_of(c, status),
            }
        })
        .collect();

    // Display order: qualified first (both by klass rank, then swap-ins by
    // distance rank), then klass-only by klass rank, then the rest.
    let group = |status: QualificationStatus| match status {
        QualificationStatus::Both => 0u8,
        QualificationStatus::DistSwap => 1,
        QualificationStatus::KlassOnly => 2,
        QualificationStatus::Out => 3,
    };
    let index_of = |d: &QualificationDetail| {
        results
            .athletes
            .iter()
            .position(|a| a.athlete_id == d.athlete_id)
            .unwrap_or(usize::MAX)
    };
    details.sort_by_key(|d| {
        let key_rank = match d.status {
            QualificationStatus::Both | QualificationStatus::KlassOnly => {
                (d.klass_rank.unwrap_or(u32::MAX), u32::MAX)
            }
            QualificationStatus::DistSwap => (d.dist_rank.unwrap_or(u32::MAX), u32::MAX),
            QualificationStatus::Out => (
                d.dist_rank.unwrap_or(u32::MAX),
                d.klass_rank.unwrap_or(u32::MAX),
            ),
        };
        (group(d.status), key_rank, index_of(d))
    });

    Ok(details)
}

/// Whether a distance has at least one countable result in the set.
fn distance_skated(results: &RaceResultSet, distance: &Distance) -> bool {
    results.athletes.iter().any(|a| {
        a.result(&distance.key)
            .filter(|r| r.status.is_ok())
            .and_then(|r| r.time.as_deref())
            .and_then(parse_time_to_seconds)
            .is_some()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::athlete::AthleteResult;
    use crate::distance::{Discipline, Gender, distance_set};
    use crate::mock::mock_results;

    fn id(s: &str) -> AthleteId {
        AthleteId::new(s).unwrap()
    }

    fn allround() -> Vec<Distance> {
        distance_set(Discipline::Allround, Gender::Men)
    }

    /// Ten riders with complete first-three results. Riders 1..=8 lead the
    /// klassement in order; riders 9 and 10 are slowest overall but skate
    /// the two fastest 5000m times, displacing riders 7 and 8.
    fn swap_scenario() -> RaceResultSet {
        let mut athletes = Vec::new();
        for i in 1..=8u32 {
            let t500 = format!("{:.2}", 35.0 + 0.1 * f64::from(i));
            let t5000 = format!("6:{:02}.00", 30 + i); // 6:31 … 6:38
            athletes.push(
                AthleteResult::new(id(&format!("a{i}")), format!("Rijder {i}"))
                    .with_time("d1_500", t500)
                    .with_time("d1_1500", "1:50.00")
                    .with_time("d1_5000", t5000),
            );
        }
        athletes.push(
            AthleteResult::new(id("a9"), "Rijder 9")
                .with_time("d1_500", "39.00")
                .with_time("d1_1500", "1:50.00")
                .with_time("d1_5000", "6:22.00"),
        );
        athletes.push(
            AthleteResult::new(id("a10"), "Rijder 10")
                .with_time("d1_500", "39.50")
                .with_time("d1_1500", "1:50.00")
                .with_time("d1_5000", "6:20.00"),
        );
        RaceResultSet::new(athletes)
    }

    fn statuses(details: &[QualificationDetail]) -> Vec<(&str, QualificationStatus)> {
        details
            .iter()
            .map(|d| (d.name.as_str(), d.status))
            .collect()
    }

    #[test]
    fn dist_top8_riders_swap_into_open_spots() {
        let details = resolve_qualification(&swap_scenario(), &allround()).unwrap();

        // Riders 1..=6 are in both top 8s; 9 and 10 swap in (fastest 5000m
        // first); 7 and 8 give up their klassement spots.
        assert_eq!(
            statuses(&details),
            vec![
                ("Rijder 1", QualificationStatus::Both),
                ("Rijder 2", QualificationStatus::Both),
                ("Rijder 3", QualificationStatus::Both),
                ("Rijder 4", QualificationStatus::Both),
                ("Rijder 5", QualificationStatus::Both),
                ("Rijder 6", QualificationStatus::Both),
                ("Rijder 10", QualificationStatus::DistSwap),
                ("Rijder 9", QualificationStatus::DistSwap),
                ("Rijder 7", QualificationStatus::KlassOnly),
                ("Rijder 8", QualificationStatus::KlassOnly),
            ]
        );

        let advancing: Vec<_> = details
            .iter()
            .filter(|d| d.status.advances())
            .map(|d| d.name.as_str())
            .collect();
        assert_eq!(advancing.len(), QUALIFYING_SPOTS);
        assert!(advancing.contains(&"Rijder 10"));
        assert!(!advancing.contains(&"Rijder 7"));
    }

    #[test]
    fn swap_scenario_ranks_are_reported() {
        let details = resolve_qualification(&swap_scenario(), &allround()).unwrap();

        let rider10 = details.iter().find(|d| d.name == "Rijder 10").unwrap();
        assert_eq!(rider10.dist_rank, Some(1));
        assert_eq!(rider10.klass_rank, Some(10));

        let rider7 = details.iter().find(|d| d.name == "Rijder 7").unwrap();
        assert_eq!(rider7.klass_rank, Some(7));
        assert_eq!(rider7.dist_rank, Some(9));
    }

    #[test]
    fn falls_back_to_first_two_distances_when_third_not_skated() {
        // Nobody has a 5000m time yet: klassement over 500+1500, the 1500m
        // is the qualifying distance.
        let set = RaceResultSet::new(vec![
            AthleteResult::new(id("a1"), "Rijder A")
                .with_time("d1_500", "35.10")
                .with_time("d1_1500", "1:46.00"),
            AthleteResult::new(id("a2"), "Rijder B")
                .with_time("d1_500", "35.40")
                .with_time("d1_1500", "1:47.00"),
            // Only a 1500m time: present in the distance ranking only
            AthleteResult::new(id("a3"), "Rijder C").with_time("d1_1500", "1:45.00"),
        ]);

        let details = resolve_qualification(&set, &allround()).unwrap();

        let a = details.iter().find(|d| d.name == "Rijder A").unwrap();
        assert_eq!(a.status, QualificationStatus::Both);
        assert!(a.reason.contains("1500m"));

        // No klassement rider gave up a spot, so there is nothing to fill
        let c = details.iter().find(|d| d.name == "Rijder C").unwrap();
        assert_eq!(c.status, QualificationStatus::Out);
        assert_eq!(c.klass_rank, None);
        assert_eq!(c.dist_rank, Some(1));
        assert!(c.reason.contains("no spot left"));
    }

    #[test]
    fn complete_small_field_qualifies_everyone_outright() {
        // The mock allround field has 8 complete riders: both top 8s are
        // identical.
        let set = mock_results(Discipline::Allround, Gender::Men);
        let details = resolve_qualification(&set, &allround()).unwrap();

        assert_eq!(details.len(), 8);
        assert!(
            details
                .iter()
                .all(|d| d.status == QualificationStatus::Both)
        );
        // Ordered by klassement rank
        let ranks: Vec<_> = details.iter().map(|d| d.klass_rank).collect();
        assert_eq!(
            ranks,
            (1..=8).map(Some).collect::<Vec<_>>()
        );
    }

    #[test]
    fn rider_outside_both_rankings_is_out() {
        let mut set = swap_scenario();
        set.athletes
            .push(AthleteResult::new(id("a11"), "Rijder 11"));

        let details = resolve_qualification(&set, &allround()).unwrap();
        let last = details.last().unwrap();
        assert_eq!(last.name, "Rijder 11");
        assert_eq!(last.status, QualificationStatus::Out);
        assert_eq!(last.reason, "outside both top 8s");
        assert_eq!(last.klass_rank, None);
        assert_eq!(last.dist_rank, None);
    }

    #[test]
    fn too_few_distances_is_an_error() {
        let distances = vec![
            Distance::new("d1_500", 500, "500m").unwrap(),
            Distance::new("d1_1500", 1500, "1500m").unwrap(),
        ];
        let result = resolve_qualification(&RaceResultSet::default(), &distances);
        assert_eq!(
            result,
            Err(QualificationError::TooFewDistances { count: 2 })
        );
    }
}
