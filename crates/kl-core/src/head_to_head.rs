//! Head-to-head target-time projection.
//!
//! Answers "how fast must this rider skate the focus distance to end up
//! with strictly fewer total points than the target?". Because points are
//! truncated, the answer is the supremum of a truncation bucket, not a
//! simple division.

use thiserror::Error;

use crate::distance::Distance;
use crate::points::POINT_DECIMALS;
use crate::standings::{ComputedAthlete, Standings};
use crate::trunc::truncate_decimals;
use crate::types::AthleteId;

/// Margin subtracted from the target total before truncation: one unit at
/// the third decimal, turning "at most" into "strictly fewer".
const STRICT_MARGIN: f64 = 0.001;

/// Offset to the supremum of a truncation bucket. Any raw points value in
/// `[p, p + 0.001)` truncates to `p`, so `p + 0.000999` is the largest
/// representable value that still truncates to `p`; `p + 0.001` would land
/// in the next bucket.
const BUCKET_CEILING: f64 = 0.000999;

/// How the target of a projection is chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetSelector {
    /// The rider currently at this 1-based rank in the full klassement.
    Rank(u32),
    /// A specific rider, who must have a complete total.
    Athlete(AthleteId),
}

/// A successful projection.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadToHead {
    pub athlete_id: AthleteId,
    pub athlete_name: String,
    pub target_id: AthleteId,
    pub target_name: String,
    /// The distance left as the free variable.
    pub focus: Distance,
    /// The rider's truncated points sum over every other distance.
    pub points_without_focus: f64,
    /// The target's total minus the strictness margin, truncated.
    pub allowed_total: f64,
    /// Maximum focus-distance time that still beats the target.
    pub max_time_seconds: f64,
}

/// Why a projection could not be computed. All of these are ordinary
/// outcomes for a tournament in progress, not crashes.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HeadToHeadError {
    /// The acting rider is not in the standings.
    #[error("rider {0} not found in the standings")]
    AthleteNotFound(AthleteId),

    /// The target rank or rider could not be resolved.
    #[error("no target could be resolved")]
    TargetNotResolved,

    /// The target rider exists but has no complete total.
    #[error("target {0} has no valid total")]
    TargetWithoutTotal(AthleteId),

    /// The focus distance is not part of the configured set.
    #[error("focus distance {0} is not configured")]
    UnknownFocusDistance(String),

    /// The rider misses countable points on a non-focus distance.
    #[error("rider misses valid points on the {0}")]
    MissingPoints(String),

    /// The target cannot be beaten with the points already fixed.
    #[error("impossible to pass the target with the current points")]
    Impossible,
}

/// Resolves a target selector against the full group of the standings.
///
/// Only riders with a complete total can be targets; a rank outside the
/// full group or an unknown rider is a resolution failure, never a clamp.
pub fn resolve_target<'a>(
    standings: &'a Standings,
    selector: &TargetSelector,
) -> Result<&'a ComputedAthlete, HeadToHeadError> {
    match selector {
        TargetSelector::Rank(rank) => {
            let index = usize::try_from(rank.checked_sub(1).ok_or(HeadToHeadError::TargetNotResolved)?)
                .map_err(|_| HeadToHeadError::TargetNotResolved)?;
            standings
                .full()
                .get(index)
                .ok_or(HeadToHeadError::TargetNotResolved)
        }
        TargetSelector::Athlete(id) => {
            let athlete = standings
                .athlete(id)
                .ok_or(HeadToHeadError::TargetNotResolved)?;
            if athlete.points.total_points.is_some() {
                Ok(athlete)
            } else {
                Err(HeadToHeadError::TargetWithoutTotal(id.clone()))
            }
        }
    }
}

/// Computes the maximum focus-distance time that still yields strictly
/// fewer total points than the target.
///
/// The rider's other distances are taken as already skated: their truncated
/// points are summed (and truncated once), subtracted from the target's
/// allowed total, and the remaining points budget is converted back into a
/// time through the focus divisor.
pub fn solve_head_to_head(
    standings: &Standings,
    distances: &[Distance],
    athlete_id: &AthleteId,
    target: &TargetSelector,
    focus_key: &str,
) -> Result<HeadToHead, HeadToHeadError> {
    let athlete = standings
        .athlete(athlete_id)
        .ok_or_else(|| HeadToHeadError::AthleteNotFound(athlete_id.clone()))?;
    let target_athlete = resolve_target(standings, target)?;

    let focus = distances
        .iter()
        .find(|d| d.key == focus_key)
        .ok_or_else(|| HeadToHeadError::UnknownFocusDistance(focus_key.to_string()))?;

    let mut without = 0.0;
    for dist in distances {
        if dist.key == focus.key {
            continue;
        }
        let points = athlete
            .points
            .points_for(&dist.key)
            .ok_or_else(|| HeadToHeadError::MissingPoints(dist.label.clone()))?;
        without += points;
    }
    let without =
        truncate_decimals(without, POINT_DECIMALS).ok_or(HeadToHeadError::Impossible)?;

    let target_total = target_athlete
        .points
        .total_points
        .ok_or_else(|| HeadToHeadError::TargetWithoutTotal(target_athlete.athlete_id().clone()))?;

    let allowed_total = truncate_decimals(target_total - STRICT_MARGIN, POINT_DECIMALS)
        .ok_or(HeadToHeadError::Impossible)?;
    let allowed_for_focus = truncate_decimals(allowed_total - without, POINT_DECIMALS)
        .ok_or(HeadToHeadError::Impossible)?;

    if allowed_for_focus <= 0.0 {
        return Err(HeadToHeadError::Impossible);
    }

    let max_time_seconds = (allowed_for_focus + BUCKET_CEILING) * focus.divisor;

    Ok(HeadToHead {
        athlete_id: athlete.athlete_id().clone(),
        athlete_name: athlete.name().to_string(),
        target_id: target_athlete.athlete_id().clone(),
        target_name: target_athlete.name().to_string(),
        focus: focus.clone(),
        points_without_focus: without,
        allowed_total,
        max_time_seconds,
    })
}
