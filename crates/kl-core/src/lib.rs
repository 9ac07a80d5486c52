//! Core domain logic for the speed-skating klassement tool.
//!
//! This crate contains the fundamental types and logic for:
//! - Points: seconds per 500m, truncated to 3 decimals (never rounded)
//! - Standings: full/partial grouping, dense ranks, delta to the leader
//! - Qualification: allround final-distance advancement (dual-ranking swap)
//! - Head-to-head: the maximum time that still beats a target total
//!
//! Everything here is a pure, synchronous transform: the same
//! [`RaceResultSet`] and [`Distance`] configuration always produce identical
//! output. Loading results (live feed, files, manual entry) and rendering
//! belong to the caller.

mod athlete;
mod distance;
mod head_to_head;
mod mock;
mod points;
mod qualification;
mod standings;
mod time;
mod trunc;
mod types;

pub use athlete::{AthleteResult, RaceResult, RaceResultSet};
pub use distance::{ConfigError, Discipline, Distance, Gender, distance_set};
pub use head_to_head::{HeadToHead, HeadToHeadError, TargetSelector, resolve_target, solve_head_to_head};
pub use mock::mock_results;
pub use points::{AthletePoints, compute_athlete_points};
pub use qualification::{
    QUALIFYING_SPOTS, QualificationDetail, QualificationError, QualificationStatus,
    resolve_qualification,
};
pub use standings::{ComputedAthlete, Standings, build_standings};
pub use time::{format_seconds_to_time, parse_time_to_seconds};
pub use trunc::truncate_decimals;
pub use types::{AthleteId, RaceStatus, UnknownRaceStatus, ValidationError};
