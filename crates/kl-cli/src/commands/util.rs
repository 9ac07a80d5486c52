//! Shared utilities for CLI commands.

use std::path::Path;

use anyhow::{Context, Result};
use kl_core::{
    ComputedAthlete, Discipline, Distance, Gender, RaceResultSet, Standings,
    format_seconds_to_time, mock_results,
};

/// Placeholder for absent values in tables.
pub const DASH: &str = "—";

/// Loads a results file, or falls back to the built-in mock data.
pub fn load_results(
    path: Option<&Path>,
    discipline: Discipline,
    gender: Gender,
) -> Result<RaceResultSet> {
    match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read results file {}", path.display()))?;
            let set: RaceResultSet = serde_json::from_str(&text)
                .with_context(|| format!("failed to parse results file {}", path.display()))?;
            tracing::debug!(path = %path.display(), athletes = set.athletes.len(), "loaded results file");
            Ok(set)
        }
        None => {
            tracing::debug!(%discipline, %gender, "using built-in mock results");
            Ok(mock_results(discipline, gender))
        }
    }
}

/// Formats an optional points value to 3 decimals.
pub fn fmt_points(points: Option<f64>) -> String {
    points.map_or_else(|| DASH.to_string(), |p| format!("{p:.3}"))
}

/// Formats an optional time in seconds.
pub fn fmt_time(seconds: Option<f64>) -> String {
    seconds.map_or_else(|| DASH.to_string(), format_seconds_to_time)
}

/// Formats an optional rank.
pub fn fmt_rank(rank: Option<u32>) -> String {
    rank.map_or_else(|| DASH.to_string(), |r| r.to_string())
}

/// The `Discipline • Gender` header fragment all views share.
pub fn selection_label(discipline: Discipline, gender: Gender) -> String {
    format!("{} • {}", discipline.label(), gender.label())
}

/// Finds a distance by key, or by label (case-insensitive).
pub fn find_distance<'a>(distances: &'a [Distance], query: &str) -> Option<&'a Distance> {
    distances
        .iter()
        .find(|d| d.key == query)
        .or_else(|| distances.iter().find(|d| d.label.eq_ignore_ascii_case(query)))
}

/// Finds a rider by ID, or by name (case-insensitive).
pub fn find_athlete<'a>(standings: &'a Standings, query: &str) -> Option<&'a ComputedAthlete> {
    standings
        .all()
        .iter()
        .find(|c| c.athlete_id().as_str() == query)
        .or_else(|| {
            standings
                .all()
                .iter()
                .find(|c| c.name().eq_ignore_ascii_case(query))
        })
}
