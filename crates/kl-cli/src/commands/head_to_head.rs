//! Head-to-head command: what time beats the target.

use std::fmt::Write;

use anyhow::Result;
use kl_core::{
    ComputedAthlete, Discipline, Distance, Gender, HeadToHead, HeadToHeadError, RaceResultSet,
    Standings, TargetSelector, build_standings, format_seconds_to_time, solve_head_to_head,
};
use serde::Serialize;

use super::util::{find_athlete, find_distance, fmt_points, fmt_rank, selection_label};

/// One line describing a rider in the comparison header.
fn rider_label(athlete: &ComputedAthlete) -> String {
    format!(
        "{} (#{}, {} p)",
        athlete.name(),
        fmt_rank(athlete.rank),
        fmt_points(athlete.points.total_points)
    )
}

/// Formats a successful projection as a small KPI block.
pub fn format_head_to_head(
    discipline: Discipline,
    gender: Gender,
    projection: &HeadToHead,
    athlete: &ComputedAthlete,
    target: &ComputedAthlete,
) -> String {
    let mut output = String::new();
    writeln!(
        output,
        "HEAD-TO-HEAD: {}",
        selection_label(discipline, gender)
    )
    .unwrap();
    writeln!(output).unwrap();
    writeln!(
        output,
        "{} vs target {}",
        rider_label(athlete),
        rider_label(target)
    )
    .unwrap();
    writeln!(output).unwrap();

    writeln!(
        output,
        "Target total (points): {}",
        fmt_points(target.points.total_points)
    )
    .unwrap();
    writeln!(
        output,
        "Points without {}: {}",
        projection.focus.label,
        fmt_points(Some(projection.points_without_focus))
    )
    .unwrap();
    writeln!(
        output,
        "Max time on {}: {}",
        projection.focus.label,
        format_seconds_to_time(projection.max_time_seconds)
    )
    .unwrap();
    writeln!(output).unwrap();
    writeln!(
        output,
        "Truncated to 3 decimals, with a 0.001 point margin to be strictly better."
    )
    .unwrap();

    output
}

/// Formats a failed projection.
pub fn format_not_available(reason: &str) -> String {
    format!("Not available: {reason}\n")
}

// ========== JSON Output ==========

/// JSON head-to-head structure; either the projection or a reason.
#[derive(Debug, Serialize)]
pub struct JsonHeadToHead {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projection: Option<JsonProjection>,
}

#[derive(Debug, Serialize)]
pub struct JsonProjection {
    pub athlete_id: String,
    pub athlete_name: String,
    pub target_id: String,
    pub target_name: String,
    pub focus_key: String,
    pub points_without_focus: f64,
    pub allowed_total: f64,
    pub max_time_seconds: f64,
    pub max_time: String,
}

fn json_outcome(outcome: &Result<HeadToHead, HeadToHeadError>) -> JsonHeadToHead {
    match outcome {
        Ok(projection) => JsonHeadToHead {
            ok: true,
            reason: None,
            projection: Some(JsonProjection {
                athlete_id: projection.athlete_id.to_string(),
                athlete_name: projection.athlete_name.clone(),
                target_id: projection.target_id.to_string(),
                target_name: projection.target_name.clone(),
                focus_key: projection.focus.key.clone(),
                points_without_focus: projection.points_without_focus,
                allowed_total: projection.allowed_total,
                max_time_seconds: projection.max_time_seconds,
                max_time: format_seconds_to_time(projection.max_time_seconds),
            }),
        },
        Err(err) => JsonHeadToHead {
            ok: false,
            reason: Some(err.to_string()),
            projection: None,
        },
    }
}

// ========== Public Interface ==========

/// Selection of the target as given on the command line.
fn target_selector(
    standings: &Standings,
    target_rank: Option<u32>,
    target_query: Option<&str>,
) -> Result<TargetSelector, HeadToHeadError> {
    if let Some(query) = target_query {
        let athlete =
            find_athlete(standings, query).ok_or(HeadToHeadError::TargetNotResolved)?;
        return Ok(TargetSelector::Athlete(athlete.athlete_id().clone()));
    }
    Ok(TargetSelector::Rank(target_rank.unwrap_or(1)))
}

/// Runs the head-to-head command.
#[allow(clippy::too_many_arguments)]
pub fn run(
    athlete_query: &str,
    target_rank: Option<u32>,
    target_query: Option<&str>,
    focus_query: Option<&str>,
    discipline: Discipline,
    gender: Gender,
    results: &RaceResultSet,
    distances: &[Distance],
    json: bool,
) -> Result<()> {
    let standings = build_standings(results, distances);

    // An unknown focus query is passed through so the solver reports it as
    // the structured failure it is.
    let focus_key = focus_query.map_or_else(
        || distances[0].key.clone(),
        |query| {
            find_distance(distances, query)
                .map_or_else(|| query.to_string(), |d| d.key.clone())
        },
    );

    let outcome = match find_athlete(&standings, athlete_query) {
        Some(athlete) => {
            let athlete_id = athlete.athlete_id().clone();
            target_selector(&standings, target_rank, target_query).and_then(|selector| {
                solve_head_to_head(&standings, distances, &athlete_id, &selector, &focus_key)
            })
        }
        None => Err(kl_core::AthleteId::new(athlete_query).map_or(
            HeadToHeadError::TargetNotResolved,
            HeadToHeadError::AthleteNotFound,
        )),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&json_outcome(&outcome))?);
        return Ok(());
    }

    match &outcome {
        Ok(projection) => {
            // Both riders exist when the solver succeeded
            let athlete = standings
                .athlete(&projection.athlete_id)
                .expect("solved athlete is in the standings");
            let target = standings
                .athlete(&projection.target_id)
                .expect("solved target is in the standings");
            print!(
                "{}",
                format_head_to_head(discipline, gender, projection, athlete, target)
            );
        }
        Err(err) => print!("{}", format_not_available(&err.to_string())),
    }

    Ok(())
}
