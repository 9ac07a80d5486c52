//! Distance command: the ranking for a single distance.

use std::fmt::Write;

use anyhow::{Context, Result};
use kl_core::{
    ComputedAthlete, Discipline, Distance, Gender, RaceResultSet, Standings, build_standings,
};
use serde::Serialize;

use super::util::{DASH, find_distance, fmt_points, selection_label};

/// One display row: ranked riders first (fastest time up), then riders
/// without a countable time in standings order.
struct Row<'a> {
    rank: Option<usize>,
    athlete: &'a ComputedAthlete,
}

fn rows<'a>(standings: &'a Standings, dist: &Distance) -> Vec<Row<'a>> {
    let mut rows: Vec<Row<'a>> = standings
        .distance_ranking(&dist.key)
        .into_iter()
        .enumerate()
        .map(|(i, athlete)| Row {
            rank: Some(i + 1),
            athlete,
        })
        .collect();

    for athlete in standings.all() {
        if athlete.points.seconds_for(&dist.key).is_none() {
            rows.push(Row {
                rank: None,
                athlete,
            });
        }
    }
    rows
}

/// Raw time string as published, or a dash.
fn raw_time(athlete: &ComputedAthlete, key: &str) -> String {
    athlete
        .result
        .result(key)
        .and_then(|r| r.time.clone())
        .unwrap_or_else(|| DASH.to_string())
}

/// Status code for one distance cell, or a dash for an absent entry.
fn status_code(athlete: &ComputedAthlete, key: &str) -> String {
    athlete
        .result
        .result(key)
        .map_or_else(|| DASH.to_string(), |r| r.status.to_string())
}

/// Formats the human-readable distance table.
pub fn format_distance(
    discipline: Discipline,
    gender: Gender,
    dist: &Distance,
    standings: &Standings,
) -> String {
    let mut output = String::new();
    writeln!(
        output,
        "DISTANCE: {} • {}",
        dist.label,
        selection_label(discipline, gender)
    )
    .unwrap();
    writeln!(output).unwrap();

    writeln!(
        output,
        "{:>4}  {:<20}{:>10}{:>10}  {:<6}",
        "#", "Name", "Time", "Points", "Status"
    )
    .unwrap();

    for row in rows(standings, dist) {
        let rank = row.rank.map_or_else(|| DASH.to_string(), |r| r.to_string());
        let line = format!(
            "{:>4}  {:<20}{:>10}{:>10}  {:<6}",
            rank,
            row.athlete.name(),
            raw_time(row.athlete, &dist.key),
            fmt_points(row.athlete.points.points_for(&dist.key)),
            status_code(row.athlete, &dist.key),
        );
        writeln!(output, "{}", line.trim_end()).unwrap();
    }

    output
}

// ========== JSON Output ==========

/// JSON distance view structure.
#[derive(Debug, Serialize)]
pub struct JsonDistanceView {
    pub discipline: Discipline,
    pub gender: Gender,
    pub distance: Distance,
    pub rows: Vec<JsonDistanceRow>,
}

#[derive(Debug, Serialize)]
pub struct JsonDistanceRow {
    pub rank: Option<usize>,
    pub athlete_id: String,
    pub name: String,
    pub time: Option<String>,
    pub seconds: Option<f64>,
    pub points: Option<f64>,
    pub status: Option<String>,
}

/// Formats the distance view as JSON.
pub fn format_distance_json(
    discipline: Discipline,
    gender: Gender,
    dist: &Distance,
    standings: &Standings,
) -> Result<String> {
    let rows = rows(standings, dist)
        .into_iter()
        .map(|row| JsonDistanceRow {
            rank: row.rank,
            athlete_id: row.athlete.athlete_id().to_string(),
            name: row.athlete.name().to_string(),
            time: row
                .athlete
                .result
                .result(&dist.key)
                .and_then(|r| r.time.clone()),
            seconds: row.athlete.points.seconds_for(&dist.key),
            points: row.athlete.points.points_for(&dist.key),
            status: row
                .athlete
                .result
                .result(&dist.key)
                .map(|r| r.status.to_string()),
        })
        .collect();

    let view = JsonDistanceView {
        discipline,
        gender,
        distance: dist.clone(),
        rows,
    };
    Ok(serde_json::to_string_pretty(&view)?)
}

// ========== Public Interface ==========

/// Runs the distance command.
pub fn run(
    query: &str,
    discipline: Discipline,
    gender: Gender,
    results: &RaceResultSet,
    distances: &[Distance],
    json: bool,
) -> Result<()> {
    let dist = find_distance(distances, query)
        .with_context(|| format!("unknown distance '{query}' for {}", discipline.label()))?
        .clone();
    let standings = build_standings(results, distances);

    if json {
        println!(
            "{}",
            format_distance_json(discipline, gender, &dist, &standings)?
        );
    } else {
        print!("{}", format_distance(discipline, gender, &dist, &standings));
    }

    Ok(())
}
