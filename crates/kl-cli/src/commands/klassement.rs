//! Klassement command: the overall standings view.

use std::collections::BTreeMap;
use std::fmt::Write;

use anyhow::Result;
use kl_core::{ComputedAthlete, Discipline, Distance, Gender, RaceResultSet, Standings, build_standings};
use serde::Serialize;

use super::util::{fmt_points, fmt_rank, selection_label};

/// Formats the human-readable klassement table.
pub fn format_klassement(
    discipline: Discipline,
    gender: Gender,
    distances: &[Distance],
    standings: &Standings,
) -> String {
    let mut output = String::new();
    writeln!(output, "KLASSEMENT: {}", selection_label(discipline, gender)).unwrap();
    writeln!(output).unwrap();

    let mut header = format!("{:>4}  {:<20}", "#", "Name");
    for dist in distances {
        write!(header, "{:>11}", dist.label).unwrap();
    }
    write!(header, "{:>11}{:>9}", "Total", "Behind").unwrap();
    writeln!(output, "{header}").unwrap();

    for athlete in standings.all() {
        let mut line = format!("{:>4}  {:<20}", fmt_rank(athlete.rank), athlete.name());
        for dist in distances {
            write!(line, "{:>11}", fmt_points(athlete.points.points_for(&dist.key))).unwrap();
        }
        write!(
            line,
            "{:>11}{:>9}",
            fmt_points(athlete.points.total_points),
            fmt_points(athlete.delta)
        )
        .unwrap();
        writeln!(output, "{}", line.trim_end()).unwrap();
    }

    writeln!(output).unwrap();
    writeln!(
        output,
        "Points per distance are seconds divided by meters/500, truncated to 3 decimals."
    )
    .unwrap();
    writeln!(output, "The lowest total leads the klassement.").unwrap();

    output
}

// ========== JSON Output ==========

/// JSON klassement structure.
#[derive(Debug, Serialize)]
pub struct JsonKlassement {
    pub discipline: Discipline,
    pub gender: Gender,
    pub distances: Vec<Distance>,
    pub athletes: Vec<JsonAthlete>,
}

#[derive(Debug, Serialize)]
pub struct JsonAthlete {
    pub athlete_id: String,
    pub name: String,
    pub rank: Option<u32>,
    pub points: BTreeMap<String, f64>,
    pub total_points: Option<f64>,
    pub delta: Option<f64>,
    pub completed_count: usize,
}

fn json_athlete(athlete: &ComputedAthlete) -> JsonAthlete {
    JsonAthlete {
        athlete_id: athlete.athlete_id().to_string(),
        name: athlete.name().to_string(),
        rank: athlete.rank,
        points: athlete
            .points
            .points
            .iter()
            .map(|(k, v)| (k.clone(), *v))
            .collect(),
        total_points: athlete.points.total_points,
        delta: athlete.delta,
        completed_count: athlete.points.completed_count,
    }
}

/// Formats the klassement as JSON.
pub fn format_klassement_json(
    discipline: Discipline,
    gender: Gender,
    distances: &[Distance],
    standings: &Standings,
) -> Result<String> {
    let report = JsonKlassement {
        discipline,
        gender,
        distances: distances.to_vec(),
        athletes: standings.all().iter().map(json_athlete).collect(),
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

// ========== Public Interface ==========

/// Runs the klassement command.
pub fn run(
    discipline: Discipline,
    gender: Gender,
    results: &RaceResultSet,
    distances: &[Distance],
    json: bool,
) -> Result<()> {
    let standings = build_standings(results, distances);

    if json {
        println!(
            "{}",
            format_klassement_json(discipline, gender, distances, &standings)?
        );
    } else {
        print!(
            "{}",
            format_klassement(discipline, gender, distances, &standings)
        );
    }

    Ok(())
}
