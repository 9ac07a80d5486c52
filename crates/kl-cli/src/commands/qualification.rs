//! Qualification command: allround final-distance advancement.

use std::fmt::Write;

use anyhow::Result;
use kl_core::{
    Discipline, Distance, Gender, QualificationDetail, RaceResultSet, resolve_qualification,
};
use serde::Serialize;

use super::util::{fmt_rank, selection_label};

/// Formats the human-readable qualification table.
pub fn format_qualification(
    discipline: Discipline,
    gender: Gender,
    final_distance: &Distance,
    details: &[QualificationDetail],
) -> String {
    let mut output = String::new();
    writeln!(
        output,
        "QUALIFICATION: {} • final distance {}",
        selection_label(discipline, gender),
        final_distance.label
    )
    .unwrap();
    writeln!(output).unwrap();

    writeln!(
        output,
        "{:>6}{:>6}  {:<20}{:<12}{}",
        "Klass", "Dist", "Name", "Status", "Reason"
    )
    .unwrap();
    for detail in details {
        let line = format!(
            "{:>6}{:>6}  {:<20}{:<12}{}",
            fmt_rank(detail.klass_rank),
            fmt_rank(detail.dist_rank),
            detail.name,
            detail.status,
            detail.reason
        );
        writeln!(output, "{}", line.trim_end()).unwrap();
    }

    let advancing = details.iter().filter(|d| d.status.advances()).count();
    writeln!(output).unwrap();
    writeln!(
        output,
        "{advancing} riders advance to the {}.",
        final_distance.label
    )
    .unwrap();

    output
}

// ========== JSON Output ==========

/// JSON qualification structure.
#[derive(Debug, Serialize)]
pub struct JsonQualification {
    pub discipline: Discipline,
    pub gender: Gender,
    pub final_distance: Distance,
    pub riders: Vec<JsonQualificationRow>,
}

#[derive(Debug, Serialize)]
pub struct JsonQualificationRow {
    pub athlete_id: String,
    pub name: String,
    pub klass_rank: Option<u32>,
    pub dist_rank: Option<u32>,
    pub status: String,
    pub advances: bool,
    pub reason: String,
}

/// Formats the qualification view as JSON.
pub fn format_qualification_json(
    discipline: Discipline,
    gender: Gender,
    final_distance: &Distance,
    details: &[QualificationDetail],
) -> Result<String> {
    let riders = details
        .iter()
        .map(|d| JsonQualificationRow {
            athlete_id: d.athlete_id.to_string(),
            name: d.name.clone(),
            klass_rank: d.klass_rank,
            dist_rank: d.dist_rank,
            status: d.status.to_string(),
            advances: d.status.advances(),
            reason: d.reason.clone(),
        })
        .collect();

    let view = JsonQualification {
        discipline,
        gender,
        final_distance: final_distance.clone(),
        riders,
    };
    Ok(serde_json::to_string_pretty(&view)?)
}

// ========== Public Interface ==========

/// Runs the qualification command.
pub fn run(
    discipline: Discipline,
    gender: Gender,
    results: &RaceResultSet,
    distances: &[Distance],
    json: bool,
) -> Result<()> {
    anyhow::ensure!(
        discipline == Discipline::Allround,
        "qualification applies to the allround discipline only"
    );
    let final_distance = distances
        .last()
        .expect("built-in distance sets are never empty");

    let details = resolve_qualification(results, distances)?;

    if json {
        println!(
            "{}",
            format_qualification_json(discipline, gender, final_distance, &details)?
        );
    } else {
        print!(
            "{}",
            format_qualification(discipline, gender, final_distance, &details)
        );
    }

    Ok(())
}
