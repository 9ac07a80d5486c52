//! Built-in mock result sets.
//!
//! Eight riders per discipline/gender combination with realistic national
//! championship times. Used by the CLI when no results file is given and by
//! the end-to-end tests.

use crate::athlete::{AthleteResult, RaceResultSet};
use crate::distance::{Discipline, Gender, distance_set};
use crate::types::AthleteId;

/// Preset time rows per discipline/gender, one row per rider, one entry per
/// configured distance.
fn preset_rows(discipline: Discipline, gender: Gender) -> [[&'static str; 4]; 8] {
    match (discipline, gender) {
        (Discipline::Sprint, Gender::Men) => [
            ["34.72", "1:09.86", "34.81", "1:10.11"],
            ["34.90", "1:10.32", "34.77", "1:10.58"],
            ["35.10", "1:10.20", "35.08", "1:10.40"],
            ["34.65", "1:10.70", "34.92", "1:10.88"],
            ["35.30", "1:11.10", "35.40", "1:11.33"],
            ["35.55", "1:10.95", "35.49", "1:11.22"],
            ["34.98", "1:10.05", "35.01", "1:10.25"],
            ["36.10", "1:12.20", "36.05", "1:12.10"],
        ],
        (Discipline::Sprint, Gender::Women) => [
            ["37.88", "1:16.40", "37.92", "1:16.55"],
            ["38.05", "1:16.10", "38.20", "1:16.45"],
            ["38.40", "1:17.05", "38.15", "1:16.88"],
            ["37.70", "1:16.80", "37.85", "1:16.90"],
            ["39.10", "1:18.30", "39.05", "1:18.15"],
            ["38.55", "1:17.45", "38.50", "1:17.32"],
            ["38.20", "1:16.95", "38.30", "1:17.10"],
            ["40.00", "1:19.90", "40.10", "1:20.10"],
        ],
        (Discipline::Allround, Gender::Men) => [
            ["35.10", "1:45.80", "6:25.10", "13:25.20"],
            ["35.40", "1:46.10", "6:23.90", "13:32.00"],
            ["35.00", "1:47.30", "6:28.20", "13:40.50"],
            ["35.90", "1:45.40", "6:26.10", "13:29.80"],
            ["36.10", "1:48.00", "6:31.40", "13:55.00"],
            ["35.60", "1:46.50", "6:29.90", "13:44.30"],
            ["35.20", "1:46.80", "6:24.80", "13:33.10"],
            ["37.20", "1:52.00", "6:50.00", "14:30.00"],
        ],
        (Discipline::Allround, Gender::Women) => [
            ["38.30", "1:58.60", "4:08.10", "7:11.20"],
            ["38.55", "1:58.20", "4:07.40", "7:09.90"],
            ["38.10", "1:59.80", "4:10.80", "7:14.30"],
            ["39.00", "1:57.90", "4:09.20", "7:13.10"],
            ["39.50", "2:01.40", "4:15.40", "7:20.70"],
            ["38.80", "1:59.10", "4:12.50", "7:17.80"],
            ["38.40", "1:58.90", "4:08.90", "7:12.40"],
            ["41.00", "2:05.00", "4:25.00", "7:35.00"],
        ],
    }
}

/// Builds the mock result set for a discipline/gender combination.
pub fn mock_results(discipline: Discipline, gender: Gender) -> RaceResultSet {
    let distances = distance_set(discipline, gender);
    let rows = preset_rows(discipline, gender);
    let prefix = match gender {
        Gender::Men => "Rijder",
        Gender::Women => "Rijdster",
    };

    let athletes = rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let letter = char::from(b'A' + u8::try_from(i).unwrap_or(0));
            let athlete_id =
                AthleteId::new(format!("a{}", i + 1)).expect("preset ids are non-empty");
            let mut athlete = AthleteResult::new(athlete_id, format!("{prefix} {letter}"));
            for (dist, time) in distances.iter().zip(row.iter()) {
                athlete = athlete.with_time(&dist.key, *time);
            }
            athlete
        })
        .collect();

    RaceResultSet::new(athletes)
}
