//! ATCF a-deck / b-deck parsing and per-model selection.

use crate::domain::model::{BestTrackPath, ModelSelection, TrackRecord, TrackSet};
use crate::utils::error::{Result, StormError};
use std::collections::BTreeSet;

const BASIN: usize = 0;
const CYCLONE_NUMBER: usize = 1;
const WARNING_TIME: usize = 2;
const MODEL: usize = 4;
const FORECAST_HOUR: usize = 5;
const LAT: usize = 6;
const LON: usize = 7;
const MIN_FIELDS: usize = LON + 1;

fn decidegrees(field: &str) -> Option<i32> {
    let digits = field
        .strip_suffix(|c: char| c.is_ascii_alphabetic())
        .unwrap_or(field);
    digits.trim().parse().ok()
}

/// `"282N"` -> `28.2`. The hemisphere letter is dropped.
pub fn decode_latitude(field: &str) -> Option<f64> {
    decidegrees(field).map(|v| f64::from(v) / 10.0)
}

/// `"523W"` -> `-52.3`. Always west of Greenwich; the hemisphere letter and
/// any sign are dropped.
pub fn decode_longitude(field: &str) -> Option<f64> {
    decidegrees(field).map(|v| -(f64::from(v.unsigned_abs()) / 10.0))
}

pub fn parse_track_line(line: &str, context: &str) -> Result<TrackRecord> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    if fields.len() < MIN_FIELDS {
        return Err(StormError::parse(
            context,
            format!("expected at least {} fields, found {}", MIN_FIELDS, fields.len()),
        ));
    }

    let number = |idx: usize, what: &str| -> Result<i64> {
        fields[idx].parse().map_err(|_| {
            StormError::parse(
                context,
                format!("{} '{}' is not an integer", what, fields[idx]),
            )
        })
    };
    let cyclone_number = number(CYCLONE_NUMBER, "cyclone number")?;
    let forecast_hour = number(FORECAST_HOUR, "forecast hour")?;

    let lat = decode_latitude(fields[LAT]).ok_or_else(|| {
        StormError::parse(context, format!("bad latitude '{}'", fields[LAT]))
    })?;
    let lon = decode_longitude(fields[LON]).ok_or_else(|| {
        StormError::parse(context, format!("bad longitude '{}'", fields[LON]))
    })?;

    Ok(TrackRecord {
        basin: fields[BASIN].to_string(),
        cyclone_number: u32::try_from(cyclone_number).map_err(|_| {
            StormError::parse(context, format!("cyclone number {} out of range", cyclone_number))
        })?,
        warning_time: fields[WARNING_TIME].to_string(),
        model: fields[MODEL].to_string(),
        forecast_hour: i32::try_from(forecast_hour).map_err(|_| {
            StormError::parse(context, format!("forecast hour {} out of range", forecast_hour))
        })?,
        lat,
        lon,
    })
}

/// Parses every non-blank line of a deck file. `source` names the file in
/// error messages.
pub fn parse_tracks(text: &str, source: &str) -> Result<Vec<TrackRecord>> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| parse_track_line(line, &format!("{} line {}", source, i + 1)))
        .collect()
}

impl TrackSet {
    /// Distinct forecast model identifiers, sorted.
    pub fn models(&self) -> Vec<String> {
        self.forecast
            .iter()
            .map(|r| r.model.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    pub fn best_track_path(&self) -> BestTrackPath {
        let mut path = BestTrackPath::default();
        for fix in &self.best_track {
            path.times.push(fix.warning_time.clone());
            path.lats.push(fix.lat);
            path.lons.push(fix.lon);
        }
        path
    }

    /// One forecast table per requested model, in request order. Matching is
    /// exact; repeated identifiers yield repeated tables.
    pub fn model_selection_latlon<M: AsRef<str>>(&self, models: &[M]) -> ModelSelection {
        let tables = models
            .iter()
            .map(|model| {
                let model = model.as_ref();
                self.forecast
                    .iter()
                    .filter(|r| r.model == model)
                    .cloned()
                    .collect::<Vec<_>>()
            })
            .collect::<Vec<_>>();

        tracing::debug!(
            "Selected {} model tables ({} best-track fixes)",
            tables.len(),
            self.best_track.len()
        );

        ModelSelection {
            best_track: self.best_track_path(),
            tables,
        }
    }
}
