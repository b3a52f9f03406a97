use crate::utils::error::{Result, StormError};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// One row of the ATCF storm index.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StormIndexEntry {
    pub name: String,
    pub basin: String,
    pub cyclone_number: u32,
    pub year: i32,
    pub storm_type: String,
    pub filename: String,
}

/// One fix from an a-deck (forecast) or b-deck (best track) file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackRecord {
    pub basin: String,
    pub cyclone_number: u32,
    pub warning_time: String,
    pub model: String,
    pub forecast_hour: i32,
    pub lat: f64,
    pub lon: f64,
}

/// Forecast and best-track tables for one storm.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackSet {
    pub forecast: Vec<TrackRecord>,
    pub best_track: Vec<TrackRecord>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct BestTrackPath {
    pub times: Vec<String>,
    pub lats: Vec<f64>,
    pub lons: Vec<f64>,
}

/// Per-model forecast tables in request order, plus the best-track path
/// for comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelSelection {
    pub best_track: BestTrackPath,
    pub tables: Vec<Vec<TrackRecord>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    Tornado,
    Hail,
    Wind,
}

impl EventType {
    pub const ALL: [EventType; 3] = [EventType::Tornado, EventType::Hail, EventType::Wind];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Tornado => "tornado",
            EventType::Hail => "hail",
            EventType::Wind => "wind",
        }
    }

    /// Header of the magnitude column for this event type.
    pub fn magnitude_label(&self) -> &'static str {
        match self {
            EventType::Tornado => "F-Scale",
            EventType::Hail => "Size (in)",
            EventType::Wind => "Speed (kt)",
        }
    }

    /// Short tag used in SPC daily report file names.
    pub fn file_tag(&self) -> &'static str {
        match self {
            EventType::Tornado => "torn",
            EventType::Hail => "hail",
            EventType::Wind => "wind",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventType {
    type Err = StormError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "tornado" => Ok(EventType::Tornado),
            "hail" => Ok(EventType::Hail),
            "wind" => Ok(EventType::Wind),
            other => Err(StormError::InvalidEventType {
                value: other.to_string(),
            }),
        }
    }
}

/// A `YYYYMMDD` date split positionally. Calendar validity is not checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportDate {
    raw: String,
}

impl ReportDate {
    pub fn parse(value: &str) -> Result<Self> {
        if value.len() != 8 || !value.bytes().all(|b| b.is_ascii_digit()) {
            return Err(StormError::InvalidDate {
                value: value.to_string(),
            });
        }
        Ok(Self {
            raw: value.to_string(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn year(&self) -> &str {
        &self.raw[0..4]
    }

    pub fn month(&self) -> &str {
        &self.raw[4..6]
    }

    pub fn day(&self) -> &str {
        &self.raw[6..8]
    }

    /// Two-digit year used by the SPC daily file names.
    pub fn short_year(&self) -> &str {
        &self.raw[2..4]
    }

    // The slices are ASCII digits, so these cannot fail.
    pub fn year_number(&self) -> i32 {
        self.year().parse().unwrap_or_default()
    }

    pub fn month_number(&self) -> u32 {
        self.month().parse().unwrap_or_default()
    }

    pub fn day_number(&self) -> u32 {
        self.day().parse().unwrap_or_default()
    }
}

impl fmt::Display for ReportDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Which SPC publication format a query was answered from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Era {
    /// Multi-decade bulk file, filtered down to one day.
    Historical,
    /// Filtered per-day report file.
    Daily,
}

/// Row of the 1950-2017 SPC bulk database.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoricalReport {
    pub num: u64,
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub time: String,
    pub time_zone: i32,
    pub state: String,
    pub magnitude: f64,
    pub injuries: u32,
    pub fatalities: u32,
    pub property_loss: f64,
    pub crop_loss: f64,
    pub start_lat: f64,
    pub start_lon: f64,
    pub end_lat: f64,
    pub end_lon: f64,
    pub length_mi: f64,
    pub width_yd: f64,
    pub ns: i32,
    pub sn: i32,
    pub sg: i32,
    pub county_codes: [i32; 4],
}

/// Row of an SPC filtered daily report file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyReport {
    pub time: String,
    /// `None` when the report says `UNK`.
    pub magnitude: Option<f64>,
    pub location: String,
    pub county: String,
    pub state: String,
    pub lat: f64,
    pub lon: f64,
    pub comment: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "era", rename_all = "lowercase")]
pub enum SevereReport {
    Historical(HistoricalReport),
    Daily(DailyReport),
}

/// Fields both report eras carry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportSummary {
    pub time: String,
    pub magnitude: Option<f64>,
    pub state: String,
    pub lat: f64,
    pub lon: f64,
}

impl SevereReport {
    pub fn summary(&self) -> ReportSummary {
        match self {
            SevereReport::Historical(r) => ReportSummary {
                time: r.time.clone(),
                magnitude: Some(r.magnitude),
                state: r.state.clone(),
                lat: r.start_lat,
                lon: r.start_lon,
            },
            SevereReport::Daily(r) => ReportSummary {
                time: r.time.clone(),
                magnitude: r.magnitude,
                state: r.state.clone(),
                lat: r.lat,
                lon: r.lon,
            },
        }
    }
}

/// The reports for one requested day, in the shape of the source era.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "era", content = "rows", rename_all = "lowercase")]
pub enum DayTable {
    Historical(Vec<HistoricalReport>),
    Daily(Vec<DailyReport>),
}

impl DayTable {
    pub fn era(&self) -> Era {
        match self {
            DayTable::Historical(_) => Era::Historical,
            DayTable::Daily(_) => Era::Daily,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            DayTable::Historical(rows) => rows.len(),
            DayTable::Daily(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn reports(&self) -> Vec<SevereReport> {
        match self {
            DayTable::Historical(rows) => rows
                .iter()
                .cloned()
                .map(SevereReport::Historical)
                .collect(),
            DayTable::Daily(rows) => rows.iter().cloned().map(SevereReport::Daily).collect(),
        }
    }
}
