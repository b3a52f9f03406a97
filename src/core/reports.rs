//! SPC report schemas for both publication eras.
//!
//! Each era has one fixed column template with a single magnitude slot whose
//! header depends on the event type. The bulk files (1950-2017) are parsed
//! into [`HistoricalReport`]s and narrowed to a single day; the filtered
//! daily files are parsed into [`DailyReport`]s as-is.

use crate::domain::model::{DailyReport, Era, EventType, HistoricalReport, ReportDate};
use crate::utils::error::{Result, StormError};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::str::FromStr;

const MAGNITUDE: &str = "{magnitude}";

const HISTORICAL_TEMPLATE: [&str; 25] = [
    "Num",
    "Year",
    "Month",
    "Day",
    "Time",
    "Time Zone",
    "State",
    MAGNITUDE,
    "Injuries",
    "Fatalities",
    "Property Loss",
    "Crop Loss",
    "Start Lat",
    "Start Lon",
    "End Lat",
    "End Lon",
    "Length (mi)",
    "Width (yd)",
    "NS",
    "SN",
    "SG",
    "County Code 1",
    "County Code 2",
    "County Code 3",
    "County Code 4",
];

const DAILY_TEMPLATE: [&str; 8] = [
    "Time", MAGNITUDE, "Location", "County", "State", "Lat", "Lon", "Comment",
];

// Raw field offsets in the bulk files (om,yr,mo,dy,date,time,tz,st,stf,stn,mag,...).
mod bulk {
    pub const NUM: usize = 0;
    pub const YEAR: usize = 1;
    pub const MONTH: usize = 2;
    pub const DAY: usize = 3;
    pub const TIME: usize = 5;
    pub const TIME_ZONE: usize = 6;
    pub const STATE: usize = 7;
    pub const MAGNITUDE: usize = 10;
    pub const INJURIES: usize = 11;
    pub const FATALITIES: usize = 12;
    pub const PROPERTY_LOSS: usize = 13;
    pub const CROP_LOSS: usize = 14;
    pub const START_LAT: usize = 15;
    pub const START_LON: usize = 16;
    pub const END_LAT: usize = 17;
    pub const END_LON: usize = 18;
    pub const LENGTH: usize = 19;
    pub const WIDTH: usize = 20;
    pub const NS: usize = 21;
    pub const SN: usize = 22;
    pub const SG: usize = 23;
    pub const COUNTY_CODES: usize = 24;
    pub const MIN_FIELDS: usize = COUNTY_CODES + 4;
}

const DAILY_FIELDS: usize = DAILY_TEMPLATE.len();

/// A column layout with its magnitude header bound to an event type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportSchema {
    pub era: Era,
    pub event_type: EventType,
}

impl ReportSchema {
    pub fn new(era: Era, event_type: EventType) -> Self {
        Self { era, event_type }
    }

    pub fn columns(&self) -> Vec<String> {
        let template: &[&str] = match self.era {
            Era::Historical => &HISTORICAL_TEMPLATE,
            Era::Daily => &DAILY_TEMPLATE,
        };
        template
            .iter()
            .map(|&column| {
                if column == MAGNITUDE {
                    self.event_type.magnitude_label().to_string()
                } else {
                    column.to_string()
                }
            })
            .collect()
    }
}

fn reader(text: &str) -> csv::Reader<&[u8]> {
    ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(text.as_bytes())
}

fn line_of(record: &StringRecord) -> u64 {
    record.position().map(|p| p.line()).unwrap_or_default()
}

fn field<T: FromStr>(record: &StringRecord, idx: usize, name: &str, source: &str) -> Result<T> {
    let raw = record.get(idx).unwrap_or_default();
    raw.parse().map_err(|_| {
        StormError::parse(
            format!("{} line {}", source, line_of(record)),
            format!("{} '{}' is not a number", name, raw),
        )
    })
}

fn text(record: &StringRecord, idx: usize) -> String {
    record.get(idx).unwrap_or_default().to_string()
}

pub fn parse_historical(body: &str, source: &str) -> Result<Vec<HistoricalReport>> {
    let mut rows = Vec::new();
    for record in reader(body).records() {
        let record = record?;
        if record.len() < bulk::MIN_FIELDS {
            return Err(StormError::parse(
                format!("{} line {}", source, line_of(&record)),
                format!(
                    "expected at least {} fields, found {}",
                    bulk::MIN_FIELDS,
                    record.len()
                ),
            ));
        }

        let r = &record;
        rows.push(HistoricalReport {
            num: field(r, bulk::NUM, "num", source)?,
            year: field(r, bulk::YEAR, "year", source)?,
            month: field(r, bulk::MONTH, "month", source)?,
            day: field(r, bulk::DAY, "day", source)?,
            time: text(r, bulk::TIME),
            time_zone: field(r, bulk::TIME_ZONE, "time zone", source)?,
            state: text(r, bulk::STATE),
            magnitude: field(r, bulk::MAGNITUDE, "magnitude", source)?,
            injuries: field(r, bulk::INJURIES, "injuries", source)?,
            fatalities: field(r, bulk::FATALITIES, "fatalities", source)?,
            property_loss: field(r, bulk::PROPERTY_LOSS, "property loss", source)?,
            crop_loss: field(r, bulk::CROP_LOSS, "crop loss", source)?,
            start_lat: field(r, bulk::START_LAT, "start lat", source)?,
            start_lon: field(r, bulk::START_LON, "start lon", source)?,
            end_lat: field(r, bulk::END_LAT, "end lat", source)?,
            end_lon: field(r, bulk::END_LON, "end lon", source)?,
            length_mi: field(r, bulk::LENGTH, "length", source)?,
            width_yd: field(r, bulk::WIDTH, "width", source)?,
            ns: field(r, bulk::NS, "ns", source)?,
            sn: field(r, bulk::SN, "sn", source)?,
            sg: field(r, bulk::SG, "sg", source)?,
            county_codes: [
                field(r, bulk::COUNTY_CODES, "county code 1", source)?,
                field(r, bulk::COUNTY_CODES + 1, "county code 2", source)?,
                field(r, bulk::COUNTY_CODES + 2, "county code 3", source)?,
                field(r, bulk::COUNTY_CODES + 3, "county code 4", source)?,
            ],
        });
    }
    Ok(rows)
}

/// Narrows bulk rows to one day, by year, then month, then day.
pub fn filter_day(rows: Vec<HistoricalReport>, date: &ReportDate) -> Vec<HistoricalReport> {
    let year = date.year_number();
    let month = date.month_number();
    let day = date.day_number();

    let one_year: Vec<_> = rows.into_iter().filter(|r| r.year == year).collect();
    tracing::debug!("{} reports in {}", one_year.len(), year);
    let one_month: Vec<_> = one_year.into_iter().filter(|r| r.month == month).collect();
    tracing::debug!("{} reports in {}-{:02}", one_month.len(), year, month);
    one_month.into_iter().filter(|r| r.day == day).collect()
}

fn magnitude(raw: &str, record: &StringRecord, source: &str) -> Result<Option<f64>> {
    if raw.is_empty() || raw.eq_ignore_ascii_case("UNK") {
        return Ok(None);
    }
    raw.parse().map(Some).map_err(|_| {
        StormError::parse(
            format!("{} line {}", source, line_of(record)),
            format!("magnitude '{}' is not a number", raw),
        )
    })
}

/// Parses a filtered daily file. Commas inside an unquoted comment spill
/// into extra fields, which are joined back into the comment.
pub fn parse_daily(body: &str, source: &str) -> Result<Vec<DailyReport>> {
    let mut rows = Vec::new();
    for record in reader(body).records() {
        let record = record?;
        if record.len() < DAILY_FIELDS {
            return Err(StormError::parse(
                format!("{} line {}", source, line_of(&record)),
                format!(
                    "expected {} fields, found {}",
                    DAILY_FIELDS,
                    record.len()
                ),
            ));
        }

        let comment = record
            .iter()
            .skip(DAILY_FIELDS - 1)
            .collect::<Vec<_>>()
            .join(",");

        rows.push(DailyReport {
            time: text(&record, 0),
            magnitude: magnitude(record.get(1).unwrap_or_default(), &record, source)?,
            location: text(&record, 2),
            county: text(&record, 3),
            state: text(&record, 4),
            lat: field(&record, 5, "lat", source)?,
            lon: field(&record, 6, "lon", source)?,
            comment,
        });
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BULK_HEADER: &str =
        "om,yr,mo,dy,date,time,tz,st,stf,stn,mag,inj,fat,loss,closs,slat,slon,elat,elon,len,wid,ns,sn,sg,f1,f2,f3,f4,mt";

    fn bulk() -> String {
        [
            BULK_HEADER,
            "441594,2013,5,19,2013-05-19,23:55:00,3,KS,20,0,52,0,0,0,0,38.1,-97.2,38.1,-97.2,0,0,1,1,1,155,0,0,0,EG",
            "441595,2013,5,20,2013-05-20,00:05:00,3,MO,29,0,50,0,0,0.005,0,37.63,-93.42,37.63,-93.42,0,0,1,1,1,167,0,0,0,EG",
            "441596,2013,5,20,2013-05-20,00:20:00,3,MO,29,0,61,1,0,0.02,0,37.70,-93.10,37.70,-93.10,0,0,1,1,1,77,0,0,0,MG",
            "512001,2014,5,20,2014-05-20,14:00:00,3,TX,48,0,50,0,0,0,0,31.0,-97.0,31.0,-97.0,0,0,1,1,1,1,0,0,0,EG",
            "441700,2013,6,20,2013-06-20,10:00:00,3,IA,19,0,55,0,0,0,0,42.0,-93.0,42.0,-93.0,0,0,1,1,1,3,0,0,0,EG",
        ]
        .join("\n")
    }

    #[test]
    fn test_columns_bind_magnitude_label() {
        let hail = ReportSchema::new(Era::Daily, EventType::Hail).columns();
        assert_eq!(
            hail,
            vec!["Time", "Size (in)", "Location", "County", "State", "Lat", "Lon", "Comment"]
        );
        assert!(!hail.iter().any(|c| c == "F-Scale" || c == "Speed (kt)"));

        let torn = ReportSchema::new(Era::Historical, EventType::Tornado).columns();
        assert_eq!(torn.len(), 25);
        assert_eq!(torn[7], "F-Scale");

        let wind = ReportSchema::new(Era::Historical, EventType::Wind).columns();
        assert_eq!(wind[7], "Speed (kt)");
        assert!(!wind.iter().any(|c| c.contains('{')));
    }

    #[test]
    fn test_parse_historical_fields() {
        let rows = parse_historical(&bulk(), "1955-2017_wind.csv").unwrap();
        assert_eq!(rows.len(), 5);

        let row = &rows[1];
        assert_eq!(row.num, 441595);
        assert_eq!(row.year, 2013);
        assert_eq!(row.month, 5);
        assert_eq!(row.day, 20);
        assert_eq!(row.time, "00:05:00");
        assert_eq!(row.time_zone, 3);
        assert_eq!(row.state, "MO");
        assert_eq!(row.magnitude, 50.0);
        assert_eq!(row.injuries, 0);
        assert_eq!(row.fatalities, 0);
        assert_eq!(row.property_loss, 0.005);
        assert_eq!(row.crop_loss, 0.0);
        assert_eq!(row.start_lat, 37.63);
        assert_eq!(row.start_lon, -93.42);
        assert_eq!(row.end_lat, 37.63);
        assert_eq!(row.end_lon, -93.42);
        assert_eq!(row.length_mi, 0.0);
        assert_eq!(row.width_yd, 0.0);
        assert_eq!((row.ns, row.sn, row.sg), (1, 1, 1));
        assert_eq!(row.county_codes, [167, 0, 0, 0]);
    }

    #[test]
    fn test_filter_day_narrows_progressively() {
        let rows = parse_historical(&bulk(), "1955-2017_wind.csv").unwrap();
        let date = ReportDate::parse("20130520").unwrap();

        let day = filter_day(rows, &date);

        assert_eq!(day.len(), 2);
        assert!(day
            .iter()
            .all(|r| r.year == 2013 && r.month == 5 && r.day == 20));
        assert_eq!(day[0].num, 441595);
    }

    #[test]
    fn test_filter_day_without_matches_is_empty() {
        let rows = parse_historical(&bulk(), "1955-2017_wind.csv").unwrap();
        let date = ReportDate::parse("19990101").unwrap();
        assert!(filter_day(rows, &date).is_empty());
    }

    #[test]
    fn test_historical_short_row_is_parse_error() {
        let body = format!("{}\n441595,2013,5,20,2013-05-20,00:05:00,3,MO", BULK_HEADER);
        let err = parse_historical(&body, "1955-2017_wind.csv").unwrap_err();
        match err {
            StormError::Parse { context, .. } => assert_eq!(context, "1955-2017_wind.csv line 2"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_historical_non_numeric_is_parse_error() {
        let body = bulk().replace("37.63,-93.42,37.63", "N/A,-93.42,37.63");
        assert!(matches!(
            parse_historical(&body, "1955-2017_wind.csv"),
            Err(StormError::Parse { .. })
        ));
    }

    #[test]
    fn test_parse_daily() {
        let body = "\
Time,Size,Location,County,State,Lat,Lon,Comments
1335,100,MOSINEE,MARATHON,WI,44.78,-89.69,(GRB)
1410,UNK,2 N WAUSAU,MARATHON,WI,44.99,-89.63,TREES DOWN, POWER LINES DOWN. (GRB)
";
        let rows = parse_daily(body, "180615_rpts_filtered_hail.csv").unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].time, "1335");
        assert_eq!(rows[0].magnitude, Some(100.0));
        assert_eq!(rows[0].location, "MOSINEE");
        assert_eq!(rows[0].county, "MARATHON");
        assert_eq!(rows[0].state, "WI");
        assert_eq!(rows[0].lat, 44.78);
        assert_eq!(rows[0].lon, -89.69);
        assert_eq!(rows[0].comment, "(GRB)");

        assert_eq!(rows[1].magnitude, None);
        assert_eq!(rows[1].comment, "TREES DOWN,POWER LINES DOWN. (GRB)");
    }

    #[test]
    fn test_parse_daily_header_only() {
        let body = "Time,F_Scale,Location,County,State,Lat,Lon,Comments\n";
        assert!(parse_daily(body, "180101_rpts_filtered_torn.csv")
            .unwrap()
            .is_empty());
    }
}
