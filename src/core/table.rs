use crate::core::spc::SpcData;
use crate::core::storm_index::StormIndex;
use crate::domain::model::{DayTable, DailyReport, HistoricalReport, TrackRecord};
use crate::utils::error::Result;
use std::io::Write;

/// Column-oriented view of a result, for CSV export.
pub trait Tabular {
    fn columns(&self) -> Vec<String>;
    fn rows(&self) -> Vec<Vec<String>>;

    fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record(self.columns())?;
        for row in self.rows() {
            csv.write_record(&row)?;
        }
        csv.flush()?;
        Ok(())
    }

    fn to_csv_string(&self) -> Result<String> {
        let mut buffer = Vec::new();
        self.write_csv(&mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}

impl Tabular for StormIndex {
    fn columns(&self) -> Vec<String> {
        ["Name", "Basin", "CycloneNum", "Year", "StormType", "Filename"]
            .iter()
            .map(|c| c.to_string())
            .collect()
    }

    fn rows(&self) -> Vec<Vec<String>> {
        self.iter()
            .map(|e| {
                vec![
                    e.name.clone(),
                    e.basin.clone(),
                    e.cyclone_number.to_string(),
                    e.year.to_string(),
                    e.storm_type.clone(),
                    e.filename.clone(),
                ]
            })
            .collect()
    }
}

impl Tabular for [TrackRecord] {
    fn columns(&self) -> Vec<String> {
        [
            "Basin",
            "CycloneNum",
            "WarnDT",
            "Model",
            "Forecast_hour",
            "Lat",
            "Lon",
        ]
        .iter()
        .map(|c| c.to_string())
        .collect()
    }

    fn rows(&self) -> Vec<Vec<String>> {
        self.iter()
            .map(|r| {
                vec![
                    r.basin.clone(),
                    r.cyclone_number.to_string(),
                    r.warning_time.clone(),
                    r.model.clone(),
                    r.forecast_hour.to_string(),
                    r.lat.to_string(),
                    r.lon.to_string(),
                ]
            })
            .collect()
    }
}

fn historical_row(r: &HistoricalReport) -> Vec<String> {
    let mut row = vec![
        r.num.to_string(),
        r.year.to_string(),
        r.month.to_string(),
        r.day.to_string(),
        r.time.clone(),
        r.time_zone.to_string(),
        r.state.clone(),
        r.magnitude.to_string(),
        r.injuries.to_string(),
        r.fatalities.to_string(),
        r.property_loss.to_string(),
        r.crop_loss.to_string(),
        r.start_lat.to_string(),
        r.start_lon.to_string(),
        r.end_lat.to_string(),
        r.end_lon.to_string(),
        r.length_mi.to_string(),
        r.width_yd.to_string(),
        r.ns.to_string(),
        r.sn.to_string(),
        r.sg.to_string(),
    ];
    row.extend(r.county_codes.iter().map(|c| c.to_string()));
    row
}

fn daily_row(r: &DailyReport) -> Vec<String> {
    vec![
        r.time.clone(),
        r.magnitude
            .map(|m| m.to_string())
            .unwrap_or_else(|| "UNK".to_string()),
        r.location.clone(),
        r.county.clone(),
        r.state.clone(),
        r.lat.to_string(),
        r.lon.to_string(),
        r.comment.clone(),
    ]
}

impl Tabular for SpcData {
    fn columns(&self) -> Vec<String> {
        SpcData::columns(self)
    }

    fn rows(&self) -> Vec<Vec<String>> {
        match &self.day_table {
            DayTable::Historical(rows) => rows.iter().map(historical_row).collect(),
            DayTable::Daily(rows) => rows.iter().map(daily_row).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Era, EventType, ReportDate};

    #[test]
    fn test_storm_index_csv() {
        let index = StormIndex::parse(
            "      ANNA, AL, L,  ,  ,  ,  , 06, 1976, HU, O, 1976072818, 1976080112,  ,  ,  ,  ,  , ARCHIVE, 2, AL061976",
        )
        .unwrap();

        let csv = index.to_csv_string().unwrap();
        assert_eq!(
            csv,
            "Name,Basin,CycloneNum,Year,StormType,Filename\nANNA,AL,6,1976,HU,al061976\n"
        );
    }

    #[test]
    fn test_track_rows_match_columns() {
        let tracks = vec![TrackRecord {
            basin: "AL".to_string(),
            cyclone_number: 6,
            warning_time: "1976072818".to_string(),
            model: "BCD5".to_string(),
            forecast_hour: 0,
            lat: 28.0,
            lon: -52.3,
        }];

        let table = tracks.as_slice();
        assert_eq!(table.rows()[0].len(), table.columns().len());
        assert_eq!(
            table.rows()[0],
            vec!["AL", "6", "1976072818", "BCD5", "0", "28", "-52.3"]
        );
    }

    #[test]
    fn test_day_table_csv_quotes_comments() {
        let data = SpcData {
            event_type: EventType::Hail,
            date: ReportDate::parse("20180615").unwrap(),
            era: Era::Daily,
            day_table: DayTable::Daily(vec![DailyReport {
                time: "1335".to_string(),
                magnitude: Some(100.0),
                location: "MOSINEE".to_string(),
                county: "MARATHON".to_string(),
                state: "WI".to_string(),
                lat: 44.78,
                lon: -89.69,
                comment: "HAIL, SOME DAMAGE (GRB)".to_string(),
            }]),
        };

        let csv = data.to_csv_string().unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next().unwrap(),
            "Time,Size (in),Location,County,State,Lat,Lon,Comment"
        );
        assert_eq!(
            lines.next().unwrap(),
            "1335,100,MOSINEE,MARATHON,WI,44.78,-89.69,\"HAIL, SOME DAMAGE (GRB)\""
        );
    }
}
