//! Severe event service backed by the SPC report archive.

use crate::config::SpcConfig;
use crate::core::reports::{filter_day, parse_daily, parse_historical, ReportSchema};
use crate::core::resource::fetch_text;
use crate::domain::model::{DayTable, Era, EventType, ReportDate, SevereReport};
use crate::domain::ports::RemoteSource;
use crate::utils::error::Result;

/// Reports of one event type on one day.
#[derive(Debug, Clone, PartialEq)]
pub struct SpcData {
    pub event_type: EventType,
    pub date: ReportDate,
    pub era: Era,
    pub day_table: DayTable,
}

impl SpcData {
    pub fn schema(&self) -> ReportSchema {
        ReportSchema::new(self.era, self.event_type)
    }

    pub fn columns(&self) -> Vec<String> {
        self.schema().columns()
    }

    pub fn reports(&self) -> Vec<SevereReport> {
        self.day_table.reports()
    }
}

pub struct SpcService<S: RemoteSource> {
    source: S,
    config: SpcConfig,
}

impl<S: RemoteSource> SpcService<S> {
    pub fn new(source: S, config: SpcConfig) -> Self {
        Self { source, config }
    }

    pub fn config(&self) -> &SpcConfig {
        &self.config
    }

    /// Years up to and including the boundary come from the bulk database.
    pub fn era_for(&self, date: &ReportDate) -> Era {
        if date.year_number() <= self.config.era_boundary_year {
            Era::Historical
        } else {
            Era::Daily
        }
    }

    pub fn daily_url(&self, event_type: EventType, date: &ReportDate) -> String {
        format!(
            "{}/{}{}{}_rpts_filtered_{}.csv",
            self.config.climo_root.trim_end_matches('/'),
            date.short_year(),
            date.month(),
            date.day(),
            event_type.file_tag()
        )
    }

    pub fn report_url(&self, event_type: EventType, date: &ReportDate) -> String {
        match self.era_for(date) {
            Era::Historical => self.config.bulk_urls.for_event(event_type).to_string(),
            Era::Daily => self.daily_url(event_type, date),
        }
    }

    pub async fn fetch(&self, event_type: EventType, date: &ReportDate) -> Result<SpcData> {
        let era = self.era_for(date);
        let url = self.report_url(event_type, date);
        tracing::info!("Fetching {} reports for {} ({:?}) from {}", event_type, date, era, url);

        let body = fetch_text(&self.source, &url).await?;
        let file_name = url.rsplit('/').next().unwrap_or(&url);

        let day_table = match era {
            Era::Historical => {
                let all = parse_historical(&body, file_name)?;
                tracing::debug!("Parsed {} bulk {} reports", all.len(), event_type);
                DayTable::Historical(filter_day(all, date))
            }
            Era::Daily => DayTable::Daily(parse_daily(&body, file_name)?),
        };
        tracing::info!("{} {} reports on {}", day_table.len(), event_type, date);

        Ok(SpcData {
            event_type,
            date: date.clone(),
            era,
            day_table,
        })
    }

    /// String-argument entry point. The event type is checked before the
    /// date, and both before anything is downloaded.
    pub async fn fetch_str(&self, event_type: &str, date: &str) -> Result<SpcData> {
        let event_type: EventType = event_type.parse()?;
        let date = ReportDate::parse(date)?;
        self.fetch(event_type, &date).await
    }
}
