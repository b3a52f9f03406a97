#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::domain::model::EventType;
use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_ERA_BOUNDARY_YEAR: i32 = 2017;

/// Locations of the remote archives and how to reach them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArchiveConfig {
    pub http: HttpConfig,
    pub nhc: NhcConfig,
    pub spc: SpcConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub user_agent: String,
    /// No timeout unless set.
    pub timeout_seconds: Option<u64>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: concat!("stormfetch/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout_seconds: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NhcConfig {
    pub index_url: String,
    pub archive_root: String,
    pub current_forecast_root: String,
    pub current_best_track_root: String,
    /// Season served from the "current" directories. Defaults to this year.
    pub current_season: Option<i32>,
}

impl Default for NhcConfig {
    fn default() -> Self {
        Self {
            index_url: "https://ftp.nhc.noaa.gov/atcf/index/storm_list.txt".to_string(),
            archive_root: "https://ftp.nhc.noaa.gov/atcf/archive".to_string(),
            current_forecast_root: "https://ftp.nhc.noaa.gov/atcf/aid_public".to_string(),
            current_best_track_root: "https://ftp.nhc.noaa.gov/atcf/btk".to_string(),
            current_season: None,
        }
    }
}

impl NhcConfig {
    pub fn current_season(&self) -> i32 {
        self.current_season.unwrap_or_else(|| Utc::now().year())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpcConfig {
    pub climo_root: String,
    /// Last year answered from the bulk database; later years use daily files.
    pub era_boundary_year: i32,
    pub bulk_urls: BulkUrls,
}

impl Default for SpcConfig {
    fn default() -> Self {
        Self {
            climo_root: "https://www.spc.noaa.gov/climo/reports".to_string(),
            era_boundary_year: DEFAULT_ERA_BOUNDARY_YEAR,
            bulk_urls: BulkUrls::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BulkUrls {
    pub tornado: String,
    pub hail: String,
    pub wind: String,
}

impl Default for BulkUrls {
    fn default() -> Self {
        Self {
            tornado: "https://www.spc.noaa.gov/wcm/data/1950-2017_torn.csv".to_string(),
            hail: "https://www.spc.noaa.gov/wcm/data/1955-2017_hail.csv".to_string(),
            wind: "https://www.spc.noaa.gov/wcm/data/1955-2017_wind.csv".to_string(),
        }
    }
}

impl BulkUrls {
    pub fn for_event(&self, event_type: EventType) -> &str {
        match event_type {
            EventType::Tornado => &self.tornado,
            EventType::Hail => &self.hail,
            EventType::Wind => &self.wind,
        }
    }
}
