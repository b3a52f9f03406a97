pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::HttpSource;
pub use config::ArchiveConfig;
pub use crate::core::nhc::NhcService;
pub use crate::core::spc::{SpcData, SpcService};
pub use crate::core::storm_index::StormIndex;
pub use crate::core::table::Tabular;
pub use domain::model::{
    DailyReport, DayTable, Era, EventType, HistoricalReport, ModelSelection, ReportDate,
    ReportSummary, SevereReport, StormIndexEntry, TrackRecord, TrackSet,
};
pub use utils::error::{Result, StormError};
