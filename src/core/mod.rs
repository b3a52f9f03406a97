pub mod nhc;
pub mod reports;
pub mod resource;
pub mod spc;
pub mod storm_index;
pub mod table;
pub mod tracks;

pub use crate::domain::model::{
    DayTable, Era, EventType, ModelSelection, ReportDate, SevereReport, StormIndexEntry,
    TrackRecord, TrackSet,
};
pub use crate::domain::ports::RemoteSource;
pub use crate::utils::error::Result;
