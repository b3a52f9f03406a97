//! Cyclone track service backed by the NHC ATCF archive.

use crate::config::NhcConfig;
use crate::core::resource::{fetch_text, require};
use crate::core::storm_index::{storm_key, StormIndex};
use crate::core::tracks::parse_tracks;
use crate::domain::model::{StormIndexEntry, TrackRecord, TrackSet};
use crate::domain::ports::RemoteSource;
use crate::utils::error::Result;

/// Where the two deck files of one storm live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackUrls {
    pub forecast: String,
    pub best_track: String,
}

pub struct NhcService<S: RemoteSource> {
    source: S,
    config: NhcConfig,
    storm_table: StormIndex,
}

impl<S: RemoteSource> NhcService<S> {
    /// Downloads and parses the storm index. No service exists if that fails.
    pub async fn connect(source: S, config: NhcConfig) -> Result<Self> {
        tracing::info!("Loading storm index from {}", config.index_url);
        let text = fetch_text(&source, &config.index_url).await?;
        let storm_table = StormIndex::parse(&text)?;
        tracing::info!("Loaded {} storms", storm_table.len());

        Ok(Self {
            source,
            config,
            storm_table,
        })
    }

    pub fn storm_table(&self) -> &StormIndex {
        &self.storm_table
    }

    pub fn config(&self) -> &NhcConfig {
        &self.config
    }

    /// The current season is served from separate directories, with an
    /// uncompressed best-track file. Earlier seasons live under
    /// `{archive_root}/{year}` and are always gzipped.
    pub fn track_urls(&self, year: i32, filename: &str) -> TrackUrls {
        let key = storm_key(filename);
        if year == self.config.current_season() {
            TrackUrls {
                forecast: format!(
                    "{}/a{}.dat.gz",
                    self.config.current_forecast_root.trim_end_matches('/'),
                    key
                ),
                best_track: format!(
                    "{}/b{}.dat",
                    self.config.current_best_track_root.trim_end_matches('/'),
                    key
                ),
            }
        } else {
            let root = self.config.archive_root.trim_end_matches('/');
            TrackUrls {
                forecast: format!("{}/{}/a{}.dat.gz", root, year, key),
                best_track: format!("{}/{}/b{}.dat.gz", root, year, key),
            }
        }
    }

    /// Fetches the forecast and best-track decks of one storm. Either file
    /// being unavailable fails the whole call with `InvalidResource`.
    pub async fn get_tracks(&self, year: i32, filename: &str) -> Result<TrackSet> {
        let urls = self.track_urls(year, filename);
        tracing::debug!("Track routing for {} {}: {:?}", year, filename.trim(), urls);

        let forecast = self.load_deck(&urls.forecast).await?;
        let best_track = self.load_deck(&urls.best_track).await?;

        let tracks = TrackSet {
            forecast,
            best_track,
        };
        tracing::info!(
            "Fetched {} forecast fixes from {} models and {} best-track fixes",
            tracks.forecast.len(),
            tracks.models().len(),
            tracks.best_track.len()
        );
        Ok(tracks)
    }

    pub async fn get_tracks_for(&self, storm: &StormIndexEntry) -> Result<TrackSet> {
        self.get_tracks(storm.year, &storm.filename).await
    }

    async fn load_deck(&self, url: &str) -> Result<Vec<TrackRecord>> {
        require(&self.source, url).await?;
        tracing::info!("Downloading {}", url);
        let text = fetch_text(&self.source, url).await?;
        let file_name = url.rsplit('/').next().unwrap_or(url);
        parse_tracks(&text, file_name)
    }
}
