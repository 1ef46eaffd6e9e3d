use tracing::info;

use crate::graph::GraphStore;

use super::dataset::Dataset;
use super::derive::{DEFAULT_WALK_THRESHOLD_M, transfer_links, walking_links};
use super::error::LoadError;

/// Loader configuration.
#[derive(Debug, Clone, Copy)]
pub struct LoaderConfig {
    /// Two stops closer than this are linked by a walk, in meters.
    pub walk_threshold_m: f64,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            walk_threshold_m: DEFAULT_WALK_THRESHOLD_M,
        }
    }
}

/// What a load wrote to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadSummary {
    pub stations: usize,
    pub train_links: usize,
    pub transfer_links: usize,
    pub walking_links: usize,
    pub skipped_links: usize,
}

/// Replace the contents of `store` with `dataset`.
///
/// Everything in the store is deleted first, temporary endpoints included,
/// so this must not run while routes are being computed.
pub async fn load_dataset<S: GraphStore>(
    store: &S,
    dataset: &Dataset,
    config: &LoaderConfig,
) -> Result<LoadSummary, LoadError> {
    info!("clearing graph");
    store.clear().await?;

    let stations = store.insert_stations(&dataset.stations).await?;
    info!(stations, "stations inserted");

    let transfers = transfer_links(&dataset.stations);
    let transfer_links = store.insert_links(&transfers).await?;
    info!(transfer_links, "transfer links inserted");

    let walks = walking_links(&dataset.stations, config.walk_threshold_m);
    let walking_links = store.insert_links(&walks).await?;
    info!(
        walking_links,
        threshold_m = config.walk_threshold_m,
        "walking links inserted"
    );

    let train_links = store.insert_links(&dataset.train_links).await?;
    info!(train_links, "train links inserted");

    Ok(LoadSummary {
        stations,
        train_links,
        transfer_links,
        walking_links,
        skipped_links: dataset.skipped_links,
    })
}
