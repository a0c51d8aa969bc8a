//! Fetching the three OSM exports.
//!
//! The fetches are issued together and joined: nothing downstream sees the
//! data until all three have either loaded or failed. Each dataset keeps its
//! own outcome so a single failure only costs the layers drawn from it.

use crate::{
    core::{config::DataEndpoints, constants},
    data::geojson::FeatureCollection,
    prelude::HashMap,
    MapError, Result,
};
use async_trait::async_trait;
use std::fmt;

/// One of the three OSM exports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dataset {
    Lines,
    Points,
    Polygons,
}

impl Dataset {
    /// Registration order of the sources
    pub const ALL: [Dataset; 3] = [Dataset::Polygons, Dataset::Lines, Dataset::Points];

    /// Source id the dataset is registered under
    pub fn source_id(&self) -> &'static str {
        match self {
            Dataset::Lines => constants::LINES_SOURCE,
            Dataset::Points => constants::POINTS_SOURCE,
            Dataset::Polygons => constants::POLYGONS_SOURCE,
        }
    }

    pub fn endpoint<'a>(&self, endpoints: &'a DataEndpoints) -> &'a str {
        match self {
            Dataset::Lines => &endpoints.lines,
            Dataset::Points => &endpoints.points,
            Dataset::Polygons => &endpoints.polygons,
        }
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.source_id())
    }
}

/// Source of GeoJSON documents addressed by endpoint path
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait GeoJsonFetcher {
    async fn fetch(&self, endpoint: &str) -> Result<FeatureCollection>;
}

/// Fetches over HTTP relative to a base URL
pub struct HttpFetcher {
    client: reqwest::Client,
    base_url: reqwest::Url,
}

impl HttpFetcher {
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = reqwest::Url::parse(base_url)
            .map_err(|e| MapError::Config(format!("invalid base URL '{}': {}", base_url, e)))?;
        Ok(Self {
            client: reqwest::Client::new(),
            base_url,
        })
    }

    pub fn base_url(&self) -> &reqwest::Url {
        &self.base_url
    }

    /// Resolves an endpoint against the base URL
    pub fn resolve(&self, endpoint: &str) -> Result<reqwest::Url> {
        self.base_url
            .join(endpoint)
            .map_err(|e| MapError::Config(format!("invalid endpoint '{}': {}", endpoint, e)))
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl GeoJsonFetcher for HttpFetcher {
    async fn fetch(&self, endpoint: &str) -> Result<FeatureCollection> {
        let url = self.resolve(endpoint)?;
        log::debug!("GET {}", url);

        let body = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        FeatureCollection::from_str(&body)
    }
}

/// Reads exports from a local directory, treating endpoints as relative paths
#[cfg(all(feature = "tokio-runtime", not(target_arch = "wasm32")))]
pub struct FileFetcher {
    root: std::path::PathBuf,
}

#[cfg(all(feature = "tokio-runtime", not(target_arch = "wasm32")))]
impl FileFetcher {
    pub fn new(root: impl Into<std::path::PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn path_for(&self, endpoint: &str) -> std::path::PathBuf {
        self.root.join(endpoint.trim_start_matches('/'))
    }
}

#[cfg(all(feature = "tokio-runtime", not(target_arch = "wasm32")))]
#[async_trait]
impl GeoJsonFetcher for FileFetcher {
    async fn fetch(&self, endpoint: &str) -> Result<FeatureCollection> {
        let path = self.path_for(endpoint);
        log::debug!("reading {}", path.display());
        let body = tokio::fs::read_to_string(&path).await?;
        FeatureCollection::from_str(&body)
    }
}

/// Serves documents from memory; endpoints without an entry fail
#[derive(Default)]
pub struct StaticFetcher {
    documents: HashMap<String, std::result::Result<FeatureCollection, String>>,
}

impl StaticFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, endpoint: impl Into<String>, collection: FeatureCollection) -> Self {
        self.documents.insert(endpoint.into(), Ok(collection));
        self
    }

    /// Makes `endpoint` fail with `message`
    pub fn failing(mut self, endpoint: impl Into<String>, message: impl Into<String>) -> Self {
        self.documents.insert(endpoint.into(), Err(message.into()));
        self
    }

    /// Serves `collection` for all three default endpoints
    pub fn uniform(collection: FeatureCollection) -> Self {
        let endpoints = DataEndpoints::default();
        Dataset::ALL.iter().fold(Self::new(), |fetcher, dataset| {
            fetcher.with(dataset.endpoint(&endpoints), collection.clone())
        })
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl GeoJsonFetcher for StaticFetcher {
    async fn fetch(&self, endpoint: &str) -> Result<FeatureCollection> {
        match self.documents.get(endpoint) {
            Some(Ok(collection)) => Ok(collection.clone()),
            Some(Err(message)) => Err(MapError::Source(format!("{}: {}", endpoint, message))),
            None => Err(MapError::Source(format!("{}: not found", endpoint))),
        }
    }
}

/// Outcome of loading the three datasets
#[derive(Debug)]
pub struct CampusData {
    pub lines: Result<FeatureCollection>,
    pub points: Result<FeatureCollection>,
    pub polygons: Result<FeatureCollection>,
}

impl CampusData {
    /// All three datasets loaded
    pub fn loaded(
        lines: FeatureCollection,
        points: FeatureCollection,
        polygons: FeatureCollection,
    ) -> Self {
        Self {
            lines: Ok(lines),
            points: Ok(points),
            polygons: Ok(polygons),
        }
    }

    pub fn get(&self, dataset: Dataset) -> std::result::Result<&FeatureCollection, &MapError> {
        match dataset {
            Dataset::Lines => self.lines.as_ref(),
            Dataset::Points => self.points.as_ref(),
            Dataset::Polygons => self.polygons.as_ref(),
        }
    }

    /// Per-dataset outcomes in source registration order
    pub fn into_entries(self) -> [(Dataset, Result<FeatureCollection>); 3] {
        [
            (Dataset::Polygons, self.polygons),
            (Dataset::Lines, self.lines),
            (Dataset::Points, self.points),
        ]
    }

    pub fn report(&self) -> LoadReport {
        let entries = Dataset::ALL
            .iter()
            .map(|&dataset| {
                let outcome = match self.get(dataset) {
                    Ok(collection) => DatasetOutcome::Loaded {
                        features: collection.feature_count(),
                    },
                    Err(err) => DatasetOutcome::Failed {
                        message: err.to_string(),
                    },
                };
                DatasetStatus { dataset, outcome }
            })
            .collect();
        LoadReport { entries }
    }
}

/// Fetches the three datasets concurrently and waits for all of them
pub async fn load_campus_data<F>(fetcher: &F, endpoints: &DataEndpoints) -> CampusData
where
    F: GeoJsonFetcher + ?Sized,
{
    let (lines, points, polygons) = futures::join!(
        fetcher.fetch(&endpoints.lines),
        fetcher.fetch(&endpoints.points),
        fetcher.fetch(&endpoints.polygons),
    );

    let data = CampusData {
        lines,
        points,
        polygons,
    };
    for dataset in Dataset::ALL {
        if let Err(err) = data.get(dataset) {
            log::warn!("failed to load {} from {}: {}", dataset, dataset.endpoint(endpoints), err);
        }
    }
    data
}

#[derive(Debug, Clone, PartialEq)]
pub enum DatasetOutcome {
    Loaded { features: usize },
    Failed { message: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct DatasetStatus {
    pub dataset: Dataset,
    pub outcome: DatasetOutcome,
}

/// Per-dataset summary of a load
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LoadReport {
    pub entries: Vec<DatasetStatus>,
}

impl LoadReport {
    pub fn is_complete(&self) -> bool {
        self.failed().is_empty()
    }

    pub fn failed(&self) -> Vec<Dataset> {
        self.entries
            .iter()
            .filter(|e| matches!(e.outcome, DatasetOutcome::Failed { .. }))
            .map(|e| e.dataset)
            .collect()
    }

    /// User-facing message for a partial load, `None` when nothing failed
    pub fn status_message(&self) -> Option<String> {
        let failed = self.failed();
        if failed.is_empty() {
            return None;
        }
        let names: Vec<String> = failed.iter().map(ToString::to_string).collect();
        Some(format!("Some map data could not be loaded: {}", names.join(", ")))
    }
}
