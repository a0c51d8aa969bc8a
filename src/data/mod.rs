pub mod buildings;
pub mod fetcher;
pub mod geojson;

pub use buildings::{Building, BuildingTable};
pub use fetcher::{load_campus_data, CampusData, Dataset, GeoJsonFetcher, LoadReport};
pub use geojson::FeatureCollection;
