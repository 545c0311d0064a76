pub mod catalogs;
pub mod constants;
pub mod coordinates;
pub mod enrich;
pub mod input;
pub mod progress_bar;
pub mod starmags_errors;
pub mod vizier;

pub use crate::catalogs::{
    match_set::{CatalogMatchSet, CatalogTable},
    photometry::PhotometryRecord,
    Catalog, CatalogPrefixes,
};
pub use crate::coordinates::SkyCoord;
pub use crate::enrich::{EnrichConfig, EnrichSummary, Enricher};
pub use crate::input::InputTable;
pub use crate::starmags_errors::StarmagsError;
pub use crate::vizier::{ConeSearch, VizierClient};
