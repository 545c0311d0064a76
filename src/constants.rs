//! # Constants and type definitions for starmags
//!
//! This module centralizes the **default query parameters**, the **catalog identifiers**
//! and the small **type aliases** used throughout the crate.
//!
//! ## Overview
//!
//! - Angular units used by the cone search (degrees, arcseconds)
//! - VizieR catalog prefixes for the four enriched catalogs
//! - Default endpoint, search radius, row limit and placeholder token
//!
//! The values here are only defaults: every one of them can be overridden through
//! [`EnrichConfig`](crate::enrich::EnrichConfig) or the
//! [`VizierClient`](crate::vizier::VizierClient) constructors.

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;

/// Angle in arcseconds
pub type ArcSec = f64;

// -------------------------------------------------------------------------------------------------
// Catalog identifiers
// -------------------------------------------------------------------------------------------------

/// TESS Input Catalog (TIC), VizieR `IV/39`
pub const TESS_PREFIX: &str = "IV/39/";

/// Naval Observatory Merged Astrometric Dataset, VizieR `I/297`
pub const NOMAD_PREFIX: &str = "I/297/";

/// AAVSO Photometric All-Sky Survey (APASS DR9), VizieR `II/336`
pub const AAVSO_PREFIX: &str = "II/336/";

/// 2MASS All-Sky Catalog of Point Sources, VizieR `II/246`
pub const MASS_PREFIX: &str = "II/246/";

// -------------------------------------------------------------------------------------------------
// Query defaults
// -------------------------------------------------------------------------------------------------

/// Cone search radius
pub const SEARCH_RADIUS: ArcSec = 3.0;

/// Token written in place of a missing field
pub const DEFAULT_PLACEHOLDER: &str = "nan";

/// VizieR tab-separated output endpoint
pub const VIZIER_TSV_URL: &str = "https://vizier.cds.unistra.fr/viz-bin/asu-tsv";

/// Maximum number of rows returned per catalog table
pub const VIZIER_ROW_LIMIT: usize = 50;

/// HTTP timeout for a single cone search, in seconds
pub const HTTP_TIMEOUT_SECS: u64 = 30;

/// Default input file, relative to the working directory
pub const DEFAULT_INPUT_PATH: &str = "data/subset_1.txt";

/// Default output file, relative to the working directory
pub const DEFAULT_OUTPUT_PATH: &str = "data/subset_1_output.txt";
