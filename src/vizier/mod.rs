//! # VizieR cone search
//!
//! The enrichment loop only needs one capability from the remote side: *given a sky
//! position and a radius, return the catalog tables around it*. That capability is the
//! [`ConeSearch`] trait. [`VizierClient`] implements it over HTTP against the VizieR ASU
//! server; tests substitute canned implementations.
//!
//! ## Query
//!
//! [`VizierClient`] issues a single `GET` on the `asu-tsv` endpoint with:
//!
//! | Parameter | Value |
//! |---|---|
//! | `-c` | target in decimal degrees, e.g. `10.500000 +20.300000` |
//! | `-c.rs` | radius in arcseconds |
//! | `-source` | catalogs to search, e.g. `IV/39 I/297 II/336 II/246` |
//! | `-out.max` | row limit per table |
//! | `-out.add`, `-sort` | `_r`, so the first row of each table is the closest source |
//!
//! The response is parsed by [`tsv_reader::parse_tsv`].
//!
//! ## Notes
//!
//! - The HTTP agent is built once and reused for every row.
//! - There is no retry policy: any transport or HTTP status error is returned as
//!   [`StarmagsError::UreqHttpError`].

pub mod tsv_reader;

use std::time::Duration;

use tracing::debug;
use ureq::Agent;

use crate::{
    catalogs::{match_set::CatalogMatchSet, CatalogPrefixes},
    constants::{ArcSec, HTTP_TIMEOUT_SECS, VIZIER_ROW_LIMIT, VIZIER_TSV_URL},
    coordinates::SkyCoord,
    starmags_errors::StarmagsError,
};

use self::tsv_reader::parse_tsv;

/// A remote cone-search capable catalog service.
pub trait ConeSearch {
    /// Return every catalog table with sources within `radius` of `coord`.
    ///
    /// Arguments
    /// -----------------
    /// * `coord`: Center of the cone.
    /// * `radius`: Cone radius, arcseconds.
    ///
    /// Return
    /// ----------
    /// * The returned tables in response order (possibly none).
    fn query_region(
        &self,
        coord: &SkyCoord,
        radius: ArcSec,
    ) -> Result<CatalogMatchSet, StarmagsError>;
}

impl<T: ConeSearch + ?Sized> ConeSearch for &T {
    fn query_region(
        &self,
        coord: &SkyCoord,
        radius: ArcSec,
    ) -> Result<CatalogMatchSet, StarmagsError> {
        (**self).query_region(coord, radius)
    }
}

/// HTTP client for the VizieR ASU tab-separated service.
#[derive(Debug, Clone)]
pub struct VizierClient {
    http_client: Agent,
    endpoint: String,
    sources: Option<String>,
    row_limit: usize,
}

impl Default for VizierClient {
    fn default() -> Self {
        Self::new()
    }
}

impl VizierClient {
    /// Client on the public VizieR endpoint, restricted to the four default catalogs.
    pub fn new() -> Self {
        Self::with_timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
    }

    /// Same as [`VizierClient::new`] with a custom global HTTP timeout.
    pub fn with_timeout(timeout: Duration) -> Self {
        let config = Agent::config_builder()
            .timeout_global(Some(timeout))
            .build();
        let agent: Agent = config.into();

        VizierClient {
            http_client: agent,
            endpoint: VIZIER_TSV_URL.to_string(),
            sources: Some(CatalogPrefixes::default().vizier_sources()),
            row_limit: VIZIER_ROW_LIMIT,
        }
    }

    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Restrict the query to the catalogs named by `prefixes`.
    pub fn sources(mut self, prefixes: &CatalogPrefixes) -> Self {
        self.sources = Some(prefixes.vizier_sources());
        self
    }

    /// Query every VizieR catalog, as an unrestricted cone search does.
    ///
    /// Much slower: unrelated tables are returned and then ignored.
    pub fn all_sources(mut self) -> Self {
        self.sources = None;
        self
    }

    pub fn row_limit(mut self, row_limit: usize) -> Self {
        self.row_limit = row_limit;
        self
    }

    /// Query parameters sent for one cone search.
    pub(crate) fn query_params(&self, coord: &SkyCoord, radius: ArcSec) -> Vec<(&str, String)> {
        let mut params = vec![
            ("-c", coord.to_vizier_target()),
            ("-c.rs", format!("{radius}")),
            ("-out.max", self.row_limit.to_string()),
            ("-out.add", "_r".to_string()),
            ("-sort", "_r".to_string()),
            ("-oc.form", "dec".to_string()),
        ];
        if let Some(sources) = self.sources.as_ref().filter(|s| !s.is_empty()) {
            params.push(("-source", sources.clone()));
        }
        params
    }

    fn get_tsv(&self, params: &[(&str, String)]) -> Result<String, StarmagsError> {
        let mut response = self
            .http_client
            .get(self.endpoint.as_str())
            .query_pairs(params.iter().map(|(k, v)| (*k, v.as_str())))
            .call()?;
        let body = response.body_mut().read_to_vec()?;
        Ok(String::from_utf8_lossy(&body).into_owned())
    }
}

impl ConeSearch for VizierClient {
    fn query_region(
        &self,
        coord: &SkyCoord,
        radius: ArcSec,
    ) -> Result<CatalogMatchSet, StarmagsError> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(StarmagsError::InvalidRadius(radius));
        }

        let params = self.query_params(coord, radius);
        let body = self.get_tsv(&params)?;
        let match_set = parse_tsv(&body)?;

        debug!(
            %coord,
            radius,
            tables = match_set.len(),
            "VizieR cone search done"
        );
        Ok(match_set)
    }
}
