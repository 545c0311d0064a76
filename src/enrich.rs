//! # Row-driven enrichment loop
//!
//! [`Enricher`] ties the pieces together: for every row of an [`InputTable`] it builds the
//! [`SkyCoord`], runs one cone search through a [`ConeSearch`] service, fills a
//! [`PhotometryRecord`] and writes the row followed by the 16 extracted values.
//!
//! ## Output layout
//!
//! ```text
//! id,ra,dec,GAIA,Tess Gmag,Tess Tmag,...,Mass Kmag
//! 1,10.5,20.3,nan,nan,11.034,...,nan
//! ```
//!
//! * Header: the input header followed by [`output_header_labels`].
//! * Rows: the input row as read, followed by [`PhotometryRecord::render`].
//! * One output row per input row, in input order, each newline-terminated.
//!
//! ## Failure semantics
//!
//! Rows are processed strictly one after the other. The first error (invalid coordinate,
//! transport failure, unparsable response, write failure) aborts the run and is returned.
//! The sink is flushed after every row, so rows written before the failure stay in the
//! output.
//!
//! ## Example
//!
//! ```rust, no_run
//! use camino::Utf8Path;
//! use starmags::enrich::{EnrichConfig, Enricher};
//! use starmags::vizier::VizierClient;
//!
//! let enricher = Enricher::new(VizierClient::new(), EnrichConfig::default());
//! let summary = enricher
//!     .enrich_file(
//!         Utf8Path::new("data/subset_1.txt"),
//!         Utf8Path::new("data/subset_1_output.txt"),
//!     )
//!     .unwrap();
//! println!("{} rows written", summary.rows_written);
//! ```

use std::{
    fs::File,
    io::{BufWriter, Write},
};

use camino::Utf8Path;
use itertools::Itertools;
use tracing::{debug, info};

use crate::{
    catalogs::{output_header_labels, photometry::PhotometryRecord, CatalogPrefixes},
    constants::{ArcSec, DEFAULT_PLACEHOLDER, SEARCH_RADIUS},
    coordinates::SkyCoord,
    input::{InputRow, InputTable},
    progress_bar::{fmt_dur, RowProgress},
    starmags_errors::StarmagsError,
    vizier::ConeSearch,
};

/// Tunables of the enrichment loop.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichConfig {
    /// Cone search radius.
    pub search_radius: ArcSec,
    /// Token written for missing fields (`nan`, `-`, …).
    pub placeholder: String,
    pub prefixes: CatalogPrefixes,
    pub show_progress: bool,
}

impl Default for EnrichConfig {
    fn default() -> Self {
        EnrichConfig {
            search_radius: SEARCH_RADIUS,
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            prefixes: CatalogPrefixes::default(),
            show_progress: true,
        }
    }
}

/// Outcome of a completed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EnrichSummary {
    pub rows_written: usize,
    /// Rows for which at least one catalog contributed a field.
    pub rows_matched: usize,
}

pub struct Enricher<S: ConeSearch> {
    service: S,
    config: EnrichConfig,
}

impl<S: ConeSearch> Enricher<S> {
    pub fn new(service: S, config: EnrichConfig) -> Self {
        Enricher { service, config }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    /// Output header line (without newline).
    pub fn output_header(&self, input: &InputTable) -> String {
        std::iter::once(input.header_line())
            .chain(output_header_labels())
            .join(",")
    }

    /// Run the cone search for one position and extract the photometry.
    pub fn lookup(&self, coord: &SkyCoord) -> Result<PhotometryRecord, StarmagsError> {
        let match_set = self
            .service
            .query_region(coord, self.config.search_radius)?;
        Ok(PhotometryRecord::from_match_set(
            &match_set,
            &self.config.prefixes,
        ))
    }

    /// Output line for `row` given its extracted photometry (without newline).
    pub fn format_row(&self, row: &InputRow, record: &PhotometryRecord) -> String {
        let raw = row.raw_line();
        std::iter::once(raw.as_str())
            .chain(record.render(&self.config.placeholder))
            .join(",")
    }

    /// Enrich one row: coordinate, cone search, formatting.
    ///
    /// Return
    /// ----------
    /// * The output line and the extracted record.
    pub fn enrich_row(
        &self,
        input: &InputTable,
        row: &InputRow,
    ) -> Result<(String, PhotometryRecord), StarmagsError> {
        let coord = input.coordinate(row)?;
        let record = self.lookup(&coord)?;
        debug!(line = row.line, %coord, matched = !record.is_empty(), "row enriched");
        Ok((self.format_row(row, &record), record))
    }

    /// Enrich every row of `input` into `sink`.
    ///
    /// Arguments
    /// -----------------
    /// * `input`: Parsed input table.
    /// * `sink`: Destination of the header and rows; flushed after each line.
    ///
    /// Return
    /// ----------
    /// * An [`EnrichSummary`], or the first error met. Lines already written stay in `sink`.
    ///
    /// See also
    /// ------------
    /// * [`Enricher::enrich_file`] – File to file convenience wrapper.
    pub fn enrich<W: Write>(
        &self,
        input: &InputTable,
        sink: &mut W,
    ) -> Result<EnrichSummary, StarmagsError> {
        info!(
            rows = input.len(),
            radius = self.config.search_radius,
            "starting catalog enrichment"
        );

        writeln!(sink, "{}", self.output_header(input))?;
        sink.flush()?;

        let mut progress = RowProgress::new(input.len() as u64, self.config.show_progress)?;
        let mut summary = EnrichSummary::default();

        for row in input.rows() {
            let (line, record) = self.enrich_row(input, row)?;
            writeln!(sink, "{line}")?;
            sink.flush()?;

            summary.rows_written += 1;
            if !record.is_empty() {
                summary.rows_matched += 1;
            }
            progress.row_done();
        }

        let avg = progress.average_row_time();
        progress.finish();

        info!(
            rows_written = summary.rows_written,
            rows_matched = summary.rows_matched,
            avg_row_time = %fmt_dur(avg),
            "catalog enrichment done"
        );
        Ok(summary)
    }

    /// Read `input_path`, enrich it and write the result to `output_path`.
    ///
    /// The output file is created (or truncated) only once the input has been parsed.
    pub fn enrich_file(
        &self,
        input_path: &Utf8Path,
        output_path: &Utf8Path,
    ) -> Result<EnrichSummary, StarmagsError> {
        let input = InputTable::from_path(input_path)?;
        let mut writer = BufWriter::new(File::create(output_path)?);
        info!(input = %input_path, output = %output_path, "writing enriched table");
        self.enrich(&input, &mut writer)
    }
}
