//! # Input coordinate table
//!
//! Reader for the comma-delimited object list fed to the enrichment loop.
//!
//! ## Format
//!
//! ```text
//! id,ra,dec,pmra
//! 1,10.5,20.3,0.12
//! 2,182.25,-12.75,1.5e-2
//! ```
//!
//! * The first line names the columns; it must contain `ra` and `dec` (degrees).
//! * Every data line has the header's column count and every field parses as a float.
//! * Blank lines are skipped.
//!
//! Each [`InputRow`] keeps the text of its fields so the output file reproduces the row
//! exactly as it was read.

use std::{fs::File, io::Read};

use camino::Utf8Path;
use csv::StringRecord;
use itertools::Itertools;

use crate::{coordinates::SkyCoord, starmags_errors::StarmagsError};

/// Header names of the coordinate columns.
pub const RA_COLUMN: &str = "ra";
pub const DEC_COLUMN: &str = "dec";

/// One data line of the input file.
#[derive(Debug, Clone, PartialEq)]
pub struct InputRow {
    /// 1-based line number in the input file.
    pub line: u64,
    raw: StringRecord,
    values: Vec<f64>,
}

impl InputRow {
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// The row as read, comma-joined, without surrounding whitespace.
    pub fn raw_line(&self) -> String {
        self.raw.iter().join(",").trim().to_string()
    }
}

/// Header and data rows of an input file.
#[derive(Debug, Clone, PartialEq)]
pub struct InputTable {
    header: StringRecord,
    ra_index: usize,
    dec_index: usize,
    rows: Vec<InputRow>,
}

fn column_index(header: &StringRecord, name: &str) -> Result<usize, StarmagsError> {
    header
        .iter()
        .position(|column| column.trim() == name)
        .ok_or_else(|| StarmagsError::MissingColumn(name.to_string()))
}

impl InputTable {
    /// Read an input table from disk.
    ///
    /// Arguments
    /// -----------------
    /// * `path`: Path to the comma-delimited input file.
    ///
    /// Return
    /// ----------
    /// * The parsed table, or an error on I/O failure, missing `ra`/`dec` column, column
    ///   count mismatch or non-numeric field.
    ///
    /// See also
    /// ------------
    /// * [`InputTable::from_reader`] – Same parser over any reader.
    pub fn from_path(path: &Utf8Path) -> Result<Self, StarmagsError> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    /// Read an input table from any byte source.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, StarmagsError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(false)
            .trim(csv::Trim::None)
            .from_reader(reader);

        let header = csv_reader.headers()?.clone();
        if header.is_empty() {
            return Err(StarmagsError::EmptyInput);
        }

        let ra_index = column_index(&header, RA_COLUMN)?;
        let dec_index = column_index(&header, DEC_COLUMN)?;

        let mut rows = Vec::new();
        for record in csv_reader.records() {
            let raw = record?;
            let line = raw.position().map(|p| p.line()).unwrap_or_default();

            let values = raw
                .iter()
                .zip(header.iter())
                .map(|(value, column)| {
                    value
                        .trim()
                        .parse::<f64>()
                        .map_err(|_| StarmagsError::InvalidNumber {
                            line,
                            column: column.trim().to_string(),
                            value: value.to_string(),
                        })
                })
                .collect::<Result<Vec<f64>, StarmagsError>>()?;

            rows.push(InputRow { line, raw, values });
        }

        Ok(InputTable {
            header,
            ra_index,
            dec_index,
            rows,
        })
    }

    /// Header as read, comma-joined.
    pub fn header_line(&self) -> String {
        self.header.iter().join(",").trim().to_string()
    }

    pub fn rows(&self) -> &[InputRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Sky position of a row, from its `ra` and `dec` columns.
    pub fn coordinate(&self, row: &InputRow) -> Result<SkyCoord, StarmagsError> {
        SkyCoord::new(row.values[self.ra_index], row.values[self.dec_index])
    }
}
