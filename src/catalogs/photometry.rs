//! # Photometry records
//!
//! Fixed-shape records holding the extracted fields of the four catalogs for one object.
//!
//! Every slot starts **absent**; a slot is overwritten only when the matched catalog
//! table carries the column and its first row has a non-blank value. This lets catalogs
//! with sparse columns contribute what they have without failing the row.
//!
//! Rendering
//! -----------------
//! [`PhotometryRecord::render`] returns the 16 values in the fixed catalog/field order
//! (TESS, NOMAD, AAVSO, 2MASS), substituting the placeholder for absent slots. The order
//! in which catalogs appear in the response has no effect on the output.

use tracing::trace;

use super::{
    match_set::{CatalogMatchSet, CatalogTable},
    Catalog, CatalogPrefixes,
};

/// Extracted fields of one catalog, in [`Catalog::fields`] order.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogFields {
    catalog: Catalog,
    values: Vec<Option<String>>,
}

impl CatalogFields {
    pub fn new(catalog: Catalog) -> Self {
        CatalogFields {
            catalog,
            values: vec![None; catalog.fields().len()],
        }
    }

    /// Value of a field by name, `None` when absent or not part of this catalog.
    pub fn get(&self, field: &str) -> Option<&str> {
        let idx = self.catalog.fields().iter().position(|f| *f == field)?;
        self.values[idx].as_deref()
    }

    /// Overwrite the slots present in the first row of `table`.
    ///
    /// Return
    /// ----------
    /// * Number of slots written.
    pub fn fill_from(&mut self, table: &CatalogTable) -> usize {
        let mut written = 0;
        for (slot, field) in self.values.iter_mut().zip(self.catalog.fields()) {
            if let Some(value) = table.first_row_value(field) {
                *slot = Some(value.to_string());
                written += 1;
            }
        }
        written
    }

    pub fn is_empty(&self) -> bool {
        self.values.iter().all(Option::is_none)
    }

    pub fn render<'a>(&'a self, placeholder: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.values
            .iter()
            .map(move |value| value.as_deref().unwrap_or(placeholder))
    }
}

/// The four catalog groups of one object.
#[derive(Debug, Clone, PartialEq)]
pub struct PhotometryRecord {
    pub tess: CatalogFields,
    pub nomad: CatalogFields,
    pub aavso: CatalogFields,
    pub two_mass: CatalogFields,
}

impl Default for PhotometryRecord {
    fn default() -> Self {
        PhotometryRecord {
            tess: CatalogFields::new(Catalog::Tess),
            nomad: CatalogFields::new(Catalog::Nomad),
            aavso: CatalogFields::new(Catalog::Aavso),
            two_mass: CatalogFields::new(Catalog::TwoMass),
        }
    }
}

impl PhotometryRecord {
    /// Fill a record from the tables of one cone search.
    ///
    /// Tables are visited in response order; a table whose identifier matches no prefix
    /// is skipped. When several tables map to the same catalog, later tables overwrite the
    /// slots they carry.
    ///
    /// Arguments
    /// -----------------
    /// * `match_set`: Tables returned by the cone search.
    /// * `prefixes`: Identifier fragments of the four catalogs.
    ///
    /// Return
    /// ----------
    /// * The filled record; absent slots stay `None`.
    ///
    /// See also
    /// ------------
    /// * [`CatalogPrefixes::identify`] – Table to catalog attribution.
    /// * [`CatalogFields::fill_from`] – First-row extraction.
    pub fn from_match_set(match_set: &CatalogMatchSet, prefixes: &CatalogPrefixes) -> Self {
        let mut record = PhotometryRecord::default();
        for table in match_set {
            match prefixes.identify(&table.name) {
                Some(catalog) => {
                    let written = record.get_mut(catalog).fill_from(table);
                    trace!(table = %table.name, ?catalog, written, "catalog table matched");
                }
                None => trace!(table = %table.name, "ignoring unrelated catalog table"),
            }
        }
        record
    }

    pub fn get(&self, catalog: Catalog) -> &CatalogFields {
        match catalog {
            Catalog::Tess => &self.tess,
            Catalog::Nomad => &self.nomad,
            Catalog::Aavso => &self.aavso,
            Catalog::TwoMass => &self.two_mass,
        }
    }

    pub fn get_mut(&mut self, catalog: Catalog) -> &mut CatalogFields {
        match catalog {
            Catalog::Tess => &mut self.tess,
            Catalog::Nomad => &mut self.nomad,
            Catalog::Aavso => &mut self.aavso,
            Catalog::TwoMass => &mut self.two_mass,
        }
    }

    /// True when no catalog contributed any field.
    pub fn is_empty(&self) -> bool {
        Catalog::ALL.iter().all(|c| self.get(*c).is_empty())
    }

    /// The 16 output values, placeholder substituted for absent slots.
    pub fn render<'a>(&'a self, placeholder: &'a str) -> Vec<&'a str> {
        Catalog::ALL
            .iter()
            .flat_map(|c| self.get(*c).render(placeholder))
            .collect()
    }
}
