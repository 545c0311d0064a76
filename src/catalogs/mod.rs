//! # Catalogs: identification, result tables and field extraction
//!
//! The four catalogs enriched by starmags are fixed. Each one is described by a
//! [`Catalog`] variant carrying its **field list** (column names in the VizieR table)
//! and its **header labels** (column names in the output file).
//!
//! Modules
//! -----------------
//! * [`match_set`](crate::catalogs::match_set) – Tables returned by one cone search.
//! * [`photometry`](crate::catalogs::photometry) – Fixed-shape records filled from a match set.
//!
//! Identification
//! -----------------
//! A returned table is attributed to a catalog when its identifier **contains** one of the
//! configured [`CatalogPrefixes`]. Prefixes are tested in the order TESS, NOMAD, AAVSO,
//! 2MASS and the first hit wins. Tables matching no prefix are ignored.
//!
//! | Catalog | Prefix | Fields |
//! |---|---|---|
//! | TESS input catalog | `IV/39/` | GAIA, Gmag, Tmag, Bmag, Vmag |
//! | NOMAD | `I/297/` | Bmag, Vmag, Rmag, Jmag, Hmag, Kmag |
//! | AAVSO (APASS) | `II/336/` | Bmag, Vmag |
//! | 2MASS | `II/246/` | Jmag, Hmag, Kmag |

pub mod match_set;
pub mod photometry;

use itertools::Itertools;

use crate::constants::{AAVSO_PREFIX, MASS_PREFIX, NOMAD_PREFIX, TESS_PREFIX};

/// One of the four enriched catalogs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Catalog {
    Tess,
    Nomad,
    Aavso,
    TwoMass,
}

impl Catalog {
    /// All catalogs, in output order.
    pub const ALL: [Catalog; 4] = [
        Catalog::Tess,
        Catalog::Nomad,
        Catalog::Aavso,
        Catalog::TwoMass,
    ];

    /// Column names extracted from the first row of the catalog table.
    pub fn fields(&self) -> &'static [&'static str] {
        match self {
            Catalog::Tess => &["GAIA", "Gmag", "Tmag", "Bmag", "Vmag"],
            Catalog::Nomad => &["Bmag", "Vmag", "Rmag", "Jmag", "Hmag", "Kmag"],
            Catalog::Aavso => &["Bmag", "Vmag"],
            Catalog::TwoMass => &["Jmag", "Hmag", "Kmag"],
        }
    }

    /// Short name used to build the output header labels.
    pub fn label(&self) -> &'static str {
        match self {
            Catalog::Tess => "Tess",
            Catalog::Nomad => "Nomad",
            Catalog::Aavso => "Aavso",
            Catalog::TwoMass => "Mass",
        }
    }

    /// Output header labels for this catalog, e.g. `Nomad Bmag`.
    ///
    /// The Gaia identifier carried by the TESS catalog is written as a bare `GAIA`.
    pub fn header_labels(&self) -> Vec<String> {
        self.fields()
            .iter()
            .map(|field| match (self, *field) {
                (Catalog::Tess, "GAIA") => "GAIA".to_string(),
                _ => format!("{} {}", self.label(), field),
            })
            .collect()
    }
}

/// Header labels of every appended column, in output order.
pub fn output_header_labels() -> Vec<String> {
    Catalog::ALL
        .iter()
        .flat_map(|catalog| catalog.header_labels())
        .collect()
}

/// Total number of appended columns.
pub fn output_width() -> usize {
    Catalog::ALL.iter().map(|c| c.fields().len()).sum()
}

/// Identifier fragments used to attribute a returned table to a [`Catalog`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogPrefixes {
    pub tess: String,
    pub nomad: String,
    pub aavso: String,
    pub two_mass: String,
}

impl Default for CatalogPrefixes {
    fn default() -> Self {
        CatalogPrefixes {
            tess: TESS_PREFIX.to_string(),
            nomad: NOMAD_PREFIX.to_string(),
            aavso: AAVSO_PREFIX.to_string(),
            two_mass: MASS_PREFIX.to_string(),
        }
    }
}

impl CatalogPrefixes {
    pub fn get(&self, catalog: Catalog) -> &str {
        match catalog {
            Catalog::Tess => &self.tess,
            Catalog::Nomad => &self.nomad,
            Catalog::Aavso => &self.aavso,
            Catalog::TwoMass => &self.two_mass,
        }
    }

    /// Attribute a table identifier to a catalog.
    ///
    /// Arguments
    /// -----------------
    /// * `table_name`: VizieR table identifier, e.g. `II/246/out`.
    ///
    /// Return
    /// ----------
    /// * The first catalog (TESS, NOMAD, AAVSO, 2MASS order) whose prefix is contained in
    ///   `table_name`, or `None`.
    pub fn identify(&self, table_name: &str) -> Option<Catalog> {
        Catalog::ALL
            .into_iter()
            .find(|catalog| table_name.contains(self.get(*catalog)))
    }

    /// VizieR `-source` value restricting the query to the four catalogs.
    ///
    /// Trailing slashes are dropped so that `IV/39/` selects every table of `IV/39`.
    pub fn vizier_sources(&self) -> String {
        Catalog::ALL
            .iter()
            .map(|catalog| self.get(*catalog).trim_end_matches('/'))
            .join(" ")
    }
}
