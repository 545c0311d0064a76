#![allow(dead_code)]

use std::cell::{Cell, RefCell};

use starmags::{
    constants::ArcSec, vizier::tsv_reader::parse_tsv, CatalogMatchSet, ConeSearch, SkyCoord,
    StarmagsError,
};

pub const VEGA_RESPONSE: &str = include_str!("../data/vizier_vega.tsv");

/// Cone search answering every query with the same tables.
pub struct StaticConeSearch {
    pub match_set: CatalogMatchSet,
    pub queries: RefCell<Vec<(SkyCoord, ArcSec)>>,
}

impl StaticConeSearch {
    pub fn new(match_set: CatalogMatchSet) -> Self {
        StaticConeSearch {
            match_set,
            queries: RefCell::new(Vec::new()),
        }
    }

    pub fn from_tsv(response: &str) -> Self {
        Self::new(parse_tsv(response).expect("recorded VizieR response parses"))
    }
}

impl ConeSearch for StaticConeSearch {
    fn query_region(
        &self,
        coord: &SkyCoord,
        radius: ArcSec,
    ) -> Result<CatalogMatchSet, StarmagsError> {
        self.queries.borrow_mut().push((*coord, radius));
        Ok(self.match_set.clone())
    }
}

/// Cone search failing on the `fail_at`-th query (0-based), empty before that.
pub struct FailingConeSearch {
    pub fail_at: usize,
    pub calls: Cell<usize>,
}

impl FailingConeSearch {
    pub fn new(fail_at: usize) -> Self {
        FailingConeSearch {
            fail_at,
            calls: Cell::new(0),
        }
    }
}

impl ConeSearch for FailingConeSearch {
    fn query_region(
        &self,
        _coord: &SkyCoord,
        _radius: ArcSec,
    ) -> Result<CatalogMatchSet, StarmagsError> {
        let call = self.calls.get();
        self.calls.set(call + 1);
        if call == self.fail_at {
            Err(StarmagsError::VizierParseError("service unavailable".into()))
        } else {
            Ok(CatalogMatchSet::empty())
        }
    }
}

pub fn split_row(line: &str) -> Vec<&str> {
    line.split(',').collect()
}
