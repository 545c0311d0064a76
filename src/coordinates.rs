//! # Sky coordinates
//!
//! A minimal ICRS position used to build cone-search queries. Angles are kept in
//! **degrees**, as read from the input file.
//!
//! Right ascension is wrapped into `[0, 360)`. Declination must lie in `[-90, 90]`.

use std::fmt;

use crate::{constants::Degree, starmags_errors::StarmagsError};

/// Equatorial position (RA, Dec) in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkyCoord {
    pub ra: Degree,
    pub dec: Degree,
}

impl SkyCoord {
    /// Build a coordinate from right ascension and declination in degrees.
    ///
    /// Arguments
    /// -----------------
    /// * `ra`: Right ascension, degrees, any finite value; stored wrapped into `[0, 360)`.
    /// * `dec`: Declination, degrees, within `[-90, 90]`.
    ///
    /// Return
    /// ----------
    /// * The coordinate, or [`StarmagsError::InvalidCoordinate`] for a non-finite value
    ///   or a declination outside the valid range.
    pub fn new(ra: Degree, dec: Degree) -> Result<Self, StarmagsError> {
        if !ra.is_finite() || !dec.is_finite() || !(-90.0..=90.0).contains(&dec) {
            return Err(StarmagsError::InvalidCoordinate { ra, dec });
        }
        let ra = ra.rem_euclid(360.0);
        // rem_euclid can round up to the divisor for tiny negative inputs
        let ra = if ra >= 360.0 { 0.0 } else { ra };
        Ok(SkyCoord { ra, dec })
    }

    /// Render the VizieR `-c` target, e.g. `"10.500000 +20.300000"`.
    pub fn to_vizier_target(&self) -> String {
        format!("{:.6} {:+.6}", self.ra, self.dec)
    }
}

impl fmt::Display for SkyCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(ra={}, dec={})", self.ra, self.dec)
    }
}

#[cfg(test)]
mod coordinates_test {
    use super::*;

    #[test]
    fn test_valid_coordinate() {
        let coord = SkyCoord::new(10.5, 20.3).unwrap();
        assert_eq!(coord.ra, 10.5);
        assert_eq!(coord.dec, 20.3);
    }

    #[test]
    fn test_declination_out_of_range() {
        assert_eq!(
            SkyCoord::new(10.0, 90.5),
            Err(StarmagsError::InvalidCoordinate {
                ra: 10.0,
                dec: 90.5
            })
        );
        assert!(SkyCoord::new(10.0, -90.0).is_ok());
    }

    #[test]
    fn test_non_finite() {
        assert!(SkyCoord::new(f64::NAN, 0.0).is_err());
        assert!(SkyCoord::new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_right_ascension_wrapped() {
        assert_eq!(
            SkyCoord::new(-10.0, 20.0).unwrap().to_vizier_target(),
            "350.000000 +20.000000"
        );
        assert_eq!(
            SkyCoord::new(360.0, 20.0).unwrap().to_vizier_target(),
            "0.000000 +20.000000"
        );
        assert_eq!(SkyCoord::new(370.0, 20.0).unwrap().ra, 10.0);
        assert_eq!(SkyCoord::new(-1e-20, 0.0).unwrap().ra, 0.0);
    }

    #[test]
    fn test_vizier_target() {
        let coord = SkyCoord::new(10.5, 20.3).unwrap();
        assert_eq!(coord.to_vizier_target(), "10.500000 +20.300000");

        let coord = SkyCoord::new(359.25, -5.125).unwrap();
        assert_eq!(coord.to_vizier_target(), "359.250000 -5.125000");
    }
}
