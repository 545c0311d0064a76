use thiserror::Error;

#[derive(Error, Debug)]
pub enum StarmagsError {
    #[error("Unable to perform file operation: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("HTTP ureq error: {0}")]
    UreqHttpError(#[from] ureq::Error),

    #[error("Column not found in input header: {0}")]
    MissingColumn(String),

    #[error("Input file has no header line")]
    EmptyInput,

    #[error("Invalid number at line {line}, column '{column}': {value:?}")]
    InvalidNumber {
        line: u64,
        column: String,
        value: String,
    },

    #[error("Invalid sky coordinate: ra={ra}, dec={dec}")]
    InvalidCoordinate { ra: f64, dec: f64 },

    #[error("Invalid search radius: {0} arcsec")]
    InvalidRadius(f64),

    #[error("Error while parsing the VizieR response: {0}")]
    VizierParseError(String),

    #[error("Invalid progress bar template: {0}")]
    InvalidTemplate(String),
}

impl PartialEq for StarmagsError {
    fn eq(&self, other: &Self) -> bool {
        use StarmagsError::*;
        match (self, other) {
            // Wrapped library errors are not comparable: same variant is enough
            (IoError(_), IoError(_)) => true,
            (CsvError(_), CsvError(_)) => true,
            (UreqHttpError(_), UreqHttpError(_)) => true,

            (MissingColumn(a), MissingColumn(b)) => a == b,
            (EmptyInput, EmptyInput) => true,
            (
                InvalidNumber {
                    line: l1,
                    column: c1,
                    value: v1,
                },
                InvalidNumber {
                    line: l2,
                    column: c2,
                    value: v2,
                },
            ) => l1 == l2 && c1 == c2 && v1 == v2,
            (InvalidCoordinate { ra: r1, dec: d1 }, InvalidCoordinate { ra: r2, dec: d2 }) => {
                r1.to_bits() == r2.to_bits() && d1.to_bits() == d2.to_bits()
            }
            (InvalidRadius(a), InvalidRadius(b)) => a.to_bits() == b.to_bits(),
            (VizierParseError(a), VizierParseError(b)) => a == b,
            (InvalidTemplate(a), InvalidTemplate(b)) => a == b,

            _ => false,
        }
    }
}
