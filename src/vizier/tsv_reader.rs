//! # VizieR `asu-tsv` response reader
//!
//! Turns the tab-separated output of the VizieR ASU server into a
//! [`CatalogMatchSet`].
//!
//! ## Response layout
//!
//! ```text
//! #RESOURCE=yCat_2246
//! #Name: II/246
//! #Table	II_246_out:
//! #Name: II/246/out
//! #Column	_r	(F6.3)	...
//! _r	RAJ2000	DEJ2000	Jmag	Hmag	Kmag        <- column names
//! arcmin	deg	deg	mag	mag	mag                 <- units
//! ------	----------	----------	------	------	------
//!  0.012	010.500120	+20.300050	 9.871	 9.600	 9.512
//!                                                  <- blank line closes the table
//! ```
//!
//! * A table starts at a `#Table` line. Its identifier is taken from the `#Name:` line that
//!   follows; when missing, it is derived from the `#Table` token (`II_246_out` → `II/246/out`).
//! * The first non-comment line is the header, then come the units line and the dash
//!   separator. Rows run until a blank line or a new comment block.
//! * Any other comment (`#INFO`, `#Coosys`, `#++++ No object found`, …) is ignored.
//!
//! The assembled header and rows are handed to the [`csv`] reader with a tab delimiter.

use std::sync::LazyLock;

use regex::Regex;

use crate::{
    catalogs::match_set::{CatalogMatchSet, CatalogTable},
    starmags_errors::StarmagsError,
};

static TABLE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#Table\s+(\S+?):?\s*$").expect("valid #Table regex"));

static NAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#Name:\s*(\S+)\s*$").expect("valid #Name regex"));

/// A table being accumulated line by line.
#[derive(Debug, Default)]
struct PendingTable<'a> {
    name: String,
    header: Option<&'a str>,
    separator_seen: bool,
    rows: Vec<&'a str>,
}

impl PendingTable<'_> {
    fn has_header(&self) -> bool {
        self.header.is_some()
    }

    fn into_table(self) -> Result<Option<CatalogTable>, StarmagsError> {
        let Some(header) = self.header else {
            return Ok(None);
        };

        let mut data = String::with_capacity(header.len() * (self.rows.len() + 1));
        data.push_str(header);
        for row in &self.rows {
            data.push('\n');
            data.push_str(row);
        }

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(true)
            .flexible(true)
            .quoting(false)
            .trim(csv::Trim::All)
            .from_reader(data.as_bytes());

        let columns: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        let mut table = CatalogTable::new(self.name, columns);
        for record in reader.records() {
            table.rows.push(record?.iter().map(str::to_string).collect());
        }
        Ok(Some(table))
    }
}

fn is_separator(line: &str) -> bool {
    line.contains('-') && line.chars().all(|c| c == '-' || c == '\t' || c == ' ')
}

fn name_from_table_token(token: &str) -> String {
    token.replace('_', "/")
}

/// Parse a complete `asu-tsv` response.
///
/// Arguments
/// -----------------
/// * `response`: Raw response body.
///
/// Return
/// ----------
/// * The tables in response order, or [`StarmagsError::VizierParseError`] if a data line
///   appears outside of any table.
///
/// See also
/// ------------
/// * [`VizierClient`](crate::vizier::VizierClient) – Issues the query returning this text.
pub fn parse_tsv(response: &str) -> Result<CatalogMatchSet, StarmagsError> {
    let mut tables = Vec::new();
    let mut current: Option<PendingTable> = None;

    for (line_number, raw_line) in response.lines().enumerate() {
        let line = raw_line.trim_end_matches('\r');

        if let Some(caps) = TABLE_REGEX.captures(line) {
            if let Some(table) = current.take() {
                tables.extend(table.into_table()?);
            }
            current = Some(PendingTable {
                name: name_from_table_token(&caps[1]),
                ..Default::default()
            });
            continue;
        }

        if line.starts_with('#') {
            if current.as_ref().is_some_and(PendingTable::has_header) {
                if let Some(table) = current.take() {
                    tables.extend(table.into_table()?);
                }
            } else if let (Some(table), Some(caps)) = (current.as_mut(), NAME_REGEX.captures(line))
            {
                table.name = caps[1].to_string();
            }
            continue;
        }

        if line.is_empty() {
            if current.as_ref().is_some_and(PendingTable::has_header) {
                if let Some(table) = current.take() {
                    tables.extend(table.into_table()?);
                }
            }
            continue;
        }

        let Some(table) = current.as_mut() else {
            return Err(StarmagsError::VizierParseError(format!(
                "data outside of a table at line {}: {line:?}",
                line_number + 1
            )));
        };

        if table.header.is_none() {
            table.header = Some(line);
        } else if !table.separator_seen {
            // units line, or the dash separator closing the header block
            table.separator_seen = is_separator(line);
        } else {
            table.rows.push(line);
        }
    }

    if let Some(table) = current.take() {
        tables.extend(table.into_table()?);
    }

    Ok(CatalogMatchSet::new(tables))
}

#[cfg(test)]
mod tsv_reader_test {
    use super::*;

    const TWO_TABLES: &str = "#\n\
#   VizieR Astronomical Server vizier.cds.unistra.fr\n\
#INFO\t-out.max=50\t\n\
\n\
#RESOURCE=yCat_2246\n\
#Name: II/246\n\
#Table\tII_246_out:\n\
#Name: II/246/out\n\
#Column\t_r\t(F6.3)\tDistance from center\n\
_r\tRAJ2000\tDEJ2000\tJmag\tHmag\tKmag\n\
arcmin\tdeg\tdeg\tmag\tmag\tmag\n\
------\t----------\t----------\t------\t------\t------\n\
 0.012\t010.500120\t+20.300050\t 9.871\t      \t 9.512\n\
 0.041\t010.500900\t+20.300100\t14.120\t13.800\t13.700\n\
\n\
#RESOURCE=yCat_1297\n\
#Table\tI_297_out:\n\
_r\tNOMAD1\tBmag\tVmag\n\
arcmin\t\tmag\tmag\n\
------\t------------\t------\t------\n\
 0.020\t1103-0012345\t12.340\t11.560\n";

    #[test]
    fn test_parse_two_tables() {
        let match_set = parse_tsv(TWO_TABLES).unwrap();
        assert_eq!(match_set.len(), 2);

        let mass = &match_set.tables[0];
        assert_eq!(mass.name, "II/246/out");
        assert_eq!(
            mass.columns,
            vec!["_r", "RAJ2000", "DEJ2000", "Jmag", "Hmag", "Kmag"]
        );
        assert_eq!(mass.rows.len(), 2);
        assert_eq!(mass.first_row_value("Jmag"), Some("9.871"));
        assert_eq!(mass.first_row_value("Hmag"), None);
        assert_eq!(mass.first_row_value("Kmag"), Some("9.512"));

        // no #Name: line, identifier derived from the #Table token
        let nomad = &match_set.tables[1];
        assert_eq!(nomad.name, "I/297/out");
        assert_eq!(nomad.first_row_value("Bmag"), Some("12.340"));
        assert_eq!(nomad.first_row_value("Vmag"), Some("11.560"));
    }

    #[test]
    fn test_no_object_found() {
        let response = "#\n#INFO\t-out.max=50\t\n\n#++++ No object found around (ICRS) position 010.5+20.3\n";
        let match_set = parse_tsv(response).unwrap();
        assert!(match_set.is_empty());
    }

    #[test]
    fn test_table_without_rows() {
        let response = "#Table\tII_336_apass9:\n\
#Name: II/336/apass9\n\
_r\tBmag\tVmag\n\
arcmin\tmag\tmag\n\
------\t------\t------\n";
        let match_set = parse_tsv(response).unwrap();
        assert_eq!(match_set.len(), 1);
        assert!(match_set.tables[0].is_empty());
        assert_eq!(match_set.tables[0].first_row_value("Bmag"), None);
    }

    #[test]
    fn test_comment_closes_table() {
        let response = "#Table\tII_246_out:\n\
Jmag\n\
mag\n\
------\n\
10.1\n\
#Table\tIV_39_tic82:\n\
#Name: IV/39/tic82\n\
Tmag\n\
mag\n\
------\n\
9.5\n";
        let match_set = parse_tsv(response).unwrap();
        let names: Vec<&str> = match_set.table_names().collect();
        assert_eq!(names, vec!["II/246/out", "IV/39/tic82"]);
        assert_eq!(match_set.tables[1].first_row_value("Tmag"), Some("9.5"));
    }

    #[test]
    fn test_data_outside_table() {
        let err = parse_tsv("#INFO\n12.0\t13.0\n").unwrap_err();
        assert!(matches!(err, StarmagsError::VizierParseError(_)));
    }

    #[test]
    fn test_crlf_line_endings() {
        let response = "#Table\tII_246_out:\r\nJmag\tHmag\r\nmag\tmag\r\n----\t----\r\n8.1\t7.9\r\n\r\n";
        let match_set = parse_tsv(response).unwrap();
        assert_eq!(match_set.tables[0].first_row_value("Hmag"), Some("7.9"));
    }
}
