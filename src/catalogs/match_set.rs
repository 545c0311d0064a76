//! Tables returned by a single cone search.
//!
//! A [`CatalogMatchSet`] keeps the tables in **response order**. Each [`CatalogTable`]
//! holds its column names and the raw cell text of every row; no numeric conversion is
//! done here, values are copied to the output verbatim.

/// One catalog table of a cone search response.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CatalogTable {
    /// VizieR table identifier, e.g. `IV/39/tic82`.
    pub name: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl CatalogTable {
    pub fn new(name: impl Into<String>, columns: Vec<String>) -> Self {
        CatalogTable {
            name: name.into(),
            columns,
            rows: Vec::new(),
        }
    }

    /// Convenience constructor for a table with a single row.
    ///
    /// `fields` pairs a column name with its cell text.
    pub fn single_row(name: impl Into<String>, fields: &[(&str, &str)]) -> Self {
        let mut table = CatalogTable::new(
            name,
            fields.iter().map(|(column, _)| column.to_string()).collect(),
        );
        table
            .rows
            .push(fields.iter().map(|(_, value)| value.to_string()).collect());
        table
    }

    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    /// Cell text of `column` in the first row.
    ///
    /// Return
    /// ----------
    /// * `None` if the table is empty, the column is absent, or the cell is blank.
    pub fn first_row_value(&self, column: &str) -> Option<&str> {
        let idx = self.column_index(column)?;
        let value = self.rows.first()?.get(idx)?.trim();
        (!value.is_empty()).then_some(value)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// All tables returned by one cone search, in response order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CatalogMatchSet {
    pub tables: Vec<CatalogTable>,
}

impl CatalogMatchSet {
    pub fn new(tables: Vec<CatalogTable>) -> Self {
        CatalogMatchSet { tables }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn table_names(&self) -> impl Iterator<Item = &str> {
        self.tables.iter().map(|t| t.name.as_str())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CatalogTable> {
        self.tables.iter()
    }
}

impl<'a> IntoIterator for &'a CatalogMatchSet {
    type Item = &'a CatalogTable;
    type IntoIter = std::slice::Iter<'a, CatalogTable>;

    fn into_iter(self) -> Self::IntoIter {
        self.tables.iter()
    }
}
