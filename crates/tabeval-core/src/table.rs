use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Field values treated as missing when loading a CSV file.
///
/// Matches the NA markers recognised by common dataframe readers.
pub const DEFAULT_NULL_TOKENS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Options for loading a CSV table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadOptions {
    /// Field values normalized to the empty string.
    pub null_tokens: Vec<String>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            null_tokens: DEFAULT_NULL_TOKENS
                .iter()
                .map(|token| token.to_string())
                .collect(),
        }
    }
}

/// A fully loaded table: named columns over row-major text cells.
///
/// Every row holds exactly one cell per column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Build a table from a header and row-major cells.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self> {
        if let Some(name) = first_duplicate(&columns) {
            return Err(Error::InvalidTable(format!("duplicate column name: {name}")));
        }
        for (idx, row) in rows.iter().enumerate() {
            if row.len() != columns.len() {
                return Err(Error::InvalidTable(format!(
                    "row {idx} has {} field(s), expected {}",
                    row.len(),
                    columns.len()
                )));
            }
        }
        Ok(Self { columns, rows })
    }

    /// Build a table from `(name, values)` pairs of equal length.
    pub fn from_columns<N, V>(columns: Vec<(N, Vec<V>)>) -> Result<Self>
    where
        N: Into<String>,
        V: Into<String>,
    {
        let row_count = columns.first().map(|(_, values)| values.len()).unwrap_or(0);
        let mut names = Vec::with_capacity(columns.len());
        let mut rows: Vec<Vec<String>> = (0..row_count)
            .map(|_| Vec::with_capacity(columns.len()))
            .collect();

        for (name, values) in columns {
            let name = name.into();
            if values.len() != row_count {
                return Err(Error::InvalidTable(format!(
                    "column '{name}' has {} value(s), expected {row_count}",
                    values.len()
                )));
            }
            for (row, value) in rows.iter_mut().zip(values) {
                row.push(value.into());
            }
            names.push(name);
        }

        Self::new(names, rows)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    /// Row-aligned values of a single column.
    pub fn column_values(&self, name: &str) -> Option<Vec<&str>> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(|row| row[idx].as_str()).collect())
    }

    /// All cells in row-major order, visiting columns in `order`.
    ///
    /// Returns `None` when `order` names a column the table does not have.
    pub fn cells_row_major(&self, order: &[String]) -> Option<Vec<&str>> {
        let positions = order
            .iter()
            .map(|name| self.column_index(name))
            .collect::<Option<Vec<_>>>()?;

        let mut cells = Vec::with_capacity(self.rows.len() * positions.len());
        for row in &self.rows {
            cells.extend(positions.iter().map(|&idx| row[idx].as_str()));
        }
        Some(cells)
    }
}

/// Load a comma-separated file with a header row.
///
/// Column and row order follow the file. Fields matching one of the
/// configured null tokens are stored as the empty string, as are the
/// trailing fields of a short record. A record longer than the header is a
/// load error. Repeated header names are suffixed `.1`, `.2`, ...
pub fn load_table_csv(path: &Path, options: &LoadOptions) -> Result<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(|err| Error::load(path, err))?;

    let headers = reader
        .headers()
        .map_err(|err| Error::load(path, err))?
        .iter()
        .map(|h| h.to_string())
        .collect::<Vec<_>>();

    if headers.is_empty() {
        return Err(Error::load(path, "no columns to parse from file"));
    }
    let headers = dedupe_headers(headers);

    let null_tokens = options
        .null_tokens
        .iter()
        .map(String::as_str)
        .collect::<HashSet<_>>();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|err| Error::load(path, err))?;
        if record.len() > headers.len() {
            let line = record
                .position()
                .map(|pos| pos.line().to_string())
                .unwrap_or_else(|| "?".to_string());
            return Err(Error::load(
                path,
                format!(
                    "expected {} field(s) in line {line}, saw {}",
                    headers.len(),
                    record.len()
                ),
            ));
        }
        let mut row = record
            .iter()
            .map(|field| {
                if null_tokens.contains(field) {
                    String::new()
                } else {
                    field.to_string()
                }
            })
            .collect::<Vec<_>>();
        row.resize(headers.len(), String::new());
        rows.push(row);
    }

    Table::new(headers, rows).map_err(|err| Error::load(path, err))
}

/// Suffix repeated names with `.1`, `.2`, ..., skipping names already taken.
fn dedupe_headers(headers: Vec<String>) -> Vec<String> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut names = Vec::with_capacity(headers.len());

    for header in headers {
        let mut name = header;
        let mut count = counts.get(&name).copied().unwrap_or(0);
        while count > 0 {
            counts.insert(name.clone(), count + 1);
            name = format!("{name}.{count}");
            count = counts.get(&name).copied().unwrap_or(0);
        }
        counts.insert(name.clone(), count + 1);
        names.push(name);
    }

    names
}

fn first_duplicate(names: &[String]) -> Option<&str> {
    let mut seen = HashSet::new();
    names
        .iter()
        .find(|name| !seen.insert(name.as_str()))
        .map(String::as_str)
}
