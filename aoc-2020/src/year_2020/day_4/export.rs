//! Tabular export of strictly valid passports

use super::passport::Passport;
use std::borrow::Cow;
use std::io::{self, Write};

/// Strictly valid passports laid out as rows under the union of their keys.
///
/// Columns appear in the order keys are first seen across the rows; a row
/// without a column's key has an empty cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidTable<'a> {
    columns: Vec<&'a str>,
    rows: Vec<&'a Passport>,
}

impl<'a> ValidTable<'a> {
    pub fn columns(&self) -> &[&'a str] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cell at `row`/`column`, `None` when the passport lacks that key
    pub fn cell(&self, row: usize, column: usize) -> Option<&'a str> {
        let key = *self.columns.get(column)?;
        let passport: &'a Passport = self.rows.get(row)?;
        passport.get(key)
    }

    /// Write a header row and one comma-separated row per passport
    pub fn write_csv<W: Write>(&self, mut writer: W) -> io::Result<()> {
        write_record(&mut writer, self.columns.iter().copied())?;
        for row in &self.rows {
            write_record(
                &mut writer,
                self.columns.iter().map(|key| row.get(key).unwrap_or("")),
            )?;
        }
        writer.flush()
    }
}

fn write_record<'c, W: Write>(
    writer: &mut W,
    cells: impl Iterator<Item = &'c str>,
) -> io::Result<()> {
    for (idx, cell) in cells.enumerate() {
        if idx > 0 {
            writer.write_all(b",")?;
        }
        writer.write_all(escape(cell).as_bytes())?;
    }
    writer.write_all(b"\n")
}

fn escape(cell: &str) -> Cow<'_, str> {
    if cell.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", cell.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(cell)
    }
}

/// Keep the strictly valid passports and lay them out for export
pub fn export_valid(records: &[Passport]) -> ValidTable<'_> {
    let rows: Vec<&Passport> = records.iter().filter(|p| p.is_strictly_valid()).collect();

    let mut columns: Vec<&str> = Vec::new();
    for key in rows.iter().copied().flat_map(Passport::keys) {
        if !columns.contains(&key) {
            columns.push(key);
        }
    }

    ValidTable { columns, rows }
}
