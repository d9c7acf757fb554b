//! Table loading and saving
//!
//! Provides functions to load and save tables to/from CSV and JSON files.
//! CSV is the primary interchange format; headers are discovered at load
//! time and cell types are inferred per cell (empty, integer, float, text).

use super::table::{Table, Value};
use anyhow::{Context, Result};
use csv::{Reader, Writer};
use std::fs::File;
use std::path::Path;

/// Loader for serialized tables
pub struct TableLoader;

impl TableLoader {
    /// Load a table, choosing the format from the file extension
    /// (`.json` for JSON, anything else for CSV)
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Table> {
        if Self::is_json(path.as_ref()) {
            Self::load_json(path)
        } else {
            Self::load_csv(path)
        }
    }

    /// Save a table, choosing the format from the file extension
    pub fn save<P: AsRef<Path>>(table: &Table, path: P) -> Result<()> {
        if Self::is_json(path.as_ref()) {
            Self::save_json(table, path)
        } else {
            Self::save_csv(table, path)
        }
    }

    /// Load a table from a CSV file with a header row
    pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<Table> {
        let file = File::open(&path)
            .with_context(|| format!("Failed to open file: {:?}", path.as_ref()))?;

        let mut reader = Reader::from_reader(file);
        let columns: Vec<String> = reader
            .headers()
            .context("Failed to read CSV header")?
            .iter()
            .map(|h| h.to_string())
            .collect();

        let mut table = Table::new(columns)?;
        for result in reader.records() {
            let record = result.context("Failed to parse CSV record")?;
            let row: Vec<Value> = record.iter().map(Value::parse).collect();
            table.push_row(row)?;
        }

        Ok(table)
    }

    /// Save a table to a CSV file
    pub fn save_csv<P: AsRef<Path>>(table: &Table, path: P) -> Result<()> {
        let file = File::create(&path)
            .with_context(|| format!("Failed to create file: {:?}", path.as_ref()))?;

        let mut writer = Writer::from_writer(file);
        writer.write_record(table.columns())?;
        for row in table.rows() {
            writer.write_record(row.iter().map(|v| v.to_string()))?;
        }

        writer.flush()?;
        Ok(())
    }

    /// Load a table from a JSON file
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Table> {
        let file = File::open(&path)
            .with_context(|| format!("Failed to open file: {:?}", path.as_ref()))?;

        let table: Table = serde_json::from_reader(file)?;
        table.validate()?;
        Ok(table)
    }

    /// Save a table to a JSON file
    pub fn save_json<P: AsRef<Path>>(table: &Table, path: P) -> Result<()> {
        let file = File::create(&path)
            .with_context(|| format!("Failed to create file: {:?}", path.as_ref()))?;

        serde_json::to_writer_pretty(file, table)?;
        Ok(())
    }

    fn is_json(path: &Path) -> bool {
        path.extension()
            .map(|e| e.eq_ignore_ascii_case("json"))
            .unwrap_or(false)
    }
}
