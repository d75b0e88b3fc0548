//! Appending customers to an existing table.

use std::io::{Read, Write};

use camino::Utf8Path;
use convoy_core::CustomerSet;
use csv::{Terminator, WriterBuilder};

use super::{ColumnLayout, CustomerColumn, CustomerCsvError, CustomerRecord};

/// Append one customer row to the CSV table at `path`.
///
/// The table's header decides where each value goes: the row gets as many
/// fields as the header, with the record's values in the matching columns
/// and every other field empty. A missing trailing newline is added first.
///
/// The record is validated before anything is written, so a rejected record
/// leaves the table untouched.
///
/// # Errors
///
/// - [`CustomerCsvError::Validation`] for a negative demand or invalid
///   coordinates.
/// - [`CustomerCsvError::Open`] when the table cannot be read.
/// - [`CustomerCsvError::MissingColumn`] when its header lacks a column.
/// - [`CustomerCsvError::Append`] when the row cannot be written.
pub fn append_customer(path: &Utf8Path, record: &CustomerRecord) -> Result<(), CustomerCsvError> {
    CustomerSet::new(
        record.location(),
        std::iter::once((record.location(), record.demand)),
    )?;

    let mut contents = String::new();
    convoy_fs::open_utf8_file(path)
        .and_then(|mut file| file.read_to_string(&mut contents))
        .map_err(|source| CustomerCsvError::Open {
            source,
            path: path.to_path_buf(),
        })?;

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(contents.as_bytes());
    let headers = reader.headers()?;
    let layout = ColumnLayout::resolve(headers)?;
    let mut row = vec![String::new(); headers.len()];
    for column in CustomerColumn::ALL {
        if let Some(slot) = row.get_mut(layout.index(column)) {
            *slot = field_text(record, column);
        }
    }

    let append_err = |source: std::io::Error| CustomerCsvError::Append {
        source,
        path: path.to_path_buf(),
    };
    let mut file = convoy_fs::append_utf8_file(path).map_err(append_err)?;
    if !contents.is_empty() && !contents.ends_with('\n') {
        file.write_all(b"\n").map_err(append_err)?;
    }
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(file);
    writer
        .write_record(&row)
        .map_err(|err| append_err(err.into()))?;
    writer.flush().map_err(append_err)?;

    log::info!(
        "appended customer ({}, {}) with demand {} to {path}",
        record.latitude,
        record.longitude,
        record.demand
    );
    Ok(())
}

fn field_text(record: &CustomerRecord, column: CustomerColumn) -> String {
    match column {
        CustomerColumn::Latitude => record.latitude.to_string(),
        CustomerColumn::Longitude => record.longitude.to_string(),
        CustomerColumn::Demand => record.demand.to_string(),
    }
}
