//! Customer tables in CSV form.
//!
//! A table holds one customer per row. Columns are located by header name so
//! their order is free and extra columns are ignored; each logical column
//! accepts several spellings, matched case-insensitively after trimming:
//!
//! | Column    | Accepted headers                |
//! |-----------|---------------------------------|
//! | latitude  | `latitude`, `lat`, `enlem`      |
//! | longitude | `longitude`, `lon`, `lng`, `boylam` |
//! | demand    | `demand`, `malzeme_talebi`      |
//!
//! The depot is never part of the table; it is supplied when the rows are
//! turned into a [`CustomerSet`].

mod append;
mod error;

use std::fmt;
use std::io::Read;
use std::str::FromStr;

use camino::Utf8Path;
use convoy_core::{CustomerSet, ValidationError};
use csv::StringRecord;
use geo::Coord;

pub use append::append_customer;
pub use error::CustomerCsvError;

/// A logical column of the customer table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CustomerColumn {
    /// Latitude in degrees.
    Latitude,
    /// Longitude in degrees.
    Longitude,
    /// Integer demand in load units.
    Demand,
}

impl CustomerColumn {
    const ALL: [Self; 3] = [Self::Latitude, Self::Longitude, Self::Demand];

    /// Header names accepted for this column, canonical name first.
    #[must_use]
    pub const fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::Latitude => &["latitude", "lat", "enlem"],
            Self::Longitude => &["longitude", "lon", "lng", "boylam"],
            Self::Demand => &["demand", "malzeme_talebi"],
        }
    }

    fn matches(self, header: &str) -> bool {
        let name = header.trim().trim_start_matches('\u{feff}');
        self.aliases()
            .iter()
            .any(|alias| alias.eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for CustomerColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Latitude => "latitude",
            Self::Longitude => "longitude",
            Self::Demand => "demand",
        };
        f.write_str(name)
    }
}

/// One customer row as read from a table.
///
/// Values are parsed but not validated; demand stays signed so negative
/// entries reach [`CustomerSet::new`] and are reported there.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CustomerRecord {
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
    /// Demand in load units.
    pub demand: i64,
}

impl CustomerRecord {
    /// Construct a record.
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64, demand: i64) -> Self {
        Self {
            latitude,
            longitude,
            demand,
        }
    }

    /// The record's location with `x` as longitude.
    #[must_use]
    pub const fn location(&self) -> Coord<f64> {
        Coord {
            x: self.longitude,
            y: self.latitude,
        }
    }
}

/// Positions of the logical columns within a header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ColumnLayout {
    latitude: usize,
    longitude: usize,
    demand: usize,
}

impl ColumnLayout {
    fn resolve(headers: &StringRecord) -> Result<Self, CustomerCsvError> {
        let position = |column: CustomerColumn| {
            headers
                .iter()
                .position(|header| column.matches(header))
                .ok_or(CustomerCsvError::MissingColumn { column })
        };
        Ok(Self {
            latitude: position(CustomerColumn::Latitude)?,
            longitude: position(CustomerColumn::Longitude)?,
            demand: position(CustomerColumn::Demand)?,
        })
    }

    const fn index(self, column: CustomerColumn) -> usize {
        match column {
            CustomerColumn::Latitude => self.latitude,
            CustomerColumn::Longitude => self.longitude,
            CustomerColumn::Demand => self.demand,
        }
    }

    fn parse(self, row: &StringRecord) -> Result<CustomerRecord, CustomerCsvError> {
        let line = row.position().map_or(0, csv::Position::line);
        Ok(CustomerRecord::new(
            self.field(row, line, CustomerColumn::Latitude)?,
            self.field(row, line, CustomerColumn::Longitude)?,
            self.field(row, line, CustomerColumn::Demand)?,
        ))
    }

    fn field<T: FromStr>(
        self,
        row: &StringRecord,
        line: u64,
        column: CustomerColumn,
    ) -> Result<T, CustomerCsvError> {
        let raw = row.get(self.index(column)).unwrap_or_default().trim();
        raw.parse().map_err(|_| CustomerCsvError::InvalidField {
            line,
            column,
            value: raw.to_owned(),
        })
    }
}

/// Read every customer row from a CSV file.
///
/// # Errors
///
/// Returns [`CustomerCsvError::Open`] when the file cannot be opened, plus
/// every error of [`read_customers_from`].
pub fn read_customers(path: &Utf8Path) -> Result<Vec<CustomerRecord>, CustomerCsvError> {
    let file = convoy_fs::open_utf8_file(path).map_err(|source| CustomerCsvError::Open {
        source,
        path: path.to_path_buf(),
    })?;
    let records = read_customers_from(file)?;
    log::info!("read {} customers from {path}", records.len());
    Ok(records)
}

/// Read every customer row from CSV text.
///
/// Blank lines are skipped. Rows may carry extra columns.
///
/// # Errors
///
/// - [`CustomerCsvError::Read`] for malformed CSV.
/// - [`CustomerCsvError::MissingColumn`] when the header lacks a column.
/// - [`CustomerCsvError::InvalidField`] for empty or unparsable values.
///
/// # Examples
/// ```
/// use convoy_data::{CustomerRecord, read_customers_from};
///
/// # fn main() -> Result<(), convoy_data::CustomerCsvError> {
/// let table = "enlem,boylam,malzeme_talebi\n39.93,32.86,25\n";
/// let records = read_customers_from(table.as_bytes())?;
/// assert_eq!(records, vec![CustomerRecord::new(39.93, 32.86, 25)]);
/// # Ok(())
/// # }
/// ```
pub fn read_customers_from<R: Read>(reader: R) -> Result<Vec<CustomerRecord>, CustomerCsvError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);
    let layout = ColumnLayout::resolve(csv_reader.headers()?)?;

    let mut records = Vec::new();
    for result in csv_reader.records() {
        let row = result?;
        if row.iter().all(|field| field.trim().is_empty()) {
            continue;
        }
        records.push(layout.parse(&row)?);
    }
    Ok(records)
}

/// Validate `records` into a [`CustomerSet`] rooted at `depot`.
///
/// Customers keep their table order; the first row becomes point 1.
///
/// # Errors
///
/// Returns the [`ValidationError`] raised by [`CustomerSet::new`].
pub fn into_customer_set(
    depot: Coord<f64>,
    records: &[CustomerRecord],
) -> Result<CustomerSet, ValidationError> {
    CustomerSet::new(
        depot,
        records
            .iter()
            .map(|record| (record.location(), record.demand)),
    )
}

/// Read a CSV file and validate it into a [`CustomerSet`].
///
/// # Errors
///
/// Returns every error of [`read_customers`] and
/// [`CustomerCsvError::Validation`] for unusable values.
pub fn load_customer_set(
    path: &Utf8Path,
    depot: Coord<f64>,
) -> Result<CustomerSet, CustomerCsvError> {
    let records = read_customers(path)?;
    Ok(into_customer_set(depot, &records)?)
}
