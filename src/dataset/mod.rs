//! Tab-delimited dataset loading and route export.
//!
//! A dataset directory holds three row-aligned airport files plus a route
//! file named by the caller:
//!
//! | File | Record |
//! |------|--------|
//! | `name.txt` | `code<TAB>name` |
//! | `xy.txt` | `x<TAB>y` screen coordinates |
//! | `weight.txt` | `name<TAB>latitude<TAB>longitude<TAB>altitude` |
//! | routes file | `origin<TAB>distance<TAB>destination` |
//!
//! Lines starting with `#` and blank lines are skipped everywhere. The
//! airport files are joined by data-row index; rows missing from `xy.txt`
//! or `weight.txt` (or the whole file) leave the position and location
//! zeroed. Syntax problems are reported as [`DatasetError::Parse`] with
//! file and line; unreadable files as [`DatasetError::Io`].

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::network::{Airport, GeoPoint, LoadReport, Network, Route};

/// Failure modes of dataset reading and writing.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// A file could not be read or written.
    #[error("cannot access `{}`", path.display())]
    Io {
        /// The offending path.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// A record did not match its expected shape.
    #[error("{file}:{line}: {message}")]
    Parse {
        /// File the record came from.
        file: String,
        /// One-based line number in that file.
        line: usize,
        /// What was wrong.
        message: String,
    },
}

/// One parsed airport row, joined across the three airport files.
#[derive(Debug, Clone, PartialEq)]
pub struct AirportRecord {
    /// Short identifier from `name.txt`.
    pub code: String,
    /// Display name from `name.txt`.
    pub name: String,
    /// Screen x from `xy.txt`, zero when absent.
    pub x: i32,
    /// Screen y from `xy.txt`, zero when absent.
    pub y: i32,
    /// Geographic location from `weight.txt`, zeroed when absent.
    pub location: GeoPoint,
}

impl AirportRecord {
    /// Builds the domain payload for this record.
    pub fn to_airport(&self) -> Airport {
        Airport::new(self.code.clone(), self.name.clone())
            .with_position(self.x, self.y)
            .with_location(
                self.location.latitude,
                self.location.longitude,
                self.location.altitude,
            )
    }
}

/// One parsed route row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRecord {
    /// Code of one endpoint.
    pub origin: String,
    /// Route length.
    pub distance: u32,
    /// Code of the other endpoint.
    pub destination: String,
}

/// A fully parsed dataset, not yet applied to any network.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    /// Airport rows in file order.
    pub airports: Vec<AirportRecord>,
    /// Route rows in file order.
    pub routes: Vec<RouteRecord>,
}

impl Dataset {
    /// Reads and parses a dataset directory.
    ///
    /// `name.txt` and the routes file must exist; `xy.txt` and
    /// `weight.txt` may be absent.
    ///
    /// # Errors
    /// [`DatasetError::Io`] for unreadable mandatory files,
    /// [`DatasetError::Parse`] for malformed records.
    pub fn read(dir: impl AsRef<Path>, routes_file: &str) -> Result<Self, DatasetError> {
        let dir = dir.as_ref();
        let names = read_text(&dir.join("name.txt"))?;
        let coordinates = read_text_or_empty(&dir.join("xy.txt"))?;
        let locations = read_text_or_empty(&dir.join("weight.txt"))?;
        let routes = read_text(&dir.join(routes_file))?;

        let mut dataset = Self::default();
        for (line_no, line) in data_lines(&names) {
            let mut fields = line.split('\t');
            let code = fields
                .next()
                .filter(|field| !field.is_empty())
                .ok_or_else(|| parse_error("name.txt", line_no, "expected `code<TAB>name`"))?;
            let name = fields
                .next()
                .ok_or_else(|| parse_error("name.txt", line_no, "expected `code<TAB>name`"))?;
            dataset.airports.push(AirportRecord {
                code: code.to_owned(),
                name: name.to_owned(),
                x: 0,
                y: 0,
                location: GeoPoint::default(),
            });
        }
        debug!(file = "name.txt", rows = dataset.airports.len(), "parsed airports");

        for (index, (line_no, line)) in data_lines(&coordinates).enumerate() {
            let Some(record) = dataset.airports.get_mut(index) else {
                break;
            };
            let mut fields = line.split('\t');
            record.x = parse_field(&mut fields, "xy.txt", line_no, "x")?;
            record.y = parse_field(&mut fields, "xy.txt", line_no, "y")?;
        }

        for (index, (line_no, line)) in data_lines(&locations).enumerate() {
            let Some(record) = dataset.airports.get_mut(index) else {
                break;
            };
            // Leading field repeats the airport name; the join is by row.
            let mut fields = line.split('\t');
            fields.next();
            record.location = GeoPoint {
                latitude: parse_field(&mut fields, "weight.txt", line_no, "latitude")?,
                longitude: parse_field(&mut fields, "weight.txt", line_no, "longitude")?,
                altitude: parse_field(&mut fields, "weight.txt", line_no, "altitude")?,
            };
        }

        for (line_no, line) in data_lines(&routes) {
            let mut fields = line.split('\t');
            let expected = "expected `origin<TAB>distance<TAB>destination`";
            let origin = fields
                .next()
                .filter(|field| !field.is_empty())
                .ok_or_else(|| parse_error(routes_file, line_no, expected))?;
            let distance = parse_field(&mut fields, routes_file, line_no, "distance")?;
            let destination = fields
                .next()
                .ok_or_else(|| parse_error(routes_file, line_no, expected))?;
            dataset.routes.push(RouteRecord {
                origin: origin.to_owned(),
                distance,
                destination: destination.to_owned(),
            });
        }
        debug!(file = routes_file, rows = dataset.routes.len(), "parsed routes");

        Ok(dataset)
    }

    /// Replaces `network`'s contents with this dataset.
    ///
    /// One undo step reverts the whole load. Unresolvable and duplicate
    /// records are tallied in the report, not fatal.
    pub fn populate(&self, network: &mut Network) -> LoadReport {
        network.load(
            self.airports.iter().map(AirportRecord::to_airport),
            self.routes
                .iter()
                .map(|record| Route::new(record.origin.clone(), record.destination.clone(), record.distance)),
        )
    }
}

/// Writes every route as `origin<TAB>distance<TAB>destination`, one line
/// per edge, returning the number of lines written.
///
/// Whitespace inside codes is stripped so the record shape survives a
/// reload. An empty network produces an empty file.
///
/// # Errors
/// [`DatasetError::Io`] if the file cannot be written.
pub fn export_routes(network: &Network, path: impl AsRef<Path>) -> Result<usize, DatasetError> {
    let path = path.as_ref();
    let mut out = String::new();
    let mut count = 0;
    for route in network.routes() {
        let origin = route.origin.replace(' ', "");
        let destination = route.destination.replace(' ', "");
        out.push_str(&format!("{origin}\t{}\t{destination}\n", route.distance));
        count += 1;
    }
    fs::write(path, out).map_err(|source| DatasetError::Io {
        path: path.to_owned(),
        source,
    })?;
    debug!(path = %path.display(), routes = count, "exported routes");
    Ok(count)
}

fn read_text(path: &Path) -> Result<String, DatasetError> {
    fs::read_to_string(path).map_err(|source| DatasetError::Io {
        path: path.to_owned(),
        source,
    })
}

fn read_text_or_empty(path: &Path) -> Result<String, DatasetError> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(text),
        Err(source) if source.kind() == io::ErrorKind::NotFound => Ok(String::new()),
        Err(source) => Err(DatasetError::Io {
            path: path.to_owned(),
            source,
        }),
    }
}

/// Data rows with their one-based line numbers; comments and blanks are
/// filtered out after trimming.
fn data_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
}

fn parse_error(file: &str, line: usize, message: impl Into<String>) -> DatasetError {
    DatasetError::Parse {
        file: file.to_owned(),
        line,
        message: message.into(),
    }
}

fn parse_field<'a, T>(
    fields: &mut impl Iterator<Item = &'a str>,
    file: &str,
    line: usize,
    what: &str,
) -> Result<T, DatasetError>
where
    T: core::str::FromStr,
{
    let raw = fields
        .next()
        .ok_or_else(|| parse_error(file, line, format!("missing {what}")))?;
    raw.parse()
        .map_err(|_| parse_error(file, line, format!("invalid {what} `{raw}`")))
}
