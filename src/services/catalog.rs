//! Catalog loading.
//!
//! Reads the movie dataset (a CSV file with a header row) into an in-memory
//! [`Catalog`]: the list of movies with their showtimes, plus the number of
//! seats still available for every movie/showtime pair.
//!
//! Only four of the columns matter, by position:
//!
//! | index | column          |
//! |-------|-----------------|
//! | 0     | movie code      |
//! | 1     | title           |
//! | 3     | showtime        |
//! | 5     | available seats |
//!
//! Rows with fewer than six fields, not counting trailing empty ones, are
//! skipped. A seat count that is not a
//! non-negative integer aborts the load; rows read before it are kept in the
//! [`CatalogBuilder`].

use std::collections::HashMap;
use std::io;
use std::num::ParseIntError;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU32, Ordering};
use tracing::{debug, info, instrument};

use crate::models::{Movie, ShowingKey};

const MIN_FIELDS: usize = 6;
const CODE_FIELD: usize = 0;
const TITLE_FIELD: usize = 1;
const SHOWTIME_FIELD: usize = 3;
const SEATS_FIELD: usize = 5;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Error reading CSV file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Error reading CSV record: {0}")]
    Csv(#[from] csv::Error),

    #[error("Error parsing seat count {value:?} on line {line}: {source}")]
    InvalidSeatCount {
        line: u64,
        value: String,
        #[source]
        source: ParseIntError,
    },
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LoadSummary {
    pub rows_loaded: usize,
    pub rows_skipped: usize,
}

/// Accumulates catalog rows. Survives a failed load with everything read so far.
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    movies: Vec<Movie>,
    index: HashMap<String, usize>,
    seats: HashMap<ShowingKey, u32>,
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers one showing. A repeated (code, showtime) pair replaces the
    /// previous seat count.
    pub fn add_showing(&mut self, code: &str, title: &str, showtime: &str, seats: u32) {
        let idx = match self.index.get(code) {
            Some(&idx) => idx,
            None => {
                self.movies.push(Movie::new(code, title));
                let idx = self.movies.len() - 1;
                self.index.insert(code.to_string(), idx);
                idx
            }
        };
        self.movies[idx].showtimes.push(showtime.to_string());
        let key = ShowingKey::new(code, showtime);
        if let Some(previous) = self.seats.insert(key.clone(), seats) {
            debug!(showing = %key, previous, seats, "Seat count replaced by later row");
        }
    }

    /// Reads CSV records from `reader`, adding one showing per valid row.
    pub fn read_csv<R: io::Read>(
        &mut self,
        reader: R,
        has_header: bool,
    ) -> Result<LoadSummary, CatalogError> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(has_header)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut summary = LoadSummary::default();
        for result in rdr.records() {
            let record = result?;
            let line = record.position().map(|p| p.line()).unwrap_or_default();

            // Trailing empty fields do not count: `M2,Up,x,12:30,x,` is a short row
            let fields = (0..record.len())
                .rev()
                .find(|&idx| !record[idx].is_empty())
                .map_or(0, |last| last + 1);
            if fields < MIN_FIELDS {
                debug!(line, fields, "Skipping short catalog row");
                summary.rows_skipped += 1;
                continue;
            }

            let raw_seats = &record[SEATS_FIELD];
            let seats = raw_seats
                .parse::<u32>()
                .map_err(|source| CatalogError::InvalidSeatCount {
                    line,
                    value: raw_seats.to_string(),
                    source,
                })?;

            self.add_showing(
                &record[CODE_FIELD],
                &record[TITLE_FIELD],
                &record[SHOWTIME_FIELD],
                seats,
            );
            summary.rows_loaded += 1;
        }

        Ok(summary)
    }

    /// Reads the whole file, then parses it with [`CatalogBuilder::read_csv`].
    #[instrument(level = "info", skip(self, path), fields(path = %path.as_ref().display()))]
    pub async fn load_file(
        &mut self,
        path: impl AsRef<Path>,
        has_header: bool,
    ) -> Result<LoadSummary, CatalogError> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| CatalogError::Io {
                path: path.to_path_buf(),
                source,
            })?;

        let summary = self.read_csv(bytes.as_slice(), has_header)?;
        info!(
            rows_loaded = summary.rows_loaded,
            rows_skipped = summary.rows_skipped,
            "Catalog file parsed"
        );
        Ok(summary)
    }

    pub fn build(self) -> Catalog {
        Catalog {
            movies: self.movies,
            index: self.index,
            seats: self
                .seats
                .into_iter()
                .map(|(key, seats)| (key, AtomicU32::new(seats)))
                .collect(),
        }
    }
}

/// Movies and seat counts. The set of showings is fixed once built; only the
/// counts change, and only through [`crate::services::booking::BookingService`].
#[derive(Debug, Default)]
pub struct Catalog {
    movies: Vec<Movie>,
    index: HashMap<String, usize>,
    seats: HashMap<ShowingKey, AtomicU32>,
}

impl Catalog {
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::new()
    }

    pub fn movie(&self, code: &str) -> Option<&Movie> {
        self.index.get(code).map(|&idx| &self.movies[idx])
    }

    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    pub fn showing_count(&self) -> usize {
        self.seats.len()
    }

    pub fn available_seats(&self, code: &str, showtime: &str) -> Option<u32> {
        self.seat_counter(code, showtime)
            .map(|seats| seats.load(Ordering::Acquire))
    }

    pub(crate) fn seat_counter(&self, code: &str, showtime: &str) -> Option<&AtomicU32> {
        self.seats.get(&ShowingKey::new(code, showtime))
    }
}
