//! Populate a Late Show store from a CSV export of guest bookings.
//!
//! Expected headers (extra columns are ignored):
//!
//! | Column | Maps to |
//! |--------|---------|
//! | `Show` | episode date |
//! | `Raw_Guest_List` | guest name |
//! | `GoogleKnowlege_Occupation` | guest occupation |
//!
//! Every data row becomes one appearance with a random 1–5 rating. The
//! episode number is the row's 1-based position among the data rows.

use std::io::Read;

use lateshow_store_sqlite::{LoadReport, LoadRow, SqliteStore};
use rand_core::RngCore;
use thiserror::Error;

pub const DATE_COLUMN: &str = "Show";
pub const GUEST_COLUMN: &str = "Raw_Guest_List";
pub const OCCUPATION_COLUMN: &str = "GoogleKnowlege_Occupation";

#[derive(Debug, Error)]
pub enum Error {
  #[error("csv error: {0}")]
  Csv(#[from] csv::Error),

  #[error("csv is missing the {0:?} column")]
  MissingColumn(&'static str),

  #[error("store error: {0}")]
  Store(#[from] lateshow_store_sqlite::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Rows ready for [`SqliteStore::bulk_load`], plus how many were dropped
/// while parsing.
#[derive(Debug, Default)]
pub struct ParsedRows {
  pub rows:    Vec<LoadRow>,
  pub skipped: usize,
}

/// A uniformly random rating in `1..=5`.
pub fn random_rating(rng: &mut impl RngCore) -> i64 {
  // Draws at or above the largest multiple of 5 are redrawn so every rating
  // is equally likely.
  const SPAN: u32 = 5;
  const ZONE: u32 = u32::MAX - u32::MAX % SPAN;
  loop {
    let v = rng.next_u32();
    if v < ZONE {
      return i64::from(v % SPAN) + 1;
    }
  }
}

struct Columns {
  date:       usize,
  guest:      usize,
  occupation: usize,
}

impl Columns {
  fn from_headers(headers: &csv::StringRecord) -> Result<Self> {
    let find = |name: &'static str| {
      headers
        .iter()
        .position(|h| h == name)
        .ok_or(Error::MissingColumn(name))
    };
    Ok(Self {
      date:       find(DATE_COLUMN)?,
      guest:      find(GUEST_COLUMN)?,
      occupation: find(OCCUPATION_COLUMN)?,
    })
  }
}

/// Parse every data row of `reader`.
///
/// A row that cannot be decoded or lacks one of the required fields is
/// logged and skipped; it still consumes an episode number.
pub fn parse_rows<R: Read>(reader: R, rng: &mut impl RngCore) -> Result<ParsedRows> {
  let mut csv_reader = csv::ReaderBuilder::new()
    .has_headers(true)
    .flexible(true)
    .trim(csv::Trim::All)
    .from_reader(reader);

  let columns = Columns::from_headers(csv_reader.headers()?)?;
  let mut parsed = ParsedRows::default();

  for (index, record) in csv_reader.records().enumerate() {
    // Header is line 1.
    let line = index as u64 + 2;
    let number = index as i64 + 1;

    let record = match record {
      Ok(r) => r,
      Err(e) => {
        tracing::warn!(line, error = %e, "skipping row");
        parsed.skipped += 1;
        continue;
      }
    };

    let field = |idx: usize, name: &'static str| {
      record.get(idx).map(str::to_owned).ok_or(name)
    };
    let fields = (|| {
      Ok::<_, &'static str>((
        field(columns.date, DATE_COLUMN)?,
        field(columns.guest, GUEST_COLUMN)?,
        field(columns.occupation, OCCUPATION_COLUMN)?,
      ))
    })();

    match fields {
      Ok((date, guest_name, occupation)) => parsed.rows.push(LoadRow {
        line,
        date,
        number,
        guest_name,
        occupation,
        rating: random_rating(rng),
      }),
      Err(missing) => {
        tracing::warn!(line, column = missing, "skipping row with missing field");
        parsed.skipped += 1;
      }
    }
  }

  Ok(parsed)
}

/// Parse `reader` and load it into `store` in a single transaction.
///
/// With `clear` set, existing data is removed first. Rows skipped during
/// parsing are included in the returned report.
pub async fn seed<R: Read>(
  store:  &SqliteStore,
  reader: R,
  rng:    &mut impl RngCore,
  clear:  bool,
) -> Result<LoadReport> {
  let parsed = parse_rows(reader, rng)?;
  let mut report = store.bulk_load(parsed.rows, clear).await?;
  report.skipped += parsed.skipped;
  Ok(report)
}

#[cfg(test)]
mod tests {
  use lateshow_core::store::ShowStore;

  use super::*;

  /// Cycles through a fixed sequence of `u32`s.
  struct Sequence(Vec<u32>, usize);

  impl RngCore for Sequence {
    fn next_u32(&mut self) -> u32 {
      let v = self.0[self.1 % self.0.len()];
      self.1 += 1;
      v
    }

    fn next_u64(&mut self) -> u64 { u64::from(self.next_u32()) }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
      for b in dest {
        *b = self.next_u32() as u8;
      }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
      self.fill_bytes(dest);
      Ok(())
    }
  }

  const CSV: &str = "\
YEAR,GoogleKnowlege_Occupation,Show,Group,Raw_Guest_List
1999,actor,1/11/99,Acting,Michael J. Fox
1999,Comedian,1/12/99,Comedy,Sandra Bernhard
1999,television actress,1/13/99,Acting
1999,film actress,1/14/99,Acting,Michael J. Fox
";

  #[test]
  fn random_rating_stays_in_range() {
    let mut rng = Sequence(vec![0, 4, 5, 9, u32::MAX - 1], 0);
    let ratings: Vec<_> = (0..5).map(|_| random_rating(&mut rng)).collect();
    assert_eq!(ratings, vec![1, 5, 1, 5, 5]);
  }

  #[test]
  fn random_rating_redraws_the_uneven_tail() {
    let mut rng = Sequence(vec![u32::MAX, u32::MAX, 7], 0);
    assert_eq!(random_rating(&mut rng), 3);
    assert_eq!(rng.1, 3);
  }

  #[test]
  fn parse_numbers_rows_and_skips_short_ones() {
    let mut rng = Sequence(vec![2], 0);
    let parsed = parse_rows(CSV.as_bytes(), &mut rng).unwrap();

    assert_eq!(parsed.skipped, 1);
    assert_eq!(parsed.rows.len(), 3);
    assert_eq!(parsed.rows[0].date, "1/11/99");
    assert_eq!(parsed.rows[0].guest_name, "Michael J. Fox");
    assert_eq!(parsed.rows[0].rating, 3);
    // The skipped third row still took number 3.
    assert_eq!(parsed.rows[2].number, 4);
    assert_eq!(parsed.rows[2].line, 5);
  }

  #[test]
  fn missing_header_is_an_error() {
    let mut rng = Sequence(vec![0], 0);
    let err = parse_rows("Show,Raw_Guest_List\n1/11/99,Fox\n".as_bytes(), &mut rng)
      .unwrap_err();
    assert!(matches!(err, Error::MissingColumn(OCCUPATION_COLUMN)));
  }

  #[tokio::test]
  async fn seed_loads_into_store() {
    let store = SqliteStore::open_in_memory().await.unwrap();
    let mut rng = Sequence(vec![1, 3], 0);

    let report = seed(&store, CSV.as_bytes(), &mut rng, true).await.unwrap();
    assert_eq!(report.appearances, 3);
    assert_eq!(report.skipped, 1);
    assert_eq!(report.guests, 2);
    assert_eq!(report.episodes, 3);

    let guests = store.list_guests().await.unwrap();
    assert_eq!(guests.len(), 2);
    assert_eq!(guests[0].occupation, "actor");
  }
}
