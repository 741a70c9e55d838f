use std::fs::File;
use std::io::Read;
use std::path::Path;

use log::{info, warn};

use crate::{
    bid::Bid, currency::parse_amount, error::SourceError, hash::KeyHash,
    hash_table::ChainedHashTable,
};

/// A source of bids read from outside the table
pub trait RecordSource {
    /// Returns the names of the source's columns
    fn header(&mut self) -> Result<Vec<String>, SourceError>;

    /// Reads the next bid, or `None` once the source is exhausted
    fn next_record(&mut self) -> Option<Result<Bid, SourceError>>;
}

// column layout of the monthly sales export
const TITLE_COLUMN: usize = 0;
const ID_COLUMN: usize = 1;
const AMOUNT_COLUMN: usize = 4;
const FUND_COLUMN: usize = 8;

/// Reads bids from a CSV monthly sales export with a header row
pub struct CsvBidSource<R: Read> {
    reader: csv::Reader<R>,
    record: csv::StringRecord,
    row: u64,
    done: bool,
}

impl CsvBidSource<File> {
    /// Opens a CSV file
    ///
    /// # Arguments
    ///
    /// `path`: The path of the file
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, SourceError> {
        Ok(Self::from_reader(File::open(path)?))
    }
}

impl<R: Read> CsvBidSource<R> {
    /// Reads CSV from any reader
    ///
    /// # Arguments
    ///
    /// `reader`: The CSV text
    pub fn from_reader(reader: R) -> Self {
        Self {
            // short rows are reported as missing fields rather
            // than as csv errors
            reader: csv::ReaderBuilder::new()
                .has_headers(true)
                .flexible(true)
                .from_reader(reader),
            record: csv::StringRecord::new(),
            row: 0,
            done: false,
        }
    }

    fn field(&self, column: usize) -> Result<&str, SourceError> {
        self.record.get(column).ok_or(SourceError::MissingField {
            row: self.row,
            column,
        })
    }

    fn current_bid(&self) -> Result<Bid, SourceError> {
        let title = self.field(TITLE_COLUMN)?;
        let id = self.field(ID_COLUMN)?;
        let amount = parse_amount(self.field(AMOUNT_COLUMN)?, '$');
        let fund = self.field(FUND_COLUMN)?;
        Ok(Bid::new(id, title, fund, amount))
    }
}

impl<R: Read> RecordSource for CsvBidSource<R> {
    fn header(&mut self) -> Result<Vec<String>, SourceError> {
        Ok(self.reader.headers()?.iter().map(String::from).collect())
    }

    fn next_record(&mut self) -> Option<Result<Bid, SourceError>> {
        if self.done {
            return None;
        }
        match self.reader.read_record(&mut self.record) {
            Ok(false) => {
                self.done = true;
                None
            }
            Ok(true) => {
                self.row += 1;
                Some(self.current_bid())
            }
            Err(err) => {
                self.row += 1;
                // the reader can't make progress past an io failure
                self.done = err.is_io_error();
                Some(Err(err.into()))
            }
        }
    }
}

/// The outcome of loading a source into a table
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LoadSummary {
    pub loaded: usize,
    pub skipped: usize,
}

/// Inserts every bid of a source into a table. Malformed rows and
/// bids with invalid ids are logged and skipped
///
/// # Arguments
///
/// `source`: The source to drain
///
/// `table`: The table to insert into
pub fn load_bids<S: RecordSource + ?Sized, H: KeyHash>(
    source: &mut S,
    table: &mut ChainedHashTable<Bid, H>,
) -> LoadSummary {
    let mut summary = LoadSummary::default();
    while let Some(record) = source.next_record() {
        let inserted = record.and_then(|bid| table.insert(bid).map_err(SourceError::from));
        match inserted {
            Ok(()) => summary.loaded += 1,
            Err(err) => {
                warn!("skipping bid: {err}");
                summary.skipped += 1;
            }
        }
    }
    info!("loaded {} bids, skipped {}", summary.loaded, summary.skipped);
    summary
}

#[cfg(test)]
mod test {
    use std::io::Cursor;

    use super::{load_bids, CsvBidSource, LoadSummary, RecordSource};
    use crate::bid::Bid;
    use crate::error::SourceError;
    use crate::hash_table::ChainedHashTable;

    const HEADER: &str = "Title,ArticleID,Department,CloseDate,WinningBid,InventoryID,VehicleID,ReceiptNumber,Fund\n";

    fn source(rows: &str) -> CsvBidSource<Cursor<String>> {
        CsvBidSource::from_reader(Cursor::new(format!("{HEADER}{rows}")))
    }

    fn source_bytes(rows: &[u8]) -> CsvBidSource<Cursor<Vec<u8>>> {
        let mut text = HEADER.as_bytes().to_vec();
        text.extend_from_slice(rows);
        CsvBidSource::from_reader(Cursor::new(text))
    }

    const NOT_UTF8_ROWS: &[u8] = b"T\xff,98100,Enterprise,11/1/2016,$1.00,,,,General Fund\n\
        Desk,98112,Enterprise,11/4/2016,$80,,,,General Fund\n";

    #[test]
    fn header() {
        let mut source = source("");
        assert_eq!(source.header().unwrap()[1], "ArticleID");
        assert_eq!(source.header().unwrap().len(), 9);
        assert!(source.next_record().is_none());
    }

    #[test]
    fn columns() {
        let mut source = source(
            "Table,98109,Enterprise,11/1/2016,$340.50,,,,General Fund\n\
             \"Chair, oak\",98110,Enterprise,11/2/2016,\"$1,024.00\",,,,Enterprise\n",
        );
        assert_eq!(
            source.next_record().unwrap().unwrap(),
            Bid::new("98109", "Table", "General Fund", 340.5)
        );
        assert_eq!(
            source.next_record().unwrap().unwrap(),
            Bid::new("98110", "Chair, oak", "Enterprise", 1024.0)
        );
        assert!(source.next_record().is_none());
        assert!(source.next_record().is_none());
    }

    #[test]
    fn missing_field() {
        let mut source = source("Table,98109,Enterprise\n");
        assert!(matches!(
            source.next_record(),
            Some(Err(SourceError::MissingField { row: 1, column: 4 }))
        ));
    }

    #[test]
    fn load() {
        let mut source = source(
            "Table,98109,Enterprise,11/1/2016,$340.50,,,,General Fund\n\
             Broken,98111,Enterprise\n\
             Lamp,lamp,Enterprise,11/3/2016,$5.00,,,,General Fund\n\
             Desk,98112,Enterprise,11/4/2016,$80,,,,General Fund\n",
        );
        let mut table = ChainedHashTable::new();
        let summary = load_bids(&mut source, &mut table);
        assert_eq!(
            summary,
            LoadSummary {
                loaded: 2,
                skipped: 2
            }
        );
        assert_eq!(table.len(), 2);
        assert_eq!(
            table.search("98112"),
            Ok(Some(&Bid::new("98112", "Desk", "General Fund", 80.0)))
        );
        assert_eq!(table.search("98111"), Ok(None));
    }

    #[test]
    fn malformed_row_keeps_reading() {
        let mut source = source_bytes(NOT_UTF8_ROWS);
        assert!(matches!(source.next_record(), Some(Err(SourceError::Csv(_)))));
        assert_eq!(
            source.next_record().unwrap().unwrap(),
            Bid::new("98112", "Desk", "General Fund", 80.0)
        );
        assert!(source.next_record().is_none());
    }

    #[test]
    fn load_skips_malformed_row() {
        let mut source = source_bytes(NOT_UTF8_ROWS);
        let mut table = ChainedHashTable::new();
        assert_eq!(
            load_bids(&mut source, &mut table),
            LoadSummary {
                loaded: 1,
                skipped: 1
            }
        );
        assert_eq!(table.search("98100"), Ok(None));
        assert!(table.contains_key("98112").unwrap());
    }

    #[test]
    fn open_missing_file() {
        assert!(matches!(
            CsvBidSource::open("/nonexistent/eBid_Monthly_Sales.csv"),
            Err(SourceError::Io(_))
        ));
    }
}
