use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use log::error;

use crate::{
    bid::Bid,
    error::TableError,
    hash_table::ChainedHashTable,
    source::{load_bids, CsvBidSource, RecordSource},
};

/// An entry of the console menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    Load,
    DisplayAll,
    Find,
    Remove,
    Exit,
}

impl Choice {
    /// Parses the number typed at the menu prompt
    ///
    /// # Arguments
    ///
    /// `input`: The text entered by the user
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Self::Load),
            "2" => Some(Self::DisplayAll),
            "3" => Some(Self::Find),
            "4" => Some(Self::Remove),
            "9" => Some(Self::Exit),
            _ => None,
        }
    }
}

const MENU: &str = "Menu:
  1. Load Bids
  2. Display All Bids
  3. Find Bid
  4. Remove Bid
  9. Exit
Enter choice: ";

/// The interactive bid lookup session: a table plus the file it
/// loads from and the bid id the find and remove choices act on
pub struct Menu {
    csv_path: PathBuf,
    bid_key: String,
    table: ChainedHashTable<Bid>,
}

impl Menu {
    /// Creates a session with an empty table
    ///
    /// # Arguments
    ///
    /// `csv_path`: The CSV file loaded by the load choice
    ///
    /// `bid_key`: The bid id used by the find and remove choices
    ///
    /// `bucket_count`: The number of buckets of the table
    pub fn new(
        csv_path: impl Into<PathBuf>,
        bid_key: impl Into<String>,
        bucket_count: usize,
    ) -> Result<Self, TableError> {
        Ok(Self {
            csv_path: csv_path.into(),
            bid_key: bid_key.into(),
            table: ChainedHashTable::with_bucket_count(bucket_count)?,
        })
    }

    /// Returns the session's table
    pub fn table(&self) -> &ChainedHashTable<Bid> {
        &self.table
    }

    /// Prompts for choices until the user exits or the input ends
    ///
    /// # Arguments
    ///
    /// `input`: Where choices are read from
    ///
    /// `output`: Where the menu and results are written to
    pub fn run<R: BufRead, W: Write>(&mut self, mut input: R, output: &mut W) -> io::Result<()> {
        let mut line = String::new();
        loop {
            write!(output, "{MENU}")?;
            output.flush()?;
            line.clear();
            if input.read_line(&mut line)? == 0 {
                writeln!(output)?;
                break;
            }
            match Choice::parse(&line) {
                Some(Choice::Load) => self.load(output)?,
                Some(Choice::DisplayAll) => self.display_all(output)?,
                Some(Choice::Find) => self.find(output)?,
                Some(Choice::Remove) => self.remove(output)?,
                Some(Choice::Exit) => break,
                None => writeln!(output, "Unknown choice {:?}", line.trim())?,
            }
        }
        writeln!(output, "Good bye.")
    }

    fn load<W: Write>(&mut self, output: &mut W) -> io::Result<()> {
        writeln!(output, "Loading CSV file {}", self.csv_path.display())?;
        let start = Instant::now();
        let mut source = match CsvBidSource::open(&self.csv_path) {
            Ok(source) => source,
            Err(err) => {
                error!("failed to load {}: {err}", self.csv_path.display());
                return writeln!(output, "Could not load {}: {err}", self.csv_path.display());
            }
        };
        match source.header() {
            Ok(header) => writeln!(output, "{}", header.join(" | "))?,
            Err(err) => writeln!(output, "Could not read header: {err}")?,
        }
        let summary = load_bids(&mut source, &mut self.table);
        writeln!(
            output,
            "{} bids read, {} skipped",
            summary.loaded, summary.skipped
        )?;
        write_elapsed(output, start.elapsed())
    }

    fn display_all<W: Write>(&self, output: &mut W) -> io::Result<()> {
        for (bucket, bid) in self.table.enumerate() {
            writeln!(
                output,
                "Key:{bucket} {} {} {} {}",
                bid.id, bid.title, bid.fund, bid.amount
            )?;
        }
        Ok(())
    }

    fn find<W: Write>(&self, output: &mut W) -> io::Result<()> {
        let start = Instant::now();
        let found = self.table.search(&self.bid_key);
        let elapsed = start.elapsed();
        match found {
            Ok(Some(bid)) => writeln!(output, "{bid}")?,
            Ok(None) => writeln!(output, "Bid Id {} not found.", self.bid_key)?,
            Err(err) => writeln!(output, "{err}")?,
        }
        write_elapsed(output, elapsed)
    }

    fn remove<W: Write>(&mut self, output: &mut W) -> io::Result<()> {
        match self.table.remove(&self.bid_key) {
            Ok(Some(bid)) => writeln!(output, "Bid Id {} removed.", bid.id),
            Ok(None) => writeln!(output, "Bid Id {} not found.", self.bid_key),
            Err(err) => writeln!(output, "{err}"),
        }
    }
}

fn write_elapsed<W: Write>(output: &mut W, elapsed: Duration) -> io::Result<()> {
    writeln!(output, "time: {} microseconds", elapsed.as_micros())?;
    writeln!(output, "time: {} seconds", elapsed.as_secs_f64())
}
