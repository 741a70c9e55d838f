pub mod bid;
pub mod currency;
pub mod error;
pub mod hash;
pub mod hash_table;
pub mod keyed;
pub mod menu;
pub mod source;

pub use bid::Bid;
pub use error::{SourceError, TableError};
pub use hash::{Fnv1Hash, KeyHash, NumericHash};
pub use hash_table::{ChainedHashTable, DEFAULT_BUCKET_COUNT};
pub use keyed::Keyed;
pub use source::{load_bids, CsvBidSource, LoadSummary, RecordSource};
