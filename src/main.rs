use std::path::PathBuf;

use bid_table::{menu::Menu, DEFAULT_BUCKET_COUNT};
use clap::Parser;

const DEFAULT_CSV_PATH: &str = "eBid_Monthly_Sales.csv";

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Monthly sales export loaded by the menu
    csv_path: Option<PathBuf>,
    /// Bid id the find and remove choices act on
    bid_key: Option<String>,
    #[clap(short = 'b', long, default_value_t = DEFAULT_BUCKET_COUNT)]
    buckets: usize,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    env_logger::Builder::from_env(
        env_logger::Env::new()
            .filter_or("BID_TABLE_LOG", "info")
            .write_style("BID_TABLE_LOG_STYLE"),
    )
    .init();

    let (csv_path, bid_key) = match (args.csv_path, args.bid_key) {
        (Some(csv_path), Some(bid_key)) => (csv_path, bid_key),
        (Some(csv_path), None) => (csv_path, "98109".to_owned()),
        (None, _) => (PathBuf::from(DEFAULT_CSV_PATH), "96300".to_owned()),
    };
    log::debug!("using {} buckets", args.buckets);

    let mut menu = Menu::new(csv_path, bid_key, args.buckets)?;
    menu.run(std::io::stdin().lock(), &mut std::io::stdout().lock())?;
    Ok(())
}
