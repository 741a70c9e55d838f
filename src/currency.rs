use log::debug;

/// Converts a currency-formatted amount such as `$1,024.50` to a
/// number, after removing every occurrence of `symbol` and any
/// thousands separators. Text that still isn't a number after
/// that yields `0.0`
///
/// # Arguments
///
/// `text`: The formatted amount
///
/// `symbol`: The currency symbol to strip
pub fn parse_amount(text: &str, symbol: char) -> f64 {
    let cleaned: String = text
        .chars()
        .filter(|&c| c != symbol && c != ',')
        .collect();
    cleaned.trim().parse().unwrap_or_else(|_| {
        debug!("unparsable amount {text:?}, using 0");
        0.0
    })
}
