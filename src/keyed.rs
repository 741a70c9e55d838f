/// A record which carries its own identifier
pub trait Keyed {
    /// Returns the identifier used to place the record in a table
    fn key(&self) -> &str;

    /// Returns true if the record is stored under `key`
    ///
    /// # Arguments
    ///
    /// `key`: The identifier being looked up
    fn matches(&self, key: &str) -> bool {
        self.key() == key
    }
}

impl Keyed for String {
    fn key(&self) -> &str {
        self
    }
}
