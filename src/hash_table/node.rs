use crate::keyed::Keyed;

/// A link to the rest of a chain. `None` marks the end of the
/// chain, or an empty bucket when stored in the bucket array
pub type Link<V> = Option<Box<Node<V>>>;

/// A node in a bucket's chain
pub struct Node<V> {
    pub bucket: usize,
    pub value: V,
    pub next: Link<V>,
}

impl<V: Keyed> Node<V> {
    /// Creates an unlinked node
    ///
    /// # Arguments
    ///
    /// `value`: The stored record
    ///
    /// `bucket`: The bucket the record hashed to
    pub fn new(value: V, bucket: usize) -> Self {
        Self {
            bucket,
            value,
            next: None,
        }
    }

    /// Returns true if the probing key matches the node
    ///
    /// # Arguments
    ///
    /// `key`: The probing key
    pub fn matches(&self, key: &str) -> bool {
        self.value.matches(key)
    }

    /// Returns the next node following this node
    pub fn next(&self) -> Option<&Self> {
        self.next.as_deref()
    }

    /// Returns the next node following this node
    pub fn next_mut(&mut self) -> Option<&mut Self> {
        self.next.as_deref_mut()
    }
}
