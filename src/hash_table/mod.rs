use std::fmt::{Debug, Formatter};
use std::marker::PhantomData;

use duplicate::duplicate_item;
use itertools::Itertools;
use log::debug;

use crate::{
    error::TableError,
    hash::{KeyHash, NumericHash},
    keyed::Keyed,
};

use self::{
    iter::{Iter, IterMut},
    node::{Link, Node},
};

pub mod iter;
pub mod node;

/// The number of buckets a table is created with by default
pub const DEFAULT_BUCKET_COUNT: usize = 179;

/// A hash table with a fixed number of buckets which resolves
/// collisions by chaining records that share a bucket.
///
/// The table never rehashes. Chains grow without bound when the
/// bucket count is small relative to the number of records, so
/// callers should size the table for the load they expect
pub struct ChainedHashTable<V: Keyed, H: KeyHash = NumericHash> {
    buckets: Box<[Link<V>]>,
    element_count: usize,
    _phantom_hash: PhantomData<fn() -> H>,
}

impl<V: Keyed> ChainedHashTable<V, NumericHash> {
    /// Creates an empty table with the default bucket count
    pub fn new() -> Self {
        Self::empty(DEFAULT_BUCKET_COUNT)
    }

    /// Creates an empty table with a fixed number of buckets
    ///
    /// # Arguments
    ///
    /// `bucket_count`: The number of buckets, which must be positive
    pub fn with_bucket_count(bucket_count: usize) -> Result<Self, TableError> {
        Self::with_hasher(bucket_count)
    }
}

impl<V: Keyed, H: KeyHash> ChainedHashTable<V, H> {
    /// Creates an empty table with a fixed number of buckets,
    /// hashing keys with `H`
    ///
    /// # Arguments
    ///
    /// `bucket_count`: The number of buckets, which must be positive
    pub fn with_hasher(bucket_count: usize) -> Result<Self, TableError> {
        if bucket_count == 0 {
            return Err(TableError::ZeroBuckets);
        }
        Ok(Self::empty(bucket_count))
    }

    fn empty(bucket_count: usize) -> Self {
        Self {
            buckets: std::iter::repeat_with(|| None).take(bucket_count).collect(),
            element_count: 0,
            _phantom_hash: PhantomData,
        }
    }

    /// Returns the number of buckets, fixed for the table's lifetime
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Returns the number of records in the table
    pub fn len(&self) -> usize {
        self.element_count
    }

    /// Returns true if the table holds no records
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes every record from the table
    pub fn clear(&mut self) {
        for bucket in self.buckets.iter_mut() {
            let mut chain = bucket.take();
            // unlink one node at a time so long chains don't
            // recurse through `Box` drops
            while let Some(mut node) = chain {
                chain = node.next.take();
            }
        }
        self.element_count = 0;
    }

    /// Returns the bucket a key belongs to
    ///
    /// # Arguments
    ///
    /// `key`: The identifier to hash
    pub fn hash(&self, key: &str) -> Result<usize, TableError> {
        let key_hash = H::hash(key)?;
        Ok((key_hash % self.buckets.len() as u64) as usize)
    }

    /// Inserts a record at the tail of its bucket's chain.
    ///
    /// No check for an existing record with the same key is made. A
    /// duplicate is chained after the original and stays shadowed by
    /// it until the original is removed. Use [`Self::replace`] to
    /// update a record in place
    ///
    /// # Arguments
    ///
    /// `value`: The record to insert
    pub fn insert(&mut self, value: V) -> Result<(), TableError> {
        let bucket = self.hash(value.key())?;
        debug!("inserting {} into bucket {bucket}", value.key());
        let mut cursor = &mut self.buckets[bucket];
        while let Some(node) = cursor {
            cursor = &mut node.next;
        }
        *cursor = Some(Box::new(Node::new(value, bucket)));
        self.element_count += 1;
        Ok(())
    }

    /// Inserts every record from an iterator, returning how many
    /// were inserted. Stops at the first record with an invalid key;
    /// the records before it stay in the table
    ///
    /// # Arguments
    ///
    /// `values`: The records to insert
    pub fn insert_all<I: IntoIterator<Item = V>>(
        &mut self,
        values: I,
    ) -> Result<usize, TableError> {
        values
            .into_iter()
            .try_fold(0, |inserted, value| self.insert(value).map(|()| inserted + 1))
    }

    /// Replaces the first record stored under the same key, returning
    /// the old record. Inserts the record if no such record exists
    ///
    /// # Arguments
    ///
    /// `value`: The new record
    pub fn replace(&mut self, value: V) -> Result<Option<V>, TableError> {
        match self.search_mut(value.key())? {
            Some(existing) => Ok(Some(std::mem::replace(existing, value))),
            None => self.insert(value).map(|()| None),
        }
    }

    /// Fetches the first record stored under a key
    ///
    /// # Arguments
    ///
    /// `key`: The key to search for
    pub fn search(&self, key: &str) -> Result<Option<&V>, TableError> {
        let bucket = self.hash(key)?;
        Ok(Self::find_in_chain(self.buckets[bucket].as_deref(), key).map(|node| &node.value))
    }

    /// Fetches the first record stored under a key
    ///
    /// # Arguments
    ///
    /// `key`: The key to search for
    pub fn search_mut(&mut self, key: &str) -> Result<Option<&mut V>, TableError> {
        let bucket = self.hash(key)?;
        Ok(Self::find_in_chain_mut(self.buckets[bucket].as_deref_mut(), key)
            .map(|node| &mut node.value))
    }

    /// Checks if the table holds a record for the given key
    ///
    /// # Arguments
    ///
    /// `key`: The key to search for
    pub fn contains_key(&self, key: &str) -> Result<bool, TableError> {
        self.search(key).map(|value| value.is_some())
    }

    /// Removes the first record stored under a key, returning it
    /// if one was found. Removing a missing key has no effect
    ///
    /// # Arguments
    ///
    /// `key`: The key of the record to remove
    pub fn remove(&mut self, key: &str) -> Result<Option<V>, TableError> {
        let bucket = self.hash(key)?;
        // walk the links rather than the nodes so the matching
        // node's incoming link can be rewritten
        let mut cursor = &mut self.buckets[bucket];
        while cursor.as_ref().is_some_and(|node| !node.matches(key)) {
            if let Some(node) = cursor {
                cursor = &mut node.next;
            }
        }
        let Some(mut node) = cursor.take() else {
            return Ok(None);
        };
        *cursor = node.next.take();
        self.element_count -= 1;
        debug!("removed {key} from bucket {bucket}");
        Ok(Some(node.value))
    }

    /// Returns an iterator over `(bucket, record)` pairs, visiting
    /// buckets in ascending order and chains in insertion order
    pub fn enumerate(&self) -> Iter<'_, V> {
        Iter::new(self.buckets.iter(), self.element_count)
    }

    /// Returns an iterator over `(bucket, record)` pairs where the
    /// records are mutable. A record's key must not be changed
    /// through it, since the record is not moved to a new bucket
    pub fn iter_mut(&mut self) -> IterMut<'_, V> {
        IterMut::new(self.buckets.iter_mut(), self.element_count)
    }

    /// Returns the length of a bucket's chain, or `None` if the
    /// bucket is out of range
    ///
    /// # Arguments
    ///
    /// `bucket`: The bucket index
    pub fn chain_len(&self, bucket: usize) -> Option<usize> {
        let head = self.buckets.get(bucket)?;
        Some(std::iter::successors(head.as_deref(), |node| node.next()).count())
    }

    /// Returns the length of the longest chain in the table
    pub fn longest_chain(&self) -> usize {
        (0..self.bucket_count())
            .filter_map(|bucket| self.chain_len(bucket))
            .max()
            .unwrap_or(0)
    }

    /// Returns the average number of records per bucket
    pub fn load_factor(&self) -> f64 {
        self.len() as f64 / self.bucket_count() as f64
    }

    /// Finds the first node in a chain which matches a key
    ///
    /// # Arguments
    ///
    /// `chain`: The head of the chain to search
    ///
    /// `key`: The key to search for
    #[duplicate_item(
        find_in_chain        reference(lifetime, type)   next;
        [find_in_chain]      [& 'lifetime type]          [next];
        [find_in_chain_mut]  [& 'lifetime mut type]      [next_mut];
    )]
    fn find_in_chain<'a>(
        mut chain: Option<reference([a], [Node<V>])>,
        key: &str,
    ) -> Option<reference([a], [Node<V>])> {
        while let Some(node) = chain {
            if node.matches(key) {
                return Some(node);
            }
            chain = node.next();
        }
        None
    }
}

impl<V: Keyed + Debug, H: KeyHash> Debug for ChainedHashTable<V, H> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{{{}}}",
            self.enumerate()
                .map(|(bucket, value)| format!("{bucket}: {value:?}"))
                .join(", ")
        )
    }
}

impl<V: Keyed> Default for ChainedHashTable<V, NumericHash> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Keyed, H: KeyHash> Drop for ChainedHashTable<V, H> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<'a, V: Keyed, H: KeyHash> IntoIterator for &'a ChainedHashTable<V, H> {
    type Item = (usize, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.enumerate()
    }
}
