use std::slice;

use duplicate::duplicate_item;

use super::node::{Link, Node};

/// An iterator over the records of a hash table, paired with the
/// bucket each record lives in. Buckets are visited in ascending
/// order, and each chain from its head in insertion order
#[duplicate_item(
    Iter       BucketIter        reference(lifetime, type);
    [Iter]     [slice::Iter]     [& 'lifetime type];
    [IterMut]  [slice::IterMut]  [& 'lifetime mut type];
)]
pub struct Iter<'a, V> {
    buckets: BucketIter<'a, Link<V>>,
    chain: Option<reference([a], [Node<V>])>,
    remaining: usize,
}

#[duplicate_item(
    Iter       BucketIter;
    [Iter]     [slice::Iter];
    [IterMut]  [slice::IterMut];
)]
impl<'a, V> Iter<'a, V> {
    /// Creates a new hash table iterator from the
    /// hash table's buckets
    ///
    /// # Arguments
    ///
    /// `buckets`: An iterator over the table's buckets
    ///
    /// `len`: The number of records reachable from the buckets
    pub(crate) fn new(buckets: BucketIter<'a, Link<V>>, len: usize) -> Self {
        Self {
            buckets,
            chain: None,
            remaining: len,
        }
    }
}

#[duplicate_item(
    Iter       reference(lifetime, type)     as_deref;
    [Iter]     [& 'lifetime type]            [as_deref];
    [IterMut]  [& 'lifetime mut type]        [as_deref_mut];
)]
impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (usize, reference([a], [V]));

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(node) = self.chain.take() {
                let Node {
                    bucket,
                    value,
                    next,
                } = node;
                self.chain = next.as_deref();
                self.remaining -= 1;
                return Some((*bucket, value));
            }
            // current chain is exhausted, move on to the next bucket
            self.chain = self.buckets.next()?.as_deref();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

#[duplicate_item(
    Iter;
    [Iter];
    [IterMut];
)]
impl<'a, V> ExactSizeIterator for Iter<'a, V> {}
