//
//   Copyright 2016 Andrew Hunter
//
//   Licensed under the Apache License, Version 2.0 (the "License");
//   you may not use this file except in compliance with the License.
//   You may obtain a copy of the License at
//
//       http://www.apache.org/licenses/LICENSE-2.0
//
//   Unless required by applicable law or agreed to in writing, software
//   distributed under the License is distributed on an "AS IS" BASIS,
//   WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//   See the License for the specific language governing permissions and
//   limitations under the License.
//


//!
//! # Symbol set
//!
//! Machines in this crate read bytes, so every guard on a transition can be expressed as a subset of the 256 possible
//! symbols. `SymbolSet` stores such a subset as a fixed-size bit set, which makes the set algebra that determinization and
//! minimization rely on (union, difference, complement) cheap and allocation-free.
//!

use std::fmt;
use std::iter::FromIterator;

use serde_derive::{Serialize, Deserialize};

use super::symbol_range::*;

///
/// Number of symbols in the alphabet domain
///
pub const DOMAIN_SIZE: usize = 256;

///
/// A set of byte symbols
///
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct SymbolSet {
    bits: [u64; 4]
}

impl SymbolSet {
    ///
    /// Creates an empty symbol set
    ///
    #[inline]
    pub fn new() -> SymbolSet {
        SymbolSet { bits: [0; 4] }
    }

    ///
    /// Creates the set containing every symbol in the domain
    ///
    #[inline]
    pub fn full() -> SymbolSet {
        SymbolSet { bits: [u64::MAX; 4] }
    }

    ///
    /// Creates a set containing a single symbol
    ///
    pub fn single(symbol: u8) -> SymbolSet {
        let mut result = SymbolSet::new();
        result.insert(symbol);
        result
    }

    ///
    /// Creates a set containing every symbol in an inclusive range
    ///
    pub fn from_range(range: &SymbolRange) -> SymbolSet {
        let mut result = SymbolSet::new();
        for symbol in range.lowest..=range.highest {
            result.insert(symbol);
        }
        result
    }

    #[inline]
    pub fn insert(&mut self, symbol: u8) {
        self.bits[(symbol >> 6) as usize] |= 1u64 << (symbol & 63);
    }

    #[inline]
    pub fn remove(&mut self, symbol: u8) {
        self.bits[(symbol >> 6) as usize] &= !(1u64 << (symbol & 63));
    }

    #[inline]
    pub fn contains(&self, symbol: u8) -> bool {
        self.bits[(symbol >> 6) as usize] & (1u64 << (symbol & 63)) != 0
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bits.iter().all(|word| *word == 0)
    }

    ///
    /// Number of symbols in this set
    ///
    pub fn len(&self) -> usize {
        self.bits.iter().map(|word| word.count_ones() as usize).sum()
    }

    pub fn union(&self, other: &SymbolSet) -> SymbolSet {
        let mut bits = self.bits;
        for (word, other_word) in bits.iter_mut().zip(other.bits.iter()) {
            *word |= *other_word;
        }
        SymbolSet { bits }
    }

    pub fn intersection(&self, other: &SymbolSet) -> SymbolSet {
        let mut bits = self.bits;
        for (word, other_word) in bits.iter_mut().zip(other.bits.iter()) {
            *word &= *other_word;
        }
        SymbolSet { bits }
    }

    pub fn difference(&self, other: &SymbolSet) -> SymbolSet {
        let mut bits = self.bits;
        for (word, other_word) in bits.iter_mut().zip(other.bits.iter()) {
            *word &= !*other_word;
        }
        SymbolSet { bits }
    }

    ///
    /// The symbols of the domain that are not in this set
    ///
    pub fn complement(&self) -> SymbolSet {
        let mut bits = self.bits;
        for word in bits.iter_mut() {
            *word = !*word;
        }
        SymbolSet { bits }
    }

    ///
    /// True if this set shares at least one symbol with another
    ///
    pub fn overlaps(&self, other: &SymbolSet) -> bool {
        !self.intersection(other).is_empty()
    }

    ///
    /// The lowest symbol in this set, if there is one
    ///
    pub fn first(&self) -> Option<u8> {
        self.bits.iter()
            .enumerate()
            .find(|(_, word)| **word != 0)
            .map(|(index, word)| (index * 64 + word.trailing_zeros() as usize) as u8)
    }

    ///
    /// Iterates over the symbols in this set in ascending order
    ///
    pub fn iter(&self) -> impl Iterator<Item=u8> + '_ {
        (0..DOMAIN_SIZE).map(|symbol| symbol as u8).filter(move |symbol| self.contains(*symbol))
    }
}

impl FromIterator<u8> for SymbolSet {
    fn from_iter<I: IntoIterator<Item=u8>>(iter: I) -> SymbolSet {
        let mut result = SymbolSet::new();
        for symbol in iter {
            result.insert(symbol);
        }
        result
    }
}

impl<'a> FromIterator<&'a u8> for SymbolSet {
    fn from_iter<I: IntoIterator<Item=&'a u8>>(iter: I) -> SymbolSet {
        iter.into_iter().cloned().collect()
    }
}

impl fmt::Debug for SymbolSet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let ranges: Vec<String> = SymbolRange::from_set(self).iter()
            .map(|range| if range.lowest == range.highest {
                format!("{}", range.lowest)
            } else {
                format!("{}..={}", range.lowest, range.highest)
            })
            .collect();

        write!(f, "{{{}}}", ranges.join(", "))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn new_set_is_empty() {
        let set = SymbolSet::new();

        assert!(set.is_empty());
        assert!(set.len() == 0);
        assert!(set.first() == None);
    }

    #[test]
    fn full_set_has_every_symbol() {
        let set = SymbolSet::full();

        assert!(set.len() == DOMAIN_SIZE);
        assert!(set.contains(0));
        assert!(set.contains(255));
    }

    #[test]
    fn can_insert_and_remove() {
        let mut set = SymbolSet::new();

        set.insert(b'a');
        set.insert(200);
        assert!(set.contains(b'a'));
        assert!(set.contains(200));
        assert!(!set.contains(b'b'));

        set.remove(b'a');
        assert!(!set.contains(b'a'));
        assert!(set.len() == 1);
    }

    #[test]
    fn complement_of_complement_is_original() {
        let set: SymbolSet = b"hello".iter().collect();

        assert!(set.complement().complement() == set);
        assert!(set.complement().len() == DOMAIN_SIZE - 4);
        assert!(!set.complement().contains(b'h'));
    }

    #[test]
    fn union_and_difference() {
        let abc: SymbolSet = b"abc".iter().collect();
        let cde: SymbolSet = b"cde".iter().collect();

        assert!(abc.union(&cde) == b"abcde".iter().collect());
        assert!(abc.difference(&cde) == b"ab".iter().collect());
        assert!(abc.intersection(&cde) == SymbolSet::single(b'c'));
        assert!(abc.overlaps(&cde));
        assert!(!abc.overlaps(&SymbolSet::single(b'z')));
    }

    #[test]
    fn iterates_in_order() {
        let set: SymbolSet = vec![9u8, 3, 250, 64].into_iter().collect();

        assert!(set.iter().collect::<Vec<_>>() == vec![3, 9, 64, 250]);
        assert!(set.first() == Some(3));
    }

    #[test]
    fn range_set_contains_endpoints() {
        let set = SymbolSet::from_range(&SymbolRange::new(b'a', b'c'));

        assert!(set == b"abc".iter().collect());
    }
}
