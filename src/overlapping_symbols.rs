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
//! # Overlapping symbols
//!
//! Subset construction has to consider every input symbol from every set of parts it creates. Doing that one byte at a
//! time is wasteful: most guards cover whole runs of symbols, and any two symbols that every guard either accepts or
//! rejects together will always lead to the same set of parts.
//!
//! A `SymbolPartition` divides an alphabet into classes like this. No guard that was added to the partition straddles
//! a class, so a single representative symbol can stand in for the whole class.
//!

use std::collections::BTreeSet;

use super::symbol_set::*;

///
/// Divides an alphabet into non-overlapping classes of symbols
///
#[derive(Clone, Debug)]
pub struct SymbolPartition {
    /// The classes in this partition. These never overlap and are never empty
    classes: Vec<SymbolSet>
}

impl SymbolPartition {
    ///
    /// Creates a partition of an alphabet with a single class
    ///
    pub fn new(alphabet: SymbolSet) -> SymbolPartition {
        if alphabet.is_empty() {
            SymbolPartition { classes: vec![] }
        } else {
            SymbolPartition { classes: vec![alphabet] }
        }
    }

    ///
    /// Creates a partition of an alphabet so that none of the specified sets straddle a class
    ///
    pub fn from_sets<'a, SetIter: IntoIterator<Item=&'a SymbolSet>>(alphabet: SymbolSet, sets: SetIter) -> SymbolPartition {
        let mut result = SymbolPartition::new(alphabet);

        // Sets that appear more than once only need to be considered once
        let distinct: BTreeSet<&SymbolSet> = sets.into_iter().collect();
        for set in distinct {
            result.refine(set);
        }

        result
    }

    ///
    /// Splits any class that is only partly covered by a set
    ///
    pub fn refine(&mut self, set: &SymbolSet) {
        let mut refined = Vec::with_capacity(self.classes.len());

        for class in self.classes.iter() {
            let inside  = class.intersection(set);
            let outside = class.difference(set);

            if !inside.is_empty()  { refined.push(inside); }
            if !outside.is_empty() { refined.push(outside); }
        }

        self.classes = refined;
    }

    ///
    /// The classes in this partition
    ///
    #[inline]
    pub fn classes(&self) -> &[SymbolSet] {
        &self.classes
    }

    ///
    /// Finds the class containing a particular symbol
    ///
    pub fn class_for(&self, symbol: u8) -> Option<&SymbolSet> {
        self.classes.iter().find(|class| class.contains(symbol))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn set(symbols: &[u8]) -> SymbolSet {
        symbols.iter().collect()
    }

    #[test]
    fn empty_alphabet_has_no_classes() {
        let partition = SymbolPartition::new(SymbolSet::new());

        assert!(partition.classes().is_empty());
    }

    #[test]
    fn disjoint_sets_become_their_own_classes() {
        let partition = SymbolPartition::from_sets(set(b"abcd"), vec![&set(b"ab"), &set(b"cd")]);

        assert!(partition.classes().len() == 2);
        assert!(partition.class_for(b'a') == Some(&set(b"ab")));
        assert!(partition.class_for(b'd') == Some(&set(b"cd")));
    }

    #[test]
    fn overlapping_sets_are_split() {
        let partition = SymbolPartition::from_sets(set(b"abcde"), vec![&set(b"abc"), &set(b"cde")]);

        assert!(partition.classes().len() == 3);
        assert!(partition.class_for(b'a') == Some(&set(b"ab")));
        assert!(partition.class_for(b'c') == Some(&set(b"c")));
        assert!(partition.class_for(b'e') == Some(&set(b"de")));
    }

    #[test]
    fn symbols_outside_every_set_share_a_class() {
        let partition = SymbolPartition::from_sets(SymbolSet::full(), vec![&set(b"x")]);

        assert!(partition.classes().len() == 2);
        assert!(partition.class_for(b'x') == Some(&set(b"x")));
        assert!(partition.class_for(0).map(|class| class.len()) == Some(255));
    }

    #[test]
    fn classes_never_overlap() {
        let sets = vec![set(b"abc"), set(b"bcd"), set(b"a"), set(b"xyz"), set(b"cx")];
        let partition = SymbolPartition::from_sets(SymbolSet::full(), sets.iter());

        let classes = partition.classes();
        for (index, class) in classes.iter().enumerate() {
            for other in classes[index+1..].iter() {
                assert!(!class.overlaps(other));
            }

            // Every added set either covers the class entirely or not at all
            for guard in sets.iter() {
                let inside = class.intersection(guard);
                assert!(inside.is_empty() || inside == *class);
            }
        }
    }
}
