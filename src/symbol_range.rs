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
//! # Symbol range
//!
//! It's quite common to want to describe ranges of symbols (character classes like `a-z` are written this way, and a set of
//! symbols is far easier to read as a list of ranges than as a list of bytes). A `SymbolRange` is an inclusive range of
//! bytes.
//!

use super::symbol_set::*;

///
/// Represents an inclusive range of symbols
///
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub struct SymbolRange {
    ///
    /// Lowest symbol in the range
    ///
    pub lowest: u8,

    ///
    /// Highest symbol in the range
    ///
    /// This is inclusive, so the highest symbol is always included in the range (this makes it differ from Rust's
    /// built-in Range struct, and means that 255 can be the top of a range)
    ///
    pub highest: u8
}

impl SymbolRange {
    ///
    /// Creates a new range covering the symbols between two bounds
    ///
    #[inline]
    pub fn new(lowest: u8, highest: u8) -> SymbolRange {
        if lowest > highest {
            SymbolRange { lowest: highest, highest: lowest }
        } else {
            SymbolRange { lowest: lowest, highest: highest }
        }
    }

    ///
    /// True if a symbol is inside this range
    ///
    #[inline]
    pub fn includes(&self, symbol: u8) -> bool {
        symbol >= self.lowest && symbol <= self.highest
    }

    ///
    /// True if two ranges share any symbols
    ///
    #[inline]
    pub fn overlaps(&self, other: &SymbolRange) -> bool {
        self.lowest <= other.highest && other.lowest <= self.highest
    }

    ///
    /// Groups the symbols in a set into the smallest list of ranges that covers them, in ascending order
    ///
    pub fn from_set(set: &SymbolSet) -> Vec<SymbolRange> {
        let mut result: Vec<SymbolRange> = vec![];

        for symbol in set.iter() {
            // Extend the last range if this symbol follows on from it
            if let Some(last) = result.last_mut() {
                if last.highest as usize + 1 == symbol as usize {
                    last.highest = symbol;
                    continue;
                }
            }

            result.push(SymbolRange::new(symbol, symbol));
        }

        result
    }
}
