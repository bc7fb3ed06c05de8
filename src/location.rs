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
//! Positions in the text of an expression, used to report where a token came from.
//!

use std::fmt;

///
/// A line and column in the text of an expression (both counted from 1)
///
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Location {
    pub line: usize,
    pub column: usize
}

impl Location {
    pub fn new(line: usize, column: usize) -> Location {
        Location { line: line, column: column }
    }

    ///
    /// The location of the first character in some text
    ///
    pub fn start() -> Location {
        Location::new(1, 1)
    }

    ///
    /// The location that follows this one after reading a character
    ///
    pub fn advance(self, character: char) -> Location {
        if character == '\n' {
            Location::new(self.line + 1, 1)
        } else {
            Location::new(self.line, self.column + 1)
        }
    }
}

impl Default for Location {
    fn default() -> Location {
        Location::start()
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}
