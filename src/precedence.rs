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
//! # Precedence
//!
//! When more than one pattern can accept the same input, something has to decide which one wins. Transitions carry a
//! `Precedence` so that the decision survives determinization: a transition built from several source transitions keeps
//! the greatest precedence among them.
//!

use std::fmt;

use serde_derive::{Serialize, Deserialize};

///
/// A precedence tag, ordered by name and then by level
///
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default, Serialize, Deserialize)]
pub struct Precedence {
    pub name: String,
    pub level: i32
}

impl Precedence {
    pub fn new<Name: Into<String>>(name: Name, level: i32) -> Precedence {
        Precedence { name: name.into(), level: level }
    }

    ///
    /// The precedence used by transitions that were not given one
    ///
    pub fn default_precedence() -> Precedence {
        Precedence::new("", 0)
    }
}

impl fmt::Display for Precedence {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.level)
    }
}
