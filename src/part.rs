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
//! # Parts
//!
//! A part is a single state in a machine: a list of outgoing transitions plus the flags saying whether a machine begins or
//! can finish there. Parts created by determinization also remember the set of parts from the original machine that they
//! stand for.
//!

use std::collections::BTreeSet;

use serde_derive::{Serialize, Deserialize};

use super::guard::*;
use super::state_machine::*;

///
/// A state in a machine
///
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct Part {
    /// True if a machine that finishes in this part accepts its input
    pub(crate) accepting: bool,

    /// True if the machine begins in this part
    pub(crate) starting: bool,

    /// Transitions leaving this part
    pub(crate) transitions: Vec<Transition>,

    /// The parts of the machine this one was determinized from
    pub(crate) source_parts: BTreeSet<PartId>
}

impl Part {
    pub fn new() -> Part {
        Part::default()
    }

    #[inline]
    pub fn accepting(&self) -> bool {
        self.accepting
    }

    #[inline]
    pub fn starting(&self) -> bool {
        self.starting
    }

    #[inline]
    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    ///
    /// The parts of the machine this part was determinized from (empty for parts that were not created by determinizing)
    ///
    #[inline]
    pub fn source_parts(&self) -> &BTreeSet<PartId> {
        &self.source_parts
    }

    ///
    /// The transitions that fire on a particular symbol
    ///
    pub fn transitions_on<'a>(&'a self, symbol: u8) -> impl Iterator<Item=&'a Transition> {
        self.transitions.iter().filter(move |transition| transition.matches(symbol))
    }

    ///
    /// True if this part has at least one epsilon transition
    ///
    pub fn has_epsilon(&self) -> bool {
        self.transitions.iter().any(|transition| transition.is_epsilon())
    }
}
