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
//! # Set operations
//!
//! Intersection and difference can't be built by wiring machines together the way union can. Instead, the two machines
//! are joined into a union and the union is determinized: every part of the result then knows which parts of the two
//! original machines it stands for, and so which of the two machines would accept at that point. The accepting flags are
//! then recalculated from that.
//!

use std::collections::BTreeSet;

use log::debug;

use super::error::*;
use super::machine::*;
use super::state_machine::*;

impl Machine {
    ///
    /// Creates a deterministic machine that accepts the strings that both this machine and another accept
    ///
    pub fn intersect(self, other: Machine) -> Result<Machine, MachineError> {
        self.combine_accepting(other, |left, right| left && right)
    }

    ///
    /// Creates a deterministic machine that accepts the strings this machine accepts and another does not
    ///
    pub fn difference(self, other: Machine) -> Result<Machine, MachineError> {
        self.combine_accepting(other, |left, right| left && !right)
    }

    ///
    /// Creates a deterministic machine that accepts the strings this machine accepts that do not contain anything the
    /// other machine accepts
    ///
    /// `any` should be a machine that accepts any single symbol: it's used to allow anything around the other machine.
    ///
    pub fn symmetric_difference(self, other: Machine, any: &Machine) -> Result<Machine, MachineError> {
        let anywhere = Machine::concatenate_all(vec![any.clone().star(), other, any.clone().star()]);
        self.difference(anywhere)
    }

    ///
    /// Determinizes the union of two machines, then marks the parts that accept according to whether or not each of the
    /// original machines accepts there
    ///
    fn combine_accepting<Accept: Fn(bool, bool) -> bool>(self, other: Machine, accept: Accept) -> Result<Machine, MachineError> {
        let (union, left, right) = self.union_tracked(other);
        let mut dfa = union.determinize()?;

        let left_accepting: BTreeSet<_>     = left.accepting.into_iter().collect();
        let right_accepting: BTreeSet<_>    = right.accepting.into_iter().collect();

        for part in 0..dfa.len() {
            let accepting = {
                let sources     = dfa.part(part).source_parts();
                let in_left     = sources.iter().any(|source| left_accepting.contains(source));
                let in_right    = sources.iter().any(|source| right_accepting.contains(source));

                accept(in_left, in_right)
            };

            dfa.set_accepting(part, accepting);
        }

        debug!("combined machine has {} parts, {} accepting", dfa.len(), dfa.accepting().len());

        Ok(dfa)
    }
}
