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
//! # Machine
//!
//! A `Machine` owns a set of parts, stored as an arena: a part's ID is its index, so two parts are the same part exactly
//! when their IDs are equal. Every transition targets a part in the same machine.
//!
//! Machines are built up by the operations in `ndfa`, turned deterministic by `dfa_compiler` and reduced by `minimize`.
//! Those operations take their operands by value: a machine that is needed afterwards has to be cloned first, and since
//! parts are addressed by index a clone is always completely independent of the original.
//!
//! ```
//! # use machina::*;
//! let mut machine = Machine::new();
//! let parts       = machine.create_parts(2);
//!
//! machine.add_transition(parts[0], Inclusion(SymbolSet::single(b'a')), parts[1]);
//! machine.set_starting(parts[0], true);
//! machine.set_accepting(parts[1], true);
//!
//! assert!(machine.run(b"a"));
//! ```
//!

use serde_derive::{Serialize, Deserialize};

use super::part::*;
use super::guard::*;
use super::precedence::*;
use super::symbol_set::*;
use super::state_machine::*;

///
/// The starting and accepting parts of a machine that was absorbed into another, renumbered for the absorbing machine
///
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Absorbed {
    pub starting: Vec<PartId>,
    pub accepting: Vec<PartId>
}

///
/// A finite-state acceptor over byte symbols
///
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct Machine {
    /// The parts of this machine, indexed by ID
    parts: Vec<Part>
}

impl Machine {
    ///
    /// Creates a new machine with no parts
    ///
    pub fn new() -> Machine {
        Machine { parts: vec![] }
    }

    ///
    /// Creates a machine that accepts only the empty string
    ///
    pub fn epsilon() -> Machine {
        let mut machine = Machine::new();
        let part        = machine.create_part();

        machine.set_starting(part, true);
        machine.set_accepting(part, true);

        machine
    }

    ///
    /// The parts of this machine
    ///
    #[inline]
    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    #[inline]
    pub fn part(&self, part: PartId) -> &Part {
        &self.parts[part]
    }

    #[inline]
    pub(crate) fn part_mut(&mut self, part: PartId) -> &mut Part {
        &mut self.parts[part]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    ///
    /// Adds a fully-formed transition to a part
    ///
    pub fn push_transition(&mut self, part: PartId, transition: Transition) {
        debug_assert!(transition.target < self.parts.len());
        self.parts[part].transitions.push(transition);
    }

    ///
    /// Replaces the precedence of every transition in this machine
    ///
    pub fn set_precedence(&mut self, precedence: Precedence) {
        for part in self.parts.iter_mut() {
            for transition in part.transitions.iter_mut() {
                transition.precedence = precedence.clone();
            }
        }
    }

    ///
    /// Moves all of the parts of another machine into this one
    ///
    /// The parts keep their flags and transitions, but are renumbered to follow on from the parts already in this machine.
    /// The renumbered starting and accepting parts are returned so the caller can wire them up.
    ///
    pub fn absorb(&mut self, other: Machine) -> Absorbed {
        let offset          = self.parts.len();
        let mut starting    = vec![];
        let mut accepting   = vec![];

        for (index, mut part) in other.parts.into_iter().enumerate() {
            for transition in part.transitions.iter_mut() {
                transition.target += offset;
            }

            if part.starting    { starting.push(index + offset); }
            if part.accepting   { accepting.push(index + offset); }

            self.parts.push(part);
        }

        Absorbed { starting, accepting }
    }

    ///
    /// The symbols this machine reads
    ///
    /// This is the union of the symbols in every inclusion guard. A machine with an exclusion guard can read symbols that
    /// appear nowhere in its guards, so its alphabet is the whole domain.
    ///
    pub fn alphabet(&self) -> SymbolSet {
        let mut alphabet = SymbolSet::new();

        for transition in self.parts.iter().flat_map(|part| part.transitions.iter()) {
            match transition.guard {
                Inclusion(ref set)  => { alphabet = alphabet.union(set); },
                Exclusion(_)        => { return SymbolSet::full(); },
                Epsilon             => { }
            }
        }

        alphabet
    }

    ///
    /// True if this machine has exactly one starting part, no epsilon transitions, and no part with two transitions that
    /// fire on the same symbol
    ///
    pub fn is_deterministic(&self) -> bool {
        if self.starting().len() != 1 {
            return false;
        }

        self.parts.iter().all(|part| {
            let mut seen = SymbolSet::new();

            for transition in part.transitions.iter() {
                match transition.guard.symbols() {
                    None            => { return false; },
                    Some(symbols)   => {
                        if seen.overlaps(&symbols) {
                            return false;
                        }
                        seen = seen.union(&symbols);
                    }
                }
            }

            true
        })
    }

    ///
    /// Keeps only the parts whose entry in `keep` is true, renumbering the parts that remain
    ///
    /// Transitions into parts that are removed are removed too. Returns the new ID of every old part.
    ///
    pub fn retain_parts(&mut self, keep: &[bool]) -> Vec<Option<PartId>> {
        let mut renumber    = vec![None; self.parts.len()];
        let mut next_id     = 0;

        for (index, keep_part) in keep.iter().enumerate() {
            if *keep_part {
                renumber[index] = Some(next_id);
                next_id += 1;
            }
        }

        let old_parts = std::mem::replace(&mut self.parts, vec![]);
        for (index, mut part) in old_parts.into_iter().enumerate() {
            if renumber[index].is_none() {
                continue;
            }

            part.transitions = part.transitions.into_iter()
                .filter_map(|mut transition| {
                    renumber[transition.target].map(|target| {
                        transition.target = target;
                        transition
                    })
                })
                .collect();

            self.parts.push(part);
        }

        renumber
    }
}

impl StateMachine for Machine {
    #[inline]
    fn count_parts(&self) -> usize {
        self.parts.len()
    }

    #[inline]
    fn transitions_for_part(&self, part: PartId) -> &[Transition] {
        &self.parts[part].transitions
    }

    #[inline]
    fn is_accepting(&self, part: PartId) -> bool {
        self.parts[part].accepting
    }

    #[inline]
    fn is_starting(&self, part: PartId) -> bool {
        self.parts[part].starting
    }
}

impl MutableStateMachine for Machine {
    fn create_part(&mut self) -> PartId {
        self.parts.push(Part::new());
        self.parts.len() - 1
    }

    fn add_transition(&mut self, part: PartId, guard: Guard, target: PartId) {
        self.push_transition(part, Transition::new(guard, target));
    }

    fn set_accepting(&mut self, part: PartId, accepting: bool) {
        self.parts[part].accepting = accepting;
    }

    fn set_starting(&mut self, part: PartId, starting: bool) {
        self.parts[part].starting = starting;
    }
}
