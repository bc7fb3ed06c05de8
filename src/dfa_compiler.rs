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
//! # DFA compiler
//!
//! The DFA compiler converts NDFAs into DFAs using subset construction. Each part of the DFA stands for the set of NDFA
//! parts that the NDFA could be in at once; two DFA parts are the same part exactly when they stand for the same set, which
//! is what guarantees that the construction finishes.
//!
//! Rather than stepping through every byte, the compiler splits the alphabet into classes of symbols that every guard
//! treats identically (see `SymbolPartition`) and steps through those.
//!

use std::collections::{BTreeSet, HashMap, VecDeque};

use log::{debug, trace};

use super::guard::*;
use super::error::*;
use super::config::*;
use super::machine::*;
use super::precedence::*;
use super::symbol_set::*;
use super::state_machine::*;
use super::overlapping_symbols::*;

///
/// Builds a deterministic finite automaton from a NDFA
///
pub struct DfaCompiler<'a> {
    /// State machine that is to be compiled
    ndfa: &'a Machine,

    /// How the DFA should be built
    options: DeterminizeOptions,

    /// Classes of symbols that the NDFA never distinguishes between
    partition: SymbolPartition,

    /// The DFA being built
    dfa: Machine,

    /// The DFA part that represents each set of NDFA parts
    parts_for_sets: HashMap<BTreeSet<PartId>, PartId>,

    /// DFA parts whose transitions have not been generated yet
    pending: VecDeque<PartId>,

    /// The part that symbols with nowhere else to go lead to, if the DFA is total and it has been created
    stuck: Option<PartId>
}

impl<'a> DfaCompiler<'a> {
    ///
    /// Builds a DFA from an NDFA
    ///
    pub fn build(ndfa: &'a Machine, options: DeterminizeOptions) -> Result<Machine, MachineError> {
        let compiler = DfaCompiler::new(ndfa, options)?;
        Ok(compiler.compile())
    }

    ///
    /// Creates a new DFA compiler for a particular NDFA
    ///
    pub fn new(ndfa: &'a Machine, options: DeterminizeOptions) -> Result<DfaCompiler<'a>, MachineError> {
        if ndfa.starting().is_empty() {
            return Err(MachineError::NoStartingPart);
        }

        if ndfa.accepting().is_empty() {
            return Err(MachineError::NoAcceptingPart);
        }

        let guard_sets: Vec<SymbolSet> = ndfa.parts().iter()
            .flat_map(|part| part.transitions().iter())
            .filter_map(|transition| transition.guard.symbols())
            .collect();
        let partition = SymbolPartition::from_sets(ndfa.alphabet(), guard_sets.iter());

        Ok(DfaCompiler {
            ndfa:           ndfa,
            options:        options,
            partition:      partition,
            dfa:            Machine::new(),
            parts_for_sets: HashMap::new(),
            pending:        VecDeque::new(),
            stuck:          None
        })
    }

    ///
    /// Compiles the NDFA into a DFA
    ///
    pub fn compile(mut self) -> Machine {
        let classes     = self.partition.classes().to_vec();
        let start_set   = self.ndfa.epsilon_closure(self.ndfa.starting());
        let start       = self.part_for_set(start_set);
        self.dfa.set_starting(start, true);

        while let Some(part) = self.pending.pop_front() {
            let sources = self.dfa.part(part).source_parts().clone();

            for class in classes.iter() {
                // Every guard treats every symbol in a class the same way, so any symbol will do
                let symbol = match class.first() {
                    Some(symbol)    => symbol,
                    None            => continue
                };

                let transition = match self.move_on(&sources, symbol) {
                    Some((moves, precedence)) => {
                        let target = self.part_for_set(self.ndfa.epsilon_closure(moves));
                        Transition::new(Inclusion(*class), target).with_precedence(precedence)
                    },

                    None if self.options.total => {
                        let stuck = self.stuck_part(&classes);
                        Transition::new(Inclusion(*class), stuck)
                    },

                    None => continue
                };

                self.dfa.push_transition(part, transition);
            }
        }

        debug!("determinized {} parts into {} parts over {} symbol classes", self.ndfa.len(), self.dfa.len(), classes.len());

        self.dfa
    }

    ///
    /// Finds or creates the DFA part for a set of NDFA parts
    ///
    fn part_for_set(&mut self, set: BTreeSet<PartId>) -> PartId {
        if let Some(existing) = self.parts_for_sets.get(&set) {
            return *existing;
        }

        trace!("new DFA part for {:?}", set);

        let ndfa        = self.ndfa;
        let part        = self.dfa.create_part();
        let accepting   = set.iter().any(|source| ndfa.is_accepting(*source));

        self.dfa.set_accepting(part, accepting);
        self.dfa.part_mut(part).source_parts = set.clone();
        self.parts_for_sets.insert(set, part);
        self.pending.push_back(part);

        part
    }

    ///
    /// Finds the NDFA parts reachable from a set of parts by reading a symbol, along with the highest precedence of the
    /// transitions that were followed
    ///
    fn move_on(&self, parts: &BTreeSet<PartId>, symbol: u8) -> Option<(Vec<PartId>, Precedence)> {
        let mut moves       = vec![];
        let mut precedence  = None;

        for part in parts.iter() {
            for transition in self.ndfa.part(*part).transitions_on(symbol) {
                moves.push(transition.target);

                let higher = match precedence {
                    Some(ref existing)  => &transition.precedence > existing,
                    None                => true
                };

                if higher {
                    precedence = Some(transition.precedence.clone());
                }
            }
        }

        precedence.map(|precedence| (moves, precedence))
    }

    ///
    /// The non-accepting part that loops on every symbol, creating it if needed
    ///
    fn stuck_part(&mut self, classes: &[SymbolSet]) -> PartId {
        if let Some(stuck) = self.stuck {
            return stuck;
        }

        let stuck = self.dfa.create_part();
        for class in classes.iter() {
            self.dfa.add_transition(stuck, Inclusion(*class), stuck);
        }

        self.stuck = Some(stuck);
        stuck
    }
}

impl Machine {
    ///
    /// Creates a deterministic machine that accepts the same strings as this one
    ///
    /// Fails if this machine has no starting parts or no accepting parts. A machine that is already deterministic keeps
    /// its transitions: each part's sources are just that part, and dead parts are removed.
    ///
    pub fn determinize(&self) -> Result<Machine, MachineError> {
        self.determinize_with(DeterminizeOptions::default())
    }

    ///
    /// Creates a deterministic machine that accepts the same strings as this one, using particular options
    ///
    pub fn determinize_with(&self, options: DeterminizeOptions) -> Result<Machine, MachineError> {
        if self.is_deterministic() && !options.total {
            if self.accepting().is_empty() {
                return Err(MachineError::NoAcceptingPart);
            }

            // Each part stands for itself, and parts that can't lead to an accepting part are dropped
            let mut dfa = self.clone();
            for part in 0..dfa.len() {
                dfa.part_mut(part).source_parts = Some(part).into_iter().collect();
            }
            dfa.prune();

            return Ok(dfa);
        }

        DfaCompiler::build(self, options)
    }
}
