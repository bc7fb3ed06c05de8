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
//! # Matching
//!
//! A deterministic machine can be run against some input one symbol at a time. `run` checks whether or not the machine
//! accepts an entire input, and `start` returns a `MatchingState` that can be fed symbols one at a time to find the
//! longest prefix of a stream that the machine accepts.
//!
//! Running a machine that isn't deterministic is a programming error and panics: determinize it first. `simulate` can
//! check any machine against an input, at the cost of tracking every part the machine could be in.
//!

use std::collections::BTreeSet;

use super::machine::*;
use super::state_machine::*;

///
/// The result of passing a symbol to a matching state
///
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum MatchAction<'a> {
    /// More symbols are needed to decide the match
    More(MatchingState<'a>),

    /// The longest match has been found, and is this many symbols long
    Accept(usize),

    /// The input does not begin with anything the machine accepts
    Reject
}

pub use self::MatchAction::*;

///
/// The state of a deterministic machine part way through reading some input
///
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct MatchingState<'a> {
    machine: &'a Machine,

    /// The part the machine is currently in
    part: PartId,

    /// Number of symbols read so far
    consumed: usize,

    /// Length of the longest accepted prefix seen so far
    longest_accept: Option<usize>
}

impl<'a> MatchingState<'a> {
    ///
    /// Reads the next symbol
    ///
    pub fn next(self, symbol: u8) -> MatchAction<'a> {
        let target = match self.machine.step(self.part, symbol) {
            Some(target)    => target,
            None            => return self.finish()
        };

        let consumed    = self.consumed + 1;
        let accepting   = self.machine.is_accepting(target);
        let next_state  = MatchingState {
            machine:        self.machine,
            part:           target,
            consumed:       consumed,
            longest_accept: if accepting { Some(consumed) } else { self.longest_accept }
        };

        if self.machine.transitions_for_part(target).is_empty() {
            // Nothing more can be read from here
            next_state.finish()
        } else {
            More(next_state)
        }
    }

    ///
    /// Indicates that there are no more symbols
    ///
    pub fn finish(self) -> MatchAction<'a> {
        match self.longest_accept {
            Some(length)    => Accept(length),
            None            => Reject
        }
    }

    ///
    /// True if the symbols read so far are accepted by the machine
    ///
    pub fn is_accepting(&self) -> bool {
        self.machine.is_accepting(self.part)
    }
}

impl Machine {
    ///
    /// Returns true if this deterministic machine accepts an input
    ///
    /// Panics if the machine does not have exactly one starting part, or if it reaches a part where the next step is
    /// ambiguous.
    ///
    pub fn run(&self, input: &[u8]) -> bool {
        let mut part = self.only_start();

        for symbol in input.iter() {
            part = match self.step(part, *symbol) {
                Some(next)  => next,
                None        => return false
            };
        }

        self.is_accepting(part)
    }

    ///
    /// Starts matching this deterministic machine against some input, one symbol at a time
    ///
    pub fn start(&self) -> MatchingState {
        let part = self.only_start();

        MatchingState {
            machine:        self,
            part:           part,
            consumed:       0,
            longest_accept: if self.is_accepting(part) { Some(0) } else { None }
        }
    }

    ///
    /// Finds the length of the longest prefix of an input that this deterministic machine accepts
    ///
    pub fn longest_match(&self, input: &[u8]) -> Option<usize> {
        let mut symbols = input.iter();
        let mut action  = More(self.start());

        while let More(state) = action {
            action = match symbols.next() {
                Some(symbol)    => state.next(*symbol),
                None            => state.finish()
            };
        }

        match action {
            Accept(length)  => Some(length),
            _               => None
        }
    }

    ///
    /// Returns true if this machine accepts an input, tracking every part it could be in
    ///
    /// Unlike `run`, this works for any machine.
    ///
    pub fn simulate(&self, input: &[u8]) -> bool {
        let mut current = self.epsilon_closure(self.starting());

        for symbol in input.iter() {
            let moves: BTreeSet<PartId> = current.iter()
                .flat_map(|part| self.part(*part).transitions_on(*symbol))
                .map(|transition| transition.target)
                .collect();

            if moves.is_empty() {
                return false;
            }

            current = self.epsilon_closure(moves);
        }

        current.iter().any(|part| self.is_accepting(*part))
    }

    fn only_start(&self) -> PartId {
        let starting = self.starting();
        assert!(starting.len() == 1, "a machine must have exactly one starting part to be run (it has {})", starting.len());

        starting[0]
    }

    ///
    /// The part a deterministic machine moves to from a part after reading a symbol
    ///
    fn step(&self, part: PartId, symbol: u8) -> Option<PartId> {
        let part = self.part(part);
        assert!(!part.has_epsilon(), "machine must be determinized before it is run: it has epsilon transitions");

        let mut matching    = part.transitions_on(symbol);
        let target          = matching.next()?.target;
        assert!(matching.next().is_none(), "machine must be determinized before it is run: symbol {} has more than one transition", symbol);

        Some(target)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use super::super::guard::*;
    use super::super::symbol_set::*;

    fn literal(text: &[u8]) -> Machine {
        let mut machine = Machine::new();
        let parts       = machine.create_parts(text.len() + 1);

        for (index, symbol) in text.iter().enumerate() {
            machine.add_transition(parts[index], Inclusion(SymbolSet::single(*symbol)), parts[index+1]);
        }

        machine.set_starting(parts[0], true);
        machine.set_accepting(parts[text.len()], true);

        machine
    }

    #[test]
    fn run_accepts_whole_input() {
        let machine = literal(b"ab");

        assert!(machine.run(b"ab"));
        assert!(!machine.run(b"a"));
        assert!(!machine.run(b"abc"));
        assert!(!machine.run(b""));
    }

    #[test]
    #[should_panic]
    fn run_needs_one_start() {
        let mut machine = literal(b"a");
        machine.absorb(literal(b"b"));

        machine.run(b"a");
    }

    #[test]
    #[should_panic]
    fn run_refuses_ambiguous_transitions() {
        let mut machine = literal(b"a");
        let other       = machine.create_part();
        machine.add_transition(0, Inclusion(SymbolSet::single(b'a')), other);

        machine.run(b"a");
    }

    #[test]
    #[should_panic]
    fn run_refuses_epsilon_transitions() {
        literal(b"a").star().run(b"a");
    }

    #[test]
    fn longest_match_finds_longest_prefix() {
        let machine = literal(b"a").union(literal(b"abc")).determinize().unwrap();

        assert!(machine.longest_match(b"abcd") == Some(3));
        assert!(machine.longest_match(b"abd") == Some(1));
        assert!(machine.longest_match(b"a") == Some(1));
        assert!(machine.longest_match(b"b") == None);
    }

    #[test]
    fn longest_match_can_be_empty() {
        let machine = literal(b"a").star().determinize().unwrap();

        assert!(machine.longest_match(b"aab") == Some(2));
        assert!(machine.longest_match(b"b") == Some(0));
    }

    #[test]
    fn matching_state_steps_through_input() {
        let machine = literal(b"ab").plus().determinize().unwrap();
        let state   = machine.start();

        assert!(!state.is_accepting());

        let state = match state.next(b'a') { More(state) => state, _ => panic!("expected more") };
        let state = match state.next(b'b') { More(state) => state, _ => panic!("expected more") };
        assert!(state.is_accepting());

        assert!(state.clone().next(b'x') == Accept(2));
        assert!(state.finish() == Accept(2));
    }

    #[test]
    fn simulate_works_without_determinizing() {
        let machine = literal(b"ab").star().union(literal(b"c"));

        assert!(machine.simulate(b""));
        assert!(machine.simulate(b"abab"));
        assert!(machine.simulate(b"c"));
        assert!(!machine.simulate(b"abc"));
    }
}
