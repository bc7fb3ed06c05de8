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
//! The acronym NDFA stands for 'Non-Deterministic Finite Automaton'. An NDFA is a state machine where each part can have
//! transitions for more than one target part - this allows it to be in more than one part at once, which is the property
//! that makes it non-deterministic.
//!
//! The operations here combine machines into larger NDFAs. Each one consumes its operands and returns a new machine,
//! wiring the operands together with epsilon transitions:
//!
//! ```
//! # use machina::*;
//! # fn literal(text: &[u8]) -> Machine {
//! #     let mut machine = Machine::new();
//! #     let parts = machine.create_parts(text.len() + 1);
//! #     for (index, symbol) in text.iter().enumerate() {
//! #         machine.add_transition(parts[index], Inclusion(SymbolSet::single(*symbol)), parts[index+1]);
//! #     }
//! #     machine.set_starting(parts[0], true);
//! #     machine.set_accepting(parts[text.len()], true);
//! #     machine
//! # }
//! let cat_or_dog = literal(b"cat").union(literal(b"dog"));
//! let many_cats  = literal(b"cat").star();
//!
//! assert!(cat_or_dog.simulate(b"dog"));
//! assert!(many_cats.simulate(b"catcat"));
//! ```
//!

use std::collections::BTreeSet;

use super::machine::*;
use super::state_machine::*;

impl Machine {
    ///
    /// Retrieves the complete set of parts that can be reached from a set of parts without consuming any input
    ///
    pub fn epsilon_closure<PartIter: IntoIterator<Item=PartId>>(&self, parts: PartIter) -> BTreeSet<PartId> {
        let mut result  = BTreeSet::new();
        let mut stack   = parts.into_iter().collect::<Vec<_>>();

        while let Some(next_part) = stack.pop() {
            if result.insert(next_part) {
                // Process any parts that are joined to this one
                for transition in self.transitions_for_part(next_part) {
                    if transition.is_epsilon() {
                        stack.push(transition.target);
                    }
                }
            }
        }

        result
    }

    ///
    /// Creates a machine that accepts anything either this machine or another accepts
    ///
    /// The result has a single new starting part, joined to the starting parts of both machines, and a single new
    /// accepting part that the accepting parts of both machines are joined to.
    ///
    pub fn union(self, other: Machine) -> Machine {
        let (result, _, _) = self.union_tracked(other);
        result
    }

    ///
    /// As for `union`, but also returns where the parts of each operand ended up
    ///
    pub(crate) fn union_tracked(self, other: Machine) -> (Machine, Absorbed, Absorbed) {
        let mut result  = Machine::new();
        let start       = result.create_part();
        let left        = result.absorb(self);
        let right       = result.absorb(other);
        let end         = result.create_part();

        for part in left.starting.iter().chain(right.starting.iter()) {
            result.set_starting(*part, false);
            result.join_parts(start, *part);
        }

        for part in left.accepting.iter().chain(right.accepting.iter()) {
            result.set_accepting(*part, false);
            result.join_parts(*part, end);
        }

        result.set_starting(start, true);
        result.set_accepting(end, true);

        (result, left, right)
    }

    ///
    /// Creates a machine that accepts anything this machine accepts followed by anything another machine accepts
    ///
    pub fn concatenate(self, other: Machine) -> Machine {
        let mut result      = self;
        let first_accepting = result.accepting();
        let second          = result.absorb(other);

        for accepting in first_accepting {
            result.set_accepting(accepting, false);

            for starting in second.starting.iter() {
                result.join_parts(accepting, *starting);
            }
        }

        for starting in second.starting {
            result.set_starting(starting, false);
        }

        result
    }

    ///
    /// Concatenates a list of machines in order
    ///
    /// An empty list produces the empty machine, and a list of one machine produces that machine.
    ///
    pub fn concatenate_all<MachineIter: IntoIterator<Item=Machine>>(machines: MachineIter) -> Machine {
        let mut machines = machines.into_iter();

        match machines.next() {
            None        => Machine::new(),
            Some(first) => machines.fold(first, |result, next| result.concatenate(next))
        }
    }

    ///
    /// Creates a machine that accepts zero or more repetitions of anything this machine accepts
    ///
    pub fn star(self) -> Machine {
        let mut result  = Machine::new();
        let start       = result.create_part();
        let inner       = result.absorb(self);
        let end         = result.create_part();

        for starting in inner.starting {
            result.set_starting(starting, false);
            result.join_parts(start, starting);
        }

        // Every completed repetition can go round again or finish
        for accepting in inner.accepting {
            result.set_accepting(accepting, false);
            result.join_parts(accepting, start);
        }

        // Zero repetitions
        result.join_parts(start, end);

        result.set_starting(start, true);
        result.set_accepting(end, true);

        result
    }

    ///
    /// Creates a machine that accepts one or more repetitions of anything this machine accepts
    ///
    pub fn plus(self) -> Machine {
        let repeated = self.clone().star();
        self.concatenate(repeated)
    }

    ///
    /// Creates a machine that accepts the empty string as well as anything this machine accepts
    ///
    pub fn optional(self) -> Machine {
        let mut result  = Machine::new();
        let start       = result.create_part();
        let inner       = result.absorb(self);

        // A sole accepting part can be the target of the bypass provided nothing leaves it
        let end = if inner.accepting.len() == 1 && result.transitions_for_part(inner.accepting[0]).is_empty() {
            inner.accepting[0]
        } else {
            let end = result.create_part();

            for accepting in inner.accepting.iter() {
                result.set_accepting(*accepting, false);
                result.join_parts(*accepting, end);
            }

            result.set_accepting(end, true);
            end
        };

        for starting in inner.starting {
            result.set_starting(starting, false);
            result.join_parts(start, starting);
        }

        result.join_parts(start, end);
        result.set_starting(start, true);

        result
    }

    ///
    /// Creates a machine that accepts between `min` and `max` repetitions of anything this machine accepts
    ///
    /// A `max` of `None` allows any number of repetitions from `min` upwards.
    ///
    pub fn repeat(self, min: u32, max: Option<u32>) -> Machine {
        let mut pieces = vec![];

        for _ in 0..min {
            pieces.push(self.clone());
        }

        match max {
            None        => pieces.push(self.star()),
            Some(max)   => {
                // Optional copies nest inside each other so that each epsilon closure stays small
                let tail = (min..max).fold(None, |tail: Option<Machine>, _| Some(match tail {
                    None        => self.clone().optional(),
                    Some(tail)  => self.clone().concatenate(tail).optional()
                }));

                pieces.extend(tail);
            }
        }

        if pieces.is_empty() {
            Machine::epsilon()
        } else {
            Machine::concatenate_all(pieces)
        }
    }
}
