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
//! # State machine
//!
//! The `StateMachine` trait is implemented by anything that represents a state machine (aka a finite state automaton). These
//! consist of one or more parts that are transitioned between upon matching a symbol from the input.
//!
//! Parts are flagged as starting or accepting. A machine is run from its starting parts and accepts its input if it finishes
//! in an accepting part.
//!

use super::guard::*;

///
/// Identifies a part in a state machine
///
/// Two parts are the same part only if they have the same ID, however similar their transitions happen to be.
///
pub type PartId = usize;

///
/// Trait implemented by objects that represent a state machine
///
/// These state machines can be nondeterministic - which is to say, have more than one transition per symbol in a part, or
/// more than one starting part.
///
pub trait StateMachine {
    ///
    /// Returns the number of parts in this state machine
    ///
    fn count_parts(&self) -> usize;

    ///
    /// Returns the transitions leaving a particular part
    ///
    fn transitions_for_part(&self, part: PartId) -> &[Transition];

    ///
    /// True if finishing in a particular part accepts the input
    ///
    fn is_accepting(&self, part: PartId) -> bool;

    ///
    /// True if a particular part is one of the parts the machine begins in
    ///
    fn is_starting(&self, part: PartId) -> bool;

    ///
    /// The parts that this machine begins in
    ///
    fn starting(&self) -> Vec<PartId> {
        (0..self.count_parts()).filter(|part| self.is_starting(*part)).collect()
    }

    ///
    /// The parts that accept the input
    ///
    fn accepting(&self) -> Vec<PartId> {
        (0..self.count_parts()).filter(|part| self.is_accepting(*part)).collect()
    }
}

///
/// Trait implemented by state machines that can be altered
///
pub trait MutableStateMachine : StateMachine {
    ///
    /// Creates a new part with no transitions, returning its ID
    ///
    fn create_part(&mut self) -> PartId;

    ///
    /// Adds a transition from a particular part to another, guarded by a particular condition
    ///
    fn add_transition(&mut self, part: PartId, guard: Guard, target: PartId);

    ///
    /// Sets whether or not a part accepts the input
    ///
    fn set_accepting(&mut self, part: PartId, accepting: bool);

    ///
    /// Sets whether or not a part is a starting part
    ///
    fn set_starting(&mut self, part: PartId, starting: bool);

    ///
    /// Joins two parts in this state machine
    ///
    /// This creates an empty or 'epsilon' transition from `first_part` to `second_part`, so that anything that matches
    /// from `second_part` will also match from `first_part`. The reverse is not true.
    ///
    fn join_parts(&mut self, first_part: PartId, second_part: PartId) {
        self.add_transition(first_part, Epsilon, second_part);
    }

    ///
    /// Creates a number of new parts
    ///
    fn create_parts(&mut self, count: usize) -> Vec<PartId> {
        (0..count).map(|_| self.create_part()).collect()
    }
}
