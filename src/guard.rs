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
//! # Guards
//!
//! Every transition in a machine is guarded by a condition on the next input symbol. A guard either accepts a set of
//! symbols (`Inclusion`), accepts everything except a set of symbols (`Exclusion`) or accepts no symbol at all
//! (`Epsilon`). Epsilon transitions are followed without consuming any input.
//!

use std::fmt;

use serde_derive::{Serialize, Deserialize};

use super::symbol_set::*;
use super::dot::*;
use super::precedence::*;
use super::state_machine::*;

///
/// The condition under which a transition fires
///
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Guard {
    /// Matches any symbol in the set
    Inclusion(SymbolSet),

    /// Matches any symbol in the domain that is not in the set
    Exclusion(SymbolSet),

    /// Matches no symbol: the transition is taken without consuming input
    Epsilon
}

pub use self::Guard::*;

impl Guard {
    ///
    /// True if this guard accepts a particular symbol
    ///
    #[inline]
    pub fn matches(&self, symbol: u8) -> bool {
        match self {
            &Inclusion(ref set) => set.contains(symbol),
            &Exclusion(ref set) => !set.contains(symbol),
            &Epsilon            => false
        }
    }

    #[inline]
    pub fn is_epsilon(&self) -> bool {
        match self {
            &Epsilon    => true,
            _           => false
        }
    }

    ///
    /// The symbols this guard accepts out of the whole domain, or None for an epsilon guard
    ///
    pub fn symbols(&self) -> Option<SymbolSet> {
        match self {
            &Inclusion(ref set) => Some(*set),
            &Exclusion(ref set) => Some(set.complement()),
            &Epsilon            => None
        }
    }
}

impl fmt::Display for Guard {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            &Inclusion(ref set) => write!(f, "{}", stringify_alphabet(set)),
            &Exclusion(ref set) => {
                write!(f, "Σ")?;
                if !set.is_empty() {
                    write!(f, " - {}", stringify_alphabet(set))?;
                }
                Ok(())
            },
            &Epsilon            => write!(f, "ε")
        }
    }
}

///
/// A guarded edge from one part to another
///
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Transition {
    pub guard: Guard,
    pub target: PartId,
    pub precedence: Precedence
}

impl Transition {
    ///
    /// Creates a transition with the default precedence
    ///
    pub fn new(guard: Guard, target: PartId) -> Transition {
        Transition { guard: guard, target: target, precedence: Precedence::default_precedence() }
    }

    ///
    /// Creates an epsilon transition
    ///
    pub fn epsilon(target: PartId) -> Transition {
        Transition::new(Epsilon, target)
    }

    ///
    /// Replaces the precedence of this transition
    ///
    pub fn with_precedence(mut self, precedence: Precedence) -> Transition {
        self.precedence = precedence;
        self
    }

    #[inline]
    pub fn matches(&self, symbol: u8) -> bool {
        self.guard.matches(symbol)
    }

    #[inline]
    pub fn is_epsilon(&self) -> bool {
        self.guard.is_epsilon()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn inclusion_matches_members() {
        let guard = Inclusion(b"ab".iter().collect());

        assert!(guard.matches(b'a'));
        assert!(guard.matches(b'b'));
        assert!(!guard.matches(b'c'));
    }

    #[test]
    fn exclusion_matches_non_members() {
        let guard = Exclusion(b"ab".iter().collect());

        assert!(!guard.matches(b'a'));
        assert!(guard.matches(b'c'));
        assert!(guard.matches(255));
    }

    #[test]
    fn epsilon_matches_nothing() {
        assert!(!Epsilon.matches(0));
        assert!(!Epsilon.matches(b'a'));
        assert!(Epsilon.symbols() == None);
    }

    #[test]
    fn exclusion_symbols_are_complement() {
        let guard = Exclusion(SymbolSet::single(b'x'));

        assert!(guard.symbols().map(|set| set.len()) == Some(255));
        assert!(guard.symbols().map(|set| set.contains(b'x')) == Some(false));
    }

    #[test]
    fn displays_guards() {
        assert!(format!("{}", Inclusion(b"abcz".iter().collect())) == "'a'..'c', 'z'");
        assert!(format!("{}", Exclusion(SymbolSet::single(b'a'))) == "Σ - 'a'");
        assert!(format!("{}", Exclusion(SymbolSet::new())) == "Σ");
        assert!(format!("{}", Epsilon) == "ε");
    }

    #[test]
    fn new_transition_has_default_precedence() {
        let transition = Transition::new(Inclusion(SymbolSet::single(b'a')), 1);

        assert!(transition.precedence == Precedence::default_precedence());
        assert!(transition.with_precedence(Precedence::new("x", 1)).precedence == Precedence::new("x", 1));
    }
}
