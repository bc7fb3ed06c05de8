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
//! # Minimization
//!
//! Reduces the number of parts and transitions in a machine without changing the strings it accepts. This runs in stages:
//!
//! * epsilon transitions are replaced by copies of the transitions they lead to
//! * a machine that is still non-deterministic gets a single starting hub and a single accepting hub
//! * parts that can't be reached from a starting part, or that can't reach an accepting part, are removed
//! * transitions that lead to the same part are combined into one
//! * in a deterministic machine, parts that accept the same strings as each other are merged
//!
//! Only deterministic machines are guaranteed to come out with the fewest possible parts.
//!

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use log::debug;

use super::part::*;
use super::guard::*;
use super::error::*;
use super::machine::*;
use super::precedence::*;
use super::symbol_set::*;
use super::state_machine::*;
use super::overlapping_symbols::*;

/// A set with more than this many symbols is stored as an exclusion when exclusions are allowed
const EXCLUSION_THRESHOLD: usize = 128;

impl Machine {
    ///
    /// Creates a machine with as few parts as this one can be reduced to that accepts the same strings
    ///
    pub fn minimize(&self) -> Result<Machine, MachineError> {
        self.minimize_with(true)
    }

    ///
    /// As for `minimize`, optionally avoiding exclusion guards in the result
    ///
    pub fn minimize_with(&self, allow_exclusion: bool) -> Result<Machine, MachineError> {
        let mut machine = self.clone();

        machine.minimize_epsilon_transitions();

        if !machine.is_deterministic() {
            machine.minimize_starting()?;
        }

        machine.prune();
        machine.coalesce_transitions(allow_exclusion);

        if machine.is_deterministic() {
            machine.merge_equivalent_parts();
            machine.prune();
            machine.coalesce_transitions(allow_exclusion);
        }

        debug!("minimized {} parts to {}", self.len(), machine.len());

        Ok(machine)
    }

    ///
    /// Replaces every epsilon transition with the transitions found at the end of it
    ///
    /// A part becomes accepting if an accepting part can be reached from it by following epsilon transitions.
    ///
    pub fn minimize_epsilon_transitions(&mut self) {
        let replacements: Vec<(bool, Vec<Transition>)> = (0..self.len())
            .map(|part| {
                let closure     = self.epsilon_closure(Some(part));
                let accepting   = closure.iter().any(|member| self.is_accepting(*member));

                // The closure already contains every part we could loop back to, so each part contributes once
                let mut seen        = HashSet::new();
                let mut transitions = vec![];
                for member in closure.iter() {
                    for transition in self.transitions_for_part(*member) {
                        if !transition.is_epsilon() && seen.insert(transition.clone()) {
                            transitions.push(transition.clone());
                        }
                    }
                }

                (accepting, transitions)
            })
            .collect();

        for (part, (accepting, transitions)) in replacements.into_iter().enumerate() {
            let part = self.part_mut(part);

            part.accepting      = accepting;
            part.transitions    = transitions;
        }
    }

    ///
    /// Ensures that there is exactly one starting part and exactly one accepting part by adding hub parts
    ///
    pub fn minimize_starting(&mut self) -> Result<(), MachineError> {
        let starting    = self.starting();
        let accepting   = self.accepting();

        if starting.is_empty() {
            return Err(MachineError::NoStartingPart);
        }

        if accepting.is_empty() {
            return Err(MachineError::NoAcceptingPart);
        }

        if starting.len() > 1 {
            let hub = self.create_part();

            for part in starting {
                self.set_starting(part, false);
                self.join_parts(hub, part);
            }

            self.set_starting(hub, true);
        }

        if accepting.len() > 1 {
            let hub = self.create_part();

            for part in accepting {
                self.set_accepting(part, false);
                self.join_parts(part, hub);
            }

            self.set_accepting(hub, true);
        }

        Ok(())
    }

    ///
    /// Removes the parts that are not on a path from a starting part to an accepting part
    ///
    /// Starting parts are always kept, so a machine that accepts nothing still has somewhere to start.
    ///
    pub fn prune(&mut self) {
        let count = self.len();

        // Forward: everything reachable from a starting part
        let mut reachable   = vec![false; count];
        let mut stack       = self.starting();
        while let Some(part) = stack.pop() {
            if !reachable[part] {
                reachable[part] = true;
                stack.extend(self.transitions_for_part(part).iter().map(|transition| transition.target));
            }
        }

        // Backward: everything that can reach an accepting part
        let mut incoming = vec![vec![]; count];
        for part in 0..count {
            for transition in self.transitions_for_part(part) {
                incoming[transition.target].push(part);
            }
        }

        let mut productive  = vec![false; count];
        let mut stack       = self.accepting();
        while let Some(part) = stack.pop() {
            if !productive[part] {
                productive[part] = true;
                stack.extend(incoming[part].iter().cloned());
            }
        }

        let keep: Vec<bool> = (0..count)
            .map(|part| self.is_starting(part) || (reachable[part] && productive[part]))
            .collect();

        if keep.iter().any(|keep_part| !keep_part) {
            self.retain_parts(&keep);
        }
    }

    ///
    /// Combines the transitions from each part that lead to the same target into a single transition
    ///
    /// The combined transition has the highest precedence of the transitions it replaces. Epsilon transitions are kept
    /// apart from transitions that read a symbol. When `allow_exclusion` is set, sets that cover most of the domain are
    /// stored as the symbols they leave out.
    ///
    pub fn coalesce_transitions(&mut self, allow_exclusion: bool) {
        for part in 0..self.len() {
            let mut symbols: BTreeMap<PartId, (SymbolSet, Precedence)>     = BTreeMap::new();
            let mut epsilons: BTreeMap<PartId, Precedence>                  = BTreeMap::new();

            for transition in self.transitions_for_part(part) {
                match transition.guard.symbols() {
                    None => {
                        let precedence = epsilons.entry(transition.target).or_insert_with(|| transition.precedence.clone());
                        if transition.precedence > *precedence {
                            *precedence = transition.precedence.clone();
                        }
                    },

                    Some(set) => {
                        let combined = symbols.entry(transition.target).or_insert_with(|| (SymbolSet::new(), transition.precedence.clone()));

                        combined.0 = combined.0.union(&set);
                        if transition.precedence > combined.1 {
                            combined.1 = transition.precedence.clone();
                        }
                    }
                }
            }

            let mut transitions = vec![];

            for (target, (set, precedence)) in symbols {
                if set.is_empty() {
                    continue;
                }

                let guard = if allow_exclusion && set.len() > EXCLUSION_THRESHOLD {
                    Exclusion(set.complement())
                } else {
                    Inclusion(set)
                };

                transitions.push(Transition::new(guard, target).with_precedence(precedence));
            }

            for (target, precedence) in epsilons {
                transitions.push(Transition::epsilon(target).with_precedence(precedence));
            }

            self.part_mut(part).transitions = transitions;
        }
    }

    ///
    /// Merges the parts of a deterministic machine that accept exactly the same strings
    ///
    /// Parts are split into accepting and non-accepting groups, then groups are split further until every part in a group
    /// moves to the same group on every symbol (Moore's algorithm). Each group becomes a single part.
    ///
    pub fn merge_equivalent_parts(&mut self) {
        debug_assert!(self.is_deterministic());

        let count       = self.len();
        let guard_sets: Vec<SymbolSet> = self.parts().iter()
            .flat_map(|part| part.transitions().iter())
            .filter_map(|transition| transition.guard.symbols())
            .collect();
        let partition   = SymbolPartition::from_sets(self.alphabet(), guard_sets.iter());
        let symbols: Vec<u8> = partition.classes().iter().filter_map(|class| class.first()).collect();

        // Where each part goes on each symbol class
        let moves: Vec<Vec<Option<&Transition>>> = (0..count)
            .map(|part| symbols.iter()
                .map(|symbol| self.part(part).transitions_on(*symbol).next())
                .collect())
            .collect();

        let mut groups: Vec<usize> = (0..count).map(|part| if self.is_accepting(part) { 1 } else { 0 }).collect();
        let mut num_groups = groups.iter().cloned().collect::<BTreeSet<_>>().len();

        loop {
            let mut signatures  = HashMap::new();
            let mut new_groups  = Vec::with_capacity(count);

            for part in 0..count {
                let signature: (usize, Vec<Option<(usize, &Precedence)>>) = (groups[part], moves[part].iter()
                    .map(|transition| transition.map(|transition| (groups[transition.target], &transition.precedence)))
                    .collect());

                let next_group = signatures.len();
                new_groups.push(*signatures.entry(signature).or_insert(next_group));
            }

            let new_num_groups = signatures.len();
            groups = new_groups;

            if new_num_groups == num_groups {
                break;
            }
            num_groups = new_num_groups;
        }

        if num_groups == count {
            return;
        }

        // Build a part for each group, using the first part in the group as its representative
        let mut merged          = Machine::new();
        let mut represented     = vec![false; num_groups];
        merged.create_parts(num_groups);

        for part in 0..count {
            let group = groups[part];

            if !represented[group] {
                represented[group] = true;

                for transition in self.transitions_for_part(part) {
                    let mut transition = transition.clone();
                    transition.target = groups[transition.target];
                    merged.push_transition(group, transition);
                }
            }

            let source_parts = self.part(part).source_parts().clone();
            let merged_part: &mut Part = merged.part_mut(group);
            merged_part.starting |= self.is_starting(part);
            merged_part.accepting |= self.is_accepting(part);
            merged_part.source_parts.extend(source_parts);
        }

        *self = merged;
    }
}

#[cfg(test)]
mod test {
    use super::*;

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

    fn has_epsilon(machine: &Machine) -> bool {
        machine.parts().iter().any(|part| part.has_epsilon())
    }

    #[test]
    fn epsilon_collapse_keeps_language() {
        let mut machine = literal(b"ab").star();
        machine.minimize_epsilon_transitions();

        assert!(!has_epsilon(&machine));
        assert!(machine.simulate(b""));
        assert!(machine.simulate(b"abab"));
        assert!(!machine.simulate(b"aba"));
    }

    #[test]
    fn epsilon_collapse_handles_loops() {
        let mut machine = Machine::new();
        let parts       = machine.create_parts(3);
        machine.join_parts(parts[0], parts[1]);
        machine.join_parts(parts[1], parts[0]);
        machine.add_transition(parts[1], Inclusion(SymbolSet::single(b'x')), parts[2]);
        machine.set_starting(parts[0], true);
        machine.set_accepting(parts[2], true);

        machine.minimize_epsilon_transitions();

        assert!(!has_epsilon(&machine));
        assert!(machine.transitions_for_part(parts[0]).len() == 1);
        assert!(machine.simulate(b"x"));
    }

    #[test]
    fn minimized_union_is_smaller_and_equivalent() {
        let ndfa        = literal(b"cat").union(literal(b"dog"));
        let minimized   = ndfa.minimize().unwrap();

        assert!(minimized.len() < ndfa.len());
        assert!(minimized.simulate(b"cat"));
        assert!(minimized.simulate(b"dog"));
        assert!(!minimized.simulate(b"cad"));
    }

    #[test]
    fn deterministic_parts_are_merged() {
        let dfa         = literal(b"cat").union(literal(b"dog")).determinize().unwrap();
        let minimized   = dfa.minimize().unwrap();

        // 'cat' and 'dog' finish in the same part
        assert!(dfa.len() == 7);
        assert!(minimized.len() == 6);
        assert!(minimized.is_deterministic());
        assert!(minimized.run(b"cat"));
        assert!(minimized.run(b"dog"));
        assert!(!minimized.run(b"ca"));
    }

    #[test]
    fn equivalent_branches_are_merged() {
        // (a|b)c: both branches lead to parts that only accept 'c'
        let mut machine = Machine::new();
        let parts       = machine.create_parts(4);
        machine.add_transition(parts[0], Inclusion(SymbolSet::single(b'a')), parts[1]);
        machine.add_transition(parts[0], Inclusion(SymbolSet::single(b'b')), parts[2]);
        machine.add_transition(parts[1], Inclusion(SymbolSet::single(b'c')), parts[3]);
        machine.add_transition(parts[2], Inclusion(SymbolSet::single(b'c')), parts[3]);
        machine.set_starting(parts[0], true);
        machine.set_accepting(parts[3], true);

        let minimized = machine.minimize().unwrap();

        assert!(minimized.len() == 3);
        assert!(minimized.transitions_for_part(0).len() == 1);
        assert!(minimized.run(b"ac"));
        assert!(minimized.run(b"bc"));
    }

    #[test]
    fn prune_removes_unreachable_and_dead_parts() {
        let mut machine = literal(b"a");
        let unreachable = machine.create_part();
        let dead        = machine.create_part();
        machine.add_transition(unreachable, Inclusion(SymbolSet::single(b'b')), 1);
        machine.add_transition(0, Inclusion(SymbolSet::single(b'c')), dead);

        machine.prune();

        assert!(machine.len() == 2);
        assert!(machine.transitions_for_part(0).len() == 1);
    }

    #[test]
    fn prune_keeps_starting_part() {
        let mut machine = literal(b"a");
        machine.set_accepting(1, false);

        machine.prune();

        assert!(machine.len() == 1);
        assert!(machine.is_starting(0));
        assert!(!machine.run(b"a"));
    }

    #[test]
    fn coalesce_combines_guards() {
        let mut machine = literal(b"a");
        machine.add_transition(0, Inclusion(SymbolSet::single(b'b')), 1);

        machine.coalesce_transitions(true);

        assert!(machine.transitions_for_part(0) == &[Transition::new(Inclusion(b"ab".iter().collect()), 1)][..]);
    }

    #[test]
    fn coalesce_uses_exclusion_for_large_sets() {
        let mut machine = literal(b"a");
        machine.add_transition(0, Exclusion(b"ab".iter().collect()), 1);

        let mut without_exclusion = machine.clone();
        machine.coalesce_transitions(true);
        without_exclusion.coalesce_transitions(false);

        assert!(machine.transitions_for_part(0)[0].guard == Exclusion(SymbolSet::single(b'b')));
        assert!(without_exclusion.transitions_for_part(0)[0].guard == Inclusion(SymbolSet::single(b'b').complement()));
    }

    #[test]
    fn coalesce_keeps_epsilon_separate() {
        let mut machine = literal(b"a");
        machine.join_parts(0, 1);

        machine.coalesce_transitions(true);

        assert!(machine.transitions_for_part(0).len() == 2);
        assert!(machine.simulate(b""));
        assert!(machine.simulate(b"a"));
        assert!(!machine.simulate(b"b"));
    }

    #[test]
    fn coalesce_keeps_highest_precedence() {
        let mut machine = literal(b"a");
        machine.push_transition(0, Transition::new(Inclusion(SymbolSet::single(b'b')), 1).with_precedence(Precedence::new("high", 2)));

        machine.coalesce_transitions(true);

        assert!(machine.transitions_for_part(0)[0].precedence == Precedence::new("high", 2));
    }

    #[test]
    fn hubs_need_starting_and_accepting_parts() {
        let mut no_start = literal(b"a").union(literal(b"b"));
        no_start.set_starting(0, false);
        assert!(no_start.minimize() == Err(MachineError::NoStartingPart));

        let mut no_accept = literal(b"a");
        no_accept.absorb(literal(b"b"));
        no_accept.set_accepting(1, false);
        no_accept.set_accepting(3, false);
        assert!(no_accept.minimize() == Err(MachineError::NoAcceptingPart));
    }

    #[test]
    fn multiple_starts_get_a_hub() {
        let mut machine = literal(b"a");
        machine.absorb(literal(b"b"));

        machine.minimize_starting().unwrap();

        assert!(machine.starting().len() == 1);
        assert!(machine.accepting().len() == 1);
        assert!(machine.simulate(b"a"));
        assert!(machine.simulate(b"b"));
    }

    #[test]
    fn minimizing_twice_changes_nothing() {
        let once    = literal(b"ab").star().determinize().unwrap().minimize().unwrap();
        let twice   = once.minimize().unwrap();

        assert!(once == twice);
    }
}
