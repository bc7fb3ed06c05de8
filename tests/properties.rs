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


extern crate machina;
extern crate proptest;

use machina::*;
use proptest::prelude::*;

use std::collections::BTreeSet;

fn symbol() -> impl Strategy<Value=u8> {
    prop::sample::select(vec![b'a', b'b', b'c'])
}

fn class_member() -> impl Strategy<Value=ClassMember> {
    prop_oneof![
        symbol().prop_map(ClassMember::Character),
        (symbol(), symbol()).prop_map(|(first, second)| ClassMember::Range(first.min(second), first.max(second)))
    ]
}

fn modifier() -> impl Strategy<Value=Modifier> {
    prop_oneof![
        Just(Modifier::Star),
        Just(Modifier::Plus),
        Just(Modifier::Optional),
        (0u32..3, prop::option::of(0u32..2)).prop_map(|(min, extra)| Modifier::Repeat { min: min, max: extra.map(|extra| min + extra) })
    ]
}

fn binop() -> impl Strategy<Value=Binop> {
    prop_oneof![
        Just(Binop::Union),
        Just(Binop::Intersect),
        Just(Binop::Difference),
        Just(Binop::SymmetricDifference)
    ]
}

fn pattern() -> impl Strategy<Value=Pattern> {
    let leaf = prop_oneof![
        prop::collection::vec(symbol(), 1..3).prop_map(Match),
        (any::<bool>(), prop::collection::vec(class_member(), 1..3)).prop_map(|(invert, mut members)| {
            if invert { members.insert(0, ClassMember::Invert); }
            MatchClass(members)
        }),
        symbol().prop_map(MatchSymbol),
        Just(MatchDefinition(ANY.to_string()))
    ];

    leaf.prop_recursive(4, 16, 3, |inner| prop_oneof![
        prop::collection::vec(inner.clone(), 1..3).prop_map(MatchAll),
        (modifier(), inner.clone()).prop_map(|(modifier, pattern)| Modified(modifier, Box::new(pattern))),
        (binop(), inner.clone(), inner).prop_map(|(binop, left, right)| Combined(binop, Box::new(left), Box::new(right)))
    ])
}

fn inputs() -> impl Strategy<Value=Vec<Vec<u8>>> {
    prop::collection::vec(prop::collection::vec(prop::sample::select(vec![b'a', b'b', b'c', b'x']), 0..6), 1..12)
}

///
/// Every position the pattern can finish at when it starts matching at `start`
///
fn ends(pattern: &Pattern, input: &[u8], start: usize) -> BTreeSet<usize> {
    match pattern {
        &Match(ref symbols)     => if input[start..].starts_with(symbols) { Some(start + symbols.len()).into_iter().collect() } else { BTreeSet::new() },
        &MatchSymbol(expected)  => single(input, start, |symbol| symbol == expected),
        &MatchDefinition(_)     => single(input, start, |_| true),

        &MatchClass(ref members) => {
            let invert = members.contains(&ClassMember::Invert);
            single(input, start, |symbol| {
                let included = members.iter().any(|member| match member {
                    &ClassMember::Character(character)      => character == symbol,
                    &ClassMember::Range(lowest, highest)    => symbol >= lowest && symbol <= highest,
                    &ClassMember::Invert                    => false
                });

                included != invert
            })
        },

        &MatchAll(ref patterns) => {
            patterns.iter().fold(Some(start).into_iter().collect(), |positions, pattern| step(pattern, input, &positions))
        },

        &Modified(modifier, ref pattern) => {
            let from_start: BTreeSet<usize> = Some(start).into_iter().collect();

            match modifier {
                Modifier::Star      => repeated(pattern, input, from_start),
                Modifier::Plus      => { let once = step(pattern, input, &from_start); repeated(pattern, input, once) },
                Modifier::Optional  => step(pattern, input, &from_start).union(&from_start).cloned().collect(),

                Modifier::Repeat { min, max } => {
                    let mut positions = from_start;
                    for _ in 0..min {
                        positions = step(pattern, input, &positions);
                    }

                    match max {
                        None        => repeated(pattern, input, positions),
                        Some(max)   => {
                            let mut all = positions.clone();
                            for _ in min..max {
                                positions = step(pattern, input, &positions);
                                all.extend(positions.iter().cloned());
                            }
                            all
                        }
                    }
                }
            }
        },

        &Combined(binop, ref left, ref right) => {
            let left_ends = ends(left, input, start);

            match binop {
                Binop::Union                => left_ends.union(&ends(right, input, start)).cloned().collect(),
                Binop::Intersect            => left_ends.intersection(&ends(right, input, start)).cloned().collect(),
                Binop::Difference           => left_ends.difference(&ends(right, input, start)).cloned().collect(),
                Binop::SymmetricDifference  => {
                    left_ends.into_iter()
                        .filter(|end| !(start..=*end).any(|inner| ends(right, input, inner).iter().any(|inner_end| inner_end <= end)))
                        .collect()
                }
            }
        }
    }
}

fn single<Matches: Fn(u8) -> bool>(input: &[u8], start: usize, matches: Matches) -> BTreeSet<usize> {
    input.get(start).filter(|symbol| matches(**symbol)).map(|_| start+1).into_iter().collect()
}

fn step(pattern: &Pattern, input: &[u8], positions: &BTreeSet<usize>) -> BTreeSet<usize> {
    positions.iter().flat_map(|position| ends(pattern, input, *position)).collect()
}

fn repeated(pattern: &Pattern, input: &[u8], positions: BTreeSet<usize>) -> BTreeSet<usize> {
    let mut all     = positions.clone();
    let mut recent  = positions;

    while !recent.is_empty() {
        recent = step(pattern, input, &recent).difference(&all).cloned().collect();
        all.extend(recent.iter().cloned());
    }

    all
}

fn accepts(pattern: &Pattern, input: &[u8]) -> bool {
    ends(pattern, input, 0).contains(&input.len())
}

fn compile(pattern: &Pattern) -> Machine {
    let definitions = Definitions::new();
    let compiler    = ExpressionCompiler::new(&definitions);

    pattern.compile(&compiler).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn compiled_machine_accepts_pattern_language(pattern in pattern(), inputs in inputs()) {
        let machine = compile(&pattern);

        for input in inputs.iter() {
            prop_assert_eq!(machine.simulate(input), accepts(&pattern, input), "{} on {:?}", pattern, input);
        }
    }

    #[test]
    fn determinized_machine_is_equivalent(pattern in pattern(), inputs in inputs()) {
        let machine = compile(&pattern);

        match machine.determinize() {
            Ok(dfa) => {
                prop_assert!(dfa.is_deterministic());
                if !dfa.accepting().is_empty() {
                    let again = dfa.determinize().unwrap();
                    prop_assert!(again.len() <= dfa.len());
                    prop_assert!(again.determinize().unwrap() == again);
                }

                for input in inputs.iter() {
                    prop_assert_eq!(dfa.run(input), accepts(&pattern, input), "{} on {:?}", pattern, input);
                }
            },

            Err(MachineError::NoAcceptingPart) => {
                for input in inputs.iter() {
                    prop_assert!(!accepts(&pattern, input));
                }
            },

            Err(error) => prop_assert!(false, "{} failed to determinize: {}", pattern, error)
        }
    }

    #[test]
    fn minimized_machine_is_equivalent(pattern in pattern(), inputs in inputs()) {
        let dfa = match compile(&pattern).determinize() {
            Ok(dfa) => dfa,
            Err(_)  => return Ok(())
        };
        prop_assume!(!dfa.accepting().is_empty());

        let minimal = dfa.minimize().unwrap();

        prop_assert!(minimal.is_deterministic());
        prop_assert!(minimal.len() <= dfa.len());

        for input in inputs.iter() {
            prop_assert_eq!(minimal.run(input), accepts(&pattern, input), "{} on {:?}", pattern, input);
        }
    }

    #[test]
    fn minimized_nondeterministic_machine_is_equivalent(pattern in pattern(), inputs in inputs()) {
        let machine = compile(&pattern);

        match machine.minimize() {
            Ok(minimal) => {
                for input in inputs.iter() {
                    prop_assert_eq!(minimal.simulate(input), accepts(&pattern, input), "{} on {:?}", pattern, input);
                }
            },

            Err(MachineError::NoAcceptingPart) => {
                for input in inputs.iter() {
                    prop_assert!(!accepts(&pattern, input));
                }
            },

            Err(error) => prop_assert!(false, "{} failed to minimize: {}", pattern, error)
        }
    }

    #[test]
    fn set_operations_combine_languages(left in pattern(), right in pattern(), inputs in inputs()) {
        let union       = compile(&left).union(compile(&right));
        let intersect   = compile(&left).intersect(compile(&right)).unwrap();
        let difference  = compile(&left).difference(compile(&right)).unwrap();

        prop_assert!(intersect.is_deterministic());
        prop_assert!(difference.is_deterministic());

        for input in inputs.iter() {
            let in_left     = accepts(&left, input);
            let in_right    = accepts(&right, input);

            prop_assert_eq!(union.simulate(input), in_left || in_right);
            prop_assert_eq!(intersect.run(input), in_left && in_right);
            prop_assert_eq!(difference.run(input), in_left && !in_right);
        }
    }

    #[test]
    fn displayed_pattern_parses_to_same_language(pattern in pattern(), inputs in inputs()) {
        let text    = pattern.to_string();
        let parsed  = Expression::new(text.clone()).patterns().unwrap();
        let machine = compile(&MatchAll(parsed));

        for input in inputs.iter() {
            prop_assert_eq!(machine.simulate(input), accepts(&pattern, input), "{} on {:?}", text, input);
        }
    }
}
