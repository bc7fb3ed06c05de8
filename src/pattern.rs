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
//! This provides a data structure, `Pattern`, representing a parsed expression. Parsing an expression with
//! `PatternBuilder` produces patterns, and a pattern can be compiled into a machine or written back out as the text of
//! an expression.
//!
//! Patterns can also be built directly in code, starting from `literal` and combining the results:
//!
//! ```
//! # use machina::*;
//! let keyword         = literal("if").or("else");
//! let many_keywords   = literal("if").or("else").plus();
//! let short_words     = literal(&b"ab"[..]).repeat(1, Some(3));
//!
//! assert!(keyword.to_string() == "(\"if\" | \"else\")");
//! ```
//!

use std::fmt;

use super::error::*;
use super::lexer::*;
use super::parser::*;
use super::machine::*;
use super::compiler::*;

///
/// A Pattern represents an expression that can be compiled into a machine
///
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Pattern {
    ///
    /// Matches a specific literal string of symbols
    ///
    Match(Vec<u8>),

    ///
    /// Matches one symbol from a character class
    ///
    MatchClass(Vec<ClassMember>),

    ///
    /// Matches a single symbol
    ///
    MatchSymbol(u8),

    ///
    /// Matches whatever a named definition matches
    ///
    MatchDefinition(String),

    ///
    /// Matches a set of sub-patterns in order
    ///
    MatchAll(Vec<Pattern>),

    ///
    /// Matches a pattern with a modifier applied to it
    ///
    Modified(Modifier, Box<Pattern>),

    ///
    /// Matches two patterns combined with a binary operator
    ///
    Combined(Binop, Box<Pattern>, Box<Pattern>)
}

pub use self::Pattern::*;

impl Pattern {
    ///
    /// Compiles this pattern into a machine
    ///
    pub fn compile(&self, compiler: &ExpressionCompiler) -> Result<Machine, CompileError> {
        match self {
            &Match(ref symbols)             => Ok(compiler.compile_string(symbols)),
            &MatchClass(ref members)        => Ok(compiler.compile_contain(members)),
            &MatchSymbol(symbol)            => Ok(compiler.compile_number(symbol)),
            &MatchDefinition(ref name)      => compiler.compile_identifier(name),

            &MatchAll(ref patterns) => {
                let machines = patterns.iter()
                    .map(|pattern| pattern.compile(compiler))
                    .collect::<Result<Vec<_>, _>>()?;

                Ok(compiler.compile_paren(machines))
            },

            &Modified(modifier, ref pattern) => {
                Ok(compiler.compile_modifier(modifier, pattern.compile(compiler)?))
            },

            &Combined(binop, ref left, ref right) => {
                let left    = left.compile(compiler)?;
                let right   = right.compile(compiler)?;

                compiler.compile_binop(binop, left, right)
            }
        }
    }
}

///
/// Reductions that build patterns
///
pub struct PatternBuilder;

impl Reductions for PatternBuilder {
    type Output = Pattern;

    fn reduce_string(&self, literal: &[u8]) -> Result<Pattern, CompileError> {
        Ok(Match(literal.to_vec()))
    }

    fn reduce_contain(&self, members: &[ClassMember]) -> Result<Pattern, CompileError> {
        Ok(MatchClass(members.to_vec()))
    }

    fn reduce_number(&self, symbol: u8) -> Result<Pattern, CompileError> {
        Ok(MatchSymbol(symbol))
    }

    fn reduce_identifier(&self, name: &str) -> Result<Pattern, CompileError> {
        Ok(MatchDefinition(name.to_string()))
    }

    fn reduce_paren(&self, mut groups: Vec<Pattern>) -> Result<Pattern, CompileError> {
        // A single group in parentheses is just that group
        if groups.len() == 1 {
            Ok(groups.remove(0))
        } else {
            Ok(MatchAll(groups))
        }
    }

    fn reduce_modifier(&self, modifier: Modifier, value: Pattern) -> Result<Pattern, CompileError> {
        Ok(Modified(modifier, Box::new(value)))
    }

    fn reduce_binop(&self, binop: Binop, left: Pattern, right: Pattern) -> Result<Pattern, CompileError> {
        Ok(Combined(binop, Box::new(left), Box::new(right)))
    }
}

///
/// Writes a symbol so that it can appear in a double-quoted string or a character class
///
fn write_symbol(f: &mut fmt::Formatter, symbol: u8, special: &[u8]) -> fmt::Result {
    match symbol {
        b'\t'                                       => write!(f, "\\t"),
        b'\n'                                       => write!(f, "\\n"),
        b'\r'                                       => write!(f, "\\r"),
        b'\\'                                       => write!(f, "\\\\"),
        symbol if special.contains(&symbol)         => write!(f, "\\{}", symbol as char),
        symbol if symbol < 0x20 || symbol > 0x7e    => write!(f, "\\x{:02x}", symbol),
        symbol                                      => write!(f, "{}", symbol as char)
    }
}

impl fmt::Display for Pattern {
    ///
    /// Writes this pattern as the text of an expression that parses back into the same pattern
    ///
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            &Match(ref symbols) => {
                write!(f, "\"")?;
                for symbol in symbols.iter() {
                    write_symbol(f, *symbol, b"\"")?;
                }
                write!(f, "\"")
            },

            &MatchClass(ref members) => {
                write!(f, "[")?;
                if members.contains(&ClassMember::Invert) {
                    write!(f, "^")?;
                }

                for member in members.iter() {
                    match member {
                        &ClassMember::Character(symbol)         => write_symbol(f, symbol, b"[]-^")?,
                        &ClassMember::Range(lowest, highest)    => {
                            write_symbol(f, lowest, b"[]-^")?;
                            write!(f, "-")?;
                            write_symbol(f, highest, b"[]-^")?;
                        },
                        &ClassMember::Invert                    => { }
                    }
                }

                write!(f, "]")
            },

            &MatchSymbol(symbol)        => write!(f, "{}", symbol),
            &MatchDefinition(ref name)  => write!(f, "{}", name),

            &MatchAll(ref patterns) => {
                let patterns: Vec<String> = patterns.iter().map(|pattern| pattern.to_string()).collect();
                write!(f, "({})", patterns.join(" "))
            },

            &Modified(modifier, ref pattern) => {
                write!(f, "{}", pattern)?;

                match modifier {
                    Modifier::Star                                  => write!(f, "*"),
                    Modifier::Plus                                  => write!(f, "+"),
                    Modifier::Optional                              => write!(f, "?"),
                    Modifier::Repeat { min, max: Some(max) }        => write!(f, "{{{},{}}}", min, max),
                    Modifier::Repeat { min, max: None }             => write!(f, "{{{},}}", min)
                }
            },

            &Combined(binop, ref left, ref right) => {
                let operator = match binop {
                    Binop::Union                => "|",
                    Binop::Intersect            => "&",
                    Binop::Difference           => "-",
                    Binop::SymmetricDifference  => "--"
                };

                write!(f, "({} {} {})", left, operator, right)
            }
        }
    }
}

///
/// Implemented by things that can be converted into a pattern
///
pub trait IntoPattern {
    ///
    /// Converts a particular object into a pattern that will match it
    ///
    fn into_pattern(self) -> Pattern;
}

impl IntoPattern for Pattern {
    #[inline]
    fn into_pattern(self) -> Pattern {
        self
    }
}

impl IntoPattern for Box<Pattern> {
    #[inline]
    fn into_pattern(self) -> Pattern {
        *self
    }
}

impl<'a> IntoPattern for &'a Pattern {
    #[inline]
    fn into_pattern(self) -> Pattern {
        self.clone()
    }
}

impl<'a> IntoPattern for &'a str {
    #[inline]
    fn into_pattern(self) -> Pattern {
        Match(self.as_bytes().to_vec())
    }
}

impl<'a> IntoPattern for &'a [u8] {
    #[inline]
    fn into_pattern(self) -> Pattern {
        Match(self.to_vec())
    }
}

impl IntoPattern for Vec<u8> {
    #[inline]
    fn into_pattern(self) -> Pattern {
        Match(self)
    }
}

impl IntoPattern for u8 {
    #[inline]
    fn into_pattern(self) -> Pattern {
        MatchSymbol(self)
    }
}

///
/// Creates a value that is matched literally in a pattern
///
#[inline]
pub fn literal<PatternType: IntoPattern>(item: PatternType) -> Pattern {
    item.into_pattern()
}

///
/// Creates a pattern that matches whatever a definition matches
///
pub fn definition<Name: Into<String>>(name: Name) -> Pattern {
    MatchDefinition(name.into())
}

///
/// Implemented by things that can modify existing patterns into other forms
///
pub trait PatternTransformer {
    /// Matches the pattern any number of times, including none
    fn star(self) -> Pattern;

    /// Matches the pattern at least once
    fn plus(self) -> Pattern;

    /// Matches the pattern or nothing
    fn optional(self) -> Pattern;

    /// Matches the pattern between `min` and `max` times (no upper limit if `max` is `None`)
    fn repeat(self, min: u32, max: Option<u32>) -> Pattern;
}

impl<PatternType: IntoPattern> PatternTransformer for PatternType {
    fn star(self) -> Pattern {
        Modified(Modifier::Star, Box::new(self.into_pattern()))
    }

    fn plus(self) -> Pattern {
        Modified(Modifier::Plus, Box::new(self.into_pattern()))
    }

    fn optional(self) -> Pattern {
        Modified(Modifier::Optional, Box::new(self.into_pattern()))
    }

    fn repeat(self, min: u32, max: Option<u32>) -> Pattern {
        Modified(Modifier::Repeat { min: min, max: max }, Box::new(self.into_pattern()))
    }
}

///
/// Implemented by things that combine patterns together to create new patterns
///
pub trait PatternCombiner<SecondPattern: IntoPattern> {
    /// Appends a pattern to this one
    fn append(self, pattern: SecondPattern) -> Pattern;

    /// Matches either this pattern or the specified pattern
    fn or(self, pattern: SecondPattern) -> Pattern;

    /// Matches what both this pattern and the specified pattern match
    fn and(self, pattern: SecondPattern) -> Pattern;

    /// Matches what this pattern matches, except for anything the specified pattern matches
    fn except(self, pattern: SecondPattern) -> Pattern;

    /// Matches what this pattern matches, except for anything containing a match for the specified pattern
    fn except_containing(self, pattern: SecondPattern) -> Pattern;
}

impl<PatternType: IntoPattern, SecondPatternType: IntoPattern> PatternCombiner<SecondPatternType> for PatternType {
    fn append(self, pattern: SecondPatternType) -> Pattern {
        // Combination rules depend on what the patterns are
        match (self.into_pattern(), pattern.into_pattern()) {
            // Combining 'Match(x)' and 'Match(y)' should produce 'Match(xy)'
            (Match(first), Match(second))           => Match(first.into_iter().chain(second.into_iter()).collect()),

            // Combining 'MatchAll(x)' and 'MatchAll(y)' should produce 'MatchAll(xy)'
            (MatchAll(first), MatchAll(second))     => MatchAll(first.into_iter().chain(second.into_iter()).collect()),

            (MatchAll(mut first), second) => {
                first.push(second);
                MatchAll(first)
            },

            (first, MatchAll(second)) => {
                let mut result = vec![first];
                result.extend(second);
                MatchAll(result)
            },

            // Everything else is just MatchAll(xy)
            (first, second) => MatchAll(vec![first, second])
        }
    }

    fn or(self, pattern: SecondPatternType) -> Pattern {
        Combined(Binop::Union, Box::new(self.into_pattern()), Box::new(pattern.into_pattern()))
    }

    fn and(self, pattern: SecondPatternType) -> Pattern {
        Combined(Binop::Intersect, Box::new(self.into_pattern()), Box::new(pattern.into_pattern()))
    }

    fn except(self, pattern: SecondPatternType) -> Pattern {
        Combined(Binop::Difference, Box::new(self.into_pattern()), Box::new(pattern.into_pattern()))
    }

    fn except_containing(self, pattern: SecondPatternType) -> Pattern {
        Combined(Binop::SymmetricDifference, Box::new(self.into_pattern()), Box::new(pattern.into_pattern()))
    }
}
