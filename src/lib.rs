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
//! # Machina
//!
//! Machina compiles a small regular expression language into finite-state machines over bytes, and provides the
//! operations for working with those machines: union, concatenation, repetition, determinization, minimization,
//! intersection and difference.
//!
//! ```
//! # use machina::*;
//! let mut definitions = Definitions::new();
//! definitions.define_expression("digit", "[0-9]").unwrap();
//!
//! let compiler    = ExpressionCompiler::new(&definitions);
//! let number      = Expression::new("digit+ - '0'+").build_machine(&compiler).unwrap();
//! let number      = number.determinize().unwrap();
//!
//! assert!(number.run(b"42"));
//! assert!(number.run(b"100"));
//! assert!(!number.run(b"00"));
//! ```
//!
//! Machines can also be built directly, either from patterns or by calling the machine operations themselves.
//!

pub use self::symbol_set::*;
pub use self::symbol_range::*;
pub use self::overlapping_symbols::*;
pub use self::precedence::*;
pub use self::guard::*;
pub use self::part::*;
pub use self::state_machine::*;
pub use self::machine::*;
pub use self::dfa_compiler::*;
pub use self::matches::*;
pub use self::dot::*;
pub use self::location::*;
pub use self::lexer::*;
pub use self::token_stream::*;
pub use self::parser::*;
pub use self::pattern::*;
pub use self::definitions::*;
pub use self::compiler::*;
pub use self::expression::*;
pub use self::config::*;
pub use self::error::*;

pub mod symbol_set;
pub mod symbol_range;
pub mod overlapping_symbols;
pub mod precedence;
pub mod guard;
pub mod part;
pub mod state_machine;
pub mod machine;
pub mod ndfa;
pub mod dfa_compiler;
pub mod minimize;
pub mod set_operations;
pub mod matches;
pub mod dot;
pub mod location;
pub mod lexer;
pub mod token_stream;
pub mod parser;
pub mod pattern;
pub mod definitions;
pub mod compiler;
pub mod expression;
pub mod config;
pub mod error;
