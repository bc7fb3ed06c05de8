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
//! # Errors
//!
//! `MachineError` reports machines that are missing the parts an operation needs. `CompileError` reports everything that
//! can go wrong turning the text of an expression into machines.
//!

use std::fmt;

use thiserror::Error;

use super::location::*;
use super::lexer::*;

///
/// Errors from operations that need a machine to have particular parts
///
#[derive(Clone, PartialEq, Eq, Debug, Error)]
pub enum MachineError {
    #[error("machine contains no starting parts")]
    NoStartingPart,

    #[error("machine contains no accepting parts")]
    NoAcceptingPart
}

///
/// The set of token types a parser would have accepted at some point
///
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ExpectedTokens(pub Vec<TokenType>);

impl fmt::Display for ExpectedTokens {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let names: Vec<String> = self.0.iter().map(|token_type| token_type.to_string()).collect();
        write!(f, "{}", names.join(", "))
    }
}

///
/// Errors from compiling an expression
///
#[derive(Clone, PartialEq, Eq, Debug, Error)]
pub enum CompileError {
    #[error("unknown definition `{0}`")]
    UnknownDefinition(String),

    #[error("invalid syntax near {snippet:?} at {location}")]
    InvalidSyntax { snippet: String, location: Location },

    #[error("unexpected {got}, expected one of {expected} at {location}")]
    UnexpectedToken { expected: ExpectedTokens, got: TokenType, location: Location },

    #[error("number {value} at {location} is out of range")]
    NumberOutOfRange { value: u64, location: Location },

    #[error("repetition at {location} has a maximum of {max}, below its minimum of {min}")]
    InvalidRepetition { min: u32, max: u32, location: Location },

    #[error(transparent)]
    Machine(#[from] MachineError)
}
