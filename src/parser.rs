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
//! # Parser
//!
//! Reads the structure of an expression from a token stream:
//!
//! ```text
//! expression := group*
//! group      := modified (binop modified)*
//! modified   := value modifier*
//! value      := '(' expression ')' | STRING | CONTAIN | NUMBER | IDENTIFIER
//! modifier   := '*' | '+' | '?' | '{' min ',' max '}'
//! binop      := '|' | '&' | '-' | '--'
//! ```
//!
//! Binary operators all have the same precedence and associate to the left; placing groups next to each other binds
//! most loosely of all. Every group at the top level of an expression produces its own result.
//!
//! The parser does not build anything itself: as it recognises each production it passes the parts that have been
//! recognised so far to an implementation of `Reductions`, which decides what the result is.
//!

use std::convert::TryFrom;

use super::error::*;
use super::lexer::*;
use super::location::*;
use super::token_stream::*;

///
/// A postfix modifier applied to a value
///
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Modifier {
    /// Zero or more repetitions
    Star,

    /// One or more repetitions
    Plus,

    /// Zero or one repetitions
    Optional,

    /// Between `min` and `max` repetitions (no upper limit if `max` is `None`)
    Repeat { min: u32, max: Option<u32> }
}

///
/// A binary operator between two groups
///
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Binop {
    Union,
    Intersect,
    Difference,
    SymmetricDifference
}

///
/// Produces the result of each production recognised by the parser
///
pub trait Reductions {
    type Output;

    /// A string literal
    fn reduce_string(&self, literal: &[u8]) -> Result<Self::Output, CompileError>;

    /// A character class
    fn reduce_contain(&self, members: &[ClassMember]) -> Result<Self::Output, CompileError>;

    /// A number standing for a single symbol
    fn reduce_number(&self, symbol: u8) -> Result<Self::Output, CompileError>;

    /// A reference to a definition
    fn reduce_identifier(&self, name: &str) -> Result<Self::Output, CompileError>;

    /// The groups within a pair of parentheses, which follow on from one another
    fn reduce_paren(&self, groups: Vec<Self::Output>) -> Result<Self::Output, CompileError>;

    /// A value followed by a modifier
    fn reduce_modifier(&self, modifier: Modifier, value: Self::Output) -> Result<Self::Output, CompileError>;

    /// Two groups joined by a binary operator
    fn reduce_binop(&self, binop: Binop, left: Self::Output, right: Self::Output) -> Result<Self::Output, CompileError>;
}

/// The largest count a `{min,max}` repetition can use
pub const MAX_REPETITION: u32 = 1000;

const VALUE_START: [TokenType; 5] = [TokenType::LeftParen, TokenType::String, TokenType::Contain, TokenType::Number, TokenType::Identifier];

///
/// Parses an entire expression, returning the result of each of its top-level groups
///
pub fn parse<R: Reductions>(stream: &mut TokenStream, reductions: &R) -> Result<Vec<R::Output>, CompileError> {
    let groups = parse_expression(stream, reductions, TokenType::EndOfInput)?;
    stream.expect(&[TokenType::EndOfInput])?;

    Ok(groups)
}

///
/// Parses groups until a terminating token
///
fn parse_expression<R: Reductions>(stream: &mut TokenStream, reductions: &R, terminator: TokenType) -> Result<Vec<R::Output>, CompileError> {
    stream.collect(terminator, None, |stream| parse_group(stream, reductions))
}

fn parse_group<R: Reductions>(stream: &mut TokenStream, reductions: &R) -> Result<R::Output, CompileError> {
    let mut left = parse_modified(stream, reductions)?;

    while let Some(binop) = binop_for(stream.peek()) {
        stream.shift();

        let right   = parse_modified(stream, reductions)?;
        left        = reductions.reduce_binop(binop, left, right)?;
    }

    Ok(left)
}

fn parse_modified<R: Reductions>(stream: &mut TokenStream, reductions: &R) -> Result<R::Output, CompileError> {
    let mut value = parse_value(stream, reductions)?;

    while let Some(modifier) = modifier_for(stream.peek())? {
        stream.shift();
        value = reductions.reduce_modifier(modifier, value)?;
    }

    Ok(value)
}

fn parse_value<R: Reductions>(stream: &mut TokenStream, reductions: &R) -> Result<R::Output, CompileError> {
    let token = stream.expect(&VALUE_START)?;

    match token.kind {
        TokenKind::LeftParen => {
            let groups = parse_expression(stream, reductions, TokenType::RightParen)?;
            stream.expect(&[TokenType::RightParen])?;

            reductions.reduce_paren(groups)
        },

        TokenKind::Str(literal)         => reductions.reduce_string(&literal),
        TokenKind::Contain(members)     => reductions.reduce_contain(&members),
        TokenKind::Identifier(name)     => reductions.reduce_identifier(&name),

        TokenKind::Number(value) => {
            let symbol = u8::try_from(value).map_err(|_| CompileError::NumberOutOfRange { value: value, location: token.location })?;
            reductions.reduce_number(symbol)
        },

        _ => unreachable!("expect() only returns value tokens here")
    }
}

fn binop_for(token: &Token) -> Option<Binop> {
    match token.kind {
        TokenKind::Union                => Some(Binop::Union),
        TokenKind::Intersect            => Some(Binop::Intersect),
        TokenKind::Difference           => Some(Binop::Difference),
        TokenKind::SymmetricDifference  => Some(Binop::SymmetricDifference),
        _                               => None
    }
}

fn modifier_for(token: &Token) -> Result<Option<Modifier>, CompileError> {
    let modifier = match token.kind {
        TokenKind::Star                         => Modifier::Star,
        TokenKind::Plus                         => Modifier::Plus,
        TokenKind::Optional                     => Modifier::Optional,
        TokenKind::Repetition { min, max }      => repeat_modifier(min, max, token.location)?,
        _                                       => return Ok(None)
    };

    Ok(Some(modifier))
}

fn repeat_modifier(min: u64, max: Option<u64>, location: Location) -> Result<Modifier, CompileError> {
    let count = |value: u64| match u32::try_from(value) {
        Ok(count) if count <= MAX_REPETITION    => Ok(count),
        _                                       => Err(CompileError::NumberOutOfRange { value: value, location: location })
    };

    let min = count(min)?;
    let max = match max {
        Some(max)   => Some(count(max)?),
        None        => None
    };

    match max {
        Some(max) if max < min  => Err(CompileError::InvalidRepetition { min: min, max: max, location: location }),
        _                       => Ok(Modifier::Repeat { min: min, max: max })
    }
}
