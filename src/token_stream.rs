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
//! A token stream is a reader over the tokens of an expression that can look at the next token before deciding what to do
//! with it.
//!
//! Reading past the end of the stream keeps returning the final `EndOfInput` token, so parsers never need to check for
//! running off the end separately from checking for the token they expect.
//!

use super::error::*;
use super::lexer::*;
use super::location::*;

///
/// Reader over a list of tokens
///
pub struct TokenStream {
    /// The tokens being read (always finishes with `EndOfInput`)
    tokens: Vec<Token>,

    /// Index of the next token to read
    position: usize
}

impl TokenStream {
    ///
    /// Creates a token stream, adding an `EndOfInput` token if the tokens don't already finish with one
    ///
    pub fn new(mut tokens: Vec<Token>) -> TokenStream {
        let finished = tokens.last().map(|token| token.kind == TokenKind::EndOfInput).unwrap_or(false);

        if !finished {
            let location = tokens.last().map(|token| token.location).unwrap_or_else(Location::start);
            tokens.push(Token::new(TokenKind::EndOfInput, location));
        }

        TokenStream { tokens: tokens, position: 0 }
    }

    ///
    /// Scans some text and creates a stream of its tokens
    ///
    pub fn scan(text: &str) -> Result<TokenStream, CompileError> {
        Ok(TokenStream::new(scan(text)?))
    }

    ///
    /// The next token, without reading it
    ///
    #[inline]
    pub fn peek(&self) -> &Token {
        &self.tokens[self.position]
    }

    ///
    /// True if the next token is one of a set of types
    ///
    #[inline]
    pub fn peek_is(&self, types: &[TokenType]) -> bool {
        types.contains(&self.peek().token_type())
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.peek().kind == TokenKind::EndOfInput
    }

    ///
    /// Reads the next token
    ///
    pub fn shift(&mut self) -> Token {
        let token = self.tokens[self.position].clone();

        if self.position + 1 < self.tokens.len() {
            self.position += 1;
        }

        token
    }

    ///
    /// Reads the next token if it's one of a set of types, or returns an error describing what was found instead
    ///
    pub fn expect(&mut self, types: &[TokenType]) -> Result<Token, CompileError> {
        if self.peek_is(types) {
            Ok(self.shift())
        } else {
            Err(self.unexpected(types))
        }
    }

    ///
    /// An error saying that the next token is not one of a set of types
    ///
    pub fn unexpected(&self, types: &[TokenType]) -> CompileError {
        let next = self.peek();

        CompileError::UnexpectedToken {
            expected:   ExpectedTokens(types.to_vec()),
            got:        next.token_type(),
            location:   next.location
        }
    }

    ///
    /// Reads items until the next token is a terminator, which is left in the stream
    ///
    /// If there's a separator, then it must appear between every item, and reading stops at the first item not followed
    /// by one.
    ///
    pub fn collect<Item, ReadItem>(&mut self, terminator: TokenType, separator: Option<TokenType>, mut read_item: ReadItem) -> Result<Vec<Item>, CompileError>
    where ReadItem: FnMut(&mut TokenStream) -> Result<Item, CompileError> {
        let mut items = vec![];

        if self.peek_is(&[terminator]) {
            return Ok(items);
        }

        items.push(read_item(self)?);

        loop {
            if let Some(separator) = separator {
                if !self.peek_is(&[separator]) {
                    break;
                }
                self.shift();
            }

            if self.peek_is(&[terminator]) {
                break;
            }

            items.push(read_item(self)?);
        }

        Ok(items)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn number(stream: &mut TokenStream) -> Result<u64, CompileError> {
        match stream.expect(&[TokenType::Number])?.kind {
            TokenKind::Number(value)    => Ok(value),
            _                           => unreachable!()
        }
    }

    #[test]
    fn peek_does_not_read() {
        let stream = TokenStream::scan("a b").unwrap();

        assert!(stream.peek().kind == TokenKind::Identifier("a".to_string()));
        assert!(stream.peek().kind == TokenKind::Identifier("a".to_string()));
    }

    #[test]
    fn shift_stops_at_end() {
        let mut stream = TokenStream::scan("a").unwrap();

        assert!(stream.shift().token_type() == TokenType::Identifier);
        assert!(stream.shift().token_type() == TokenType::EndOfInput);
        assert!(stream.shift().token_type() == TokenType::EndOfInput);
        assert!(stream.is_at_end());
    }

    #[test]
    fn end_is_added_if_missing() {
        let stream = TokenStream::new(vec![]);

        assert!(stream.is_at_end());
    }

    #[test]
    fn expect_reports_unexpected_token() {
        let mut stream = TokenStream::scan("  )").unwrap();

        assert!(stream.expect(&[TokenType::String, TokenType::Number]) == Err(CompileError::UnexpectedToken {
            expected:   ExpectedTokens(vec![TokenType::String, TokenType::Number]),
            got:        TokenType::RightParen,
            location:   Location::new(1, 3)
        }));
    }

    #[test]
    fn collect_until_terminator() {
        let mut stream = TokenStream::scan("1 2 3)").unwrap();
        let numbers = stream.collect(TokenType::RightParen, None, number).unwrap();

        assert!(numbers == vec![1, 2, 3]);
        assert!(stream.peek().token_type() == TokenType::RightParen);
    }

    #[test]
    fn collect_with_separator() {
        let mut stream = TokenStream::scan("1 | 2 | 3 4").unwrap();
        let numbers = stream.collect(TokenType::EndOfInput, Some(TokenType::Union), number).unwrap();

        assert!(numbers == vec![1, 2, 3]);
        assert!(stream.peek().kind == TokenKind::Number(4));
    }

    #[test]
    fn collect_nothing() {
        let mut stream = TokenStream::scan(")").unwrap();

        assert!(stream.collect(TokenType::RightParen, None, number).unwrap().is_empty());
    }
}
