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
//! # Lexer
//!
//! Splits the text of an expression into tokens. Every token records the location it started at so that later errors can
//! point back into the text.
//!
//! | Text                  | Token                                                  |
//! |-----------------------|--------------------------------------------------------|
//! | `'abc'`               | string, taken literally (`\'` stands for a quote)      |
//! | `"a\tb"`              | string, with escapes                                   |
//! | `[a-z_]`, `[^"]`      | character class; a leading `^` inverts it              |
//! | `42`                  | number                                                 |
//! | `name`                | identifier                                             |
//! | `\| & - --`           | union, intersection, difference, symmetric difference  |
//! | `* + ?`               | star, plus, optional                                   |
//! | `{2}` `{2,}` `{,3}` `{2,3}` | repetition                                       |
//!

use std::fmt;

use log::trace;

use super::error::*;
use super::location::*;

///
/// The kinds of token that can appear in an expression, without their contents
///
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum TokenType {
    String,
    Contain,
    Number,
    Identifier,
    Star,
    Plus,
    Optional,
    Union,
    Intersect,
    Difference,
    SymmetricDifference,
    LeftParen,
    RightParen,
    Repetition,
    EndOfInput
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use self::TokenType::*;

        let name = match self {
            String              => "string",
            Contain             => "character class",
            Number              => "number",
            Identifier          => "identifier",
            Star                => "`*`",
            Plus                => "`+`",
            Optional            => "`?`",
            Union               => "`|`",
            Intersect           => "`&`",
            Difference          => "`-`",
            SymmetricDifference => "`--`",
            LeftParen           => "`(`",
            RightParen          => "`)`",
            Repetition          => "repetition",
            EndOfInput          => "end of input"
        };

        write!(f, "{}", name)
    }
}

///
/// An entry in a character class
///
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum ClassMember {
    /// A single symbol
    Character(u8),

    /// Every symbol from the first to the second, inclusive
    Range(u8, u8),

    /// The class matches every symbol that is not one of its other members
    Invert
}

///
/// A token, along with its contents
///
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum TokenKind {
    Str(Vec<u8>),
    Contain(Vec<ClassMember>),
    Number(u64),
    Identifier(String),
    Star,
    Plus,
    Optional,
    Union,
    Intersect,
    Difference,
    SymmetricDifference,
    LeftParen,
    RightParen,

    /// `{min,max}`: a missing minimum is 0, a missing maximum is unbounded
    Repetition { min: u64, max: Option<u64> },

    EndOfInput
}

impl TokenKind {
    pub fn token_type(&self) -> TokenType {
        match self {
            TokenKind::Str(_)                   => TokenType::String,
            TokenKind::Contain(_)               => TokenType::Contain,
            TokenKind::Number(_)                => TokenType::Number,
            TokenKind::Identifier(_)            => TokenType::Identifier,
            TokenKind::Star                     => TokenType::Star,
            TokenKind::Plus                     => TokenType::Plus,
            TokenKind::Optional                 => TokenType::Optional,
            TokenKind::Union                    => TokenType::Union,
            TokenKind::Intersect                => TokenType::Intersect,
            TokenKind::Difference               => TokenType::Difference,
            TokenKind::SymmetricDifference      => TokenType::SymmetricDifference,
            TokenKind::LeftParen                => TokenType::LeftParen,
            TokenKind::RightParen               => TokenType::RightParen,
            TokenKind::Repetition { .. }        => TokenType::Repetition,
            TokenKind::EndOfInput               => TokenType::EndOfInput
        }
    }
}

///
/// A token read from an expression
///
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Token {
    pub kind: TokenKind,
    pub location: Location
}

impl Token {
    pub fn new(kind: TokenKind, location: Location) -> Token {
        Token { kind: kind, location: location }
    }

    #[inline]
    pub fn token_type(&self) -> TokenType {
        self.kind.token_type()
    }
}

///
/// Reads the tokens from the text of an expression
///
/// The result always finishes with an `EndOfInput` token.
///
pub fn scan(text: &str) -> Result<Vec<Token>, CompileError> {
    Lexer::new(text).tokens()
}

///
/// Turns the text of an expression into tokens
///
pub struct Lexer {
    /// The characters being read
    chars: Vec<char>,

    /// Index of the next character to read
    position: usize,

    /// Location of the next character to read
    location: Location
}

impl Lexer {
    pub fn new(text: &str) -> Lexer {
        Lexer {
            chars:      text.chars().collect(),
            position:   0,
            location:   Location::start()
        }
    }

    ///
    /// Reads every remaining token
    ///
    pub fn tokens(mut self) -> Result<Vec<Token>, CompileError> {
        let mut tokens = vec![];

        loop {
            let token   = self.next_token()?;
            let is_end  = token.kind == TokenKind::EndOfInput;

            tokens.push(token);
            if is_end {
                return Ok(tokens);
            }
        }
    }

    ///
    /// Reads the next token, skipping any whitespace in front of it
    ///
    pub fn next_token(&mut self) -> Result<Token, CompileError> {
        while self.peek().map(|c| c.is_whitespace()).unwrap_or(false) {
            self.next_char();
        }

        let start       = self.position;
        let location    = self.location;

        let next = match self.next_char() {
            None        => return Ok(Token::new(TokenKind::EndOfInput, location)),
            Some(next)  => next
        };

        let kind = match next {
            '|'     => TokenKind::Union,
            '&'     => TokenKind::Intersect,
            '*'     => TokenKind::Star,
            '+'     => TokenKind::Plus,
            '?'     => TokenKind::Optional,
            '('     => TokenKind::LeftParen,
            ')'     => TokenKind::RightParen,

            '-'     => {
                if self.peek() == Some('-') {
                    self.next_char();
                    TokenKind::SymmetricDifference
                } else {
                    TokenKind::Difference
                }
            },

            '\''    => self.single_quoted(start, location)?,
            '"'     => self.double_quoted(start, location)?,
            '['     => self.class(start, location)?,
            '{'     => self.repetition(start, location)?,

            digit if digit.is_ascii_digit()                     => TokenKind::Number(self.number(digit)),
            letter if letter.is_ascii_alphabetic() || letter == '_' => TokenKind::Identifier(self.identifier(letter)),

            _       => return Err(self.syntax_error(start, location))
        };

        trace!("{:?} at {}", kind, location);

        Ok(Token::new(kind, location))
    }

    #[inline]
    fn peek(&self) -> Option<char> {
        self.chars.get(self.position).cloned()
    }

    fn next_char(&mut self) -> Option<char> {
        let next = self.peek()?;

        self.position += 1;
        self.location = self.location.advance(next);

        Some(next)
    }

    ///
    /// Creates an error showing the text around a position
    ///
    fn syntax_error(&self, position: usize, location: Location) -> CompileError {
        let from    = position.saturating_sub(8);
        let to      = (position + 8).min(self.chars.len());
        let snippet = self.chars[from..to].iter().collect::<String>().trim().to_string();

        CompileError::InvalidSyntax { snippet: snippet, location: location }
    }

    ///
    /// Reads a string where only `\'` is special
    ///
    fn single_quoted(&mut self, start: usize, location: Location) -> Result<TokenKind, CompileError> {
        let mut bytes = vec![];

        loop {
            match self.next_char() {
                None        => return Err(self.syntax_error(start, location)),
                Some('\'')  => return Ok(TokenKind::Str(bytes)),

                Some('\\') if self.peek() == Some('\'') => {
                    self.next_char();
                    bytes.push(b'\'');
                },

                Some(other) => push_utf8(&mut bytes, other)
            }
        }
    }

    ///
    /// Reads a string with escape sequences
    ///
    fn double_quoted(&mut self, start: usize, location: Location) -> Result<TokenKind, CompileError> {
        let mut bytes = vec![];

        loop {
            match self.next_char() {
                None        => return Err(self.syntax_error(start, location)),
                Some('"')   => return Ok(TokenKind::Str(bytes)),
                Some('\\')  => bytes.push(self.escape(&[])?),
                Some(other) => push_utf8(&mut bytes, other)
            }
        }
    }

    ///
    /// Reads the rest of a character class
    ///
    fn class(&mut self, start: usize, location: Location) -> Result<TokenKind, CompileError> {
        let mut members = vec![];

        if self.peek() == Some('^') {
            self.next_char();
            members.push(ClassMember::Invert);
        }

        loop {
            let (member_start, member_location) = (self.position, self.location);

            let lowest = match self.class_symbol(start, location)? {
                None            => return Ok(TokenKind::Contain(members)),
                Some(symbol)    => symbol
            };

            // '-' before the closing bracket is just a '-'
            let is_range = self.peek() == Some('-') && self.chars.get(self.position + 1) != Some(&']');

            if is_range {
                self.next_char();

                match self.class_symbol(start, location)? {
                    Some(highest) if highest < lowest   => return Err(self.syntax_error(member_start, member_location)),
                    Some(highest)                       => members.push(ClassMember::Range(lowest, highest)),
                    None                                => return Err(self.syntax_error(start, location))
                }
            } else {
                members.push(ClassMember::Character(lowest));
            }
        }
    }

    ///
    /// Reads a single symbol from a character class, or None at the closing bracket
    ///
    fn class_symbol(&mut self, start: usize, location: Location) -> Result<Option<u8>, CompileError> {
        match self.next_char() {
            None        => Err(self.syntax_error(start, location)),
            Some(']')   => Ok(None),
            Some('\\')  => Ok(Some(self.escape(&['[', ']', '-', '^'])?)),

            Some(other) => {
                if other.is_ascii() {
                    Ok(Some(other as u8))
                } else {
                    // Character classes hold single bytes: other characters need to be written as escapes
                    Err(self.syntax_error(self.position - 1, self.location))
                }
            }
        }
    }

    ///
    /// Reads an escape sequence (the backslash has already been read)
    ///
    fn escape(&mut self, extra: &[char]) -> Result<u8, CompileError> {
        let start       = self.position - 1;
        let location    = self.location;

        let escaped = match self.next_char() {
            Some('0')   => 0x00,
            Some('a')   => 0x07,
            Some('b')   => 0x08,
            Some('t')   => b'\t',
            Some('n')   => b'\n',
            Some('v')   => 0x0b,
            Some('f')   => 0x0c,
            Some('r')   => b'\r',
            Some('\\')  => b'\\',
            Some('"')   => b'"',
            Some('\'')  => b'\'',

            Some('x')   => {
                let high    = self.next_char().and_then(|c| c.to_digit(16));
                let low     = self.next_char().and_then(|c| c.to_digit(16));

                match (high, low) {
                    (Some(high), Some(low)) => (high * 16 + low) as u8,
                    _                       => return Err(self.syntax_error(start, location))
                }
            },

            Some(other) if extra.contains(&other) => other as u8,

            _ => return Err(self.syntax_error(start, location))
        };

        Ok(escaped)
    }

    ///
    /// Reads the rest of a decimal number, saturating if it's too large to represent
    ///
    fn number(&mut self, first: char) -> u64 {
        let mut value = u64::from(first.to_digit(10).unwrap_or(0));

        while let Some(digit) = self.peek().and_then(|c| c.to_digit(10)) {
            self.next_char();
            value = value.saturating_mul(10).saturating_add(u64::from(digit));
        }

        value
    }

    fn identifier(&mut self, first: char) -> String {
        let mut name = first.to_string();

        while let Some(next) = self.peek() {
            if !(next.is_ascii_alphanumeric() || next == '_') {
                break;
            }

            self.next_char();
            name.push(next);
        }

        name
    }

    ///
    /// Reads the rest of a `{min,max}` repetition
    ///
    fn repetition(&mut self, start: usize, location: Location) -> Result<TokenKind, CompileError> {
        let min = self.optional_number();

        let (min, max) = if self.peek() == Some(',') {
            self.next_char();
            (min, self.optional_number())
        } else {
            // `{n}` repeats exactly n times
            (min, min)
        };

        if self.next_char() != Some('}') || (min.is_none() && max.is_none()) {
            return Err(self.syntax_error(start, location));
        }

        Ok(TokenKind::Repetition { min: min.unwrap_or(0), max: max })
    }

    fn optional_number(&mut self) -> Option<u64> {
        match self.peek() {
            Some(digit) if digit.is_ascii_digit() => {
                self.next_char();
                Some(self.number(digit))
            },

            _ => None
        }
    }
}

fn push_utf8(bytes: &mut Vec<u8>, character: char) {
    let mut buffer = [0; 4];
    bytes.extend(character.encode_utf8(&mut buffer).as_bytes());
}

#[cfg(test)]
mod test {
    use super::*;

    fn kinds(text: &str) -> Vec<TokenKind> {
        scan(text).unwrap().into_iter().map(|token| token.kind).collect()
    }

    #[test]
    fn scans_class_union_and_string() {
        assert!(kinds("[hello] | 'world'") == vec![
            TokenKind::Contain(b"hello".iter().map(|c| ClassMember::Character(*c)).collect()),
            TokenKind::Union,
            TokenKind::Str(b"world".to_vec()),
            TokenKind::EndOfInput
        ]);
    }

    #[test]
    fn scans_complicated_input() {
        use self::TokenKind::*;

        let tokens = kinds(r#"(("hello" & 42) | ([a]* world{1,2} -- "a" - "b"))+?"#);

        assert!(tokens == vec![
            LeftParen,
            LeftParen,
            Str(b"hello".to_vec()),
            Intersect,
            Number(42),
            RightParen,
            Union,
            LeftParen,
            Contain(vec![ClassMember::Character(b'a')]),
            Star,
            Identifier("world".to_string()),
            Repetition { min: 1, max: Some(2) },
            SymmetricDifference,
            Str(b"a".to_vec()),
            Difference,
            Str(b"b".to_vec()),
            RightParen,
            RightParen,
            Plus,
            Optional,
            EndOfInput
        ]);
    }

    #[test]
    fn double_quoted_strings_have_escapes() {
        assert!(kinds(r#""a\tb\x41\\\"""#)[0] == TokenKind::Str(b"a\tbA\\\"".to_vec()));
    }

    #[test]
    fn single_quoted_strings_are_literal() {
        assert!(kinds(r#"'a\tb\'c'"#)[0] == TokenKind::Str(b"a\\tb'c".to_vec()));
    }

    #[test]
    fn empty_string_is_allowed() {
        assert!(kinds("''")[0] == TokenKind::Str(vec![]));
    }

    #[test]
    fn classes_have_ranges_and_inversion() {
        assert!(kinds("[^a-c_\\]-]")[0] == TokenKind::Contain(vec![
            ClassMember::Invert,
            ClassMember::Range(b'a', b'c'),
            ClassMember::Character(b'_'),
            ClassMember::Character(b']'),
            ClassMember::Character(b'-')
        ]));
    }

    #[test]
    fn repetition_forms() {
        assert!(kinds("{3}")[0] == TokenKind::Repetition { min: 3, max: Some(3) });
        assert!(kinds("{3,}")[0] == TokenKind::Repetition { min: 3, max: None });
        assert!(kinds("{,3}")[0] == TokenKind::Repetition { min: 0, max: Some(3) });
        assert!(kinds("{2,3}")[0] == TokenKind::Repetition { min: 2, max: Some(3) });
    }

    #[test]
    fn identifiers_can_contain_digits() {
        assert!(kinds("digit_2")[0] == TokenKind::Identifier("digit_2".to_string()));
    }

    #[test]
    fn tokens_have_locations() {
        let tokens = scan("'a'\n  | b").unwrap();

        assert!(tokens[0].location == Location::new(1, 1));
        assert!(tokens[1].location == Location::new(2, 3));
        assert!(tokens[2].location == Location::new(2, 5));
    }

    #[test]
    fn unterminated_string_is_an_error() {
        match scan("'abc") {
            Err(CompileError::InvalidSyntax { location, .. }) => assert!(location == Location::new(1, 1)),
            _ => assert!(false)
        }
    }

    #[test]
    fn unknown_character_is_an_error() {
        match scan("'a' % 'b'") {
            Err(CompileError::InvalidSyntax { snippet, location }) => {
                assert!(snippet == "'a' % 'b'");
                assert!(location == Location::new(1, 5));
            },

            _ => assert!(false)
        }
    }

    #[test]
    fn reversed_class_range_is_an_error() {
        match scan("'a' [bz-a]") {
            Err(CompileError::InvalidSyntax { snippet, location }) => {
                assert!(snippet == "'a' [bz-a]");
                assert!(location == Location::new(1, 7));
            },

            _ => assert!(false)
        }

        assert!(scan("[^z-a]").is_err());
        assert!(scan("[a-a]").is_ok());
    }

    #[test]
    fn empty_repetition_is_an_error() {
        assert!(scan("{,}").is_err());
        assert!(scan("{}").is_err());
    }
}
