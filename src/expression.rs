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
//! # Expressions
//!
//! An `Expression` is the text of an expression waiting to be compiled. Each group at the top level of the expression
//! becomes its own machine:
//!
//! ```
//! # use machina::*;
//! let definitions = Definitions::new();
//! let compiler    = ExpressionCompiler::new(&definitions);
//! let machines    = Expression::new("'cat' | 'dog'   [0-9]+").build(&compiler).unwrap();
//!
//! assert!(machines.len() == 2);
//!
//! let animal = machines[0].determinize().unwrap();
//! assert!(animal.run(b"dog"));
//! assert!(!animal.run(b"cow"));
//! ```
//!

use log::debug;

use super::error::*;
use super::lexer::*;
use super::parser::*;
use super::pattern::*;
use super::machine::*;
use super::compiler::*;
use super::token_stream::*;

///
/// The text of an expression
///
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Expression {
    body: String
}

impl Expression {
    pub fn new<Body: Into<String>>(body: Body) -> Expression {
        Expression { body: body.into() }
    }

    #[inline]
    pub fn body(&self) -> &str {
        &self.body
    }

    ///
    /// The tokens in this expression
    ///
    pub fn scan(&self) -> Result<Vec<Token>, CompileError> {
        scan(&self.body)
    }

    ///
    /// Parses this expression, returning the result of each top-level group
    ///
    pub fn parse_with<R: Reductions>(&self, reductions: &R) -> Result<Vec<R::Output>, CompileError> {
        let mut tokens = TokenStream::new(self.scan()?);
        parse(&mut tokens, reductions)
    }

    ///
    /// The pattern for each top-level group in this expression
    ///
    pub fn patterns(&self) -> Result<Vec<Pattern>, CompileError> {
        self.parse_with(&PatternBuilder)
    }

    ///
    /// Compiles each top-level group of this expression into a machine
    ///
    pub fn build(&self, compiler: &ExpressionCompiler) -> Result<Vec<Machine>, CompileError> {
        let machines = self.parse_with(compiler)?
            .into_iter()
            .map(|machine| compiler.finish(machine))
            .collect::<Result<Vec<_>, _>>()?;

        debug!("compiled `{}` into {} machines", self.body, machines.len());

        Ok(machines)
    }

    ///
    /// Compiles this expression into a single machine, which matches each of the top-level groups in order
    ///
    pub fn build_machine(&self, compiler: &ExpressionCompiler) -> Result<Machine, CompileError> {
        let groups = self.parse_with(compiler)?;

        compiler.finish(Machine::concatenate_all(groups))
    }
}
