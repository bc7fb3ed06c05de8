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
//! # Expression compiler
//!
//! Builds machines for each part of an expression. The parser calls the compiler through its `Reductions`
//! implementation, so an expression is compiled as it is parsed, innermost parts first.
//!

use log::debug;

use super::guard::*;
use super::error::*;
use super::lexer::*;
use super::config::*;
use super::parser::*;
use super::machine::*;
use super::symbol_set::*;
use super::definitions::*;
use super::symbol_range::*;
use super::state_machine::*;

///
/// Compiles the parts of an expression into machines
///
pub struct ExpressionCompiler<'a> {
    /// The machines that identifiers refer to
    definitions: &'a Definitions,

    /// How each top-level machine is finished
    options: CompilerOptions
}

impl<'a> ExpressionCompiler<'a> {
    ///
    /// Creates a compiler that uses the default options
    ///
    pub fn new(definitions: &'a Definitions) -> ExpressionCompiler<'a> {
        ExpressionCompiler::with_options(definitions, CompilerOptions::default())
    }

    pub fn with_options(definitions: &'a Definitions, options: CompilerOptions) -> ExpressionCompiler<'a> {
        ExpressionCompiler { definitions: definitions, options: options }
    }

    #[inline]
    pub fn definitions(&self) -> &Definitions {
        self.definitions
    }

    #[inline]
    pub fn options(&self) -> &CompilerOptions {
        &self.options
    }

    ///
    /// A machine that matches a literal string (the empty string gives a machine that matches only the empty string)
    ///
    pub fn compile_string(&self, literal: &[u8]) -> Machine {
        let mut machine = Machine::new();
        let parts       = machine.create_parts(literal.len() + 1);

        for (index, symbol) in literal.iter().enumerate() {
            machine.add_transition(parts[index], Inclusion(SymbolSet::single(*symbol)), parts[index+1]);
        }

        machine.set_starting(parts[0], true);
        machine.set_accepting(parts[literal.len()], true);

        machine
    }

    ///
    /// A machine that matches a single symbol from a character class
    ///
    pub fn compile_contain(&self, members: &[ClassMember]) -> Machine {
        let mut symbols = SymbolSet::new();
        let mut invert  = false;

        for member in members.iter() {
            match member {
                &ClassMember::Character(symbol)         => symbols.insert(symbol),
                &ClassMember::Range(lowest, highest)    => symbols = symbols.union(&SymbolSet::from_range(&SymbolRange::new(lowest, highest))),
                &ClassMember::Invert                    => invert = true
            }
        }

        let guard = if invert { Exclusion(symbols) } else { Inclusion(symbols) };
        self.single_step(guard)
    }

    ///
    /// A machine that matches a single symbol
    ///
    pub fn compile_number(&self, symbol: u8) -> Machine {
        self.single_step(Inclusion(SymbolSet::single(symbol)))
    }

    ///
    /// A copy of the machine a definition refers to
    ///
    pub fn compile_identifier(&self, name: &str) -> Result<Machine, CompileError> {
        let machine = self.definitions.get(name)?;
        debug!("resolved `{}` to a machine with {} parts", name, machine.len());

        Ok(machine)
    }

    ///
    /// Joins the groups in a pair of parentheses so that they match one after the other
    ///
    /// No groups produces a machine with no parts, and a single group is returned unchanged.
    ///
    pub fn compile_paren(&self, machines: Vec<Machine>) -> Machine {
        Machine::concatenate_all(machines)
    }

    pub fn compile_modifier(&self, modifier: Modifier, machine: Machine) -> Machine {
        match modifier {
            Modifier::Star                  => machine.star(),
            Modifier::Plus                  => machine.plus(),
            Modifier::Optional              => machine.optional(),
            Modifier::Repeat { min, max }   => machine.repeat(min, max)
        }
    }

    pub fn compile_binop(&self, binop: Binop, left: Machine, right: Machine) -> Result<Machine, CompileError> {
        let machine = match binop {
            Binop::Union                => left.union(right),
            Binop::Intersect            => left.intersect(right)?,
            Binop::Difference           => left.difference(right)?,
            Binop::SymmetricDifference  => left.symmetric_difference(right, &Definitions::default_any())?
        };

        Ok(machine)
    }

    ///
    /// Applies the minimize and determinize options to a top-level machine
    ///
    pub fn finish(&self, machine: Machine) -> Result<Machine, CompileError> {
        // A machine with no parts has nothing to reduce
        if machine.is_empty() {
            return Ok(machine);
        }

        let options = &self.options;

        let machine = match (options.determinize, options.minimize) {
            (false, false)  => machine,
            (false, true)   => machine.minimize_with(options.allow_exclusion)?,

            // Minimizing removes the stuck part of a total machine, so total machines are minimized first
            (true, true) if options.total   => machine.minimize_with(options.allow_exclusion)?.determinize_with(options.determinize_options())?,
            (true, true)                    => machine.determinize_with(options.determinize_options())?.minimize_with(options.allow_exclusion)?,
            (true, false)                   => machine.determinize_with(options.determinize_options())?
        };

        Ok(machine)
    }

    fn single_step(&self, guard: Guard) -> Machine {
        let mut machine = Machine::new();
        let parts       = machine.create_parts(2);

        machine.add_transition(parts[0], guard, parts[1]);
        machine.set_starting(parts[0], true);
        machine.set_accepting(parts[1], true);

        machine
    }
}

impl<'a> Reductions for ExpressionCompiler<'a> {
    type Output = Machine;

    fn reduce_string(&self, literal: &[u8]) -> Result<Machine, CompileError> {
        Ok(self.compile_string(literal))
    }

    fn reduce_contain(&self, members: &[ClassMember]) -> Result<Machine, CompileError> {
        Ok(self.compile_contain(members))
    }

    fn reduce_number(&self, symbol: u8) -> Result<Machine, CompileError> {
        Ok(self.compile_number(symbol))
    }

    fn reduce_identifier(&self, name: &str) -> Result<Machine, CompileError> {
        self.compile_identifier(name)
    }

    fn reduce_paren(&self, groups: Vec<Machine>) -> Result<Machine, CompileError> {
        Ok(self.compile_paren(groups))
    }

    fn reduce_modifier(&self, modifier: Modifier, value: Machine) -> Result<Machine, CompileError> {
        Ok(self.compile_modifier(modifier, value))
    }

    fn reduce_binop(&self, binop: Binop, left: Machine, right: Machine) -> Result<Machine, CompileError> {
        self.compile_binop(binop, left, right)
    }
}
