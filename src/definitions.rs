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
//! # Definitions
//!
//! Identifiers in an expression refer to named machines. Every lookup returns a fresh copy of the machine, so nothing
//! that is built from a definition can change the definition itself.
//!
//! One definition is always available: `any` matches any single symbol. Defining `any` replaces it.
//!

use std::collections::HashMap;
use std::iter::FromIterator;

use log::debug;

use super::guard::*;
use super::error::*;
use super::machine::*;
use super::compiler::*;
use super::expression::*;
use super::symbol_set::*;
use super::state_machine::*;

/// Name of the definition that matches any single symbol
pub const ANY: &str = "any";

///
/// A table of named machines
///
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Definitions {
    definitions: HashMap<String, Machine>
}

impl Definitions {
    pub fn new() -> Definitions {
        Definitions { definitions: HashMap::new() }
    }

    ///
    /// The machine that matches any single symbol
    ///
    pub fn default_any() -> Machine {
        let mut machine = Machine::new();
        let parts       = machine.create_parts(2);

        machine.add_transition(parts[0], Inclusion(SymbolSet::full()), parts[1]);
        machine.set_starting(parts[0], true);
        machine.set_accepting(parts[1], true);

        machine
    }

    ///
    /// Retrieves a copy of the machine with a particular name
    ///
    pub fn get(&self, name: &str) -> Result<Machine, CompileError> {
        if let Some(machine) = self.definitions.get(name) {
            return Ok(machine.clone());
        }

        if name == ANY {
            Ok(Definitions::default_any())
        } else {
            Err(CompileError::UnknownDefinition(name.to_string()))
        }
    }

    ///
    /// True if a name refers to a machine
    ///
    pub fn contains(&self, name: &str) -> bool {
        name == ANY || self.definitions.contains_key(name)
    }

    ///
    /// Gives a machine a name, replacing any previous machine with the same name
    ///
    pub fn define<Name: Into<String>>(&mut self, name: Name, machine: Machine) {
        let name = name.into();
        debug!("defined `{}` with {} parts", name, machine.len());

        self.definitions.insert(name, machine);
    }

    ///
    /// Compiles an expression and gives it a name
    ///
    /// The expression can use any of the definitions made before this one. If it has several groups, they are matched in
    /// order.
    ///
    pub fn define_expression<Name: Into<String>>(&mut self, name: Name, expression: &str) -> Result<(), CompileError> {
        let machine = Expression::new(expression).build_machine(&ExpressionCompiler::new(self))?;
        self.define(name, machine);

        Ok(())
    }
}

impl FromIterator<(String, Machine)> for Definitions {
    fn from_iter<Iter: IntoIterator<Item=(String, Machine)>>(iter: Iter) -> Definitions {
        Definitions { definitions: iter.into_iter().collect() }
    }
}
