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
//! Renders machines in Graphviz's dot format, for looking at while debugging.
//!

use std::io;
use std::io::Write;

use super::machine::*;
use super::symbol_set::*;
use super::symbol_range::*;
use super::state_machine::*;

///
/// Describes a set of symbols as a list of ranges, eg `'a'..'d', 'm'..'r', 'z'`
///
pub fn stringify_alphabet(symbols: &SymbolSet) -> String {
    let ranges: Vec<String> = SymbolRange::from_set(symbols).into_iter()
        .map(|range| if range.lowest == range.highest {
            format!("'{}'", escape_symbol(range.lowest))
        } else {
            format!("'{}'..'{}'", escape_symbol(range.lowest), escape_symbol(range.highest))
        })
        .collect();

    ranges.join(", ")
}

///
/// Writes a symbol so that it is readable inside single quotes
///
pub fn escape_symbol(symbol: u8) -> String {
    match symbol {
        b'\n'                           => "\\n".to_string(),
        b'\r'                           => "\\r".to_string(),
        b'"'                            => "\\\"".to_string(),
        b'\''                           => "\\'".to_string(),
        b'\\'                           => "\\\\".to_string(),
        symbol if symbol < 0x20 || symbol > 0x7e  => format!("\\x{:02x}", symbol),
        symbol                          => (symbol as char).to_string()
    }
}

///
/// Escapes text for use in a quoted dot string
///
fn dot_string(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

impl Machine {
    ///
    /// Writes this machine as a dot graph
    ///
    pub fn dot_write<W: Write>(&self, name: &str, f: &mut W) -> io::Result<()> {
        write!(f, "digraph \"{}\" {{\n", dot_string(name))?;
        write!(f, "\trankdir=LR;\n")?;

        for part in 0..self.len() {
            let shape = if self.is_accepting(part) { "doublecircle" } else { "circle" };
            write!(f, "\t{} [ shape={} ];\n", part, shape)?;

            if self.is_starting(part) {
                write!(f, "\tstart_{} [ shape=point ];\n", part)?;
                write!(f, "\tstart_{} -> {};\n", part, part)?;
            }
        }

        for part in 0..self.len() {
            for transition in self.transitions_for_part(part) {
                let label = dot_string(&transition.guard.to_string());
                write!(f, "\t{} -> {} [ label=\"{}\" ];\n", part, transition.target, label)?;
            }
        }

        write!(f, "}}\n")
    }

    ///
    /// Renders this machine as a dot graph
    ///
    pub fn to_dot(&self, name: &str) -> String {
        let mut dot = vec![];

        // Writing to a vec can't fail
        let _ = self.dot_write(name, &mut dot);

        String::from_utf8_lossy(&dot).into_owned()
    }
}
