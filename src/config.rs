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
//! # Options
//!
//! Options controlling how machines are built. Both option structures can be deserialized (missing fields take their
//! default values) so that they can be read from whatever configuration format the caller is using.
//!

use serde_derive::{Serialize, Deserialize};

///
/// Options for subset construction
///
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DeterminizeOptions {
    ///
    /// If true, the result is a total function: every part has a transition for every symbol in the alphabet, with
    /// symbols that would otherwise have nowhere to go leading to a non-accepting 'stuck' part
    ///
    pub total: bool
}

///
/// Options used by the expression compiler when building top-level machines
///
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilerOptions {
    /// Minimize every top-level machine once it is compiled
    pub minimize: bool,

    /// Determinize every top-level machine once it is compiled (it is minimized afterwards)
    pub determinize: bool,

    /// Allow transition coalescing to switch large guards to exclusion form
    pub allow_exclusion: bool,

    /// Produce total-function machines when determinizing
    pub total: bool
}

impl Default for CompilerOptions {
    fn default() -> CompilerOptions {
        CompilerOptions {
            minimize:           true,
            determinize:        false,
            allow_exclusion:    true,
            total:              false
        }
    }
}

impl CompilerOptions {
    ///
    /// The determinization options these compiler options imply
    ///
    pub fn determinize_options(&self) -> DeterminizeOptions {
        DeterminizeOptions { total: self.total }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn default_options_minimize_only() {
        let options = CompilerOptions::default();

        assert!(options.minimize);
        assert!(!options.determinize);
        assert!(options.allow_exclusion);
        assert!(!options.determinize_options().total);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let options: CompilerOptions = serde_json::from_str(r#"{ "determinize": true }"#).unwrap();

        assert!(options.determinize);
        assert!(options.minimize);
        assert!(options.allow_exclusion);
    }

    #[test]
    fn can_read_total_option() {
        let options: CompilerOptions = serde_json::from_str(r#"{ "total": true, "allow_exclusion": false }"#).unwrap();

        assert!(options.determinize_options() == DeterminizeOptions { total: true });
        assert!(!options.allow_exclusion);
    }
}
