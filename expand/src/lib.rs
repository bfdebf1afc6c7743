/*
 * Copyright 2020 Nikhil Marathe <nsm.nikhil@gmail.com>
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at
 *
 *     http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the License for the specific language governing permissions and
 * limitations under the License.
 */

//! Compiles the `cmd` of a genrule into a command the sandbox can run.
//!
//! ```
//! use genrule_expand::{compile, MapProvider, RuleDefinition};
//!
//! let provider = MapProvider::new().tool("tool", "out/tool");
//! let rule = RuleDefinition::new("gen", "$(location) > $(out)")
//!     .output("out")
//!     .tool("tool");
//! let command = compile(&rule, &provider).unwrap();
//! assert_eq!(command.as_str(), "'out/tool > __SBOX_OUT_FILES__'");
//! ```

use tracing::debug;

pub mod env;
pub mod error;
pub mod expand;
pub mod lexer;
pub mod provider;
pub mod resolve;
pub mod rule;
pub mod sandbox;
pub mod validate;


pub use env::Variables;
pub use error::{CompileError, DepfileMismatch, ErrorKind, SyntaxError};
pub use expand::CompiledCommand;
pub use provider::{DependencyProvider, MapProvider, Resolution};
pub use resolve::Dependencies;
pub use rule::{Reference, RuleDefinition};
pub use sandbox::SandboxToken;

/// Compiles `rule` with no caller variables.
pub fn compile(
    rule: &RuleDefinition,
    provider: &dyn DependencyProvider,
) -> Result<CompiledCommand, CompileError> {
    compile_with_variables(rule, provider, &Variables::default())
}

pub fn compile_with_variables(
    rule: &RuleDefinition,
    provider: &dyn DependencyProvider,
    variables: &Variables,
) -> Result<CompiledCommand, CompileError> {
    debug!(rule = rule.name(), "compiling");
    validate::check_outputs(rule)?;
    let deps = Dependencies::collect(rule, provider)?;
    let expansion = expand::substitute(rule.command(), &deps, variables)?;
    validate::check_depfile(rule, &expansion)?;
    Ok(CompiledCommand::quote(&expansion))
}
