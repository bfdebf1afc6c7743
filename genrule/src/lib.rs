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

use anyhow::{self, Context};
use thiserror::Error;
use tracing::{debug, info};

use genrule_expand::{
    compile_with_variables, lexer::Lexer, CompiledCommand, Dependencies, DependencyProvider,
    MapProvider, Resolution, RuleDefinition, Variables,
};

/// What to dump to stderr besides the compiled command.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum DebugMode {
    Directives,
    Deps,
}

#[derive(Error, Debug)]
#[error("Unknown debug setting '{0}'")]
pub struct DebugModeError(String);

impl std::str::FromStr for DebugMode {
    type Err = DebugModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "directives" => Ok(DebugMode::Directives),
            "deps" => Ok(DebugMode::Deps),
            e @ _ => Err(DebugModeError(e.to_owned())),
        }
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("expected NAME=VALUE, got '{0}'")]
pub struct BindingError(String);

/// Splits `name=value` on the first `=`. The name may not be empty.
pub fn parse_binding(s: &str) -> Result<(String, String), BindingError> {
    match s.find('=') {
        Some(idx) if idx > 0 => Ok((s[..idx].to_owned(), s[idx + 1..].to_owned())),
        _ => Err(BindingError(s.to_owned())),
    }
}

/// `label=path[,path...]`.
pub fn parse_file_group(s: &str) -> Result<(String, Vec<String>), BindingError> {
    let (label, paths) = parse_binding(s)?;
    let paths = paths
        .split(',')
        .filter(|p| !p.is_empty())
        .map(str::to_owned)
        .collect();
    Ok((label, paths))
}

#[derive(Debug, Default)]
pub struct Config {
    pub name: String,
    pub command: String,
    pub outputs: Vec<String>,
    pub sources: Vec<String>,
    pub tools: Vec<String>,
    pub tool_files: Vec<String>,
    pub depfile: bool,
    pub variables: Vec<(String, String)>,
    pub provided_tools: Vec<(String, String)>,
    pub provided_files: Vec<(String, Vec<String>)>,
    pub debug_modes: Vec<DebugMode>,
}

/// Looks labels up in the table from the command line. Anything else that is not a module
/// reference (`:name`) is taken to be a file in the source tree.
struct SourceTreeProvider {
    table: MapProvider,
}

impl DependencyProvider for SourceTreeProvider {
    fn resolve(&self, label: &str) -> Resolution {
        match self.table.resolve(label) {
            Resolution::NotFound if !label.starts_with(':') => {
                Resolution::FileSet(vec![label.to_owned()])
            }
            resolution => resolution,
        }
    }
}

impl Config {
    fn rule(&self) -> RuleDefinition {
        let rule = RuleDefinition::new(self.name.as_str(), self.command.as_str())
            .outputs(self.outputs.iter().map(String::as_str))
            .depfile(self.depfile);
        let rule = self
            .sources
            .iter()
            .fold(rule, |rule, src| rule.source(src.as_str()));
        let rule = self
            .tools
            .iter()
            .fold(rule, |rule, tool| rule.tool(tool.as_str()));
        self.tool_files
            .iter()
            .fold(rule, |rule, file| rule.tool_file(file.as_str()))
    }

    fn provider(&self) -> SourceTreeProvider {
        let mut table = MapProvider::new();
        for (label, path) in &self.provided_tools {
            table.add_tool(label.as_str(), path.as_str());
        }
        for (label, paths) in &self.provided_files {
            table.add_files(label.as_str(), paths.iter().map(String::as_str));
        }
        SourceTreeProvider { table }
    }

    fn variables(&self) -> Variables {
        self.variables
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
            .collect()
    }
}

fn dump_directives(command: &str) {
    for item in Lexer::new(command) {
        match item {
            Ok((lexeme, pos)) => eprintln!("{:>4} {}", pos.offset(), lexeme),
            Err(e) => {
                eprintln!("{:>4} error: {}", e.pos().offset(), e);
                break;
            }
        }
    }
}

pub fn compile_config(config: &Config) -> anyhow::Result<CompiledCommand> {
    let rule = config.rule();
    let provider = config.provider();

    for mode in &config.debug_modes {
        match mode {
            DebugMode::Directives => dump_directives(rule.command()),
            DebugMode::Deps => match Dependencies::collect(&rule, &provider) {
                Ok(deps) => eprint!("{}", deps),
                Err(e) => eprintln!("error: {}", e),
            },
        }
    }

    debug!(
        outputs = config.outputs.len(),
        variables = config.variables.len(),
        "compiling from command line"
    );
    let compiled = compile_with_variables(&rule, &provider, &config.variables())
        .with_context(|| format!("compiling rule '{}'", rule.name()))?;
    info!(rule = rule.name(), "compiled");
    Ok(compiled)
}

pub fn run(config: Config) -> anyhow::Result<()> {
    let compiled = compile_config(&config)?;
    println!("{}", compiled);
    Ok(())
}
