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

use std::{
    collections::{hash_map::Entry, HashMap},
    fmt::{Display, Formatter},
};

use tracing::trace;

use super::{
    error::CompileError,
    provider::{DependencyProvider, Resolution},
    rule::{Reference, RuleDefinition},
};

#[derive(Debug)]
struct Tool {
    label: String,
    path: String,
}

/// A rule's dependencies, resolved once up front so directive lookups never go back to the
/// provider.
#[derive(Debug)]
pub struct Dependencies {
    tools: Vec<Tool>,
    // Expanded, in declaration order.
    tool_files: Vec<String>,
    sources: Vec<String>,
    // Every label a `$(location)` may name: tool labels, reference labels and each expanded
    // path.
    locations: HashMap<String, Vec<String>>,
}

fn space_separated(paths: &[String]) -> String {
    paths.join(" ")
}

fn expand_files(
    provider: &dyn DependencyProvider,
    reference: &Reference,
) -> Result<Vec<String>, CompileError> {
    match provider.resolve(reference.label()) {
        Resolution::FileSet(paths) => Ok(paths),
        // A tool used as a file is just its output.
        Resolution::Tool(path) => Ok(vec![path]),
        Resolution::NotFound => Err(CompileError::UnresolvedDependency(
            reference.label().to_owned(),
        )),
    }
}

impl Dependencies {
    pub fn collect(
        rule: &RuleDefinition,
        provider: &dyn DependencyProvider,
    ) -> Result<Dependencies, CompileError> {
        let mut deps = Dependencies {
            tools: Vec::with_capacity(rule.tools().len()),
            tool_files: Vec::new(),
            sources: Vec::new(),
            locations: HashMap::new(),
        };

        for reference in rule.tools() {
            let label = reference.label();
            match provider.resolve(label) {
                Resolution::Tool(path) => {
                    deps.add_location(label, vec![path.clone()]);
                    deps.tools.push(Tool {
                        label: label.to_owned(),
                        path,
                    });
                }
                Resolution::FileSet(_) => return Err(CompileError::NotATool(label.to_owned())),
                Resolution::NotFound => {
                    return Err(CompileError::UnresolvedDependency(label.to_owned()))
                }
            }
        }

        for reference in rule.tool_files() {
            let paths = expand_files(provider, reference)?;
            deps.add_file_locations(reference.label(), &paths);
            // Bare `$(location)` counts distinct paths.
            for path in paths {
                if !deps.tool_files.contains(&path) {
                    deps.tool_files.push(path);
                }
            }
        }

        for reference in rule.sources() {
            let paths = expand_files(provider, reference)?;
            deps.add_file_locations(reference.label(), &paths);
            deps.sources.extend(paths);
        }

        trace!(
            tools = deps.tools.len(),
            tool_files = deps.tool_files.len(),
            sources = deps.sources.len(),
            "collected dependencies"
        );
        Ok(deps)
    }

    // First declaration of a label wins, so tools shadow files of the same name.
    fn add_location(&mut self, label: &str, paths: Vec<String>) {
        if let Entry::Vacant(e) = self.locations.entry(label.to_owned()) {
            e.insert(paths);
        }
    }

    fn add_file_locations(&mut self, label: &str, paths: &[String]) {
        self.add_location(label, paths.to_vec());
        for path in paths {
            self.add_location(path, vec![path.clone()]);
        }
    }

    fn lookup(&self, label: &str) -> Result<&[String], CompileError> {
        match self.locations.get(label) {
            Some(paths) if paths.is_empty() => Err(CompileError::EmptyLabel(label.to_owned())),
            Some(paths) => Ok(paths),
            None => Err(CompileError::UnknownLabel(label.to_owned())),
        }
    }

    /// `$(location)`: the one tool, or failing that the one tool file.
    pub fn bare_location(&self) -> Result<&str, CompileError> {
        match self.tools.as_slice() {
            [tool] => return Ok(&tool.path),
            [] => {}
            tools => {
                return Err(CompileError::AmbiguousLocation {
                    count: tools.len(),
                    what: "tools",
                })
            }
        }
        match self.tool_files.as_slice() {
            [path] => Ok(path),
            [] => Err(CompileError::MissingTool),
            files => Err(CompileError::AmbiguousLocation {
                count: files.len(),
                what: "tool files",
            }),
        }
    }

    /// `$(location label)`: the label must name exactly one path.
    pub fn location(&self, label: &str) -> Result<&str, CompileError> {
        match self.lookup(label)? {
            [path] => Ok(path),
            paths => Err(CompileError::MultipleFiles {
                label: label.to_owned(),
                count: paths.len(),
            }),
        }
    }

    /// `$(locations label)`: every path the label names, space separated.
    pub fn locations(&self, label: &str) -> Result<String, CompileError> {
        self.lookup(label).map(space_separated)
    }

    pub fn tool_files(&self) -> &[String] {
        &self.tool_files
    }

    pub fn sources(&self) -> &[String] {
        &self.sources
    }
}

impl Display for Dependencies {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for tool in &self.tools {
            writeln!(f, "tool {} -> {}", tool.label, tool.path)?;
        }
        for path in &self.tool_files {
            writeln!(f, "tool_file {}", path)?;
        }
        for path in &self.sources {
            writeln!(f, "src {}", path)?;
        }
        Ok(())
    }
}
