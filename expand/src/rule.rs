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

use std::fmt::{Display, Formatter};

/// A symbolic label naming a dependency. What it points at is up to the
/// [`DependencyProvider`](crate::DependencyProvider).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Reference(String);

impl Reference {
    pub fn label(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Reference {
    fn from(label: &str) -> Self {
        Reference(label.to_owned())
    }
}

impl From<String> for Reference {
    fn from(label: String) -> Self {
        Reference(label)
    }
}

impl Display for Reference {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One genrule: what it produces, what it reads and the command template that does it.
///
/// Built once with the consuming setters and not modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleDefinition {
    pub(crate) name: String,
    pub(crate) outputs: Vec<String>,
    pub(crate) sources: Vec<Reference>,
    pub(crate) tools: Vec<Reference>,
    pub(crate) tool_files: Vec<Reference>,
    pub(crate) command: String,
    pub(crate) depfile: bool,
}

impl RuleDefinition {
    pub fn new<N: Into<String>, C: Into<String>>(name: N, command: C) -> RuleDefinition {
        RuleDefinition {
            name: name.into(),
            outputs: Vec::new(),
            sources: Vec::new(),
            tools: Vec::new(),
            tool_files: Vec::new(),
            command: command.into(),
            depfile: false,
        }
    }

    pub fn output<S: Into<String>>(mut self, output: S) -> Self {
        self.outputs.push(output.into());
        self
    }

    pub fn outputs<I, S>(self, outputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        outputs.into_iter().fold(self, |rule, out| rule.output(out))
    }

    pub fn source<R: Into<Reference>>(mut self, source: R) -> Self {
        self.sources.push(source.into());
        self
    }

    pub fn tool<R: Into<Reference>>(mut self, tool: R) -> Self {
        self.tools.push(tool.into());
        self
    }

    pub fn tool_file<R: Into<Reference>>(mut self, tool_file: R) -> Self {
        self.tool_files.push(tool_file.into());
        self
    }

    pub fn depfile(mut self, depfile: bool) -> Self {
        self.depfile = depfile;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn declared_outputs(&self) -> &[String] {
        &self.outputs
    }

    pub fn sources(&self) -> &[Reference] {
        &self.sources
    }

    pub fn tools(&self) -> &[Reference] {
        &self.tools
    }

    pub fn tool_files(&self) -> &[Reference] {
        &self.tool_files
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn has_depfile(&self) -> bool {
        self.depfile
    }
}
