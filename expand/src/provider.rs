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

use std::collections::HashMap;

/// What a label turned into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Something runnable on the host, e.g. a binary built by another rule.
    Tool(String),
    /// Zero or more files, in declaration order.
    FileSet(Vec<String>),
    NotFound,
}

/// Whatever owns the build graph implements this so the compiler can look at dependencies
/// without knowing how they were produced.
pub trait DependencyProvider {
    fn resolve(&self, label: &str) -> Resolution;
}

impl<P: DependencyProvider + ?Sized> DependencyProvider for &P {
    fn resolve(&self, label: &str) -> Resolution {
        (**self).resolve(label)
    }
}

/// A fixed table of labels. Good enough for tests and for the command line.
#[derive(Debug, Default, Clone)]
pub struct MapProvider {
    entries: HashMap<String, Resolution>,
}

impl MapProvider {
    pub fn new() -> MapProvider {
        Default::default()
    }

    pub fn add_tool<L: Into<String>, P: Into<String>>(&mut self, label: L, path: P) {
        self.entries
            .insert(label.into(), Resolution::Tool(path.into()));
    }

    pub fn add_files<L, I, P>(&mut self, label: L, paths: I)
    where
        L: Into<String>,
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        self.entries.insert(
            label.into(),
            Resolution::FileSet(paths.into_iter().map(Into::into).collect()),
        );
    }

    /// A plain source file that resolves to itself.
    pub fn add_file<P: Into<String>>(&mut self, path: P) {
        let path = path.into();
        self.entries
            .insert(path.clone(), Resolution::FileSet(vec![path]));
    }

    pub fn tool<L: Into<String>, P: Into<String>>(mut self, label: L, path: P) -> Self {
        self.add_tool(label, path);
        self
    }

    pub fn files<L, I, P>(mut self, label: L, paths: I) -> Self
    where
        L: Into<String>,
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        self.add_files(label, paths);
        self
    }

    pub fn file<P: Into<String>>(mut self, path: P) -> Self {
        self.add_file(path);
        self
    }
}

impl DependencyProvider for MapProvider {
    fn resolve(&self, label: &str) -> Resolution {
        self.entries
            .get(label)
            .cloned()
            .unwrap_or(Resolution::NotFound)
    }
}
