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

/// Caller-supplied `$(name)` bindings. Values are inserted verbatim.
#[derive(Debug, Default, Clone)]
pub struct Variables {
    bindings: HashMap<String, String>,
}

impl Variables {
    pub fn new() -> Variables {
        Default::default()
    }

    pub fn add_binding<N: Into<String>, V: Into<String>>(&mut self, name: N, value: V) {
        self.bindings.insert(name.into(), value.into());
    }

    pub fn with_binding<N: Into<String>, V: Into<String>>(mut self, name: N, value: V) -> Self {
        self.add_binding(name, value);
        self
    }

    pub fn lookup(&self, name: &str) -> Option<&str> {
        self.bindings.get(name).map(String::as_str)
    }
}

impl<N: Into<String>, V: Into<String>> std::iter::FromIterator<(N, V)> for Variables {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut env = Variables::new();
        for (name, value) in iter {
            env.add_binding(name, value);
        }
        env
    }
}
