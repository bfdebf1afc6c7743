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

//! Placeholders the sandbox rewrites into real paths at execution time. These strings are a wire
//! contract with the executor and must never change.

use std::fmt::{Display, Formatter};

pub const IN: &str = "${in}";
pub const OUT_FILES: &str = "__SBOX_OUT_FILES__";
pub const OUT_DIR: &str = "__SBOX_OUT_DIR__";
pub const DEPFILE: &str = "__SBOX_DEPFILE__";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SandboxToken {
    In,
    OutFiles,
    OutDir,
    Depfile,
}

impl SandboxToken {
    pub const ALL: [SandboxToken; 4] = [
        SandboxToken::In,
        SandboxToken::OutFiles,
        SandboxToken::OutDir,
        SandboxToken::Depfile,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SandboxToken::In => IN,
            SandboxToken::OutFiles => OUT_FILES,
            SandboxToken::OutDir => OUT_DIR,
            SandboxToken::Depfile => DEPFILE,
        }
    }
}

impl Display for SandboxToken {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
