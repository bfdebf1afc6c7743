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

use super::{
    error::{CompileError, DepfileMismatch},
    expand::Expansion,
    rule::RuleDefinition,
    sandbox,
};

/// Checked before anything is resolved.
pub fn check_outputs(rule: &RuleDefinition) -> Result<(), CompileError> {
    if rule.declared_outputs().is_empty() {
        return Err(CompileError::MissingOutput);
    }
    Ok(())
}

/// The depfile flag and `$(depfile)` must agree. Without the flag the placeholder may not appear
/// in the text at all, even when it came from a variable or a literal.
pub fn check_depfile(rule: &RuleDefinition, expansion: &Expansion) -> Result<(), CompileError> {
    let has_token = expansion.referenced_depfile() || expansion.text().contains(sandbox::DEPFILE);
    match (rule.has_depfile(), expansion.referenced_depfile()) {
        (false, _) if has_token => Err(CompileError::DepfileMismatch(
            DepfileMismatch::UsedWithoutFlag,
        )),
        (true, false) => Err(CompileError::DepfileMismatch(
            DepfileMismatch::FlaggedWithoutUse,
        )),
        _ => Ok(()),
    }
}
