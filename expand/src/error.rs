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

use thiserror::Error;

use super::lexer::LexerError;

/// A malformed template, with enough context to point at the offending byte.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub(crate) line: usize,
    pub(crate) column: usize,
    pub(crate) source_line: String,
    pub(crate) message: String,
}

impl SyntaxError {
    pub(crate) fn from_lexer_error(err: LexerError, template: &str) -> SyntaxError {
        let offset = err.pos().offset().min(template.len());
        let line_start = template[..offset].rfind('\n').map(|i| i + 1).unwrap_or(0);
        let line_end = template[offset..]
            .find('\n')
            .map(|i| offset + i)
            .unwrap_or_else(|| template.len());
        SyntaxError {
            line: template[..line_start].matches('\n').count() + 1,
            column: template[line_start..offset].chars().count() + 1,
            source_line: template[line_start..line_end].to_owned(),
            message: err.to_string(),
        }
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn column(&self) -> usize {
        self.column
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Display for SyntaxError {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "{line}:{column}: {msg}\n{source}\n{indent}^ near here",
            line = self.line,
            column = self.column,
            msg = self.message,
            source = self.source_line,
            indent = " ".repeat(self.column.saturating_sub(1)),
        )
    }
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DepfileMismatch {
    #[error("$(depfile) used without depfile property")]
    UsedWithoutFlag,
    #[error("specified depfile=true but did not include a reference to '${{depfile}}' in cmd")]
    FlaggedWithoutUse,
}

/// Coarse classification of a [`CompileError`], stable for callers that
/// dispatch on the failure rather than print it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Syntax,
    UnknownLabel,
    AmbiguousReference,
    UnknownVariable,
    MissingOutput,
    MissingTool,
    DepfileMismatch,
    UnresolvedDependency,
    NotATool,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CompileError {
    #[error("{0}")]
    Syntax(#[from] SyntaxError),
    #[error("unknown location label {0:?}")]
    UnknownLabel(String),
    #[error("$(location) is ambiguous: {count} {what} are declared, name one with $(location <label>)")]
    AmbiguousLocation { count: usize, what: &'static str },
    #[error("label {label:?} expands to {count} files, use $(locations {label})")]
    MultipleFiles { label: String, count: usize },
    #[error("label {0:?} has no files")]
    EmptyLabel(String),
    #[error("unknown variable '$({0})'")]
    UnknownVariable(String),
    #[error("must have at least one output file")]
    MissingOutput,
    #[error("at least one `tools` or `tool_files` is required if $(location) is used")]
    MissingTool,
    #[error("{0}")]
    DepfileMismatch(DepfileMismatch),
    #[error("unresolved dependency {0:?}")]
    UnresolvedDependency(String),
    #[error("{0:?} is not a host tool provider")]
    NotATool(String),
}

impl CompileError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CompileError::Syntax(_) => ErrorKind::Syntax,
            CompileError::UnknownLabel(_) => ErrorKind::UnknownLabel,
            CompileError::AmbiguousLocation { .. }
            | CompileError::MultipleFiles { .. }
            | CompileError::EmptyLabel(_) => ErrorKind::AmbiguousReference,
            CompileError::UnknownVariable(_) => ErrorKind::UnknownVariable,
            CompileError::MissingOutput => ErrorKind::MissingOutput,
            CompileError::MissingTool => ErrorKind::MissingTool,
            CompileError::DepfileMismatch(_) => ErrorKind::DepfileMismatch,
            CompileError::UnresolvedDependency(_) => ErrorKind::UnresolvedDependency,
            CompileError::NotATool(_) => ErrorKind::NotATool,
        }
    }
}
