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

//! Splits a command template into literal runs, `$$` escapes and `$(...)` directives.

use std::fmt::{Display, Formatter};

use thiserror::Error;

/// Byte offset into the template. Only obtainable from a lexeme or an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pos(pub(crate) usize);

impl Pos {
    pub fn offset(self) -> usize {
        self.0
    }
}

/// Byte range of a directive, including the leading `$(` and trailing `)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectiveKind {
    BareLocation,
    Location,
    Locations,
    In,
    Out,
    Depfile,
    GenDir,
    Variable,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive<'a> {
    pub kind: DirectiveKind,
    /// The label for `location`/`locations`, the whole name for a variable.
    pub argument: Option<&'a str>,
    pub span: Span,
}

impl<'a> Directive<'a> {
    fn from_body(body: &'a str, span: Span) -> Result<Directive<'a>, LexerError> {
        let (header, argument) = match body.find(char::is_whitespace) {
            Some(idx) => (&body[..idx], Some(body[idx..].trim())),
            None => (body, None),
        };

        let (kind, argument) = match (header, argument) {
            ("location", None) => (DirectiveKind::BareLocation, None),
            ("location", Some(label)) => (DirectiveKind::Location, Some(label)),
            ("locations", Some(label)) => (DirectiveKind::Locations, Some(label)),
            ("locations", None) => return Err(LexerError::MissingLabel(Pos(span.start))),
            ("in", None) => (DirectiveKind::In, None),
            ("out", None) => (DirectiveKind::Out, None),
            ("depfile", None) => (DirectiveKind::Depfile, None),
            ("genDir", None) => (DirectiveKind::GenDir, None),
            _ => (DirectiveKind::Variable, Some(body)),
        };
        Ok(Directive {
            kind,
            argument,
            span,
        })
    }
}

impl<'a> Display for Directive<'a> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match (self.kind, self.argument) {
            (DirectiveKind::BareLocation, _) => write!(f, "$(location)"),
            (DirectiveKind::Location, Some(label)) => write!(f, "$(location {})", label),
            (DirectiveKind::Locations, Some(label)) => write!(f, "$(locations {})", label),
            (DirectiveKind::In, _) => write!(f, "$(in)"),
            (DirectiveKind::Out, _) => write!(f, "$(out)"),
            (DirectiveKind::Depfile, _) => write!(f, "$(depfile)"),
            (DirectiveKind::GenDir, _) => write!(f, "$(genDir)"),
            (DirectiveKind::Variable, Some(name)) => write!(f, "$({})", name),
            (kind, None) => write!(f, "$({:?})", kind),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lexeme<'a> {
    Literal(&'a str),
    /// `$$`, kept as-is for the executor.
    Escape,
    Directive(Directive<'a>),
}

impl<'a> Display for Lexeme<'a> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            Lexeme::Literal(text) => write!(f, "literal {:?}", text),
            Lexeme::Escape => write!(f, "escape $$"),
            Lexeme::Directive(directive) => write!(f, "directive {}", directive),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LexerError {
    #[error("expected character after '$'")]
    UnexpectedEof(Pos),
    #[error("missing )")]
    MissingParen(Pos),
    #[error("unexpected character {1:?} after '$'")]
    UnexpectedCharacter(Pos, char),
    #[error("expected '(' after '$', did you mean $({1})?")]
    MissingOpenParen(Pos, String),
    #[error("empty directive")]
    EmptyDirective(Pos),
    #[error("$(locations) requires a label")]
    MissingLabel(Pos),
}

impl LexerError {
    pub fn pos(&self) -> Pos {
        match *self {
            LexerError::UnexpectedEof(pos)
            | LexerError::MissingParen(pos)
            | LexerError::UnexpectedCharacter(pos, _)
            | LexerError::MissingOpenParen(pos, _)
            | LexerError::EmptyDirective(pos)
            | LexerError::MissingLabel(pos) => pos,
        }
    }
}

pub type LexerItem<'a> = Result<(Lexeme<'a>, Pos), LexerError>;

pub struct Lexer<'a> {
    data: &'a str,
    offset: usize,
    // Set after the first error so iteration stops there.
    failed: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(data: &'a str) -> Lexer<'a> {
        Lexer {
            data,
            offset: 0,
            failed: false,
        }
    }

    fn done(&self) -> bool {
        self.failed || self.offset >= self.data.len()
    }

    fn read_literal(&mut self) -> Lexeme<'a> {
        let start = self.offset;
        let end = self.data[start..]
            .find('$')
            .map(|idx| start + idx)
            .unwrap_or_else(|| self.data.len());
        self.offset = end;
        Lexeme::Literal(&self.data[start..end])
    }

    // self.offset points at the '$'.
    fn read_dollar(&mut self) -> Result<Lexeme<'a>, LexerError> {
        let start = self.offset;
        let rest = &self.data[start + 1..];
        let next = match rest.chars().next() {
            Some(c) => c,
            None => return Err(LexerError::UnexpectedEof(Pos(start))),
        };

        match next {
            '$' => {
                self.offset = start + 2;
                Ok(Lexeme::Escape)
            }
            '(' => {
                let close = match rest.find(')') {
                    Some(idx) => start + 1 + idx,
                    None => return Err(LexerError::MissingParen(Pos(start))),
                };
                let body = self.data[start + 2..close].trim();
                if body.is_empty() {
                    return Err(LexerError::EmptyDirective(Pos(start)));
                }
                self.offset = close + 1;
                let span = Span {
                    start,
                    end: self.offset,
                };
                Directive::from_body(body, span).map(Lexeme::Directive)
            }
            c if c.is_whitespace() => Err(LexerError::UnexpectedCharacter(Pos(start + 1), c)),
            _ => {
                let name = match rest.find(char::is_whitespace) {
                    Some(idx) => &rest[..idx],
                    None => rest,
                };
                Err(LexerError::MissingOpenParen(Pos(start), name.to_owned()))
            }
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = LexerItem<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done() {
            return None;
        }

        let pos = Pos(self.offset);
        if self.data[self.offset..].starts_with('$') {
            match self.read_dollar() {
                Ok(lexeme) => Some(Ok((lexeme, pos))),
                Err(e) => {
                    self.failed = true;
                    Some(Err(e))
                }
            }
        } else {
            Some(Ok((self.read_literal(), pos)))
        }
    }
}
