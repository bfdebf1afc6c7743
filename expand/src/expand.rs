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
    borrow::Cow,
    fmt::{Display, Formatter},
};

use tracing::trace;

use super::{
    env::Variables,
    error::{CompileError, SyntaxError},
    lexer::{Directive, DirectiveKind, Lexeme, Lexer},
    resolve::Dependencies,
    sandbox::SandboxToken,
};

/// The template with every directive replaced, before quoting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expansion {
    text: String,
    referenced_depfile: bool,
}

impl Expansion {
    pub(crate) fn new(text: String, referenced_depfile: bool) -> Expansion {
        Expansion {
            text,
            referenced_depfile,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn referenced_depfile(&self) -> bool {
        self.referenced_depfile
    }
}

/// A fully resolved command, already quoted as one shell word.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CompiledCommand(String);

impl CompiledCommand {
    pub(crate) fn quote(expansion: &Expansion) -> CompiledCommand {
        CompiledCommand(shell_quote(&expansion.text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl Display for CompiledCommand {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CompiledCommand {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Wraps `text` in single quotes. Embedded single quotes close the literal, add an escaped
/// quote and reopen it.
pub fn shell_quote(text: &str) -> String {
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('\'');
    quoted.push_str(&text.replace('\'', r"'\''"));
    quoted.push('\'');
    quoted
}

fn replacement<'d>(
    directive: &Directive,
    deps: &'d Dependencies,
    variables: &'d Variables,
) -> Result<Cow<'d, str>, CompileError> {
    // The lexer always sets an argument for these kinds.
    let argument = directive.argument.unwrap_or_default();
    let text = match directive.kind {
        DirectiveKind::BareLocation => Cow::Borrowed(deps.bare_location()?),
        DirectiveKind::Location => Cow::Borrowed(deps.location(argument)?),
        DirectiveKind::Locations => Cow::Owned(deps.locations(argument)?),
        DirectiveKind::In => Cow::Borrowed(SandboxToken::In.as_str()),
        DirectiveKind::Out => Cow::Borrowed(SandboxToken::OutFiles.as_str()),
        DirectiveKind::Depfile => Cow::Borrowed(SandboxToken::Depfile.as_str()),
        DirectiveKind::GenDir => Cow::Borrowed(SandboxToken::OutDir.as_str()),
        DirectiveKind::Variable => match variables.lookup(argument) {
            Some(value) => Cow::Borrowed(value),
            None => return Err(CompileError::UnknownVariable(argument.to_owned())),
        },
    };
    Ok(text)
}

/// Replaces every directive in `template`, in order. Stops at the first error.
pub fn substitute(
    template: &str,
    deps: &Dependencies,
    variables: &Variables,
) -> Result<Expansion, CompileError> {
    let mut text = String::with_capacity(template.len());
    let mut referenced_depfile = false;

    for item in Lexer::new(template) {
        let (lexeme, _pos) =
            item.map_err(|lex_err| SyntaxError::from_lexer_error(lex_err, template))?;
        match lexeme {
            Lexeme::Literal(literal) => text.push_str(literal),
            Lexeme::Escape => text.push_str("$$"),
            Lexeme::Directive(directive) => {
                let value = replacement(&directive, deps, variables)?;
                trace!(directive = %directive, value = %value, "substituted");
                if directive.kind == DirectiveKind::Depfile {
                    referenced_depfile = true;
                }
                text.push_str(&value);
            }
        }
    }

    Ok(Expansion::new(text, referenced_depfile))
}
