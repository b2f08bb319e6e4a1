// uturtle/src/lib.rs
//
// Copyright © 2019 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

#[macro_use]
extern crate lalrpop_util;

pub mod ast;

use lalrpop_util::ParseError;
use thiserror::Error;

lalrpop_mod!(pub turtle); // synthesized by LALRPOP

pub type Parser = turtle::TopLevelParser;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScriptError {
    #[error("{line}:{column}: invalid token")]
    InvalidToken { line: usize, column: usize },

    #[error("{line}:{column}: unexpected {token:?}, expected one of {}", .expected.join(", "))]
    UnexpectedToken {
        line: usize,
        column: usize,
        token: String,
        expected: Vec<String>,
    },

    #[error("unexpected end of script, expected one of {}", .expected.join(", "))]
    UnexpectedEof { expected: Vec<String> },

    #[error("{line}:{column}: extra token {token:?}")]
    ExtraToken {
        line: usize,
        column: usize,
        token: String,
    },

    #[error("{0}")]
    Custom(String),
}

/// Parses a whole script into its command list.
pub fn parse(source: &str) -> Result<ast::Turtle, ScriptError> {
    Parser::new().parse(source).map_err(|err| {
        let at = |offset: usize| locate(source, offset);
        match err {
            ParseError::InvalidToken { location } => {
                let (line, column) = at(location);
                ScriptError::InvalidToken { line, column }
            }
            ParseError::UnrecognizedEof { expected, .. } => ScriptError::UnexpectedEof { expected },
            ParseError::UnrecognizedToken {
                token: (start, token, _),
                expected,
            } => {
                let (line, column) = at(start);
                ScriptError::UnexpectedToken {
                    line,
                    column,
                    token: token.1.to_string(),
                    expected,
                }
            }
            ParseError::ExtraToken {
                token: (start, token, _),
            } => {
                let (line, column) = at(start);
                ScriptError::ExtraToken {
                    line,
                    column,
                    token: token.1.to_string(),
                }
            }
            ParseError::User { error } => ScriptError::Custom(error.to_string()),
        }
    })
}

// One-based line and column of a byte offset.
fn locate(source: &str, offset: usize) -> (usize, usize) {
    let before = &source[..offset.min(source.len())];
    let line = before.matches('\n').count() + 1;
    let column = before.rfind('\n').map_or(before.len(), |nl| before.len() - nl - 1) + 1;
    (line, column)
}
