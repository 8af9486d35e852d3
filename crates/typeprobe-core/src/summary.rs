//! Declaration file summary.
//!
//! Parses `.d.ts` text with the SWC TypeScript parser in declaration mode and
//! reports how many top-level statements the module holds.

use crate::error::ParseError;
use serde::Serialize;
use std::path::{Path, PathBuf};
use swc_common::{sync::Lrc, FileName, SourceMap, Spanned};
use swc_ecma_ast::EsVersion;
use swc_ecma_parser::{lexer::Lexer, Parser, StringInput, Syntax, TsSyntax};

/// Structural summary of a parsed declaration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseSummary {
    /// Number of top-level statements.
    pub statements: usize,
    /// Path of the summarized file.
    pub file_name: PathBuf,
}

/// Summarize declaration text.
///
/// # Errors
/// Returns a [`ParseError`] if the text is not a parseable declaration file.
pub fn summarize(
    source: &str,
    file_name: impl Into<PathBuf>,
) -> Result<ParseSummary, ParseError> {
    let file_name = file_name.into();
    let statements = count_top_level_statements(source, &file_name)?;
    Ok(ParseSummary {
        statements,
        file_name,
    })
}

/// Count top-level statements in TypeScript declaration source.
///
/// Empty statements (a lone `;`) are counted. Recoverable syntax errors are
/// tolerated; only errors that stop the parser fail the count.
///
/// # Errors
/// Returns a [`ParseError`] carrying the line and message of the fatal error.
pub fn count_top_level_statements(source: &str, file_name: &Path) -> Result<usize, ParseError> {
    let cm: Lrc<SourceMap> = Lrc::default();
    let fm = cm.new_source_file(
        Lrc::new(FileName::Real(file_name.to_path_buf())),
        source.to_string(),
    );

    let syntax = Syntax::Typescript(TsSyntax {
        dts: true,
        decorators: true,
        ..Default::default()
    });
    let lexer = Lexer::new(syntax, EsVersion::EsNext, StringInput::from(&*fm), None);
    let mut parser = Parser::new_from(lexer);

    let module = parser.parse_module().map_err(|e| ParseError {
        path: file_name.to_path_buf(),
        line: cm.lookup_char_pos(e.span().lo).line,
        message: e.kind().msg().into_owned(),
    })?;

    Ok(module.body.len())
}
