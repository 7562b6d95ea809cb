//! Error adapter for converting NotegraphError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI. JSON decoding
//! errors only report a line and column; the adapter turns that position into
//! a labelled span over the payload source.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceSpan};

use notegraph::NotegraphError;

const PAYLOAD_HELP: &str = "expected a diagram object, an array of diagrams, \
or an object with a `graphDiagrams` array";

/// Adapter for a JSON decoding error.
///
/// This adapter wraps a [`serde_json::Error`] and the payload it was raised
/// on, and implements [`MietteDiagnostic`] to point at the failing location.
pub struct ParseAdapter<'a> {
    err: &'a serde_json::Error,
    src: &'a str,
    offset: usize,
}

impl<'a> ParseAdapter<'a> {
    /// Create a new parse adapter.
    pub fn new(err: &'a serde_json::Error, src: &'a str) -> Self {
        Self {
            err,
            src,
            offset: line_column_to_offset(src, err.line(), err.column()),
        }
    }

    /// Byte offset into the source the error points at.
    pub fn offset(&self) -> usize {
        self.offset
    }
}

impl fmt::Debug for ParseAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParseAdapter")
            .field("err", &self.err)
            .field("offset", &self.offset)
            .finish()
    }
}

impl fmt::Display for ParseAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The span already shows where; keep only what went wrong.
        let message = self.err.to_string();
        let message = match message.rfind(" at line ") {
            Some(cut) => &message[..cut],
            None => &message,
        };
        f.write_str(message)
    }
}

impl std::error::Error for ParseAdapter<'_> {}

impl MietteDiagnostic for ParseAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = if self.err.is_syntax() {
            "notegraph::parse::syntax"
        } else if self.err.is_eof() {
            "notegraph::parse::eof"
        } else if self.err.is_data() {
            "notegraph::parse::data"
        } else {
            "notegraph::parse::io"
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        if self.err.is_data() {
            Some(Box::new(PAYLOAD_HELP))
        } else {
            None
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        if self.err.line() == 0 {
            return None;
        }

        let span = SourceSpan::new(self.offset.into(), 0);
        Some(Box::new(std::iter::once(
            LabeledSpan::new_primary_with_span(Some("here".to_string()), span),
        )))
    }
}

/// Adapter for non-diagnostic [`NotegraphError`] variants.
///
/// This adapter handles errors that don't have source information, such as
/// I/O errors, configuration errors and export errors.
pub struct ErrorAdapter<'a>(pub &'a NotegraphError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            NotegraphError::Io(_) => "notegraph::io",
            NotegraphError::Parse { .. } => return None,
            NotegraphError::Config(_) => "notegraph::config",
            NotegraphError::Export(_) => "notegraph::export",
        };
        Some(Box::new(code))
    }
}

/// A reportable error that can be rendered by miette.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A decoding error with source location information.
    Parse(ParseAdapter<'a>),
    /// A simple error without source location.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Parse(p) => fmt::Display::fmt(p, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Parse(_) => None,
            Reportable::Error(e) => e.source(),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Parse(p) => p.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Parse(p) => p.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Parse(p) => p.source_code(),
            Reportable::Error(e) => e.source_code(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Parse(p) => p.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

/// Convert a one-based line and column into a byte offset into `src`.
///
/// Line zero means the error has no position and maps to the start.
/// Columns past the end of the line stop at the line end.
fn line_column_to_offset(src: &str, line: usize, column: usize) -> usize {
    if line == 0 {
        return 0;
    }

    let line_start: usize = src.split_inclusive('\n').take(line - 1).map(str::len).sum();
    let rest = &src[line_start..];
    let line_len = rest.find('\n').unwrap_or(rest.len());

    let mut offset = line_start + column.saturating_sub(1).min(line_len);
    while !src.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}

/// Convert a [`NotegraphError`] into a list of reportable errors.
pub fn to_reportables(err: &NotegraphError) -> Vec<Reportable<'_>> {
    match err {
        NotegraphError::Parse { err: json_err, src } => {
            vec![Reportable::Parse(ParseAdapter::new(json_err, src))]
        }
        _ => vec![Reportable::Error(ErrorAdapter(err))],
    }
}
