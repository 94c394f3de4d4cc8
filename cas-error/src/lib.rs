//! Contains the common [`ErrorKind`] trait used by all errors to display user-facing error
//! messages.
//!
//! Errors produced while parsing or converting an expression carry the spans of the source text
//! they originated from. They can be turned into an [`ariadne`] report for rich terminal output,
//! or into a plain string for log lines.

use ariadne::{Color, Report, Source};
use std::{fmt::{self, Debug, Display}, ops::Range};

/// The color to use to highlight expressions.
pub const EXPR: Color = Color::RGB(52, 235, 152);

/// Represents any kind of error that can occur during some operation.
pub trait ErrorKind: Debug + Send + Sync {
    /// A one-line summary of the error, without any source context.
    fn message(&self) -> String;

    /// Builds the report for this error.
    fn build_report<'a>(
        &self,
        src_id: &'a str,
        spans: &[Range<usize>],
    ) -> Report<(&'a str, Range<usize>)>;
}

/// An error associated with regions of source code that can be highlighted.
#[derive(Debug)]
pub struct Error {
    /// The regions of the source code that this error originated from.
    pub spans: Vec<Range<usize>>,

    /// The kind of error that occurred.
    pub kind: Box<dyn ErrorKind>,
}

impl Error {
    /// Creates a new error with the given spans and kind.
    pub fn new(spans: Vec<Range<usize>>, kind: impl ErrorKind + 'static) -> Self {
        Self { spans, kind: Box::new(kind) }
    }

    /// Build a report from this error kind.
    pub fn build_report<'a>(&self, src_id: &'a str) -> Report<(&'a str, Range<usize>)> {
        self.kind.build_report(src_id, &self.spans)
    }

    /// Renders the report for this error against the given source text, with terminal color
    /// codes removed so the result can be written to a log.
    pub fn report_to_string(&self, src_id: &str, input: &str) -> String {
        let mut buf = Vec::new();
        let written = self.build_report(src_id)
            .write((src_id, Source::from(input)), &mut buf);

        match written {
            Ok(()) => strip_ansi_escapes::strip_str(String::from_utf8_lossy(&buf)),
            Err(_) => self.kind.message(),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind.message())?;
        if let Some(span) = self.spans.first() {
            write!(f, " (at {}..{})", span.start, span.end)?;
        }
        Ok(())
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use ariadne::{Label, ReportKind};
    use pretty_assertions::assert_eq;
    use super::*;

    #[derive(Debug)]
    struct Oops;

    impl ErrorKind for Oops {
        fn message(&self) -> String {
            "oops".to_string()
        }

        fn build_report<'a>(
            &self,
            src_id: &'a str,
            spans: &[Range<usize>],
        ) -> Report<(&'a str, Range<usize>)> {
            Report::build(ReportKind::Error, src_id, spans[0].start)
                .with_message(self.message())
                .with_label(Label::new((src_id, spans[0].clone())).with_message("right here"))
                .finish()
        }
    }

    #[test]
    fn display_includes_span() {
        let err = Error::new(vec![2..4], Oops);
        assert_eq!(err.to_string(), "oops (at 2..4)");
    }

    #[test]
    fn plain_report_has_no_escape_codes() {
        let err = Error::new(vec![0..1], Oops);
        let report = err.report_to_string("input", "x + $");
        assert!(report.contains("oops"));
        assert!(report.contains("right here"));
        assert!(!report.contains('\u{1b}'));
    }
}
