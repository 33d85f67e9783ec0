//! Contains the common [`ErrorKind`] trait used by all errors to display user-facing error
//! messages.
//!
//! Expression trees in `formulary` are not parsed from source code, so the "source" an [`Error`]
//! points into is usually the plain-text rendering of the expression that failed. The spans
//! stored in the error are byte ranges into that rendering.

use ariadne::{Color, Report, Source};
use std::{any::Any, fmt::Debug, ops::Range};

/// The color to use to highlight expressions.
pub const EXPR: Color = Color::RGB(52, 235, 152);

/// Represents any kind of error that can occur during some operation.
pub trait ErrorKind: Debug + Send {
    /// Returns the error as a [`dyn Any`](Any), so that the concrete kind can be recovered.
    fn as_any(&self) -> &dyn Any;

    /// Builds the report for this error.
    fn build_report<'a>(
        &self,
        src_id: &'a str,
        spans: &[Range<usize>],
    ) -> Report<(&'a str, Range<usize>)>;
}

/// An error associated with regions of source text that can be highlighted.
#[derive(Debug)]
pub struct Error {
    /// The regions of the source text that this error originated from.
    pub spans: Vec<Range<usize>>,

    /// The kind of error that occurred.
    pub kind: Box<dyn ErrorKind>,
}

impl Error {
    /// Creates a new error with the given spans and kind.
    pub fn new(spans: Vec<Range<usize>>, kind: impl ErrorKind + 'static) -> Self {
        Self { spans, kind: Box::new(kind) }
    }

    /// Returns the kind of this error as `T`, if it is of that kind.
    pub fn kind_as<T: 'static>(&self) -> Option<&T> {
        self.kind.as_any().downcast_ref::<T>()
    }

    /// Returns true if the kind of this error is `T`.
    pub fn is<T: 'static>(&self) -> bool {
        self.kind_as::<T>().is_some()
    }

    /// Build a report from this error kind.
    pub fn build_report<'a>(&self, src_id: &'a str) -> Report<(&'a str, Range<usize>)> {
        self.kind.build_report(src_id, &self.spans)
    }

    /// Renders the report for this error against the given source text.
    ///
    /// The output contains ANSI color codes.
    pub fn report_to_string(&self, src_id: &str, src: &str) -> String {
        let mut buf = Vec::new();
        // writing into a `Vec` cannot fail
        let _ = self.build_report(src_id).write((src_id, Source::from(src)), &mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    }
}
