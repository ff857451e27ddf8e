//! Diagnostics.
//!
//! Every phase reports through one [`DiagnosticSink`]. Diagnostics carry a
//! span and render with the offending source line underlined. The sink's
//! count is monotonic: the pipeline snapshots it on entry and refuses to
//! evaluate when anything was reported since — the "don't run broken
//! programs" guard.

use std::fmt;

use crate::style::Style;
use crate::token::Span;

#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub enum DiagnosticKind {
    // Lexing
    UnexpectedChar(char),
    UnterminatedString,
    // Parsing
    UnexpectedToken {
        expected: &'static str,
        found: &'static str,
    },
    UnmatchedBracket,
    TrailingComma,
    // Analysis. Type names are rendered at report time so diagnostics do
    // not borrow the pool.
    UnknownSymbol {
        name: String,
        hint: Option<String>,
    },
    NotAFunction {
        ty: String,
    },
    TooManyArguments {
        ty: String,
    },
    ArgumentMismatch {
        expected: String,
        found: String,
    },
    ListElementMismatch {
        first: String,
        found: String,
    },
    // Anything that should not happen; aborts the pipeline, not the REPL.
    Internal(String),
}

impl Diagnostic {
    pub fn message(&self) -> String {
        match &self.kind {
            DiagnosticKind::UnexpectedChar(c) => format!("unexpected character {:?}", c),
            DiagnosticKind::UnterminatedString => "unterminated string literal".to_string(),
            DiagnosticKind::UnexpectedToken { expected, found } => {
                format!("expected {}, found {}", expected, found)
            }
            DiagnosticKind::UnmatchedBracket => "missing ']' to close this list".to_string(),
            DiagnosticKind::TrailingComma => "trailing comma before ']'".to_string(),
            DiagnosticKind::UnknownSymbol { name, .. } => format!("unknown symbol '{}'", name),
            DiagnosticKind::NotAFunction { ty } => {
                format!("cannot apply a value of {}: not a function", ty)
            }
            DiagnosticKind::TooManyArguments { ty } => {
                format!("too many arguments for a function of {}", ty)
            }
            DiagnosticKind::ArgumentMismatch { expected, found } => {
                format!("argument type mismatch: expected {}, given {}", expected, found)
            }
            DiagnosticKind::ListElementMismatch { first, found } => format!(
                "list elements must share one type: the first is {}, this one is {}",
                first, found
            ),
            DiagnosticKind::Internal(what) => format!("internal error: {}", what),
        }
    }

    /// Render with the source line and a caret underline, in the shape
    ///
    /// ```text
    /// error: unknown symbol 'sise'
    ///
    ///    1 | sise "foo.txt"
    ///      | ^^^^
    ///      | help: did you mean 'size'?
    /// ```
    pub fn display_with_source(&self, source: &str) -> String {
        let (line_num, line_start, line_content) = self.find_context(source);
        let col = self.span.start.saturating_sub(line_start);
        let len = (self.span.end.saturating_sub(self.span.start)).max(1);
        let underline = format!("{}{}", " ".repeat(col), "^".repeat(len));

        let label = Style::bold_red("error");
        let gutter = Style::blue(&format!("{:4}", line_num));
        let pipe = Style::blue("|");

        let mut out = format!(
            "{}: {}\n\n{} {} {}\n     {} {}",
            label,
            self.message(),
            gutter,
            pipe,
            line_content,
            pipe,
            Style::red(&underline)
        );

        if let DiagnosticKind::UnknownSymbol {
            hint: Some(hint), ..
        } = &self.kind
        {
            out.push_str(&format!(
                "\n     {} {}: did you mean '{}'?",
                pipe,
                Style::cyan("help"),
                Style::green(hint)
            ));
        }

        out
    }

    fn find_context<'s>(&self, source: &'s str) -> (usize, usize, &'s str) {
        let mut line_num = 1;
        let mut line_start = 0;

        for (i, c) in source.char_indices() {
            if i >= self.span.start {
                break;
            }
            if c == '\n' {
                line_num += 1;
                line_start = i + 1;
            }
        }

        let line_end = source[line_start..]
            .find('\n')
            .map(|offset| line_start + offset)
            .unwrap_or(source.len());

        (line_num, line_start, &source[line_start..line_end])
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

impl std::error::Error for Diagnostic {}

/// Collects diagnostics across one or many pipeline runs. `count` only
/// grows; `drain` hands out the pending diagnostics for printing without
/// resetting it.
#[derive(Default)]
pub struct DiagnosticSink {
    pending: Vec<Diagnostic>,
    emitted: usize,
}

impl DiagnosticSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report(&mut self, kind: DiagnosticKind, span: Span) {
        self.pending.push(Diagnostic { kind, span });
        self.emitted += 1;
    }

    /// Total diagnostics ever reported.
    pub fn count(&self) -> usize {
        self.emitted
    }

    pub fn snapshot(&self) -> usize {
        self.emitted
    }

    /// Whether anything was reported after `snapshot` was taken.
    pub fn errors_since(&self, snapshot: usize) -> bool {
        self.emitted > snapshot
    }

    /// Take the diagnostics accumulated since the last drain. The monotonic
    /// count is unaffected.
    pub fn drain(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.pending)
    }
}
