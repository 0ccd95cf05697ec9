//! Builder-pattern printer for rendering a diagnostic against its selector.

use std::fmt::Write;

use annotate_snippets::{AnnotationKind, Group, Level, Renderer, Snippet};

use super::{Diagnostic, Span};

pub struct DiagnosticPrinter<'d> {
    diagnostic: &'d Diagnostic,
    path: Option<&'d str>,
    colored: bool,
    hints: bool,
}

impl<'d> DiagnosticPrinter<'d> {
    pub fn new(diagnostic: &'d Diagnostic) -> Self {
        Self {
            diagnostic,
            path: None,
            colored: false,
            hints: true,
        }
    }

    /// Label shown in the snippet header, e.g. the rule that owns the selector.
    pub fn path(mut self, path: &'d str) -> Self {
        self.path = Some(path);
        self
    }

    pub fn colored(mut self, value: bool) -> Self {
        self.colored = value;
        self
    }

    pub fn hints(mut self, value: bool) -> Self {
        self.hints = value;
        self
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).expect("String write never fails");
        out
    }

    pub fn format(&self, w: &mut impl Write) -> std::fmt::Result {
        let diag = self.diagnostic;
        let source = diag.source();

        let renderer = if self.colored {
            Renderer::styled()
        } else {
            Renderer::plain()
        };

        let mut snippet = Snippet::source(source)
            .line_start(1)
            .annotation(AnnotationKind::Primary.span(adjust_range(diag.span(), source.len())));

        if let Some(p) = self.path {
            snippet = snippet.path(p);
        }

        let mut title_group = Level::ERROR.primary_title(diag.text()).element(snippet);
        if self.hints
            && let Some(hint) = diag.hint()
        {
            title_group = title_group.element(Level::HELP.message(hint));
        }

        let report: Vec<Group> = vec![title_group];
        write!(w, "{}", renderer.render(&report))
    }
}

/// Widens empty spans to one column so the caret has something to point at.
fn adjust_range(span: Span, limit: usize) -> std::ops::Range<usize> {
    if span.is_empty() {
        return span.start..(span.start + 1).min(limit);
    }
    span.range()
}
