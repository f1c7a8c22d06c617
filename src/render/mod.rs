//! Presentation layer for signatures and chain traces.
//!
//! The core only produces [`Markup`]: text split into spans tagged with a
//! semantic [`Role`]. Turning roles into terminal styles is the job of a
//! [`Renderer`], selected through [`RenderConfig`].

pub mod block;
pub mod theme;

pub use block::Block;
pub use theme::{ColorMode, ColoredRenderer, PlainRenderer, RenderConfig, Renderer};

use unicode_width::UnicodeWidthStr;

/// What a piece of annotated text represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Plain,
    Module,
    FunctionName,
    Punctuation,
    ParamName,
    HighlightedParamName,
    Type,
    Value,
    HighlightedValue,
    Return,
    HighlightedReturn,
    StartArgument,
    Title,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub role: Role,
    pub text: String,
}

/// An ordered sequence of role-tagged spans.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Markup {
    spans: Vec<Span>,
}

impl Markup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn styled(role: Role, text: impl Into<String>) -> Self {
        Markup::new().push(role, text)
    }

    pub fn push(mut self, role: Role, text: impl Into<String>) -> Self {
        let text = text.into();
        if !text.is_empty() {
            self.spans.push(Span { role, text });
        }
        self
    }

    pub fn append(mut self, other: Markup) -> Self {
        self.spans.extend(other.spans);
        self
    }

    /// Joins markups with `sep` between consecutive items.
    pub fn join(items: impl IntoIterator<Item = Markup>, sep: &Markup) -> Markup {
        let mut out = Markup::new();
        for (i, item) in items.into_iter().enumerate() {
            if i > 0 {
                out = out.append(sep.clone());
            }
            out = out.append(item);
        }
        out
    }

    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    /// Texts of every span carrying `role`, in order.
    pub fn texts_with(&self, role: Role) -> Vec<&str> {
        self.spans
            .iter()
            .filter(|s| s.role == role)
            .map(|s| s.text.as_str())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// The text with all annotations dropped.
    pub fn plain(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }

    /// Display width of the plain text, in terminal columns.
    pub fn width(&self) -> usize {
        self.plain().width()
    }
}

/// Anything with an annotated representation.
pub trait Rich {
    fn rich(&self) -> Markup;
}

impl Rich for Markup {
    fn rich(&self) -> Markup {
        self.clone()
    }
}
