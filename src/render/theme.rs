use crate::error::{DaisyError, Result};
use crate::render::{Block, Markup, Role, Span};
use colored::{ColoredString, Colorize};
use std::io::IsTerminal;
use std::str::FromStr;

/// When annotated output gets ANSI styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// Style only when stdout is a terminal.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    /// Case-insensitive `auto`, `always` or `never`.
    pub fn parse(s: &str) -> Option<Self> {
        s.parse().ok()
    }

    pub fn should_use_color(&self) -> bool {
        match self {
            ColorMode::Auto => std::io::stdout().is_terminal(),
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

impl FromStr for ColorMode {
    type Err = DaisyError;

    fn from_str(s: &str) -> Result<Self> {
        if s.eq_ignore_ascii_case("auto") {
            Ok(ColorMode::Auto)
        } else if s.eq_ignore_ascii_case("always") {
            Ok(ColorMode::Always)
        } else if s.eq_ignore_ascii_case("never") {
            Ok(ColorMode::Never)
        } else {
            Err(DaisyError::InvalidColorMode(s.to_string()))
        }
    }
}

/// How annotated output is turned into text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderConfig {
    pub color: ColorMode,
}

impl RenderConfig {
    pub fn new(color: ColorMode) -> Self {
        Self { color }
    }

    /// No styling at all.
    pub fn plain() -> Self {
        Self::new(ColorMode::Never)
    }

    pub fn renderer(&self) -> Box<dyn Renderer> {
        if self.color.should_use_color() {
            Box::new(ColoredRenderer::with_color(true))
        } else {
            Box::new(PlainRenderer)
        }
    }
}

pub trait Renderer {
    fn span(&self, span: &Span) -> String;

    fn render(&self, markup: &Markup) -> String {
        markup.spans().iter().map(|s| self.span(s)).collect()
    }

    fn render_block(&self, block: &Block) -> String {
        block.layout(|s| self.span(s))
    }
}

/// Drops every annotation.
pub struct PlainRenderer;

impl Renderer for PlainRenderer {
    fn span(&self, span: &Span) -> String {
        span.text.clone()
    }
}

/// Maps roles to ANSI styles.
///
/// Whether to style is decided once, when the renderer is built.
pub struct ColoredRenderer {
    enabled: bool,
}

impl ColoredRenderer {
    pub fn new(config: RenderConfig) -> Self {
        Self::with_color(config.color.should_use_color())
    }

    fn with_color(enabled: bool) -> Self {
        // `colored` checks its own env/tty state unless overridden
        colored::control::set_override(enabled);
        Self { enabled }
    }

    fn style(role: Role, text: &str) -> ColoredString {
        match role {
            Role::Plain => text.normal(),
            Role::Module => text.white(),
            Role::FunctionName => text.magenta(),
            Role::Punctuation => text.yellow(),
            Role::ParamName => text.normal(),
            Role::HighlightedParamName => text.red().bold().underline(),
            Role::Type => text.blue().italic(),
            Role::Value => text.green(),
            Role::HighlightedValue => text.cyan().bold().underline(),
            Role::Return => text.blue(),
            Role::HighlightedReturn => text.red().bold().underline(),
            Role::StartArgument => text.red().bold().underline(),
            Role::Title => text.yellow().bold(),
        }
    }
}

impl Renderer for ColoredRenderer {
    fn span(&self, span: &Span) -> String {
        if self.enabled {
            Self::style(span.role, &span.text).to_string()
        } else {
            span.text.clone()
        }
    }
}
