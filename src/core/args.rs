use crate::core::{LinkValue, display_value};
use crate::error::{DaisyError, Result};
use serde::Serialize;
use std::fmt;

/// The arguments of one call: positional values followed by keyword pairs.
///
/// Keyword order is preserved so that rendering shows them as they were given.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Args {
    pub positional: Vec<LinkValue>,
    pub keyword: Vec<(String, LinkValue)>,
}

impl Args {
    pub fn new() -> Self {
        Self::default()
    }

    /// A call with exactly one positional argument, as passed between chain stages.
    pub fn single(value: impl Into<LinkValue>) -> Self {
        Args {
            positional: vec![value.into()],
            keyword: Vec::new(),
        }
    }

    pub fn arg(mut self, value: impl Into<LinkValue>) -> Self {
        self.positional.push(value.into());
        self
    }

    pub fn kwarg(mut self, name: impl Into<String>, value: impl Into<LinkValue>) -> Self {
        self.keyword.push((name.into(), value.into()));
        self
    }

    pub fn get(&self, index: usize) -> Option<&LinkValue> {
        self.positional.get(index)
    }

    /// First keyword argument with this name.
    pub fn get_kwarg(&self, name: &str) -> Option<&LinkValue> {
        self.keyword
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v)
    }

    /// Looks a parameter up by position first, then by keyword.
    pub fn resolve(&self, index: usize, name: &str) -> Result<&LinkValue> {
        self.get(index)
            .or_else(|| self.get_kwarg(name))
            .ok_or_else(|| DaisyError::MissingArgument(name.to_string()))
    }

    /// Like [`Args::resolve`] but falls back to `default` when the argument is absent.
    pub fn resolve_or(&self, index: usize, name: &str, default: LinkValue) -> LinkValue {
        self.resolve(index, name).cloned().unwrap_or(default)
    }

    pub fn len(&self) -> usize {
        self.positional.len() + self.keyword.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<LinkValue> for Args {
    fn from(value: LinkValue) -> Self {
        Args::single(value)
    }
}

impl From<Vec<LinkValue>> for Args {
    fn from(positional: Vec<LinkValue>) -> Self {
        Args {
            positional,
            keyword: Vec::new(),
        }
    }
}

impl From<()> for Args {
    fn from(_: ()) -> Self {
        Args::new()
    }
}

impl From<i64> for Args {
    fn from(value: i64) -> Self {
        Args::single(value)
    }
}

impl From<f64> for Args {
    fn from(value: f64) -> Self {
        Args::single(value)
    }
}

impl From<&str> for Args {
    fn from(value: &str) -> Self {
        Args::single(value)
    }
}

/// Renders as the argument list of a call, e.g. `4, y=2`.
impl fmt::Display for Args {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .positional
            .iter()
            .map(display_value)
            .chain(
                self.keyword
                    .iter()
                    .map(|(k, v)| format!("{}={}", k, display_value(v))),
            )
            .collect();
        write!(f, "{}", parts.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_resolve_prefers_position() {
        let args = Args::new().arg(1).kwarg("x", 5);
        assert_eq!(args.resolve(0, "x").unwrap(), &json!(1));
    }

    #[test]
    fn test_resolve_falls_back_to_keyword() {
        let args = Args::new().arg(1).kwarg("y", 7);
        assert_eq!(args.resolve(1, "y").unwrap(), &json!(7));
        assert_eq!(
            args.resolve(2, "z"),
            Err(DaisyError::MissingArgument("z".to_string()))
        );
        assert_eq!(args.resolve_or(2, "z", json!(2)), json!(2));
    }

    #[test]
    fn test_display() {
        let args = Args::new().arg(4).arg("hello").kwarg("y", 2.5);
        assert_eq!(args.to_string(), "4, hello, y=2.5");
        assert_eq!(Args::new().to_string(), "");
    }
}
