use crate::core::LinkValue;
use crate::core::args::Args;
use crate::error::{DaisyError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

/// Name given to anonymous callables, rendered as `λ` in annotated output.
pub const LAMBDA: &str = "<lambda>";

/// The body of a callable: receives the call's arguments, returns one value.
pub type Body = Rc<dyn Fn(&Args) -> Result<LinkValue>>;

/// One declared formal parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamSpec {
    pub name: String,
    pub ty: Option<String>,
    pub default: Option<LinkValue>,
}

impl ParamSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: None,
            default: None,
        }
    }

    pub fn ty(mut self, ty: impl Into<String>) -> Self {
        self.ty = Some(ty.into());
        self
    }

    pub fn with_default(mut self, value: impl Into<LinkValue>) -> Self {
        self.default = Some(value.into());
        self
    }
}

impl From<&str> for ParamSpec {
    fn from(name: &str) -> Self {
        ParamSpec::new(name)
    }
}

/// The declared part of a callable: its parameters and return annotation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Declaration {
    pub params: Vec<ParamSpec>,
    pub returns: Option<String>,
}

/// Splits on `sep` outside of any bracket pair or double-quoted string.
fn split_top_level(s: &str, sep: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut begin = 0;
    let mut in_string = false;
    let mut escaped = false;
    for (i, c) in s.char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '[' | '(' | '{' => depth += 1,
            ']' | ')' | '}' => depth = depth.saturating_sub(1),
            c if c == sep && depth == 0 => {
                parts.push(&s[begin..i]);
                begin = i + c.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(&s[begin..]);
    parts
}

fn parse_param(part: &str) -> Result<ParamSpec> {
    let (head, default) = match part.split_once('=') {
        Some((head, raw)) => {
            let raw = raw.trim();
            if raw.is_empty() {
                return Err(DaisyError::Declaration(format!(
                    "missing default value in '{}'",
                    part.trim()
                )));
            }
            // Anything that isn't JSON is kept as a bare string
            let value = serde_json::from_str(raw).unwrap_or_else(|_| LinkValue::from(raw));
            (head, Some(value))
        }
        None => (part, None),
    };

    let (name, ty) = match head.split_once(':') {
        Some((name, ty)) => (name.trim(), Some(ty.trim().to_string())),
        None => (head.trim(), None),
    };

    if name.is_empty() {
        return Err(DaisyError::Declaration(format!(
            "parameter without a name in '{}'",
            part.trim()
        )));
    }
    if ty.as_deref() == Some("") {
        return Err(DaisyError::Declaration(format!(
            "empty type annotation for '{}'",
            name
        )));
    }

    Ok(ParamSpec {
        name: name.to_string(),
        ty,
        default,
    })
}

impl FromStr for Declaration {
    type Err = DaisyError;

    /// Parses shorthand syntax: "x: int, y: int = 2 -> float"
    fn from_str(s: &str) -> Result<Self> {
        let (params_part, returns) = match s.rsplit_once("->") {
            Some((params, ret)) => {
                let ret = ret.trim();
                if ret.is_empty() {
                    return Err(DaisyError::Declaration(
                        "'->' must be followed by a return type".to_string(),
                    ));
                }
                (params, Some(ret.to_string()))
            }
            None => (s, None),
        };

        let params = if params_part.trim().is_empty() {
            Vec::new()
        } else {
            split_top_level(params_part, ',')
                .into_iter()
                .map(parse_param)
                .collect::<Result<Vec<_>>>()?
        };

        Ok(Declaration { params, returns })
    }
}

/// A plain function together with its explicitly declared signature.
///
/// Rust has no runtime reflection over closures, so the parameter and return
/// descriptors are supplied once, next to the function body.
#[derive(Clone)]
pub struct Callable {
    qualname: String,
    module: Option<String>,
    declaration: Declaration,
    body: Body,
}

impl Callable {
    /// Creates a callable from a body taking the full argument list.
    ///
    /// It starts with no declared parameters. Plain calls don't need any, but
    /// showing a call (and so [`Chain::show`](crate::Chain::show)) overlays
    /// every argument onto a declared parameter and fails with
    /// [`DaisyError::Lookup`] for each one left undeclared. Declare them with
    /// [`Callable::param`] or [`Callable::declare`].
    pub fn new<F>(qualname: impl Into<String>, body: F) -> Self
    where
        F: Fn(&Args) -> Result<LinkValue> + 'static,
    {
        Callable {
            qualname: qualname.into(),
            module: None,
            declaration: Declaration::default(),
            body: Rc::new(body),
        }
    }

    /// An anonymous single-argument callable with one untyped parameter `x`.
    pub fn lambda<F>(body: F) -> Self
    where
        F: Fn(&LinkValue) -> Result<LinkValue> + 'static,
    {
        Callable::new(LAMBDA, move |args: &Args| body(args.resolve(0, "x")?)).param("x")
    }

    pub fn param(mut self, param: impl Into<ParamSpec>) -> Self {
        self.declaration.params.push(param.into());
        self
    }

    pub fn returns(mut self, ty: impl Into<String>) -> Self {
        self.declaration.returns = Some(ty.into());
        self
    }

    pub fn module(mut self, module: impl Into<String>) -> Self {
        self.module = Some(module.into());
        self
    }

    /// Replaces the declared parameters and return type with a parsed shorthand.
    pub fn declare(mut self, shorthand: &str) -> Result<Self> {
        self.declaration = shorthand.parse()?;
        Ok(self)
    }

    pub fn call(&self, args: &Args) -> Result<LinkValue> {
        (self.body)(args)
    }

    pub fn qualname(&self) -> &str {
        &self.qualname
    }

    pub fn module_name(&self) -> Option<&str> {
        self.module.as_deref()
    }

    pub fn declaration(&self) -> &Declaration {
        &self.declaration
    }

    pub fn is_lambda(&self) -> bool {
        self.qualname.starts_with(LAMBDA)
    }

    /// Whether both handles refer to the same function body.
    pub fn ptr_eq(&self, other: &Callable) -> bool {
        Rc::ptr_eq(&self.body, &other.body)
    }
}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callable")
            .field("qualname", &self.qualname)
            .field("module", &self.module)
            .field("declaration", &self.declaration)
            .finish_non_exhaustive()
    }
}
