use crate::core::callable::{Callable, LAMBDA};
use crate::core::{LinkValue, display_value};
use crate::error::{DaisyError, Result};
use crate::render::{Markup, Rich, Role};
use serde::Serialize;
use std::fmt;

/// Addresses a parameter by zero-based position or by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Position(usize),
    Name(String),
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Position(i) => write!(f, "position {}", i),
            Key::Name(name) => write!(f, "name '{}'", name),
        }
    }
}

impl From<usize> for Key {
    fn from(i: usize) -> Self {
        Key::Position(i)
    }
}

impl From<&str> for Key {
    fn from(name: &str) -> Self {
        Key::Name(name.to_string())
    }
}

impl From<String> for Key {
    fn from(name: String) -> Self {
        Key::Name(name)
    }
}

/// One formal parameter, optionally overlaid with the value of a concrete call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Param {
    pub name: String,
    pub ty: Option<String>,
    pub default: Option<LinkValue>,
    pub active: bool,
    pub highlight: bool,
    pub concrete: Option<LinkValue>,
}

impl Param {
    pub fn new(name: impl Into<String>, ty: Option<String>, default: Option<LinkValue>) -> Self {
        Param {
            name: name.into(),
            ty,
            default,
            active: true,
            highlight: false,
            concrete: None,
        }
    }

    /// A concrete value was supplied by a call.
    pub fn is_supplied(&self) -> bool {
        self.concrete.is_some()
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if let Some(ty) = &self.ty {
            write!(f, ": {}", ty)?;
        }
        if let Some(value) = self.concrete.as_ref().or(self.default.as_ref()) {
            write!(f, " = {}", display_value(value))?;
        }
        Ok(())
    }
}

impl Rich for Param {
    fn rich(&self) -> Markup {
        let name_role = if self.highlight {
            Role::HighlightedParamName
        } else {
            Role::ParamName
        };
        let mut m = Markup::styled(name_role, &self.name);

        if let Some(ty) = &self.ty {
            m = m.push(Role::Punctuation, ": ").push(Role::Type, ty);
        }

        if let Some(value) = &self.concrete {
            let role = if self.highlight {
                Role::HighlightedValue
            } else {
                Role::Value
            };
            m = m.push(Role::Punctuation, " = ").push(role, display_value(value));
        } else if let Some(default) = &self.default {
            m = m
                .push(Role::Punctuation, " = ")
                .push(Role::Value, display_value(default));
        }
        m
    }
}

/// The return annotation, optionally overlaid with a computed result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReturnSlot {
    pub ty: Option<String>,
    pub active: bool,
    pub highlight: bool,
    pub concrete: Option<LinkValue>,
}

impl ReturnSlot {
    pub fn new(ty: Option<String>) -> Self {
        ReturnSlot {
            ty,
            active: true,
            highlight: false,
            concrete: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.ty.is_none() && self.concrete.is_none()
    }
}

impl fmt::Display for ReturnSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.concrete, &self.ty) {
            (Some(value), _) => write!(f, "{}", display_value(value)),
            (None, Some(ty)) => write!(f, "{}", ty),
            (None, None) => Ok(()),
        }
    }
}

impl Rich for ReturnSlot {
    fn rich(&self) -> Markup {
        if self.is_empty() {
            return Markup::new();
        }
        let role = if self.highlight {
            Role::HighlightedReturn
        } else {
            Role::Return
        };
        Markup::styled(role, self.to_string())
    }
}

/// The parameter and return metadata of one callable.
///
/// Built fresh from the callable's declaration every time it is requested,
/// so overlaying a call never leaks into another signature. Only the
/// callable's name and module are kept; the body is never reached from here.
#[derive(Debug, Clone, Serialize)]
pub struct Signature {
    qualname: String,
    module: Option<String>,
    params: Vec<Param>,
    ret: ReturnSlot,
}

impl Signature {
    pub fn new(callable: &Callable) -> Self {
        let declaration = callable.declaration();
        let params = declaration
            .params
            .iter()
            .map(|p| Param::new(p.name.clone(), p.ty.clone(), p.default.clone()))
            .collect();

        Signature {
            qualname: callable.qualname().to_string(),
            module: callable.module_name().map(str::to_string),
            params,
            ret: ReturnSlot::new(declaration.returns.clone()),
        }
    }

    fn position(&self, key: &Key) -> Result<usize> {
        match key {
            Key::Position(i) if *i < self.params.len() => Ok(*i),
            Key::Name(name) => self
                .params
                .iter()
                .position(|p| &p.name == name)
                .ok_or_else(|| DaisyError::Lookup(key.clone())),
            Key::Position(_) => Err(DaisyError::Lookup(key.clone())),
        }
    }

    pub fn get(&self, key: impl Into<Key>) -> Result<&Param> {
        let i = self.position(&key.into())?;
        Ok(&self.params[i])
    }

    pub fn get_mut(&mut self, key: impl Into<Key>) -> Result<&mut Param> {
        let i = self.position(&key.into())?;
        Ok(&mut self.params[i])
    }

    /// Overlays a concrete value, marking the parameter active and highlighted.
    pub fn set(&mut self, key: impl Into<Key>, value: impl Into<LinkValue>) -> Result<()> {
        self.set_with(key, value, true, true)
    }

    pub fn set_with(
        &mut self,
        key: impl Into<Key>,
        value: impl Into<LinkValue>,
        active: bool,
        highlight: bool,
    ) -> Result<()> {
        let param = self.get_mut(key)?;
        param.concrete = Some(value.into());
        param.active = active;
        param.highlight = highlight;
        Ok(())
    }

    pub fn set_return(&mut self, value: impl Into<LinkValue>) {
        self.set_return_with(value, true, true)
    }

    pub fn set_return_with(&mut self, value: impl Into<LinkValue>, active: bool, highlight: bool) {
        self.ret.concrete = Some(value.into());
        self.ret.active = active;
        self.ret.highlight = highlight;
    }

    pub fn params(&self) -> &[Param] {
        &self.params
    }

    /// Iterates params, keeping only active and/or highlighted ones when asked.
    pub fn iter_filtered(
        &self,
        active: bool,
        highlight: bool,
    ) -> impl Iterator<Item = &Param> + '_ {
        self.params
            .iter()
            .filter(move |p| !highlight || p.highlight)
            .filter(move |p| !active || p.active)
    }

    pub fn ret(&self) -> &ReturnSlot {
        &self.ret
    }

    pub fn ret_mut(&mut self) -> &mut ReturnSlot {
        &mut self.ret
    }

    pub fn qualname(&self) -> &str {
        &self.qualname
    }

    pub fn module(&self) -> Option<&str> {
        self.module.as_deref()
    }

    /// Serializes the signature, including any overlaid call values.
    pub fn to_json(&self) -> Result<LinkValue> {
        serde_json::to_value(self)
            .map_err(|e| DaisyError::function(self.qualname.clone(), e.to_string()))
    }
}

impl From<&Callable> for Signature {
    fn from(callable: &Callable) -> Self {
        Signature::new(callable)
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(module) = &self.module {
            write!(f, "{}.", module)?;
        }
        let params: Vec<String> = self
            .iter_filtered(true, false)
            .map(|p| p.to_string())
            .collect();
        write!(f, "{}({})", self.qualname, params.join(", "))?;
        if !self.ret.is_empty() {
            write!(f, " -> {}", self.ret)?;
        }
        Ok(())
    }
}

impl Rich for Signature {
    fn rich(&self) -> Markup {
        let name = match self.qualname.strip_prefix(LAMBDA) {
            Some(rest) => format!("λ{}", rest),
            None => self.qualname.clone(),
        };

        let mut m = Markup::new();
        if let Some(module) = &self.module {
            m = m.push(Role::Module, module).push(Role::Plain, ".");
        }

        let params = Markup::join(
            self.params.iter().map(Rich::rich),
            &Markup::styled(Role::Punctuation, ", "),
        );
        m = m
            .push(Role::FunctionName, name)
            .push(Role::Punctuation, "(")
            .append(params)
            .push(Role::Punctuation, ")");

        if !self.ret.is_empty() {
            m = m.push(Role::Punctuation, " -> ").append(self.ret.rich());
        }
        m
    }
}

impl Callable {
    /// A fresh signature for this callable.
    pub fn signature(&self) -> Signature {
        Signature::new(self)
    }
}
