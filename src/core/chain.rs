use crate::core::args::Args;
use crate::core::callable::Callable;
use crate::core::link::{Link, TupleLink};
use crate::core::signature::Signature;
use crate::core::slice::Slice;
use crate::core::{LinkValue, display_value};
use crate::error::{DaisyError, Result};
use crate::render::{Block, Markup, Rich, Role};
use serde::Serialize;
use std::cell::RefCell;
use std::fmt;
use std::ops::BitOr;
use std::rc::Rc;

/// Anything that can be offered to a chain's `|`.
#[derive(Debug, Clone)]
pub enum Operand {
    Callable(Callable),
    Tuple(TupleLink),
    Value(LinkValue),
}

impl From<Callable> for Operand {
    fn from(f: Callable) -> Self {
        Operand::Callable(f)
    }
}

impl From<TupleLink> for Operand {
    fn from(t: TupleLink) -> Self {
        Operand::Tuple(t)
    }
}

/// Arrays are taken as tuples; any other plain value can't be composed.
impl From<LinkValue> for Operand {
    fn from(value: LinkValue) -> Self {
        match value {
            LinkValue::Array(items) => Operand::Tuple(TupleLink::new(items)),
            other => Operand::Value(other),
        }
    }
}

/// A named, ordered, growable pipeline of links.
///
/// A `Chain` is a handle: cloning it (or composing with `|`) hands back the
/// same link sequence, and [`Chain::named`] gives a differently named view of
/// it. Slicing is the only way to get an independent sequence.
#[derive(Clone, Default)]
pub struct Chain {
    name: Option<String>,
    links: Rc<RefCell<Vec<Link>>>,
}

impl Chain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(name: impl Into<String>) -> Self {
        Chain::from_links(Some(name.into()), Vec::new())
    }

    pub fn from_links(name: Option<String>, links: Vec<Link>) -> Self {
        Chain {
            name,
            links: Rc::new(RefCell::new(links)),
        }
    }

    pub fn from_link(name: Option<String>, link: Link) -> Self {
        Chain::from_links(name, vec![link])
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    /// A view of the same links under another name.
    pub fn named(&self, name: impl Into<String>) -> Chain {
        Chain {
            name: Some(name.into()),
            links: Rc::clone(&self.links),
        }
    }

    /// Whether both chains share one link sequence.
    pub fn ptr_eq(&self, other: &Chain) -> bool {
        Rc::ptr_eq(&self.links, &other.links)
    }

    pub fn len(&self) -> usize {
        self.links.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.borrow().is_empty()
    }

    /// A copy of the current links.
    pub fn links(&self) -> Vec<Link> {
        self.links.borrow().clone()
    }

    /// Appends a link in place.
    pub fn push(&self, link: Link) {
        if let Link::Tuple(t) = &link {
            log::warn!("Appending tuple link {} which cannot be evaluated.", t);
        }
        log::debug!(
            "Appending `{}` to chain {} at position {}",
            link,
            self.label(),
            self.len()
        );
        self.links.borrow_mut().push(link);
    }

    /// Composes with an operand resolved at runtime.
    ///
    /// Callables and tuples are appended in place and the same chain is
    /// returned; anything else is rejected.
    pub fn try_pipe(self, operand: impl Into<Operand>) -> Result<Chain> {
        let link = match operand.into() {
            Operand::Callable(f) => Link::from(f),
            Operand::Tuple(t) => Link::from(t),
            Operand::Value(v) => {
                return Err(DaisyError::UnsupportedOperand(display_value(&v)));
            }
        };
        self.push(link);
        Ok(self)
    }

    /// Runs the first link on `args`, then every later link on the previous result.
    pub fn call(&self, args: impl Into<Args>) -> Result<LinkValue> {
        let args = args.into();
        // Snapshot so a link may refer back to this chain
        let links = self.links();
        let (first, rest) = links.split_first().ok_or(DaisyError::EmptyChain)?;

        log::trace!("{}: stage 0 `{}` with ({})", self.label(), first, args);
        let mut res = first.call(&args)?;
        for (i, link) in rest.iter().enumerate() {
            log::trace!("{}: stage {} `{}` with ({})", self.label(), i + 1, link, res);
            res = link.call(&Args::single(res))?;
        }
        Ok(res)
    }

    /// A single link as a new chain named with an `[index]` suffix.
    pub fn at(&self, index: isize) -> Result<Chain> {
        let links = self.links.borrow();
        let len = links.len();
        let pos = if index < 0 {
            index + len as isize
        } else {
            index
        };
        if pos < 0 || pos as usize >= len {
            return Err(DaisyError::IndexOutOfRange { index, len });
        }
        Ok(Chain::from_link(
            self.derived_name(&format!("[{}]", index)),
            links[pos as usize].clone(),
        ))
    }

    /// A new chain holding the selected links; this chain is left untouched.
    pub fn slice(&self, slice: impl Into<Slice>) -> Result<Chain> {
        let slice = slice.into();
        let links = self.links.borrow();
        let selected = slice
            .indices(links.len())?
            .into_iter()
            .map(|i| links[i].clone())
            .collect();
        Ok(Chain::from_links(
            self.derived_name(&slice.to_string()),
            selected,
        ))
    }

    /// Runs every stage through its `show`, collecting the overlaid signatures.
    pub fn trace(&self, args: impl Into<Args>) -> Result<Trace> {
        let args = args.into();
        let links = self.links();
        let (first, rest) = links.split_first().ok_or(DaisyError::EmptyChain)?;

        let (sig, mut res) = first.show(&args)?;
        let mut stages = vec![sig];
        for link in rest {
            let (sig, next) = link.show(&Args::single(res))?;
            stages.push(sig);
            res = next;
        }

        Ok(Trace {
            name: self.name.clone(),
            args,
            stages,
            result: res,
        })
    }

    /// The trace of one call, laid out as a block.
    pub fn show(&self, args: impl Into<Args>) -> Result<Block> {
        Ok(self.trace(args)?.block())
    }

    /// The chain's links laid out as a block titled with its name.
    pub fn panel(&self) -> Block {
        let title = self
            .name
            .as_deref()
            .map(|n| Markup::styled(Role::Title, n))
            .unwrap_or_default();
        Block::new(title, self.rich())
    }

    fn derived_name(&self, suffix: &str) -> Option<String> {
        self.name.as_ref().map(|n| format!("{}{}", n, suffix))
    }

    fn label(&self) -> &str {
        self.name.as_deref().unwrap_or("<unnamed>")
    }
}

/// A ready-made empty chain named `Daisy`.
pub fn daisy() -> Chain {
    Chain::with_name("Daisy")
}

impl From<Link> for Chain {
    fn from(link: Link) -> Self {
        Chain::from_link(None, link)
    }
}

impl From<Vec<Link>> for Chain {
    fn from(links: Vec<Link>) -> Self {
        Chain::from_links(None, links)
    }
}

impl BitOr<Callable> for Chain {
    type Output = Chain;

    fn bitor(self, f: Callable) -> Chain {
        self.push(Link::from(f));
        self
    }
}

impl BitOr<TupleLink> for Chain {
    type Output = Chain;

    fn bitor(self, t: TupleLink) -> Chain {
        self.push(Link::from(t));
        self
    }
}

impl BitOr<Callable> for &Chain {
    type Output = Chain;

    fn bitor(self, f: Callable) -> Chain {
        self.clone() | f
    }
}

impl BitOr<TupleLink> for &Chain {
    type Output = Chain;

    fn bitor(self, t: TupleLink) -> Chain {
        self.clone() | t
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.links.borrow().iter().map(|l| l.to_string()).collect();
        match &self.name {
            Some(name) => write!(f, "{} || {}", name, parts.join(" | ")),
            None => write!(f, "{}", parts.join(" | ")),
        }
    }
}

impl fmt::Debug for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chain")
            .field("name", &self.name)
            .field("links", &self.links.borrow())
            .finish()
    }
}

impl Rich for Chain {
    fn rich(&self) -> Markup {
        Markup::join(
            self.links.borrow().iter().map(Rich::rich),
            &Markup::styled(Role::Plain, " | "),
        )
    }
}

/// What one call through a chain did at every stage.
#[derive(Debug, Clone, Serialize)]
pub struct Trace {
    pub name: Option<String>,
    pub args: Args,
    pub stages: Vec<Signature>,
    pub result: LinkValue,
}

impl Trace {
    /// Starting arguments then each stage, titled `name(args) = result`.
    pub fn block(&self) -> Block {
        let start = Markup::styled(Role::StartArgument, self.args.to_string());
        let body = Markup::join(
            std::iter::once(start).chain(self.stages.iter().map(Rich::rich)),
            &Markup::styled(Role::Plain, " | "),
        );

        let title = Markup::new()
            .push(Role::Title, self.name.as_deref().unwrap_or_default())
            .push(Role::Plain, "(")
            .push(Role::HighlightedValue, self.args.to_string())
            .push(Role::Plain, ")")
            .push(Role::Punctuation, " = ")
            .push(Role::HighlightedValue, display_value(&self.result));

        Block::new(title, body)
    }

    pub fn to_json(&self) -> Result<LinkValue> {
        serde_json::to_value(self)
            .map_err(|e| DaisyError::function(self.name.clone().unwrap_or_default(), e.to_string()))
    }
}
