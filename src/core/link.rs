use crate::core::args::Args;
use crate::core::callable::Callable;
use crate::core::signature::Signature;
use crate::core::{LinkValue, display_value};
use crate::error::{DaisyError, Result};
use crate::render::{Markup, Rich, Role};
use std::fmt;

/// A link made of one plain callable.
#[derive(Debug, Clone)]
pub struct CallableLink {
    f: Callable,
}

impl CallableLink {
    pub fn new(f: Callable) -> Self {
        CallableLink { f }
    }

    pub fn callable(&self) -> &Callable {
        &self.f
    }

    pub fn signature(&self) -> Signature {
        self.f.signature()
    }

    pub fn call(&self, args: &Args) -> Result<LinkValue> {
        self.f.call(args)
    }

    /// Calls the function and returns its signature overlaid with the call.
    ///
    /// Positional arguments map onto declared parameters by position and
    /// keyword arguments by name; an argument with no declared parameter is a
    /// [`DaisyError::Lookup`].
    pub fn show(&self, args: &Args) -> Result<(Signature, LinkValue)> {
        let ret = self.call(args)?;
        let mut sig = self.signature();

        for (i, x) in args.positional.iter().enumerate() {
            sig.set(i, x.clone())?;
        }

        for (k, v) in &args.keyword {
            sig.set(k.as_str(), v.clone())?;
        }

        sig.set_return(ret.clone());
        Ok((sig, ret))
    }
}

impl fmt::Display for CallableLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.signature())
    }
}

impl Rich for CallableLink {
    fn rich(&self) -> Markup {
        self.signature().rich()
    }
}

/// A link made of a fixed tuple.
///
/// It can sit in a chain but has no evaluation semantics yet: computing its
/// value always fails.
#[derive(Debug, Clone, PartialEq)]
pub struct TupleLink {
    tup: Vec<LinkValue>,
}

impl TupleLink {
    pub fn new(tup: Vec<LinkValue>) -> Self {
        TupleLink { tup }
    }

    pub fn items(&self) -> &[LinkValue] {
        &self.tup
    }

    pub fn value(&self, _args: &Args) -> Result<LinkValue> {
        Err(DaisyError::NotImplemented("tuple link evaluation"))
    }
}

impl fmt::Display for TupleLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let items: Vec<String> = self.tup.iter().map(display_value).collect();
        if items.len() == 1 {
            write!(f, "({},)", items[0])
        } else {
            write!(f, "({})", items.join(", "))
        }
    }
}

impl Rich for TupleLink {
    fn rich(&self) -> Markup {
        Markup::styled(Role::Value, self.to_string())
    }
}

/// One stage of a chain.
#[derive(Debug, Clone)]
pub enum Link {
    Callable(CallableLink),
    Tuple(TupleLink),
}

impl Link {
    pub fn call(&self, args: &Args) -> Result<LinkValue> {
        match self {
            Link::Callable(link) => link.call(args),
            Link::Tuple(link) => link.value(args),
        }
    }

    pub fn show(&self, args: &Args) -> Result<(Signature, LinkValue)> {
        match self {
            Link::Callable(link) => link.show(args),
            Link::Tuple(link) => {
                link.value(args)?;
                Err(DaisyError::NotImplemented("tuple link signature"))
            }
        }
    }

    /// The derived signature; only callable links have one.
    pub fn signature(&self) -> Option<Signature> {
        match self {
            Link::Callable(link) => Some(link.signature()),
            Link::Tuple(_) => None,
        }
    }
}

impl From<Callable> for Link {
    fn from(f: Callable) -> Self {
        Link::Callable(CallableLink::new(f))
    }
}

impl From<TupleLink> for Link {
    fn from(t: TupleLink) -> Self {
        Link::Tuple(t)
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Link::Callable(link) => write!(f, "{}", link),
            Link::Tuple(link) => write!(f, "{}", link),
        }
    }
}

impl Rich for Link {
    fn rich(&self) -> Markup {
        match self {
            Link::Callable(link) => link.rich(),
            Link::Tuple(link) => link.rich(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::callable::ParamSpec;
    use serde_json::json;

    fn add() -> Callable {
        Callable::new("add", |args| {
            let x = args.resolve(0, "x")?.as_i64().unwrap_or_default();
            let y = args.resolve_or(1, "y", json!(2)).as_i64().unwrap_or(2);
            Ok(json!(x + y))
        })
        .param(ParamSpec::new("x").ty("str"))
        .param(ParamSpec::new("y").ty("int").with_default(2))
        .returns("int")
    }

    #[test]
    fn test_show_overlays_args_and_result() {
        let link = CallableLink::new(add());
        let (sig, ret) = link.show(&Args::new().arg(3).kwarg("y", 4)).unwrap();
        assert_eq!(ret, json!(7));
        assert_eq!(sig.to_string(), "add(x: str = 3, y: int = 4) -> 7");
        assert!(sig.ret().highlight);
    }

    #[test]
    fn test_show_unknown_keyword_fails() {
        let link = CallableLink::new(add());
        let err = link.show(&Args::new().arg(1).kwarg("z", 4)).unwrap_err();
        assert!(matches!(err, DaisyError::Lookup(_)));
    }

    #[test]
    fn test_show_needs_declared_params() {
        let undeclared = CallableLink::new(Callable::new("id", |args| {
            Ok(args.get(0).cloned().unwrap_or_default())
        }));
        assert_eq!(undeclared.call(&Args::single(1)).unwrap(), json!(1));
        assert_eq!(
            undeclared.show(&Args::single(1)).unwrap_err(),
            DaisyError::Lookup(crate::core::signature::Key::Position(0))
        );

        let declared = CallableLink::new(undeclared.callable().clone().param("x"));
        let (sig, ret) = declared.show(&Args::single(1)).unwrap();
        assert_eq!(ret, json!(1));
        assert_eq!(sig.to_string(), "id(x = 1) -> 1");
    }

    #[test]
    fn test_show_leaves_fresh_signature_untouched() {
        let link = CallableLink::new(add());
        link.show(&Args::single(1)).unwrap();
        assert_eq!(link.to_string(), "add(x: str, y: int = 2) -> int");
    }

    #[test]
    fn test_tuple_link_never_evaluates() {
        for tup in [vec![], vec![json!(1)], vec![json!("a"), json!(2.5)]] {
            let link = TupleLink::new(tup);
            assert_eq!(
                link.value(&Args::single(1)),
                Err(DaisyError::NotImplemented("tuple link evaluation"))
            );
            let link = Link::from(link);
            assert!(link.call(&Args::new()).is_err());
            assert!(link.show(&Args::new()).is_err());
            assert!(link.signature().is_none());
        }
    }

    #[test]
    fn test_tuple_display() {
        assert_eq!(TupleLink::new(vec![json!(1)]).to_string(), "(1,)");
        assert_eq!(
            TupleLink::new(vec![json!(1), json!("b")]).to_string(),
            "(1, b)"
        );
    }
}
