use crate::core::LinkValue;
use crate::core::args::Args;
use crate::core::callable::Callable;
use crate::error::Result;
use std::ops::BitOr;
use std::rc::Rc;

/// The sentinel every pipe starts from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipeStart;

/// The canonical start sentinel: `start() | f | g`.
pub fn start() -> PipeStart {
    PipeStart
}

#[derive(Debug, Clone)]
enum Predecessor {
    Start,
    Pipe(Pipe),
}

#[derive(Debug)]
struct PipeNode {
    f: Callable,
    prv: Predecessor,
}

/// An immutable pipeline, linked backwards from its last function.
///
/// Composing never touches an existing pipe: every intermediate value stays
/// valid and can be extended in several directions.
#[derive(Debug, Clone)]
pub struct Pipe(Rc<PipeNode>);

impl Pipe {
    fn then(&self, f: Callable) -> Pipe {
        log::debug!("Composing `{}` onto a pipe of length {}", f.qualname(), self.len());
        Pipe(Rc::new(PipeNode {
            f,
            prv: Predecessor::Pipe(self.clone()),
        }))
    }

    /// Evaluates the earliest function first, feeding each result forward.
    pub fn call(&self, args: impl Into<Args>) -> Result<LinkValue> {
        self.eval(&args.into())
    }

    fn eval(&self, args: &Args) -> Result<LinkValue> {
        match &self.0.prv {
            Predecessor::Start => self.0.f.call(args),
            Predecessor::Pipe(prv) => {
                let res = prv.eval(args)?;
                log::trace!("Pipe stage `{}` with ({})", self.0.f.qualname(), res);
                self.0.f.call(&Args::single(res))
            }
        }
    }

    /// Number of functions in the pipe.
    pub fn len(&self) -> usize {
        match &self.0.prv {
            Predecessor::Start => 1,
            Predecessor::Pipe(prv) => prv.len() + 1,
        }
    }

    /// Always false: a pipe holds at least one function.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Whether both values are the same pipe node.
    pub fn ptr_eq(&self, other: &Pipe) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl BitOr<Callable> for PipeStart {
    type Output = Pipe;

    fn bitor(self, f: Callable) -> Pipe {
        log::debug!("Starting a pipe with `{}`", f.qualname());
        Pipe(Rc::new(PipeNode {
            f,
            prv: Predecessor::Start,
        }))
    }
}

impl BitOr<Callable> for &Pipe {
    type Output = Pipe;

    fn bitor(self, f: Callable) -> Pipe {
        self.then(f)
    }
}

impl BitOr<Callable> for Pipe {
    type Output = Pipe;

    fn bitor(self, f: Callable) -> Pipe {
        self.then(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DaisyError;
    use serde_json::json;
    use std::cell::RefCell;

    fn num(v: &LinkValue) -> f64 {
        v.as_f64().unwrap_or_default()
    }

    #[test]
    fn test_pipe_scenario() {
        let pipe = start()
            | Callable::lambda(|x| Ok(json!(num(x) * num(x))))
            | Callable::lambda(|x| Ok(json!(num(x) / 2.0)));
        assert_eq!(pipe.call(json!(4)).unwrap(), json!(8.0));

        let pipe2 = &pipe | Callable::lambda(|x| Ok(json!(num(x) + 4.0)));
        assert_eq!(pipe2.call(json!(4)).unwrap(), json!(12.0));
        assert_eq!(pipe.call(json!(4)).unwrap(), json!(8.0));
        assert!(!pipe2.ptr_eq(&pipe));
        assert_eq!((pipe.len(), pipe2.len()), (2, 3));
    }

    #[test]
    fn test_pipe_branches_share_predecessor() {
        let base = start() | Callable::lambda(|x| Ok(json!(num(x) + 1.0)));
        let doubled = &base | Callable::lambda(|x| Ok(json!(num(x) * 2.0)));
        let negated = &base | Callable::lambda(|x| Ok(json!(-num(x))));
        assert_eq!(doubled.call(json!(1)).unwrap(), json!(4.0));
        assert_eq!(negated.call(json!(1)).unwrap(), json!(-2.0));
    }

    #[test]
    fn test_first_function_receives_all_args() {
        let add = Callable::new("add", |args| {
            let x = num(args.resolve(0, "x")?);
            let y = num(args.resolve(1, "y")?);
            Ok(json!(x + y))
        });
        let pipe = start() | add | Callable::lambda(|x| Ok(json!(num(x) * 10.0)));
        assert_eq!(
            pipe.call(Args::new().arg(1).kwarg("y", 2)).unwrap(),
            json!(30.0)
        );
    }

    #[test]
    fn test_evaluates_in_pipeline_order() {
        let order = Rc::new(RefCell::new(Vec::new()));
        let stage = |name: &'static str| {
            let order = Rc::clone(&order);
            Callable::new(name, move |args| {
                order.borrow_mut().push(name);
                Ok(args.get(0).cloned().unwrap_or_default())
            })
        };
        let pipe = start() | stage("a") | stage("b") | stage("c");
        pipe.call(json!(0)).unwrap();
        assert_eq!(*order.borrow(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_errors_abort_the_pipe() {
        let pipe = start()
            | Callable::new("fail", |_| Err(DaisyError::function("fail", "nope")))
            | Callable::lambda(|x| Ok(x.clone()));
        assert_eq!(
            pipe.call(json!(1)),
            Err(DaisyError::function("fail", "nope"))
        );
    }
}
