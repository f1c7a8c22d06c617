//! Both composition styles must agree with plain function application.

use daisy::prelude::*;
use proptest::prelude::*;
use serde_json::json;

fn affine(name: &'static str, a: i64, b: i64) -> Callable {
    Callable::new(name, move |args| {
        let x = args.resolve(0, "x")?.as_i64().unwrap_or_default();
        Ok(json!(a * x + b))
    })
    .param(ParamSpec::new("x").ty("int"))
    .returns("int")
}

proptest! {
    #[test]
    fn chain_matches_nested_application(x in -1000i64..1000, a in -10i64..10, b in -10i64..10) {
        let f = |v: i64| a * v + b;
        let g = |v: i64| 3 * v - 1;
        let chain = Chain::new() | affine("f", a, b) | affine("g", 3, -1);
        prop_assert_eq!(chain.call(json!(x)).unwrap(), json!(g(f(x))));
    }

    #[test]
    fn pipe_matches_nested_application(x in -1000i64..1000, a in -10i64..10, b in -10i64..10) {
        let f = |v: i64| a * v + b;
        let g = |v: i64| 3 * v - 1;
        let pipe = start() | affine("f", a, b) | affine("g", 3, -1);
        prop_assert_eq!(pipe.call(json!(x)).unwrap(), json!(g(f(x))));
    }

    #[test]
    fn chain_and_pipe_agree(x in -1000i64..1000, n in 1usize..6) {
        let mut chain = Chain::new();
        let first = affine("s0", 2, 1);
        let mut pipe = start() | first.clone();
        chain = chain | first;
        for i in 1..n {
            let stage = affine("s", 1, i as i64);
            chain = chain | stage.clone();
            pipe = pipe | stage;
        }
        prop_assert_eq!(chain.len(), pipe.len());
        prop_assert_eq!(chain.call(json!(x)).unwrap(), pipe.call(json!(x)).unwrap());
    }
}

#[test]
fn test_pipe_is_not_mutated_by_composition() {
    let pipe = start()
        | Callable::lambda(|x| Ok(json!(x.as_f64().unwrap_or_default().powi(2))))
        | Callable::lambda(|x| Ok(json!(x.as_f64().unwrap_or_default() / 2.0)));
    let pipe2 = &pipe | Callable::lambda(|x| Ok(json!(x.as_f64().unwrap_or_default() + 4.0)));

    assert!(!pipe2.ptr_eq(&pipe));
    assert_eq!(pipe2.call(json!(4)).unwrap(), json!(12.0));
    assert_eq!(pipe.call(json!(4)).unwrap(), json!(8.0));
}

#[test]
fn test_chain_is_mutated_by_composition() {
    let chain = Chain::new() | affine("f", 1, 1);
    let chain2 = chain.clone() | affine("g", 1, 1);
    assert!(chain2.ptr_eq(&chain));
    assert_eq!(chain.len(), chain2.len());
    assert_eq!(chain.call(json!(0)).unwrap(), json!(2));
}
