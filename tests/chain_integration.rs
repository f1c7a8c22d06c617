//! Integration tests for chains, mirroring the `demos/pipes.rs` walkthrough.

use daisy::prelude::*;
use pretty_assertions::assert_eq;
use serde_json::json;

fn num(v: &LinkValue) -> f64 {
    v.as_f64().unwrap_or_default()
}

fn sq() -> Callable {
    Callable::new("sq", |args| {
        let x = args.resolve(0, "x")?;
        match x.as_i64() {
            Some(i) => Ok(json!(i * i)),
            None => Ok(json!(num(x) * num(x))),
        }
    })
    .declare("x: int -> int")
    .expect("valid declaration")
}

fn div() -> Callable {
    Callable::new("div", |args| {
        let x = num(args.resolve(0, "x")?);
        let y = num(&args.resolve_or(1, "y", json!(2)));
        if y == 0.0 {
            return Err(DaisyError::function("div", "division by zero"));
        }
        Ok(json!(x / y))
    })
    .declare("x: int, y: int = 2 -> float")
    .expect("valid declaration")
}

#[test]
fn test_chain_scenario() {
    let chain = Chain::new()
        | Callable::lambda(|x| Ok(json!(num(x) * num(x))))
        | Callable::lambda(|x| Ok(json!(num(x) / 2.0)));
    assert_eq!(chain.call(json!(4)).unwrap(), json!(8.0));

    let head = chain.slice(0..1).unwrap();
    assert_eq!(head.len(), 1);
    assert_eq!(num(&head.call(json!(4)).unwrap()), 16.0);
}

#[test]
fn test_full_slice_keeps_links_in_order() {
    let chain = Chain::with_name("N") | sq() | div();
    let copy = chain.slice(..).unwrap();
    assert_eq!(copy.name(), Some("N[:]"));
    assert_eq!(copy.len(), chain.len());
    let names: Vec<String> = copy
        .links()
        .iter()
        .filter_map(|l| l.signature())
        .map(|s| s.qualname().to_string())
        .collect();
    assert_eq!(names, vec!["sq", "div"]);
    assert_eq!(copy.call(json!(3)).unwrap(), chain.call(json!(3)).unwrap());
}

#[test]
fn test_keyword_arguments_reach_the_first_link() {
    let chain = Chain::new() | div() | sq();
    let result = chain.call(Args::new().arg(9).kwarg("y", 3)).unwrap();
    assert_eq!(result, json!(9.0));

    let trace = chain.trace(Args::new().arg(9).kwarg("y", 3)).unwrap();
    assert_eq!(trace.stages[0].to_string(), "div(x: int = 9, y: int = 3) -> 3.0");
}

#[test]
fn test_function_errors_surface_unchanged() {
    let chain = Chain::new() | div();
    assert_eq!(
        chain.call(Args::new().arg(1).arg(0)),
        Err(DaisyError::function("div", "division by zero"))
    );
}

#[test]
fn test_demo_walkthrough() {
    let mut pipe = daisy() | sq() | div();
    assert_eq!(
        pipe.to_string(),
        "Daisy || sq(x: int) -> int | div(x: int, y: int = 2) -> float"
    );

    pipe = pipe | Callable::lambda(|x| Ok(json!(num(x) + 4.0))) | sq();
    pipe.set_name("ChilliPepper");
    assert_eq!(pipe.len(), 4);
    assert_eq!(pipe.call(json!(2)).unwrap(), json!(36.0));

    let block = pipe.show(json!(2)).unwrap();
    assert_eq!(block.title.plain(), "ChilliPepper(2) = 36.0");
    assert_eq!(
        block.body.plain(),
        concat!(
            "2 | sq(x: int = 2) -> 4 | div(x: int = 4, y: int = 2) -> 2.0",
            " | λ(x = 2.0) -> 6.0 | sq(x: int = 6.0) -> 36.0"
        )
    );

    let segment = pipe.slice(1..3).unwrap();
    assert_eq!(segment.name(), Some("ChilliPepper[1:3]"));
    assert_eq!(segment.call(json!(2)).unwrap(), json!(5.0));
}

#[test]
fn test_show_renders_a_plain_panel() {
    let chain = daisy() | sq();
    let block = chain.show(json!(3)).unwrap();
    let rendered = RenderConfig::plain().renderer().render_block(&block);
    let lines: Vec<&str> = rendered.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("╭─ Daisy(3) = 9 ─"));
    assert_eq!(lines[1], "│ 3 | sq(x: int = 3) -> 9 │");
    assert!(rendered.ends_with('╯'));
}

#[test]
fn test_panel_lists_links() {
    let chain = daisy() | sq() | TupleLink::new(vec![json!(1), json!(2)]);
    let panel = chain.panel();
    assert_eq!(panel.title.plain(), "Daisy");
    assert_eq!(panel.body.plain(), "sq(x: int) -> int | (1, 2)");
}

#[test]
fn test_named_view_shares_growth() {
    let original = daisy() | sq();
    let view = original.named("Other");
    let _ = view.clone() | div();
    assert_eq!(original.len(), 2);
    assert_eq!(original.name(), Some("Daisy"));
    assert_eq!(view.name(), Some("Other"));
}
