//! A walkthrough of daisy chains and pipes.
//!
//! This example demonstrates:
//! - Declaring callables with their signatures
//! - Building a chain with `|` and renaming it
//! - Showing a computation through every stage
//! - Slicing a chain
//! - Reusing intermediate pipes
//!
//! Run with `RUST_LOG=debug cargo run --example pipes` to see composition logs.

use daisy::prelude::*;
use serde_json::json;

fn num(v: &LinkValue) -> f64 {
    v.as_f64().unwrap_or_default()
}

fn main() -> Result<(), DaisyError> {
    env_logger::init();
    let renderer = RenderConfig::default().renderer();

    // ============================================================================
    // Step 1: Declare the functions
    // ============================================================================

    let sq = Callable::new("sq", |args| {
        let x = num(args.resolve(0, "x")?);
        Ok(json!(x * x))
    })
    .declare("x: int -> int")?;

    let div = Callable::new("div", |args| {
        let x = num(args.resolve(0, "x")?);
        let y = num(&args.resolve_or(1, "y", json!(2)));
        Ok(json!(x / y))
    })
    .declare("x: int, y: int = 2 -> float")?;

    // ============================================================================
    // Step 2: Define a chain
    // ============================================================================

    let pipe = daisy() | sq.clone() | div;
    println!("{}", renderer.render_block(&pipe.panel()));

    // Each `|` returns the same chain
    let mut pipe = pipe | Callable::lambda(|x| Ok(json!(num(x) + 4.0))) | sq;
    pipe.set_name("ChilliPepper");
    println!("{}", renderer.render_block(&pipe.panel()));

    // ============================================================================
    // Step 3: Show a computation through the chain
    // ============================================================================

    println!("pipe(2) = {}", pipe.call(json!(2))?);
    println!("{}", renderer.render_block(&pipe.show(json!(2))?));

    // ============================================================================
    // Step 4: Slice the chain
    // ============================================================================

    let segment = pipe.slice(1..3)?;
    println!("{}", segment);
    println!("{}", renderer.render_block(&segment.show(json!(2))?));

    // ============================================================================
    // Step 5: Immutable pipes
    // ============================================================================

    let p = start()
        | Callable::lambda(|x| Ok(json!(num(x) * num(x))))
        | Callable::lambda(|x| Ok(json!(num(x) / 2.0)));
    let p2 = &p | Callable::lambda(|x| Ok(json!(num(x) + 4.0)));
    println!("p(4) = {}, p2(4) = {}", p.call(json!(4))?, p2.call(json!(4))?);

    Ok(())
}
