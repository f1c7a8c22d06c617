//! # Daisy
//!
//! Pipes and daisy chains: compose plain functions into one callable pipeline
//! with `|`, then call it, slice it, or trace every stage of a call.
//!
//! ## Features
//!
//! - **Chains**: named, growable pipelines that can be sliced and traced
//! - **Pipes**: immutable pipelines whose intermediate values stay reusable
//! - **Signatures**: declared parameters and return types, overlaid with the
//!   values of an actual call and rendered as plain or annotated text
//!
//! ## Quick Start
//!
//! ```rust
//! use daisy::prelude::*;
//! use serde_json::json;
//!
//! let sq = Callable::new("sq", |args| {
//!     let x = args.resolve(0, "x")?.as_i64().unwrap_or_default();
//!     Ok(json!(x * x))
//! })
//! .declare("x: int -> int")?;
//!
//! let half = Callable::lambda(|x| Ok(json!(x.as_f64().unwrap_or_default() / 2.0)));
//!
//! let chain = daisy() | sq.clone() | half.clone();
//! assert_eq!(chain.call(json!(4))?, json!(8.0));
//!
//! let pipe = start() | sq | half;
//! assert_eq!(pipe.call(json!(4))?, json!(8.0));
//! # Ok::<(), daisy::DaisyError>(())
//! ```
//!
//! ## Module Organization
//!
//! - [`core`]: callables, signatures, links, chains and pipes
//! - [`render`]: annotated markup, blocks and terminal renderers
//! - [`prelude`]: Commonly used types and traits (import with `use daisy::prelude::*`)

// ============================================================================
// Core Module
// ============================================================================

pub mod core;
pub mod error;
pub mod render;

// ============================================================================
// Public Re-exports - Granular Imports
// ============================================================================

pub use crate::core::LinkValue;
pub use crate::core::args::Args;
pub use crate::core::callable::{Callable, Declaration, ParamSpec};
pub use crate::core::chain::{Chain, Operand, Trace, daisy};
pub use crate::core::link::{CallableLink, Link, TupleLink};
pub use crate::core::pipe::{Pipe, PipeStart, start};
pub use crate::core::signature::{Key, Param, ReturnSlot, Signature};
pub use crate::core::slice::Slice;
pub use error::{DaisyError, Result};

// ============================================================================
// Prelude Modules - Convenient Bulk Imports
// ============================================================================

/// The main prelude: imports everything you need to build and inspect pipelines.
///
/// # Example
/// ```rust
/// use daisy::prelude::*;
/// ```
pub mod prelude {
    pub use super::{
        Args, Callable, Chain, DaisyError, Link, LinkValue, ParamSpec, Pipe, PipeStart, Signature,
        Slice, TupleLink, daisy, start,
    };
    pub use crate::render::{Block, ColorMode, Markup, RenderConfig, Renderer, Rich, Role};
}

// ============================================================================
// Library Metadata
// ============================================================================

/// The version of this crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The name of this crate.
pub const NAME: &str = env!("CARGO_PKG_NAME");
