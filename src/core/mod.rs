//! Composition primitives: callables, signatures, links, chains and pipes.
//!
//! - [`callable::Callable`] pairs a function body with its declared signature
//! - [`signature::Signature`] describes and annotates one call
//! - [`link::Link`] is a single stage of a [`chain::Chain`]
//! - [`pipe::Pipe`] is the immutable alternative to a chain

pub mod args;
pub mod callable;
pub mod chain;
pub mod link;
pub mod pipe;
pub mod signature;
pub mod slice;

/// The Alias for serde_json::Value, the dynamic value flowing through every stage
pub type LinkValue = serde_json::Value;

/// Default string form of a value: strings lose their quotes, everything else
/// uses its JSON display.
pub fn display_value(value: &LinkValue) -> String {
    match value {
        LinkValue::String(s) => s.clone(),
        other => other.to_string(),
    }
}
