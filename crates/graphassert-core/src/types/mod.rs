//! Core data types.
//!
//! This module defines the types that represent nodes and their properties.

mod id;
mod node;
mod value;

pub use id::NodeId;
pub use node::{Label, Node};
pub use value::Value;
