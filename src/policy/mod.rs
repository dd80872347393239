/*!
 * Policy Module
 * Per-type decision units: declarative rule tables and per-check bindings
 */

mod bound;
mod def;

pub use bound::BoundPolicy;
pub use def::{Policy, PolicyBuilder, Predicate};
