//! Contains logic for mapping between flat and nested outline representations.

pub mod flat_to_nested;
pub mod nested_to_flat;
