//! Hierarchy analysis: linearization of declared types into ancestor chains.
pub mod linearize;
