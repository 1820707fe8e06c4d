//! Shared generators for the syntax-node test suites.

pub mod ir;
