//! R-Tree integration test module.
//!
//! These tests drive the index only through its public API and check the
//! structural invariants after every test body.

mod randomized_test;
mod scenario_test;
