//! Integration suites for the query engine.
