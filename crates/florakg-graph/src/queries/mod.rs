//! Fixed-shape Cypher queries.

pub mod plants;
