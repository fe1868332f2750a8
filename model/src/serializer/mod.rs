//! Serializers for declarations and synthesized members.
//!
//! - **JSON** ([`json`]): the machine-readable output of the `kindgen` client.

pub mod json;
