//! Schemas for parsed Rego sources and generated Gatekeeper documents.

pub mod constraint;
pub mod rego;
pub mod template;
