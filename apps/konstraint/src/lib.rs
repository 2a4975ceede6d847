//! Konstraint core library.
//!
//! This crate turns a directory tree of Rego policies into Gatekeeper
//! resources: one ConstraintTemplate and one Constraint per policy.
//!
//! High-level modules:
//! - `cli`: CLI argument parsing (binary uses this).
//! - `config`: Discovery and effective configuration resolution.
//! - `create`: Generation driver (discover, plan, write).
//! - `rego`: Minimal Rego reader and comment stripping.
//! - `libraries`: Library folder discovery and import resolution.
//! - `matchers`: `@kinds` annotation parsing.
//! - `kind`: Kind names derived from policy directories.
//! - `synth`: Template and constraint synthesis.
//! - `models`: Document and source file schemas.
//! - `output`: Human/JSON run report.
//! - `error`: Error types.
//! - `utils`: Supporting helpers.
pub mod cli;
pub mod config;
pub mod create;
pub mod error;
pub mod kind;
pub mod libraries;
pub mod matchers;
pub mod models;
pub mod output;
pub mod rego;
pub mod synth;
pub mod utils;
