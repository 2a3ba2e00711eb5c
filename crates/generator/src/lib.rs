//! Feature-to-spec translation engine for FeatureSpec.
//!
//! Parses Gherkin-style feature files and mechanically generates
//! executable Playwright spec files, matching step text to browser
//! actions via an ordered pattern-rule table.
//!
//! # Modules
//! - `parser` — Feature file parser producing [`parser::FeatureRecord`]s
//! - `translate` — Step-to-statement translator with the ordered rule table
//! - `emit` — Spec file assembly (one describe block per feature)
//! - `pipeline` — Clean-then-generate filesystem driver

pub mod emit;
pub mod parser;
pub mod pipeline;
pub mod translate;
