//! Seed tool
//!
//! Reads a YAML manifest of restaurant registration requests, logs in as
//! the manifest's account, uploads each record's photos, and submits the
//! records at a gentle pace. A failing record is reported and skipped.

mod manifest;
mod seeder;

pub use manifest::{load_manifest, load_manifest_from_str, SeedAccount, SeedManifest, SeedRequest};
pub use seeder::{SeedFailure, SeedOptions, SeedReport, SeededRequest, Seeder};

#[cfg(test)]
mod tests;
