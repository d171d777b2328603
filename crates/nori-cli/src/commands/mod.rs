//! Subcommand implementations for the NORI CLI

pub mod ingest;
pub mod show;
