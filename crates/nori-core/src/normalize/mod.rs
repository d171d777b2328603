//! Field-level normalization primitives shared by the extractors.

pub mod dates;
pub mod dosage;
pub mod telecom;
