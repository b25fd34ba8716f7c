//! # idea-core
//!
//! Core types, ID generation, and error types for the idea tracker.
//!
//! This crate provides the foundational types shared across all idea crates:
//! - Entity structs for ideas and their chat transcripts
//! - The chat role enum
//! - ID prefix constants and generation helpers
//! - Cross-cutting error types
//! - The default label set seeded into fresh stores

pub mod entities;
pub mod enums;
pub mod errors;
pub mod ids;

/// Labels every fresh store starts with.
pub const DEFAULT_LABELS: [&str; 3] = ["Agent", "Automation", "Research"];
