//! # frab-core
//!
//! Core types for frabsync.
//!
//! This crate provides the foundational types shared across all frabsync
//! crates:
//! - Entity structs for all domain objects (events, rooms, talks, slots, …)
//! - The per-refresh change map recorded alongside every reconciliation

pub mod change;
pub mod entities;
