//! # audit-core
//!
//! Core types for the multi-tenant audit log store.
//!
//! This crate provides the foundational types shared across all audit crates:
//! - Entity structs for the append-only record kinds (transfer, operate,
//!   password change, login, command execution)
//! - Choice enums with their storage codes and display labels
//! - Per-kind field tables driving filtering, keyword search, and ordering
//! - The backend-neutral [`query::LogQuery`] and date-range normalization
//! - Tenant context and the tenant scope resolver
//! - Display lookups for translation keys and login failure reasons

pub mod display;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod identity;
pub mod ids;
pub mod query;
pub mod scope;
