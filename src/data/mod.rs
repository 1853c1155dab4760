//! Data access layer.
//!
//! The bot keeps no database. Its only source of truth is Discord itself, reached
//! through serenity's HTTP client and gateway cache. Adapters in this module convert
//! serenity models into the domain models of `crate::model` at the boundary.

pub mod discord;
