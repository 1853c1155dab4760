//! Test factories for creating Serenity API objects.
//!
//! This module provides factory functions for creating mock Serenity structs
//! (channels, roles, voice states) for testing purposes. These factories create
//! valid Serenity objects by deserializing JSON, simulating what Discord's API
//! would return.
//!
//! # Usage
//!
//! ```rust,ignore
//! use serenity::all::{ChannelType, Permissions};
//! use test_utils::serenity::{create_test_channel, create_test_role, create_test_voice_state};
//!
//! let lounge = create_test_channel(51, 1, ChannelType::Voice, 0, Some(50));
//! let state = create_test_voice_state(1, 7, Some(51));
//! let admin = create_test_role(111111111, "Admin", 10, Permissions::ADMINISTRATOR);
//! ```
//!
//! # Available Factories
//!
//! - `channel::create_test_channel` / `channel::create_test_category` - Guild channels
//! - `channel::member_overwrite` / `channel::role_overwrite` - Permission overwrite payloads
//! - `role::create_test_role` - Guild roles
//! - `voice_state::create_test_voice_state` - Voice states

pub mod channel;
pub mod role;
pub mod voice_state;

// Re-export commonly used functions for convenience
pub use channel::{create_test_category, create_test_channel, member_overwrite, role_overwrite};
pub use role::create_test_role;
pub use voice_state::create_test_voice_state;
