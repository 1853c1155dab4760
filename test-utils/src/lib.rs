//! Rocket Bot Test Utils
//!
//! Provides shared testing utilities for the bot's unit tests. Serenity models are
//! built by deserializing JSON shaped like Discord's API payloads, so tests exercise
//! the same types the gateway delivers at runtime.
//!
//! # Overview
//!
//! The test utilities consist of two main components:
//! - **TestBuilder**: Fluent builder assembling the channels and voice states of a guild
//! - **serenity**: Factories for individual Serenity objects (channels, roles, voice
//!   states, permission overwrites)
//!
//! # Usage
//!
//! ```rust,ignore
//! use serenity::all::Permissions;
//! use test_utils::{builder::TestBuilder, serenity::member_overwrite};
//!
//! #[test]
//! fn snapshot_counts_occupants() {
//!     let guild = TestBuilder::new(1)
//!         .with_category(50, 0, vec![member_overwrite(7, Permissions::MANAGE_CHANNELS)])
//!         .with_voice_channel(51, Some(50), 0, 2)
//!         .build();
//!
//!     assert_eq!(guild.voice_states.len(), 2);
//! }
//! ```

pub mod builder;
pub mod context;
pub mod serenity;
