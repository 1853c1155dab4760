//! Domain models shared between the bot runtime, services and the Discord adapter.
//!
//! Models here are plain data. Serenity types are converted into them at the data
//! layer boundary (`data::discord`) so that the service layer can be exercised without
//! a live gateway connection.

pub mod channel;
pub mod command;
pub mod locale;
pub mod voice_state;
