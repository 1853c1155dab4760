pub mod command;
pub mod role;
pub mod voice_pool;
