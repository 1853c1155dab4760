pub mod voice_pool;

pub use voice_pool::DiscordVoicePoolGateway;
