use serenity::async_trait;

use crate::{
    error::AppError,
    model::channel::{CategorySnapshot, PoolChannel},
};

/// Access to the Discord state and mutations the voice pool depends on.
///
/// Implementations must not serve `get_category` from a snapshot taken before the
/// call: every pass starts from the platform's current channel list. Mutations are
/// best effort; the platform state may change between the read and the write.
#[async_trait]
pub trait VoicePoolGateway: Send + Sync {
    /// Parent category of a channel, `None` when the channel is not in a category.
    async fn channel_category(&self, guild_id: u64, channel_id: u64)
        -> Result<Option<u64>, AppError>;

    /// Current state of a category, `None` when it no longer exists.
    async fn get_category(
        &self,
        guild_id: u64,
        category_id: u64,
    ) -> Result<Option<CategorySnapshot>, AppError>;

    /// Creates a voice channel inside `category_id`.
    async fn create_voice_channel(
        &self,
        guild_id: u64,
        category_id: u64,
        name: &str,
        position: u16,
        reason: &str,
    ) -> Result<PoolChannel, AppError>;

    async fn delete_channel(&self, channel_id: u64, reason: &str) -> Result<(), AppError>;
}
