//! Dynamic voice channel pool.
//!
//! Keeps exactly one empty voice channel available in every category the bot is
//! allowed to manage. Each voice state update triggers a reconciliation pass for the
//! categories of the channel the user left and the channel the user joined:
//!
//! - more than one empty voice channel: all but the last one (canonical order) are
//!   deleted concurrently
//! - no empty voice channel: one is created after the highest voice channel
//! - exactly one: nothing happens
//!
//! There is no background sweep and no cached state. Every pass re-reads the category
//! from Discord, so a pass that failed or raced with another event is corrected by the
//! next event in that category.

pub mod eligibility;
pub mod gateway;
pub mod lock;
pub mod ordering;

#[cfg(test)]
mod test;

use dioxus_logger::tracing;
use std::sync::Arc;
use tokio::task::JoinSet;

use crate::{error::AppError, model::voice_state::VoiceStateEvent};

use self::{
    eligibility::{PoolAction, PoolView},
    gateway::VoicePoolGateway,
    lock::CategoryLocks,
};

/// Audit log reason attached to channels created by the pool.
pub const CREATED_CHANNEL_REASON: &str = "Created dynamic voice channel";
/// Audit log reason attached to surplus empty channels deleted by the pool.
pub const OBSOLETE_CHANNEL_REASON: &str = "Obsolete dynamic voice channel";

/// Result of a single-category pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PassOutcome {
    /// The category no longer exists.
    Missing,
    /// The bot may not manage channels in the category.
    Unmanaged,
    /// Exactly one empty voice channel already exists.
    Satisfied,
    /// A new empty voice channel was created.
    Created { channel_id: u64 },
    /// Surplus empty channels were deleted. Failed deletions are left for the next event.
    Pruned {
        survivor: u64,
        deleted: usize,
        failed: usize,
    },
}

/// Reconciles voice pools against the current Discord state.
pub struct VoicePoolService<G> {
    gateway: Arc<G>,
    channel_name: String,
    locks: CategoryLocks,
}

impl<G> VoicePoolService<G>
where
    G: VoicePoolGateway + 'static,
{
    /// Creates a new VoicePoolService instance.
    ///
    /// # Arguments
    /// - `gateway` - Discord access used for reads and mutations
    /// - `channel_name` - Name given to newly created voice channels
    /// - `locks` - Category locks shared by every pass of this process
    pub fn new(gateway: Arc<G>, channel_name: impl Into<String>, locks: CategoryLocks) -> Self {
        Self {
            gateway,
            channel_name: channel_name.into(),
            locks,
        }
    }

    /// Reconciles every category touched by a voice state update.
    ///
    /// The left and joined channels are resolved to their categories; each distinct
    /// category is reconciled once. Passes for different categories run concurrently
    /// and a failing or slow pass does not hold back the other. Errors are logged and
    /// never returned.
    pub async fn reconcile(&self, event: VoiceStateEvent) {
        let Some(guild_id) = event.guild_id else {
            tracing::debug!(
                "Ignoring voice state update of user {} outside of a guild",
                event.user_id
            );
            return;
        };

        let channels = event.affected_channels();

        let (first, second) = tokio::join!(
            self.resolve_category(guild_id, channels.first().copied()),
            self.resolve_category(guild_id, channels.get(1).copied())
        );
        let second = second.filter(|category_id| Some(*category_id) != first);

        tokio::join!(
            self.run_pass(guild_id, first),
            self.run_pass(guild_id, second)
        );
    }

    /// Restores the pool invariant for one category.
    ///
    /// # Arguments
    /// - `guild_id` - Guild containing the category
    /// - `category_id` - Category to reconcile
    ///
    /// # Returns
    /// - `Ok(PassOutcome)` - What the pass observed and did; partial deletion failures
    ///   are reported in `PassOutcome::Pruned`
    /// - `Err(AppError)` - Reading the category or creating the channel failed
    pub async fn reconcile_category(
        &self,
        guild_id: u64,
        category_id: u64,
    ) -> Result<PassOutcome, AppError> {
        let Some(snapshot) = self.gateway.get_category(guild_id, category_id).await? else {
            tracing::debug!(
                "Category {} no longer exists in guild {}",
                category_id,
                guild_id
            );
            return Ok(PassOutcome::Missing);
        };

        if !snapshot.manageable {
            tracing::debug!(
                "Not allowed to manage channels in category {} of guild {}",
                category_id,
                guild_id
            );
            return Ok(PassOutcome::Unmanaged);
        }

        let view = PoolView::from_snapshot(&snapshot);

        match view.plan() {
            PoolAction::Keep => Ok(PassOutcome::Satisfied),
            PoolAction::Create { position } => {
                let channel = self
                    .gateway
                    .create_voice_channel(
                        guild_id,
                        category_id,
                        &self.channel_name,
                        position,
                        CREATED_CHANNEL_REASON,
                    )
                    .await?;

                tracing::info!(
                    "Created dynamic voice channel '{}' ({}) in category {}",
                    channel.name,
                    channel.id,
                    category_id
                );

                Ok(PassOutcome::Created {
                    channel_id: channel.id,
                })
            }
            PoolAction::Prune { survivor, obsolete } => {
                let (deleted, failed) = self.delete_obsolete(obsolete).await;

                tracing::info!(
                    "Removed {} obsolete dynamic channels in category {} ({} failed)",
                    deleted,
                    category_id,
                    failed
                );

                Ok(PassOutcome::Pruned {
                    survivor,
                    deleted,
                    failed,
                })
            }
        }
    }

    /// Resolves a channel to its parent category, logging instead of failing.
    async fn resolve_category(&self, guild_id: u64, channel_id: Option<u64>) -> Option<u64> {
        let channel_id = channel_id?;

        match self.gateway.channel_category(guild_id, channel_id).await {
            Ok(Some(category_id)) => Some(category_id),
            Ok(None) => {
                tracing::debug!(
                    "Voice channel {} in guild {} has no category",
                    channel_id,
                    guild_id
                );
                None
            }
            Err(e) => {
                tracing::error!(
                    "Failed to resolve category of channel {} in guild {}: {}",
                    channel_id,
                    guild_id,
                    e
                );
                None
            }
        }
    }

    async fn run_pass(&self, guild_id: u64, category_id: Option<u64>) {
        let Some(category_id) = category_id else {
            return;
        };

        let guard = self.locks.acquire(category_id).await;
        let result = self.reconcile_category(guild_id, category_id).await;
        self.locks.release(category_id, guard).await;

        match result {
            Ok(outcome) => {
                tracing::debug!(
                    "Reconciled voice pool of category {}: {:?}",
                    category_id,
                    outcome
                );
            }
            Err(e) => {
                tracing::error!(
                    "Failed to reconcile voice pool of category {} in guild {}: {}",
                    category_id,
                    guild_id,
                    e
                );
            }
        }
    }

    /// Deletes channels concurrently and waits for all of them.
    ///
    /// # Returns
    /// - `(deleted, failed)` - Number of successful and failed deletions
    async fn delete_obsolete(&self, obsolete: Vec<u64>) -> (usize, usize) {
        let mut deletions = JoinSet::new();

        for channel_id in obsolete {
            let gateway = Arc::clone(&self.gateway);
            deletions.spawn(async move {
                let result = gateway
                    .delete_channel(channel_id, OBSOLETE_CHANNEL_REASON)
                    .await;
                (channel_id, result)
            });
        }

        let mut deleted = 0;
        let mut failed = 0;

        while let Some(joined) = deletions.join_next().await {
            match joined {
                Ok((_, Ok(()))) => deleted += 1,
                Ok((channel_id, Err(e))) => {
                    tracing::error!(
                        "Failed to delete obsolete voice channel {}: {}",
                        channel_id,
                        e
                    );
                    failed += 1;
                }
                Err(e) => {
                    tracing::error!("Voice channel deletion task failed: {}", e);
                    failed += 1;
                }
            }
        }

        (deleted, failed)
    }
}
