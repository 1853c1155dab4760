use crate::{
    error::AppError,
    model::{
        channel::{CategorySnapshot, ChannelKind, PoolChannel},
        voice_state::VoiceStateEvent,
    },
    service::voice_pool::{
        eligibility::{PoolAction, PoolView},
        gateway::VoicePoolGateway,
        lock::CategoryLocks,
        PassOutcome, VoicePoolService, CREATED_CHANNEL_REASON, OBSOLETE_CHANNEL_REASON,
    },
};
use serenity::async_trait;
use std::{
    collections::{HashMap, HashSet},
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc, Mutex,
    },
};
use tokio::sync::Notify;


const GUILD_ID: u64 = 1;
const CHANNEL_NAME: &str = "Lounge";

/// A mutation issued against the fake gateway.
#[derive(Debug, Clone, PartialEq)]
enum Mutation {
    Create {
        category_id: u64,
        name: String,
        position: u16,
        reason: String,
    },
    Delete {
        channel_id: u64,
        reason: String,
    },
}

/// In-memory Discord stand-in.
///
/// Holds categories keyed by ID and applies creates and deletes to them, so a second
/// pass observes the result of the first one. Selected calls can be made to fail or to
/// wait on a `Notify` before answering.
#[derive(Default)]
struct FakeGateway {
    categories: Mutex<HashMap<u64, CategorySnapshot>>,
    parents: Mutex<HashMap<u64, u64>>,
    mutations: Mutex<Vec<Mutation>>,
    failing_deletes: HashSet<u64>,
    failing_categories: HashSet<u64>,
    failing_creates: bool,
    stalled_categories: HashMap<u64, Arc<Notify>>,
    next_channel_id: AtomicU64,
}

impl FakeGateway {
    fn new() -> Self {
        Self {
            next_channel_id: AtomicU64::new(10_000),
            ..Default::default()
        }
    }

    fn with_category(self, snapshot: CategorySnapshot) -> Self {
        {
            let mut parents = self.parents.lock().unwrap();
            for channel in &snapshot.channels {
                parents.insert(channel.id, snapshot.id);
            }
        }
        self.categories
            .lock()
            .unwrap()
            .insert(snapshot.id, snapshot);
        self
    }

    fn failing_delete(mut self, channel_id: u64) -> Self {
        self.failing_deletes.insert(channel_id);
        self
    }

    fn failing_category(mut self, category_id: u64) -> Self {
        self.failing_categories.insert(category_id);
        self
    }

    fn failing_creates(mut self) -> Self {
        self.failing_creates = true;
        self
    }

    fn stalled_category(mut self, category_id: u64, release: Arc<Notify>) -> Self {
        self.stalled_categories.insert(category_id, release);
        self
    }

    fn mutations(&self) -> Vec<Mutation> {
        self.mutations.lock().unwrap().clone()
    }

    fn category(&self, category_id: u64) -> CategorySnapshot {
        self.categories
            .lock()
            .unwrap()
            .get(&category_id)
            .cloned()
            .expect("category exists in fake gateway")
    }

    fn empty_voice_channels(&self, category_id: u64) -> Vec<u64> {
        let snapshot = self.category(category_id);
        PoolView::from_snapshot(&snapshot)
            .empty
            .iter()
            .map(|channel| channel.id)
            .collect()
    }
}

#[async_trait]
impl VoicePoolGateway for FakeGateway {
    async fn channel_category(
        &self,
        _guild_id: u64,
        channel_id: u64,
    ) -> Result<Option<u64>, AppError> {
        Ok(self.parents.lock().unwrap().get(&channel_id).copied())
    }

    async fn get_category(
        &self,
        _guild_id: u64,
        category_id: u64,
    ) -> Result<Option<CategorySnapshot>, AppError> {
        if let Some(release) = self.stalled_categories.get(&category_id) {
            release.notified().await;
        }

        if self.failing_categories.contains(&category_id) {
            return Err(AppError::InternalError(format!(
                "category {} unavailable",
                category_id
            )));
        }

        Ok(self.categories.lock().unwrap().get(&category_id).cloned())
    }

    async fn create_voice_channel(
        &self,
        _guild_id: u64,
        category_id: u64,
        name: &str,
        position: u16,
        reason: &str,
    ) -> Result<PoolChannel, AppError> {
        self.mutations.lock().unwrap().push(Mutation::Create {
            category_id,
            name: name.to_string(),
            position,
            reason: reason.to_string(),
        });

        if self.failing_creates {
            return Err(AppError::InternalError("rate limited".to_string()));
        }

        let channel = PoolChannel {
            id: self.next_channel_id.fetch_add(1, Ordering::SeqCst),
            name: name.to_string(),
            kind: ChannelKind::Voice,
            position,
            occupants: 0,
        };

        let mut categories = self.categories.lock().unwrap();
        let snapshot = categories
            .get_mut(&category_id)
            .ok_or_else(|| AppError::NotFound(format!("category {}", category_id)))?;
        snapshot.channels.push(channel.clone());

        Ok(channel)
    }

    async fn delete_channel(&self, channel_id: u64, reason: &str) -> Result<(), AppError> {
        self.mutations.lock().unwrap().push(Mutation::Delete {
            channel_id,
            reason: reason.to_string(),
        });

        if self.failing_deletes.contains(&channel_id) {
            return Err(AppError::NotFound(format!("channel {}", channel_id)));
        }

        for snapshot in self.categories.lock().unwrap().values_mut() {
            snapshot.channels.retain(|channel| channel.id != channel_id);
        }

        Ok(())
    }
}

fn voice(id: u64, position: u16, occupants: usize) -> PoolChannel {
    PoolChannel {
        id,
        name: format!("voice-{}", id),
        kind: ChannelKind::Voice,
        position,
        occupants,
    }
}

fn text(id: u64, position: u16) -> PoolChannel {
    PoolChannel {
        id,
        name: format!("text-{}", id),
        kind: ChannelKind::Text,
        position,
        occupants: 0,
    }
}

fn category(id: u64, manageable: bool, channels: Vec<PoolChannel>) -> CategorySnapshot {
    CategorySnapshot {
        id,
        guild_id: GUILD_ID,
        manageable,
        channels,
    }
}

fn service(gateway: &Arc<FakeGateway>) -> VoicePoolService<FakeGateway> {
    service_with_locks(gateway, CategoryLocks::new())
}

fn service_with_locks(
    gateway: &Arc<FakeGateway>,
    locks: CategoryLocks,
) -> VoicePoolService<FakeGateway> {
    VoicePoolService::new(Arc::clone(gateway), CHANNEL_NAME, locks)
}

fn event(left: Option<u64>, joined: Option<u64>) -> VoiceStateEvent {
    VoiceStateEvent {
        guild_id: Some(GUILD_ID),
        user_id: 42,
        left,
        joined,
    }
}
