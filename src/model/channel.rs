//! Channel and category snapshot models for the dynamic voice pool.
//!
//! A `CategorySnapshot` is rebuilt from Discord on every reconciliation pass and is
//! never stored between passes. It carries every child channel of the category so the
//! ordering policy can stay total over all channel kinds, but only voice channels take
//! part in the pool.

/// Discord channel type, ordered by the platform's numeric type code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelKind {
    Text,
    Voice,
    Category,
    News,
    Stage,
    Forum,
    /// Any type code without a dedicated variant.
    Other(u8),
}

impl ChannelKind {
    /// Maps a Discord channel type code to a kind.
    pub fn from_code(code: u8) -> Self {
        match code {
            0 => Self::Text,
            2 => Self::Voice,
            4 => Self::Category,
            5 => Self::News,
            13 => Self::Stage,
            15 => Self::Forum,
            other => Self::Other(other),
        }
    }

    /// Discord channel type code, used as the primary ordering key.
    pub fn code(self) -> u8 {
        match self {
            Self::Text => 0,
            Self::Voice => 2,
            Self::Category => 4,
            Self::News => 5,
            Self::Stage => 13,
            Self::Forum => 15,
            Self::Other(code) => code,
        }
    }
}

/// A child channel of a category as observed at the start of a pass.
#[derive(Debug, Clone, PartialEq)]
pub struct PoolChannel {
    /// Discord channel ID (snowflake, increases with creation time).
    pub id: u64,
    /// Channel display name.
    pub name: String,
    /// Channel type.
    pub kind: ChannelKind,
    /// Position as assigned by Discord. Not unique, ties are broken by `id`.
    pub position: u16,
    /// Number of users currently connected. Always 0 for non-voice channels.
    pub occupants: usize,
}

impl PoolChannel {
    pub fn is_voice(&self) -> bool {
        self.kind == ChannelKind::Voice
    }

    pub fn is_empty(&self) -> bool {
        self.occupants == 0
    }
}

impl AsRef<PoolChannel> for PoolChannel {
    fn as_ref(&self) -> &PoolChannel {
        self
    }
}

/// Authoritative view of one category, read fresh for a single reconciliation pass.
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySnapshot {
    /// Discord category channel ID.
    pub id: u64,
    /// Guild the category belongs to.
    pub guild_id: u64,
    /// Whether the bot's member permission overwrite on the category allows
    /// `MANAGE_CHANNELS`.
    pub manageable: bool,
    /// All child channels of the category, in no particular order.
    pub channels: Vec<PoolChannel>,
}
