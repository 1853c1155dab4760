//! Pool eligibility and the invariant-restoring plan.
//!
//! The view is computed from a fresh `CategorySnapshot`: the category's voice channels
//! in canonical order and the empty ones among them. `PoolView::plan` decides the
//! single action that restores "exactly one empty voice channel".

use crate::model::channel::{CategorySnapshot, PoolChannel};

use super::ordering::sort_channels;

/// What a reconciliation pass has to do to a category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PoolAction {
    /// Exactly one empty voice channel exists.
    Keep,
    /// No empty voice channel exists; create one at `position`.
    Create { position: u16 },
    /// More than one empty voice channel exists; keep `survivor`, delete `obsolete`.
    Prune { survivor: u64, obsolete: Vec<u64> },
}

/// Voice channels of one category, split by occupancy.
#[derive(Debug)]
pub struct PoolView<'a> {
    /// All voice channels, canonically ordered.
    pub channels: Vec<&'a PoolChannel>,
    /// Empty voice channels, in the same order.
    pub empty: Vec<&'a PoolChannel>,
}

impl<'a> PoolView<'a> {
    pub fn from_snapshot(snapshot: &'a CategorySnapshot) -> Self {
        let mut channels: Vec<&PoolChannel> = snapshot
            .channels
            .iter()
            .filter(|channel| channel.is_voice())
            .collect();
        sort_channels(&mut channels);

        let empty = channels
            .iter()
            .copied()
            .filter(|channel| channel.is_empty())
            .collect();

        Self { channels, empty }
    }

    /// Position right after the highest voice channel, or 0 without voice channels.
    pub fn next_position(&self) -> u16 {
        self.channels
            .iter()
            .map(|channel| channel.position)
            .max()
            .map_or(0, |position| position.saturating_add(1))
    }

    pub fn plan(&self) -> PoolAction {
        match self.empty.split_last() {
            None => PoolAction::Create {
                position: self.next_position(),
            },
            Some((_, [])) => PoolAction::Keep,
            Some((survivor, obsolete)) => PoolAction::Prune {
                survivor: survivor.id,
                obsolete: obsolete.iter().map(|channel| channel.id).collect(),
            },
        }
    }
}
