//! Canonical channel ordering within a category.
//!
//! Channels are ordered by type code, then by position, then by ID. Discord allows
//! equal positions, so the ID (a snowflake, monotonic in creation time) is what makes
//! the order strict. The voice pool relies on this: "the last empty channel" must name
//! the same channel every time the same category state is observed.

use std::cmp::Ordering;

use crate::model::channel::PoolChannel;

/// Strict total order over the channels of one category.
pub fn compare_channels(a: &PoolChannel, b: &PoolChannel) -> Ordering {
    a.kind
        .code()
        .cmp(&b.kind.code())
        .then_with(|| a.position.cmp(&b.position))
        .then_with(|| a.id.cmp(&b.id))
}

/// Sorts channels into canonical order.
pub fn sort_channels<T: AsRef<PoolChannel>>(channels: &mut [T]) {
    channels.sort_by(|a, b| compare_channels(a.as_ref(), b.as_ref()));
}
