use serenity::all::VoiceState;

/// A single voice membership change, reduced to what the voice pool needs.
///
/// `left` and `joined` are independent: either may be absent (user connected from
/// nowhere, or disconnected entirely) and they are equal when the update did not move
/// the user (mute, deafen, stream toggles).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoiceStateEvent {
    pub guild_id: Option<u64>,
    pub user_id: u64,
    pub left: Option<u64>,
    pub joined: Option<u64>,
}

impl VoiceStateEvent {
    /// Builds an event from serenity's cached previous state and the new state.
    pub fn from_states(old: Option<&VoiceState>, new: &VoiceState) -> Self {
        Self {
            guild_id: new
                .guild_id
                .or_else(|| old.and_then(|state| state.guild_id))
                .map(|id| id.get()),
            user_id: new.user_id.get(),
            left: old.and_then(|state| state.channel_id).map(|id| id.get()),
            joined: new.channel_id.map(|id| id.get()),
        }
    }

    /// Distinct channels touched by this event, `left` first.
    pub fn affected_channels(&self) -> Vec<u64> {
        let mut channels = Vec::with_capacity(2);
        for channel in [self.left, self.joined].into_iter().flatten() {
            if !channels.contains(&channel) {
                channels.push(channel);
            }
        }
        channels
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::serenity::create_test_voice_state;

    /// Tests that a move between two channels yields both channels.
    ///
    /// Expected: left channel followed by joined channel
    #[test]
    fn move_between_channels_affects_both() {
        let old = create_test_voice_state(1, 10, Some(100));
        let new = create_test_voice_state(1, 10, Some(200));

        let event = VoiceStateEvent::from_states(Some(&old), &new);

        assert_eq!(event.guild_id, Some(1));
        assert_eq!(event.user_id, 10);
        assert_eq!(event.affected_channels(), vec![100, 200]);
    }

    /// Tests that a state toggle within the same channel yields one channel.
    ///
    /// Expected: single affected channel
    #[test]
    fn update_within_same_channel_is_deduplicated() {
        let old = create_test_voice_state(1, 10, Some(100));
        let new = create_test_voice_state(1, 10, Some(100));

        let event = VoiceStateEvent::from_states(Some(&old), &new);

        assert_eq!(event.affected_channels(), vec![100]);
    }

    /// Tests a fresh connect without cached previous state and a full disconnect.
    ///
    /// Expected: only the present side is reported
    #[test]
    fn connect_and_disconnect_affect_one_channel() {
        let connected = create_test_voice_state(1, 10, Some(100));
        let event = VoiceStateEvent::from_states(None, &connected);
        assert_eq!(event.left, None);
        assert_eq!(event.affected_channels(), vec![100]);

        let disconnected = create_test_voice_state(1, 10, None);
        let event = VoiceStateEvent::from_states(Some(&connected), &disconnected);
        assert_eq!(event.joined, None);
        assert_eq!(event.affected_channels(), vec![100]);
    }
}
