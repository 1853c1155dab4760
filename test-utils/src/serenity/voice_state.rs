//! Test factory for creating Serenity VoiceState objects.

use serenity::all::VoiceState;

/// Creates a test Serenity VoiceState.
///
/// The user is neither muted nor deafened and is not streaming. A `None` channel
/// represents a user who just disconnected from voice.
///
/// # Arguments
/// - `guild_id` - Guild of the voice state
/// - `user_id` - Connected user
/// - `channel_id` - Voice channel the user is in, if any
///
/// # Panics
/// - If the JSON cannot be deserialized into a VoiceState (indicates invalid test data)
///
/// # Examples
///
/// ```rust,ignore
/// use test_utils::serenity::voice_state::create_test_voice_state;
///
/// let joined = create_test_voice_state(1, 42, Some(51));
/// assert_eq!(joined.channel_id.map(|id| id.get()), Some(51));
///
/// let disconnected = create_test_voice_state(1, 42, None);
/// assert!(disconnected.channel_id.is_none());
/// ```
pub fn create_test_voice_state(guild_id: u64, user_id: u64, channel_id: Option<u64>) -> VoiceState {
    serde_json::from_value(serde_json::json!({
        "guild_id": guild_id.to_string(),
        "channel_id": channel_id.map(|id| id.to_string()),
        "user_id": user_id.to_string(),
        "session_id": format!("session-{}", user_id),
        "deaf": false,
        "mute": false,
        "self_deaf": false,
        "self_mute": false,
        "self_stream": false,
        "self_video": false,
        "suppress": false,
        "request_to_speak_timestamp": null,
    }))
    .expect("Failed to create test voice state - invalid JSON structure")
}
