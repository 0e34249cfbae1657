use bevy::prelude::*;

use crate::plugins::core::GameState;
use crate::resources::{OutboundFrames, PeerInbox, PeerOutbox};
use crate::systems::{discard_outbound_frames, flush_peer_outbox, receive_peer_frames};

/// Encodes outgoing fire events and replays incoming ones.
///
/// The socket itself is not part of this plugin; a transport reads
/// [`OutboundFrames`] and fills [`PeerInbox`].
pub struct NetworkPlugin;

impl Plugin for NetworkPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PeerOutbox>()
            .init_resource::<PeerInbox>()
            .init_resource::<OutboundFrames>()
            .add_systems(PreUpdate, receive_peer_frames.run_if(in_state(GameState::Arena)))
            .add_systems(PostUpdate, flush_peer_outbox)
            .add_systems(OnExit(GameState::Arena), discard_outbound_frames);
    }
}
