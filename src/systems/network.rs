use bevy::prelude::*;

use crate::components::{RemoteProjectile, WeaponKind};
use crate::resources::{ArenaAssets, ArenaConfig, OutboundFrames, PeerEvent, PeerInbox, PeerOutbox};
use crate::systems::combat::projectile_body;

/// Encodes pending peer events into frames for the transport.
pub fn flush_peer_outbox(mut outbox: ResMut<PeerOutbox>, mut outbound: ResMut<OutboundFrames>) {
    for event in outbox.drain() {
        match event.to_frame() {
            Ok(frame) => {
                debug!("-> {}", frame);
                if let Some(dropped) = outbound.push(frame) {
                    warn!("Outbound backlog full, dropping {}", dropped);
                }
            }
            Err(e) => warn!("Dropping {:?}: {}", event, e),
        }
    }
}

/// Frames fired in an arena that was left are never sent.
pub fn discard_outbound_frames(mut outbound: ResMut<OutboundFrames>) {
    let stale = outbound.take();
    if !stale.is_empty() {
        info!("Discarded {} unsent peer frames", stale.len());
    }
}

/// Replays shots fired by other pilots. Remote projectiles are cosmetic and
/// never touch the local ship's ammunition.
pub fn receive_peer_frames(
    mut commands: Commands,
    mut inbox: ResMut<PeerInbox>,
    assets: Res<ArenaAssets>,
    config: Res<ArenaConfig>,
) {
    for frame in inbox.frames.drain(..) {
        let event = match PeerEvent::from_frame(&frame) {
            Ok(event) => event,
            Err(e) => {
                warn!("Ignoring malformed peer frame {:?}: {}", frame, e);
                continue;
            }
        };

        let weapons = &config.weapons;
        let (texture_key, scale) = match event.weapon() {
            WeaponKind::Laser => (weapons.laser_texture.as_str(), 1.0),
            WeaponKind::Meteor => (weapons.meteor_texture.as_str(), weapons.meteor_scale),
        };
        let kinematics = event.payload().kinematics();
        commands.spawn((
            Name::new("Remote Projectile"),
            RemoteProjectile,
            projectile_body(&assets, &config, &kinematics, scale, texture_key),
        ));
        debug!("<- {} at {:?}", event.weapon().event_name(), kinematics.position);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use avian2d::prelude::LinearVelocity;
    use crate::components::Kinematics;
    use crate::resources::PeerEmitter;

    fn network_app() -> App {
        let mut app = App::new();
        app.insert_resource(ArenaAssets::empty())
            .insert_resource(ArenaConfig::default())
            .init_resource::<PeerOutbox>()
            .init_resource::<PeerInbox>()
            .init_resource::<OutboundFrames>()
            .add_systems(Update, (flush_peer_outbox, receive_peer_frames));
        app
    }

    #[test]
    fn test_outbox_is_encoded_and_emptied() {
        let mut app = network_app();
        let kinematics = Kinematics::launch(Vec2::new(1.0, 2.0), 0.0, 600.0);
        app.world_mut()
            .resource_mut::<PeerOutbox>()
            .emit(PeerEvent::shot(WeaponKind::Meteor, &kinematics));

        app.update();

        assert!(app.world().resource::<PeerOutbox>().pending().is_empty());
        let frames = &app.world().resource::<OutboundFrames>().frames;
        assert_eq!(frames.len(), 1);
        assert!(frames[0].contains("\"meteorFired\""));
    }

    #[test]
    fn test_unsent_frames_are_discarded() {
        let mut app = App::new();
        app.init_resource::<OutboundFrames>()
            .add_systems(Update, discard_outbound_frames);
        app.world_mut()
            .resource_mut::<OutboundFrames>()
            .push("{}".to_string());

        app.update();

        assert!(app.world().resource::<OutboundFrames>().frames.is_empty());
    }

    #[test]
    fn test_inbound_shot_spawns_remote_projectile() {
        let mut app = network_app();
        app.world_mut().resource_mut::<PeerInbox>().frames.extend([
            r#"{"event":"bulletFired","data":{"x":1.0,"y":2.0,"rotation":0.0,"velocity":{"x":600.0,"y":0.0}}}"#.to_string(),
            "not json".to_string(),
        ]);

        app.update();

        assert!(app.world().resource::<PeerInbox>().frames.is_empty());
        let mut remote = app
            .world_mut()
            .query_filtered::<(&Transform, &LinearVelocity), With<RemoteProjectile>>();
        let (transform, velocity) = remote.single(app.world());
        assert_eq!(transform.translation.truncate(), Vec2::new(1.0, 2.0));
        assert_eq!(velocity.0, Vec2::new(600.0, 0.0));
    }
}
