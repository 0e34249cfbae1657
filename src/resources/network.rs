//! Messages exchanged with the other pilots in the arena.
//!
//! Only the fire notifications are modelled here. Frames are JSON objects of
//! the form `{"event": "bulletFired", "data": {...}}`. Moving frames to and
//! from the socket is left to the transport, which pushes raw inbound frames
//! into [`PeerInbox`] and takes encoded frames from [`OutboundFrames`].

use std::collections::VecDeque;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::components::{Kinematics, WeaponKind};

/// Velocity as sent on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WireVelocity {
    pub x: f32,
    pub y: f32,
}

/// Where a projectile left the muzzle and how fast it is going.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShotPayload {
    pub x: f32,
    pub y: f32,
    pub rotation: f32,
    pub velocity: WireVelocity,
}

impl ShotPayload {
    pub fn kinematics(&self) -> Kinematics {
        Kinematics {
            position: Vec2::new(self.x, self.y),
            rotation: self.rotation,
            velocity: Vec2::new(self.velocity.x, self.velocity.y),
        }
    }
}

impl From<&Kinematics> for ShotPayload {
    fn from(kinematics: &Kinematics) -> Self {
        Self {
            x: kinematics.position.x,
            y: kinematics.position.y,
            rotation: kinematics.rotation,
            velocity: WireVelocity {
                x: kinematics.velocity.x,
                y: kinematics.velocity.y,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum PeerEvent {
    BulletFired(ShotPayload),
    MeteorFired(ShotPayload),
}

impl PeerEvent {
    pub fn shot(weapon: WeaponKind, kinematics: &Kinematics) -> Self {
        let payload = ShotPayload::from(kinematics);
        match weapon {
            WeaponKind::Laser => PeerEvent::BulletFired(payload),
            WeaponKind::Meteor => PeerEvent::MeteorFired(payload),
        }
    }

    pub fn weapon(&self) -> WeaponKind {
        match self {
            PeerEvent::BulletFired(_) => WeaponKind::Laser,
            PeerEvent::MeteorFired(_) => WeaponKind::Meteor,
        }
    }

    pub fn payload(&self) -> &ShotPayload {
        match self {
            PeerEvent::BulletFired(payload) | PeerEvent::MeteorFired(payload) => payload,
        }
    }

    pub fn to_frame(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_frame(frame: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(frame)
    }
}

/// Fire-and-forget sink for events meant for the other pilots.
pub trait PeerEmitter {
    fn emit(&mut self, event: PeerEvent);
}

/// Outbound peer events waiting for the transport.
#[derive(Resource, Debug, Default)]
pub struct PeerOutbox {
    pending: Vec<PeerEvent>,
    /// Total events emitted since startup.
    pub emitted: u64,
}

impl PeerOutbox {
    pub fn pending(&self) -> &[PeerEvent] {
        &self.pending
    }

    pub fn drain(&mut self) -> Vec<PeerEvent> {
        std::mem::take(&mut self.pending)
    }
}

impl PeerEmitter for PeerOutbox {
    fn emit(&mut self, event: PeerEvent) {
        self.emitted += 1;
        self.pending.push(event);
    }
}

/// Raw frames received from the transport, not yet decoded.
#[derive(Resource, Debug, Default)]
pub struct PeerInbox {
    pub frames: Vec<String>,
}

/// Frames kept for the transport before the oldest ones are dropped.
pub const MAX_OUTBOUND_FRAMES: usize = 256;

/// Encoded frames ready to be written to the socket.
#[derive(Resource, Debug, Default)]
pub struct OutboundFrames {
    pub frames: VecDeque<String>,
}

impl OutboundFrames {
    /// Queues `frame`, dropping the oldest one when the backlog is full.
    /// Returns the dropped frame, if any.
    pub fn push(&mut self, frame: String) -> Option<String> {
        let dropped = if self.frames.len() >= MAX_OUTBOUND_FRAMES {
            self.frames.pop_front()
        } else {
            None
        };
        self.frames.push_back(frame);
        dropped
    }

    /// Hands every queued frame to the transport, oldest first.
    pub fn take(&mut self) -> Vec<String> {
        self.frames.drain(..).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outbound_backlog_is_bounded() {
        let mut outbound = OutboundFrames::default();
        for i in 0..MAX_OUTBOUND_FRAMES {
            assert_eq!(outbound.push(format!("frame {}", i)), None);
        }

        assert_eq!(outbound.push("late".to_string()), Some("frame 0".to_string()));
        assert_eq!(outbound.frames.len(), MAX_OUTBOUND_FRAMES);
        assert_eq!(outbound.frames.front().map(String::as_str), Some("frame 1"));

        let taken = outbound.take();
        assert_eq!(taken.len(), MAX_OUTBOUND_FRAMES);
        assert_eq!(taken.last().map(String::as_str), Some("late"));
        assert!(outbound.frames.is_empty());
    }

    #[test]
    fn test_bullet_frame_layout() {
        let kinematics = Kinematics {
            position: Vec2::new(1.5, -2.0),
            rotation: 0.0,
            velocity: Vec2::new(600.0, 0.0),
        };
        let frame = PeerEvent::shot(WeaponKind::Laser, &kinematics).to_frame().unwrap();
        let value: serde_json::Value = serde_json::from_str(&frame).unwrap();

        assert_eq!(value["event"], "bulletFired");
        assert_eq!(value["data"]["x"], 1.5);
        assert_eq!(value["data"]["y"], -2.0);
        assert_eq!(value["data"]["rotation"], 0.0);
        assert_eq!(value["data"]["velocity"]["x"], 600.0);
        assert_eq!(value["data"]["velocity"]["y"], 0.0);
    }

    #[test]
    fn test_meteor_frame_decodes() {
        let frame = r#"{"event":"meteorFired","data":{"x":4.0,"y":5.0,"rotation":1.0,"velocity":{"x":0.0,"y":600.0}}}"#;
        let event = PeerEvent::from_frame(frame).unwrap();

        assert_eq!(event.weapon(), WeaponKind::Meteor);
        assert_eq!(event.payload().kinematics().velocity, Vec2::new(0.0, 600.0));
    }

    #[test]
    fn test_unknown_event_is_rejected() {
        assert!(PeerEvent::from_frame(r#"{"event":"shipMoved","data":{}}"#).is_err());
    }

    #[test]
    fn test_outbox_collects_and_drains() {
        let mut outbox = PeerOutbox::default();
        let kinematics = Kinematics::launch(Vec2::ZERO, 0.0, 600.0);
        outbox.emit(PeerEvent::shot(WeaponKind::Laser, &kinematics));
        outbox.emit(PeerEvent::shot(WeaponKind::Meteor, &kinematics));

        assert_eq!(outbox.pending().len(), 2);
        assert_eq!(outbox.drain().len(), 2);
        assert!(outbox.pending().is_empty());
        assert_eq!(outbox.emitted, 2);
    }
}
