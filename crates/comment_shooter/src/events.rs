use bevy::prelude::*;

use crate::comment::{Comment, CommentKind, CommentSignal};

/// A comment reported a transition. Sent by the systems that drive comments.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct CommentEvent {
    pub entity: Entity,
    pub kind: CommentKind,
    pub signal: CommentSignal,
    pub position: Vec2,
    /// Super chat amount, if any.
    pub amount: Option<u32>,
    /// Whether the comment was already processed when it signalled.
    pub processed: bool,
}

impl CommentEvent {
    pub fn new(entity: Entity, comment: &Comment, signal: CommentSignal, position: Vec2) -> Self {
        Self {
            entity,
            kind: comment.kind(),
            signal,
            position,
            amount: comment.amount(),
            processed: comment.is_processed(),
        }
    }
}

#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct CommentSpawned {
    pub entity: Entity,
    pub kind: CommentKind,
}

/// A tap in world space, after gesture disambiguation.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub enum WorldTap {
    Single(Vec2),
    Double(Vec2),
}

impl WorldTap {
    pub const fn position(self) -> Vec2 {
        match self {
            Self::Single(position) | Self::Double(position) => position,
        }
    }
}

#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct EmptyAreaTapped {
    pub position: Vec2,
}
