//! What each comment kind does to the meters when it signals.
//!
//! One static table per kind, looked up by tag, instead of a trait object per
//! entity. Hooks are pure: they describe the effects and the resolve step in
//! `meters` applies them.

use super::superchat::SuperChatTier;
use super::{CommentKind, CommentSettings, CommentSignal};
use crate::effects::FxKind;
use crate::meters::faith::FaithRewards;

/// Everything one comment signal asks the rest of the game to do.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Effects {
    /// Positive rewards, negative penalises.
    pub faith: i32,
    pub inflammation: f32,
    pub health_damage: i32,
    pub confusion: Option<f32>,
    pub fx: Option<FxKind>,
}

pub struct BehaviorContext<'a> {
    pub rewards: &'a FaithRewards,
    pub settings: &'a CommentSettings,
    /// Super chat amount, if any.
    pub amount: Option<u32>,
    /// Whether the comment had been processed when it signalled.
    pub processed: bool,
}

type Hook = fn(&BehaviorContext<'_>) -> Effects;

pub struct Behavior {
    pub on_processed: Hook,
    pub on_damaged: Hook,
    pub on_destroyed: Hook,
    pub on_missed: Hook,
}

impl Behavior {
    pub fn effects(&self, signal: CommentSignal, context: &BehaviorContext<'_>) -> Effects {
        match signal {
            CommentSignal::Processed => (self.on_processed)(context),
            CommentSignal::Damaged => (self.on_damaged)(context),
            CommentSignal::Destroyed => (self.on_destroyed)(context),
            CommentSignal::Missed => (self.on_missed)(context),
            CommentSignal::Retired | CommentSignal::CrackReverted => Effects::default(),
        }
    }
}

pub const fn behavior(kind: CommentKind) -> &'static Behavior {
    match kind {
        CommentKind::Holy => &HOLY,
        CommentKind::Ohoe => &OHOE,
        CommentKind::Troll => &TROLL,
        CommentKind::SuperChat => &SUPER_CHAT,
    }
}

static HOLY: Behavior = Behavior {
    on_processed: holy_processed,
    on_damaged: nothing,
    on_destroyed: nothing,
    on_missed: nothing,
};

static OHOE: Behavior = Behavior {
    on_processed: ohoe_processed,
    on_damaged: ohoe_failed,
    on_destroyed: destroyed_quietly,
    on_missed: ohoe_failed,
};

static TROLL: Behavior = Behavior {
    on_processed: troll_processed,
    on_damaged: troll_cracked,
    on_destroyed: troll_destroyed,
    on_missed: troll_missed,
};

static SUPER_CHAT: Behavior = Behavior {
    on_processed: super_chat_processed,
    on_damaged: nothing,
    on_destroyed: nothing,
    on_missed: nothing,
};

fn nothing(_: &BehaviorContext<'_>) -> Effects {
    Effects::default()
}

fn destroyed_quietly(_: &BehaviorContext<'_>) -> Effects {
    Effects {
        fx: Some(FxKind::Destroy),
        ..Effects::default()
    }
}

fn holy_processed(context: &BehaviorContext<'_>) -> Effects {
    Effects {
        faith: context.rewards.holy,
        fx: Some(FxKind::Success),
        ..Effects::default()
    }
}

fn ohoe_processed(context: &BehaviorContext<'_>) -> Effects {
    Effects {
        faith: context.rewards.ohoe,
        confusion: Some(context.settings.ohoe_confusion_duration),
        fx: Some(FxKind::Success),
        ..Effects::default()
    }
}

fn ohoe_failed(context: &BehaviorContext<'_>) -> Effects {
    Effects {
        faith: -context.rewards.ohoe_penalty,
        fx: Some(FxKind::Fail),
        ..Effects::default()
    }
}

fn troll_processed(context: &BehaviorContext<'_>) -> Effects {
    Effects {
        faith: context.rewards.troll,
        fx: Some(FxKind::Success),
        ..Effects::default()
    }
}

fn troll_cracked(_: &BehaviorContext<'_>) -> Effects {
    Effects {
        fx: Some(FxKind::Crack),
        ..Effects::default()
    }
}

fn troll_destroyed(context: &BehaviorContext<'_>) -> Effects {
    if context.processed {
        return destroyed_quietly(context);
    }

    // Broken without the second tap landing.
    Effects {
        faith: -context.rewards.troll_penalty,
        inflammation: context.settings.troll_inflammation,
        fx: Some(FxKind::Fail),
        ..Effects::default()
    }
}

fn troll_missed(context: &BehaviorContext<'_>) -> Effects {
    Effects {
        faith: -context.rewards.troll_penalty,
        inflammation: context.settings.troll_inflammation,
        health_damage: context.settings.troll_miss_damage,
        fx: Some(FxKind::Fail),
        ..Effects::default()
    }
}

fn super_chat_processed(context: &BehaviorContext<'_>) -> Effects {
    let amount = context
        .amount
        .unwrap_or(context.settings.super_chat_default_amount);

    Effects {
        faith: SuperChatTier::from_amount(amount).reward(context.rewards),
        fx: Some(FxKind::Success),
        ..Effects::default()
    }
}
