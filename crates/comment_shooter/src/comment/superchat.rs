//! Currency amounts embedded in super chat text.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::meters::faith::FaithRewards;

const CURRENCY_SIGNS: [char; 2] = ['¥', '￥'];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumIter, Serialize, Deserialize)]
pub enum SuperChatTier {
    Common,
    Rare,
    Epic,
    Legendary,
}

impl SuperChatTier {
    pub const fn from_amount(amount: u32) -> Self {
        match amount {
            5000.. => Self::Legendary,
            1000.. => Self::Epic,
            500.. => Self::Rare,
            _ => Self::Common,
        }
    }

    pub const fn reward(self, rewards: &FaithRewards) -> i32 {
        match self {
            Self::Common => rewards.super_chat_common,
            Self::Rare => rewards.super_chat_rare,
            Self::Epic => rewards.super_chat_epic,
            Self::Legendary => rewards.super_chat_legendary,
        }
    }
}

/// Finds the first `¥`/`￥` token and reads the digits after it.
///
/// Commas are accepted only between digits (`¥1,000`). A sign with no digits
/// is skipped and the search continues. Returns `None` when no amount is found
/// or it does not fit in a `u32`.
pub fn parse_amount(text: &str) -> Option<u32> {
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if !CURRENCY_SIGNS.contains(&c) {
            continue;
        }

        let mut amount: Option<u32> = None;
        while let Some(&next) = chars.peek() {
            if let Some(digit) = next.to_digit(10) {
                amount = Some(amount.unwrap_or(0).checked_mul(10)?.checked_add(digit)?);
                chars.next();
            } else if next == ',' && amount.is_some() {
                chars.next();
                if !chars.peek().is_some_and(char::is_ascii_digit) {
                    break;
                }
            } else {
                break;
            }
        }

        if amount.is_some() {
            return amount;
        }
    }

    None
}

/// Formats an amount with thousands separators, e.g. `¥1,000`.
pub fn format_amount(amount: u32) -> String {
    let digits = amount.to_string();
    let mut formatted = String::from("¥");
    let len = digits.len();

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            formatted.push(',');
        }
        formatted.push(c);
    }

    formatted
}
