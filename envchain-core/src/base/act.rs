//! Discrete actions and their meanings.
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

/// Meaning of a discrete action, numbered as in the Arcade Learning Environment.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[strum(serialize_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
#[allow(missing_docs)]
pub enum ActionMeaning {
    Noop,
    Fire,
    Up,
    Right,
    Left,
    Down,
    UpRight,
    UpLeft,
    DownRight,
    DownLeft,
    UpFire,
    RightFire,
    LeftFire,
    DownFire,
    UpRightFire,
    UpLeftFire,
    DownRightFire,
    DownLeftFire,
}

/// The set of discrete actions of an environment.
///
/// Index `i` of the set is the action `DiscreteAct::new(i as u8)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionSpace {
    meanings: Vec<ActionMeaning>,
}

impl ActionSpace {
    /// Creates an action set with the given meanings.
    pub fn new(meanings: Vec<ActionMeaning>) -> Self {
        Self { meanings }
    }

    /// The full action set of the Arcade Learning Environment (18 actions).
    pub fn full() -> Self {
        Self {
            meanings: ActionMeaning::iter().collect(),
        }
    }

    /// The number of actions.
    pub fn n(&self) -> usize {
        self.meanings.len()
    }

    /// Meanings of the actions in index order.
    pub fn meanings(&self) -> &[ActionMeaning] {
        &self.meanings
    }

    /// Meaning of the action at `index`.
    pub fn meaning(&self, index: usize) -> Option<ActionMeaning> {
        self.meanings.get(index).copied()
    }

    /// Returns `true` if some action has the given meaning.
    pub fn contains(&self, meaning: ActionMeaning) -> bool {
        self.meanings.contains(&meaning)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// A discrete action, the index into the [`ActionSpace`] of the environment.
pub struct DiscreteAct {
    /// Index of the action.
    pub act: u8,
}

impl DiscreteAct {
    /// Action index conventionally bound to "no operation".
    pub const NOOP: Self = Self { act: 0 };

    /// Action index conventionally bound to "fire".
    pub const FIRE: Self = Self { act: 1 };

    /// Constructs an action.
    pub fn new(act: u8) -> Self {
        Self { act }
    }

    /// Index of the action as `usize`.
    pub fn index(&self) -> usize {
        self.act as usize
    }
}

impl From<u8> for DiscreteAct {
    fn from(act: u8) -> Self {
        Self { act }
    }
}
