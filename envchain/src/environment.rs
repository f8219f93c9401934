//! Well-known environment ids.
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Ids of the environments used with the preprocessing chains.
///
/// These are the ids of the base environments in an
/// [`EnvRegistry`](crate::EnvRegistry); the registry itself decides how each
/// one is constructed.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, Serialize, Deserialize,
)]
#[allow(missing_docs)]
pub enum Environment {
    #[strum(serialize = "Pong-v0")]
    #[serde(rename = "Pong-v0")]
    PongV0,
    #[strum(serialize = "Pong-v4")]
    #[serde(rename = "Pong-v4")]
    PongV4,
    #[strum(serialize = "PongDeterministic-v0")]
    #[serde(rename = "PongDeterministic-v0")]
    PongDeterministicV0,
    #[strum(serialize = "PongDeterministic-v4")]
    #[serde(rename = "PongDeterministic-v4")]
    PongDeterministicV4,
    #[strum(serialize = "PongNoFrameskip-v0")]
    #[serde(rename = "PongNoFrameskip-v0")]
    PongNoFrameskipV0,
    #[strum(serialize = "PongNoFrameskip-v4")]
    #[serde(rename = "PongNoFrameskip-v4")]
    PongNoFrameskipV4,
    #[strum(serialize = "Breakout-v0")]
    #[serde(rename = "Breakout-v0")]
    BreakoutV0,
    #[strum(serialize = "SpaceInvaders-v0")]
    #[serde(rename = "SpaceInvaders-v0")]
    SpaceInvadersV0,
    #[strum(serialize = "CartPole-v0")]
    #[serde(rename = "CartPole-v0")]
    CartPoleV0,
}

impl Environment {
    /// Returns `true` if the environment skips frames by itself, in which case
    /// the `max-and-skip` stage should not be applied again.
    pub fn skips_frames(&self) -> bool {
        !matches!(
            self,
            Self::PongNoFrameskipV0 | Self::PongNoFrameskipV4 | Self::CartPoleV0
        )
    }
}

#[cfg(test)]
mod tests {
    use super::Environment;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_ids() {
        assert_eq!(Environment::PongNoFrameskipV4.to_string(), "PongNoFrameskip-v4");
        assert_eq!(Environment::from_str("SpaceInvaders-v0"), Ok(Environment::SpaceInvadersV0));
        assert!(Environment::from_str("Pong").is_err());
        assert_eq!(Environment::iter().count(), 9);
        assert_eq!(Environment::iter().filter(|e| e.skips_frames()).count(), 6);
        assert!(!Environment::PongNoFrameskipV4.skips_frames());
    }

    #[test]
    fn test_serde_uses_ids() {
        let yaml = serde_yaml::to_string(&Environment::BreakoutV0).unwrap();
        assert!(yaml.contains("Breakout-v0"));
        let env: Environment = serde_yaml::from_str("PongDeterministic-v4").unwrap();
        assert_eq!(env, Environment::PongDeterministicV4);
    }
}
