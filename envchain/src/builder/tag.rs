//! Vocabulary of wrapper tags.
use envchain_core::error::EnvChainError;
use serde::{Deserialize, Serialize};
use std::{convert::TryFrom, str::FromStr};
use strum::{Display, EnumIter, EnumString};

/// A tag naming a wrapper or a bundle of wrappers.
///
/// Tags are parsed from and displayed as kebab-case strings. Some tags accept
/// an alias, e.g. `noop-reset-env` for [`EnvWrapper::NoopReset`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub enum EnvWrapper {
    /// Keeps the raw observation, see [`KeepOriginalObservation`](envchain_atari::KeepOriginalObservation).
    #[strum(serialize = "keep-original-observation")]
    KeepOriginalObservation,

    /// `noop-reset` followed by `max-and-skip`.
    #[strum(serialize = "atari")]
    Atari,

    /// Random number of no-ops on reset.
    #[strum(to_string = "noop-reset", serialize = "noop-reset-env")]
    NoopReset,

    /// Frame skipping with max-pooling.
    #[strum(to_string = "max-and-skip", serialize = "max-and-skip-env")]
    MaxAndSkip,

    /// `episodic-life`, `fire-reset`, `warp-frame`, `clip-reward` and `frame-stack`.
    #[strum(serialize = "deep-mind")]
    DeepMind,

    /// Loss of a life ends an episode.
    #[strum(serialize = "episodic-life")]
    EpisodicLife,

    /// FIRE on reset, only if the game has the action.
    #[strum(serialize = "fire-reset")]
    FireReset,

    /// Grayscaling and resizing.
    #[strum(serialize = "warp-frame")]
    WarpFrame,

    /// Reward sign clipping.
    #[strum(serialize = "clip-reward")]
    ClipReward,

    /// Stacking of the last frames.
    #[strum(serialize = "frame-stack")]
    FrameStack,

    /// `image-to-layout`.
    #[strum(serialize = "pytorch")]
    Pytorch,

    /// Channel-first layout.
    #[strum(to_string = "image-to-layout", serialize = "image-to-pytorch")]
    ImageToLayout,
}

/// A primitive preprocessing stage.
///
/// Each stage corresponds to one wrapper of `envchain_atari`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum Stage {
    /// [`KeepOriginalObservation`](envchain_atari::KeepOriginalObservation).
    KeepOriginalObservation,
    /// [`NoopReset`](envchain_atari::NoopReset).
    NoopReset,
    /// [`MaxAndSkip`](envchain_atari::MaxAndSkip).
    MaxAndSkip,
    /// [`EpisodicLife`](envchain_atari::EpisodicLife).
    EpisodicLife,
    /// [`FireReset`](envchain_atari::FireReset), skipped without FIRE.
    FireReset,
    /// [`WarpFrame`](envchain_atari::WarpFrame).
    WarpFrame,
    /// [`ClipReward`](envchain_atari::ClipReward).
    ClipReward,
    /// [`FrameStack`](envchain_atari::FrameStack).
    FrameStack,
    /// [`ChannelFirst`](envchain_atari::ChannelFirst).
    ChannelFirst,
}

enum Entry {
    Stage(Stage),
    Bundle(&'static [EnvWrapper]),
}

const ATARI: &[EnvWrapper] = &[EnvWrapper::NoopReset, EnvWrapper::MaxAndSkip];

const DEEP_MIND: &[EnvWrapper] = &[
    EnvWrapper::EpisodicLife,
    EnvWrapper::FireReset,
    EnvWrapper::WarpFrame,
    EnvWrapper::ClipReward,
    EnvWrapper::FrameStack,
];

const PYTORCH: &[EnvWrapper] = &[EnvWrapper::ImageToLayout];

impl EnvWrapper {
    fn entry(self) -> Entry {
        match self {
            Self::KeepOriginalObservation => Entry::Stage(Stage::KeepOriginalObservation),
            Self::Atari => Entry::Bundle(ATARI),
            Self::NoopReset => Entry::Stage(Stage::NoopReset),
            Self::MaxAndSkip => Entry::Stage(Stage::MaxAndSkip),
            Self::DeepMind => Entry::Bundle(DEEP_MIND),
            Self::EpisodicLife => Entry::Stage(Stage::EpisodicLife),
            Self::FireReset => Entry::Stage(Stage::FireReset),
            Self::WarpFrame => Entry::Stage(Stage::WarpFrame),
            Self::ClipReward => Entry::Stage(Stage::ClipReward),
            Self::FrameStack => Entry::Stage(Stage::FrameStack),
            Self::Pytorch => Entry::Bundle(PYTORCH),
            Self::ImageToLayout => Entry::Stage(Stage::ChannelFirst),
        }
    }

    /// Returns `true` if the tag expands to other tags.
    pub fn is_bundle(&self) -> bool {
        matches!(self.entry(), Entry::Bundle(_))
    }

    /// Expands the tag into primitive stages, in application order.
    pub fn stages(&self) -> Vec<Stage> {
        match self.entry() {
            Entry::Stage(stage) => vec![stage],
            Entry::Bundle(tags) => tags.iter().flat_map(|tag| tag.stages()).collect(),
        }
    }

    /// Parses a tag, mapping unknown tags to [`EnvChainError::UnknownWrapper`].
    pub fn parse(s: &str) -> Result<Self, EnvChainError> {
        Self::from_str(s).map_err(|_| EnvChainError::UnknownWrapper(s.to_string()))
    }
}

impl TryFrom<String> for EnvWrapper {
    type Error = EnvChainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<EnvWrapper> for String {
    fn from(tag: EnvWrapper) -> Self {
        tag.to_string()
    }
}

/// Parses a list of tags.
///
/// The first unknown tag raises [`EnvChainError::UnknownWrapper`].
pub fn parse_wrappers(tags: &[&str]) -> anyhow::Result<Vec<EnvWrapper>> {
    Ok(tags
        .iter()
        .map(|tag| EnvWrapper::parse(tag))
        .collect::<Result<Vec<_>, _>>()?)
}

#[cfg(test)]
mod tests {
    use super::{parse_wrappers, EnvWrapper, Stage};
    use envchain_core::error::EnvChainError;
    use strum::IntoEnumIterator;

    #[test]
    fn test_aliases() {
        assert_eq!(EnvWrapper::parse("noop-reset-env"), Ok(EnvWrapper::NoopReset));
        assert_eq!(EnvWrapper::parse("noop-reset"), Ok(EnvWrapper::NoopReset));
        assert_eq!(EnvWrapper::parse("max-and-skip-env"), Ok(EnvWrapper::MaxAndSkip));
        assert_eq!(EnvWrapper::parse("image-to-pytorch"), Ok(EnvWrapper::ImageToLayout));
        assert_eq!(EnvWrapper::NoopReset.to_string(), "noop-reset");
        assert_eq!(EnvWrapper::ImageToLayout.to_string(), "image-to-layout");
    }

    #[test]
    fn test_display_parses_back() {
        for tag in EnvWrapper::iter() {
            assert_eq!(EnvWrapper::parse(&tag.to_string()), Ok(tag));
        }
    }

    #[test]
    fn test_unknown_tag() {
        assert_eq!(
            EnvWrapper::parse("deepmind"),
            Err(EnvChainError::UnknownWrapper("deepmind".to_string()))
        );
        let err = parse_wrappers(&["atari", "Atari"]).unwrap_err();
        assert_eq!(
            err.downcast_ref::<EnvChainError>(),
            Some(&EnvChainError::UnknownWrapper("Atari".to_string()))
        );
    }

    #[test]
    fn test_bundle_expansion() {
        assert_eq!(
            EnvWrapper::Atari.stages(),
            vec![Stage::NoopReset, Stage::MaxAndSkip]
        );
        assert_eq!(
            EnvWrapper::DeepMind.stages(),
            vec![
                Stage::EpisodicLife,
                Stage::FireReset,
                Stage::WarpFrame,
                Stage::ClipReward,
                Stage::FrameStack,
            ]
        );
        assert_eq!(EnvWrapper::Pytorch.stages(), vec![Stage::ChannelFirst]);

        let bundles: Vec<_> = EnvWrapper::iter().filter(|t| t.is_bundle()).collect();
        assert_eq!(
            bundles,
            vec![EnvWrapper::Atari, EnvWrapper::DeepMind, EnvWrapper::Pytorch]
        );
        for tag in EnvWrapper::iter().filter(|t| !t.is_bundle()) {
            assert_eq!(tag.stages().len(), 1);
        }
    }

    #[test]
    fn test_yaml() -> anyhow::Result<()> {
        let tags: Vec<EnvWrapper> = serde_yaml::from_str("[atari, noop-reset-env, pytorch]")?;
        assert_eq!(
            tags,
            vec![EnvWrapper::Atari, EnvWrapper::NoopReset, EnvWrapper::Pytorch]
        );
        assert!(serde_yaml::from_str::<Vec<EnvWrapper>>("[warp]").is_err());
        Ok(())
    }
}
