//! Observations and their declared spaces.
use crate::LazyFrames;
use ndarray::Array3;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Declared shape and value range of the observations of an environment.
///
/// The range is inclusive and applies to every element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObsSpace {
    /// Shape of an observation, e.g. `(height, width, channels)`.
    pub shape: [usize; 3],

    /// Minimum value of an element.
    pub low: u8,

    /// Maximum value of an element.
    pub high: u8,
}

impl ObsSpace {
    /// Space of the given shape, with the full `u8` range.
    pub fn new(shape: [usize; 3]) -> Self {
        Self {
            shape,
            low: u8::MIN,
            high: u8::MAX,
        }
    }

    /// Returns the same range with another shape.
    pub fn with_shape(self, shape: [usize; 3]) -> Self {
        Self { shape, ..self }
    }

    /// Sets the value range.
    pub fn range(mut self, low: u8, high: u8) -> Self {
        self.low = low;
        self.high = high;
        self
    }

    /// Returns `true` if `obs` has the declared shape.
    pub fn contains_shape(&self, obs: &Obs) -> bool {
        obs.shape() == self.shape
    }
}

/// An observation emitted by an environment.
///
/// Frames are shared through [`Arc`] and never mutated once emitted, because a
/// frame may still be referenced by the stacked observations of earlier steps.
#[derive(Debug, Clone)]
pub enum Obs {
    /// A single array.
    Frame(Arc<Array3<u8>>),

    /// Stacked frames, concatenated along the channel axis on demand.
    Stack(LazyFrames),
}

impl Obs {
    /// Wraps an array.
    pub fn frame(array: Array3<u8>) -> Self {
        Self::Frame(Arc::new(array))
    }

    /// Shape of the observation. Stacked frames are not materialized.
    pub fn shape(&self) -> [usize; 3] {
        match self {
            Self::Frame(frame) => {
                let (h, w, c) = frame.dim();
                [h, w, c]
            }
            Self::Stack(frames) => frames.shape(),
        }
    }

    /// Returns the observation as an array, materializing stacked frames.
    pub fn as_array(&self) -> &Array3<u8> {
        match self {
            Self::Frame(frame) => frame,
            Self::Stack(frames) => frames.force(),
        }
    }

    /// Converts the observation into a shared array, materializing stacked frames.
    ///
    /// No copy is made for [`Obs::Frame`].
    pub fn into_shared(self) -> Arc<Array3<u8>> {
        match self {
            Self::Frame(frame) => frame,
            Self::Stack(frames) => Arc::new(frames.to_array()),
        }
    }
}

impl PartialEq for Obs {
    fn eq(&self, other: &Self) -> bool {
        self.as_array() == other.as_array()
    }
}

impl From<Array3<u8>> for Obs {
    fn from(array: Array3<u8>) -> Self {
        Self::frame(array)
    }
}

impl From<LazyFrames> for Obs {
    fn from(frames: LazyFrames) -> Self {
        Self::Stack(frames)
    }
}
