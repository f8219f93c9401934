//! Stacked frames with deferred concatenation.
use crate::error::EnvChainError;
use anyhow::Result;
use ndarray::{s, Array3, ArrayView2};
use std::{
    fmt,
    sync::{Arc, OnceLock},
};

#[cfg(test)]
thread_local! {
    static CONCATENATIONS: std::cell::Cell<usize> = std::cell::Cell::new(0);
}

struct Inner {
    frames: Vec<Arc<Array3<u8>>>,
    out: OnceLock<Array3<u8>>,
}

/// An immutable view over the last `K` frames of an environment.
///
/// Frames are held by reference, so consecutive stacked observations share
/// `K - 1` of their frames instead of copying them. The concatenation along the
/// channel axis is computed on the first call of [`LazyFrames::force()`] and
/// memoized; clones share both the frames and the memo.
///
/// ```rust
/// use envchain_core::LazyFrames;
/// use ndarray::Array3;
/// use std::sync::Arc;
///
/// let a = Arc::new(Array3::from_elem((2, 2, 1), 1u8));
/// let b = Arc::new(Array3::from_elem((2, 2, 1), 2u8));
/// let frames = LazyFrames::new(vec![a.clone(), a, b]).unwrap();
///
/// assert_eq!(frames.shape(), [2, 2, 3]);
/// assert_eq!(frames.get(0, 1, 2), Some(2));
/// assert!(!frames.is_materialized());
/// assert_eq!(frames.force()[[1, 1, 0]], 1);
/// ```
#[derive(Clone)]
pub struct LazyFrames {
    inner: Arc<Inner>,
}

impl LazyFrames {
    /// Creates a view over `frames`, oldest first.
    ///
    /// All frames must have the same shape and there must be at least one.
    pub fn new(frames: Vec<Arc<Array3<u8>>>) -> Result<Self> {
        let first = match frames.first() {
            Some(frame) => frame.dim(),
            None => {
                return Err(EnvChainError::InvalidParameter {
                    wrapper: "LazyFrames",
                    name: "frames",
                    value: "[]".to_string(),
                }
                .into())
            }
        };

        if let Some(frame) = frames.iter().find(|frame| frame.dim() != first) {
            return Err(EnvChainError::ShapeMismatch {
                wrapper: "LazyFrames",
                expected: format!("{:?}", first),
                found: frame.shape().to_vec(),
            }
            .into());
        }

        Ok(Self {
            inner: Arc::new(Inner {
                frames,
                out: OnceLock::new(),
            }),
        })
    }

    /// Shape of the materialized array, `(h, w, c * k)`.
    pub fn shape(&self) -> [usize; 3] {
        let (h, w, c) = self.frame_dim();
        [h, w, c * self.num_frames()]
    }

    /// The number of stacked frames `k`.
    pub fn num_frames(&self) -> usize {
        self.inner.frames.len()
    }

    /// The number of channels of the materialized array.
    pub fn count(&self) -> usize {
        self.shape()[2]
    }

    /// The `i`-th stacked frame, oldest first, without materialization.
    pub fn frame(&self, i: usize) -> Option<&Array3<u8>> {
        self.inner.frames.get(i).map(|frame| &**frame)
    }

    /// Element `(h, w, c)` of the materialized array, without materialization.
    pub fn get(&self, h: usize, w: usize, c: usize) -> Option<u8> {
        if let Some(out) = self.inner.out.get() {
            return out.get((h, w, c)).copied();
        }
        let (_, _, n_channels) = self.frame_dim();
        if n_channels == 0 {
            return None;
        }
        self.frame(c / n_channels)
            .and_then(|frame| frame.get((h, w, c % n_channels)))
            .copied()
    }

    /// Channel `i` of the materialized array.
    pub fn channel(&self, i: usize) -> Option<ArrayView2<u8>> {
        if i < self.count() {
            Some(self.force().slice(s![.., .., i]))
        } else {
            None
        }
    }

    /// Returns `true` if the concatenation has been computed.
    pub fn is_materialized(&self) -> bool {
        self.inner.out.get().is_some()
    }

    /// Concatenates the frames along the channel axis, at most once per buffer.
    pub fn force(&self) -> &Array3<u8> {
        self.inner
            .out
            .get_or_init(|| Self::concatenate(&self.inner.frames))
    }

    /// Returns a copy of the materialized array.
    pub fn to_array(&self) -> Array3<u8> {
        self.force().clone()
    }

    fn frame_dim(&self) -> (usize, usize, usize) {
        // `new()` guarantees at least one frame.
        self.inner.frames[0].dim()
    }

    fn concatenate(frames: &[Arc<Array3<u8>>]) -> Array3<u8> {
        #[cfg(test)]
        CONCATENATIONS.with(|n| n.set(n.get() + 1));

        let (h, w, c) = frames[0].dim();
        let mut out = Array3::zeros((h, w, c * frames.len()));
        for (i, frame) in frames.iter().enumerate() {
            out.slice_mut(s![.., .., i * c..(i + 1) * c])
                .assign(&**frame);
        }
        out
    }
}

impl PartialEq for LazyFrames {
    fn eq(&self, other: &Self) -> bool {
        self.force() == other.force()
    }
}

impl fmt::Debug for LazyFrames {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazyFrames")
            .field("shape", &self.shape())
            .field("materialized", &self.is_materialized())
            .finish()
    }
}

impl From<LazyFrames> for Array3<u8> {
    fn from(frames: LazyFrames) -> Self {
        frames.to_array()
    }
}

#[cfg(test)]
mod tests {
    use super::{LazyFrames, CONCATENATIONS};
    use crate::error::EnvChainError;
    use ndarray::Array3;
    use std::sync::Arc;

    fn frame(v: u8) -> Arc<Array3<u8>> {
        Arc::new(Array3::from_elem((3, 2, 1), v))
    }

    fn concatenations() -> usize {
        CONCATENATIONS.with(|n| n.get())
    }

    #[test]
    fn test_materialization_is_memoized() {
        let frames = LazyFrames::new(vec![frame(1), frame(2), frame(3), frame(4)]).unwrap();
        let before = concatenations();

        let first = frames.force().clone();
        let second = frames.force();
        assert_eq!(&first, second);
        assert_eq!(concatenations(), before + 1);

        // Clones share the memo.
        let cloned = frames.clone();
        assert!(cloned.is_materialized());
        assert_eq!(cloned.to_array(), first);
        assert_eq!(concatenations(), before + 1);
    }

    #[test]
    fn test_element_access_without_materialization() {
        let frames = LazyFrames::new(vec![frame(1), frame(2), frame(3)]).unwrap();
        let before = concatenations();

        assert_eq!(frames.shape(), [3, 2, 3]);
        assert_eq!(frames.num_frames(), 3);
        assert_eq!(frames.get(2, 1, 0), Some(1));
        assert_eq!(frames.get(0, 0, 2), Some(3));
        assert_eq!(frames.get(0, 0, 3), None);
        assert_eq!(frames.frame(1).map(|f| f[[0, 0, 0]]), Some(2));
        assert!(!frames.is_materialized());
        assert_eq!(concatenations(), before);

        assert_eq!(frames.channel(2).map(|c| c[[1, 1]]), Some(3));
        assert!(frames.channel(3).is_none());
        assert!(frames.is_materialized());
    }

    #[test]
    fn test_frames_are_shared_not_copied() {
        let a = frame(7);
        let frames = LazyFrames::new(vec![a.clone(), a.clone()]).unwrap();
        assert!(std::ptr::eq(frames.frame(0).unwrap(), &*a));
        assert!(std::ptr::eq(frames.frame(1).unwrap(), &*a));
        assert_eq!(Arc::strong_count(&a), 3);
    }

    #[test]
    fn test_mismatched_frames_are_rejected() {
        let err = LazyFrames::new(vec![frame(0), Arc::new(Array3::zeros((3, 2, 2)))]).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<EnvChainError>(),
            Some(EnvChainError::ShapeMismatch { .. })
        ));
        assert!(LazyFrames::new(vec![]).is_err());
    }

    #[test]
    fn test_equality_compares_contents() {
        let a = LazyFrames::new(vec![frame(1), frame(2)]).unwrap();
        let b = LazyFrames::new(vec![frame(1), frame(2)]).unwrap();
        let c = LazyFrames::new(vec![frame(2), frame(1)]).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
