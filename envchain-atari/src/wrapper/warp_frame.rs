//! Grayscaling and downsampling of frames.
use anyhow::Result;
use envchain_core::{error::EnvChainError, ActionSpace, DiscreteAct, Env, Obs, ObsSpace, Step};
use ndarray::{Array2, ArrayView3, Axis};
use serde::{Deserialize, Serialize};

/// Configuration of [`WarpFrame`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WarpFrameConfig {
    /// Width of the output frame.
    pub width: usize,

    /// Height of the output frame.
    pub height: usize,
}

impl Default for WarpFrameConfig {
    fn default() -> Self {
        Self {
            width: 84,
            height: 84,
        }
    }
}

impl WarpFrameConfig {
    /// Sets the width of the output frame.
    pub fn width(mut self, v: usize) -> Self {
        self.width = v;
        self
    }

    /// Sets the height of the output frame.
    pub fn height(mut self, v: usize) -> Self {
        self.height = v;
        self
    }
}

/// Converts RGB frames to grayscale and resizes them, to 84x84 by default.
///
/// Resizing averages the covered area of the source frame for each output
/// pixel, which avoids aliasing when downsampling.
pub struct WarpFrame<E: Env> {
    env: E,
    width: usize,
    height: usize,
}

impl<E: Env> WarpFrame<E> {
    /// Wraps an environment emitting `(height, width, 3)` frames.
    pub fn build(env: E, config: &WarpFrameConfig) -> Result<Self> {
        if config.width == 0 || config.height == 0 {
            return Err(EnvChainError::InvalidParameter {
                wrapper: "WarpFrame",
                name: "width x height",
                value: format!("{}x{}", config.width, config.height),
            }
            .into());
        }
        check_rgb(&env.observation_space().shape)?;

        Ok(Self {
            env,
            width: config.width,
            height: config.height,
        })
    }

    fn observation(&self, obs: Obs) -> Result<Obs> {
        check_rgb(&obs.shape())?;
        let space = self.env.observation_space();
        let gray = grayscale(obs.as_array().view());
        let resized = resize_area(&gray, self.height, self.width);
        let frame = resized.mapv(|v| v.round().max(space.low as f64).min(space.high as f64) as u8);
        Ok(Obs::frame(frame.insert_axis(Axis(2))))
    }
}

fn check_rgb(shape: &[usize; 3]) -> Result<()> {
    if shape[2] != 3 || shape[0] == 0 || shape[1] == 0 {
        return Err(EnvChainError::ShapeMismatch {
            wrapper: "WarpFrame",
            expected: "(height, width, 3)".to_string(),
            found: shape.to_vec(),
        }
        .into());
    }
    Ok(())
}

/// Luma of RGB frames with the ITU-R BT.601 weights, rounded to integers.
pub(crate) fn grayscale(frame: ArrayView3<u8>) -> Array2<f64> {
    let (h, w, _) = frame.dim();
    Array2::from_shape_fn((h, w), |(y, x)| {
        let r = frame[[y, x, 0]] as f64;
        let g = frame[[y, x, 1]] as f64;
        let b = frame[[y, x, 2]] as f64;
        (0.299 * r + 0.587 * g + 0.114 * b).round()
    })
}

/// Source indices and weights of each output index, for resampling an axis of
/// length `src` to `dst` by area averaging. Weights of an output index sum to 1.
fn area_weights(src: usize, dst: usize) -> Vec<Vec<(usize, f64)>> {
    let scale = src as f64 / dst as f64;
    (0..dst)
        .map(|i| {
            let lo = i as f64 * scale;
            let hi = (i + 1) as f64 * scale;
            let start = lo.floor() as usize;
            let end = (hi.ceil() as usize).min(src);
            (start..end)
                .filter_map(|j| {
                    let overlap = hi.min((j + 1) as f64) - lo.max(j as f64);
                    if overlap > 1e-9 {
                        Some((j, overlap / scale))
                    } else {
                        None
                    }
                })
                .collect()
        })
        .collect()
}

/// Resizes a single-channel image to `(height, width)` by area averaging.
pub(crate) fn resize_area(src: &Array2<f64>, height: usize, width: usize) -> Array2<f64> {
    let (h, w) = src.dim();
    let wy = area_weights(h, height);
    let wx = area_weights(w, width);

    // Rows first, then columns.
    let rows = Array2::from_shape_fn((height, w), |(y, x)| {
        wy[y].iter().map(|&(j, a)| a * src[[j, x]]).sum::<f64>()
    });
    Array2::from_shape_fn((height, width), |(y, x)| {
        wx[x].iter().map(|&(j, a)| a * rows[[y, j]]).sum::<f64>()
    })
}

impl<E: Env> Env for WarpFrame<E> {
    fn name(&self) -> &str {
        "WarpFrame"
    }

    fn observation_space(&self) -> ObsSpace {
        self.env
            .observation_space()
            .with_shape([self.height, self.width, 1])
    }

    fn action_space(&self) -> ActionSpace {
        self.env.action_space()
    }

    fn reset(&mut self) -> Result<Obs> {
        let obs = self.env.reset()?;
        self.observation(obs)
    }

    fn step(&mut self, act: &DiscreteAct) -> Result<Step> {
        let step = self.env.step(act)?;
        let obs = self.observation(step.obs)?;
        Ok(Step { obs, ..step })
    }

    fn inner(&self) -> Option<&dyn Env> {
        Some(&self.env)
    }
}
