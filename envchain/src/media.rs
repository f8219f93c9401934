//! Animation artifacts.
use anyhow::Result;
use envchain_core::error::EnvChainError;
use image::{codecs::gif::GifEncoder, Delay, Frame, Rgba, RgbaImage};
use ndarray::Array3;
use std::{fs::File, io::BufWriter, path::Path};

/// Converts a frame of shape `(h, w, 1)` or `(h, w, 3)` to an RGBA image.
pub fn to_rgba(frame: &Array3<u8>) -> Result<RgbaImage> {
    let (h, w, c) = frame.dim();
    if c != 1 && c != 3 {
        return Err(EnvChainError::ShapeMismatch {
            wrapper: "save_animation",
            expected: "(h, w, 1) or (h, w, 3)".to_string(),
            found: frame.shape().to_vec(),
        }
        .into());
    }

    Ok(RgbaImage::from_fn(w as u32, h as u32, |x, y| {
        let (x, y) = (x as usize, y as usize);
        if c == 1 {
            let v = frame[[y, x, 0]];
            Rgba([v, v, v, 255])
        } else {
            Rgba([frame[[y, x, 0]], frame[[y, x, 1]], frame[[y, x, 2]], 255])
        }
    }))
}

/// Writes `frames` to `path` as an animated GIF, `delay_ms` milliseconds per frame.
///
/// Frames are typically taken from
/// [`Env::original_observation()`](envchain_core::Env::original_observation)
/// during an episode.
pub fn save_animation(frames: &[Array3<u8>], path: impl AsRef<Path>, delay_ms: u32) -> Result<()> {
    let delay = Delay::from_numer_denom_ms(delay_ms, 1);
    let frames = frames
        .iter()
        .map(|frame| Ok(Frame::from_parts(to_rgba(frame)?, 0, 0, delay)))
        .collect::<Result<Vec<_>>>()?;

    let file = BufWriter::new(File::create(path)?);
    let mut encoder = GifEncoder::new(file);
    encoder.encode_frames(frames)?;
    Ok(())
}
