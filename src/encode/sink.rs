use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::foundation::error::{OrbError, OrbResult};
use crate::render::cpu::FrameRGBA;

/// Stream parameters announced to a sink before the first frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SinkConfig {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Nominal rate of the drawn frames (the tier's target rate).
    pub fps: f64,
}

impl SinkConfig {
    /// Reject empty frames and non-positive rates.
    pub fn validate(&self) -> OrbResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(OrbError::validation("sink width/height must be non-zero"));
        }
        if !self.fps.is_finite() || self.fps <= 0.0 {
            return Err(OrbError::validation("sink fps must be finite and > 0"));
        }
        Ok(())
    }
}

/// Destination for drawn frames.
pub trait FrameSink {
    /// Called once before any frame.
    fn begin(&mut self, cfg: SinkConfig) -> OrbResult<()>;
    /// Called once per drawn frame, in order. `index` counts drawn frames from zero.
    fn push_frame(&mut self, index: u64, timestamp_ms: f64, frame: &FrameRGBA) -> OrbResult<()>;
    /// Called once after the last frame.
    fn end(&mut self) -> OrbResult<()>;
}

/// A frame captured by [`InMemorySink`].
#[derive(Clone, Debug)]
pub struct CapturedFrame {
    /// Drawn-frame index.
    pub index: u64,
    /// Vsync timestamp the frame was drawn at.
    pub timestamp_ms: f64,
    /// Pixels as produced by the surface.
    pub frame: FrameRGBA,
}

/// Keeps every frame in memory.
#[derive(Clone, Debug, Default)]
pub struct InMemorySink {
    /// Config received in `begin`.
    pub config: Option<SinkConfig>,
    /// Frames in push order.
    pub frames: Vec<CapturedFrame>,
    /// Whether `end` was called.
    pub finished: bool,
}

impl InMemorySink {
    /// Empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Timestamps of the captured frames.
    pub fn timestamps(&self) -> Vec<f64> {
        self.frames.iter().map(|f| f.timestamp_ms).collect()
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> OrbResult<()> {
        cfg.validate()?;
        self.config = Some(cfg);
        self.frames.clear();
        self.finished = false;
        Ok(())
    }

    fn push_frame(&mut self, index: u64, timestamp_ms: f64, frame: &FrameRGBA) -> OrbResult<()> {
        self.frames.push(CapturedFrame {
            index,
            timestamp_ms,
            frame: frame.clone(),
        });
        Ok(())
    }

    fn end(&mut self) -> OrbResult<()> {
        self.finished = true;
        Ok(())
    }
}

/// Writes `frame_NNNNN.png` files into a directory, straight alpha.
#[derive(Clone, Debug)]
pub struct PngSequenceSink {
    dir: PathBuf,
    cfg: Option<SinkConfig>,
    written: Vec<PathBuf>,
}

impl PngSequenceSink {
    /// Sink writing into `dir` (created on `begin`).
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            cfg: None,
            written: Vec::new(),
        }
    }

    /// Output directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Files written so far.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    /// File name used for drawn frame `index`.
    pub fn frame_file_name(index: u64) -> String {
        format!("frame_{index:05}.png")
    }
}

impl FrameSink for PngSequenceSink {
    fn begin(&mut self, cfg: SinkConfig) -> OrbResult<()> {
        cfg.validate()?;
        std::fs::create_dir_all(&self.dir).with_context(|| {
            format!("failed to create output directory '{}'", self.dir.display())
        })?;
        self.cfg = Some(cfg);
        self.written.clear();
        Ok(())
    }

    fn push_frame(&mut self, index: u64, _timestamp_ms: f64, frame: &FrameRGBA) -> OrbResult<()> {
        let Some(cfg) = self.cfg else {
            return Err(OrbError::validation("png sink: push_frame before begin"));
        };
        if frame.width != cfg.width || frame.height != cfg.height {
            return Err(OrbError::validation(format!(
                "png sink: frame is {}x{}, stream is {}x{}",
                frame.width, frame.height, cfg.width, cfg.height
            )));
        }
        let path = self.dir.join(Self::frame_file_name(index));
        let straight = frame.to_straight();
        image::save_buffer_with_format(
            &path,
            &straight.data,
            straight.width,
            straight.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .with_context(|| format!("write png '{}'", path.display()))?;
        tracing::trace!(path = %path.display(), "wrote frame");
        self.written.push(path);
        Ok(())
    }

    fn end(&mut self) -> OrbResult<()> {
        tracing::debug!(
            frames = self.written.len(),
            dir = %self.dir.display(),
            "png sequence finished"
        );
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
