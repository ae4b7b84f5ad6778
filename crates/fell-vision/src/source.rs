//! Frame sources feeding the capture worker.

use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::warn;

use crate::error::VisionError;
use crate::frame::Frame;

/// Interface to the video capture collaborator.
///
/// Sources are polled from the capture worker thread, hence the `Send`
/// bound. Returning an empty frame signals end of stream; the pipeline
/// never polls a source again once it has begun shutting down.
pub trait VideoSource: Send {
    /// Read the next frame, blocking until one is available.
    fn read_frame(&mut self) -> Frame;

    /// Whether the source expects to produce more frames.
    fn is_open(&self) -> bool;
}

/// A source that replays a fixed list of frames, optionally paced to
/// mimic a camera's frame interval.
pub struct ScriptedSource {
    frames: VecDeque<Frame>,
    frame_interval: Option<Duration>,
}

impl ScriptedSource {
    pub fn new(frames: impl IntoIterator<Item = Frame>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
            frame_interval: None,
        }
    }

    /// Sleep this long before yielding each frame, so a scripted feed
    /// occupies the pipeline for a realistic stretch of wall time.
    pub fn with_frame_interval(mut self, interval: Duration) -> Self {
        self.frame_interval = Some(interval);
        self
    }
}

impl VideoSource for ScriptedSource {
    fn read_frame(&mut self) -> Frame {
        if let Some(interval) = self.frame_interval
            && !self.frames.is_empty()
        {
            std::thread::sleep(interval);
        }
        self.frames.pop_front().unwrap_or_else(Frame::empty)
    }

    fn is_open(&self) -> bool {
        !self.frames.is_empty()
    }
}

/// A source that streams PNG files from a directory in name order.
pub struct FrameDirSource {
    paths: Vec<PathBuf>,
    next: usize,
}

impl FrameDirSource {
    /// Scan `dir` for PNG files. Fails if the directory is missing,
    /// unreadable, or holds no PNGs at all; individual bad files are
    /// tolerated later, at read time.
    pub fn open(dir: &Path) -> Result<Self, VisionError> {
        if !dir.is_dir() {
            return Err(VisionError::MissingFrameDir {
                path: dir.to_path_buf(),
            });
        }
        let mut paths: Vec<PathBuf> = fs::read_dir(dir)
            .map_err(VisionError::DirRead)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| {
                path.extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("png"))
            })
            .collect();
        paths.sort();
        if paths.is_empty() {
            return Err(VisionError::EmptyFrameDir {
                path: dir.to_path_buf(),
            });
        }
        Ok(Self { paths, next: 0 })
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

impl VideoSource for FrameDirSource {
    fn read_frame(&mut self) -> Frame {
        let Some(path) = self.paths.get(self.next) else {
            return Frame::empty();
        };
        self.next += 1;
        match image::open(path) {
            Ok(img) => Frame::new(img.to_rgb8()),
            Err(err) => {
                // A file that rotted between scan and read ends the
                // stream instead of crashing the capture worker.
                warn!(path = %path.display(), %err, "skipping unreadable frame, ending stream");
                Frame::empty()
            }
        }
    }

    fn is_open(&self) -> bool {
        self.next < self.paths.len()
    }
}
