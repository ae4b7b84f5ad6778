//! The capture -> detect -> signal worker chain.
//!
//! Frames move through bounded queues between dedicated OS threads. A
//! full queue blocks its producer, so a stalled consumer applies
//! backpressure instead of growing memory. Shutdown is cooperative: a
//! shared flag stops the capture worker, and the downstream workers exit
//! when their queues disconnect, classifying everything still in flight
//! on the way out.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::thread::{self, JoinHandle};

use crossbeam_channel::{Receiver, Sender, bounded};
use tracing::{debug, info, warn};

use crate::detect::{DetectionParams, detect_target};
use crate::encode::{EncodedFrame, encode_within_budget};
use crate::error::VisionError;
use crate::frame::Frame;
use crate::source::VideoSource;

/// Shared single-slot detection result.
///
/// Last write wins and all access is relaxed, so a reader may observe a
/// value several frames stale. The only gameplay consumer is the
/// movement speed boost, which tolerates that staleness; nothing may be
/// inferred from the flag's timing.
#[derive(Clone, Debug, Default)]
pub struct DetectionFlag(Arc<AtomicBool>);

impl DetectionFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(&self, present: bool) {
        self.0.store(present, Ordering::Relaxed);
    }

    pub fn get(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Tuning for the vision pipeline workers.
#[derive(Clone, Debug)]
pub struct PipelineConfig {
    /// Capacity of each frame queue. Producers block when a queue
    /// fills, which keeps memory bounded when a consumer stalls.
    pub queue_capacity: usize,
    pub detection: DetectionParams,
    /// Run the JPEG encode stage alongside detection.
    pub encode: bool,
    /// Encode byte budget as a fraction of the raw frame size.
    pub encode_budget_ratio: f32,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            queue_capacity: 8,
            detection: DetectionParams::default(),
            encode: false,
            encode_budget_ratio: 0.5,
        }
    }
}

/// Handle to the running vision workers.
///
/// The capture worker polls the source and fans frames out; the detect
/// worker classifies them and publishes [`DetectionFlag`]; the optional
/// encode worker produces budget-limited JPEG bytes, drained through
/// [`VisionPipeline::drain_encoded`].
pub struct VisionPipeline {
    shutdown: Arc<AtomicBool>,
    detection: DetectionFlag,
    frames_processed: Arc<AtomicUsize>,
    encoded_rx: Option<Receiver<EncodedFrame>>,
    workers: Vec<JoinHandle<()>>,
}

impl VisionPipeline {
    /// Spawn the worker threads over `source`.
    pub fn start(source: Box<dyn VideoSource>, config: PipelineConfig) -> Result<Self, VisionError> {
        let mut pipeline = Self {
            shutdown: Arc::new(AtomicBool::new(false)),
            detection: DetectionFlag::new(),
            frames_processed: Arc::new(AtomicUsize::new(0)),
            encoded_rx: None,
            workers: Vec::with_capacity(3),
        };
        if let Err(err) = pipeline.spawn_workers(source, config) {
            // A worker that did start is torn down through the normal
            // path: flag set, channel ends dropped, join.
            pipeline.shutdown();
            return Err(err);
        }
        Ok(pipeline)
    }

    fn spawn_workers(
        &mut self,
        source: Box<dyn VideoSource>,
        config: PipelineConfig,
    ) -> Result<(), VisionError> {
        let (frame_tx, frame_rx) = bounded::<Frame>(config.queue_capacity);
        let (encode_tx, encode_stage) = if config.encode {
            let (tx, rx) = bounded::<Frame>(config.queue_capacity);
            let (out_tx, out_rx) = bounded::<EncodedFrame>(config.queue_capacity);
            (Some(tx), Some((rx, out_tx, out_rx)))
        } else {
            (None, None)
        };

        let shutdown = Arc::clone(&self.shutdown);
        self.spawn("vision-capture", move || {
            capture_worker(source, frame_tx, encode_tx, shutdown);
        })?;

        let params = config.detection;
        let flag = self.detection.clone();
        let processed = Arc::clone(&self.frames_processed);
        self.spawn("vision-detect", move || {
            detect_worker(frame_rx, params, flag, processed);
        })?;

        if let Some((encode_rx, out_tx, out_rx)) = encode_stage {
            let ratio = config.encode_budget_ratio;
            self.spawn("vision-encode", move || {
                encode_worker(encode_rx, out_tx, ratio);
            })?;
            self.encoded_rx = Some(out_rx);
        }
        Ok(())
    }

    fn spawn<F>(&mut self, name: &'static str, f: F) -> Result<(), VisionError>
    where
        F: FnOnce() + Send + 'static,
    {
        let handle = thread::Builder::new()
            .name(name.to_string())
            .spawn(f)
            .map_err(|source| VisionError::WorkerSpawn { name, source })?;
        self.workers.push(handle);
        Ok(())
    }

    /// Handle to the shared detection result.
    pub fn detection_flag(&self) -> DetectionFlag {
        self.detection.clone()
    }

    /// Non-empty frames classified so far.
    ///
    /// Pairs with the release increment in the detect worker: once a
    /// frame shows up in this count, its flag value is visible too.
    pub fn frames_processed(&self) -> usize {
        self.frames_processed.load(Ordering::Acquire)
    }

    /// False once shutdown was requested or the source ran dry.
    pub fn is_running(&self) -> bool {
        !self.shutdown.load(Ordering::Relaxed)
    }

    /// Pull whatever encoded frames are ready without blocking. Always
    /// empty when the encode stage is disabled.
    pub fn drain_encoded(&self) -> Vec<EncodedFrame> {
        let Some(rx) = &self.encoded_rx else {
            return Vec::new();
        };
        let mut encoded = Vec::new();
        while let Ok(frame) = rx.try_recv() {
            encoded.push(frame);
        }
        encoded
    }

    /// Signal the workers and join them. Frames already queued are still
    /// classified before the detect worker exits. Idempotent.
    ///
    /// The capture worker can only observe the signal between source
    /// reads, so a source that blocks indefinitely would stall the join;
    /// the shipped sources always return.
    pub fn shutdown(&mut self) {
        self.shutdown.store(true, Ordering::Relaxed);
        // Dropping the output end unblocks an encode worker stuck on a
        // full queue, which in turn unblocks the capture worker.
        self.encoded_rx = None;
        for handle in self.workers.drain(..) {
            if handle.join().is_err() {
                warn!("vision worker panicked during shutdown");
            }
        }
        debug!("vision pipeline stopped");
    }
}

impl Drop for VisionPipeline {
    /// Dropping only signals; call [`VisionPipeline::shutdown`] for a
    /// deterministic join.
    fn drop(&mut self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }
}

fn capture_worker(
    mut source: Box<dyn VideoSource>,
    frames: Sender<Frame>,
    encode: Option<Sender<Frame>>,
    shutdown: Arc<AtomicBool>,
) {
    debug!(open = source.is_open(), "capture worker started");
    while !shutdown.load(Ordering::Relaxed) {
        let frame = source.read_frame();
        if frame.is_empty() && frames.is_empty() {
            // Source dry and nothing left in flight.
            info!("video source drained, stopping vision pipeline");
            shutdown.store(true, Ordering::Relaxed);
            break;
        }
        if let Some(encode) = &encode {
            if encode.send(frame.clone()).is_err() {
                break;
            }
        }
        if frames.send(frame).is_err() {
            break;
        }
    }
    debug!("capture worker exiting");
}

fn detect_worker(
    frames: Receiver<Frame>,
    params: DetectionParams,
    flag: DetectionFlag,
    processed: Arc<AtomicUsize>,
) {
    // Runs until every sender is gone: recv on a disconnected channel
    // fails instead of blocking, and frames queued before the
    // disconnect are still delivered in order, so nothing is dropped.
    while let Ok(frame) = frames.recv() {
        if frame.is_empty() {
            continue;
        }
        let detection = detect_target(&frame, &params);
        flag.store(detection.target_present());
        // Release pairs with the acquire in frames_processed().
        processed.fetch_add(1, Ordering::Release);
    }
    debug!("detect worker exiting, channel disconnected");
}

fn encode_worker(frames: Receiver<Frame>, out: Sender<EncodedFrame>, budget_ratio: f32) {
    while let Ok(frame) = frames.recv() {
        if frame.is_empty() {
            continue;
        }
        match encode_within_budget(&frame, budget_ratio) {
            Ok(encoded) => {
                if out.send(encoded).is_err() {
                    break;
                }
            }
            Err(err) => warn!(%err, "failed to encode frame"),
        }
    }
    debug!("encode worker exiting");
}
