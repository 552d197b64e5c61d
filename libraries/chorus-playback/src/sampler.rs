//! Audio level sampling
//!
//! Feeds a lightweight visualization scalar from the decoded stream. The
//! output backend pushes samples into a `LevelTap`; a periodic task
//! averages the most recent window, smooths it and publishes a level in
//! the 1.0..=1.15 range. UIs map it straight onto a pulse scale, so
//! silence reads as exactly 1.0.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::debug;

/// Samples kept for one level estimate
const LEVEL_WINDOW: usize = 256;

/// Span the level moves across above its 1.0 floor
const LEVEL_RANGE: f32 = 0.15;

/// Per-tick smoothing factor toward the latest window mean
const SMOOTHING: f32 = 0.15;

/// Shared buffer the output backend feeds decoded samples into
///
/// Keeps only the newest [`LEVEL_WINDOW`] samples. Cheap to clone; all
/// clones share one buffer. Pushing from an audio callback thread is
/// fine, nothing here blocks or allocates beyond the fixed window.
#[derive(Clone, Default)]
pub struct LevelTap {
    samples: Arc<Mutex<VecDeque<f32>>>,
}

impl LevelTap {
    /// Create an empty tap
    pub fn new() -> Self {
        Self::default()
    }

    /// Push decoded samples, dropping the oldest beyond the window
    pub fn push_samples(&self, samples: &[f32]) {
        if let Ok(mut buffer) = self.samples.lock() {
            buffer.extend(samples.iter().copied());
            while buffer.len() > LEVEL_WINDOW {
                buffer.pop_front();
            }
        }
    }

    /// Copy of the current window, oldest first
    pub fn snapshot(&self) -> Vec<f32> {
        self.samples
            .lock()
            .map(|buffer| buffer.iter().copied().collect())
            .unwrap_or_default()
    }
}

/// Periodic task turning tapped samples into a published level
///
/// Spawned once playback first starts and stopped on shutdown. The
/// published level survives lock-free reads from any thread.
pub struct LevelSampler {
    level: Arc<AtomicU32>,
    stop_tx: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl LevelSampler {
    /// Spawn the sampling task over a tap
    ///
    /// Must run inside a tokio runtime. The task ticks every `period`
    /// until [`stop`](Self::stop) is called or the sampler is dropped.
    pub fn spawn(tap: LevelTap, period: Duration) -> Self {
        let level = Arc::new(AtomicU32::new(1.0f32.to_bits()));
        let published = Arc::clone(&level);
        let (stop_tx, mut stop_rx) = oneshot::channel();

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            let mut smoothed = 0.0f32;

            loop {
                tokio::select! {
                    _ = &mut stop_rx => {
                        debug!("Level sampler stopping");
                        break;
                    }
                    _ = ticker.tick() => {
                        let window = tap.snapshot();
                        if window.is_empty() {
                            continue;
                        }

                        let mean = window.iter().map(|s| s.abs()).sum::<f32>()
                            / window.len() as f32;
                        smoothed += (mean - smoothed) * SMOOTHING;
                        let scaled = 1.0 + smoothed.min(1.0) * LEVEL_RANGE;
                        published.store(scaled.to_bits(), Ordering::Relaxed);
                    }
                }
            }
        });

        Self {
            level,
            stop_tx: Some(stop_tx),
            handle: Some(handle),
        }
    }

    /// Latest published level, 1.0 before any audio arrives
    pub fn level(&self) -> f32 {
        f32::from_bits(self.level.load(Ordering::Relaxed))
    }

    /// Stop the task and wait for it to finish
    pub async fn stop(mut self) {
        if let Some(tx) = self.stop_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

impl Drop for LevelSampler {
    fn drop(&mut self) {
        if let Some(tx) = self.stop_tx.take() {
            let _ = tx.send(());
        }
    }
}
