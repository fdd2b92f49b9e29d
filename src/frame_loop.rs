//! Cooperative frame scheduling for a section's animation loop.
//!
//! A [`FrameLoop`] owns at most one outstanding [`FrameHandle`], the promise of
//! the next frame. The host polls it with the current time; when the handle is
//! due it is consumed, a [`Frame`] is returned, and the next handle is
//! scheduled one interval after *now*. Missed frames are therefore skipped,
//! never queued: after a long stall the loop runs exactly one frame and
//! carries on.
//!
//! Starting the loop also registers its standing subscriptions (the resize
//! and pointer listeners). [`FrameLoop::stop`] cancels the pending handle and
//! releases those subscriptions together.
//!
//! # Example
//!
//! ```ignore
//! let mut frames = FrameLoop::new(Duration::from_secs_f32(1.0 / 60.0));
//! frames.start(Instant::now());
//!
//! // In the host's event loop:
//! if let Some(frame) = frames.poll(Instant::now()) {
//!     field.tick(pointer.get(), &mut canvas);
//! }
//!
//! // When the section unmounts:
//! frames.stop();
//! ```

use std::time::{Duration, Instant};

/// A standing listener registered while the loop runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Subscription {
    Resize,
    Pointer,
}

/// Identifier of the single scheduled frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(u64);

/// A frame that is due now.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    /// The handle that was consumed to produce this frame.
    pub handle: FrameHandle,
    /// Frames run since the loop was created.
    pub number: u64,
    /// Seconds since the previous frame (0 for the first frame after start).
    pub delta: f32,
}

#[derive(Debug, Clone, Copy)]
struct Pending {
    handle: FrameHandle,
    due: Instant,
}

/// Start/stop frame scheduler with FPS bookkeeping.
#[derive(Debug)]
pub struct FrameLoop {
    interval: Duration,
    pending: Option<Pending>,
    subscriptions: Vec<Subscription>,
    next_handle: u64,
    /// When the last frame ran.
    last_frame: Option<Instant>,
    /// Total frames since creation.
    frame_count: u64,
    /// Calculated FPS (updated periodically).
    fps: f32,
    fps_frame_count: u64,
    fps_update_time: Option<Instant>,
    fps_update_interval: Duration,
}

impl FrameLoop {
    /// Create a stopped loop that targets one frame per `interval`.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            pending: None,
            subscriptions: Vec::new(),
            next_handle: 0,
            last_frame: None,
            frame_count: 0,
            fps: 0.0,
            fps_frame_count: 0,
            fps_update_time: None,
            fps_update_interval: Duration::from_millis(500),
        }
    }

    /// Loop targeting the given frame rate.
    pub fn with_fps(fps: f32) -> Self {
        Self::new(Duration::from_secs_f32(1.0 / fps.max(1.0)))
    }

    // ========== Control ==========

    /// Start the loop: subscribe to resize and pointer, schedule a frame now.
    ///
    /// Starting a running loop is a no-op and returns the existing handle.
    pub fn start(&mut self, now: Instant) -> FrameHandle {
        if let Some(pending) = self.pending {
            return pending.handle;
        }
        self.subscriptions = vec![Subscription::Resize, Subscription::Pointer];
        self.last_frame = None;
        self.fps_update_time = Some(now);
        self.fps_frame_count = self.frame_count;
        self.schedule(now)
    }

    /// Cancel the pending frame and release every subscription.
    ///
    /// Returns the cancelled handle, if the loop was running.
    pub fn stop(&mut self) -> Option<FrameHandle> {
        self.subscriptions.clear();
        self.pending.take().map(|p| p.handle)
    }

    /// Run the pending frame if it is due.
    pub fn poll(&mut self, now: Instant) -> Option<Frame> {
        let pending = self.pending?;
        if now < pending.due {
            return None;
        }

        let delta = self
            .last_frame
            .map(|last| now.duration_since(last).as_secs_f32())
            .unwrap_or(0.0);
        self.last_frame = Some(now);
        self.frame_count += 1;
        self.update_fps(now);

        // Next frame counts from now, not from the missed deadline.
        self.schedule(now + self.interval);

        Some(Frame {
            handle: pending.handle,
            number: self.frame_count,
            delta,
        })
    }

    // ========== Queries ==========

    #[inline]
    pub fn is_running(&self) -> bool {
        self.pending.is_some()
    }

    /// The handle of the scheduled frame, if any.
    pub fn pending(&self) -> Option<FrameHandle> {
        self.pending.map(|p| p.handle)
    }

    /// When the scheduled frame becomes due.
    pub fn next_due(&self) -> Option<Instant> {
        self.pending.map(|p| p.due)
    }

    /// Whether `subscription` is currently registered.
    pub fn is_subscribed(&self, subscription: Subscription) -> bool {
        self.subscriptions.contains(&subscription)
    }

    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }

    #[inline]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    // ========== Internal ==========

    fn schedule(&mut self, due: Instant) -> FrameHandle {
        self.next_handle += 1;
        let handle = FrameHandle(self.next_handle);
        self.pending = Some(Pending { handle, due });
        handle
    }

    fn update_fps(&mut self, now: Instant) {
        let Some(since) = self.fps_update_time else {
            self.fps_update_time = Some(now);
            return;
        };
        let elapsed = now.duration_since(since);
        if elapsed >= self.fps_update_interval {
            let frames = self.frame_count - self.fps_frame_count;
            self.fps = frames as f32 / elapsed.as_secs_f32();
            self.fps_frame_count = self.frame_count;
            self.fps_update_time = Some(now);
        }
    }
}
