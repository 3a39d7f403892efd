// Frame scheduling. The simulator re-arms the scheduler at the end of every
// step; the host only runs a frame while it is armed.

pub trait FrameScheduler {
    /// Ask for one more frame.
    fn request_frame(&mut self);
}

/// Display-paced scheduler used by the window loop. Pacing itself comes from
/// the window's target FPS; this only tracks whether a frame is owed.
#[derive(Debug, Default)]
pub struct FrameLoop {
    armed: bool,
    stopped: bool,
    frames: u64,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume the pending request. False means nobody asked for a frame, or
    /// the loop was stopped.
    pub fn next_frame(&mut self) -> bool {
        if self.stopped || !self.armed {
            return false;
        }
        self.armed = false;
        self.frames += 1;
        true
    }

    /// Cancel: later requests are ignored and any pending one is dropped.
    pub fn stop(&mut self) {
        self.stopped = true;
        self.armed = false;
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl FrameScheduler for FrameLoop {
    fn request_frame(&mut self) {
        if !self.stopped {
            self.armed = true;
        }
    }
}

/// Counts requests so tests can drive steps by hand.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct ManualScheduler {
    pub requests: usize,
}

#[cfg(test)]
impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) {
        self.requests += 1;
    }
}
