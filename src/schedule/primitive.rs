use std::collections::VecDeque;

/// Handle for one requested frame callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameRequestId(pub u64);

/// Platform per-frame callback facility (display refresh, vsync, animation-frame queue).
///
/// A request fires at most once. Cancelling an id that already fired or was never issued is a
/// no-op.
pub trait FramePrimitive {
    /// Ask for one callback on the next frame.
    fn request_frame(&mut self) -> FrameRequestId;
    /// Withdraw a request that has not fired yet.
    fn cancel_frame(&mut self, id: FrameRequestId);
}

/// Host-pumped primitive: requests queue up until the host drains them at each refresh.
///
/// Used by the preview session and by tests to replay exact timestamp sequences.
#[derive(Debug, Default)]
pub struct ManualFrames {
    next_id: u64,
    queued: VecDeque<FrameRequestId>,
    requested: u64,
    cancelled: u64,
}

impl ManualFrames {
    /// Create an empty primitive.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests waiting to fire, oldest first.
    pub fn pending(&self) -> impl Iterator<Item = FrameRequestId> + '_ {
        self.queued.iter().copied()
    }

    /// Number of requests waiting to fire.
    pub fn len(&self) -> usize {
        self.queued.len()
    }

    /// Return `true` when nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.queued.is_empty()
    }

    /// Dequeue every request due at this refresh.
    ///
    /// Requests issued while the returned callbacks run land in the queue for the next refresh.
    pub fn take_due(&mut self) -> Vec<FrameRequestId> {
        self.queued.drain(..).collect()
    }

    /// Total requests issued.
    pub fn requested(&self) -> u64 {
        self.requested
    }

    /// Total requests withdrawn before firing.
    pub fn cancelled(&self) -> u64 {
        self.cancelled
    }
}

impl FramePrimitive for ManualFrames {
    fn request_frame(&mut self) -> FrameRequestId {
        let id = FrameRequestId(self.next_id);
        self.next_id += 1;
        self.requested += 1;
        self.queued.push_back(id);
        id
    }

    fn cancel_frame(&mut self, id: FrameRequestId) {
        if let Some(pos) = self.queued.iter().position(|x| *x == id) {
            self.queued.remove(pos);
            self.cancelled += 1;
        }
    }
}
