/// Handle of one requested frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameToken(u64);

/// Where the session asks for its next frame. The driver later delivers
/// the frame back to the session together with the token it was given.
pub trait FrameScheduler {
    fn request_frame(&mut self) -> FrameToken;
    fn cancel_frame(&mut self, token: FrameToken);
}

/// Holds at most one pending frame; the driver polls it once per refresh.
#[derive(Debug, Default)]
pub struct FrameQueue {
    next_id: u64,
    pending: Option<FrameToken>,
}

impl FrameQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hands out the pending frame, if any, and forgets it.
    pub fn take_pending(&mut self) -> Option<FrameToken> {
        self.pending.take()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl FrameScheduler for FrameQueue {
    fn request_frame(&mut self) -> FrameToken {
        self.next_id += 1;
        let token = FrameToken(self.next_id);
        if let Some(replaced) = self.pending.replace(token) {
            log::trace!("frame {:?} replaced by {:?}", replaced, token);
        }
        token
    }

    fn cancel_frame(&mut self, token: FrameToken) {
        if self.pending == Some(token) {
            self.pending = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_frame_is_taken_once() {
        let mut queue = FrameQueue::new();
        let token = queue.request_frame();
        assert!(queue.is_pending());
        assert_eq!(queue.take_pending(), Some(token));
        assert_eq!(queue.take_pending(), None);
    }

    #[test]
    fn cancel_only_drops_matching_token() {
        let mut queue = FrameQueue::new();
        let first = queue.request_frame();
        let second = queue.request_frame();
        assert_ne!(first, second);

        queue.cancel_frame(first);
        assert!(queue.is_pending());
        queue.cancel_frame(second);
        assert!(!queue.is_pending());
    }
}
