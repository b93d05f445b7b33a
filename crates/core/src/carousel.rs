use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;

pub const AUTO_ADVANCE_PERIOD: Duration = Duration::from_secs(6);

/// Wrap-around position over a fixed number of slides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Carousel {
    len: usize,
    current: usize,
}

impl Carousel {
    pub fn new(len: usize) -> Self {
        Self { len, current: 0 }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn current(&self) -> usize {
        self.current
    }

    /// Whether there is anything to rotate through.
    pub fn rotates(&self) -> bool {
        self.len > 1
    }

    pub fn next(&mut self) -> usize {
        if self.rotates() {
            self.current = (self.current + 1) % self.len;
        }
        self.current
    }

    pub fn previous(&mut self) -> usize {
        if self.rotates() {
            self.current = (self.current + self.len - 1) % self.len;
        }
        self.current
    }

    /// Jump to a slide; out-of-range indices are ignored.
    pub fn select(&mut self, index: usize) -> usize {
        if index < self.len {
            self.current = index;
        }
        self.current
    }
}

/// Periodic timer advancing a shared carousel. The timer stops when this
/// handle is dropped.
#[derive(Debug)]
pub struct AutoAdvance {
    handle: JoinHandle<()>,
}

impl AutoAdvance {
    /// Start advancing every `period`. Returns `None` for carousels with
    /// fewer than two slides.
    pub fn spawn(carousel: Arc<Mutex<Carousel>>, period: Duration) -> Option<Self> {
        let rotates = carousel.try_lock().map(|c| c.rotates()).unwrap_or(true);
        if !rotates || period.is_zero() {
            return None;
        }
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
            loop {
                ticker.tick().await;
                let index = carousel.lock().await.next();
                tracing::trace!(index, "carousel advanced");
            }
        });
        Some(Self { handle })
    }

    pub fn stop(self) {
        self.handle.abort();
    }
}

impl Drop for AutoAdvance {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
