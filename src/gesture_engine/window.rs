use heapless::Deque;

/// Upper bound on retained timestamps; `required_count` never exceeds it.
pub const PRESS_WINDOW_CAPACITY: usize = 64;

/// Timestamps of qualifying events inside the trailing window.
#[derive(Clone, Debug)]
pub struct PressWindow {
    stamps: Deque<u64, PRESS_WINDOW_CAPACITY>,
}

impl Default for PressWindow {
    fn default() -> Self {
        Self::new()
    }
}

impl PressWindow {
    pub const fn new() -> Self {
        Self {
            stamps: Deque::new(),
        }
    }

    /// A full window drops its oldest entry; the length stays at capacity,
    /// so the count check is unaffected.
    pub fn record(&mut self, now_ms: u64) {
        if self.stamps.is_full() {
            let _ = self.stamps.pop_front();
        }
        let _ = self.stamps.push_back(now_ms);
    }

    pub fn prune(&mut self, now_ms: u64, window_ms: u64) {
        let mut kept = Deque::new();
        for &stamp in self.stamps.iter() {
            if now_ms.saturating_sub(stamp) < window_ms {
                let _ = kept.push_back(stamp);
            }
        }
        self.stamps = kept;
    }

    pub fn clear(&mut self) {
        self.stamps.clear();
    }

    pub fn len(&self) -> usize {
        self.stamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stamps.is_empty()
    }

    pub fn oldest(&self) -> Option<u64> {
        self.stamps.front().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &u64> {
        self.stamps.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prune_drops_entries_at_exact_window_boundary() {
        let mut window = PressWindow::new();
        window.record(0);
        window.record(400);
        window.record(1_000);
        window.prune(1_000, 1_000);

        let kept: Vec<u64> = window.iter().copied().collect();
        assert_eq!(kept, vec![400, 1_000]);
        assert_eq!(window.oldest(), Some(400));
    }

    #[test]
    fn full_window_evicts_oldest() {
        let mut window = PressWindow::new();
        for t in 0..(PRESS_WINDOW_CAPACITY as u64 + 3) {
            window.record(t);
        }
        assert_eq!(window.len(), PRESS_WINDOW_CAPACITY);
        assert_eq!(window.oldest(), Some(3));
    }

    #[test]
    fn out_of_order_stamp_is_kept_until_stale() {
        let mut window = PressWindow::new();
        window.record(500);
        window.record(300);
        window.prune(500, 1_000);
        assert_eq!(window.len(), 2);
        window.prune(1_500, 1_000);
        assert_eq!(window.len(), 0);
        assert!(window.is_empty());
    }
}
