// Two-slot store for consecutive raw snapshots. The scheduler owns the
// store exclusively and rotation happens behind &mut, so rate derivation
// can never observe a half-rotated pair.

use crate::models::RawSnapshot;

#[derive(Debug, Default)]
pub struct SampleStore {
    previous: Option<RawSnapshot>,
    current: Option<RawSnapshot>,
}

impl SampleStore {
    pub fn new() -> Self {
        SampleStore::default()
    }

    /// Rotate the slots: current becomes previous (dropping the older
    /// snapshot), `raw` becomes current. Returns both for derivation. On
    /// the first push the previous side is `None`, which downstream code
    /// must surface as "rate unavailable" rather than a rate of zero.
    pub fn push(&mut self, raw: RawSnapshot) -> (Option<&RawSnapshot>, &RawSnapshot) {
        self.previous = self.current.take();
        let current = self.current.insert(raw);
        (self.previous.as_ref(), &*current)
    }

    pub fn current(&self) -> Option<&RawSnapshot> {
        self.current.as_ref()
    }

    pub fn previous(&self) -> Option<&RawSnapshot> {
        self.previous.as_ref()
    }
}
