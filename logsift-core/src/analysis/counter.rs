use crate::analysis::types::ViewEntry;
use ahash::RandomState;
use std::collections::HashMap;

struct Slot {
    count: u64,
    first_seen: usize,
}

/// Count per key, remembering the order in which keys first appeared.
///
/// Ranking needs the whole input: a key that looks cold early on can still
/// end up on top.
pub struct FirstSeenCounter {
    slots: HashMap<String, Slot, RandomState>,
}

impl FirstSeenCounter {
    pub(crate) fn new() -> Self {
        Self {
            slots: HashMap::with_hasher(RandomState::new()),
        }
    }

    pub(crate) fn record(&mut self, key: &str) {
        if let Some(slot) = self.slots.get_mut(key) {
            slot.count += 1;
            return;
        }

        let first_seen = self.slots.len();
        self.slots.insert(
            key.to_string(),
            Slot {
                count: 1,
                first_seen,
            },
        );
    }

    /// Entries by count descending; equal counts keep first-seen order.
    pub(crate) fn ranked(self, limit: Option<usize>) -> Vec<ViewEntry> {
        let mut slots: Vec<(String, Slot)> = self.slots.into_iter().collect();
        slots.sort_by(|(_, a), (_, b)| {
            b.count
                .cmp(&a.count)
                .then_with(|| a.first_seen.cmp(&b.first_seen))
        });

        if let Some(limit) = limit {
            slots.truncate(limit);
        }

        slots
            .into_iter()
            .map(|(key, slot)| ViewEntry {
                key,
                count: slot.count,
            })
            .collect()
    }
}
