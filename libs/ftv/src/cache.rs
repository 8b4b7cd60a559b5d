//! Payload cache
//!
//! Maps each [`RequestShape`] to its fully encoded payload for the life of
//! the owning server. Entries are inserted once on a miss and never updated
//! or evicted, so every hit replays the exact bytes (including the "now"
//! captured at first encoding).

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use bytes::Bytes;
use dashmap::DashMap;

use crate::codec::encode;
use crate::shape::RequestShape;
use crate::synth::{Clock, Synthesizer};

/// Point-in-time view of the cache counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: u64,
    pub bytes: u64,
}

/// Concurrent shape → payload store.
pub struct PayloadCache {
    entries: DashMap<RequestShape, Bytes>,
    synthesizer: Synthesizer,
    hits: AtomicU64,
    misses: AtomicU64,
    bytes: AtomicU64,
}

impl PayloadCache {
    /// Cache backed by an entropy-seeded generator and the wall clock.
    pub fn new() -> Self {
        Self::with_synthesizer(Synthesizer::from_entropy())
    }

    /// Cache with reproducible gap placement.
    pub fn seeded(seed: u64, clock: Arc<dyn Clock>) -> Self {
        Self::with_synthesizer(Synthesizer::seeded(seed, clock))
    }

    pub fn with_synthesizer(synthesizer: Synthesizer) -> Self {
        Self {
            entries: DashMap::new(),
            synthesizer,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            bytes: AtomicU64::new(0),
        }
    }

    /// Return the payload for `shape`, synthesizing and encoding it on first use.
    ///
    /// The shape must already be validated. Concurrent misses on the same
    /// shape may both encode, but only the first insert is kept and every
    /// caller receives the stored buffer.
    pub fn get_or_encode(&self, shape: &RequestShape) -> Bytes {
        if let Some(hit) = self.entries.get(shape) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return hit.value().clone();
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let start = Instant::now();
        let payload = encode(&self.synthesizer.generate(shape));
        debug_assert_eq!(payload.len(), shape.encoded_len());

        let stored = self
            .entries
            .entry(*shape)
            .or_insert_with(|| {
                self.bytes.fetch_add(payload.len() as u64, Ordering::Relaxed);
                payload
            })
            .value()
            .clone();

        tracing::debug!(
            num_series = shape.num_series,
            num_points = shape.num_points,
            percent_missing = shape.percent_missing,
            bytes = stored.len(),
            elapsed_us = start.elapsed().as_micros() as u64,
            "Encoded payload on cache miss"
        );

        stored
    }

    /// Whether `shape` already has a stored payload.
    pub fn contains(&self, shape: &RequestShape) -> bool {
        self.entries.contains_key(shape)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.entries.len() as u64,
            bytes: self.bytes.load(Ordering::Relaxed),
        }
    }
}

impl Default for PayloadCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synth::FixedClock;
    use std::sync::atomic::AtomicI64;

    const NOW: i64 = 1_700_000_000_000;

    /// Clock that advances one second on every read.
    struct SteppingClock(AtomicI64);

    impl Clock for SteppingClock {
        fn now_ms(&self) -> i64 {
            self.0.fetch_add(1_000, Ordering::Relaxed)
        }
    }

    #[test]
    fn test_hit_returns_identical_bytes() {
        let cache = PayloadCache::seeded(1, Arc::new(FixedClock(NOW)));
        let shape = RequestShape::new(3, 250, 20.0);

        let first = cache.get_or_encode(&shape);
        let second = cache.get_or_encode(&shape);

        assert_eq!(first, second);
        assert_eq!(first.len(), shape.encoded_len());
        assert_eq!(
            cache.stats(),
            CacheStats {
                hits: 1,
                misses: 1,
                entries: 1,
                bytes: shape.encoded_len() as u64
            }
        );
    }

    #[test]
    fn test_hit_replays_first_timestamp() {
        let cache = PayloadCache::seeded(1, Arc::new(SteppingClock(AtomicI64::new(NOW))));
        let shape = RequestShape::new(1, 2, 0.0);

        let first = cache.get_or_encode(&shape);
        let later = cache.get_or_encode(&shape);
        assert_eq!(first, later);

        // A different shape sees the advanced clock.
        let other = cache.get_or_encode(&RequestShape::new(1, 2, 1.0));
        assert_ne!(&first[8..24], &other[8..24]);
    }

    #[test]
    fn test_distinct_shapes_get_distinct_entries() {
        let cache = PayloadCache::seeded(5, Arc::new(FixedClock(NOW)));
        cache.get_or_encode(&RequestShape::new(1, 10, 0.0));
        cache.get_or_encode(&RequestShape::new(1, 10, 0.5));
        cache.get_or_encode(&RequestShape::new(2, 10, 0.0));
        cache.get_or_encode(&RequestShape::new(1, 11, 0.0));

        assert_eq!(cache.len(), 4);
        assert!(cache.contains(&RequestShape::new(1, 10, 0.5)));
        assert!(!cache.contains(&RequestShape::new(1, 10, 0.25)));
    }

    #[test]
    fn test_empty_payloads_are_cached() {
        let cache = PayloadCache::seeded(5, Arc::new(FixedClock(NOW)));
        assert!(cache.is_empty());

        assert!(cache.get_or_encode(&RequestShape::new(0, 500, 20.0)).is_empty());
        assert_eq!(cache.get_or_encode(&RequestShape::new(1, 0, 0.0)).len(), 8);
        assert_eq!(cache.len(), 2);
    }
}
