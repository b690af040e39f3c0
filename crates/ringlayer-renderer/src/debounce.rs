use std::collections::HashMap;
use std::hash::Hash;

#[derive(Debug, Clone)]
struct Pending<T> {
    deadline_ms: f64,
    seq: u64,
    payload: T,
}

/// Trailing-edge debouncer keyed by event class.
///
/// Scheduling a key that is already pending replaces its payload and pushes
/// its deadline back; other keys are untouched. Time is supplied by the
/// caller, so the debouncer runs on whatever clock the event loop uses.
#[derive(Debug, Clone)]
pub struct Debouncer<K, T> {
    delay_ms: f64,
    pending: HashMap<K, Pending<T>>,
    next_seq: u64,
}

impl<K: Eq + Hash + Copy, T> Debouncer<K, T> {
    /// A zero delay fires on the next tick.
    pub fn new(delay_ms: f64) -> Self {
        Self {
            delay_ms: delay_ms.max(0.0),
            pending: HashMap::new(),
            next_seq: 0,
        }
    }

    pub fn delay_ms(&self) -> f64 {
        self.delay_ms
    }

    pub fn schedule(&mut self, key: K, payload: T, now_ms: f64) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.insert(
            key,
            Pending {
                deadline_ms: now_ms + self.delay_ms,
                seq,
                payload,
            },
        );
    }

    pub fn cancel(&mut self, key: K) -> Option<T> {
        self.pending.remove(&key).map(|p| p.payload)
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn is_pending(&self, key: K) -> bool {
        self.pending.contains_key(&key)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Remove and return every entry due at `now_ms`, earliest deadline first.
    pub fn take_due(&mut self, now_ms: f64) -> Vec<(K, T)> {
        let due: Vec<K> = self
            .pending
            .iter()
            .filter(|(_, p)| p.deadline_ms <= now_ms)
            .map(|(k, _)| *k)
            .collect();
        self.take_keys(due)
    }

    /// Remove and return everything pending, earliest deadline first.
    pub fn take_all(&mut self) -> Vec<(K, T)> {
        let keys: Vec<K> = self.pending.keys().copied().collect();
        self.take_keys(keys)
    }

    fn take_keys(&mut self, keys: Vec<K>) -> Vec<(K, T)> {
        let mut taken: Vec<(K, Pending<T>)> = keys
            .into_iter()
            .filter_map(|k| self.pending.remove(&k).map(|p| (k, p)))
            .collect();
        taken.sort_by(|(_, a), (_, b)| {
            a.deadline_ms
                .total_cmp(&b.deadline_ms)
                .then(a.seq.cmp(&b.seq))
        });
        taken.into_iter().map(|(k, p)| (k, p.payload)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_delay_waits_for_tick() {
        let mut d: Debouncer<&str, u32> = Debouncer::new(0.0);
        d.schedule("move", 1, 10.0);
        assert!(d.take_due(9.0).is_empty());
        assert_eq!(d.take_due(10.0), vec![("move", 1)]);
        assert!(d.is_empty());
    }

    #[test]
    fn test_same_key_replaces_pending() {
        let mut d: Debouncer<&str, u32> = Debouncer::new(50.0);
        d.schedule("move", 1, 0.0);
        d.schedule("move", 2, 30.0);
        assert!(d.take_due(60.0).is_empty());
        assert_eq!(d.take_due(80.0), vec![("move", 2)]);
    }

    #[test]
    fn test_keys_do_not_cancel_each_other() {
        let mut d: Debouncer<&str, u32> = Debouncer::new(20.0);
        d.schedule("resize", 7, 0.0);
        for t in 0..5 {
            d.schedule("move", t, t as f64 * 5.0);
        }
        assert_eq!(d.take_due(20.0), vec![("resize", 7)]);
        assert_eq!(d.take_due(40.0), vec![("move", 4)]);
    }

    #[test]
    fn test_take_all_orders_by_deadline_then_sequence() {
        let mut d: Debouncer<&str, u32> = Debouncer::new(0.0);
        d.schedule("b", 1, 5.0);
        d.schedule("a", 2, 5.0);
        d.schedule("c", 3, 1.0);
        assert_eq!(d.take_all(), vec![("c", 3), ("b", 1), ("a", 2)]);
    }

    #[test]
    fn test_cancel() {
        let mut d: Debouncer<&str, u32> = Debouncer::new(0.0);
        d.schedule("zoom", 9, 0.0);
        assert!(d.is_pending("zoom"));
        assert_eq!(d.cancel("zoom"), Some(9));
        assert!(!d.is_pending("zoom"));
    }
}
