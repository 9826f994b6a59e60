use std::collections::HashSet;
use std::hash::Hash;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Keys of the requests currently running. Each key can be claimed by one request at a
/// time; unrelated keys never block each other.
#[derive(Debug)]
pub struct SingleFlight<K> {
    active: Mutex<HashSet<K>>,
}

impl<K> Default for SingleFlight<K> {
    fn default() -> Self {
        Self {
            active: Mutex::new(HashSet::new()),
        }
    }
}

impl<K> SingleFlight<K>
where
    K: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self::default()
    }

    fn active(&self) -> MutexGuard<'_, HashSet<K>> {
        // Single insert/remove operations; a poisoned set is still consistent.
        self.active.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Claim `key`, or `None` while another request still holds it.
    pub fn try_begin(&self, key: K) -> Option<InFlightGuard<'_, K>> {
        if self.active().insert(key.clone()) {
            Some(InFlightGuard { flight: self, key })
        } else {
            None
        }
    }

    pub fn is_busy(&self, key: &K) -> bool {
        self.active().contains(key)
    }

    pub fn is_idle(&self) -> bool {
        self.active().is_empty()
    }
}

/// Releases its key when dropped, including on early error returns.
#[derive(Debug)]
pub struct InFlightGuard<'a, K>
where
    K: Eq + Hash + Clone,
{
    flight: &'a SingleFlight<K>,
    key: K,
}

impl<K> Drop for InFlightGuard<'_, K>
where
    K: Eq + Hash + Clone,
{
    fn drop(&mut self) {
        self.flight.active().remove(&self.key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_key_is_refused_until_guard_drops() {
        let flight = SingleFlight::new();
        let guard = flight.try_begin("app-1").expect("first claim succeeds");
        assert!(flight.is_busy(&"app-1"));
        assert!(flight.try_begin("app-1").is_none());

        drop(guard);
        assert!(flight.is_idle());
        assert!(flight.try_begin("app-1").is_some());
    }

    #[test]
    fn other_keys_are_not_blocked() {
        let flight = SingleFlight::new();
        let _first = flight.try_begin("app-1").expect("first claim succeeds");
        let second = flight.try_begin("app-2").expect("unrelated key succeeds");
        assert!(flight.is_busy(&"app-2"));

        drop(second);
        assert!(!flight.is_busy(&"app-2"));
        assert!(flight.is_busy(&"app-1"));
        assert!(!flight.is_idle());
    }
}
