//! # Weight store
//! Process-level owner of the "current" and "previous" weight vectors — the
//! only state that crosses scoring requests. `revise` archives the current
//! vector as previous and applies a form submission on top of it. Until the
//! first revision the previous vector mirrors the current one, so a fresh
//! store always produces an all-zero difference signal.

use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;

use crate::criteria::Criterion;
use crate::weights::{resolve, WeightVector};

/// Point-in-time view of both vectors.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeightSnapshot {
    pub current: WeightVector,
    pub previous: WeightVector,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revised_at_unix: Option<u64>,
}

#[derive(Debug)]
pub struct WeightStore {
    registry: &'static [Criterion],
    inner: RwLock<State>,
}

#[derive(Debug)]
struct State {
    current: WeightVector,
    previous: Option<WeightVector>,
    revised_at_unix: Option<u64>,
}

impl WeightStore {
    /// Fresh store with every criterion at its default weight.
    pub fn new(registry: &'static [Criterion]) -> Self {
        Self {
            registry,
            inner: RwLock::new(State {
                current: WeightVector::defaults(registry),
                previous: None,
                revised_at_unix: None,
            }),
        }
    }

    /// Current + previous vectors; before the first revision the previous
    /// vector equals the current one (cold-start policy, not an error).
    pub fn snapshot(&self) -> WeightSnapshot {
        let guard = self.inner.read().expect("weight store poisoned");
        WeightSnapshot {
            current: guard.current.clone(),
            previous: guard
                .previous
                .clone()
                .unwrap_or_else(|| guard.current.clone()),
            revised_at_unix: guard.revised_at_unix,
        }
    }

    pub fn has_previous(&self) -> bool {
        self.inner
            .read()
            .expect("weight store poisoned")
            .previous
            .is_some()
    }

    /// Archive current → previous, then resolve the form on top of the old
    /// current. Returns the snapshot after the revision.
    pub fn revise(&self, form: &HashMap<String, String>) -> WeightSnapshot {
        let mut guard = self.inner.write().expect("weight store poisoned");
        let prior = guard.current.clone();
        let current = resolve(&prior, form, self.registry);
        let revised_at = now_unix();

        guard.current = current.clone();
        guard.previous = Some(prior.clone());
        guard.revised_at_unix = Some(revised_at);

        WeightSnapshot {
            current,
            previous: prior,
            revised_at_unix: Some(revised_at),
        }
    }
}

fn now_unix() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
