use crate::constants::{COOLDOWN_TREASURE_CLAIM_MS, COOLDOWN_TREASURE_CREATE_MS};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// One named cooldown window.
#[derive(Debug, Clone, Copy)]
pub struct CooldownRule {
    pub key: &'static str,
    pub cooldown_ms: i64,
}

pub const RULE_TREASURE_CREATE: CooldownRule = CooldownRule {
    key: "treasure_create",
    cooldown_ms: COOLDOWN_TREASURE_CREATE_MS,
};

pub const RULE_TREASURE_CLAIM: CooldownRule = CooldownRule {
    key: "treasure_claim",
    cooldown_ms: COOLDOWN_TREASURE_CLAIM_MS,
};

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CooldownState {
    pub last_action_ms: i64,
    pub count: u32,
}

/// Persistence seam for cooldown state, so the limiter can run against an
/// in-memory map in tests and against platform storage in a real client.
pub trait CooldownStore: Send + Sync {
    fn load(&self, key: &str) -> Option<CooldownState>;
    fn save(&self, key: &str, state: CooldownState);
    fn remove(&self, key: &str);
    fn clear(&self);
}

#[derive(Default)]
pub struct MemoryCooldownStore {
    entries: Mutex<HashMap<String, CooldownState>>,
}

impl CooldownStore for MemoryCooldownStore {
    fn load(&self, key: &str) -> Option<CooldownState> {
        self.entries.lock().unwrap().get(key).copied()
    }

    fn save(&self, key: &str, state: CooldownState) {
        self.entries.lock().unwrap().insert(key.to_string(), state);
    }

    fn remove(&self, key: &str) {
        self.entries.lock().unwrap().remove(key);
    }

    fn clear(&self) {
        self.entries.lock().unwrap().clear();
    }
}

/// Rate Limiter - Enforces per-action cooldowns between writes.
pub struct RateLimiter {
    store: Arc<dyn CooldownStore>,
}

impl RateLimiter {
    pub fn new(store: Arc<dyn CooldownStore>) -> Self {
        Self { store }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryCooldownStore::default()))
    }

    /// Whether the action is allowed right now. An allowed action is recorded
    /// immediately, starting the next cooldown window.
    pub fn is_allowed(&self, rule: &CooldownRule) -> bool {
        let now = chrono::Utc::now().timestamp_millis();

        let Some(state) = self.store.load(rule.key) else {
            self.store.save(
                rule.key,
                CooldownState {
                    last_action_ms: now,
                    count: 1,
                },
            );
            return true;
        };

        if now - state.last_action_ms < rule.cooldown_ms {
            return false;
        }

        self.store.save(
            rule.key,
            CooldownState {
                last_action_ms: now,
                count: state.count + 1,
            },
        );
        true
    }

    /// Remaining cooldown in milliseconds; zero when the action is allowed.
    pub fn remaining_cooldown_ms(&self, rule: &CooldownRule) -> i64 {
        let Some(state) = self.store.load(rule.key) else {
            return 0;
        };

        let now = chrono::Utc::now().timestamp_millis();
        (rule.cooldown_ms - (now - state.last_action_ms)).max(0)
    }

    pub fn reset(&self, key: &str) {
        self.store.remove(key);
    }

    pub fn clear_all(&self) {
        self.store.clear();
    }
}
