//! Global slot accessor.
//!
//! The hosting runtime's shared global scope is consumed as a key-value
//! get/set capability ([`Scope`]). [`GlobalSlot`] is the explicit accessor
//! object in front of it: components receive a slot reference instead of
//! reaching into ambient global state, and [`GlobalSlot::process`] remains
//! as the thin process-wide shim for implicit lookup at the outermost
//! boundary.
//!
//! An environment without any scope is representable ([`GlobalSlot::detached`])
//! so "no global scope" surfaces as [`ScopeError::Unavailable`] rather than
//! undefined behavior.

use std::any::Any;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock};
use vessel_core::{ScopeError, VesselError};

/// A value stored in a global scope.
pub type SlotValue = Arc<dyn Any + Send + Sync>;

/// Fallible initializer used by [`Scope::get_or_set_with`].
pub type SlotInit<'a> = &'a mut dyn FnMut() -> Result<SlotValue, VesselError>;

/// A process-wide key-value scope capability.
pub trait Scope: Send + Sync + 'static {
    /// Reads the value stored under `key`.
    fn get(&self, key: &str) -> Option<SlotValue>;

    /// Writes `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: SlotValue);

    /// Returns the value under `key`, initializing it atomically when
    /// absent.
    ///
    /// Check and publish happen under the scope's own guard, so two
    /// concurrent callers can never both run `init` for the same key. An
    /// `init` error leaves the key unset. `init` runs while the guard is
    /// held and must not reenter the scope.
    fn get_or_set_with(&self, key: &str, init: SlotInit<'_>) -> Result<SlotValue, VesselError>;
}

/// The scope shared by the whole process.
///
/// All `ProcessScope` instances read and write the same static map, the way
/// every module of a process sees the same global object in a hosted
/// runtime. Lock poisoning is recovered by taking the inner map; scope
/// operations are idempotent so this is safe.
#[derive(Clone, Copy, Debug, Default)]
pub struct ProcessScope;

fn process_entries() -> &'static Mutex<HashMap<String, SlotValue>> {
    static ENTRIES: OnceLock<Mutex<HashMap<String, SlotValue>>> = OnceLock::new();
    ENTRIES.get_or_init(|| Mutex::new(HashMap::new()))
}

impl Scope for ProcessScope {
    fn get(&self, key: &str) -> Option<SlotValue> {
        let entries = process_entries()
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        entries.get(key).cloned()
    }

    fn set(&self, key: &str, value: SlotValue) {
        let mut entries = process_entries()
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        entries.insert(key.to_string(), value);
    }

    fn get_or_set_with(&self, key: &str, init: SlotInit<'_>) -> Result<SlotValue, VesselError> {
        let mut entries = process_entries()
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(existing) = entries.get(key) {
            return Ok(Arc::clone(existing));
        }
        let value = init()?;
        entries.insert(key.to_string(), Arc::clone(&value));
        Ok(value)
    }
}

/// Accessor for the single global slot available to the process.
///
/// Holds whichever scope the environment provides, or none. All reads and
/// writes fail with [`ScopeError::Unavailable`] when no scope exists.
#[derive(Clone)]
pub struct GlobalSlot {
    scope: Option<Arc<dyn Scope>>,
}

impl GlobalSlot {
    /// A slot backed by the process-wide scope.
    pub fn process() -> Self {
        Self::with_scope(Arc::new(ProcessScope))
    }

    /// A slot backed by a caller-supplied scope.
    pub fn with_scope(scope: Arc<dyn Scope>) -> Self {
        Self { scope: Some(scope) }
    }

    /// A slot for an environment with no global scope at all.
    pub fn detached() -> Self {
        Self { scope: None }
    }

    /// Returns true if a scope is available.
    pub fn is_available(&self) -> bool {
        self.scope.is_some()
    }

    /// Reads the value stored under `key`.
    pub fn get(&self, key: &str) -> Result<Option<SlotValue>, ScopeError> {
        match &self.scope {
            Some(scope) => Ok(scope.get(key)),
            None => Err(ScopeError::Unavailable),
        }
    }

    /// Writes `value` under `key`.
    pub fn set(&self, key: &str, value: SlotValue) -> Result<(), ScopeError> {
        match &self.scope {
            Some(scope) => {
                scope.set(key, value);
                Ok(())
            }
            None => Err(ScopeError::Unavailable),
        }
    }

    /// Returns the value under `key`, initializing it atomically when
    /// absent. See [`Scope::get_or_set_with`].
    pub fn get_or_set_with(
        &self,
        key: &str,
        init: SlotInit<'_>,
    ) -> Result<SlotValue, VesselError> {
        match &self.scope {
            Some(scope) => scope.get_or_set_with(key, init),
            None => Err(ScopeError::Unavailable.into()),
        }
    }
}

impl std::fmt::Debug for GlobalSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlobalSlot")
            .field("available", &self.is_available())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MapScope;

    #[test]
    fn test_set_then_get_round_trip() {
        let slot = GlobalSlot::with_scope(Arc::new(MapScope::new()));
        slot.set("answer", Arc::new(42u64)).unwrap();
        let value = slot.get("answer").unwrap().expect("value present");
        assert_eq!(*value.downcast::<u64>().unwrap(), 42);
    }

    #[test]
    fn test_missing_key_is_none() {
        let slot = GlobalSlot::with_scope(Arc::new(MapScope::new()));
        assert!(slot.get("absent").unwrap().is_none());
    }

    #[test]
    fn test_detached_slot_fails() {
        let slot = GlobalSlot::detached();
        assert!(matches!(slot.get("any"), Err(ScopeError::Unavailable)));
        assert!(matches!(
            slot.set("any", Arc::new(())),
            Err(ScopeError::Unavailable)
        ));
    }

    #[test]
    fn test_get_or_set_with_runs_init_once() {
        let slot = GlobalSlot::with_scope(Arc::new(MapScope::new()));
        let mut calls = 0;
        let first = slot
            .get_or_set_with("slot", &mut || {
                calls += 1;
                Ok(Arc::new(1u8))
            })
            .unwrap();
        let second = slot
            .get_or_set_with("slot", &mut || {
                calls += 1;
                Ok(Arc::new(2u8))
            })
            .unwrap();
        assert_eq!(calls, 1);
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_get_or_set_with_error_leaves_key_unset() {
        let slot = GlobalSlot::with_scope(Arc::new(MapScope::new()));
        let result = slot.get_or_set_with("slot", &mut || {
            Err(vessel_core::StoreError::NoReducers.into())
        });
        assert!(result.is_err());
        assert!(slot.get("slot").unwrap().is_none());
    }

    #[test]
    fn test_process_scope_is_shared() {
        let a = GlobalSlot::process();
        let b = GlobalSlot::process();
        a.set("shared-scope-marker", Arc::new("yes".to_string()))
            .unwrap();
        let seen = b.get("shared-scope-marker").unwrap().expect("shared");
        assert_eq!(*seen.downcast::<String>().unwrap(), "yes");
    }
}
