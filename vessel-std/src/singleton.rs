//! Singleton guard for the shared store.
//!
//! [`get_or_create`] is the single enforcement point of the
//! one-store-per-process invariant: it is the only code that writes the
//! store entry of the global slot. Everything else receives the returned
//! `Arc<Store>` explicitly.

use crate::scope::{GlobalSlot, SlotValue};
use crate::store::{INSPECTOR_SLOT, InspectorSlot, Store, StoreBuilder};
use std::sync::Arc;
use vessel_core::{Action, BehaviorMap, StoreError, VesselError};

/// Well-known slot key under which the store is published.
pub const STORE_SLOT: &str = "@@vessel/store";

/// Returns the existing store from the global slot, or builds and publishes
/// a new one.
///
/// - When a store is already present it is validated and returned
///   unchanged. A non-empty `behaviors` argument on such a repeat call is
///   advisory only: behaviors are fixed at first creation and are neither
///   replaced nor merged.
/// - When the slot holds a value of a different action type, or a store
///   failing the validity check, the call fails with
///   [`StoreError::ExistingInvalid`].
/// - When no store is present, one is built via [`StoreBuilder`] (picking
///   up an [`InspectorSlot`] from the scope if the environment published
///   one), stored in the slot, and returned.
///
/// Check and publish go through [`Scope::get_or_set_with`], so concurrent
/// callers racing on an empty slot still end up with the identical store.
/// No other component writes the store entry of the global slot.
///
/// [`Scope::get_or_set_with`]: crate::Scope::get_or_set_with
pub fn get_or_create<A: Action>(
    slot: &GlobalSlot,
    behaviors: BehaviorMap<A>,
) -> Result<Arc<Store<A>>, VesselError> {
    // Read the inspector capability up front: the initializer below runs
    // under the scope's guard and must not reenter the scope.
    let inspector = slot
        .get(INSPECTOR_SLOT)?
        .and_then(|value| value.downcast::<InspectorSlot>().ok());

    // `pending` doubles as the created-here marker: the initializer takes
    // it exactly when the slot was empty.
    let mut pending = Some(behaviors);
    let value = slot.get_or_set_with(STORE_SLOT, &mut || {
        let behaviors = pending.take().unwrap_or_default();
        let mut builder = StoreBuilder::new().behaviors(behaviors);
        if let Some(inspector) = &inspector {
            builder = builder.inspector(Arc::clone(&inspector.0));
        }
        let store: SlotValue = builder.build()?;
        Ok(store)
    })?;

    let store = value.downcast::<Store<A>>().map_err(|_| {
        tracing::error!("global slot holds a store of a different action type");
        StoreError::ExistingInvalid("stored value is not a store of this action type".into())
    })?;
    store
        .validate()
        .map_err(|err| StoreError::ExistingInvalid(err.to_string()))?;

    if let Some(ignored) = pending {
        if !ignored.is_empty() {
            tracing::warn!(
                ignored = ignored.len(),
                "store already exists; behaviors are fixed at first creation"
            );
        }
    }
    Ok(store)
}
