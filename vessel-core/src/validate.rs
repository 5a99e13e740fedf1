//! Emptiness predicates.
//!
//! Registration calls treat empty keys and empty mappings as benign no-ops
//! rather than errors, so registrations are safe to issue speculatively from
//! independently-loaded modules. [`IsEmpty`] is the shared predicate behind
//! that rule. Numeric zero and `false` are deliberately not empty; no impls
//! exist for numbers or booleans.

use crate::action::Action;
use crate::behavior::BehaviorMap;
use std::collections::HashMap;

/// Types with a meaningful notion of being empty.
pub trait IsEmpty {
    /// Returns true if the value is empty.
    fn is_empty(&self) -> bool;
}

impl IsEmpty for str {
    fn is_empty(&self) -> bool {
        str::is_empty(self)
    }
}

impl IsEmpty for String {
    fn is_empty(&self) -> bool {
        String::is_empty(self)
    }
}

impl<T: IsEmpty> IsEmpty for Option<T> {
    /// `None` is empty; `Some(inner)` delegates to `inner`.
    fn is_empty(&self) -> bool {
        match self {
            None => true,
            Some(inner) => inner.is_empty(),
        }
    }
}

impl<K, V> IsEmpty for HashMap<K, V> {
    fn is_empty(&self) -> bool {
        HashMap::is_empty(self)
    }
}

impl<T> IsEmpty for Vec<T> {
    fn is_empty(&self) -> bool {
        Vec::is_empty(self)
    }
}

impl<A: Action> IsEmpty for BehaviorMap<A> {
    fn is_empty(&self) -> bool {
        BehaviorMap::is_empty(self)
    }
}

impl<T: IsEmpty + ?Sized> IsEmpty for &T {
    fn is_empty(&self) -> bool {
        (**self).is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strings() {
        assert!(IsEmpty::is_empty(""));
        assert!(IsEmpty::is_empty(&String::new()));
        assert!(!IsEmpty::is_empty("0"));
    }

    #[test]
    fn test_option_delegates() {
        let none: Option<String> = None;
        assert!(none.is_empty());
        assert!(Some(String::new()).is_empty());
        assert!(!Some("x".to_string()).is_empty());
    }

    #[test]
    fn test_maps() {
        let mut map: HashMap<String, u32> = HashMap::new();
        assert!(IsEmpty::is_empty(&map));
        map.insert("zero".into(), 0);
        assert!(!IsEmpty::is_empty(&map));
    }
}
