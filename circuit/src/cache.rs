//! Per-parameter-set memo of constraint systems.
//!
//! Building the constraint rows depends only on the parameters, so every
//! spend under the same parameters can share one [`ConstraintSystem`].

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use coin::GroupParameters;

use crate::constraints::ConstraintSystem;
use crate::errors::CircuitError;

/// Thread-safe cache of constraint systems keyed by the encoded parameters.
#[derive(Debug, Default)]
pub struct ConstraintCache {
    entries: RwLock<HashMap<Vec<u8>, Arc<ConstraintSystem>>>,
}

impl ConstraintCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached system for `params`, building it on first use.
    ///
    /// Two threads missing at once may both build; the first insert wins and
    /// both callers receive the same `Arc`.
    pub fn get_or_build(
        &self,
        params: &GroupParameters,
    ) -> Result<Arc<ConstraintSystem>, CircuitError> {
        let key =
            postcard::to_allocvec(params).map_err(|e| CircuitError::Encoding(e.to_string()))?;

        if let Some(system) = self
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
        {
            return Ok(Arc::clone(system));
        }

        let built = Arc::new(ConstraintSystem::build(params)?);
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let system = entries.entry(key).or_insert_with(|| {
            tracing::debug!(rows = built.len(), "cached constraint system");
            Arc::clone(&built)
        });
        Ok(Arc::clone(system))
    }

    /// Number of cached parameter sets.
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops every cached system. Systems still held by callers stay alive.
    pub fn clear(&self) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coin::CircuitDimensions;
    use field::BigUint;

    fn params(h: u32) -> GroupParameters {
        GroupParameters::new(
            BigUint::from(1_000_003u32),
            BigUint::from(2u32),
            BigUint::from(h),
            CircuitDimensions {
                columns: 4,
                rows: 4,
                serial_size: 8,
                pads: 2,
            },
        )
        .expect("params")
    }

    #[test]
    fn test_same_parameters_share_system() {
        let cache = ConstraintCache::new();
        let first = cache.get_or_build(&params(3)).expect("build");
        let second = cache.get_or_build(&params(3)).expect("cached");
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_distinct_parameters_get_distinct_systems() {
        let cache = ConstraintCache::new();
        let a = cache.get_or_build(&params(3)).expect("build");
        let b = cache.get_or_build(&params(5)).expect("build");
        assert!(!Arc::ptr_eq(&a, &b));
        assert!(b.matches(&params(5)));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_build_failure_is_not_cached() {
        let cache = ConstraintCache::new();
        let tight = GroupParameters::new(
            BigUint::from(1_000_003u32),
            BigUint::from(2u32),
            BigUint::from(3u32),
            CircuitDimensions {
                columns: 4,
                rows: 2,
                serial_size: 9,
                pads: 2,
            },
        )
        .expect("params");
        assert!(matches!(
            cache.get_or_build(&tight),
            Err(CircuitError::CapacityExceeded { .. })
        ));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_clear_keeps_outstanding_handles() {
        let cache = ConstraintCache::new();
        let system = cache.get_or_build(&params(3)).expect("build");
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(system.len(), 31);
    }
}
