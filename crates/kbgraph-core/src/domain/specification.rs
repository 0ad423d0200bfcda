//! Specification pattern for composable document filters
//!
//! Specifications are predicate objects that can be combined with boolean
//! logic. Search filters are expressed as specifications over `Document`.

use std::sync::Arc;

/// Core specification trait
pub trait Specification<T>: Send + Sync {
    /// Check if the entity satisfies this specification
    fn is_satisfied_by(&self, entity: &T) -> bool;

    /// Combine with another specification using AND
    fn and<S: Specification<T> + 'static>(self, other: S) -> AndSpecification<T>
    where
        Self: Sized + 'static,
    {
        AndSpecification {
            left: Arc::new(self),
            right: Arc::new(other),
        }
    }
}

/// Shared specifications, so an already composed chain can be extended
impl<T, S> Specification<T> for Arc<S>
where
    S: Specification<T> + ?Sized,
{
    fn is_satisfied_by(&self, entity: &T) -> bool {
        (**self).is_satisfied_by(entity)
    }
}

/// AND composite specification
pub struct AndSpecification<T> {
    left: Arc<dyn Specification<T>>,
    right: Arc<dyn Specification<T>>,
}

impl<T> Specification<T> for AndSpecification<T>
where
    T: Send + Sync,
{
    fn is_satisfied_by(&self, entity: &T) -> bool {
        self.left.is_satisfied_by(entity) && self.right.is_satisfied_by(entity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Even;
    struct Positive;

    impl Specification<i32> for Even {
        fn is_satisfied_by(&self, n: &i32) -> bool {
            n % 2 == 0
        }
    }

    impl Specification<i32> for Positive {
        fn is_satisfied_by(&self, n: &i32) -> bool {
            *n > 0
        }
    }

    #[test]
    fn test_and() {
        let spec = Even.and(Positive);
        assert!(spec.is_satisfied_by(&4));
        assert!(!spec.is_satisfied_by(&-4));
        assert!(!spec.is_satisfied_by(&3));
    }

    #[test]
    fn test_and_extends_shared_chain() {
        let shared: Arc<dyn Specification<i32>> = Arc::new(Even);
        let spec = shared.and(Positive);
        assert!(spec.is_satisfied_by(&2));
        assert!(!spec.is_satisfied_by(&-2));
        assert!(!spec.is_satisfied_by(&1));
    }
}
