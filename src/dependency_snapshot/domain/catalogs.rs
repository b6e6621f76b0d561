use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Display/schema metadata owned by the host.
///
/// Passed through to filters untouched; the snapshot engine never looks inside.
#[derive(Clone, Default)]
pub struct Catalogs {
    value: Option<Arc<dyn Any + Send + Sync>>,
}

impl Catalogs {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self {
            value: Some(Arc::new(value)),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_none()
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.value.as_deref().and_then(|value| value.downcast_ref::<T>())
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (&self.value, &other.value) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }
}

impl fmt::Debug for Catalogs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.value.is_some() {
            write!(f, "Catalogs(..)")
        } else {
            write!(f, "Catalogs(empty)")
        }
    }
}
