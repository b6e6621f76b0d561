use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, OnceLock};

const ANY_MONIKER: &str = "any";

#[derive(Debug)]
struct Moniker {
    display: String,
    normalized: String,
}

/// Identifier for one build target (e.g. `net6.0`, `net472`).
///
/// Equality, ordering and hashing use the normalized moniker (trimmed and
/// ASCII-lowercased), so `NET6.0` and `net6.0` name the same target. Clones
/// share the underlying allocation; use
/// [`TargetFrameworkInterner`](crate::dependency_snapshot::services::TargetFrameworkInterner)
/// to get one shared instance per distinct moniker.
#[derive(Clone)]
pub struct TargetFramework {
    moniker: Arc<Moniker>,
}

impl TargetFramework {
    pub fn new(moniker: impl Into<String>) -> Self {
        let display = moniker.into();
        let normalized = Self::normalize(&display);
        Self {
            moniker: Arc::new(Moniker {
                display: display.trim().to_string(),
                normalized,
            }),
        }
    }

    /// The target framework of a project that has not reported one yet.
    pub fn empty() -> Self {
        static EMPTY: OnceLock<TargetFramework> = OnceLock::new();
        EMPTY.get_or_init(|| TargetFramework::new("")).clone()
    }

    /// Wildcard target framework used by providers that are not target specific.
    pub fn any() -> Self {
        static ANY: OnceLock<TargetFramework> = OnceLock::new();
        ANY.get_or_init(|| TargetFramework::new(ANY_MONIKER)).clone()
    }

    pub(crate) fn normalize(moniker: &str) -> String {
        moniker.trim().to_ascii_lowercase()
    }

    /// The moniker as it was first spelled.
    pub fn moniker(&self) -> &str {
        &self.moniker.display
    }

    pub fn normalized_moniker(&self) -> &str {
        &self.moniker.normalized
    }

    pub fn is_empty(&self) -> bool {
        self.moniker.normalized.is_empty()
    }

    pub fn is_any(&self) -> bool {
        self.moniker.normalized == ANY_MONIKER
    }

    /// True when both values share one allocation (interned).
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.moniker, &other.moniker)
    }
}

impl PartialEq for TargetFramework {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.moniker.normalized == other.moniker.normalized
    }
}

impl Eq for TargetFramework {}

impl Hash for TargetFramework {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.moniker.normalized.hash(state);
    }
}

impl PartialOrd for TargetFramework {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TargetFramework {
    fn cmp(&self, other: &Self) -> Ordering {
        self.moniker.normalized.cmp(&other.moniker.normalized)
    }
}

impl fmt::Debug for TargetFramework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TargetFramework")
            .field(&self.moniker.display)
            .finish()
    }
}

impl fmt::Display for TargetFramework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.moniker.display)
    }
}

impl Serialize for TargetFramework {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.moniker())
    }
}
