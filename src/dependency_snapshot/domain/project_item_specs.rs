use std::collections::BTreeSet;

/// Item specs declared directly in the project file.
///
/// Matching ignores ASCII case. Filters use this to tell explicit references
/// from implicit ones brought in by the SDK.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectItemSpecs {
    specs: BTreeSet<String>,
}

impl ProjectItemSpecs {
    pub fn new<I, S>(specs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            specs: specs
                .into_iter()
                .map(|spec| spec.as_ref().to_ascii_lowercase())
                .collect(),
        }
    }

    pub fn contains(&self, spec: &str) -> bool {
        self.specs.contains(&spec.to_ascii_lowercase())
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}
