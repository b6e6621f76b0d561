use crate::dependency_snapshot::domain::SubTreeProvider;

/// SubTreeProvider described entirely by configuration
///
/// Replayed change logs carry no live providers, so the registry is filled
/// with these descriptors instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfiguredSubTreeProvider {
    provider_type: String,
    display_name: Option<String>,
    implicit_icon: Option<String>,
}

impl ConfiguredSubTreeProvider {
    pub fn new(provider_type: impl Into<String>) -> Self {
        Self {
            provider_type: provider_type.into(),
            display_name: None,
            implicit_icon: None,
        }
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    pub fn with_implicit_icon(mut self, icon: impl Into<String>) -> Self {
        self.implicit_icon = Some(icon.into());
        self
    }
}

impl SubTreeProvider for ConfiguredSubTreeProvider {
    fn provider_type(&self) -> &str {
        &self.provider_type
    }

    fn display_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.provider_type)
    }

    fn implicit_icon(&self) -> Option<&str> {
        self.implicit_icon.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_provider_type() {
        let provider = ConfiguredSubTreeProvider::new("NuGetDependency");
        assert_eq!(provider.provider_type(), "NuGetDependency");
        assert_eq!(provider.display_name(), "NuGetDependency");
        assert_eq!(provider.implicit_icon(), None);
    }

    #[test]
    fn test_configured_values() {
        let provider = ConfiguredSubTreeProvider::new("SdkDependency")
            .with_display_name("SDK")
            .with_implicit_icon("SdkImplicit");
        assert_eq!(provider.display_name(), "SDK");
        assert_eq!(provider.implicit_icon(), Some("SdkImplicit"));
    }
}
