use std::collections::BTreeMap;
use std::fmt::Debug;
use std::sync::Arc;

/// Capabilities of a dependency provider, looked up by provider-type tag.
///
/// Filters consult providers to resolve cross-provider details such as the
/// icon of an implicit reference. The update algorithm itself never calls a
/// provider.
pub trait SubTreeProvider: Debug + Send + Sync {
    /// Provider-type tag carried by every dependency this provider reports
    fn provider_type(&self) -> &str;

    /// Human readable name of the provider's subtree
    fn display_name(&self) -> &str {
        self.provider_type()
    }

    /// Icon for dependencies that are brought in implicitly, if the provider has one
    fn implicit_icon(&self) -> Option<&str> {
        None
    }
}

/// Lookup from provider-type tag to provider.
#[derive(Debug, Clone, Default)]
pub struct ProviderRegistry {
    providers: BTreeMap<String, Arc<dyn SubTreeProvider>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a provider, replacing any previous one with the same tag.
    pub fn register(&mut self, provider: Arc<dyn SubTreeProvider>) {
        self.providers
            .insert(provider.provider_type().to_string(), provider);
    }

    pub fn with_provider(mut self, provider: Arc<dyn SubTreeProvider>) -> Self {
        self.register(provider);
        self
    }

    pub fn get(&self, provider_type: &str) -> Option<&Arc<dyn SubTreeProvider>> {
        self.providers.get(provider_type)
    }

    pub fn provider_types(&self) -> impl Iterator<Item = &str> {
        self.providers.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}
