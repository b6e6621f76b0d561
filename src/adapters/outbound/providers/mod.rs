/// Provider adapters built from configuration
mod configured_provider;

pub use configured_provider::ConfiguredSubTreeProvider;
