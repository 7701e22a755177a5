mod content_provider;
mod game_config;
mod serializer;
mod store;

pub use content_provider::{ConfigContentProvider, FileContentConfigProvider};
#[cfg(test)]
pub use content_provider::MemoryContentConfigProvider;
pub use game_config::{Config, get_config_store};
pub use serializer::{ConfigSerializer, YamlConfigSerializer};
pub use store::ConfigStore;

pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}
