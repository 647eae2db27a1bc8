use std::collections::HashMap;
use std::sync::Arc;

use lexika_config::dictionary::DictionaryConfig;

use crate::error::{DictionaryError, RegistryError};
use crate::glossary::GlossaryDictionary;
use crate::renren::RenRenDictionary;
use crate::youdao::YoudaoDictionary;
use crate::DictionaryService;

type ServiceCtor = Box<dyn Fn() -> Result<Arc<dyn DictionaryService>, DictionaryError> + Send + Sync>;

/// Maps a backend name to a constructor. Built once at startup and passed
/// by reference to whatever needs a backend; each `get_service` call
/// constructs a fresh instance.
pub struct DictionaryRegistry {
    services: HashMap<String, ServiceCtor>,
}

impl DictionaryRegistry {
    pub const DEFAULT_SERVICE: &str = "youdao";

    pub fn new(config: &DictionaryConfig) -> Self {
        let mut registry = Self {
            services: HashMap::new(),
        };

        let youdao_config = config.clone();
        registry.register_service("youdao", move || {
            Ok(Arc::new(YoudaoDictionary::new(&youdao_config)))
        });

        let renren_config = config.clone();
        registry.register_service("renren", move || {
            Ok(Arc::new(RenRenDictionary::new(&renren_config)))
        });

        if config.glossary_path.is_some() {
            let glossary_config = config.clone();
            registry.register_service("glossary", move || {
                Ok(Arc::new(GlossaryDictionary::new(&glossary_config)?))
            });
        }

        registry
    }

    /// Register a backend constructor. Duplicate names overwrite.
    pub fn register_service<F>(&mut self, name: &str, ctor: F)
    where
        F: Fn() -> Result<Arc<dyn DictionaryService>, DictionaryError> + Send + Sync + 'static,
    {
        self.services.insert(name.to_lowercase(), Box::new(ctor));
    }

    /// Resolve a backend by name, case-insensitively.
    pub fn get_service(&self, name: &str) -> Result<Arc<dyn DictionaryService>, RegistryError> {
        let ctor = self
            .services
            .get(&name.to_lowercase())
            .ok_or_else(|| RegistryError::UnknownService(name.to_string()))?;
        Ok(ctor()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> DictionaryConfig {
        let mut config = DictionaryConfig::new();
        config.glossary_path = None;
        config
    }

    #[test]
    fn resolves_names_case_insensitively() {
        let registry = DictionaryRegistry::new(&test_config());
        assert_eq!(registry.get_service("YOUDAO").unwrap().name(), "youdao");
        assert_eq!(registry.get_service("youdao").unwrap().name(), "youdao");
        assert_eq!(registry.get_service("RenRen").unwrap().name(), "renren");
    }

    #[test]
    fn unknown_name_is_an_error() {
        let registry = DictionaryRegistry::new(&test_config());
        assert!(matches!(
            registry.get_service("webster"),
            Err(RegistryError::UnknownService(_))
        ));
    }

    #[test]
    fn glossary_registers_only_with_a_path() {
        let registry = DictionaryRegistry::new(&test_config());
        assert!(registry.get_service("glossary").is_err());

        let mut config = test_config();
        config.glossary_path = Some("/missing/glossary.json".to_string());
        let registry = DictionaryRegistry::new(&config);
        // registered, but construction fails on the missing file
        assert!(matches!(
            registry.get_service("glossary"),
            Err(RegistryError::Construction(_))
        ));
    }

    #[test]
    fn duplicate_registration_overwrites() {
        let mut registry = DictionaryRegistry::new(&test_config());
        let config = test_config();
        registry.register_service("Youdao", move || {
            Ok(Arc::new(RenRenDictionary::new(&config)))
        });
        assert_eq!(registry.get_service("youdao").unwrap().name(), "renren");
    }
}
