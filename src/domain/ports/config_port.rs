//! Config port - supplies the current configuration snapshot.

use crate::domain::config::SyncConfig;

/// Source of the configuration snapshot handed to the engine.
///
/// `get` has no side effects and never fails: when nothing has been saved
/// yet (or the saved copy is unusable) it returns `SyncConfig::default()`.
pub trait ConfigPort: Send + Sync {
    fn get(&self) -> SyncConfig;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Mock implementation for testing
    struct MockConfigPort {
        saved: Mutex<Option<SyncConfig>>,
    }

    impl MockConfigPort {
        fn new() -> Self {
            Self {
                saved: Mutex::new(None),
            }
        }

        fn save(&self, config: SyncConfig) {
            *self.saved.lock().unwrap() = Some(config);
        }
    }

    impl ConfigPort for MockConfigPort {
        fn get(&self) -> SyncConfig {
            self.saved.lock().unwrap().clone().unwrap_or_default()
        }
    }

    #[test]
    fn mock_returns_defaults_until_saved() {
        let port = MockConfigPort::new();
        assert_eq!(port.get(), SyncConfig::default());

        port.save(SyncConfig::new("/data/photos", "b2"));
        assert_eq!(port.get().remote_target(), "b2:photos");
    }

    #[test]
    fn trait_is_object_safe() {
        let port: Box<dyn ConfigPort> = Box::new(MockConfigPort::new());
        assert_eq!(port.get().remote_name, "gdrive");
    }
}
