//! Registry of base environments.
use crate::BoxedEnv;
use anyhow::Result;
use envchain_core::error::EnvChainError;
use std::collections::HashMap;

type Constructor = Box<dyn Fn(i64) -> Result<BoxedEnv> + Send + Sync>;

/// Maps environment ids to constructors taking a seed.
///
/// The registry is `Sync`, so a single instance can build independent chains
/// on several threads.
#[derive(Default)]
pub struct EnvRegistry {
    constructors: HashMap<String, Constructor>,
}

impl EnvRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a constructor, replacing any previous one for `id`.
    pub fn register<F>(&mut self, id: impl Into<String>, f: F)
    where
        F: Fn(i64) -> Result<BoxedEnv> + Send + Sync + 'static,
    {
        self.constructors.insert(id.into(), Box::new(f));
    }

    /// Registers a constructor and returns the registry.
    pub fn with<F>(mut self, id: impl Into<String>, f: F) -> Self
    where
        F: Fn(i64) -> Result<BoxedEnv> + Send + Sync + 'static,
    {
        self.register(id, f);
        self
    }

    /// Returns `true` if `id` is registered.
    pub fn contains(&self, id: &str) -> bool {
        self.constructors.contains_key(id)
    }

    /// Registered ids, sorted.
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<_> = self.constructors.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Creates the environment `id`.
    pub fn make(&self, id: &str, seed: i64) -> Result<BoxedEnv> {
        match self.constructors.get(id) {
            Some(f) => f(seed),
            None => Err(EnvChainError::UnknownEnvironment(id.to_string()).into()),
        }
    }
}
