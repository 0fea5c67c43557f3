//! Fluid kinds and the registry that resolves persisted fluid names.

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;

use tracing::debug;

use crate::error::FluidError;

/// A kind of fluid, identified by its namespaced name
/// (e.g. `"minecraft:water"`). Amount-independent.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fluid(Cow<'static, str>);

impl Fluid {
    /// The "no fluid" kind.
    pub const EMPTY: Fluid = Fluid(Cow::Borrowed("minecraft:empty"));
    pub const WATER: Fluid = Fluid(Cow::Borrowed("minecraft:water"));
    pub const LAVA: Fluid = Fluid(Cow::Borrowed("minecraft:lava"));

    fn owned(name: &str) -> Self {
        Fluid(Cow::Owned(name.to_string()))
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        *self == Fluid::EMPTY
    }
}

impl fmt::Display for Fluid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Checks `namespace:path`. Namespaces allow `[a-z0-9_.-]`, paths
/// additionally allow `/`.
pub fn is_valid_name(name: &str) -> bool {
    let Some((namespace, path)) = name.split_once(':') else {
        return false;
    };
    let ns_char = |c: char| matches!(c, 'a'..='z' | '0'..='9' | '_' | '.' | '-');
    !namespace.is_empty()
        && !path.is_empty()
        && namespace.chars().all(ns_char)
        && path.chars().all(|c| ns_char(c) || c == '/')
}

/// Registry of fluid kinds known to the server, keyed by name.
#[derive(Debug, Clone)]
pub struct FluidRegistry {
    by_name: HashMap<String, Fluid>,
}

impl Default for FluidRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl FluidRegistry {
    /// Registry holding the vanilla fluids (empty, water, lava).
    pub fn new() -> Self {
        let by_name = [Fluid::EMPTY, Fluid::WATER, Fluid::LAVA]
            .into_iter()
            .map(|f| (f.name().to_string(), f))
            .collect();
        Self { by_name }
    }

    /// Register a fluid, or return the already registered one with the
    /// same name.
    pub fn register(&mut self, name: &str) -> Result<Fluid, FluidError> {
        if !is_valid_name(name) {
            return Err(FluidError::InvalidName(name.to_string()));
        }
        let fluid = self
            .by_name
            .entry(name.to_string())
            .or_insert_with(|| {
                debug!("Registered fluid {name}");
                Fluid::owned(name)
            })
            .clone();
        Ok(fluid)
    }

    pub fn get(&self, name: &str) -> Option<&Fluid> {
        self.by_name.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Number of registered fluids, including the empty fluid.
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}
