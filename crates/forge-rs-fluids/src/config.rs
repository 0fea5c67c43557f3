//! TOML-defined fluids and tank presets.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::error::FluidError;
use crate::fluid::{Fluid, FluidRegistry};
use crate::handler::HandlerType;
use crate::stack::FluidStack;
use crate::tank::FluidTank;

#[derive(Debug, Default, Deserialize)]
pub struct FluidsConfig {
    /// Extra fluids registered on top of the vanilla ones.
    #[serde(default)]
    pub fluids: Vec<FluidEntry>,
    #[serde(default)]
    pub tanks: HashMap<String, TankPreset>,
}

#[derive(Debug, Deserialize)]
pub struct FluidEntry {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TankPreset {
    /// Capacity in millibuckets.
    pub capacity: u32,
    /// Fluids the tank accepts. Empty = any fluid.
    #[serde(default)]
    pub accepts: Vec<String>,
    #[serde(default)]
    pub handler: HandlerType,
}

impl FluidsConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, FluidError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> Result<Self, FluidError> {
        Ok(toml::from_str(contents)?)
    }

    /// Vanilla registry plus every configured fluid.
    pub fn build_registry(&self) -> Result<FluidRegistry, FluidError> {
        let mut registry = FluidRegistry::new();
        for entry in &self.fluids {
            registry.register(&entry.name)?;
        }
        Ok(registry)
    }

    pub fn preset(&self, name: &str) -> Option<&TankPreset> {
        self.tanks.get(name)
    }
}

impl TankPreset {
    /// Create an empty tank from this preset. Every accepted fluid must be
    /// known to `registry`.
    pub fn build(&self, registry: &FluidRegistry) -> Result<FluidTank, FluidError> {
        let allowed = self
            .accepts
            .iter()
            .map(|name| {
                registry
                    .get(name)
                    .cloned()
                    .ok_or_else(|| FluidError::UnknownFluid(name.clone()))
            })
            .collect::<Result<Vec<Fluid>, _>>()?;

        let mut tank = FluidTank::with_type(self.capacity, self.handler);
        if !allowed.is_empty() {
            debug!(
                "Tank preset ({} mB) restricted to {} fluid(s)",
                self.capacity,
                allowed.len()
            );
            tank.set_validator(move |stack: &FluidStack| allowed.contains(stack.fluid()));
        }
        Ok(tank)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::{FluidAction, FluidHandler, Tank};

    const CONFIG: &str = r#"
        [[fluids]]
        name = "mymod:oil"

        [[fluids]]
        name = "mymod:steam"

        [tanks.boiler]
        capacity = 16000
        accepts = ["minecraft:water"]

        [tanks.canister]
        capacity = 4000
        accepts = ["mymod:oil", "minecraft:lava"]
        handler = "item"

        [tanks.barrel]
        capacity = 8000
    "#;

    #[test]
    fn parse_config() {
        let config = FluidsConfig::parse(CONFIG).unwrap();
        assert_eq!(config.fluids.len(), 2);
        assert_eq!(config.tanks.len(), 3);

        let boiler = config.preset("boiler").unwrap();
        assert_eq!(boiler.capacity, 16000);
        assert_eq!(boiler.handler, HandlerType::Block); // default
        assert_eq!(config.preset("canister").unwrap().handler, HandlerType::Item);
        assert!(config.preset("barrel").unwrap().accepts.is_empty());
        assert!(config.preset("missing").is_none());
    }

    #[test]
    fn empty_config() {
        let config = FluidsConfig::parse("").unwrap();
        assert!(config.fluids.is_empty());
        assert!(config.tanks.is_empty());
        assert_eq!(config.build_registry().unwrap().len(), 3);
    }

    #[test]
    fn registry_includes_configured_fluids() {
        let registry = FluidsConfig::parse(CONFIG).unwrap().build_registry().unwrap();
        assert!(registry.contains("mymod:oil"));
        assert!(registry.contains("mymod:steam"));
        assert!(registry.contains("minecraft:water"));
    }

    #[test]
    fn invalid_fluid_name_fails_registry() {
        let config = FluidsConfig::parse("[[fluids]]\nname = \"Oil\"\n").unwrap();
        assert!(matches!(
            config.build_registry(),
            Err(FluidError::InvalidName(_))
        ));
    }

    #[test]
    fn preset_restricts_fluids() {
        let config = FluidsConfig::parse(CONFIG).unwrap();
        let registry = config.build_registry().unwrap();
        let oil = registry.get("mymod:oil").unwrap().clone();

        let mut boiler = config.preset("boiler").unwrap().build(&registry).unwrap();
        assert_eq!(boiler.capacity(), 16000);
        assert!(boiler.is_fluid_valid(&FluidStack::new(Fluid::WATER, 1)));
        assert!(!boiler.is_fluid_valid(&FluidStack::new(oil.clone(), 1)));
        assert_eq!(
            boiler.fill_block(&FluidStack::new(Fluid::LAVA, 1000), FluidAction::Execute),
            0
        );

        let canister = config.preset("canister").unwrap().build(&registry).unwrap();
        assert_eq!(canister.handler_type(), HandlerType::Item);
        assert!(canister.is_fluid_valid(&FluidStack::new(oil, 1)));
        assert!(!canister.is_fluid_valid(&FluidStack::new(Fluid::WATER, 1)));

        let barrel = config.preset("barrel").unwrap().build(&registry).unwrap();
        assert!(barrel.is_fluid_valid(&FluidStack::new(Fluid::LAVA, 1)));
    }

    #[test]
    fn preset_with_unknown_fluid_fails() {
        let config = FluidsConfig::parse(CONFIG).unwrap();
        let vanilla = FluidRegistry::new();
        assert!(matches!(
            config.preset("canister").unwrap().build(&vanilla),
            Err(FluidError::UnknownFluid(name)) if name == "mymod:oil"
        ));
    }

    #[test]
    fn load_from_file() {
        let path = std::env::temp_dir().join(format!("forge-rs-fluids-{}.toml", std::process::id()));
        std::fs::write(&path, CONFIG).unwrap();
        let config = FluidsConfig::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(config.tanks.len(), 3);

        assert!(matches!(
            FluidsConfig::load(&path),
            Err(FluidError::Io(_))
        ));
    }

    #[test]
    fn malformed_toml_is_config_error() {
        assert!(matches!(
            FluidsConfig::parse("[tanks.boiler]\ncapacity = -1\n"),
            Err(FluidError::Config(_))
        ));
    }
}
