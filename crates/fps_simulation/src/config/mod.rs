//! Weapon presets (JSON)
//!
//! Формат файла — map `name → WeaponConfig`:
//! ```json
//! { "blaster": { "fire_mode": "manual", "delay_between_shots": 0.25, ... } }
//! ```
//! Отсутствующие поля берутся из `Default`.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::weapon::WeaponConfig;

/// Набор weapon конфигов по имени (BTreeMap — стабильный порядок)
#[derive(Resource, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeaponPresets {
    pub weapons: BTreeMap<String, WeaponConfig>,
}

impl WeaponPresets {
    /// Встроенные presets (blaster, shotgun, auto_rifle, charge_launcher)
    pub fn builtin() -> Self {
        let weapons = [
            WeaponConfig::blaster(),
            WeaponConfig::shotgun(),
            WeaponConfig::auto_rifle(),
            WeaponConfig::charge_launcher(),
        ]
        .into_iter()
        .map(|config| (config.name.clone(), config))
        .collect();

        Self { weapons }
    }

    pub fn load_from_str(json: &str) -> Result<Self> {
        let raw: BTreeMap<String, serde_json::Value> =
            serde_json::from_str(json).context("failed to parse weapon presets JSON")?;

        let mut weapons = BTreeMap::new();
        for (name, mut body) in raw {
            // Имя = ключ, только если поле "name" в теле отсутствует
            if let Some(fields) = body.as_object_mut() {
                fields
                    .entry("name")
                    .or_insert_with(|| serde_json::Value::String(name.clone()));
            }

            let config: WeaponConfig =
                serde_json::from_value(body).with_context(|| format!("failed to parse preset '{}'", name))?;
            weapons.insert(name, config);
        }

        let presets = Self { weapons };
        presets.validate()?;
        Ok(presets)
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read weapon presets from {}", path.display()))?;

        Self::load_from_str(&json).with_context(|| format!("invalid weapon presets in {}", path.display()))
    }

    pub fn validate(&self) -> Result<()> {
        for (name, config) in &self.weapons {
            config
                .validate()
                .with_context(|| format!("preset '{}'", name))?;
        }
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&WeaponConfig> {
        self.weapons.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.weapons.keys().map(String::as_str)
    }
}
