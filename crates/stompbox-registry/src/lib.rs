//! Effect catalog for the stompbox processing backend.
//!
//! This crate is the fixed registry of effect kinds the backend knows how to
//! run. Each entry pairs the wire identity (`api_name`, the exact string the
//! backend matches on) with a display identity and a vendor-style default
//! preset.
//!
//! # Features
//!
//! - **Effect Discovery**: List all catalog entries in declaration order
//! - **Dual Identity**: Rename effects for display without touching the wire key
//! - **Category System**: Effects grouped by drive, modulation, and time-based
//! - **Default Presets**: Fresh copies of each entry's default parameters
//!
//! # Example
//!
//! ```rust
//! use stompbox_registry::{EffectRegistry, EffectCategory};
//!
//! let registry = EffectRegistry::new();
//!
//! for effect in registry.all_effects() {
//!     println!("{} ({})", effect.display_name, effect.api_name);
//! }
//!
//! let booster = registry.get("Booster_Preamp").unwrap();
//! assert_eq!(booster.display_name, "Booster / Preamp");
//! assert_eq!(booster.default_params()["gain_db"], 6.0);
//!
//! for effect in registry.effects_in_category(EffectCategory::Modulation) {
//!     println!("Modulation effect: {}", effect.display_name);
//! }
//! ```

use std::collections::BTreeMap;

/// Parameter name to numeric value.
///
/// Ordered so that serialized presets and requests are deterministic.
pub type ParamMap = BTreeMap<String, f64>;

/// Display-name overrides keyed by api name.
///
/// Entries missing from this table display their api name unchanged.
pub const DISPLAY_NAME_OVERRIDES: &[(&str, &str)] = &[
    ("Booster_Preamp", "Booster / Preamp"),
    ("SUPER OverDrive", "SUPER Over Drive"),
];

/// Category of effect for organization and filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EffectCategory {
    /// Boosters, overdrives, distortions, and fuzzes
    Drive,
    /// Chorus, dimension, and vibrato
    Modulation,
    /// Delay and reverb
    TimeBased,
}

impl EffectCategory {
    /// Returns a human-readable name for the category.
    pub const fn name(&self) -> &'static str {
        match self {
            EffectCategory::Drive => "Drive",
            EffectCategory::Modulation => "Modulation",
            EffectCategory::TimeBased => "Time-Based",
        }
    }

    /// Returns a description of the category.
    pub const fn description(&self) -> &'static str {
        match self {
            EffectCategory::Drive => "Gain stages, overdrive, distortion, and fuzz, weakest to strongest",
            EffectCategory::Modulation => "Chorus, dimension, and vibrato",
            EffectCategory::TimeBased => "Delay, reverb, and other ambience effects",
        }
    }
}

/// Describes one effect kind in the catalog.
#[derive(Debug, Clone)]
pub struct EffectDescriptor {
    /// Wire key sent to the backend. Opaque; may contain spaces.
    pub api_name: &'static str,
    /// Human-readable label.
    pub display_name: &'static str,
    /// Brief description of the effect.
    pub description: &'static str,
    /// Category for organization.
    pub category: EffectCategory,
    /// Presentation asset path, if the effect has artwork.
    pub image: Option<&'static str>,
    /// Default preset as `(name, value)` pairs.
    pub defaults: &'static [(&'static str, f64)],
}

impl EffectDescriptor {
    /// Returns a freshly allocated copy of the default parameters.
    ///
    /// Every call returns an independent map; mutating it never affects the
    /// descriptor or any other copy.
    pub fn default_params(&self) -> ParamMap {
        self.defaults
            .iter()
            .map(|&(name, value)| (name.to_string(), value))
            .collect()
    }

    /// Returns the default value for a single parameter.
    pub fn default_param(&self, name: &str) -> Option<f64> {
        self.defaults
            .iter()
            .find(|(param, _)| *param == name)
            .map(|&(_, value)| value)
    }

    /// Returns true if the parameter name is part of this effect's preset.
    pub fn has_param(&self, name: &str) -> bool {
        self.default_param(name).is_some()
    }

    /// Returns the parameter names in declaration order.
    pub fn param_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.defaults.iter().map(|&(name, _)| name)
    }
}

/// Static catalog entry before display-name resolution.
struct CatalogEntry {
    api_name: &'static str,
    description: &'static str,
    category: EffectCategory,
    image: Option<&'static str>,
    defaults: &'static [(&'static str, f64)],
}

// Defaults follow the voicing of the hardware pedals each entry is named after.
const CATALOG: &[CatalogEntry] = &[
    CatalogEntry {
        api_name: "Booster_Preamp",
        description: "Clean gain stage",
        category: EffectCategory::Drive,
        image: Some("/images/generated/webp/Booster_Preamp.webp"),
        defaults: &[("gain_db", 6.0)],
    },
    CatalogEntry {
        api_name: "Blues Driver",
        description: "Amp-like light overdrive",
        category: EffectCategory::Drive,
        image: Some("/images/generated/webp/Blues Driver.webp"),
        defaults: &[("drive_db", 10.0)],
    },
    CatalogEntry {
        api_name: "SUPER OverDrive",
        description: "Warm mid-gain overdrive",
        category: EffectCategory::Drive,
        image: Some("/images/generated/webp/SUPER OverDrive.webp"),
        defaults: &[("drive_db", 15.0)],
    },
    CatalogEntry {
        api_name: "Distortion",
        description: "Classic hard-clipping distortion",
        category: EffectCategory::Drive,
        image: Some("/images/generated/webp/Distortion.webp"),
        defaults: &[("drive_db", 22.0)],
    },
    CatalogEntry {
        api_name: "Fuzz",
        description: "Thick, saturated fuzz",
        category: EffectCategory::Drive,
        image: Some("/images/generated/webp/Fuzz.webp"),
        defaults: &[("drive_db", 28.0)],
    },
    CatalogEntry {
        api_name: "Metal Zone",
        description: "High-gain distortion with scooped voicing",
        category: EffectCategory::Drive,
        image: Some("/images/generated/webp/Metal Zone.webp"),
        defaults: &[("drive_db", 30.0)],
    },
    CatalogEntry {
        api_name: "Heavy Metal",
        description: "Maximum-gain metal distortion",
        category: EffectCategory::Drive,
        image: Some("/images/generated/webp/Heavy Metal.webp"),
        defaults: &[("drive_db", 35.0)],
    },
    CatalogEntry {
        api_name: "Chorus",
        description: "Modulated delay chorus",
        category: EffectCategory::Modulation,
        image: Some("/images/generated/webp/Chorus.webp"),
        defaults: &[("rate_hz", 1.0), ("depth", 0.25)],
    },
    CatalogEntry {
        api_name: "Dimension",
        description: "Subtle, slow stereo-style chorus",
        category: EffectCategory::Modulation,
        image: Some("/images/generated/webp/Dimension.webp"),
        defaults: &[("rate_hz", 0.5), ("depth", 0.15)],
    },
    CatalogEntry {
        api_name: "Vibrato",
        description: "Fully wet pitch vibrato",
        category: EffectCategory::Modulation,
        image: Some("/images/generated/webp/Vibrato.webp"),
        defaults: &[("rate_hz", 5.0), ("depth", 0.5), ("mix", 1.0)],
    },
    CatalogEntry {
        api_name: "Delay",
        description: "Feedback delay",
        category: EffectCategory::TimeBased,
        image: Some("/images/generated/webp/Delay.webp"),
        defaults: &[("delay_seconds", 0.35), ("feedback", 0.4)],
    },
    CatalogEntry {
        api_name: "Reverb",
        description: "Algorithmic room reverb",
        category: EffectCategory::TimeBased,
        image: None,
        defaults: &[("room_size", 0.5)],
    },
];

/// Registry of all known effect kinds.
///
/// Entries are kept in catalog declaration order, which is also the order of
/// a freshly built chain.
pub struct EffectRegistry {
    entries: Vec<EffectDescriptor>,
}

impl Default for EffectRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl EffectRegistry {
    /// Create a registry with the built-in catalog and display-name overrides.
    pub fn new() -> Self {
        Self::with_display_names(DISPLAY_NAME_OVERRIDES)
    }

    /// Create a registry with a custom display-name override table.
    ///
    /// An empty table is valid: every effect then displays its api name.
    pub fn with_display_names(overrides: &[(&'static str, &'static str)]) -> Self {
        let mut registry = Self {
            entries: Vec::with_capacity(CATALOG.len()),
        };
        for entry in CATALOG {
            let display_name = overrides
                .iter()
                .find(|(api, _)| *api == entry.api_name)
                .map_or(entry.api_name, |&(_, display)| display);
            registry.register(EffectDescriptor {
                api_name: entry.api_name,
                display_name,
                description: entry.description,
                category: entry.category,
                image: entry.image,
                defaults: entry.defaults,
            });
        }
        registry
    }

    /// Register an effect with the registry.
    fn register(&mut self, descriptor: EffectDescriptor) {
        debug_assert!(
            self.get(descriptor.api_name).is_none(),
            "duplicate api name {}",
            descriptor.api_name
        );
        self.entries.push(descriptor);
    }

    /// Returns descriptors for all registered effects, in catalog order.
    pub fn all_effects(&self) -> &[EffectDescriptor] {
        &self.entries
    }

    /// Returns descriptors for effects in a specific category.
    pub fn effects_in_category(&self, category: EffectCategory) -> Vec<&EffectDescriptor> {
        self.entries
            .iter()
            .filter(|e| e.category == category)
            .collect()
    }

    /// Get a descriptor by its exact api name.
    pub fn get(&self, api_name: &str) -> Option<&EffectDescriptor> {
        self.entries.iter().find(|e| e.api_name == api_name)
    }

    /// Look up an effect by api name or display name, ignoring ASCII case.
    ///
    /// Exact api-name matches win over case-insensitive ones.
    pub fn find(&self, name: &str) -> Option<&EffectDescriptor> {
        let name = name.trim();
        self.get(name).or_else(|| {
            self.entries.iter().find(|e| {
                e.api_name.eq_ignore_ascii_case(name) || e.display_name.eq_ignore_ascii_case(name)
            })
        })
    }

    /// Returns the display name for an api name, if it is in the catalog.
    pub fn display_name(&self, api_name: &str) -> Option<&'static str> {
        self.get(api_name).map(|e| e.display_name)
    }

    /// Returns the number of registered effects.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no effects are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_registry_creation() {
        let registry = EffectRegistry::new();
        assert_eq!(registry.len(), 12);
        assert!(!registry.is_empty());
    }

    #[test]
    fn test_catalog_order() {
        let registry = EffectRegistry::new();
        let names: Vec<_> = registry.all_effects().iter().map(|e| e.api_name).collect();
        assert_eq!(
            names,
            vec![
                "Booster_Preamp",
                "Blues Driver",
                "SUPER OverDrive",
                "Distortion",
                "Fuzz",
                "Metal Zone",
                "Heavy Metal",
                "Chorus",
                "Dimension",
                "Vibrato",
                "Delay",
                "Reverb",
            ]
        );
    }

    #[test]
    fn test_api_names_unique() {
        let registry = EffectRegistry::new();
        let unique: HashSet<_> = registry.all_effects().iter().map(|e| e.api_name).collect();
        assert_eq!(unique.len(), registry.len());
    }

    #[test]
    fn test_display_name_mapping_is_total() {
        let registry = EffectRegistry::new();
        for descriptor in registry.all_effects() {
            let expected = DISPLAY_NAME_OVERRIDES
                .iter()
                .find(|(api, _)| *api == descriptor.api_name)
                .map_or(descriptor.api_name, |&(_, display)| display);
            assert_eq!(
                descriptor.display_name, expected,
                "display name mismatch for {}",
                descriptor.api_name
            );
            assert!(!descriptor.display_name.is_empty());
        }
    }

    #[test]
    fn test_overridden_display_names() {
        let registry = EffectRegistry::new();
        assert_eq!(registry.display_name("Booster_Preamp"), Some("Booster / Preamp"));
        assert_eq!(registry.display_name("SUPER OverDrive"), Some("SUPER Over Drive"));
        assert_eq!(registry.display_name("Fuzz"), Some("Fuzz"));
        assert_eq!(registry.display_name("Wah"), None);
    }

    #[test]
    fn test_empty_override_table() {
        let registry = EffectRegistry::with_display_names(&[]);
        assert_eq!(registry.len(), 12);
        for descriptor in registry.all_effects() {
            assert_eq!(descriptor.display_name, descriptor.api_name);
        }
    }

    #[test]
    fn test_default_params_are_fresh_copies() {
        let registry = EffectRegistry::new();
        let chorus = registry.get("Chorus").unwrap();

        let mut first = chorus.default_params();
        first.insert("depth".to_string(), 0.9);
        let second = chorus.default_params();

        assert_eq!(second["depth"], 0.25);
        assert_eq!(chorus.default_param("depth"), Some(0.25));
    }

    #[test]
    fn test_default_values() {
        let registry = EffectRegistry::new();
        assert_eq!(registry.get("Blues Driver").unwrap().default_param("drive_db"), Some(10.0));
        assert_eq!(registry.get("Heavy Metal").unwrap().default_param("drive_db"), Some(35.0));

        let vibrato = registry.get("Vibrato").unwrap().default_params();
        assert_eq!(vibrato.len(), 3);
        assert_eq!(vibrato["rate_hz"], 5.0);
        assert_eq!(vibrato["mix"], 1.0);

        let delay = registry.get("Delay").unwrap();
        assert!(delay.has_param("feedback"));
        assert!(!delay.has_param("gain_db"));
        assert_eq!(
            delay.param_names().collect::<Vec<_>>(),
            vec!["delay_seconds", "feedback"]
        );
    }

    #[test]
    fn test_every_effect_has_params() {
        let registry = EffectRegistry::new();
        for descriptor in registry.all_effects() {
            assert!(
                !descriptor.defaults.is_empty(),
                "{} has no default preset",
                descriptor.api_name
            );
            assert!(descriptor.defaults.iter().all(|(_, v)| v.is_finite()));
        }
    }

    #[test]
    fn test_find_by_display_or_api_name() {
        let registry = EffectRegistry::new();
        assert_eq!(registry.find("blues driver").unwrap().api_name, "Blues Driver");
        assert_eq!(
            registry.find("booster / preamp").unwrap().api_name,
            "Booster_Preamp"
        );
        assert_eq!(registry.find(" Delay ").unwrap().api_name, "Delay");
        assert!(registry.find("flanger").is_none());
    }

    #[test]
    fn test_effects_by_category() {
        let registry = EffectRegistry::new();
        assert_eq!(registry.effects_in_category(EffectCategory::Drive).len(), 7);
        assert_eq!(registry.effects_in_category(EffectCategory::Modulation).len(), 3);
        assert_eq!(registry.effects_in_category(EffectCategory::TimeBased).len(), 2);
    }

    #[test]
    fn test_category_names() {
        assert_eq!(EffectCategory::Drive.name(), "Drive");
        assert_eq!(EffectCategory::TimeBased.name(), "Time-Based");
        assert!(EffectCategory::Modulation.description().contains("Chorus"));
    }

    #[test]
    fn test_reverb_has_no_image() {
        let registry = EffectRegistry::new();
        assert!(registry.get("Reverb").unwrap().image.is_none());
        assert!(
            registry
                .get("Metal Zone")
                .unwrap()
                .image
                .is_some_and(|path| path.ends_with("Metal Zone.webp"))
        );
    }
}
