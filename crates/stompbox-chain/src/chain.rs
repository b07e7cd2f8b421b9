//! Effect chain management.
//!
//! [`EffectChain`] keeps one [`EffectInstance`] per slot in an arena indexed
//! by [`EffectId`], plus a separate ordering vector of ids. Reordering only
//! touches the ordering vector; toggling and parameter edits only touch the
//! addressed instance. Identity is therefore stable across reorders.

use std::fmt;
use std::str::FromStr;

use stompbox_registry::{EffectRegistry, ParamMap};

use crate::error::ChainError;
use crate::request::{ChainRequest, ChainStep};

/// Identity of one slot in a chain.
///
/// Ids are allocated by the chain that owns the slot and are never reused
/// within it. They are unrelated to position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EffectId(u32);

impl EffectId {
    /// Raw numeric value.
    pub const fn get(self) -> u32 {
        self.0
    }

    fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for EffectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "effect-{}", self.0)
    }
}

impl FromStr for EffectId {
    type Err = ParseEffectIdError;

    /// Parses the `effect-<n>` form produced by `Display`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.strip_prefix("effect-")
            .and_then(|n| n.parse().ok())
            .map(EffectId)
            .ok_or_else(|| ParseEffectIdError(s.to_string()))
    }
}

/// Error returned when a string is not of the form `effect-<n>`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid effect id '{0}' (expected effect-<n>)")]
pub struct ParseEffectIdError(String);

/// A single slot in the effect chain.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectInstance {
    id: EffectId,
    api_name: &'static str,
    display_name: &'static str,
    enabled: bool,
    params: ParamMap,
    defaults: &'static [(&'static str, f64)],
}

impl EffectInstance {
    /// Slot identity.
    pub fn id(&self) -> EffectId {
        self.id
    }

    /// Wire key of the effect kind. Fixed at creation.
    pub fn api_name(&self) -> &'static str {
        self.api_name
    }

    /// Human-readable label.
    pub fn display_name(&self) -> &'static str {
        self.display_name
    }

    /// Whether the slot is part of the processing request.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Current parameter values.
    pub fn params(&self) -> &ParamMap {
        &self.params
    }

    /// Current value of one parameter.
    pub fn param(&self, name: &str) -> Option<f64> {
        self.params.get(name).copied()
    }

    /// True if every parameter is at its catalog default.
    pub fn is_default(&self) -> bool {
        self.defaults
            .iter()
            .all(|&(name, value)| self.params.get(name) == Some(&value))
    }

    fn default_params(&self) -> ParamMap {
        self.defaults
            .iter()
            .map(|&(name, value)| (name.to_string(), value))
            .collect()
    }
}

/// An ordered, toggle-able chain of effects.
///
/// Cloning a chain yields a fully independent snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectChain {
    /// Instances indexed by `EffectId`.
    slots: Vec<EffectInstance>,
    /// Processing order as a permutation of slot ids.
    order: Vec<EffectId>,
}

impl Default for EffectChain {
    fn default() -> Self {
        Self::new()
    }
}

impl EffectChain {
    /// Build the initial chain from the built-in catalog.
    pub fn new() -> Self {
        Self::from_registry(&EffectRegistry::new())
    }

    /// Build the initial chain from a registry.
    ///
    /// One instance per catalog entry, in catalog order, all disabled, each
    /// holding its own copy of the entry's default parameters.
    pub fn from_registry(registry: &EffectRegistry) -> Self {
        let slots: Vec<EffectInstance> = registry
            .all_effects()
            .iter()
            .enumerate()
            .map(|(index, descriptor)| EffectInstance {
                id: EffectId(index as u32),
                api_name: descriptor.api_name,
                display_name: descriptor.display_name,
                enabled: false,
                params: descriptor.default_params(),
                defaults: descriptor.defaults,
            })
            .collect();
        let order = slots.iter().map(|s| s.id).collect();
        Self { slots, order }
    }

    /// Get the number of effects in the chain.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Check if the chain is empty.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Slot ids in processing order.
    pub fn ids(&self) -> &[EffectId] {
        &self.order
    }

    /// Iterate over instances in processing order.
    pub fn iter(&self) -> impl Iterator<Item = &EffectInstance> + '_ {
        self.order.iter().map(|id| &self.slots[id.index()])
    }

    /// Get an instance by id.
    pub fn get(&self, id: EffectId) -> Option<&EffectInstance> {
        self.slots.get(id.index())
    }

    /// Get the instance at a position in processing order.
    pub fn at(&self, index: usize) -> Option<&EffectInstance> {
        self.order.get(index).and_then(|&id| self.get(id))
    }

    /// Current position of an instance.
    pub fn position(&self, id: EffectId) -> Option<usize> {
        self.order.iter().position(|&other| other == id)
    }

    /// First instance of an effect kind, in processing order.
    pub fn find_by_api_name(&self, api_name: &str) -> Option<&EffectInstance> {
        self.iter().find(|e| e.api_name == api_name)
    }

    /// Number of enabled instances.
    pub fn enabled_count(&self) -> usize {
        self.slots.iter().filter(|e| e.enabled).count()
    }

    /// Flip the enabled state of an instance.
    ///
    /// Returns the new state, or `None` if the id does not belong to this
    /// chain. A stale id is a no-op, not an error.
    pub fn toggle(&mut self, id: EffectId) -> Option<bool> {
        let Some(slot) = self.slots.get_mut(id.index()) else {
            tracing::debug!(%id, "toggle ignored: unknown effect id");
            return None;
        };
        slot.enabled = !slot.enabled;
        tracing::debug!(%id, effect = slot.api_name, enabled = slot.enabled, "effect toggled");
        Some(slot.enabled)
    }

    /// Set the enabled state of an instance.
    ///
    /// Returns false if the id does not belong to this chain.
    pub fn set_enabled(&mut self, id: EffectId, enabled: bool) -> bool {
        match self.slots.get_mut(id.index()) {
            Some(slot) => {
                slot.enabled = enabled;
                true
            }
            None => false,
        }
    }

    /// Move the instance at `from` to `to`, shifting the ones in between.
    ///
    /// Only positions change; enabled flags and parameters are untouched.
    pub fn reorder(&mut self, from: usize, to: usize) -> Result<(), ChainError> {
        let len = self.order.len();
        for index in [from, to] {
            if index >= len {
                return Err(ChainError::InvalidArgument { index, len });
            }
        }
        if from != to {
            let id = self.order.remove(from);
            self.order.insert(to, id);
            tracing::debug!(%id, from, to, "effect reordered");
        }
        Ok(())
    }

    /// Set one parameter of an instance.
    ///
    /// Returns `Ok(false)` without changes if the id does not belong to this
    /// chain. The parameter must be part of the effect's preset and the value
    /// must be finite.
    pub fn set_param(&mut self, id: EffectId, name: &str, value: f64) -> Result<bool, ChainError> {
        let Some(slot) = self.slots.get_mut(id.index()) else {
            tracing::debug!(%id, param = name, "set_param ignored: unknown effect id");
            return Ok(false);
        };
        if !slot.params.contains_key(name) {
            return Err(ChainError::UnknownParameter {
                effect: slot.api_name.to_string(),
                param: name.to_string(),
            });
        }
        if !value.is_finite() {
            return Err(ChainError::InvalidValue {
                param: name.to_string(),
                value,
            });
        }
        slot.params.insert(name.to_string(), value);
        Ok(true)
    }

    /// Restore an instance's parameters to the catalog defaults.
    ///
    /// Returns false if the id does not belong to this chain.
    pub fn reset_params(&mut self, id: EffectId) -> bool {
        match self.slots.get_mut(id.index()) {
            Some(slot) => {
                slot.params = slot.default_params();
                true
            }
            None => false,
        }
    }

    /// Serialize the enabled subset, in processing order.
    ///
    /// An empty or fully disabled chain yields an empty request; rejecting
    /// that is the submitter's job.
    pub fn to_chain_request(&self) -> ChainRequest {
        self.iter()
            .filter(|e| e.enabled)
            .map(|e| ChainStep {
                name: e.api_name.to_string(),
                params: e.params.clone(),
            })
            .collect()
    }
}
