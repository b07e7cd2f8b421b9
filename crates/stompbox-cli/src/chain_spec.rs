//! Command-line effect chain specifications.
//!
//! Format: `"Name:param=value,param=value|Name|..."`. Names match either the
//! api name or the display name, ignoring case. Listed effects are enabled
//! and moved to the front of the chain in the order given; everything else
//! stays disabled.

use stompbox_chain::{ChainError, EffectChain, EffectRegistry};
use thiserror::Error;

/// Errors from parsing or applying a chain specification.
#[derive(Debug, Error)]
pub enum ChainSpecError {
    #[error("Invalid chain specification: {0}")]
    Parse(String),

    #[error("Unknown effect: {0}")]
    UnknownEffect(String),

    #[error("Effect '{0}' is listed more than once")]
    Duplicate(String),

    #[error(transparent)]
    Chain(#[from] ChainError),
}

/// One `Name:param=value,...` entry.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectSpec {
    pub name: String,
    pub params: Vec<(String, f64)>,
}

/// Parse a full `|`-separated chain specification.
pub fn parse_chain_spec(spec: &str) -> Result<Vec<EffectSpec>, ChainSpecError> {
    let mut effects = Vec::new();

    for effect_spec in spec.split('|') {
        let effect_spec = effect_spec.trim();
        if effect_spec.is_empty() {
            continue;
        }
        effects.push(parse_effect_spec(effect_spec)?);
    }

    Ok(effects)
}

/// Parse a single effect specification.
///
/// Format: "Name:param1=value1,param2=value2"
fn parse_effect_spec(spec: &str) -> Result<EffectSpec, ChainSpecError> {
    let (name, params) = match spec.split_once(':') {
        Some((name, params)) => (name, parse_params(params)?),
        None => (spec, Vec::new()),
    };

    let name = name.trim();
    if name.is_empty() {
        return Err(ChainSpecError::Parse(format!(
            "missing effect name in '{spec}'"
        )));
    }

    Ok(EffectSpec {
        name: name.to_string(),
        params,
    })
}

fn parse_params(params_str: &str) -> Result<Vec<(String, f64)>, ChainSpecError> {
    let mut params = Vec::new();

    for param in params_str.split(',') {
        let param = param.trim();
        if param.is_empty() {
            continue;
        }

        let Some((key, value)) = param.split_once('=') else {
            return Err(ChainSpecError::Parse(format!(
                "'{param}' (expected key=value)"
            )));
        };
        let value: f64 = value.trim().parse().map_err(|_| {
            ChainSpecError::Parse(format!("'{}' is not a number in '{param}'", value.trim()))
        })?;
        params.push((key.trim().to_string(), value));
    }

    Ok(params)
}

/// Build a chain from the catalog with `specs` applied.
pub fn build_chain(
    specs: &[EffectSpec],
    registry: &EffectRegistry,
) -> Result<EffectChain, ChainSpecError> {
    let mut chain = EffectChain::from_registry(registry);

    for (slot, spec) in specs.iter().enumerate() {
        let descriptor = registry
            .find(&spec.name)
            .ok_or_else(|| ChainSpecError::UnknownEffect(spec.name.clone()))?;
        let Some(instance) = chain.find_by_api_name(descriptor.api_name) else {
            return Err(ChainSpecError::UnknownEffect(spec.name.clone()));
        };
        let id = instance.id();
        if instance.is_enabled() {
            return Err(ChainSpecError::Duplicate(descriptor.api_name.to_string()));
        }

        if let Some(from) = chain.position(id) {
            chain.reorder(from, slot)?;
        }
        chain.set_enabled(id, true);
        for (name, value) in &spec.params {
            chain.set_param(id, name, *value)?;
        }
    }

    Ok(chain)
}
