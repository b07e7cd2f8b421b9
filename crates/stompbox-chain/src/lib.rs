//! Effect chain model for the stompbox processing backend.
//!
//! A chain is the user-facing pedalboard: one slot per catalog entry, each
//! independently enabled and tunable, in a user-controlled order. The chain
//! serializes its enabled subset into a [`ChainRequest`], which is what the
//! backend actually executes.
//!
//! # Example
//!
//! ```rust
//! use stompbox_chain::EffectChain;
//!
//! let mut chain = EffectChain::new();
//! let chorus = chain.find_by_api_name("Chorus").unwrap().id();
//! let booster = chain.find_by_api_name("Booster_Preamp").unwrap().id();
//!
//! chain.toggle(chorus);
//! chain.toggle(booster);
//! chain.set_param(booster, "gain_db", 9.0).unwrap();
//!
//! // Move the chorus in front of the booster.
//! let from = chain.position(chorus).unwrap();
//! chain.reorder(from, 0).unwrap();
//!
//! let request = chain.to_chain_request();
//! assert_eq!(request.names(), vec!["Chorus", "Booster_Preamp"]);
//! ```

mod chain;
mod error;
mod request;

pub use chain::{EffectChain, EffectId, EffectInstance, ParseEffectIdError};
pub use error::ChainError;
pub use request::{ChainRequest, ChainStep};

/// Re-export commonly used types from stompbox-registry
pub use stompbox_registry::{EffectCategory, EffectDescriptor, EffectRegistry, ParamMap};
