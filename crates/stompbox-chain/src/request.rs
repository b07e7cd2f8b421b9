//! Wire form of an effect chain.

use serde::{Deserialize, Serialize};
use stompbox_registry::ParamMap;

/// One effect in a processing request.
///
/// # Example
///
/// ```rust
/// use stompbox_chain::ChainStep;
///
/// let step = ChainStep::new("Blues Driver").with_param("drive_db", 12.0);
/// let json = serde_json::to_string(&step).unwrap();
/// assert_eq!(json, r#"{"name":"Blues Driver","params":{"drive_db":12.0}}"#);
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChainStep {
    /// Api name of the effect.
    pub name: String,

    /// Parameter values at the time the request was built.
    #[serde(default)]
    pub params: ParamMap,
}

impl ChainStep {
    /// Create a step with no parameter overrides.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: ParamMap::new(),
        }
    }

    /// Add a parameter to the step.
    pub fn with_param(mut self, name: impl Into<String>, value: f64) -> Self {
        self.params.insert(name.into(), value);
        self
    }
}

/// Ordered list of enabled effects, as sent in `effect_chain`.
///
/// Serializes as a bare JSON array. Order is signal-flow order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChainRequest {
    steps: Vec<ChainStep>,
}

impl ChainRequest {
    /// Create an empty request.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of effects in the request.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// True if no effect is enabled.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Steps in processing order.
    pub fn steps(&self) -> &[ChainStep] {
        &self.steps
    }

    /// Iterate over steps in processing order.
    pub fn iter(&self) -> std::slice::Iter<'_, ChainStep> {
        self.steps.iter()
    }

    /// Api names in processing order.
    pub fn names(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.name.as_str()).collect()
    }
}

impl From<Vec<ChainStep>> for ChainRequest {
    fn from(steps: Vec<ChainStep>) -> Self {
        Self { steps }
    }
}

impl FromIterator<ChainStep> for ChainRequest {
    fn from_iter<I: IntoIterator<Item = ChainStep>>(iter: I) -> Self {
        Self {
            steps: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a ChainRequest {
    type Item = &'a ChainStep;
    type IntoIter = std::slice::Iter<'a, ChainStep>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_bare_array() {
        let request: ChainRequest = vec![
            ChainStep::new("Booster_Preamp").with_param("gain_db", 6.0),
            ChainStep::new("Delay")
                .with_param("feedback", 0.4)
                .with_param("delay_seconds", 0.35),
        ]
        .into();

        let json = serde_json::to_string(&request).unwrap();
        assert_eq!(
            json,
            r#"[{"name":"Booster_Preamp","params":{"gain_db":6.0}},{"name":"Delay","params":{"delay_seconds":0.35,"feedback":0.4}}]"#
        );
    }

    #[test]
    fn empty_request_is_empty_array() {
        let request = ChainRequest::new();
        assert!(request.is_empty());
        assert_eq!(serde_json::to_string(&request).unwrap(), "[]");
    }

    #[test]
    fn missing_params_deserialize_as_empty() {
        let request: ChainRequest = serde_json::from_str(r#"[{"name":"Fuzz"}]"#).unwrap();
        assert_eq!(request.len(), 1);
        assert!(request.steps()[0].params.is_empty());
        assert_eq!(request.names(), vec!["Fuzz"]);
    }
}
