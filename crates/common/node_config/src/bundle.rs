use std::collections::BTreeMap;

use alloy_primitives::Bytes;

/// Start-up configuration handed to a node image: string parameters plus opaque files.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeConfig {
    params: BTreeMap<String, String>,
    files: BTreeMap<String, Bytes>,
}

impl NodeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.params.insert(key.into(), value.to_string());
        self
    }

    pub fn with_file(mut self, path: impl Into<String>, contents: impl Into<Bytes>) -> Self {
        self.files.insert(path.into(), contents.into());
        self
    }

    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    pub fn file(&self, path: &str) -> Option<&Bytes> {
        self.files.get(path)
    }

    pub fn params(&self) -> &BTreeMap<String, String> {
        &self.params
    }

    pub fn files(&self) -> &BTreeMap<String, Bytes> {
        &self.files
    }

    /// Overlays `other` on top of `self`; keys present in both take the value from `other`.
    pub fn merge(&mut self, other: &NodeConfig) {
        self.params.extend(
            other
                .params
                .iter()
                .map(|(key, value)| (key.clone(), value.clone())),
        );
        self.files.extend(
            other
                .files
                .iter()
                .map(|(path, contents)| (path.clone(), contents.clone())),
        );
    }

    /// Renders the parameters as `KEY=value` lines, sorted by key.
    pub fn to_env(&self) -> String {
        self.params
            .iter()
            .map(|(key, value)| format!("{key}={value}\n"))
            .collect()
    }
}

impl<K: Into<String>, V: ToString> FromIterator<(K, V)> for NodeConfig {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(NodeConfig::new(), |config, (key, value)| {
                config.with_param(key, value)
            })
    }
}

/// Composes `sources` in order. Later sources win on collisions.
pub fn bundle<'a>(sources: impl IntoIterator<Item = &'a NodeConfig>) -> NodeConfig {
    sources
        .into_iter()
        .fold(NodeConfig::new(), |mut bundled, source| {
            bundled.merge(source);
            bundled
        })
}
