use entity_log_api::{LogEntryKind, LogError, LogKind, LogResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

static GLOBAL_REGISTRY: OnceLock<Arc<KindRegistry>> = OnceLock::new();

/// A caller-defined kind: the label used in code, its stored code and the
/// string shown when the entry is displayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomKind {
    pub label: String,
    pub code: i32,
    pub display: String,
}

impl CustomKind {
    pub fn new(label: impl Into<String>, code: i32, display: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            code,
            display: display.into(),
        }
    }
}

/// Frozen mapping between kind labels, stored codes and display strings.
///
/// Built once through [`KindRegistryBuilder`] and then shared read-only,
/// usually as `Arc<KindRegistry>`.
#[derive(Debug, Clone)]
pub struct KindRegistry {
    codes_by_label: HashMap<String, i32>,
    labels_by_code: HashMap<i32, String>,
    display_by_code: HashMap<i32, String>,
}

impl KindRegistry {
    pub fn builder() -> KindRegistryBuilder {
        KindRegistryBuilder::new()
    }

    /// Registry containing only the built-in kinds.
    pub fn builtin() -> Self {
        KindRegistryBuilder::new().build()
    }

    /// Resolve any accepted kind shape to its canonical code.
    pub fn resolve(&self, kind: &LogKind) -> LogResult<i32> {
        match kind {
            LogKind::Builtin(kind) => Ok(kind.code()),
            LogKind::Label(label) => self.resolve_label(label),
            LogKind::Code(code) => self.check_code(*code),
        }
    }

    pub fn resolve_label(&self, label: &str) -> LogResult<i32> {
        if let Some(code) = self.codes_by_label.get(label) {
            return Ok(*code);
        }
        label
            .parse::<LogEntryKind>()
            .map(LogEntryKind::code)
            .map_err(|_| LogError::UnknownLogKind(format!("'{label}'")))
    }

    pub fn check_code(&self, code: i32) -> LogResult<i32> {
        if self.labels_by_code.contains_key(&code) {
            Ok(code)
        } else {
            Err(LogError::UnknownLogKind(code.to_string()))
        }
    }

    /// Human-readable string for a stored code.
    pub fn display(&self, code: i32) -> LogResult<&str> {
        self.display_by_code
            .get(&code)
            .map(String::as_str)
            .ok_or_else(|| LogError::UnknownLogKind(code.to_string()))
    }

    pub fn label(&self, code: i32) -> LogResult<&str> {
        self.labels_by_code
            .get(&code)
            .map(String::as_str)
            .ok_or_else(|| LogError::UnknownLogKind(code.to_string()))
    }

    pub fn len(&self) -> usize {
        self.labels_by_code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels_by_code.is_empty()
    }

    /// Install `registry` as the process-wide registry. Only the first call succeeds.
    pub fn install(registry: KindRegistry) -> LogResult<Arc<KindRegistry>> {
        let registry = Arc::new(registry);
        GLOBAL_REGISTRY
            .set(registry.clone())
            .map_err(|_| LogError::RegistryAlreadyInstalled)?;
        Ok(registry)
    }

    /// The installed process-wide registry, or a built-in-only one when none was installed.
    pub fn global() -> Arc<KindRegistry> {
        GLOBAL_REGISTRY
            .get_or_init(|| Arc::new(KindRegistry::builtin()))
            .clone()
    }
}

impl Default for KindRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Collects custom kinds on top of the built-in ones before freezing them.
#[derive(Debug, Clone)]
pub struct KindRegistryBuilder {
    registry: KindRegistry,
}

impl KindRegistryBuilder {
    pub fn new() -> Self {
        let mut registry = KindRegistry {
            codes_by_label: HashMap::new(),
            labels_by_code: HashMap::new(),
            display_by_code: HashMap::new(),
        };
        for kind in LogEntryKind::ALL {
            registry.codes_by_label.insert(kind.label().to_string(), kind.code());
            registry.labels_by_code.insert(kind.code(), kind.label().to_string());
            registry.display_by_code.insert(kind.code(), kind.label().to_string());
        }
        Self { registry }
    }

    /// Register a custom kind.
    ///
    /// Registering the exact same triple twice is accepted; a label bound to
    /// another code or a code bound to another label is rejected.
    pub fn register(mut self, kind: CustomKind) -> LogResult<Self> {
        if kind.label.is_empty() {
            return Err(LogError::Validation("kind label must not be empty".to_string()));
        }
        let builtin_label = kind.label.parse::<LogEntryKind>().ok();
        if let Some(existing_code) = self
            .registry
            .codes_by_label
            .get(&kind.label)
            .copied()
            .or(builtin_label.map(LogEntryKind::code))
        {
            if existing_code != kind.code {
                return Err(LogError::DuplicateKindLabel {
                    label: kind.label,
                    existing_code,
                });
            }
        }
        if let Some(existing_label) = self.registry.labels_by_code.get(&kind.code) {
            let identical = existing_label == &kind.label
                && self.registry.display_by_code.get(&kind.code) == Some(&kind.display);
            if !identical {
                return Err(LogError::KindCodeCollision {
                    code: kind.code,
                    existing_label: existing_label.clone(),
                });
            }
            return Ok(self);
        }

        self.registry.codes_by_label.insert(kind.label.clone(), kind.code);
        self.registry.labels_by_code.insert(kind.code, kind.label);
        self.registry.display_by_code.insert(kind.code, kind.display);
        Ok(self)
    }

    pub fn register_all<I>(self, kinds: I) -> LogResult<Self>
    where
        I: IntoIterator<Item = CustomKind>,
    {
        kinds.into_iter().try_fold(self, |builder, kind| builder.register(kind))
    }

    pub fn build(self) -> KindRegistry {
        self.registry
    }
}

impl Default for KindRegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}
