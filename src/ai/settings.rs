use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::storage::{API_KEY_KEY, MODEL_KEY, Storage};

pub const DEFAULT_MODEL: &str = "deepseek-chat";
/// Models offered in the model picker, as `(id, label)`.
pub const KNOWN_MODELS: &[(&str, &str)] = &[
    ("deepseek-chat", "DeepSeek Chat"),
    ("deepseek-reasoner", "DeepSeek Reasoner"),
];

/// API key and model, as read at call time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Credentials {
    pub api_key: String,
    pub model: String,
}

impl Credentials {
    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

/// Persisted assistant settings. Writes go straight through to storage.
pub struct AiSettings {
    storage: Arc<dyn Storage>,
    values: Mutex<Credentials>,
}

impl AiSettings {
    pub fn load(storage: Arc<dyn Storage>) -> Self {
        let api_key = read_setting(storage.as_ref(), API_KEY_KEY).unwrap_or_default();
        let model = read_setting(storage.as_ref(), MODEL_KEY)
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        Self {
            storage,
            values: Mutex::new(Credentials { api_key, model }),
        }
    }

    pub fn credentials(&self) -> Credentials {
        self.lock().clone()
    }

    pub fn api_key(&self) -> String {
        self.lock().api_key.clone()
    }

    pub fn model(&self) -> String {
        self.lock().model.clone()
    }

    pub fn set_api_key(&self, key: impl Into<String>) {
        let key = key.into();
        if let Err(err) = self.storage.set(API_KEY_KEY, &key) {
            tracing::warn!(error = %err, "failed to save API key");
        }
        self.lock().api_key = key;
    }

    pub fn set_model(&self, model: impl Into<String>) {
        let model = model.into();
        if let Err(err) = self.storage.set(MODEL_KEY, &model) {
            tracing::warn!(error = %err, "failed to save model selection");
        }
        self.lock().model = model;
    }

    fn lock(&self) -> MutexGuard<'_, Credentials> {
        self.values.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Non-empty stored value; read failures are logged and treated as unset.
fn read_setting(storage: &dyn Storage, key: &str) -> Option<String> {
    match storage.get(key) {
        Ok(value) => value.filter(|v| !v.is_empty()),
        Err(err) => {
            tracing::warn!(key, error = %err, "failed to load assistant setting");
            None
        }
    }
}
