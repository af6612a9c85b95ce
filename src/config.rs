//! API base resolution: UI value, persisted value, then default.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info, warn};

/// HTTPS by default; plain HTTP gets blocked by most hosted frontends.
pub const DEFAULT_API_BASE: &str = "https://fixmysheet-backend.onrender.com";
pub const STORAGE_KEY: &str = "FIXMYSHEET_API_BASE";

const APP_DIR: &str = "fixmysheet";
const SETTINGS_FILE: &str = "settings.json";

/// Directory holding settings and the log file.
pub fn app_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

fn has_scheme(v: &str) -> bool {
    let lower = v.get(..8).unwrap_or(v).to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Trim, drop trailing slashes, and make sure there is a scheme.
/// Empty input becomes [`DEFAULT_API_BASE`].
pub fn normalize_api_base(raw: &str) -> String {
    let v = raw
        .trim()
        .trim_end_matches(|c: char| c == '/' || c.is_whitespace());
    if v.is_empty() {
        return DEFAULT_API_BASE.to_string();
    }
    if has_scheme(v) {
        v.to_string()
    } else {
        format!("https://{v}")
    }
}

/// First candidate that is non-empty after trimming, normalized.
pub fn resolve<'a, I>(candidates: I) -> String
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    let chosen = candidates
        .into_iter()
        .flatten()
        .find(|c| !c.trim().is_empty())
        .unwrap_or(DEFAULT_API_BASE);
    normalize_api_base(chosen)
}

/// Durable string key-value storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Volatile store for tests.
#[allow(dead_code)]
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// JSON object on disk, rewritten in full on every `set`.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    /// Opens `<config_dir>/fixmysheet/settings.json`.
    pub fn open_default() -> Self {
        Self::open(app_dir().join(SETTINGS_FILE))
    }

    /// A missing or corrupt file starts out empty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                warn!("ignoring unreadable settings {}: {}", path.display(), e);
                BTreeMap::new()
            }),
            Err(_) => BTreeMap::new(),
        };
        Self { path, entries }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(&self.entries)
            .context("Failed to serialize settings")?;
        fs::write(&self.path, json)
            .with_context(|| format!("Failed to write {}", self.path.display()))?;
        Ok(())
    }
}

/// Resolver over an injected store.
pub struct EndpointConfig<S> {
    store: S,
}

impl<S: KeyValueStore> EndpointConfig<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn saved(&self) -> Option<String> {
        self.store.get(STORAGE_KEY)
    }

    /// Value to seed the UI field with at startup.
    pub fn initial_input(&self) -> String {
        self.saved()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string())
    }

    pub fn resolve(&self, ui_value: Option<&str>) -> String {
        let saved = self.saved();
        resolve([ui_value, saved.as_deref(), Some(DEFAULT_API_BASE)])
    }

    /// Stores the normalized value and returns it for writing back into the field.
    pub fn persist(&mut self, value: &str) -> String {
        let normalized = normalize_api_base(value);
        match self.store.set(STORAGE_KEY, &normalized) {
            Ok(()) => info!("api base saved: {}", normalized),
            Err(e) => warn!("could not persist api base: {:#}", e),
        }
        normalized
    }

    #[cfg(test)]
    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_adds_scheme_and_strips_slashes() {
        assert_eq!(normalize_api_base("example.com/"), "https://example.com");
        assert_eq!(normalize_api_base("  http://localhost:8000/// "), "http://localhost:8000");
        assert_eq!(normalize_api_base("HTTP://x.com//"), "HTTP://x.com");
        assert_eq!(normalize_api_base("HttpS://Api.Example.com"), "HttpS://Api.Example.com");
    }

    #[test]
    fn normalize_empty_falls_back_to_default() {
        assert_eq!(normalize_api_base(""), DEFAULT_API_BASE);
        assert_eq!(normalize_api_base("   "), DEFAULT_API_BASE);
        assert_eq!(normalize_api_base("///"), DEFAULT_API_BASE);
    }

    #[test]
    fn normalize_is_idempotent() {
        let inputs = [
            "",
            "/",
            "a /",
            "example.com",
            "example.com/",
            "https://",
            "http:///",
            "HTTP://x.com//",
            " ftp://host/ ",
            "localhost:8000/api/",
            "https://already.ok",
        ];
        for input in inputs {
            let once = normalize_api_base(input);
            assert_eq!(normalize_api_base(&once), once, "input {input:?}");
            assert!(has_scheme(&once), "no scheme for {input:?}: {once}");
            assert!(!once.ends_with('/'), "trailing slash for {input:?}: {once}");
        }
    }

    #[test]
    fn resolve_prefers_ui_then_saved_then_default() {
        assert_eq!(resolve([Some("a"), Some("b"), Some("c")]), "https://a");
        assert_eq!(resolve([Some(""), Some("b"), Some("c")]), "https://b");
        assert_eq!(resolve([None, Some("  "), Some("c")]), "https://c");
        assert_eq!(resolve([None, None, None]), DEFAULT_API_BASE);
    }

    #[test]
    fn endpoint_config_uses_store_when_field_blank() {
        let mut store = MemoryStore::default();
        store.set(STORAGE_KEY, "https://saved.example").unwrap();
        let config = EndpointConfig::new(store);

        assert_eq!(config.resolve(Some("typed.example/")), "https://typed.example");
        assert_eq!(config.resolve(Some("")), "https://saved.example");
        assert_eq!(config.resolve(None), "https://saved.example");
        assert_eq!(config.initial_input(), "https://saved.example");
    }

    #[test]
    fn endpoint_config_without_saved_value_uses_default() {
        let config = EndpointConfig::new(MemoryStore::default());
        assert_eq!(config.resolve(None), DEFAULT_API_BASE);
        assert_eq!(config.initial_input(), DEFAULT_API_BASE);
    }

    #[test]
    fn persist_overwrites_with_normalized_value() {
        let mut config = EndpointConfig::new(MemoryStore::default());
        assert_eq!(config.persist("first.example/"), "https://first.example");
        assert_eq!(config.persist(" http://second.example// "), "http://second.example");
        assert_eq!(
            config.store().get(STORAGE_KEY).as_deref(),
            Some("http://second.example")
        );
    }

    #[test]
    fn file_store_survives_reopen() {
        let path = std::env::temp_dir()
            .join(format!("fixmysheet-settings-{}", std::process::id()))
            .join(SETTINGS_FILE);
        let _ = fs::remove_file(&path);

        let mut config = EndpointConfig::new(FileStore::open(&path));
        config.persist("reopen.example/");

        let reopened = FileStore::open(&path);
        assert_eq!(reopened.get(STORAGE_KEY).as_deref(), Some("https://reopen.example"));
        assert_eq!(reopened.path(), path.as_path());

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn file_store_ignores_corrupt_file() {
        let dir = std::env::temp_dir().join(format!("fixmysheet-corrupt-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(SETTINGS_FILE);
        fs::write(&path, "not json").unwrap();

        let store = FileStore::open(&path);
        assert_eq!(store.get(STORAGE_KEY), None);

        let _ = fs::remove_dir_all(&dir);
    }
}
