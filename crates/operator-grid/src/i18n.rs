// File: operator-grid/src/i18n.rs
// Purpose: Operator-facing text: translation catalogs and the notice dialog

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Looks up operator-facing text
pub trait Translate: Send + Sync {
    /// Text for `key` with `{name}` placeholders filled from `params`.
    /// Unknown keys come back unchanged.
    fn translate(&self, key: &str, params: &[(&str, String)]) -> String;
}

impl<F> Translate for F
where
    F: Fn(&str, &[(&str, String)]) -> String + Send + Sync,
{
    fn translate(&self, key: &str, params: &[(&str, String)]) -> String {
        self(key, params)
    }
}

/// Modal used to show notices
pub trait Dialog: Send {
    fn open(&mut self, title: &str, content: &str);
    fn close(&mut self);
}

/// Dialog that writes notices to the log
#[derive(Debug, Default)]
pub struct LogDialog {
    open: bool,
}

impl LogDialog {
    pub fn is_open(&self) -> bool {
        self.open
    }
}

impl Dialog for LogDialog {
    fn open(&mut self, title: &str, content: &str) {
        self.open = true;
        tracing::warn!(%title, %content, "operator notice");
    }

    fn close(&mut self) {
        self.open = false;
    }
}

/// JSON translation catalog with dotted-key lookup
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    root: serde_json::Value,
}

impl Catalog {
    pub fn from_json(text: &str) -> Result<Self> {
        let root: serde_json::Value =
            serde_json::from_str(text).context("Failed to parse translation catalog")?;
        if !root.is_object() {
            anyhow::bail!("translation catalog must be a JSON object");
        }
        Ok(Self { root })
    }

    /// Load `{dir}/{language}.json`
    pub fn load(dir: impl AsRef<Path>, language: &str) -> Result<Self> {
        let path = dir.as_ref().join(format!("{}.json", language));
        let text = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read translation catalog: {:?}", path))?;
        Self::from_json(&text).with_context(|| format!("Invalid catalog: {:?}", path))
    }

    /// Raw template for a dotted key
    pub fn lookup(&self, key: &str) -> Option<&str> {
        key.split('.')
            .try_fold(&self.root, |node, part| node.get(part))
            .and_then(|v| v.as_str())
    }
}

impl Translate for Catalog {
    fn translate(&self, key: &str, params: &[(&str, String)]) -> String {
        match self.lookup(key) {
            Some(template) => interpolate(template, params),
            None => {
                tracing::debug!(%key, "missing translation");
                key.to_string()
            }
        }
    }
}

/// Fill `{name}` placeholders; unknown names are left as written
pub fn interpolate(template: &str, params: &[(&str, String)]) -> String {
    static VAR_REGEX: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"\{([a-zA-Z_][a-zA-Z0-9_]*)\}").unwrap());

    VAR_REGEX
        .replace_all(template, |caps: &regex::Captures| {
            let name = &caps[1];
            params
                .iter()
                .find(|(k, _)| *k == name)
                .map(|(_, v)| v.clone())
                .unwrap_or_else(|| format!("{{{}}}", name))
        })
        .to_string()
}
