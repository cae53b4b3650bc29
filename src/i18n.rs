//! Message catalog lookup and interpolation.
//!
//! Translations are nested JSON documents keyed by locale. Lookup takes
//! dotted paths (`"nav.home"`), falls back to English when the requested
//! locale has no entry, and returns the key itself when English has none
//! either. `{name}` placeholders are substituted from a parameter map;
//! unknown placeholders are left verbatim.

use std::collections::HashMap;

use serde_json::Value;

use crate::prefs::Locale;

/// A loaded set of translation documents.
#[derive(Debug, Default)]
pub struct Messages {
    catalogs: HashMap<Locale, Value>,
}

impl Messages {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the catalog for one locale.
    pub fn with_catalog(mut self, locale: Locale, catalog: Value) -> Self {
        self.catalogs.insert(locale, catalog);
        self
    }

    /// Translate `key` for `locale`, interpolating `params`.
    pub fn translate(
        &self,
        locale: Locale,
        key: &str,
        params: Option<&HashMap<String, String>>,
    ) -> String {
        let template = self
            .lookup(locale, key)
            .or_else(|| self.lookup(Locale::En, key));

        match template {
            Some(template) => interpolate(template, params),
            None => key.to_string(),
        }
    }

    fn lookup(&self, locale: Locale, key: &str) -> Option<&str> {
        let mut node = self.catalogs.get(&locale)?;
        for part in key.split('.') {
            node = node.get(part)?;
        }
        node.as_str()
    }
}

/// Substitute `{name}` placeholders; unknown names stay as-is.
pub fn interpolate(template: &str, params: Option<&HashMap<String, String>>) -> String {
    let Some(params) = params else {
        return template.to_string();
    };

    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) if after[..close].chars().all(|c| c.is_alphanumeric() || c == '_') => {
                let name = &after[..close];
                match params.get(name) {
                    Some(value) => out.push_str(value),
                    None => {
                        out.push('{');
                        out.push_str(name);
                        out.push('}');
                    }
                }
                rest = &after[close + 1..];
            }
            _ => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn messages() -> Messages {
        Messages::new()
            .with_catalog(
                Locale::En,
                json!({
                    "nav": { "home": "Home" },
                    "catalog": { "count": "{total} products" },
                    "common": { "loading": "Loading…" }
                }),
            )
            .with_catalog(
                Locale::Ru,
                json!({
                    "nav": { "home": "Главная" }
                }),
            )
    }

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn nested_lookup() {
        let m = messages();
        assert_eq!(m.translate(Locale::Ru, "nav.home", None), "Главная");
    }

    #[test]
    fn falls_back_to_english() {
        let m = messages();
        assert_eq!(m.translate(Locale::Ru, "common.loading", None), "Loading…");
    }

    #[test]
    fn missing_key_returns_key() {
        let m = messages();
        assert_eq!(m.translate(Locale::En, "nav.missing", None), "nav.missing");
    }

    #[test]
    fn interpolates_params() {
        let m = messages();
        let p = params(&[("total", "42")]);
        assert_eq!(
            m.translate(Locale::En, "catalog.count", Some(&p)),
            "42 products"
        );
    }

    #[test]
    fn unknown_placeholder_left_verbatim() {
        let p = params(&[("a", "1")]);
        assert_eq!(interpolate("{a} and {b}", Some(&p)), "1 and {b}");
    }

    #[test]
    fn literal_brace_without_close_survives() {
        assert_eq!(interpolate("a { b", Some(&params(&[]))), "a { b");
    }
}
