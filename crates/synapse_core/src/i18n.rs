//! Translation lookup
//!
//! User-facing strings are opaque lookups keyed by dotted paths such as
//! `neuralAnimation.phases.phaseAnnouncement`. Catalogs ship embedded as TOML
//! tables; French is the primary locale and the fallback for missing keys.

use crate::error::{Result, SynapseError};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

const FR_CATALOG: &str = include_str!("../locales/fr.toml");
const EN_CATALOG: &str = include_str!("../locales/en.toml");

/// Supported locales
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Fr,
    En,
}

impl Locale {
    pub fn code(self) -> &'static str {
        match self {
            Locale::Fr => "fr",
            Locale::En => "en",
        }
    }
}

impl FromStr for Locale {
    type Err = SynapseError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "fr" | "fr-fr" => Ok(Locale::Fr),
            "en" | "en-us" | "en-gb" => Ok(Locale::En),
            other => Err(SynapseError::Locale(format!("unsupported locale '{}'", other))),
        }
    }
}

/// Translation lookup used by every user-facing string
pub trait Translator: Send + Sync {
    /// Translate `key`, substituting `{name}` placeholders from `params`
    fn t(&self, key: &str, params: &[(&str, &str)]) -> String;

    /// Active locale
    fn locale(&self) -> Locale;
}

/// Flattened message catalog for one locale, with French fallback
#[derive(Clone, Debug)]
pub struct Catalog {
    locale: Locale,
    messages: FxHashMap<String, String>,
    fallback: FxHashMap<String, String>,
}

impl Catalog {
    /// Load the embedded catalog for a locale
    pub fn load(locale: Locale) -> Result<Self> {
        let fallback = parse_catalog(FR_CATALOG)?;
        let messages = match locale {
            Locale::Fr => fallback.clone(),
            Locale::En => parse_catalog(EN_CATALOG)?,
        };
        Ok(Self {
            locale,
            messages,
            fallback,
        })
    }

    /// Build a catalog from TOML source, without fallback
    pub fn from_toml(locale: Locale, source: &str) -> Result<Self> {
        Ok(Self {
            locale,
            messages: parse_catalog(source)?,
            fallback: FxHashMap::default(),
        })
    }

    pub fn contains(&self, key: &str) -> bool {
        self.messages.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl Translator for Catalog {
    fn t(&self, key: &str, params: &[(&str, &str)]) -> String {
        let template = self
            .messages
            .get(key)
            .or_else(|| self.fallback.get(key))
            .map(String::as_str)
            .unwrap_or(key);
        interpolate(template, params)
    }

    fn locale(&self) -> Locale {
        self.locale
    }
}

fn parse_catalog(source: &str) -> Result<FxHashMap<String, String>> {
    let table: toml::Table =
        toml::from_str(source).map_err(|e| SynapseError::Locale(e.to_string()))?;
    let mut out = FxHashMap::default();
    flatten("", &table, &mut out);
    Ok(out)
}

fn flatten(prefix: &str, table: &toml::Table, out: &mut FxHashMap<String, String>) {
    for (key, value) in table {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };
        match value {
            toml::Value::Table(inner) => flatten(&path, inner, out),
            toml::Value::String(s) => {
                out.insert(path, s.clone());
            }
            other => {
                out.insert(path, other.to_string());
            }
        }
    }
}

fn interpolate(template: &str, params: &[(&str, &str)]) -> String {
    let mut result = template.to_string();
    for (name, value) in params {
        result = result.replace(&format!("{{{}}}", name), value);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_french_is_default() {
        let catalog = Catalog::load(Locale::default()).unwrap();
        assert_eq!(catalog.t("neuralAnimation.controls.play", &[]), "Lecture");
    }

    #[test]
    fn test_english_lookup_with_params() {
        let catalog = Catalog::load(Locale::En).unwrap();
        let text = catalog.t(
            "neuralAnimation.phases.phaseAnnouncement",
            &[("number", "2"), ("total", "5"), ("name", "Organization")],
        );
        assert_eq!(text, "Phase 2 of 5: Organization");
    }

    #[test]
    fn test_missing_key_falls_back() {
        let catalog = Catalog::from_toml(Locale::En, "[a]\nb = \"c\"").unwrap();
        assert_eq!(catalog.t("a.b", &[]), "c");
        assert_eq!(catalog.t("x.y", &[]), "x.y");
    }

    #[test]
    fn test_locales_share_keys() {
        let fr = Catalog::load(Locale::Fr).unwrap();
        let en = Catalog::load(Locale::En).unwrap();
        assert_eq!(fr.len(), en.len());
        for key in fr.messages.keys() {
            assert!(en.contains(key), "missing english key {key}");
        }
    }

    #[test]
    fn test_parse_locale() {
        assert_eq!("EN".parse::<Locale>().unwrap(), Locale::En);
        assert!("de".parse::<Locale>().is_err());
    }

    #[test]
    fn test_invalid_catalog() {
        assert!(matches!(
            Catalog::from_toml(Locale::Fr, "not = = toml"),
            Err(SynapseError::Locale(_))
        ));
    }
}
