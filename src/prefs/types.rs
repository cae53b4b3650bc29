//! Recognized locale and currency values.
//!
//! These match the languages and currencies the Oscar backend serves.
//! Anything else is rejected at parse time so an unrecognized cookie or
//! profile field can never leak into held state.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Supported storefront languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Locale {
    #[serde(rename = "en")]
    En,
    #[serde(rename = "ru")]
    Ru,
    #[serde(rename = "zh-hans")]
    ZhHans,
    #[serde(rename = "zh-hant")]
    ZhHant,
}

impl Locale {
    /// All recognized locales.
    pub const ALL: [Locale; 4] = [Locale::En, Locale::Ru, Locale::ZhHans, Locale::ZhHant];

    /// Wire form, as the Oscar API and cookies spell it.
    pub fn as_str(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Ru => "ru",
            Locale::ZhHans => "zh-hans",
            Locale::ZhHant => "zh-hant",
        }
    }

    /// Suffix used in localized Oscar response fields (`title_zh_hans`).
    pub fn field_suffix(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Ru => "ru",
            Locale::ZhHans => "zh_hans",
            Locale::ZhHant => "zh_hant",
        }
    }
}

impl Default for Locale {
    fn default() -> Self {
        Locale::En
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Locale {
    type Err = UnrecognizedValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "en" => Ok(Locale::En),
            "ru" => Ok(Locale::Ru),
            "zh-hans" => Ok(Locale::ZhHans),
            "zh-hant" => Ok(Locale::ZhHant),
            other => Err(UnrecognizedValue(other.to_string())),
        }
    }
}

/// Supported settlement currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    #[serde(rename = "USD")]
    Usd,
    #[serde(rename = "HKD")]
    Hkd,
    #[serde(rename = "TWD")]
    Twd,
    #[serde(rename = "CNY")]
    Cny,
}

impl Currency {
    /// All recognized currencies.
    pub const ALL: [Currency; 4] = [Currency::Usd, Currency::Hkd, Currency::Twd, Currency::Cny];

    /// ISO 4217 code.
    pub fn as_str(self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Hkd => "HKD",
            Currency::Twd => "TWD",
            Currency::Cny => "CNY",
        }
    }

    /// Display symbol for price rendering.
    pub fn symbol(self) -> &'static str {
        match self {
            Currency::Usd => "$",
            Currency::Hkd => "HK$",
            Currency::Twd => "NT$",
            Currency::Cny => "¥",
        }
    }
}

impl Default for Currency {
    fn default() -> Self {
        Currency::Usd
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Currency {
    type Err = UnrecognizedValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "USD" => Ok(Currency::Usd),
            "HKD" => Ok(Currency::Hkd),
            "TWD" => Ok(Currency::Twd),
            "CNY" => Ok(Currency::Cny),
            other => Err(UnrecognizedValue(other.to_string())),
        }
    }
}

/// A string that is not one of the recognized enum values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized preference value: {0:?}")]
pub struct UnrecognizedValue(pub String);
