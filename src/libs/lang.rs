use locale_config::Locale;
use serde_json::Value;
use std::collections::HashMap;

/// Retrieves the system's locale and standardizes it.
///
/// Chinese locales map to the script-based codes used by the translation
/// catalogs; English regions collapse to `en`. Anything else is returned as
/// reported by the system and falls back to English at lookup time.
pub fn get_system_locale() -> String {
    let locale = Locale::current().to_string();
    normalize_locale(&locale)
}

fn normalize_locale(locale: &str) -> String {
    match locale {
        "zh-CN" | "zh-SG" | "zh" => "zh-Hans".to_string(),
        "zh-TW" | "zh-HK" | "zh-MO" => "zh-Hant".to_string(),
        "en-US" | "en-GB" | "en-CA" | "en-AU" | "en-NZ" | "en" => "en".to_string(),
        _ => locale.to_string(),
    }
}

/// Loads the languages shipped with the application, code -> display name
pub fn get_available_lang() -> Result<HashMap<String, String>, String> {
    let languages = include_str!("../../i18n/available_language.json");
    let json: Value = serde_json::from_str(languages).map_err(|e| e.to_string())?;
    serde_json::from_value(json["languages"].clone()).map_err(|e| e.to_string())
}

/// Picks the catalog to activate for `requested`, falling back to English
pub fn resolve_language(requested: &str) -> String {
    match get_available_lang() {
        Ok(languages) if languages.contains_key(requested) => requested.to_string(),
        Ok(_) => "en".to_string(),
        Err(e) => {
            log::warn!("Failed to load available languages: {}", e);
            "en".to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_locale() {
        assert_eq!(normalize_locale("zh-CN"), "zh-Hans");
        assert_eq!(normalize_locale("en-GB"), "en");
        assert_eq!(normalize_locale("fr-FR"), "fr-FR");
    }

    #[test]
    fn test_resolve_language() {
        assert_eq!(resolve_language("zh-Hans"), "zh-Hans");
        assert_eq!(resolve_language("fr-FR"), "en");
    }
}
