//! Field declarations of the connection settings page

use rust_i18n::t;
use serde::Serialize;
use strum::{AsRefStr, Display, EnumIter};

use super::config::ConnectConfig;
use super::error::{BindingError, BindingResult};

/// Every editable field, in display order
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Display, AsRefStr, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum FieldId {
    HttpEnable,
    HttpHost,
    HttpPort,
    HttpSecret,
    HttpEnableHeart,
    HttpEnablePost,
    HttpPostUrls,
    WsEnable,
    WsHost,
    WsPort,
    ReverseWsEnable,
    ReverseWsUrls,
}

/// Value type a field accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "lowercase")]
pub enum FieldKind {
    Bool,
    Text,
    Port,
    Urls,
}

impl FieldId {
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldId::HttpEnable
            | FieldId::HttpEnableHeart
            | FieldId::HttpEnablePost
            | FieldId::WsEnable
            | FieldId::ReverseWsEnable => FieldKind::Bool,
            FieldId::HttpHost | FieldId::HttpSecret | FieldId::WsHost => FieldKind::Text,
            FieldId::HttpPort | FieldId::WsPort => FieldKind::Port,
            FieldId::HttpPostUrls | FieldId::ReverseWsUrls => FieldKind::Urls,
        }
    }

    /// URL schemes accepted by a list field, empty for other kinds
    pub fn url_schemes(&self) -> &'static [&'static str] {
        match self {
            FieldId::HttpPostUrls => &["http", "https"],
            FieldId::ReverseWsUrls => &["ws", "wss"],
            _ => &[],
        }
    }

    pub fn title(&self) -> String {
        let key = format!("connect.fields.{}.title", self.as_ref());
        t!(key.as_str()).to_string()
    }

    pub fn content(&self) -> String {
        let key = format!("connect.fields.{}.content", self.as_ref());
        t!(key.as_str()).to_string()
    }

    /// Checks that `url` parses and uses one of the field's schemes
    pub fn validate_url(&self, url: &str) -> BindingResult<()> {
        let schemes = self.url_schemes();
        if schemes.is_empty() {
            return Err(BindingError::NotAUrlList { field: *self });
        }

        let valid = url::Url::parse(url)
            .map(|parsed| schemes.contains(&parsed.scheme()) && parsed.host().is_some())
            .unwrap_or(false);
        if valid {
            Ok(())
        } else {
            Err(BindingError::InvalidUrl {
                url: url.to_string(),
                scheme: schemes.join("/"),
            })
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum FieldValue {
    Bool(bool),
    Text(String),
    Port(u16),
    Urls(Vec<String>),
}

impl FieldValue {
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldValue::Bool(_) => FieldKind::Bool,
            FieldValue::Text(_) => FieldKind::Text,
            FieldValue::Port(_) => FieldKind::Port,
            FieldValue::Urls(_) => FieldKind::Urls,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_port(&self) -> Option<u16> {
        match self {
            FieldValue::Port(p) => Some(*p),
            _ => None,
        }
    }

    pub fn as_urls(&self) -> Option<&[String]> {
        match self {
            FieldValue::Urls(urls) => Some(urls),
            _ => None,
        }
    }
}

/// One rendered field: identity, current value, visibility
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    pub id: FieldId,
    pub value: FieldValue,
    pub visible: bool,
}

impl Field {
    pub fn title(&self) -> String {
        self.id.title()
    }

    pub fn content(&self) -> String {
        self.id.content()
    }
}

/// Flattens a config into field values, in display order
pub fn config_values(config: &ConnectConfig) -> Vec<(FieldId, FieldValue)> {
    vec![
        (FieldId::HttpEnable, FieldValue::Bool(config.http.enable)),
        (FieldId::HttpHost, FieldValue::Text(config.http.host.clone())),
        (FieldId::HttpPort, FieldValue::Port(config.http.port)),
        (FieldId::HttpSecret, FieldValue::Text(config.http.secret.clone())),
        (FieldId::HttpEnableHeart, FieldValue::Bool(config.http.enable_heart)),
        (FieldId::HttpEnablePost, FieldValue::Bool(config.http.enable_post)),
        (FieldId::HttpPostUrls, FieldValue::Urls(config.http.post_urls.clone())),
        (FieldId::WsEnable, FieldValue::Bool(config.ws.enable)),
        (FieldId::WsHost, FieldValue::Text(config.ws.host.clone())),
        (FieldId::WsPort, FieldValue::Port(config.ws.port)),
        (FieldId::ReverseWsEnable, FieldValue::Bool(config.reverse_ws.enable)),
        (FieldId::ReverseWsUrls, FieldValue::Urls(config.reverse_ws.urls.clone())),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_config_values_cover_every_field_in_order() {
        let ids: Vec<FieldId> = config_values(&ConnectConfig::default())
            .into_iter()
            .map(|(id, _)| id)
            .collect();
        assert_eq!(ids, FieldId::iter().collect::<Vec<_>>());
    }

    #[test]
    fn test_value_kinds_match_declarations() {
        for (id, value) in config_values(&ConnectConfig::default()) {
            assert_eq!(id.kind(), value.kind(), "{}", id);
        }
    }

    #[test]
    fn test_validate_url() {
        assert!(FieldId::HttpPostUrls
            .validate_url("http://127.0.0.1:8080/onebot/v11/http")
            .is_ok());
        assert!(FieldId::ReverseWsUrls.validate_url("wss://bot.example.com/ws").is_ok());
        assert!(matches!(
            FieldId::ReverseWsUrls.validate_url("http://127.0.0.1:8080/"),
            Err(BindingError::InvalidUrl { .. })
        ));
        assert!(FieldId::HttpPostUrls.validate_url("not a url").is_err());
        assert!(matches!(
            FieldId::HttpHost.validate_url("http://127.0.0.1/"),
            Err(BindingError::NotAUrlList { .. })
        ));
    }

    #[test]
    fn test_titles_are_translated() {
        assert_eq!(FieldId::ReverseWsEnable.title(), "Enable reverse WebSocket");
        assert_eq!(FieldId::HttpPostUrls.as_ref(), "http_post_urls");
    }
}
