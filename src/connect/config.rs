//! OneBot 11 connection config, as stored in `onebot11_<uin>.json`

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_HTTP_PORT, DEFAULT_WS_PORT};

/// HTTP API server and event post-back
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HttpConfig {
    pub enable: bool,
    pub host: String,
    pub port: u16,
    pub secret: String,
    pub enable_heart: bool,
    pub enable_post: bool,
    pub post_urls: Vec<String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            enable: false,
            host: String::new(),
            port: DEFAULT_HTTP_PORT,
            secret: String::new(),
            enable_heart: false,
            enable_post: false,
            post_urls: Vec::new(),
        }
    }
}

/// Forward WebSocket server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WsConfig {
    pub enable: bool,
    pub host: String,
    pub port: u16,
}

impl Default for WsConfig {
    fn default() -> Self {
        Self {
            enable: false,
            host: String::new(),
            port: DEFAULT_WS_PORT,
        }
    }
}

/// Reverse WebSocket clients; `enable` is only meaningful with URLs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReverseWsConfig {
    pub enable: bool,
    pub urls: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConnectConfig {
    pub http: HttpConfig,
    pub ws: WsConfig,
    pub reverse_ws: ReverseWsConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names() {
        let config: ConnectConfig = serde_json::from_str(
            r#"{
                "http": {"enable": true, "port": 5700, "enablePost": true, "postUrls": ["http://127.0.0.1:8080/"]},
                "reverseWs": {"enable": true, "urls": ["ws://127.0.0.1:8081/"]}
            }"#,
        )
        .unwrap();
        assert!(config.http.enable_post);
        assert_eq!(config.http.port, 5700);
        assert_eq!(config.http.post_urls.len(), 1);
        assert_eq!(config.ws, WsConfig::default());
        assert_eq!(config.reverse_ws.urls, vec!["ws://127.0.0.1:8081/"]);

        let value = serde_json::to_value(&config).unwrap();
        assert!(value.get("reverseWs").is_some());
        assert!(value["http"].get("enableHeart").is_some());
    }
}
