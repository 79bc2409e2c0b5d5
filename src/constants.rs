// Application identity, used for the config dir, the log file and the User-Agent
pub const APP_NAME: &str = "napcat-desktop";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const SETTINGS_FILE_NAME: &str = "settings.json";
pub const LOG_FILE_NAME: &str = "napcat-desktop.log";

// =================================================
// Remote endpoints
// =================================================
pub const NAPCAT_RELEASE_API: &str =
    "https://api.github.com/repos/NapNeko/NapCatQQ/releases/latest";
pub const NCD_RELEASE_API: &str =
    "https://api.github.com/repos/NapNeko/NapCat-Desktop/releases/latest";
pub const QQ_VERSION_API: &str = "https://nclatest.znin.net/get_qq_ver";

// Installer URL: `{hash}` and `{version}` are substituted by `build_qq_download_url`
pub const QQ_DOWNLOAD_URL_TEMPLATE: &str =
    "https://dldir1.qq.com/qqfile/qq/QQNT/{hash}/QQ{version}_x64.exe";

// JSON keys of the remote payloads
pub const KEY_TAG_NAME: &str = "tag_name";
pub const KEY_BODY: &str = "body";
pub const KEY_VERSION: &str = "version";
pub const KEY_VER_HASH: &str = "verHash";

// =================================================
// Local install layout
// =================================================
pub const NAPCAT_DIR_NAME: &str = "NapCat";
pub const NAPCAT_PACKAGE_FILE: &str = "package.json";
pub const NAPCAT_CONFIG_DIR: &str = "config";
pub const QQ_VERSIONS_DIR: &str = "versions";
pub const QQ_VERSION_CONFIG_FILE: &str = "config.json";
pub const KEY_CUR_VERSION: &str = "curVersion";
pub const DEFAULT_QQ_INSTALL_DIR: &str = r"C:\Program Files\Tencent\QQNT";

// =================================================
// OneBot defaults
// =================================================
pub const DEFAULT_HTTP_PORT: u16 = 3000;
pub const DEFAULT_WS_PORT: u16 = 3001;

// Max notifications kept by the notification center before the oldest are dropped
pub const NOTIFICATION_QUEUE_LIMIT: usize = 64;
