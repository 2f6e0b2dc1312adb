use std::path::PathBuf;
use std::time::Duration;

use crate::download::DownloadSettings;
use crate::sweeper::Sweeper;

const DEFAULT_DOWNLOAD_DIR: &str = "downloads";
const DEFAULT_COOKIES_FILE_NAME: &str = "cookies.txt";
const DEFAULT_RETENTION_HOURS: u64 = 24;
const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 3600;
const DEFAULT_SWEEP_RETRY_SECS: u64 = 600;
const DEFAULT_YTDLP_BIN: &str = "yt-dlp";
const DEFAULT_VIDEO_MAX_MB: u64 = 45;
const DEFAULT_UPLOAD_TIMEOUT_SECS: u64 = 600;

#[derive(Clone, Debug)]
pub struct Config {
    pub bot_token: String,
    pub download_dir: PathBuf,
    pub cookies_file_name: String,
    pub retention_hours: u64,
    pub sweep_interval_secs: u64,
    pub sweep_retry_secs: u64,
    pub ytdlp_bin: String,
    pub video_max_mb: u64,
    pub upload_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// `from_env`과 동일한 규칙으로 임의의 조회 함수에서 설정을 읽는다.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let number = |key: &str, default: u64| -> u64 {
            lookup(key)
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(default)
        };

        Self {
            bot_token: lookup("BOT_TOKEN")
                .filter(|v| !v.trim().is_empty())
                .expect("BOT_TOKEN 환경변수가 필요합니다"),
            download_dir: lookup("DOWNLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DOWNLOAD_DIR)),
            cookies_file_name: lookup("COOKIES_FILE_NAME")
                .unwrap_or_else(|| DEFAULT_COOKIES_FILE_NAME.to_string()),
            retention_hours: number("RETENTION_HOURS", DEFAULT_RETENTION_HOURS),
            sweep_interval_secs: number("SWEEP_INTERVAL_SECS", DEFAULT_SWEEP_INTERVAL_SECS),
            sweep_retry_secs: number("SWEEP_RETRY_SECS", DEFAULT_SWEEP_RETRY_SECS),
            ytdlp_bin: lookup("YTDLP_BIN").unwrap_or_else(|| DEFAULT_YTDLP_BIN.to_string()),
            video_max_mb: number("VIDEO_MAX_MB", DEFAULT_VIDEO_MAX_MB),
            upload_timeout_secs: number("UPLOAD_TIMEOUT_SECS", DEFAULT_UPLOAD_TIMEOUT_SECS),
        }
    }

    pub fn cookies_path(&self) -> PathBuf {
        self.download_dir.join(&self.cookies_file_name)
    }

    pub fn upload_timeout(&self) -> Duration {
        Duration::from_secs(self.upload_timeout_secs)
    }

    pub fn download_settings(&self) -> DownloadSettings {
        DownloadSettings {
            dir: self.download_dir.clone(),
            cookies_file_name: self.cookies_file_name.clone(),
            video_max_mb: self.video_max_mb,
            upload_timeout: self.upload_timeout(),
            ..DownloadSettings::default()
        }
    }

    pub fn sweeper(&self) -> Sweeper {
        Sweeper {
            dir: self.download_dir.clone(),
            reserved: self.cookies_file_name.clone(),
            retention: Duration::from_secs(self.retention_hours.saturating_mul(3600)),
            interval: Duration::from_secs(self.sweep_interval_secs),
            retry_interval: Duration::from_secs(self.sweep_retry_secs),
        }
    }
}
