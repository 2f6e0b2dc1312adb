pub mod deliver;
pub mod engine;
pub mod failure;

use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

pub use deliver::deliver;

/// 텔레그램 캡션 최대 길이
pub const CAPTION_LIMIT: usize = 1024;

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MediaMode {
    Audio,
    Video,
}

impl MediaMode {
    pub fn callback_data(self) -> &'static str {
        match self {
            Self::Audio => "download_mp3",
            Self::Video => "download_mp4",
        }
    }

    pub fn from_callback_data(data: &str) -> Option<Self> {
        match data {
            "download_mp3" => Some(Self::Audio),
            "download_mp4" => Some(Self::Video),
            _ => None,
        }
    }

    /// 제목을 알 수 없을 때 쓰는 캡션
    pub fn fallback_title(self) -> &'static str {
        match self {
            Self::Audio => "Audio",
            Self::Video => "Video",
        }
    }
}

impl std::fmt::Display for MediaMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Audio => write!(f, "오디오"),
            Self::Video => write!(f, "비디오"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct DownloadSettings {
    pub dir: PathBuf,
    pub cookies_file_name: String,
    pub audio_codec: String,
    /// kbps
    pub audio_quality: u32,
    pub video_max_mb: u64,
    pub user_agent: String,
    pub upload_timeout: Duration,
    pub caption_limit: usize,
}

impl Default for DownloadSettings {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("downloads"),
            cookies_file_name: "cookies.txt".to_string(),
            audio_codec: "mp3".to_string(),
            audio_quality: 192,
            video_max_mb: 45,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            upload_timeout: Duration::from_secs(600),
            caption_limit: CAPTION_LIMIT,
        }
    }
}

impl DownloadSettings {
    pub fn cookies_path(&self) -> PathBuf {
        self.dir.join(&self.cookies_file_name)
    }
}

/// 요청 한 건. 결과 파일은 이 작업만 소유하며 끝나면 항상 지운다.
#[derive(Clone, Debug)]
pub struct DownloadJob {
    pub chat_id: i64,
    pub url: String,
    pub mode: MediaMode,
    /// `<chat_id>_<millis>_`, 이 작업이 만드는 모든 파일 이름의 접두사
    pub prefix: String,
    pub output_template: String,
    pub file_path: Option<PathBuf>,
}

impl DownloadJob {
    pub fn new(chat_id: i64, url: &str, mode: MediaMode, dir: &Path) -> Self {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis();
        Self::with_timestamp(chat_id, url, mode, dir, millis)
    }

    pub fn with_timestamp(
        chat_id: i64,
        url: &str,
        mode: MediaMode,
        dir: &Path,
        millis: u128,
    ) -> Self {
        let prefix = format!("{chat_id}_{millis}_");
        let output_template = dir
            .join(format!("{prefix}%(title)s.%(ext)s"))
            .to_string_lossy()
            .into_owned();
        Self {
            chat_id,
            url: url.to_string(),
            mode,
            prefix,
            output_template,
            file_path: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_callback_data_both_ways() {
        for mode in [MediaMode::Audio, MediaMode::Video] {
            assert_eq!(MediaMode::from_callback_data(mode.callback_data()), Some(mode));
        }
        assert_eq!(MediaMode::from_callback_data("download_gif"), None);
    }

    #[test]
    fn test_job_template_is_unique_per_timestamp() {
        let dir = Path::new("downloads");
        let a = DownloadJob::with_timestamp(42, "u", MediaMode::Video, dir, 1000);
        let b = DownloadJob::with_timestamp(42, "u", MediaMode::Video, dir, 1001);
        assert_eq!(a.prefix, "42_1000_");
        assert_eq!(a.output_template, "downloads/42_1000_%(title)s.%(ext)s");
        assert_ne!(a.output_template, b.output_template);
        assert!(a.file_path.is_none());
    }

    #[test]
    fn test_default_settings() {
        let s = DownloadSettings::default();
        assert_eq!(s.cookies_path(), PathBuf::from("downloads/cookies.txt"));
        assert_eq!(s.caption_limit, 1024);
        assert_eq!(s.audio_quality, 192);
    }
}
