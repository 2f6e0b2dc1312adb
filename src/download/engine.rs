use std::path::PathBuf;

use async_trait::async_trait;
use serde::Deserialize;
use tokio::process::Command;

use super::{DownloadJob, DownloadSettings, MediaMode};

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// yt-dlp가 보고한 다운로드 실패
    #[error("{0}")]
    Engine(String),
    #[error("could not run yt-dlp: {0}")]
    Spawn(#[source] std::io::Error),
    #[error("unreadable yt-dlp output: {0}")]
    Metadata(#[from] serde_json::Error),
    #[error("downloaded file is missing or empty: {}", .0.display())]
    MissingOutput(PathBuf),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AudioExtract {
    pub codec: String,
    /// kbps
    pub quality: u32,
}

/// 다운로드 엔진에 넘기는 설정
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineOptions {
    pub output_template: String,
    pub format: String,
    pub quiet: bool,
    pub no_warnings: bool,
    pub user_agent: Option<String>,
    pub cookie_file: Option<PathBuf>,
    pub extract_audio: Option<AudioExtract>,
    pub check_certificates: bool,
    pub geo_bypass: bool,
}

impl EngineOptions {
    pub fn for_job(
        job: &DownloadJob,
        settings: &DownloadSettings,
        cookie_file: Option<PathBuf>,
    ) -> Self {
        let (format, extract_audio) = match job.mode {
            MediaMode::Audio => (
                "bestaudio/best".to_string(),
                Some(AudioExtract {
                    codec: settings.audio_codec.clone(),
                    quality: settings.audio_quality,
                }),
            ),
            // 봇 API 업로드 한도(50MB) 아래로
            MediaMode::Video => (
                format!("best[ext=mp4][filesize<{}M]", settings.video_max_mb),
                None,
            ),
        };

        Self {
            output_template: job.output_template.clone(),
            format,
            quiet: true,
            no_warnings: true,
            user_agent: Some(settings.user_agent.clone()),
            cookie_file,
            extract_audio,
            check_certificates: true,
            geo_bypass: false,
        }
    }

    pub fn to_args(&self) -> Vec<String> {
        let mut args = vec![
            "-o".to_string(),
            self.output_template.clone(),
            "-f".to_string(),
            self.format.clone(),
            "--no-playlist".to_string(),
            "--no-progress".to_string(),
            "--dump-json".to_string(),
            "--no-simulate".to_string(),
        ];
        if self.quiet {
            args.push("--quiet".to_string());
        }
        if self.no_warnings {
            args.push("--no-warnings".to_string());
        }
        if let Some(ua) = &self.user_agent {
            args.push("--user-agent".to_string());
            args.push(ua.clone());
        }
        if let Some(cookies) = &self.cookie_file {
            args.push("--cookies".to_string());
            args.push(cookies.to_string_lossy().into_owned());
        }
        if let Some(audio) = &self.extract_audio {
            args.extend([
                "-x".to_string(),
                "--audio-format".to_string(),
                audio.codec.clone(),
                "--audio-quality".to_string(),
                format!("{}K", audio.quality),
            ]);
        }
        if !self.check_certificates {
            args.push("--no-check-certificates".to_string());
        }
        if self.geo_bypass {
            args.push("--geo-bypass".to_string());
        }
        args
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchedMedia {
    pub title: Option<String>,
    pub ext: Option<String>,
    /// 후처리 전 파일 경로
    pub path: PathBuf,
}

#[async_trait]
pub trait MediaEngine: Send + Sync {
    async fn fetch(&self, options: &EngineOptions, url: &str) -> Result<FetchedMedia, FetchError>;
}

pub struct YtDlp {
    bin: String,
}

impl YtDlp {
    pub fn new(bin: impl Into<String>) -> Self {
        Self { bin: bin.into() }
    }
}

#[async_trait]
impl MediaEngine for YtDlp {
    async fn fetch(&self, options: &EngineOptions, url: &str) -> Result<FetchedMedia, FetchError> {
        let output = Command::new(&self.bin)
            .args(options.to_args())
            .arg("--")
            .arg(url)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(FetchError::Spawn)?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(FetchError::Engine(error_message(&stderr, output.status)));
        }

        parse_output(&output.stdout)
    }
}

#[derive(Deserialize)]
struct YtDlpOutput {
    title: Option<String>,
    ext: Option<String>,
    #[serde(rename = "_filename")]
    internal_filename: Option<String>,
    filename: Option<String>,
    requested_downloads: Option<Vec<RequestedDownload>>,
}

#[derive(Deserialize)]
struct RequestedDownload {
    filepath: Option<String>,
}

/// `--dump-json` 출력에서 마지막 JSON 줄을 읽는다.
pub fn parse_output(stdout: &[u8]) -> Result<FetchedMedia, FetchError> {
    let text = String::from_utf8_lossy(stdout);
    let line = text
        .lines()
        .rev()
        .find(|l| !l.trim().is_empty())
        .ok_or_else(|| FetchError::Engine("yt-dlp returned no metadata".to_string()))?;

    let info: YtDlpOutput = serde_json::from_str(line)?;

    let path = info
        .requested_downloads
        .and_then(|d| d.into_iter().find_map(|r| r.filepath))
        .or(info.internal_filename)
        .or(info.filename)
        .ok_or_else(|| FetchError::Engine("yt-dlp did not report a filename".to_string()))?;

    Ok(FetchedMedia {
        title: info.title,
        ext: info.ext,
        path: PathBuf::from(path),
    })
}

fn error_message(stderr: &str, status: std::process::ExitStatus) -> String {
    let errors: Vec<&str> = stderr
        .lines()
        .map(str::trim)
        .filter(|l| l.starts_with("ERROR:"))
        .collect();
    if !errors.is_empty() {
        return errors.join("\n");
    }
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        format!("yt-dlp exited with {status}")
    } else {
        trimmed.to_string()
    }
}
