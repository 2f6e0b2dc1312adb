#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use yt_fetch_bot::download::engine::{EngineOptions, FetchError, FetchedMedia, MediaEngine};
use yt_fetch_bot::download::{DownloadSettings, MediaMode};
use yt_fetch_bot::pending::PendingStore;
use yt_fetch_bot::transport::{ChatTransport, InlineChoice};
use yt_fetch_bot::{Data, Error};

#[derive(Clone, Debug, PartialEq)]
pub enum Sent {
    Text {
        chat_id: i64,
        text: String,
        reply_to: Option<i32>,
        choices: Vec<InlineChoice>,
    },
    Media {
        chat_id: i64,
        mode: MediaMode,
        path: PathBuf,
        title: String,
        /// 업로드 시점에 파일이 있었는지
        existed: bool,
    },
    Edit {
        chat_id: i64,
        message_id: i32,
        text: String,
    },
    Answer {
        callback_id: String,
        text: Option<String>,
    },
}

#[derive(Default)]
pub struct RecordingTransport {
    pub sent: Mutex<Vec<Sent>>,
    pub fail_uploads: bool,
    /// 이 문구를 보내면 실패한다
    pub fail_text: Option<&'static str>,
}

impl RecordingTransport {
    pub fn failing_uploads() -> Self {
        Self {
            fail_uploads: true,
            ..Self::default()
        }
    }

    pub fn failing_text(text: &'static str) -> Self {
        Self {
            fail_text: Some(text),
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    pub fn texts(&self) -> Vec<String> {
        self.sent()
            .into_iter()
            .filter_map(|s| match s {
                Sent::Text { text, .. } => Some(text),
                _ => None,
            })
            .collect()
    }

    pub fn media(&self) -> Vec<Sent> {
        self.sent()
            .into_iter()
            .filter(|s| matches!(s, Sent::Media { .. }))
            .collect()
    }
}

#[async_trait]
impl ChatTransport for RecordingTransport {
    async fn send_text(
        &self,
        chat_id: i64,
        text: &str,
        reply_to: Option<i32>,
        choices: &[InlineChoice],
    ) -> Result<(), Error> {
        self.sent.lock().unwrap().push(Sent::Text {
            chat_id,
            text: text.to_string(),
            reply_to,
            choices: choices.to_vec(),
        });
        if self.fail_text == Some(text) {
            return Err("Bad Gateway".into());
        }
        Ok(())
    }

    async fn send_media(
        &self,
        chat_id: i64,
        mode: MediaMode,
        path: &Path,
        title: &str,
        _timeout: Duration,
    ) -> Result<(), Error> {
        self.sent.lock().unwrap().push(Sent::Media {
            chat_id,
            mode,
            path: path.to_path_buf(),
            title: title.to_string(),
            existed: path.is_file(),
        });
        if self.fail_uploads {
            return Err("Request Entity Too Large".into());
        }
        Ok(())
    }

    async fn edit_text(&self, chat_id: i64, message_id: i32, text: &str) -> Result<(), Error> {
        self.sent.lock().unwrap().push(Sent::Edit {
            chat_id,
            message_id,
            text: text.to_string(),
        });
        Ok(())
    }

    async fn answer_callback(&self, callback_id: &str, text: Option<&str>) -> Result<(), Error> {
        self.sent.lock().unwrap().push(Sent::Answer {
            callback_id: callback_id.to_string(),
            text: text.map(str::to_string),
        });
        Ok(())
    }
}

/// 엔진이 흉내낼 결과
#[derive(Clone, Debug)]
pub enum Script {
    /// 제목으로 파일을 만든다. 오디오는 후처리처럼 .mp3로 쓰고 원래 확장자를 보고한다.
    Write { title: String, size: usize },
    /// .part 파일을 남기고 실패
    Fail(String),
}

pub struct ScriptedEngine {
    pub script: Script,
    pub calls: Mutex<Vec<(EngineOptions, String)>>,
}

impl ScriptedEngine {
    pub fn new(script: Script) -> Arc<Self> {
        Arc::new(Self {
            script,
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> Vec<(EngineOptions, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl MediaEngine for ScriptedEngine {
    async fn fetch(&self, options: &EngineOptions, url: &str) -> Result<FetchedMedia, FetchError> {
        self.calls
            .lock()
            .unwrap()
            .push((options.clone(), url.to_string()));

        match &self.script {
            Script::Write { title, size } => {
                let is_audio = options.extract_audio.is_some();
                let reported_ext = if is_audio { "webm" } else { "mp4" };
                let reported = options
                    .output_template
                    .replace("%(title)s", title)
                    .replace("%(ext)s", reported_ext);
                let written = if is_audio {
                    PathBuf::from(&reported).with_extension("mp3")
                } else {
                    PathBuf::from(&reported)
                };
                std::fs::write(&written, vec![0u8; *size]).map_err(FetchError::Spawn)?;
                Ok(FetchedMedia {
                    title: Some(title.clone()),
                    ext: Some(reported_ext.to_string()),
                    path: PathBuf::from(reported),
                })
            }
            Script::Fail(message) => {
                let partial = options
                    .output_template
                    .replace("%(title)s", "partial")
                    .replace("%(ext)s", "mp4.part");
                std::fs::write(&partial, b"half").map_err(FetchError::Spawn)?;
                Err(FetchError::Engine(message.clone()))
            }
        }
    }
}

pub fn data_with(dir: &Path, engine: Arc<ScriptedEngine>) -> Data {
    Data {
        pending: PendingStore::new(),
        settings: DownloadSettings {
            dir: dir.to_path_buf(),
            ..DownloadSettings::default()
        },
        engine,
    }
}

/// 쿠키 파일을 제외한 디렉터리 내용
pub fn leftover_files(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .filter(|n| n != "cookies.txt")
        .collect();
    names.sort();
    names
}
