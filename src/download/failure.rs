//! 다운로드 실패를 사용자에게 보여줄 범주로 나눈다.
//!
//! yt-dlp는 구조화된 오류 코드를 주지 않으므로 메시지 문자열로 판별한다.
//! 매칭 규칙은 전부 이 파일에만 둔다.

use super::engine::FetchError;
use crate::utils::text::truncate_chars;
use crate::Error;

const MESSAGE_LIMIT: usize = 200;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Failure {
    AuthenticationRequired,
    PrivateVideo,
    MembersOnly,
    /// 그 밖의 다운로드 엔진 오류
    Download(String),
    /// 업로드 실패 등 엔진 밖의 오류
    Internal(String),
}

pub fn classify(err: &Error) -> Failure {
    match err.downcast_ref::<FetchError>() {
        Some(fetch) => classify_engine_message(&fetch.to_string()),
        None => Failure::Internal(err.to_string()),
    }
}

pub fn classify_engine_message(message: &str) -> Failure {
    let lower = message.to_lowercase();
    if lower.contains("sign in to confirm") || lower.contains("not a bot") {
        Failure::AuthenticationRequired
    } else if lower.contains("private video") {
        Failure::PrivateVideo
    } else if lower.contains("members-only")
        || lower.contains("members only")
        || lower.contains("join this channel")
    {
        Failure::MembersOnly
    } else {
        Failure::Download(message.to_string())
    }
}

impl Failure {
    pub fn user_message(&self) -> String {
        match self {
            Self::AuthenticationRequired => "⚠️ YouTube requires authentication.\n\n\
                The bot administrator needs to add cookies. Please notify the bot owner."
                .to_string(),
            Self::PrivateVideo => {
                "🔒 This video is private. It can't be downloaded.".to_string()
            }
            Self::MembersOnly => {
                "🔒 This video is for channel members only. It can't be downloaded.".to_string()
            }
            Self::Download(msg) => {
                format!("Download Error: {}", truncate_chars(msg, MESSAGE_LIMIT))
            }
            Self::Internal(msg) => format!("Error: {}", truncate_chars(msg, MESSAGE_LIMIT)),
        }
    }
}
