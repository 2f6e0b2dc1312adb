use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use teloxide::payloads::{
    AnswerCallbackQuerySetters, SendAudioSetters, SendMessageSetters, SendVideoSetters,
};
use teloxide::prelude::*;
use teloxide::types::{InputFile, MessageId, ReplyParameters};

use crate::download::MediaMode;
use crate::utils::keyboard;
use crate::Error;

/// 인라인 버튼 하나 (표시 문구, 콜백 데이터)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InlineChoice {
    pub label: String,
    pub data: String,
}

impl InlineChoice {
    pub fn new(label: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            data: data.into(),
        }
    }
}

/// 채팅 플랫폼 쪽으로 나가는 호출
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn send_text(
        &self,
        chat_id: i64,
        text: &str,
        reply_to: Option<i32>,
        choices: &[InlineChoice],
    ) -> Result<(), Error>;

    async fn send_media(
        &self,
        chat_id: i64,
        mode: MediaMode,
        path: &Path,
        title: &str,
        timeout: Duration,
    ) -> Result<(), Error>;

    async fn edit_text(&self, chat_id: i64, message_id: i32, text: &str) -> Result<(), Error>;

    async fn answer_callback(&self, callback_id: &str, text: Option<&str>) -> Result<(), Error>;
}

#[async_trait]
impl ChatTransport for Bot {
    async fn send_text(
        &self,
        chat_id: i64,
        text: &str,
        reply_to: Option<i32>,
        choices: &[InlineChoice],
    ) -> Result<(), Error> {
        let mut request = self.send_message(ChatId(chat_id), text);
        if let Some(id) = reply_to {
            request = request.reply_parameters(ReplyParameters::new(MessageId(id)));
        }
        if !choices.is_empty() {
            request = request.reply_markup(keyboard::inline_keyboard(choices));
        }
        request.await?;
        Ok(())
    }

    async fn send_media(
        &self,
        chat_id: i64,
        mode: MediaMode,
        path: &Path,
        title: &str,
        timeout: Duration,
    ) -> Result<(), Error> {
        let chat = ChatId(chat_id);
        let file = InputFile::file(path.to_path_buf());
        let upload = async {
            match mode {
                MediaMode::Audio => {
                    self.send_audio(chat, file).title(title).await?;
                }
                MediaMode::Video => {
                    self.send_video(chat, file)
                        .caption(title)
                        .supports_streaming(true)
                        .await?;
                }
            }
            Ok::<(), teloxide::RequestError>(())
        };

        tokio::time::timeout(timeout, upload)
            .await
            .map_err(|_| format!("upload timed out after {}s", timeout.as_secs()))??;
        Ok(())
    }

    async fn edit_text(&self, chat_id: i64, message_id: i32, text: &str) -> Result<(), Error> {
        self.edit_message_text(ChatId(chat_id), MessageId(message_id), text)
            .await?;
        Ok(())
    }

    async fn answer_callback(&self, callback_id: &str, text: Option<&str>) -> Result<(), Error> {
        let mut request = self.answer_callback_query(callback_id);
        if let Some(text) = text {
            request = request.text(text);
        }
        request.await?;
        Ok(())
    }
}
