pub mod callback;
pub mod message;

use std::sync::Arc;

use teloxide::dispatching::UpdateHandler;
use teloxide::prelude::*;

use crate::commands::{self, Command};
use crate::{Data, Error};

pub fn schema() -> UpdateHandler<Error> {
    let command_branch = teloxide::filter_command::<Command, _>().endpoint(on_command);

    let message_branch = Update::filter_message()
        .branch(command_branch)
        .branch(dptree::endpoint(on_message));

    dptree::entry()
        .branch(message_branch)
        .branch(Update::filter_callback_query().endpoint(on_callback))
}

async fn on_command(bot: Bot, msg: Message, cmd: Command, data: Arc<Data>) -> Result<(), Error> {
    commands::handle(&bot, &data, msg.chat.id.0, msg.id.0, cmd).await
}

async fn on_message(bot: Bot, msg: Message, data: Arc<Data>) -> Result<(), Error> {
    // 사진, 스티커 등은 무시
    let Some(text) = msg.text() else {
        return Ok(());
    };
    message::handle(&bot, &data, msg.chat.id.0, msg.id.0, text).await
}

async fn on_callback(bot: Bot, q: CallbackQuery, data: Arc<Data>) -> Result<(), Error> {
    let chat_id = q
        .message
        .as_ref()
        .map(|m| m.chat().id)
        .unwrap_or_else(|| ChatId::from(q.from.id));

    let selection = callback::Selection {
        callback_id: q.id.clone(),
        chat_id: chat_id.0,
        message_id: q.message.as_ref().map(|m| m.id().0),
        data: q.data.clone(),
    };
    callback::handle(&bot, &data, selection).await
}
