mod help;
pub mod status;

use teloxide::utils::command::BotCommands;

use crate::transport::ChatTransport;
use crate::{Data, Error};

#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "snake_case", description = "Available commands:")]
pub enum Command {
    #[command(description = "show the welcome message")]
    Start,
    #[command(description = "show usage")]
    Help,
    #[command(description = "show bot status")]
    Status,
    #[command(description = "check the cookies file")]
    CookieStatus,
}

pub async fn handle(
    transport: &dyn ChatTransport,
    data: &Data,
    chat_id: i64,
    message_id: i32,
    cmd: Command,
) -> Result<(), Error> {
    let reply = match cmd {
        Command::Start | Command::Help => help::welcome(),
        Command::Status => status::status_report(data).await,
        Command::CookieStatus => status::cookie_report(&data.settings).await,
    };
    transport
        .send_text(chat_id, &reply, Some(message_id), &[])
        .await
}
