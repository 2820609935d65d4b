use crate::bot::keyboards::{game_menu, state_of_menu};
use crate::bot::messages;
use crate::error::Result;
use crate::game::{GameAction, Menu, Move};
use crate::utils::settings::Settings;
use secrecy::ExposeSecret;
use teloxide::dispatching::UpdateHandler;
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;
use teloxide::RequestError;
use tracing::{debug, info};

#[derive(BotCommands, Clone)]
#[command(rename_rule = "lowercase", description = "Доступные команды:")]
pub enum GameCommand {
    #[command(description = "начать игру")]
    Start,
    #[command(description = "правила игры")]
    Help,
}

pub async fn run(settings: Settings) -> Result<()> {
    let bot = Bot::new(settings.bot_token()?.expose_secret().clone());

    info!("Rock-paper-scissors bot started, press Ctrl+C to stop");

    Dispatcher::builder(bot, schema())
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    info!("Rock-paper-scissors bot stopped");
    Ok(())
}

pub fn schema() -> UpdateHandler<RequestError> {
    dptree::entry()
        .branch(
            Update::filter_message()
                .filter_command::<GameCommand>()
                .endpoint(handle_command),
        )
        .branch(Update::filter_callback_query().endpoint(handle_callback))
}

async fn handle_command(bot: Bot, msg: Message, cmd: GameCommand) -> ResponseResult<()> {
    match cmd {
        GameCommand::Start => {
            let mut request = bot.send_message(msg.chat.id, messages::GAME_GREETING);
            if let Some(markup) = game_menu(Menu::Start) {
                request = request.reply_markup(markup);
            }
            request.await?;
        }
        GameCommand::Help => {
            bot.send_message(msg.chat.id, messages::GAME_RULES).await?;
        }
    }
    Ok(())
}

async fn handle_callback(bot: Bot, query: CallbackQuery) -> ResponseResult<()> {
    bot.answer_callback_query(&query.id).await?;

    let Some(action) = query
        .data
        .as_deref()
        .and_then(GameAction::from_callback_data)
    else {
        debug!(data = ?query.data, "ignoring unknown callback");
        return Ok(());
    };
    let Some(message) = query.message.as_ref() else {
        return Ok(());
    };

    let state = state_of_menu(
        message
            .regular_message()
            .and_then(|message| message.reply_markup()),
    );
    let bot_move = Move::random(&mut rand::rng());
    let reply = state.apply(action, bot_move);
    debug!(?state, ?action, next_state = ?reply.state, "game transition");

    let mut request = bot.edit_message_text(message.chat().id, message.id(), reply.text);
    if let Some(markup) = game_menu(reply.menu) {
        request = request.reply_markup(markup);
    }
    request.await?;
    Ok(())
}
