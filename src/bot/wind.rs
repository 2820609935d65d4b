use crate::bot::keyboards::{wind_start_keyboard, BUILD_ROSE_BUTTON};
use crate::bot::messages;
use crate::error::{ErrorKind, Result};
use crate::processors::{UploadProcessor, WindRoseReport};
use crate::utils::settings::Settings;
use crate::utils::temp_file::TempDownload;
use secrecy::ExposeSecret;
use std::sync::Arc;
use teloxide::dispatching::UpdateHandler;
use teloxide::net::Download;
use teloxide::prelude::*;
use teloxide::types::{Document, InputFile};
use teloxide::utils::command::BotCommands;
use teloxide::RequestError;
use tokio::io::AsyncWriteExt;
use tracing::{error, info, warn};

#[derive(BotCommands, Clone)]
#[command(rename_rule = "lowercase", description = "Доступные команды:")]
pub enum WindCommand {
    #[command(description = "начать работу с ботом")]
    Start,
    #[command(description = "как подготовить файл")]
    Help,
}

/// Shared, read-only state of the wind-rose bot.
pub struct WindBotContext {
    pub processor: UploadProcessor,
    pub chart_title: String,
}

impl WindBotContext {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            processor: UploadProcessor::from_settings(settings),
            chart_title: settings.chart.title.clone(),
        }
    }
}

pub async fn run(settings: Settings) -> Result<()> {
    let bot = Bot::new(settings.bot_token()?.expose_secret().clone());
    let context = Arc::new(WindBotContext::from_settings(&settings));

    info!("Wind-rose bot started, press Ctrl+C to stop");

    Dispatcher::builder(bot, schema())
        .dependencies(dptree::deps![context])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    info!("Wind-rose bot stopped");
    Ok(())
}

pub fn schema() -> UpdateHandler<RequestError> {
    Update::filter_message()
        .branch(
            dptree::entry()
                .filter_command::<WindCommand>()
                .endpoint(handle_command),
        )
        .branch(dptree::filter(|msg: Message| msg.document().is_some()).endpoint(handle_document))
        .branch(
            dptree::filter(|msg: Message| msg.text() == Some(BUILD_ROSE_BUTTON))
                .endpoint(handle_build_button),
        )
}

async fn handle_command(bot: Bot, msg: Message, cmd: WindCommand) -> ResponseResult<()> {
    let text = match cmd {
        WindCommand::Start => messages::WIND_GREETING,
        WindCommand::Help => messages::WIND_HELP,
    };
    bot.send_message(msg.chat.id, text)
        .reply_markup(wind_start_keyboard())
        .await?;
    Ok(())
}

async fn handle_build_button(bot: Bot, msg: Message) -> ResponseResult<()> {
    bot.send_message(msg.chat.id, messages::SEND_FILE_PROMPT)
        .reply_markup(wind_start_keyboard())
        .await?;
    Ok(())
}

async fn handle_document(
    bot: Bot,
    msg: Message,
    context: Arc<WindBotContext>,
) -> ResponseResult<()> {
    let Some(document) = msg.document() else {
        return Ok(());
    };
    let chat_id = msg.chat.id;
    let file_name = document.file_name.as_deref();

    if let Err(e) = UploadProcessor::check_file_name(file_name) {
        info!(chat_id = chat_id.0, file_name = ?file_name, "rejected upload: {}", e);
        bot.send_message(chat_id, messages::error_reply(&e)).await?;
        return Ok(());
    }

    info!(chat_id = chat_id.0, file_name = ?file_name, "processing upload");
    bot.send_message(chat_id, messages::FILE_RECEIVED).await?;

    let outcome = match build_chart(&bot, document, Arc::clone(&context)).await {
        Ok(report) => send_report(&bot, chat_id, &context, report).await,
        Err(e) => Err(e),
    };

    if let Err(e) = outcome {
        match e.kind() {
            ErrorKind::Unexpected => error!(chat_id = chat_id.0, "Error processing file: {}", e),
            ErrorKind::InputFormat | ErrorKind::EmptyResult => {
                warn!(chat_id = chat_id.0, "unusable upload: {}", e)
            }
        }
        bot.send_message(chat_id, messages::error_reply(&e))
            .reply_markup(wind_start_keyboard())
            .await?;
    }

    Ok(())
}

/// Download the document into a scratch directory and render it.
///
/// The scratch directory is removed when this returns, on success or error.
async fn build_chart(
    bot: &Bot,
    document: &Document,
    context: Arc<WindBotContext>,
) -> Result<WindRoseReport> {
    let download = TempDownload::new(document.file_name.as_deref().unwrap_or_default())?;

    let file = bot.get_file(&document.file.id).await?;
    let mut destination = tokio::fs::File::create(download.path()).await?;
    bot.download_file(&file.path, &mut destination).await?;
    destination.flush().await?;
    drop(destination);

    let path = download.path().to_path_buf();
    let report =
        tokio::task::spawn_blocking(move || context.processor.process_file(&path)).await??;
    Ok(report)
}

async fn send_report(
    bot: &Bot,
    chat_id: ChatId,
    context: &WindBotContext,
    report: WindRoseReport,
) -> Result<()> {
    let caption = messages::chart_caption(&context.chart_title, &report.chart.legend);
    let photo = InputFile::memory(report.chart.bytes).file_name(report.chart.file_name);
    bot.send_photo(chat_id, photo).caption(caption).await?;
    bot.send_message(chat_id, messages::success_reply(&report.summary))
        .reply_markup(wind_start_keyboard())
        .await?;

    info!(
        chat_id = chat_id.0,
        records = report.summary.records,
        "sent wind rose"
    );
    Ok(())
}
