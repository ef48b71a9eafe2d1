use std::future::Future;
use teloxide::prelude::*;
use teloxide::types::InputFile;
use url::Url;
use crate::bot::commands::Sender;
use crate::error::{HandlerError, HandlerResult};
use crate::services::media::{MediaPipeline, Mp3Audio, RequestId};
use crate::utils::feedback::{CommandFeedback, ProgressTracker};
use crate::utils::logging::{
    log_command_error, log_command_start, log_command_success, log_validation_error,
};
use crate::utils::validation::validate_media_url;

pub const URL_PROMPT: &str = "Please send a link: /download_mp3 <url>";

/// Downloads the linked audio, converts it to MP3 and sends it back.
///
/// Pipeline failures are shown in the progress message and then returned to
/// the dispatcher.
pub async fn handle_download_mp3(
    bot: Bot,
    msg: Message,
    args: String,
    pipeline: &MediaPipeline,
) -> HandlerResult {
    let sender = Sender::from_message(&msg);
    let chat_id = msg.chat.id.0;
    log_command_start("/download_mp3", &sender.display_name, sender.id, chat_id, Some(&args));

    let feedback = CommandFeedback::new(bot.clone(), msg.chat.id);

    if args.trim().is_empty() {
        feedback.info(URL_PROMPT).await?;
        return Ok(());
    }

    let url = match validate_media_url(&args) {
        Ok(url) => url,
        Err(e) => {
            log_validation_error("/download_mp3", "url", &args, &e.to_string(), chat_id);
            feedback
                .validation_error(&e.to_string(), "Send a full http or https link, e.g. /download_mp3 https://example.com/track")
                .await?;
            return Ok(());
        }
    };

    let request_id = RequestId::new();
    let mut progress = ProgressTracker::new(feedback, 3);
    progress.start("Downloading audio...").await?;

    let audio = match run_pipeline(pipeline, request_id, &url, &mut progress).await {
        Ok(audio) => audio,
        Err(e) => {
            log_command_error(
                "/download_mp3",
                &sender.display_name,
                sender.id,
                chat_id,
                &format!("[{request_id}] {e}"),
            );
            let notice = progress.error("Could not convert this link to MP3");
            return Err(report_failure(notice, request_id, e).await);
        }
    };

    let size = audio.bytes.len();
    bot.send_audio(msg.chat.id, InputFile::memory(audio.bytes).file_name(audio.file_name))
        .await?;
    progress.complete("Here is your MP3").await?;

    log_command_success(
        "/download_mp3",
        &sender.display_name,
        sender.id,
        chat_id,
        Some(&format!("[{request_id}] sent {size} bytes")),
    );
    Ok(())
}

async fn run_pipeline(
    pipeline: &MediaPipeline,
    request_id: RequestId,
    url: &Url,
    progress: &mut ProgressTracker,
) -> Result<Mp3Audio, HandlerError> {
    let mut job = pipeline.start(request_id)?;
    job.download(url).await?;
    progress.next_step("Converting to MP3...").await?;
    job.transcode().await?;
    progress.next_step("Sending audio...").await?;
    Ok(job.read().await?)
}

/// Awaits the chat notice for a failed run and returns the pipeline error,
/// whatever happened to the notice.
async fn report_failure<F>(notice: F, request_id: RequestId, error: HandlerError) -> HandlerError
where
    F: Future<Output = ResponseResult<()>>,
{
    if let Err(edit_err) = notice.await {
        tracing::warn!("[{request_id}] failed to report pipeline error: {edit_err}");
    }
    error
}
