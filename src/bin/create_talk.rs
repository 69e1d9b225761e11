//! Offline workflow: create a talk from text, poll until it is rendered and
//! download the video. Any failure exits with a non-zero status.

use anyhow::{anyhow, Context};
use avatar_relay::domain::avatar::{AvatarService, AvatarServiceApi};
use avatar_relay::domain::completion::{download_video, TalkPoller};
use avatar_relay::infrastructure::config::Config;
use avatar_relay::infrastructure::logging::init_logging;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "create-talk", about = "Render a talking-avatar video from text")]
struct Args {
    /// Text the avatar should say
    #[arg(default_value = "If you do what you always done, you'll get what you always gotten.")]
    text: String,

    /// Directory for the downloaded video (defaults to TALKS_DIR)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Print the result URL instead of downloading the video
    #[arg(long)]
    no_download: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = Config::from_env().map_err(|e| anyhow!("failed to load configuration: {}", e))?;
    init_logging(&config);

    let avatar_service = AvatarService::from_config(&config)
        .context("cannot create avatar service")?
        .without_webhook();
    let poller = TalkPoller::new(
        avatar_service.talks(),
        config.poll_interval,
        config.poll_timeout,
    );

    let job = avatar_service
        .submit_text(&args.text)
        .await
        .context("failed to create talk")?;
    tracing::info!(talk_id = %job.talk_id, "Talk created");

    let completed = poller
        .wait_for_completion(&job.talk_id)
        .await
        .context("talk did not complete")?;

    if args.no_download {
        println!("{}", completed.result_url);
        return Ok(());
    }

    let output_dir = args.output_dir.unwrap_or_else(|| config.talks_dir.clone());
    let path = download_video(&avatar_service.talks(), &completed.result_url, &output_dir)
        .await
        .context("failed to download video")?;

    println!("{}", path.display());

    Ok(())
}
