use eyre::Context;
use std::io::IsTerminal;
use std::sync::Arc;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use youtube_live_checker::{ChannelNameCache, Config, EventType, LiveChecker};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let Some(config_path) = args.next() else {
        eyre::bail!("usage: youtube-live-check <config.json> <channel-id>...");
    };
    let channels: Vec<String> = args.collect();
    if channels.is_empty() {
        eyre::bail!("no channel IDs given");
    }

    let config = Config::from_path(&config_path)
        .await
        .context("load configuration")?;
    let names = Arc::new(ChannelNameCache::new());
    let checker = LiveChecker::from_config(&config, Arc::clone(&names));

    for channel in &channels {
        eprintln!("==> {channel}");

        match checker.get_live_status(channel).await {
            Ok(Some(status)) => eprintln!("status   : {status}"),
            Ok(None) => eprintln!("status   : unknown"),
            Err(e) => eprintln!("status   : failed: {e:#}"),
        }
        match checker.is_live(channel).await {
            Ok(live) => eprintln!("is live  : {live}"),
            Err(e) => eprintln!("is live  : failed: {e:#}"),
        }

        for event_type in [EventType::Live, EventType::Upcoming] {
            match checker.get_live_stream_details(channel, event_type).await {
                Some(info) => {
                    let json =
                        serde_json::to_string_pretty(&info).context("serialize broadcast info")?;
                    eprintln!("{event_type:<9}: {json}");
                }
                None => eprintln!("{event_type:<9}: none"),
            }
        }

        match checker.get_channel_name(channel).await {
            Ok(name) => eprintln!("name     : {name}"),
            Err(e) => eprintln!("name     : failed: {e:#}"),
        }
    }

    tracing::debug!(cached_names = names.len().await, "done");
    Ok(())
}
