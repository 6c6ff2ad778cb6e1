use std::path::PathBuf;
use std::thread;
use std::time::Instant;

use anyhow::{Result, bail};
use clap::Parser;
use tracing::{debug, info, warn};

use linedist::config::Config;
use linedist::logging::init_tracing;
use linedist::ops::video_funcs::format_time;
use linedist::playback::{PlaybackFrame, PlaybackSampler, SimulatedPlayer, Viewport};
use linedist::store::Library;
use linedist::types::session::{VIEWER_FALLBACK_DURATION, ViewerSession};

/// Plays a line distribution back without video and reports who sang what.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Distribution id to open
    distribution: String,

    /// Config file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Playback speed multiplier
    #[arg(long, default_value_t = 1.0)]
    rate: f64,

    /// Advance a virtual clock instead of waiting in real time
    #[arg(long)]
    fast: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    check_rate(args.rate)?;
    let config = Config::load_from(args.config.as_deref())?;
    init_tracing(&config.logging.level);

    let library = Library::from_config(&config.storage);
    let viewer = ViewerSession::open(&library, &args.distribution);
    if !viewer.is_loaded() {
        warn!(id = %args.distribution, "nothing to play");
        return Ok(());
    }

    let timeline = viewer.timeline();
    info!(
        group = %timeline.group_name,
        title = %timeline.song_title,
        video = %timeline.video_id,
        duration = %format_time(viewer.duration()),
        "playing"
    );

    let interval = config.playback.poll_interval();
    let mut sampler = PlaybackSampler::new(interval, VIEWER_FALLBACK_DURATION);
    let mut viewport = Viewport::default();

    let mut clock = Instant::now();
    let mut player = SimulatedPlayer::new(viewer.duration(), clock);
    player.playback_state.playback_rate = args.rate;
    player.play(clock);

    let mut singing: Option<String> = None;
    while player.playback_state.is_playing {
        if args.fast {
            clock += interval;
        } else {
            thread::sleep(interval);
            clock = Instant::now();
        }
        player.update(clock);

        let Some(frame) = sampler.poll(timeline, &player, clock) else {
            continue;
        };
        if viewport.follow(frame.time) {
            debug!(start = viewport.start(), end = viewport.end(), "viewport moved");
        }
        if frame.active_performer != singing {
            singing = frame.active_performer.clone();
            let name = singing
                .as_deref()
                .and_then(|id| timeline.performer(id))
                .map_or("-", |p| p.name.as_str());
            info!(at = %format_time(frame.time), performer = name, "now singing");
        }
    }

    let end = player.playback_state.playhead;
    let frame = sampler.refresh(timeline, end, false, clock);
    print_report(&viewer, frame);
    Ok(())
}

fn check_rate(rate: f64) -> Result<()> {
    if rate.is_nan() || rate <= 0.0 {
        bail!("--rate must be positive, got {rate}");
    }
    Ok(())
}

fn print_report(viewer: &ViewerSession, frame: &PlaybackFrame) {
    let timeline = viewer.timeline();
    println!("{} - {}", timeline.group_name, timeline.song_title);
    println!("{:<16} {:>8} {:>8} {:>7}", "performer", "total", "sung", "share");
    for stat in &frame.stats {
        let name = timeline
            .performer(&stat.performer_id)
            .map_or(stat.performer_id.as_str(), |p| p.name.as_str());
        println!(
            "{:<16} {:>8} {:>8} {:>6.1}%",
            name,
            format_time(stat.total_time),
            format_time(stat.elapsed),
            stat.percentage
        );
    }
    println!(
        "covered {} of {} ({:.1}%)",
        format_time(frame.summary.total_assigned),
        format_time(frame.summary.duration),
        frame.summary.percentage
    );
}
