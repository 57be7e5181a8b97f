//! Replay a recorded walk through the guide engine.
//!
//! Feeds every sample of a track file through a guide session, one tick per
//! sample, and prints the clips that would play. Playback is only logged.
//!
//! Usage:
//!   cargo run --bin replay -- --track walk.txt [OPTIONS]
//!
//! Options:
//!   -t, --track <PATH>    Track file, one `latitude,longitude` per line (`-` = no fix)
//!   -c, --config <PATH>   Guide config JSON (default: built-in Akihabara walk)
//!   -r, --radius <M>      Override the trigger radius in meters
//!   --talk-at <N>         Force "talk now" after sample N (1-based)

use std::env;
use std::fs;
use std::process;

use spot_voice::position::parse_track;
use spot_voice::{GuideConfig, GuideSession, LogPlayer, ScriptedSource, TriggerEvent, TriggerKind};

struct Args {
    track: String,
    config: Option<String>,
    radius_m: Option<f64>,
    talk_at: Option<usize>,
}

fn parse_args() -> Args {
    let mut track = None;
    let mut config = None;
    let mut radius_m = None;
    let mut talk_at = None;

    let raw: Vec<String> = env::args().collect();
    let mut i = 1;
    while i < raw.len() {
        match raw[i].as_str() {
            "-t" | "--track" => {
                i += 1;
                track = Some(value_arg(&raw, i, "track").to_string());
            }
            "-c" | "--config" => {
                i += 1;
                config = Some(value_arg(&raw, i, "config").to_string());
            }
            "-r" | "--radius" => {
                i += 1;
                radius_m = Some(parse_arg(&raw, i, "radius"));
            }
            "--talk-at" => {
                i += 1;
                talk_at = Some(parse_arg(&raw, i, "talk-at"));
            }
            "-h" | "--help" => {
                print_usage();
                process::exit(0);
            }
            other => {
                eprintln!("Unknown option: {other}");
                print_usage();
                process::exit(1);
            }
        }
        i += 1;
    }

    let Some(track) = track else {
        eprintln!("Error: --track is required");
        print_usage();
        process::exit(1);
    };

    Args {
        track,
        config,
        radius_m,
        talk_at,
    }
}

fn value_arg<'a>(raw: &'a [String], i: usize, name: &str) -> &'a str {
    raw.get(i).map(String::as_str).unwrap_or_else(|| {
        eprintln!("Error: --{name} requires a value");
        process::exit(1);
    })
}

fn parse_arg<T: std::str::FromStr>(raw: &[String], i: usize, name: &str) -> T {
    value_arg(raw, i, name).parse().unwrap_or_else(|_| {
        eprintln!("Error: invalid value for --{name}");
        process::exit(1);
    })
}

fn print_usage() {
    eprintln!(
        "Usage: replay --track <PATH> [OPTIONS]\n\
         \n\
         Options:\n\
         \x20 -t, --track <PATH>    Track file, one `latitude,longitude` per line (`-` = no fix)\n\
         \x20 -c, --config <PATH>   Guide config JSON (default: built-in Akihabara walk)\n\
         \x20 -r, --radius <M>      Override the trigger radius in meters\n\
         \x20 --talk-at <N>         Force \"talk now\" after sample N (1-based)\n\
         \x20 -h, --help            Show this help"
    );
}

fn print_event(sample: usize, event: &TriggerEvent, session: &GuideSession) {
    let name = session
        .engine()
        .spot_name(event.spot)
        .unwrap_or_else(|| event.spot.to_string());
    let distance = event
        .distance_m
        .map(|d| format!("{d:.0} m"))
        .unwrap_or_else(|| "-".to_string());
    let kind = match event.kind {
        TriggerKind::Arrival => "arrival",
        TriggerKind::Forced => "talk",
        TriggerKind::Fallback => "fallback",
    };
    println!(
        "{sample:>5}  {kind:<8}  {:<40}  {:>9}  {}",
        name,
        distance,
        session.resolver().resolve(event.clip.as_str())
    );
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = parse_args();

    let mut config = match &args.config {
        Some(path) => GuideConfig::load(path).unwrap_or_else(|e| {
            eprintln!("Error: {e}");
            process::exit(1);
        }),
        None => GuideConfig::default(),
    };
    if let Some(radius_m) = args.radius_m {
        config.radius_m = radius_m;
    }

    let text = fs::read_to_string(&args.track).unwrap_or_else(|e| {
        eprintln!("Error: failed to read {}: {e}", args.track);
        process::exit(1);
    });
    let track = parse_track(&text).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        process::exit(1);
    });

    let mut source = ScriptedSource::default();
    for sample in &track {
        source.push(*sample);
    }

    let mut session =
        GuideSession::from_config(&config, Box::new(source), Box::new(LogPlayer::new()))
            .unwrap_or_else(|e| {
                eprintln!("Error: {e}");
                process::exit(1);
            });

    println!("=== spot_voice replay ===");
    println!(
        "Samples: {}, spots: {}, radius: {} m",
        track.len(),
        config.spots.len(),
        config.radius_m
    );
    println!();

    let mut triggers = 0;
    for sample in 1..=track.len() {
        match session.tick().await {
            Ok(Some(event)) => {
                triggers += 1;
                print_event(sample, &event, &session);
            }
            Ok(None) => {}
            Err(e) => eprintln!("{sample:>5}  error: {e}"),
        }

        if args.talk_at == Some(sample) {
            match session.talk_now().await {
                Ok(event) => print_event(sample, &event, &session),
                Err(e) => eprintln!("{sample:>5}  talk now failed: {e}"),
            }
        }
    }

    println!();
    println!(
        "Triggers: {triggers}, final phase: {:?}",
        session.engine().phase()
    );
}
