// Keyshow CLI
// Thin shell around keyshow-core: options loading, logging, demo replay.
// Real deployments embed the engine behind a capture backend and an overlay
// window; this binary only validates options and replays a canned sequence.

use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;

use keyshow_core::{
    CaptureEvent, DisplayManager, KeyEvent, LabelEngine, ModState, Options, StaticFonts,
};

/// On-screen keystroke transcript engine
#[derive(Parser, Debug)]
#[command(name = "keyshow")]
#[command(version)]
#[command(about = "On-screen keystroke transcript engine", long_about = None)]
struct Args {
    /// TOML options file (default: ~/.config/keyshow/options.toml)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Validate the options file and exit
    #[arg(long)]
    check_config: bool,

    /// Replay a canned input sequence and print every label update
    #[arg(long)]
    demo: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(if args.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .init();

    let opts = match &args.config {
        Some(path) => Options::from_file(path)?,
        None => Options::load_default()?,
    };
    log::debug!("options loaded: {opts:?}");

    if args.check_config {
        println!("options OK");
        return Ok(());
    }
    if args.demo {
        return run_demo(opts);
    }

    anyhow::bail!("no capture backend is wired into this binary; run with --demo")
}

fn key(symbol: &str, string: Option<&str>) -> CaptureEvent {
    CaptureEvent::Key(KeyEvent {
        string: string.map(String::from),
        ..KeyEvent::press(Instant::now(), symbol)
    })
}

fn chord(symbol: &str, string: Option<&str>, mods: ModState) -> CaptureEvent {
    CaptureEvent::Key(KeyEvent {
        string: string.map(String::from),
        mods,
        ..KeyEvent::press(Instant::now(), symbol)
    })
}

fn run_demo(opts: Options) -> anyhow::Result<()> {
    let engine = LabelEngine::new(
        opts,
        Box::new(StaticFonts::none()),
        Box::new(|markup, synthetic| match markup {
            Some(m) => println!("label{}: {m}", if synthetic { " (synthetic)" } else { "" }),
            None => println!("capture failed"),
        }),
        Box::new(|state| match state {
            Some(s) => println!(
                "button {}: {}",
                s.button,
                if s.pressed { "pressed" } else { "released" }
            ),
            None => println!("buttons cleared"),
        }),
    );
    let mut manager = DisplayManager::new(engine);
    let sender = manager.start()?;

    let ctrl = ModState { ctrl: true, ..Default::default() };
    let sequence = [
        key("h", Some("h")),
        key("i", Some("i")),
        key("space", Some(" ")),
        key("a", Some("a")),
        key("a", Some("a")),
        key("a", Some("a")),
        key("a", Some("a")),
        key("a", Some("a")),
        key("BackSpace", None),
        chord("s", Some("s"), ctrl),
        key("Left", None),
        key("Return", Some("\r")),
    ];
    for event in sequence {
        sender.send(event)?;
    }

    manager.stop();
    Ok(())
}
