use std::path::Path;
use std::{fs, process};

use anyhow::{Context, Result, bail};
use tracing_appender::non_blocking::WorkerGuard;

use ascii_dialog::{
    backdrop::paint_backdrop,
    config::DialogConfig,
    logging,
    player::{RecordingHost, TerminalHost, record::DEFAULT_IDLE_TICKS},
    script::{DialogScript, LoadedScript},
    session::{Outcome, Session},
};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

const PLAY_USAGE: &str = "ascii-dialog play <script.json>";
const RECORD_USAGE: &str = "ascii-dialog record <script.json> <output.json>";

fn run() -> Result<()> {
    let mut args = std::env::args().skip(1);

    match args.next().as_deref() {
        Some("play") => {
            let path = args.next().context(PLAY_USAGE)?;
            play(&path)
        }
        Some("record") => {
            let script_path = args.next().context(RECORD_USAGE)?;
            let output_path = args.next().context(RECORD_USAGE)?;
            record(&script_path, &output_path)
        }
        _ => bail!(
            "ASCII Dialog — typewriter dialog boxes for the terminal\n\nUsage:\n  {PLAY_USAGE}\n  {RECORD_USAGE}"
        ),
    }
}

fn init_logging() -> Result<WorkerGuard> {
    logging::init(&DialogConfig::config_dir().join("ascii-dialog.log"))
}

fn prepare(path: &str, config: &DialogConfig) -> Result<(LoadedScript, Session)> {
    let loaded = DialogScript::load(Path::new(path))?;
    let contract = loaded.script.contract();
    if contract.width < 4 || contract.height < 3 {
        bail!(
            "{path}: a {}x{} screen cannot hold a dialog box",
            contract.width,
            contract.height
        );
    }

    let backdrop = paint_backdrop(loaded.backdrop().as_ref(), contract);
    let mut session = Session::begin(loaded.script.text_blocks(), backdrop, config);
    if let Some(portrait) = loaded.portrait() {
        session = session.with_portrait(portrait);
    }
    Ok((loaded, session))
}

fn play(path: &str) -> Result<()> {
    let _guard = init_logging()?;
    let config = DialogConfig::load();
    let (loaded, mut session) = prepare(path, &config)?;

    let mut host = TerminalHost::new(loaded.script.contract(), config.key_bindings.clone());
    host.enter()?;
    let outcome = session.run(&mut host);
    host.leave();

    match outcome {
        Outcome::Completed => println!("Dialog completed"),
        Outcome::Cancelled => println!("Dialog cancelled"),
    }
    Ok(())
}

fn record(script_path: &str, output_path: &str) -> Result<()> {
    let _guard = init_logging()?;
    let config = DialogConfig::load();
    let (loaded, mut session) = prepare(script_path, &config)?;

    let mut host = RecordingHost::auto_advance(loaded.script.contract(), DEFAULT_IDLE_TICKS)
        .with_screen(session.backdrop().clone());
    let outcome = session.run(&mut host);
    let presentation = host.into_presentation();

    let output_json = serde_json::to_string_pretty(&presentation)?;
    fs::write(output_path, &output_json)
        .with_context(|| format!("Failed to write {output_path}"))?;

    eprintln!(
        "Recorded {} frames from {} -> {} ({outcome:?})",
        presentation.frames.len(),
        script_path,
        output_path,
    );

    Ok(())
}
