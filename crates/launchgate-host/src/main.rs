//! Launchgate headless host.
//!
//! Runs the launch decision against a scripted content surface and manages
//! the persisted launch values.

use std::{
    io::Write,
    path::{Path, PathBuf},
    process::ExitCode,
    time::Duration,
};

use clap::{Parser, Subcommand};
use launchgate_app::{Runtime, Shell};
use launchgate_core::{GateConfig, ValueStore};
use launchgate_host::{HostError, RedbStorage, ScriptedDriver, SurfaceScript, parse_navigation};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "launchgate-host", about = "Headless host for the launch decision gate")]
struct Args {
    /// Path to the launch database.
    #[arg(long, default_value = "launchgate.redb")]
    db: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run one launch against a scripted surface.
    Run {
        /// Minimum time the loading overlay stays up.
        #[arg(long, default_value_t = 2200)]
        min_display_ms: u64,

        /// Loading overlay fade-out duration.
        #[arg(long, default_value_t = 350)]
        fade_ms: u64,

        /// When the surface becomes ready. Never, if omitted.
        #[arg(long, value_name = "MS")]
        ready_at: Option<u64>,

        /// Surface navigation, repeatable.
        #[arg(long = "navigate", value_name = "MS=URL")]
        navigations: Vec<String>,

        /// When the screen is torn down and the host exits.
        #[arg(long, default_value_t = 4000)]
        run_for_ms: u64,
    },

    /// Print the persisted launch values.
    Show,

    /// Replace the reference point.
    SetReference {
        /// New reference point URL.
        url: String,
    },

    /// Clear every persisted launch value.
    Reset,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = Args::parse();
    match execute(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "launchgate-host failed");
            ExitCode::FAILURE
        },
    }
}

async fn execute(args: Args) -> Result<(), HostError> {
    match args.command {
        Command::Run { min_display_ms, fade_ms, ready_at, navigations, run_for_ms } => {
            let mut script = SurfaceScript::new();
            if let Some(ready_at) = ready_at {
                script = script.ready_at(Duration::from_millis(ready_at));
            }
            for entry in &navigations {
                let (at, point) = parse_navigation(entry)?;
                script = script.navigate_at(at, point);
            }

            let config = GateConfig {
                min_display: Duration::from_millis(min_display_ms),
                fade: Duration::from_millis(fade_ms),
            };
            run_launch(&args.db, config, script, Duration::from_millis(run_for_ms)).await
        },
        Command::Show => show(&args.db),
        Command::SetReference { url } => {
            let mut store = ValueStore::open(RedbStorage::open(&args.db)?)?;
            let mut out = std::io::stdout().lock();
            if store.set_reference_point(&url)? {
                writeln!(out, "reference point: {}", store.reference_point())?;
            } else {
                writeln!(out, "ignored unparseable reference point {url:?}")?;
            }
            Ok(())
        },
        Command::Reset => {
            let mut store = ValueStore::open(RedbStorage::open(&args.db)?)?;
            store.reset_all()?;
            writeln!(std::io::stdout().lock(), "launch values cleared")?;
            Ok(())
        },
    }
}

async fn run_launch(
    db: &Path,
    config: GateConfig,
    script: SurfaceScript,
    run_for: Duration,
) -> Result<(), HostError> {
    let shell = Shell::open(RedbStorage::open(db)?, config)?;
    let start = shell.store().starting_point()?;
    tracing::info!(
        reference = shell.store().reference_point().as_str(),
        start = start.as_str(),
        "starting launch"
    );

    let driver = ScriptedDriver::new(script, run_for);
    let mut runtime = Runtime::new(driver, shell);
    runtime.run().await?;

    let state = runtime.shell().gate().state();
    let mut out = std::io::stdout().lock();
    writeln!(out, "mode: {:?}", state.mode)?;
    writeln!(out, "loading visible: {}", state.loading_visible)?;
    writeln!(out, "rotation rule applied: {}", state.rotation_rule_applied)?;
    writeln!(out, "allowed orientations: {:?}", runtime.driver().allowed_orientations())?;
    Ok(())
}

fn show(db: &Path) -> Result<(), HostError> {
    let store = ValueStore::open(RedbStorage::open(db)?)?;
    let mut out = std::io::stdout().lock();

    writeln!(out, "reference point: {}", store.reference_point())?;
    match store.resume_point()? {
        Some(point) => writeln!(out, "resume point: {point}")?,
        None => writeln!(out, "resume point: none")?,
    }
    let marks = store.load_marks()?.map_or(0, |marks| marks.len());
    writeln!(out, "marks: {marks}")?;
    Ok(())
}
