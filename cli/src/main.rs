use std::io;
use std::process::ExitCode;

use clap::Parser;
use clio::{InputPath, OutputPath};
use comfig::{Console, ConsoleIo, ScaleRatio};
use tracing::{error, info, warn, Level};

mod chart;
mod error;
mod session;
mod table;

use session::{SessionOptions, SourceKind};

/// Finds the center of mass of a CSV table of masses or of a color-coded image.
///
/// Anything not given on the command line is asked interactively.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Kind of source file
    #[arg(short, long, value_enum)]
    mode: Option<SourceKind>,

    /// Source file
    #[arg(short, long)]
    input: Option<InputPath>,

    /// Physical scale of one cell, as `numerator:denominator`
    #[arg(short, long)]
    scale: Option<ScaleRatio>,

    /// Where the weight grid of an image is written
    #[arg(long, default_value = "mass_grid.csv")]
    grid_out: OutputPath,

    /// Where the chart is written
    #[arg(long, default_value = "center_of_mass.png")]
    chart: OutputPath,

    /// Skip rendering the chart
    #[arg(long)]
    no_chart: bool,

    /// Exit without waiting for [Enter]
    #[arg(long)]
    no_pause: bool,

    #[arg(long, default_value = "warn")]
    log_level: Level,
}

impl Args {
    fn session_options(&self) -> SessionOptions {
        SessionOptions {
            kind: self.mode,
            input: self.input.as_ref().map(|input| input.path().path().to_path_buf()),
            scale: self.scale,
            grid_out: Some(self.grid_out.path().path().to_path_buf()),
            chart: (!self.no_chart).then(|| self.chart.path().path().to_path_buf()),
        }
    }
}

fn init_logging(level: Level) {
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.log_level);

    let stdin = io::stdin();
    let mut console = ConsoleIo::new(stdin.lock(), io::stdout());

    let code = match session::run(&mut console, &args.session_options()) {
        Ok(report) => {
            info!(shape = ?report.shape, raw = %report.raw, scaled = %report.scaled, "session finished");
            let _ = console.notify("\nDone!");
            ExitCode::SUCCESS
        }
        Err(e) => {
            if e.is_invalid_source() {
                warn!("{e}");
            } else {
                error!("{e}");
            }
            let _ = console.notify(&format!("\n{}", e.user_message()));
            ExitCode::FAILURE
        }
    };

    if !args.no_pause {
        let _ = console.ask("Press [Enter] to exit...");
    }
    code
}
