use std::io::IsTerminal as _;
use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use escapade::{AssignmentPolicy, RenderConfig};

/// Render an escape-time fractal across a group of workers and time the row assignment policy.
#[derive(Parser, Debug)]
#[command(name = "escapade", version)]
struct Cli {
    /// JSON config file; explicit flags override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Image width in pixels.
    #[arg(long)]
    width: Option<u32>,

    /// Image height in pixels.
    #[arg(long)]
    height: Option<u32>,

    /// Iteration cap for the escape test.
    #[arg(long)]
    max_iterations: Option<u32>,

    /// Number of timed trials.
    #[arg(long)]
    trials: Option<u32>,

    /// Row assignment policy.
    #[arg(long, value_enum)]
    policy: Option<AssignmentPolicy>,

    /// Output graymap (PGM) path.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Number of workers, at most 1024 (defaults to available parallelism).
    #[arg(long)]
    workers: Option<usize>,

    /// Also write an 8-bit grayscale PNG preview.
    #[arg(long)]
    png: Option<PathBuf>,

    /// Write a JSON run summary.
    #[arg(long)]
    report: Option<PathBuf>,

    /// Print the SHA-256 digest of the consolidated grid.
    #[arg(long)]
    digest: bool,

    /// Enable debug logging.
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn resolve_config(&self) -> anyhow::Result<RenderConfig> {
        let mut cfg = match &self.config {
            Some(path) => RenderConfig::from_json_file(path)
                .with_context(|| format!("load config '{}'", path.display()))?,
            None => RenderConfig::default(),
        };
        if let Some(v) = self.width {
            cfg.width = v;
        }
        if let Some(v) = self.height {
            cfg.height = v;
        }
        if let Some(v) = self.max_iterations {
            cfg.max_iterations = v;
        }
        if let Some(v) = self.trials {
            cfg.trials = v;
        }
        if let Some(v) = self.policy {
            cfg.policy = v;
        }
        if let Some(v) = &self.out {
            cfg.out = v.clone();
        }
        cfg.validate()?;
        Ok(cfg)
    }

    fn resolve_workers(&self) -> usize {
        self.workers.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        })
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    if let Err(err) = try_main(cli) {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr)
        .init();
}

fn try_main(cli: Cli) -> anyhow::Result<()> {
    let cfg = cli.resolve_config()?;
    let workers = cli.resolve_workers();

    let report = escapade::render_local(&cfg, workers)?;

    println!(
        "The average execution time of {} trials is: {:.6} ms",
        u64::from(cfg.trials) * workers as u64,
        report.global_avg_ms()
    );

    report
        .write_pgm()
        .with_context(|| format!("write pgm '{}'", cfg.out.display()))?;
    eprintln!("wrote {}", cfg.out.display());

    if let Some(png) = &cli.png {
        report
            .write_png(png)
            .with_context(|| format!("write png '{}'", png.display()))?;
        eprintln!("wrote {}", png.display());
    }

    if cli.digest {
        println!("sha256: {}", report.digest());
    }

    if let Some(path) = &cli.report {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create report dir '{}'", parent.display()))?;
        }
        let f = std::fs::File::create(path)
            .with_context(|| format!("create report '{}'", path.display()))?;
        serde_json::to_writer_pretty(f, &report.summary())
            .with_context(|| format!("write report '{}'", path.display()))?;
        eprintln!("wrote {}", path.display());
    }

    Ok(())
}
