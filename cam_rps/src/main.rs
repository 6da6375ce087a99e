//! cam_rps — interactive entry point.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use log::{error, info};

use cam_rps::app::{run, SourceKind};
use cam_rps::config::AppConfig;

#[derive(Parser, Debug)]
#[command(name = "cam_rps", about = "Rock, Paper, Scissors against the computer, played with hand signs")]
struct Cli {
    /// JSON config file (every section optional)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Where hand landmarks come from
    #[arg(long, value_enum, default_value_t = SourceKind::Sim)]
    source: SourceKind,

    /// Seed the computer's throws for a reproducible game
    #[arg(long)]
    seed: Option<u64>,

    /// Flip detector frames horizontally
    #[arg(long)]
    mirror: bool,

    /// Window width in pixels
    #[arg(long)]
    width: Option<usize>,

    /// Window height in pixels
    #[arg(long)]
    height: Option<usize>,

    /// Detector command and its arguments, e.g. `-- python3 hand_detect.py`
    #[arg(last = true)]
    detector_cmd: Vec<String>,
}

impl Cli {
    fn into_config(self) -> anyhow::Result<(AppConfig, SourceKind, Option<u64>)> {
        let mut cfg = match &self.config {
            Some(path) => AppConfig::load(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => AppConfig::default(),
        };
        if let Some(w) = self.width  { cfg.window.width  = w; }
        if let Some(h) = self.height { cfg.window.height = h; }
        if self.mirror { cfg.detector.mirror = true; }
        if !self.detector_cmd.is_empty() { cfg.detector.command = self.detector_cmd; }
        Ok((cfg, self.source, self.seed))
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!();
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║            Rock, Paper, Scissors — show your hand            ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();

    let cli = Cli::parse();
    let (cfg, source, seed) = match cli.into_config() {
        Ok(parts) => parts,
        Err(e) => {
            error!("{:#}", e);
            std::process::exit(1);
        }
    };

    info!("window {}x{}, countdown {}s", cfg.window.width, cfg.window.height, cfg.game.countdown_secs);

    if let Err(e) = run(cfg, source, seed) {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_is_well_formed() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn flags_override_defaults() {
        let cli = Cli::parse_from([
            "cam_rps", "--source", "detector", "--seed", "42", "--mirror",
            "--width", "640", "--", "python3", "hand_detect.py",
        ]);
        let (cfg, source, seed) = cli.into_config().unwrap();
        assert_eq!(source, SourceKind::Detector);
        assert_eq!(seed, Some(42));
        assert!(cfg.detector.mirror);
        assert_eq!(cfg.window.width, 640);
        assert_eq!(cfg.window.height, 720);
        assert_eq!(cfg.detector.command, vec!["python3", "hand_detect.py"]);
    }

    #[test]
    fn defaults_to_simulation() {
        let (cfg, source, seed) = Cli::parse_from(["cam_rps"]).into_config().unwrap();
        assert_eq!(source, SourceKind::Sim);
        assert_eq!(seed, None);
        assert_eq!(cfg, AppConfig::default());
    }
}
