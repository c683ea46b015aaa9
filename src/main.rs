//! keywaykit - keyway/notch G-Code generator

use std::path::{Path, PathBuf};
use std::thread;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use keywaykit::cli::{load_config, JobArgs};
use keywaykit::init_logging;
use keywaykit_camtools::KeywayGenerator;
use keywaykit_settings::Config;
use keywaykit_visualizer::{build_frames, build_frames_strict, read_program, Playback, ProgramExporter};
use tracing::info;

#[derive(Parser)]
#[command(name = "keywaykit", version)]
#[command(about = "Multi-pass keyway and notch G-Code generator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a keyway program
    Generate {
        /// Config file (.toml or .json)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Write the program to this file instead of stdout (.nc added when missing)
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[command(flatten)]
        job: JobArgs,
    },
    /// Replay a program file into simulation frames
    Simulate {
        /// Program file
        file: PathBuf,
        /// Print frames as JSON
        #[arg(long)]
        json: bool,
        /// Reject arcs and malformed words instead of skipping them
        #[arg(long)]
        strict: bool,
        /// Step through the frames in real time, printing the readouts
        #[arg(long)]
        play: bool,
        /// Playback speed multiplier (0.1 to 10)
        #[arg(long, value_parser = keywaykit::parse_decimal)]
        speed: Option<f64>,
        /// Config file (.toml or .json)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Show the derived values of a job without generating it
    Summary {
        /// Config file (.toml or .json)
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[command(flatten)]
        job: JobArgs,
    },
    /// Write a config file with the default job
    InitConfig {
        /// Destination (default: the user config directory)
        path: Option<PathBuf>,
        /// Replace an existing file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    init_logging()?;
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            config,
            output,
            job,
        } => generate(config.as_deref(), output, &job)?,
        Commands::Simulate {
            file,
            json,
            strict,
            play,
            speed,
            config,
        } => simulate(&file, json, strict, play, speed, config.as_deref())?,
        Commands::Summary { config, job } => summary(config.as_deref(), &job)?,
        Commands::InitConfig { path, force } => init_config(path, force)?,
    }

    Ok(())
}

fn generate(config_path: Option<&Path>, output: Option<PathBuf>, job: &JobArgs) -> Result<()> {
    let config = load_config(config_path)?;
    let generator = KeywayGenerator::new(job.apply(&config)).context("Invalid job parameters")?;
    let lines = generator.generate_lines();
    info!("Generated {} lines", lines.len());

    match output {
        Some(name) => {
            let exporter = ProgramExporter::new(&config.output.directory);
            let path = exporter.write(&name, &lines)?;
            println!("Wrote {}", path.display());
        }
        None => {
            for line in &lines {
                println!("{}", line);
            }
        }
    }
    Ok(())
}

fn simulate(
    file: &Path,
    json: bool,
    strict: bool,
    play: bool,
    speed: Option<f64>,
    config_path: Option<&Path>,
) -> Result<()> {
    let lines = read_program(file)?;
    let frames = if strict {
        build_frames_strict(&lines).with_context(|| format!("Invalid program {}", file.display()))?
    } else {
        build_frames(&lines)
    };
    info!("{} lines, {} frames", lines.len(), frames.len());

    if play {
        let config = load_config(config_path)?;
        let mut playback =
            Playback::new(frames).with_speed(speed.unwrap_or(config.playback.speed));
        if !playback.play() {
            anyhow::bail!("No motion commands to simulate in {}", file.display());
        }
        if let Some(first) = playback.current_frame() {
            println!("{}  {}", first.position_readout(), first.angle_readout());
        }
        loop {
            thread::sleep(playback.frame_delay());
            match playback.tick() {
                Some(frame) => println!("{}  {}", frame.position_readout(), frame.angle_readout()),
                None => break,
            }
        }
        return Ok(());
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&frames)?);
    } else {
        for (i, frame) in frames.iter().enumerate() {
            println!("{:>5}  {}", i, frame);
        }
    }
    Ok(())
}

fn summary(config_path: Option<&Path>, job: &JobArgs) -> Result<()> {
    let config = load_config(config_path)?;
    let generator = KeywayGenerator::new(job.apply(&config)).context("Invalid job parameters")?;
    println!("{}", generator.summary());
    Ok(())
}

fn init_config(path: Option<PathBuf>, force: bool) -> Result<()> {
    let path = match path {
        Some(path) => path,
        None => Config::default_path()?,
    };
    if path.exists() && !force {
        anyhow::bail!("{} already exists (use --force to replace it)", path.display());
    }

    Config::default()
        .save_to_file(&path)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    println!("Wrote {}", path.display());
    Ok(())
}
