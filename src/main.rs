use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use moto_hud::hazard::{classify, wind_chill};
use moto_hud::telemetry::{load_track, BaselinePolicy, Estimator};
use moto_hud::web::{self, Config};

#[derive(Parser)]
#[command(name = "moto-hud")]
#[command(about = "Speed, heading and road hazard telemetry for a motorcycle HUD")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HUD API server
    Serve {
        /// YAML config file; built-in defaults when omitted
        #[arg(long)]
        config: Option<String>,
    },
    /// Classify road conditions for the given weather
    Classify {
        /// Air temperature (°C)
        #[arg(long, allow_hyphen_values = true)]
        temperature: f64,
        /// Precipitation (mm)
        #[arg(long, default_value_t = 0.0)]
        precipitation: f64,
        /// Wind speed (km/h)
        #[arg(long, default_value_t = 0.0)]
        wind: f64,
    },
    /// Run a recorded track through the speed/heading estimator
    Replay {
        track: PathBuf,
        #[arg(long, value_enum, default_value_t = PolicyArg::Always)]
        baseline_policy: PolicyArg,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum PolicyArg {
    Always,
    ValidFix,
}

impl From<PolicyArg> for BaselinePolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Always => BaselinePolicy::Always,
            PolicyArg::ValidFix => BaselinePolicy::ValidFix,
        }
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { config } => serve(config.as_deref()),
        Commands::Classify {
            temperature,
            precipitation,
            wind,
        } => classify_weather(temperature, precipitation, wind),
        Commands::Replay {
            track,
            baseline_policy,
        } => replay(&track, baseline_policy.into()),
    }
}

fn serve(path: Option<&str>) -> ExitCode {
    let config = match path {
        Some(path) => match Config::from_file(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error reading config: {}", e);
                return ExitCode::FAILURE;
            }
        },
        None => Config::default(),
    };

    let settings = match config.hud_settings() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Invalid config: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Failed to start runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(web::run_server(config, settings)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Server error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn classify_weather(temperature: f64, precipitation: f64, wind: f64) -> ExitCode {
    let condition = classify(temperature, precipitation, wind);
    println!("Road:       {} ({})", condition.label, condition.tone);
    println!("            {}", condition.detail);
    println!("Wind chill: {:.1}°C", wind_chill(temperature, wind));
    ExitCode::SUCCESS
}

fn replay(path: &Path, policy: BaselinePolicy) -> ExitCode {
    let samples = match load_track(path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error loading track: {}", e);
            return ExitCode::FAILURE;
        }
    };

    println!("Replaying {} samples", samples.len());
    let mut estimator = Estimator::new(policy);
    for (i, sample) in samples.into_iter().enumerate() {
        let timestamp = sample.timestamp_ms;
        let velocity = estimator.push(sample);
        println!(
            "  {}: {} ms  {:>6.1} km/h  {}",
            i + 1,
            timestamp,
            velocity.speed_kmh,
            velocity.heading_label
        );
    }
    ExitCode::SUCCESS
}
