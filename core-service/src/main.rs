//! PhishGuard - command line front end
//!
//! Loads config and the model once (fatal on failure), then checks each URL
//! given on the command line.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use phishguard_core::api::commands::{self, CheckResponse, EngineStatus};
use phishguard_core::constants::{APP_NAME, APP_VERSION};
use phishguard_core::logic::config::DetectorConfig;
use phishguard_core::logic::model::FixedClassifier;
use phishguard_core::Detector;

#[derive(Parser, Debug)]
#[command(name = "phishguard", version, about = "Phishing URL detector", long_about = None)]
struct Args {
    /// One or more URLs to check
    #[arg(required_unless_present = "status")]
    urls: Vec<String>,

    /// Config file (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// ONNX model, overrides the config file
    #[arg(short, long)]
    model: Option<String>,

    /// Print one JSON object per URL
    #[arg(short, long)]
    json: bool,

    /// Skip the model and treat every raw verdict as legitimate (rules only)
    #[arg(long)]
    assume_legitimate: bool,

    /// Print the loaded model, feature layout and rule set sizes
    #[arg(long)]
    status: bool,
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    log::info!("Starting {} v{}", APP_NAME, APP_VERSION);

    let detector = match build_detector(&args) {
        Ok(detector) => detector,
        Err(e) => {
            log::error!("Startup failed: {:#}", e);
            return ExitCode::from(2);
        }
    };

    if args.status {
        print_status(&commands::get_engine_status(&detector), args.json);
    }

    let mut failed = false;
    for url in &args.urls {
        match commands::check_url(&detector, url) {
            Ok(response) => print_response(&response, args.json),
            Err(message) => {
                failed = true;
                if args.json {
                    println!("{}", serde_json::json!({ "url": url, "error": message }));
                } else {
                    println!("{}\n  error: {}", url, message);
                }
            }
        }
    }

    if failed {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    }
}

fn build_detector(args: &Args) -> anyhow::Result<Detector> {
    let mut config = DetectorConfig::load(args.config.as_deref()).context("loading configuration")?;
    if let Some(model) = &args.model {
        config.model.path = model.clone();
    }

    if args.assume_legitimate {
        log::warn!("Model disabled, raw verdicts are always legitimate");
        return Ok(Detector::with_classifier(&config, Box::new(FixedClassifier::legitimate())));
    }

    Detector::from_config(&config).with_context(|| format!("loading model {}", config.model.path))
}

fn print_response(response: &CheckResponse, json: bool) {
    if json {
        match serde_json::to_string(response) {
            Ok(line) => println!("{}", line),
            Err(e) => log::error!("Failed to serialize response: {}", e),
        }
        return;
    }

    let marker = if response.is_phishing { "PHISHING" } else { "OK" };
    println!("{}\n  [{}] {}", response.url, marker, response.message);
    if let Some(reason) = &response.reason {
        println!("  reason: {} (model said {})", reason, response.raw_verdict);
    }
    println!("  features:");
    for (name, value) in response.features.named_values() {
        println!("    {:<16} {}", name, value);
    }
}

fn print_status(status: &EngineStatus, json: bool) {
    if json {
        match serde_json::to_string(status) {
            Ok(line) => println!("{}", line),
            Err(e) => log::error!("Failed to serialize status: {}", e),
        }
        return;
    }

    println!("{} v{}", APP_NAME, status.version);
    println!(
        "  classifier: {} ({})",
        status.classifier.kind, status.classifier.name
    );
    if let Some(model) = &status.model {
        println!(
            "  model: {} version {} sha256 {}",
            model.model_path,
            model.model_version.as_deref().unwrap_or("unknown"),
            model.sha256
        );
        println!(
            "  model layout: {} features, hash {:08x}, threshold {}, loaded {}",
            model.features,
            model.layout_hash,
            model.threshold,
            model.loaded_at.to_rfc3339()
        );
    }
    println!(
        "  feature layout: v{} hash {:08x} [{}]",
        status.layout.version,
        status.layout.hash,
        status.layout.feature_names.join(", ")
    );
    println!(
        "  rules: {} known domains, {} suspicious patterns, similarity > {}",
        status.known_domains, status.suspicious_patterns, status.similarity_threshold
    );
}
