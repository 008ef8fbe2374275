//! Leafscan CLI
//!
//! Entry point for the leaf disease analysis pipeline: classify a single
//! image from the command line, serve the HTTP prediction API, or list the
//! disease catalog.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;

use leafscan::catalog::{display_name, CLASS_NAMES};
use leafscan::classify::PlaceholderScorer;
use leafscan::pipeline::{Pipeline, PredictOptions, PredictionResult};
use leafscan::server::{self, ServerConfig};
use leafscan::severity::recommended_actions;
use leafscan::utils::logging::{init_logging, LogConfig};

/// Leafscan plant disease classification and severity analysis
#[derive(Parser, Debug)]
#[command(name = "leafscan")]
#[command(version)]
#[command(about = "Plant leaf disease classification with severity analysis", long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, default_value = "false")]
    verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Analyze a single leaf image and print the verdict
    Predict {
        /// Path to the image to analyze
        image: PathBuf,

        /// Write the diseased-area overlay to this path (PNG)
        #[arg(long)]
        overlay: Option<PathBuf>,

        /// Print the raw JSON verdict instead of the report
        #[arg(long, default_value = "false")]
        json: bool,

        /// Seed for the placeholder scoring model
        #[arg(long, default_value = "42")]
        seed: u64,
    },

    /// Run the HTTP prediction API
    Serve {
        /// Host to bind to
        #[arg(long, default_value = "0.0.0.0")]
        host: String,

        /// Port to listen on
        #[arg(short, long, default_value = "10000", env = "PORT")]
        port: u16,

        /// Directory for staging uploaded images
        #[arg(long, default_value = "uploads")]
        upload_dir: PathBuf,

        /// Restrict CORS to this origin (any origin when omitted)
        #[arg(long)]
        cors_origin: Option<String>,

        /// Seed for the placeholder scoring model
        #[arg(long, default_value = "42")]
        seed: u64,
    },

    /// List the disease catalog
    Classes,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_config = if cli.verbose {
        LogConfig::verbose()
    } else {
        LogConfig::default()
    };
    init_logging(&log_config).map_err(anyhow::Error::msg)?;

    match cli.command {
        Commands::Predict {
            image,
            overlay,
            json,
            seed,
        } => {
            let pipeline = Pipeline::new(Arc::new(PlaceholderScorer::new(seed)))?;
            let options = PredictOptions {
                overlay_path: overlay,
            };
            let result = pipeline.predict_path(&image, &options)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print_report(&result);
            }
        }

        Commands::Serve {
            host,
            port,
            upload_dir,
            cors_origin,
            seed,
        } => {
            let pipeline = Pipeline::new(Arc::new(PlaceholderScorer::new(seed)))?;
            let config = ServerConfig {
                host,
                port,
                upload_dir,
                cors_origin,
                ..ServerConfig::default()
            };
            server::serve(config, pipeline).await?;
        }

        Commands::Classes => {
            for (idx, name) in CLASS_NAMES.iter().enumerate() {
                println!("{:>3}  {}", idx, display_name(name));
            }
        }
    }

    Ok(())
}

fn print_report(result: &PredictionResult) {
    let rule = "=".repeat(50);
    let thin = "-".repeat(50);

    println!("\n{}", rule);
    println!("{}", "PLANT DISEASE ANALYSIS REPORT".bold());
    println!("{}", rule);
    println!("Predicted Disease: {}", result.disease.cyan());
    println!("Confidence: {:.2}%", result.confidence);
    println!("{}", thin);

    let severity = &result.severity;
    if severity.severity_score == 0 {
        println!("Plant Status: {}", "HEALTHY".green().bold());
    } else {
        println!(
            "Disease Severity: {}/5 - {}",
            severity.severity_score.to_string().yellow().bold(),
            severity.stage
        );
        println!("Description: {}", severity.description);
        println!(
            "Estimated Affected Area: {}%",
            severity.affected_area_percent
        );
        println!("{}", thin);
    }

    println!("{}", "RECOMMENDED ACTIONS:".bold());
    for (i, action) in recommended_actions(severity.severity_score)
        .iter()
        .enumerate()
    {
        println!("{}. {}", i + 1, action);
    }
    println!("{}", rule);

    println!("\nTop {} disease predictions:", result.top_predictions.len());
    for (i, top) in result.top_predictions.iter().enumerate() {
        println!("{}. {} - {:.2}%", i + 1, top.disease, top.confidence);
    }
}
