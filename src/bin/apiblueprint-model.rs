//! API Blueprint model CLI
//!
//! Command-line interface for building resource documentation models from a
//! descriptor configuration.

use std::path::PathBuf;
use std::process::ExitCode;

use apiblueprint_model::{
    load_config_auto, BodyPropertyPolicy, BuildOptions, ConfigError, FieldOwnership,
};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "apiblueprint-model")]
#[command(about = "Build API Blueprint resource models from service descriptors")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the resource documents of a descriptor configuration
    Build {
        /// Config source: file path or URL (http:// or https://)
        config: String,

        /// Output file (stdout if not specified)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,

        /// Document only required fields on POST, PUT and PATCH actions
        #[arg(long)]
        required_only: bool,

        /// Copy fields per action instead of writing PATCH overrides to shared fields
        #[arg(long)]
        detach_fields: bool,
    },

    /// Validate a descriptor configuration without building it
    Check {
        /// Config source: file path or URL (http:// or https://)
        config: String,

        /// Output results as JSON (for automation)
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Build {
            config,
            output,
            pretty,
            required_only,
            detach_fields,
        } => run_build(BuildArgs {
            config,
            output,
            pretty,
            required_only,
            detach_fields,
        }),

        Commands::Check { config, json } => run_check(&config, json),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(code) => ExitCode::from(code),
    }
}

struct BuildArgs {
    config: String,
    output: Option<PathBuf>,
    pretty: bool,
    required_only: bool,
    detach_fields: bool,
}

fn run_build(args: BuildArgs) -> Result<(), u8> {
    let BuildArgs {
        config: source,
        output,
        pretty,
        required_only,
        detach_fields,
    } = args;

    let mut config = load_config_auto(&source).map_err(|e| {
        report_config_error(false, &e);
        e.exit_code() as u8
    })?;

    // Flags only tighten what the config file asks for.
    let mut options: BuildOptions = config.options;
    if required_only {
        options = options.body_properties(BodyPropertyPolicy::RequiredOnly);
    }
    if detach_fields {
        options = options.field_ownership(FieldOwnership::Detached);
    }

    let document = config.build(&options).map_err(|e| {
        eprintln!("Error: {}", e);
        e.exit_code() as u8
    })?;

    let json_output = if pretty {
        serde_json::to_string_pretty(&document)
    } else {
        serde_json::to_string(&document)
    }
    .map_err(|e| {
        eprintln!("Error serializing output: {}", e);
        2u8
    })?;

    match output {
        Some(path) => {
            std::fs::write(&path, &json_output).map_err(|e| {
                eprintln!("Error writing to {}: {}", path.display(), e);
                3u8
            })?;
        }
        None => {
            println!("{}", json_output);
        }
    }

    Ok(())
}

fn run_check(source: &str, json_output: bool) -> Result<(), u8> {
    let config = load_config_auto(source).map_err(|e| {
        report_config_error(json_output, &e);
        e.exit_code() as u8
    })?;

    config.check_references().map_err(|e| {
        let e = ConfigError::from(e);
        report_config_error(json_output, &e);
        e.exit_code() as u8
    })?;

    if json_output {
        println!(r#"{{"valid":true}}"#);
    } else {
        println!("Valid");
    }
    Ok(())
}

/// Output a config error in plain text or JSON format.
fn report_config_error(json_output: bool, err: &ConfigError) {
    match (json_output, err) {
        (true, ConfigError::Invalid { errors }) => {
            let output = serde_json::json!({
                "valid": false,
                "errors": errors
            });
            println!("{}", output);
        }
        (true, other) => {
            let output = serde_json::json!({
                "valid": false,
                "error": other.to_string()
            });
            println!("{}", output);
        }
        (false, ConfigError::Invalid { errors }) => {
            eprintln!("Config validation failed:");
            for error in errors {
                eprintln!("  {}", error);
            }
        }
        (false, other) => {
            eprintln!("Error: {}", other);
        }
    }
}
