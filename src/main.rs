use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use strata::env::{EnvStack, EnvironmentSource};
use strata::source::{discover_files, parse_file};
use strata::store::{APP_ENV, Config};

#[derive(Parser)]
#[command(name = "strata")]
#[command(
	author,
	version,
	about = "Layered YAML configuration loader with environment overrides and %VAR% interpolation"
)]
#[command(arg_required_else_help = true)]
struct Cli {
	/// Directory containing *.yml config files
	#[arg(long, value_name = "DIR", default_value = "config", global = true)]
	config_dir: PathBuf,

	/// Dotenv file supplying interpolation defaults
	#[arg(long, value_name = "FILE", default_value = ".env", global = true)]
	env_file: PathBuf,

	/// Override environment name (defaults to APP_ENV)
	#[arg(long, value_name = "NAME", global = true)]
	environment: Option<String>,

	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// Look up a key and print its interpolated value as YAML
	Get {
		/// Dotted config key, e.g. db.host
		key: String,
	},
	/// Print the merged (uninterpolated) tree and the file load order
	Show,
	/// Parse every discovered file and report errors
	Validate,
}

fn main() -> ExitCode {
	match run() {
		Ok(code) => code,
		Err(e) => {
			eprintln!("error: {e:?}");
			ExitCode::FAILURE
		}
	}
}

fn run() -> Result<ExitCode> {
	let cli = Cli::parse();

	match cli.command {
		Commands::Get { ref key } => handle_get(&cli, key),
		Commands::Show => handle_show(&cli),
		Commands::Validate => handle_validate(&cli),
	}
}

/// The override environment: the --environment flag, else APP_ENV from the
/// process environment or the env file.
fn effective_environment(cli: &Cli) -> Result<Option<String>> {
	if cli.environment.is_some() {
		return Ok(cli.environment.clone());
	}
	let env = EnvStack::with_env_file(&cli.env_file)
		.with_context(|| format!("Failed to load env file {}", cli.env_file.display()))?;
	Ok(env.lookup(APP_ENV))
}

fn load_config(cli: &Cli) -> Result<Config> {
	let env = EnvStack::with_env_file(&cli.env_file)
		.with_context(|| format!("Failed to load env file {}", cli.env_file.display()))?;
	let environment = match cli.environment {
		Some(ref name) => Some(name.clone()),
		None => env.lookup(APP_ENV),
	};
	Config::with_env(&cli.config_dir, Box::new(env), environment.as_deref())
		.with_context(|| format!("Failed to load config from {}", cli.config_dir.display()))
}

fn handle_get(cli: &Cli, key: &str) -> Result<ExitCode> {
	let config = load_config(cli)?;
	let value = config.get(key)?;

	let rendered = serde_yaml::to_string(&value).context("Failed to render value as YAML")?;
	print!("{}", rendered);
	Ok(ExitCode::SUCCESS)
}

fn handle_show(cli: &Cli) -> Result<ExitCode> {
	let environment = effective_environment(cli)?;
	let files = discover_files(&cli.config_dir, environment.as_deref())
		.with_context(|| format!("Failed to list {}", cli.config_dir.display()))?;

	if files.is_empty() {
		println!("No configuration files found.");
		return Ok(ExitCode::SUCCESS);
	}

	println!("Configuration files (in load order):");
	for path in &files {
		println!("  {}", path.display());
	}
	if let Some(ref name) = environment {
		println!("Override environment: {}", name);
	}
	println!();

	let config = load_config(cli)?;
	let rendered =
		serde_yaml::to_string(config.tree()).context("Failed to render merged tree as YAML")?;
	print!("{}", rendered);
	Ok(ExitCode::SUCCESS)
}

fn handle_validate(cli: &Cli) -> Result<ExitCode> {
	let environment = effective_environment(cli)?;
	let files = match discover_files(&cli.config_dir, environment.as_deref()) {
		Ok(files) => files,
		Err(e) => {
			eprintln!("Configuration error: {}", e);
			return Ok(ExitCode::FAILURE);
		}
	};

	if files.is_empty() {
		println!("No configuration files found.");
		return Ok(ExitCode::SUCCESS);
	}

	let mut valid = true;
	for path in &files {
		match parse_file(path) {
			Ok(mapping) => println!("  {} ({} keys)", path.display(), mapping.len()),
			Err(e) => {
				valid = false;
				eprintln!("  {}: {}", path.display(), e);
			}
		}
	}

	if valid {
		println!("All configuration files are valid.");
		Ok(ExitCode::SUCCESS)
	} else {
		Ok(ExitCode::FAILURE)
	}
}
