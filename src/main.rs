//! scribe — template-driven writing assistant backed by a Kimi/Moonshot endpoint
//!
//! Usage:
//!   scribe templates                                          → list templates
//!   scribe generate -t story -p topic=友情 -p style=治愈 -p length=500
//!   scribe generate -t outline ... --save --out-dir ./drafts  → also write a .txt
//!   scribe generate -t story ... --dry-run                    → print the prompt only
//!   scribe config                                             → print effective config
//!   scribe version                                            → show version

mod export;

use anyhow::Context;
use clap::{Parser, Subcommand};
use scribe_core::config::{api_key_from_env, expand_tilde};
use scribe_core::{GenerationResult, ParamKind, ParamValue, ParameterSet, ScribeConfig};
use scribe_pipeline::Pipeline;
use scribe_templates::TemplateRegistry;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "scribe",
    about = "Template-driven writing assistant (stories, marketing copy, paper outlines)",
    version = env!("CARGO_PKG_VERSION")
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to config file (TOML). Default: $SCRIBE_CONFIG or ~/.config/scribe/scribe.toml
    #[arg(long, global = true)]
    config: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// List available templates and their parameters
    Templates,
    /// Generate text from a template
    Generate {
        /// Template id (see `scribe templates`)
        #[arg(short, long)]
        template: String,
        /// Template parameter, repeatable
        #[arg(short = 'p', long = "param", value_name = "NAME=VALUE", value_parser = parse_param)]
        params: Vec<(String, String)>,
        /// API key (or set MOONSHOT_API_KEY / KIMI_API_KEY)
        #[arg(long)]
        api_key: Option<String>,
        /// Also write the generated text to a timestamped .txt file
        #[arg(long, default_value_t = false)]
        save: bool,
        /// Directory for --save
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
        /// Print the rendered prompt without calling the endpoint
        #[arg(long, default_value_t = false)]
        dry_run: bool,
        /// Print the result as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Print the effective configuration as TOML
    Config,
    /// Show version
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let config_path = cli
        .config
        .as_deref()
        .map(expand_tilde)
        .unwrap_or_else(ScribeConfig::default_path);
    let config = ScribeConfig::load(&config_path);

    match cli.command {
        Commands::Templates => {
            let pipeline = Pipeline::from_config(&config);
            print_templates(pipeline.registry());
        }

        Commands::Generate {
            template,
            params,
            api_key,
            save,
            out_dir,
            dry_run,
            json,
        } => {
            let pipeline = Pipeline::from_config(&config);
            let params = build_params(pipeline.registry(), &template, &params);

            if dry_run {
                match pipeline.prepare_prompt(&template, &params) {
                    Ok(prompt) => println!("{}", prompt),
                    Err(failure) => {
                        eprintln!("{}", failure);
                        std::process::exit(1);
                    }
                }
                return Ok(());
            }

            let credential = api_key.or_else(api_key_from_env).unwrap_or_default();
            let result = pipeline.generate(&credential, &template, &params).await;

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            }

            match &result {
                GenerationResult::Success { text } => {
                    if !json {
                        // stdout carries only the generated text
                        println!("{}", text);
                        eprintln!("{}", export::TextStats::of(text));
                    }
                    if save {
                        let path = export::save_text(&out_dir, &template, text)
                            .with_context(|| format!("failed to save into {}", out_dir.display()))?;
                        eprintln!("📥 已保存：{}", path.display());
                    }
                }
                GenerationResult::Failure(failure) => {
                    if !json {
                        eprintln!("{}", failure);
                    }
                    std::process::exit(1);
                }
            }
        }

        Commands::Config => {
            println!("# {}", config_path.display());
            print!("{}", config.to_toml());
        }

        Commands::Version => {
            println!("scribe v{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "scribe=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn parse_param(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{}'", raw))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing parameter name in '{}'", raw));
    }
    Ok((name.to_string(), value.to_string()))
}

/// Only Count parameters are read as integers; text values pass through untouched.
fn build_params(registry: &TemplateRegistry, template_id: &str, raw: &[(String, String)]) -> ParameterSet {
    let template = registry.resolve(template_id);
    raw.iter()
        .map(|(name, value)| {
            let is_count = template
                .and_then(|t| t.param(name))
                .map_or(false, |spec| spec.is_count());
            let value = if is_count {
                ParamValue::from_input(value)
            } else {
                ParamValue::Text(value.clone())
            };
            (name.as_str(), value)
        })
        .collect()
}

fn print_templates(registry: &TemplateRegistry) {
    for template in registry.list() {
        println!("{}  {}", template.id(), template.title());
        for param in template.params() {
            let kind = match param.kind {
                ParamKind::Text => "text".to_string(),
                ParamKind::Count => match param.suggested_range {
                    Some((min, max)) => format!("count, {}–{}", min, max),
                    None => "count".to_string(),
                },
            };
            println!("    {:<16} {} ({})", param.name, param.label, kind);
        }
    }
}
