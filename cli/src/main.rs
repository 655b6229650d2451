use anyhow::{Context, Result};
use camunda_base::engine_config::{load_engine_config_from_env, EngineConfig};
use camunda_base::logging::{load_tracing_config_from_env, tracing_init};
use camunda_base::APP_NAME;
use camunda_client::migration::{
    Execute, ExecuteOutcome, Generate, InstructionReport, MigrationPlan, Validate,
};
use camunda_client::{CamundaRequest, ReqwestTransport};
use clap::{Parser, Subcommand};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Engine REST base url (default: CAMUNDA_URL)
    #[arg(long, global = true)]
    url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Let the engine propose a migration plan and print it as JSON.
    Generate {
        #[arg(long)]
        source: String,
        #[arg(long)]
        target: String,
        #[arg(long, default_value = "false")]
        update_event_triggers: bool,
    },
    /// Validate a migration plan file. Exits with 1 when any instruction fails.
    Validate {
        #[arg(long)]
        plan: String,
    },
    /// Migrate process instances with a migration plan file.
    Execute {
        #[arg(long)]
        plan: String,
        #[arg(long = "instance", required = true)]
        instances: Vec<String>,
        #[arg(long, default_value = "false")]
        skip_custom_listeners: bool,
        #[arg(long, default_value = "false")]
        skip_io_mappings: bool,
        #[arg(long = "async", default_value = "false")]
        asynchronous: bool,
    },
}

fn load_plan(path: &str) -> Result<MigrationPlan> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("cannot read plan file: {path}"))?;
    let json: serde_json::Value = serde_json::from_str(&content)
        .with_context(|| format!("plan file is not valid json: {path}"))?;
    Ok(MigrationPlan::load(&json)?)
}

fn engine_config(url: Option<String>) -> EngineConfig {
    let conf = load_engine_config_from_env().unwrap_or_else(|e| {
        tracing::warn!("engine config not loaded, use default: {:?}", e);
        EngineConfig::default()
    });
    override_url(conf, url)
}

/// `--url` wins over `CAMUNDA_URL`
fn override_url(conf: EngineConfig, url: Option<String>) -> EngineConfig {
    match url {
        Some(url) => EngineConfig { url, ..conf },
        None => conf,
    }
}

fn count_invalid(reports: &[InstructionReport]) -> usize {
    reports.iter().filter(|r| !r.is_valid()).count()
}

async fn run(args: Args) -> Result<ExitCode> {
    let conf = engine_config(args.url);
    let base_url = conf.base_url()?;
    let transport = ReqwestTransport::new(&conf)?;
    tracing::debug!("engine: {}", base_url);

    match args.command {
        Command::Generate {
            source,
            target,
            update_event_triggers,
        } => {
            let plan = Generate::new(base_url, source, target)
                .update_event_triggers(update_event_triggers)
                .send(&transport)
                .await?;
            println!("{}", serde_json::to_string_pretty(&plan.to_json())?);
            Ok(ExitCode::SUCCESS)
        }
        Command::Validate { plan } => {
            let plan = load_plan(&plan)?;
            let reports = Validate::from_migration_plan(base_url, &plan)
                .send(&transport)
                .await?;
            println!("{}", serde_json::to_string_pretty(&reports)?);
            let failed = count_invalid(&reports);
            if failed > 0 {
                tracing::warn!("{} of {} instruction(s) invalid", failed, reports.len());
                Ok(ExitCode::FAILURE)
            } else {
                Ok(ExitCode::SUCCESS)
            }
        }
        Command::Execute {
            plan,
            instances,
            skip_custom_listeners,
            skip_io_mappings,
            asynchronous,
        } => {
            let plan = load_plan(&plan)?;
            let outcome = Execute::from_migration_plan(base_url, &plan, instances)
                .skip_custom_listeners(skip_custom_listeners)
                .skip_io_mappings(skip_io_mappings)
                .asynchronous(asynchronous)
                .send(&transport)
                .await?;
            match outcome {
                ExecuteOutcome::Completed => tracing::info!("migration completed"),
                ExecuteOutcome::Batch(batch) => {
                    println!("{}", serde_json::to_string_pretty(&batch)?)
                }
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    dotenvy::dotenv().ok();
    let args = Args::parse();
    let conf = load_tracing_config_from_env().unwrap_or_default();
    tracing_init(conf)?;
    tracing::debug!("{} started", APP_NAME);
    run(args).await
}
