use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use rollhub::params::ParamValue;
use rollhub::upgrade::{BeginBlockOutcome, UpgradePlan, UpgradeState};
use rollhub::{App, BlockError, NodeConfig, ParamChange, Proposal};
use std::path::PathBuf;
use std::process;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "rollhub")]
#[command(about = "Rollapp settlement hub node", long_about = None)]
struct Cli {
    /// Path to a TOML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Node home directory (overrides config)
    #[arg(long, global = true)]
    home: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write genesis params into the store
    Init,

    /// Produce and commit blocks
    Run {
        #[arg(long, default_value_t = 1)]
        blocks: u64,
    },

    /// Schedule a software upgrade
    ScheduleUpgrade {
        #[arg(long)]
        name: String,
        #[arg(long)]
        height: u64,
        #[arg(long, default_value = "")]
        info: String,
    },

    /// Cancel the pending software upgrade
    CancelUpgrade,

    /// Show the pending upgrade plan
    Plan,

    /// Show a module's params as JSON
    Params { module: String },

    /// Change one param, e.g. `set-param eibc ErrAckFee '{"Dec":"0.05"}'`
    SetParam {
        module: String,
        key: String,
        value: String,
    },

    /// Height, commit hash and upgrade state
    Status,
}

fn main() {
    let cli = Cli::parse();

    let mut config = match NodeConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("failed to load config: {err}");
            process::exit(2);
        }
    };
    if let Some(home) = cli.home.clone() {
        config.home = home;
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Err(err) = run(cli.command, &config) {
        // The only place the node terminates itself.
        if let Some(BlockError::Halt(fatal)) = err.downcast_ref::<BlockError>() {
            error!("Node halted: {}", fatal);
            process::exit(3);
        }
        error!("{:#}", err);
        process::exit(1);
    }
}

fn run(command: Commands, config: &NodeConfig) -> Result<()> {
    let mut app = App::open(config).context("opening node store")?;

    if !matches!(command, Commands::Init) && app.get_params("rollapp").is_err() {
        bail!("store has no genesis; run `rollhub init` first");
    }

    match command {
        Commands::Init => {
            let written = app.init_genesis()?;
            if app.height() == 0 {
                app.commit()?;
            }
            info!("Initialized {} ({} param sets written)", config.chain_id, written);
        }
        Commands::Run { blocks } => {
            for _ in 0..blocks {
                let height = app.height() + 1;
                match app.begin_block(height)? {
                    BeginBlockOutcome::Applied { name, height } => {
                        info!("Upgrade {} applied at height {}", name, height)
                    }
                    BeginBlockOutcome::Pending { .. } | BeginBlockOutcome::Idle => {}
                }
                let id = app.commit()?;
                info!("Committed block {} {}", id.version, id.hash_hex());
            }
        }
        Commands::ScheduleUpgrade { name, height, info } => {
            let plan = UpgradePlan::new(name, height).with_info(info);
            let proposal = Proposal::SoftwareUpgrade { plan };
            app.validate_proposal(&proposal)?;
            app.execute_proposal(proposal)?;
        }
        Commands::CancelUpgrade => app.execute_proposal(Proposal::CancelSoftwareUpgrade)?,
        Commands::Plan => match app.get_upgrade_plan()? {
            Some(plan) => println!("{}", serde_json::to_string_pretty(&plan)?),
            None => println!("no upgrade plan"),
        },
        Commands::Params { module } => {
            let params = app.get_params(&module)?;
            println!("{}", serde_json::to_string_pretty(&params)?);
        }
        Commands::SetParam { module, key, value } => {
            let value: ParamValue = serde_json::from_str(&value)
                .with_context(|| format!("parsing value for {module}.{key}"))?;
            let proposal = Proposal::ParamChange {
                module,
                changes: vec![ParamChange { key, value }],
            };
            app.validate_proposal(&proposal)?;
            app.execute_proposal(proposal)?;
        }
        Commands::Status => {
            let commit = app.last_commit()?;
            println!("chain_id: {}", config.chain_id);
            println!("height:   {}", app.height());
            println!("hash:     {}", commit.hash_hex());
            match app.upgrade_status()? {
                UpgradeState::NoPlan => println!("upgrade:  none"),
                UpgradeState::PlanPending(plan) if !app.upgrade_keeper().has_handler(&plan.name) => {
                    println!("upgrade:  {} pending (no handler in this binary)", plan)
                }
                UpgradeState::PlanPending(plan) => println!("upgrade:  {} pending", plan),
                UpgradeState::Applying(plan) => println!("upgrade:  {} due next block", plan),
            }
            for (name, height) in app.applied_upgrades()? {
                println!("applied:  {} at {}", name, height);
            }
        }
    }

    Ok(())
}
