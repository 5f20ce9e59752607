use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use daymind_core::{
    validate_tasks, Allocation, LoadScorer, MentalLoadResult, ScheduleItem, SlotAllocator,
    TaskInput,
};
use serde::Serialize;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info};

mod calendar;
mod config;
mod logging;
mod report;
mod state;

#[derive(Parser, Debug)]
#[command(
    name = "daymind",
    version,
    about = "Plan a day around your energy and check its mental load"
)]
struct Cli {
    /// Debug logging on stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a default config.toml under $DAYMIND_HOME (or ~/.daymind)
    Init,

    /// Place pending tasks into a day and score the result
    Plan {
        /// JSON array of tasks
        #[arg(long)]
        tasks: PathBuf,

        /// Day to plan (YYYY-MM-DD)
        #[arg(long)]
        date: NaiveDate,

        /// Print the plan and its load analysis as JSON
        #[arg(long)]
        json: bool,

        /// Also write the placed items as an ICS calendar
        #[arg(long)]
        ics: Option<PathBuf>,
    },

    /// Score an existing schedule (JSON array of items)
    Load {
        #[arg(long)]
        schedule: PathBuf,

        #[arg(long)]
        json: bool,
    },
}

#[derive(Serialize)]
struct PlanOutput<'a> {
    date: NaiveDate,
    #[serde(flatten)]
    allocation: &'a Allocation,
    load: &'a MentalLoadResult,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose)?;

    match cli.command {
        Command::Init => config::init_config()?,
        Command::Plan {
            tasks,
            date,
            json,
            ics,
        } => plan(tasks, date, json, ics)?,
        Command::Load { schedule, json } => load(schedule, json)?,
    }

    Ok(())
}

fn plan(tasks_path: PathBuf, date: NaiveDate, json: bool, ics: Option<PathBuf>) -> Result<()> {
    let cfg = config::load_config()?;
    let profile = cfg.user_profile()?;

    if !tasks_path.exists() {
        bail!("tasks file not found: {} (pass --tasks <file.json>)", tasks_path.display());
    }
    let inputs: Vec<TaskInput> = state::read_json(&tasks_path)?;
    let total = inputs.len();
    let pending: Vec<TaskInput> = inputs.into_iter().filter(|t| t.is_pending_on(date)).collect();
    debug!(total, pending = pending.len(), %date, "filtered task list");

    let tasks = validate_tasks(pending).context("invalid task list")?;
    let allocation = SlotAllocator::default()
        .allocate(&tasks, &profile, date)
        .context("allocating schedule")?;
    let load = LoadScorer::new(cfg.weights)
        .context("invalid [weights] section in config.toml")?
        .evaluate(&allocation.items);

    if json {
        let out = PlanOutput {
            date,
            allocation: &allocation,
            load: &load,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("# Plan for {date}\n");
        print!("{}", report::render_plan(&allocation));
        println!();
        print!("{}", report::render_load(&load));
    }

    if let Some(path) = ics {
        let events = calendar::items_to_events(&allocation.items, &profile.timezone)?;
        fs::write(&path, calendar::events_to_ics(&events))
            .with_context(|| format!("write {}", path.display()))?;
        info!(events = events.len(), path = %path.display(), "wrote calendar");
    }

    Ok(())
}

fn load(schedule_path: PathBuf, json: bool) -> Result<()> {
    let cfg = config::load_config()?;
    if !schedule_path.exists() {
        bail!("schedule not found: {} (pass --schedule <file.json>)", schedule_path.display());
    }
    let items: Vec<ScheduleItem> = state::read_json(&schedule_path)?;
    for item in &items {
        item.validate()
            .with_context(|| format!("invalid item in {}", schedule_path.display()))?;
    }

    let result = LoadScorer::new(cfg.weights)
        .context("invalid [weights] section in config.toml")?
        .evaluate(&items);

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!("{}", report::render_load(&result));
    }
    Ok(())
}
