use crate::analytics::{status_distribution, task_statistics, TaskFilter, TaskFilterParams};
use crate::clickup::{ClickUpClient, NewTask, UpstreamResponse};
use crate::config::AppConfig;
use crate::proxy;
use crate::tasks::{format, normalize, organize_by_assignee, Priority, TaskRecord};
use crate::workload::{Roster, WorkloadReport};
use anyhow::{anyhow, bail, Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use serde_json::{json, Map, Value};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "taskboard", version, about = "Team task dashboard backed by ClickUp")]
pub struct Cli {
    /// Grouped task snapshot to read instead of the live list
    #[arg(long, global = true)]
    pub file: Option<PathBuf>,

    /// Comma-separated team roster
    #[arg(long, global = true)]
    pub roster: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the forwarding proxy
    Serve {
        #[arg(long)]
        port: Option<u16>,
    },
    /// Print per-member workload and the balancing suggestion
    Workload {
        #[arg(long)]
        json: bool,
    },
    /// List tasks, optionally filtered
    Tasks {
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        priority: Option<String>,
        #[arg(long)]
        employee: Option<String>,
    },
    /// Print per-owner statistics as JSON
    Stats,
    /// Fetch a list and write it as a grouped snapshot
    Fetch {
        #[arg(long)]
        list_id: Option<String>,
        #[arg(long)]
        out: PathBuf,
    },
    /// Show teams, spaces and lists visible to the token
    Discover,
    /// Create a task
    Create {
        #[arg(long)]
        list_id: Option<String>,
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long)]
        assignee: Option<String>,
        #[arg(long, default_value = "Normal")]
        priority: String,
        #[arg(long, default_value = "to do")]
        status: String,
        /// YYYY-MM-DD
        #[arg(long)]
        due: Option<String>,
    },
    /// Update fields of an existing task
    Update {
        task_id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        priority: Option<String>,
    },
    /// Delete a task
    Delete { task_id: String },
}

impl Cli {
    /// Flags win over environment values.
    pub fn apply(&self, mut config: AppConfig) -> AppConfig {
        if let Some(file) = &self.file {
            config.data_file = Some(file.clone());
        }
        if let Some(roster) = &self.roster {
            config.roster = Roster::parse(roster);
        }
        if let Command::Serve { port: Some(port) } = &self.command {
            config.port = *port;
        }
        config
    }
}

pub async fn run(cli: Cli) -> Result<()> {
    let config = cli.apply(AppConfig::from_env().context("Failed to load configuration")?);

    match cli.command {
        Command::Serve { .. } => proxy::serve(&config).await,
        Command::Workload { json } => {
            let tasks = load_tasks(&config).await?;
            let report = WorkloadReport::compute(&tasks, &config.roster);
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{}", report.render());
            }
            Ok(())
        }
        Command::Tasks {
            status,
            priority,
            employee,
        } => {
            let tasks = load_tasks(&config).await?;
            let filter = TaskFilter::from(&TaskFilterParams {
                status,
                priority,
                employee,
            });
            print!("{}", render_task_list(&tasks, &filter));
            Ok(())
        }
        Command::Stats => {
            let grouped = config
                .task_source()
                .load()
                .await
                .context("Failed to load tasks")?;
            let stats = task_statistics(&grouped, Utc::now());
            println!("{}", serde_json::to_string_pretty(&stats)?);
            Ok(())
        }
        Command::Fetch { list_id, out } => {
            let client = require_client(&config)?;
            let list_id = list_id
                .or_else(|| config.list_id.clone())
                .ok_or_else(|| anyhow!("list_id required (use --list-id or CLICKUP_LIST_ID)"))?;
            fetch_snapshot(&client, &list_id, &out).await
        }
        Command::Discover => {
            let client = require_client(&config)?;
            discover(&client).await
        }
        Command::Create {
            list_id,
            name,
            description,
            assignee,
            priority,
            status,
            due,
        } => {
            let client = require_client(&config)?;
            let list_id = list_id
                .or_else(|| config.list_id.clone())
                .ok_or_else(|| anyhow!("list_id required (use --list-id or CLICKUP_LIST_ID)"))?;
            let mut task = NewTask::new(name);
            task.description = description;
            if let Some(assignee) = assignee {
                task.assignee = assignee;
            }
            task.priority = parse_priority(&priority)?;
            task.status = status;
            task.due_date = due;

            let response = client.create_task(&list_id, &task.to_payload()).await?;
            report_upstream("Create", response)
        }
        Command::Update {
            task_id,
            name,
            status,
            priority,
        } => {
            let client = require_client(&config)?;
            let payload = update_payload(name, status, priority.as_deref())?;
            let response = client.update_task(&task_id, &payload).await?;
            report_upstream("Update", response)
        }
        Command::Delete { task_id } => {
            let client = require_client(&config)?;
            let response = client.delete_task(&task_id).await?;
            report_upstream("Delete", response)
        }
    }
}

fn require_client(config: &AppConfig) -> Result<ClickUpClient> {
    config
        .client()
        .ok_or_else(|| anyhow!("CLICKUP_API_TOKEN not set"))
}

fn parse_priority(label: &str) -> Result<Priority> {
    Priority::parse(label).ok_or_else(|| anyhow!("unknown priority '{}' (Urgent, High, Normal, Low)", label))
}

async fn load_tasks(config: &AppConfig) -> Result<Vec<TaskRecord>> {
    let source = config.task_source();
    let grouped = source
        .load()
        .await
        .with_context(|| format!("Failed to load tasks from {}", source.describe()))?;
    Ok(normalize(&grouped))
}

fn update_payload(name: Option<String>, status: Option<String>, priority: Option<&str>) -> Result<Value> {
    let mut payload = Map::new();
    if let Some(name) = name {
        payload.insert("name".into(), json!(name));
    }
    if let Some(status) = status {
        payload.insert("status".into(), json!(status));
    }
    if let Some(priority) = priority {
        payload.insert("priority".into(), json!(parse_priority(priority)?.code()));
    }
    if payload.is_empty() {
        bail!("nothing to update (use --name, --status or --priority)");
    }
    Ok(Value::Object(payload))
}

fn report_upstream(action: &str, response: UpstreamResponse) -> Result<()> {
    if !response.is_success() {
        bail!("{} failed with status {}: {}", action, response.status, response.body);
    }
    println!("{}", serde_json::to_string_pretty(&response.body)?);
    Ok(())
}

/// Filtered task blocks followed by the status distribution of the
/// filtered set.
pub fn render_task_list(tasks: &[TaskRecord], filter: &TaskFilter) -> String {
    let selected: Vec<TaskRecord> = filter.apply(tasks).into_iter().cloned().collect();
    if selected.is_empty() {
        return "No tasks match the current filters.\n".to_string();
    }

    let mut out = String::new();
    for task in &selected {
        out.push_str(&format::task_details(task));
        out.push('\n');
    }
    out.push_str(&format!("{} of {} tasks\n", selected.len(), tasks.len()));
    for slice in status_distribution(&selected) {
        out.push_str(&format!("  {:<16} {}\n", format::status_label(&slice.name), slice.value));
    }
    out
}

async fn fetch_snapshot(client: &ClickUpClient, list_id: &str, out: &Path) -> Result<()> {
    let tasks = client
        .list_tasks(list_id)
        .await
        .with_context(|| format!("Failed to fetch tasks from list {}", list_id))?;
    let grouped = organize_by_assignee(&tasks);

    let content = serde_json::to_string_pretty(&grouped)?;
    tokio::fs::write(out, content)
        .await
        .with_context(|| format!("Failed to write {}", out.display()))?;

    info!("Saved {} tasks to {}", tasks.len(), out.display());
    for (owner, owned) in &grouped {
        println!("{}: {} tasks", owner, owned.len());
    }
    Ok(())
}

async fn discover(client: &ClickUpClient) -> Result<()> {
    let teams = client.teams().await.context("Failed to list teams")?;
    if teams.is_empty() {
        println!("No teams visible to this token.");
    }
    for team in &teams {
        println!("Team: {} (ID: {})", team.name, team.id);
        for space in client.spaces(&team.id).await? {
            println!("  Space: {} (ID: {})", space.name, space.id);
            for list in client.lists(&space.id).await? {
                println!("    List: {} (ID: {})", list.name, list.id);
            }
        }
    }
    Ok(())
}
