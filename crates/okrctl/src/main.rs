use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use okr_core::api::{
    CompleteTaskRequest, CreateOkrResponse, StatusResponse, UpdateReminderStatusRequest,
};
use okr_core::stats::DashboardStats;
use okr_core::{
    Id, NewOkr, OkrWithTasks, Priority, Reminder, ReminderStatus, Task, TaskWithReminders,
};
use serde::de::DeserializeOwned;
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(name = "okrctl", version, about = "CLI client for the OKR daemon")]
struct Args {
    /// Base URL of the daemon, e.g. http://127.0.0.1:8080
    #[arg(long, default_value = "http://127.0.0.1:8080")]
    daemon: String,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Objectives.
    Okr {
        #[command(subcommand)]
        cmd: OkrCmd,
    },
    /// Tasks.
    Task {
        #[command(subcommand)]
        cmd: TaskCmd,
    },
    /// Reminders.
    Reminder {
        #[command(subcommand)]
        cmd: ReminderCmd,
    },
    /// Dashboard summary metrics.
    Stats,
}

#[derive(Subcommand, Debug)]
enum OkrCmd {
    List,
    Get {
        #[arg(long)]
        id: Id,
    },
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        /// RFC3339, e.g. 2026-12-31T00:00:00Z
        #[arg(long)]
        target_date: String,
        #[arg(long, default_value = "medium")]
        priority: String,
    },
}

#[derive(Subcommand, Debug)]
enum TaskCmd {
    List,
    Get {
        #[arg(long)]
        id: Id,
    },
    Complete {
        #[arg(long)]
        id: Id,
        #[arg(long)]
        proof_url: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
enum ReminderCmd {
    List,
    Upcoming,
    SetStatus {
        #[arg(long)]
        id: Id,
        /// pending, sent, viewed, or skipped.
        #[arg(long)]
        status: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let client = Client {
        http: reqwest::Client::new(),
        base: args.daemon.trim_end_matches('/').to_string(),
    };

    match args.cmd {
        Cmd::Okr { cmd } => match cmd {
            OkrCmd::List => print_json(&client.get::<Vec<OkrWithTasks>>("/api/okrs").await?),
            OkrCmd::Get { id } => {
                print_json(&client.get::<OkrWithTasks>(&format!("/api/okrs/{id}")).await?)
            }
            OkrCmd::Create {
                title,
                description,
                target_date,
                priority,
            } => {
                let req = NewOkr {
                    title,
                    description,
                    target_date: parse_utc(&target_date)?,
                    priority: priority.parse::<Priority>()?,
                };
                print_json(
                    &client
                        .post::<_, CreateOkrResponse>("/api/okrs", &req)
                        .await?,
                )
            }
        },
        Cmd::Task { cmd } => match cmd {
            TaskCmd::List => print_json(&client.get::<Vec<Task>>("/api/tasks").await?),
            TaskCmd::Get { id } => {
                print_json(
                    &client
                        .get::<TaskWithReminders>(&format!("/api/tasks/{id}"))
                        .await?,
                )
            }
            TaskCmd::Complete { id, proof_url } => {
                let req = CompleteTaskRequest { proof_url };
                print_json(
                    &client
                        .post::<_, Task>(&format!("/api/tasks/{id}/complete"), &req)
                        .await?,
                )
            }
        },
        Cmd::Reminder { cmd } => match cmd {
            ReminderCmd::List => print_json(&client.get::<Vec<Reminder>>("/api/reminders").await?),
            ReminderCmd::Upcoming => {
                print_json(&client.get::<Vec<Reminder>>("/api/reminders/upcoming").await?)
            }
            ReminderCmd::SetStatus { id, status } => {
                let req = UpdateReminderStatusRequest {
                    status: status.parse::<ReminderStatus>()?,
                };
                print_json(
                    &client
                        .patch::<_, StatusResponse>(&format!("/api/reminders/{id}/status"), &req)
                        .await?,
                )
            }
        },
        Cmd::Stats => print_json(&client.get::<DashboardStats>("/api/dashboard/stats").await?),
    }

    Ok(())
}

struct Client {
    http: reqwest::Client,
    base: String,
}

impl Client {
    async fn get<T: DeserializeOwned>(&self, path: &str) -> anyhow::Result<T> {
        let resp = self
            .http
            .get(format!("{}{}", self.base, path))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(resp)
    }

    async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> anyhow::Result<T> {
        let resp = self
            .http
            .post(format!("{}{}", self.base, path))
            .json(body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(resp)
    }

    async fn patch<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> anyhow::Result<T> {
        let resp = self
            .http
            .patch(format!("{}{}", self.base, path))
            .json(body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(resp)
    }
}

fn parse_utc(s: &str) -> anyhow::Result<DateTime<Utc>> {
    let parsed = DateTime::parse_from_rfc3339(s)
        .with_context(|| format!("invalid RFC3339 timestamp '{s}'"))?;
    Ok(parsed.with_timezone(&Utc))
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{s}"),
        Err(e) => eprintln!("failed to render response: {e}"),
    }
}
