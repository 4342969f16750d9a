//! Operator CLI for Imprint.

mod api_client;

use anyhow::{Context, Result};
use api_client::{ApiClient, JobResponse, QueueEntryResponse};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "imprintctl")]
#[command(about = "Operator CLI for the Imprint print-job queue")]
#[command(version)]
struct Cli {
    /// Server API URL
    #[arg(
        long,
        global = true,
        env = "IMPRINT_SERVER",
        default_value = "http://127.0.0.1:8080"
    )]
    server: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Submit a file for printing
    Submit {
        /// Path to the file to print
        file: PathBuf,
        /// Number of copies
        #[arg(long, default_value_t = 1)]
        copies: u32,
        /// Job priority: high, medium, or low
        #[arg(long)]
        priority: Option<String>,
    },
    /// List the queue in processing order
    Queue,
    /// Show the next pending job
    Next,
    /// Mark a job as being printed
    Start {
        /// Job id
        id: String,
        /// Custom message for the customer notification
        #[arg(long)]
        message: Option<String>,
    },
    /// Mark a job done: remove it from the queue and complete it
    Complete {
        /// Job id
        id: String,
    },
    /// Look up a job's record and current status
    Status {
        /// Job id
        id: String,
    },
    /// Download stored content
    Download {
        /// Stored file name
        file_name: String,
        /// Output path (defaults to the file name)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Show job, queue, and store counters
    Stats,
    /// Check server health
    Health,
}

fn print_job(job: &JobResponse) {
    println!("id:           {}", job.id);
    println!("file:         {}", job.file_name);
    println!("copies:       {}", job.copies);
    println!("priority:     {}", job.priority);
    println!("status:       {}", job.status);
    println!("submitted at: {}", job.submitted_at);
    if let Some(updated_at) = &job.updated_at {
        println!("updated at:   {}", updated_at);
    }
}

fn print_entry(entry: &QueueEntryResponse) {
    println!(
        "{}  {:>8}  {:>3}x  {}  {}",
        entry.id, entry.priority, entry.copies, entry.submitted_at, entry.file_name
    );
}

async fn cmd_submit(
    client: &ApiClient,
    file: &Path,
    copies: u32,
    priority: Option<&str>,
) -> Result<()> {
    let file_name = file
        .file_name()
        .and_then(|n| n.to_str())
        .context("file path has no usable file name")?
        .to_string();
    let data = tokio::fs::read(file)
        .await
        .with_context(|| format!("failed to read {}", file.display()))?;

    let job = client.submit(&file_name, data, copies, priority).await?;
    println!("Submitted.");
    print_job(&job);
    Ok(())
}

async fn cmd_download(client: &ApiClient, file_name: &str, output: Option<PathBuf>) -> Result<()> {
    let data = client.download(file_name).await?;
    let output = output.unwrap_or_else(|| PathBuf::from(file_name));
    tokio::fs::write(&output, &data)
        .await
        .with_context(|| format!("failed to write {}", output.display()))?;
    println!("Wrote {} bytes to {}", data.len(), output.display());
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let client = ApiClient::new(&cli.server)?;

    match cli.command {
        Commands::Submit {
            file,
            copies,
            priority,
        } => {
            cmd_submit(&client, &file, copies, priority.as_deref()).await?;
        }
        Commands::Queue => {
            let entries = client.list_queue().await?;
            if entries.is_empty() {
                println!("Queue is empty.");
            } else {
                for entry in &entries {
                    print_entry(entry);
                }
            }
        }
        Commands::Next => match client.next_job().await? {
            Some(entry) => print_entry(&entry),
            None => println!("No pending jobs."),
        },
        Commands::Start { id, message } => {
            let job = client
                .update_status(&id, "processing", message.as_deref())
                .await?;
            print_job(&job);
        }
        Commands::Complete { id } => {
            let job = client.complete(&id).await?;
            println!("Completed.");
            print_job(&job);
        }
        Commands::Status { id } => {
            let job = client.track(&id).await?;
            print_job(&job);
        }
        Commands::Download { file_name, output } => {
            cmd_download(&client, &file_name, output).await?;
        }
        Commands::Stats => {
            let stats = client.stats().await?;
            println!("jobs total:   {}", stats.jobs.total);
            println!("  pending:    {}", stats.jobs.pending);
            println!("  processing: {}", stats.jobs.processing);
            println!("  completed:  {}", stats.jobs.completed);
            println!("queue depth:  {}", stats.queue_depth);
            println!("stored files: {}", stats.stored_files);
        }
        Commands::Health => {
            let health = client.health().await?;
            println!("{} (v{})", health.status, health.version);
        }
    }

    Ok(())
}
