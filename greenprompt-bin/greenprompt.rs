use std::{process::ExitCode, sync::Arc};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use greenprompt_client::{types::SCHEDULE_NONE, GreenPromptClient, GreenPromptClientConfig};
use greenprompt_dashboard::{
    config::GreenPromptDashboardConfig,
    form::schedule_help,
    poll::{run_polling, run_render_loop},
    telemetry, Dashboard, DashboardSnapshot,
};
use greenprompt_utils::spawn_with_shutdown;
use greenprompt_view::SubmissionView;
use tokio::{sync::watch, try_join};
use tracing::info;

#[derive(Parser)]
#[command(name = "greenprompt", about = "Carbon-aware prompt scheduling dashboard")]
struct Args {
    #[arg(short, long)]
    config_path: String,

    /// Print snapshots and submission outcomes as JSON.
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Load every region once and print the dashboard.
    Status,
    /// Send a prompt for immediate execution.
    Send {
        #[arg(short, long)]
        prompt: String,
        #[arg(short, long)]
        model: Option<String>,
    },
    /// Schedule a prompt for carbon-aware execution.
    Schedule {
        #[arg(short, long)]
        prompt: String,
        #[arg(short, long)]
        model: Option<String>,
        #[arg(short, long, default_value = SCHEDULE_NONE, help = schedule_help())]
        schedule: String,
    },
    /// Keep refreshing the dashboard until ctrl-c.
    Watch,
}

#[tokio::main]
#[allow(clippy::redundant_pub_crate)]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();

    let dashboard_config = GreenPromptDashboardConfig::from_file_path(&args.config_path)
        .context("Failed to load dashboard configuration")?;
    let client_config = GreenPromptClientConfig::from_file_path(&args.config_path)
        .context("Failed to load client configuration")?;

    // Keep the guard alive so buffered file logs are flushed on exit
    let _file_guard =
        telemetry::setup_logging(&dashboard_config.logs_dir).context("Failed to setup logging")?;

    let client =
        GreenPromptClient::from_config(&client_config).context("Failed to build HTTP client")?;
    let dashboard = Arc::new(Dashboard::new(client, client_config.default_model.clone()));

    info!(
        target = "greenprompt",
        event = "greenprompt-start",
        base_url = %client_config.base_url,
        "Starting GreenPrompt dashboard"
    );

    match args.command {
        Command::Status => {
            dashboard.bootstrap().await;
            print_snapshot(&dashboard.snapshot().await, args.json)?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Send { prompt, model } => {
            dashboard.set_prompt(prompt).await;
            if let Some(model) = model {
                dashboard.set_model(model).await;
            }
            let view = dashboard.submit_now().await;
            print_submission(&view, args.json)
        }
        Command::Schedule {
            prompt,
            model,
            schedule,
        } => {
            dashboard.set_prompt(prompt).await;
            if let Some(model) = model {
                dashboard.set_model(model).await;
            }
            dashboard.set_schedule(schedule).await;
            let view = dashboard.submit_scheduled().await;
            let exit_code = print_submission(&view, args.json)?;
            if !view.is_failure() {
                let snapshot = dashboard.snapshot().await;
                if args.json {
                    println!("{}", serde_json::to_string_pretty(&snapshot.pending)?);
                } else {
                    print!("\n{}", snapshot.pending_section());
                }
            }
            Ok(exit_code)
        }
        Command::Watch => {
            watch_dashboard(dashboard, &dashboard_config, args.json).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn watch_dashboard(
    dashboard: Arc<Dashboard>,
    config: &GreenPromptDashboardConfig,
    json: bool,
) -> Result<()> {
    let (shutdown_sender, mut shutdown_receiver) = watch::channel(false);

    let polling_handle = spawn_with_shutdown(
        run_polling(
            Arc::clone(&dashboard),
            config.refresh_interval(),
            shutdown_receiver.clone(),
        ),
        shutdown_sender.clone(),
    );
    let render_handle = spawn_with_shutdown(
        run_render_loop(dashboard, shutdown_receiver.clone(), move |snapshot| {
            println!(
                "--- {} ---",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
            );
            if let Err(e) = print_snapshot(snapshot, json) {
                tracing::error!(
                    target = "greenprompt",
                    event = "render-failed",
                    error = %e,
                );
            }
        }),
        shutdown_sender.clone(),
    );

    let ctrl_c = tokio::task::spawn(async move {
        tokio::select! {
            result = tokio::signal::ctrl_c() => {
                info!(
                    target = "greenprompt",
                    event = "greenprompt-stop",
                    "ctrl-c received, sending shutdown signal"
                );
                shutdown_sender
                    .send(true)
                    .context("Failed to send shutdown signal")?;
                result.map_err(anyhow::Error::from)
            }
            _ = shutdown_receiver.changed() => {
                Ok(())
            }
        }
    });

    let (polling_result, render_result, ctrl_c_result) =
        try_join!(polling_handle, render_handle, ctrl_c)?;
    polling_result?;
    render_result?;
    ctrl_c_result
}

fn print_snapshot(snapshot: &DashboardSnapshot, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(snapshot)?);
    } else {
        println!("{snapshot}");
    }
    Ok(())
}

fn print_submission(view: &SubmissionView, json: bool) -> Result<ExitCode> {
    if json {
        println!("{}", serde_json::to_string_pretty(view)?);
    } else if view.is_failure() {
        eprintln!("{view}");
    } else {
        println!("{view}");
    }
    Ok(if view.is_failure() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
