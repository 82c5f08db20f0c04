use std::{io::BufRead, path::PathBuf, sync::Arc};

mod config;
mod controller;
mod form;
mod routes;
mod ui;

use anyhow::{bail, Context, Result};
use clap::Parser;
use client_core::{AuthStore, HttpAuthService};
use controller::{RegistrationController, SubmitOutcome, ToastSeverity, UiEvent};
use form::Field;
use tracing_subscriber::EnvFilter;

const UI_EVENT_QUEUE_CAPACITY: usize = 64;

#[derive(Parser, Debug)]
#[command(name = "signup", about = "Create an account against an auth service")]
struct Args {
    /// Config file; missing files are ignored.
    #[arg(long, default_value = "signup.toml")]
    config: PathBuf,
    #[arg(long)]
    auth_base_url: Option<String>,
    #[arg(long)]
    name: String,
    #[arg(long)]
    email: String,
    /// Also read from `SIGNUP_PASSWORD`. Command-line values are visible to
    /// other local users, so prefer the variable or `--password-stdin`.
    #[arg(
        long,
        env = "SIGNUP_PASSWORD",
        hide_env_values = true,
        required_unless_present = "password_stdin"
    )]
    password: Option<String>,
    #[arg(
        long,
        env = "SIGNUP_CONFIRM_PASSWORD",
        hide_env_values = true,
        required_unless_present = "password_stdin"
    )]
    confirm_password: Option<String>,
    /// Read the password and its confirmation as the first two lines of stdin.
    #[arg(long)]
    password_stdin: bool,
    #[arg(long)]
    accept_terms: bool,
    #[arg(long)]
    marketing_consent: bool,
    /// Print passwords in the rendered form instead of masking them.
    #[arg(long)]
    show_passwords: bool,
}

/// Returns the password and its confirmation, one per line.
fn read_password_lines(reader: impl BufRead) -> Result<(String, String)> {
    let mut lines = reader.lines();
    let mut next_line = |what: &str| -> Result<String> {
        let line = lines
            .next()
            .with_context(|| format!("stdin ended before the {what}"))?
            .context("failed to read stdin")?;
        Ok(line.trim_end_matches('\r').to_string())
    };
    let password = next_line("password")?;
    let confirm_password = next_line("password confirmation")?;
    Ok((password, confirm_password))
}

#[tokio::main]
async fn main() -> Result<()> {
    let mut args = Args::parse();

    let mut settings = config::load_settings(&args.config)?;
    if let Some(url) = &args.auth_base_url {
        settings.auth_base_url = config::normalize_base_url(url);
    }

    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&settings.log_filter)
            .with_context(|| format!("invalid log filter '{}'", settings.log_filter))?,
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let service = HttpAuthService::with_timeout(&settings.auth_base_url, settings.request_timeout())
        .context("failed to build auth service client")?;
    tracing::info!(auth_base_url = %service.base_url(), "signup starting");

    let (password, confirm_password) = if args.password_stdin {
        read_password_lines(std::io::stdin().lock())?
    } else {
        (
            args.password
                .take()
                .context("--password or SIGNUP_PASSWORD is required")?,
            args.confirm_password
                .take()
                .context("--confirm-password or SIGNUP_CONFIRM_PASSWORD is required")?,
        )
    };

    let store = AuthStore::new(Arc::new(service));
    let (ui_tx, ui_rx) = crossbeam_channel::bounded(UI_EVENT_QUEUE_CAPACITY);
    let mut controller = RegistrationController::new(store, ui_tx);

    controller.edit(Field::Name, args.name);
    controller.edit(Field::Email, args.email);
    controller.edit(Field::Password, password);
    controller.edit(Field::ConfirmPassword, confirm_password);
    controller.set_accept_terms(args.accept_terms);
    controller.set_marketing_consent(args.marketing_consent);
    if args.show_passwords {
        controller.toggle_visibility(Field::Password);
        controller.toggle_visibility(Field::ConfirmPassword);
    }

    tracing::debug!(
        password_score = controller.form().strength().score,
        "registration form filled"
    );

    println!("{}\n", controller.render());

    let outcome = controller.submit().await;
    tracing::debug!(phase = ?controller.phase(), "submission finished");

    for event in ui_rx.try_iter() {
        match event {
            UiEvent::Toast(toast) => {
                let tag = match toast.severity {
                    ToastSeverity::Success => "ok",
                    ToastSeverity::Info => "info",
                    ToastSeverity::Error => "error",
                };
                println!("[{tag}] {}", toast.message);
            }
            UiEvent::Navigate(route) => println!("-> {route}"),
        }
    }

    match outcome {
        SubmitOutcome::Registered(_) => Ok(()),
        SubmitOutcome::Busy => bail!("a registration is already in progress"),
        SubmitOutcome::AlreadyRegistered => bail!("this form already created an account"),
        SubmitOutcome::Rejected(_) | SubmitOutcome::Failed(_) => {
            println!("\n{}", controller.render());
            bail!("registration did not complete")
        }
    }
}
