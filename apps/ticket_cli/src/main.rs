use std::{path::PathBuf, process::ExitCode};

use anyhow::Result;
use clap::Parser;
use form_core::{load_avatar, load_settings, AvatarCompletion, FormState, FsAvatarSource};
use rand::{rngs::StdRng, Rng, SeedableRng};
use shared::{domain::FieldKind, summary::SubmissionReport};
use tracing_subscriber::EnvFilter;

/// Runs one submission without a window and prints the outcome as JSON.
#[derive(Parser, Debug)]
#[command(name = "ticket_cli")]
struct Args {
    #[arg(long, default_value = "")]
    full_name: String,
    #[arg(long, default_value = "")]
    email: String,
    #[arg(long, default_value = "")]
    github: String,
    /// JPG or PNG file, at most 500KB
    #[arg(long)]
    avatar: Option<PathBuf>,
    /// Fixes the ticket number for reproducible output
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    event_name: Option<String>,
    #[arg(long)]
    event_date: Option<String>,
    #[arg(long)]
    event_location: Option<String>,
}

struct Submission {
    full_name: String,
    email: String,
    github: String,
    avatar: Option<PathBuf>,
}

/// A rejected avatar stops the flow the same way the window's alert does.
async fn run_submission<R: Rng + ?Sized>(
    form: &mut FormState,
    submission: Submission,
    rng: &mut R,
) -> SubmissionReport {
    form.set_value(FieldKind::FullName, submission.full_name);
    form.set_value(FieldKind::Email, submission.email);
    form.set_value(FieldKind::GithubUsername, submission.github);

    if let Some(path) = submission.avatar {
        if let Some(selection) = form.begin_avatar_selection() {
            let result = load_avatar(&FsAvatarSource::new(path)).await;
            if let AvatarCompletion::Rejected(alert) =
                form.complete_avatar_selection(selection, result)
            {
                return SubmissionReport::Alert(alert);
            }
        }
    }

    form.submit(rng);
    form.report()
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();
    let mut settings = load_settings(args.config.as_deref())?;
    settings.apply_event_flags(args.event_name, args.event_date, args.event_location);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let mut form = FormState::new(settings.event());
    let report = run_submission(
        &mut form,
        Submission {
            full_name: args.full_name,
            email: args.email,
            github: args.github,
            avatar: args.avatar,
        },
        &mut rng,
    )
    .await;

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(if report.is_issued() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(2)
    })
}
