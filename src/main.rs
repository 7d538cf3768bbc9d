mod cli;

use artifactory_inspection::adapters::outbound::{
    ArtifactoryPropertyStore, JsonFilePropertyStore, StderrProgressReporter,
};
use artifactory_inspection::config::{discover_config, load_config_from_path, ConfigFile};
use artifactory_inspection::inspection::domain::{
    BlackDuckProperty, InspectionStatus, RepoPath, Repository,
};
use artifactory_inspection::inspection::services::{
    InspectionPropertyService, InspectionVerifier, PropertyService, RepositoryAllowList,
};
use artifactory_inspection::ports::outbound::{ProgressReporter, PropertyStore};
use artifactory_inspection::shared::error::{ExitCode, PropertyError};
use artifactory_inspection::shared::Result;
use cli::{AllowListAction, Args, Command};
use owo_colors::OwoColorize;
use std::io::IsTerminal;
use std::process;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

fn main() {
    let args = Args::parse_args();
    init_tracing(args.verbose);

    match run(args) {
        Ok(exit_code) => process::exit(exit_code.as_i32()),
        Err(e) => {
            eprintln!("\n❌ An error occurred:\n");
            eprintln!("{}", e);

            // Display error chain
            let mut source = e.source();
            while let Some(err) = source {
                eprintln!("\nCaused by: {}", err);
                source = err.source();
            }

            eprintln!();
            process::exit(exit_code_for(&e).as_i32());
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(args: Args) -> Result<ExitCode> {
    let config = load_config(&args)?;
    let store = open_store(&args, &config)?;
    let progress_reporter = StderrProgressReporter::new();

    // Create services (Dependency Injection)
    let property_service = PropertyService::new(store.as_ref(), config.date_time_manager()?);
    let inspection = InspectionPropertyService::new(property_service, config.max_retry_count());

    match args.command {
        Command::Status { repo_path } => {
            let report = StatusReport {
                status: inspection.get_inspection_status(&repo_path)?,
                retry_count: inspection.get_retry_count(&repo_path)?,
                message: inspection.get_inspection_status_message(&repo_path)?,
                last_inspection: inspection
                    .property_service()
                    .get_property(&repo_path, BlackDuckProperty::LastInspection)?,
            };
            print!("{}", report.render(&repo_path, std::io::stdout().is_terminal()));
            Ok(ExitCode::Success)
        }
        Command::SetStatus {
            repo_path,
            status,
            message,
            retry_count,
        } => {
            inspection.set_inspection_status(&repo_path, status, message.as_deref(), retry_count)?;
            progress_reporter.report_completion(&format!("✅ {} is now {}", repo_path, status));
            Ok(ExitCode::Success)
        }
        Command::Fail { repo_path, message } => {
            inspection.fail_inspection(&repo_path, message.as_deref())?;
            let retry_count = inspection.get_retry_count(&repo_path)?.unwrap_or(0);
            progress_reporter.report_completion(&format!(
                "📝 {} failed {} of {} allowed times",
                repo_path,
                retry_count,
                inspection.max_retry_count()
            ));
            Ok(ExitCode::Success)
        }
        Command::ShouldRetry { repo_path } => {
            let retry = inspection.should_retry_inspection(&repo_path)?;
            println!("{}", retry);
            Ok(if retry {
                ExitCode::Success
            } else {
                ExitCode::ConditionNotMet
            })
        }
        Command::List { repo_key, status } => {
            let items = match status {
                Some(status) => inspection
                    .get_all_artifacts_in_repo_with_inspection_status(&repo_key, status)?,
                None => inspection.property_service().get_items_containing_properties(
                    &repo_key,
                    &[BlackDuckProperty::InspectionStatus],
                )?,
            };
            for item in items {
                println!("{}", item);
            }
            Ok(ExitCode::Success)
        }
        Command::Clean { target, keep } => {
            for key in &keep {
                if BlackDuckProperty::from_property_name(key).is_none() {
                    tracing::warn!("'{}' is not a Black Duck property and is never removed", key);
                }
            }

            let props = inspection.property_service();
            if target.is_root() {
                progress_reporter.report(&format!(
                    "🧹 Removing Black Duck properties from repository {}...",
                    target.repo_key()
                ));
                let swept =
                    props.delete_all_blackduck_properties_from_repo(target.repo_key(), &keep)?;
                progress_reporter.report_completion(&format!("✅ Cleaned {} item(s)", swept));
            } else {
                props.delete_all_blackduck_properties_from_repo_path(&target, &keep)?;
                progress_reporter.report_completion(&format!("✅ Cleaned {}", target));
            }
            Ok(ExitCode::Success)
        }
        Command::AllowList { action } => {
            let allow_list = RepositoryAllowList::new(store.as_ref());
            let repositories = match action {
                AllowListAction::Add(change) => allow_list.modify_list(
                    &change.target.config_item,
                    change.target.list,
                    &Repository::new(change.repo_key, change.repository_type),
                    true,
                )?,
                AllowListAction::Remove(change) => allow_list.modify_list(
                    &change.target.config_item,
                    change.target.list,
                    &Repository::new(change.repo_key, change.repository_type),
                    false,
                )?,
                AllowListAction::Show { target } => {
                    allow_list.repositories(&target.config_item, target.list)?
                }
            };
            for key in repositories {
                println!("{}", key);
            }
            Ok(ExitCode::Success)
        }
        Command::Verify { repo_path, expect } => {
            let verifier = InspectionVerifier::new(&inspection, &progress_reporter);
            let violations = verifier.verify(&repo_path, expect)?;
            if violations.is_empty() {
                println!("{} matches {}", repo_path, expect);
                return Ok(ExitCode::Success);
            }

            println!("{} does not match {}:", repo_path, expect);
            for violation in violations {
                println!("  - {}", violation);
            }
            Ok(ExitCode::ConditionNotMet)
        }
        Command::Wait {
            repo_path,
            expect,
            attempts,
            interval,
        } => {
            let verifier = InspectionVerifier::new(&inspection, &progress_reporter);
            verifier.wait_for_inspection(
                &repo_path,
                expect,
                attempts,
                Duration::from_secs(interval),
            )?;
            Ok(ExitCode::Success)
        }
    }
}

fn load_config(args: &Args) -> Result<ConfigFile> {
    let mut config = match &args.config {
        Some(path) => load_config_from_path(path)?,
        None => discover_config(&std::env::current_dir()?)?.unwrap_or_default(),
    };
    config.apply_env_overrides();
    Ok(config)
}

fn open_store(args: &Args, config: &ConfigFile) -> Result<Box<dyn PropertyStore>> {
    if let Some(path) = &args.store {
        return Ok(Box::new(JsonFilePropertyStore::open(path)?));
    }

    match config.artifactory_url() {
        Some(url) => Ok(Box::new(ArtifactoryPropertyStore::new(
            url,
            config.artifactory_credentials(),
        )?)),
        None => Err(PropertyError::Validation {
            message: "No property store configured.\n\n💡 Hint: Pass --store <file> or set artifactory.url (or ARTIFACTORY_BASEURL)".to_string(),
        }
        .into()),
    }
}

fn exit_code_for(error: &anyhow::Error) -> ExitCode {
    match error.downcast_ref::<PropertyError>() {
        Some(PropertyError::Validation { .. }) | Some(PropertyError::InvalidRepoPath { .. }) => {
            ExitCode::InvalidArguments
        }
        Some(PropertyError::InspectionFailed { .. })
        | Some(PropertyError::InspectionTimedOut { .. }) => ExitCode::ConditionNotMet,
        _ => ExitCode::ApplicationError,
    }
}

/// Inspection state of one item as printed by `status`
struct StatusReport {
    status: Option<InspectionStatus>,
    retry_count: Option<i64>,
    message: Option<String>,
    last_inspection: Option<String>,
}

impl StatusReport {
    fn render(&self, repo_path: &RepoPath, colored: bool) -> String {
        let status = match self.status {
            Some(status) => status.to_string(),
            None => "NOT INSPECTED".to_string(),
        };
        let status = if !colored {
            status
        } else {
            match self.status {
                Some(InspectionStatus::Success) => status.green().to_string(),
                Some(InspectionStatus::Failure) => status.red().to_string(),
                Some(InspectionStatus::Pending) => status.yellow().to_string(),
                None => status.dimmed().to_string(),
            }
        };

        let mut out = format!("{}\n  status:          {}\n", repo_path, status);
        if let Some(retry_count) = self.retry_count {
            out.push_str(&format!("  retry count:     {}\n", retry_count));
        }
        if let Some(message) = &self.message {
            out.push_str(&format!("  message:         {}\n", message));
        }
        if let Some(last_inspection) = &self.last_inspection {
            out.push_str(&format!("  last inspection: {}\n", last_inspection));
        }
        out
    }
}
