use artifactory_inspection::inspection::domain::{
    InspectionStatus, RepoPath, RepositoryList, RepositoryType,
};
use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

/// Inspect and maintain the Black Duck properties of Artifactory items
#[derive(Parser, Debug)]
#[command(name = "bd-inspect")]
#[command(version)]
#[command(
    about = "Inspect and maintain the Black Duck inspection properties of Artifactory items",
    long_about = None
)]
pub struct Args {
    /// Path to a config file (defaults to ./bd-inspect.config.yml when present)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Use a local JSON property store instead of Artifactory
    #[arg(short, long, global = true, value_name = "FILE")]
    pub store: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show the inspection state of an item
    Status {
        /// Item as <repository-key>/<path>
        repo_path: RepoPath,
    },

    /// Overwrite the inspection status, message and retry count of an item
    SetStatus {
        repo_path: RepoPath,

        /// PENDING, SUCCESS or FAILURE
        status: InspectionStatus,

        /// Status message; omitting it removes the stored message
        #[arg(short, long)]
        message: Option<String>,

        /// Retry count; omitting it removes the stored count
        #[arg(short, long)]
        retry_count: Option<u32>,
    },

    /// Record a failed inspection, bounded by the maximum retry count
    Fail {
        repo_path: RepoPath,

        #[arg(short, long)]
        message: Option<String>,
    },

    /// Exit with 0 if the item should be inspected again, 1 otherwise
    ShouldRetry { repo_path: RepoPath },

    /// List the items of a repository that carry an inspection status
    List {
        repo_key: String,

        /// Only list items with this status
        #[arg(long)]
        status: Option<InspectionStatus>,
    },

    /// Remove Black Duck properties from an item or a whole repository
    Clean {
        /// A repository key sweeps the repository, a full path cleans a single item
        target: RepoPath,

        /// Property key to keep, can be specified multiple times
        #[arg(short, long = "keep", value_name = "PROPERTY")]
        keep: Vec<String>,
    },

    /// Maintain the repository lists the plugin inspects or scans
    AllowList {
        #[command(subcommand)]
        action: AllowListAction,
    },

    /// Check that an item's properties match an inspection outcome
    Verify {
        repo_path: RepoPath,

        /// Expected inspection status
        #[arg(short, long, default_value = "SUCCESS")]
        expect: InspectionStatus,
    },

    /// Poll an item until it reaches an inspection status
    Wait {
        repo_path: RepoPath,

        #[arg(short, long, default_value = "SUCCESS")]
        expect: InspectionStatus,

        /// Number of polls before giving up
        #[arg(short, long, default_value_t = 5)]
        attempts: u32,

        /// Seconds between polls
        #[arg(short, long, default_value_t = 60)]
        interval: u64,
    },
}

#[derive(Subcommand, Debug)]
pub enum AllowListAction {
    /// Add a repository to a list
    Add(AllowListChange),

    /// Remove a repository from a list
    Remove(AllowListChange),

    /// Print the members of a list
    Show {
        #[command(flatten)]
        target: AllowListTarget,
    },
}

#[derive(ClapArgs, Debug)]
pub struct AllowListTarget {
    /// Item holding the plugin configuration properties
    #[arg(long, value_name = "REPO_PATH")]
    pub config_item: RepoPath,

    /// inspection or scan
    #[arg(short, long, default_value = "inspection")]
    pub list: RepositoryList,
}

#[derive(ClapArgs, Debug)]
pub struct AllowListChange {
    #[command(flatten)]
    pub target: AllowListTarget,

    /// Repository key
    pub repo_key: String,

    /// local, remote or virtual; remote repositories are listed by their -cache key
    #[arg(short = 't', long = "type", default_value = "local")]
    pub repository_type: RepositoryType,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_set_status() {
        let args = Args::try_parse_from([
            "bd-inspect",
            "set-status",
            "npm-local/a.tgz",
            "failure",
            "--message",
            "boom",
            "--retry-count",
            "2",
        ])
        .unwrap();

        match args.command {
            Command::SetStatus {
                repo_path,
                status,
                message,
                retry_count,
            } => {
                assert_eq!(repo_path.to_path(), "npm-local/a.tgz");
                assert_eq!(status, InspectionStatus::Failure);
                assert_eq!(message.as_deref(), Some("boom"));
                assert_eq!(retry_count, Some(2));
            }
            other => panic!("Unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_global_options_after_subcommand() {
        let args = Args::try_parse_from([
            "bd-inspect",
            "status",
            "npm-local/a.tgz",
            "--store",
            "props.json",
            "-v",
        ])
        .unwrap();

        assert_eq!(args.store, Some(PathBuf::from("props.json")));
        assert!(args.verbose);
    }

    #[test]
    fn test_parse_allow_list_add() {
        let args = Args::try_parse_from([
            "bd-inspect",
            "allow-list",
            "add",
            "pypi-remote",
            "--config-item",
            "plugin-config/blackDuckPlugin.properties",
            "--list",
            "scan",
            "--type",
            "remote",
        ])
        .unwrap();

        match args.command {
            Command::AllowList {
                action: AllowListAction::Add(change),
            } => {
                assert_eq!(change.repo_key, "pypi-remote");
                assert_eq!(change.target.list, RepositoryList::Scan);
                assert_eq!(change.repository_type, RepositoryType::Remote);
            }
            other => panic!("Unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_wait_defaults() {
        let args = Args::try_parse_from(["bd-inspect", "wait", "npm-local/a.tgz"]).unwrap();
        match args.command {
            Command::Wait {
                expect,
                attempts,
                interval,
                ..
            } => {
                assert_eq!(expect, InspectionStatus::Success);
                assert_eq!(attempts, 5);
                assert_eq!(interval, 60);
            }
            other => panic!("Unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_invalid_status_rejected() {
        let result = Args::try_parse_from(["bd-inspect", "set-status", "npm-local/a.tgz", "DONE"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_repo_path_rejected() {
        let result = Args::try_parse_from(["bd-inspect", "status", "bad key/a.tgz"]);
        assert!(result.is_err());
    }
}
