//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod build;
mod health;

use anyhow::Result;
use clap::Subcommand;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Submit a manual build
    Build {
        /// Repository URL to clone
        #[arg(long)]
        repo_url: String,

        /// Short repository name, used as the image name
        #[arg(long)]
        repo_name: String,

        /// Commit to build
        #[arg(long, conflicts_with = "branch", required_unless_present = "branch")]
        commit: Option<String>,

        /// Branch to build when no commit is given (image is tagged `latest`)
        #[arg(long)]
        branch: Option<String>,
    },
    /// Check that the service is reachable
    Health,
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Build {
            repo_url,
            repo_name,
            commit,
            branch,
        } => build::submit_build(config, repo_url, repo_name, commit, branch).await,
        Commands::Health => health::check_health(config).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(subcommand)]
        command: Commands,
    }

    #[test]
    fn test_build_with_commit() {
        let cli = TestCli::try_parse_from([
            "herald",
            "build",
            "--repo-url",
            "https://git.example/org/app",
            "--repo-name",
            "app",
            "--commit",
            "abcdef1234567",
        ])
        .unwrap();

        match cli.command {
            Commands::Build { commit, branch, .. } => {
                assert_eq!(commit.as_deref(), Some("abcdef1234567"));
                assert!(branch.is_none());
            }
            Commands::Health => panic!("expected build"),
        }
    }

    #[test]
    fn test_build_requires_a_revision() {
        let result = TestCli::try_parse_from([
            "herald",
            "build",
            "--repo-url",
            "https://git.example/org/app",
            "--repo-name",
            "app",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_build_rejects_commit_and_branch() {
        let result = TestCli::try_parse_from([
            "herald",
            "build",
            "--repo-url",
            "u",
            "--repo-name",
            "app",
            "--commit",
            "abc",
            "--branch",
            "main",
        ]);
        assert!(result.is_err());
    }
}
