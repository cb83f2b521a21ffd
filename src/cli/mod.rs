pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "threat-feed")]
#[command(about = "Announce new security advisories without repeats", long_about = None)]
pub struct Cli {
    /// Configuration file (default: ~/.config/threat-feed/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Fingerprint store file, overriding the configured path
    #[arg(short, long, global = true)]
    pub store: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch sources and print any new announcements
    Run {
        /// Source aliases to run (default: all sources)
        aliases: Vec<String>,

        /// Gate against a snapshot of the store without recording anything
        #[arg(long)]
        dry_run: bool,
    },
    /// List the known source aliases
    Sources,
    /// Rebuild the store from an archive of previously posted announcements
    Recon {
        /// Text file containing past posts with their post_id annotations
        path: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_run_with_aliases() {
        let cli =
            Cli::try_parse_from(["threat-feed", "--store", "/tmp/p.db", "run", "cisa", "tp"])
                .unwrap();

        assert_eq!(cli.store, Some(PathBuf::from("/tmp/p.db")));
        match cli.command {
            Commands::Run { aliases, dry_run } => {
                assert_eq!(aliases, vec!["cisa", "tp"]);
                assert!(!dry_run);
            }
            _ => panic!("expected run"),
        }
    }

    #[test]
    fn test_parse_recon() {
        let cli = Cli::try_parse_from(["threat-feed", "recon", "posts.txt"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Recon { path } if path == PathBuf::from("posts.txt")
        ));
    }
}
