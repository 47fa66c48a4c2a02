use crate::output::ColorChoice;
use clap::{ArgAction, ArgGroup, Parser};
use std::num::NonZeroUsize;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None, disable_help_flag = true)]
#[command(group(ArgGroup::new("hosts").required(true).args(["host_file", "host_string"])))]
pub struct Cli {
    /// file with list of hosts, one per line
    #[arg(short = 'h', long = "hosts-file", value_name = "FILE")]
    pub host_file: Option<PathBuf>,

    /// list of hosts separated by spaces
    #[arg(short = 'H', long = "hosts", value_name = "HOSTS")]
    pub host_string: Option<String>,

    /// command to execute
    #[arg(short = 'i', long, required_unless_present = "list_hosts")]
    pub command: Option<String>,

    /// specifies the user to log in as on the remote machine
    #[arg(short = 'l', long, value_name = "USER")]
    pub user: Option<String>,

    /// additional ssh options in quotes and separated by spaces
    #[arg(short = 'o', long = "options", value_name = "OPTIONS")]
    pub ssh_options: Option<String>,

    /// settings file in YAML format
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// remote execution program invoked as `PROGRAM host [args...]`
    #[arg(long, value_name = "PATH")]
    pub program: Option<String>,

    /// run at most N hosts at a time instead of all at once
    #[arg(short, long, value_name = "N")]
    pub workers: Option<NonZeroUsize>,

    /// when to colour the output
    #[arg(long, value_enum, value_name = "WHEN")]
    pub color: Option<ColorChoice>,

    /// outputs the list of hosts; does not execute anything else
    #[arg(long, action)]
    pub list_hosts: bool,

    /// Print help
    #[arg(long, action = ArgAction::Help)]
    help: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_short_flags() {
        let cli = Cli::try_parse_from([
            "sshfan",
            "-H",
            "a b c",
            "-i",
            "uptime",
            "-l",
            "root",
            "-o",
            "BatchMode=yes",
        ])
        .unwrap();

        assert_eq!(cli.host_string.as_deref(), Some("a b c"));
        assert_eq!(cli.command.as_deref(), Some("uptime"));
        assert_eq!(cli.user.as_deref(), Some("root"));
        assert_eq!(cli.ssh_options.as_deref(), Some("BatchMode=yes"));
        assert!(cli.workers.is_none());
    }

    #[test]
    fn test_short_h_is_host_file() {
        let cli = Cli::try_parse_from(["sshfan", "-h", "hosts.txt", "-i", "id"]).unwrap();
        assert_eq!(cli.host_file, Some(PathBuf::from("hosts.txt")));
    }

    #[test]
    fn test_hosts_required() {
        assert!(Cli::try_parse_from(["sshfan", "-i", "uptime"]).is_err());
    }

    #[test]
    fn test_host_sources_conflict() {
        let result = Cli::try_parse_from(["sshfan", "-h", "f", "-H", "a", "-i", "uptime"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_command_required_unless_listing() {
        assert!(Cli::try_parse_from(["sshfan", "-H", "a"]).is_err());
        assert!(Cli::try_parse_from(["sshfan", "-H", "a", "--list-hosts"]).is_ok());
    }

    #[test]
    fn test_zero_workers_rejected() {
        let result = Cli::try_parse_from(["sshfan", "-H", "a", "-i", "id", "-w", "0"]);
        assert!(result.is_err());
    }
}
