//! Command-line argument parsing for the peerlink CLI.

use crate::logging::Verbosity;

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    /// Show version information
    Version,
    /// Show usage
    Help,
    /// Create an account
    Register {
        username: String,
        email: String,
        password: String,
        bio: Option<String>,
    },
    /// Log in and print the profile
    Login { username: String, password: String },
    /// Log in, then search users
    Search {
        username: String,
        password: String,
        query: String,
    },
    /// Log in, then list followers and following
    Followers { username: String, password: String },
    /// Arguments could not be understood
    Invalid(String),
}

/// Everything parsed from the command line.
#[derive(Debug, Clone, PartialEq)]
pub struct Cli {
    pub verbosity: Verbosity,
    pub command: CliCommand,
}

pub const USAGE: &str = "\
Usage: peerlink [-v|-q] <command> [args]

Commands:
  register <username> <email> <password> [--bio <text>]
  login <username> <password>
  search <username> <password> <query>
  followers <username> <password>

Flags:
  -v, --verbose   debug logging
  -q, --quiet     errors only
  -V, --version   print version
  -h, --help      print this help

Environment:
  PEERLINK_API_URL       API base URL (default http://localhost:5000/api)
  PEERLINK_TIMEOUT_SECS  request timeout in seconds (default 10)
  PEERLINK_LOG           log filter directives";

/// Parse command-line arguments.
///
/// # Examples
///
/// ```
/// use peerlink::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["peerlink".to_string(), "--version".to_string()];
/// assert_eq!(parse_args(args.into_iter()).command, CliCommand::Version);
/// ```
pub fn parse_args<I>(args: I) -> Cli
where
    I: Iterator<Item = String>,
{
    let mut verbose = false;
    let mut quiet = false;
    let mut flag_command = None;
    let mut bio = None;
    let mut positional = Vec::new();

    // Skip the program name
    let mut args = args.skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-v" | "--verbose" => verbose = true,
            "-q" | "--quiet" => quiet = true,
            "--version" | "-V" => flag_command = flag_command.or(Some(CliCommand::Version)),
            "--help" | "-h" => flag_command = flag_command.or(Some(CliCommand::Help)),
            "--bio" => match args.next() {
                Some(text) => bio = Some(text),
                None => flag_command = Some(CliCommand::Invalid("--bio needs a value".into())),
            },
            _ => positional.push(arg),
        }
    }

    let verbosity = Verbosity::from_flags(verbose, quiet);
    let command = flag_command.unwrap_or_else(|| command_from(positional, bio));
    Cli { verbosity, command }
}

fn command_from(positional: Vec<String>, bio: Option<String>) -> CliCommand {
    let mut parts = positional.into_iter();
    let Some(name) = parts.next() else {
        return CliCommand::Help;
    };
    let rest: Vec<String> = parts.collect();

    match (name.as_str(), rest.as_slice()) {
        ("register", [username, email, password]) => CliCommand::Register {
            username: username.clone(),
            email: email.clone(),
            password: password.clone(),
            bio,
        },
        ("login", [username, password]) => CliCommand::Login {
            username: username.clone(),
            password: password.clone(),
        },
        ("search", [username, password, query @ ..]) if !query.is_empty() => CliCommand::Search {
            username: username.clone(),
            password: password.clone(),
            query: query.join(" "),
        },
        ("followers", [username, password]) => CliCommand::Followers {
            username: username.clone(),
            password: password.clone(),
        },
        ("register" | "login" | "search" | "followers", _) => {
            CliCommand::Invalid(format!("wrong number of arguments for '{}'", name))
        }
        _ => CliCommand::Invalid(format!("unknown command '{}'", name)),
    }
}
