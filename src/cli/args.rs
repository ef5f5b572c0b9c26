//! Command-line argument parsing for the erpsync CLI.

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    /// Show version information
    Version,
    /// Authenticated GET of an API path
    Get(String),
    /// Sign in as the given email
    Login(String),
    /// Clear the stored session
    Logout,
    /// Print usage (also for unknown or incomplete input)
    Help,
}

/// Usage text printed for `--help` and bad input.
pub const USAGE: &str = "\
Usage: erpsync <command>

Commands:
  get <path>       GET an API path with the stored session and print the body
  login <email>    Sign in (password from ERPSYNC_PASSWORD, or prompted)
  logout           Clear the stored session
  --version, -V    Print the version";

/// Parse command-line arguments and return the appropriate command.
///
/// # Arguments
///
/// * `args` - Iterator of command-line arguments (typically `std::env::args()`)
///
/// # Examples
///
/// ```
/// use erpsync::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["erpsync".to_string(), "get".to_string(), "/orders".to_string()];
/// assert_eq!(parse_args(args.into_iter()), CliCommand::Get("/orders".to_string()));
/// ```
pub fn parse_args<I>(args: I) -> CliCommand
where
    I: Iterator<Item = String>,
{
    // Skip the program name
    let mut args = args.skip(1);
    let Some(first) = args.next() else {
        return CliCommand::Help;
    };

    match first.as_str() {
        "--version" | "-V" => CliCommand::Version,
        "get" => args.next().map(CliCommand::Get).unwrap_or(CliCommand::Help),
        "login" => args.next().map(CliCommand::Login).unwrap_or(CliCommand::Help),
        "logout" => CliCommand::Logout,
        _ => CliCommand::Help,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliCommand {
        parse_args(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_parse_version_flag() {
        assert_eq!(parse(&["erpsync", "--version"]), CliCommand::Version);
        assert_eq!(parse(&["erpsync", "-V"]), CliCommand::Version);
    }

    #[test]
    fn test_parse_get() {
        assert_eq!(
            parse(&["erpsync", "get", "/orders?status=open"]),
            CliCommand::Get("/orders?status=open".to_string())
        );
    }

    #[test]
    fn test_parse_get_without_path() {
        assert_eq!(parse(&["erpsync", "get"]), CliCommand::Help);
    }

    #[test]
    fn test_parse_login() {
        assert_eq!(
            parse(&["erpsync", "login", "ops@acme.test"]),
            CliCommand::Login("ops@acme.test".to_string())
        );
    }

    #[test]
    fn test_parse_logout() {
        assert_eq!(parse(&["erpsync", "logout"]), CliCommand::Logout);
    }

    #[test]
    fn test_parse_no_args() {
        assert_eq!(parse(&["erpsync"]), CliCommand::Help);
    }

    #[test]
    fn test_parse_unknown_command() {
        assert_eq!(parse(&["erpsync", "--unknown"]), CliCommand::Help);
    }
}
