use anyhow::Result;
use clap::{Parser, builder::NonEmptyStringValueParser};

use crate::types::StatusRequest;

const BUILD_INFO_HUMAN: &str = env!("BUILD_INFO_HUMAN");

#[derive(Parser, Debug)]
#[command(
    name = "prbar",
    about = "Show the CI status of your recently updated GitHub pull requests in a status bar"
)]
#[command(long_version = BUILD_INFO_HUMAN)]
struct CliArgs {
    /// GitHub login whose open pull requests are shown
    #[arg(
        short = 'u',
        long,
        value_name = "LOGIN",
        value_parser = NonEmptyStringValueParser::new()
    )]
    pub user: String,

    /// GitHub token sent as a bearer credential
    #[arg(
        short = 't',
        long,
        value_name = "TOKEN",
        value_parser = NonEmptyStringValueParser::new()
    )]
    pub token: String,
}

impl From<CliArgs> for StatusRequest {
    fn from(cli: CliArgs) -> Self {
        StatusRequest {
            user: cli.user,
            token: cli.token,
        }
    }
}

/// Parses command-line arguments into a status request.
///
/// Help, version and usage problems surface as a `clap::Error` inside the
/// returned `anyhow::Error`, so callers can downcast and let clap print
/// them.
pub fn parse_args<I, T>(args: I) -> Result<StatusRequest>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = CliArgs::try_parse_from(args)?;
    Ok(cli.into())
}
