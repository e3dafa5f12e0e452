use std::process::ExitCode;

use prbar::{Settings, parse_args, run};
use tracing::debug;

fn handle_clap_help_version(clap_err: &clap::Error) -> ! {
    use clap::error::ErrorKind;
    match clap_err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            print!("{clap_err}");
            std::process::exit(0);
        }
        _ => {
            eprint!("{clap_err}");
            std::process::exit(2);
        }
    }
}

fn init_tracing(settings: &Settings) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    // Anything on stderr outside debug mode ends up in the status bar.
    let filter = if settings.debug {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("prbar=debug"))
    } else {
        EnvFilter::new("off")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let settings = Settings::from_env();
    init_tracing(&settings);

    let request = match parse_args(std::env::args_os()) {
        Ok(request) => request,
        Err(err) => {
            if let Some(clap_err) = err.downcast_ref::<clap::Error>() {
                handle_clap_help_version(clap_err);
            } else {
                if settings.debug {
                    eprintln!("Error: {err:#}");
                }
                return ExitCode::FAILURE;
            }
        }
    };
    debug!(?request, ?settings, "starting refresh");

    let mut stdout = std::io::stdout();
    let mut stderr = std::io::stderr();
    run(&request, &settings, &mut stdout, &mut stderr).await.into()
}
