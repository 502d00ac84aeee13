use clap::Parser;
use gbce::cli::{Cli, run};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::Builder;

/// `RUST_LOG` directives, falling back to `warn` when none are given.
fn log_filter() -> Builder {
    EnvFilter::builder().with_default_directive(LevelFilter::WARN.into())
}

fn main() -> std::process::ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter().from_env_lossy())
        .with_writer(std::io::stderr)
        .init();

    run(Cli::parse())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filter_is_warn() {
        assert_eq!(log_filter().parse_lossy("").to_string(), "warn");
    }

    #[test]
    fn directives_replace_the_default() {
        assert_eq!(log_filter().parse_lossy("gbce=debug").to_string(), "gbce=debug");
    }
}
