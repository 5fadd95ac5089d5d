use argh::FromArgs;
use bangsh::config::{InputMode, ShellConfig, parse_depth};
use bangsh::history::DEFAULT_DEPTH;
use bangsh::{Console, Style};
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(FromArgs)]
/// A small interactive shell with `!!` / `!N` history expansion.
struct Args {
    #[argh(option, default = "DEFAULT_DEPTH", from_str_fn(parse_depth))]
    /// number of commands kept for `history` and `!N` (default 10)
    history_depth: usize,

    #[argh(switch)]
    /// write plain text without colours; also implied by NO_COLOR
    no_color: bool,

    #[argh(switch)]
    /// read input with plain reads even on a terminal
    plain: bool,

    #[argh(switch, short = 'v')]
    /// log debug events to stderr
    verbose: bool,
}

impl From<&Args> for ShellConfig {
    fn from(args: &Args) -> Self {
        let no_color_env = std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty());
        ShellConfig {
            history_depth: args.history_depth,
            color: !(args.no_color || no_color_env),
            input: if args.plain {
                InputMode::Plain
            } else {
                InputMode::Auto
            },
        }
    }
}

fn main() -> ExitCode {
    let args: Args = argh::from_env();

    // RUST_LOG wins; otherwise stay quiet unless --verbose.
    let default_level = if args.verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let config = ShellConfig::from(&args);
    match bangsh::run(config.clone()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::debug!(error = ?err, "fatal");
            let mut out = Console::new(std::io::stdout(), config.color);
            let _ = out.line(&format!("{err:#}"), Style::Error);
            ExitCode::from(255)
        }
    }
}
