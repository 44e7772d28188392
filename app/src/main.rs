use std::{env, process};

use y_favicon::cli::{Action, USAGE, parse_args};
use y_favicon::report::ConsoleReporter;
use y_favicon::runner::{default_backend, run};
use y_favicon_core::config::{OsConfigProvider, save_settings_with, settings_path};

fn main() {
    // Configure via RUST_LOG, e.g., RUST_LOG=y_favicon_core=debug to trace font probing.
    // Logs go to stderr; stdout carries only the user-facing messages.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new("warn,y_favicon=info,y_favicon_core=info"))
        .unwrap_or_default();
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init();

    let opts = parse_args(env::args().skip(1)).unwrap_or_else(|err| {
        eprintln!("error: {err}");
        print_usage_and_exit(1);
    });

    if opts.action == Action::Help {
        print_usage_and_exit(0);
    }

    let cp = OsConfigProvider;
    let settings = opts.effective_settings(&cp);

    match opts.action {
        Action::Help => {}
        Action::PrintConfig => match serde_json::to_string_pretty(&settings) {
            Ok(json) => println!("{json}"),
            Err(e) => eprintln!("error: {e}"),
        },
        Action::InitConfig => match save_settings_with(&cp, &settings) {
            Ok(()) => println!("✓ Wrote {}", settings_path(&cp).display()),
            Err(e) => eprintln!("error: {e}"),
        },
        Action::Generate => {
            let _ = run(&settings, default_backend(), &ConsoleReporter);
        }
    }
}

fn print_usage_and_exit(code: i32) -> ! {
    eprintln!("{USAGE}");
    process::exit(code);
}
