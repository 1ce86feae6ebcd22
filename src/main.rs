use anyhow::{Context, Result};
use term_launch::cli;
use term_launch::options::{LaunchEnvironment, ParseContext, parse, restore_session};
use term_launch::profile::storage::{load_profiles, load_profiles_from};
use term_launch_config::Config;

fn main() -> Result<()> {
    // Process CLI arguments first (before logging init for cleaner output)
    let run = match cli::process_cli() {
        cli::CliResult::Exit(code) => {
            if code == 0 {
                return Ok(());
            }
            std::process::exit(code);
        }
        cli::CliResult::Continue(run) => run,
    };
    // CLI --log-level takes precedence, then RUST_LOG, then config (applied below).
    term_launch::debug::init_log_bridge(run.log_level);

    let config = match &run.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Config::load()?,
    };
    term_launch::debug::apply_config_level(config.log_level.to_level_filter());

    let profiles = match &run.profiles {
        Some(path) => load_profiles_from(path)?,
        None => load_profiles(&config)?,
    };
    log::debug!("Loaded {} profile(s)", profiles.len());

    let env = LaunchEnvironment::from_process();
    let ctx = ParseContext::new(&env, &profiles, &config);
    let result = match &run.restore {
        Some(path) => restore_session(path, &ctx),
        None => parse(&run.terminal_args, &ctx),
    };

    let options = match result {
        Ok(options) => options,
        Err(e) => {
            eprintln!("term-launch: error: {e}");
            std::process::exit(1);
        }
    };

    if options.show_version {
        println!("term-launch {}", term_launch::VERSION);
        return Ok(());
    }

    print!("{}", cli::render(&options, run.format)?);
    Ok(())
}
