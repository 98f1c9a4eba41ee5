use clap::Parser;
use std::io::IsTerminal;
use std::process::ExitCode;

mod cmd;
mod domain;
mod utils;

use cmd::{Route, RunOptions};
use domain::{ConfigManager, Registry};

/// Craft CLI - domain-specific tool orchestration
///
/// Invocation shape:
///   craft [--version|-v]
///   craft [--help] [--noob]
///   craft --domains [--noob]
///   craft <domain> [--noob]
///   craft <domain> <tool> [--help|-h] [--noob]
///   craft <domain> <tool> [args...] [--noob]
///
/// Notes:
///   - The grammar is position sensitive (help in third position shows tool
///     help; anything after the tool id is passed to the tool verbatim), so
///     clap captures the whole argument vector and the dispatcher in
///     `cmd::route` does the actual routing.
///   - `--noob` anywhere switches to the decorated human interface; default
///     output is plain and machine parseable.
///
/// Config / env:
///   ~/.config/craft/craftrc   user-level configuration
///   ./.craftrc                project-level configuration (wins on merge)
///   CRAFT_TEST                suppresses the interactive first-run prompt
///   NO_COLOR / NO_EMOJI       tone down decorated output
#[derive(Parser, Debug)]
#[command(
    name = "craft",
    about = "Craft CLI - domain-specific tool orchestration",
    disable_help_flag = true,
    disable_version_flag = true,
    disable_help_subcommand = true
)]
pub struct Cli {
    /// Raw invocation words, routed by the dispatcher grammar.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    args: Vec<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let code = dispatch(&cli.args);
    ExitCode::from(u8::try_from(code).unwrap_or(1))
}

fn dispatch(argv: &[String]) -> i32 {
    let inv = cmd::route(argv);

    // Version short-circuits before config loading.
    if inv.route == Route::Version {
        cmd::execute_version();
        return 0;
    }

    let manager = ConfigManager::discover();
    let options = manager.config().options.clone();
    utils::init_logging(utils::derive_level(options.verbose_execution));

    let human_mode = inv.human_mode || options.default_human_mode;

    offer_example_config(&manager);

    let registry = Registry::new(manager.domain_paths());
    if options.show_startup_checklist {
        report_conflicts(&registry);
    }

    match inv.route {
        Route::Version => unreachable!("handled above"),
        Route::Help => {
            cmd::execute_help(human_mode);
            0
        }
        Route::Domains => cmd::execute_domains(&registry, human_mode),
        Route::DomainTools { domain } => cmd::execute_tools(&registry, &domain, human_mode),
        Route::ToolHelp { domain, tool } => {
            cmd::execute_tool_help(&registry, &domain, &tool, human_mode)
        }
        Route::Run { domain, tool, args } => cmd::execute_run(
            &registry,
            &domain,
            &tool,
            &args,
            &RunOptions {
                human_mode,
                verbose: options.verbose_execution,
            },
        ),
    }
}

/// Shadowed domains are advisory: warn, never fail.
fn report_conflicts(registry: &Registry) {
    for (id, sources) in registry.check_conflicts() {
        let listed: Vec<String> = sources.iter().map(|p| p.display().to_string()).collect();
        crate::log_warn!(
            "domain '{id}' found in multiple paths: {} (using {})",
            listed.join(", "),
            listed[0]
        );
    }
}

/// One-time interactive offer to write an example user config. Skipped for
/// non-interactive stdin and under the test harness marker.
fn offer_example_config(manager: &ConfigManager) {
    if !manager.no_config_found()
        || std::env::var_os("CRAFT_TEST").is_some()
        || !std::io::stdin().is_terminal()
    {
        return;
    }
    eprint!(
        "No craft configuration found. Create an example config at {}? [y/N] ",
        manager.user_config_path().display()
    );
    let mut answer = String::new();
    if std::io::stdin().read_line(&mut answer).is_err() {
        return;
    }
    if matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes") {
        match manager.write_example_user_config() {
            Ok(()) => eprintln!("Created {}", manager.user_config_path().display()),
            Err(e) => crate::log_warn!("could not create example config: {e:#}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clap_passes_flags_through_to_the_dispatcher() {
        let cli = Cli::try_parse_from(["craft", "linting", "ruff", "--fix", "-x"]).unwrap();
        assert_eq!(cli.args, vec!["linting", "ruff", "--fix", "-x"]);

        let cli = Cli::try_parse_from(["craft", "--help", "--noob"]).unwrap();
        assert_eq!(cli.args, vec!["--help", "--noob"]);

        let cli = Cli::try_parse_from(["craft", "--version"]).unwrap();
        assert_eq!(cli.args, vec!["--version"]);
    }

    #[test]
    fn clap_accepts_empty_invocations() {
        let cli = Cli::try_parse_from(["craft"]).unwrap();
        assert!(cli.args.is_empty());
    }
}
