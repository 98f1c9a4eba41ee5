/*!
Command dispatcher module.

One source file per view, plus the shared routing and formatting helpers:

  src/cmd/
    mod.rs        (this file: declarations + re-exports)
    route.rs      (position-sensitive invocation grammar)
    help.rs       (general help + version)
    domains.rs    (domain listing)
    tools.rs      (per-domain tool listing)
    tool_help.rs  (per-tool help; never fails)
    run.rs        (template execution via the shell)
    format.rs     (decorated-mode panel/table/color primitives)

Conventions:
  - Each view module exposes one public `execute_*` function returning the
    process exit code for that view.
  - Plain-mode output paths never touch `format.rs`.
*/

pub mod domains;
pub mod format;
pub mod help;
pub mod route;
pub mod run;
pub mod tool_help;
pub mod tools;

pub use domains::execute_domains;
pub use help::{execute_help, execute_version};
pub use route::{Route, route};
pub use run::{RunOptions, execute_run};
pub use tool_help::execute_tool_help;
pub use tools::execute_tools;

/// One-line `ERROR:` output on stdout, colored in decorated mode.
pub(crate) fn print_error(msg: String, human_mode: bool) {
    if human_mode {
        let style = format::StyleOptions::detect();
        println!("{}", format::color(format::Role::Error, msg, &style));
    } else {
        println!("{msg}");
    }
}
