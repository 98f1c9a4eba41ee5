/*!
Tool execution (`craft <domain> <tool> [args...]`).

The resolved command string is handed verbatim to the shell (`sh -c`, or
`cmd /C` on Windows). No quoting or escaping is applied to user arguments
before substitution; tool documents opt into shell semantics knowingly.

Exit status is passed through unchanged. A terminal Ctrl-C signals the
whole foreground process group, so SIGINT is ignored in this process while
the child runs (the child resets it to default before exec); the child dies
by the signal and its death is reported as a one-line interruption notice
with status 1. Other signal deaths and spawn failures likewise become a
printed `ERROR:` line plus status 1. Lookup and template failures print
`ERROR:` and return 1 without touching the shell.

When `verbose_execution` is configured (or the verbatim argument list
contains `--verbose`), an execution-context view is printed first: the
resolved command, the tool document's fields, and the substituted
variables. JSON object in plain mode, panel plus table in decorated mode.
Diagnostic output only; it may reveal local filesystem paths.
*/

use crate::cmd::format::{Role, StyleOptions, color, emoji, table};
use crate::domain::{Registry, ResolvedCommand, ToolDoc, resolve_command};
use crate::log_info;
use std::process::Command;

pub struct RunOptions {
    pub human_mode: bool,
    pub verbose: bool,
}

pub fn execute_run(
    registry: &Registry,
    domain: &str,
    tool: &str,
    args: &[String],
    opts: &RunOptions,
) -> i32 {
    let resolved = match resolve_command(registry, domain, tool, args) {
        Ok(r) => r,
        Err(e) => {
            crate::cmd::print_error(format!("ERROR: {e}"), opts.human_mode);
            return 1;
        }
    };

    if opts.verbose || args.iter().any(|a| a == "--verbose") {
        print_context(&resolved, domain, tool, opts.human_mode);
    }
    log_info!("running: {}", resolved.command);

    run_in_shell(&resolved.command)
}

/// Document fields the context view echoes. Single source for both
/// renderings so they cannot drift apart.
fn document_fields(doc: &ToolDoc) -> [(&'static str, Option<&str>); 3] {
    [
        ("name", doc.name.as_deref()),
        ("description", doc.description.as_deref()),
        ("category", doc.category.as_deref()),
    ]
}

fn context_json(resolved: &ResolvedCommand, domain: &str, tool: &str) -> serde_json::Value {
    let variables: serde_json::Map<String, serde_json::Value> = resolved
        .variables
        .iter()
        .map(|(k, v)| ((*k).to_string(), serde_json::Value::String(v.clone())))
        .collect();
    let document: serde_json::Map<String, serde_json::Value> = document_fields(&resolved.doc)
        .into_iter()
        .map(|(k, v)| {
            let value = v.map_or(serde_json::Value::Null, |s| {
                serde_json::Value::String(s.to_string())
            });
            (k.to_string(), value)
        })
        .collect();
    serde_json::json!({
        "command": resolved.command,
        "domain": domain,
        "tool": tool,
        "variables": variables,
        "document": document,
    })
}

fn print_context(resolved: &ResolvedCommand, domain: &str, tool: &str, human_mode: bool) {
    if human_mode {
        let style = StyleOptions::detect();
        println!(
            "{} {}",
            emoji("run", &style),
            color(Role::Title, format!("Running {domain} {tool}"), &style)
        );
        println!("{}", color(Role::Accent, &resolved.command, &style));
        for (key, value) in document_fields(&resolved.doc) {
            println!(
                "{}",
                color(Role::Dim, format!("{key}: {}", value.unwrap_or("-")), &style)
            );
        }
        let rows: Vec<Vec<String>> = resolved
            .variables
            .iter()
            .map(|(k, v)| vec![(*k).to_string(), v.clone()])
            .collect();
        println!("{}", table(&["VARIABLE", "VALUE"], &rows, &style));
    } else {
        println!("{}", context_json(resolved, domain, tool));
    }
}

fn run_in_shell(command: &str) -> i32 {
    let status = {
        let _shield = SigintShield::engage();
        shell_command(command).status()
    };
    match status {
        Ok(status) => {
            if let Some(code) = status.code() {
                return code;
            }
            // Terminated by a signal (Unix only).
            #[cfg(unix)]
            {
                use std::os::unix::process::ExitStatusExt;
                if status.signal() == Some(2) {
                    println!("\nInterrupted");
                    return 1;
                }
                if let Some(sig) = status.signal() {
                    println!("ERROR: command terminated by signal {sig}");
                    return 1;
                }
            }
            1
        }
        Err(e) => {
            println!("ERROR: {e}");
            1
        }
    }
}

/// Ignores SIGINT for this process while in scope, restoring the previous
/// disposition on drop. The ignore is inherited across exec, so the child
/// undoes it in `pre_exec`; only the parent is shielded.
#[cfg(unix)]
struct SigintShield {
    previous: libc::sighandler_t,
}

#[cfg(unix)]
impl SigintShield {
    fn engage() -> Self {
        let previous = unsafe { libc::signal(libc::SIGINT, libc::SIG_IGN) };
        Self { previous }
    }
}

#[cfg(unix)]
impl Drop for SigintShield {
    fn drop(&mut self) {
        unsafe {
            libc::signal(libc::SIGINT, self.previous);
        }
    }
}

#[cfg(not(unix))]
struct SigintShield;

#[cfg(not(unix))]
impl SigintShield {
    fn engage() -> Self {
        Self
    }
}

#[cfg(not(windows))]
fn shell_command(command: &str) -> Command {
    let mut cmd = Command::new("sh");
    cmd.arg("-c").arg(command);
    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        unsafe {
            cmd.pre_exec(|| {
                unsafe { libc::signal(libc::SIGINT, libc::SIG_DFL) };
                Ok(())
            });
        }
    }
    cmd
}

#[cfg(windows)]
fn shell_command(command: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.arg("/C").arg(command);
    cmd
}
