/*!
Tool listing for one domain (`craft <domain>`).

Plain output:

  LINTING TOOLS:
    RUFF: Fast Python linter
      Usage: craft linting ruff check --fix

A missing domain prints a one-line `ERROR:` and returns 1. An existing
domain with zero tool documents is an empty, successful listing.
*/

use crate::cmd::format::{Role, StyleOptions, color, emoji, table};
use crate::cmd::print_error;
use crate::domain::Registry;
use crate::domain::tool::NO_USAGE;

pub fn execute_tools(registry: &Registry, domain: &str, human_mode: bool) -> i32 {
    let Some(tools) = registry.list_tools(domain) else {
        print_error(format!("ERROR: Domain '{domain}' not found"), human_mode);
        return 1;
    };

    if human_mode {
        let style = StyleOptions::detect();
        println!(
            "{} {}",
            emoji("tool", &style),
            color(
                Role::Title,
                format!("{domain} Tools ({})", tools.len()),
                &style
            )
        );
        if tools.is_empty() {
            println!("{}", color(Role::Dim, "(none)", &style));
            return 0;
        }
        let rows: Vec<Vec<String>> = tools
            .iter()
            .map(|t| vec![t.id.clone(), t.description.clone(), t.usage.clone()])
            .collect();
        println!("{}", table(&["TOOL", "DESCRIPTION", "USAGE"], &rows, &style));
        println!();
        println!(
            "{}",
            color(
                Role::Dim,
                format!("Use `craft {domain} <tool> --help` for tool-specific help"),
                &style
            )
        );
    } else {
        println!("{} TOOLS:", domain.to_uppercase());
        for t in &tools {
            println!("  {}: {}", t.name.to_uppercase(), t.description);
            if t.usage != NO_USAGE {
                println!("    Usage: {}", t.usage);
            }
        }
        println!();
        println!("Use: craft {domain} <tool> --help for tool-specific help");
        println!("Add --noob flag for decorated tables");
    }
    0
}
