/*!
Domain listing (`craft --domains`).

Plain output shape (stable, machine parseable):

  AVAILABLE DOMAINS:
    linting: 2 tools - No description
    ...

Decorated output renders the same rows as a table. Both modes enumerate the
identical set of domain ids and tool counts. An empty listing is success,
not an error.
*/

use crate::cmd::format::{Role, StyleOptions, color, emoji, table};
use crate::domain::Registry;

pub fn execute_domains(registry: &Registry, human_mode: bool) -> i32 {
    let domains = registry.list_domains();

    if human_mode {
        let style = StyleOptions::detect();
        println!(
            "{} {}",
            emoji("domain", &style),
            color(Role::Title, format!("Available Domains ({})", domains.len()), &style)
        );
        if domains.is_empty() {
            println!("{}", color(Role::Dim, "(none)", &style));
            return 0;
        }
        let rows: Vec<Vec<String>> = domains
            .iter()
            .map(|d| {
                vec![
                    d.id.clone(),
                    d.description.clone(),
                    d.tool_count.to_string(),
                ]
            })
            .collect();
        println!("{}", table(&["DOMAIN", "DESCRIPTION", "TOOLS"], &rows, &style));
        println!();
        println!(
            "{}",
            color(Role::Dim, "Use `craft <domain>` to list a domain's tools", &style)
        );
    } else {
        println!("AVAILABLE DOMAINS:");
        for d in &domains {
            println!("  {}: {} tools - {}", d.id, d.tool_count, d.description);
        }
        println!();
        println!("Use: craft <domain> to list domain tools");
        println!("Add --noob flag for decorated tables");
    }
    0
}
