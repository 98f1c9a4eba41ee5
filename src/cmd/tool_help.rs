/*!
Per-tool help (`craft <domain> <tool> --help`).

Help never fails: a nonexistent domain or tool still prints an `ERROR:`
line naming the missing entity, and the exit status stays 0 so discovery
is never blocked by a typo.
*/

use crate::cmd::format::{StyleOptions, emoji, panel};
use crate::cmd::print_error;
use crate::domain::{Registry, ToolDoc};

pub fn execute_tool_help(registry: &Registry, domain: &str, tool: &str, human_mode: bool) -> i32 {
    let Some(tool_file) = registry.tool_path(domain, tool) else {
        print_error(format!("ERROR: Domain '{domain}' not found"), human_mode);
        return 0;
    };
    if !tool_file.is_file() {
        print_error(
            format!("ERROR: Tool '{tool}' not found in domain '{domain}'"),
            human_mode,
        );
        return 0;
    }
    let doc = match ToolDoc::load(&tool_file) {
        Ok(doc) => doc,
        Err(e) => {
            print_error(
                format!("ERROR: Tool '{tool}' in domain '{domain}' is unreadable: {e:#}"),
                human_mode,
            );
            return 0;
        }
    };

    let name = doc.display_name(tool);
    if human_mode {
        let style = StyleOptions::detect();
        let title = format!("{} {tool}", emoji("tool", &style));
        println!("{}", panel(title.trim(), &panel_body(&doc, name), &style));
    } else {
        println!("{}", name.to_uppercase());
        println!("Description: {}", doc.description());
        if let Some(category) = doc.category.as_deref() {
            println!("Category: {category}");
        }
        println!();
        println!("{}", doc.help_text());
        println!();
        println!("Add --noob flag for a decorated panel");
    }
    0
}

/// Panel body carrying the same fields as the plain rendering.
fn panel_body(doc: &ToolDoc, name: &str) -> String {
    let mut body = format!("{name}\n{}", doc.description());
    if let Some(category) = doc.category.as_deref() {
        body.push_str(&format!("\nCategory: {category}"));
    }
    body.push_str(&format!("\n\n{}", doc.help_text()));
    body
}
