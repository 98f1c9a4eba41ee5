/*!
General help and version views.

Like every view in this crate there are two renderings of the same facts:
plain line-oriented text for machine consumption, and a decorated panel for
humans (`--noob`). Help always exits 0.
*/

use crate::cmd::format::{StyleOptions, emoji, panel};

const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn execute_help(human_mode: bool) {
    if human_mode {
        let style = StyleOptions::detect();
        let body = "Domain-specific tool orchestration\n\
                    \n\
                    Usage:\n\
                    craft <domain> <tool> [args]     Run a tool\n\
                    craft <domain>                   List domain tools\n\
                    craft --domains                  List all domains\n\
                    craft --help                     Show this help\n\
                    craft --help --noob              Show pretty human interface\n\
                    \n\
                    Examples:\n\
                    craft linting ruff check --fix\n\
                    craft coding test --coverage\n\
                    craft slate namer character --type=protagonist";
        let title = format!("{} Craft CLI", emoji("craft", &style));
        println!("{}", panel(title.trim(), body, &style));
    } else {
        println!("CRAFT CLI FRAMEWORK");
        println!("Usage: craft <domain> <tool> [args]");
        println!("       craft <domain>  (list domain tools)");
        println!("       craft --domains  (list all domains)");
        println!("       craft --help [--noob]  (show help)");
        println!();
        println!("Examples:");
        println!("  craft linting ruff check --fix");
        println!("  craft coding test --coverage");
        println!("  craft slate namer character --type=protagonist");
        println!();
        println!("Add --noob flag for human-friendly decorated output");
    }
}

pub fn execute_version() {
    println!("Craft CLI Framework v{VERSION}");
    println!("Domain-specific tool orchestration");
    println!("Built for AI agent workflows");
}
