/*!
Invocation routing.

The grammar is position sensitive and evaluated in a fixed priority order,
so the raw argument vector (captured whole by clap) is walked by hand:

  1. `--version` / `-v` in first position -> version
  2. `--noob` anywhere is stripped and recorded as human mode
  3. nothing left, or `--help` first -> general help
  4. `--domains` first -> domain listing
  5. one word -> domain tool listing
  6. two+ words -> domain + tool; `--help`/`-h` in third position -> tool
     help (always succeeds); otherwise the rest are verbatim tool args

Everything after the tool id is opaque: flags there belong to the invoked
command, not to craft.
*/

/// Where an invocation goes after flag handling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Version,
    Help,
    Domains,
    DomainTools { domain: String },
    ToolHelp { domain: String, tool: String },
    Run {
        domain: String,
        tool: String,
        args: Vec<String>,
    },
}

/// A routed invocation: the destination plus the human-mode marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub route: Route,
    pub human_mode: bool,
}

/// Route the raw argument vector (program name already removed).
pub fn route(argv: &[String]) -> Invocation {
    // Version wins outright, before any stripping.
    if matches!(argv.first().map(String::as_str), Some("--version") | Some("-v")) {
        return Invocation {
            route: Route::Version,
            human_mode: false,
        };
    }

    let human_mode = argv.iter().any(|a| a == "--noob");
    let words: Vec<&String> = argv.iter().filter(|a| *a != "--noob").collect();

    let route = match words.as_slice() {
        [] => Route::Help,
        [first, rest @ ..] => match (first.as_str(), rest) {
            ("--help", _) => Route::Help,
            ("--domains", _) => Route::Domains,
            (domain, []) => Route::DomainTools {
                domain: domain.to_string(),
            },
            (domain, [tool, rest @ ..]) => {
                if matches!(rest.first().map(|s| s.as_str()), Some("--help") | Some("-h")) {
                    Route::ToolHelp {
                        domain: domain.to_string(),
                        tool: tool.to_string(),
                    }
                } else {
                    Route::Run {
                        domain: domain.to_string(),
                        tool: tool.to_string(),
                        args: rest.iter().map(|s| s.to_string()).collect(),
                    }
                }
            }
        },
    };

    Invocation { route, human_mode }
}
