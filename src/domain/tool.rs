/*!
Tool document model.

A tool is one YAML mapping on disk, file stem = tool id:

  name: RUFF
  description: Fast Python linter
  command: "ruff {args}"
  category: linting
  help: |
    Usage: craft linting ruff [options]
    ...

Every field is optional at discovery time; only `command` becomes mandatory
at execution time (checked by the resolver, not here).
*/

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const NO_DESCRIPTION: &str = "No description";
pub const NO_HELP: &str = "No help available";
pub const NO_USAGE: &str = "No usage info";

/// One declarative tool description, as parsed from its YAML document.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ToolDoc {
    pub name: Option<String>,
    pub description: Option<String>,
    pub command: Option<String>,
    pub help: Option<String>,
    pub category: Option<String>,
}

impl ToolDoc {
    /// Parse a tool document from a YAML file on disk.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read tool document {}", path.display()))?;
        let doc: ToolDoc = serde_yaml::from_str(&text)
            .with_context(|| format!("failed to parse tool document {}", path.display()))?;
        Ok(doc)
    }

    /// Display label, falling back to the tool id.
    pub fn display_name<'a>(&'a self, tool_id: &'a str) -> &'a str {
        self.name.as_deref().filter(|s| !s.is_empty()).unwrap_or(tool_id)
    }

    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or(NO_DESCRIPTION)
    }

    pub fn help_text(&self) -> &str {
        self.help.as_deref().unwrap_or(NO_HELP)
    }

    /// One-line usage hint pulled out of the help text.
    ///
    /// Heuristic kept bug-for-bug compatible with existing tool documents:
    /// the first line containing the token `craft` that does not contain the
    /// literal substrings `Usage:` or `Examples:` wins. A help text whose
    /// only invocation line sits on a `Usage:` header therefore yields the
    /// placeholder.
    pub fn usage_hint(&self) -> String {
        let Some(help) = self.help.as_deref() else {
            return NO_USAGE.to_string();
        };
        if !help.contains("craft") {
            return NO_USAGE.to_string();
        }
        for line in help.lines() {
            if line.contains("craft") && !line.contains("Examples:") && !line.contains("Usage:") {
                return line.trim().to_string();
            }
        }
        NO_USAGE.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc_with_help(help: &str) -> ToolDoc {
        ToolDoc {
            help: Some(help.to_string()),
            ..ToolDoc::default()
        }
    }

    #[test]
    fn display_name_falls_back_to_id() {
        let doc = ToolDoc::default();
        assert_eq!(doc.display_name("ruff"), "ruff");
        let named = ToolDoc {
            name: Some("RUFF".into()),
            ..ToolDoc::default()
        };
        assert_eq!(named.display_name("ruff"), "RUFF");
    }

    #[test]
    fn usage_hint_picks_first_invocation_line() {
        let doc = doc_with_help(
            "Run the linter.\n\n  craft linting ruff check --fix\n  craft linting ruff format\n",
        );
        assert_eq!(doc.usage_hint(), "craft linting ruff check --fix");
    }

    #[test]
    fn usage_hint_skips_header_lines() {
        // A line carrying the Usage: header is excluded even though it
        // mentions the program name.
        let doc = doc_with_help("Usage: craft linting ruff [options]");
        assert_eq!(doc.usage_hint(), NO_USAGE);
    }

    #[test]
    fn usage_hint_without_help() {
        assert_eq!(ToolDoc::default().usage_hint(), NO_USAGE);
        assert_eq!(doc_with_help("nothing relevant here").usage_hint(), NO_USAGE);
    }

    #[test]
    fn parses_minimal_yaml() {
        let doc: ToolDoc = serde_yaml::from_str("command: \"echo {args}\"").unwrap();
        assert_eq!(doc.command.as_deref(), Some("echo {args}"));
        assert_eq!(doc.description(), NO_DESCRIPTION);
        assert_eq!(doc.help_text(), NO_HELP);
    }
}
