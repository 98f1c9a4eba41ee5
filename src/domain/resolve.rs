/*!
Command resolution: tool document -> final shell command string.

Substitutes exactly four placeholders into the `command` template:

  {base_path}  current working directory at invocation time
  {args}       user args joined with single spaces (may be empty; no
               trimming, no quoting, no escaping)
  {domain}     domain id as given
  {tool}       tool id as given

`{{` and `}}` are literal braces. An unknown placeholder or an unbalanced
brace is a reported error, never a silently truncated command. The resolved
string is later handed verbatim to the shell; metacharacters in arguments
are interpreted by the shell. That is an intentional, documented trust
boundary of the tool-document format.
*/

use crate::domain::registry::Registry;
use crate::domain::tool::ToolDoc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("Domain '{0}' not found")]
    DomainNotFound(String),

    #[error("Tool '{tool}' not found in domain '{domain}'")]
    ToolNotFound { domain: String, tool: String },

    #[error("No command defined for tool '{0}'")]
    NoCommandTemplate(String),

    #[error("Tool '{tool}' in domain '{domain}' is unreadable: {reason}")]
    BadDocument {
        domain: String,
        tool: String,
        reason: String,
    },

    #[error("Invalid command template for tool '{tool}': {source}")]
    BadTemplate {
        tool: String,
        #[source]
        source: TemplateError,
    },
}

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("unknown placeholder '{{{0}}}'")]
    UnknownPlaceholder(String),

    #[error("unbalanced '{0}' in template")]
    UnbalancedBrace(char),
}

/// Everything the execution-context view needs to echo.
#[derive(Debug)]
pub struct ResolvedCommand {
    pub command: String,
    pub doc: ToolDoc,
    pub variables: Vec<(&'static str, String)>,
}

/// Locate the tool document across the precedence-ordered roots and render
/// its command template.
pub fn resolve_command(
    registry: &Registry,
    domain: &str,
    tool: &str,
    args: &[String],
) -> Result<ResolvedCommand, ResolveError> {
    let domain_dir = registry
        .find_domain(domain)
        .ok_or_else(|| ResolveError::DomainNotFound(domain.to_string()))?;

    let tool_file = domain_dir.join(format!("{tool}.yaml"));
    if !tool_file.is_file() {
        return Err(ResolveError::ToolNotFound {
            domain: domain.to_string(),
            tool: tool.to_string(),
        });
    }

    let doc = ToolDoc::load(&tool_file).map_err(|e| ResolveError::BadDocument {
        domain: domain.to_string(),
        tool: tool.to_string(),
        reason: format!("{e:#}"),
    })?;

    let template = match doc.command.as_deref() {
        Some(t) if !t.is_empty() => t,
        _ => return Err(ResolveError::NoCommandTemplate(tool.to_string())),
    };

    let base_path = std::env::current_dir()
        .map(|p| p.display().to_string())
        .unwrap_or_default();
    let variables = vec![
        ("base_path", base_path),
        ("args", args.join(" ")),
        ("domain", domain.to_string()),
        ("tool", tool.to_string()),
    ];

    let command =
        substitute(template, &variables).map_err(|source| ResolveError::BadTemplate {
            tool: tool.to_string(),
            source,
        })?;

    Ok(ResolvedCommand {
        command,
        doc,
        variables,
    })
}

/// Render a template against named values. `{{` / `}}` escape to literal
/// braces; any `{name}` not present in `vars` is an error.
pub fn substitute(
    template: &str,
    vars: &[(&'static str, String)],
) -> Result<String, TemplateError> {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '{' => {
                if chars.peek() == Some(&'{') {
                    chars.next();
                    out.push('{');
                    continue;
                }
                let mut name = String::new();
                loop {
                    match chars.next() {
                        Some('}') => break,
                        Some(c) => name.push(c),
                        None => return Err(TemplateError::UnbalancedBrace('{')),
                    }
                }
                match vars.iter().find(|(k, _)| *k == name) {
                    Some((_, value)) => out.push_str(value),
                    None => return Err(TemplateError::UnknownPlaceholder(name)),
                }
            }
            '}' => {
                if chars.peek() == Some(&'}') {
                    chars.next();
                    out.push('}');
                } else {
                    return Err(TemplateError::UnbalancedBrace('}'));
                }
            }
            c => out.push(c),
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tempfile::TempDir;

    fn vars(args: &str) -> Vec<(&'static str, String)> {
        vec![
            ("base_path", "/work".into()),
            ("args", args.into()),
            ("domain", "linting".into()),
            ("tool", "ruff".into()),
        ]
    }

    fn write_tool(dir: &Path, tool: &str, yaml: &str) {
        std::fs::write(dir.join(format!("{tool}.yaml")), yaml).unwrap();
    }

    #[test]
    fn empty_args_substitution_is_exact() {
        // Trailing space preserved, no trimming.
        assert_eq!(substitute("echo {args}", &vars("")).unwrap(), "echo ");
        assert_eq!(substitute("echo {args}", &vars("a b")).unwrap(), "echo a b");
    }

    #[test]
    fn all_four_placeholders() {
        let s = substitute("{base_path}/{domain}/{tool} {args}", &vars("x")).unwrap();
        assert_eq!(s, "/work/linting/ruff x");
    }

    #[test]
    fn unknown_placeholder_is_an_error() {
        let err = substitute("echo {nope}", &vars("")).unwrap_err();
        assert!(matches!(err, TemplateError::UnknownPlaceholder(ref n) if n == "nope"));
    }

    #[test]
    fn doubled_braces_are_literals() {
        assert_eq!(
            substitute("echo {{literal}} {args}", &vars("v")).unwrap(),
            "echo {literal} v"
        );
    }

    #[test]
    fn unbalanced_braces_are_errors() {
        assert!(matches!(
            substitute("echo {args", &vars("")),
            Err(TemplateError::UnbalancedBrace('{'))
        ));
        assert!(matches!(
            substitute("echo }", &vars("")),
            Err(TemplateError::UnbalancedBrace('}'))
        ));
    }

    #[test]
    fn resolve_reports_missing_domain_and_tool() {
        let tmp = TempDir::new().unwrap();
        let reg = Registry::new(vec![tmp.path().to_path_buf()]);
        assert!(matches!(
            resolve_command(&reg, "ghost", "ruff", &[]),
            Err(ResolveError::DomainNotFound(_))
        ));

        std::fs::create_dir(tmp.path().join("linting")).unwrap();
        assert!(matches!(
            resolve_command(&reg, "linting", "ruff", &[]),
            Err(ResolveError::ToolNotFound { .. })
        ));
    }

    #[test]
    fn resolve_requires_a_command_template() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("linting");
        std::fs::create_dir(&dir).unwrap();
        write_tool(&dir, "ruff", "description: no command here\n");
        let reg = Registry::new(vec![tmp.path().to_path_buf()]);
        assert!(matches!(
            resolve_command(&reg, "linting", "ruff", &[]),
            Err(ResolveError::NoCommandTemplate(_))
        ));
    }

    #[test]
    fn resolve_substitutes_args_verbatim() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("linting");
        std::fs::create_dir(&dir).unwrap();
        write_tool(&dir, "ruff", "command: \"ruff {args}\"\n");
        let reg = Registry::new(vec![tmp.path().to_path_buf()]);
        let resolved =
            resolve_command(&reg, "linting", "ruff", &["check".into(), "--fix".into()]).unwrap();
        assert_eq!(resolved.command, "ruff check --fix");
        // Shell metacharacters pass through untouched.
        let resolved =
            resolve_command(&reg, "linting", "ruff", &["a;b".into(), "$(x)".into()]).unwrap();
        assert_eq!(resolved.command, "ruff a;b $(x)");
    }

    #[test]
    fn resolve_surfaces_bad_templates() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("linting");
        std::fs::create_dir(&dir).unwrap();
        write_tool(&dir, "ruff", "command: \"ruff {unsupported}\"\n");
        let reg = Registry::new(vec![tmp.path().to_path_buf()]);
        assert!(matches!(
            resolve_command(&reg, "linting", "ruff", &[]),
            Err(ResolveError::BadTemplate { .. })
        ));
    }
}
