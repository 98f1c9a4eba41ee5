/*!
Domain model: configuration, the domain/tool registry, and command
resolution.

Layout:
  config.rs    craftrc discovery, two-level merge, domain path resolution
  registry.rs  domain/tool discovery with first-match-wins shadowing
  tool.rs      tool document (YAML) model and the usage-hint heuristic
  resolve.rs   template substitution and the typed resolution errors
*/

pub mod config;
pub mod registry;
pub mod resolve;
pub mod tool;

pub use config::ConfigManager;
pub use registry::Registry;
pub use resolve::{ResolvedCommand, resolve_command};
pub use tool::ToolDoc;
