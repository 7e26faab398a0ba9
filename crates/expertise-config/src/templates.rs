//! Configuration templates for `expertise init`.
//!
//! The templates ship as valid TOML holding the built-in defaults. What `init` writes keeps
//! the section headers and comments but comments out every setting, so a fresh file changes
//! nothing until a line is uncommented.

/// Project configuration template.
const LOCAL_TEMPLATE: &str = include_str!("../templates/config.toml");

/// Global configuration template.
const GLOBAL_TEMPLATE: &str = include_str!("../templates/config-global.toml");

/// The project template with its settings commented out.
pub fn local_template() -> String {
    comment_settings(LOCAL_TEMPLATE)
}

/// The global template with its settings commented out.
pub fn global_template() -> String {
    comment_settings(GLOBAL_TEMPLATE)
}

/// Whether a template line assigns a value.
fn is_setting(line: &str) -> bool {
    let line = line.trim_start();
    !line.starts_with('#') && !line.starts_with('[') && line.contains('=')
}

/// Prefixes every setting line with `# `.
fn comment_settings(template: &str) -> String {
    template
        .lines()
        .map(|line| {
            if is_setting(line) {
                format!("# {line}\n")
            } else {
                format!("{line}\n")
            }
        })
        .collect()
}
