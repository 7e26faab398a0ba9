//! Implementation of `expertise status`.

use std::process::ExitCode;

use expertise_config::{ConfigWarning, discover_config_files, is_global_config};

use crate::cli::{
    context::CommandContext,
    output::{dim, subheader, warning},
};

/// Shows configuration files, the service in use and validation warnings.
pub fn run(ctx: &CommandContext) -> ExitCode {
    let config_files = discover_config_files(&ctx.cwd);
    if config_files.is_empty() {
        println!("{}", dim("No configuration files found."));
        println!();
        println!(
            "Run {} to create a configuration file.",
            subheader("expertise init")
        );
    } else {
        println!("{}", subheader("Config files:"));
        for path in &config_files {
            let scope = if is_global_config(path) { "global" } else { "local" };
            println!("   {} {}", path.display(), dim(&format!("({scope})")));
        }
    }
    println!();

    let config = &ctx.config;
    println!("{}", subheader("Service:"));
    println!("   {}", config.service.base_url);
    println!(
        "   {}",
        dim(&format!("timeout {}s", config.service.timeout_secs))
    );
    println!("{}", subheader("Share links:"));
    println!("   {}", config.share.page_url);
    println!(
        "   {}",
        dim(&format!(
            "shortened above {} characters",
            config.share.threshold
        ))
    );
    println!();

    let warnings = config.validate();
    if warnings.is_empty() {
        println!("No issues found.");
        return ExitCode::SUCCESS;
    }

    println!("{}", subheader(&format!("Warnings ({}):", warnings.len())));
    for w in &warnings {
        println!("   {}", warning(&w.to_string()));
    }
    println!();

    print_hints(&warnings);

    ExitCode::FAILURE
}

/// Prints hints for resolving common warnings.
fn print_hints(warnings: &[ConfigWarning]) {
    for w in warnings {
        match w {
            ConfigWarning::MissingBaseUrl | ConfigWarning::InvalidUrl { .. } => {
                println!(
                    "{}",
                    dim("Hint: set [service] base_url = \"https://...\" in .expertise.toml")
                );
            }
            ConfigWarning::ZeroWrapWidth => {
                println!("{}", dim("Hint: remove [graph] wrap_width to use the default of 22"));
            }
            _ => {}
        }
    }
}
