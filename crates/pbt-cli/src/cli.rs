//! CLI argument parsing using clap derive

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Plan the build commands a plugin registers for a target
#[derive(Parser, Debug)]
#[command(name = "pbt")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Print the host commands a plugin creates for a target, as JSON
    ///
    /// Examples:
    ///   pbt plan --plugin resource-generator --context ctx.json --target Lib
    ///   pbt plan --plugin test-generator --context ctx.toml --target Lib --platform windows
    Plan {
        /// Registered plugin name (see `pbt plugins`)
        #[arg(long)]
        plugin: String,

        /// Plugin context file (TOML, JSON or YAML)
        #[arg(long)]
        context: PathBuf,

        /// Target to plan commands for
        #[arg(long)]
        target: String,

        /// Plugin configuration file (TOML, JSON or YAML)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Platform whose rules to plan with
        #[arg(long, value_enum, default_value_t = PlatformArg::Host)]
        platform: PlatformArg,

        /// Executable search path, instead of the environment's
        #[arg(long)]
        search_path: Option<String>,

        /// Directory relative paths resolve against, instead of the
        /// working directory
        #[arg(long)]
        current_dir: Option<String>,
    },

    /// List registered plugins
    Plugins,
}

/// Platform selection for `plan`
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformArg {
    /// The platform pbt runs on
    Host,
    Posix,
    Windows,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_plan() {
        let cli = Cli::parse_from([
            "pbt", "-v", "plan", "--plugin", "resource-generator", "--context", "ctx.json",
            "--target", "Lib", "--platform", "windows",
        ]);
        assert!(cli.verbose);
        match cli.command {
            Commands::Plan {
                plugin,
                platform,
                config,
                ..
            } => {
                assert_eq!(plugin, "resource-generator");
                assert_eq!(platform, PlatformArg::Windows);
                assert!(config.is_none());
            }
            other => panic!("expected plan, got {other:?}"),
        }
    }
}
