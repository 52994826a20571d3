//! Platform-agnostic descriptions of the commands a plugin wants to run

use pbt_fs::HostPath;
use std::collections::BTreeMap;
use std::fmt;

/// How to find the executable a command runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutableLocator {
    /// An absolute path outside the build's scratch area.
    Preinstalled(HostPath),
    /// An executable product of the package, resolved at plan time.
    Product(String),
}

impl ExecutableLocator {
    pub fn product(name: impl Into<String>) -> Self {
        Self::Product(name.into())
    }

    pub fn preinstalled(path: impl Into<HostPath>) -> Self {
        Self::Preinstalled(path.into())
    }
}

impl fmt::Display for ExecutableLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Preinstalled(path) => write!(f, "executable {path}"),
            Self::Product(name) => write!(f, "product '{name}'"),
        }
    }
}

/// One command-line argument.
///
/// Path arguments are repaired like every other path of the command; text
/// arguments are passed through verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandArgument {
    Text(String),
    Path(HostPath),
}

impl From<&str> for CommandArgument {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for CommandArgument {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<HostPath> for CommandArgument {
    fn from(p: HostPath) -> Self {
        Self::Path(p)
    }
}

impl From<&HostPath> for CommandArgument {
    fn from(p: &HostPath) -> Self {
        Self::Path(p.clone())
    }
}

/// A command that runs when any of its output files are needed by the build
/// but out of date.
///
/// An output is out of date if it does not exist or if any input changed
/// since the command last ran. The output paths may depend on the input
/// paths but never on the contents of input files; commands whose outputs
/// are only known after reading inputs are [`DiscoveryCommand`]s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImmediateCommand {
    /// Shown in build logs
    pub display_name: Option<String>,
    pub locator: ExecutableLocator,
    pub arguments: Vec<CommandArgument>,
    pub environment: BTreeMap<String, String>,
    /// Files the outputs may depend on; path arguments usually belong here too
    pub input_files: Vec<HostPath>,
    /// Files generated or updated by the executable
    pub output_files: Vec<HostPath>,
}

impl ImmediateCommand {
    pub fn new(locator: ExecutableLocator) -> Self {
        Self {
            display_name: None,
            locator,
            arguments: Vec::new(),
            environment: BTreeMap::new(),
            input_files: Vec::new(),
            output_files: Vec::new(),
        }
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    pub fn with_arguments<A: Into<CommandArgument>>(
        mut self,
        arguments: impl IntoIterator<Item = A>,
    ) -> Self {
        self.arguments.extend(arguments.into_iter().map(Into::into));
        self
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.environment.insert(key.into(), value.into());
        self
    }

    pub fn with_input_files(mut self, files: impl IntoIterator<Item = HostPath>) -> Self {
        self.input_files.extend(files);
        self
    }

    pub fn with_output_files(mut self, files: impl IntoIterator<Item = HostPath>) -> Self {
        self.output_files.extend(files);
        self
    }
}

/// A command that runs unconditionally before every build.
///
/// Every file found in `output_files_directory` after the command ran is an
/// output. Only for generators whose output list cannot be known without
/// reading their inputs: running on every build is expensive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryCommand {
    pub display_name: Option<String>,
    pub locator: ExecutableLocator,
    pub arguments: Vec<CommandArgument>,
    pub environment: BTreeMap<String, String>,
    pub output_files_directory: HostPath,
}

impl DiscoveryCommand {
    pub fn new(locator: ExecutableLocator, output_files_directory: HostPath) -> Self {
        Self {
            display_name: None,
            locator,
            arguments: Vec::new(),
            environment: BTreeMap::new(),
            output_files_directory,
        }
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    pub fn with_arguments<A: Into<CommandArgument>>(
        mut self,
        arguments: impl IntoIterator<Item = A>,
    ) -> Self {
        self.arguments.extend(arguments.into_iter().map(Into::into));
        self
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.environment.insert(key.into(), value.into());
        self
    }
}

/// A command a plugin asks the host to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandIntent {
    Immediate(ImmediateCommand),
    Discovery(DiscoveryCommand),
}

impl CommandIntent {
    pub fn locator(&self) -> &ExecutableLocator {
        match self {
            Self::Immediate(cmd) => &cmd.locator,
            Self::Discovery(cmd) => &cmd.locator,
        }
    }

    pub fn display_name(&self) -> Option<&str> {
        match self {
            Self::Immediate(cmd) => cmd.display_name.as_deref(),
            Self::Discovery(cmd) => cmd.display_name.as_deref(),
        }
    }

    pub fn arguments(&self) -> &[CommandArgument] {
        match self {
            Self::Immediate(cmd) => &cmd.arguments,
            Self::Discovery(cmd) => &cmd.arguments,
        }
    }

    pub fn environment(&self) -> &BTreeMap<String, String> {
        match self {
            Self::Immediate(cmd) => &cmd.environment,
            Self::Discovery(cmd) => &cmd.environment,
        }
    }

    /// Name used to attribute failures: the display name, or the locator.
    pub fn label(&self) -> String {
        self.display_name()
            .map(str::to_string)
            .unwrap_or_else(|| self.locator().to_string())
    }
}

impl From<ImmediateCommand> for CommandIntent {
    fn from(cmd: ImmediateCommand) -> Self {
        Self::Immediate(cmd)
    }
}

impl From<DiscoveryCommand> for CommandIntent {
    fn from(cmd: DiscoveryCommand) -> Self {
        Self::Discovery(cmd)
    }
}
