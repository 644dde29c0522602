//! Release notes composition.
//!
//! The body is always `## Changelog`, the diff, and the attribution footer.
//! A "Built with" line is appended when the build tool's version can be
//! probed; probe failures are logged and otherwise ignored.

use async_trait::async_trait;
use tokio::process::Command;

const HEADING: &str = "## Changelog\n";
const FOOTER: &str = "\n\n--\nAutomated with @goreleaser";

/// Source of the build tool version banner
#[async_trait]
pub trait VersionProbe: Send + Sync {
    /// Version output of the build tool, or `None` when it cannot be obtained
    async fn version(&self) -> Option<String>;
}

/// Probe that runs an external command and captures its combined output
#[derive(Debug, Clone)]
pub struct CommandProbe {
    program: String,
    args: Vec<String>,
}

impl CommandProbe {
    /// Probe running `program` with `args`
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Probe from a configured argv; `None` for an empty command
    pub fn from_argv(argv: &[String]) -> Option<Self> {
        let (program, args) = argv.split_first()?;
        Some(Self::new(program.clone(), args.to_vec()))
    }
}

#[async_trait]
impl VersionProbe for CommandProbe {
    async fn version(&self) -> Option<String> {
        let output = match Command::new(&self.program).args(&self.args).output().await {
            Ok(output) => output,
            Err(e) => {
                log::debug!("Version probe '{}' could not run: {}", self.program, e);
                return None;
            }
        };

        if !output.status.success() {
            log::debug!(
                "Version probe '{}' exited with {:?}",
                self.program,
                output.status.code()
            );
            return None;
        }

        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));
        Some(combined)
    }
}

/// Probe that never reports a version
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProbe;

#[async_trait]
impl VersionProbe for NoProbe {
    async fn version(&self) -> Option<String> {
        None
    }
}

/// Build the release body for `diff`
pub async fn compose(diff: &str, probe: &dyn VersionProbe) -> String {
    let mut body = String::with_capacity(HEADING.len() + diff.len() + FOOTER.len());
    body.push_str(HEADING);
    body.push_str(diff);
    body.push_str(FOOTER);

    if let Some(version) = probe.version().await {
        body.push_str("\nBuilt with ");
        body.push_str(&version);
    }
    body
}
