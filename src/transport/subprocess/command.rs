//! Debugger command-line building for subprocess transport

use std::path::{Path, PathBuf};
use tokio::process::Command;

use crate::error::{GdbError, Result};

/// Command builder for a debugger process
pub struct CommandBuilder<'a> {
    executable: &'a Path,
    args: &'a [String],
}

impl<'a> CommandBuilder<'a> {
    /// Create a new command builder
    pub fn new(executable: &'a Path, args: &'a [String]) -> Self {
        Self { executable, args }
    }

    /// Locate the executable
    ///
    /// A bare name is searched for in `PATH`; anything with a directory
    /// component must exist as given.
    ///
    /// # Errors
    /// Returns `GdbError::Spawn` if the executable cannot be found
    pub fn resolve_executable(&self) -> Result<PathBuf> {
        if self.executable.as_os_str().is_empty() {
            return Err(GdbError::spawn("GDB executable path is empty"));
        }

        if self.executable.components().count() > 1 {
            if self.executable.is_file() {
                return Ok(self.executable.to_path_buf());
            }
            return Err(GdbError::spawn(format!(
                "GDB executable '{}' does not exist",
                self.executable.display()
            )));
        }

        which::which(self.executable).map_err(|e| {
            GdbError::spawn(format!(
                "GDB executable '{}' not found in PATH: {e}",
                self.executable.display()
            ))
        })
    }

    /// Build the complete command with all arguments
    ///
    /// # Errors
    /// Returns `GdbError::Spawn` if the executable cannot be found
    pub fn build(&self) -> Result<Command> {
        let program = self.resolve_executable()?;
        let mut cmd = Command::new(program);
        cmd.args(self.args);
        Ok(cmd)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_absolute_path_is_a_spawn_error() {
        let args = vec!["--interpreter=mi3".to_string()];
        let builder = CommandBuilder::new(Path::new("/definitely/not/here/gdb"), &args);
        let err = builder.resolve_executable().unwrap_err();
        assert!(matches!(err, GdbError::Spawn(_)));
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn unknown_bare_name_is_a_spawn_error() {
        let builder = CommandBuilder::new(Path::new("gdb-that-no-one-installed-4821"), &[]);
        assert!(matches!(
            builder.resolve_executable(),
            Err(GdbError::Spawn(_))
        ));
    }

    #[test]
    fn empty_path_is_rejected() {
        let builder = CommandBuilder::new(Path::new(""), &[]);
        assert!(builder.build().is_err());
    }
}
