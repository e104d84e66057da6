// src/avfs/launcher.rs
//! External process launching: the blocking mount command and the
//! fire-and-forget file manager window.

use std::{
    ffi::OsString,
    fmt, io,
    os::unix::process::CommandExt,
    process::{Command, Output, Stdio},
    thread,
};

use crate::error::{AvfsError, Result};

/// An argv: program followed by fixed leading arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandSpec {
    /// Build from an argv list. `what` names the command in the error.
    pub fn from_argv(argv: &[String], what: &'static str) -> Result<Self> {
        let (program, args) = argv.split_first().ok_or(AvfsError::EmptyCommand(what))?;
        if program.trim().is_empty() {
            return Err(AvfsError::EmptyCommand(what));
        }
        Ok(Self {
            program: program.clone(),
            args: args.to_vec(),
        })
    }

    pub fn program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    fn command(&self, extra: &[OsString]) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args).args(extra);
        cmd
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Runs external commands on behalf of the menu provider.
pub trait Launcher {
    /// Run to completion with stdin closed. stdout and stderr are captured,
    /// never written to our own terminal.
    fn run(&self, cmd: &CommandSpec, extra: &[OsString]) -> io::Result<Output>;

    /// Start without waiting; the outcome is not observed by the caller.
    fn spawn_detached(&self, cmd: &CommandSpec, extra: &[OsString]) -> io::Result<()>;
}

impl<T: Launcher + ?Sized> Launcher for &T {
    fn run(&self, cmd: &CommandSpec, extra: &[OsString]) -> io::Result<Output> {
        (**self).run(cmd, extra)
    }

    fn spawn_detached(&self, cmd: &CommandSpec, extra: &[OsString]) -> io::Result<()> {
        (**self).spawn_detached(cmd, extra)
    }
}

/// Launcher backed by `std::process`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemLauncher;

impl Launcher for SystemLauncher {
    fn run(&self, cmd: &CommandSpec, extra: &[OsString]) -> io::Result<Output> {
        tracing::debug!(command = %cmd, "running");
        cmd.command(extra).stdin(Stdio::null()).output()
    }

    fn spawn_detached(&self, cmd: &CommandSpec, extra: &[OsString]) -> io::Result<()> {
        let mut child = cmd
            .command(extra)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            // own process group so a Ctrl-C in our terminal does not reach it
            .process_group(0)
            .spawn()?;
        let pid = child.id();
        tracing::debug!(command = %cmd, pid, "spawned detached");

        // Reap in the background so the window never becomes a zombie.
        let name = cmd.program.clone();
        thread::spawn(move || match child.wait() {
            Ok(status) => tracing::debug!(program = %name, pid, %status, "detached process exited"),
            Err(e) => tracing::debug!(program = %name, pid, error = %e, "wait failed"),
        });
        Ok(())
    }
}
