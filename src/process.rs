use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use std::time::Duration;

use indicatif::ProgressBar;
use thiserror::Error;
use tracing::debug;

/// Executable plus arguments for a single subprocess run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    program: PathBuf,
    args: Vec<String>,
}

impl Invocation {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn arguments(&self) -> &[String] {
        &self.args
    }

    fn command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command.args(&self.args);
        command
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in self.arguments() {
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                write!(f, " {arg:?}")?;
            } else {
                write!(f, " {arg}")?;
            }
        }
        Ok(())
    }
}

/// Whether stdout is handed back to the caller or left on the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capture {
    /// stdin and stdout stay attached to the terminal; stderr is echoed
    /// there after the process exits
    Inherit,
    /// stdout and stderr are collected as text
    Collect,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Execution {
    /// `None` when the output went straight to the terminal.
    pub stdout: Option<String>,
}

#[derive(Debug, Error)]
pub enum RunError {
    #[error("adb binary not found at {}", .program.display())]
    ToolMissing { program: PathBuf },

    #[error("`{command}` {}{}", exit_text(.code), diagnostics_suffix(.diagnostics))]
    Failed {
        command: String,
        code: Option<i32>,
        diagnostics: String,
    },

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl RunError {
    pub fn diagnostics(&self) -> &str {
        match self {
            RunError::Failed { diagnostics, .. } => diagnostics,
            _ => "",
        }
    }
}

fn exit_text(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("returned non-zero exit status {code}"),
        None => "was terminated by a signal".to_string(),
    }
}

fn diagnostics_suffix(diagnostics: &str) -> String {
    if diagnostics.is_empty() {
        ".".to_string()
    } else {
        format!(": {diagnostics}")
    }
}

pub trait Runner {
    fn run(&self, invocation: &Invocation, capture: Capture) -> Result<Execution, RunError>;

    /// Collects stdout and writes it to `path`, replacing any existing file.
    fn run_to_file(&self, invocation: &Invocation, path: &Path) -> Result<(), RunError> {
        let execution = self.run(invocation, Capture::Collect)?;
        fs::write(path, execution.stdout.unwrap_or_default())?;
        Ok(())
    }
}

/// Runs invocations as real subprocesses, blocking until they exit.
#[derive(Debug, Clone, Default)]
pub struct ProcessRunner {
    spinner: bool,
}

impl ProcessRunner {
    pub fn new(spinner: bool) -> Self {
        Self { spinner }
    }

    fn collect(&self, invocation: &Invocation) -> io::Result<Output> {
        let progress = self.spinner.then(|| {
            let bar = ProgressBar::new_spinner();
            bar.set_message(invocation.to_string());
            bar.enable_steady_tick(Duration::from_millis(100));
            bar
        });

        let output = invocation.command().output();

        if let Some(bar) = progress {
            bar.finish_and_clear();
        }
        output
    }

    fn passthrough(&self, invocation: &Invocation) -> io::Result<Output> {
        let output = invocation
            .command()
            .stderr(Stdio::piped())
            .spawn()?
            .wait_with_output()?;

        let _ = io::stderr().write_all(&output.stderr);
        Ok(output)
    }
}

impl Runner for ProcessRunner {
    fn run(&self, invocation: &Invocation, capture: Capture) -> Result<Execution, RunError> {
        debug!(%invocation, ?capture, "running");

        match capture {
            Capture::Inherit => {
                let output = self
                    .passthrough(invocation)
                    .map_err(|e| spawn_error(invocation, e))?;

                if output.status.success() {
                    Ok(Execution { stdout: None })
                } else {
                    Err(RunError::Failed {
                        command: invocation.to_string(),
                        code: output.status.code(),
                        diagnostics: String::from_utf8_lossy(&output.stderr).trim().to_string(),
                    })
                }
            }

            Capture::Collect => {
                let output = self
                    .collect(invocation)
                    .map_err(|e| spawn_error(invocation, e))?;
                let stdout = String::from_utf8_lossy(&output.stdout).into_owned();

                if output.status.success() {
                    return Ok(Execution {
                        stdout: Some(stdout),
                    });
                }

                // adb reports some failures on stdout with nothing on stderr
                let stderr = String::from_utf8_lossy(&output.stderr);
                let diagnostics = if stderr.trim().is_empty() {
                    stdout.trim()
                } else {
                    stderr.trim()
                };

                Err(RunError::Failed {
                    command: invocation.to_string(),
                    code: output.status.code(),
                    diagnostics: diagnostics.to_string(),
                })
            }
        }
    }
}

fn spawn_error(invocation: &Invocation, error: io::Error) -> RunError {
    if error.kind() == io::ErrorKind::NotFound {
        RunError::ToolMissing {
            program: invocation.program().to_path_buf(),
        }
    } else {
        RunError::Io(error)
    }
}

/// Recording stand-in for tests that must not touch a real adb.
#[cfg(test)]
pub(crate) mod fake {
    use std::cell::RefCell;

    use super::*;

    type Responder = Box<dyn Fn(&[String]) -> Result<String, RunError>>;

    pub struct FakeRunner {
        calls: RefCell<Vec<(Invocation, Capture)>>,
        respond: Responder,
    }

    impl FakeRunner {
        pub fn new(respond: impl Fn(&[String]) -> Result<String, RunError> + 'static) -> Self {
            Self {
                calls: RefCell::new(Vec::new()),
                respond: Box::new(respond),
            }
        }

        pub fn succeeding() -> Self {
            Self::new(|_| Ok(String::new()))
        }

        pub fn calls(&self) -> Vec<Vec<String>> {
            self.calls
                .borrow()
                .iter()
                .map(|(invocation, _)| invocation.arguments().to_vec())
                .collect()
        }

        pub fn captures(&self) -> Vec<Capture> {
            self.calls.borrow().iter().map(|(_, capture)| *capture).collect()
        }
    }

    impl Runner for FakeRunner {
        fn run(&self, invocation: &Invocation, capture: Capture) -> Result<Execution, RunError> {
            self.calls.borrow_mut().push((invocation.clone(), capture));
            let stdout = (self.respond)(invocation.arguments())?;
            Ok(Execution {
                stdout: (capture == Capture::Collect).then_some(stdout),
            })
        }
    }

    pub fn failed(diagnostics: &str) -> RunError {
        RunError::Failed {
            command: "adb".to_string(),
            code: Some(1),
            diagnostics: diagnostics.to_string(),
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn sh(script: &str) -> Invocation {
        Invocation::new("/bin/sh").args(["-c", script])
    }

    #[test]
    fn collect_returns_stdout_unmodified() {
        let runner = ProcessRunner::new(false);
        let execution = runner
            .run(&sh("printf '  first line\\nsecond\\t\\n\\n'"), Capture::Collect)
            .unwrap();

        assert_eq!(
            execution.stdout.as_deref(),
            Some("  first line\nsecond\t\n\n")
        );
    }

    #[test]
    fn inherit_succeeds_without_stdout() {
        let runner = ProcessRunner::new(false);
        let execution = runner.run(&sh("exit 0"), Capture::Inherit).unwrap();

        assert_eq!(execution.stdout, None);
    }

    #[test]
    fn nonzero_exit_carries_stderr() {
        let runner = ProcessRunner::new(false);
        let err = runner
            .run(
                &sh("echo partial; echo 'error: device offline' >&2; exit 3"),
                Capture::Collect,
            )
            .unwrap_err();

        match &err {
            RunError::Failed {
                code, diagnostics, ..
            } => {
                assert_eq!(*code, Some(3));
                assert!(diagnostics.contains("error: device offline"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.to_string().contains("non-zero exit status 3"));
    }

    #[test]
    fn nonzero_exit_falls_back_to_stdout() {
        let runner = ProcessRunner::new(false);
        let err = runner
            .run(&sh("echo 'Failure [INSTALL_FAILED]'; exit 1"), Capture::Collect)
            .unwrap_err();

        assert_eq!(err.diagnostics(), "Failure [INSTALL_FAILED]");
    }

    #[test]
    fn inherit_failure_reports_exit_status_and_stderr() {
        let runner = ProcessRunner::new(false);
        let err = runner
            .run(
                &sh("echo 'adb: failed to stat x.apk' >&2; exit 2"),
                Capture::Inherit,
            )
            .unwrap_err();

        assert!(matches!(err, RunError::Failed { code: Some(2), .. }));
        assert_eq!(err.diagnostics(), "adb: failed to stat x.apk");
        assert!(
            err.to_string()
                .ends_with("returned non-zero exit status 2: adb: failed to stat x.apk")
        );
    }

    #[test]
    fn missing_executable_is_tool_missing() {
        let dir = tempfile::tempdir().unwrap();
        let program = dir.path().join("platform-tools/adb");
        let runner = ProcessRunner::new(false);

        for capture in [Capture::Inherit, Capture::Collect] {
            let err = runner
                .run(&Invocation::new(&program).args(["devices"]), capture)
                .unwrap_err();
            match err {
                RunError::ToolMissing { program: missing } => assert_eq!(missing, program),
                other => panic!("unexpected error: {other:?}"),
            }
        }
    }

    #[test]
    fn run_to_file_writes_captured_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logcat.txt");
        let runner = ProcessRunner::new(false);

        runner
            .run_to_file(&sh("printf 'I/ActivityManager: start\\n'"), &path)
            .unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "I/ActivityManager: start\n"
        );
    }

    #[test]
    fn display_quotes_arguments_with_spaces() {
        let invocation = Invocation::new("adb").args(["shell", "input", "text", "hello world"]);

        assert_eq!(
            invocation.to_string(),
            "adb shell input text \"hello world\""
        );
    }
}
