use std::io::Write;

use tracing::{debug, info};

use crate::adb::{self, Adb, DeviceListing};
use crate::config::AppConfig;
use crate::defs::{BANNER, CLEAR_SCREEN};
use crate::menu::{self, Action, ActionKind, Inputs, Menu, Plan, Sink};
use crate::process::{Capture, RunError, Runner};
use crate::prompt::Prompter;

const INVALID_CHOICE: &str = "Invalid option, please select again.";
const FAREWELL: &str = "Exiting EasyADB.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Listed {
    Devices,
    NoDevices,
    Unavailable,
}

/// Interactive menu loop. Every leaf action goes through `runner`; runner
/// failures are printed and never escape the action that caused them.
pub struct Session<'a, R, P, W> {
    adb: &'a Adb,
    runner: &'a R,
    config: &'a AppConfig,
    menus: &'a [Menu],
    prompter: P,
    out: W,
}

impl<'a, R, P, W> Session<'a, R, P, W>
where
    R: Runner,
    P: Prompter,
    W: Write,
{
    pub fn new(
        adb: &'a Adb,
        runner: &'a R,
        config: &'a AppConfig,
        menus: &'a [Menu],
        prompter: P,
        out: W,
    ) -> Self {
        Self {
            adb,
            runner,
            config,
            menus,
            prompter,
            out,
        }
    }

    /// Lists devices, then serves the top-level menu until the user exits.
    ///
    /// Returns early, successfully, when no device is connected.
    pub fn run(&mut self) -> anyhow::Result<()> {
        writeln!(self.out, "{BANNER}")?;

        match self.show_devices()? {
            Listed::NoDevices => return Ok(()),
            Listed::Devices => self
                .prompter
                .pause("Press Enter to continue to the device options...")?,
            Listed::Unavailable => {}
        }

        let menus = self.menus;
        let mut redraw = true;
        loop {
            if redraw {
                self.clear()?;
                writeln!(self.out, "{BANNER}")?;
            }
            for (i, menu) in menus.iter().enumerate() {
                writeln!(self.out, "[{}] {}", i + 1, menu.title)?;
            }
            writeln!(self.out, "[0] Exit\n")?;

            let choice = self.prompter.ask("Select an option")?;
            if choice == "0" {
                writeln!(self.out, "{FAREWELL}")?;
                return Ok(());
            }

            if let Some(menu) = menu::pick(menus, &choice) {
                self.serve(menu)?;
                redraw = true;
            } else {
                debug!(choice, "invalid top-level choice");
                writeln!(self.out, "{INVALID_CHOICE}")?;
                redraw = false;
            }
        }
    }

    fn clear(&mut self) -> anyhow::Result<()> {
        if self.config.clear_screen {
            write!(self.out, "{CLEAR_SCREEN}")?;
        }
        Ok(())
    }

    fn serve(&mut self, menu: &Menu) -> anyhow::Result<()> {
        let mut redraw = true;
        loop {
            if redraw {
                self.clear()?;
                writeln!(self.out, "{BANNER}")?;
            }
            writeln!(self.out, "{}\n", menu.title)?;
            for (i, action) in menu.actions.iter().enumerate() {
                writeln!(self.out, "[{}] {}", i + 1, action.label)?;
            }
            writeln!(self.out, "[0] Return to the main menu.\n")?;

            let choice = self.prompter.ask("Select an option")?;
            if choice == "0" {
                return Ok(());
            }

            if let Some(action) = menu.select(&choice) {
                self.perform(action)?;
                self.prompter.pause(&format!(
                    "Press Enter to return to the {} menu...",
                    menu.title
                ))?;
                redraw = true;
            } else {
                debug!(menu = menu.title, choice, "invalid choice");
                writeln!(self.out, "{INVALID_CHOICE}")?;
                redraw = false;
            }
        }
    }

    fn perform(&mut self, action: &Action) -> anyhow::Result<()> {
        self.clear()?;
        writeln!(self.out, "{}", action.title)?;
        info!(action = action.title, "starting action");

        match &action.kind {
            ActionKind::ListDevices => {
                self.show_devices()?;
            }
            ActionKind::Run(plan) => self.execute(action.title, plan)?,
            ActionKind::Choose { question, branches } => {
                let answer = self.prompter.ask(question)?.to_lowercase();
                match branches.iter().find(|(name, _)| *name == answer) {
                    Some((_, plan)) => self.execute(action.title, plan)?,
                    None => writeln!(self.out, "Invalid option.")?,
                }
            }
        }
        Ok(())
    }

    fn execute(&mut self, title: &str, plan: &Plan) -> anyhow::Result<()> {
        let mut answers = Vec::with_capacity(plan.fields.len());
        for field in plan.fields {
            answers.push(self.prompter.ask(field)?);
        }
        let inputs = Inputs::new(answers);
        let config = self.config;
        let logcat_file = &config.logcat_file;

        for step in (plan.steps)(&inputs) {
            let invocation = self.adb.invocation(step.args);
            debug!(%invocation, sink = ?step.sink, "running step");

            let outcome = match step.sink {
                Sink::Terminal => self.runner.run(&invocation, Capture::Inherit).map(|_| None),
                Sink::Print => self
                    .runner
                    .run(&invocation, Capture::Collect)
                    .map(|execution| execution.stdout),
                Sink::LogFile => self
                    .runner
                    .run_to_file(&invocation, logcat_file)
                    .map(|()| Some(format!("Logs saved to {}.", logcat_file.display()))),
            };

            match outcome {
                Ok(Some(text)) => writeln!(self.out, "{}", text.trim_end())?,
                Ok(None) => {}
                Err(err) => {
                    info!(action = title, error = %err, "action failed");
                    return self.report_failure(&err, plan);
                }
            }
        }

        if let Some(done) = plan.done {
            writeln!(self.out, "{}", done(&inputs))?;
        }
        info!(action = title, "action completed");
        Ok(())
    }

    fn report_failure(&mut self, err: &RunError, plan: &Plan) -> anyhow::Result<()> {
        if let Some(hint) = plan.hint.and_then(|hint| hint(err)) {
            writeln!(self.out, "{hint}")?;
            return Ok(());
        }

        match err {
            RunError::ToolMissing { program } => {
                writeln!(self.out, "ADB binary not found at {}.", program.display())?;
            }
            RunError::Failed { .. } => writeln!(self.out, "Error occurred: {err}")?,
            RunError::Io(e) => writeln!(self.out, "An unexpected error occurred: {e}")?,
        }
        Ok(())
    }

    fn show_devices(&mut self) -> anyhow::Result<Listed> {
        let listing = match adb::list_devices(self.adb, self.runner) {
            Ok(listing) => listing,
            Err(RunError::ToolMissing { program }) => {
                info!(program = %program.display(), "adb missing");
                writeln!(self.out, "ADB binary not found.")?;
                return Ok(Listed::Unavailable);
            }
            Err(err) => {
                writeln!(self.out, "Error occurred while running adb: {err}")?;
                return Ok(Listed::Unavailable);
            }
        };

        let DeviceListing::Devices(devices) = listing else {
            writeln!(self.out, "No devices connected.")?;
            return Ok(Listed::NoDevices);
        };

        writeln!(self.out, "Connected devices:")?;
        for device in devices {
            writeln!(self.out, "\nDevice ID: {}", device.id)?;
            match device.battery {
                Ok(lines) => {
                    writeln!(self.out, "Battery Info:")?;
                    for line in lines {
                        writeln!(self.out, "  {line}")?;
                    }
                }
                Err(err) => writeln!(self.out, "Error: {err}")?,
            }
        }
        Ok(Listed::Devices)
    }
}
