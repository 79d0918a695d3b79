//! Declarative description of the menu tree.
//!
//! A [`Menu`] owns its option table. Each [`Action`] either lists devices or
//! runs a [`Plan`]: prompt for some free-text fields, turn the answers into
//! adb argument lists, run them in order, then print a success message.

use std::ops::Index;

use crate::process::RunError;

pub struct Menu {
    pub title: &'static str,
    pub actions: Vec<Action>,
}

impl Menu {
    pub fn new(title: &'static str, actions: Vec<Action>) -> Self {
        Self { title, actions }
    }

    pub fn select(&self, choice: &str) -> Option<&Action> {
        pick(&self.actions, choice)
    }
}

/// Maps a 1-based menu choice onto an entry of `options`.
pub fn pick<'a, T>(options: &'a [T], choice: &str) -> Option<&'a T> {
    let index: usize = choice.parse().ok()?;
    index.checked_sub(1).and_then(|i| options.get(i))
}

pub struct Action {
    /// Line shown in the option table.
    pub label: &'static str,
    /// Heading printed when the action starts.
    pub title: &'static str,
    pub kind: ActionKind,
}

impl Action {
    pub fn run(label: &'static str, title: &'static str, plan: Plan) -> Self {
        Self {
            label,
            title,
            kind: ActionKind::Run(plan),
        }
    }

    pub fn choose(
        label: &'static str,
        title: &'static str,
        question: &'static str,
        branches: Vec<(&'static str, Plan)>,
    ) -> Self {
        Self {
            label,
            title,
            kind: ActionKind::Choose { question, branches },
        }
    }

    pub fn list_devices(label: &'static str) -> Self {
        Self {
            label,
            title: "List Devices",
            kind: ActionKind::ListDevices,
        }
    }
}

pub enum ActionKind {
    ListDevices,
    Run(Plan),
    /// Asks `question`; the lowercased answer picks a branch.
    Choose {
        question: &'static str,
        branches: Vec<(&'static str, Plan)>,
    },
}

pub type StepsFn = fn(&Inputs) -> Vec<Step>;
pub type MessageFn = fn(&Inputs) -> String;
pub type HintFn = fn(&RunError) -> Option<&'static str>;

pub struct Plan {
    pub fields: &'static [&'static str],
    pub steps: StepsFn,
    pub done: Option<MessageFn>,
    pub hint: Option<HintFn>,
}

impl Plan {
    pub fn new(fields: &'static [&'static str], steps: StepsFn) -> Self {
        Self {
            fields,
            steps,
            done: None,
            hint: None,
        }
    }

    pub fn done(mut self, done: MessageFn) -> Self {
        self.done = Some(done);
        self
    }

    /// Replaces the generic failure message when `hint` returns one.
    pub fn hint(mut self, hint: HintFn) -> Self {
        self.hint = Some(hint);
        self
    }
}

/// Where a step's stdout goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sink {
    Terminal,
    Print,
    LogFile,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub args: Vec<String>,
    pub sink: Sink,
}

impl Step {
    fn with_sink<I, S>(sink: Sink, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            args: args.into_iter().map(Into::into).collect(),
            sink,
        }
    }

    pub fn terminal<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_sink(Sink::Terminal, args)
    }

    pub fn print<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_sink(Sink::Print, args)
    }

    pub fn log_file<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_sink(Sink::LogFile, args)
    }

    /// Appends whitespace-separated words from a free-text answer.
    pub fn words(mut self, text: &str) -> Self {
        self.args
            .extend(text.split_whitespace().map(str::to_string));
        self
    }
}

/// Trimmed answers to a plan's fields, in prompt order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inputs(Vec<String>);

impl Inputs {
    pub fn new(answers: Vec<String>) -> Self {
        Self(answers)
    }
}

impl<S: Into<String>> FromIterator<S> for Inputs {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl Index<usize> for Inputs {
    type Output = str;

    fn index(&self, index: usize) -> &str {
        &self.0[index]
    }
}
