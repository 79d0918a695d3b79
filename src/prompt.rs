use std::io::{self, BufRead, IsTerminal, Write};

use dialoguer::Input;

/// Source of user answers for menu choices and free-text fields.
pub trait Prompter {
    /// Returns the trimmed answer. Running out of input is an
    /// `UnexpectedEof` error.
    fn ask(&mut self, prompt: &str) -> io::Result<String>;

    /// Blocks until the user presses Enter.
    fn pause(&mut self, message: &str) -> io::Result<()>;
}

impl<P: Prompter + ?Sized> Prompter for &mut P {
    fn ask(&mut self, prompt: &str) -> io::Result<String> {
        (**self).ask(prompt)
    }

    fn pause(&mut self, message: &str) -> io::Result<()> {
        (**self).pause(message)
    }
}

/// Reads from the controlling terminal, or plain stdin lines when piped.
pub struct ConsolePrompter {
    interactive: bool,
}

impl ConsolePrompter {
    pub fn new() -> Self {
        Self {
            interactive: io::stdin().is_terminal(),
        }
    }

    fn read_line(&self) -> io::Result<String> {
        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
        }
        Ok(line.trim().to_string())
    }
}

impl Prompter for ConsolePrompter {
    fn ask(&mut self, prompt: &str) -> io::Result<String> {
        if self.interactive {
            let answer: String = Input::new()
                .with_prompt(prompt)
                .allow_empty(true)
                .interact_text()
                .map_err(io::Error::other)?;
            return Ok(answer.trim().to_string());
        }

        let mut stdout = io::stdout();
        write!(stdout, "{prompt}: ")?;
        stdout.flush()?;
        self.read_line()
    }

    fn pause(&mut self, message: &str) -> io::Result<()> {
        let mut stdout = io::stdout();
        write!(stdout, "\n{message}")?;
        stdout.flush()?;
        self.read_line().map(drop)
    }
}

/// Replays canned answers; used to drive sessions in tests.
#[cfg(test)]
pub(crate) mod scripted {
    use std::collections::VecDeque;

    use super::*;

    #[derive(Default)]
    pub struct ScriptedPrompter {
        answers: VecDeque<String>,
        pub prompts: Vec<String>,
    }

    impl ScriptedPrompter {
        pub fn new(answers: &[&str]) -> Self {
            Self {
                answers: answers.iter().map(|a| a.to_string()).collect(),
                prompts: Vec::new(),
            }
        }

        pub fn remaining(&self) -> usize {
            self.answers.len()
        }

        fn next(&mut self, prompt: &str) -> io::Result<String> {
            self.prompts.push(prompt.to_string());
            self.answers
                .pop_front()
                .map(|a| a.trim().to_string())
                .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "script exhausted"))
        }
    }

    impl Prompter for ScriptedPrompter {
        fn ask(&mut self, prompt: &str) -> io::Result<String> {
            self.next(prompt)
        }

        fn pause(&mut self, message: &str) -> io::Result<()> {
            self.next(message).map(drop)
        }
    }
}
