//! # Prompts
//!
//! Interactive questions behind a trait, so commands run unchanged in
//! scripts and tests.

use crate::error::{CliError, CliResult};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, Password};

/// Asks the user for values.
pub trait Prompter {
    /// Free text, with an optional default accepted by pressing Enter.
    fn input(&self, prompt: &str, default: Option<&str>) -> CliResult<String>;
    /// Yes/no question.
    fn confirm(&self, prompt: &str, default: bool) -> CliResult<bool>;
    /// Hidden input.
    fn password(&self, prompt: &str) -> CliResult<String>;
}

/// Terminal prompts via `dialoguer`.
pub struct DialoguerPrompter {
    theme: ColorfulTheme,
}

impl DialoguerPrompter {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }
}

fn prompt_error(e: dialoguer::Error) -> CliError {
    CliError::Prompt(e.to_string())
}

impl Prompter for DialoguerPrompter {
    fn input(&self, prompt: &str, default: Option<&str>) -> CliResult<String> {
        let mut input = Input::<String>::with_theme(&self.theme).with_prompt(prompt);
        if let Some(default) = default {
            input = input.default(default.to_string());
        }
        input.interact_text().map_err(prompt_error)
    }

    fn confirm(&self, prompt: &str, default: bool) -> CliResult<bool> {
        Confirm::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(default)
            .interact()
            .map_err(prompt_error)
    }

    fn password(&self, prompt: &str) -> CliResult<String> {
        Password::with_theme(&self.theme)
            .with_prompt(prompt)
            .interact()
            .map_err(prompt_error)
    }
}

/// Used when no terminal is attached: every question is an error naming the flag to pass.
pub struct NoPrompt;

impl Prompter for NoPrompt {
    fn input(&self, prompt: &str, _default: Option<&str>) -> CliResult<String> {
        Err(CliError::Prompt(format!(
            "'{}' is required; pass it as a flag when not running in a terminal",
            prompt
        )))
    }

    fn confirm(&self, prompt: &str, _default: bool) -> CliResult<bool> {
        Err(CliError::Prompt(format!(
            "'{}' needs confirmation; pass --yes when not running in a terminal",
            prompt
        )))
    }

    fn password(&self, prompt: &str) -> CliResult<String> {
        self.input(prompt, None)
    }
}

/// Picks the prompter for the session.
pub fn for_session(is_tty: bool) -> Box<dyn Prompter> {
    if is_tty {
        Box::new(DialoguerPrompter::new())
    } else {
        Box::new(NoPrompt)
    }
}

#[cfg(test)]
pub mod testing {
    use super::*;
    use std::cell::RefCell;
    use std::collections::VecDeque;

    /// Answers questions from a script, recording each prompt.
    #[derive(Default)]
    pub struct ScriptedPrompter {
        answers: RefCell<VecDeque<String>>,
        pub asked: RefCell<Vec<String>>,
    }

    impl ScriptedPrompter {
        pub fn new(answers: &[&str]) -> Self {
            Self {
                answers: RefCell::new(answers.iter().map(|a| a.to_string()).collect()),
                asked: RefCell::new(Vec::new()),
            }
        }

        fn next(&self, prompt: &str) -> CliResult<String> {
            self.asked.borrow_mut().push(prompt.to_string());
            self.answers
                .borrow_mut()
                .pop_front()
                .ok_or_else(|| CliError::Prompt(format!("no scripted answer for '{}'", prompt)))
        }
    }

    impl Prompter for ScriptedPrompter {
        fn input(&self, prompt: &str, default: Option<&str>) -> CliResult<String> {
            let answer = self.next(prompt)?;
            match (answer.is_empty(), default) {
                (true, Some(d)) => Ok(d.to_string()),
                _ => Ok(answer),
            }
        }

        fn confirm(&self, prompt: &str, _default: bool) -> CliResult<bool> {
            Ok(matches!(self.next(prompt)?.as_str(), "y" | "yes"))
        }

        fn password(&self, prompt: &str) -> CliResult<String> {
            self.next(prompt)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_prompt_refuses() {
        let err = NoPrompt.confirm("Delete user 00u1?", false).err().unwrap();
        assert!(err.to_string().contains("--yes"));
        let err = NoPrompt.input("Login", None).err().unwrap();
        assert!(err.to_string().contains("'Login' is required"));
    }

    #[test]
    fn test_scripted_prompter_defaults() {
        let prompter = testing::ScriptedPrompter::new(&["", "y"]);
        assert_eq!(prompter.input("Email", Some("a@example.com")).unwrap(), "a@example.com");
        assert!(prompter.confirm("Sure?", false).unwrap());
        assert_eq!(prompter.asked.borrow().len(), 2);
    }
}
