use anyhow::Result;
use dialoguer::Input;

pub trait Prompter {
    fn input(&self, prompt: &str, default: &str) -> Result<String>;
}

/// Prompts on the controlling terminal.
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn input(&self, prompt: &str, default: &str) -> Result<String> {
        let mut input = Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true);
        if !default.is_empty() {
            input = input.default(default.to_string());
        }
        Ok(input.interact_text()?)
    }
}
