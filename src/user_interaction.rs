// user_interaction.rs
use crate::error::{BroError, BroResult};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::collections::VecDeque;
use tracing::debug;

// ANSI escape codes for styling
const BOLD_ORANGE: &str = "\x1b[1;38;5;208m";
const ORANGE: &str = "\x1b[0;38;5;208m";
const BOLD_YELLOW: &str = "\x1b[1;33m";
const RESET: &str = "\x1b[0m";

/// Everything the builders need from a human: ask a line, show a line.
pub trait Prompter {
    fn ask(&mut self, prompt: &str) -> BroResult<String>;

    fn print_insight(&mut self, message: &str);

    /// Indented, quieter message; used for complaints about bad input.
    fn print_insight_level_2(&mut self, message: &str);

    fn print_list(&mut self, options: &[String]);
}

/// Asks `prompt` until `validate` accepts the answer, printing every
/// complaint in between. Only closed input gets out of the loop early.
pub fn prompt_until<T, F>(prompter: &mut dyn Prompter, prompt: &str, mut validate: F) -> BroResult<T>
where
    F: FnMut(&mut dyn Prompter, &str) -> Result<T, String>,
{
    loop {
        let answer = prompter.ask(prompt)?;
        match validate(&mut *prompter, &answer) {
            Ok(value) => return Ok(value),
            Err(complaint) => {
                debug!(prompt, answer = %answer, "answer rejected");
                prompter.print_insight_level_2(&complaint);
            }
        }
    }
}

/// The real thing: a rustyline editor that keeps history for the session.
pub struct Terminal {
    editor: DefaultEditor,
}

impl Terminal {
    pub fn new() -> BroResult<Self> {
        Ok(Terminal {
            editor: DefaultEditor::new()?,
        })
    }
}

impl Prompter for Terminal {
    fn ask(&mut self, prompt: &str) -> BroResult<String> {
        let custom_prompt = format!("{}@BIGbro: {}{}", BOLD_ORANGE, prompt, RESET);

        match self.editor.readline(&custom_prompt) {
            Ok(line) => {
                let _ = self.editor.add_history_entry(line.as_str());
                Ok(line)
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Err(BroError::InputClosed),
            Err(err) => Err(BroError::Terminal(err)),
        }
    }

    fn print_insight(&mut self, message: &str) {
        print_insight(message);
    }

    fn print_insight_level_2(&mut self, message: &str) {
        print_insight_level_2(message);
    }

    fn print_list(&mut self, options: &[String]) {
        print_list(options);
    }
}

/// Feeds canned answers to the builders and remembers everything shown.
/// Runs dry with `InputClosed`, same as hitting Ctrl-D on a terminal.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<String>,
    transcript: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ScriptedPrompter {
            answers: answers.into_iter().map(Into::into).collect(),
            transcript: Vec::new(),
        }
    }

    pub fn transcript(&self) -> &[String] {
        &self.transcript
    }

    pub fn remaining_answers(&self) -> usize {
        self.answers.len()
    }

    /// Number of times `prompt` was asked.
    pub fn times_asked(&self, prompt: &str) -> usize {
        let asked = format!("? {}", prompt);
        self.transcript.iter().filter(|line| **line == asked).count()
    }
}

impl Prompter for ScriptedPrompter {
    fn ask(&mut self, prompt: &str) -> BroResult<String> {
        self.transcript.push(format!("? {}", prompt));
        let answer = self.answers.pop_front().ok_or(BroError::InputClosed)?;
        self.transcript.push(format!("> {}", answer));
        Ok(answer)
    }

    fn print_insight(&mut self, message: &str) {
        self.transcript.push(message.to_string());
    }

    fn print_insight_level_2(&mut self, message: &str) {
        self.transcript.push(format!("  {}", message));
    }

    fn print_list(&mut self, options: &[String]) {
        self.transcript.extend(options.iter().map(|option| format!("  - {}", option)));
    }
}

/// Prints a message in bold orange font.
pub fn print_insight(message: &str) {
    println!("{}@BIGbro: {}{}", BOLD_ORANGE, message, RESET);
}

pub fn print_insight_level_2(message: &str) {
    println!("  {}@LILbro: {}{}", ORANGE, message, RESET);
}

pub fn print_list(options: &[String]) {
    // Calculate the length of the longest index to ensure neat indentation
    let max_digits = options.len().to_string().len();

    for (index, option) in options.iter().enumerate() {
        let padded_index = format!("{:width$}:", index + 1, width = max_digits);
        println!("  {}{} {}{}", BOLD_YELLOW, padded_index, option, RESET);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_even(_: &mut dyn Prompter, answer: &str) -> Result<u32, String> {
        match answer.trim().parse::<u32>() {
            Ok(n) if n % 2 == 0 => Ok(n),
            _ => Err(format!("'{}' is not even, bro.", answer)),
        }
    }

    #[test]
    fn prompt_until_returns_first_accepted_answer() {
        let mut prompter = ScriptedPrompter::new(["x", "3", "4", "6"]);
        let value = prompt_until(&mut prompter, "Even: ", parse_even).unwrap();

        assert_eq!(value, 4);
        assert_eq!(prompter.times_asked("Even: "), 3);
        assert_eq!(prompter.remaining_answers(), 1);
        assert!(prompter
            .transcript()
            .contains(&"  'x' is not even, bro.".to_string()));
        assert!(prompter
            .transcript()
            .contains(&"  '3' is not even, bro.".to_string()));
    }

    #[test]
    fn prompt_until_gives_up_only_when_input_closes() {
        let mut prompter = ScriptedPrompter::new(["nope", "still no"]);
        let result = prompt_until(&mut prompter, "Even: ", parse_even);

        assert!(matches!(result, Err(BroError::InputClosed)));
        assert_eq!(prompter.times_asked("Even: "), 3);
    }

    #[test]
    fn validator_can_talk_through_the_prompter() {
        let mut prompter = ScriptedPrompter::new(["hello"]);
        let echoed = prompt_until(&mut prompter, "Say: ", |prompter, answer| {
            prompter.print_insight(&format!("heard {}", answer));
            Ok::<_, String>(answer.to_uppercase())
        })
        .unwrap();

        assert_eq!(echoed, "HELLO");
        assert_eq!(
            prompter.transcript(),
            &["? Say: ".to_string(), "> hello".to_string(), "heard hello".to_string()]
        );
    }
}
