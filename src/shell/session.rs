//! The interactive layer of a terminal window: scrollback, the input line,
//! history recall and tab completion.

use chrono::Local;

use super::{Builtin, CommandInterpreter, CommandState, Recall};
use crate::fs::VirtualFileSystemView;

/// Editing keys a terminal window understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionKey {
    Char(char),
    Backspace,
    Enter,
    Up,
    Down,
    Tab,
}

#[derive(Debug, Clone)]
pub struct TerminalSession {
    interpreter: CommandInterpreter,
    state: CommandState,
    scrollback: Vec<String>,
    input: String,
}

impl TerminalSession {
    pub fn new(interpreter: CommandInterpreter) -> Self {
        let state = interpreter.new_state();
        let scrollback = vec![
            "Welcome to Ubuntu 24.04 LTS (GNU/Linux)".to_string(),
            format!("Last login: {}", Local::now().format("%-m/%-d/%Y, %-I:%M:%S %p")),
            String::new(),
            "Type \"help\" to see available commands.".to_string(),
            String::new(),
        ];
        Self {
            interpreter,
            state,
            scrollback,
            input: String::new(),
        }
    }

    pub fn scrollback(&self) -> &[String] {
        &self.scrollback
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn state(&self) -> &CommandState {
        &self.state
    }

    pub fn prompt(&self, fs: &VirtualFileSystemView) -> String {
        self.interpreter.prompt(&self.state, fs)
    }

    pub fn insert_char(&mut self, ch: char) {
        self.input.push(ch);
    }

    pub fn backspace(&mut self) {
        self.input.pop();
    }

    /// Echo the prompt and input, run it, and append the output.
    pub async fn submit(&mut self, fs: &mut VirtualFileSystemView) {
        let echo = format!("{}{}", self.prompt(fs), self.input);
        let line = std::mem::take(&mut self.input);
        let output = self.interpreter.execute(&line, &mut self.state, fs).await;
        if output.clear_screen {
            self.scrollback.clear();
            return;
        }
        self.scrollback.push(echo);
        self.scrollback.extend(output.lines);
    }

    pub fn recall_previous(&mut self) {
        if let Recall::Line(line) = self.state.recall_previous() {
            self.input = line.to_string();
        }
    }

    pub fn recall_next(&mut self) {
        match self.state.recall_next() {
            Recall::Line(line) => self.input = line.to_string(),
            Recall::Clear => self.input.clear(),
            Recall::Stay => {}
        }
    }

    pub async fn handle_key(&mut self, key: SessionKey, fs: &mut VirtualFileSystemView) {
        match key {
            SessionKey::Char(ch) => self.insert_char(ch),
            SessionKey::Backspace => self.backspace(),
            SessionKey::Enter => self.submit(fs).await,
            SessionKey::Up => self.recall_previous(),
            SessionKey::Down => self.recall_next(),
            SessionKey::Tab => self.complete(fs),
        }
    }

    /// Complete the input as a command name. A single match replaces the
    /// input; several are listed below an echo of the prompt and the input
    /// is left alone.
    pub fn complete(&mut self, fs: &VirtualFileSystemView) {
        let matches = Builtin::completions(&self.input);
        match matches.as_slice() {
            [] => {}
            [only] => self.input = only.name().to_string(),
            many => {
                let echo = format!("{}{}", self.prompt(fs), self.input);
                self.scrollback.push(echo);
                self.scrollback
                    .extend(many.iter().map(|builtin| builtin.name().to_string()));
            }
        }
    }
}
