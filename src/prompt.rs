//! Interactive questions that repeat until a valid answer arrives.
//!
//! A [`Prompt`] is a small state machine:
//!
//! ```text
//!  AwaitingInput --valid--> Valid
//!       ^   |
//!       |   +--invalid--> InvalidRetry --(next line)--> ...
//!       +-------------------------+
//! ```
//!
//! There is no attempt limit. The only way out besides a valid answer is end
//! of input on the console, reported as [`Error::InputClosed`].

use std::io::{BufRead, Write};

use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::resolver::MassSource;

/// Line-oriented operator console.
pub trait Console {
    /// Shows `message` and reads one line, without its line terminator.
    /// `None` means the input is exhausted.
    fn ask(&mut self, message: &str) -> Result<Option<String>>;

    /// Shows a one-line notice.
    fn notify(&mut self, notice: &str) -> Result<()>;
}

/// [`Console`] over any reader/writer pair, e.g. locked stdin and stdout.
pub struct ConsoleIo<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> ConsoleIo<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> Console for ConsoleIo<R, W> {
    fn ask(&mut self, message: &str) -> Result<Option<String>> {
        write!(self.output, "{message}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    fn notify(&mut self, notice: &str) -> Result<()> {
        writeln!(self.output, "{notice}")?;
        self.output.flush()?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PromptState<T> {
    AwaitingInput,
    InvalidRetry { attempts: usize },
    Valid(T),
}

/// One question, its parser and the notice shown after a rejected answer.
pub struct Prompt<T, F> {
    message: String,
    invalid_notice: String,
    parse: F,
    state: PromptState<T>,
}

impl<T, F> Prompt<T, F>
where
    F: FnMut(&str) -> Option<T>,
{
    pub fn new(message: impl Into<String>, invalid_notice: impl Into<String>, parse: F) -> Self {
        Self {
            message: message.into(),
            invalid_notice: invalid_notice.into(),
            parse,
            state: PromptState::AwaitingInput,
        }
    }

    pub fn state(&self) -> &PromptState<T> {
        &self.state
    }

    /// Feeds one answer. A prompt that is already `Valid` ignores further input.
    pub fn step(&mut self, line: &str) -> &PromptState<T> {
        if matches!(self.state, PromptState::Valid(_)) {
            return &self.state;
        }
        self.state = match (self.parse)(line) {
            Some(value) => PromptState::Valid(value),
            None => {
                let attempts = match self.state {
                    PromptState::InvalidRetry { attempts } => attempts + 1,
                    _ => 1,
                };
                PromptState::InvalidRetry { attempts }
            }
        };
        &self.state
    }

    /// Asks on `console` until an answer parses.
    pub fn run(mut self, console: &mut (impl Console + ?Sized)) -> Result<T> {
        loop {
            let Some(line) = console.ask(&self.message)? else {
                return Err(Error::InputClosed(self.message.trim_end().to_owned()));
            };
            let attempts = match self.step(&line) {
                PromptState::Valid(_) => break,
                PromptState::InvalidRetry { attempts } => *attempts,
                PromptState::AwaitingInput => unreachable!("an answer always leaves AwaitingInput"),
            };
            trace!(attempts, answer = %line, "rejected answer");
            console.notify(&self.invalid_notice)?;
        }
        match self.state {
            PromptState::Valid(value) => Ok(value),
            _ => unreachable!(),
        }
    }
}

/// Parses a non-negative finite mass.
pub fn parse_mass(line: &str) -> Option<f64> {
    line.trim()
        .parse::<f64>()
        .ok()
        .filter(|m| m.is_finite() && *m >= 0.0)
}

/// [`MassSource`] that asks the operator on a console.
pub struct ConsoleMassSource<'c, C: ?Sized> {
    console: &'c mut C,
}

impl<'c, C: Console + ?Sized> ConsoleMassSource<'c, C> {
    pub fn new(console: &'c mut C) -> Self {
        Self { console }
    }
}

impl<C: Console + ?Sized> MassSource for ConsoleMassSource<'_, C> {
    fn mass_for(&mut self, color_name: &str) -> Result<f64> {
        let mass = Prompt::new(
            format!("Type mass for color [{color_name}]:\n>>> "),
            "\nInvalid mass.",
            parse_mass,
        )
        .run(&mut *self.console)?;
        debug!(color_name, mass, "mass entered");
        Ok(mass)
    }
}

#[cfg(test)]
mod test {
    use std::io::Cursor;

    use crate::error::Error;
    use crate::prompt::{parse_mass, Console, ConsoleIo, ConsoleMassSource, Prompt, PromptState};
    use crate::resolver::MassSource;

    fn console(input: &str) -> ConsoleIo<Cursor<Vec<u8>>, Vec<u8>> {
        ConsoleIo::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn digit(line: &str) -> Option<u32> {
        line.trim().parse().ok().filter(|d| *d < 10)
    }

    #[test]
    fn state_machine_counts_invalid_attempts() {
        let mut prompt = Prompt::new("?", "bad", digit);
        assert_eq!(&PromptState::AwaitingInput, prompt.state());
        assert_eq!(&PromptState::InvalidRetry { attempts: 1 }, prompt.step("x"));
        assert_eq!(&PromptState::InvalidRetry { attempts: 2 }, prompt.step("42"));
        assert_eq!(&PromptState::Valid(7), prompt.step("7"));
        assert_eq!(&PromptState::Valid(7), prompt.step("8"));
    }

    #[test]
    fn run_retries_until_valid() {
        let mut io = console("nope\n\n12\n3\n9\n");
        let value = Prompt::new("Pick:\n>>> ", "\nInvalid.", digit).run(&mut io).unwrap();
        assert_eq!(3, value);

        let transcript = String::from_utf8(io.into_output()).unwrap();
        assert_eq!(4, transcript.matches("Pick:").count());
        assert_eq!(3, transcript.matches("Invalid.").count());
    }

    #[test]
    fn closed_input_ends_the_prompt() {
        let mut io = console("bad\n");
        let err = Prompt::new("Pick:\n>>> ", "\nInvalid.", digit).run(&mut io).unwrap_err();
        assert!(matches!(err, Error::InputClosed(ref what) if what == "Pick:\n>>>"));
    }

    #[test]
    fn console_strips_line_endings() {
        let mut io = console("a b\r\nlast");
        assert_eq!(Some("a b".to_owned()), io.ask("").unwrap());
        assert_eq!(Some("last".to_owned()), io.ask("").unwrap());
        assert_eq!(None, io.ask("").unwrap());
    }

    #[test]
    fn mass_parser_accepts_non_negative_reals() {
        assert_eq!(Some(2.5), parse_mass(" 2.5 "));
        assert_eq!(Some(0.0), parse_mass("0"));
        assert_eq!(Some(1e3), parse_mass("1e3"));
        assert_eq!(None, parse_mass("-1"));
        assert_eq!(None, parse_mass("inf"));
        assert_eq!(None, parse_mass("NaN"));
        assert_eq!(None, parse_mass("ten"));
        assert_eq!(None, parse_mass(""));
    }

    #[test]
    fn console_mass_source_reprompts() {
        let mut io = console("heavy\n-3\n4.25\n");
        let mass = ConsoleMassSource::new(&mut io).mass_for("red").unwrap();
        assert_eq!(4.25, mass);
        let transcript = String::from_utf8(io.into_output()).unwrap();
        assert_eq!(3, transcript.matches("Type mass for color [red]:").count());
        assert_eq!(2, transcript.matches("Invalid mass.").count());
    }
}
