//! Interactive prompts for choices not given on the command line.

use std::io::{self, BufRead, Write};

use tracing::debug;

use crate::mission::Navigator;
use crate::model::{Planet, TaskKind, TaskSelection};

/// Answers mission questions from flags first, then by asking on `output` and reading `input`.
pub(super) struct Prompter<R, W> {
    input: R,
    output: W,
    task: Option<i64>,
    planets: std::vec::IntoIter<Planet>,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub(super) fn new(input: R, output: W, task: Option<i64>, planets: Vec<Planet>) -> Self {
        Self {
            input,
            output,
            task,
            planets: planets.into_iter(),
        }
    }

    /// Prints `Choice: ` and reads one integer.
    ///
    /// Leading digits count (`2abc` is 2). End of input and answers that do
    /// not start with an integer both yield `None`.
    fn read_choice(&mut self) -> io::Result<Option<i64>> {
        write!(self.output, "Choice: ")?;
        self.output.flush()?;

        let mut raw = Vec::new();
        if self.input.read_until(b'\n', &mut raw)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        let line = String::from_utf8_lossy(&raw);
        let choice = leading_integer(&line);
        if choice.is_none() {
            debug!(input = line.trim(), "unreadable menu choice");
        }
        Ok(choice)
    }
}

/// Parses the integer at the start of `input`: optional whitespace, an
/// optional sign, then digits. Anything after the digits is ignored.
fn leading_integer(input: &str) -> Option<i64> {
    let s = input.trim_start();
    let sign_len = usize::from(s.starts_with(['+', '-']));
    let digits = s[sign_len..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    if digits == 0 {
        return None;
    }
    s[..sign_len + digits].parse().ok()
}

impl<R: BufRead, W: Write> Navigator for Prompter<R, W> {
    fn choose_task(&mut self) -> io::Result<TaskSelection> {
        if let Some(choice) = self.task {
            return Ok(TaskSelection::from_choice(Some(choice)));
        }

        writeln!(self.output, "Select a task to perform on all planets:")?;
        for (i, task) in TaskKind::ALL.iter().enumerate() {
            writeln!(self.output, "{}: {}", i + 1, task.title())?;
        }
        Ok(TaskSelection::from_choice(self.read_choice()?))
    }

    fn choose_planet(&mut self, leg: u32) -> io::Result<Planet> {
        if let Some(planet) = self.planets.next() {
            debug!(leg, %planet, "planet given on command line");
            return Ok(planet);
        }

        writeln!(self.output, "Select a planet to visit:")?;
        for (i, planet) in Planet::ALL.iter().enumerate() {
            writeln!(self.output, "{}: {planet}", i + 1)?;
        }
        match self.read_choice()?.and_then(Planet::from_choice) {
            Some(planet) => Ok(planet),
            None => {
                writeln!(self.output, "Invalid selection. Defaulting to Mars.")?;
                Ok(Planet::Mars)
            }
        }
    }
}
