//! Line-oriented calculator session: enter a resource group, a list of fusion
//! measurements and their outcomes, then print the updated generators.

use crate::core::pauli::{PauliString, Sign, Stabilizer};
use crate::core::update::{update_resource_with_fusions, Outcomes};
use crate::utils::error::Result;
use std::io::{BufRead, Write};

const INVALID_GENERATOR: &str = "Invalid input. Please enter in the format: sign,string";

enum Flow {
    Continue,
    Eof,
}

pub struct CalculatorSession<R: BufRead, W: Write> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> CalculatorSession<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Run the menu until the user exits or input ends.
    pub fn run(&mut self) -> Result<()> {
        loop {
            writeln!(self.output, "\n==========================================")?;
            writeln!(self.output, "Welcome to the SS Group Calculator!")?;
            writeln!(self.output, "==========================================\n")?;
            writeln!(self.output, "Please select an option:")?;
            writeln!(self.output, "1. Calculate Stabilizer Group")?;
            writeln!(self.output, "2. Exit\n")?;

            let Some(choice) = self.prompt("Enter your choice (1 or 2): ")? else {
                return Ok(());
            };

            match choice.trim() {
                "1" => {
                    if let Flow::Eof = self.calculate()? {
                        return Ok(());
                    }
                }
                "2" => {
                    writeln!(self.output, "Exiting the program. Goodbye!")?;
                    return Ok(());
                }
                _ => writeln!(self.output, "Invalid choice. Please try again.")?,
            }
        }
    }

    fn calculate(&mut self) -> Result<Flow> {
        writeln!(
            self.output,
            "Enter the resource stabilizer generators (sign, string) one per line:"
        )?;

        let mut resource = Vec::new();
        loop {
            let Some(line) = self.prompt("Enter stabilizer (or 'done' to finish): ")? else {
                return Ok(Flow::Eof);
            };
            if is_done(&line) {
                break;
            }
            match parse_generator_line(&line) {
                Some(generator) => resource.push(generator),
                None => writeln!(self.output, "{}", INVALID_GENERATOR)?,
            }
        }

        writeln!(self.output, "\nEnter the fusion measurements (string) one per line:")?;

        let mut fusions = Vec::new();
        loop {
            let Some(line) = self.prompt("Enter fusion measurement (or 'done' to finish): ")?
            else {
                return Ok(Flow::Eof);
            };
            if is_done(&line) {
                break;
            }
            if line.trim().is_empty() {
                continue;
            }
            match line.parse::<PauliString>() {
                Ok(measurement) => fusions.push(measurement),
                Err(e) => writeln!(self.output, "Invalid measurement: {}", e)?,
            }
        }

        writeln!(
            self.output,
            "\nEnter the outcomes for each fusion measurement (optional):"
        )?;

        let mut outcomes = Outcomes::new();
        for fusion in &fusions {
            let prompt = format!("Enter outcome for '{}' (default is +1): ", fusion);
            let Some(line) = self.prompt(&prompt)? else {
                return Ok(Flow::Eof);
            };

            let outcome = match line.trim() {
                "" => Sign::Plus,
                raw => match raw.trim_start_matches('+').parse::<i64>() {
                    Ok(value) => Sign::from_int(value),
                    Err(_) => {
                        writeln!(self.output, "Invalid outcome. Defaulting to +1.")?;
                        Sign::Plus
                    }
                },
            };
            outcomes.insert(fusion.clone(), outcome);
        }

        match update_resource_with_fusions(&resource, &fusions, &outcomes) {
            Ok(result) => {
                writeln!(
                    self.output,
                    "\nUpdated resource stabilizer generators after fusion measurements:"
                )?;
                for g in &result.generators {
                    writeln!(self.output, "   {}", g.pretty())?;
                }
            }
            Err(e) => {
                tracing::warn!("Interactive update failed: {}", e);
                writeln!(self.output, "\nError: {}", e.user_friendly_message())?;
                writeln!(self.output, "Hint: {}", e.recovery_suggestion())?;
            }
        }

        Ok(Flow::Continue)
    }

    fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

fn is_done(line: &str) -> bool {
    line.trim().eq_ignore_ascii_case("done")
}

/// Parse `sign,string`, e.g. `1,XXI` or `-1, ZZI`.
fn parse_generator_line(line: &str) -> Option<Stabilizer> {
    let (sign, pauli) = line.split_once(',')?;
    if pauli.contains(',') {
        return None;
    }
    let sign = sign.trim().trim_start_matches('+').parse::<i64>().ok()?;
    let pauli = pauli.parse::<PauliString>().ok()?;
    Some(Stabilizer::new(Sign::from_int(sign), pauli))
}
