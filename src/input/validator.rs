use anyhow::{Context, Result};
use std::io::{BufRead, Write};

use crate::database::CategoryId;
use crate::errors::InputError;

/// Reads category ids line by line, re-prompting on bad input.
pub struct InputValidator<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> InputValidator<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    /// Where prompts and retry messages are written.
    pub fn output(&mut self) -> &mut W {
        &mut self.writer
    }

    pub fn read_category_id(
        &mut self,
        min_id: CategoryId,
        max_id: CategoryId,
        max_attempts: usize,
    ) -> Result<CategoryId> {
        let mut attempts = 0;

        while attempts < max_attempts {
            let line = self.next_line()?.ok_or(InputError::NoInput)?;

            match parse_category_id(&line, min_id, max_id) {
                Ok(id) => return Ok(id),
                Err(err) => {
                    attempts += 1;
                    if attempts < max_attempts {
                        self.report_retry(&err, attempts, max_attempts)?;
                    }
                }
            }
        }

        Err(InputError::AttemptsExceeded(max_attempts).into())
    }

    fn next_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        let read = self
            .reader
            .read_line(&mut line)
            .context("Error reading input")?;

        Ok((read > 0).then_some(line))
    }

    fn report_retry(&mut self, err: &InputError, attempts: usize, max_attempts: usize) -> Result<()> {
        write!(
            self.writer,
            "Error: {}. Please try again ({}/{}): ",
            err, attempts, max_attempts
        )?;
        self.writer.flush()?;
        Ok(())
    }
}

pub fn validate_category_id(
    id: CategoryId,
    min_id: CategoryId,
    max_id: CategoryId,
) -> Result<(), InputError> {
    if id < min_id {
        return Err(InputError::BelowMinimum { id, min: min_id });
    }
    if id > max_id {
        return Err(InputError::AboveMaximum { id, max: max_id });
    }
    Ok(())
}

pub fn parse_category_id(
    input: &str,
    min_id: CategoryId,
    max_id: CategoryId,
) -> Result<CategoryId, InputError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(InputError::Empty);
    }

    let id = input
        .parse::<CategoryId>()
        .map_err(|_| InputError::NotANumber(input.to_string()))?;

    validate_category_id(id, min_id, max_id)?;
    Ok(id)
}
