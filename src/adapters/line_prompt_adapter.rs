//! Prompt adapter over any line reader and writer (stdin/stdout in the CLI).

use std::io::{self, BufRead, Stdout, StdinLock, Write};

use crate::domain::error::RothkitError;
use crate::ports::prompt_port::PromptPort;

pub struct LinePromptAdapter<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> LinePromptAdapter<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    pub fn into_writer(self) -> W {
        self.writer
    }
}

impl LinePromptAdapter<StdinLock<'static>, Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> PromptPort for LinePromptAdapter<R, W> {
    fn prompt(&mut self, label: &str) -> Result<Option<String>, RothkitError> {
        write!(self.writer, "{label}")?;
        self.writer.flush()?;

        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}
