use recommender_core::{BookRecord, DisplayFlags, View, ViewError};
use std::io::Write;
use tracing::warn;

const RULE: &str = "----------------------------------------";

/// Plain-text view writing one block per record.
pub struct ConsoleView<W: Write> {
    out: W,
}

impl<W: Write> ConsoleView<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    #[cfg(test)]
    pub fn get_ref(&self) -> &W {
        &self.out
    }

    /// Write a line outside of the render stream (prompts, alerts, errors).
    pub fn note(&mut self, text: &str) {
        if let Err(e) = writeln!(self.out, "{}", text).and_then(|_| self.out.flush()) {
            warn!("Failed to write to console: {}", e);
        }
    }

    fn write_record(&mut self, record: &BookRecord, flags: DisplayFlags) -> std::io::Result<()> {
        writeln!(self.out, "  {}", record.title)?;
        if !record.authors.is_empty() {
            writeln!(self.out, "    Author(s): {}", record.authors.join(", "))?;
        }
        if let Some(poster) = &record.poster_url {
            writeln!(self.out, "    Poster: {}", poster)?;
        }
        if flags.show_date {
            writeln!(self.out, "    Date: {}", record.date_label())?;
        }
        if flags.show_rating {
            writeln!(self.out, "    Rating: {}", record.rating_label())?;
        }
        self.out.flush()
    }
}

impl<W: Write> View for ConsoleView<W> {
    fn clear(&mut self) {
        self.note(RULE);
    }

    fn add_heading(&mut self, text: &str) {
        self.note(&format!("== {} ==", text));
    }

    fn add_record(&mut self, record: &BookRecord, flags: DisplayFlags) -> Result<(), ViewError> {
        self.write_record(record, flags)
            .map_err(|e| ViewError::Other(e.to_string()))
    }
}
