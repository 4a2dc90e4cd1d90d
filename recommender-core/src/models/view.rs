use crate::models::book::BookRecord;
use crate::models::errors::ViewError;
use crate::models::state::DisplayFlags;

/// Receiver of the render instruction stream. The core never reads back.
pub trait View {
    fn clear(&mut self);

    fn add_heading(&mut self, text: &str);

    /// Present one record: title, authors, poster, and the date and rating
    /// lines the flags ask for.
    ///
    /// A poster that cannot be fetched or decoded must be skipped inside the
    /// view while the text fields are still shown. `Err` means the record
    /// could not be presented at all; it only affects this record.
    fn add_record(&mut self, record: &BookRecord, flags: DisplayFlags) -> Result<(), ViewError>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum RenderInstruction {
    Clear,
    Heading(String),
    Record(BookRecord, DisplayFlags),
}

/// View that keeps every instruction it receives.
#[derive(Debug, Default)]
pub struct RecordingView {
    instructions: Vec<RenderInstruction>,
}

impl RecordingView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn instructions(&self) -> &[RenderInstruction] {
        &self.instructions
    }

    /// Instructions emitted after the most recent `Clear`.
    pub fn current(&self) -> &[RenderInstruction] {
        let start = self
            .instructions
            .iter()
            .rposition(|instruction| *instruction == RenderInstruction::Clear)
            .map(|pos| pos + 1)
            .unwrap_or(0);
        &self.instructions[start..]
    }

    pub fn headings(&self) -> Vec<&str> {
        self.current()
            .iter()
            .filter_map(|instruction| match instruction {
                RenderInstruction::Heading(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn titles(&self) -> Vec<&str> {
        self.current()
            .iter()
            .filter_map(|instruction| match instruction {
                RenderInstruction::Record(record, _) => Some(record.title.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn take(&mut self) -> Vec<RenderInstruction> {
        std::mem::take(&mut self.instructions)
    }
}

impl View for RecordingView {
    fn clear(&mut self) {
        self.instructions.push(RenderInstruction::Clear);
    }

    fn add_heading(&mut self, text: &str) {
        self.instructions
            .push(RenderInstruction::Heading(text.to_string()));
    }

    fn add_record(&mut self, record: &BookRecord, flags: DisplayFlags) -> Result<(), ViewError> {
        self.instructions
            .push(RenderInstruction::Record(record.clone(), flags));
        Ok(())
    }
}
