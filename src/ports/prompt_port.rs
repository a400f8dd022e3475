//! Interactive line input port.

use crate::domain::error::RothkitError;

pub trait PromptPort {
    /// Show `label` and read one line, trimmed. `None` once input is exhausted.
    fn prompt(&mut self, label: &str) -> Result<Option<String>, RothkitError>;
}
