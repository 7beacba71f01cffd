//! System clipboard access for the copy action.

use crate::error::BriefError;
use copypasta::{ClipboardContext, ClipboardProvider};

/// Copy `text` to the system clipboard verbatim.
pub fn copy_to_clipboard(text: &str) -> Result<(), BriefError> {
    let mut ctx = ClipboardContext::new().map_err(|e| BriefError::ClipboardFailure {
        detail: e.to_string(),
    })?;
    ctx.set_contents(text.to_owned())
        .map_err(|e| BriefError::ClipboardFailure {
            detail: e.to_string(),
        })
}
