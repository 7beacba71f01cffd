//! Pipeline stages for document summarization.
//!
//! Each submodule implements exactly one transformation step. Keeping stages
//! separate makes each independently testable and lets us swap an
//! implementation (e.g. a different extraction backend) without touching the
//! other stages.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ extract ──▶ generate
//! (file)    (plain text)  (summary text)
//! ```
//!
//! 1. [`input`]    — validate the selected file and load its bytes
//! 2. [`extract`]  — pull embedded text out of the PDF; runs in
//!    `spawn_blocking` because parsing is CPU-bound
//! 3. [`generate`] — drive the API call with retry/backoff; the only stage
//!    with network I/O

pub mod extract;
pub mod generate;
pub mod input;
