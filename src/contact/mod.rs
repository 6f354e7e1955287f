//! Contact form domain.
//!
//! Turns a validated [`Submission`] into a mail [`Envelope`](crate::mail::Envelope)
//! using the configured sender and recipient.

mod composer;
mod render;
mod submission;

pub use composer::ContactComposer;
pub use render::{escape_html, render_html, render_text};
pub use submission::Submission;
