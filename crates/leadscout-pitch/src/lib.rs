//! Optional outreach-pitch generation for website-free businesses.
//!
//! Sends one bundled chat-completions request for the whole result set,
//! parses the model's free-form reply leniently, and matches pitches back
//! to businesses by place id. Every failure collapses to "no pitches"; none
//! reaches the caller.

pub mod client;
pub mod error;
pub mod generator;
pub mod matching;
pub mod parse;
pub mod prompt;
pub mod types;

pub use client::{ChatClient, ChatConfig};
pub use error::PitchError;
pub use generator::{PitchContext, PitchGenerator};
pub use matching::attach_pitches;
pub use parse::parse_pitches;
