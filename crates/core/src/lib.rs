// SPDX-License-Identifier: MIT

//!
//! *Part of the vault-timeline project*
//!
//! This crate defines the datatypes that describe a timeline's events:
//! multi-segment abstract dates, the settings used to read and display them,
//! and the content of the cards drawn on a timeline.
//!
//! Values are validated where they enter the crate (settings JSON, note
//! front-matter), so the rest of the project can rely on them being
//! well-formed.
//!

mod card;
mod date;
mod format;
mod metadata;
pub mod presets;
mod settings;
mod token;

pub use card::*;
pub use date::*;
pub use format::*;
pub use metadata::*;
pub use settings::*;
pub use token::*;
