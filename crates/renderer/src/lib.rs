// SPDX-License-Identifier: MIT

//!
//! *Part of the vault-timeline project*
//!
//! This crate works out where the range bars of a timeline are drawn.  It is
//! platform independent: the host measures the rendered cards and passes the
//! measurements in, and gets back plain geometry to draw.
//!
//! The core of the crate is an engine responsible for:
//!
//! - Positioning the end of each range between the cards around its end date
//! - Putting ranges into a fixed number of coloured lanes
//! - Providing a simple API for frontends
//!

mod engine;

pub use engine::*;
