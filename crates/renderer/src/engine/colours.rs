// SPDX-License-Identifier: MIT

//!
//! Colours
//!

use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// The colour of a range lane.  These are named colours the host defines as
/// CSS variables.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RangeColour {
    #[display("red")]
    Red,
    #[display("orange")]
    Orange,
    #[display("yellow")]
    Yellow,
    #[display("green")]
    Green,
    #[display("cyan")]
    Cyan,
    #[display("blue")]
    Blue,
    #[display("purple")]
    Purple,
    #[display("pink")]
    Pink,
}

impl RangeColour {
    /// The palette, in lane order
    pub const ALL: [RangeColour; 8] = [
        RangeColour::Red,
        RangeColour::Orange,
        RangeColour::Yellow,
        RangeColour::Green,
        RangeColour::Cyan,
        RangeColour::Blue,
        RangeColour::Purple,
        RangeColour::Pink,
    ];

    /// The colour of a lane (if there is one)
    pub fn for_lane(lane: usize) -> Option<Self> {
        Self::ALL.get(lane).copied()
    }

    /// e.g. `var(--color-red)`
    pub fn css_variable(&self) -> String {
        format!("var(--color-{self})")
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn palette() {
        assert_eq!(RangeColour::for_lane(0), Some(RangeColour::Red));
        assert_eq!(RangeColour::for_lane(7), Some(RangeColour::Pink));
        assert_eq!(RangeColour::for_lane(8), None);
        assert_eq!(RangeColour::Cyan.css_variable(), "var(--color-cyan)");
        assert_eq!(
            serde_json::to_string(&RangeColour::Purple).unwrap(),
            "\"purple\""
        );
    }
}
