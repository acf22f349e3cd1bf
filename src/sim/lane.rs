//! The three running lanes

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::{LANE_OFFSET_CENTER, LANE_OFFSET_LEFT, LANE_OFFSET_RIGHT};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Lane {
    Left,
    #[default]
    Center,
    Right,
}

impl Lane {
    pub const ALL: [Lane; 3] = [Lane::Left, Lane::Center, Lane::Right];

    /// World X offset of the lane center
    #[inline]
    pub fn offset(self) -> f32 {
        match self {
            Lane::Left => LANE_OFFSET_LEFT,
            Lane::Center => LANE_OFFSET_CENTER,
            Lane::Right => LANE_OFFSET_RIGHT,
        }
    }

    /// Lane one step to the left, if any
    pub fn left(self) -> Option<Lane> {
        match self {
            Lane::Left => None,
            Lane::Center => Some(Lane::Left),
            Lane::Right => Some(Lane::Center),
        }
    }

    /// Lane one step to the right, if any
    pub fn right(self) -> Option<Lane> {
        match self {
            Lane::Left => Some(Lane::Center),
            Lane::Center => Some(Lane::Right),
            Lane::Right => None,
        }
    }

    /// Lane whose center is nearest to `x`
    pub fn nearest(x: f32) -> Lane {
        Lane::ALL
            .into_iter()
            .min_by(|a, b| {
                (a.offset() - x)
                    .abs()
                    .partial_cmp(&(b.offset() - x).abs())
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .unwrap_or_default()
    }
}

impl fmt::Display for Lane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Lane::Left => "left",
            Lane::Center => "center",
            Lane::Right => "right",
        };
        f.write_str(name)
    }
}
