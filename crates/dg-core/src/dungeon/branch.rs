//! Dungeon branches and level addressing.

use serde::{Deserialize, Serialize};

/// A named dungeon sub-map with its own sequence of numbered levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Branch {
    #[default]
    Main,
    Caves,
    Sunken,
}

impl Branch {
    /// Depth of the deepest level in this branch. The deepest level gets no
    /// down-stairway.
    pub const fn deepest(&self) -> u8 {
        match self {
            Branch::Main => 25,
            Branch::Caves => 8,
            Branch::Sunken => 6,
        }
    }

    pub const fn name(&self) -> &'static str {
        match self {
            Branch::Main => "The Main Dungeon",
            Branch::Caves => "The Howling Caves",
            Branch::Sunken => "The Sunken Halls",
        }
    }
}

/// Address of one level: (branch, level number).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct LevelId {
    pub branch: Branch,
    pub depth: u8,
}

impl LevelId {
    pub const fn new(branch: Branch, depth: u8) -> Self {
        Self { branch, depth }
    }

    pub const fn is_deepest(&self) -> bool {
        self.depth >= self.branch.deepest()
    }
}

impl std::fmt::Display for LevelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.branch.name(), self.depth)
    }
}
