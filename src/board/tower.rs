//! Towers: three stackable levels and an optional dome.

use serde::Serialize;

use crate::error::SetupError;

/// Highest buildable level. A dome can only cap a tower at this level.
pub const MAX_LEVEL: u8 = 3;

/// A buildable structure on one cell.
///
/// Levels only go up, one at a time, and a dome implies `MAX_LEVEL`.
/// Both hold by construction: the only mutators are `build_level` and
/// `add_dome`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Tower {
    level: u8,
    dome: bool,
}

impl Tower {
    /// A fresh level-0 tower, as created by the first build on a cell.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A tower at an arbitrary legal state, for scenario setup.
    pub fn with_level(level: u8, dome: bool) -> Result<Self, SetupError> {
        if level > MAX_LEVEL || (dome && level < MAX_LEVEL) {
            return Err(SetupError::InvalidTower { level, dome });
        }
        Ok(Self { level, dome })
    }

    #[must_use]
    pub fn level(&self) -> u8 {
        self.level
    }

    #[must_use]
    pub fn has_dome(&self) -> bool {
        self.dome
    }

    /// True if another level fits under the cap.
    #[must_use]
    pub fn can_build_level(&self) -> bool {
        self.level < MAX_LEVEL && !self.dome
    }

    /// Add one level. Fails at `MAX_LEVEL` or under a dome.
    pub fn build_level(&mut self) -> bool {
        if !self.can_build_level() {
            return false;
        }
        self.level += 1;
        true
    }

    /// Cap the tower. Fails below `MAX_LEVEL` or if already domed.
    pub fn add_dome(&mut self) -> bool {
        if self.dome || self.level != MAX_LEVEL {
            return false;
        }
        self.dome = true;
        true
    }

    /// One build step: a level while below the cap, then the dome.
    pub fn build(&mut self) -> bool {
        if self.level < MAX_LEVEL {
            self.build_level()
        } else {
            self.add_dome()
        }
    }
}

impl std::fmt::Display for Tower {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.dome {
            write!(f, "L{}+dome", self.level)
        } else {
            write!(f, "L{}", self.level)
        }
    }
}
