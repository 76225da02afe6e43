//! Resource kinds and the per-player ledger.

use std::fmt;
use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

/// A resource that can be dug out of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum ResourceKind {
    /// Scoring resource.
    Diamond = 0,
    /// Spent on new units.
    Gold = 1,
    /// Gates unit speed-ups.
    Oil = 2,
}

impl ResourceKind {
    /// All kinds in ledger order.
    pub const ALL: [ResourceKind; 3] = [ResourceKind::Diamond, ResourceKind::Gold, ResourceKind::Oil];

    /// Lowercase name as used in configuration files.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            ResourceKind::Diamond => "diamond",
            ResourceKind::Gold => "gold",
            ResourceKind::Oil => "oil",
        }
    }

    /// Look a kind up by its configuration name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// Ledger slot of this kind.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Counters for every resource kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Resources {
    /// Diamonds held.
    #[serde(default)]
    pub diamond: u32,
    /// Gold held.
    #[serde(default)]
    pub gold: u32,
    /// Oil held.
    #[serde(default)]
    pub oil: u32,
}

impl Resources {
    /// Create a ledger from explicit amounts.
    #[must_use]
    pub const fn new(diamond: u32, gold: u32, oil: u32) -> Self {
        Self { diamond, gold, oil }
    }

    /// Add `amount` of `kind`, saturating at `u32::MAX`.
    pub fn credit(&mut self, kind: ResourceKind, amount: u32) {
        self[kind] = self[kind].saturating_add(amount);
    }

    /// Remove `amount` of `kind`.
    ///
    /// Returns `false` and leaves the ledger untouched if the balance is short.
    pub fn debit(&mut self, kind: ResourceKind, amount: u32) -> bool {
        match self[kind].checked_sub(amount) {
            Some(rest) => {
                self[kind] = rest;
                true
            }
            None => false,
        }
    }

    /// Amounts in ledger order (diamond, gold, oil).
    #[must_use]
    pub const fn to_array(self) -> [u32; 3] {
        [self.diamond, self.gold, self.oil]
    }
}

impl Index<ResourceKind> for Resources {
    type Output = u32;

    fn index(&self, kind: ResourceKind) -> &u32 {
        match kind {
            ResourceKind::Diamond => &self.diamond,
            ResourceKind::Gold => &self.gold,
            ResourceKind::Oil => &self.oil,
        }
    }
}

impl IndexMut<ResourceKind> for Resources {
    fn index_mut(&mut self, kind: ResourceKind) -> &mut u32 {
        match kind {
            ResourceKind::Diamond => &mut self.diamond,
            ResourceKind::Gold => &mut self.gold,
            ResourceKind::Oil => &mut self.oil,
        }
    }
}

impl fmt::Display for Resources {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "diamond={} gold={} oil={}",
            self.diamond, self.gold, self.oil
        )
    }
}
