use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use rs_utils::{Categorized, ItemKey, TableRecord, TextureCoord};

/// Creative inventory tab an item is listed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemCategory {
    /// `ALLCAT`: only reachable through the catch-all tab.
    All,
    Build,
    Deco,
    Redstone,
    Crops,
    Rails,
}

impl ItemCategory {
    pub const VARIANTS: [ItemCategory; 6] = [
        ItemCategory::All,
        ItemCategory::Build,
        ItemCategory::Deco,
        ItemCategory::Redstone,
        ItemCategory::Crops,
        ItemCategory::Rails,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ItemCategory::All => "ALLCAT",
            ItemCategory::Build => "BUILD",
            ItemCategory::Deco => "DECO",
            ItemCategory::Redstone => "REDSTONE",
            ItemCategory::Crops => "CROPS",
            ItemCategory::Rails => "RAILS",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::VARIANTS.into_iter().find(|c| c.name() == name)
    }
}

impl fmt::Display for ItemCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ItemCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| format!("unknown item category '{s}'"))
    }
}

/// Material tiers that stand in for a durability number in the item table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolTier {
    Diamond,
    Iron,
    Stone,
    Wood,
    Gold,
}

impl ToolTier {
    pub const VARIANTS: [ToolTier; 5] = [
        ToolTier::Diamond,
        ToolTier::Iron,
        ToolTier::Stone,
        ToolTier::Wood,
        ToolTier::Gold,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ToolTier::Diamond => "DIAMOND",
            ToolTier::Iron => "IRON",
            ToolTier::Stone => "STONE",
            ToolTier::Wood => "WOOD",
            ToolTier::Gold => "GOLD",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::VARIANTS.into_iter().find(|t| t.name() == name)
    }

    pub fn max_uses(self) -> u32 {
        match self {
            ToolTier::Diamond => 1561,
            ToolTier::Iron => 250,
            ToolTier::Stone => 131,
            ToolTier::Wood => 59,
            ToolTier::Gold => 32,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Durability {
    Tier(ToolTier),
    Uses(u32),
}

impl Durability {
    pub fn max_uses(self) -> u32 {
        match self {
            Durability::Tier(tier) => tier.max_uses(),
            Durability::Uses(uses) => uses,
        }
    }
}

/// One validated row of the item table.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    pub id: u32,
    pub state: u16,
    pub name: String,
    pub stack_size: u8,
    pub category: ItemCategory,
    pub texture: TextureCoord,
    pub durability: Option<Durability>,
    /// Technical name of the block placed by this item.
    pub creates_block: Option<String>,
    pub creates_tile_entity: Option<String>,
    pub tech: Option<String>,
}

impl CatalogEntry {
    pub fn key(&self) -> ItemKey {
        ItemKey::new(self.id, self.state)
    }

    /// Technical name: the explicit `tech` hook, or else the display name,
    /// in lower case with spaces turned into underscores.
    pub fn tech_name(&self) -> Cow<'_, str> {
        let raw = self.tech.as_deref().unwrap_or(&self.name);
        if !raw.bytes().any(|b| b == b' ' || b.is_ascii_uppercase()) {
            return Cow::Borrowed(raw);
        }
        Cow::Owned(
            raw.chars()
                .map(|c| if c == ' ' { '_' } else { c.to_ascii_lowercase() })
                .collect(),
        )
    }

    pub fn max_durability(&self) -> Option<u32> {
        self.durability.map(Durability::max_uses)
    }

    /// Remaining durability in 1/16 steps, `None` for items without
    /// durability or worn past their limit.
    pub fn remaining_durability(&self, uses: u32) -> Option<f32> {
        let max = self.max_durability()?;
        if max == 0 || uses > max {
            return None;
        }
        let sixteenths = u64::from(max - uses) * 16 / u64::from(max);
        Some(sixteenths as f32 * 0.0625)
    }

    /// Adds `add` items to a stack holding `count`; returns the new count
    /// and the leftovers that do not fit.
    pub fn add_to_stack(&self, count: u8, add: u32) -> (u8, u32) {
        let max = u32::from(self.stack_size);
        let total = u32::from(count).saturating_add(add);
        if total > max {
            (self.stack_size, total - max)
        } else {
            (total as u8, 0)
        }
    }
}

impl TableRecord for CatalogEntry {
    type Key = ItemKey;

    fn key(&self) -> ItemKey {
        CatalogEntry::key(self)
    }
}

impl Categorized for CatalogEntry {
    type Category = ItemCategory;

    fn category(&self) -> ItemCategory {
        self.category
    }
}
