//! Items: weapons, armor, consumables and wondrous objects.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::DomainError;

/// A mundane or magical item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub name: String,
    #[serde(rename = "type")]
    pub item_type: ItemType,
    pub rarity: ItemRarity,
    pub requires_attunement: bool,
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub damage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub damage_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub armor_class: Option<u32>,
    /// Pounds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<Cost>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub magical_properties: Vec<String>,
}

impl Item {
    pub fn validate(&self) -> Result<(), DomainError> {
        if let Some(weight) = self.weight {
            if !weight.is_finite() || weight < 0.0 {
                return Err(DomainError::validation(format!(
                    "item weight {} must be a non-negative number",
                    weight
                )));
            }
        }
        if let Some(cost) = &self.cost {
            if cost.currency.trim().is_empty() {
                return Err(DomainError::validation("item cost needs a currency"));
            }
        }
        Ok(())
    }
}

/// Market price, e.g. 50 gp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cost {
    pub amount: u32,
    pub currency: String,
}

impl fmt::Display for Cost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.currency)
    }
}

/// Item category. Anything outside the usual list is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ItemType {
    Weapon,
    Armor,
    Shield,
    Potion,
    Scroll,
    Wondrous,
    Tool,
    Treasure,
    Other(String),
}

impl ItemType {
    pub fn as_str(&self) -> &str {
        match self {
            ItemType::Weapon => "weapon",
            ItemType::Armor => "armor",
            ItemType::Shield => "shield",
            ItemType::Potion => "potion",
            ItemType::Scroll => "scroll",
            ItemType::Wondrous => "wondrous",
            ItemType::Tool => "tool",
            ItemType::Treasure => "treasure",
            ItemType::Other(s) => s,
        }
    }
}

impl From<String> for ItemType {
    fn from(s: String) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "weapon" => ItemType::Weapon,
            "armor" | "armour" => ItemType::Armor,
            "shield" => ItemType::Shield,
            "potion" => ItemType::Potion,
            "scroll" => ItemType::Scroll,
            "wondrous" | "wondrous item" => ItemType::Wondrous,
            "tool" => ItemType::Tool,
            "treasure" => ItemType::Treasure,
            _ => ItemType::Other(s),
        }
    }
}

impl From<ItemType> for String {
    fn from(t: ItemType) -> Self {
        t.as_str().to_string()
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ItemRarity {
    Common,
    Uncommon,
    Rare,
    VeryRare,
    Legendary,
    Artifact,
}

impl ItemRarity {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemRarity::Common => "common",
            ItemRarity::Uncommon => "uncommon",
            ItemRarity::Rare => "rare",
            ItemRarity::VeryRare => "very rare",
            ItemRarity::Legendary => "legendary",
            ItemRarity::Artifact => "artifact",
        }
    }
}

impl FromStr for ItemRarity {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['_', '-'], " ");
        match normalized.as_str() {
            "common" => Ok(ItemRarity::Common),
            "uncommon" => Ok(ItemRarity::Uncommon),
            "rare" => Ok(ItemRarity::Rare),
            "very rare" | "veryrare" => Ok(ItemRarity::VeryRare),
            "legendary" => Ok(ItemRarity::Legendary),
            "artifact" => Ok(ItemRarity::Artifact),
            _ => Err(DomainError::parse(format!("Unknown item rarity: {}", s))),
        }
    }
}

impl TryFrom<String> for ItemRarity {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<ItemRarity> for String {
    fn from(r: ItemRarity) -> Self {
        r.as_str().to_string()
    }
}

impl fmt::Display for ItemRarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
