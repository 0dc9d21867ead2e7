//! Character roster records.
//!
//! Records are written wholesale by the guild sync and read by the scoring
//! engine. Skill points are parsed into [`SkillPoints`] once, at the data
//! boundary; legacy documents that store them as `"current/maximum"`
//! strings still deserialize.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// SkillPoints
// ---------------------------------------------------------------------------

/// Profession proficiency as `current / maximum`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct SkillPoints {
    /// Points earned so far.
    pub current: u32,
    /// Points achievable in the tier.
    pub maximum: u32,
}

impl SkillPoints {
    /// Create a skill-points value.
    pub const fn new(current: u32, maximum: u32) -> Self {
        Self { current, maximum }
    }
}

impl fmt::Display for SkillPoints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.current, self.maximum)
    }
}

impl FromStr for SkillPoints {
    type Err = core::convert::Infallible;

    /// Parse `"current/maximum"`. Either side that is not an unsigned
    /// integer reads as 0; a missing `/maximum` reads as maximum 0.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(2, '/');
        let current = parts
            .next()
            .and_then(|p| p.trim().parse().ok())
            .unwrap_or(0);
        let maximum = parts
            .next()
            .and_then(|p| p.trim().parse().ok())
            .unwrap_or(0);
        Ok(Self { current, maximum })
    }
}

/// Either wire form accepted for skill points.
#[derive(Deserialize)]
#[serde(untagged)]
enum SkillPointsRepr {
    Text(String),
    Structured { current: u32, maximum: u32 },
}

impl<'de> Deserialize<'de> for SkillPoints {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match SkillPointsRepr::deserialize(deserializer)? {
            SkillPointsRepr::Text(text) => Ok(text.parse().unwrap_or_default()),
            SkillPointsRepr::Structured { current, maximum } => Ok(Self { current, maximum }),
        }
    }
}

// ---------------------------------------------------------------------------
// ProfessionRecord / CharacterRecord
// ---------------------------------------------------------------------------

/// One profession of a character and the recipes known in it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ProfessionRecord {
    /// Profession display name.
    pub name: String,
    /// Proficiency in the tracked tier.
    #[serde(default)]
    pub skill_points: SkillPoints,
    /// Known recipe display names. Treated as a set.
    #[serde(default)]
    pub recipes: Vec<String>,
}

impl ProfessionRecord {
    /// Whether the profession lists `recipe_name` (case-sensitive).
    pub fn knows(&self, recipe_name: &str) -> bool {
        self.recipes.iter().any(|r| r == recipe_name)
    }

    /// Whether the profession lists `recipe_name`, ignoring ASCII and
    /// Unicode case.
    pub fn knows_ignoring_case(&self, recipe_name: &str) -> bool {
        let wanted = recipe_name.to_lowercase();
        self.recipes.iter().any(|r| r.to_lowercase() == wanted)
    }
}

/// A guild member and their crafting professions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct CharacterRecord {
    /// Normalized, lower-cased character name.
    pub character_name: String,
    /// Realm slug.
    pub realm: String,
    /// Character level.
    #[serde(default)]
    pub level: u32,
    /// Known crafting professions, in the order the game API lists them.
    #[serde(default)]
    pub professions: Vec<ProfessionRecord>,
}

impl CharacterRecord {
    /// Identity key of this record.
    pub fn key(&self) -> CharacterKey {
        CharacterKey::new(&self.character_name, &self.realm)
    }

    /// Whether any profession lists `recipe_name`, ignoring case.
    pub fn knows_ignoring_case(&self, recipe_name: &str) -> bool {
        self.professions
            .iter()
            .any(|p| p.knows_ignoring_case(recipe_name))
    }
}

// ---------------------------------------------------------------------------
// CharacterKey
// ---------------------------------------------------------------------------

/// Roster identity key, `name#realm`, lower-cased.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CharacterKey(String);

impl CharacterKey {
    /// Build a key from an already-normalized name and a realm slug.
    pub fn new(name: &str, realm: &str) -> Self {
        Self(format!("{}#{}", name.to_lowercase(), realm.to_lowercase()))
    }

    /// The key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CharacterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<CharacterKey> for String {
    fn from(key: CharacterKey) -> Self {
        key.0
    }
}
