//! Guild sync and catalog seeding against the in-memory store.
//!
//! A scripted [`GuildSource`] stands in for the Blizzard API.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::collections::BTreeMap;

use crafty_core::config::{ScoringConfig, SyncConfig};
use crafty_core::{CharacterLookup, MemoryStore, lookup_character, rank_crafters};
use crafty_sync::blizzard::{CharacterProfessions, GuildRoster};
use crafty_sync::catalog::{parse_recipes, parse_specialisms};
use crafty_sync::{GuildSource, IngestSink, SyncError, seed_catalog, sync_guild};
use crafty_types::{CharacterKey, CharacterRecord};

struct ScriptedGuild {
    roster: serde_json::Value,
    professions: BTreeMap<String, serde_json::Value>,
}

impl GuildSource for ScriptedGuild {
    async fn guild_roster(&self, _realm: &str, _guild: &str) -> Result<GuildRoster, SyncError> {
        Ok(serde_json::from_value(self.roster.clone())?)
    }

    async fn character_professions(
        &self,
        realm: &str,
        name: &str,
    ) -> Result<CharacterProfessions, SyncError> {
        let key = format!("{name}#{realm}");
        match self.professions.get(&key) {
            Some(payload) => Ok(serde_json::from_value(payload.clone())?),
            None => Err(SyncError::Api {
                status: 404,
                url: format!("/profile/wow/character/{realm}/{name}/professions"),
            }),
        }
    }
}

fn smith(skill: u32, recipes: &[&str]) -> serde_json::Value {
    let known: Vec<serde_json::Value> = recipes
        .iter()
        .map(|r| serde_json::json!({ "name": r }))
        .collect();
    serde_json::json!({
        "primaries": [{
            "profession": { "id": 164, "name": "Blacksmithing" },
            "tiers": [{
                "tier": { "name": "Khaz Algar Blacksmithing" },
                "skill_points": skill,
                "max_skill_points": 100,
                "known_recipes": known
            }]
        }]
    })
}

fn guild() -> ScriptedGuild {
    ScriptedGuild {
        roster: serde_json::json!({
            "members": [
                { "character": { "name": "Élwyn", "level": 80, "realm": { "slug": "quelthalas" } } },
                { "character": { "name": "Bob", "level": 72, "realm": { "slug": "quelthalas" } } },
                { "character": { "name": "Ghost", "level": 10, "realm": { "slug": "quelthalas" } } }
            ]
        }),
        professions: [
            ("elwyn#quelthalas".to_owned(), smith(90, &["Frostforged Sabatons", "Smelting"])),
            ("bob#quelthalas".to_owned(), smith(40, &["Frostforged Sabatons"])),
        ]
        .into_iter()
        .collect(),
    }
}

fn config() -> SyncConfig {
    SyncConfig {
        max_concurrent_requests: 2,
        ..SyncConfig::default()
    }
}

#[tokio::test]
async fn sync_stores_members_and_removes_departed() {
    let store = MemoryStore::new();
    let departed = CharacterRecord {
        character_name: "oldtimer".to_owned(),
        realm: "quelthalas".to_owned(),
        level: 70,
        professions: Vec::new(),
    };
    IngestSink::upsert_character(&store, &departed).await.unwrap();

    let report = sync_guild(&guild(), &store, &config()).await.unwrap();
    assert_eq!(report.roster_members, 3);
    assert_eq!(report.upserted, 3);
    assert_eq!(report.profession_failures, 1);
    assert_eq!(report.removed, 1);

    let mut keys = store.character_keys().await;
    keys.sort();
    assert_eq!(
        keys,
        vec![
            CharacterKey::new("bob", "quelthalas"),
            CharacterKey::new("elwyn", "quelthalas"),
            CharacterKey::new("ghost", "quelthalas"),
        ]
    );

    let ghost = lookup_character(&store, "Ghost", Some("quelthalas")).await.unwrap();
    assert!(matches!(ghost, CharacterLookup::Found(ref c) if c.professions.is_empty()));

    let elwyn = lookup_character(&store, "Élwyn", None).await.unwrap();
    let CharacterLookup::Found(elwyn) = elwyn else {
        panic!("expected one elwyn, got {elwyn:?}");
    };
    let recipes = &elwyn.professions.first().expect("blacksmithing").recipes;
    assert_eq!(recipes, &vec!["Frostforged Sabatons".to_owned()]);
}

#[tokio::test]
async fn empty_roster_keeps_stored_members() {
    let store = MemoryStore::new();
    let member = CharacterRecord {
        character_name: "anna".to_owned(),
        realm: "quelthalas".to_owned(),
        level: 80,
        professions: Vec::new(),
    };
    IngestSink::upsert_character(&store, &member).await.unwrap();

    let empty = ScriptedGuild {
        roster: serde_json::json!({ "members": [] }),
        professions: BTreeMap::new(),
    };
    let report = sync_guild(&empty, &store, &config()).await.unwrap();
    assert_eq!(report.removed, 0);
    assert_eq!(store.character_keys().await.len(), 1);
}

#[tokio::test]
async fn seeded_catalog_and_synced_roster_rank_together() {
    let store = MemoryStore::new();
    let (recipes, skipped) = parse_recipes(
        r#"[{ "id": 42, "name": "Frostforged Sabatons", "craftedItemId": "222", "spellId": 4242,
              "category": "Plate Armor",
              "reagents": { "reagents": [{ "name": "Bismuth", "quantity": 4, "itemId": "210931" }],
                            "optionalReagents": [] } }]"#,
    )
    .unwrap();
    assert_eq!(skipped, 0);
    let groups = parse_specialisms(
        r#"{ "Blacksmithing": { "Armorsmithing": {
              "crafted_items": [{ "category": "Boots", "items": ["Frostforged Sabatons"] }],
              "max_points": 30 } } }"#,
    )
    .unwrap();

    let seeded = seed_catalog(&store, &recipes, &groups).await.unwrap();
    assert_eq!(seeded.recipes, 1);
    assert_eq!(seeded.specialism_groups, 1);

    sync_guild(&guild(), &store, &config()).await.unwrap();

    let result = rank_crafters(&store, "Frostforged Sabatons", &ScoringConfig::default())
        .await
        .unwrap();
    let ranking: Vec<(&str, u32)> = result
        .crafters
        .iter()
        .map(|c| (c.character_name.as_str(), c.profession.final_score))
        .collect();
    // 90 + 1 + 5 + 10 and 40 + 1 + 5 + 10: the one-item category is complete.
    assert_eq!(ranking, vec![("elwyn", 106), ("bob", 56)]);
}
