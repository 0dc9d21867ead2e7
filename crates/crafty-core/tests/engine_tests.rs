//! End-to-end tests for crafter ranking and character lookup.
//!
//! Every test runs the public lookups against a [`MemoryStore`] filled with
//! a small guild, or against a store that always fails.

#![allow(clippy::unwrap_used, clippy::panic)]

use crafty_core::config::ScoringConfig;
use crafty_core::{
    CharacterLookup, CraftingStore, LookupError, MemoryStore, StoreError, lookup_character,
    rank_crafters, score_crafters,
};
use crafty_types::{
    CharacterRecord, ProfessionRecord, Reagent, RecipeDefinition, RecipeReagents, SkillPoints,
    SpecialismCategory, SpecialismGroup,
};

const SABATONS: &str = "Frostforged Sabatons";

fn reagent(i: usize) -> Reagent {
    Reagent {
        name: format!("Reagent {i}"),
        quantity: 2,
        item_id: Some(format!("{}", 1000 + i)),
    }
}

fn sabatons() -> RecipeDefinition {
    RecipeDefinition {
        recipe_id: 42,
        name: SABATONS.to_owned(),
        category: Some("Plate Armor".to_owned()),
        crafted_item_id: Some("222".to_owned()),
        spell_id: Some(4242),
        media_url: Some("https://render.example/sabatons.jpg".to_owned()),
        reagents: RecipeReagents {
            reagents: (0..14).map(reagent).collect(),
            optional_reagents: (0..8).map(reagent).collect(),
        },
    }
}

fn armorsmithing() -> SpecialismGroup {
    SpecialismGroup {
        id: "Blacksmithing#Armorsmithing".to_owned(),
        crafted_items: vec![SpecialismCategory {
            category: "Plate Armor".to_owned(),
            items: vec![
                SABATONS.to_owned(),
                "Frostforged Helm".to_owned(),
                "Frostforged Gauntlets".to_owned(),
            ],
        }],
        max_points: 30,
    }
}

fn blacksmith(name: &str, skill: u32, known: &[&str], fillers: usize) -> CharacterRecord {
    let mut recipes: Vec<String> = known.iter().map(|r| (*r).to_owned()).collect();
    recipes.extend((0..fillers).map(|i| format!("Filler Recipe {i}")));
    CharacterRecord {
        character_name: name.to_owned(),
        realm: "quelthalas".to_owned(),
        level: 80,
        professions: vec![ProfessionRecord {
            name: "Khaz Algar Blacksmithing".to_owned(),
            skill_points: SkillPoints::new(skill, 100),
            recipes,
        }],
    }
}

fn guild() -> MemoryStore {
    MemoryStore::with_data(
        [sabatons()],
        [armorsmithing()],
        [
            // 80 skill + 40 recipes + 2 specialism matches x 5
            blacksmith("chara", 80, &[SABATONS, "Frostforged Helm"], 38),
            // 55 skill + 20 recipes + 1 specialism match x 5
            blacksmith("charb", 55, &[SABATONS], 19),
        ],
    )
}

struct FailingStore;

impl CraftingStore for FailingStore {
    async fn find_recipe_by_name(
        &self,
        _name: &str,
    ) -> Result<Option<RecipeDefinition>, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_owned()))
    }

    async fn find_specialism_groups(&self) -> Result<Vec<SpecialismGroup>, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_owned()))
    }

    async fn find_characters_knowing_recipe(
        &self,
        _name: &str,
    ) -> Result<Vec<CharacterRecord>, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_owned()))
    }

    async fn find_character_by_key(
        &self,
        _name: &str,
        _realm: Option<&str>,
    ) -> Result<Vec<CharacterRecord>, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_owned()))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("connection refused".to_owned()))
    }
}

#[tokio::test]
async fn ranks_specialist_above_generalist() {
    let result = rank_crafters(&guild(), SABATONS, &ScoringConfig::default())
        .await
        .unwrap();

    let scores: Vec<(&str, u32)> = result
        .crafters
        .iter()
        .map(|c| (c.character_name.as_str(), c.profession.final_score))
        .collect();
    assert_eq!(scores, vec![("chara", 130), ("charb", 80)]);
    assert_eq!(result.top_crafter().map(|c| c.character_name.as_str()), Some("chara"));
    assert_eq!(result.other_crafters().len(), 1);
    assert_eq!(result.category.as_deref(), Some("Plate Armor"));
}

#[tokio::test]
async fn breakdown_explains_the_score() {
    let ranked = score_crafters(&guild(), SABATONS, &ScoringConfig::default())
        .await
        .unwrap();
    assert_eq!(ranked.specialism.as_deref(), Some("Blacksmithing#Armorsmithing"));

    let top = ranked.scored.first().unwrap().breakdown;
    assert_eq!(top.skill_points, 80);
    assert_eq!(top.general_recipes, 40);
    assert_eq!(top.specialism_recipes, 10);
    assert_eq!(top.full_bonus, 0);
}

#[tokio::test]
async fn knowing_a_whole_category_earns_the_bonus() {
    let store = MemoryStore::with_data(
        [sabatons()],
        [armorsmithing()],
        [blacksmith(
            "master",
            100,
            &[SABATONS, "Frostforged Helm", "Frostforged Gauntlets"],
            7,
        )],
    );
    let result = rank_crafters(&store, SABATONS, &ScoringConfig::default())
        .await
        .unwrap();
    // 100 + 10 + 3 x 5 + 10
    let score = result.crafters.first().map(|c| c.profession.final_score);
    assert_eq!(score, Some(135));
}

#[tokio::test]
async fn unknown_recipe_is_not_found() {
    let err = rank_crafters(&guild(), "Nonexistent Widget", &ScoringConfig::default())
        .await
        .unwrap_err();
    assert!(matches!(err, LookupError::RecipeNotFound(ref name) if name == "Nonexistent Widget"));
    assert_eq!(err.to_string(), "Item \"Nonexistent Widget\" not found in the database.");
}

#[tokio::test]
async fn recipe_lookup_is_case_sensitive() {
    let err = rank_crafters(&guild(), "frostforged sabatons", &ScoringConfig::default()).await;
    assert!(matches!(err, Err(LookupError::RecipeNotFound(_))));
}

#[tokio::test]
async fn known_recipe_without_crafters_is_empty_success() {
    let store = MemoryStore::with_data([sabatons()], [armorsmithing()], []);
    let result = rank_crafters(&store, SABATONS, &ScoringConfig::default())
        .await
        .unwrap();
    assert!(result.crafters.is_empty());
    assert!(result.top_crafter().is_none());
    assert_eq!(result.name, SABATONS);
}

#[tokio::test]
async fn missing_specialism_is_tolerated() {
    let store = MemoryStore::with_data(
        [sabatons()],
        [],
        [blacksmith("solo", 70, &[SABATONS], 9)],
    );
    let result = rank_crafters(&store, SABATONS, &ScoringConfig::default())
        .await
        .unwrap();
    let score = result.crafters.first().map(|c| c.profession.final_score);
    assert_eq!(score, Some(80));
}

#[tokio::test]
async fn output_is_capped() {
    let crafters: Vec<CharacterRecord> = (0..25)
        .map(|i| blacksmith(&format!("smith{i:02}"), i, &[SABATONS], 0))
        .collect();
    let store = MemoryStore::with_data([sabatons()], [armorsmithing()], crafters);

    let result = rank_crafters(&store, SABATONS, &ScoringConfig::default())
        .await
        .unwrap();
    assert_eq!(result.crafters.len(), 10);
    assert_eq!(result.reagents.reagents.len(), 10);
    assert_eq!(result.reagents.optional_reagents.len(), 5);
    assert_eq!(
        result.reagents.reagents.first().map(|r| r.name.as_str()),
        Some("Reagent 0")
    );

    let scores: Vec<u32> = result.crafters.iter().map(|c| c.profession.final_score).collect();
    assert!(scores.windows(2).all(|w| matches!(w, [a, b] if a >= b)));
    assert_eq!(
        result.top_crafter().map(|c| c.character_name.as_str()),
        Some("smith24")
    );
}

#[tokio::test]
async fn ties_break_by_name() {
    let store = MemoryStore::with_data(
        [sabatons()],
        [],
        [
            blacksmith("zed", 50, &[SABATONS], 0),
            blacksmith("abe", 50, &[SABATONS], 0),
        ],
    );
    let result = rank_crafters(&store, SABATONS, &ScoringConfig::default())
        .await
        .unwrap();
    let names: Vec<&str> = result.crafters.iter().map(|c| c.character_name.as_str()).collect();
    assert_eq!(names, vec!["abe", "zed"]);
}

#[tokio::test]
async fn repeated_lookups_agree() {
    let store = guild();
    let first = rank_crafters(&store, SABATONS, &ScoringConfig::default()).await.unwrap();
    let second = rank_crafters(&store, SABATONS, &ScoringConfig::default()).await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn store_failure_is_data_source_unavailable() {
    let err = rank_crafters(&FailingStore, SABATONS, &ScoringConfig::default())
        .await
        .unwrap_err();
    assert!(matches!(err, LookupError::DataSourceUnavailable { .. }));

    let lookup = lookup_character(&FailingStore, "chara", None).await;
    assert!(matches!(lookup, Err(LookupError::DataSourceUnavailable { .. })));
}

#[tokio::test]
async fn character_lookup_normalizes_and_disambiguates() {
    let mut other_realm = blacksmith("chara", 60, &[], 0);
    other_realm.realm = "draenor".to_owned();
    let store = MemoryStore::with_data(
        [],
        [],
        [blacksmith("chara", 80, &[], 0), other_realm, blacksmith("charb", 55, &[], 0)],
    );

    let single = lookup_character(&store, "  CharB ", None).await.unwrap();
    assert!(matches!(single, CharacterLookup::Found(ref c) if c.character_name == "charb"));

    let ambiguous = lookup_character(&store, "Chara", None).await.unwrap();
    let CharacterLookup::Ambiguous(matches) = ambiguous else {
        panic!("expected ambiguous lookup, got {ambiguous:?}");
    };
    let realms: Vec<&str> = matches.iter().map(|m| m.realm.as_str()).collect();
    assert_eq!(realms, vec!["draenor", "quelthalas"]);

    let narrowed = lookup_character(&store, "chara", Some("Draenor")).await.unwrap();
    assert!(matches!(narrowed, CharacterLookup::Found(ref c) if c.realm == "draenor"));

    let missing = lookup_character(&store, "nobody", None).await.unwrap();
    assert_eq!(missing, CharacterLookup::NotFound);
}
