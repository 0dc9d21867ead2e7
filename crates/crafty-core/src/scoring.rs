//! Crafter scoring: pure functions over already-fetched records.
//!
//! A candidate's score is built from four parts:
//!
//! | Part | Value |
//! |------|-------|
//! | `skill_points` | current skill points of the relevant profession |
//! | `general_recipes` | number of recipes known in that profession |
//! | `specialism_recipes` | weight x known recipes in each category of the matched specialism |
//! | `full_bonus` | flat bonus if a whole category of the matched specialism is known |
//!
//! Without a matched specialism the last two parts are 0. All sums
//! saturate instead of overflowing.

use core::cmp::Ordering;

use crafty_types::{
    CharacterRecord, CrafterSummary, ProfessionRecord, ProfessionScore, SpecialismGroup,
};

use crate::config::ScoringConfig;

/// The parts a final score was built from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoreBreakdown {
    /// Current skill points of the relevant profession.
    pub skill_points: u32,
    /// Recipes known in the relevant profession.
    pub general_recipes: u32,
    /// Known recipes found in the matched specialism's categories.
    pub specialism_matches: u32,
    /// Points from `specialism_matches` after weighting.
    pub specialism_recipes: u32,
    /// Bonus for a fully known category.
    pub full_bonus: u32,
    /// Sum of the parts.
    pub final_score: u32,
}

/// A candidate that knows the recipe, with its score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredCrafter {
    /// Serializable summary.
    pub summary: CrafterSummary,
    /// How the score was computed.
    pub breakdown: ScoreBreakdown,
}

/// Find the specialism group that lists `recipe_name`.
///
/// Groups are scanned in the given order and the first one with any
/// category containing the recipe wins, even if later groups list it too.
pub fn match_specialism<'a>(
    groups: &'a [SpecialismGroup],
    recipe_name: &str,
) -> Option<&'a SpecialismGroup> {
    groups.iter().find(|group| group.lists(recipe_name))
}

/// The profession of `character` that knows `recipe_name`.
///
/// Professions are checked in declaration order and the first match is
/// returned. A recipe should belong to a single profession; when several
/// list it the anomaly is logged and the first still wins.
pub fn relevant_profession<'a>(
    character: &'a CharacterRecord,
    recipe_name: &str,
) -> Option<&'a ProfessionRecord> {
    let mut matching = character.professions.iter().filter(|p| p.knows(recipe_name));
    let first = matching.next()?;
    let extra = matching.count();
    if extra > 0 {
        tracing::warn!(
            character = %character.key(),
            recipe = recipe_name,
            chosen = first.name,
            additional = extra,
            "recipe listed by more than one profession, using the first"
        );
    }
    Some(first)
}

/// Score one profession against an optional matched specialism.
pub fn score_profession(
    profession: &ProfessionRecord,
    specialism: Option<&SpecialismGroup>,
    weights: &ScoringConfig,
) -> ScoreBreakdown {
    let skill_points = profession.skill_points.current;
    let general_recipes = saturating_count(profession.recipes.len());

    let (specialism_matches, full_category) = specialism.map_or((0, false), |group| {
        group
            .crafted_items
            .iter()
            .fold((0_u32, false), |(matches, full), category| {
                let known = profession
                    .recipes
                    .iter()
                    .filter(|recipe| category.contains(recipe))
                    .count();
                let complete = category.items.iter().all(|item| profession.knows(item));
                (
                    matches.saturating_add(saturating_count(known)),
                    full || complete,
                )
            })
    });

    let specialism_recipes = specialism_matches.saturating_mul(weights.specialism_recipe_weight);
    let full_bonus = if full_category {
        weights.full_category_bonus
    } else {
        0
    };

    let final_score = skill_points
        .saturating_add(general_recipes)
        .saturating_add(specialism_recipes)
        .saturating_add(full_bonus);

    ScoreBreakdown {
        skill_points,
        general_recipes,
        specialism_matches,
        specialism_recipes,
        full_bonus,
        final_score,
    }
}

/// Score a candidate for `recipe_name`.
///
/// Returns `None` when none of the candidate's professions lists the
/// recipe with exactly this spelling.
pub fn score_candidate(
    character: &CharacterRecord,
    recipe_name: &str,
    specialism: Option<&SpecialismGroup>,
    weights: &ScoringConfig,
) -> Option<ScoredCrafter> {
    let profession = relevant_profession(character, recipe_name)?;
    let breakdown = score_profession(profession, specialism, weights);

    tracing::debug!(
        character = %character.key(),
        profession = profession.name,
        skill_points = breakdown.skill_points,
        general_recipes = breakdown.general_recipes,
        specialism_matches = breakdown.specialism_matches,
        full_bonus = breakdown.full_bonus,
        final_score = breakdown.final_score,
        "scored crafter"
    );

    Some(ScoredCrafter {
        summary: CrafterSummary {
            character_name: character.character_name.clone(),
            realm: character.realm.clone(),
            level: character.level,
            profession: ProfessionScore {
                name: profession.name.clone(),
                final_score: breakdown.final_score,
            },
        },
        breakdown,
    })
}

/// Order used for ranking: score descending, then name and realm ascending.
pub fn ranking_order(a: &CrafterSummary, b: &CrafterSummary) -> Ordering {
    b.profession
        .final_score
        .cmp(&a.profession.final_score)
        .then_with(|| a.character_name.cmp(&b.character_name))
        .then_with(|| a.realm.cmp(&b.realm))
}

/// Sort crafters best first and keep at most `limit`.
pub fn rank(mut crafters: Vec<ScoredCrafter>, limit: usize) -> Vec<ScoredCrafter> {
    crafters.sort_by(|a, b| ranking_order(&a.summary, &b.summary));
    crafters.truncate(limit);
    crafters
}

fn saturating_count(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}
