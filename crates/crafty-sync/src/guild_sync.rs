//! Guild roster sync.
//!
//! Fetches the roster, fetches every member's professions with bounded
//! concurrency, upserts each member under its normalized key and finally
//! removes stored members that left the guild.
//!
//! A member whose professions cannot be fetched is still stored, with no
//! professions, so one bad profile never aborts the run. An empty roster
//! response skips the removal step instead of wiping the stored roster.

use std::collections::BTreeSet;

use crafty_core::config::SyncConfig;
use crafty_core::names::{normalize_character_name, normalize_realm};
use crafty_types::{CharacterKey, CharacterRecord, ProfessionRecord};
use futures::stream::{self, StreamExt};

use crate::blizzard::{GuildSource, RosterMember};
use crate::error::SyncError;
use crate::professions::extract_crafting_professions;
use crate::sink::IngestSink;

/// What a sync run did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Members listed by the roster.
    pub roster_members: usize,
    /// Members written to the store.
    pub upserted: usize,
    /// Members stored without professions because the fetch failed.
    pub profession_failures: usize,
    /// Members skipped because their name normalized to nothing.
    pub skipped: usize,
    /// Stored members removed because they left the guild.
    pub removed: u64,
}

struct FetchedMember {
    record: CharacterRecord,
    professions_failed: bool,
}

/// Run one full guild sync from `source` into `sink`.
///
/// # Errors
///
/// Returns [`SyncError`] if the roster cannot be fetched or the store
/// rejects a write. Per-member profession failures are not errors.
pub async fn sync_guild<G, K>(
    source: &G,
    sink: &K,
    config: &SyncConfig,
) -> Result<SyncReport, SyncError>
where
    G: GuildSource,
    K: IngestSink,
{
    let roster = source
        .guild_roster(&config.guild_realm, &config.guild_name)
        .await?;

    let mut report = SyncReport {
        roster_members: roster.members.len(),
        ..SyncReport::default()
    };

    if roster.members.is_empty() {
        tracing::warn!(
            guild = config.guild_name,
            realm = config.guild_realm,
            "Guild roster is empty, leaving stored members untouched"
        );
        return Ok(report);
    }

    tracing::info!(
        guild = config.guild_name,
        realm = config.guild_realm,
        members = report.roster_members,
        "Fetched guild roster"
    );

    let fetched: Vec<Option<FetchedMember>> = stream::iter(roster.members.iter())
        .map(|member| fetch_member(source, member, &config.tier_prefix))
        .buffer_unordered(config.max_concurrent_requests.max(1))
        .collect()
        .await;

    let mut current = BTreeSet::new();
    for member in fetched {
        let Some(member) = member else {
            report.skipped = report.skipped.saturating_add(1);
            continue;
        };
        if member.professions_failed {
            report.profession_failures = report.profession_failures.saturating_add(1);
        }
        sink.upsert_character(&member.record).await?;
        current.insert(member.record.key());
        report.upserted = report.upserted.saturating_add(1);
    }

    let stored = sink.character_keys().await?;
    let stale = plan_stale(&stored, &current);
    if stale.is_empty() {
        tracing::info!("No departed members to remove");
    } else {
        report.removed = sink.remove_characters(&stale).await?;
        tracing::info!(removed = report.removed, "Removed departed members");
    }

    tracing::info!(
        upserted = report.upserted,
        profession_failures = report.profession_failures,
        skipped = report.skipped,
        removed = report.removed,
        "Guild sync complete"
    );
    Ok(report)
}

async fn fetch_member<G: GuildSource>(
    source: &G,
    member: &RosterMember,
    tier_prefix: &str,
) -> Option<FetchedMember> {
    let name = normalize_character_name(&member.character.name);
    let realm = normalize_realm(&member.character.realm.slug);
    if name.is_empty() || realm.is_empty() {
        tracing::warn!(
            character = member.character.name,
            "Roster member has no usable name or realm, skipping"
        );
        return None;
    }

    let (professions, professions_failed) = match source.character_professions(&realm, &name).await
    {
        Ok(payload) => (extract_crafting_professions(&payload, tier_prefix), false),
        Err(e) => {
            tracing::warn!(
                character = name,
                realm = realm,
                error = %e,
                "Failed to fetch professions, storing member without them"
            );
            (Vec::new(), true)
        }
    };

    tracing::debug!(
        character = name,
        realm = realm,
        professions = professions.len(),
        "Fetched member professions"
    );

    Some(FetchedMember {
        record: member_record(member, name, realm, professions),
        professions_failed,
    })
}

/// The roster record stored for a member.
pub fn member_record(
    member: &RosterMember,
    name: String,
    realm: String,
    professions: Vec<ProfessionRecord>,
) -> CharacterRecord {
    CharacterRecord {
        character_name: name,
        realm,
        level: member.character.level,
        professions,
    }
}

/// Stored keys that are not part of the current roster.
pub fn plan_stale(stored: &[CharacterKey], current: &BTreeSet<CharacterKey>) -> Vec<CharacterKey> {
    stored
        .iter()
        .filter(|key| !current.contains(*key))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stale_keys_are_those_not_in_roster() {
        let stored = vec![
            CharacterKey::new("anna", "quelthalas"),
            CharacterKey::new("bob", "quelthalas"),
            CharacterKey::new("cara", "draenor"),
        ];
        let current: BTreeSet<CharacterKey> = [
            CharacterKey::new("anna", "quelthalas"),
            CharacterKey::new("cara", "draenor"),
            CharacterKey::new("dan", "quelthalas"),
        ]
        .into_iter()
        .collect();
        assert_eq!(
            plan_stale(&stored, &current),
            vec![CharacterKey::new("bob", "quelthalas")]
        );
    }

    #[test]
    fn nothing_stale_when_roster_unchanged() {
        let stored = vec![CharacterKey::new("anna", "quelthalas")];
        let current: BTreeSet<CharacterKey> = stored.iter().cloned().collect();
        assert!(plan_stale(&stored, &current).is_empty());
    }
}
