//! Blizzard game-data API client and payload types.
//!
//! Authenticates with the OAuth client-credentials flow once per client and
//! reuses the token for every later call. Only the fields the sync reads
//! are modelled; everything else in the payloads is ignored.

use std::future::Future;
use std::time::Duration;

use crafty_core::config::BlizzardConfig;
use serde::Deserialize;
use tokio::sync::OnceCell;

use crate::error::SyncError;

// ---------------------------------------------------------------------------
// Payloads
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// `GET /data/wow/guild/{realm}/{guild}/roster`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GuildRoster {
    /// Guild members.
    #[serde(default)]
    pub members: Vec<RosterMember>,
}

/// One roster entry.
#[derive(Debug, Clone, Deserialize)]
pub struct RosterMember {
    /// The member's character.
    pub character: RosterCharacter,
}

/// Character summary inside a roster entry.
#[derive(Debug, Clone, Deserialize)]
pub struct RosterCharacter {
    /// Display name, possibly with diacritics.
    pub name: String,
    /// Character level.
    #[serde(default)]
    pub level: u32,
    /// Home realm.
    pub realm: RealmRef,
}

/// Realm reference.
#[derive(Debug, Clone, Deserialize)]
pub struct RealmRef {
    /// Realm slug, e.g. `quelthalas`.
    pub slug: String,
}

/// `GET /profile/wow/character/{realm}/{name}/professions`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CharacterProfessions {
    /// Primary professions, crafting and gathering alike.
    #[serde(default)]
    pub primaries: Vec<ProfessionEntry>,
}

/// One primary profession and its expansion tiers.
#[derive(Debug, Clone, Deserialize)]
pub struct ProfessionEntry {
    /// Which profession.
    pub profession: ProfessionRef,
    /// One entry per expansion tier the character has trained.
    #[serde(default)]
    pub tiers: Vec<ProfessionTier>,
}

/// Profession reference.
#[derive(Debug, Clone, Deserialize)]
pub struct ProfessionRef {
    /// Profession id.
    pub id: u32,
    /// Display name.
    pub name: String,
}

/// Progress in one expansion tier of a profession.
#[derive(Debug, Clone, Deserialize)]
pub struct ProfessionTier {
    /// Tier reference.
    pub tier: TierRef,
    /// Current skill.
    #[serde(default)]
    pub skill_points: u32,
    /// Skill cap.
    #[serde(default)]
    pub max_skill_points: u32,
    /// Recipes learned in this tier.
    #[serde(default)]
    pub known_recipes: Vec<RecipeRef>,
}

/// Tier reference.
#[derive(Debug, Clone, Deserialize)]
pub struct TierRef {
    /// Tier display name, e.g. `Khaz Algar Blacksmithing`.
    pub name: String,
}

/// Recipe reference.
#[derive(Debug, Clone, Deserialize)]
pub struct RecipeRef {
    /// Recipe display name. Absent on some malformed entries.
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ItemMedia {
    #[serde(default)]
    assets: Vec<MediaAsset>,
}

#[derive(Debug, Deserialize)]
struct MediaAsset {
    key: String,
    value: String,
}

// ---------------------------------------------------------------------------
// Source contract
// ---------------------------------------------------------------------------

/// Where the guild sync reads the roster and professions from.
pub trait GuildSource: Send + Sync {
    /// Fetch the roster of `guild` on `realm`.
    fn guild_roster(
        &self,
        realm: &str,
        guild: &str,
    ) -> impl Future<Output = Result<GuildRoster, SyncError>> + Send;

    /// Fetch the professions of character `name` on `realm`.
    fn character_professions(
        &self,
        realm: &str,
        name: &str,
    ) -> impl Future<Output = Result<CharacterProfessions, SyncError>> + Send;
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Authenticated Blizzard API client.
pub struct BlizzardClient {
    client: reqwest::Client,
    config: BlizzardConfig,
    token: OnceCell<String>,
}

impl BlizzardClient {
    /// Create a client. No request is made until the first call.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Config`] if the credentials are missing, or
    /// [`SyncError::Http`] if the HTTP client cannot be built.
    pub fn new(config: &BlizzardConfig) -> Result<Self, SyncError> {
        if config.client_id.is_empty() || config.client_secret.is_empty() {
            return Err(SyncError::Config(
                "Blizzard client id and secret are required (BLIZZARD_CLIENT_ID, BLIZZARD_CLIENT_SECRET)"
                    .to_owned(),
            ));
        }
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()?;
        Ok(Self {
            client,
            config: config.clone(),
            token: OnceCell::new(),
        })
    }

    async fn access_token(&self) -> Result<&str, SyncError> {
        let token = self
            .token
            .get_or_try_init(|| self.request_token())
            .await?;
        Ok(token.as_str())
    }

    async fn request_token(&self) -> Result<String, SyncError> {
        let response = self
            .client
            .post(&self.config.oauth_url)
            .basic_auth(&self.config.client_id, Some(&self.config.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SyncError::Api {
                status: status.as_u16(),
                url: self.config.oauth_url.clone(),
            });
        }

        let token: TokenResponse = response.json().await?;
        tracing::info!("Obtained Blizzard access token");
        Ok(token.access_token)
    }

    async fn get_json<T>(&self, path: &str, namespace: &str) -> Result<T, SyncError>
    where
        T: for<'de> Deserialize<'de>,
    {
        let token = self.access_token().await?;
        let url = format!("{}{path}", self.config.api_base_url);

        let response = self
            .client
            .get(&url)
            .bearer_auth(token)
            .query(&[("namespace", namespace), ("locale", self.config.locale.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SyncError::Api {
                status: status.as_u16(),
                url,
            });
        }

        Ok(response.json().await?)
    }

    /// Icon URL of an item, if the API has one.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError`] if the request fails.
    pub async fn item_media_url(&self, item_id: &str) -> Result<Option<String>, SyncError> {
        let media: ItemMedia = self
            .get_json(
                &format!("/data/wow/media/item/{item_id}"),
                &self.config.static_namespace,
            )
            .await?;
        Ok(media
            .assets
            .into_iter()
            .find(|asset| asset.key == "icon")
            .map(|asset| asset.value))
    }
}

impl GuildSource for BlizzardClient {
    async fn guild_roster(&self, realm: &str, guild: &str) -> Result<GuildRoster, SyncError> {
        self.get_json(
            &format!("/data/wow/guild/{realm}/{guild}/roster"),
            &self.config.profile_namespace,
        )
        .await
    }

    async fn character_professions(
        &self,
        realm: &str,
        name: &str,
    ) -> Result<CharacterProfessions, SyncError> {
        self.get_json(
            &format!("/profile/wow/character/{realm}/{name}/professions"),
            &self.config.profile_namespace,
        )
        .await
    }
}
