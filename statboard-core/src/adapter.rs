//! External-update adapters.
//!
//! Pure translations from a collaborator's result into a mutation batch.
//! Nothing here touches the scene; the store applies the batch atomically.

use serde::{Deserialize, Serialize};

use crate::command::Mutation;
use crate::error::{SceneError, SceneResult};
use crate::node::{ImageHandle, NodeKind, StatRole};
use crate::patch::NodePatch;
use crate::scene::Scene;
use crate::store::SceneStore;

/// Season statistics from the player-lookup collaborator.
///
/// Missing numbers default to zero; everything is clamped by
/// [`PlayerRecord::sanitized`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[allow(missing_docs)]
pub struct PlayerStats {
    pub appearances: f64,
    pub minutes_played: f64,
    pub goals: f64,
    pub assists: f64,
    pub tackles_won: f64,
    pub pass_accuracy: f64,
    pub rating: f64,
}

/// A structured player record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[allow(missing_docs)]
pub struct PlayerRecord {
    pub name: String,
    pub position: String,
    pub club: String,
    pub nationality: String,
    pub age: u32,
    pub stats: PlayerStats,
}

impl PlayerRecord {
    /// Trim names and clamp numbers into displayable ranges.
    #[must_use]
    pub fn sanitized(mut self) -> Self {
        for s in [
            &mut self.name,
            &mut self.position,
            &mut self.club,
            &mut self.nationality,
        ] {
            *s = s.trim().to_string();
        }
        let stats = &mut self.stats;
        for count in [
            &mut stats.appearances,
            &mut stats.minutes_played,
            &mut stats.goals,
            &mut stats.assists,
            &mut stats.tackles_won,
        ] {
            *count = clamp_finite(*count, 0.0, f64::MAX).round();
        }
        stats.pass_accuracy = clamp_finite(stats.pass_accuracy, 0.0, 100.0).round();
        stats.rating = clamp_finite(stats.rating, 0.0, 10.0);
        self
    }
}

fn clamp_finite(value: f64, min: f64, max: f64) -> f64 {
    if value.is_finite() {
        value.clamp(min, max)
    } else {
        min
    }
}

/// Value text shown for a role.
fn role_value(role: StatRole, stats: &PlayerStats) -> String {
    match role {
        StatRole::PassAccuracy => format!("{}%", stats.pass_accuracy),
        StatRole::TacklesWon => format!("{}", stats.tackles_won),
        StatRole::Goals => format!("{}", stats.goals),
        StatRole::Assists => format!("{}", stats.assists),
        StatRole::Appearances => format!("{}", stats.appearances),
        StatRole::MinutesPlayed => format!("{}", stats.minutes_played),
    }
}

/// Split a display name into uppercase first and last names.
///
/// The last word is the last name; a single word leaves the first name empty.
fn split_name(name: &str) -> (String, String) {
    let words: Vec<&str> = name.split_whitespace().collect();
    match words.split_last() {
        Some((last, rest)) => (rest.join(" ").to_uppercase(), last.to_uppercase()),
        None => (String::new(), String::new()),
    }
}

/// Point the player-image singleton at a new image. Position and size are kept.
#[must_use]
pub fn image_import(scene: &Scene, image: ImageHandle) -> Vec<Mutation> {
    scene
        .singleton(NodeKind::PlayerImage)
        .map(|node| Mutation::Commit {
            id: node.id.clone(),
            patch: NodePatch {
                image: Some(image),
                ..NodePatch::default()
            },
        })
        .into_iter()
        .collect()
}

/// Map a player record onto every node tagged with a matching role, plus
/// the rating and player-name singletons.
#[must_use]
pub fn player_data(scene: &Scene, record: &PlayerRecord) -> Vec<Mutation> {
    let record = record.clone().sanitized();
    let mut batch: Vec<Mutation> = scene
        .nodes()
        .filter_map(|node| {
            let role = node.stat_role?;
            Some(Mutation::Commit {
                id: node.id.clone(),
                patch: NodePatch {
                    value: Some(role_value(role, &record.stats)),
                    ..NodePatch::default()
                },
            })
        })
        .collect();

    if let Some(rating) = scene.singleton(NodeKind::RatingBadge) {
        batch.push(Mutation::Commit {
            id: rating.id.clone(),
            patch: NodePatch {
                value: Some(format!("{:.1}", record.stats.rating)),
                ..NodePatch::default()
            },
        });
    }

    if let Some(name) = scene.singleton(NodeKind::PlayerName) {
        let (first, last) = split_name(&record.name);
        batch.push(Mutation::Commit {
            id: name.id.clone(),
            patch: NodePatch {
                first_name: Some(first),
                last_name: Some(last),
                country: Some(record.nationality.to_uppercase()),
                ..NodePatch::default()
            },
        });
    }
    batch
}

impl SceneStore {
    /// Attach an imported image to the player-image singleton.
    ///
    /// # Errors
    ///
    /// Propagates batch errors; the scene is unchanged on failure.
    pub fn import_image(&mut self, image: ImageHandle) -> SceneResult<()> {
        let batch = image_import(self.scene(), image);
        self.apply_batch(batch).map(drop)
    }

    /// Apply the result of a player lookup as one batch.
    ///
    /// A failed lookup leaves the scene untouched and is reported as
    /// [`SceneError::ExternalAdapterFailure`].
    ///
    /// # Errors
    ///
    /// Lookup failure, or a batch error.
    pub fn apply_player_lookup<E: std::fmt::Display>(
        &mut self,
        result: Result<PlayerRecord, E>,
    ) -> SceneResult<usize> {
        let record = result.map_err(|e| {
            tracing::warn!("Player lookup failed: {e}");
            SceneError::ExternalAdapterFailure(e.to_string())
        })?;
        let batch = player_data(self.scene(), &record);
        let count = batch.len();
        self.apply_batch(batch)?;
        tracing::info!("Applied player data for {:?} to {count} nodes", record.name.trim());
        Ok(count)
    }
}
