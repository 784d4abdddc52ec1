//! Research target selection.
//!
//! The [`UpgradeSelector`] walks a fixed priority list and picks the first
//! track that is not yet complete. Once everything is done it keeps
//! funding the last track in the list, so selection always yields a
//! concrete upgrade.

use std::collections::BTreeMap;

use skirmish_types::{HostError, UpgradeTrack};
use tracing::warn;

use crate::config::UpgradeConfig;

/// Errors raised while building a selector.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectorError {
    /// The priority list contained no tracks.
    #[error("upgrade priority list is empty")]
    EmptyPriorities,
}

/// Priority-ordered research picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpgradeSelector {
    priorities: Vec<UpgradeTrack>,
    thresholds: BTreeMap<UpgradeTrack, u32>,
}

impl UpgradeSelector {
    /// Build a selector from an ordered track list and per-track
    /// completion thresholds.
    ///
    /// Tracks without an explicit threshold use
    /// [`UpgradeTrack::default_rounds`].
    ///
    /// # Errors
    ///
    /// Returns [`SelectorError::EmptyPriorities`] if `priorities` is empty.
    pub fn new(
        priorities: Vec<UpgradeTrack>,
        thresholds: BTreeMap<UpgradeTrack, u32>,
    ) -> Result<Self, SelectorError> {
        if priorities.is_empty() {
            return Err(SelectorError::EmptyPriorities);
        }
        Ok(Self {
            priorities,
            thresholds,
        })
    }

    /// Build a selector from the `upgrades` config section.
    ///
    /// # Errors
    ///
    /// Returns [`SelectorError::EmptyPriorities`] if no tracks are listed.
    pub fn from_config(config: &UpgradeConfig) -> Result<Self, SelectorError> {
        let thresholds = config
            .priorities
            .iter()
            .map(|&track| (track, config.threshold(track)))
            .collect();
        Self::new(config.priorities.clone(), thresholds)
    }

    /// The configured tracks in funding order.
    pub fn priorities(&self) -> &[UpgradeTrack] {
        &self.priorities
    }

    /// Rounds needed to complete `track`.
    pub fn threshold(&self, track: UpgradeTrack) -> u32 {
        self.thresholds
            .get(&track)
            .copied()
            .unwrap_or_else(|| track.default_rounds())
    }

    /// The track funded once every listed track is complete.
    pub fn fallback(&self) -> UpgradeTrack {
        self.priorities
            .last()
            .copied()
            .unwrap_or(UpgradeTrack::Nuke)
    }

    /// Pick the next track to fund.
    ///
    /// `progress` reports rounds already invested per track. A failed
    /// lookup counts as zero progress for this call only.
    pub fn select<F>(&self, progress: F) -> UpgradeTrack
    where
        F: Fn(UpgradeTrack) -> Result<u32, HostError>,
    {
        for &track in &self.priorities {
            let rounds = match progress(track) {
                Ok(rounds) => rounds,
                Err(err) => {
                    warn!(%track, error = %err, "research progress unreadable, assuming none");
                    0
                }
            };
            if rounds < self.threshold(track) {
                return track;
            }
        }
        self.fallback()
    }
}

impl Default for UpgradeSelector {
    fn default() -> Self {
        Self {
            priorities: UpgradeConfig::default().priorities,
            thresholds: BTreeMap::new(),
        }
    }
}
