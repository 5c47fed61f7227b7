//! An ordered list of levels and the one currently being played.
//!
//! Levels are ordered by name, so hosts that gather level files from a
//! directory get the same order on every platform. Completing a level
//! never advances the campaign on its own; the host calls `advance` when
//! the player asks for the next level.

use log::{info, warn};
use thiserror::Error;

use super::puzzle::Puzzle;
use crate::core::{EngineConfig, Level, LevelDataError};

/// Errors from building or navigating a campaign.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CampaignError {
    #[error("campaign has no levels")]
    Empty,

    #[error("level index {index} out of range (campaign has {len} levels)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("level `{name}` is invalid: {source}")]
    InvalidLevel {
        name: String,
        #[source]
        source: LevelDataError,
    },
}

/// A named level.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LevelEntry {
    pub name: String,
    pub level: Level,
}

/// Ordered levels plus the current puzzle.
#[derive(Clone, Debug)]
pub struct Campaign {
    levels: Vec<LevelEntry>,
    config: EngineConfig,
    current: Puzzle,
}

impl Campaign {
    /// Sort `levels` by name and load the first one.
    pub fn begin(
        levels: impl IntoIterator<Item = (String, Level)>,
        config: EngineConfig,
    ) -> Result<Self, CampaignError> {
        let mut levels: Vec<LevelEntry> = levels
            .into_iter()
            .map(|(name, level)| LevelEntry { name, level })
            .collect();
        levels.sort_by(|a, b| a.name.cmp(&b.name));

        let first = levels.first().ok_or(CampaignError::Empty)?;
        let current = load(first, 0, &config)?;
        info!("campaign started with {} levels", levels.len());

        Ok(Self {
            levels,
            config,
            current,
        })
    }

    /// Parse `(name, text)` level sources, then [`Campaign::begin`].
    ///
    /// Any source that fails to parse fails the whole campaign.
    pub fn from_sources<N, T>(
        sources: impl IntoIterator<Item = (N, T)>,
        config: EngineConfig,
    ) -> Result<Self, CampaignError>
    where
        N: Into<String>,
        T: AsRef<str>,
    {
        let levels = sources
            .into_iter()
            .map(|(name, text)| {
                let name = name.into();
                match Level::parse(text.as_ref()) {
                    Ok(level) => Ok((name, level)),
                    Err(source) => {
                        warn!("level `{name}` failed to parse: {source}");
                        Err(CampaignError::InvalidLevel { name, source })
                    }
                }
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::begin(levels, config)
    }

    /// Number of levels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Always false: a campaign cannot be built without levels.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Level names in play order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.levels.iter().map(|e| e.name.as_str())
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current.state().level_index
    }

    #[must_use]
    pub fn current_name(&self) -> &str {
        &self.levels[self.current_index()].name
    }

    #[must_use]
    pub fn puzzle(&self) -> &Puzzle {
        &self.current
    }

    pub fn puzzle_mut(&mut self) -> &mut Puzzle {
        &mut self.current
    }

    /// Replace the current puzzle with a fresh load of level `index`.
    pub fn load_level(&mut self, index: usize) -> Result<&mut Puzzle, CampaignError> {
        let entry = self.levels.get(index).ok_or(CampaignError::IndexOutOfRange {
            index,
            len: self.levels.len(),
        })?;
        self.current = load(entry, index, &self.config)?;
        Ok(&mut self.current)
    }

    /// Reload the current level from its record.
    pub fn restart(&mut self) -> Result<&mut Puzzle, CampaignError> {
        self.load_level(self.current_index())
    }

    /// Move to the next level. Returns `Ok(None)` after the last one.
    pub fn advance(&mut self) -> Result<Option<&mut Puzzle>, CampaignError> {
        let next = self.current_index() + 1;
        if next >= self.levels.len() {
            return Ok(None);
        }
        self.load_level(next).map(Some)
    }
}

fn load(entry: &LevelEntry, index: usize, config: &EngineConfig) -> Result<Puzzle, CampaignError> {
    Puzzle::load_indexed(&entry.level, index, config.clone()).map_err(|source| {
        warn!("level `{}` failed to load: {source}", entry.name);
        CampaignError::InvalidLevel {
            name: entry.name.clone(),
            source,
        }
    })
}
