use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{ConfigError, DEFAULT_COLUMNS, DEFAULT_ROWS, PieceKind, PieceSeed};

/// Named difficulty, selecting the starting fall interval.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[display("facile")]
    Facile,
    #[default]
    #[display("normale")]
    Normale,
    #[display("difficile")]
    Difficile,
    #[display("impossibile")]
    Impossibile,
}

impl Difficulty {
    pub const ALL: [Self; 4] = [
        Difficulty::Facile,
        Difficulty::Normale,
        Difficulty::Difficile,
        Difficulty::Impossibile,
    ];

    /// Milliseconds between natural fall steps at the start of a game.
    #[must_use]
    pub const fn start_interval_ms(self) -> u64 {
        match self {
            Difficulty::Facile => 800,
            Difficulty::Normale => 500,
            Difficulty::Difficile => 300,
            Difficulty::Impossibile => 150,
        }
    }

    /// Capitalized name for display in menus.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Difficulty::Facile => "Facile",
            Difficulty::Normale => "Normale",
            Difficulty::Difficile => "Difficile",
            Difficulty::Impossibile => "Impossibile",
        }
    }

    /// Resolves a difficulty name, case-insensitively.
    ///
    /// A missing or unrecognized name resolves to [`Difficulty::Normale`].
    ///
    /// # Examples
    ///
    /// ```
    /// use stackfall_engine::Difficulty;
    ///
    /// assert_eq!(Difficulty::from_name(Some("Difficile")), Difficulty::Difficile);
    /// assert_eq!(Difficulty::from_name(Some("hard")), Difficulty::Normale);
    /// assert_eq!(Difficulty::from_name(None), Difficulty::Normale);
    /// ```
    #[must_use]
    pub fn from_name(name: Option<&str>) -> Self {
        let Some(name) = name else {
            return Self::default();
        };
        Self::ALL
            .into_iter()
            .find(|d| name.eq_ignore_ascii_case(d.label()))
            .unwrap_or_default()
    }
}

/// Engine configuration.
///
/// Every field has a default, so a configuration file only needs to list
/// what it overrides:
///
/// ```
/// use stackfall_engine::EngineConfig;
///
/// let config: EngineConfig = serde_json::from_str(r#"{ "columns": 12 }"#).unwrap();
/// assert_eq!(config.columns, 12);
/// assert_eq!(config.rows, 20);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Grid width in cells.
    pub columns: usize,
    /// Grid height in cells.
    pub rows: usize,
    /// Fall interval when a game starts; normally set from a [`Difficulty`].
    pub start_interval_ms: u64,
    /// Interval at level 1 in the level-up formula.
    pub base_interval_ms: u64,
    /// Floor for the fall interval.
    pub min_interval_ms: u64,
    /// Interval reduction per level.
    pub interval_step_ms: u64,
    /// Fixed seed for the piece sequence; random when absent.
    pub seed: Option<PieceSeed>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            columns: DEFAULT_COLUMNS,
            rows: DEFAULT_ROWS,
            start_interval_ms: Difficulty::Normale.start_interval_ms(),
            base_interval_ms: 500,
            min_interval_ms: 100,
            interval_step_ms: 50,
            seed: None,
        }
    }
}

impl EngineConfig {
    #[must_use]
    pub fn with_difficulty(self, difficulty: Difficulty) -> Self {
        Self {
            start_interval_ms: difficulty.start_interval_ms(),
            ..self
        }
    }

    #[must_use]
    pub fn with_seed(self, seed: PieceSeed) -> Self {
        Self {
            seed: Some(seed),
            ..self
        }
    }

    /// Checks that the collision and line-clear rules can run with this
    /// configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let Self { columns, rows, .. } = *self;
        if columns == 0 || rows == 0 {
            return Err(ConfigError::EmptyGrid { columns, rows });
        }
        for kind in PieceKind::ALL {
            let shape = kind.canonical_shape();
            if shape.width() > columns || shape.height() > rows {
                return Err(ConfigError::PieceDoesNotFit {
                    kind,
                    width: shape.width(),
                    height: shape.height(),
                    columns,
                    rows,
                });
            }
        }
        if self.min_interval_ms == 0 {
            return Err(ConfigError::ZeroMinInterval);
        }
        if self.min_interval_ms > self.base_interval_ms {
            return Err(ConfigError::IntervalOrder {
                min_ms: self.min_interval_ms,
                base_ms: self.base_interval_ms,
            });
        }
        Ok(())
    }

    #[must_use]
    pub fn start_interval(&self) -> Duration {
        Duration::from_millis(self.start_interval_ms.max(self.min_interval_ms))
    }

    /// Fall interval prescribed for `level`:
    /// `max(min, base - (level - 1) * step)`.
    #[must_use]
    pub fn interval_for_level(&self, level: usize) -> Duration {
        let steps = u64::try_from(level.saturating_sub(1)).unwrap_or(u64::MAX);
        let reduction = steps.saturating_mul(self.interval_step_ms);
        let millis = self
            .base_interval_ms
            .saturating_sub(reduction)
            .max(self.min_interval_ms);
        Duration::from_millis(millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_intervals() {
        let intervals = Difficulty::ALL.map(Difficulty::start_interval_ms);
        assert_eq!(intervals, [800, 500, 300, 150]);
    }

    #[test]
    fn test_difficulty_from_name() {
        assert_eq!(Difficulty::from_name(Some("facile")), Difficulty::Facile);
        assert_eq!(
            Difficulty::from_name(Some("IMPOSSIBILE")),
            Difficulty::Impossibile
        );
        assert_eq!(Difficulty::from_name(Some("")), Difficulty::Normale);
        assert_eq!(Difficulty::from_name(None), Difficulty::Normale);
    }

    #[test]
    fn test_difficulty_serde_names() {
        let json = serde_json::to_string(&Difficulty::Difficile).unwrap();
        assert_eq!(json, "\"difficile\"");
        assert_eq!(Difficulty::Difficile.to_string(), "difficile");
    }

    #[test]
    fn test_interval_for_level() {
        let config = EngineConfig::default();
        assert_eq!(config.interval_for_level(1), Duration::from_millis(500));
        assert_eq!(config.interval_for_level(2), Duration::from_millis(450));
        assert_eq!(config.interval_for_level(9), Duration::from_millis(100));
        assert_eq!(config.interval_for_level(10), Duration::from_millis(100));
        assert_eq!(config.interval_for_level(1000), Duration::from_millis(100));
    }

    #[test]
    fn test_default_is_valid() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_degenerate_grid() {
        let config = EngineConfig {
            columns: 0,
            ..EngineConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::EmptyGrid { .. })
        ));

        let config = EngineConfig {
            columns: 3,
            ..EngineConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::PieceDoesNotFit {
                kind: PieceKind::I,
                ..
            })
        ));
    }

    #[test]
    fn test_validate_rejects_bad_intervals() {
        let config = EngineConfig {
            min_interval_ms: 0,
            ..EngineConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ZeroMinInterval)
        ));

        let config = EngineConfig {
            min_interval_ms: 600,
            ..EngineConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::IntervalOrder { .. })
        ));
    }

    #[test]
    fn test_config_roundtrip() {
        let config = EngineConfig::default()
            .with_difficulty(Difficulty::Facile)
            .with_seed(PieceSeed::from_bytes([1; 16]));
        let json = serde_json::to_string(&config).unwrap();
        let back: EngineConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_config_rejects_unknown_fields() {
        assert!(serde_json::from_str::<EngineConfig>(r#"{ "colums": 12 }"#).is_err());
    }
}
