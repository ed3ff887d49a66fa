use crate::error::{KanbanError, Result};
use crate::paths;
use chrono::{FixedOffset, Local, Weekday};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// WeekStart
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeekStart {
    #[default]
    Monday,
    Sunday,
}

impl WeekStart {
    pub fn weekday(self) -> Weekday {
        match self {
            WeekStart::Monday => Weekday::Mon,
            WeekStart::Sunday => Weekday::Sun,
        }
    }
}

// ---------------------------------------------------------------------------
// TimelineConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimelineConfig {
    #[serde(default)]
    pub week_start: WeekStart,
    /// Reference offset such as `-03:00`. Unset means the host's local offset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub utc_offset: Option<String>,
}

impl TimelineConfig {
    pub fn offset(&self) -> Result<FixedOffset> {
        match &self.utc_offset {
            Some(raw) => parse_offset(raw),
            None => Ok(*Local::now().offset()),
        }
    }
}

/// Parse `Z`, `+HH:MM` or `-HH:MM`.
pub fn parse_offset(raw: &str) -> Result<FixedOffset> {
    let invalid = || KanbanError::InvalidField {
        field: "utc_offset",
        reason: format!("'{raw}' is not of the form +HH:MM or -HH:MM"),
    };
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("z") {
        return FixedOffset::east_opt(0).ok_or_else(invalid);
    }
    let (sign, rest) = match raw.as_bytes().first() {
        Some(b'+') => (1, &raw[1..]),
        Some(b'-') => (-1, &raw[1..]),
        _ => return Err(invalid()),
    };
    let (h, m) = rest.split_once(':').ok_or_else(invalid)?;
    let h: i32 = h.parse().map_err(|_| invalid())?;
    let m: i32 = m.parse().map_err(|_| invalid())?;
    if h > 23 || m > 59 {
        return Err(invalid());
    }
    FixedOffset::east_opt(sign * (h * 3600 + m * 60)).ok_or_else(invalid)
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// Optional per-project settings read from `.kanban.yaml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_milestones_file")]
    pub milestones_file: String,
    #[serde(default)]
    pub timeline: TimelineConfig,
}

fn default_milestones_file() -> String {
    paths::MILESTONES_FILE.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            milestones_file: default_milestones_file(),
            timeline: TimelineConfig::default(),
        }
    }
}

impl Config {
    /// Load `.kanban.yaml`; defaults when absent, error when malformed.
    pub fn load(project: &Path) -> Result<Self> {
        let path = paths::config_path(project);
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = std::fs::read_to_string(&path)?;
        if data.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Config = serde_yaml::from_str(&data)?;
        config.timeline.offset()?;
        Ok(config)
    }

    pub fn milestones_path(&self, project: &Path) -> PathBuf {
        project.join(&self.milestones_file)
    }
}
