use std::env;

use serde::{Deserialize, Serialize};

use crate::expression::LeafRule;
use crate::unit::{Recurrence, TimeUnit};

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

/// Read a profiled env var: tries {PROFILE}_{KEY} first, falls back to {KEY}.
fn profiled_env_opt(profile: &str, key: &str) -> Option<String> {
    if !profile.is_empty() {
        let prefixed = format!("{}_{}", profile, key);
        if let Some(v) = env_opt(&prefixed) {
            return Some(v);
        }
    }
    env_opt(key)
}

fn profiled_env_or(profile: &str, key: &str, default: &str) -> String {
    profiled_env_opt(profile, key).unwrap_or_else(|| default.to_string())
}

fn profiled_env_f64(profile: &str, key: &str, default: f64) -> f64 {
    profiled_env_opt(profile, key)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

fn profiled_env_u32(profile: &str, key: &str, default: u32) -> u32 {
    profiled_env_opt(profile, key)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

fn profiled_env_bool(profile: &str, key: &str, default: bool) -> bool {
    match profiled_env_opt(profile, key) {
        Some(v) => matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "on"),
        None => default,
    }
}

// ── Top-level config ──────────────────────────────────────────

/// Widget defaults and validation switches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Active profile name (empty = default).
    pub profile: String,
    pub leaf: LeafDefaults,
    pub schedule: ScheduleDefaults,
    /// Treat NOT nodes with other than one operand as validation errors
    /// instead of warnings.
    pub strict_not_arity: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            profile: String::new(),
            leaf: LeafDefaults::default(),
            schedule: ScheduleDefaults::default(),
            strict_not_arity: false,
        }
    }
}

impl EditorConfig {
    /// Build config from environment variables (call `load_dotenv()` first).
    /// Profile is read from `TEMPO_PROFILE`. When set (e.g. `DEV`), every key
    /// is first looked up as `{PROFILE}_{KEY}`, falling back to `{KEY}`.
    pub fn from_env() -> Self {
        let profile = env_or("TEMPO_PROFILE", "").to_uppercase();
        Self::for_profile(&profile)
    }

    /// Build config for a specific named profile (empty string = default).
    pub fn for_profile(profile: &str) -> Self {
        let p = profile.to_uppercase();
        let p = p.as_str();
        Self {
            profile: p.to_string(),
            leaf: LeafDefaults::from_env_profiled(p),
            schedule: ScheduleDefaults::from_env_profiled(p),
            strict_not_arity: profiled_env_bool(p, "TEMPO_STRICT_NOT", false),
        }
    }

    pub fn profile_label(&self) -> &str {
        if self.profile.is_empty() { "default" } else { &self.profile }
    }

    /// The leaf rule a new leaf editor starts with.
    pub fn default_leaf(&self) -> LeafRule {
        self.leaf.to_rule()
    }

    /// Print a summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Editor config loaded (profile: {}):", self.profile_label());
        tracing::info!(
            "  leaf:      from={}, to={}, unit={}, recurrence={}",
            self.leaf.from, self.leaf.to, self.leaf.unit, self.leaf.recurrence
        );
        tracing::info!(
            "  schedule:  weekday={}, from={}, to={}, repeat_on={}",
            self.schedule.weekday, self.schedule.from, self.schedule.to, self.schedule.repeat_on
        );
        tracing::info!("  strict_not_arity={}", self.strict_not_arity);
    }
}

// ── Leaf defaults ─────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeafDefaults {
    pub from: f64,
    pub to: f64,
    pub unit: TimeUnit,
    pub recurrence: Recurrence,
}

impl Default for LeafDefaults {
    fn default() -> Self {
        let rule = LeafRule::default();
        Self {
            from: rule.from,
            to: rule.to,
            unit: rule.unit,
            recurrence: rule.recurrence,
        }
    }
}

impl LeafDefaults {
    fn from_env_profiled(p: &str) -> Self {
        let fallback = Self::default();
        let unit_raw = profiled_env_or(p, "TEMPO_DEFAULT_UNIT", fallback.unit.as_str());
        let unit = unit_raw.parse().unwrap_or_else(|e| {
            tracing::warn!(value = %unit_raw, error = %e, "ignoring TEMPO_DEFAULT_UNIT");
            fallback.unit
        });
        let recurrence_raw =
            profiled_env_or(p, "TEMPO_DEFAULT_RECURRENCE", fallback.recurrence.as_str());
        let recurrence = recurrence_raw.parse().unwrap_or_else(|e| {
            tracing::warn!(value = %recurrence_raw, error = %e, "ignoring TEMPO_DEFAULT_RECURRENCE");
            fallback.recurrence
        });
        Self {
            from: profiled_env_f64(p, "TEMPO_DEFAULT_FROM", fallback.from),
            to: profiled_env_f64(p, "TEMPO_DEFAULT_TO", fallback.to),
            unit,
            recurrence,
        }
    }

    pub fn to_rule(&self) -> LeafRule {
        LeafRule::new(self.from, self.to, self.unit, self.recurrence)
    }
}

// ── Schedule defaults ─────────────────────────────────────────

/// Starting values of the weekly/monthly widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleDefaults {
    /// 1 = Monday .. 7 = Sunday.
    pub weekday: u8,
    /// Hours, quantized to half hours.
    pub from: f64,
    pub to: f64,
    /// Day of month.
    pub repeat_on: u32,
}

impl Default for ScheduleDefaults {
    fn default() -> Self {
        Self {
            weekday: 1,
            from: 12.0,
            to: 23.5,
            repeat_on: 1,
        }
    }
}

impl ScheduleDefaults {
    fn from_env_profiled(p: &str) -> Self {
        let fallback = Self::default();
        let weekday = profiled_env_u32(p, "TEMPO_WEEKLY_WEEKDAY", fallback.weekday as u32);
        Self {
            weekday: u8::try_from(weekday)
                .ok()
                .filter(|d| (1..=7).contains(d))
                .unwrap_or(fallback.weekday),
            from: profiled_env_f64(p, "TEMPO_WEEKLY_FROM", fallback.from),
            to: profiled_env_f64(p, "TEMPO_WEEKLY_TO", fallback.to),
            repeat_on: profiled_env_u32(p, "TEMPO_MONTHLY_REPEAT_ON", fallback.repeat_on),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_leaf_matches_widget_default() {
        let config = EditorConfig::default();
        assert_eq!(config.default_leaf(), LeafRule::default());
        assert_eq!(config.profile_label(), "default");
        assert!(!config.strict_not_arity);
    }

    #[test]
    fn profiled_keys_take_precedence() {
        // Unique profile name keeps this test independent of the real environment.
        env::set_var("CFGTEST_TEMPO_DEFAULT_FROM", "3");
        env::set_var("CFGTEST_TEMPO_DEFAULT_UNIT", "minute");
        env::set_var("CFGTEST_TEMPO_DEFAULT_RECURRENCE", "none");
        env::set_var("CFGTEST_TEMPO_STRICT_NOT", "yes");
        env::set_var("CFGTEST_TEMPO_WEEKLY_WEEKDAY", "9");

        let config = EditorConfig::for_profile("cfgtest");
        assert_eq!(config.profile, "CFGTEST");
        assert_eq!(config.leaf.from, 3.0);
        assert_eq!(config.leaf.unit, TimeUnit::Minute);
        assert_eq!(config.leaf.recurrence, Recurrence::None);
        assert!(config.strict_not_arity);
        // Out-of-range weekday falls back to Monday.
        assert_eq!(config.schedule.weekday, 1);
    }

    #[test]
    fn unparseable_unit_falls_back() {
        env::set_var("BADUNIT_TEMPO_DEFAULT_UNIT", "fortnight");
        let config = EditorConfig::for_profile("badunit");
        assert_eq!(config.leaf.unit, TimeUnit::Hour);
    }
}
