use crate::error::{Result, RollcallError};
use chrono::FixedOffset;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// REST `/users/{login}/events`, looking for a PushEvent today
    Events,
    /// GraphQL contribution calendar, looking at today's count
    Graphql,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceKind::Events => write!(f, "events"),
            SourceKind::Graphql => write!(f, "graphql"),
        }
    }
}

#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    pub github_token: Option<String>,
    #[serde(default = "default_participants")]
    pub participants: Vec<String>,
    pub source: SourceKind,
    pub utc_offset: String,
    pub max_concurrency: usize,
    pub request_timeout_secs: u64,
    pub auto_refresh_secs: Option<u64>,
    pub api_base: Option<String>,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("github_token", &self.github_token.as_ref().map(|_| "[REDACTED]"))
            .field("participants", &self.participants)
            .field("source", &self.source)
            .field("utc_offset", &self.utc_offset)
            .field("max_concurrency", &self.max_concurrency)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("auto_refresh_secs", &self.auto_refresh_secs)
            .field("api_base", &self.api_base)
            .finish()
    }
}

fn default_participants() -> Vec<String> {
    vec![
        "gihwan-dev".to_string(),
        "Baek-Seungyeop".to_string(),
        "Byeolnabi".to_string(),
        "tlswl7479".to_string(),
        "vvalvvizal".to_string(),
        "yujini1121".to_string(),
    ]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            github_token: None,
            participants: default_participants(),
            source: SourceKind::Graphql,
            utc_offset: "+09:00".to_string(),
            max_concurrency: 1,
            request_timeout_secs: 30,
            auto_refresh_secs: None,
            api_base: None,
        }
    }
}

impl Config {
    pub fn load(cli_path: Option<PathBuf>) -> Self {
        let config_file = cli_path.unwrap_or_else(default_config_file);
        Self::load_from(&config_file)
    }

    pub fn load_from(config_file: &Path) -> Self {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));

        if config_file.exists() {
            figment = figment.merge(Toml::file(config_file));
        }

        figment = figment.merge(Env::prefixed("ROLLCALL_")).merge(
            Env::raw()
                .only(&["GITHUB_TOKEN"])
                .map(|_| "github_token".into()),
        );

        match figment.extract() {
            Ok(config) => config,
            Err(e) => {
                eprintln!("warning: config parse error, using defaults: {e}");
                Config::default()
            }
        }
    }

    pub fn offset(&self) -> Result<FixedOffset> {
        parse_offset(&self.utc_offset).ok_or_else(|| {
            RollcallError::Config(format!(
                "invalid utc_offset {:?}: expected ±HH:MM",
                self.utc_offset
            ))
        })
    }

    pub fn token(&self) -> Option<&str> {
        self.github_token.as_deref().filter(|t| !t.is_empty())
    }

    /// TOML rendering with the token masked, for `--print-config`.
    pub fn to_toml_redacted(&self) -> Result<String> {
        let mut shown = self.clone();
        if shown.github_token.is_some() {
            shown.github_token = Some("[REDACTED]".to_string());
        }
        toml::to_string_pretty(&shown).map_err(|e| RollcallError::Config(e.to_string()))
    }
}

/// Accepts `+HH:MM`, `-HH:MM`, `+HHMM`, `+HH` and `Z`.
pub fn parse_offset(s: &str) -> Option<FixedOffset> {
    let s = s.trim();
    if s.eq_ignore_ascii_case("z") || s.eq_ignore_ascii_case("utc") {
        return FixedOffset::east_opt(0);
    }
    let (sign, rest) = match s.as_bytes().first()? {
        b'+' => (1, &s[1..]),
        b'-' => (-1, &s[1..]),
        _ => return None,
    };
    let (hh, mm) = match rest.split_once(':') {
        Some((h, m)) => (h, m),
        None if rest.len() == 4 => rest.split_at(2),
        None => (rest, "0"),
    };
    if hh.is_empty() || hh.len() > 2 || mm.is_empty() || mm.len() > 2 {
        return None;
    }
    let hours: i32 = hh.parse().ok()?;
    let minutes: i32 = mm.parse().ok()?;
    if hours > 14 || minutes > 59 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

pub fn config_dir() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .ok()
        .map(PathBuf::from)
        .or_else(|| {
            std::env::var("HOME")
                .ok()
                .map(|h| PathBuf::from(h).join(".config"))
        })
        .unwrap_or_else(|| PathBuf::from("."))
}

fn default_config_file() -> PathBuf {
    config_dir().join("rollcall").join("config.toml")
}
