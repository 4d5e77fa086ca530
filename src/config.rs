use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::error::ConfigError;

/// A named group of template lines, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Set {
    pub name: String,
    pub lines: Vec<String>,
}

impl Set {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            lines: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// The parsed set configuration. Sets are identified by position; duplicate
/// names are kept as separate sets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    sets: Vec<Set>,
}

impl Config {
    /// Parses raw configuration lines into sets.
    ///
    /// - blank lines are skipped
    /// - lines starting with `#` are comments
    /// - lines starting with an alphabetic character open a new set
    /// - every other line belongs to the current set, right-trimmed only
    pub fn parse<I, S>(lines: I) -> std::result::Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut sets = Vec::new();
        let mut current: Option<Set> = None;

        for (index, raw) in lines.into_iter().enumerate() {
            let raw = raw.as_ref();
            if raw.trim().is_empty() {
                continue;
            }

            match raw.chars().next() {
                Some('#') => continue,
                Some(first) if first.is_alphabetic() => {
                    if let Some(finished) = current.replace(Set::new(raw.trim())) {
                        sets.push(finished);
                    }
                }
                _ => match current.as_mut() {
                    Some(set) => set.lines.push(raw.trim_end().to_string()),
                    None => {
                        return Err(ConfigError::MalformedConfig {
                            line_number: index + 1,
                            line: raw.trim_end().to_string(),
                        })
                    }
                },
            }
        }

        sets.extend(current);

        if sets.is_empty() {
            return Err(ConfigError::NoSetsParsed);
        }

        Ok(Self { sets })
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(anyhow::anyhow!(
                "Config file does not exist: {}",
                path.display()
            ));
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config = contents
            .parse::<Config>()
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    pub fn sets(&self) -> &[Set] {
        &self.sets
    }

    pub fn get(&self, index: usize) -> Option<&Set> {
        self.sets.get(index)
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    /// Always false for a successfully parsed config.
    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}

impl FromStr for Config {
    type Err = ConfigError;

    fn from_str(text: &str) -> std::result::Result<Self, Self::Err> {
        Self::parse(text.lines())
    }
}
