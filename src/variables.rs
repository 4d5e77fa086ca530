use anyhow::Result;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// Answers to `{name}` placeholders, shared by every set rendered in one run.
#[derive(Debug, Clone, Default)]
pub struct VariableCache {
    vars: HashMap<String, String>,
}

impl VariableCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Returns the cached value for `name`, calling `ask` only on the first lookup.
    pub fn get_or_ask<F>(&mut self, name: &str, ask: F) -> Result<&str>
    where
        F: FnOnce() -> Result<String>,
    {
        let value = match self.vars.entry(name.to_string()) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(ask()?),
        };
        Ok(value)
    }
}

/// Answers to `[condition]` prefixes. A fresh cache is used for every set.
#[derive(Debug, Clone, Default)]
pub struct ConditionCache {
    answers: HashMap<String, bool>,
}

impl ConditionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<bool> {
        self.answers.get(name).copied()
    }

    pub fn get_or_ask<F>(&mut self, name: &str, ask: F) -> Result<bool>
    where
        F: FnOnce() -> Result<bool>,
    {
        match self.answers.entry(name.to_string()) {
            Entry::Occupied(entry) => Ok(*entry.get()),
            Entry::Vacant(entry) => Ok(*entry.insert(ask()?)),
        }
    }
}

/// Replaces every `{name}` placeholder in `line` with `resolve(name)`.
///
/// A name is at least one character long and ends at the first following `}`,
/// so `{}}` names `}` and a lone `{` is kept as text.
pub fn substitute<F>(line: &str, mut resolve: F) -> Result<String>
where
    F: FnMut(&str) -> Result<String>,
{
    let mut resolved = String::with_capacity(line.len());
    let mut rest = line;

    while let Some(open) = rest.find('{') {
        let after_open = &rest[open + 1..];
        let first_len = match after_open.chars().next() {
            Some(first) => first.len_utf8(),
            None => break,
        };

        match after_open[first_len..].find('}') {
            Some(close) => {
                let name_end = first_len + close;
                resolved.push_str(&rest[..open]);
                resolved.push_str(&resolve(&after_open[..name_end])?);
                rest = &after_open[name_end + 1..];
            }
            None => {
                resolved.push_str(&rest[..=open]);
                rest = after_open;
            }
        }
    }

    resolved.push_str(rest);
    Ok(resolved)
}

/// Prompt label for a variable or condition: the name with its first character
/// upper-cased. The rest of the name is left as written, so `iPhone` is shown
/// as `IPhone` rather than `Iphone`.
pub fn label(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(line: &str) -> Vec<String> {
        let mut seen = Vec::new();
        substitute(line, |name| {
            seen.push(name.to_string());
            Ok(String::new())
        })
        .unwrap();
        seen
    }

    #[test]
    fn test_substitute_placeholders() {
        let resolved = substitute("Hi {name}, see {place}!", |name| {
            Ok(name.to_uppercase())
        })
        .unwrap();
        assert_eq!(resolved, "Hi NAME, see PLACE!");
    }

    #[test]
    fn test_placeholder_matching_is_non_greedy() {
        assert_eq!(names("{a}{b} {c d}"), vec!["a", "b", "c d"]);
        assert_eq!(names("{{a}"), vec!["{a"]);
        assert_eq!(names("{}}"), vec!["}"]);
    }

    #[test]
    fn test_unclosed_braces_stay_literal() {
        let resolved = substitute("{} and { open", |_| Ok("x".to_string())).unwrap();
        assert_eq!(resolved, "{} and { open");

        let resolved = substitute("trailing {", |_| Ok("x".to_string())).unwrap();
        assert_eq!(resolved, "trailing {");
    }

    #[test]
    fn test_multibyte_names() {
        let resolved = substitute("→{é}←", |name| Ok(format!("<{name}>"))).unwrap();
        assert_eq!(resolved, "→<é>←");
    }

    #[test]
    fn test_variable_cache_asks_once() {
        let mut cache = VariableCache::new();
        let mut asked = 0;

        for _ in 0..3 {
            let value = cache
                .get_or_ask("name", || {
                    asked += 1;
                    Ok("Sam".to_string())
                })
                .unwrap();
            assert_eq!(value, "Sam");
        }

        assert_eq!(asked, 1);
        assert_eq!(cache.get("name"), Some("Sam"));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_failed_ask_is_not_cached() {
        let mut cache = ConditionCache::new();
        assert!(cache
            .get_or_ask("urgent", || Err(anyhow::anyhow!("input closed")))
            .is_err());
        assert_eq!(cache.get("urgent"), None);

        assert!(cache.get_or_ask("urgent", || Ok(true)).unwrap());
        assert!(cache.get_or_ask("urgent", || Ok(false)).unwrap());
    }

    #[test]
    fn test_label_capitalizes_first_character() {
        assert_eq!(label("name"), "Name");
        assert_eq!(label("due date"), "Due date");
        assert_eq!(label("iPhone"), "IPhone");
        assert_eq!(label("ßig"), "SSig");
        assert_eq!(label(""), "");
    }
}
