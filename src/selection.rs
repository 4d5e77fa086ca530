use crate::error::SelectionError;

/// Selects every parsed set when present anywhere in the selection.
pub const WILDCARD: &str = "*";

/// Outcome of resolving a selection: the kept indices in user order, plus one
/// warning per dropped token.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub indices: Vec<usize>,
    pub warnings: Vec<String>,
}

impl Selection {
    /// Fails when no valid index survived.
    pub fn into_indices(self) -> Result<Vec<usize>, SelectionError> {
        if self.indices.is_empty() {
            Err(SelectionError::Empty)
        } else {
            Ok(self.indices)
        }
    }
}

/// Resolves a comma separated selection against `set_count` parsed sets.
///
/// Order and duplicates are preserved. Invalid tokens are dropped with a
/// warning; an empty result is left to [`Selection::into_indices`].
pub fn resolve(selection_text: &str, set_count: usize) -> Selection {
    let tokens: Vec<&str> = selection_text
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .collect();

    if tokens.contains(&WILDCARD) {
        return Selection {
            indices: (0..set_count).collect(),
            warnings: Vec::new(),
        };
    }

    let mut selection = Selection::default();
    for token in tokens {
        if !token.chars().all(|c| c.is_ascii_digit()) {
            selection
                .warnings
                .push(format!("'{token}' is not an integer, skipping."));
            continue;
        }

        match token.parse::<usize>() {
            Ok(index) if index < set_count => selection.indices.push(index),
            // Digit strings too large for usize are out of range as well
            _ => selection
                .warnings
                .push(format!("{} is out of range, skipping.", normalize(token))),
        }
    }

    selection
}

/// Drops leading zeros the way integer formatting would.
fn normalize(digits: &str) -> &str {
    let trimmed = digits.trim_start_matches('0');
    if trimmed.is_empty() {
        "0"
    } else {
        trimmed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_index() {
        let selection = resolve("0", 2);
        assert_eq!(selection.indices, vec![0]);
        assert!(selection.warnings.is_empty());
    }

    #[test]
    fn test_order_and_duplicates_preserved() {
        let selection = resolve(" 2, 0 ,,2 ", 3);
        assert_eq!(selection.indices, vec![2, 0, 2]);
    }

    #[test]
    fn test_wildcard_replaces_every_token() {
        let selection = resolve("1, *, nope, 99", 3);
        assert_eq!(selection.indices, vec![0, 1, 2]);
        assert!(selection.warnings.is_empty());
    }

    #[test]
    fn test_invalid_tokens_warn_and_are_dropped() {
        let selection = resolve("a, -1, 1, 5, 007", 2);
        assert_eq!(selection.indices, vec![1]);
        assert_eq!(
            selection.warnings,
            vec![
                "'a' is not an integer, skipping.",
                "'-1' is not an integer, skipping.",
                "5 is out of range, skipping.",
                "7 is out of range, skipping.",
            ]
        );
    }

    #[test]
    fn test_huge_index_is_out_of_range() {
        let selection = resolve("99999999999999999999999999", 2);
        assert!(selection.indices.is_empty());
        assert_eq!(
            selection.warnings,
            vec!["99999999999999999999999999 is out of range, skipping."]
        );
    }

    #[test]
    fn test_empty_selection_is_fatal() {
        assert_eq!(resolve("5", 2).into_indices(), Err(SelectionError::Empty));
        assert_eq!(resolve("  ", 2).into_indices(), Err(SelectionError::Empty));
        assert_eq!(resolve("1", 2).into_indices(), Ok(vec![1]));
    }

    #[test]
    fn test_never_out_of_bounds() {
        for count in 0..4 {
            let selection = resolve("0,1,2,3,4,5", count);
            assert!(selection.indices.iter().all(|&index| index < count));
        }
    }
}
