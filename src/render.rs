use anyhow::Result;

use crate::config::Set;
use crate::interactive::Prompter;
use crate::variables::{label, substitute, ConditionCache, VariableCache};

/// Renders one set.
///
/// Every line first has its `{name}` placeholders substituted (the
/// `[condition]` prefix included), asking for unknown variables. Lines that
/// start with `[` are then kept only if their condition is answered with yes,
/// with the prefix stripped. Dropped lines leave the order of the rest intact.
pub fn render<P>(
    set: &Set,
    variables: &mut VariableCache,
    conditions: &mut ConditionCache,
    prompter: &mut P,
) -> Result<Vec<String>>
where
    P: Prompter + ?Sized,
{
    let mut rendered = Vec::with_capacity(set.len());
    for line in &set.lines {
        if let Some(kept) = render_line(line, variables, conditions, prompter)? {
            rendered.push(kept);
        }
    }
    Ok(rendered)
}

fn render_line<P>(
    line: &str,
    variables: &mut VariableCache,
    conditions: &mut ConditionCache,
    prompter: &mut P,
) -> Result<Option<String>>
where
    P: Prompter + ?Sized,
{
    let substituted = substitute(line, |name| {
        variables
            .get_or_ask(name, || prompter.ask_text(&label(name)))
            .map(str::to_string)
    })?;

    if !line.starts_with('[') {
        return Ok(Some(substituted));
    }

    // The bracket is searched in the substituted text, so a placeholder that
    // swallowed the only `]` also makes the line malformed.
    let close = match (line.contains(']'), substituted.find(']')) {
        (true, Some(close)) => close,
        _ => {
            prompter.warn(&format!("Malformed line '{line}', skipping."))?;
            return Ok(None);
        }
    };

    let condition = &substituted[1..close];
    let keep = conditions.get_or_ask(condition, || prompter.ask_yes_no(&label(condition)))?;

    Ok(keep.then(|| substituted[close + 1..].to_string()))
}
