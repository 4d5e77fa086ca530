use anyhow::{anyhow, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::interactive::Prompter;
use crate::render;
use crate::selection::{self, WILDCARD};
use crate::variables::{ConditionCache, VariableCache};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedSet {
    pub name: String,
    pub lines: Vec<String>,
}

/// Rendered sets in output order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedDocument {
    sets: Vec<RenderedSet>,
}

impl RenderedDocument {
    pub fn sets(&self) -> &[RenderedSet] {
        &self.sets
    }

    /// Each line followed by a newline, and one blank line after every set.
    pub fn to_text(&self) -> String {
        let mut text = String::new();
        for set in &self.sets {
            for line in &set.lines {
                text.push_str(line);
                text.push('\n');
            }
            text.push('\n');
        }
        text
    }

    pub fn write_to(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_text())
            .with_context(|| format!("Failed to write output file: {}", path.display()))
    }
}

/// Inputs that would otherwise be asked for interactively.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub selection: Option<String>,
    pub output: Option<PathBuf>,
    pub default_output: PathBuf,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            selection: None,
            output: None,
            default_output: PathBuf::from(crate::settings::DEFAULT_OUTPUT),
        }
    }
}

/// Drives one run: selection, rendering of every selected set, and writing
/// the result. Variable answers live as long as the pipeline.
pub struct RenderPipeline<P> {
    prompter: P,
    variables: VariableCache,
}

impl<P: Prompter> RenderPipeline<P> {
    pub fn new(prompter: P) -> Self {
        Self {
            prompter,
            variables: VariableCache::new(),
        }
    }

    pub fn variables(&self) -> &VariableCache {
        &self.variables
    }

    pub fn into_prompter(self) -> P {
        self.prompter
    }

    /// Resolves `selection`, or asks for one when `None`. Warnings for dropped
    /// tokens are passed to the prompter before the result is checked.
    pub fn select(&mut self, config: &Config, selection: Option<&str>) -> Result<Vec<usize>> {
        let text = match selection {
            Some(text) => text.to_string(),
            None => self.prompter.ask_text(&selection_prompt(config))?,
        };

        let resolved = selection::resolve(&text, config.len());
        for warning in &resolved.warnings {
            self.prompter.warn(warning)?;
        }

        Ok(resolved.into_indices()?)
    }

    /// Renders the sets at `indices` in order. Repeated indices are rendered
    /// again, with their conditions asked again.
    pub fn render(&mut self, config: &Config, indices: &[usize]) -> Result<RenderedDocument> {
        let mut document = RenderedDocument::default();

        for &index in indices {
            let set = config
                .get(index)
                .ok_or_else(|| anyhow!("Set index {index} is out of range"))?;

            let mut conditions = ConditionCache::new();
            let lines = render::render(
                set,
                &mut self.variables,
                &mut conditions,
                &mut self.prompter,
            )?;

            document.sets.push(RenderedSet {
                name: set.name.clone(),
                lines,
            });
        }

        Ok(document)
    }

    /// Returns `output` or asks for a path, falling back to `default` on an
    /// empty answer. Any other answer is used as given.
    pub fn output_path(&mut self, default: &Path, output: Option<&Path>) -> Result<PathBuf> {
        if let Some(path) = output {
            return Ok(path.to_path_buf());
        }

        let answer = self.prompter.ask_text(&format!(
            "Output file path (defaults to {})",
            default.display()
        ))?;

        if answer.is_empty() {
            Ok(default.to_path_buf())
        } else {
            Ok(PathBuf::from(answer))
        }
    }

    /// Runs the whole pipeline and returns the written document and its path.
    pub fn run(
        &mut self,
        config: &Config,
        options: &RunOptions,
    ) -> Result<(RenderedDocument, PathBuf)> {
        let indices = self.select(config, options.selection.as_deref())?;
        let document = self.render(config, &indices)?;
        let path = self.output_path(&options.default_output, options.output.as_deref())?;
        document.write_to(&path)?;
        Ok((document, path))
    }
}

/// `Select sets (Groceries: 0, Chores: 1, *)`
pub fn selection_prompt(config: &Config) -> String {
    let choices: Vec<String> = config
        .sets()
        .iter()
        .enumerate()
        .map(|(index, set)| format!("{}: {index}", set.name))
        .chain(std::iter::once(WILDCARD.to_string()))
        .collect();

    format!("Select sets ({})", choices.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SelectionError;
    use crate::interactive::LinePrompter;
    use std::io::Cursor;
    use tempfile::TempDir;

    type TestPrompter = LinePrompter<Cursor<Vec<u8>>, Vec<u8>>;

    fn pipeline(input: &str) -> RenderPipeline<TestPrompter> {
        RenderPipeline::new(LinePrompter::new(
            Cursor::new(input.as_bytes().to_vec()),
            Vec::new(),
        ))
    }

    fn transcript(pipeline: RenderPipeline<TestPrompter>) -> String {
        String::from_utf8(pipeline.into_prompter().into_writer()).unwrap()
    }

    fn config() -> Config {
        "Groceries\n\tmilk\n\teggs\nChores\n\ttrash".parse().unwrap()
    }

    #[test]
    fn test_selection_prompt_lists_sets() {
        assert_eq!(
            selection_prompt(&config()),
            "Select sets (Groceries: 0, Chores: 1, *)"
        );
    }

    #[test]
    fn test_select_asks_and_reports_warnings() {
        let mut pipeline = pipeline("x, 1, 9\n");
        let indices = pipeline.select(&config(), None).unwrap();

        assert_eq!(indices, vec![1]);
        assert_eq!(
            transcript(pipeline),
            "Select sets (Groceries: 0, Chores: 1, *): \
             WARNING: 'x' is not an integer, skipping.\n\
             WARNING: 9 is out of range, skipping.\n"
        );
    }

    #[test]
    fn test_select_out_of_range_only_is_fatal() {
        let mut pipeline = pipeline("");
        let err = pipeline.select(&config(), Some("5")).unwrap_err();

        assert_eq!(
            err.downcast_ref::<SelectionError>(),
            Some(&SelectionError::Empty)
        );
        assert_eq!(transcript(pipeline), "WARNING: 5 is out of range, skipping.\n");
    }

    #[test]
    fn test_document_text_separates_sets() {
        let mut pipeline = pipeline("");
        let document = pipeline.render(&config(), &[1, 0]).unwrap();

        assert_eq!(document.sets()[0].name, "Chores");
        assert_eq!(document.to_text(), "\ttrash\n\n\tmilk\n\teggs\n\n");
    }

    #[test]
    fn test_empty_set_renders_separator_only() {
        let config: Config = "Empty\nFull\n x".parse().unwrap();
        let document = pipeline("").render(&config, &[0, 1]).unwrap();
        assert_eq!(document.to_text(), "\n x\n\n");
    }

    #[test]
    fn test_output_path_defaults_on_empty_answer() {
        let default = Path::new("TODO.txt");

        let mut blank = pipeline("\n");
        assert_eq!(blank.output_path(default, None).unwrap(), default);
        assert_eq!(transcript(blank), "Output file path (defaults to TODO.txt): ");

        let mut named = pipeline("week.txt\n");
        assert_eq!(
            named.output_path(default, None).unwrap(),
            PathBuf::from("week.txt")
        );

        let mut spaced = pipeline(" my list.txt \n");
        assert_eq!(
            spaced.output_path(default, None).unwrap(),
            PathBuf::from(" my list.txt ")
        );

        let mut given = pipeline("");
        assert_eq!(
            given
                .output_path(default, Some(Path::new("given.txt")))
                .unwrap(),
            PathBuf::from("given.txt")
        );
    }

    #[test]
    fn test_run_writes_selected_set() {
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("TODO.txt");
        let options = RunOptions {
            selection: Some("0".to_string()),
            output: Some(output.clone()),
            ..RunOptions::default()
        };

        let (document, path) = pipeline("").run(&config(), &options).unwrap();

        assert_eq!(path, output);
        assert_eq!(document.sets().len(), 1);
        assert_eq!(fs::read_to_string(&output).unwrap(), "\tmilk\n\teggs\n\n");
    }
}
