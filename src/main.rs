use anyhow::Result;
use clap::{Arg, ArgAction, ArgMatches, Command};
use colored::*;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process;

use tolige::{
    Config, LinePrompter, Prompter, RenderPipeline, RunOptions, SettingsManager,
    TerminalPrompter,
};

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let matches = build_cli().get_matches();

    let settings_manager = SettingsManager::new()?;
    let config_file = matches
        .get_one::<PathBuf>("config")
        .cloned()
        .unwrap_or_else(|| settings_manager.config_file());
    let config = Config::load(&config_file)?;

    if matches.get_flag("list") {
        list_sets(&config);
        return Ok(());
    }

    let options = run_options(&matches, &settings_manager);

    if io::stdin().is_terminal() {
        render_document(TerminalPrompter::new(), &config, &options)
    } else {
        render_document(
            LinePrompter::new(io::stdin().lock(), io::stdout()),
            &config,
            &options,
        )
    }
}

fn build_cli() -> Command {
    Command::new("tolige")
        .about("A todo list generator that renders reusable line sets with interactive variables and conditions")
        .version("0.1.0")
        .author("Your Name")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Set configuration to read (defaults to tolige.config in the config directory)")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("select")
                .short('s')
                .long("select")
                .value_name("EXPR")
                .help("Comma separated set indices, or * for all sets"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .help("Output file path")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("list")
                .short('l')
                .long("list")
                .help("List the parsed sets and exit")
                .action(ArgAction::SetTrue),
        )
}

fn run_options(matches: &ArgMatches, settings_manager: &SettingsManager) -> RunOptions {
    RunOptions {
        selection: matches.get_one::<String>("select").cloned(),
        output: matches.get_one::<PathBuf>("output").cloned(),
        default_output: settings_manager.default_output().to_path_buf(),
    }
}

fn list_sets(config: &Config) {
    for (index, set) in config.sets().iter().enumerate() {
        println!(
            "  {}) {} ({} lines)",
            index.to_string().cyan(),
            set.name.bold(),
            set.len()
        );
    }
}

fn render_document<P: Prompter>(prompter: P, config: &Config, options: &RunOptions) -> Result<()> {
    let mut pipeline = RenderPipeline::new(prompter);
    let (document, path) = pipeline.run(config, options)?;

    println!(
        "{} Wrote {} set(s) to {}",
        "✓".green().bold(),
        document.sets().len(),
        path.display().to_string().cyan().bold()
    );

    Ok(())
}
