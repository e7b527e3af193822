use clap::Args;
use comfy_table::Cell;

use crate::cli::output::{create_standard_table, empty, header_cell, info, section_header};
use crate::cli::GlobalArgs;
use crate::core::resolver::SearchMode;

#[derive(Args)]
pub struct SuggestArgs {
    /// Beginning of the value to complete
    #[arg(value_name = "PREFIX")]
    pub prefix: String,

    /// Vocabulary to complete from (accession, index, name, taxon)
    #[arg(short, long, default_value = "name")]
    pub by: SearchMode,

    /// Maximum number of suggestions (defaults to the config value)
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Print a JSON array instead of a table
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: SuggestArgs, global: &GlobalArgs) -> anyhow::Result<()> {
    let config = super::load_settings(global)?;
    let library = super::open_library(global, &config)?;

    let limit = args.limit.unwrap_or(config.output.suggestion_limit);
    let trie = library.suggestions(args.by);
    let all = trie.search(&args.prefix);
    let shown = trie.search_limited(&args.prefix, limit);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&shown)?);
        return Ok(());
    }

    if shown.is_empty() {
        empty(&format!(
            "No {} starts with '{}'",
            args.by.label().to_lowercase(),
            args.prefix
        ));
        return Ok(());
    }

    section_header(&format!("Suggestions for '{}'", args.prefix));
    let mut table = create_standard_table();
    table.set_header(vec![header_cell("#"), header_cell(args.by.label())]);
    for (i, word) in shown.iter().enumerate() {
        table.add_row(vec![Cell::new(i + 1), Cell::new(word)]);
    }
    println!("{}", table);

    if all.len() > shown.len() {
        info(&format!("{} of {} matches shown", shown.len(), all.len()));
    }
    Ok(())
}
