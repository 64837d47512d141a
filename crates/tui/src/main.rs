mod renderer;

use std::path::PathBuf;

use anyhow::Result;
use commitscope_core::model::History;

const DEFAULT_REPO_URL: &str = "https://github.com/orginalbusta/Portfolio";

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: commitscope <loc.csv> [repo-url]");
        std::process::exit(1);
    }

    let path = PathBuf::from(&args[1]);
    let repo_url = args.get(2).map_or(DEFAULT_REPO_URL, String::as_str);

    // A failed load is an empty dataset, never partial data.
    let rows = match std::fs::read(&path) {
        Ok(data) => match commitscope_core::loader::load_rows(data.as_slice()) {
            Ok(rows) => rows,
            Err(e) => {
                eprintln!("commitscope: failed to parse {}: {e}", path.display());
                Vec::new()
            }
        },
        Err(e) => {
            eprintln!("commitscope: failed to read {}: {e}", path.display());
            Vec::new()
        }
    };

    let history = History::from_rows(rows, repo_url);
    renderer::run(history)
}
