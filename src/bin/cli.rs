// src/bin/cli.rs
use tagalog_scrape::cli;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let summary = cli::run()?;
    for file in &summary.files {
        println!("{}", file.display());
    }
    eprintln!(
        "Done: {} page(s) ok, {} failed, {} write failure(s), {} word(s) written",
        summary.pages_ok, summary.pages_failed, summary.write_failures, summary.records_written
    );
    Ok(())
}
