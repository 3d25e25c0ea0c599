use std::io::{self, BufRead, Write};

use colored::Colorize;
use iw_runner::{PageConfig, PagePhase, PageSurface, StoryPage, page_runtime};

pub fn run(config: PageConfig) -> Result<(), String> {
    let runtime = page_runtime().map_err(|e| e.to_string())?;
    let mut page = StoryPage::new(config, iw_core::available_engine(), PageSurface::new());

    println!("  {} {}", "Loading".bold(), page.config().story);
    runtime.block_on(page.boot());
    if !page.surface().version().is_empty() {
        println!("  {}", page.surface().version().dimmed());
    }
    println!();
    super::print_page(page.surface());

    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut line = String::new();

    loop {
        match page.phase() {
            PagePhase::Ended => return Ok(()),
            PagePhase::Failed(_) => print!("r to reload, q to quit > "),
            _ => print!("> "),
        }
        io::stdout().flush().map_err(|e| e.to_string())?;

        line.clear();
        match reader.read_line(&mut line) {
            Ok(0) => break, // EOF
            Err(e) => return Err(e.to_string()),
            _ => {}
        }

        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        if input.eq_ignore_ascii_case("q") || input.eq_ignore_ascii_case("quit") {
            break;
        }

        if input.eq_ignore_ascii_case("r") || input.eq_ignore_ascii_case("reload") {
            println!();
            runtime.block_on(page.reload());
            super::print_page(page.surface());
            continue;
        }

        if *page.phase() != PagePhase::AwaitingChoice {
            continue;
        }

        let available = page.surface().choices().len();
        match input.parse::<usize>() {
            Ok(n) if (1..=available).contains(&n) => {
                println!();
                tracing::debug!(choice = n, "player selected");
                page.select(n - 1);
                super::print_page(page.surface());
            }
            _ => println!(
                "{}\n",
                format!("Pick a choice from 1 to {available}, r to reload, or q to quit.").yellow()
            ),
        }
    }

    match page.phase() {
        PagePhase::Failed(e) => Err(e.to_string()),
        _ => Ok(()),
    }
}
