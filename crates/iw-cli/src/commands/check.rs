use comfy_table::{ContentArrangement, Table};
use iw_runner::{PageConfig, PagePhase, PageSurface, StoryPage, TextBlock, page_runtime};

pub fn run(config: PageConfig) -> Result<(), String> {
    let runtime = page_runtime().map_err(|e| e.to_string())?;
    let mut page = StoryPage::new(config, iw_core::available_engine(), PageSurface::new());
    runtime.block_on(page.boot());

    if let PagePhase::Failed(e) = page.phase() {
        super::print_page(page.surface());
        return Err(e.to_string());
    }

    let surface = page.surface();
    let state = match page.phase() {
        PagePhase::Ended => "ended",
        _ => "awaiting choice",
    };
    let warnings = surface
        .text()
        .iter()
        .filter(|b| matches!(b, TextBlock::Warning(_)))
        .count();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Story", "Engine", "Paragraphs", "Choices", "State"]);
    table.add_row(vec![
        page.config().story.to_string(),
        surface.version().to_string(),
        surface.paragraphs().count().to_string(),
        surface.choices().len().to_string(),
        state.to_string(),
    ]);

    println!("{table}");
    println!();
    if warnings > 0 {
        println!("  Story loaded, but its opening produced no text.");
    } else {
        println!("  Story loaded and rendered.");
    }

    Ok(())
}
