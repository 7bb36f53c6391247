//! Markup preview and highlight commands

use anyhow::{bail, Context, Result};
use colored::*;
use exam_content::config::Settings;
use exam_content::theme;
use exam_markup::{highlight, preview, Highlight, LiveHighlighter};
use std::fs;
use std::thread;
use std::time::{Duration, Instant};

const WATCH_INTERVAL: Duration = Duration::from_millis(50);

fn read_input(text: Option<&str>, file: Option<&str>) -> Result<String> {
    match (text, file) {
        (Some(text), _) => Ok(text.to_string()),
        (None, Some(path)) => {
            fs::read_to_string(path).with_context(|| format!("Failed to read {}", path))
        }
        (None, None) => bail!("Provide markup text or --file <PATH>"),
    }
}

/// Print the rendered preview and the styles applied to it
pub fn preview_markup(text: Option<&str>, file: Option<&str>) -> Result<()> {
    let input = read_input(text, file)?;
    let rendered = preview(&input);

    println!("{}", rendered.text);

    if !rendered.styles.is_empty() {
        println!();
        for style in &rendered.styles {
            println!(
                "  {:>10}  {:14} {:?}",
                style.span.to_string(),
                theme::span_kind(style.kind.as_str()),
                style.span.slice(&rendered.text)
            );
        }
    }
    Ok(())
}

/// Print highlight ranges; with `watch`, re-highlight the file whenever it changes
pub fn highlight_markup(
    text: Option<&str>,
    file: Option<&str>,
    watch: bool,
    root: &str,
) -> Result<()> {
    if !watch {
        let input = read_input(text, file)?;
        print_highlights(&input, &highlight(&input));
        return Ok(());
    }

    let path = file.context("--watch requires --file")?;
    let settings = Settings::load(root)?;
    watch_file(path, settings.highlight_debounce())
}

fn watch_file(path: &str, delay: Duration) -> Result<()> {
    let mut live = LiveHighlighter::new(delay);
    let mut last_seen: Option<String> = None;

    println!("{} Watching {} (Ctrl-C to stop)", theme::info_symbol().cyan(), path.bold());

    loop {
        let content =
            fs::read_to_string(path).with_context(|| format!("Failed to read {}", path))?;
        if last_seen.as_deref() != Some(content.as_str()) {
            live.edit(content.clone(), Instant::now());
            last_seen = Some(content);
        }

        if let Some(highlights) = live.poll(Instant::now()) {
            let highlights = highlights.to_vec();
            println!("\n{}", format!("Highlight pass {}", live.recomputes()).bold());
            print_highlights(live.text(), &highlights);
        }

        thread::sleep(WATCH_INTERVAL);
    }
}

fn print_highlights(text: &str, highlights: &[Highlight]) {
    if highlights.is_empty() {
        println!("{}", "No markup found".dimmed());
        return;
    }

    for h in highlights {
        let tag = h.tag();
        let slice = h.span.slice(text);
        println!("  {:>10}  {:20} {:?}", h.span.to_string(), theme::span_kind(&tag), slice);
    }
}
