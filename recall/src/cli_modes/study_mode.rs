use anyhow::{Context, Result};
use chrono::Utc;
use recall_core::{Entry, EntryId, Keywords, Recall, ReviewInterval, StudySession};
use std::io::{self, BufRead, Write};
use strum::IntoEnumIterator;

use crate::render::Renderer;

enum Step {
    Next,
    Back,
    Stop,
}

/// Walks through the entry's cards, then asks for the next review interval.
/// An empty answer (or end of input) at the interval prompt leaves the schedule unchanged.
pub fn study_mode(
    recall: &mut Recall,
    renderer: &Renderer,
    id: &str,
    input: &mut impl BufRead,
) -> Result<Option<Entry>> {
    let id = EntryId::from(id);
    let mut session = recall.study(&id)?;

    if let Some(note) = session.note() {
        renderer.print_md(&format!("{note}\n\n"));
    }
    while let Some(card) = session.current() {
        renderer.print_md(&format!(
            "## Question {} / {}\n{}\n",
            session.position(),
            session.len(),
            card.prompt
        ));
        match ask_card(renderer, &mut session, input)? {
            Step::Next => session.advance(),
            Step::Back => {
                if !session.back() {
                    renderer.print_info("Already at the first question.");
                }
            }
            Step::Stop => break,
        }
    }

    renderer.print_md(&interval_menu());
    loop {
        prompt("Next review (empty to skip): ")?;
        let Some(answer) = read_answer(input)? else {
            break;
        };
        if answer.is_empty() {
            break;
        }
        match Keywords::parse(&answer) {
            Ok(interval) => {
                let now = Utc::now();
                let entry = recall.schedule_review(&id, interval, now)?;
                renderer.print_info(&format!("Review scheduled ({})", interval.label()));
                renderer.print_entry_line(&entry, entry.status(now));
                return Ok(Some(entry));
            }
            Err(e) => renderer.print_info(&e.to_string()),
        }
    }
    renderer.print_info("Review schedule unchanged.");
    Ok(None)
}

fn ask_card(
    renderer: &Renderer,
    session: &mut StudySession,
    input: &mut impl BufRead,
) -> Result<Step> {
    if !session.is_revealed() {
        prompt("Press Enter to reveal the answer (q to stop): ")?;
        match read_answer(input)?.as_deref() {
            None | Some("q") => return Ok(Step::Stop),
            Some(_) => session.reveal(),
        }
    }
    if let Some(answer) = session.answer() {
        renderer.print_md(&format!("**Answer:**\n{answer}\n\n"));
    }
    prompt("Enter: next, b: back, q: stop: ")?;
    Ok(match read_answer(input)?.as_deref() {
        None | Some("q") => Step::Stop,
        Some("b") => Step::Back,
        Some(_) => Step::Next,
    })
}

/// One Markdown bullet per interval: canonical id, label, then any synonyms.
fn interval_menu() -> String {
    let mut md = String::from("Choose when to review again:\n");
    for interval in ReviewInterval::iter() {
        // `aliases` puts the canonical id first.
        let synonyms: Vec<String> = Keywords::aliases(interval).into_iter().skip(1).collect();
        md.push_str(&format!("* `{}` {}", interval.as_ref(), interval.label()));
        if !synonyms.is_empty() {
            md.push_str(&format!(" ({})", synonyms.join(", ")));
        }
        md.push('\n');
    }
    md
}

fn prompt(message: &str) -> Result<()> {
    let mut out = io::stdout();
    write!(out, "{message}").context("writing prompt")?;
    out.flush().context("flushing prompt")
}

/// Next trimmed, lowercased input line. `None` at end of input.
fn read_answer(input: &mut impl BufRead) -> Result<Option<String>> {
    let mut line = String::new();
    let read = input.read_line(&mut line).context("reading answer")?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_lowercase()))
}
