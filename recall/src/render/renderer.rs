use super::theme::OneDark;
use recall_core::{DetailView, Entry, ListItem, ListView, ReviewStatus, filter::content_preview, render};
use termimad::{MadSkin, crossterm::style::Stylize};

#[derive(Clone)]
pub struct RenderOptions {
    pub date_format: String,
    pub use_color: bool,
    pub short_mode: bool,
    pub preview_length: usize,
}

pub struct Renderer {
    skin: MadSkin,
    opts: RenderOptions,
}

impl Renderer {
    pub fn new(opts: RenderOptions) -> Self {
        Self {
            skin: OneDark::skin(),
            opts,
        }
    }

    pub fn print_md(&self, md: &str) {
        if self.opts.use_color {
            self.skin.print_text(md);
        } else {
            print!("{md}");
        }
    }

    pub fn print_info(&self, message: &str) {
        if self.opts.use_color {
            let md = format!("|-|\n| {message} |\n|-|\n");
            self.skin.print_text(&md);
        } else {
            println!("{message}");
        }
    }

    /// `[Overdue by 2 days] Lifetimes (0192…)`
    pub fn print_entry_line(&self, entry: &Entry, status: ReviewStatus) {
        let (tag, topic, id) = entry_line_parts(entry, status);
        if self.opts.use_color {
            println!(
                "{} {} {}",
                tag.with(OneDark::urgency(status.urgency())),
                topic.with(OneDark::YELLOW),
                id.with(OneDark::CYAN)
            );
        } else {
            println!("{tag} {topic} {id}");
        }
    }

    pub fn print_list(&self, view: &ListView) {
        if view.items.is_empty() {
            self.print_info("No entries found.");
            return;
        }
        self.print_info(&list_summary(view));

        for (i, item) in view.items.iter().enumerate() {
            if self.opts.short_mode {
                self.print_entry_line(&item.entry, item.status);
                continue;
            }
            self.print_md(&self.list_block(item));
            if i + 1 < view.items.len() {
                self.print_md("---\n");
            }
        }
    }

    pub fn print_detail(&self, view: &DetailView) {
        let md = render::format_entry_block(
            &view.entry,
            view.status,
            &view.related,
            &self.opts.date_format,
        );
        self.print_md(&md);
        println!("{}", self.paint_id(&view.entry));
    }

    fn list_block(&self, item: &ListItem) -> String {
        let meta = render::format_meta_line(&item.entry, item.status, &self.opts.date_format);
        let preview = content_preview(item.entry.body.summary(), self.opts.preview_length);
        let mut md = format!("## {}\n{meta} `{}`\n", item.entry.topic, item.entry.id);
        if !preview.trim().is_empty() {
            md.push_str(&format!("{}\n", preview.trim_end()));
        }
        md
    }

    fn paint_id(&self, entry: &Entry) -> String {
        let id = format!("id: {}", entry.id);
        if self.opts.use_color {
            id.with(OneDark::COMMENT).to_string()
        } else {
            id
        }
    }
}

fn entry_line_parts(entry: &Entry, status: ReviewStatus) -> (String, String, String) {
    (
        format!("[{}]", status.label()),
        entry.topic.clone(),
        format!("({})", entry.id),
    )
}

fn list_summary(view: &ListView) -> String {
    let shown = view.items.len();
    let noun = if shown == 1 { "entry" } else { "entries" };
    match view.overdue_count {
        0 => format!("{shown} {noun} found."),
        n => format!("{shown} {noun} found, {n} overdue for review."),
    }
}
