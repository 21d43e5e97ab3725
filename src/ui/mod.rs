//! Terminal rendering for article lists and reader chrome.
//!
//! The reader core draws through the [`Render`] trait; the terminal
//! implementation prints styled output, while [`RecordingRenderer`]
//! captures calls for tests.

pub mod display;

use std::time::Duration;

use owo_colors::OwoColorize;

use crate::models::Article;
use crate::pagination::{PageButton, PaginationBar};

/// Rendering collaborator invoked by the reader.
pub trait Render {
    /// Draw a page of articles.
    fn draw_news_list(&mut self, articles: &[Article]);

    /// Draw an error or empty-result message.
    fn draw_error(&mut self, message: &str);

    /// Draw the pagination bar, or hide it when `None`/hidden.
    fn draw_pagination(&mut self, bar: Option<&PaginationBar>);

    /// Return the viewport to the top of the list.
    fn scroll_to_top(&mut self);
}

/// How a page of articles is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListStyle {
    /// Numbered headline lines with meta and teaser
    Compact,
    /// Bordered table (human-readable)
    Table,
    /// Pretty-printed JSON (machine-readable)
    Json,
}

/// Renderer writing styled output to stdout.
#[derive(Debug, Clone)]
pub struct TerminalRenderer {
    styled: bool,
    clear_screen: bool,
    list_style: ListStyle,
}

impl TerminalRenderer {
    /// Renderer for one-shot output: styling auto-detected, no screen
    /// clearing.
    pub fn new() -> Self {
        Self {
            styled: display::is_terminal(),
            clear_screen: false,
            list_style: ListStyle::Compact,
        }
    }

    /// Renderer for the interactive session: clears the screen on
    /// scroll-to-top so each page starts at the top of the viewport.
    pub fn interactive() -> Self {
        Self {
            styled: display::is_terminal(),
            clear_screen: true,
            list_style: ListStyle::Compact,
        }
    }

    /// One-shot renderer with an explicit list style.
    pub fn with_list_style(list_style: ListStyle) -> Self {
        Self {
            styled: display::is_terminal() && list_style != ListStyle::Json,
            clear_screen: false,
            list_style,
        }
    }

    fn draw_compact_list(&self, articles: &[Article]) {
        let width = display::terminal_width();
        for (i, article) in articles.iter().enumerate() {
            let number = format!("{:>3}.", i + 1);
            let title = display::format_title(&article.title, width.saturating_sub(5));
            let meta = display::format_meta(&article.source_name, &article.published_date());

            if self.styled {
                println!("{} {}", number.dimmed(), title.bold());
                if !meta.is_empty() {
                    println!("     {}", meta.dimmed());
                }
            } else {
                println!("{} {}", number, title);
                if !meta.is_empty() {
                    println!("     {}", meta);
                }
            }

            if let Some(description) = &article.description {
                let teaser = display::truncate_with_ellipsis(description, width.saturating_sub(5));
                println!("     {}", teaser);
            }
            println!();
        }
    }

    fn draw_table_list(&self, articles: &[Article]) {
        use comfy_table::{Attribute, Cell, Table};

        let mut table = Table::new();
        table.load_preset(comfy_table::presets::UTF8_FULL);
        table.set_header(vec!["#", "Title", "Source", "Date"]);

        for (i, article) in articles.iter().enumerate() {
            let title = display::truncate_with_ellipsis(&article.title, 60);
            let source = display::truncate_with_ellipsis(&article.source_name, 20);

            table.add_row(vec![
                Cell::new(i + 1),
                Cell::new(title).add_attribute(Attribute::Bold),
                Cell::new(source),
                Cell::new(article.published_date()),
            ]);
        }
        println!("{table}");
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Render for TerminalRenderer {
    fn draw_news_list(&mut self, articles: &[Article]) {
        match self.list_style {
            ListStyle::Compact => self.draw_compact_list(articles),
            ListStyle::Table => self.draw_table_list(articles),
            ListStyle::Json => {
                println!("{}", serde_json::to_string_pretty(articles).unwrap_or_default());
            }
        }
    }

    fn draw_error(&mut self, message: &str) {
        match self.list_style {
            ListStyle::Json => {
                println!("{}", serde_json::json!({ "error": message }));
            }
            _ if self.styled => {
                println!("{} {}", "\u{2717}".red().bold(), message);
            }
            _ => {
                println!("\u{2717} {}", message);
            }
        }
    }

    fn draw_pagination(&mut self, bar: Option<&PaginationBar>) {
        if self.list_style == ListStyle::Json {
            return;
        }
        if let Some(bar) = bar {
            if !bar.is_hidden() {
                println!("{}", bar.render(self.styled));
            }
        }
    }

    fn scroll_to_top(&mut self) {
        if self.clear_screen && self.styled {
            // ANSI clear screen + cursor home
            print!("\u{1b}[2J\u{1b}[H");
        }
    }
}

/// A rendering call captured by [`RecordingRenderer`].
#[derive(Debug, Clone, PartialEq)]
pub enum RenderEvent {
    /// Article list drawn
    List(Vec<Article>),
    /// Error or empty message drawn
    Error(String),
    /// Pagination drawn (`None` = hidden)
    Pagination(Option<Vec<PageButton>>),
    /// Viewport returned to the top
    ScrolledToTop,
}

/// Renderer that records calls instead of printing. For tests.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    events: Vec<RenderEvent>,
}

impl RecordingRenderer {
    /// Empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded events, in call order.
    pub fn events(&self) -> &[RenderEvent] {
        &self.events
    }

    /// The most recent error message, if any.
    pub fn last_error(&self) -> Option<&str> {
        self.events.iter().rev().find_map(|e| match e {
            RenderEvent::Error(message) => Some(message.as_str()),
            _ => None,
        })
    }

    /// The most recent pagination snapshot, if any was drawn.
    pub fn last_pagination(&self) -> Option<&Option<Vec<PageButton>>> {
        self.events.iter().rev().find_map(|e| match e {
            RenderEvent::Pagination(bar) => Some(bar),
            _ => None,
        })
    }
}

impl Render for RecordingRenderer {
    fn draw_news_list(&mut self, articles: &[Article]) {
        self.events.push(RenderEvent::List(articles.to_vec()));
    }

    fn draw_error(&mut self, message: &str) {
        self.events.push(RenderEvent::Error(message.to_string()));
    }

    fn draw_pagination(&mut self, bar: Option<&PaginationBar>) {
        let snapshot = bar
            .filter(|b| !b.is_hidden())
            .map(|b| b.buttons().to_vec());
        self.events.push(RenderEvent::Pagination(snapshot));
    }

    fn scroll_to_top(&mut self) {
        self.events.push(RenderEvent::ScrolledToTop);
    }
}

/// Fetch-in-progress spinner shown while a request is in flight.
pub struct Spinner {
    pb: indicatif::ProgressBar,
}

impl Spinner {
    /// Create a new spinner with the given message.
    pub fn new(msg: &str) -> Self {
        let pb = indicatif::ProgressBar::new_spinner();
        pb.set_style(
            indicatif::ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap()
                .tick_chars("\u{2801}\u{2802}\u{2804}\u{2840}\u{2880}\u{2820}\u{2810}\u{2808} "),
        );
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));

        Self { pb }
    }

    /// Remove the spinner from the terminal.
    pub fn finish_and_clear(&self) {
        self.pb.finish_and_clear();
    }
}
