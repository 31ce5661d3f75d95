//! Full-screen list menus.

use anyhow::Result;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};

use crate::input::{MenuKey, menu_key, wait_key};
use crate::terminal::Tui;

/// Selection state of one menu.
#[derive(Clone, Debug)]
pub struct Menu {
    pub title: String,
    pub options: Vec<String>,
    /// Text shown above the options, e.g. item details.
    pub details: Vec<String>,
    selected: usize,
}

/// What a key press did to the menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuEvent {
    Moved,
    Chosen(usize),
    Cancelled,
    Ignored,
}

impl Menu {
    pub fn new(title: impl Into<String>, options: Vec<String>) -> Self {
        Self {
            title: title.into(),
            options,
            details: Vec::new(),
            selected: 0,
        }
    }

    pub fn with_details(mut self, details: Vec<String>) -> Self {
        self.details = details;
        self
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Applies one navigation key. Movement wraps around.
    pub fn handle(&mut self, key: MenuKey) -> MenuEvent {
        let len = self.options.len();
        if len == 0 {
            return match key {
                MenuKey::Back => MenuEvent::Cancelled,
                _ => MenuEvent::Ignored,
            };
        }
        match key {
            MenuKey::Up => {
                self.selected = (self.selected + len - 1) % len;
                MenuEvent::Moved
            }
            MenuKey::Down => {
                self.selected = (self.selected + 1) % len;
                MenuEvent::Moved
            }
            MenuKey::Select => MenuEvent::Chosen(self.selected),
            MenuKey::Pick(index) if index < len => {
                self.selected = index;
                MenuEvent::Chosen(index)
            }
            MenuKey::Back => MenuEvent::Cancelled,
            MenuKey::Pick(_) | MenuKey::None => MenuEvent::Ignored,
        }
    }

    /// Shows the menu until an option is chosen (`Some(index)`) or the menu
    /// is cancelled (`None`).
    pub fn run(mut self, terminal: &mut Tui) -> Result<Option<usize>> {
        loop {
            terminal.draw(|frame| {
                let area = frame.area();
                render(frame, area, &self);
            })?;
            match self.handle(menu_key(wait_key()?)) {
                MenuEvent::Chosen(index) => return Ok(Some(index)),
                MenuEvent::Cancelled => return Ok(None),
                MenuEvent::Moved | MenuEvent::Ignored => {}
            }
        }
    }
}

fn render(frame: &mut Frame, area: Rect, menu: &Menu) {
    let details_height = if menu.details.is_empty() {
        0
    } else {
        menu.details.len() as u16 + 2
    };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(details_height),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(area);

    let title = Paragraph::new(Line::from(menu.title.as_str()).style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    ))
    .block(Block::default().borders(Borders::ALL).title("Arena"));
    frame.render_widget(title, chunks[0]);

    if !menu.details.is_empty() {
        let details: Vec<Line> = menu.details.iter().map(|d| Line::from(d.as_str())).collect();
        let paragraph = Paragraph::new(details)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(paragraph, chunks[1]);
    }

    let items: Vec<ListItem> = menu
        .options
        .iter()
        .enumerate()
        .map(|(i, option)| ListItem::new(format!("{}. {}", i + 1, option)))
        .collect();
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut state = ListState::default().with_selected(Some(menu.selected));
    frame.render_stateful_widget(list, chunks[2], &mut state);

    let footer = Paragraph::new("[Up/Down] Move | [Enter] Select | [1-9] Pick | [Esc] Back")
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, chunks[3]);
}

/// Shows lines until a key is pressed.
pub fn show_message(terminal: &mut Tui, title: &str, lines: &[String]) -> Result<()> {
    terminal.draw(|frame| {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(3)])
            .split(frame.area());

        let body: Vec<Line> = lines.iter().map(|l| Line::from(l.as_str())).collect();
        let paragraph = Paragraph::new(body)
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::ALL).title(title.to_owned()));
        frame.render_widget(paragraph, chunks[0]);

        let footer =
            Paragraph::new("Press any key to continue").block(Block::default().borders(Borders::ALL));
        frame.render_widget(footer, chunks[1]);
    })?;
    wait_key()?;
    Ok(())
}
