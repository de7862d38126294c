//! Interactive list/form front end built on ratatui.
//!
//! [`TuiApp`] holds all key handling and rendering and never touches the real
//! terminal, so it can be driven with synthetic key events and drawn onto a
//! `TestBackend`. [`TuiFrontend`] wires it to crossterm.

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, List, ListItem, ListState, Paragraph};
use ratatui::{DefaultTerminal, Frame};

use crate::core::{Contact, ContactRepository, ContactStore};
use crate::ui::Frontend;
use crate::utils::error::{ContactError, Result};
use crate::utils::validation::Validate;

const FIELD_LABELS: [&str; 3] = ["Name", "Phone", "Email"];

const BROWSE_HELP: &str = "a add · / search · d delete · ↑/↓ move · q quit";
const SEARCH_HELP: &str = "type to filter · Enter keep · Esc clear";
const FORM_HELP: &str = "Tab next field · Enter save · Esc cancel";

/// Add-contact form with one text buffer per field.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ContactForm {
    fields: [String; 3],
    focus: usize,
}

impl ContactForm {
    fn next_field(&mut self) {
        self.focus = (self.focus + 1) % self.fields.len();
    }

    fn previous_field(&mut self) {
        self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
    }

    fn to_contact(&self) -> Contact {
        let [name, phone, email] = &self.fields;
        Contact::new(name.trim(), phone.trim(), email.trim())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Browse,
    Search,
    Form(ContactForm),
}

pub struct TuiApp<'s, R: ContactRepository> {
    store: &'s mut ContactStore<R>,
    mode: Mode,
    filter: String,
    list_state: ListState,
    status: Option<String>,
    quit: bool,
}

impl<'s, R: ContactRepository> TuiApp<'s, R> {
    pub fn new(store: &'s mut ContactStore<R>) -> Self {
        let mut list_state = ListState::default();
        if !store.is_empty() {
            list_state.select(Some(0));
        }
        Self {
            store,
            mode: Mode::Browse,
            filter: String::new(),
            list_state,
            status: None,
            quit: false,
        }
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn selected(&self) -> Option<usize> {
        self.list_state.selected()
    }

    /// Store positions of the rows currently shown, after filtering.
    pub fn visible_indices(&self) -> Vec<usize> {
        self.store
            .search(&self.filter)
            .map(|hits| hits.into_iter().map(|(index, _)| index).collect())
            .unwrap_or_default()
    }

    fn clamp_selection(&mut self) {
        let visible = self.visible_indices().len();
        let selected = match self.list_state.selected() {
            _ if visible == 0 => None,
            Some(i) => Some(i.min(visible - 1)),
            None => Some(0),
        };
        self.list_state.select(selected);
    }

    pub fn handle_key_event(&mut self, key_event: KeyEvent) {
        if !matches!(key_event.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
            return;
        }

        match self.mode {
            Mode::Browse => self.handle_browse_key(key_event.code),
            Mode::Search => self.handle_search_key(key_event.code),
            Mode::Form(_) => self.handle_form_key(key_event.code),
        }
    }

    fn handle_browse_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => self.quit = true,
            KeyCode::Down | KeyCode::Char('j') => self.list_state.select_next(),
            KeyCode::Up | KeyCode::Char('k') => self.list_state.select_previous(),
            KeyCode::Char('a') => {
                self.status = None;
                self.mode = Mode::Form(ContactForm::default());
            }
            KeyCode::Char('/') => {
                self.status = None;
                self.mode = Mode::Search;
            }
            KeyCode::Char('d') | KeyCode::Delete => self.delete_selected(),
            _ => {}
        }
        self.clamp_selection();
    }

    fn handle_search_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char(c) => self.filter.push(c),
            KeyCode::Backspace => {
                self.filter.pop();
            }
            KeyCode::Enter => self.mode = Mode::Browse,
            KeyCode::Esc => {
                self.filter.clear();
                self.mode = Mode::Browse;
            }
            _ => {}
        }
        self.list_state.select(Some(0));
        self.clamp_selection();
    }

    fn handle_form_key(&mut self, code: KeyCode) {
        let Mode::Form(form) = &mut self.mode else {
            return;
        };

        match code {
            KeyCode::Char(c) => form.fields[form.focus].push(c),
            KeyCode::Backspace => {
                form.fields[form.focus].pop();
            }
            KeyCode::Tab | KeyCode::Down => form.next_field(),
            KeyCode::BackTab | KeyCode::Up => form.previous_field(),
            KeyCode::Esc => {
                self.status = Some("Add cancelled.".to_string());
                self.mode = Mode::Browse;
            }
            KeyCode::Enter => {
                let contact = form.to_contact();
                self.submit_form(contact);
            }
            _ => {}
        }
    }

    fn submit_form(&mut self, contact: Contact) {
        if let Err(e) = contact.validate() {
            self.status = Some(e.user_friendly_message());
            return;
        }

        self.store.add(contact);
        self.status = Some(match self.store.save() {
            Ok(()) => "Contact added and saved.".to_string(),
            Err(e) => format!("Error saving contact: {}", e),
        });
        self.mode = Mode::Browse;

        // Point at the new row when it is visible under the current filter.
        let new_index = self.store.len() - 1;
        if let Some(row) = self.visible_indices().iter().position(|&i| i == new_index) {
            self.list_state.select(Some(row));
        }
        self.clamp_selection();
    }

    fn delete_selected(&mut self) {
        let visible = self.visible_indices();
        let Some(index) = self
            .list_state
            .selected()
            .and_then(|row| visible.get(row).copied())
        else {
            return;
        };

        self.status = Some(match self.store.remove_at(index) {
            Ok(removed) => {
                tracing::info!("Deleted contact '{}'", removed.name);
                match self.store.save() {
                    Ok(()) => format!("Deleted {}.", removed.name),
                    Err(e) => format!("Error saving after delete: {}", e),
                }
            }
            Err(e) => e.user_friendly_message(),
        });
    }

    fn empty_message(&self) -> &'static str {
        if self.store.is_empty() {
            "No contacts found."
        } else {
            "No contact found with that name."
        }
    }

    pub fn render(&mut self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(3)])
            .split(frame.area());

        let items: Vec<ListItem> = self
            .visible_indices()
            .into_iter()
            .filter_map(|index| {
                self.store.get(index).map(|c| {
                    ListItem::new(Line::from(vec![
                        Span::styled(format!("{}. ", index + 1), Style::default().fg(Color::DarkGray)),
                        Span::styled(c.name.clone(), Style::default().add_modifier(Modifier::BOLD)),
                        Span::raw(format!("  {}  {}", c.phone, c.email)),
                    ]))
                })
            })
            .collect();

        let title = if self.filter.is_empty() {
            format!(" Contacts ({}) ", self.store.len())
        } else {
            format!(" Contacts matching \"{}\" ", self.filter)
        };
        let block = Block::default().borders(Borders::ALL).title(title);

        if items.is_empty() {
            frame.render_widget(
                Paragraph::new(self.empty_message()).block(block),
                chunks[0],
            );
        } else {
            let list = List::new(items)
                .block(block)
                .highlight_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
                .highlight_symbol("➤ ");
            frame.render_stateful_widget(list, chunks[0], &mut self.list_state);
        }

        let (help, prompt) = match &self.mode {
            Mode::Browse => (BROWSE_HELP, None),
            Mode::Search => (SEARCH_HELP, Some(format!("Search: {}", self.filter))),
            Mode::Form(_) => (FORM_HELP, None),
        };
        let text = prompt
            .or_else(|| self.status.clone())
            .unwrap_or_default();
        let status = Paragraph::new(Line::from(text)).block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(format!(" {} ", help), Style::default().fg(Color::DarkGray))),
        );
        frame.render_widget(status, chunks[1]);

        if let Mode::Form(form) = &self.mode {
            render_form(frame, chunks[0], form, self.status.as_deref());
        }
    }
}

fn render_form(frame: &mut Frame, area: Rect, form: &ContactForm, error: Option<&str>) {
    let width = area.width.saturating_sub(4).min(60);
    let height = 7u16.min(area.height);
    let popup = Rect {
        x: area.x + area.width.saturating_sub(width) / 2,
        y: area.y + area.height.saturating_sub(height) / 2,
        width,
        height,
    };

    let mut lines: Vec<Line> = FIELD_LABELS
        .iter()
        .zip(form.fields.iter())
        .enumerate()
        .map(|(i, (label, value))| {
            let label_style = if i == form.focus {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            let cursor = if i == form.focus { "_" } else { "" };
            Line::from(vec![
                Span::styled(format!("{:>6}: ", label), label_style),
                Span::raw(format!("{}{}", value, cursor)),
            ])
        })
        .collect();
    if let Some(error) = error {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            error.to_string(),
            Style::default().fg(Color::Red),
        )));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(Color::Yellow))
        .title(" New contact ");

    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}

/// Terminal IO failures are reported as such, not as contact file errors.
fn in_terminal<T>(result: std::io::Result<T>) -> Result<T> {
    result.map_err(ContactError::TerminalError)
}

/// Full-screen front end on the real terminal.
#[derive(Debug, Default)]
pub struct TuiFrontend;

impl TuiFrontend {
    pub fn new() -> Self {
        Self
    }

    fn event_loop<R: ContactRepository>(
        app: &mut TuiApp<'_, R>,
        terminal: &mut DefaultTerminal,
    ) -> Result<()> {
        while !app.should_quit() {
            in_terminal(terminal.draw(|frame| app.render(frame)))?;
            if let Event::Key(key_event) = in_terminal(event::read())? {
                app.handle_key_event(key_event);
            }
        }
        Ok(())
    }
}

impl Frontend for TuiFrontend {
    fn run<R: ContactRepository>(&mut self, store: &mut ContactStore<R>) -> Result<()> {
        let mut terminal = in_terminal(ratatui::try_init())?;
        let mut app = TuiApp::new(store);
        let result = Self::event_loop(&mut app, &mut terminal);
        in_terminal(ratatui::try_restore())?;
        result
    }
}
