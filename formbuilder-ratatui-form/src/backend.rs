//! Ratatui form backend implementation for the FormBackend trait.
//!
//! Displays all fields at once in a scrollable form with keyboard navigation.

use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use formbuilder::{Field, FieldError, FieldType, FieldValue, FillError, FormBackend, FormData};
use ratatui::{
    Frame, Terminal,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    prelude::CrosstermBackend,
    style::{Color, Modifier, Style},
    widgets::{
        Block, Borders, List, ListItem, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState,
    },
};
use std::io::{self, Stdout};
use thiserror::Error;

/// Message shown when a number field does not hold a number.
const INVALID_NUMBER: &str = "Nombre invalide";

/// Step of the range slider.
const RANGE_STEP: f64 = 1.0;

/// Error type for the Ratatui form backend.
#[derive(Debug, Error)]
pub enum RatatuiFormError {
    /// User cancelled the form (e.g., pressed Esc).
    #[error("Form cancelled by user")]
    Cancelled,

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<RatatuiFormError> for FillError {
    fn from(err: RatatuiFormError) -> Self {
        match err {
            RatatuiFormError::Cancelled => FillError::Cancelled,
            other => FillError::backend(other),
        }
    }
}

/// Color theme for the TUI form.
#[derive(Debug, Clone)]
pub struct Theme {
    pub primary: Color,
    pub text: Color,
    pub highlight: Color,
    pub error: Color,
    pub success: Color,
    pub border: Color,
    pub selected_bg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary: Color::Cyan,
            text: Color::White,
            highlight: Color::Yellow,
            error: Color::Red,
            success: Color::Green,
            border: Color::Gray,
            selected_bg: Color::DarkGray,
        }
    }
}

/// Ratatui form backend that displays all fields at once.
#[derive(Debug, Clone, Default)]
pub struct RatatuiFormBackend {
    /// Title shown at the top of the form. Defaults to the form name.
    title: Option<String>,
    /// Color theme for the UI.
    theme: Theme,
}

impl RatatuiFormBackend {
    /// Create a new Ratatui form backend with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the title shown at the top of the form.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set a custom color theme.
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Show `form` without accepting input, until the user presses Esc or Enter.
    pub fn preview(&self, form: &FormData) -> Result<(), RatatuiFormError> {
        let state = self.state(form, true);
        let never_invalid = |_: &Field| -> Result<(), FieldError> { Ok(()) };
        match self.run(state, &never_invalid) {
            Ok(_) | Err(RatatuiFormError::Cancelled) => Ok(()),
            Err(e) => Err(e),
        }
    }

    fn state(&self, form: &FormData, read_only: bool) -> FormState {
        let title = self
            .title
            .clone()
            .unwrap_or_else(|| form.form_name.clone());
        FormState::new(form, self.theme.clone(), title, read_only)
    }

    fn run(
        &self,
        mut state: FormState,
        validate: &dyn Fn(&Field) -> Result<(), FieldError>,
    ) -> Result<FormState, RatatuiFormError> {
        let mut terminal = setup_terminal()?;
        let outcome = event_loop(&mut terminal, &mut state, validate);
        restore_terminal(&mut terminal)?;

        match outcome? {
            Outcome::Submitted => Ok(state),
            Outcome::Cancelled => Err(RatatuiFormError::Cancelled),
        }
    }
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>, RatatuiFormError> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
) -> Result<(), RatatuiFormError> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    Ok(())
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    state: &mut FormState,
    validate: &dyn Fn(&Field) -> Result<(), FieldError>,
) -> Result<Outcome, RatatuiFormError> {
    loop {
        terminal.draw(|frame| draw_form(frame, state))?;

        if let Event::Key(key) = event::read()?
            && let Some(outcome) = state.handle_key(key, validate)
        {
            return Ok(outcome);
        }
    }
}

/// How the user left the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Submitted,
    Cancelled,
}

/// Input widget used for a field.
#[derive(Debug, Clone)]
enum FieldKind {
    /// Free text: text, email, date and file fields.
    Text,
    Number {
        min: Option<f64>,
        max: Option<f64>,
    },
    /// Slider moved with the arrow keys.
    Range { min: f64, max: f64, value: f64 },
    OneOf {
        options: Vec<String>,
        selected: Option<usize>,
        /// Currently highlighted option (for keyboard navigation)
        highlight: usize,
    },
    AnyOf {
        options: Vec<String>,
        selected: Vec<bool>,
        /// Currently highlighted option (for keyboard navigation)
        highlight: usize,
    },
}

/// A field in the form.
#[derive(Debug, Clone)]
struct FormField {
    /// The field being answered; its value is the starting point.
    template: Field,
    kind: FieldKind,
    /// Typed text for text and number fields.
    input: String,
    /// Cursor position in characters.
    cursor_pos: usize,
    error: Option<String>,
}

impl FormField {
    fn new(template: &Field) -> Self {
        let options: Vec<String> = template.option_values().map(str::to_string).collect();

        let kind = match template.field_type {
            FieldType::Text | FieldType::Email | FieldType::Date | FieldType::File => {
                FieldKind::Text
            }
            FieldType::Number => FieldKind::Number {
                min: template.min,
                max: template.max,
            },
            FieldType::Range => {
                let min = template.min.unwrap_or(0.0);
                let max = template.max.unwrap_or(100.0).max(min);
                let value = template.value.as_number().unwrap_or(min).max(min).min(max);
                FieldKind::Range { min, max, value }
            }
            FieldType::Select | FieldType::Radio => {
                let selected = template
                    .value
                    .as_str()
                    .and_then(|current| options.iter().position(|o| o == current));
                FieldKind::OneOf {
                    highlight: selected.unwrap_or(0),
                    selected,
                    options,
                }
            }
            FieldType::Checkbox => {
                let checked = template.value.as_list().unwrap_or_default();
                FieldKind::AnyOf {
                    selected: options.iter().map(|o| checked.contains(o)).collect(),
                    options,
                    highlight: 0,
                }
            }
        };

        let input = match kind {
            FieldKind::Text | FieldKind::Number { .. } => template.value.to_string(),
            _ => String::new(),
        };

        Self {
            template: template.clone(),
            kind,
            cursor_pos: input.chars().count(),
            input,
            error: template.error_message.clone(),
        }
    }

    /// The value currently entered, or the message for unparsable input.
    fn value(&self) -> Result<FieldValue, String> {
        match &self.kind {
            FieldKind::Text => Ok(FieldValue::Text(self.input.clone())),
            FieldKind::Number { .. } => self
                .input
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
                .map(FieldValue::Number)
                .ok_or_else(|| INVALID_NUMBER.to_string()),
            FieldKind::Range { value, .. } => Ok(FieldValue::Number(*value)),
            FieldKind::OneOf {
                options, selected, ..
            } => Ok(FieldValue::Text(
                selected
                    .and_then(|idx| options.get(idx))
                    .cloned()
                    .unwrap_or_default(),
            )),
            FieldKind::AnyOf {
                options, selected, ..
            } => Ok(FieldValue::List(
                options
                    .iter()
                    .zip(selected)
                    .filter(|(_, checked)| **checked)
                    .map(|(option, _)| option.clone())
                    .collect(),
            )),
        }
    }

    /// The field with the entered value in place, as passed to the validator.
    fn candidate(&self) -> Result<Field, String> {
        Ok(Field {
            value: self.value()?,
            error_message: None,
            ..self.template.clone()
        })
    }

    fn label(&self) -> String {
        let mut label = self.template.display_name();
        if let FieldKind::Number {
            min: Some(min),
            max: Some(max),
        } = self.kind
        {
            label.push_str(&format!(" [{min} - {max}]"));
        }
        if self.template.required {
            label.push_str(" *");
        }
        label
    }

    fn height(&self) -> u16 {
        match &self.kind {
            FieldKind::OneOf { options, .. } | FieldKind::AnyOf { options, .. } => {
                2u16.saturating_add(u16::try_from(options.len()).unwrap_or(u16::MAX))
            }
            _ => 3,
        }
    }

    fn takes_text(&self) -> bool {
        matches!(self.kind, FieldKind::Text | FieldKind::Number { .. })
    }
}

/// Byte offset of the character at `char_pos`.
fn byte_index(s: &str, char_pos: usize) -> usize {
    s.char_indices()
        .nth(char_pos)
        .map(|(idx, _)| idx)
        .unwrap_or(s.len())
}

/// Columns scrolled off the left of a text input `width` wide so the cursor
/// stays on its last column.
fn text_offset(cursor_pos: usize, width: u16) -> usize {
    cursor_pos.saturating_sub(usize::from(width.saturating_sub(1)))
}

/// Vertical space between fields.
const FIELD_SPACING: u16 = 1;

/// State for the entire form.
struct FormState {
    fields: Vec<FormField>,
    focused_idx: usize,
    /// Scroll offset in rows
    scroll_offset: u16,
    /// Whether the submit button is focused
    submit_focused: bool,
    /// Fields are shown but cannot be changed.
    read_only: bool,
    theme: Theme,
    title: String,
}

impl FormState {
    fn new(form: &FormData, theme: Theme, title: String, read_only: bool) -> Self {
        Self {
            fields: form.fields().iter().map(FormField::new).collect(),
            focused_idx: 0,
            scroll_offset: 0,
            submit_focused: form.is_empty(),
            read_only,
            theme,
            title,
        }
    }

    fn focused_field(&self) -> Option<&FormField> {
        if self.submit_focused {
            return None;
        }
        self.fields.get(self.focused_idx)
    }

    fn focused_field_mut(&mut self) -> Option<&mut FormField> {
        if self.submit_focused {
            return None;
        }
        self.fields.get_mut(self.focused_idx)
    }

    /// Calculate the Y position of a field (by index) in the virtual scroll area
    fn field_y_position(&self, target_idx: usize) -> u16 {
        self.fields
            .iter()
            .take(target_idx)
            .fold(0u16, |y, f| {
                y.saturating_add(f.height()).saturating_add(FIELD_SPACING)
            })
    }

    fn total_content_height(&self) -> u16 {
        self.field_y_position(self.fields.len())
            .saturating_sub(FIELD_SPACING)
    }

    /// Adjust scroll offset to ensure focused field is visible
    fn adjust_scroll(&mut self, viewport_height: u16) {
        let Some(field) = self.fields.get(self.focused_idx) else {
            return;
        };
        let field_y = self.field_y_position(self.focused_idx);
        let field_bottom = field_y.saturating_add(field.height());

        if field_y < self.scroll_offset {
            self.scroll_offset = field_y;
        }
        if field_bottom > self.scroll_offset.saturating_add(viewport_height) {
            self.scroll_offset = field_bottom.saturating_sub(viewport_height);
        }
    }

    fn next_field(&mut self) {
        if self.submit_focused {
            return;
        }
        if self.focused_idx + 1 < self.fields.len() {
            self.focused_idx += 1;
        } else {
            self.submit_focused = true;
        }
    }

    fn prev_field(&mut self) {
        if self.submit_focused {
            if !self.fields.is_empty() {
                self.submit_focused = false;
                self.focused_idx = self.fields.len() - 1;
            }
            return;
        }
        self.focused_idx = self.focused_idx.saturating_sub(1);
    }

    fn handle_text_input(&mut self, c: char) {
        if let Some(field) = self.focused_field_mut()
            && field.takes_text()
        {
            let at = byte_index(&field.input, field.cursor_pos);
            field.input.insert(at, c);
            field.cursor_pos += 1;
            field.error = None;
        }
    }

    fn handle_backspace(&mut self) {
        if let Some(field) = self.focused_field_mut()
            && field.takes_text()
            && field.cursor_pos > 0
        {
            field.cursor_pos -= 1;
            let at = byte_index(&field.input, field.cursor_pos);
            field.input.remove(at);
            field.error = None;
        }
    }

    fn handle_delete(&mut self) {
        if let Some(field) = self.focused_field_mut()
            && field.takes_text()
            && field.cursor_pos < field.input.chars().count()
        {
            let at = byte_index(&field.input, field.cursor_pos);
            field.input.remove(at);
            field.error = None;
        }
    }

    /// Move the text cursor, or the slider of a range field.
    fn left(&mut self) {
        if let Some(field) = self.focused_field_mut() {
            match &mut field.kind {
                FieldKind::Range { min, value, .. } => {
                    *value = (*value - RANGE_STEP).max(*min);
                    field.error = None;
                }
                _ => field.cursor_pos = field.cursor_pos.saturating_sub(1),
            }
        }
    }

    fn right(&mut self) {
        if let Some(field) = self.focused_field_mut() {
            match &mut field.kind {
                FieldKind::Range { max, value, .. } => {
                    *value = (*value + RANGE_STEP).min(*max);
                    field.error = None;
                }
                _ => field.cursor_pos = (field.cursor_pos + 1).min(field.input.chars().count()),
            }
        }
    }

    fn home(&mut self) {
        if let Some(field) = self.focused_field_mut() {
            match &mut field.kind {
                FieldKind::Range { min, value, .. } => *value = *min,
                _ => field.cursor_pos = 0,
            }
        }
    }

    fn end(&mut self) {
        if let Some(field) = self.focused_field_mut() {
            match &mut field.kind {
                FieldKind::Range { max, value, .. } => *value = *max,
                _ => field.cursor_pos = field.input.chars().count(),
            }
        }
    }

    /// Move highlight up within OneOf/AnyOf options
    fn option_up(&mut self) {
        if let Some(field) = self.focused_field_mut()
            && let FieldKind::OneOf {
                options, highlight, ..
            }
            | FieldKind::AnyOf {
                options, highlight, ..
            } = &mut field.kind
            && !options.is_empty()
        {
            *highlight = (*highlight + options.len() - 1) % options.len();
        }
    }

    /// Move highlight down within OneOf/AnyOf options
    fn option_down(&mut self) {
        if let Some(field) = self.focused_field_mut()
            && let FieldKind::OneOf {
                options, highlight, ..
            }
            | FieldKind::AnyOf {
                options, highlight, ..
            } = &mut field.kind
            && !options.is_empty()
        {
            *highlight = (*highlight + 1) % options.len();
        }
    }

    /// Select the currently highlighted option (for OneOf) or toggle it (for AnyOf)
    fn select_option(&mut self) {
        if let Some(field) = self.focused_field_mut() {
            match &mut field.kind {
                FieldKind::OneOf {
                    options,
                    highlight,
                    selected,
                } if *highlight < options.len() => {
                    *selected = Some(*highlight);
                    field.error = None;
                }
                FieldKind::AnyOf {
                    highlight,
                    selected,
                    ..
                } if *highlight < selected.len() => {
                    selected[*highlight] = !selected[*highlight];
                    field.error = None;
                }
                _ => {}
            }
        }
    }

    fn toggle_anyof(&mut self, idx: usize) {
        if let Some(field) = self.focused_field_mut()
            && let FieldKind::AnyOf {
                selected,
                highlight,
                ..
            } = &mut field.kind
            && idx < selected.len()
        {
            selected[idx] = !selected[idx];
            *highlight = idx;
            field.error = None;
        }
    }

    fn is_selection_field(&self) -> bool {
        self.focused_field()
            .is_some_and(|f| matches!(f.kind, FieldKind::OneOf { .. } | FieldKind::AnyOf { .. }))
    }

    fn is_range_field(&self) -> bool {
        self.focused_field()
            .is_some_and(|f| matches!(f.kind, FieldKind::Range { .. }))
    }

    /// One value per field, in order.
    fn values(&self) -> Vec<FieldValue> {
        self.fields
            .iter()
            .map(|field| {
                field
                    .value()
                    .unwrap_or_else(|_| field.template.value.clone())
            })
            .collect()
    }

    /// Validate every field, showing each message under its field.
    ///
    /// Focuses the first invalid field and returns whether all are valid.
    fn validate_all(&mut self, validate: &dyn Fn(&Field) -> Result<(), FieldError>) -> bool {
        for field in &mut self.fields {
            field.error = match field.candidate() {
                Err(message) => Some(message),
                Ok(candidate) => validate(&candidate).err().map(|e| e.to_string()),
            };
        }

        match self.fields.iter().position(|f| f.error.is_some()) {
            Some(idx) => {
                self.focused_idx = idx;
                self.submit_focused = false;
                false
            }
            None => true,
        }
    }

    fn try_submit(
        &mut self,
        validate: &dyn Fn(&Field) -> Result<(), FieldError>,
    ) -> Option<Outcome> {
        if self.read_only || self.validate_all(validate) {
            Some(Outcome::Submitted)
        } else {
            None
        }
    }

    /// Apply one key press. Returns how the form was left, if it was.
    fn handle_key(
        &mut self,
        key: KeyEvent,
        validate: &dyn Fn(&Field) -> Result<(), FieldError>,
    ) -> Option<Outcome> {
        if key.kind != KeyEventKind::Press {
            return None;
        }

        match key.code {
            KeyCode::Esc => return Some(Outcome::Cancelled),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return Some(Outcome::Cancelled);
            }
            // Ctrl+Enter or F10 submits from anywhere
            KeyCode::Enter if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return self.try_submit(validate);
            }
            KeyCode::F(10) => return self.try_submit(validate),
            KeyCode::Enter => {
                if self.submit_focused {
                    return self.try_submit(validate);
                } else if self.is_selection_field() && !self.read_only {
                    self.select_option();
                } else {
                    self.next_field();
                }
            }
            KeyCode::BackTab => self.prev_field(),
            KeyCode::Tab if key.modifiers.contains(KeyModifiers::SHIFT) => self.prev_field(),
            KeyCode::Tab => self.next_field(),
            KeyCode::Up => {
                if self.is_selection_field() {
                    self.option_up();
                } else {
                    self.prev_field();
                }
            }
            KeyCode::Down => {
                if self.is_selection_field() {
                    self.option_down();
                } else {
                    self.next_field();
                }
            }
            KeyCode::PageDown => {
                for _ in 0..5 {
                    self.next_field();
                }
            }
            KeyCode::PageUp => {
                for _ in 0..5 {
                    self.prev_field();
                }
            }
            _ if self.read_only => {}
            KeyCode::Left if key.modifiers.contains(KeyModifiers::CONTROL) => self.prev_field(),
            KeyCode::Right if key.modifiers.contains(KeyModifiers::CONTROL) => self.next_field(),
            KeyCode::Left => self.left(),
            KeyCode::Right => self.right(),
            KeyCode::Home => self.home(),
            KeyCode::End => self.end(),
            KeyCode::Char(' ') if self.is_selection_field() => self.select_option(),
            // Number keys: quick toggle for checkbox options (1-9)
            KeyCode::Char(c) if c.is_ascii_digit() && self.is_selection_field() => {
                if let Some(idx) = c.to_digit(10).and_then(|d| (d as usize).checked_sub(1)) {
                    self.toggle_anyof(idx);
                }
            }
            KeyCode::Char(c) => self.handle_text_input(c),
            KeyCode::Backspace => self.handle_backspace(),
            KeyCode::Delete => self.handle_delete(),
            _ => {}
        }
        None
    }
}

fn draw_form(frame: &mut Frame, state: &mut FormState) {
    let area = frame.area();
    let theme = state.theme.clone();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Title
            Constraint::Min(5),    // Form content
            Constraint::Length(3), // Submit button
            Constraint::Length(1), // Help bar
        ])
        .split(area);

    let title = Paragraph::new(state.title.clone())
        .style(
            Style::default()
                .fg(theme.primary)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(theme.border)),
        );
    frame.render_widget(title, chunks[0]);

    // Reserve one column on each side: margin and scrollbar
    let form_area = chunks[1];
    let content_width = form_area.width.saturating_sub(2);
    let viewport_height = form_area.height;

    state.adjust_scroll(viewport_height);
    let scroll_offset = state.scroll_offset;

    let mut virtual_y: u16 = 0;
    for (idx, field) in state.fields.iter().enumerate() {
        let height = field.height();
        let top = virtual_y;
        virtual_y += height + FIELD_SPACING;

        // Fields clipped at the top are skipped, the bottom one is drawn partially
        if top < scroll_offset {
            continue;
        }
        let visible_top = top - scroll_offset;
        if visible_top >= viewport_height {
            break;
        }

        let field_area = Rect {
            x: form_area.x + 1,
            y: form_area.y + visible_top,
            width: content_width,
            height: height.min(viewport_height - visible_top),
        };
        let is_focused = !state.submit_focused && idx == state.focused_idx;
        draw_field(frame, field, field_area, is_focused, state.read_only, &theme);
    }

    let total_height = state.total_content_height();
    if total_height > viewport_height {
        let scrollbar_area = Rect {
            x: form_area.x + form_area.width.saturating_sub(1),
            y: form_area.y,
            width: 1,
            height: viewport_height,
        };

        let mut scrollbar_state = ScrollbarState::new(total_height as usize)
            .position(scroll_offset as usize)
            .viewport_content_length(viewport_height as usize);

        let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
            .begin_symbol(Some("▲"))
            .end_symbol(Some("▼"))
            .track_symbol(Some("│"))
            .thumb_symbol("█");

        frame.render_stateful_widget(scrollbar, scrollbar_area, &mut scrollbar_state);
    }

    let submit_style = if state.submit_focused {
        Style::default()
            .fg(theme.text)
            .bg(theme.primary)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .fg(theme.primary)
            .add_modifier(Modifier::BOLD)
    };
    let label = if state.read_only { "Fermer" } else { "Envoyer" };
    let submit_text = if state.submit_focused {
        format!("[ {label} ]")
    } else {
        label.to_string()
    };
    let submit_button = Paragraph::new(submit_text)
        .style(submit_style)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(if state.submit_focused {
                    theme.primary
                } else {
                    theme.border
                })),
        );
    frame.render_widget(submit_button, chunks[2]);

    let help_text = if state.read_only {
        "Aperçu  Tab : suivant  Échap : fermer"
    } else {
        "Tab : suivant  ↑/↓ : naviguer  Espace/Entrée : choisir  F10 : envoyer  Échap : annuler"
    };
    let help = Paragraph::new(help_text).style(Style::default().fg(theme.border));
    frame.render_widget(help, chunks[3]);
}

/// Render the slider of a range field as a bar `width` cells wide.
fn slider_bar(min: f64, max: f64, value: f64, width: usize) -> String {
    let ratio = if max > min {
        ((value - min) / (max - min)).clamp(0.0, 1.0)
    } else {
        1.0
    };
    let filled = (ratio * width as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

fn draw_field(
    frame: &mut Frame,
    field: &FormField,
    area: Rect,
    is_focused: bool,
    read_only: bool,
    theme: &Theme,
) {
    let border_color = if field.error.is_some() {
        theme.error
    } else if is_focused {
        theme.primary
    } else {
        theme.border
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(format!(" {} ", field.label()))
        .title_style(Style::default().fg(if is_focused {
            theme.highlight
        } else {
            theme.text
        }));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    match &field.kind {
        FieldKind::Text | FieldKind::Number { .. } => {
            let offset = text_offset(field.cursor_pos, inner.width);
            let text = Paragraph::new(field.input.clone())
                .style(Style::default().fg(theme.text))
                .scroll((0, u16::try_from(offset).unwrap_or(u16::MAX)));
            frame.render_widget(text, inner);

            if is_focused && !read_only && inner.width > 0 {
                let column = u16::try_from(field.cursor_pos - offset).unwrap_or(u16::MAX);
                frame.set_cursor_position((inner.x.saturating_add(column), inner.y));
            }
        }
        FieldKind::Range { min, max, value } => {
            let number = FieldValue::Number(*value).to_string();
            let bar_width = (inner.width as usize).saturating_sub(number.len() + 5);
            let line = format!(
                "◀ {} ▶ {number}",
                slider_bar(*min, *max, *value, bar_width)
            );
            let text = Paragraph::new(line).style(Style::default().fg(if is_focused {
                theme.highlight
            } else {
                theme.text
            }));
            frame.render_widget(text, inner);
        }
        FieldKind::OneOf {
            options,
            selected,
            highlight,
        } => {
            let items: Vec<ListItem> = options
                .iter()
                .enumerate()
                .map(|(idx, option)| {
                    let marker = if *selected == Some(idx) {
                        "(●)"
                    } else {
                        "( )"
                    };
                    let style = if is_focused && idx == *highlight {
                        Style::default()
                            .fg(theme.text)
                            .bg(theme.selected_bg)
                            .add_modifier(Modifier::BOLD)
                    } else if *selected == Some(idx) {
                        Style::default().fg(theme.highlight)
                    } else {
                        Style::default().fg(theme.text)
                    };
                    ListItem::new(format!("{marker} {option}")).style(style)
                })
                .collect();
            frame.render_widget(List::new(items), inner);
        }
        FieldKind::AnyOf {
            options,
            selected,
            highlight,
        } => {
            let items: Vec<ListItem> = options
                .iter()
                .enumerate()
                .map(|(idx, option)| {
                    let checked = selected.get(idx).copied().unwrap_or(false);
                    let marker = if checked { "[✓]" } else { "[ ]" };
                    let style = if is_focused && idx == *highlight {
                        Style::default()
                            .fg(if checked { theme.success } else { theme.text })
                            .bg(theme.selected_bg)
                            .add_modifier(Modifier::BOLD)
                    } else if checked {
                        Style::default().fg(theme.success)
                    } else {
                        Style::default().fg(theme.text)
                    };
                    ListItem::new(format!("{marker} {option}")).style(style)
                })
                .collect();
            frame.render_widget(List::new(items), inner);
        }
    }

    // The error replaces the bottom border
    if let Some(error) = &field.error
        && area.height > 1
    {
        let error_text =
            Paragraph::new(format!("⚠ {error}")).style(Style::default().fg(theme.error));
        let error_area = Rect {
            x: area.x + 1,
            y: area.y + area.height - 1,
            width: area.width.saturating_sub(2),
            height: 1,
        };
        frame.render_widget(error_text, error_area);
    }
}

impl FormBackend for RatatuiFormBackend {
    type Error = RatatuiFormError;

    fn collect(
        &self,
        form: &FormData,
        validate: &dyn Fn(&Field) -> Result<(), FieldError>,
    ) -> Result<Vec<FieldValue>, Self::Error> {
        let state = self.run(self.state(form, false), validate)?;
        Ok(state.values())
    }
}
