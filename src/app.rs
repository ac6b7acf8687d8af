use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use std::time::Instant;

use crate::calc::{self, inputs, CalcError, Summary};
use crate::calc::inputs::{SliderPosition, SplitCount};
use crate::config::AppConfig;

/// Seconds a status message stays in the info line
const STATUS_SECONDS: u64 = 3;

/// Longest bill text we accept (keeps the input box readable)
const MAX_BILL_LEN: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Bill,
    Split,
    Tip,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Popup {
    None,
    Help,
}

/// The three user inputs. Outputs are derived on every call to
/// [`BillForm::summary`], never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct BillForm {
    pub bill_text: String,
    pub split: SplitCount,
    pub slider: SliderPosition,
}

impl BillForm {
    pub fn new(split: SplitCount, slider: SliderPosition) -> Self {
        Self {
            bill_text: String::new(),
            split,
            slider,
        }
    }

    /// Append a typed character. Only digits and a single '.' are accepted.
    pub fn accept_char(&mut self, c: char) -> bool {
        if self.bill_text.len() >= MAX_BILL_LEN {
            return false;
        }
        match c {
            '0'..='9' => {}
            '.' if !self.bill_text.contains('.') => {}
            _ => return false,
        }
        self.bill_text.push(c);
        true
    }

    pub fn backspace(&mut self) {
        self.bill_text.pop();
    }

    pub fn clear(&mut self) {
        self.bill_text.clear();
    }

    pub fn bill(&self) -> Result<f64, CalcError> {
        inputs::parse_bill(&self.bill_text)
    }

    /// Split and tip controls only appear once the bill parses
    pub fn is_valid(&self) -> bool {
        self.bill().is_ok()
    }

    pub fn tip_percentage(&self) -> inputs::TipPercentage {
        self.slider.tip_percentage()
    }

    pub fn summary(&self) -> Option<Summary> {
        let bill = self.bill().ok()?;
        calc::calculate(bill, self.split, self.tip_percentage()).ok()
    }
}

pub struct App {
    pub focus: Focus,
    pub popup: Popup,
    pub form: BillForm,
    pub config: AppConfig,

    // Status message (shown in info line, auto-clears after timeout)
    pub status_message: Option<String>,
    pub status_message_time: Option<Instant>,

    pub should_quit: bool,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        let form = BillForm::new(
            config.initial_split(),
            SliderPosition::from_percentage(config.initial_tip()),
        );

        tracing::debug!(
            split = form.split.get(),
            tip = form.tip_percentage().get(),
            "Starting with configured defaults"
        );

        Self {
            focus: Focus::Bill,
            popup: Popup::None,
            form,
            config,
            status_message: None,
            status_message_time: None,
            should_quit: false,
        }
    }

    /// Set a status message (auto-clears after a few seconds)
    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some(msg.into());
        self.status_message_time = Some(Instant::now());
    }

    pub fn summary(&self) -> Option<Summary> {
        self.form.summary()
    }

    pub fn format_amount(&self, value: f64) -> String {
        calc::format_amount(&self.config.currency_symbol, value)
    }

    /// Handle a key press, showing any failure in the info line
    pub fn on_key(&mut self, key: KeyEvent) {
        if let Err(e) = self.handle_key(key) {
            tracing::warn!("Key handling failed: {}", e);
            self.set_status(format!("Error: {}", e));
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Handle popups first
        if self.popup != Popup::None {
            return self.handle_popup_key(key);
        }

        self.handle_normal_key(key)
    }

    fn handle_popup_key(&mut self, key: KeyEvent) -> Result<()> {
        if matches!(
            key.code,
            KeyCode::Esc | KeyCode::Char('?') | KeyCode::Enter | KeyCode::Char('q')
        ) {
            self.popup = Popup::None;
        }
        Ok(())
    }

    fn handle_normal_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Tab => self.focus_next(),
            KeyCode::BackTab => self.focus_prev(),

            KeyCode::Char('?') => self.popup = Popup::Help,

            KeyCode::Esc => {
                if !self.form.bill_text.is_empty() {
                    self.form.clear();
                    self.focus = Focus::Bill;
                    self.set_status("Bill cleared");
                }
            }

            // Split works from anywhere once the bill is valid
            KeyCode::Char('+') => self.change_split(1),
            KeyCode::Char('-') => self.change_split(-1),

            KeyCode::Char('[') if self.focus != Focus::Bill => self.move_slider(-self.config.tip_step),
            KeyCode::Char(']') if self.focus != Focus::Bill => self.move_slider(self.config.tip_step),

            _ => match self.focus {
                Focus::Bill => return self.handle_bill_key(key),
                Focus::Split => self.handle_split_key(key),
                Focus::Tip => self.handle_tip_key(key),
            },
        }
        Ok(())
    }

    /// Moving past the bill field requires a bill that parses
    fn handle_bill_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Char(c) => {
                if !self.form.accept_char(c) {
                    tracing::trace!("Rejected bill input {:?}", c);
                }
            }
            KeyCode::Backspace | KeyCode::Delete => self.form.backspace(),
            KeyCode::Enter | KeyCode::Down => {
                self.form.bill()?;
                self.focus = Focus::Split;
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_split_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Right | KeyCode::Char('l') => self.change_split(1),
            KeyCode::Left | KeyCode::Char('h') => self.change_split(-1),
            KeyCode::Up | KeyCode::Char('k') => self.focus = Focus::Bill,
            KeyCode::Down | KeyCode::Char('j') | KeyCode::Enter => self.focus = Focus::Tip,
            KeyCode::Char('q') => self.should_quit = true,
            _ => {}
        }
    }

    fn handle_tip_key(&mut self, key: KeyEvent) {
        let step = self.config.tip_step;
        match key.code {
            KeyCode::Right | KeyCode::Char('l') => self.move_slider(step),
            KeyCode::Left | KeyCode::Char('h') => self.move_slider(-step),
            KeyCode::Home => self.move_slider(-inputs::TipPercentage::MAX),
            KeyCode::End => self.move_slider(inputs::TipPercentage::MAX),
            KeyCode::Up | KeyCode::Char('k') => self.focus = Focus::Split,
            KeyCode::Char('q') => self.should_quit = true,
            _ => {}
        }
    }

    fn focus_next(&mut self) {
        if !self.form.is_valid() {
            self.focus = Focus::Bill;
            return;
        }
        self.focus = match self.focus {
            Focus::Bill => Focus::Split,
            Focus::Split => Focus::Tip,
            Focus::Tip => Focus::Bill,
        };
    }

    fn focus_prev(&mut self) {
        if !self.form.is_valid() {
            self.focus = Focus::Bill;
            return;
        }
        self.focus = match self.focus {
            Focus::Bill => Focus::Tip,
            Focus::Split => Focus::Bill,
            Focus::Tip => Focus::Split,
        };
    }

    fn change_split(&mut self, delta: i32) {
        if !self.form.is_valid() {
            return;
        }
        let changed = if delta > 0 {
            self.form.split.increment()
        } else {
            self.form.split.decrement()
        };
        if !changed {
            let bound = if delta > 0 { SplitCount::MAX } else { SplitCount::MIN };
            self.set_status(format!("Split is already at {}", bound));
        }
    }

    fn move_slider(&mut self, delta_pct: i32) {
        if !self.form.is_valid() {
            return;
        }
        self.form.slider = self.form.slider.nudge(delta_pct);
    }

    pub fn tick(&mut self) {
        // Clear status message after timeout
        if let Some(time) = self.status_message_time {
            if time.elapsed().as_secs() >= STATUS_SECONDS {
                self.status_message = None;
                self.status_message_time = None;
            }
        }

        // Focus can't sit on hidden controls
        if !self.form.is_valid() && self.focus != Focus::Bill {
            self.focus = Focus::Bill;
        }
    }
}
