//! Search box plus dropdown filters above a table.
//!
//! Search text is debounced: the bar reports [`Message::SearchSettled`]
//! only after the input has been quiet for the configured delay (or on
//! Enter). Dropdown choices are reported at once as
//! [`Message::FilterChanged`].

use crate::chrome::focus_block;
use crate::filter_select::{self, FilterSelect, SelectMode};
use crate::search_field::{self, SearchField};
use crossterm::event::KeyEvent;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::Frame;
use roster_core::{Command, Component, Debounce, Subscription};
use roster_listing::ListState;
use std::time::Duration;

pub const DEFAULT_SEARCH_DEBOUNCE: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    Search(search_field::Message),
    Select(usize, filter_select::Message),
    DebounceElapsed(u64),
    KeyPress(KeyEvent),
    Paste(String),
    /// Outbound: the search term to apply.
    SearchSettled(String),
    /// Outbound: filter `key` should become `value` (`None` clears it).
    FilterChanged { key: String, value: Option<String> },
}

/// Which control in the bar has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarSlot {
    Search,
    Filter(usize),
}

pub struct FilterBar {
    search: SearchField,
    selects: Vec<FilterSelect>,
    debounce: Debounce<String>,
    focus: Option<BarSlot>,
}

impl FilterBar {
    pub fn new(search: SearchField) -> Self {
        Self {
            search,
            selects: Vec::new(),
            debounce: Debounce::new("filter-bar-search", DEFAULT_SEARCH_DEBOUNCE),
            focus: None,
        }
    }

    pub fn with_filter(mut self, select: FilterSelect) -> Self {
        self.selects.push(select);
        self
    }

    pub fn with_debounce(mut self, delay: Duration) -> Self {
        self.debounce = Debounce::new("filter-bar-search", delay);
        self
    }

    pub fn search(&self) -> &SearchField {
        &self.search
    }

    pub fn selects(&self) -> &[FilterSelect] {
        &self.selects
    }

    pub fn debounce(&self) -> &Debounce<String> {
        &self.debounce
    }

    pub fn focus(&self) -> Option<BarSlot> {
        self.focus
    }

    /// Move focus inside the bar, or out of it with `None`.
    pub fn set_focus(&mut self, slot: Option<BarSlot>) {
        let slot = match slot {
            Some(BarSlot::Filter(i)) if i >= self.selects.len() => None,
            other => other,
        };
        self.focus = slot;
        if slot == Some(BarSlot::Search) {
            self.search.focus();
        } else {
            self.search.blur();
        }
        for (i, select) in self.selects.iter_mut().enumerate() {
            if slot == Some(BarSlot::Filter(i)) {
                select.focus();
            } else {
                select.blur();
            }
        }
    }

    /// Focus stops the bar offers, in tab order.
    pub fn slots(&self) -> impl Iterator<Item = BarSlot> {
        std::iter::once(BarSlot::Search).chain((0..self.selects.len()).map(BarSlot::Filter))
    }

    /// Whether a dropdown is currently open.
    pub fn overlay_open(&self) -> bool {
        self.selects.iter().any(FilterSelect::is_open)
    }

    /// Show what the list state holds. Text still waiting on the debounce
    /// is left alone.
    pub fn sync(&mut self, state: &ListState) {
        if !self.debounce.is_pending() && self.search.value().trim() != state.search() {
            self.search.set_value(state.search());
        }
        for select in &mut self.selects {
            if select.mode() == SelectMode::Controlled {
                let value = state.filter(select.key()).map(str::to_owned);
                select.set_value(value.as_deref());
            }
        }
    }

    /// Forget any pending search text so no timer fires for it.
    pub fn cancel_debounce(&mut self) {
        self.debounce.cancel();
    }

    fn settled(term: Option<String>) -> Command<Message> {
        match term {
            Some(term) => Command::message(Message::SearchSettled(term)),
            None => Command::none(),
        }
    }

    fn layout(&self, area: Rect) -> (Rect, Vec<Rect>) {
        let mut constraints = vec![Constraint::Min(20)];
        constraints.extend(self.selects.iter().map(|_| Constraint::Length(24)));
        let areas = Layout::horizontal(constraints).spacing(1).split(area);
        (areas[0], areas[1..].to_vec())
    }

    /// Draw any open dropdown. Call after everything below the bar has been
    /// drawn, with the same `area` given to [`view`](Component::view).
    pub fn view_overlays(&self, frame: &mut Frame, area: Rect) {
        let (_, anchors) = self.layout(area);
        for (select, anchor) in self.selects.iter().zip(anchors) {
            select.view_overlay(frame, anchor);
        }
    }
}

impl Component for FilterBar {
    type Message = Message;

    fn update(&mut self, msg: Message) -> Command<Message> {
        match msg {
            Message::KeyPress(key) => match self.focus {
                Some(BarSlot::Search) => self.update(Message::Search(search_field::Message::KeyPress(key))),
                Some(BarSlot::Filter(i)) => {
                    self.update(Message::Select(i, filter_select::Message::KeyPress(key)))
                }
                None => Command::none(),
            },
            Message::Paste(text) => match self.focus {
                Some(BarSlot::Search) => self.update(Message::Search(search_field::Message::Paste(text))),
                _ => Command::none(),
            },
            Message::Search(search_field::Message::Edited(term)) => {
                self.debounce.push(term);
                Command::none()
            }
            Message::Search(search_field::Message::Submitted(_)) => Self::settled(self.debounce.flush()),
            Message::Search(inner) => self.search.update(inner).map(Message::Search),
            Message::Select(_, filter_select::Message::Chosen { key, value }) => {
                tracing::debug!(%key, ?value, "filter chosen");
                Command::message(Message::FilterChanged { key, value })
            }
            Message::Select(i, inner) => match self.selects.get_mut(i) {
                Some(select) => select.update(inner).map(move |m| Message::Select(i, m)),
                None => Command::none(),
            },
            Message::DebounceElapsed(generation) => Self::settled(self.debounce.fire(generation)),
            Message::SearchSettled(_) | Message::FilterChanged { .. } => Command::none(),
        }
    }

    fn view(&self, frame: &mut Frame, area: Rect) {
        let (search_area, select_areas) = self.layout(area);
        let block = focus_block("Search", self.focus == Some(BarSlot::Search));
        let inner = block.inner(search_area);
        frame.render_widget(block, search_area);
        self.search.view(frame, inner);
        for (select, select_area) in self.selects.iter().zip(select_areas) {
            select.view(frame, select_area);
        }
    }

    fn subscriptions(&self) -> Vec<Subscription<Message>> {
        self.debounce
            .subscription(Message::DebounceElapsed)
            .into_iter()
            .collect()
    }

    fn focused(&self) -> bool {
        self.focus.is_some()
    }
}
