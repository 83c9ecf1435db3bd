//! filter.rs: filter state and the exclusive filter-button group.

use std::fmt;

/// Token carried by the "show everything" button.
pub const ALL_TOKEN: &str = "todos";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Filter {
    #[default]
    All,
    Category(String),
}

impl Filter {
    pub fn from_token(token: &str) -> Self {
        if token == ALL_TOKEN {
            Filter::All
        } else {
            Filter::Category(token.to_string())
        }
    }

    pub fn token(&self) -> &str {
        match self {
            Filter::All => ALL_TOKEN,
            Filter::Category(c) => c,
        }
    }

    /// Whether a marker with this raw category label should be visible.
    pub fn admits(&self, category: &str) -> bool {
        match self {
            Filter::All => true,
            Filter::Category(c) => c == category,
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Filter triggers rendered somewhere outside the engine.
pub trait FilterUi {
    /// Category token of every trigger, in display order.
    fn filter_tokens(&self) -> Vec<String>;

    fn set_active(&mut self, index: usize, active: bool);
}

/// Events the controller reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEvent {
    /// The trigger at this index was clicked.
    FilterActivated(usize),
}

/// Buttons of which exactly one is active, unless there are none.
#[derive(Debug, Clone, Default)]
pub struct FilterGroup {
    tokens: Vec<String>,
    active: Option<usize>,
}

impl FilterGroup {
    /// The initial active button is `todos` if present, otherwise the first.
    pub fn new(tokens: Vec<String>) -> Self {
        let active = tokens
            .iter()
            .position(|t| t == ALL_TOKEN)
            .or(if tokens.is_empty() { None } else { Some(0) });
        Self { tokens, active }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }

    pub fn active_filter(&self) -> Option<Filter> {
        self.active.map(|i| Filter::from_token(&self.tokens[i]))
    }

    pub fn position(&self, token: &str) -> Option<usize> {
        self.tokens.iter().position(|t| t == token)
    }

    /// Make `index` the only active button; `None` for an unknown index.
    pub fn activate(&mut self, index: usize) -> Option<Filter> {
        let token = self.tokens.get(index)?;
        self.active = Some(index);
        Some(Filter::from_token(token))
    }

    /// Push the active flags out to the UI.
    pub fn sync(&self, ui: &mut impl FilterUi) {
        for i in 0..self.tokens.len() {
            ui.set_active(i, false);
        }
        if let Some(i) = self.active {
            ui.set_active(i, true);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn todos_admits_everything() {
        let f = Filter::from_token("todos");
        assert_eq!(f, Filter::All);
        assert!(f.admits("hospital"));
        assert!(f.admits("desconhecido"));
        assert!(f.admits(""));
    }

    #[test]
    fn named_filter_compares_raw_label() {
        let f = Filter::from_token("outro");
        assert!(f.admits("outro"));
        assert!(!f.admits("desconhecido"));
        assert_eq!(f.token(), "outro");
    }

    #[test]
    fn initial_active_prefers_todos() {
        let g = FilterGroup::new(tokens(&["hospital", "todos", "escola"]));
        assert_eq!(g.active(), Some(1));
        let g = FilterGroup::new(tokens(&["hospital", "escola"]));
        assert_eq!(g.active(), Some(0));
        let g = FilterGroup::new(Vec::new());
        assert_eq!(g.active(), None);
        assert_eq!(g.active_filter(), None);
    }

    #[test]
    fn activation_is_exclusive() {
        let mut g = FilterGroup::new(tokens(&["todos", "hospital", "escola"]));
        assert_eq!(g.activate(2), Some(Filter::Category("escola".into())));
        assert_eq!(g.active(), Some(2));
        assert_eq!(g.activate(7), None);
        assert_eq!(g.active(), Some(2));
    }
}
