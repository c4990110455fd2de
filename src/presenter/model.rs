use serde::Serialize;

use crate::domain::catalog::ScenarioId;
use crate::domain::order::{OrderId, OrderTemplate};

/// What a button does when pressed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "target", rename_all = "snake_case")]
pub enum ActionKind {
    Create(OrderTemplate),
    Acknowledge(OrderId),
    Dispatch(OrderId),
    Deliver(OrderId),
    Cancel(OrderId),
    RaiseRefund(OrderId),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Action {
    pub label: String,
    pub kind: ActionKind,
}

impl Action {
    pub fn new(label: impl Into<String>, kind: ActionKind) -> Self {
        Self { label: label.into(), kind }
    }

    pub fn create(template: OrderTemplate) -> Self {
        Self::new(template.button_label(), ActionKind::Create(template))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Row {
    pub cells: Vec<String>,
    pub actions: Vec<Action>,
}

impl Row {
    pub fn new(cells: Vec<String>) -> Self {
        Self { cells, actions: Vec::new() }
    }

    pub fn with_action(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }
}

/// One card: either a button group, a table, or both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Panel {
    pub title: &'static str,
    pub description: &'static str,
    pub columns: Vec<&'static str>,
    pub rows: Vec<Row>,
    pub empty_message: Option<&'static str>,
    pub actions: Vec<Action>,
}

impl Panel {
    pub fn new(title: &'static str, description: &'static str) -> Self {
        Self {
            title,
            description,
            columns: Vec::new(),
            rows: Vec::new(),
            empty_message: None,
            actions: Vec::new(),
        }
    }

    pub fn columns(mut self, columns: &[&'static str]) -> Self {
        self.columns = columns.to_vec();
        self
    }

    pub fn rows(mut self, rows: Vec<Row>) -> Self {
        self.rows = rows;
        self
    }

    pub fn empty(mut self, message: &'static str) -> Self {
        self.empty_message = Some(message);
        self
    }

    pub fn actions(mut self, actions: Vec<Action>) -> Self {
        self.actions = actions;
        self
    }

    pub fn is_table(&self) -> bool {
        !self.columns.is_empty()
    }

    /// Every action on the panel, panel buttons first.
    pub fn all_actions(&self) -> impl Iterator<Item = &Action> {
        self.actions.iter().chain(self.rows.iter().flat_map(|r| r.actions.iter()))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Presentation {
    pub scenario: Option<ScenarioId>,
    pub panels: Vec<Panel>,
}

impl Presentation {
    /// Shown for scenario keys the presenter does not know.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    pub fn panel(&self, title: &str) -> Option<&Panel> {
        self.panels.iter().find(|p| p.title == title)
    }

    pub fn actions(&self) -> impl Iterator<Item = &Action> {
        self.panels.iter().flat_map(|p| p.all_actions())
    }
}
