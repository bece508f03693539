//! Data table component.
//!
//! A [`DataTableConfig`] describes the columns, row actions and empty state
//! of one list screen. [`TableView::build`] turns the filtered records into
//! display strings, which can be rendered as HTML through the askama template
//! or as aligned plain text for the terminal.

use askama::Template;
use serde::Serialize;

use crate::error::AdminError;
use crate::models::{Location, Notification, Role, User};
use crate::store::Record;

/// Column definition for a data table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TableColumn {
    /// Unique key for the column.
    pub key: &'static str,
    /// Display label for the column header.
    pub label: &'static str,
}

impl TableColumn {
    /// Create a new column.
    #[must_use]
    pub const fn new(key: &'static str, label: &'static str) -> Self {
        Self { key, label }
    }
}

/// A per-row action button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Edit,
    Delete,
    MarkRead,
}

impl ActionKind {
    /// Action key (passed back to the screen).
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Edit => "edit",
            Self::Delete => "delete",
            Self::MarkRead => "mark_read",
        }
    }

    /// Button label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Edit => "Edit",
            Self::Delete => "Delete",
            Self::MarkRead => "Mark as read",
        }
    }
}

/// Configuration for a data table.
#[derive(Debug, Clone, Serialize)]
pub struct DataTableConfig {
    /// Unique table identifier.
    pub table_id: &'static str,
    /// Column definitions.
    pub columns: Vec<TableColumn>,
    /// Actions offered on every row.
    pub row_actions: Vec<ActionKind>,
    /// Shown instead of the body when no row is visible.
    pub empty_message: &'static str,
}

impl DataTableConfig {
    /// Create a new data table configuration.
    #[must_use]
    pub const fn new(table_id: &'static str) -> Self {
        Self {
            table_id,
            columns: Vec::new(),
            row_actions: Vec::new(),
            empty_message: "No items found.",
        }
    }

    /// Add a column.
    #[must_use]
    pub fn column(mut self, key: &'static str, label: &'static str) -> Self {
        self.columns.push(TableColumn::new(key, label));
        self
    }

    /// Add a row action.
    #[must_use]
    pub fn action(mut self, action: ActionKind) -> Self {
        self.row_actions.push(action);
        self
    }

    /// Set the empty state message.
    #[must_use]
    pub fn empty_state(mut self, message: &'static str) -> Self {
        self.empty_message = message;
        self
    }
}

/// A record that can be shown as a table row.
pub trait TableRow: Record {
    /// Table layout for this record type.
    fn table_config() -> DataTableConfig;

    /// Display strings, one per column.
    fn cells(&self) -> Vec<String>;
}

/// One rendered row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowView {
    /// Identifier carried by every row action.
    pub id: i64,
    pub cells: Vec<String>,
}

/// A table ready for display.
#[derive(Debug, Clone, Serialize)]
pub struct TableView {
    pub config: DataTableConfig,
    pub rows: Vec<RowView>,
    /// "Showing N of M ..." line.
    pub summary: String,
}

#[derive(Template)]
#[template(path = "components/data_table.html")]
struct DataTableTemplate<'a> {
    table: &'a TableView,
}

impl TableView {
    /// Lay out the visible records in store order.
    pub fn build<R: TableRow>(visible: &[&R], total: usize, plural: &str) -> Self {
        let rows = visible
            .iter()
            .map(|record| RowView {
                id: record.id().into(),
                cells: record.cells(),
            })
            .collect();
        Self {
            config: R::table_config(),
            rows,
            summary: format!("Showing {} of {total} {plural}", visible.len()),
        }
    }

    /// Whether the empty state is shown.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Render the table markup.
    ///
    /// # Errors
    ///
    /// Returns an error if the template fails to render.
    pub fn render_html(&self) -> Result<String, AdminError> {
        Ok(DataTableTemplate { table: self }.render()?)
    }

    /// Render as column-aligned plain text.
    #[must_use]
    pub fn render_text(&self) -> String {
        if self.rows.is_empty() {
            return format!("{}\n{}\n", self.config.empty_message, self.summary);
        }

        let mut headers = vec!["ID".to_string()];
        headers.extend(self.config.columns.iter().map(|c| c.label.to_string()));
        let body: Vec<Vec<String>> = self
            .rows
            .iter()
            .map(|row| {
                let mut line = vec![row.id.to_string()];
                line.extend(row.cells.iter().cloned());
                line
            })
            .collect();

        let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
        for line in &body {
            for (width, cell) in widths.iter_mut().zip(line) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let format_line = |cells: &[String]| {
            cells
                .iter()
                .zip(&widths)
                .map(|(cell, &width)| format!("{cell:<width$}"))
                .collect::<Vec<_>>()
                .join("  ")
                .trim_end()
                .to_string()
        };

        let mut out = format_line(&headers);
        out.push('\n');
        for line in &body {
            out.push_str(&format_line(line));
            out.push('\n');
        }
        out.push_str(&self.summary);
        out.push('\n');
        out
    }
}

/// A row action dispatched back to the owning screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction<I> {
    Edit(I),
    Delete(I),
    MarkRead(I),
}

impl<I: From<i64>> RowAction<I> {
    /// Decode an action key and row identifier as emitted by the table.
    #[must_use]
    pub fn parse(key: &str, id: i64) -> Option<Self> {
        match key {
            "edit" => Some(Self::Edit(I::from(id))),
            "delete" => Some(Self::Delete(I::from(id))),
            "mark_read" => Some(Self::MarkRead(I::from(id))),
            _ => None,
        }
    }
}

const DATE_TIME: &str = "%b %-d, %Y, %I:%M %p";
const DATE: &str = "%b %-d, %Y";

impl TableRow for User {
    fn table_config() -> DataTableConfig {
        DataTableConfig::new("users")
            .column("username", "Username")
            .column("first_name", "First Name")
            .column("last_name", "Last Name")
            .column("email", "Email")
            .column("role", "Role")
            .column("status", "Status")
            .column("last_login", "Last Login")
            .action(ActionKind::Edit)
            .action(ActionKind::Delete)
            .empty_state("No users found. Add your first user to get started.")
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.username.clone(),
            self.first_name.clone(),
            self.last_name.clone(),
            self.email.to_string(),
            self.role_name.clone(),
            self.status.label().to_string(),
            self.last_login
                .map_or_else(|| "Never".to_string(), |t| t.format(DATE_TIME).to_string()),
        ]
    }
}

impl TableRow for Role {
    fn table_config() -> DataTableConfig {
        DataTableConfig::new("roles")
            .column("name", "Role Name")
            .column("description", "Description")
            .column("permissions", "Permissions")
            .column("user_count", "Users Count")
            .column("status", "Status")
            .column("created", "Created")
            .action(ActionKind::Edit)
            .action(ActionKind::Delete)
            .empty_state("No roles found. Add your first role to get started.")
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.description.clone(),
            permission_summary(&self.permissions),
            self.user_count.to_string(),
            self.status.label().to_string(),
            self.created_at.format(DATE).to_string(),
        ]
    }
}

/// First two permission actions, then `+N` for the rest.
fn permission_summary(permissions: &[String]) -> String {
    let mut shown: Vec<String> = permissions
        .iter()
        .take(2)
        .map(|p| p.split_once('.').map_or(p.as_str(), |(_, action)| action).to_string())
        .collect();
    if permissions.len() > 2 {
        shown.push(format!("+{}", permissions.len() - 2));
    }
    shown.join(" ")
}

impl TableRow for Location {
    fn table_config() -> DataTableConfig {
        DataTableConfig::new("locations")
            .column("name", "Location")
            .column("type", "Type")
            .column("address", "Address")
            .column("contact", "Contact")
            .column("manager", "Manager")
            .column("employees", "Employees")
            .column("status", "Status")
            .action(ActionKind::Edit)
            .action(ActionKind::Delete)
            .empty_state("No locations found. Add your first location to get started.")
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.kind.label().to_string(),
            self.postal_address(),
            format!("{} / {}", self.phone, self.email),
            self.manager.clone(),
            self.employee_count.to_string(),
            self.status.label().to_string(),
        ]
    }
}

impl TableRow for Notification {
    fn table_config() -> DataTableConfig {
        DataTableConfig::new("notifications")
            .column("type", "Type")
            .column("title", "Title")
            .column("message", "Message")
            .column("timestamp", "Received")
            .column("read", "Read")
            .action(ActionKind::MarkRead)
            .action(ActionKind::Delete)
            .empty_state("You're all caught up! No notifications to display.")
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.kind.label().to_string(),
            self.title.clone(),
            self.message.clone(),
            self.timestamp.format(DATE_TIME).to_string(),
            if self.is_read { "yes" } else { "no" }.to_string(),
        ]
    }
}
