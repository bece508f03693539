//! Table output.

use std::io::Write;

use backoffice_admin::components::TableView;

/// Write a table to stdout as aligned text or HTML markup.
///
/// # Errors
///
/// Returns an error if rendering or writing fails.
pub fn print(table: &TableView, html: bool) -> Result<(), Box<dyn std::error::Error>> {
    let body = if html {
        table.render_html()?
    } else {
        table.render_text()
    };
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{body}")?;
    Ok(())
}
