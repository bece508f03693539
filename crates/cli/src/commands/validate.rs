//! Dataset validation.

use backoffice_admin::Dataset;
use tracing::{error, info};

use super::CommandError;

/// Check every editable record against its form rules.
///
/// # Errors
///
/// Returns an error naming the number of failing records.
pub fn dataset(dataset: &Dataset) -> Result<(), Box<dyn std::error::Error>> {
    let issues = dataset.validate();
    if !issues.is_empty() {
        error!("Dataset validation failed:");
        for issue in &issues {
            error!("  - {issue}");
        }
        return Err(CommandError::InvalidDataset(issues.len()).into());
    }

    info!(
        users = dataset.users.len(),
        roles = dataset.roles.len(),
        locations = dataset.locations.len(),
        "Dataset validated successfully"
    );
    Ok(())
}
