//! Script source port - where step SQL comes from

use crate::domain::result::Result;
use crate::domain::MigrationStep;

/// Loads the full SQL text of a step
pub trait ScriptSource {
    /// Read the whole script
    ///
    /// A script that does not exist or cannot be read fails with
    /// `Error::MissingFile` carrying the step's path.
    fn read(&self, step: &MigrationStep) -> Result<String>;
}
