//! Wrappers for the external registry tools ocitag drives.

mod oras;
mod skopeo;

pub use oras::Oras;
pub use skopeo::Skopeo;

use crate::runner::RunError;

/// Retry classifier shared by the tool wrappers.
///
/// A non-zero exit from the tool usually means a registry or network
/// flake and is worth retrying. Failing to find or launch the tool at all
/// is not going to get better on its own.
pub fn transient(err: &RunError) -> bool {
    matches!(err, RunError::Failed(_))
}
