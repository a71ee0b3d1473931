//! Selection validation against the verse repository

use crate::error::ExporterError;
use crate::selection::SelectionQuery;
use crate::verses::VerseRepository;

/// Check that `selection` is well ordered and names at least one verse.
///
/// The full query always runs, so source failures surface first. The
/// ordering check and the empty-result check are evaluated independently;
/// `InvalidRange` takes priority over `EmptySelection`.
pub async fn validate(
    repository: &VerseRepository,
    selection: &SelectionQuery,
) -> Result<(), ExporterError> {
    let verses = repository.query(selection).await?;

    let reversed = selection.is_reversed();
    let empty = verses.is_empty();

    if reversed {
        return Err(ExporterError::InvalidRange);
    }
    if empty {
        return Err(ExporterError::EmptySelection);
    }
    Ok(())
}
