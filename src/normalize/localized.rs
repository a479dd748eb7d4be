use crate::constants::PREFERRED_LANGUAGE;
use crate::types::{LocalizedArtistInfo, LocalizedName, RawStage};

/// A language-tagged variant of some attribute
pub trait Localized {
    fn language(&self) -> Option<&str>;
}

impl Localized for LocalizedName {
    fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }
}

impl Localized for LocalizedArtistInfo {
    fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }
}

/// Picks the English entry, else the first one. Empty or absent lists resolve to `None`.
pub fn resolve_localized<T: Localized>(entries: Option<&[T]>) -> Option<&T> {
    let entries = entries?;
    entries
        .iter()
        .find(|entry| entry.language() == Some(PREFERRED_LANGUAGE))
        .or_else(|| entries.first())
}

/// Display name of a stage, or `None` when nothing usable is present.
///
/// The English entry wins even when its name is missing; there is no second
/// fallback to other languages in that case.
pub fn resolve_stage_name(stage: Option<&RawStage>) -> Option<&str> {
    let localized = stage?.localized.as_deref();
    resolve_localized(localized)
        .and_then(|entry| entry.name.as_deref())
        .filter(|name| !name.is_empty())
}
