//! Slug assignment for named catalog entities.
//!
//! Slugs are derived once, immediately before an entity is first persisted,
//! and frozen from then on: renaming an entity later never resyncs its slug.
//! Uniqueness is not enforced here; the store's unique constraints reject a
//! clashing slug at persist time and the services translate that into
//! `DuplicateSlug`.

use slug::slugify as transliterate;

/// Canonical display string of an entity, used as the slug source.
///
/// Title-carrying entities (courses, lessons) return their title;
/// name-carrying entities (categories, modules, chapters) return their name.
pub trait NameSource {
    fn name_source(&self) -> &str;
}

/// URL-safe transliteration: lowercase, accents stripped, runs of
/// non-alphanumeric characters collapsed to single hyphens.
pub fn slugify(value: &str) -> String {
    transliterate(value)
}

/// Derive a slug from `source` unless one is already set.
///
/// Returns the existing slug untouched when present, `None` when the source
/// string transliterates to nothing (e.g. all punctuation).
pub fn assign_slug(current: Option<&str>, source: &dyn NameSource) -> Option<String> {
    if let Some(existing) = current {
        return Some(existing.to_string());
    }

    let derived = slugify(source.name_source());
    if derived.is_empty() {
        None
    } else {
        Some(derived)
    }
}
