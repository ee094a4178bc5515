//! Target event resolution.

use uuid::Uuid;

use evenza_core::result::AppResult;
use evenza_database::repositories::event::EventRepository;

/// A caller-supplied event reference: an explicit id, a title, or nothing.
#[derive(Debug, Clone, Default)]
pub struct EventRef {
    /// Explicit event id. Takes precedence over the title.
    pub id: Option<Uuid>,
    /// Event title for lookup. A title that parses as an id is treated as
    /// one when no event carries that exact title.
    pub title: Option<String>,
}

impl EventRef {
    /// Reference by explicit id.
    pub fn by_id(id: Uuid) -> Self {
        Self {
            id: Some(id),
            title: None,
        }
    }
}

/// Resolve an event reference to an existing event's id.
///
/// An explicit id wins; otherwise the title is matched exactly, and a
/// title that looks like an id is coerced into an id lookup. An absent or
/// unresolvable reference yields `None` — the caller dispatches to an
/// empty recipient set rather than failing.
pub async fn resolve_event(
    repo: &EventRepository,
    event_ref: &EventRef,
) -> AppResult<Option<Uuid>> {
    if let Some(id) = event_ref.id {
        return Ok(repo.find_by_id(id).await?.map(|e| e.id));
    }

    if let Some(title) = event_ref.title.as_deref() {
        if let Some(event) = repo.find_by_title(title).await? {
            return Ok(Some(event.id));
        }
        if let Some(id) = title_as_id(title) {
            return Ok(repo.find_by_id(id).await?.map(|e| e.id));
        }
    }

    Ok(None)
}

/// Coerce a title that is actually an id into one.
fn title_as_id(title: &str) -> Option<Uuid> {
    Uuid::parse_str(title.trim()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_as_id_accepts_uuid_titles() {
        let id = Uuid::new_v4();
        assert_eq!(title_as_id(&id.to_string()), Some(id));
        assert_eq!(title_as_id(&format!("  {id} ")), Some(id));
    }

    #[test]
    fn test_title_as_id_rejects_plain_titles() {
        assert_eq!(title_as_id("Summer Hackathon"), None);
        assert_eq!(title_as_id(""), None);
    }
}
