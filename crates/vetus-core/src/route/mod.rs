//! Locations and the routes they resolve to.
//!
//! A location is the query-string form of a view (`?mode=thread&id=T1`). The
//! route is always derived from the location by [`Route::parse`]; nothing
//! else decides which view is active.

mod history;

pub use history::History;

use url::form_urlencoded;

/// The view a location resolves to.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Route {
    /// Search box.
    #[default]
    Home,
    /// Lookup results for a query (which may be empty).
    Results {
        /// Query text.
        query: String,
    },
    /// A single email thread.
    Thread {
        /// Thread identifier.
        id: String,
    },
    /// A staged document hit.
    Document {
        /// Staging record identifier.
        id: String,
    },
}

impl Route {
    /// Route for a results page.
    #[must_use]
    pub fn results(query: impl Into<String>) -> Self {
        Self::Results {
            query: query.into(),
        }
    }

    /// Route for a thread page.
    #[must_use]
    pub fn thread(id: impl Into<String>) -> Self {
        Self::Thread { id: id.into() }
    }

    /// Route for a staged document page.
    #[must_use]
    pub fn document(id: impl Into<String>) -> Self {
        Self::Document { id: id.into() }
    }

    /// Resolves a location.
    ///
    /// Accepts a bare query (`?mode=results&q=x` or `mode=results&q=x`) or a
    /// full URL carrying one. Anything unrecognized resolves to [`Route::Home`],
    /// as does a thread or document location without an `id`.
    #[must_use]
    pub fn parse(location: &str) -> Self {
        let query = location.split_once('?').map_or(location, |(_, query)| query);
        let query = query.split_once('#').map_or(query, |(query, _)| query);

        let mut mode = None;
        let mut q = None;
        let mut id = None;
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            let slot = match key.as_ref() {
                "mode" => &mut mode,
                "q" => &mut q,
                "id" => &mut id,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into_owned());
            }
        }

        let id = id.filter(|id| !id.is_empty());
        match (mode.as_deref(), id) {
            (Some("results"), _) => Self::Results {
                query: q.unwrap_or_default(),
            },
            (Some("thread"), Some(id)) => Self::Thread { id },
            (Some("doc"), Some(id)) => Self::Document { id },
            _ => Self::Home,
        }
    }

    /// Location string for this route. Home is the empty location.
    #[must_use]
    pub fn to_location(&self) -> String {
        let (mode, key, value) = match self {
            Self::Home => return String::new(),
            Self::Results { query } => ("results", "q", query),
            Self::Thread { id } => ("thread", "id", id),
            Self::Document { id } => ("doc", "id", id),
        };
        let query = form_urlencoded::Serializer::new(String::new())
            .append_pair("mode", mode)
            .append_pair(key, value)
            .finish();
        format!("?{query}")
    }
}
