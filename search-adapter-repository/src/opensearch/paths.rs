//! Backend resource paths.
//!
//! Pure construction of the URLs each operation talks to. Index names and
//! document keys are percent-encoded as single path segments.

use url::Url;

/// Builds backend URLs from the configured origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPaths {
    origin: Url,
}

impl SearchPaths {
    /// Create a path builder rooted at the origin of `base`.
    ///
    /// Any path, query or fragment on `base` is dropped.
    pub fn new(base: &Url) -> Self {
        let mut origin = base.clone();
        origin.set_path("");
        origin.set_query(None);
        origin.set_fragment(None);
        Self { origin }
    }

    /// The origin every path is built on.
    pub fn origin(&self) -> &Url {
        &self.origin
    }

    /// `{origin}/{index}`: create, delete and reachability checks.
    pub fn index(&self, index: &str) -> Url {
        self.build(&[index])
    }

    /// `{origin}/{index}/_doc/{key}`: get, index, update and remove.
    pub fn document(&self, index: &str, key: &str) -> Url {
        self.build(&[index, "_doc", key])
    }

    /// `{origin}/_bulk`. Origin scoped; the target index travels in the payload.
    pub fn bulk(&self) -> Url {
        self.build(&["_bulk"])
    }

    /// `{origin}/{index}/_search`.
    pub fn search(&self, index: &str) -> Url {
        self.build(&[index, "_search"])
    }

    fn build(&self, segments: &[&str]) -> Url {
        let mut url = self.origin.clone();
        // Http(s) origins always accept path segments; other schemes come back unchanged.
        if let Ok(mut path) = url.path_segments_mut() {
            path.clear().extend(segments);
        }
        url
    }
}
