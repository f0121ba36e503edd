//! Link entity representing an alias and the destination it redirects to.

/// A registered short link.
///
/// The alias is chosen by the creator and is never rewritten; the destination
/// is stored exactly as submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub alias: String,
    pub destination: String,
}

impl Link {
    /// Creates a new Link instance.
    pub fn new(alias: String, destination: String) -> Self {
        Self { alias, destination }
    }

    /// Path under which the link is served, e.g. `/docs`.
    pub fn short_path(&self) -> String {
        format!("/{}", self.alias)
    }
}

/// Input data for registering a new link.
///
/// Carries the already-hashed admin credential; the plaintext password never
/// reaches the store layer.
#[derive(Debug, Clone)]
pub struct NewLink {
    pub alias: String,
    pub destination: String,
    pub admin_digest: String,
}

impl NewLink {
    /// Consumes the input and returns the stored representation.
    pub fn into_link(self) -> Link {
        Link::new(self.alias, self.destination)
    }
}
