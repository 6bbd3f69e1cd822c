//! Boundary toward the external content library.
//!
//! A resolver is opened for one delegation and closed right after, so the
//! factory is what hosts hand to the resolver crates; the resolver itself is
//! never stored.

use crate::{HostError, LocationHandle};
use binpub_types::{AssetId, LinkElement, MultimediaField};
use std::fmt::Debug;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

pub trait ExternalResolverFactory: Send + Sync + Debug {
    /// Opens a resolver scoped to the current target location, if any.
    fn open(&self, location: Option<&LocationHandle>)
    -> Result<Box<dyn ExternalResolver>, HostError>;
}

pub trait ExternalResolver {
    /// Processes a stub field, stamping it with its external identifier.
    fn process_stub(&mut self, field: &mut MultimediaField) -> Result<(), HostError>;

    /// Resolves a rich-text link to an external asset.
    ///
    /// The resolver may rewrite attributes of `element` itself; the returned
    /// path is written to the element's target attribute afterwards.
    fn process_link(&mut self, element: &mut LinkElement) -> Result<String, HostError>;

    /// Releases whatever the resolver holds. Called exactly once.
    fn close(&mut self) {}
}

#[derive(Debug, Default)]
struct Counters {
    opened: AtomicUsize,
    closed: AtomicUsize,
    stubs: AtomicUsize,
    links: AtomicUsize,
}

/// An in-memory external library.
///
/// Stamps stubs with `ecl:<identity>` and resolves links to
/// `{base_url}/{identity}`, counting every open, close and delegation.
#[derive(Debug, Clone)]
pub struct InMemoryExternalResolver {
    base_url: String,
    fail: bool,
    counters: Arc<Counters>,
}

impl InMemoryExternalResolver {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            fail: false,
            counters: Arc::default(),
        }
    }

    /// A library whose every delegation fails.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new("")
        }
    }

    pub fn opened(&self) -> usize {
        self.counters.opened.load(Ordering::SeqCst)
    }

    pub fn closed(&self) -> usize {
        self.counters.closed.load(Ordering::SeqCst)
    }

    pub fn stub_calls(&self) -> usize {
        self.counters.stubs.load(Ordering::SeqCst)
    }

    pub fn link_calls(&self) -> usize {
        self.counters.links.load(Ordering::SeqCst)
    }
}

impl ExternalResolverFactory for InMemoryExternalResolver {
    fn open(
        &self,
        location: Option<&LocationHandle>,
    ) -> Result<Box<dyn ExternalResolver>, HostError> {
        self.counters.opened.fetch_add(1, Ordering::SeqCst);
        let base = match location {
            Some(loc) => format!("{}{}", self.base_url, loc.path),
            None => self.base_url.clone(),
        };
        Ok(Box::new(Session {
            base,
            fail: self.fail,
            counters: Arc::clone(&self.counters),
        }))
    }
}

struct Session {
    base: String,
    fail: bool,
    counters: Arc<Counters>,
}

impl Session {
    fn check(&self) -> Result<(), HostError> {
        if self.fail {
            return Err(HostError::External("library unavailable".to_string()));
        }
        Ok(())
    }
}

impl ExternalResolver for Session {
    fn process_stub(&mut self, field: &mut MultimediaField) -> Result<(), HostError> {
        self.counters.stubs.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        let external_id = format!("ecl:{}", field.id.file_safe());
        if let Some(mm) = field.multimedia.as_mut() {
            mm.url = Some(format!("{}/{}", self.base, field.id.file_safe()));
        }
        field.external_id = Some(external_id);
        Ok(())
    }

    fn process_link(&mut self, element: &mut LinkElement) -> Result<String, HostError> {
        self.counters.links.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        let key = AssetId::from(element.xlink_href.as_str()).file_safe();
        element.set("data-external-id", format!("ecl:{}", key));
        Ok(format!("{}/{}", self.base, key))
    }

    fn close(&mut self) {
        self.counters.closed.fetch_add(1, Ordering::SeqCst);
    }
}
