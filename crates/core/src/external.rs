//! Delegation of externally managed assets to the external content library.

use crate::error::PublishError;
use binpub_traits::{ExternalResolver, ExternalResolverFactory, LocationHandle};
use binpub_types::{EXTERNAL_MIME_TYPE, LinkElement, MultimediaField};
use std::sync::Arc;

/// Routes external stubs to the external library instead of copying a binary.
#[derive(Debug, Clone, Default)]
pub struct ExternalAssetProcessor {
    factory: Option<Arc<dyn ExternalResolverFactory>>,
    location: Option<LocationHandle>,
}

impl ExternalAssetProcessor {
    /// A processor that delegates nothing.
    pub fn disabled() -> Self {
        Self::default()
    }

    /// A processor that delegates to `factory`, scoped to `location`.
    pub fn new(
        factory: Arc<dyn ExternalResolverFactory>,
        location: Option<LocationHandle>,
    ) -> Self {
        Self {
            factory: Some(factory),
            location,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.factory.is_some()
    }

    /// Whether content of this MIME type goes to the external library.
    pub fn handles(&self, mime_type: &str) -> bool {
        self.is_enabled() && mime_type == EXTERNAL_MIME_TYPE
    }

    /// Processes a stub field. A field that already carries an external id is left alone.
    pub fn process_stub(&self, field: &mut MultimediaField) -> Result<(), PublishError> {
        if let Some(external_id) = &field.external_id {
            log::debug!(
                "External stub '{}' has already been processed (external id '{}')",
                field.id,
                external_id
            );
            return Ok(());
        }
        let mut session = self.open()?;
        session.resolver.process_stub(field)?;
        Ok(())
    }

    /// Resolves a rich-text link to an external asset.
    pub fn process_link(&self, element: &mut LinkElement) -> Result<String, PublishError> {
        let mut session = self.open()?;
        Ok(session.resolver.process_link(element)?)
    }

    fn open(&self) -> Result<ExternalSession, PublishError> {
        let factory = self.factory.as_ref().ok_or_else(|| {
            PublishError::Config("external asset handling is not enabled".to_string())
        })?;
        let resolver = factory.open(self.location.as_ref())?;
        Ok(ExternalSession { resolver })
    }
}

/// Closes the resolver on every exit path.
struct ExternalSession {
    resolver: Box<dyn ExternalResolver>,
}

impl Drop for ExternalSession {
    fn drop(&mut self) {
        self.resolver.close();
    }
}
