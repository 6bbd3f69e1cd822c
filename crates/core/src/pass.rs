//! One rendering pass: the entry points callers use.

use crate::config::{PublishConfig, RenderContext};
use crate::dispatcher::BinaryPublishDispatcher;
use crate::error::PublishError;
use crate::external::ExternalAssetProcessor;
use crate::multimedia::MultimediaFieldPublisher;
use crate::naming::{FileNamer, NamingStrategy};
use crate::placement::{DefaultPlacement, Placement, TargetedPlacement};
use crate::reference::{PublishedPath, ReferencePathStrategy};
use crate::registry::AssetRegistry;
use crate::richtext::RichTextLinkRewriter;
use binpub_traits::{ExternalResolverFactory, LocationResolver, ObjectStore, Publisher};
use binpub_types::{AssetId, ItemUri, MultimediaField};
use std::sync::Arc;

#[derive(Debug)]
enum PassState {
    Active(BinaryPublishDispatcher),
    /// The configuration was unusable; every call is a no-op.
    Inert,
}

/// Binary publication for one rendering pass.
///
/// Create one per pass with [`PublishPass::builder`] and drop it (or call
/// [`finish`](Self::finish)) when the pass ends. Nothing carries over between passes.
#[derive(Debug)]
pub struct PublishPass {
    state: PassState,
    external: ExternalAssetProcessor,
}

impl PublishPass {
    pub fn builder(
        store: Arc<dyn ObjectStore>,
        publisher: Arc<dyn Publisher>,
        context: RenderContext,
    ) -> PublishPassBuilder {
        PublishPassBuilder::new(store, publisher, context)
    }

    /// `true` if a configuration error disabled publishing for this pass.
    pub fn is_inert(&self) -> bool {
        matches!(self.state, PassState::Inert)
    }

    /// Publishes binaries linked from a rich-text fragment and returns the rewritten fragment.
    ///
    /// An inert pass returns the fragment untouched.
    pub fn rewrite_rich_text(&mut self, xhtml: &str) -> Result<String, PublishError> {
        match &mut self.state {
            PassState::Active(dispatcher) => {
                RichTextLinkRewriter::new(dispatcher, &self.external).rewrite(xhtml)
            }
            PassState::Inert => Ok(xhtml.to_string()),
        }
    }

    /// Publishes the binary of a structured multimedia field and sets its URL.
    pub fn publish_multimedia_field(
        &mut self,
        field: &mut MultimediaField,
    ) -> Result<(), PublishError> {
        match &mut self.state {
            PassState::Active(dispatcher) => {
                MultimediaFieldPublisher::new(dispatcher, &self.external).publish(field)
            }
            PassState::Inert => Ok(()),
        }
    }

    /// Publishes an item by identity and returns its reference path.
    pub fn publish_by_id(&mut self, id: &AssetId) -> Result<Option<String>, PublishError> {
        match &mut self.state {
            PassState::Active(dispatcher) => dispatcher.resolve(id),
            PassState::Inert => Ok(None),
        }
    }

    pub fn registry(&self) -> Option<&AssetRegistry> {
        match &self.state {
            PassState::Active(dispatcher) => Some(dispatcher.registry()),
            PassState::Inert => None,
        }
    }

    /// Ends the pass and hands back what was published.
    pub fn finish(self) -> AssetRegistry {
        match self.state {
            PassState::Active(dispatcher) => dispatcher.into_registry(),
            PassState::Inert => AssetRegistry::new(),
        }
    }

    /// A pass that publishes nothing because the target location `raw` is unusable.
    fn inert(raw: &str, reason: &str) -> Self {
        log::error!(
            "Target location '{}' is unusable: {}. Binary publishing is disabled for this pass.",
            raw,
            reason
        );
        PublishPass {
            state: PassState::Inert,
            external: ExternalAssetProcessor::disabled(),
        }
    }
}

/// A builder for [`PublishPass`].
pub struct PublishPassBuilder {
    store: Arc<dyn ObjectStore>,
    publisher: Arc<dyn Publisher>,
    context: RenderContext,
    config: PublishConfig,
    target_location: Option<String>,
    locations: Option<Arc<dyn LocationResolver>>,
    external: Option<Arc<dyn ExternalResolverFactory>>,
    naming: Box<dyn NamingStrategy>,
    reference_paths: Box<dyn ReferencePathStrategy>,
}

impl PublishPassBuilder {
    pub fn new(
        store: Arc<dyn ObjectStore>,
        publisher: Arc<dyn Publisher>,
        context: RenderContext,
    ) -> Self {
        Self {
            store,
            publisher,
            context,
            config: PublishConfig::default(),
            target_location: None,
            locations: None,
            external: None,
            naming: Box::new(FileNamer),
            reference_paths: Box::new(PublishedPath),
        }
    }

    pub fn with_config(mut self, config: PublishConfig) -> Self {
        self.config = config;
        self
    }

    /// Overrides the configured target location.
    pub fn with_target_location(mut self, uri: impl Into<String>) -> Self {
        self.target_location = Some(uri.into());
        self
    }

    /// Required whenever a well-formed target location is configured.
    pub fn with_location_resolver(mut self, resolver: Arc<dyn LocationResolver>) -> Self {
        self.locations = Some(resolver);
        self
    }

    /// Required whenever external-asset handling is enabled.
    pub fn with_external_resolver(mut self, factory: Arc<dyn ExternalResolverFactory>) -> Self {
        self.external = Some(factory);
        self
    }

    pub fn with_naming_strategy(mut self, naming: Box<dyn NamingStrategy>) -> Self {
        self.naming = naming;
        self
    }

    pub fn with_reference_paths(mut self, strategy: Box<dyn ReferencePathStrategy>) -> Self {
        self.reference_paths = strategy;
        self
    }

    /// Consumes the builder and creates the pass.
    ///
    /// A malformed or unresolvable target location does not fail the build:
    /// it is logged and the pass comes back inert.
    ///
    /// # Errors
    ///
    /// Returns `PublishError::Config` if a collaborator the configuration
    /// needs was not supplied: an external resolver when external handling is
    /// on, or a location resolver for a well-formed target location.
    pub fn build(self) -> Result<PublishPass, PublishError> {
        if self.config.external_assets_enabled && self.external.is_none() {
            return Err(PublishError::Config(
                "external asset handling is enabled but no external resolver was supplied"
                    .to_string(),
            ));
        }

        let target = self.target_location.or(self.config.target_location);
        let location = match target {
            None => None,
            Some(raw) => {
                let uri = match raw.trim().parse::<ItemUri>() {
                    Ok(uri) => uri.localize(self.context.publication_id),
                    Err(e) => return Ok(PublishPass::inert(&raw, &e.to_string())),
                };
                let locations = self.locations.ok_or_else(|| {
                    PublishError::Config(
                        "a target location is configured but no location resolver was supplied"
                            .to_string(),
                    )
                })?;
                match locations.resolve(uri) {
                    Ok(location) => Some(location),
                    Err(e) => return Ok(PublishPass::inert(&raw, &e.to_string())),
                }
            }
        };

        let external = match (self.config.external_assets_enabled, self.external) {
            (true, Some(factory)) => ExternalAssetProcessor::new(factory, location.clone()),
            _ => ExternalAssetProcessor::disabled(),
        };

        let placement: Box<dyn Placement> = match location {
            Some(location) => {
                log::info!(
                    "Publishing binaries to location {} ({})",
                    location.uri,
                    location.path
                );
                Box::new(TargetedPlacement::new(location, self.naming))
            }
            None => {
                log::info!(
                    "No target location configured, publishing binaries with default placement"
                );
                Box::new(DefaultPlacement)
            }
        };

        let dispatcher = BinaryPublishDispatcher::new(
            self.store,
            self.publisher,
            placement,
            self.reference_paths,
            self.context.variant,
        );
        Ok(PublishPass {
            state: PassState::Active(dispatcher),
            external,
        })
    }
}
