#![allow(dead_code)]

pub mod fixtures;

use binpub::core::PublishPassBuilder;
use binpub::traits::{
    InMemoryExternalResolver, InMemoryObjectStore, RecordingPublisher, StaticLocationResolver,
};
use binpub::types::{AssetReference, EXTERNAL_MIME_TYPE, ItemUri};
use binpub::{PublishPass, RenderContext};
use std::sync::Arc;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

pub const MEDIA_LOCATION: &str = "tcm:1-5-4";
pub const VARIANT: &str = "tcm:1-99-32";

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// An in-memory host seeded with a small, fixed set of items.
///
/// | id        | item                                   |
/// |-----------|----------------------------------------|
/// | tcm:1-42  | logo.png, readable                     |
/// | tcm:1-43  | docs/terms.pdf, readable               |
/// | tcm:1-50  | photo.jpg, binary cannot be read       |
/// | tcm:1-77  | external stub, readable                |
/// | tcm:1-10  | plain component without a binary       |
pub struct Host {
    pub store: Arc<InMemoryObjectStore>,
    pub publisher: Arc<RecordingPublisher>,
    pub locations: Arc<StaticLocationResolver>,
    pub library: Arc<InMemoryExternalResolver>,
}

impl Host {
    pub fn new() -> Self {
        init_logging();
        let store = Arc::new(InMemoryObjectStore::new());
        let seed = [
            (
                AssetReference::new("tcm:1-42").with_binary("logo.png", "image/png"),
                Some(b"PNG".to_vec()),
            ),
            (
                AssetReference::new("tcm:1-43").with_binary("docs/terms.pdf", "application/pdf"),
                Some(b"PDF".to_vec()),
            ),
            (
                AssetReference::new("tcm:1-50").with_binary("photo.jpg", "image/jpeg"),
                None,
            ),
            (
                AssetReference::new("tcm:1-77").with_binary("clip.ecl", EXTERNAL_MIME_TYPE),
                Some(b"ECL stub".to_vec()),
            ),
            (AssetReference::new("tcm:1-10"), None),
        ];
        for (reference, data) in seed {
            store.add(reference, data).expect("seed store");
        }

        let media: ItemUri = MEDIA_LOCATION.parse().expect("valid uri");
        Self {
            store,
            publisher: Arc::new(RecordingPublisher::default()),
            locations: Arc::new(StaticLocationResolver::new().with_location(media, "/media")),
            library: Arc::new(InMemoryExternalResolver::new("https://ecl.example")),
        }
    }

    /// A builder for publication 1 with every collaborator of this host attached.
    pub fn builder(&self, variant: &str) -> PublishPassBuilder {
        PublishPass::builder(
            self.store.clone(),
            self.publisher.clone(),
            RenderContext::new(variant, 1),
        )
        .with_location_resolver(self.locations.clone())
        .with_external_resolver(self.library.clone())
    }

    pub fn default_pass(&self) -> PublishPass {
        self.builder(VARIANT).build().expect("default pass builds")
    }

    pub fn targeted_pass(&self, variant: &str) -> PublishPass {
        self.builder(variant)
            .with_target_location(MEDIA_LOCATION)
            .build()
            .expect("targeted pass builds")
    }

    pub fn external_pass(&self) -> PublishPass {
        self.builder(VARIANT)
            .with_config(binpub::PublishConfig {
                target_location: None,
                external_assets_enabled: true,
            })
            .build()
            .expect("external pass builds")
    }
}
