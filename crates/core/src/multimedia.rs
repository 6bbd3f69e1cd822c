use crate::dispatcher::BinaryPublishDispatcher;
use crate::error::PublishError;
use crate::external::ExternalAssetProcessor;
use binpub_types::MultimediaField;

/// Publishes the binary behind a structured multimedia field and sets its URL.
pub struct MultimediaFieldPublisher<'a> {
    dispatcher: &'a mut BinaryPublishDispatcher,
    external: &'a ExternalAssetProcessor,
}

impl<'a> MultimediaFieldPublisher<'a> {
    pub fn new(
        dispatcher: &'a mut BinaryPublishDispatcher,
        external: &'a ExternalAssetProcessor,
    ) -> Self {
        Self {
            dispatcher,
            external,
        }
    }

    /// Updates `field` in place.
    ///
    /// Fields without a multimedia payload are skipped with a warning. External
    /// stubs go to the external library once; a stub that already carries an
    /// external id is not touched again.
    pub fn publish(&mut self, field: &mut MultimediaField) -> Result<(), PublishError> {
        let Some(multimedia) = field.multimedia.as_ref() else {
            log::warn!("Multimedia publishing called with a non-multimedia item: {}", field.id);
            return Ok(());
        };

        if self.external.handles(&multimedia.mime_type) && field.external_id.is_none() {
            return self.external.process_stub(field);
        }
        if let Some(external_id) = &field.external_id {
            log::debug!(
                "External stub '{}' has already been processed (external id '{}')",
                field.id,
                external_id
            );
            return Ok(());
        }

        let url = self.dispatcher.resolve(&field.id)?;
        if let Some(multimedia) = field.multimedia.as_mut() {
            multimedia.url = url;
        }
        Ok(())
    }
}
