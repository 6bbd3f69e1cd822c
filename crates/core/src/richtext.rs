//! Rewriting of asset links embedded in rich text.
//!
//! Rich text arrives as XHTML that is well-formed but not guaranteed to have a
//! single root, so it is parsed inside a synthetic wrapper that is dropped
//! again on output. Elements are streamed through unchanged except those
//! carrying an `xlink:href` to a multimedia item: those get a `src` (images)
//! or `href` (everything else) pointing at the published binary. The
//! `xlink:href` itself stays, so the item identity survives for later
//! processing.

use crate::dispatcher::BinaryPublishDispatcher;
use crate::error::PublishError;
use crate::external::ExternalAssetProcessor;
use binpub_types::{ASSET_URI_SCHEME, AssetId, LinkElement, XLINK_NAMESPACE};
use quick_xml::events::{BytesStart, Event as XmlEvent};
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::{NsReader, Writer};

const WRAPPER_ELEMENT: &str = "binpub-fragment";

pub struct RichTextLinkRewriter<'a> {
    dispatcher: &'a mut BinaryPublishDispatcher,
    external: &'a ExternalAssetProcessor,
}

impl<'a> RichTextLinkRewriter<'a> {
    pub fn new(
        dispatcher: &'a mut BinaryPublishDispatcher,
        external: &'a ExternalAssetProcessor,
    ) -> Self {
        Self {
            dispatcher,
            external,
        }
    }

    /// Publishes every multimedia item linked from `xhtml` and returns the rewritten markup.
    ///
    /// # Errors
    ///
    /// Fails if the fragment is not well-formed or a host call fails.
    pub fn rewrite(&mut self, xhtml: &str) -> Result<String, PublishError> {
        // The wrapper declares the XLink prefix so fragments that forgot to still resolve.
        let wrapped = format!(
            "<{WRAPPER_ELEMENT} xmlns:xlink=\"{XLINK_NAMESPACE}\">{xhtml}</{WRAPPER_ELEMENT}>"
        );
        let mut reader = NsReader::from_str(&wrapped);
        reader.config_mut().trim_text(false);
        let mut writer = Writer::new(Vec::new());
        let mut depth = 0usize;

        loop {
            match reader.read_event()? {
                XmlEvent::Start(e) => {
                    depth += 1;
                    if depth == 1 {
                        continue;
                    }
                    let e = self.rewrite_element(&reader, e)?;
                    writer.write_event(XmlEvent::Start(e))?;
                }
                XmlEvent::Empty(e) => {
                    let e = self.rewrite_element(&reader, e)?;
                    writer.write_event(XmlEvent::Empty(e))?;
                }
                XmlEvent::End(e) => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        continue;
                    }
                    writer.write_event(XmlEvent::End(e))?;
                }
                XmlEvent::Eof => break,
                event => writer.write_event(event)?,
            }
        }

        Ok(String::from_utf8(writer.into_inner())?)
    }

    /// Returns the element unchanged unless it links to a multimedia item.
    fn rewrite_element<'i>(
        &mut self,
        reader: &NsReader<&[u8]>,
        start: BytesStart<'i>,
    ) -> Result<BytesStart<'i>, PublishError> {
        let Some(xlink_href) = xlink_href(reader, &start)? else {
            return Ok(start);
        };

        let mut attributes = Vec::new();
        for attr in start.attributes() {
            let attr = attr?;
            let key = std::str::from_utf8(attr.key.as_ref())?.to_string();
            let value = attr.decode_and_unescape_value(reader.decoder())?.into_owned();
            attributes.push((key, value));
        }
        let mut element = LinkElement {
            local_name: std::str::from_utf8(start.local_name().as_ref())?.to_string(),
            xlink_href,
            attributes,
        };
        log::debug!(
            "Found XLink in rich text: <{} xlink:href=\"{}\">",
            element.local_name,
            element.xlink_href
        );

        if !self.resolve_link(&mut element)? {
            return Ok(start);
        }

        let name = std::str::from_utf8(start.name().as_ref())?.to_string();
        let mut rewritten = BytesStart::new(name);
        for (key, value) in &element.attributes {
            rewritten.push_attribute((key.as_str(), value.as_str()));
        }
        Ok(rewritten)
    }

    /// Resolves the link target and writes it to the element. Returns `false` if nothing changed.
    fn resolve_link(&mut self, element: &mut LinkElement) -> Result<bool, PublishError> {
        if element.xlink_href.is_empty() {
            log::warn!("No xlink:href value found on <{}>", element.local_name);
            return Ok(false);
        }
        if !element.xlink_href.starts_with(ASSET_URI_SCHEME) {
            return Ok(false);
        }

        let id = AssetId::from(element.xlink_href.as_str());
        // Links to anything but a multimedia item are not ours to touch.
        let Some(reference) = self.dispatcher.store().get(&id)? else {
            return Ok(false);
        };
        let Some(binary) = reference.binary.as_ref() else {
            return Ok(false);
        };
        log::debug!("Processing XLink to multimedia item '{}'", reference.id);

        let url = if self.external.handles(&binary.mime_type) {
            self.external.process_link(element)?
        } else {
            self.dispatcher.resolve(&reference.id)?.unwrap_or_default()
        };

        let target = element.target_attribute();
        element.set(target, url.as_str());
        log::debug!(
            "XLink to multimedia item '{}' resolved: {}=\"{}\"",
            reference.id,
            target,
            url
        );
        Ok(true)
    }
}

/// Value of the element's `href` attribute in the XLink namespace, if any.
fn xlink_href(
    reader: &NsReader<&[u8]>,
    start: &BytesStart<'_>,
) -> Result<Option<String>, PublishError> {
    for attr in start.attributes() {
        let attr = attr?;
        let (ns, local) = reader.resolve_attribute(attr.key);
        let is_xlink = matches!(
            ns,
            ResolveResult::Bound(Namespace(uri)) if uri == XLINK_NAMESPACE.as_bytes()
        );
        if is_xlink && local.as_ref() == b"href" {
            return Ok(Some(
                attr.decode_and_unescape_value(reader.decoder())?
                    .into_owned(),
            ));
        }
    }
    Ok(None)
}
