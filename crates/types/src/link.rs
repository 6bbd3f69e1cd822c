/// An element from a rich-text fragment that carries an asset link.
///
/// Attributes are kept in document order with their qualified names and
/// unescaped values. External resolvers receive the element mutably and may
/// add or change attributes before it is written back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkElement {
    pub local_name: String,
    /// Value of the namespaced `xlink:href` attribute.
    pub xlink_href: String,
    pub attributes: Vec<(String, String)>,
}

impl LinkElement {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Sets `name`, replacing an existing value in place or appending.
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.attributes.iter_mut().find(|(k, _)| k == name) {
            Some((_, v)) => *v = value,
            None => self.attributes.push((name.to_string(), value)),
        }
    }

    /// The plain attribute that receives the resolved path: `src` on images, `href` elsewhere.
    pub fn target_attribute(&self) -> &'static str {
        if self.local_name == "img" { "src" } else { "href" }
    }
}
