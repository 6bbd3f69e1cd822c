pub const XLINK_NS: &str = "http://www.w3.org/1999/xlink";

/// `<img>` linking to `id`.
pub fn img(id: &str) -> String {
    format!(r#"<img xlink:href="{}" xmlns:xlink="{}" alt="image"/>"#, id, XLINK_NS)
}

/// `<a>` linking to `id`.
pub fn link(id: &str, text: &str) -> String {
    format!(r#"<a xlink:href="{}" xmlns:xlink="{}">{}</a>"#, id, XLINK_NS, text)
}

pub fn paragraph(children: &[String]) -> String {
    format!("<p>{}</p>", children.concat())
}

/// Value of the plain (un-namespaced) attribute `attr` on the `nth` element
/// named `tag` in a rewritten fragment.
pub fn attr_of(xhtml: &str, tag: &str, nth: usize, attr: &str) -> Option<String> {
    let wrapped = format!("<root>{}</root>", xhtml);
    let doc = roxmltree::Document::parse(&wrapped).ok()?;
    let value = doc
        .descendants()
        .filter(|n| n.has_tag_name(tag))
        .nth(nth)?
        .attributes()
        .find(|a| a.namespace().is_none() && a.name() == attr)
        .map(|a| a.value().to_string());
    value
}

/// Value of `xlink:href` on the `nth` element named `tag` in a rewritten fragment.
pub fn xlink_of(xhtml: &str, tag: &str, nth: usize) -> Option<String> {
    let wrapped = format!("<root>{}</root>", xhtml);
    let doc = roxmltree::Document::parse(&wrapped).ok()?;
    let value = doc
        .descendants()
        .filter(|n| n.has_tag_name(tag))
        .nth(nth)?
        .attribute((XLINK_NS, "href"))
        .map(str::to_string);
    value
}

/// Number of elements named `tag` in a rewritten fragment.
pub fn count_of(xhtml: &str, tag: &str) -> usize {
    let wrapped = format!("<root>{}</root>", xhtml);
    roxmltree::Document::parse(&wrapped)
        .map(|doc| doc.descendants().filter(|n| n.has_tag_name(tag)).count())
        .unwrap_or(0)
}
