mod common;

use binpub::traits::PublishCall;
use binpub::{AssetId, Multimedia, MultimediaField};
use common::fixtures::{attr_of, img, link, paragraph};
use common::{Host, TestResult, VARIANT};

#[test]
fn test_rich_text_field_and_direct_reference_publish_once() -> TestResult {
    let host = Host::new();
    let mut pass = host.default_pass();

    let xhtml = paragraph(&[img("tcm:1-42"), link("tcm:1-42", "logo"), img("tcm:1-42")]);
    pass.rewrite_rich_text(&xhtml)?;
    pass.rewrite_rich_text(&img("tcm:1-42"))?;

    let mut field =
        MultimediaField::new("tcm:1-42", Some(Multimedia::new("logo.png", "image/png")));
    pass.publish_multimedia_field(&mut field)?;
    let direct = pass.publish_by_id(&AssetId::from("tcm:1-42"))?;

    assert_eq!(host.publisher.count_for("tcm:1-42"), 1);
    assert_eq!(field.url(), Some("/binaries/logo.png"));
    assert_eq!(direct.as_deref(), Some("/binaries/logo.png"));
    assert_eq!(pass.registry().map(|r| r.len()), Some(1));
    Ok(())
}

#[test]
fn test_every_distinct_asset_is_published() -> TestResult {
    let host = Host::new();
    let mut pass = host.default_pass();

    pass.rewrite_rich_text(&paragraph(&[img("tcm:1-42"), link("tcm:1-43", "terms")]))?;
    pass.rewrite_rich_text(&paragraph(&[link("tcm:1-43", "terms again")]))?;

    let ids: Vec<String> = host
        .publisher
        .calls()
        .iter()
        .map(|c| c.id().to_string())
        .collect();
    assert_eq!(ids, vec!["tcm:1-42", "tcm:1-43"]);

    let registry = pass.finish();
    let order: Vec<&str> = registry.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(order, vec!["tcm:1-42", "tcm:1-43"]);
    Ok(())
}

#[test]
fn test_new_pass_starts_with_empty_registry() -> TestResult {
    let host = Host::new();

    let mut first = host.default_pass();
    first.publish_by_id(&AssetId::from("tcm:1-42"))?;
    let first = first.finish();

    let mut second = host.default_pass();
    assert_eq!(second.registry().map(|r| r.is_empty()), Some(true));
    second.publish_by_id(&AssetId::from("tcm:1-42"))?;

    assert_eq!(first.len(), 1);
    assert_eq!(host.publisher.count_for("tcm:1-42"), 2);
    Ok(())
}

#[test]
fn test_targeted_names_differ_per_variant() -> TestResult {
    let host = Host::new();

    let mut summary = host.targeted_pass(VARIANT);
    let mut detail = host.targeted_pass("tcm:1-100-32");
    let a = summary.publish_by_id(&AssetId::from("tcm:1-42"))?;
    let b = detail.publish_by_id(&AssetId::from("tcm:1-42"))?;

    assert_eq!(a.as_deref(), Some("/media/logo_1-42_1-99-32.png"));
    assert_eq!(b.as_deref(), Some("/media/logo_1-42_1-100-32.png"));

    let variants: Vec<String> = host
        .publisher
        .calls()
        .into_iter()
        .filter_map(|call| match call {
            PublishCall::Placed { variant, .. } => Some(variant.to_string()),
            PublishCall::Default { .. } => None,
        })
        .collect();
    assert_eq!(variants, vec!["tcm:1-99-32", "tcm:1-100-32"]);
    Ok(())
}

#[test]
fn test_unreadable_binary_is_tried_once() -> TestResult {
    let host = Host::new();
    let mut pass = host.targeted_pass(VARIANT);

    let first = pass.publish_by_id(&AssetId::from("tcm:1-50"))?;
    let second = pass.publish_by_id(&AssetId::from("tcm:1-50"))?;

    assert_eq!(first, None);
    assert_eq!(second, None);
    assert!(host.publisher.calls().is_empty());
    assert_eq!(host.store.open_streams(), 0);

    let registry = pass.finish();
    let entry = registry.get(&AssetId::from("tcm:1-50")).ok_or("entry recorded")?;
    assert_eq!(entry.resolved_path, None);
    Ok(())
}

#[test]
fn test_unreadable_binary_under_default_placement_does_not_abort_the_pass() -> TestResult {
    let host = Host::new();
    let mut pass = host.default_pass();

    let xhtml = paragraph(&[img("tcm:1-42"), img("tcm:1-50"), img("tcm:1-50")]);
    let out = pass.rewrite_rich_text(&xhtml)?;

    assert_eq!(attr_of(&out, "img", 0, "src").as_deref(), Some("/binaries/logo.png"));
    assert_eq!(attr_of(&out, "img", 1, "src").as_deref(), Some(""));
    assert_eq!(attr_of(&out, "img", 2, "src").as_deref(), Some(""));
    assert_eq!(
        host.publisher.calls(),
        vec![PublishCall::Default { id: AssetId::from("tcm:1-42") }]
    );

    let registry = pass.finish();
    let entry = registry.get(&AssetId::from("tcm:1-50")).ok_or("entry recorded")?;
    assert_eq!(entry.resolved_path, None);
    assert_eq!(host.store.open_streams(), 0);
    Ok(())
}
