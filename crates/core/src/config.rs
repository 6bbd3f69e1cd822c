use binpub_types::VariantId;
use serde::Deserialize;
use std::collections::HashMap;

/// Template parameter naming the target location for published binaries.
pub const TARGET_LOCATION_PARAM: &str = "publish_binaries_target_location";

/// Template parameter switching external-asset handling on.
pub const EXTERNAL_ASSETS_PARAM: &str = "external_assets_enabled";

/// Build-time configuration snapshot for one rendering pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PublishConfig {
    /// Item URI of the location binaries are placed in.
    ///
    /// When absent the host decides placement and no variant is passed.
    pub target_location: Option<String>,
    /// Delegate externally managed stubs to the external content library.
    pub external_assets_enabled: bool,
}

impl PublishConfig {
    /// Reads the configuration from template parameters.
    ///
    /// A blank target location counts as absent. The external flag is true only for
    /// a case-insensitive `"true"`.
    pub fn from_parameters(parameters: &HashMap<String, String>) -> Self {
        let target_location = parameters
            .get(TARGET_LOCATION_PARAM)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .map(str::to_string);
        let external_assets_enabled = parameters
            .get(EXTERNAL_ASSETS_PARAM)
            .is_some_and(|v| v.trim().eq_ignore_ascii_case("true"));

        Self {
            target_location,
            external_assets_enabled,
        }
    }
}

/// Facts about the item being rendered that stay fixed for the whole pass.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderContext {
    /// The active template; disambiguates published file names.
    pub variant: VariantId,
    /// Publication the pass renders for; target locations are localized to it.
    pub publication_id: u32,
}

impl RenderContext {
    pub fn new(variant: impl Into<VariantId>, publication_id: u32) -> Self {
        Self {
            variant: variant.into(),
            publication_id,
        }
    }
}
