use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Symbolic name of a class of remediation requested by a scan.
///
/// The set is closed: the dispatcher matches on it exhaustively, so adding a
/// variant forces a decision about its handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FixTarget {
    ForceIvyFix,
    HttpModuleFix,
    EntryComponentsFix,
    Ie11BrowserslistCleanup,
    TsTargetModernize,
    CommonJsUsageReview,
    AnimationModuleFix,
    RxjsCompatRemovalFix,
    ModuleWithProvidersGenericFix,
    Typescript56Upgrade,
    ProtractorBuilderReview,
    RendererFix,
    WebpackConfigReview,
    CvaSignatureReview,
    I18nIdReview,
    AnimationModuleReview,
    RouterStrictOptionsReview,
    RxjsCompatRemovalReview,
    ModuleWithProvidersGenericReview,
}

/// How a fix target is handled when fixes are enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FixKind {
    /// Mutates files and reports how many changed.
    Counting,
    /// Prints guidance only.
    ReviewOnly,
    /// Flags a pattern with no automatic rewrite and no handler.
    Informational,
}

impl FixTarget {
    pub const ALL: &'static [FixTarget] = &[
        FixTarget::ForceIvyFix,
        FixTarget::HttpModuleFix,
        FixTarget::EntryComponentsFix,
        FixTarget::Ie11BrowserslistCleanup,
        FixTarget::TsTargetModernize,
        FixTarget::CommonJsUsageReview,
        FixTarget::AnimationModuleFix,
        FixTarget::RxjsCompatRemovalFix,
        FixTarget::ModuleWithProvidersGenericFix,
        FixTarget::Typescript56Upgrade,
        FixTarget::ProtractorBuilderReview,
        FixTarget::RendererFix,
        FixTarget::WebpackConfigReview,
        FixTarget::CvaSignatureReview,
        FixTarget::I18nIdReview,
        FixTarget::AnimationModuleReview,
        FixTarget::RouterStrictOptionsReview,
        FixTarget::RxjsCompatRemovalReview,
        FixTarget::ModuleWithProvidersGenericReview,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FixTarget::ForceIvyFix => "forceIvyFix",
            FixTarget::HttpModuleFix => "httpModuleFix",
            FixTarget::EntryComponentsFix => "entryComponentsFix",
            FixTarget::Ie11BrowserslistCleanup => "ie11BrowserslistCleanup",
            FixTarget::TsTargetModernize => "tsTargetModernize",
            FixTarget::CommonJsUsageReview => "commonJsUsageReview",
            FixTarget::AnimationModuleFix => "animationModuleFix",
            FixTarget::RxjsCompatRemovalFix => "rxjsCompatRemovalFix",
            FixTarget::ModuleWithProvidersGenericFix => "moduleWithProvidersGenericFix",
            FixTarget::Typescript56Upgrade => "typescript56Upgrade",
            FixTarget::ProtractorBuilderReview => "protractorBuilderReview",
            FixTarget::RendererFix => "rendererFix",
            FixTarget::WebpackConfigReview => "webpackConfigReview",
            FixTarget::CvaSignatureReview => "cvaSignatureReview",
            FixTarget::I18nIdReview => "i18nIdReview",
            FixTarget::AnimationModuleReview => "animationModuleReview",
            FixTarget::RouterStrictOptionsReview => "routerStrictOptionsReview",
            FixTarget::RxjsCompatRemovalReview => "rxjsCompatRemovalReview",
            FixTarget::ModuleWithProvidersGenericReview => "moduleWithProvidersGenericReview",
        }
    }

    pub fn kind(&self) -> FixKind {
        match self {
            FixTarget::ForceIvyFix
            | FixTarget::HttpModuleFix
            | FixTarget::EntryComponentsFix
            | FixTarget::Ie11BrowserslistCleanup
            | FixTarget::TsTargetModernize
            | FixTarget::AnimationModuleFix
            | FixTarget::RxjsCompatRemovalFix
            | FixTarget::ModuleWithProvidersGenericFix
            | FixTarget::Typescript56Upgrade => FixKind::Counting,
            FixTarget::CommonJsUsageReview | FixTarget::ProtractorBuilderReview => {
                FixKind::ReviewOnly
            }
            FixTarget::RendererFix
            | FixTarget::WebpackConfigReview
            | FixTarget::CvaSignatureReview
            | FixTarget::I18nIdReview
            | FixTarget::AnimationModuleReview
            | FixTarget::RouterStrictOptionsReview
            | FixTarget::RxjsCompatRemovalReview
            | FixTarget::ModuleWithProvidersGenericReview => FixKind::Informational,
        }
    }
}

impl fmt::Display for FixTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown fix target '{0}'")]
pub struct UnknownFixTarget(pub String);

impl FromStr for FixTarget {
    type Err = UnknownFixTarget;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FixTarget::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownFixTarget(s.to_string()))
    }
}
