//! Fix explanations for the `ngstep explain` and `ngstep list-fixes` commands.

use ngstep_types::{FixKind, FixTarget};

/// Information about one fix target.
#[derive(Debug, Clone)]
pub struct FixExplanation {
    pub target: FixTarget,
    /// Human-readable title.
    pub title: &'static str,
    /// What the fix does, or what the finding means when there is no rewrite.
    pub description: &'static str,
    /// What to do by hand.
    pub remediation: &'static str,
}

impl FixExplanation {
    pub fn key(&self) -> &'static str {
        self.target.as_str()
    }

    pub fn kind(&self) -> FixKind {
        self.target.kind()
    }
}

/// Registry of all fix explanations, in [`FixTarget::ALL`] order.
pub static FIX_REGISTRY: &[FixExplanation] = &[
    FixExplanation {
        target: FixTarget::ForceIvyFix,
        title: "Force Ivy",
        description: r#"Removes `"enableIvy": false` from `angularCompilerOptions` in
tsconfig.json, tsconfig.app.json and angular.json, at any nesting depth.

ViewEngine was removed in Angular 13; keeping the flag makes the build fail.
Files that are not valid JSON are edited textually: the entry is removed
together with one adjacent comma."#,
        remediation: "Delete every `enableIvy: false` entry and rebuild. Libraries that \
still ship ViewEngine metadata must be upgraded to Ivy-compatible versions.",
    },
    FixExplanation {
        target: FixTarget::HttpModuleFix,
        title: "HttpModule to HttpClientModule",
        description: r#"Rewrites every `*.module.ts` that uses `HttpModule`:
- drops `HttpModule` from its `@angular/http` import
- drops it from the `@NgModule` `imports` array
- imports `HttpClientModule` from `@angular/common/http` and adds it to
  `imports`, unless it is already there

Running the fix twice leaves exactly one `HttpClientModule`."#,
        remediation: "Replace `Http` injections with `HttpClient`. Response bodies are \
parsed as JSON by default, so `.json()` calls on responses must go.",
    },
    FixExplanation {
        target: FixTarget::EntryComponentsFix,
        title: "Remove entryComponents",
        description: r#"Removes the `entryComponents` property from `@NgModule` and
`@Component` metadata in every TypeScript file.

Ivy compiles every component on demand, so the list is ignored and was
removed from the metadata types."#,
        remediation: "Delete `entryComponents` arrays. Dynamic components need no \
registration with Ivy.",
    },
    FixExplanation {
        target: FixTarget::Ie11BrowserslistCleanup,
        title: "Drop IE 11 from browserslist",
        description: r#"Removes IE 11 queries (`IE 11`, `ie >= 11`, ...) from
.browserslistrc, browserslist and the `browserslist` field of package.json.

Angular 13 no longer supports Internet Explorer."#,
        remediation: "Remove IE 11 entries and any IE-only polyfills from polyfills.ts.",
    },
    FixExplanation {
        target: FixTarget::TsTargetModernize,
        title: "Modernize TypeScript target",
        description: r#"Changes `compilerOptions.target` from "es5" to "es2015" in
tsconfig.json and tsconfig.app.json."#,
        remediation: "Set `target` to es2015 or later. The CLI emits modern bundles and \
down-levels through browserslist.",
    },
    FixExplanation {
        target: FixTarget::CommonJsUsageReview,
        title: "CommonJS usage review",
        description: r#"Prints review guidance for `require()` calls. No files are
changed."#,
        remediation: "Convert `require()` calls to ES `import` statements so the build \
can tree-shake them.",
    },
    FixExplanation {
        target: FixTarget::AnimationModuleFix,
        title: "AnimationModule to provideAnimations",
        description: r#"Replaces `AnimationModule.forRoot(...)` calls with
`provideAnimations()`, imports `provideAnimations` from
`@angular/platform-browser/animations`, and drops the `AnimationModule`
import once nothing references it."#,
        remediation: "Register animations with `provideAnimations()` in the application \
providers.",
    },
    FixExplanation {
        target: FixTarget::RxjsCompatRemovalFix,
        title: "Remove rxjs-compat",
        description: r#"Removes `rxjs-compat` from package.json dependencies and
devDependencies and deletes side-effect imports of `rxjs-compat` from
TypeScript files."#,
        remediation: "Rewrite RxJS 5 style imports (`rxjs/add/operator/*`) to pipeable \
operators imported from `rxjs`.",
    },
    FixExplanation {
        target: FixTarget::ModuleWithProvidersGenericFix,
        title: "Type ModuleWithProviders",
        description: r#"Adds a type argument to bare `ModuleWithProviders` annotations,
using the first class declared in the file (or `unknown` when there is
none)."#,
        remediation: "Write `ModuleWithProviders<YourModule>` for every `forRoot` and \
`forChild` return type.",
    },
    FixExplanation {
        target: FixTarget::Typescript56Upgrade,
        title: "Upgrade TypeScript",
        description: r#"Sets the declared `typescript` range in package.json to ^5.6.0
when it allows versions below 5.6. Ranges that cannot be parsed are left
alone."#,
        remediation: "Install TypeScript 5.6 or later and reinstall dependencies.",
    },
    FixExplanation {
        target: FixTarget::ProtractorBuilderReview,
        title: "Protractor builder review",
        description: r#"Prints guidance about the removed Protractor builder. No files
are changed."#,
        remediation: "Move e2e tests to a supported runner and remove the protractor \
target from angular.json.",
    },
    FixExplanation {
        target: FixTarget::RendererFix,
        title: "Renderer usage",
        description: "Flags the deprecated `Renderer` API. There is no automatic rewrite.",
        remediation: "Use `Renderer2` instead of `Renderer`.",
    },
    FixExplanation {
        target: FixTarget::WebpackConfigReview,
        title: "Custom webpack config",
        description: "Flags custom webpack configuration that may break with the new \
build pipeline. There is no automatic rewrite.",
        remediation: "Check custom webpack builders against the webpack 5 migration \
guide.",
    },
    FixExplanation {
        target: FixTarget::CvaSignatureReview,
        title: "ControlValueAccessor signatures",
        description: "Flags `ControlValueAccessor` implementations whose method \
signatures changed with stricter forms typing. There is no automatic rewrite.",
        remediation: "Align `writeValue`, `registerOnChange` and `registerOnTouched` \
with the current interface.",
    },
    FixExplanation {
        target: FixTarget::I18nIdReview,
        title: "i18n message ids",
        description: "Flags i18n usage whose legacy message ids may change. There is no \
automatic rewrite.",
        remediation: "Run `ng extract-i18n` and migrate legacy message ids.",
    },
    FixExplanation {
        target: FixTarget::AnimationModuleReview,
        title: "Animations setup review",
        description: "Flags animation module setup worth reviewing. There is no \
automatic rewrite.",
        remediation: "Prefer `provideAnimations()` or `provideAnimationsAsync()`.",
    },
    FixExplanation {
        target: FixTarget::RouterStrictOptionsReview,
        title: "RouterModule.forRoot options",
        description: "Flags `RouterModule.forRoot` calls whose options were removed or \
tightened. There is no automatic rewrite.",
        remediation: "Remove deprecated router options such as `relativeLinkResolution`.",
    },
    FixExplanation {
        target: FixTarget::RxjsCompatRemovalReview,
        title: "rxjs-compat review",
        description: "Flags `rxjs-compat` usage ahead of RxJS 7. There is no automatic \
rewrite at this step.",
        remediation: "Move to pipeable operators, then remove `rxjs-compat`.",
    },
    FixExplanation {
        target: FixTarget::ModuleWithProvidersGenericReview,
        title: "ModuleWithProviders review",
        description: "Flags bare `ModuleWithProviders` annotations. There is no \
automatic rewrite at this step.",
        remediation: "Add the module type argument: `ModuleWithProviders<T>`.",
    },
];

fn normalize(key: &str) -> String {
    key.chars()
        .filter(|c| *c != '-' && *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}

/// Look up a fix by name, ignoring case, dashes and underscores.
pub fn lookup_fix(query: &str) -> Option<&'static FixExplanation> {
    let wanted = normalize(query);
    FIX_REGISTRY.iter().find(|fix| normalize(fix.key()) == wanted)
}

/// List all available fix keys.
pub fn list_fix_keys() -> Vec<&'static str> {
    FIX_REGISTRY.iter().map(FixExplanation::key).collect()
}

pub fn format_kind(kind: FixKind) -> &'static str {
    match kind {
        FixKind::Counting => "Rewrite",
        FixKind::ReviewOnly => "Review",
        FixKind::Informational => "Info",
    }
}

/// Get a description of what a fix kind means.
pub fn kind_meaning(kind: FixKind) -> &'static str {
    match kind {
        FixKind::Counting => {
            "REWRITE fixes edit project files when `ngstep migrate --fix` runs.\n\
             Changed files count toward the step's applied fixes."
        }
        FixKind::ReviewOnly => {
            "REVIEW fixes print guidance when fixes run. They never change files."
        }
        FixKind::Informational => {
            "INFO targets mark findings with no automatic rewrite.\n\
             The fix log reports them as having no handler."
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_key() {
        let fix = lookup_fix("httpModuleFix").expect("should find");
        assert_eq!(fix.target, FixTarget::HttpModuleFix);
    }

    #[test]
    fn test_lookup_ignores_case_and_separators() {
        assert!(lookup_fix("HTTPMODULEFIX").is_some());
        assert!(lookup_fix("http-module-fix").is_some());
        assert!(lookup_fix("ts_target_modernize").is_some());
        assert!(lookup_fix("nope").is_none());
    }

    #[test]
    fn test_all_fixes_registered() {
        let registered: Vec<FixTarget> = FIX_REGISTRY.iter().map(|f| f.target).collect();
        assert_eq!(registered, FixTarget::ALL);
    }
}
