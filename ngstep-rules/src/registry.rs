use crate::ports::RepoView;
use crate::rules;
use ngstep_types::{Finding, ScanResult, VersionTransition};
use std::collections::BTreeMap;
use tracing::debug;

pub trait Rule {
    /// Short name for logs, e.g. `angular-12-to-13`.
    fn name(&self) -> String;

    /// Inspect the current state of the project.
    fn scan(&self, repo: &dyn RepoView) -> anyhow::Result<ScanResult>;
}

type RuleFactory = Box<dyn Fn() -> Box<dyn Rule>>;

/// Static mapping from a version step to the rule that scans it.
///
/// Rules are constructed on every [`resolve`](RuleRegistry::resolve) call
/// and never cached: a step scanned again after fixes must see the new tree.
#[derive(Default)]
pub struct RuleRegistry {
    rules: BTreeMap<VersionTransition, RuleFactory>,
}

impl RuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in Angular rule.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(VersionTransition::new(10), || Box::new(rules::Angular10To11));
        registry.register(VersionTransition::new(11), || Box::new(rules::Angular11To12));
        registry.register(VersionTransition::new(12), || Box::new(rules::Angular12To13));
        registry.register(VersionTransition::new(13), || Box::new(rules::Angular13To14));
        registry.register(VersionTransition::new(14), || Box::new(rules::Angular14To15));
        registry.register(VersionTransition::new(15), || Box::new(rules::Angular15To16));
        registry.register(VersionTransition::new(16), || Box::new(rules::Angular16To17));
        registry.register(VersionTransition::new(17), || Box::new(rules::Angular17To18));
        registry.register(VersionTransition::new(18), || Box::new(rules::Angular18To19));
        registry
    }

    /// Register (or replace) the rule for `transition`.
    pub fn register<F>(&mut self, transition: VersionTransition, factory: F)
    where
        F: Fn() -> Box<dyn Rule> + 'static,
    {
        self.rules.insert(transition, Box::new(factory));
    }

    /// The rule for `from → to`, or a [`FallbackRule`] when none is registered.
    pub fn resolve(&self, from: u32, to: u32) -> Box<dyn Rule> {
        let registered = (to.checked_sub(1) == Some(from))
            .then(|| self.rules.get(&VersionTransition::new(from)))
            .flatten();
        match registered {
            Some(factory) => factory(),
            None => {
                debug!(from, to, "no rule registered, using fallback");
                Box::new(FallbackRule { from, to })
            }
        }
    }

    pub fn transitions(&self) -> impl Iterator<Item = VersionTransition> + '_ {
        self.rules.keys().copied()
    }
}

/// Stand-in for steps without a rule: reports that nothing was scanned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FallbackRule {
    pub from: u32,
    pub to: u32,
}

impl Rule for FallbackRule {
    fn name(&self) -> String {
        format!("fallback-{}-to-{}", self.from, self.to)
    }

    fn scan(&self, _repo: &dyn RepoView) -> anyhow::Result<ScanResult> {
        let mut out = ScanResult::new();
        out.push(Finding::note(format!(
            "⚠ No rule defined for migration {} → {}.",
            self.from, self.to
        )));
        out.push(Finding::note("⚠ No scanning performed."));
        Ok(out)
    }
}
