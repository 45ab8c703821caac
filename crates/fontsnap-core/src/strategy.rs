//! Naming-convention strategies: ordered rules mapping an AUR font package
//! name (`ttf-foo`) to a candidate upstream base name.
//!
//! Order matters. When several strategies would succeed for a package, the
//! first one in table order wins and later ones are never attempted.

/// When a strategy may be tried for a given package name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Eligibility {
    Always,
    /// Only when the source name contains this marker (e.g. "variable").
    RequiresMarker(&'static str),
}

impl Eligibility {
    pub fn allows(&self, package: &str) -> bool {
        match self {
            Eligibility::Always => true,
            Eligibility::RequiresMarker(marker) => package.contains(marker),
        }
    }
}

/// A named, pure transform from package name to candidate base name.
#[derive(Debug, Clone, Copy)]
pub struct Strategy {
    pub name: &'static str,
    pub transform: fn(&str) -> String,
    pub eligibility: Eligibility,
}

impl Strategy {
    const fn always(name: &'static str, transform: fn(&str) -> String) -> Self {
        Self {
            name,
            transform,
            eligibility: Eligibility::Always,
        }
    }

    const fn requires(
        marker: &'static str,
        name: &'static str,
        transform: fn(&str) -> String,
    ) -> Self {
        Self {
            name,
            transform,
            eligibility: Eligibility::RequiresMarker(marker),
        }
    }

    /// Candidate base name for `package`.
    pub fn candidate(&self, package: &str) -> String {
        (self.transform)(package)
    }

    pub fn is_eligible(&self, package: &str) -> bool {
        self.eligibility.allows(package)
    }
}

fn strip_ttf(name: &str) -> String {
    name.replace("ttf-", "")
}

const STANDARD: &[Strategy] = &[
    Strategy::always("plain", |n| n.to_string()),
    Strategy::always("font-postfix", |n| strip_ttf(n) + "-font"),
    Strategy::always("remove-ttf", strip_ttf),
    Strategy::always("otf-instead-ttf", |n| n.replace("ttf-", "otf-")),
    Strategy::always("font-prefix", |n| n.replace("ttf-", "font-")),
    Strategy::always("fonts-prefix", |n| n.replace("ttf-", "fonts-")),
    Strategy::always("font-git-postfix", |n| {
        strip_ttf(n).replace("-git", "-font-git")
    }),
    Strategy::always("fonts-git-postfix", |n| {
        strip_ttf(n).replace("-git", "-fonts-git")
    }),
    Strategy::requires("variable", "variable.font-postfix-remove-variable", |n| {
        strip_ttf(n).replace("-variable", "") + "-font"
    }),
    Strategy::requires("variable", "variable.remove-variable", |n| {
        strip_ttf(n).replace("-variable", "")
    }),
    Strategy::requires("variable", "variable.replace-variable-with-font", |n| {
        strip_ttf(n).replace("-variable", "-font")
    }),
    Strategy::requires("desktop", "desktop.font-postfix-remove-desktop", |n| {
        strip_ttf(n).replace("-desktop", "") + "-font"
    }),
    Strategy::requires("desktop", "desktop.remove-desktop", |n| {
        strip_ttf(n).replace("-desktop", "")
    }),
    Strategy::requires("desktop", "desktop.replace-desktop-with-font", |n| {
        strip_ttf(n).replace("-desktop", "-font")
    }),
];

/// Ordered strategy list. Iteration order is the tie-break between strategies.
#[derive(Debug, Clone)]
pub struct StrategyTable {
    strategies: Vec<Strategy>,
}

impl Default for StrategyTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl StrategyTable {
    /// The built-in table for AUR `ttf-*` packages.
    pub fn standard() -> Self {
        Self {
            strategies: STANDARD.to_vec(),
        }
    }

    pub fn new(strategies: Vec<Strategy>) -> Self {
        Self { strategies }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Strategy> {
        self.strategies.iter()
    }

    /// Strategies eligible for `package`, in table order.
    pub fn eligible<'a, 'p>(&'a self, package: &'p str) -> impl Iterator<Item = &'a Strategy> + 'p
    where
        'a: 'p,
    {
        self.strategies.iter().filter(move |s| s.is_eligible(package))
    }

    pub fn get(&self, name: &str) -> Option<&Strategy> {
        self.strategies.iter().find(|s| s.name == name)
    }

    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }
}
