//! Thread tags and the attributes that carry them.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::UnknownTagError;

/// The logical execution context a declaration is constrained to run on.
///
/// Tags carry no ordering of their own. Every compatibility question goes
/// through the lattice predicates in `affinity-analysis`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ThreadTag {
    /// The platform UI event thread only.
    UiEventThread,
    /// The UI event thread, or the loader thread that builds UI before it is shown.
    UiLoaderOrEventThread,
    /// A second, independent UI toolkit thread.
    SecondaryUiThread,
    /// The simulation thread.
    SimulationThread,
    /// Any background worker.
    Worker,
    /// The debugger VM event handler thread.
    VmEventHandler,
    /// Anything except the VM event handler thread.
    NotVmEventHandler,
    /// Safe on any thread.
    Any,
}

impl ThreadTag {
    pub const ALL: [ThreadTag; 8] = [
        ThreadTag::UiEventThread,
        ThreadTag::UiLoaderOrEventThread,
        ThreadTag::SecondaryUiThread,
        ThreadTag::SimulationThread,
        ThreadTag::Worker,
        ThreadTag::VmEventHandler,
        ThreadTag::NotVmEventHandler,
        ThreadTag::Any,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::UiEventThread => "UiEventThread",
            Self::UiLoaderOrEventThread => "UiLoaderOrEventThread",
            Self::SecondaryUiThread => "SecondaryUiThread",
            Self::SimulationThread => "SimulationThread",
            Self::Worker => "Worker",
            Self::VmEventHandler => "VmEventHandler",
            Self::NotVmEventHandler => "NotVmEventHandler",
            Self::Any => "Any",
        }
    }
}

impl fmt::Display for ThreadTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ThreadTag {
    type Err = UnknownTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        ThreadTag::ALL
            .iter()
            .copied()
            .find(|t| t.name() == trimmed)
            .ok_or_else(|| UnknownTagError(trimmed.to_string()))
    }
}

/// Parsed content of one thread-tag marker on a declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TagAttribute {
    pub tag: ThreadTag,
    #[serde(default)]
    pub ignore_parent: bool,
    #[serde(default)]
    pub require_synchronized: bool,
    /// Only set by the library tag table; host markers never carry it.
    #[serde(skip)]
    pub applies_to_all_subclass_methods: bool,
}

impl TagAttribute {
    pub fn new(tag: ThreadTag) -> Self {
        Self {
            tag,
            ignore_parent: false,
            require_synchronized: false,
            applies_to_all_subclass_methods: false,
        }
    }

    pub fn with_ignore_parent(mut self) -> Self {
        self.ignore_parent = true;
        self
    }

    pub fn with_require_synchronized(mut self) -> Self {
        self.require_synchronized = true;
        self
    }

    /// Internal constructor path used for library tags that apply to every
    /// same-signature method of every subclass.
    pub fn applying_to_subclasses(mut self) -> Self {
        self.applies_to_all_subclass_methods = true;
        self
    }

    /// Fold a repeated marker naming the same tag: each flag holds if any
    /// occurrence sets it.
    pub fn union(self, other: TagAttribute) -> Self {
        Self {
            tag: self.tag,
            ignore_parent: self.ignore_parent || other.ignore_parent,
            require_synchronized: self.require_synchronized || other.require_synchronized,
            applies_to_all_subclass_methods: self.applies_to_all_subclass_methods
                || other.applies_to_all_subclass_methods,
        }
    }

    /// Attach a source location, producing a registry record.
    pub fn located(self, location: impl Into<String>) -> LocatedTag {
        LocatedTag {
            tag: self.tag,
            ignore_parent: self.ignore_parent,
            require_synchronized: self.require_synchronized,
            applies_to_all_subclass_methods: self.applies_to_all_subclass_methods,
            location: location.into(),
        }
    }
}

impl From<ThreadTag> for TagAttribute {
    fn from(tag: ThreadTag) -> Self {
        Self::new(tag)
    }
}

/// Whether `location` survives a round trip through the tag table: non-empty,
/// no trailing whitespace, no control characters.
pub fn is_exportable_location(location: &str) -> bool {
    !location.is_empty()
        && !location.ends_with(char::is_whitespace)
        && !location.chars().any(char::is_control)
}

/// A resolved tag together with the location of the marker it came from.
///
/// Equality (and hashing) only looks at the tag value: two markers naming the
/// same tag at different places are the same tag for conflict purposes. The
/// registry keys on `location` instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocatedTag {
    pub tag: ThreadTag,
    pub ignore_parent: bool,
    pub require_synchronized: bool,
    pub applies_to_all_subclass_methods: bool,
    pub location: String,
}

impl LocatedTag {
    pub fn attribute(&self) -> TagAttribute {
        TagAttribute {
            tag: self.tag,
            ignore_parent: self.ignore_parent,
            require_synchronized: self.require_synchronized,
            applies_to_all_subclass_methods: self.applies_to_all_subclass_methods,
        }
    }
}

impl PartialEq for LocatedTag {
    fn eq(&self, other: &Self) -> bool {
        self.tag == other.tag
    }
}

impl Eq for LocatedTag {}

impl Hash for LocatedTag {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.tag.hash(state);
    }
}

impl fmt::Display for LocatedTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag)?;
        if self.ignore_parent {
            f.write_str(" (ignoreParent)")?;
        }
        if self.require_synchronized {
            f.write_str(" (requireSynchronized)")?;
        }
        write!(f, " at {}", self.location)
    }
}
