//! Declarations and edges as supplied by the host semantic model.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::identifiers::DeclarationId;
use super::tag::TagAttribute;

/// Kind of a host declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclarationKind {
    Module,
    Type,
    Method,
    Constructor,
    /// Static or instance initializer block.
    Initializer,
    Field,
}

impl DeclarationKind {
    /// Methods, constructors and initializers all run code and resolve alike.
    pub fn is_callable(self) -> bool {
        matches!(self, Self::Method | Self::Constructor | Self::Initializer)
    }

    /// Constructors and initializers run while the object is still private to
    /// the creating thread.
    pub fn is_construction(self) -> bool {
        matches!(self, Self::Constructor | Self::Initializer)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Module => "module",
            Self::Type => "type",
            Self::Method => "method",
            Self::Constructor => "constructor",
            Self::Initializer => "initializer",
            Self::Field => "field",
        }
    }
}

/// One declaration from the host.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Declaration {
    pub id: DeclarationId,
    pub kind: DeclarationKind,
    pub enclosing: Option<DeclarationId>,
    /// Thread-tag markers written directly on this declaration. More than one
    /// distinct tag is a conflict.
    #[serde(default)]
    pub markers: SmallVec<[TagAttribute; 1]>,
    /// Human-readable source location; also the registry export key.
    pub location: String,
    /// Fully qualified name, used for library tag lookup and module filters.
    pub qualified_name: String,
    /// Override-matching signature of a callable (name plus erased parameters).
    #[serde(default)]
    pub signature: Option<String>,
    /// Direct supertypes of a type declaration.
    #[serde(default)]
    pub supertypes: Vec<DeclarationId>,
    /// Host fact: every execution of this declaration holds its guarding lock.
    #[serde(default)]
    pub lock_guarded: bool,
    /// Host fact for fields: safe to read from any thread (volatile, or final
    /// and immutable).
    #[serde(default)]
    pub thread_safe: bool,
    /// Checker suppression tokens written on this declaration.
    #[serde(default)]
    pub suppressions: Vec<String>,
}

impl Declaration {
    fn base(
        id: impl Into<DeclarationId>,
        kind: DeclarationKind,
        enclosing: Option<DeclarationId>,
        qualified_name: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            enclosing,
            markers: SmallVec::new(),
            location: location.into(),
            qualified_name: qualified_name.into(),
            signature: None,
            supertypes: Vec::new(),
            lock_guarded: false,
            thread_safe: false,
            suppressions: Vec::new(),
        }
    }

    pub fn module(
        id: impl Into<DeclarationId>,
        qualified_name: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        Self::base(id, DeclarationKind::Module, None, qualified_name, location)
    }

    pub fn ty(
        id: impl Into<DeclarationId>,
        enclosing: impl Into<DeclarationId>,
        qualified_name: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        Self::base(id, DeclarationKind::Type, Some(enclosing.into()), qualified_name, location)
    }

    /// A method whose override signature defaults to its simple name.
    pub fn method(
        id: impl Into<DeclarationId>,
        enclosing: impl Into<DeclarationId>,
        qualified_name: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        let qualified_name = qualified_name.into();
        let simple = qualified_name
            .rsplit('.')
            .next()
            .unwrap_or(&qualified_name)
            .to_string();
        let mut decl = Self::base(
            id,
            DeclarationKind::Method,
            Some(enclosing.into()),
            qualified_name,
            location,
        );
        decl.signature = Some(simple);
        decl
    }

    pub fn constructor(
        id: impl Into<DeclarationId>,
        enclosing: impl Into<DeclarationId>,
        qualified_name: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        Self::base(id, DeclarationKind::Constructor, Some(enclosing.into()), qualified_name, location)
    }

    pub fn initializer(
        id: impl Into<DeclarationId>,
        enclosing: impl Into<DeclarationId>,
        qualified_name: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        Self::base(id, DeclarationKind::Initializer, Some(enclosing.into()), qualified_name, location)
    }

    pub fn field(
        id: impl Into<DeclarationId>,
        enclosing: impl Into<DeclarationId>,
        qualified_name: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        Self::base(id, DeclarationKind::Field, Some(enclosing.into()), qualified_name, location)
    }

    pub fn with_marker(mut self, marker: impl Into<TagAttribute>) -> Self {
        self.markers.push(marker.into());
        self
    }

    pub fn with_signature(mut self, signature: impl Into<String>) -> Self {
        self.signature = Some(signature.into());
        self
    }

    pub fn with_supertypes(mut self, supertypes: impl IntoIterator<Item = DeclarationId>) -> Self {
        self.supertypes.extend(supertypes);
        self
    }

    pub fn lock_guarded(mut self) -> Self {
        self.lock_guarded = true;
        self
    }

    pub fn thread_safe(mut self) -> Self {
        self.thread_safe = true;
        self
    }

    pub fn suppressing(mut self, token: impl Into<String>) -> Self {
        self.suppressions.push(token.into());
        self
    }

    pub fn is_suppressed_by(&self, token: &str) -> bool {
        self.suppressions.iter().any(|s| s.contains(token))
    }
}

/// `child` overrides (or implements) `parent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OverrideEdge {
    pub child: DeclarationId,
    pub parent: DeclarationId,
}

impl OverrideEdge {
    pub fn new(child: impl Into<DeclarationId>, parent: impl Into<DeclarationId>) -> Self {
        Self {
            child: child.into(),
            parent: parent.into(),
        }
    }
}

/// One call expression: `caller` invokes `callee`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CallEdge {
    pub caller: DeclarationId,
    pub callee: DeclarationId,
    /// The call has no explicit receiver, i.e. it targets `this`.
    pub same_instance: bool,
}

impl CallEdge {
    pub fn new(
        caller: impl Into<DeclarationId>,
        callee: impl Into<DeclarationId>,
        same_instance: bool,
    ) -> Self {
        Self {
            caller: caller.into(),
            callee: callee.into(),
            same_instance,
        }
    }
}

/// One read or write of a field from inside `accessor`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldAccessEdge {
    pub accessor: DeclarationId,
    pub field: DeclarationId,
    /// The access happens inside a block holding the object's own lock.
    pub lock_held: bool,
}

impl FieldAccessEdge {
    pub fn new(
        accessor: impl Into<DeclarationId>,
        field: impl Into<DeclarationId>,
        lock_held: bool,
    ) -> Self {
        Self {
            accessor: accessor.into(),
            field: field.into(),
            lock_held,
        }
    }
}
