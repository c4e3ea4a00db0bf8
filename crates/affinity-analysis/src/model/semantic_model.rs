//! SemanticModel — validated declarations indexed by id, with member lists
//! and the type hierarchy.

use affinity_core::errors::ModelError;
use affinity_core::{is_exportable_location, Declaration, DeclarationId, DeclarationKind, FxHashMap};

use super::hierarchy::TypeHierarchy;

pub struct SemanticModel {
    declarations: Vec<Declaration>,
    index: FxHashMap<DeclarationId, usize>,
    members: FxHashMap<DeclarationId, Vec<DeclarationId>>,
    hierarchy: TypeHierarchy,
}

impl SemanticModel {
    /// Validate and index host declarations. Host order is preserved.
    pub fn build(declarations: Vec<Declaration>) -> Result<Self, ModelError> {
        let mut index = FxHashMap::default();
        for (pos, decl) in declarations.iter().enumerate() {
            if index.insert(decl.id, pos).is_some() {
                return Err(ModelError::DuplicateDeclaration(decl.id));
            }
            if decl.location.trim().is_empty() {
                return Err(ModelError::EmptyLocation(decl.id));
            }
            if !is_exportable_location(&decl.location) {
                return Err(ModelError::UnexportableLocation {
                    id: decl.id,
                    location: decl.location.clone(),
                });
            }
        }

        let mut model = Self {
            declarations,
            index,
            members: FxHashMap::default(),
            hierarchy: TypeHierarchy::new(),
        };
        model.validate_enclosing()?;
        model.index_members_and_types()?;
        Ok(model)
    }

    fn validate_enclosing(&self) -> Result<(), ModelError> {
        for decl in &self.declarations {
            let Some(parent_id) = decl.enclosing else {
                if decl.kind != DeclarationKind::Module {
                    return Err(ModelError::MissingModule(decl.id));
                }
                continue;
            };
            let parent = self.get(parent_id).ok_or_else(|| ModelError::UnknownDeclaration {
                referrer: format!("declaration {}", decl.id),
                missing: parent_id,
            })?;
            let allowed = match decl.kind {
                DeclarationKind::Module => parent.kind == DeclarationKind::Module,
                // Local and anonymous types may live inside method bodies.
                DeclarationKind::Type => {
                    matches!(parent.kind, DeclarationKind::Module | DeclarationKind::Type)
                        || parent.kind.is_callable()
                }
                DeclarationKind::Method
                | DeclarationKind::Constructor
                | DeclarationKind::Initializer => {
                    matches!(parent.kind, DeclarationKind::Module | DeclarationKind::Type)
                }
                DeclarationKind::Field => parent.kind == DeclarationKind::Type,
            };
            if !allowed {
                return Err(ModelError::InvalidEnclosing {
                    id: decl.id,
                    enclosing_kind: parent.kind.name(),
                });
            }
        }

        // Walk every chain up to its root; more steps than declarations means a cycle.
        for decl in &self.declarations {
            let mut current = decl;
            let mut steps = 0usize;
            while let Some(parent_id) = current.enclosing {
                steps += 1;
                if steps > self.declarations.len() {
                    return Err(ModelError::EnclosingCycle(decl.id));
                }
                // Existence was checked above.
                current = &self.declarations[self.index[&parent_id]];
            }
            if current.kind != DeclarationKind::Module {
                return Err(ModelError::MissingModule(decl.id));
            }
        }
        Ok(())
    }

    fn index_members_and_types(&mut self) -> Result<(), ModelError> {
        let mut members: FxHashMap<DeclarationId, Vec<DeclarationId>> = FxHashMap::default();
        let mut hierarchy = TypeHierarchy::new();

        for decl in &self.declarations {
            if let Some(parent) = decl.enclosing {
                members.entry(parent).or_default().push(decl.id);
            }
            if decl.kind != DeclarationKind::Type {
                continue;
            }
            hierarchy.add_type(decl.id);
            for &sup in &decl.supertypes {
                let sup_decl = self.get(sup).ok_or_else(|| ModelError::UnknownDeclaration {
                    referrer: format!("supertypes of {}", decl.id),
                    missing: sup,
                })?;
                if sup_decl.kind != DeclarationKind::Type {
                    return Err(ModelError::NotAType {
                        id: decl.id,
                        supertype: sup,
                    });
                }
                hierarchy.add_supertype(decl.id, sup);
            }
        }

        self.members = members;
        self.hierarchy = hierarchy;
        Ok(())
    }

    pub fn get(&self, id: DeclarationId) -> Option<&Declaration> {
        self.index.get(&id).map(|&pos| &self.declarations[pos])
    }

    pub fn contains(&self, id: DeclarationId) -> bool {
        self.index.contains_key(&id)
    }

    /// All declarations in host order.
    pub fn declarations(&self) -> &[Declaration] {
        &self.declarations
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// Direct members (methods, fields, nested types) of a declaration.
    pub fn members_of(&self, id: DeclarationId) -> &[DeclarationId] {
        self.members.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn hierarchy(&self) -> &TypeHierarchy {
        &self.hierarchy
    }

    /// Nearest strict ancestor of the given kind.
    pub fn nearest_enclosing(&self, id: DeclarationId, kind: DeclarationKind) -> Option<&Declaration> {
        let mut current = self.get(id)?;
        while let Some(parent_id) = current.enclosing {
            current = self.get(parent_id)?;
            if current.kind == kind {
                return Some(current);
            }
        }
        None
    }

    pub fn enclosing_type(&self, id: DeclarationId) -> Option<&Declaration> {
        self.nearest_enclosing(id, DeclarationKind::Type)
    }

    /// The module a declaration lives in; a module is its own module.
    pub fn module_of(&self, id: DeclarationId) -> Option<&Declaration> {
        let decl = self.get(id)?;
        if decl.kind == DeclarationKind::Module {
            return Some(decl);
        }
        self.nearest_enclosing(id, DeclarationKind::Module)
    }
}
