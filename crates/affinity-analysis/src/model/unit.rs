//! CompilationUnit — one unit's declarations plus its override, call, and
//! field-access edges, validated together.

use affinity_core::errors::ModelError;
use affinity_core::{CallEdge, Declaration, DeclarationId, DeclarationKind, FieldAccessEdge, OverrideEdge};

use super::semantic_model::SemanticModel;

/// Everything one check pass consumes.
pub struct CompilationUnit {
    name: String,
    model: SemanticModel,
    override_edges: Vec<OverrideEdge>,
    call_edges: Vec<CallEdge>,
    field_accesses: Vec<FieldAccessEdge>,
}

impl CompilationUnit {
    pub fn builder(name: impl Into<String>) -> UnitBuilder {
        UnitBuilder {
            name: name.into(),
            declarations: Vec::new(),
            override_edges: Vec::new(),
            call_edges: Vec::new(),
            field_accesses: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn model(&self) -> &SemanticModel {
        &self.model
    }

    pub fn override_edges(&self) -> &[OverrideEdge] {
        &self.override_edges
    }

    pub fn call_edges(&self) -> &[CallEdge] {
        &self.call_edges
    }

    pub fn field_accesses(&self) -> &[FieldAccessEdge] {
        &self.field_accesses
    }
}

/// Collects host facts for one unit; `build` validates them.
pub struct UnitBuilder {
    name: String,
    declarations: Vec<Declaration>,
    override_edges: Vec<OverrideEdge>,
    call_edges: Vec<CallEdge>,
    field_accesses: Vec<FieldAccessEdge>,
}

impl UnitBuilder {
    pub fn declaration(mut self, decl: Declaration) -> Self {
        self.declarations.push(decl);
        self
    }

    pub fn declarations(mut self, decls: impl IntoIterator<Item = Declaration>) -> Self {
        self.declarations.extend(decls);
        self
    }

    pub fn override_edge(mut self, child: impl Into<DeclarationId>, parent: impl Into<DeclarationId>) -> Self {
        self.override_edges.push(OverrideEdge::new(child, parent));
        self
    }

    pub fn override_edges(mut self, edges: impl IntoIterator<Item = OverrideEdge>) -> Self {
        self.override_edges.extend(edges);
        self
    }

    pub fn call_edge(
        mut self,
        caller: impl Into<DeclarationId>,
        callee: impl Into<DeclarationId>,
        same_instance: bool,
    ) -> Self {
        self.call_edges.push(CallEdge::new(caller, callee, same_instance));
        self
    }

    pub fn call_edges(mut self, edges: impl IntoIterator<Item = CallEdge>) -> Self {
        self.call_edges.extend(edges);
        self
    }

    pub fn field_access(
        mut self,
        accessor: impl Into<DeclarationId>,
        field: impl Into<DeclarationId>,
        lock_held: bool,
    ) -> Self {
        self.field_accesses.push(FieldAccessEdge::new(accessor, field, lock_held));
        self
    }

    pub fn field_accesses(mut self, edges: impl IntoIterator<Item = FieldAccessEdge>) -> Self {
        self.field_accesses.extend(edges);
        self
    }

    pub fn build(self) -> Result<CompilationUnit, ModelError> {
        let model = SemanticModel::build(self.declarations)?;

        for edge in &self.override_edges {
            expect_callable(&model, "override", edge.child)?;
            expect_callable(&model, "override", edge.parent)?;
        }
        for edge in &self.call_edges {
            expect_callable(&model, "call", edge.caller)?;
            expect_callable(&model, "call", edge.callee)?;
        }
        for edge in &self.field_accesses {
            expect_callable(&model, "field access", edge.accessor)?;
            expect_kind(&model, "field access", edge.field, DeclarationKind::Field)?;
        }

        Ok(CompilationUnit {
            name: self.name,
            model,
            override_edges: self.override_edges,
            call_edges: self.call_edges,
            field_accesses: self.field_accesses,
        })
    }
}

fn lookup<'m>(
    model: &'m SemanticModel,
    edge: &'static str,
    id: DeclarationId,
) -> Result<&'m Declaration, ModelError> {
    model.get(id).ok_or_else(|| ModelError::UnknownDeclaration {
        referrer: format!("{edge} edge"),
        missing: id,
    })
}

fn expect_callable(model: &SemanticModel, edge: &'static str, id: DeclarationId) -> Result<(), ModelError> {
    let decl = lookup(model, edge, id)?;
    if decl.kind.is_callable() {
        Ok(())
    } else {
        Err(ModelError::WrongEndpointKind {
            edge,
            id,
            kind: decl.kind.name(),
            expected: "method, constructor or initializer",
        })
    }
}

fn expect_kind(
    model: &SemanticModel,
    edge: &'static str,
    id: DeclarationId,
    expected: DeclarationKind,
) -> Result<(), ModelError> {
    let decl = lookup(model, edge, id)?;
    if decl.kind == expected {
        Ok(())
    } else {
        Err(ModelError::WrongEndpointKind {
            edge,
            id,
            kind: decl.kind.name(),
            expected: expected.name(),
        })
    }
}
