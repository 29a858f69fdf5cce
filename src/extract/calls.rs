//! Call statements, function references and the syntactic shape of their
//! actual arguments

use super::Extractor;
use crate::intrinsics::is_intrinsic;
use crate::schema::{
    ActualArgument, ArgumentExpr, CallForm, CallSite, DataType, EntityId, SourceLocation, Subscript,
};
use crate::tree::{Tag, TreeNode};

/// Skip wrappers that do not change the value of an argument expression
fn unwrap_expr(node: &TreeNode) -> &TreeNode {
    let mut node = node;
    loop {
        let transparent = matches!(node.tag, Tag::ActualArg | Tag::Expr)
            || matches!(&node.tag, Tag::Other(t) if t.eq_ignore_ascii_case("Parentheses"));
        match node.children.first() {
            Some(inner) if transparent && node.children.len() == 1 => node = inner,
            _ => return node,
        }
    }
}

/// Callee of a `Call` node: the designated name and whether it is a
/// type-bound binding reached through a structure component
fn designator(call: &TreeNode) -> Option<(String, CallForm)> {
    let designator = call.child(&Tag::ProcedureDesignator)?;
    if let Some(name) = designator.name() {
        return Some((name, CallForm::Call));
    }
    let component = designator.find(&Tag::ProcComponentRef)?;
    let binding = component
        .find(&Tag::StructureComponent)
        .and_then(TreeNode::name)
        .or_else(|| component.find_all(&Tag::Name).last().and_then(|n| n.lowered_value()))?;
    Some((format!("%{}", binding), CallForm::TypeBound))
}

fn arguments(call: &TreeNode) -> Vec<ActualArgument> {
    call.children_tagged(&Tag::ActualArgSpec)
        .map(|spec| {
            let keyword = spec
                .child(&Tag::Keyword)
                .and_then(|k| k.find(&Tag::Name))
                .and_then(TreeNode::lowered_value);
            let expr = spec
                .child(&Tag::ActualArg)
                .map(argument_expr)
                .unwrap_or(ArgumentExpr::Other);
            ActualArgument { keyword, expr }
        })
        .collect()
}

/// Syntactic shape of one actual argument
pub(super) fn argument_expr(node: &TreeNode) -> ArgumentExpr {
    let expr = unwrap_expr(node);
    match &expr.tag {
        Tag::Designator => expr
            .child(&Tag::DataRef)
            .map(data_ref_expr)
            .unwrap_or(ArgumentExpr::Other),
        Tag::FunctionReference => {
            let Some(call) = expr.child(&Tag::Call) else {
                return ArgumentExpr::Other;
            };
            match designator(call) {
                Some((base, CallForm::Call)) => ArgumentExpr::Subscripted {
                    base,
                    subscripts: call
                        .children_tagged(&Tag::ActualArgSpec)
                        .map(|spec| spec.child(&Tag::ActualArg).map(index_subscript).unwrap_or(Subscript::Scalar))
                        .collect(),
                    call_shaped: true,
                },
                _ => ArgumentExpr::Other,
            }
        }
        Tag::LiteralConstant => expr
            .children
            .first()
            .map(|lit| ArgumentExpr::Literal(literal_type(&lit.tag)))
            .unwrap_or(ArgumentExpr::Other),
        Tag::Other(name) if name.eq_ignore_ascii_case("Negate") || name.eq_ignore_ascii_case("UnaryPlus") => {
            match expr.children.first().map(argument_expr) {
                Some(literal @ ArgumentExpr::Literal(_)) => literal,
                _ => ArgumentExpr::Other,
            }
        }
        _ => ArgumentExpr::Other,
    }
}

fn data_ref_expr(data_ref: &TreeNode) -> ArgumentExpr {
    let Some(inner) = data_ref.children.first() else {
        return ArgumentExpr::Other;
    };
    match &inner.tag {
        Tag::Name => inner
            .lowered_value()
            .map(ArgumentExpr::Name)
            .unwrap_or(ArgumentExpr::Other),
        Tag::ArrayElement => {
            let subscripts: Vec<Subscript> = inner
                .children_tagged(&Tag::SectionSubscript)
                .map(section_subscript)
                .collect();
            match inner.child(&Tag::DataRef).map(data_ref_expr) {
                Some(ArgumentExpr::Name(base)) => ArgumentExpr::Subscripted {
                    base,
                    subscripts,
                    call_shaped: false,
                },
                Some(component @ ArgumentExpr::Component { .. }) => component,
                _ => ArgumentExpr::Other,
            }
        }
        Tag::StructureComponent => inner
            .name()
            .map(|field| ArgumentExpr::Component { field })
            .unwrap_or(ArgumentExpr::Other),
        _ => ArgumentExpr::Other,
    }
}

fn section_subscript(subscript: &TreeNode) -> Subscript {
    let Some(inner) = subscript.children.first() else {
        return Subscript::Scalar;
    };
    match &inner.tag {
        Tag::SubscriptTriplet => Subscript::Triplet,
        _ => index_subscript(inner),
    }
}

/// A scalar index, a bare name that may be a vector subscript, or an array constructor
fn index_subscript(node: &TreeNode) -> Subscript {
    let mut expr = node;
    while matches!(expr.tag, Tag::Integer | Tag::Expr | Tag::ActualArg) && expr.children.len() == 1 {
        expr = &expr.children[0];
    }
    match &expr.tag {
        Tag::ArrayConstructor => Subscript::ArrayValued,
        Tag::Designator => match expr.path(&[Tag::DataRef, Tag::Name]).and_then(TreeNode::lowered_value) {
            Some(name) if expr.child(&Tag::DataRef).is_some_and(|d| d.children.len() == 1) => {
                Subscript::Name(name)
            }
            _ => Subscript::Scalar,
        },
        _ => Subscript::Scalar,
    }
}

fn literal_type(tag: &Tag) -> DataType {
    match tag {
        Tag::IntLiteralConstant => DataType::Integer,
        Tag::RealLiteralConstant => DataType::Real,
        Tag::LogicalLiteralConstant => DataType::Logical,
        Tag::CharLiteralConstant => DataType::Character,
        Tag::ComplexLiteralConstant => DataType::Complex,
        _ => DataType::Unknown,
    }
}

impl Extractor<'_> {
    /// Record every call statement and function reference below `node`
    pub(super) fn execution_part(&mut self, scope: EntityId, node: &TreeNode) {
        match &node.tag {
            Tag::CallStmt => {
                if let Some(call) = node.find(&Tag::Call) {
                    self.record_call(scope, call, CallForm::Call);
                    self.nested_references(scope, call);
                }
            }
            Tag::FunctionReference => {
                if let Some(call) = node.child(&Tag::Call) {
                    self.record_call(scope, call, CallForm::FunctionReference);
                    self.nested_references(scope, call);
                }
            }
            _ => {
                for child in &node.children {
                    self.execution_part(scope, child);
                }
            }
        }
    }

    fn nested_references(&mut self, scope: EntityId, call: &TreeNode) {
        for spec in call.children_tagged(&Tag::ActualArgSpec) {
            self.execution_part(scope, spec);
        }
    }

    fn record_call(&mut self, scope: EntityId, call: &TreeNode, form: CallForm) {
        let Some((callee, designated)) = designator(call) else {
            return;
        };
        let form = match (form, designated) {
            (_, CallForm::TypeBound) => CallForm::TypeBound,
            (form, _) => form,
        };
        if form == CallForm::FunctionReference {
            if !self.options.track_function_references {
                return;
            }
            if self.options.skip_intrinsics && is_intrinsic(&callee) {
                return;
            }
            // `a(i)` on a visible array is an element reference
            if self
                .registry
                .lookup_variable(scope, &callee)
                .is_some_and(|decl| decl.is_array())
            {
                return;
            }
        }
        tracing::debug!("[EXTRACT] {:?} {} at line {}", form, callee, call.line);
        self.call_sites.push(CallSite {
            caller: scope,
            callee,
            form,
            arguments: arguments(call),
            location: SourceLocation::new(self.file, call.line),
        });
    }
}
