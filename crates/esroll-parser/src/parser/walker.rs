//! Depth-first AST traversal.
//!
//! [`walk`] visits every node under a root with `enter`/`leave` callbacks and
//! the node's parent. Traversal uses an explicit stack, so long left-leaning
//! chains such as `a + b + c + ...` cannot overflow the native stack.

use super::node::{NodeData, NodeIndex, PropertyKey};
use super::node_arena::NodeArena;
use smallvec::SmallVec;

pub trait Visitor {
    fn enter(&mut self, _arena: &NodeArena, _index: NodeIndex, _parent: NodeIndex) {}
    fn leave(&mut self, _arena: &NodeArena, _index: NodeIndex, _parent: NodeIndex) {}
}

enum Step {
    Enter(NodeIndex, NodeIndex),
    Leave(NodeIndex, NodeIndex),
}

/// Visit `root` and all of its descendants in source order.
pub fn walk<V: Visitor + ?Sized>(arena: &NodeArena, root: NodeIndex, visitor: &mut V) {
    let mut stack = vec![Step::Enter(root, NodeIndex::NONE)];
    while let Some(step) = stack.pop() {
        match step {
            Step::Enter(index, parent) => {
                let Some(node) = arena.get(index) else {
                    continue;
                };
                visitor.enter(arena, index, parent);
                stack.push(Step::Leave(index, parent));
                let kids = children(&node.data);
                stack.extend(
                    kids.into_iter()
                        .rev()
                        .filter(|c| c.is_some())
                        .map(|c| Step::Enter(c, index)),
                );
            }
            Step::Leave(index, parent) => visitor.leave(arena, index, parent),
        }
    }
}

fn push_key(out: &mut SmallVec<[NodeIndex; 4]>, key: &PropertyKey) {
    if let PropertyKey::Computed(expression) = key {
        out.push(*expression);
    }
}

/// Direct children of a node in source order. Absent children (`NONE`) are
/// included; callers skip them.
pub fn children(data: &NodeData) -> SmallVec<[NodeIndex; 4]> {
    let mut out: SmallVec<[NodeIndex; 4]> = SmallVec::new();
    match data {
        NodeData::Program { body }
        | NodeData::BlockStatement { body }
        | NodeData::StaticBlock { body } => out.extend(body.iter().copied()),
        NodeData::VariableDeclaration { declarations, .. } => {
            out.extend(declarations.iter().copied())
        }
        NodeData::VariableDeclarator { id, init } => out.extend([*id, *init]),
        NodeData::FunctionDeclaration(function) | NodeData::FunctionExpression(function) => {
            out.push(function.id);
            out.extend(function.params.iter().copied());
            out.push(function.body);
        }
        NodeData::ClassDeclaration(class) | NodeData::ClassExpression(class) => {
            out.extend([class.id, class.super_class]);
            out.extend(class.body.iter().copied());
        }
        NodeData::ExpressionStatement { expression }
        | NodeData::ParenthesizedExpression { expression } => out.push(*expression),
        NodeData::EmptyStatement
        | NodeData::DebuggerStatement
        | NodeData::BreakStatement { .. }
        | NodeData::ContinueStatement { .. }
        | NodeData::ImportDeclaration { .. }
        | NodeData::ExportAllDeclaration { .. }
        | NodeData::Identifier { .. }
        | NodeData::PrivateName { .. }
        | NodeData::Literal(_)
        | NodeData::ThisExpression
        | NodeData::Super
        | NodeData::MetaProperty { .. } => {}
        NodeData::IfStatement {
            test,
            consequent,
            alternate,
        }
        | NodeData::ConditionalExpression {
            test,
            consequent,
            alternate,
        } => out.extend([*test, *consequent, *alternate]),
        NodeData::ForStatement {
            init,
            test,
            update,
            body,
        } => out.extend([*init, *test, *update, *body]),
        NodeData::ForInStatement { left, right, body }
        | NodeData::ForOfStatement {
            left, right, body, ..
        } => out.extend([*left, *right, *body]),
        NodeData::WhileStatement { test, body } => out.extend([*test, *body]),
        NodeData::DoWhileStatement { body, test } => out.extend([*body, *test]),
        NodeData::ReturnStatement { argument }
        | NodeData::ThrowStatement { argument }
        | NodeData::UnaryExpression { argument, .. }
        | NodeData::UpdateExpression { argument, .. }
        | NodeData::SpreadElement { argument }
        | NodeData::YieldExpression { argument, .. }
        | NodeData::AwaitExpression { argument }
        | NodeData::RestElement { argument } => out.push(*argument),
        NodeData::TryStatement {
            block,
            handler,
            finalizer,
        } => out.extend([*block, *handler, *finalizer]),
        NodeData::CatchClause { param, body } => out.extend([*param, *body]),
        NodeData::SwitchStatement {
            discriminant,
            cases,
        } => {
            out.push(*discriminant);
            out.extend(cases.iter().copied());
        }
        NodeData::SwitchCase { test, consequent } => {
            out.push(*test);
            out.extend(consequent.iter().copied());
        }
        NodeData::LabeledStatement { body, .. } => out.push(*body),
        NodeData::WithStatement { object, body } => out.extend([*object, *body]),
        NodeData::ExportNamedDeclaration { declaration, .. }
        | NodeData::ExportDefaultDeclaration { declaration } => out.push(*declaration),
        NodeData::TemplateLiteral { expressions, .. } => out.extend(expressions.iter().copied()),
        NodeData::TaggedTemplateExpression { tag, quasi } => out.extend([*tag, *quasi]),
        NodeData::ArrayExpression { elements } | NodeData::ArrayPattern { elements } => {
            out.extend(elements.iter().copied())
        }
        NodeData::ObjectExpression { properties } | NodeData::ObjectPattern { properties } => {
            out.extend(properties.iter().copied())
        }
        NodeData::Property { key, value, .. } => {
            push_key(&mut out, key);
            out.push(*value);
        }
        NodeData::ArrowFunctionExpression { params, body, .. } => {
            out.extend(params.iter().copied());
            out.push(*body);
        }
        NodeData::BinaryExpression { left, right, .. }
        | NodeData::AssignmentExpression { left, right, .. }
        | NodeData::AssignmentPattern { left, right } => out.extend([*left, *right]),
        NodeData::CallExpression {
            callee, arguments, ..
        }
        | NodeData::NewExpression { callee, arguments } => {
            out.push(*callee);
            out.extend(arguments.iter().copied());
        }
        NodeData::MemberExpression {
            object, property, ..
        } => out.extend([*object, *property]),
        NodeData::SequenceExpression { expressions } => out.extend(expressions.iter().copied()),
        NodeData::ImportExpression { source } => out.push(*source),
        NodeData::MethodDefinition { key, value, .. }
        | NodeData::PropertyDefinition { key, value, .. } => {
            push_key(&mut out, key);
            out.push(*value);
        }
    }
    out
}

/// Names bound by a binding target (identifier or destructuring pattern),
/// in source order.
pub fn collect_binding_names(arena: &NodeArena, target: NodeIndex) -> Vec<String> {
    let mut names = Vec::new();
    let mut stack = vec![target];
    while let Some(index) = stack.pop() {
        let Some(data) = arena.data(index) else {
            continue;
        };
        match data {
            NodeData::Identifier { name } => names.push(name.clone()),
            NodeData::ObjectPattern { properties } => stack.extend(properties.iter().rev()),
            NodeData::ArrayPattern { elements } => stack.extend(elements.iter().rev()),
            NodeData::Property { value, .. } => stack.push(*value),
            NodeData::AssignmentPattern { left, .. } => stack.push(*left),
            NodeData::RestElement { argument } => stack.push(*argument),
            NodeData::ParenthesizedExpression { expression } => stack.push(*expression),
            // Member expressions are assignment targets but bind nothing.
            _ => {}
        }
    }
    names
}
