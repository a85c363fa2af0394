use crate::parser::*;

#[derive(Default)]
struct Recorder {
    events: Vec<String>,
    depth: usize,
    max_depth: usize,
}

impl Visitor for Recorder {
    fn enter(&mut self, arena: &NodeArena, index: NodeIndex, _parent: NodeIndex) {
        self.depth += 1;
        self.max_depth = self.max_depth.max(self.depth);
        if let Some(NodeData::Identifier { name }) = arena.data(index) {
            self.events.push(format!("enter {name}"));
        }
    }

    fn leave(&mut self, arena: &NodeArena, index: NodeIndex, _parent: NodeIndex) {
        self.depth -= 1;
        if let Some(NodeData::Identifier { name }) = arena.data(index) {
            self.events.push(format!("leave {name}"));
        }
    }
}

#[test]
fn test_walk_visits_identifiers_in_source_order() {
    let module = parse_module("const a = b + c.d; function f(x) { return x[y]; }").expect("parse");
    let mut recorder = Recorder::default();
    walk(&module.arena, module.root, &mut recorder);
    let entered: Vec<&str> = recorder
        .events
        .iter()
        .filter_map(|e| e.strip_prefix("enter "))
        .collect();
    assert_eq!(entered, vec!["a", "b", "c", "d", "f", "x", "x", "y"]);
    assert_eq!(recorder.depth, 0);
}

#[test]
fn test_walk_pairs_enter_and_leave() {
    let module = parse_module("foo(bar);").expect("parse");
    let mut recorder = Recorder::default();
    walk(&module.arena, module.root, &mut recorder);
    assert_eq!(
        recorder.events,
        vec!["enter foo", "leave foo", "enter bar", "leave bar"]
    );
}

#[test]
fn test_walk_reports_parent() {
    struct ParentCheck {
        member_properties: Vec<String>,
    }
    impl Visitor for ParentCheck {
        fn enter(&mut self, arena: &NodeArena, index: NodeIndex, parent: NodeIndex) {
            if let Some(NodeData::MemberExpression {
                property,
                computed: false,
                ..
            }) = arena.data(parent)
            {
                if *property == index {
                    if let Some(name) = arena.data(index).and_then(NodeData::identifier_name) {
                        self.member_properties.push(name.to_string());
                    }
                }
            }
        }
    }

    let module = parse_module("a.b.c; d[e];").expect("parse");
    let mut check = ParentCheck {
        member_properties: Vec::new(),
    };
    walk(&module.arena, module.root, &mut check);
    assert_eq!(check.member_properties, vec!["b", "c"]);
}

#[test]
fn test_walk_handles_deep_binary_chain() {
    let source = format!("x = {}1;", "a + ".repeat(50_000));
    let module = parse_module(source).expect("parse");
    let mut recorder = Recorder::default();
    walk(&module.arena, module.root, &mut recorder);
    assert!(recorder.max_depth > 50_000);
}

#[test]
fn test_children_include_computed_keys() {
    let module = parse_module("x = { [k]: v, plain: w };").expect("parse");
    let mut names = Vec::new();
    struct Names<'a>(&'a mut Vec<String>);
    impl Visitor for Names<'_> {
        fn enter(&mut self, arena: &NodeArena, index: NodeIndex, _parent: NodeIndex) {
            if let Some(name) = arena.data(index).and_then(NodeData::identifier_name) {
                self.0.push(name.to_string());
            }
        }
    }
    walk(&module.arena, module.root, &mut Names(&mut names));
    // `plain` is a literal key and is not an identifier node
    assert_eq!(names, vec!["x", "k", "v", "w"]);
}

#[test]
fn test_collect_binding_names_for_parameters() {
    let module = parse_module("function f(a, { b, c: [d] }, e = 1, ...rest) {}").expect("parse");
    let NodeData::FunctionDeclaration(function) =
        module.arena.data(module.statements()[0]).expect("node")
    else {
        panic!("expected function");
    };
    let names: Vec<String> = function
        .params
        .iter()
        .flat_map(|p| collect_binding_names(&module.arena, *p))
        .collect();
    assert_eq!(names, vec!["a", "b", "d", "e", "rest"]);
}
