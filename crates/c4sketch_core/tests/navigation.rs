use c4sketch_core::{DiagramElement, DiagramModel, DiagramModelError, ElementId, ElementKind};

fn add(model: &mut DiagramModel, kind: ElementKind) -> ElementId {
    model
        .add_element(DiagramElement::template(kind))
        .unwrap()
        .id()
}

#[test]
fn fresh_model_is_at_root() {
    let mut model = DiagramModel::new();

    assert!(model.is_navigation_stack_empty());
    assert_eq!(model.pop_from_navigation_stack(), None);
    assert_eq!(model.current_id(), model.root().id());
    assert_eq!(model.current_heading(), "System Context");
}

#[test]
fn push_push_pop_returns_to_previous_view() {
    let mut model = DiagramModel::new();
    let e1 = add(&mut model, ElementKind::SoftwareSystem);
    let e2 = add(&mut model, ElementKind::SoftwareSystem);

    model.push_to_navigation_stack(e1).unwrap();
    model.push_to_navigation_stack(e2).unwrap();

    assert_eq!(model.pop_from_navigation_stack(), Some(e2));
    assert_eq!(model.current_id(), e1);
    assert_eq!(model.current_heading(), "Software System 1");
    assert_eq!(model.pop_from_navigation_stack(), Some(e1));
    assert!(model.is_navigation_stack_empty());
    assert_eq!(model.current_id(), model.root().id());
}

#[test]
fn push_then_pop_restores_current() {
    let mut model = DiagramModel::new();
    let system = add(&mut model, ElementKind::SoftwareSystem);
    model.push_to_navigation_stack(system).unwrap();
    let container = add(&mut model, ElementKind::Container);

    let before = model.current_id();
    model.push_to_navigation_stack(container).unwrap();
    model.pop_from_navigation_stack();
    assert_eq!(model.current_id(), before);
}

#[test]
fn push_moves_visited_element_to_top() {
    let mut model = DiagramModel::new();
    let a = add(&mut model, ElementKind::SoftwareSystem);
    let b = add(&mut model, ElementKind::Person);
    let c = add(&mut model, ElementKind::Container);
    model.push_to_navigation_stack(a).unwrap();
    model.push_to_navigation_stack(b).unwrap();
    model.push_to_navigation_stack(c).unwrap();

    model.push_to_navigation_stack(a).unwrap();

    assert_eq!(model.navigation_stack(), &[b, c, a]);
    assert_eq!(model.current_id(), a);
}

#[test]
fn push_rejects_unadmitted_and_root() {
    let mut model = DiagramModel::new();
    let stranger = DiagramElement::template(ElementKind::Person);
    let root = model.root().id();

    assert_eq!(
        model.push_to_navigation_stack(stranger.id()),
        Err(DiagramModelError::NotNavigable(stranger.id()))
    );
    assert_eq!(
        model.push_to_navigation_stack(root),
        Err(DiagramModelError::NotNavigable(root))
    );
    assert!(model.is_navigation_stack_empty());
}

#[test]
fn pop_past_root_is_noop() {
    let mut model = DiagramModel::new();
    let system = add(&mut model, ElementKind::SoftwareSystem);
    model.push_to_navigation_stack(system).unwrap();

    assert_eq!(model.pop_from_navigation_stack(), Some(system));
    assert_eq!(model.pop_from_navigation_stack(), None);
    assert_eq!(model.pop_from_navigation_stack(), None);
    assert_eq!(model.current_id(), model.root().id());
}

#[test]
fn repushing_top_then_popping_leaves_that_view() {
    let mut model = DiagramModel::new();
    let system = add(&mut model, ElementKind::SoftwareSystem);
    model.push_to_navigation_stack(system).unwrap();

    model.push_to_navigation_stack(system).unwrap();
    assert_eq!(model.navigation_stack(), &[system]);

    assert_eq!(model.pop_from_navigation_stack(), Some(system));
    assert!(model.is_navigation_stack_empty());
    assert_eq!(model.current_id(), model.root().id());
}
