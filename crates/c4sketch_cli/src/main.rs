//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `c4sketch_core` linkage.
//! - Drive one drill-down round trip and print each view deterministically.
//!
//! Usage: `c4sketch [ABSOLUTE_LOG_DIR]`

use c4sketch_core::{DiagramElement, DiagramModel, DiagramModelError, ElementKind, ModelConfig};
use log::info;
use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    let config = ModelConfig {
        log_dir: std::env::args().nth(1).map(PathBuf::from),
        ..ModelConfig::default()
    };
    if let Err(err) = config.init_logging() {
        eprintln!("c4sketch: {err}");
        return ExitCode::FAILURE;
    }

    println!("c4sketch_core ping={}", c4sketch_core::ping());
    println!("c4sketch_core version={}", c4sketch_core::core_version());

    match run_demo() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("c4sketch: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run_demo() -> Result<(), DiagramModelError> {
    let mut model = DiagramModel::new();

    model.add_element(DiagramElement::template(ElementKind::Person))?;
    let system = model
        .add_element(DiagramElement::template(ElementKind::SoftwareSystem))?
        .id();
    model.set_element_coordinates("Person 1", (80.0, 40.0).into());
    model.set_element_coordinates("Software System 1", (320.0, 40.0).into());
    model.add_relationship_between("Person 1", "Software System 1")?;
    print_view(&model);

    model.push_to_navigation_stack(system)?;
    model.add_element(DiagramElement::template(ElementKind::Container))?;
    model.add_element(DiagramElement::template(ElementKind::Container))?;
    model.add_relationship_between("Container 1", "Container 2")?;
    print_view(&model);

    model.pop_from_navigation_stack();
    info!(
        "event=cli_demo module=cli status=ok elements={} relationships={}",
        model.elements().len(),
        model.relationships().len()
    );
    println!("back at root={}", model.is_navigation_stack_empty());
    Ok(())
}

fn print_view(model: &DiagramModel) {
    println!("view={}", model.current_heading());
    for element in model.elements_in_current_view() {
        match model.current_coordinates().get(element.display_name()) {
            Some(point) => println!(
                "  element {} ({}) at {},{}",
                element.display_name(),
                element.kind().css_class(),
                point.x,
                point.y
            ),
            None => println!(
                "  element {} ({})",
                element.display_name(),
                element.kind().css_class()
            ),
        }
    }
    for relationship in model.current_relationships() {
        let name_of = |id| {
            model
                .element(id)
                .map(DiagramElement::display_name)
                .unwrap_or("?")
        };
        println!(
            "  relationship {} -> {}",
            name_of(relationship.source()),
            name_of(relationship.target())
        );
    }
}
