//! Scroll Demo
//!
//! Builds a small page in the in-memory document, scrolls through it and
//! navigates away, printing what the styling layer would see:
//! - a hero that slides in once
//! - a card grid staggered from the center
//! - a banner that re-animates on every entry
//!
//! Run with: RUST_LOG=inview_animation=trace cargo run -p inview_animation --example scroll_demo

use anyhow::Result;
use inview_animation::{AnimationController, AnimationEvent};
use inview_dom::{Document, ElementId, Host};

const CONFIG: &str = r#"
[defaults]
duration = 600
easing = "spring"

[stagger]
default_duration = 80
"#;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::DEBUG.into()),
        )
        .init();

    let mut doc = Document::new();
    let root = doc.root();

    let hero = element(&mut doc, root, &[("data-animate", "slide"), ("data-animate-direction", "left")])?;
    let grid = element(
        &mut doc,
        root,
        &[("data-animate-stagger", ""), ("data-animate-stagger-from", "center")],
    )?;
    let cards = (0..5)
        .map(|_| element(&mut doc, grid, &[("data-animate", "zoom"), ("data-animate-intensity", "subtle")]))
        .collect::<Result<Vec<_>>>()?;
    let banner = element(
        &mut doc,
        root,
        &[
            ("data-animate", "flip"),
            ("data-animate-repeat", "every"),
            ("data-animate-threshold", "0.5"),
        ],
    )?;

    let mut controller = AnimationController::from_toml_str(CONFIG)?;
    controller.handle_event(&mut doc, AnimationEvent::PageLoad)?;

    println!("hero:   {}", describe(&doc, hero));
    for (index, &card) in cards.iter().enumerate() {
        println!("card {index}: {}", describe(&doc, card));
    }
    println!("banner: {}", describe(&doc, banner));

    // Scroll down the page, then back up past the banner
    let frames: [&[(ElementId, f64)]; 4] = [
        &[(hero, 1.0)],
        &[(hero, 0.4), (grid, 0.3)],
        &[(hero, 0.0), (grid, 1.0), (banner, 0.8)],
        &[(grid, 0.6), (banner, 0.1)],
    ];
    for (frame, visible) in frames.iter().enumerate() {
        for &(el, ratio) in visible.iter() {
            doc.set_visible_ratio(el, ratio)?;
        }
        deliver(&mut controller, &mut doc)?;

        let animating: Vec<_> = std::iter::once(hero)
            .chain(cards.iter().copied())
            .chain(std::iter::once(banner))
            .map(|el| doc.has_class(el, "is-animating"))
            .collect();
        println!("frame {frame}: animating {animating:?}");

        for &card in &cards {
            controller.handle_event(&mut doc, AnimationEvent::AnimationEnd(card))?;
        }
    }

    // Navigate away and back
    controller.handle_event(&mut doc, AnimationEvent::BeforeSwap)?;
    println!("after swap: {} observers", doc.observer_count());
    doc.hide_all();
    controller.handle_event(&mut doc, AnimationEvent::PageLoad)?;
    println!("after reload: {} observers", doc.observer_count());

    Ok(())
}

fn element(doc: &mut Document, parent: ElementId, attrs: &[(&str, &str)]) -> Result<ElementId> {
    let el = doc.create_element("section");
    doc.append_child(parent, el)?;
    for (name, value) in attrs {
        doc.set_attribute(el, name, value)?;
    }
    Ok(el)
}

fn deliver(controller: &mut AnimationController, doc: &mut Document) -> Result<()> {
    for batch in doc.take_intersections() {
        controller.handle_event(doc, AnimationEvent::Intersection(batch))?;
    }
    Ok(())
}

fn describe(doc: &Document, el: ElementId) -> String {
    ["--animate-duration", "--animate-delay", "--animate-translate", "--animate-rotate"]
        .iter()
        .filter_map(|name| doc.style_property(el, name).map(|value| format!("{name}: {value}")))
        .collect::<Vec<_>>()
        .join("; ")
}
