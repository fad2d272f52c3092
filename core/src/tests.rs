//! Behavioural tests for the greeter contract, run against both variants.

use crate::config::{GreeterConfig, Locale, Variant};
use crate::event::{Discard, GreetEvent};
use crate::greeter::{Greeter, MemorySurface, Paint};
use crate::node::Node;
use crate::template::NAME_INPUT_ID;

// ============================================================================
// Test Infrastructure
// ============================================================================

type TestGreeter = Greeter<MemorySurface, Vec<GreetEvent>>;

fn greeter(variant: Variant) -> TestGreeter {
    Greeter::new(
        GreeterConfig::builder().variant(variant).build(),
        MemorySurface::new(),
        Vec::new(),
    )
}

fn shown_text<E>(greeter: &Greeter<MemorySurface, E>) -> String {
    greeter.with_surface(MemorySurface::text)
}

fn for_each_variant(check: impl Fn(TestGreeter)) {
    for variant in Variant::ALL {
        check(greeter(variant));
    }
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn initial_render_greets_the_world() {
    for_each_variant(|greeter| {
        let state = greeter.state();
        assert_eq!(state.display_name, "World");
        assert_eq!(state.click_count, 0);
        let text = shown_text(&greeter);
        assert!(text.contains("Hello, World!"), "{text}");
        assert!(text.contains("0 clicks"), "{text}");
    });
}

#[test]
fn renaming_updates_the_greeting_but_not_the_count() {
    for_each_variant(|greeter| {
        greeter.set_display_name("Ann");
        assert!(shown_text(&greeter).contains("Hello, Ann!"));
        assert_eq!(greeter.state().click_count, 0);
    });
}

#[test]
fn two_clicks_emit_two_notifications() {
    for_each_variant(|mut greeter| {
        greeter.handle_greet_action();
        let returned = greeter.handle_greet_action();

        assert_eq!(greeter.state().click_count, 2);
        let events = greeter.sink();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].click_count, 1);
        assert_eq!(events[1].click_count, 2);
        assert_eq!(events[1], returned);
        assert_eq!(events[1].composed_message, "Hello, World! (Click #2)");
        assert!(shown_text(&greeter).contains("2 clicks"));
    });
}

#[test]
fn n_clicks_count_to_n() {
    for clicks in [0_u64, 1, 5, 17] {
        for_each_variant(|mut greeter| {
            for _ in 0..clicks {
                greeter.handle_greet_action();
            }
            assert_eq!(greeter.state().click_count, clicks);
            assert_eq!(greeter.sink().len() as u64, clicks);
            for (index, event) in greeter.sink().iter().enumerate() {
                assert_eq!(event.click_count, index as u64 + 1);
            }
        });
    }
}

#[test]
fn empty_name_shows_the_fallback() {
    for_each_variant(|greeter| {
        greeter.set_display_name("Ann");
        greeter.set_display_name("");
        assert_eq!(greeter.state().display_name, "World");
        assert!(shown_text(&greeter).contains("Hello, World!"));

        greeter.set_display_name("   ");
        assert_eq!(greeter.state().display_name, "World");
    });
}

#[test]
fn notification_carries_the_current_name_and_variant() {
    let mut greeter = greeter(Variant::Vanilla);
    greeter.set_display_name("Ann");
    let event = greeter.handle_greet_action();
    assert_eq!(event.display_name, "Ann");
    assert_eq!(event.variant, Variant::Vanilla);
    assert_eq!(event.composed_message, "Hello, Ann! (Click #1)");
}

// ============================================================================
// Rendering strategies
// ============================================================================

#[test]
fn render_is_idempotent() {
    for_each_variant(|mut greeter| {
        greeter.set_display_name("Ann");
        greeter.handle_greet_action();
        assert_eq!(greeter.render(), greeter.render());
        let before: Vec<Node> = greeter.with_surface(|s| s.tree().to_vec());
        greeter.repaint();
        let after: Vec<Node> = greeter.with_surface(|s| s.tree().to_vec());
        assert_eq!(before, after);
        assert_eq!(after, greeter.render());
    });
}

#[test]
fn reactive_variant_patches_only_what_changed() {
    let mut greeter = greeter(Variant::Reactive);
    assert_eq!(greeter.with_surface(MemorySurface::replace_count), 1);

    assert_eq!(greeter.repaint(), Paint::Patched(0));
    assert_eq!(greeter.with_surface(MemorySurface::patch_count), 0);

    greeter.handle_greet_action();
    // readout, counter text, button label
    assert_eq!(greeter.last_paint(), Some(Paint::Patched(3)));
    assert_eq!(greeter.with_surface(MemorySurface::replace_count), 1);
    assert_eq!(greeter.with_surface(|s| s.tree().to_vec()), greeter.render());
}

#[test]
fn vanilla_variant_replaces_everything_each_time() {
    let mut greeter = greeter(Variant::Vanilla);
    greeter.set_display_name("Ann");
    greeter.handle_greet_action();
    assert_eq!(greeter.repaint(), Paint::Replaced);
    assert_eq!(
        greeter.with_surface(MemorySurface::replace_count),
        greeter.paint_count()
    );
    assert_eq!(greeter.with_surface(MemorySurface::patch_count), 0);
}

// ============================================================================
// Host interaction
// ============================================================================

#[test]
fn focus_moves_to_the_name_input_when_present() {
    let greeter = greeter(Variant::Reactive);
    assert!(greeter.focus_name_input());
    assert_eq!(
        greeter.with_surface(|s| s.focused().map(str::to_owned)),
        Some(NAME_INPUT_ID.to_owned())
    );

    greeter.with_surface_mut(MemorySurface::clear);
    assert!(!greeter.focus_name_input());
}

#[test]
fn lifecycle_hooks_toggle_attachment() {
    let mut greeter = greeter(Variant::Vanilla);
    assert!(!greeter.is_attached());
    greeter.on_attach();
    assert!(greeter.is_attached());
    greeter.on_detach();
    assert!(!greeter.is_attached());
}

#[test]
fn configured_start_state_is_sanitized() {
    let config = GreeterConfig::builder()
        .locale(Locale::Spanish)
        .initial_name("")
        .initial_count_from("not a number")
        .build();
    let mut greeter = Greeter::new(config, MemorySurface::new(), Vec::<GreetEvent>::new());
    assert_eq!(greeter.state().display_name, "Mundo");
    assert_eq!(greeter.state().click_count, 0);

    let event = greeter.handle_greet_action();
    assert_eq!(event.composed_message, "¡Hola, Mundo! (Click #1)");
}

#[test]
fn seeded_count_keeps_counting_up() {
    let config = GreeterConfig::builder().initial_count_from("41").build();
    let mut greeter = Greeter::new(config, MemorySurface::new(), Discard);
    greeter.handle_greet_action();
    assert_eq!(greeter.state().click_count, 42);
}

#[test]
fn saturated_count_still_notifies() {
    let config = GreeterConfig::builder().initial_count(u64::MAX).build();
    let mut greeter = Greeter::new(config, MemorySurface::new(), Vec::<GreetEvent>::new());
    greeter.handle_greet_action();
    assert_eq!(greeter.state().click_count, u64::MAX);
    assert_eq!(greeter.sink().len(), 1);
}

#[test]
fn blank_fallback_in_custom_messages_never_leaks() {
    let from_json = GreeterConfig::from_json(r#"{"messages":{"fallbackName":"  "}}"#).unwrap();
    let mut patched = GreeterConfig::default();
    patched.messages.fallback_name = String::new();

    for config in [from_json, patched] {
        let greeter = Greeter::new(config, MemorySurface::new(), Discard);
        greeter.set_display_name("");
        assert_eq!(greeter.state().display_name, "World");
        assert!(shown_text(&greeter).contains("Hello, World!"));
    }
}
