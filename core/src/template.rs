//! The greeter's visual template.

use crate::config::{GreeterConfig, Variant};
use crate::node::{Element, Node};
use crate::state::WidgetState;

/// `id` of the name input.
pub const NAME_INPUT_ID: &str = "nameInput";
/// `id` of the greet button.
pub const GREET_BUTTON_ID: &str = "greetBtn";

/// Renders the widget body for `state`.
///
/// Pure: equal inputs always produce equal trees. The result is a forest of
/// three sections (header, content, slot area) so hosts can mount it under any
/// container.
#[must_use]
pub fn render(state: &WidgetState, config: &GreeterConfig) -> Vec<Node> {
    let messages = &config.messages;
    let name = state.display_name.as_str();
    let count = state.click_count.to_string();

    let header = Element::new("div")
        .class("header")
        .child(Element::new("h3").class("title").text(config.variant.title()))
        .child(
            Element::new("p")
                .class("subtitle")
                .text(messages.subtitle(config.variant)),
        );

    let mut content = Element::new("div").class("content");
    if config.variant == Variant::Reactive {
        content = content.child(Element::new("div").class("reactive-demo").text(format!(
            "🔄 {}: name=\"{name}\", counter={count}",
            messages.reactive_properties
        )));
    }

    let content = content
        .child(
            Element::new("div")
                .class("greeting")
                .text(format!("👋 {}", messages.greeting))
                .child(Element::new("strong").text(name))
                .text("!"),
        )
        .child(
            Element::new("div")
                .class("counter")
                .text(format!("🔢 {}: ", messages.counter_label))
                .child(Element::new("strong").text(count.clone()))
                .text(format!(" {}", messages.clicks)),
        )
        .child(
            Element::new("div")
                .class("controls")
                .child(
                    Element::new("div")
                        .class("input-group")
                        .child(
                            Element::new("label")
                                .attr("for", NAME_INPUT_ID)
                                .text(messages.input_label.as_str()),
                        )
                        .child(
                            Element::new("input")
                                .id(NAME_INPUT_ID)
                                .attr("type", "text")
                                .attr("value", name)
                                .attr("placeholder", messages.placeholder.as_str()),
                        ),
                )
                .child(
                    Element::new("button")
                        .id(GREET_BUTTON_ID)
                        .attr("type", "button")
                        .text(format!("🎉 {} ({count})", messages.button_label)),
                ),
        );

    let slot_area = Element::new("div").class("slot-content").child(
        Element::new("slot").child(Element::new("em").text(format!("💡 {}", messages.slot_hint))),
    );

    vec![header.into(), content.into(), slot_area.into()]
}

#[cfg(test)]
mod tests {
    use super::{GREET_BUTTON_ID, NAME_INPUT_ID, render};
    use crate::config::{GreeterConfig, Locale, Variant};
    use crate::node::{Node, to_html};
    use crate::state::WidgetState;

    fn text_of(tree: &[Node]) -> String {
        tree.iter().map(Node::text_content).collect()
    }

    #[test]
    fn greets_and_counts() {
        let config = GreeterConfig::default();
        let tree = render(&WidgetState::new("World", "World", 0), &config);
        let text = text_of(&tree);
        assert!(text.contains("Hello, World!"));
        assert!(text.contains("0 clicks"));
        assert!(text.contains("Greet (0)"));
    }

    #[test]
    fn input_mirrors_the_name() {
        let tree = render(&WidgetState::new("Ann", "World", 0), &GreeterConfig::default());
        let input = tree[1].find_by_id(NAME_INPUT_ID).unwrap();
        assert_eq!(input.attribute("value"), Some("Ann"));
        assert!(tree[1].find_by_id(GREET_BUTTON_ID).is_some());
    }

    #[test]
    fn only_reactive_shows_property_readout() {
        let state = WidgetState::new("Ann", "World", 4);
        let reactive = render(&state, &GreeterConfig::default());
        let vanilla = render(
            &state,
            &GreeterConfig::builder().variant(Variant::Vanilla).build(),
        );
        assert_eq!(
            reactive[1].find_by_class("reactive-demo").unwrap().children[0],
            Node::Text("🔄 Reactive properties: name=\"Ann\", counter=4".into())
        );
        assert!(vanilla[1].find_by_class("reactive-demo").is_none());
        assert!(text_of(&vanilla).contains("🍦 Vanilla Web Component"));
    }

    #[test]
    fn slot_falls_back_to_hint() {
        let tree = render(&WidgetState::new("Ann", "World", 0), &GreeterConfig::default());
        let markup = to_html(&tree[2..]);
        assert_eq!(
            markup,
            "<div class=\"slot-content\"><slot><em>💡 Add your own content here using &lt;slot&gt;</em></slot></div>"
        );
    }

    #[test]
    fn spanish_catalogue() {
        let config = GreeterConfig::builder().locale(Locale::Spanish).build();
        let state = WidgetState::new("", &config.messages.fallback_name, 1);
        let text = text_of(&render(&state, &config));
        assert!(text.contains("¡Hola, Mundo!"));
        assert!(text.contains("Contador: 1 clicks"));
        assert!(text.contains("Saludar (1)"));
    }

    #[test]
    fn names_are_escaped_in_markup() {
        let tree = render(
            &WidgetState::new("<img onerror=x>", "World", 0),
            &GreeterConfig::default(),
        );
        let markup = to_html(&tree);
        assert!(!markup.contains("<img"));
        assert!(markup.contains("&lt;img onerror=x&gt;"));
    }
}
