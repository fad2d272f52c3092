//! Configuration, variants and message catalogues.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::GreeterError;

/// Fallback name used when a catalogue leaves its own blank.
const DEFAULT_FALLBACK_NAME: &str = "World";

/// The two interchangeable implementations of the greeter contract.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Observable state, diff-and-patch rendering.
    #[default]
    Reactive,
    /// Full markup replacement on every render, delegated listeners.
    Vanilla,
}

/// How a render reaches the host surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderStrategy {
    /// Serialise the whole tree and replace the host content.
    FullReplace,
    /// Diff against the previous tree and apply only the changes.
    Patch,
}

impl Variant {
    /// Every variant, in registration order.
    pub const ALL: [Self; 2] = [Self::Reactive, Self::Vanilla];

    /// Custom element tag this variant registers under.
    #[must_use]
    pub const fn tag_name(self) -> &'static str {
        match self {
            Self::Reactive => "reactive-greeter",
            Self::Vanilla => "vanilla-greeter",
        }
    }

    /// Lowercase identifier used in event payloads and configuration.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Reactive => "reactive",
            Self::Vanilla => "vanilla",
        }
    }

    /// The rendering strategy this variant uses.
    #[must_use]
    pub const fn strategy(self) -> RenderStrategy {
        match self {
            Self::Reactive => RenderStrategy::Patch,
            Self::Vanilla => RenderStrategy::FullReplace,
        }
    }

    /// Heading shown at the top of the widget.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Reactive => "⚡ Reactive Web Component",
            Self::Vanilla => "🍦 Vanilla Web Component",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Variant {
    type Err = GreeterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reactive" | "reactive-greeter" => Ok(Self::Reactive),
            "vanilla" | "vanilla-greeter" => Ok(Self::Vanilla),
            _ => Err(GreeterError::UnknownVariant(s.to_owned())),
        }
    }
}

/// Languages with a built-in [`Messages`] catalogue.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Locale {
    /// English.
    #[default]
    #[serde(rename = "en")]
    English,
    /// Spanish.
    #[serde(rename = "es")]
    Spanish,
}

impl Locale {
    /// Returns the built-in catalogue for this locale.
    #[must_use]
    pub fn messages(self) -> Messages {
        match self {
            Self::English => Messages::english(),
            Self::Spanish => Messages::spanish(),
        }
    }
}

impl FromStr for Locale {
    type Err = GreeterError;

    /// Accepts a BCP 47 tag and matches on its primary language subtag.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let primary = s.trim().split(['-', '_']).next().unwrap_or_default();
        match primary.to_ascii_lowercase().as_str() {
            "en" => Ok(Self::English),
            "es" => Ok(Self::Spanish),
            _ => Err(GreeterError::UnknownLocale(s.to_owned())),
        }
    }
}

/// Every user-visible string of the widget.
///
/// Partial JSON catalogues are filled in from the English defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Messages {
    /// Name used whenever the entered name is empty.
    pub fallback_name: String,
    /// Text preceding the name in the greeting, e.g. `Hello, `.
    pub greeting: String,
    /// Label in front of the count.
    pub counter_label: String,
    /// Unit after the count.
    pub clicks: String,
    /// Label of the name input.
    pub input_label: String,
    /// Placeholder of the name input.
    pub placeholder: String,
    /// Label of the greet button; the count is appended in parentheses.
    pub button_label: String,
    /// Shown in the slot area when the host supplies no content.
    pub slot_hint: String,
    /// Caption of the reactive property read-out.
    pub reactive_properties: String,
    /// Subtitle of the reactive variant.
    pub reactive_subtitle: String,
    /// Subtitle of the vanilla variant.
    pub vanilla_subtitle: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self::english()
    }
}

impl Messages {
    /// English catalogue.
    #[must_use]
    pub fn english() -> Self {
        Self {
            fallback_name: DEFAULT_FALLBACK_NAME.into(),
            greeting: "Hello, ".into(),
            counter_label: "Counter".into(),
            clicks: "clicks".into(),
            input_label: "Name:".into(),
            placeholder: "Type a name...".into(),
            button_label: "Greet".into(),
            slot_hint: "Add your own content here using <slot>".into(),
            reactive_properties: "Reactive properties".into(),
            reactive_subtitle: "Component with automatic reactivity".into(),
            vanilla_subtitle: "Native component without dependencies".into(),
        }
    }

    /// Spanish catalogue.
    #[must_use]
    pub fn spanish() -> Self {
        Self {
            fallback_name: "Mundo".into(),
            greeting: "¡Hola, ".into(),
            counter_label: "Contador".into(),
            clicks: "clicks".into(),
            input_label: "Nombre:".into(),
            placeholder: "Escribe un nombre...".into(),
            button_label: "Saludar".into(),
            slot_hint: "Aquí puedes agregar contenido usando <slot>".into(),
            reactive_properties: "Propiedades reactivas".into(),
            reactive_subtitle: "Componente con reactividad automática".into(),
            vanilla_subtitle: "Componente nativo sin dependencias".into(),
        }
    }

    /// Name substituted for blank input. Never blank itself.
    #[must_use]
    pub fn fallback_name(&self) -> &str {
        if self.fallback_name.trim().is_empty() {
            DEFAULT_FALLBACK_NAME
        } else {
            &self.fallback_name
        }
    }

    /// Message carried in a notification payload.
    #[must_use]
    pub fn composed_message(&self, name: &str, count: u64) -> String {
        format!("{}{name}! (Click #{count})", self.greeting)
    }

    /// Subtitle for the given variant.
    #[must_use]
    pub fn subtitle(&self, variant: Variant) -> &str {
        match variant {
            Variant::Reactive => &self.reactive_subtitle,
            Variant::Vanilla => &self.vanilla_subtitle,
        }
    }
}

/// Full configuration of one greeter instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GreeterConfig {
    /// Implementation variant.
    pub variant: Variant,
    /// Strings used by the template.
    pub messages: Messages,
    /// Name before any edit. `None` or blank uses the fallback name.
    pub initial_name: Option<String>,
    /// Count before any click.
    pub initial_count: u64,
}

impl Default for GreeterConfig {
    fn default() -> Self {
        GreeterConfigBuilder::new().build()
    }
}

impl GreeterConfig {
    /// Starts a builder with default settings.
    #[must_use]
    pub const fn builder() -> GreeterConfigBuilder {
        GreeterConfigBuilder::new()
    }

    /// Parses a JSON configuration document.
    ///
    /// All keys are optional: `variant`, `locale`, `messages`, `initialName`,
    /// `initialCount`. Explicit `messages` take precedence over `locale`.
    ///
    /// # Errors
    ///
    /// Returns [`GreeterError::InvalidConfig`] if the document is not valid JSON or a
    /// value has the wrong type.
    pub fn from_json(json: &str) -> Result<Self, GreeterError> {
        GreeterConfigBuilder::from_json(json).map(GreeterConfigBuilder::build)
    }

    /// Builds the configuration of a host element from its attributes.
    ///
    /// `config` is read first. `lang` then selects the catalogue, unless the JSON
    /// supplied explicit `messages`, which always win. `name` and `count` override
    /// the JSON's initial values, with `count` parsed leniently. Invalid JSON and
    /// unknown languages are logged and ignored.
    #[must_use]
    pub fn from_attributes(variant: Variant, attributes: HostAttributes<'_>) -> Self {
        let mut builder = attributes.config.map_or_else(Self::builder, |json| {
            GreeterConfigBuilder::from_json(json).unwrap_or_else(|err| {
                warn!(error = %err, "ignoring invalid greeter config attribute");
                Self::builder()
            })
        });
        builder = builder.variant(variant);
        if let Some(lang) = attributes.lang {
            match lang.parse::<Locale>() {
                Ok(locale) => builder = builder.locale(locale),
                Err(err) => debug!(error = %err, "keeping configured messages"),
            }
        }
        if let Some(name) = attributes.name {
            builder = builder.initial_name(name);
        }
        if let Some(count) = attributes.count {
            builder = builder.initial_count_from(count);
        }
        builder.build()
    }

    /// The name the widget starts with, after fallback substitution.
    #[must_use]
    pub fn starting_name(&self) -> String {
        crate::state::WidgetState::sanitize_name(
            self.initial_name.as_deref().unwrap_or_default(),
            self.messages.fallback_name(),
        )
    }
}

/// Raw attribute values of a host element, as read from the DOM.
#[derive(Debug, Default, Clone, Copy)]
pub struct HostAttributes<'a> {
    /// JSON configuration document.
    pub config: Option<&'a str>,
    /// Language tag selecting a built-in catalogue.
    pub lang: Option<&'a str>,
    /// Initial display name.
    pub name: Option<&'a str>,
    /// Initial click count, unparsed.
    pub count: Option<&'a str>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct RawConfig {
    variant: Option<Variant>,
    locale: Option<Locale>,
    messages: Option<Messages>,
    initial_name: Option<String>,
    initial_count: Option<u64>,
}

/// Builder for [`GreeterConfig`].
#[derive(Debug, Clone)]
pub struct GreeterConfigBuilder {
    variant: Variant,
    locale: Locale,
    messages: Option<Messages>,
    initial_name: Option<String>,
    initial_count: u64,
}

impl Default for GreeterConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GreeterConfigBuilder {
    /// Creates a builder for an English reactive greeter.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            variant: Variant::Reactive,
            locale: Locale::English,
            messages: None,
            initial_name: None,
            initial_count: 0,
        }
    }

    /// Starts from a JSON configuration document, see [`GreeterConfig::from_json`].
    ///
    /// # Errors
    ///
    /// Returns [`GreeterError::InvalidConfig`] if the document cannot be decoded.
    pub fn from_json(json: &str) -> Result<Self, GreeterError> {
        let raw: RawConfig = serde_json::from_str(json)?;
        let mut builder = Self::new();
        if let Some(variant) = raw.variant {
            builder = builder.variant(variant);
        }
        if let Some(locale) = raw.locale {
            builder = builder.locale(locale);
        }
        if let Some(messages) = raw.messages {
            builder = builder.messages(messages);
        }
        if let Some(name) = raw.initial_name {
            builder = builder.initial_name(name);
        }
        if let Some(count) = raw.initial_count {
            builder = builder.initial_count(count);
        }
        Ok(builder)
    }

    /// Selects the implementation variant.
    #[must_use]
    pub const fn variant(mut self, variant: Variant) -> Self {
        self.variant = variant;
        self
    }

    /// Selects a built-in message catalogue.
    #[must_use]
    pub const fn locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    /// Overrides the message catalogue entirely.
    #[must_use]
    pub fn messages(mut self, messages: Messages) -> Self {
        self.messages = Some(messages);
        self
    }

    /// Sets the starting name.
    #[must_use]
    pub fn initial_name(mut self, name: impl Into<String>) -> Self {
        self.initial_name = Some(name.into());
        self
    }

    /// Sets the starting count.
    #[must_use]
    pub const fn initial_count(mut self, count: u64) -> Self {
        self.initial_count = count;
        self
    }

    /// Seeds the starting count from an untrusted string, see [`crate::parse_count`].
    #[must_use]
    pub fn initial_count_from(self, raw: &str) -> Self {
        self.initial_count(crate::state::parse_count(raw))
    }

    /// Finalises the configuration.
    ///
    /// A blank fallback name in custom messages is replaced by the locale's.
    #[must_use]
    pub fn build(self) -> GreeterConfig {
        let mut messages = self.messages.unwrap_or_else(|| self.locale.messages());
        if messages.fallback_name.trim().is_empty() {
            messages.fallback_name = self.locale.messages().fallback_name;
        }
        GreeterConfig {
            variant: self.variant,
            messages,
            initial_name: self.initial_name,
            initial_count: self.initial_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{GreeterConfig, HostAttributes, Locale, Messages, RenderStrategy, Variant};
    use crate::error::GreeterError;

    #[test]
    fn variants_parse_from_tags_and_names() {
        assert_eq!("vanilla".parse::<Variant>().unwrap(), Variant::Vanilla);
        assert_eq!(
            "Reactive-Greeter".parse::<Variant>().unwrap(),
            Variant::Reactive
        );
        assert!(matches!(
            "lit".parse::<Variant>(),
            Err(GreeterError::UnknownVariant(name)) if name == "lit"
        ));
    }

    #[test]
    fn variants_pick_their_strategy() {
        assert_eq!(Variant::Reactive.strategy(), RenderStrategy::Patch);
        assert_eq!(Variant::Vanilla.strategy(), RenderStrategy::FullReplace);
    }

    #[test]
    fn locale_matches_primary_subtag() {
        assert_eq!("es-MX".parse::<Locale>().unwrap(), Locale::Spanish);
        assert_eq!("EN_gb".parse::<Locale>().unwrap(), Locale::English);
        assert!("fr".parse::<Locale>().is_err());
    }

    #[test]
    fn json_config_overrides_defaults() {
        let config = GreeterConfig::from_json(
            r#"{"variant":"vanilla","locale":"es","initialName":"Ann","initialCount":3}"#,
        )
        .unwrap();
        assert_eq!(config.variant, Variant::Vanilla);
        assert_eq!(config.messages.fallback_name, "Mundo");
        assert_eq!(config.starting_name(), "Ann");
        assert_eq!(config.initial_count, 3);
    }

    #[test]
    fn empty_json_is_the_default() {
        assert_eq!(GreeterConfig::from_json("{}").unwrap(), GreeterConfig::default());
    }

    #[test]
    fn malformed_json_is_rejected() {
        assert!(matches!(
            GreeterConfig::from_json(r#"{"initialCount":"many"}"#),
            Err(GreeterError::InvalidConfig(_))
        ));
        assert!(GreeterConfig::from_json(r#"{"colour":"red"}"#).is_err());
    }

    #[test]
    fn blank_initial_name_uses_fallback() {
        let config = GreeterConfig::builder().initial_name("  ").build();
        assert_eq!(config.starting_name(), "World");
    }

    #[test]
    fn blank_fallback_name_is_restored() {
        let config = GreeterConfig::from_json(r#"{"messages":{"fallbackName":"  "}}"#).unwrap();
        assert_eq!(config.messages.fallback_name, "World");
        assert_eq!(config.starting_name(), "World");

        let spanish = GreeterConfig::builder()
            .locale(Locale::Spanish)
            .messages(Messages {
                fallback_name: String::new(),
                ..Messages::spanish()
            })
            .build();
        assert_eq!(spanish.messages.fallback_name, "Mundo");
    }

    #[test]
    fn fallback_name_accessor_is_never_blank() {
        let mut messages = Messages::english();
        messages.fallback_name = "\t".into();
        assert_eq!(messages.fallback_name(), "World");
        assert_eq!(Messages::spanish().fallback_name(), "Mundo");
    }

    #[test]
    fn attributes_apply_lang_name_and_count() {
        let config = GreeterConfig::from_attributes(
            Variant::Vanilla,
            HostAttributes {
                lang: Some("es"),
                name: Some("Ann"),
                count: Some("12abc"),
                ..HostAttributes::default()
            },
        );
        assert_eq!(config.variant, Variant::Vanilla);
        assert_eq!(config.messages, Messages::spanish());
        assert_eq!(config.starting_name(), "Ann");
        assert_eq!(config.initial_count, 12);
    }

    #[test]
    fn explicit_messages_win_over_lang_attribute() {
        let config = GreeterConfig::from_attributes(
            Variant::Reactive,
            HostAttributes {
                config: Some(r#"{"messages":{"greeting":"Yo, "}}"#),
                lang: Some("es"),
                ..HostAttributes::default()
            },
        );
        assert_eq!(config.messages.greeting, "Yo, ");
        assert_eq!(config.messages.fallback_name, "World");
    }

    #[test]
    fn lang_attribute_overrides_json_locale() {
        let config = GreeterConfig::from_attributes(
            Variant::Reactive,
            HostAttributes {
                config: Some(r#"{"locale":"es","initialCount":5}"#),
                lang: Some("en-US"),
                count: Some("nope"),
                ..HostAttributes::default()
            },
        );
        assert_eq!(config.messages, Messages::english());
        assert_eq!(config.initial_count, 0);
    }

    #[test]
    fn invalid_attributes_fall_back_to_defaults() {
        let config = GreeterConfig::from_attributes(
            Variant::Vanilla,
            HostAttributes {
                config: Some("{not json"),
                lang: Some("fr"),
                ..HostAttributes::default()
            },
        );
        assert_eq!(
            config,
            GreeterConfig::builder().variant(Variant::Vanilla).build()
        );
    }
}
