use crossterm::style::{Attribute, Color, ContentStyle, StyledContent};
use greeter_core::{Element, Node};

/// Tags laid out on their own line.
const BLOCK_TAGS: &[&str] = &["div", "h3", "p", "slot"];

/// Represents a fully resolved frame ready to be drawn to the terminal.
#[derive(Debug, Default, Clone)]
pub struct RenderFrame {
    lines: Vec<RenderLine>,
}

impl RenderFrame {
    /// Appends a line.
    pub fn push(&mut self, line: RenderLine) {
        self.lines.push(line);
    }

    /// Returns the set of lines recorded in this frame.
    #[must_use]
    pub fn lines(&self) -> &[RenderLine] {
        &self.lines
    }

    /// Appends a single-segment line.
    pub fn push_text(&mut self, text: impl Into<String>, style: ContentStyle) {
        let mut line = RenderLine::default();
        line.push(RenderSegment::styled(text, style));
        self.lines.push(line);
    }

    /// Appends a blank line.
    pub fn push_blank(&mut self) {
        self.lines.push(RenderLine::default());
    }

    /// The frame's text without styling, one line per row.
    #[must_use]
    pub fn plain_text(&self) -> String {
        self.lines
            .iter()
            .map(RenderLine::plain_text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Representation of a single line in the terminal output.
#[derive(Debug, Default, Clone)]
pub struct RenderLine {
    segments: Vec<RenderSegment>,
}

impl RenderLine {
    fn new(indent: usize) -> Self {
        let mut segments = Vec::new();
        if indent > 0 {
            segments.push(RenderSegment::plain(" ".repeat(indent * 2)));
        }
        Self { segments }
    }

    /// Pushes a new segment onto the line.
    pub fn push(&mut self, segment: RenderSegment) {
        self.segments.push(segment);
    }

    /// Returns the list of segments contained in this line.
    #[must_use]
    pub fn segments(&self) -> &[RenderSegment] {
        &self.segments
    }

    /// The line's text without styling.
    #[must_use]
    pub fn plain_text(&self) -> String {
        self.segments.iter().map(RenderSegment::content).collect()
    }
}

/// Atomic piece of content rendered on a line.
#[derive(Debug, Clone)]
pub struct RenderSegment {
    content: String,
    style: ContentStyle,
}

impl RenderSegment {
    /// Creates a plain (unstyled) segment.
    pub fn plain(content: impl Into<String>) -> Self {
        Self::styled(content, ContentStyle::new())
    }

    /// Creates a segment with custom styling.
    pub fn styled(content: impl Into<String>, style: ContentStyle) -> Self {
        Self {
            content: content.into(),
            style,
        }
    }

    /// Borrows the raw text stored in this segment.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Converts this segment into a [`StyledContent`] for printing through crossterm.
    #[must_use]
    pub fn as_styled_content(&self) -> StyledContent<String> {
        self.style.apply(self.content.clone())
    }
}

/// Lays a greeter's node forest out as terminal lines.
///
/// Block elements start a new line; text and inline elements flow into the
/// current one. Inputs and buttons are drawn as bracketed controls, and the
/// `<slot>` fallback is swapped for host-supplied text when there is any.
#[derive(Debug, Default)]
pub struct Renderer {
    slot: Option<String>,
}

impl Renderer {
    /// Creates a renderer that shows slot fallbacks.
    #[must_use]
    pub const fn new() -> Self {
        Self { slot: None }
    }

    /// Sets the text projected into the widget's slot.
    #[must_use]
    pub fn with_slot(mut self, slot: Option<String>) -> Self {
        self.slot = slot.filter(|text| !text.trim().is_empty());
        self
    }

    /// Renders a forest into a frame, highlighting the element with id `focused`.
    #[must_use]
    pub fn render(&self, tree: &[Node], focused: Option<&str>) -> RenderFrame {
        let mut frame = RenderFrame::default();
        let context = Context {
            indent: 0,
            style: ContentStyle::new(),
            focused,
        };
        self.render_nodes(&mut frame, &context, tree);
        frame
    }

    fn render_nodes(&self, frame: &mut RenderFrame, context: &Context<'_>, nodes: &[Node]) {
        let mut pending: Option<RenderLine> = None;
        for node in nodes {
            match node {
                Node::Element(element) if is_block(element) => {
                    if let Some(line) = pending.take() {
                        frame.push(line);
                    }
                    self.render_block(frame, context, element);
                }
                inline => {
                    let line = pending.get_or_insert_with(|| RenderLine::new(context.indent));
                    Self::render_inline(line, context, inline);
                }
            }
        }
        if let Some(line) = pending {
            frame.push(line);
        }
    }

    fn render_block(&self, frame: &mut RenderFrame, context: &Context<'_>, element: &Element) {
        if element.tag == "slot"
            && let Some(text) = &self.slot
        {
            let mut line = RenderLine::new(context.indent);
            line.push(RenderSegment::plain(text.clone()));
            frame.push(line);
            return;
        }

        let class = element.attribute("class").unwrap_or_default();
        let mut child = context.with_style(style_for(element));
        if matches!(class, "content" | "slot-content") {
            child.indent += 1;
        }
        if class == "slot-content" {
            frame.push_blank();
        }
        self.render_nodes(frame, &child, &element.children);
        if class == "header" {
            frame.push_blank();
        }
    }

    fn render_inline(line: &mut RenderLine, context: &Context<'_>, node: &Node) {
        match node {
            Node::Text(text) => line.push(RenderSegment::styled(text.clone(), context.style)),
            Node::Element(element) => match element.tag.as_str() {
                "input" => {
                    let value = element.attribute("value").unwrap_or_default();
                    let mut style = ContentStyle::new();
                    if element.attribute("id").is_some() && element.attribute("id") == context.focused {
                        style.attributes.set(Attribute::Reverse);
                    }
                    line.push(RenderSegment::plain(" ["));
                    line.push(RenderSegment::styled(value.to_owned(), style));
                    line.push(RenderSegment::plain("]"));
                }
                "button" => {
                    let mut style = ContentStyle::new();
                    style.attributes.set(Attribute::Bold);
                    style.foreground_color = Some(Color::Green);
                    let label = Node::Element(element.clone()).text_content();
                    line.push(RenderSegment::styled(format!("< {label} >"), style));
                }
                _ => {
                    let child = context.with_style(style_for(element));
                    for node in &element.children {
                        Self::render_inline(line, &child, node);
                    }
                }
            },
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Context<'a> {
    indent: usize,
    style: ContentStyle,
    focused: Option<&'a str>,
}

impl Context<'_> {
    fn with_style(&self, extra: ContentStyle) -> Self {
        let mut style = self.style;
        for attribute in [Attribute::Bold, Attribute::Italic, Attribute::Dim, Attribute::Underlined] {
            if extra.attributes.has(attribute) {
                style.attributes.set(attribute);
            }
        }
        if extra.foreground_color.is_some() {
            style.foreground_color = extra.foreground_color;
        }
        Self { style, ..*self }
    }
}

fn is_block(element: &Element) -> bool {
    BLOCK_TAGS.contains(&element.tag.as_str())
}

fn style_for(element: &Element) -> ContentStyle {
    let mut style = ContentStyle::new();
    match element.tag.as_str() {
        "h3" => {
            style.attributes.set(Attribute::Bold);
            style.attributes.set(Attribute::Underlined);
        }
        "strong" => style.attributes.set(Attribute::Bold),
        "em" => style.attributes.set(Attribute::Italic),
        "p" => style.attributes.set(Attribute::Dim),
        _ => {}
    }
    match element.attribute("class") {
        Some("greeting") => style.foreground_color = Some(Color::Cyan),
        Some("counter") => style.foreground_color = Some(Color::Yellow),
        Some("reactive-demo") => style.attributes.set(Attribute::Dim),
        _ => {}
    }
    style
}
