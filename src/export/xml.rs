use super::ExportResult;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use std::io::Write;

/// Minimal element tree. Sections are assembled out of order (resource
/// calendars are added to the calendar block while resources are written),
/// so the document is built in memory before serialization.
#[derive(Debug, Clone, PartialEq)]
pub struct XmlElement {
    name: &'static str,
    attributes: Vec<(&'static str, String)>,
    text: Option<String>,
    children: Vec<XmlElement>,
}

impl XmlElement {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            attributes: Vec::new(),
            text: None,
            children: Vec::new(),
        }
    }

    /// Element that only carries text, e.g. `<UID>3</UID>`.
    pub fn text(name: &'static str, value: impl Into<String>) -> Self {
        Self {
            text: Some(value.into()),
            ..Self::new(name)
        }
    }

    pub fn with_attribute(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.attributes.push((key, value.into()));
        self
    }

    pub fn push(&mut self, child: XmlElement) {
        self.children.push(child);
    }

    pub fn push_text(&mut self, name: &'static str, value: impl Into<String>) {
        self.children.push(Self::text(name, value));
    }

    pub fn name(&self) -> &str {
        self.name
    }

    pub fn children(&self) -> &[XmlElement] {
        &self.children
    }

    /// Text of the first child called `name`.
    pub fn child_text(&self, name: &str) -> Option<&str> {
        self.children
            .iter()
            .find(|c| c.name == name)
            .and_then(|c| c.text.as_deref())
    }

    fn write<W: Write>(&self, writer: &mut Writer<W>) -> ExportResult<()> {
        let mut start = BytesStart::new(self.name);
        for (key, value) in &self.attributes {
            start.push_attribute((*key, value.as_str()));
        }

        if self.children.is_empty() {
            match &self.text {
                Some(text) => {
                    writer.write_event(Event::Start(start))?;
                    writer.write_event(Event::Text(BytesText::new(text)))?;
                    writer.write_event(Event::End(BytesEnd::new(self.name)))?;
                }
                None => writer.write_event(Event::Empty(start))?,
            }
            return Ok(());
        }

        writer.write_event(Event::Start(start))?;
        for child in &self.children {
            child.write(writer)?;
        }
        writer.write_event(Event::End(BytesEnd::new(self.name)))?;
        Ok(())
    }
}

/// Serialize a document: declaration, comment banner, root element.
pub fn render_document(banner: &str, root: &XmlElement) -> ExportResult<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;
    writer.write_event(Event::Comment(BytesText::from_escaped(comment_text(banner))))?;
    root.write(&mut writer)?;
    let mut bytes = writer.into_inner();
    bytes.push(b'\n');
    Ok(String::from_utf8(bytes)?)
}

/// Comments may neither contain "--" nor end in "-". A space is put between
/// every pair of adjacent dashes and after a trailing one.
fn comment_text(banner: &str) -> String {
    let mut text = String::with_capacity(banner.len() + 8);
    text.push('\n');
    for ch in banner.chars() {
        if ch == '-' && text.ends_with('-') {
            text.push(' ');
        }
        text.push(ch);
    }
    if text.ends_with('-') {
        text.push(' ');
    }
    text
}
