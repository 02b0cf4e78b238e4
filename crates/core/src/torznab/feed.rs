//! RSS/Torznab document rendering.
//!
//! Documents are assembled as a tree of [`XmlElement`]s and then streamed
//! through `quick_xml`, which escapes text and attribute values. Titles come
//! straight from the release index, so nothing is ever concatenated by hand.

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use thiserror::Error;

use super::{CapabilitiesDescriptor, CategoryDescriptor, ReleaseRecord};

const TORZNAB_NAMESPACE: &str = "http://torznab.com/schemas/2015/feed";
const ATOM_NAMESPACE: &str = "http://www.w3.org/2005/Atom";

/// RFC 1123 date, always in GMT.
const PUB_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Enclosure type understood by Torznab clients as a torrent payload.
const ENCLOSURE_TYPE: &str = "application/x-bittorrent";

/// Torznab error code for an unknown `t` function.
pub const NO_SUCH_FUNCTION: u16 = 202;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("Failed to write XML document: {0}")]
    Write(String),
}

/// A node in an XML document tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlNode {
    Element(XmlElement),
    Text(String),
}

/// An XML element with attributes and children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlElement {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<XmlNode>,
}

impl XmlElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Element holding a single text node.
    pub fn with_text(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(name).text(text)
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.attributes.push((name.into(), value.to_string()));
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.children.push(XmlNode::Text(text.into()));
        self
    }

    pub fn child(mut self, child: XmlElement) -> Self {
        self.children.push(XmlNode::Element(child));
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = XmlElement>) -> Self {
        self.children
            .extend(children.into_iter().map(XmlNode::Element));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Render as a standalone UTF-8 document with an XML declaration.
    pub fn to_document(&self) -> Result<Vec<u8>, FeedError> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
        emit(
            &mut writer,
            Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)),
        )?;
        self.write_to(&mut writer)?;
        Ok(writer.into_inner())
    }

    fn write_to(&self, writer: &mut Writer<Vec<u8>>) -> Result<(), FeedError> {
        let mut start = BytesStart::new(self.name.as_str());
        for (name, value) in &self.attributes {
            start.push_attribute((name.as_str(), value.as_str()));
        }

        if self.children.is_empty() {
            return emit(writer, Event::Empty(start));
        }

        emit(writer, Event::Start(start))?;
        for child in &self.children {
            match child {
                XmlNode::Element(element) => element.write_to(writer)?,
                XmlNode::Text(text) => emit(writer, Event::Text(BytesText::new(text)))?,
            }
        }
        emit(writer, Event::End(BytesEnd::new(self.name.as_str())))
    }
}

fn emit(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<(), FeedError> {
    writer
        .write_event(event)
        .map_err(|e| FeedError::Write(e.to_string()))
}

/// Renders Torznab documents: result feeds, capabilities and errors.
#[derive(Debug, Clone)]
pub struct FeedSerializer {
    channel_title: String,
}

impl FeedSerializer {
    pub fn new(channel_title: impl Into<String>) -> Self {
        Self {
            channel_title: channel_title.into(),
        }
    }

    /// Render a result feed. An empty slice yields a valid, item-less channel.
    pub fn serialize(&self, records: &[ReleaseRecord]) -> Result<Vec<u8>, FeedError> {
        self.feed_document(records).to_document()
    }

    /// Render the `t=caps` document.
    pub fn capabilities(&self, caps: &CapabilitiesDescriptor) -> Result<Vec<u8>, FeedError> {
        capabilities_document(caps).to_document()
    }

    /// Render a Torznab `<error>` document.
    pub fn error(&self, code: u16, description: &str) -> Result<Vec<u8>, FeedError> {
        XmlElement::new("error")
            .attr("code", code)
            .attr("description", description)
            .to_document()
    }

    fn feed_document(&self, records: &[ReleaseRecord]) -> XmlElement {
        let channel = XmlElement::new("channel")
            .child(XmlElement::with_text("title", self.channel_title.as_str()))
            .child(XmlElement::with_text(
                "description",
                format!("{} Torznab feed", self.channel_title),
            ))
            .children(records.iter().map(item_element));

        XmlElement::new("rss")
            .attr("version", "2.0")
            .attr("xmlns:atom", ATOM_NAMESPACE)
            .attr("xmlns:torznab", TORZNAB_NAMESPACE)
            .child(channel)
    }
}

fn item_element(record: &ReleaseRecord) -> XmlElement {
    let size = record.size_bytes();

    XmlElement::new("item")
        .child(XmlElement::with_text("title", record.title()))
        .child(XmlElement::with_text("guid", record.info_hash()).attr("isPermaLink", "false"))
        .child(XmlElement::with_text("link", record.link()))
        .child(XmlElement::with_text(
            "pubDate",
            record.published_at().format(PUB_DATE_FORMAT).to_string(),
        ))
        .child(XmlElement::with_text("category", record.category().to_string()))
        .child(XmlElement::with_text("size", size.to_string()))
        .child(
            XmlElement::new("enclosure")
                .attr("url", record.link())
                .attr("length", size)
                .attr("type", ENCLOSURE_TYPE),
        )
        .child(torznab_attr("category", record.category()))
        .child(torznab_attr("size", size))
        .child(torznab_attr("infohash", record.info_hash()))
        .child(torznab_attr("magneturl", record.link()))
}

fn torznab_attr(name: &str, value: impl ToString) -> XmlElement {
    XmlElement::new("torznab:attr")
        .attr("name", name)
        .attr("value", value)
}

fn capabilities_document(caps: &CapabilitiesDescriptor) -> XmlElement {
    let searching = XmlElement::new("searching").children(caps.searching.iter().map(|mode| {
        XmlElement::new(mode.name)
            .attr("available", if mode.available { "yes" } else { "no" })
            .attr("supportedParams", mode.supported_params)
    }));

    XmlElement::new("caps")
        .child(XmlElement::new("server").attr("title", caps.server_title.as_str()))
        .child(
            XmlElement::new("limits")
                .attr("max", caps.limit_max)
                .attr("default", caps.limit_default),
        )
        .child(searching)
        .child(XmlElement::new("categories").children(caps.categories.iter().map(category_element)))
}

fn category_element(category: &CategoryDescriptor) -> XmlElement {
    XmlElement::new("category")
        .attr("id", category.id)
        .attr("name", category.name)
        .children(category.subcategories.iter().map(|sub| {
            XmlElement::new("subcat")
                .attr("id", sub.id)
                .attr("name", sub.name)
        }))
}
