use super::{XmlElement, XmlNode};
use anyhow::{Context, Result, anyhow, bail, ensure};
use quick_xml::{Reader, events::Event};
use std::fmt::Display;

/// Parses a complete XML document into its root element.
///
/// The document must be well-formed: mismatched or unclosed tags, a missing root or content after
/// the root are errors. Whitespace-only text between elements is dropped.
pub fn parse_xml(text: &str) -> Result<XmlElement> {
	let mut reader = Reader::from_str(text);
	reader.config_mut().trim_text(true);

	let mut stack: Vec<XmlElement> = Vec::new();
	let mut root: Option<XmlElement> = None;

	loop {
		let position = reader.buffer_position();
		let event = reader
			.read_event()
			.with_context(|| format!("malformed XML at byte {position}"))?;

		match event {
			Event::Start(start) => {
				ensure!(root.is_none(), "unexpected element after the root element at byte {position}");
				stack.push(start_element(&start)?);
			}
			Event::Empty(start) => {
				ensure!(root.is_none(), "unexpected element after the root element at byte {position}");
				close_element(start_element(&start)?, &mut stack, &mut root);
			}
			Event::End(_) => {
				let element = stack
					.pop()
					.ok_or_else(|| anyhow!("unexpected closing tag at byte {position}"))?;
				close_element(element, &mut stack, &mut root);
			}
			Event::Text(text) => {
				let text = text.unescape().with_context(|| format!("invalid text at byte {position}"))?;
				push_text(&mut stack, &text, position)?;
			}
			Event::CData(data) => {
				let text = String::from_utf8(data.into_inner().into_owned())
					.with_context(|| format!("invalid UTF-8 in CDATA at byte {position}"))?;
				push_text(&mut stack, &text, position)?;
			}
			Event::Eof => break,
			Event::Comment(_) | Event::Decl(_) | Event::PI(_) | Event::DocType(_) => {}
		}
	}

	if let Some(open) = stack.last() {
		bail!("unexpected end of document: <{}> is not closed", open.name);
	}
	root.ok_or_else(|| anyhow!("document has no root element"))
}

fn start_element(start: &quick_xml::events::BytesStart) -> Result<XmlElement> {
	let name = String::from_utf8(start.name().as_ref().to_vec()).context("invalid UTF-8 in element name")?;
	let mut element = XmlElement::new(&name);
	for attribute in start.attributes() {
		let attribute = attribute.with_context(|| format!("invalid attribute in <{name}>"))?;
		let key = String::from_utf8(attribute.key.as_ref().to_vec()).context("invalid UTF-8 in attribute name")?;
		let value = attribute
			.unescape_value()
			.with_context(|| format!("invalid value of attribute '{key}' in <{name}>"))?;
		element.attributes.push((key, value.into_owned()));
	}
	Ok(element)
}

fn close_element(element: XmlElement, stack: &mut [XmlElement], root: &mut Option<XmlElement>) {
	match stack.last_mut() {
		Some(parent) => parent.children.push(XmlNode::Element(element)),
		None => *root = Some(element),
	}
}

fn push_text(stack: &mut [XmlElement], text: &str, position: impl Display) -> Result<()> {
	match stack.last_mut() {
		Some(parent) => {
			if let Some(XmlNode::Text(previous)) = parent.children.last_mut() {
				previous.push_str(text);
			} else {
				parent.children.push(XmlNode::Text(text.to_string()));
			}
			Ok(())
		}
		None if text.trim().is_empty() => Ok(()),
		None => bail!("text outside of the root element at byte {position}"),
	}
}
