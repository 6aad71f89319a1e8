use super::{XmlElement, XmlNode};
use anyhow::Result;
use quick_xml::{
	Writer,
	events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
};
use std::io::Write;

/// Renders a document with an XML declaration, indenting nested elements with tabs.
pub fn render_xml(root: &XmlElement) -> Result<String> {
	let mut writer = Writer::new_with_indent(Vec::new(), b'\t', 1);
	writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
	write_element(&mut writer, root)?;
	let mut buffer = writer.into_inner();
	buffer.push(b'\n');
	Ok(String::from_utf8(buffer)?)
}

/// Renders a single element without declaration or indentation.
pub fn render_fragment(element: &XmlElement) -> Result<String> {
	let mut writer = Writer::new(Vec::new());
	write_element(&mut writer, element)?;
	Ok(String::from_utf8(writer.into_inner())?)
}

fn write_element<W: Write>(writer: &mut Writer<W>, element: &XmlElement) -> Result<()> {
	let start = BytesStart::new(element.name.as_str())
		.with_attributes(element.attributes.iter().map(|(k, v)| (k.as_str(), v.as_str())));

	if element.children.is_empty() {
		writer.write_event(Event::Empty(start))?;
		return Ok(());
	}

	writer.write_event(Event::Start(start))?;
	for node in &element.children {
		match node {
			XmlNode::Text(text) => writer.write_event(Event::Text(BytesText::new(text)))?,
			XmlNode::Element(child) => write_element(writer, child)?,
		}
	}
	writer.write_event(Event::End(BytesEnd::new(element.name.as_str())))?;
	Ok(())
}
