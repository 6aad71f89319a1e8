use std::fmt::Debug;

#[derive(Clone, PartialEq)]
pub enum XmlNode {
	Element(XmlElement),
	Text(String),
}

#[derive(Clone, PartialEq)]
pub struct XmlElement {
	pub name: String,
	pub attributes: Vec<(String, String)>,
	pub children: Vec<XmlNode>,
}

impl XmlElement {
	pub fn new(name: &str) -> Self {
		Self {
			name: name.to_string(),
			attributes: Vec::new(),
			children: Vec::new(),
		}
	}

	/// Creates `<name>text</name>`.
	pub fn new_text(name: &str, text: &str) -> Self {
		let mut element = Self::new(name);
		element.set_text(text);
		element
	}

	pub fn with_attribute(mut self, key: &str, value: &str) -> Self {
		self.set_attribute(key, value);
		self
	}

	pub fn with_child(mut self, child: XmlElement) -> Self {
		self.push(child);
		self
	}

	/// Name without namespace prefix.
	pub fn local_name(&self) -> &str {
		local_name(&self.name)
	}

	pub fn is(&self, name: &str) -> bool {
		self.local_name() == name
	}

	pub fn attribute(&self, key: &str) -> Option<&str> {
		self.attributes
			.iter()
			.find(|(k, _)| local_name(k) == key)
			.map(|(_, v)| v.as_str())
	}

	pub fn set_attribute(&mut self, key: &str, value: &str) {
		match self.attributes.iter_mut().find(|(k, _)| k == key) {
			Some((_, v)) => *v = value.to_string(),
			None => self.attributes.push((key.to_string(), value.to_string())),
		}
	}

	pub fn push(&mut self, child: XmlElement) {
		self.children.push(XmlNode::Element(child));
	}

	/// Appends a child and returns a mutable reference to it.
	pub fn push_and_get(&mut self, child: XmlElement) -> &mut XmlElement {
		self.children.push(XmlNode::Element(child));
		match self.children.last_mut() {
			Some(XmlNode::Element(element)) => element,
			_ => unreachable!("an element was just pushed"),
		}
	}

	pub fn elements(&self) -> impl Iterator<Item = &XmlElement> {
		self.children.iter().filter_map(|node| match node {
			XmlNode::Element(element) => Some(element),
			XmlNode::Text(_) => None,
		})
	}

	pub fn elements_mut(&mut self) -> impl Iterator<Item = &mut XmlElement> {
		self.children.iter_mut().filter_map(|node| match node {
			XmlNode::Element(element) => Some(element),
			XmlNode::Text(_) => None,
		})
	}

	/// First direct child with the given local name.
	pub fn child(&self, name: &str) -> Option<&XmlElement> {
		self.elements().find(|e| e.is(name))
	}

	pub fn child_mut(&mut self, name: &str) -> Option<&mut XmlElement> {
		self.elements_mut().find(|e| e.is(name))
	}

	pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlElement> + 'a {
		self.elements().filter(move |e| e.is(name))
	}

	/// Depth-first search for the first descendant with the given local name.
	pub fn descendant(&self, name: &str) -> Option<&XmlElement> {
		for child in self.elements() {
			if child.is(name) {
				return Some(child);
			}
			if let Some(found) = child.descendant(name) {
				return Some(found);
			}
		}
		None
	}

	/// Number of descendants with the given local name, at any depth.
	pub fn count_descendants(&self, name: &str) -> usize {
		self.elements()
			.map(|child| usize::from(child.is(name)) + child.count_descendants(name))
			.sum()
	}

	/// Concatenated text content of this element and its descendants.
	pub fn text(&self) -> String {
		let mut text = String::new();
		collect_text(self, &mut text);
		text
	}

	/// Trimmed text of the first direct child with the given name, `None` if missing or empty.
	pub fn child_text(&self, name: &str) -> Option<String> {
		self.child(name).map(|c| c.text().trim().to_string()).filter(|t| !t.is_empty())
	}

	/// Replaces all children with a single text node.
	pub fn set_text(&mut self, text: &str) {
		self.children = vec![XmlNode::Text(text.to_string())];
	}
}

fn collect_text(element: &XmlElement, text: &mut String) {
	for node in &element.children {
		match node {
			XmlNode::Text(t) => text.push_str(t),
			XmlNode::Element(e) => collect_text(e, text),
		}
	}
}

pub(crate) fn local_name(name: &str) -> &str {
	name.rsplit(':').next().unwrap_or(name)
}

impl Debug for XmlElement {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let mut s = f.debug_struct(&self.name);
		for (key, value) in &self.attributes {
			s.field(&format!("@{key}"), value);
		}
		s.field("children", &self.children).finish()
	}
}

impl Debug for XmlNode {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			XmlNode::Element(e) => e.fmt(f),
			XmlNode::Text(t) => t.fmt(f),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn example() -> XmlElement {
		XmlElement::new("Folder")
			.with_child(XmlElement::new_text("name", "  Buffers "))
			.with_child(
				XmlElement::new("kml:Placemark")
					.with_attribute("id", "p1")
					.with_child(XmlElement::new_text("name", "Adjacent Area")),
			)
	}

	#[test]
	fn child_lookup_uses_local_names() {
		let folder = example();
		let placemark = folder.child("Placemark").unwrap();
		assert_eq!(placemark.attribute("id"), Some("p1"));
		assert_eq!(placemark.child_text("name").as_deref(), Some("Adjacent Area"));
		assert_eq!(folder.child_text("name").as_deref(), Some("Buffers"));
		assert_eq!(folder.child_text("description"), None);
	}

	#[test]
	fn descendant_search_is_depth_first() {
		let folder = example();
		assert_eq!(folder.descendant("name").unwrap().text(), "  Buffers ");
		assert!(folder.descendant("Polygon").is_none());
	}

	#[test]
	fn counts_nested_descendants() {
		let document = XmlElement::new("Document")
			.with_child(example())
			.with_child(XmlElement::new("Placemark"));
		assert_eq!(document.count_descendants("Placemark"), 2);
		assert_eq!(document.count_descendants("name"), 2);
		assert_eq!(document.count_descendants("Polygon"), 0);
	}

	#[test]
	fn set_attribute_replaces_in_place() {
		let mut element = XmlElement::new("Data").with_attribute("name", "a");
		element.set_attribute("name", "b");
		assert_eq!(element.attributes, vec![("name".to_string(), "b".to_string())]);
	}

	#[test]
	fn text_concatenates_descendants() {
		let element = XmlElement::new("a")
			.with_child(XmlElement::new_text("b", "1"))
			.with_child(XmlElement::new_text("c", "2"));
		assert_eq!(element.text(), "12");
	}
}
