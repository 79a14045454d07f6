//! Plain-text and restricted-HTML sanitizers
//!
//! Three pure functions with a strict ordering contract:
//!
//! - [`sanitize_text`] produces plain text, no markup survives
//! - [`sanitize_html`] keeps an allow-list of formatting tags and safe
//!   attributes, drops everything else
//! - [`balance_tags`] closes/reorders unbalanced tags so the result is a
//!   well-formed fragment
//!
//! `balance_tags` must only ever run on output of `sanitize_html`; balancing
//! unsanitized input could resurrect structure the sanitizer removed.

use regex::Regex;
use std::sync::OnceLock;

/// Tags allowed in rich-text option fields, with their allowed attributes.
/// Roughly the subset a blog post body would allow.
const ALLOWED_TAGS: &[(&str, &[&str])] = &[
	("a", &["href", "title", "target", "rel"]),
	("b", &[]),
	("blockquote", &["cite"]),
	("br", &[]),
	("code", &[]),
	("del", &[]),
	("em", &[]),
	("hr", &[]),
	("i", &[]),
	("img", &["src", "alt", "width", "height"]),
	("li", &[]),
	("ol", &[]),
	("p", &[]),
	("pre", &[]),
	("s", &[]),
	("span", &[]),
	("strong", &[]),
	("u", &[]),
	("ul", &[]),
];

const VOID_TAGS: &[&str] = &["br", "hr", "img"];

fn is_void(name: &str) -> bool {
	VOID_TAGS.contains(&name)
}

fn allowed_attrs(name: &str) -> Option<&'static [&'static str]> {
	ALLOWED_TAGS.iter().find(|(n, _)| *n == name).map(|(_, attrs)| *attrs)
}

fn script_re() -> &'static Regex {
	static RE: OnceLock<Regex> = OnceLock::new();
	RE.get_or_init(|| Regex::new(r"(?is)<script[^>]*>.*?</script\s*>").unwrap())
}

fn style_re() -> &'static Regex {
	static RE: OnceLock<Regex> = OnceLock::new();
	RE.get_or_init(|| Regex::new(r"(?is)<style[^>]*>.*?</style\s*>").unwrap())
}

fn tag_re() -> &'static Regex {
	static RE: OnceLock<Regex> = OnceLock::new();
	RE.get_or_init(|| Regex::new(r"<[^>]*>").unwrap())
}

/// Sanitize a single-line text field.
///
/// Strips markup (script/style elements lose their contents too), drops
/// control characters, collapses whitespace runs to single spaces and trims.
/// The result contains no tags whatsoever.
pub fn sanitize_text(input: &str) -> String {
	let stripped = script_re().replace_all(input, "");
	let stripped = style_re().replace_all(&stripped, "");
	let stripped = tag_re().replace_all(&stripped, "");

	let mut out = String::with_capacity(stripped.len());
	let mut pending_space = false;
	for c in stripped.chars() {
		if c.is_whitespace() || c.is_control() {
			pending_space = true;
		} else {
			if pending_space && !out.is_empty() {
				out.push(' ');
			}
			pending_space = false;
			out.push(c);
		}
	}
	out
}

// Tag scanner //
//*************//

struct RawTag {
	name: String,
	closing: bool,
	attrs: Vec<(String, Option<String>)>,
	/// Bytes consumed from the input, including the angle brackets.
	len: usize,
}

/// Parse one tag starting at a `<`. Returns None when the input is not a
/// well-formed tag (no closing `>`, empty name, unterminated quote).
fn parse_tag(s: &str) -> Option<RawTag> {
	let bytes = s.as_bytes();
	let mut i = 1;
	let closing = if bytes.get(i) == Some(&b'/') {
		i += 1;
		true
	} else {
		false
	};

	let name_start = i;
	while i < bytes.len() && bytes[i].is_ascii_alphanumeric() {
		i += 1;
	}
	if i == name_start {
		return None;
	}
	let name = s[name_start..i].to_ascii_lowercase();

	let mut attrs = Vec::new();
	loop {
		while i < bytes.len() && (bytes[i].is_ascii_whitespace() || bytes[i] == b'/') {
			i += 1;
		}
		if i >= bytes.len() {
			return None;
		}
		if bytes[i] == b'>' {
			i += 1;
			break;
		}

		let attr_start = i;
		while i < bytes.len()
			&& !bytes[i].is_ascii_whitespace()
			&& bytes[i] != b'='
			&& bytes[i] != b'>'
			&& bytes[i] != b'/'
		{
			i += 1;
		}
		if i == attr_start {
			return None;
		}
		let attr_name = s[attr_start..i].to_ascii_lowercase();

		while i < bytes.len() && bytes[i].is_ascii_whitespace() {
			i += 1;
		}
		let mut value = None;
		if bytes.get(i) == Some(&b'=') {
			i += 1;
			while i < bytes.len() && bytes[i].is_ascii_whitespace() {
				i += 1;
			}
			if i < bytes.len() && (bytes[i] == b'"' || bytes[i] == b'\'') {
				let quote = bytes[i];
				i += 1;
				let value_start = i;
				while i < bytes.len() && bytes[i] != quote {
					i += 1;
				}
				if i >= bytes.len() {
					return None;
				}
				value = Some(s[value_start..i].to_string());
				i += 1;
			} else {
				let value_start = i;
				while i < bytes.len() && !bytes[i].is_ascii_whitespace() && bytes[i] != b'>' {
					i += 1;
				}
				value = Some(s[value_start..i].to_string());
			}
		}
		attrs.push((attr_name, value));
	}

	Some(RawTag { name, closing, attrs, len: i })
}

fn escape_attr(value: &str) -> String {
	value
		.replace('&', "&amp;")
		.replace('"', "&quot;")
		.replace('<', "&lt;")
		.replace('>', "&gt;")
}

/// URL schemes that must never appear in href/src attributes. Whitespace and
/// control characters are ignored when matching, `java\nscript:` counts.
fn is_unsafe_url(value: &str) -> bool {
	let compact: String = value
		.chars()
		.filter(|c| !c.is_whitespace() && !c.is_control())
		.collect::<String>()
		.to_ascii_lowercase();
	compact.starts_with("javascript:")
		|| compact.starts_with("vbscript:")
		|| compact.starts_with("data:")
}

fn emit_tag(out: &mut String, tag: &RawTag) {
	let Some(allowed) = allowed_attrs(&tag.name) else {
		// disallowed tag: dropped entirely, surrounding text is kept
		return;
	};

	if tag.closing {
		if !is_void(&tag.name) {
			out.push_str("</");
			out.push_str(&tag.name);
			out.push('>');
		}
		return;
	}

	out.push('<');
	out.push_str(&tag.name);
	for (name, value) in &tag.attrs {
		if !allowed.contains(&name.as_str()) {
			continue;
		}
		match value {
			Some(value) => {
				if (name == "href" || name == "src") && is_unsafe_url(value) {
					continue;
				}
				out.push(' ');
				out.push_str(name);
				out.push_str("=\"");
				out.push_str(&escape_attr(value));
				out.push('"');
			}
			None => {
				out.push(' ');
				out.push_str(name);
			}
		}
	}
	out.push('>');
}

/// Sanitize an HTML fragment against the tag allow-list.
///
/// Disallowed tags and comments are removed (their text content stays),
/// allowed tags are re-emitted normalized to lowercase with only their
/// allowed attributes. The output is not guaranteed to be balanced, run it
/// through [`balance_tags`] afterwards.
pub fn sanitize_html(input: &str) -> String {
	let mut out = String::with_capacity(input.len());
	let bytes = input.as_bytes();
	let mut i = 0;

	while i < bytes.len() {
		if bytes[i] != b'<' {
			let start = i;
			while i < bytes.len() && bytes[i] != b'<' {
				i += 1;
			}
			out.push_str(&input[start..i]);
			continue;
		}

		if input[i..].starts_with("<!--") {
			match input[i..].find("-->") {
				Some(end) => i += end + 3,
				None => i = bytes.len(),
			}
			continue;
		}

		match parse_tag(&input[i..]) {
			Some(tag) => {
				emit_tag(&mut out, &tag);
				i += tag.len;
			}
			None => {
				// stray `<` that opens no tag
				out.push_str("&lt;");
				i += 1;
			}
		}
	}

	out
}

/// Balance a sanitized HTML fragment.
///
/// Every open tag ends up with a matching close: a closing tag that skips
/// over unclosed inner tags closes them first, a closing tag with no open
/// counterpart is dropped, and tags still open at the end of the fragment
/// are closed in reverse order.
pub fn balance_tags(input: &str) -> String {
	let mut out = String::with_capacity(input.len());
	let mut stack: Vec<String> = Vec::new();
	let bytes = input.as_bytes();
	let mut i = 0;

	while i < bytes.len() {
		if bytes[i] != b'<' {
			let start = i;
			while i < bytes.len() && bytes[i] != b'<' {
				i += 1;
			}
			out.push_str(&input[start..i]);
			continue;
		}

		let Some(tag) = parse_tag(&input[i..]) else {
			out.push('<');
			i += 1;
			continue;
		};
		let raw = &input[i..i + tag.len];
		i += tag.len;

		if is_void(&tag.name) {
			if !tag.closing {
				out.push_str(raw);
			}
			continue;
		}

		if !tag.closing {
			stack.push(tag.name.clone());
			out.push_str(raw);
		} else if let Some(open_at) = stack.iter().rposition(|n| *n == tag.name) {
			while stack.len() > open_at + 1 {
				if let Some(inner) = stack.pop() {
					out.push_str("</");
					out.push_str(&inner);
					out.push('>');
				}
			}
			stack.pop();
			out.push_str("</");
			out.push_str(&tag.name);
			out.push('>');
		}
		// else: stray closing tag, dropped
	}

	while let Some(name) = stack.pop() {
		out.push_str("</");
		out.push_str(&name);
		out.push('>');
	}

	out
}


// vim: ts=4
