use std::collections::BTreeMap;
use std::fmt::Write;

/// Flat key/value spec form as produced by `p4 <spec> -o`.
pub type Spec = BTreeMap<String, String>;

/// Render a spec form in the text syntax `p4 <spec> -i` reads.
///
/// Multi-line values are written as indented continuation lines with blank
/// lines dropped; every field is followed by an empty line.
pub fn format_spec(spec: &Spec) -> String {
	let mut out = String::new();
	for (key, value) in spec {
		if value.contains('\n') {
			let _ = write!(out, "{key}:");
			for line in value.split('\n').filter(|line| !line.trim().is_empty()) {
				let _ = write!(out, "\n {line}");
			}
			out.push_str("\n\n");
		} else {
			let _ = write!(out, "{key}: {value}\n\n");
		}
	}
	out
}
