//! Method descriptor decoding and signature formatting.
//!
//! Descriptors are the compact type grammar the JVM uses for parameter lists:
//! `[` array markers, a one-letter primitive code, or `L<qualified name>;`
//! for reference types.
//!
//! Example: `(I[[JLjava/lang/String;)V` has parameters `int`, `long[][]`
//! and `java.lang.String`.

use super::event::Method;
use crate::utils::config::{MAX_DISPLAYED_PARAMETERS, UNKNOWN_DESCRIPTOR_TYPE};

/// Lazy iterator over the types encoded in a descriptor string
///
/// Cloning the iterator restarts decoding from the clone's position.
#[derive(Debug, Clone)]
pub struct Descriptors<'a> {
    input: &'a str,
    cursor: usize,
}

impl<'a> Iterator for Descriptors<'a> {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        let rest = &self.input[self.cursor..];
        if rest.is_empty() {
            return None;
        }

        let dimensions = rest.bytes().take_while(|&b| b == b'[').count();
        let suffix = "[]".repeat(dimensions);
        let rest = &rest[dimensions..];
        self.cursor += dimensions;

        // Array markers with nothing after them
        let Some(code) = rest.chars().next() else {
            return Some(format!("{}{}", UNKNOWN_DESCRIPTOR_TYPE, suffix));
        };
        self.cursor += code.len_utf8();

        let base = match code {
            'L' => {
                let body = &rest[1..];
                let end = body.find(';').unwrap_or(body.len());
                // Skip the terminating ';' when there is one
                self.cursor += (end + 1).min(body.len());
                return Some(format!("{}{}", body[..end].replace('/', "."), suffix));
            }
            'I' => "int",
            'J' => "long",
            'Z' => "boolean",
            'D' => "double",
            'F' => "float",
            'S' => "short",
            'C' => "char",
            'B' => "byte",
            _ => UNKNOWN_DESCRIPTOR_TYPE,
        };

        Some(format!("{}{}", base, suffix))
    }
}

impl std::iter::FusedIterator for Descriptors<'_> {}

/// Decode a sequence of type descriptors
///
/// **Public** - never fails; unknown type codes decode to
/// `UNKNOWN_DESCRIPTOR_TYPE`. Reference names are returned with `.`
/// separators.
///
/// # Example
/// ```
/// use jfr_overview::parser::descriptor::decode_descriptors;
///
/// let types: Vec<String> = decode_descriptors("I[[JLjava/lang/String;").collect();
/// assert_eq!(types, vec!["int", "long[][]", "java.lang.String"]);
/// ```
pub fn decode_descriptors(descriptor: &str) -> Descriptors<'_> {
    Descriptors {
        input: descriptor,
        cursor: 0,
    }
}

/// Format a method as `SimpleType.name(P1, P2)`
///
/// **Public** - used to label stack frames in the hot-spot lists
///
/// Parameter types are shown by simple name. Signatures with more than
/// `MAX_DISPLAYED_PARAMETERS` parameters render their list as `...`.
pub fn format_method(method: &Method) -> String {
    let type_name = method.type_name.replace('/', ".");
    let parameters: Vec<String> = parameter_segment(&method.descriptor)
        .map(|segment| {
            decode_descriptors(segment)
                .map(|qualified| simple_name(&qualified).to_string())
                .collect()
        })
        .unwrap_or_default();

    let parameter_list = if parameters.len() > MAX_DISPLAYED_PARAMETERS {
        "...".to_string()
    } else {
        parameters.join(", ")
    };

    format!(
        "{}.{}({})",
        simple_name(&type_name),
        method.name,
        parameter_list
    )
}

/// Part of a qualified name after the last `.`
fn simple_name(qualified: &str) -> &str {
    qualified
        .rfind('.')
        .map_or(qualified, |dot| &qualified[dot + 1..])
}

/// Characters between the first `(` and the last `)`
fn parameter_segment(descriptor: &str) -> Option<&str> {
    let start = descriptor.find('(')?;
    let end = descriptor.rfind(')')?;
    (end > start).then(|| &descriptor[start + 1..end])
}
