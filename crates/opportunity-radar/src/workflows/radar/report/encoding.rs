use serde::Serialize;
use serde_json::ser::{Formatter, PrettyFormatter};
use std::io;

/// Two-space pretty printer that writes every non-ASCII character as a
/// `\uXXXX` escape, surrogate pairs included, so payload files stay ASCII.
pub(crate) struct AsciiPrettyFormatter {
    inner: PrettyFormatter<'static>,
}

impl AsciiPrettyFormatter {
    pub(crate) fn new() -> Self {
        Self {
            inner: PrettyFormatter::new(),
        }
    }
}

impl Formatter for AsciiPrettyFormatter {
    fn begin_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.begin_array(writer)
    }

    fn end_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_array(writer)
    }

    fn begin_array_value<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        self.inner.begin_array_value(writer, first)
    }

    fn end_array_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_array_value(writer)
    }

    fn begin_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.begin_object(writer)
    }

    fn end_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_object(writer)
    }

    fn begin_object_key<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        self.inner.begin_object_key(writer, first)
    }

    fn begin_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.begin_object_value(writer)
    }

    fn end_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_object_value(writer)
    }

    fn write_string_fragment<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        fragment: &str,
    ) -> io::Result<()> {
        let mut start = 0;
        for (index, ch) in fragment.char_indices() {
            if ch.is_ascii() {
                continue;
            }
            writer.write_all(fragment[start..index].as_bytes())?;
            let mut units = [0u16; 2];
            for unit in ch.encode_utf16(&mut units) {
                write!(writer, "\\u{unit:04x}")?;
            }
            start = index + ch.len_utf8();
        }
        writer.write_all(fragment[start..].as_bytes())
    }
}

/// Serializes `value` as two-space pretty JSON with ASCII-only output.
pub(crate) fn to_ascii_pretty<T: Serialize + ?Sized>(
    value: &T,
) -> Result<String, serde_json::Error> {
    let mut buffer = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buffer, AsciiPrettyFormatter::new());
    value.serialize(&mut serializer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn escapes_non_ascii_as_lowercase_units() {
        let rendered = to_ascii_pretty(&json!({ "title": "Beca Futuro Señal" })).expect("renders");

        assert_eq!(rendered, "{\n  \"title\": \"Beca Futuro Se\\u00f1al\"\n}");
    }

    #[test]
    fn astral_characters_use_surrogate_pairs() {
        let rendered = to_ascii_pretty(&json!(["🎓 grant"])).expect("renders");

        assert_eq!(rendered, "[\n  \"\\ud83c\\udf93 grant\"\n]");
    }

    #[test]
    fn ascii_output_matches_the_standard_pretty_printer() {
        let value = json!([{ "id": "stem", "score": 0.917, "tags": [], "nested": {} }]);

        assert_eq!(
            to_ascii_pretty(&value).expect("renders"),
            serde_json::to_string_pretty(&value).expect("renders")
        );
    }

    #[test]
    fn escaped_output_reads_back_to_the_same_text() {
        let rendered = to_ascii_pretty(&json!("Café – Zoë")).expect("renders");

        assert!(rendered.is_ascii());
        let parsed: String = serde_json::from_str(&rendered).expect("parses");
        assert_eq!(parsed, "Café – Zoë");
    }
}
