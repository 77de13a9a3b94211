use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};

use super::Render;
use crate::error::Result;
use crate::types::{Column, SubstanceRecord};

const ROOT_ELEMENT: &str = "casResults";
const RESULT_ELEMENT: &str = "result";

/// `<casResults><result><casRn>…</casRn>…</result>…</casResults>`,
/// indented by two spaces. Absent fields become empty elements.
pub struct XmlRenderer {
    columns: &'static [Column],
}

impl XmlRenderer {
    pub fn new(columns: &'static [Column]) -> Self {
        Self { columns }
    }
}

impl Render for XmlRenderer {
    fn render(&self, records: &[SubstanceRecord]) -> Result<Vec<u8>> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

        if records.is_empty() {
            writer.write_event(Event::Empty(BytesStart::new(ROOT_ELEMENT)))?;
        } else {
            writer.write_event(Event::Start(BytesStart::new(ROOT_ELEMENT)))?;
            for record in records {
                writer.write_event(Event::Start(BytesStart::new(RESULT_ELEMENT)))?;
                for column in self.columns {
                    let element = writer.create_element(column.name());
                    match column.value(record) {
                        Some(value) if !value.is_empty() => {
                            element.write_text_content(BytesText::new(value))?;
                        }
                        _ => {
                            element.write_empty()?;
                        }
                    }
                }
                writer.write_event(Event::End(BytesEnd::new(RESULT_ELEMENT)))?;
            }
            writer.write_event(Event::End(BytesEnd::new(ROOT_ELEMENT)))?;
        }

        let mut out = writer.into_inner();
        out.push(b'\n');
        Ok(out)
    }
}
