use shared_types::ExportEntry;
use thiserror::Error;

pub const VCARD_MIME_TYPE: &str = "text/vcard";
pub const VCARD_EXTENSION: &str = "vcf";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum VcardError {
    #[error("{field} for '{name}' contains a line break")]
    LineBreak { field: &'static str, name: String },
}

/// Renders one contact as a vCard 3.0 document.
///
/// Continuation lines carry a single leading space and there is no trailing
/// newline. Downstream tooling compares this layout byte for byte.
pub fn render_vcard(entry: &ExportEntry) -> Result<String, VcardError> {
    reject_line_breaks("FN", &entry.name, &entry.name)?;
    reject_line_breaks("TEL", &entry.tel, &entry.name)?;

    Ok(format!(
        "BEGIN:VCARD\n VERSION:3.0\n FN:{}\n TEL;TYPE=CELL:{}\n END:VCARD",
        entry.name, entry.tel
    ))
}

fn reject_line_breaks(field: &'static str, value: &str, name: &str) -> Result<(), VcardError> {
    if value.contains(['\n', '\r']) {
        return Err(VcardError::LineBreak {
            field,
            name: name.to_string(),
        });
    }
    Ok(())
}

/// A rendered document ready to hand to a download sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VcardFile {
    pub filename: String,
    pub mime_type: &'static str,
    pub content: String,
}

impl VcardFile {
    pub fn for_entry(entry: &ExportEntry) -> Result<Self, VcardError> {
        Ok(Self {
            filename: format!("{}.{}", entry.name, VCARD_EXTENSION),
            mime_type: VCARD_MIME_TYPE,
            content: render_vcard(entry)?,
        })
    }
}
