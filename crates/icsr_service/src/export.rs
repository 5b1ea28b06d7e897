//! Paginated case report rendering.
//!
//! The report is laid out from the field catalog, so every field appears in
//! catalog order under its section heading, whether it was filled in or not.

use icsr_core::catalog::{fields_in, FieldId, Section};
use icsr_core::models::CaseRecord;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, Stream};
use serde::Serialize;
use sha2::{Digest, Sha256};
use tracing::{debug, info};

use crate::error::ExportError;
use crate::store::ArtifactStore;

// A4 in points
const PAGE_WIDTH: i64 = 595;
const PAGE_HEIGHT: i64 = 842;
const MARGIN: i64 = 50;
const FOOTER: i64 = 20;
const LINE_HEIGHT: i64 = 14;
const HEADING_GAP: i64 = 8;
const CONTINUATION_INDENT: i64 = 12;
// Characters per line at 10pt Helvetica across the printable width
const WRAP_AT: usize = 90;

pub const REPORT_TITLE: &str = "Individual Case Safety Report";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportLine {
    Title(String),
    Heading(&'static str),
    Field { label: &'static str, value: String },
}

/// Result of a successful export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportedArtifact {
    pub name: String,
    pub location: String,
    pub sha256: String,
    pub bytes: usize,
    pub pages: usize,
}

pub fn layout(record: &CaseRecord) -> Vec<ReportLine> {
    let mut lines = vec![ReportLine::Title(REPORT_TITLE.to_string())];
    for section in Section::ALL {
        lines.push(ReportLine::Heading(section.title()));
        for def in fields_in(section) {
            lines.push(ReportLine::Field { label: def.label, value: field_text(record, def.id) });
        }
    }
    lines
}

/// Display text of one field. Unset values render as an empty string.
pub fn field_text(record: &CaseRecord, field: FieldId) -> String {
    fn opt<T: ToString>(value: &Option<T>) -> String {
        value.as_ref().map(ToString::to_string).unwrap_or_default()
    }

    let general = &record.general_info;
    match field {
        FieldId::ReceivedDate => opt(&general.received_date),
        FieldId::ReportType => general.report_type.to_string(),
        FieldId::Country => general.country.clone(),
        FieldId::Seriousness => general.seriousness.to_string(),
        FieldId::SeriousnessCriteria => opt(&general.seriousness_criteria),
        FieldId::MarketedInCountry => (if general.marketed_in_country { "Yes" } else { "No" }).to_string(),
        FieldId::ReporterName => record.reporter.name.clone(),
        FieldId::ReporterEmail => record.reporter.email.clone(),
        FieldId::ReporterPhone => record.reporter.phone.clone(),
        FieldId::ReporterQualification => record.reporter.qualification.clone(),
        FieldId::PatientIdentifier => record.patient.identifier.clone(),
        FieldId::PatientAge => opt(&record.patient.age),
        FieldId::PatientGender => opt(&record.patient.gender),
        FieldId::PatientWeight => opt(&record.patient.weight),
        FieldId::PatientHeight => opt(&record.patient.height),
        FieldId::PatientMedicalHistory => record.patient.medical_history.clone(),
        FieldId::ParentCaseId => record.parent_case.parent_case_id.clone(),
        FieldId::ParentCaseStatus => opt(&record.parent_case.status),
        FieldId::RelatedCases => record.parent_case.related_cases.clone(),
        FieldId::EventVerbatimText => record.adverse_event.verbatim_text.clone(),
        FieldId::EventCodedTerm => record.adverse_event.coded_term.clone(),
        FieldId::EventOutcome => opt(&record.adverse_event.outcome),
        FieldId::DrugName => record.suspected_drug.name.clone(),
        FieldId::DrugDose => record.suspected_drug.dose.clone(),
        FieldId::DrugRoute => opt(&record.suspected_drug.route),
        FieldId::DrugStartDate => opt(&record.suspected_drug.start_date),
        FieldId::DrugEndDate => opt(&record.suspected_drug.end_date),
        FieldId::DrugIndication => record.suspected_drug.indication.clone(),
        FieldId::CausalityMethod => opt(&record.causality.method),
        FieldId::CausalityResult => opt(&record.causality.result),
        FieldId::CausalityComments => record.causality.comments.clone(),
        FieldId::NarrativeSummary => record.narrative.summary.clone(),
    }
}

/// Renders, hashes and stores the report for `record` as `<name>.pdf`.
///
/// Does not look at the classification: invalid cases export as drafts.
pub fn export_case(
    store: &dyn ArtifactStore,
    name: &str,
    record: &CaseRecord,
) -> Result<ExportedArtifact, ExportError> {
    let rendered = render(record)?;
    let file_name = format!("{}.pdf", name);

    let sha256 = hex::encode(Sha256::digest(&rendered.bytes));
    let location = store.put(&file_name, &rendered.bytes)?;

    info!(artifact = %file_name, pages = rendered.pages, bytes = rendered.bytes.len(), "case report exported");
    Ok(ExportedArtifact {
        name: file_name,
        location,
        sha256,
        bytes: rendered.bytes.len(),
        pages: rendered.pages,
    })
}

pub fn render_pdf(record: &CaseRecord) -> Result<Vec<u8>, ExportError> {
    render(record).map(|rendered| rendered.bytes)
}

struct Rendered {
    bytes: Vec<u8>,
    pages: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Font {
    Regular,
    Bold,
}

impl Font {
    fn resource(&self) -> &'static str {
        match self {
            Font::Regular => "F1",
            Font::Bold => "F2",
        }
    }
}

// One physical line of text with its position on the page.
#[derive(Debug, Clone)]
struct Placed {
    font: Font,
    size: i64,
    x: i64,
    y: i64,
    text: String,
}

fn render(record: &CaseRecord) -> Result<Rendered, ExportError> {
    let pages = paginate(&layout(record));
    let total = pages.len();

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let regular = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let bold = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => regular,
            "F2" => bold,
        },
    });

    let mut kids: Vec<Object> = Vec::with_capacity(total);
    let mut content_bytes = 0usize;
    for (index, lines) in pages.into_iter().enumerate() {
        let mut operations = Vec::new();
        for line in &lines {
            push_text(&mut operations, line);
        }
        push_text(
            &mut operations,
            &Placed {
                font: Font::Regular,
                size: 8,
                x: MARGIN,
                y: MARGIN - FOOTER,
                text: format!("Page {} of {}", index + 1, total),
            },
        );

        let encoded = Content { operations }
            .encode()
            .map_err(|e| ExportError::Render(e.to_string()))?;
        content_bytes += encoded.len();

        let content_id = doc.add_object(Stream::new(Dictionary::new(), encoded));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let pages_dict = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => Object::Integer(total as i64),
        "Resources" => resources_id,
        "MediaBox" => vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Integer(PAGE_WIDTH),
            Object::Integer(PAGE_HEIGHT),
        ],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    // Content streams plus headroom for the object table and trailer.
    let estimate = content_bytes + 4096;
    let mut bytes = Vec::new();
    bytes
        .try_reserve(estimate)
        .map_err(|_| ExportError::Allocation { bytes: estimate })?;
    doc.save_to(&mut bytes).map_err(|e| ExportError::Render(e.to_string()))?;

    debug!(pages = total, bytes = bytes.len(), "case report rendered");
    Ok(Rendered { bytes, pages: total })
}

fn push_text(operations: &mut Vec<Operation>, line: &Placed) {
    operations.push(Operation::new("BT", vec![]));
    operations.push(Operation::new(
        "Tf",
        vec![line.font.resource().into(), Object::Integer(line.size)],
    ));
    operations.push(Operation::new("Td", vec![Object::Integer(line.x), Object::Integer(line.y)]));
    operations.push(Operation::new("Tj", vec![Object::string_literal(win_ansi(&line.text))]));
    operations.push(Operation::new("ET", vec![]));
}

/// Lays the report lines onto pages. A heading is never left alone at the
/// bottom of a page.
fn paginate(lines: &[ReportLine]) -> Vec<Vec<Placed>> {
    let top = PAGE_HEIGHT - MARGIN;
    let bottom = MARGIN + FOOTER;

    let mut pages = Vec::new();
    let mut current: Vec<Placed> = Vec::new();
    let mut y = top;

    for line in lines {
        let (font, size, gap, keep_with_next, text) = match line {
            ReportLine::Title(title) => (Font::Bold, 14, 0, false, title.clone()),
            ReportLine::Heading(title) => (Font::Bold, 12, HEADING_GAP, true, title.to_string()),
            ReportLine::Field { label, value } => (Font::Regular, 10, 0, false, format!("{}: {}", label, value)),
        };

        for (i, piece) in wrap(&text, WRAP_AT).into_iter().enumerate() {
            let step = LINE_HEIGHT + if i == 0 { gap } else { 0 };
            let needed = step + if keep_with_next { LINE_HEIGHT } else { 0 };
            if y - needed < bottom && !current.is_empty() {
                pages.push(std::mem::take(&mut current));
                y = top;
            }
            y -= step;
            current.push(Placed {
                font,
                size,
                x: MARGIN + if i == 0 { 0 } else { CONTINUATION_INDENT },
                y,
                text: piece,
            });
        }
    }

    if !current.is_empty() || pages.is_empty() {
        pages.push(current);
    }
    pages
}

/// Word-wraps `text` to at most `width` characters per line. Words longer
/// than a line are split. Always yields at least one line.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut line = String::new();
        let mut len = 0;
        for word in paragraph.split_whitespace() {
            let chars: Vec<char> = word.chars().collect();
            for chunk in chars.chunks(width) {
                if len > 0 && len + 1 + chunk.len() > width {
                    lines.push(std::mem::take(&mut line));
                    len = 0;
                }
                if len > 0 {
                    line.push(' ');
                    len += 1;
                }
                line.extend(chunk);
                len += chunk.len();
            }
        }
        lines.push(line);
    }
    lines
}

// The standard fonts only cover a single-byte encoding.
fn win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match u32::from(c) {
            0x20..=0x7E | 0xA0..=0xFF => c as u8,
            code => win_ansi_extra(code).unwrap_or(b'?'),
        })
        .collect()
}

// WinAnsiEncoding places typographic punctuation in 0x80..=0x9F.
fn win_ansi_extra(code: u32) -> Option<u8> {
    let byte = match code {
        0x20AC => 0x80, // euro
        0x201A => 0x82,
        0x0192 => 0x83,
        0x201E => 0x84,
        0x2026 => 0x85, // ellipsis
        0x2020 => 0x86,
        0x2021 => 0x87,
        0x02C6 => 0x88,
        0x2030 => 0x89,
        0x0160 => 0x8A,
        0x2039 => 0x8B,
        0x0152 => 0x8C,
        0x017D => 0x8E,
        0x2018 => 0x91, // quotes
        0x2019 => 0x92,
        0x201C => 0x93,
        0x201D => 0x94,
        0x2022 => 0x95, // bullet
        0x2013 => 0x96, // dashes
        0x2014 => 0x97,
        0x02DC => 0x98,
        0x2122 => 0x99, // trade mark
        0x0161 => 0x9A,
        0x203A => 0x9B,
        0x0153 => 0x9C,
        0x017E => 0x9E,
        0x0178 => 0x9F,
        _ => return None,
    };
    Some(byte)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::Document;

    fn texts(bytes: &[u8]) -> Vec<Vec<String>> {
        let doc = Document::load_mem(bytes).unwrap();
        doc.get_pages()
            .into_values()
            .map(|page_id| {
                let content = Content::decode(&doc.get_page_content(page_id).unwrap()).unwrap();
                content
                    .operations
                    .iter()
                    .filter(|op| op.operator == "Tj")
                    .filter_map(|op| match &op.operands[0] {
                        Object::String(bytes, _) => Some(String::from_utf8_lossy(bytes).into_owned()),
                        _ => None,
                    })
                    .collect()
            })
            .collect()
    }

    /// Every shown string on every page, with the font resource it was set in.
    fn runs(bytes: &[u8]) -> Vec<Vec<(String, String)>> {
        let doc = Document::load_mem(bytes).unwrap();
        doc.get_pages()
            .into_values()
            .map(|page_id| {
                let content = Content::decode(&doc.get_page_content(page_id).unwrap()).unwrap();
                let mut font = String::new();
                let mut shown = Vec::new();
                for op in &content.operations {
                    match (op.operator.as_str(), op.operands.first()) {
                        ("Tf", Some(Object::Name(name))) => font = String::from_utf8_lossy(name).into_owned(),
                        ("Tj", Some(Object::String(text, _))) => {
                            shown.push((font.clone(), String::from_utf8_lossy(text).into_owned()))
                        }
                        _ => {}
                    }
                }
                shown
            })
            .collect()
    }

    fn sample() -> CaseRecord {
        let mut record = CaseRecord::default();
        record.reporter.name = "J. Doe".to_string();
        record.patient.identifier = "P-001".to_string();
        record.patient.age = Some(42.0);
        record.suspected_drug.name = "DrugX".to_string();
        record.adverse_event.verbatim_text = "Nausea".to_string();
        record
    }

    #[test]
    fn layout_follows_section_and_catalog_order() {
        let lines = layout(&sample());
        assert_eq!(lines.len(), 1 + Section::ALL.len() + icsr_core::catalog::catalog().len());
        assert_eq!(lines[0], ReportLine::Title(REPORT_TITLE.to_string()));
        assert_eq!(lines[1], ReportLine::Heading("General Information"));
        assert_eq!(lines.last(), Some(&ReportLine::Field { label: "Summary", value: String::new() }));

        let headings: Vec<&str> = lines
            .iter()
            .filter_map(|l| match l {
                ReportLine::Heading(h) => Some(*h),
                _ => None,
            })
            .collect();
        assert_eq!(headings, Section::ALL.iter().map(|s| s.title()).collect::<Vec<_>>());
    }

    #[test]
    fn empty_fields_are_rendered_not_omitted() {
        let lines = layout(&CaseRecord::default());
        assert!(lines.contains(&ReportLine::Field { label: "Drug Name", value: String::new() }));
        assert!(lines.contains(&ReportLine::Field { label: "Report Type", value: "Spontaneous".to_string() }));
        assert!(lines.contains(&ReportLine::Field { label: "Marketed In Country", value: "No".to_string() }));
    }

    #[test]
    fn pdf_contains_the_field_lines() {
        let bytes = render_pdf(&sample()).unwrap();
        assert!(bytes.starts_with(b"%PDF-1.5"));

        let pages = texts(&bytes);
        assert_eq!(pages.len(), 1);
        assert!(pages[0].contains(&"Drug Name: DrugX".to_string()));
        assert!(pages[0].contains(&"Age: 42".to_string()));
        // Empty values keep their label line.
        assert!(pages[0].contains(&"Indication:".to_string()));
        assert!(pages[0].contains(&"Page 1 of 1".to_string()));
    }

    #[test]
    fn long_narrative_spills_onto_more_pages() {
        let mut record = sample();
        record.narrative.summary = "The patient reported symptoms after the second dose. ".repeat(120);

        let bytes = render_pdf(&record).unwrap();
        let pages = texts(&bytes);
        assert!(pages.len() >= 2);
        assert_eq!(pages[0].first().map(String::as_str), Some(REPORT_TITLE));
        let footer = format!("Page {} of {}", pages.len(), pages.len());
        assert!(pages.last().unwrap().contains(&footer));
    }

    #[test]
    fn headings_are_bold_and_field_lines_regular() {
        let bytes = render_pdf(&sample()).unwrap();
        let shown: Vec<(String, String)> = runs(&bytes).into_iter().flatten().collect();

        let headings: Vec<&str> = shown
            .iter()
            .filter(|(font, text)| font == "F2" && text != REPORT_TITLE)
            .map(|(_, text)| text.as_str())
            .collect();
        assert_eq!(headings, Section::ALL.iter().map(|s| s.title()).collect::<Vec<_>>());

        for def in icsr_core::catalog::catalog() {
            let prefix = format!("{}:", def.label);
            let line = shown.iter().find(|(_, text)| text.starts_with(&prefix)).unwrap();
            assert_eq!(line.0, "F1", "{} should use the regular font", def.label);
        }
    }

    #[test]
    fn headings_keep_section_order_across_pages() {
        let mut record = sample();
        record.patient.medical_history = "Long standing hypertension, treated. ".repeat(150);

        let shown: Vec<(String, String)> = runs(&render_pdf(&record).unwrap()).into_iter().flatten().collect();
        let headings: Vec<&str> = shown
            .iter()
            .filter(|(font, text)| font == "F2" && text != REPORT_TITLE)
            .map(|(_, text)| text.as_str())
            .collect();
        assert_eq!(headings, Section::ALL.iter().map(|s| s.title()).collect::<Vec<_>>());
    }

    #[test]
    fn wrap_respects_width_and_splits_long_words() {
        let lines = wrap("aaa bbb ccc", 7);
        assert_eq!(lines, vec!["aaa bbb", "ccc"]);

        let lines = wrap(&"x".repeat(10), 4);
        assert_eq!(lines, vec!["xxxx", "xxxx", "xx"]);

        assert_eq!(wrap("", 10), vec![String::new()]);
    }

    #[test]
    fn non_latin_characters_are_replaced() {
        assert_eq!(win_ansi("Café 頭痛"), b"Caf\xE9 ??".to_vec());
    }

    #[test]
    fn typographic_punctuation_keeps_its_win_ansi_code() {
        let text = "\u{2018}it\u{2019}s\u{2019} \u{201C}x\u{201D} a\u{2013}b\u{2014}c\u{2026} \u{20AC}5 DrugX\u{2122}";
        assert_eq!(
            win_ansi(text),
            b"\x91it\x92s\x92 \x93x\x94 a\x96b\x97c\x85 \x805 DrugX\x99".to_vec()
        );
    }
}
