//! Feed document parsing
//!
//! The published feed is one XML document whose root holds a repeated
//! per-company record element. Parsing is strict: a document that is not
//! well-formed markup fails as a whole, and the refresh that requested it
//! falls back to the previous snapshot.

use super::types::{RECORD_TAG, XML_KEY_COMPANY};
use quick_xml::Reader;
use quick_xml::events::Event;
use thiserror::Error;

/// The feed text was not well-formed markup
#[derive(Debug, Error)]
#[error("malformed feed document: {detail}")]
pub struct ParseError {
    detail: String,
}

impl ParseError {
    fn new<S: Into<String>>(detail: S) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

/// One company's published tariff line: field key to raw text, in
/// document order. Duplicate keys keep their first occurrence on lookup.
#[derive(Debug, Clone, Default)]
pub struct CompanyRecord {
    fields: Vec<(String, String)>,
}

impl CompanyRecord {
    /// Raw text of the first field with the given key, if present
    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Company name this record belongs to, if published
    pub fn company_name(&self) -> Option<&str> {
        self.field(XML_KEY_COMPANY)
    }

    /// All fields in document order
    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }
}

/// Ordered sequence of per-company records parsed from one feed retrieval
///
/// Transient: parsed fresh on every refresh, never persisted.
#[derive(Debug, Clone, Default)]
pub struct TariffDocument {
    records: Vec<CompanyRecord>,
}

impl TariffDocument {
    /// Parse the feed text into ordered company records
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let mut reader = Reader::from_str(text);
        reader.config_mut().trim_text(true);

        let mut records: Vec<CompanyRecord> = Vec::new();
        let mut depth: usize = 0;
        let mut record_depth: usize = 0;
        let mut in_record = false;
        let mut saw_element = false;
        let mut current: Vec<(String, String)> = Vec::new();
        let mut field: Option<String> = None;
        let mut value = String::new();

        loop {
            match reader.read_event() {
                Err(e) => {
                    return Err(ParseError::new(format!(
                        "{} at position {}",
                        e,
                        reader.buffer_position()
                    )));
                }
                Ok(Event::Eof) => break,
                Ok(Event::Start(e)) => {
                    let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                    depth += 1;
                    saw_element = true;
                    if !in_record && name == RECORD_TAG {
                        in_record = true;
                        record_depth = depth;
                        current.clear();
                    } else if in_record && depth == record_depth + 1 {
                        field = Some(name);
                        value.clear();
                    }
                }
                Ok(Event::Empty(e)) => {
                    saw_element = true;
                    // Self-closing child of a record carries an empty raw value
                    if in_record && depth == record_depth {
                        let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                        current.push((name, String::new()));
                    }
                }
                Ok(Event::Text(t)) => {
                    if field.is_some() {
                        let text = t
                            .unescape()
                            .map_err(|e| ParseError::new(e.to_string()))?;
                        value.push_str(&text);
                    }
                }
                Ok(Event::CData(t)) => {
                    if field.is_some() {
                        value.push_str(&String::from_utf8_lossy(&t.into_inner()));
                    }
                }
                Ok(Event::End(_)) => {
                    if in_record && depth == record_depth + 1 {
                        if let Some(key) = field.take() {
                            current.push((key, std::mem::take(&mut value)));
                        }
                    } else if in_record && depth == record_depth {
                        records.push(CompanyRecord {
                            fields: std::mem::take(&mut current),
                        });
                        in_record = false;
                    }
                    depth = depth.saturating_sub(1);
                }
                Ok(_) => {}
            }
        }

        if depth != 0 || in_record {
            return Err(ParseError::new("unexpected end of document"));
        }
        if !saw_element {
            return Err(ParseError::new("no root element"));
        }

        Ok(Self { records })
    }

    /// All company records in document order
    pub fn records(&self) -> &[CompanyRecord] {
        &self.records
    }

    /// First record whose company name equals `key` (case-sensitive)
    ///
    /// Document order is the tie-break when the feed publishes duplicate
    /// company names; this mirrors the feed's own ordering and is not a
    /// deduplication guarantee.
    pub fn find_company(&self, key: &str) -> Option<&CompanyRecord> {
        self.records
            .iter()
            .find(|record| record.company_name() == Some(key))
    }

    /// Sorted list of every company name published in the feed
    pub fn company_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .records
            .iter()
            .filter_map(|record| record.company_name().map(str::to_string))
            .collect();
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEED: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<NewDataSet>
  <GasBillData>
    <Dist>ACME Gas</Dist>
    <MC>24.50</MC>
    <CM>0.118</CM>
  </GasBillData>
  <GasBillData>
    <Dist>North Shore Gas Ltd.</Dist>
    <MC>21.00</MC>
    <CM>0.131</CM>
  </GasBillData>
</NewDataSet>"#;

    #[test]
    fn parses_records_in_document_order() {
        let doc = TariffDocument::parse(FEED).unwrap();
        assert_eq!(doc.records().len(), 2);
        assert_eq!(doc.records()[0].company_name(), Some("ACME Gas"));
        assert_eq!(doc.records()[1].field("MC"), Some("21.00"));
    }

    #[test]
    fn find_company_is_case_sensitive() {
        let doc = TariffDocument::parse(FEED).unwrap();
        assert!(doc.find_company("ACME Gas").is_some());
        assert!(doc.find_company("acme gas").is_none());
    }

    #[test]
    fn company_names_are_sorted() {
        let doc = TariffDocument::parse(FEED).unwrap();
        assert_eq!(
            doc.company_names(),
            vec!["ACME Gas".to_string(), "North Shore Gas Ltd.".to_string()]
        );
    }

    #[test]
    fn truncated_document_is_rejected() {
        let err = TariffDocument::parse("<NewDataSet><GasBillData><Dist>ACME").unwrap_err();
        assert!(format!("{}", err).contains("malformed"));
    }

    #[test]
    fn mismatched_tags_are_rejected() {
        assert!(TariffDocument::parse("<a><b>1</a></b>").is_err());
    }
}
