//! Parsing of worker-submitted `QuestionFormAnswers` documents.
//!
//! AMT returns each assignment's answer as an XML document containing one
//! `<Answer>` element per form field, each holding a `<QuestionIdentifier>`
//! and a `<FreeText>` value. The voucher form asks for exactly two fields,
//! `workerId` and `voucherCode`. Extraction is keyed by field name, with a
//! positional fallback (first two answers in document order) for legacy
//! submissions whose identifiers do not match.

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::error::CoreError;

/// Question identifier for the worker's self-reported worker ID.
pub const WORKER_ID_FIELD: &str = "workerId";

/// Question identifier for the submitted voucher code.
pub const VOUCHER_CODE_FIELD: &str = "voucherCode";

/// One `<Answer>` entry: the declared field identifier and its free text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerField {
    pub question_id: String,
    pub free_text: String,
}

/// The two fields the voucher question form collects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmittedAnswer {
    pub worker_id: String,
    pub voucher_code: String,
}

impl SubmittedAnswer {
    /// Extract `workerId` and `voucherCode` from an answer document.
    ///
    /// Field names are matched first; if either is absent, the first two
    /// answers in document order are used instead. Fewer than two answers
    /// is a parse error.
    pub fn from_xml(xml: &str) -> Result<Self, CoreError> {
        let fields = parse_answer_fields(xml)?;

        let by_name = |name: &str| {
            fields
                .iter()
                .find(|f| f.question_id == name)
                .map(|f| f.free_text.clone())
        };

        if let (Some(worker_id), Some(voucher_code)) =
            (by_name(WORKER_ID_FIELD), by_name(VOUCHER_CODE_FIELD))
        {
            return Ok(Self {
                worker_id,
                voucher_code,
            });
        }

        if fields.len() >= 2 {
            tracing::warn!(
                n_fields = fields.len(),
                "Answer fields not matched by name, falling back to positional extraction"
            );
            return Ok(Self {
                worker_id: fields[0].free_text.clone(),
                voucher_code: fields[1].free_text.clone(),
            });
        }

        Err(CoreError::AnswerParse(format!(
            "expected at least 2 answer fields, found {}",
            fields.len()
        )))
    }
}

/// Which leaf element the parser is currently inside.
enum Leaf {
    None,
    QuestionId,
    FreeText,
}

/// Parse all `<Answer>` entries in document order.
pub fn parse_answer_fields(xml: &str) -> Result<Vec<AnswerField>, CoreError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut fields = Vec::new();
    let mut question_id: Option<String> = None;
    let mut free_text: Option<String> = None;
    let mut leaf = Leaf::None;

    loop {
        match reader.read_event() {
            Err(e) => return Err(CoreError::AnswerParse(e.to_string())),
            Ok(Event::Eof) => break,
            Ok(Event::Start(e)) => {
                leaf = match e.local_name().as_ref() {
                    b"QuestionIdentifier" => Leaf::QuestionId,
                    b"FreeText" => Leaf::FreeText,
                    b"Answer" => {
                        question_id = None;
                        free_text = None;
                        Leaf::None
                    }
                    _ => Leaf::None,
                };
            }
            Ok(Event::Text(t)) => {
                let text = t
                    .unescape()
                    .map_err(|e| CoreError::AnswerParse(e.to_string()))?
                    .into_owned();
                match leaf {
                    Leaf::QuestionId => question_id = Some(text),
                    Leaf::FreeText => free_text = Some(text),
                    Leaf::None => {}
                }
            }
            Ok(Event::End(e)) => {
                if e.local_name().as_ref() == b"Answer" {
                    if let Some(qid) = question_id.take() {
                        fields.push(AnswerField {
                            question_id: qid,
                            // An empty <FreeText/> yields no text event.
                            free_text: free_text.take().unwrap_or_default(),
                        });
                    }
                }
                leaf = Leaf::None;
            }
            Ok(_) => {}
        }
    }

    Ok(fields)
}
