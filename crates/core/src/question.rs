//! ExternalQuestion payload construction.
//!
//! AMT renders an ExternalQuestion HIT by loading the given URL inside an
//! iframe. The payload is a fixed template with the URL as the only
//! substitution point; the caller must supply a well-formed URL (no XML
//! escaping is applied).

/// Schema namespace for the ExternalQuestion document.
pub const EXTERNAL_QUESTION_XMLNS: &str = "http://mechanicalturk.amazonaws.com/AWSMechanicalTurkDataSchemas/2006-07-14/ExternalQuestion.xsd";

/// Build the ExternalQuestion XML for a question URL.
///
/// `FrameHeight` of 0 lets the worker's browser size the iframe itself.
pub fn external_question_xml(question_url: &str) -> String {
    format!(
        concat!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>",
            "<ExternalQuestion xmlns=\"{xmlns}\">",
            "<ExternalURL>{url}</ExternalURL>",
            "<FrameHeight>0</FrameHeight>",
            "</ExternalQuestion>"
        ),
        xmlns = EXTERNAL_QUESTION_XMLNS,
        url = question_url,
    )
}
