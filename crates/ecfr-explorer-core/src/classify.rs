//! Intent classification for the regulations chat.
//!
//! [`Classifier`] is the seam a hosted-model backend would plug into.
//! [`KeywordClassifier`] is the shipped implementation: it checks the
//! lowercased input against fixed keyword groups in priority order and
//! renders a canned reply. It never fails.
//!
//! | Priority | Keywords | Intent |
//! |----------|----------|--------|
//! | 1 | `safety`, `requirements` | [`Intent::Safety`] |
//! | 2 | `deadline`, `filing` | [`Intent::Deadline`] |
//! | 3 | `exempt`, `exception` | [`Intent::Exemption`] |
//! | - | anything else | [`Intent::Clarify`] |

use anyhow::Result;
use async_trait::async_trait;

use crate::models::Facet;

/// Produces an assistant reply for a user message.
///
/// Implementations may do I/O; callers always await the reply.
///
/// # Example
///
/// ```rust
/// use ecfr_explorer_core::classify::{Classifier, KeywordClassifier};
/// use ecfr_explorer_core::models::Facet;
///
/// # async fn example() -> anyhow::Result<()> {
/// let reply = KeywordClassifier.respond("hello", &Facet::All).await?;
/// assert!(reply.starts_with("Could you clarify"));
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait Classifier: Send + Sync {
    /// Short identifier shown in logs and `/health`-style output.
    fn name(&self) -> &str;

    /// Reply to `text` given the currently selected `facet`.
    async fn respond(&self, text: &str, facet: &Facet) -> Result<String>;
}

/// A canned-reply bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Safety,
    Deadline,
    Exemption,
    Clarify,
}

const INTENT_GROUPS: &[(Intent, &[&str])] = &[
    (Intent::Safety, &["safety", "requirements"]),
    (Intent::Deadline, &["deadline", "filing"]),
    (Intent::Exemption, &["exempt", "exception"]),
];

/// First matching keyword group wins; [`Intent::Clarify`] otherwise.
pub fn classify_intent(text: &str) -> Intent {
    let lower = text.to_lowercase();
    INTENT_GROUPS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(intent, _)| *intent)
        .unwrap_or(Intent::Clarify)
}

/// The fixed reply text for `intent`, with the agency interpolated when
/// `facet` is not `All`.
pub fn render_reply(intent: Intent, facet: &Facet) -> String {
    match (intent, facet.agency()) {
        (Intent::Safety, Some(agency)) => format!(
            "Under {agency} regulations, safety requirements typically cover hazard \
             assessments, required protective measures, and documented compliance \
             procedures. Check the relevant CFR part for the exact obligations that \
             apply to your operation."
        ),
        (Intent::Safety, None) => "Safety requirements vary by agency. Most federal safety \
             rules call for hazard assessments, protective measures, and documented \
             compliance procedures. Select an agency to see more specific guidance."
            .to_string(),
        (Intent::Deadline, Some(agency)) => format!(
            "{agency} filing deadlines depend on the program and the type of report. \
             Annual reports are commonly due within 90 days of the end of the reporting \
             period. Confirm the exact date in the applicable CFR section."
        ),
        (Intent::Deadline, None) => "Filing deadlines differ across agencies and programs. \
             Many annual reports are due within 90 days of the end of the reporting \
             period. Select an agency to narrow down the applicable deadlines."
            .to_string(),
        (Intent::Exemption, Some(agency)) => format!(
            "{agency} regulations provide exemptions for certain small entities, \
             low-volume operations, and specific product categories. Exemptions usually \
             require a written request or certification. Review the exemption criteria \
             in the relevant CFR part before relying on one."
        ),
        (Intent::Exemption, None) => "Most agencies provide exemptions for certain small \
             entities or specific activities, usually through a written request or \
             certification. Select an agency to see which exemptions may apply."
            .to_string(),
        (Intent::Clarify, Some(agency)) => format!(
            "I can help you explore {agency} regulations. Try asking about safety \
             requirements, filing deadlines, or exemptions."
        ),
        (Intent::Clarify, None) => "Could you clarify your question? You can ask about \
             safety requirements, filing deadlines, or exemptions, or pick an agency to \
             focus the answer."
            .to_string(),
    }
}

/// Keyword-matching classifier with canned replies.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordClassifier;

#[async_trait]
impl Classifier for KeywordClassifier {
    fn name(&self) -> &str {
        "keyword"
    }

    async fn respond(&self, text: &str, facet: &Facet) -> Result<String> {
        Ok(render_reply(classify_intent(text), facet))
    }
}
