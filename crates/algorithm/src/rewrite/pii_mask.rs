use async_trait::async_trait;
use regex::Regex;

use crate::capability::{AlgorithmError, Collaborators, RewriteAlgorithm};
use crate::params::Params;

const EMAIL_PATTERN: &str = r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}";
const PHONE_PATTERN: &str = r"\b\d{3}[-.]?\d{3}[-.]?\d{4}\b";

/// Replaces e-mail addresses with `[EMAIL]` and ten-digit phone numbers with
/// `[PHONE]`. Purely local; the collaborators are never touched.
#[derive(Debug, Clone)]
pub struct PiiMaskRewrite {
    email: Regex,
    phone: Regex,
}

impl PiiMaskRewrite {
    pub const NAME: &'static str = "pii_mask";

    pub fn new() -> Result<Self, AlgorithmError> {
        Ok(Self {
            email: Regex::new(EMAIL_PATTERN)?,
            phone: Regex::new(PHONE_PATTERN)?,
        })
    }

    /// Synchronous masking, usable without an async runtime.
    pub fn mask(&self, text: &str) -> String {
        let masked = self.email.replace_all(text, "[EMAIL]");
        self.phone.replace_all(&masked, "[PHONE]").into_owned()
    }
}

#[async_trait]
impl RewriteAlgorithm for PiiMaskRewrite {
    fn name(&self) -> &str {
        Self::NAME
    }

    async fn rewrite(
        &self,
        text: &str,
        _params: &Params,
        _collaborators: &Collaborators,
    ) -> Result<String, AlgorithmError> {
        Ok(self.mask(text))
    }
}
