//! Codec configuration and validation
//!
//! # Example
//!
//! ```
//! use qc_18_sc_transactions::domain::{CodecConfigBuilder, RequestBodyFraming};
//!
//! let config = CodecConfigBuilder::new()
//!     .strict_checksum(true)
//!     .request_body_framing(RequestBodyFraming::LengthPrefixed)
//!     .max_request_body_len(4096)
//!     .build()
//!     .expect("valid config");
//! assert!(config.strict_checksum);
//! ```

use crate::errors::CodecError;
use serde::{Deserialize, Serialize};

/// Largest body a u16 length prefix can describe.
pub const MAX_FRAMED_BODY_LEN: usize = u16::MAX as usize;

/// How a request block's body is laid out after its chain id.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestBodyFraming {
    /// A request block is exactly its 65-byte chain id. Bodies must be empty.
    #[default]
    Unframed,
    /// Chain id, then a u16 big-endian body length, then the body.
    LengthPrefixed,
}

/// What decode does with bytes left after the last declared block.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrailingDataPolicy {
    /// Fail with `TrailingData`.
    #[default]
    Reject,
    /// Ignore them; the outer framing may pad.
    Allow,
}

/// SC payload codec configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// Re-validate the header checksum during decode
    pub strict_checksum: bool,
    /// Handling of bytes after the last block
    pub trailing_data: TrailingDataPolicy,
    /// Request body layout
    pub request_body_framing: RequestBodyFraming,
    /// Maximum request body length in bytes (length-prefixed framing only)
    pub max_request_body_len: usize,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            strict_checksum: false,
            trailing_data: TrailingDataPolicy::Reject,
            request_body_framing: RequestBodyFraming::Unframed,
            max_request_body_len: MAX_FRAMED_BODY_LEN,
        }
    }
}

impl CodecConfig {
    /// Validate configuration bounds
    pub fn validate(&self) -> Result<(), CodecError> {
        if self.max_request_body_len > MAX_FRAMED_BODY_LEN {
            return Err(CodecError::InvalidConfig(format!(
                "max_request_body_len {} exceeds u16 length prefix ({})",
                self.max_request_body_len, MAX_FRAMED_BODY_LEN
            )));
        }

        if self.request_body_framing == RequestBodyFraming::LengthPrefixed
            && self.max_request_body_len == 0
        {
            return Err(CodecError::InvalidConfig(
                "max_request_body_len cannot be 0 with length-prefixed framing".to_string(),
            ));
        }

        Ok(())
    }

    /// Builder-style method to enable strict checksum validation
    pub fn with_strict_checksum(mut self, strict: bool) -> Self {
        self.strict_checksum = strict;
        self
    }

    /// Builder-style method to set the trailing data policy
    pub fn with_trailing_data(mut self, policy: TrailingDataPolicy) -> Self {
        self.trailing_data = policy;
        self
    }

    /// Builder-style method to set request body framing
    pub fn with_request_body_framing(mut self, framing: RequestBodyFraming) -> Self {
        self.request_body_framing = framing;
        self
    }
}

/// Builder for CodecConfig with validation
#[derive(Default)]
pub struct CodecConfigBuilder {
    strict_checksum: Option<bool>,
    trailing_data: Option<TrailingDataPolicy>,
    request_body_framing: Option<RequestBodyFraming>,
    max_request_body_len: Option<usize>,
}

impl CodecConfigBuilder {
    /// Builder with every field unset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables strict checksum validation on decode.
    pub fn strict_checksum(mut self, strict: bool) -> Self {
        self.strict_checksum = Some(strict);
        self
    }

    /// Sets the trailing data policy.
    pub fn trailing_data(mut self, policy: TrailingDataPolicy) -> Self {
        self.trailing_data = Some(policy);
        self
    }

    /// Sets the request body framing.
    pub fn request_body_framing(mut self, framing: RequestBodyFraming) -> Self {
        self.request_body_framing = Some(framing);
        self
    }

    /// Sets the request body limit.
    pub fn max_request_body_len(mut self, len: usize) -> Self {
        self.max_request_body_len = Some(len);
        self
    }

    /// Build the CodecConfig, validating all parameters
    pub fn build(self) -> Result<CodecConfig, CodecError> {
        let defaults = CodecConfig::default();

        let config = CodecConfig {
            strict_checksum: self.strict_checksum.unwrap_or(defaults.strict_checksum),
            trailing_data: self.trailing_data.unwrap_or(defaults.trailing_data),
            request_body_framing: self
                .request_body_framing
                .unwrap_or(defaults.request_body_framing),
            max_request_body_len: self
                .max_request_body_len
                .unwrap_or(defaults.max_request_body_len),
        };

        config.validate()?;
        Ok(config)
    }
}
