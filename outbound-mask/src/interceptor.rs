//! The response-path entry point.
//!
//! A [`ResponseInterceptor`] is composed explicitly around whatever produces
//! responses: call [`ResponseInterceptor::process`] on each outbound envelope,
//! or wrap a handler with [`ResponseInterceptor::guard`]. Either way the
//! envelope is classified once and, on a match, masked in place before it
//! reaches serialization. Unrecognized responses pass through untouched.

use slog::{debug, o, Discard, Logger};

use crate::{
    classify::classify,
    config::MaskingConfig,
    envelope::ResponseEnvelope,
    error::ConfigError,
    redact::redact,
    slog::{MaskedRecords, PayloadSummary},
    Masker,
};

/// Masks known sensitive fields in outbound responses.
///
/// Immutable after construction; share one instance across request threads.
#[derive(Clone)]
pub struct ResponseInterceptor {
    masker: Masker,
    logger: Logger,
    log_records: bool,
}

impl ResponseInterceptor {
    /// Compiles `config` into a new interceptor with a discarding logger.
    pub fn new(config: &MaskingConfig) -> Result<Self, ConfigError> {
        Ok(Self::from_masker(Masker::new(config)?))
    }

    /// Wraps an already compiled masker.
    pub fn from_masker(masker: Masker) -> Self {
        Self {
            masker,
            logger: Logger::root(Discard, o!()),
            log_records: false,
        }
    }

    /// Routes log records to a child of `logger`.
    #[must_use]
    pub fn with_logger(mut self, logger: &Logger) -> Self {
        self.logger = logger.new(o!("component" => "outbound-mask"));
        self
    }

    /// Also attaches the masked records to each match record, under `payload`.
    ///
    /// Off by default. Only values that already went through the masker are
    /// ever logged.
    #[must_use]
    pub fn with_record_logging(mut self, enabled: bool) -> Self {
        self.log_records = enabled;
        self
    }

    /// Returns the compiled masker.
    pub fn masker(&self) -> &Masker {
        &self.masker
    }

    /// Classifies `response` and masks its payload in place on a match.
    ///
    /// Never fails and never changes the shape of the response.
    pub fn process(&self, response: &mut ResponseEnvelope) {
        let envelope = response.label();
        let Some(mut kind) = classify(response) else {
            debug!(self.logger, "outbound payload passed through";
                PayloadSummary::passed_through(envelope));
            return;
        };

        redact(&mut kind, &self.masker);
        let summary = PayloadSummary::matched(envelope, &kind);
        if self.log_records {
            debug!(self.logger, "masked outbound payload";
                summary, "payload" => MaskedRecords::capture(&kind));
        } else {
            debug!(self.logger, "masked outbound payload"; summary);
        }
    }

    /// Processes `response` and hands the same value back.
    #[must_use]
    pub fn intercept(&self, mut response: ResponseEnvelope) -> ResponseEnvelope {
        self.process(&mut response);
        response
    }

    /// Wraps `handler` so that every response it produces is processed.
    ///
    /// ```rust
    /// use outbound_mask::{ApiResult, MaskingConfig, ResponseEnvelope, ResponseInterceptor};
    ///
    /// let interceptor = ResponseInterceptor::new(&MaskingConfig::default()).unwrap();
    /// let handler =
    ///     interceptor.guard(|count: u64| ResponseEnvelope::from(ApiResult::succeed(count, "ok")));
    /// let response = handler(3);
    /// assert_eq!(response.as_api().and_then(|r| r.datas_ref::<u64>()), Some(&3));
    /// ```
    pub fn guard<'s, A, F>(&'s self, handler: F) -> impl Fn(A) -> ResponseEnvelope + 's
    where
        F: Fn(A) -> ResponseEnvelope + 's,
    {
        move |request| self.intercept(handler(request))
    }
}
