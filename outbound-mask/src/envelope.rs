//! Response envelopes as handlers return them.
//!
//! At the interception point the payload inside an envelope has no static
//! type; it is stored as `Box<dyn Any + Send>` and only the classifier looks
//! at what it actually is.

use std::{any::Any, fmt};

use chrono::{Local, NaiveDateTime};

/// Type-erased payload carried by an envelope.
pub type Payload = Box<dyn Any + Send>;

/// Status code of a successful [`ApiResult`].
pub const CODE_SUCCESS: i32 = 0;

/// Status code of a failed [`ApiResult`].
pub const CODE_ERROR: i32 = 1;

/// Single-result envelope: `{ code, msg, time, datas }`.
pub struct ApiResult {
    pub code: i32,
    pub msg: Option<String>,
    pub time: NaiveDateTime,
    pub datas: Option<Payload>,
}

impl ApiResult {
    /// Wraps `datas` in a successful result.
    pub fn succeed<T>(datas: T, msg: impl Into<String>) -> Self
    where
        T: Any + Send,
    {
        Self {
            code: CODE_SUCCESS,
            msg: Some(msg.into()),
            time: Local::now().naive_local(),
            datas: Some(Box::new(datas)),
        }
    }

    /// A successful result without a payload.
    pub fn succeed_msg(msg: impl Into<String>) -> Self {
        Self {
            code: CODE_SUCCESS,
            msg: Some(msg.into()),
            time: Local::now().naive_local(),
            datas: None,
        }
    }

    /// A failed result without a payload.
    pub fn failed(msg: impl Into<String>) -> Self {
        Self {
            code: CODE_ERROR,
            msg: Some(msg.into()),
            time: Local::now().naive_local(),
            datas: None,
        }
    }

    /// Borrows the payload as `T`, if that is what it holds.
    pub fn datas_ref<T: Any>(&self) -> Option<&T> {
        self.datas.as_deref().and_then(|datas| datas.downcast_ref())
    }
}

impl fmt::Debug for ApiResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiResult")
            .field("code", &self.code)
            .field("msg", &self.msg)
            .field("time", &self.time)
            .field("datas", &self.datas.as_ref().map(|_| "<payload>"))
            .finish()
    }
}

/// Paged table envelope: `{ success, data, total, current, page_size }`.
pub struct ProTableResult {
    pub success: bool,
    pub data: Option<Payload>,
    pub total: u64,
    pub current: u32,
    pub page_size: u32,
}

impl ProTableResult {
    /// Wraps one page of rows.
    pub fn page<T>(rows: Vec<T>, total: u64, current: u32, page_size: u32) -> Self
    where
        T: Any + Send,
    {
        Self {
            success: true,
            data: Some(Box::new(rows)),
            total,
            current,
            page_size,
        }
    }

    /// Borrows the rows as `T`, if that is what the page holds.
    pub fn data_ref<T: Any>(&self) -> Option<&T> {
        self.data.as_deref().and_then(|data| data.downcast_ref())
    }
}

impl fmt::Debug for ProTableResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProTableResult")
            .field("success", &self.success)
            .field("data", &self.data.as_ref().map(|_| "<payload>"))
            .field("total", &self.total)
            .field("current", &self.current)
            .field("page_size", &self.page_size)
            .finish()
    }
}

/// Whatever a handler hands back to the transport layer.
#[derive(Debug)]
pub enum ResponseEnvelope {
    Api(ApiResult),
    Table(ProTableResult),
    /// A handler result that is not an envelope. Never inspected.
    Raw(Payload),
}

impl ResponseEnvelope {
    /// Short name of the envelope shape, for logs.
    pub fn label(&self) -> &'static str {
        match self {
            ResponseEnvelope::Api(_) => "api",
            ResponseEnvelope::Table(_) => "table",
            ResponseEnvelope::Raw(_) => "raw",
        }
    }

    /// Returns the inner `ApiResult`, if any.
    pub fn as_api(&self) -> Option<&ApiResult> {
        match self {
            ResponseEnvelope::Api(result) => Some(result),
            _ => None,
        }
    }

    /// Returns the inner `ProTableResult`, if any.
    pub fn as_table(&self) -> Option<&ProTableResult> {
        match self {
            ResponseEnvelope::Table(result) => Some(result),
            _ => None,
        }
    }
}

impl From<ApiResult> for ResponseEnvelope {
    fn from(result: ApiResult) -> Self {
        ResponseEnvelope::Api(result)
    }
}

impl From<ProTableResult> for ResponseEnvelope {
    fn from(result: ProTableResult) -> Self {
        ResponseEnvelope::Table(result)
    }
}
