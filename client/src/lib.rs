//! Typed requests for the Camunda engine REST API.
//!
//! Each request is a plain value that knows its url, its JSON body and how to
//! decode the response; `CamundaRequest::send` performs it over an
//! `HttpTransport`.

pub mod batch;
pub mod migration;
pub mod request;
pub mod transport;

pub use camunda_base::error::{CamundaError, EngineErrorPayload, Result};
pub use request::CamundaRequest;
pub use transport::{HttpTransport, ReqwestTransport, TransportResponse};
