//! SLA metrics, compliance scoring and alerting

mod service;

pub use service::SlaService;
