pub mod in_memory_repository;
pub mod model;
pub mod repository;
pub mod service;

pub use in_memory_repository::InMemoryMonitoringRepository;
pub use model::{Alert, Metric, MonitoringStats, Trace, TraceStatus, TraceStep};
pub use repository::MonitoringRepository;
pub use service::MonitoringService;
