pub mod allow_list;
pub mod date_time_manager;
pub mod inspection_property_service;
pub mod inspection_verifier;
pub mod property_service;
pub mod scan_property_service;

pub use allow_list::RepositoryAllowList;
pub use date_time_manager::{
    parse_time_zone, DateTimeManager, TimeZoneSetting, DEFAULT_DATE_TIME_PATTERN,
};
pub use inspection_property_service::{host_name, InspectionPropertyService, DEFAULT_MAX_RETRY_COUNT};
pub use inspection_verifier::{InspectionVerifier, Violation};
pub use property_service::PropertyService;
pub use scan_property_service::ScanPropertyService;
