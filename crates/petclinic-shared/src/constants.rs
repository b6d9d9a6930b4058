//! Application-wide constants

pub const DEFAULT_PAGE_SIZE: u32 = 5;
pub const VIP_VISIT_THRESHOLD: usize = 5;
pub const SUMMARY_TITLE: &str = "Owner Status Summary";
pub const FLASH_COOKIE: &str = "petclinic_flash";
pub const FLASH_MAX_AGE_SECS: i64 = 60;
