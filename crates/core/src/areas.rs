//! The fixed set of monitored areas.
//!
//! Served as-is by `GET /api/areas`; there is no areas table.

/// Monitored area names, in display order.
pub const AREA_NAMES: &[&str] = &[
    "강남 MICE 관광특구",
    "동대문 관광특구",
    "명동 관광특구",
    "이태원 관광특구",
    "홍대 관광특구",
    "광화문·덕수궁",
    "관악 관광특구",
    "잠실 관광특구",
];

/// Whether `name` is one of the monitored areas.
pub fn is_known_area(name: &str) -> bool {
    AREA_NAMES.contains(&name)
}
