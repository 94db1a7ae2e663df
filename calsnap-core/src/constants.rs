/// Granularity of the slot sweep. Candidate slots always start on :00 or :30.
pub const SLOT_STEP_MINUTES: i64 = 30;

pub const DEFAULT_DURATION_MINUTES: u32 = 60;
pub const DEFAULT_SEARCH_DAYS: u32 = 5;
/// Longest search range accepted, in days.
pub const MAX_SEARCH_DAYS: u32 = 366 * 2;
pub const DEFAULT_WORK_HOUR_START: u32 = 9;
pub const DEFAULT_WORK_HOUR_END: u32 = 18;
pub const DEFAULT_LUNCH_START: u32 = 12;
pub const DEFAULT_LUNCH_END: u32 = 13;

/// Slots scoring above this (but below 1) count as a good match.
pub const GOOD_MATCH_THRESHOLD: f64 = 0.6;

/// Colours handed out to calendars in the order they are added.
pub const CALENDAR_COLORS: [&str; 8] = [
    "#3B82F6", // Blue
    "#10B981", // Emerald
    "#F59E0B", // Amber
    "#8B5CF6", // Violet
    "#EC4899", // Pink
    "#6366F1", // Indigo
    "#EF4444", // Red
    "#14B8A6", // Teal
];
