pub const MINUTE: u32 = 60;
pub const HOUR: u32 = 60 * MINUTE;
pub const PRODUCTIVITY_TIME: u32 = 25 * MINUTE;
pub const BREAK_TIME: u32 = 5 * MINUTE;
pub const CANCELLED_TEXT: &str = "cancelled";
