// DOM element ids expected in index.html
pub const BALL_ID: &str = "ball";
pub const COLOR_BUTTON_ID: &str = "color-button";

// Events
pub const DEVICE_MOTION_EVENT: &str = "devicemotion";
pub const POINTER_MOVE_EVENT: &str = "mousemove";
pub const PAGE_HIDE_EVENT: &str = "pagehide";
pub const PAGE_SHOW_EVENT: &str = "pageshow";
