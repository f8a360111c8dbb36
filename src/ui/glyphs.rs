// 5x5 glyph bitmaps, brightness 0-9 per pixel, row-major.

/// One 5x5 indicator image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph(pub [[u8; 5]; 5]);

impl Glyph {
    pub const BLANK: Glyph = Glyph([[0; 5]; 5]);
}

/// Idle arrow shown while waiting for the confirm trigger.
pub const IDLE_ARROW: Glyph = Glyph([
    [0, 0, 9, 0, 0],
    [0, 9, 0, 0, 0],
    [9, 9, 9, 9, 9],
    [0, 9, 0, 0, 0],
    [0, 0, 9, 0, 0],
]);

/// Target shown while a burst is being sampled.
pub const TARGET: Glyph = Glyph([
    [0, 0, 9, 0, 0],
    [0, 9, 9, 9, 0],
    [9, 9, 0, 9, 9],
    [0, 9, 9, 9, 0],
    [0, 0, 9, 0, 0],
]);

/// Check mark: session complete.
pub const SESSION_DONE: Glyph = Glyph([
    [0, 0, 0, 0, 0],
    [0, 0, 0, 0, 9],
    [0, 0, 0, 9, 0],
    [9, 0, 9, 0, 0],
    [0, 9, 0, 0, 0],
]);

/// Smiley: node alive / graceful shutdown.
pub const SHUTDOWN: Glyph = Glyph([
    [0, 0, 0, 0, 0],
    [0, 9, 0, 9, 0],
    [0, 0, 0, 0, 0],
    [9, 0, 0, 0, 9],
    [0, 9, 9, 9, 0],
]);

/// Cross: absorbed fault.
pub const ERROR: Glyph = Glyph([
    [9, 0, 0, 0, 9],
    [0, 9, 0, 9, 0],
    [0, 0, 9, 0, 0],
    [0, 9, 0, 9, 0],
    [9, 0, 0, 0, 9],
]);

/// Countdown digits 3, 2, 1, rotated 90 degrees clockwise so they read
/// upright on a wrist-mounted node. A countdown of `t` seconds plays the
/// last `t` entries.
pub const COUNTDOWN: [Glyph; 3] = [
    // 3
    Glyph([
        [9, 0, 9, 0, 9],
        [9, 0, 9, 0, 9],
        [9, 0, 9, 0, 9],
        [9, 9, 9, 9, 9],
        [9, 9, 9, 9, 9],
    ]),
    // 2
    Glyph([
        [9, 9, 9, 0, 9],
        [9, 0, 9, 0, 9],
        [9, 0, 9, 0, 9],
        [9, 0, 9, 0, 9],
        [9, 0, 9, 9, 9],
    ]),
    // 1
    Glyph([
        [0, 0, 0, 0, 0],
        [0, 0, 0, 9, 0],
        [9, 9, 9, 9, 9],
        [9, 9, 9, 9, 9],
        [0, 0, 0, 0, 0],
    ]),
];
