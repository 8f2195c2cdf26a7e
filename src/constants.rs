// World units are screen pixels, origin at the bottom-left of the window
pub const WINDOW_WIDTH: f32 = 400.0;
pub const WINDOW_HEIGHT: f32 = 600.0;

// Triangle outline of the booster, relative to its base point
pub const LANDER_VERTICES: [[f32; 2]; 3] = [[-10.0, 0.0], [0.0, 30.0], [10.0, 0.0]];
