use crate::sys::geometry::Rect;

/// Application content hosted inside a window, below the title bar.
pub trait WindowContent {
    /// Called with the window's frame when the content is mounted and again
    /// whenever the window moves or changes size.
    fn frame_changed(&mut self, frame: Rect);
}

impl<F: FnMut(Rect)> WindowContent for F {
    fn frame_changed(&mut self, frame: Rect) { self(frame) }
}
