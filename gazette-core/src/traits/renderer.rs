//! Display renderer trait

/// Trait for the panel renderer
///
/// Layout, word-wrap and panel refresh are entirely up to the
/// implementation. The call is fire-and-forget; a renderer that fails
/// should log and carry on.
pub trait Renderer {
    /// Show one frame
    fn show(&mut self, time: &str, headline: &str, weather: &str);
}

impl<T: Renderer + ?Sized> Renderer for &mut T {
    fn show(&mut self, time: &str, headline: &str, weather: &str) {
        T::show(self, time, headline, weather)
    }
}
