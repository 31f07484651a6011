//! Edge signal trait

/// Debounced boolean input
///
/// The control logic derives edges itself by comparing consecutive
/// polls of [`EdgeSignal::is_on`].
pub trait EdgeSignal {
    /// Prepare the input; called once before the first poll
    fn begin(&mut self) {}

    /// Take a sample; called every control cycle
    fn update(&mut self);

    /// Current debounced state
    fn is_on(&self) -> bool;
}
