use crate::sequencer::Phase;

/// Receives phase and plan completion signals.
///
/// Calls are fire-and-forget: implementations swallow their own failures.
pub trait Notifier {
    /// A countdown ran out. Not called for skips.
    fn play_cue(&mut self, section_index: usize, phase: Phase);

    /// The last rest phase ended, by countdown or skip.
    fn plan_finished(&mut self) {}
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentNotifier;

impl Notifier for SilentNotifier {
    fn play_cue(&mut self, _section_index: usize, _phase: Phase) {}
}

impl<N: Notifier + ?Sized> Notifier for Box<N> {
    fn play_cue(&mut self, section_index: usize, phase: Phase) {
        (**self).play_cue(section_index, phase);
    }

    fn plan_finished(&mut self) {
        (**self).plan_finished();
    }
}
