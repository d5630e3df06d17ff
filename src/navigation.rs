//! Multi-page flip sequencing.

use crate::gesture::Step;

/// Delay between two flips of a sequence, in milliseconds.
pub const FLIP_INTERVAL_MS: u64 = 250;

/// Delay after the final flip before linear easing is released, in milliseconds.
pub const EASE_RELEASE_MS: u64 = 350;

/// Something the slider has to do on behalf of the sequencer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SequencerAction {
    /// Move the current index one page and settle on it
    Flip(Step),
    /// Toggle linear easing on the container
    LinearEase(bool),
}

/// Progress of an in-flight sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SequenceProgress {
    /// Page the sequence is heading to
    pub destination: usize,
    /// Flips performed so far
    pub completed: usize,
    /// Flips needed in total
    pub total: usize,
}

#[derive(Clone, Copy, Debug)]
struct FlipSequence {
    step: Step,
    progress: SequenceProgress,
    next_flip_at: u64,
}

/// Steps toward a destination page one flip at a time.
///
/// The sequencer does not own a timer. The caller passes the current time
/// (in milliseconds, monotonic) to [`begin`](Self::begin) and
/// [`poll`](Self::poll) and applies the returned actions in order.
///
/// At most one sequence is in flight: beginning a new one replaces the
/// previous sequence and drops its pending ease release.
///
/// ## Example
///
/// ```rust
/// use fade_slider::gesture::Step;
/// use fade_slider::navigation::{NavigationSequencer, SequencerAction};
///
/// let mut seq = NavigationSequencer::new();
/// let first = seq.begin(0, 2, 0);
/// assert_eq!(
///     first,
///     vec![SequencerAction::Flip(Step::Forward), SequencerAction::LinearEase(true)]
/// );
///
/// assert!(seq.poll(100).is_empty());
/// assert_eq!(seq.poll(250), vec![SequencerAction::Flip(Step::Forward)]);
/// assert_eq!(seq.poll(600), vec![SequencerAction::LinearEase(false)]);
/// assert!(seq.is_idle());
/// ```
#[derive(Clone, Debug, Default)]
pub struct NavigationSequencer {
    active: Option<FlipSequence>,
    ease_release_at: Option<u64>,
}

impl NavigationSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a sequence from `current` to `destination` at time `now_ms`.
    ///
    /// From idle the first flip happens immediately. When a sequence is
    /// already in flight in the same direction, the new one inherits its
    /// pending flip time and no flip is returned, so repeated requests never
    /// flip faster than [`FLIP_INTERVAL_MS`]. A reversal flips immediately.
    ///
    /// When `destination == current` no flip is needed; a running sequence is
    /// cancelled so that it stops there.
    pub fn begin(
        &mut self,
        current: usize,
        destination: usize,
        now_ms: u64,
    ) -> Vec<SequencerAction> {
        if destination == current {
            return if self.active.is_some() { self.cancel() } else { Vec::new() };
        }

        let step = if destination > current { Step::Forward } else { Step::Backward };
        let total = destination.abs_diff(current);

        let first_flip_at = match self.active.take() {
            Some(prev) if prev.step == step => {
                log::debug!(
                    "redirecting flip sequence from {} to {}, next flip at {}",
                    prev.progress.destination,
                    destination,
                    prev.next_flip_at
                );
                prev.next_flip_at
            }
            Some(prev) => {
                log::debug!(
                    "reversing flip sequence to {} after {}/{} flips",
                    prev.progress.destination,
                    prev.progress.completed,
                    prev.progress.total
                );
                now_ms
            }
            None => now_ms,
        };
        self.ease_release_at = None;
        log::debug!("flip sequence {} -> {} ({} flips)", current, destination, total);

        self.active = Some(FlipSequence {
            step,
            progress: SequenceProgress { destination, completed: 0, total },
            next_flip_at: first_flip_at,
        });

        let mut actions = Vec::new();
        if first_flip_at <= now_ms {
            self.flip(first_flip_at, &mut actions);
        }
        actions
    }

    /// Run every flip and ease release that is due at `now_ms`.
    pub fn poll(&mut self, now_ms: u64) -> Vec<SequencerAction> {
        let mut actions = Vec::new();

        while let Some(seq) = self.active {
            if seq.next_flip_at > now_ms {
                break;
            }
            self.flip(seq.next_flip_at, &mut actions);
        }

        if self.ease_release_at.is_some_and(|at| at <= now_ms) {
            self.ease_release_at = None;
            actions.push(SequencerAction::LinearEase(false));
        }

        actions
    }

    /// Drop the running sequence, if any, and release linear easing.
    pub fn cancel(&mut self) -> Vec<SequencerAction> {
        let had_sequence = self.active.take().is_some();
        let had_release = self.ease_release_at.take().is_some();
        if had_sequence || had_release {
            vec![SequencerAction::LinearEase(false)]
        } else {
            Vec::new()
        }
    }

    /// Returns true while flips remain to be performed.
    #[inline]
    pub fn is_in_flight(&self) -> bool {
        self.active.is_some()
    }

    /// Returns true when neither flips nor an ease release are pending.
    #[inline]
    pub fn is_idle(&self) -> bool {
        self.active.is_none() && self.ease_release_at.is_none()
    }

    /// Progress of the running sequence.
    pub fn progress(&self) -> Option<SequenceProgress> {
        self.active.map(|seq| seq.progress)
    }

    /// Earliest time at which [`poll`](Self::poll) has work to do.
    pub fn next_deadline(&self) -> Option<u64> {
        match (self.active.map(|s| s.next_flip_at), self.ease_release_at) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    fn flip(&mut self, at: u64, actions: &mut Vec<SequencerAction>) {
        let Some(mut seq) = self.active else {
            return;
        };

        actions.push(SequencerAction::Flip(seq.step));
        seq.progress.completed += 1;
        log::trace!(
            "flip {}/{} toward {}",
            seq.progress.completed,
            seq.progress.total,
            seq.progress.destination
        );

        if seq.progress.completed < seq.progress.total {
            actions.push(SequencerAction::LinearEase(true));
            seq.next_flip_at = at + FLIP_INTERVAL_MS;
            self.active = Some(seq);
        } else {
            self.active = None;
            self.ease_release_at = Some(at + EASE_RELEASE_MS);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flips(actions: &[SequencerAction]) -> usize {
        actions
            .iter()
            .filter(|a| matches!(a, SequencerAction::Flip(_)))
            .count()
    }

    #[test]
    fn test_same_index_is_noop() {
        let mut seq = NavigationSequencer::new();
        assert!(seq.begin(3, 3, 0).is_empty());
        assert!(seq.is_idle());
    }

    #[test]
    fn test_single_flip() {
        let mut seq = NavigationSequencer::new();
        let actions = seq.begin(2, 1, 1000);
        assert_eq!(actions, vec![SequencerAction::Flip(Step::Backward)]);
        assert!(!seq.is_in_flight());
        assert!(!seq.is_idle());
        assert_eq!(seq.next_deadline(), Some(1350));

        assert!(seq.poll(1349).is_empty());
        assert_eq!(seq.poll(1350), vec![SequencerAction::LinearEase(false)]);
        assert!(seq.is_idle());
    }

    #[test]
    fn test_flip_count_matches_distance() {
        let mut seq = NavigationSequencer::new();
        let mut all = seq.begin(0, 4, 0);
        let mut now = 0;
        while !seq.is_idle() {
            now += 50;
            all.extend(seq.poll(now));
        }
        assert_eq!(flips(&all), 4);
        assert_eq!(all.last(), Some(&SequencerAction::LinearEase(false)));
        // Last flip at 750, release 350 later
        assert_eq!(now, 1100);
    }

    #[test]
    fn test_poll_catches_up() {
        let mut seq = NavigationSequencer::new();
        seq.begin(0, 3, 0);
        let actions = seq.poll(10_000);
        assert_eq!(flips(&actions), 2);
        assert_eq!(actions.last(), Some(&SequencerAction::LinearEase(false)));
        assert!(seq.is_idle());
    }

    #[test]
    fn test_progress() {
        let mut seq = NavigationSequencer::new();
        seq.begin(5, 1, 0);
        assert_eq!(
            seq.progress(),
            Some(SequenceProgress { destination: 1, completed: 1, total: 4 })
        );
        seq.poll(250);
        assert_eq!(seq.progress().map(|p| p.completed), Some(2));
    }

    #[test]
    fn test_new_sequence_replaces_old() {
        let mut seq = NavigationSequencer::new();
        seq.begin(0, 4, 0);
        seq.poll(250);

        // Now at index 2, heading back to 1
        let actions = seq.begin(2, 1, 300);
        assert_eq!(actions, vec![SequencerAction::Flip(Step::Backward)]);
        assert!(!seq.is_in_flight());

        // The old chain never fires again
        let later = seq.poll(5_000);
        assert_eq!(later, vec![SequencerAction::LinearEase(false)]);
    }

    #[test]
    fn test_repeated_request_keeps_flip_interval() {
        let mut seq = NavigationSequencer::new();
        assert_eq!(flips(&seq.begin(0, 5, 0)), 1);

        // Still at index 1; asking again must not add flips
        assert!(seq.poll(10).is_empty());
        assert!(seq.begin(1, 5, 10).is_empty());
        assert!(seq.begin(1, 5, 20).is_empty());
        assert_eq!(seq.next_deadline(), Some(250));
        assert_eq!(
            seq.progress(),
            Some(SequenceProgress { destination: 5, completed: 0, total: 4 })
        );

        assert!(seq.poll(249).is_empty());
        assert_eq!(flips(&seq.poll(250)), 1);
        assert_eq!(flips(&seq.poll(999)), 2);
        assert_eq!(flips(&seq.poll(1_000)), 1);
        assert!(!seq.is_in_flight());
    }

    #[test]
    fn test_redirect_further_keeps_pending_flip() {
        let mut seq = NavigationSequencer::new();
        seq.begin(0, 2, 0);

        // Extending the sequence mid-flight waits for the scheduled flip
        assert!(seq.begin(1, 4, 100).is_empty());
        assert!(seq.poll(249).is_empty());
        assert_eq!(
            seq.poll(250),
            vec![SequencerAction::Flip(Step::Forward), SequencerAction::LinearEase(true)]
        );
        assert_eq!(seq.progress().map(|p| p.destination), Some(4));
    }

    #[test]
    fn test_redirect_to_current_stops_sequence() {
        let mut seq = NavigationSequencer::new();
        seq.begin(0, 4, 0);
        seq.poll(250);

        // Index is 2 now; asking for 2 halts the remaining flips
        assert_eq!(seq.begin(2, 2, 300), vec![SequencerAction::LinearEase(false)]);
        assert!(seq.is_idle());
        assert!(seq.poll(5_000).is_empty());
    }

    #[test]
    fn test_cancel() {
        let mut seq = NavigationSequencer::new();
        assert!(seq.cancel().is_empty());

        seq.begin(0, 3, 0);
        assert_eq!(seq.cancel(), vec![SequencerAction::LinearEase(false)]);
        assert!(seq.is_idle());
        assert!(seq.poll(1_000).is_empty());
    }
}
