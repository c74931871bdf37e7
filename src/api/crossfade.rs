use std::time::Duration;

use crate::animation::{Easing, OnUpdate, Transition};

/// How the outgoing set starts its fade-out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetireFrom {
    /// Finish the fade-in first, then fade out from full opacity.
    FullAlpha,
    /// Freeze the fade-in and fade out from the alpha reached so far.
    CurrentAlpha,
}

/// One label or ruler set together with its alpha animation.
#[derive(Debug, Clone, PartialEq)]
pub struct FadingSet<T> {
    pub items: T,
    alpha: f64,
    transition: Option<Transition>,
}

impl<T> FadingSet<T> {
    #[must_use]
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    fn advance(&mut self, delta: Duration) -> bool {
        let Self {
            alpha, transition, ..
        } = self;
        let Some(active) = transition else {
            return false;
        };
        let running = active.advance(delta, &mut OnUpdate(|value| *alpha = value));
        if !running {
            *transition = None;
        }
        running
    }

    fn fade(&mut self, to: f64, duration: Duration, easing: Easing) {
        let Self {
            alpha, transition, ..
        } = self;
        let mut next = Transition::new(*alpha, to, duration, easing);
        next.start(&mut OnUpdate(|value| *alpha = value));
        *transition = next.is_active().then_some(next);
    }
}

/// Current set fading in plus retired sets fading out.
#[derive(Debug, Clone, PartialEq)]
pub struct Crossfade<T> {
    current: Option<FadingSet<T>>,
    retired: Vec<FadingSet<T>>,
    duration: Duration,
    retire_from: RetireFrom,
}

impl<T> Crossfade<T> {
    #[must_use]
    pub fn new(duration: Duration, retire_from: RetireFrom) -> Self {
        Self {
            current: None,
            retired: Vec::new(),
            duration,
            retire_from,
        }
    }

    #[must_use]
    pub fn current(&self) -> Option<&FadingSet<T>> {
        self.current.as_ref()
    }

    #[must_use]
    pub fn retired_len(&self) -> usize {
        self.retired.len()
    }

    /// Installs a new current set. The very first set appears at full alpha;
    /// later ones fade in while the previous one is retired.
    pub fn replace(&mut self, items: T) {
        let mut incoming = FadingSet {
            items,
            alpha: 1.0,
            transition: None,
        };

        if let Some(mut outgoing) = self.current.take() {
            let start_alpha = match self.retire_from {
                RetireFrom::FullAlpha => {
                    if let Some(fade_in) = outgoing.transition.as_mut() {
                        let alpha = &mut outgoing.alpha;
                        fade_in.end(&mut OnUpdate(|value| *alpha = value));
                    }
                    outgoing.alpha
                }
                RetireFrom::CurrentAlpha => {
                    if let Some(fade_in) = outgoing.transition.as_mut() {
                        let alpha = &mut outgoing.alpha;
                        fade_in.cancel(&mut OnUpdate(|value| *alpha = value));
                    }
                    outgoing.alpha
                }
            };
            outgoing.transition = None;
            outgoing.fade(0.0, self.duration.mul_f64(start_alpha.clamp(0.0, 1.0)), Easing::Decelerate);
            if outgoing.transition.is_some() {
                self.retired.push(outgoing);
            }

            incoming.alpha = 0.0;
            incoming.fade(1.0, self.duration, Easing::Accelerate);
        }

        self.current = Some(incoming);
    }

    /// Advances all alpha animations and removes retired sets that faded out.
    pub fn advance(&mut self, delta: Duration) -> bool {
        let mut running = false;
        if let Some(current) = self.current.as_mut() {
            running |= current.advance(delta);
        }
        self.retired.retain_mut(|set| set.advance(delta));
        running || !self.retired.is_empty()
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.retired.is_empty()
            || self
                .current
                .as_ref()
                .is_some_and(|set| set.transition.is_some())
    }

    /// Retired sets first, then the current set, skipping invisible ones.
    pub fn iter_visible(&self) -> impl Iterator<Item = &FadingSet<T>> + '_ {
        self.retired
            .iter()
            .chain(self.current.iter())
            .filter(|set| set.alpha > 0.0)
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut FadingSet<T>> + '_ {
        self.retired.iter_mut().chain(self.current.iter_mut())
    }
}
