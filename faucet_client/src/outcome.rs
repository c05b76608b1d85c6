//! The success/error overlay shown after a faucet request.

use {faucet_rpc::faucet::RequestOutcome, std::time::Duration, web_time::Instant};

/// Time an outcome stays visible before it is cleared.
pub const OUTCOME_DISPLAY_DURATION: Duration = Duration::from_secs(4);

/// Identifies one display of an outcome. Expiring with a stale token is a
/// no-op, so a timer started for an earlier outcome can't hide a later one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OutcomeToken(u64);

#[derive(Debug)]
struct Shown {
    outcome: RequestOutcome,
    token: OutcomeToken,
    shown_at: Instant,
}

#[derive(Debug)]
pub struct OutcomeSlot {
    current: Option<Shown>,
    generation: u64,
    display_for: Duration,
}

impl Default for OutcomeSlot {
    fn default() -> Self {
        Self::new(OUTCOME_DISPLAY_DURATION)
    }
}

impl OutcomeSlot {
    pub fn new(display_for: Duration) -> Self {
        Self {
            current: None,
            generation: 0,
            display_for,
        }
    }

    pub fn display_for(&self) -> Duration {
        self.display_for
    }

    /// Replaces the displayed outcome.
    pub fn show(&mut self, outcome: RequestOutcome, now: Instant) -> OutcomeToken {
        self.generation += 1;

        let token = OutcomeToken(self.generation);

        self.current = Some(Shown {
            outcome,
            token,
            shown_at: now,
        });

        token
    }

    /// The displayed outcome, ignoring its deadline.
    pub fn current(&self) -> Option<&RequestOutcome> {
        self.current.as_ref().map(|shown| &shown.outcome)
    }

    /// The outcome as it should appear at `now`: visible strictly before its
    /// deadline.
    pub fn visible_at(&self, now: Instant) -> Option<&RequestOutcome> {
        self.current
            .as_ref()
            .filter(|shown| now < shown.shown_at + self.display_for)
            .map(|shown| &shown.outcome)
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.current
            .as_ref()
            .map(|shown| shown.shown_at + self.display_for)
    }

    pub fn token(&self) -> Option<OutcomeToken> {
        self.current.as_ref().map(|shown| shown.token)
    }

    /// Clears the outcome if `token` still identifies it. Returns whether
    /// anything was cleared.
    pub fn expire(&mut self, token: OutcomeToken) -> bool {
        if self.token() == Some(token) {
            self.current = None;
            true
        } else {
            false
        }
    }

    /// Clears the outcome if its deadline has passed at `now`.
    pub fn expire_due(&mut self, now: Instant) -> bool {
        if self.current.is_some() && self.visible_at(now).is_none() {
            self.current = None;
            true
        } else {
            false
        }
    }

    pub fn clear(&mut self) {
        self.current = None;
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        faucet_rpc::faucet::{Drip, FaucetError},
    };

    fn drip() -> RequestOutcome {
        RequestOutcome::Success(Drip {
            amount: "0.5".to_owned(),
            hash: "0xdead".to_owned(),
            block_number: Some(42),
        })
    }

    #[test]
    fn clears_exactly_at_deadline() {
        let mut slot = OutcomeSlot::default();
        let now = Instant::now();

        slot.show(drip(), now);

        assert_eq!(slot.deadline(), Some(now + Duration::from_secs(4)));
        assert!(slot.visible_at(now).is_some());
        assert!(slot.visible_at(now + Duration::from_millis(3999)).is_some());
        assert!(!slot.expire_due(now + Duration::from_millis(3999)));
        assert!(slot.visible_at(now + Duration::from_secs(4)).is_none());

        assert!(slot.expire_due(now + Duration::from_secs(4)));
        assert!(slot.current().is_none());
    }

    #[test]
    fn stale_token_keeps_newer_outcome() {
        let mut slot = OutcomeSlot::default();
        let now = Instant::now();

        let first = slot.show(RequestOutcome::Failure(FaucetError::Network), now);
        let second = slot.show(drip(), now + Duration::from_secs(2));

        assert!(!slot.expire(first));
        assert_eq!(slot.current(), Some(&drip()));

        assert!(slot.expire(second));
        assert!(slot.current().is_none());
        assert!(!slot.expire(second));
    }
}
