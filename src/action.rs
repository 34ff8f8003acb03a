use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::coords::Direction;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
	Move(Direction),
	/// Sell when standing on the base, otherwise dig the faced cell.
	Use,
	Quit,
}

/// Auto-repeat for held movement keys. The most recently pressed key that is
/// still down drives the repeat.
#[derive(Debug, Clone)]
pub struct KeyRepeat {
	delay: Duration,
	interval: Duration,
	held: Vec<Direction>,
	until_next: Duration,
}

impl KeyRepeat {
	pub fn new(delay: Duration, interval: Duration) -> Self {
		Self { delay, interval, held: Vec::new(), until_next: delay }
	}

	pub fn held(&self) -> Option<Direction> {
		self.held.last().copied()
	}

	pub fn press(&mut self, dir: Direction) -> Action {
		self.held.retain(|d| *d != dir);
		self.held.push(dir);
		self.until_next = self.delay;
		Action::Move(dir)
	}

	/// Forgets `dir`. If it was driving the repeat, the next key still held
	/// takes over after a fresh initial delay.
	pub fn release(&mut self, dir: Direction) {
		let was_active = self.held() == Some(dir);
		self.held.retain(|d| *d != dir);
		if was_active {
			self.until_next = self.delay;
		}
	}

	/// Advances the hold timer and returns the repeated moves that fell due.
	pub fn advance(&mut self, dt: Duration) -> Vec<Action> {
		let mut out = Vec::new();
		let Some(dir) = self.held() else {
			return out;
		};
		let mut left = dt;
		while left >= self.until_next {
			left -= self.until_next;
			out.push(Action::Move(dir));
			if self.interval.is_zero() {
				break;
			}
			self.until_next = self.interval;
		}
		self.until_next -= left.min(self.until_next);
		out
	}
}
